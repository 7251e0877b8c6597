//! 具体哈希方案
//!
//! ## 支持的方案
//!
//! - **sha1_crypt**: 基于 HMAC-SHA1 迭代的 crypt 格式（`$sha1$<rounds>$<salt>$<checksum>`），
//!   可使用宿主系统的 crypt 设施或纯计算实现
//!
//! ## 示例
//!
//! ```rust
//! use passctx::handler::{Backend, HashHandler};
//! use passctx::schemes::Sha1Crypt;
//!
//! let handler = Sha1Crypt::new();
//! assert_eq!(handler.name(), "sha1_crypt");
//! assert_eq!(handler.backend(), Backend::PureComputation);
//! ```

mod sha1_crypt;

pub use sha1_crypt::{SHA1_CRYPT, Sha1Crypt, Sha1CryptConfig};
