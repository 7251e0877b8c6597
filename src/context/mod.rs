//! CryptContext 策略引擎
//!
//! 管理一个有序、按方案名称唯一的方案集合，并基于它哈希和验证密码。新方案可以
//! 随时加入、旧方案可以保留用于验证，已存储的哈希不会因算法迁移而失效。
//!
//! ## 策略
//!
//! - **encrypt**: 使用显式指定的方案，或最后注册的方案
//! - **verify**: 按注册顺序识别哈希所属方案后验证；`None` 或无法识别的哈希返回 `false`
//! - **identify**: 按注册顺序返回第一个能解析该哈希的方案
//! - **resolve**: 按名称或候选名称列表查找方案
//!
//! ## 示例
//!
//! ```rust
//! use passctx::context::{CryptContext, EncryptOptions, HandlerSpec};
//! use passctx::schemes::{Sha1Crypt, Sha1CryptConfig};
//! use passctx::HashSettings;
//!
//! let ctx = CryptContext::new([HandlerSpec::instance(Sha1Crypt::with_config(
//!     Sha1CryptConfig::new().with_default_rounds(1000),
//! ))])
//! .unwrap();
//!
//! let hash = ctx.encrypt("my_password", &EncryptOptions::new()).unwrap();
//! assert_eq!(ctx.identify(Some(&hash)), Some("sha1_crypt"));
//! assert!(ctx.verify("my_password", Some(&hash), None));
//! assert!(!ctx.verify("wrong", Some(&hash), None));
//! assert!(!ctx.verify("my_password", None, None));
//!
//! // 复用已有 salt 重新哈希
//! let again = ctx
//!     .encrypt(
//!         "my_password",
//!         &EncryptOptions::new()
//!             .with_existing_hash(&hash)
//!             .keep_salt(true)
//!             .with_settings(HashSettings::new()),
//!     )
//!     .unwrap();
//! assert_eq!(again, hash);
//! ```

mod crypt_context;
mod entry;
mod policy;

pub use crypt_context::{CryptContext, Iter};
pub use entry::{HandlerSpec, Member};
pub use policy::EncryptOptions;
