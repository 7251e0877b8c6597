//! 密码学工具模块
//!
//! 提供 crypt 系列哈希共用的编码工具。
//!
//! ## 功能
//!
//! - **hash64 编码**: `./0-9A-Za-z` 字母表上的小端序类 base64 编码
//! - **转置编码**: 按固定偏移表重排摘要字节后再编码
//!
//! ## 示例
//!
//! ```rust
//! use passctx::crypto::h64::{encode_transposed_bytes, HASH64_CHARS};
//!
//! let digest = [0u8; 20];
//! let encoded = encode_transposed_bytes(&digest, &[2, 1, 0]);
//! assert_eq!(encoded, "....");
//! assert!(encoded.chars().all(|c| HASH64_CHARS.contains(c)));
//! ```

pub mod h64;

pub use h64::{HASH64_CHARS, encode_bytes, encode_transposed_bytes};
