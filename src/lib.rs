//! # passctx
//!
//! 一个可插拔的 Rust 密码哈希库。
//!
//! ## 功能特性
//!
//! - **方案契约**: [`HashHandler`] 定义解析、渲染、生成与验证，任何哈希方案都可实现
//! - **可组合能力**: salt、rounds、多后端作为独立的值类型组合进方案
//! - **sha1_crypt**: 基于 HMAC-SHA1 迭代的 crypt 格式，可使用宿主系统 crypt 设施或纯计算实现
//! - **CryptContext**: 有序、按名称唯一的方案集合，支持算法的新增、弃用与迁移
//! - **安全比较**: checksum 使用常量时间比较
//!
//! ## 日志
//!
//! 本库通过 `tracing` 记录事件（参数被钳制时的 `warn`，后端探测与回退的 `debug`），
//! 不会安装任何 subscriber。
//!
//! ## 哈希与验证示例
//!
//! ```rust
//! use passctx::{CryptContext, EncryptOptions, HandlerSpec};
//! use passctx::schemes::Sha1Crypt;
//!
//! let ctx = CryptContext::new([HandlerSpec::of::<Sha1Crypt>()]).unwrap();
//!
//! // 哈希密码（默认方案为最后注册的方案）
//! let hash = ctx.encrypt("my_secure_password", &EncryptOptions::new()).unwrap();
//! assert!(hash.starts_with("$sha1$40000$"));
//!
//! // 验证密码
//! assert!(ctx.verify("my_secure_password", Some(&hash), None));
//! ```
//!
//! ## 直接使用方案
//!
//! ```rust
//! use passctx::HashHandler;
//! use passctx::schemes::Sha1Crypt;
//!
//! let handler = Sha1Crypt::new();
//! let hash = "$sha1$1$Wq3GL2Vp$C8U25GvfHS8qGHimExLaiSFlGkAe";
//! assert!(handler.verify(b"test", hash).unwrap());
//!
//! // 补零的 rounds 是格式错误
//! assert!(handler.parse("$sha1$01$Wq3GL2Vp").is_err());
//! ```

pub mod context;
pub mod crypto;
pub mod error;
pub mod handler;
pub mod random;
pub mod schemes;

pub use error::{Error, Result};

// ============================================================================
// 方案契约相关导出
// ============================================================================

pub use handler::{
    Backend, HandlerRef, HashHandler, HashRecord, HashSettings, NativeCrypt, RoundsCost,
    SchemeDescriptor, SettingWarning,
};

// ============================================================================
// CryptContext 相关导出
// ============================================================================

pub use context::{CryptContext, EncryptOptions, HandlerSpec, Member};

// ============================================================================
// 方案导出
// ============================================================================

pub use schemes::{Sha1Crypt, Sha1CryptConfig};
