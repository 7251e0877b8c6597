//! 哈希方案契约模块
//!
//! 定义任何具体密码哈希方案都要实现的契约 [`HashHandler`]，以及方案通过组合
//! 获得的能力。
//!
//! ## 组成
//!
//! - **[`HashHandler`]**: 解析、渲染、生成、校验
//! - **[`SchemeDescriptor`]**: 方案常量（名称、前缀、checksum 长度与字符集）
//! - **[`SaltPolicy`] / [`RoundsPolicy`]**: salt 与 rounds 能力
//! - **[`BackendSet`]**: 多后端解析，宿主设施可用性只探测一次
//! - **[`HashRecord`]**: 一个哈希实例的不可变表示
//!
//! ## 示例
//!
//! ```rust
//! use passctx::handler::HashHandler;
//! use passctx::schemes::Sha1Crypt;
//!
//! let handler = Sha1Crypt::new();
//! let record = handler.parse("$sha1$1$Wq3GL2Vp$C8U25GvfHS8qGHimExLaiSFlGkAe").unwrap();
//! assert_eq!(record.rounds(), 1);
//! assert_eq!(record.salt(), "Wq3GL2Vp");
//! assert!(handler.verify(b"test", &handler.render(&record)).unwrap());
//! ```

mod backend;
mod capability;
mod contract;
mod record;

pub use backend::{Backend, BackendSet, NativeCrypt, NativeProbe};
pub use capability::{Normalized, RoundsCost, RoundsPolicy, SaltPolicy, SettingWarning};
pub use contract::{HandlerRef, HashHandler};
pub use record::{HashRecord, HashSettings, SchemeDescriptor};
