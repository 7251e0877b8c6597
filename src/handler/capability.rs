//! 可组合的哈希方案能力
//!
//! 每种能力都是一个独立的小型值类型，方案通过组合（而非继承）获得这些能力：
//!
//! - [`SaltPolicy`]: salt 字符集、长度范围、默认长度，以及 salt 生成
//! - [`RoundsPolicy`]: rounds 范围、默认值、成本增长方式
//!
//! 超出范围的 rounds / salt 长度请求会被钳制到最近的边界，并返回一个
//! [`SettingWarning`]；不会被原样接受，也不会被拒绝。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::random::generate_from_charset;

/// rounds 与计算成本的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoundsCost {
    /// 成本与 rounds 成正比
    #[default]
    Linear,
    /// rounds 为 2 的指数，成本为 `2^rounds`
    Log2,
}

/// 参数被钳制时产生的警告
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingWarning {
    /// rounds 超出范围
    RoundsClamped { requested: u32, applied: u32 },
    /// salt 长度超出范围
    SaltSizeClamped { requested: usize, applied: usize },
}

impl fmt::Display for SettingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingWarning::RoundsClamped { requested, applied } => {
                write!(f, "rounds {} out of range, clamped to {}", requested, applied)
            }
            SettingWarning::SaltSizeClamped { requested, applied } => {
                write!(
                    f,
                    "salt size {} out of range, clamped to {}",
                    requested, applied
                )
            }
        }
    }
}

/// 经过范围规整后的参数值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized<T> {
    /// 实际采用的值
    pub value: T,
    /// 值被钳制时的警告
    pub warning: Option<SettingWarning>,
}

impl<T> Normalized<T> {
    fn exact(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// 取出值；若有警告则通过 `tracing` 记录
    pub fn into_logged(self, scheme: &str) -> T {
        if let Some(warning) = self.warning {
            tracing::warn!(scheme, %warning, "hash setting clamped");
        }
        self.value
    }
}

/// salt 能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltPolicy {
    /// 最小长度（字符数）
    pub min_size: usize,
    /// 最大长度（字符数）
    pub max_size: usize,
    /// 默认生成长度
    pub default_size: usize,
    /// 允许的字符
    pub chars: &'static str,
}

impl SaltPolicy {
    /// 规整请求的 salt 长度
    ///
    /// `None` 取默认长度；超出 `[min_size, max_size]` 时钳制并给出警告。
    pub fn normalize_size(&self, requested: Option<usize>) -> Normalized<usize> {
        let Some(requested) = requested else {
            return Normalized::exact(self.default_size);
        };
        let applied = requested.clamp(self.min_size, self.max_size);
        if applied == requested {
            Normalized::exact(requested)
        } else {
            Normalized {
                value: applied,
                warning: Some(SettingWarning::SaltSizeClamped { requested, applied }),
            }
        }
    }

    /// 校验 salt 字符串的长度与字符集
    pub fn validate(&self, salt: &str) -> std::result::Result<(), String> {
        let len = salt.chars().count();
        if len < self.min_size {
            return Err(format!("salt too short (min {} chars)", self.min_size));
        }
        if len > self.max_size {
            return Err(format!("salt too long (max {} chars)", self.max_size));
        }
        if let Some(c) = salt.chars().find(|c| !self.chars.contains(*c)) {
            return Err(format!("invalid character {:?} in salt", c));
        }
        Ok(())
    }

    /// 从字符集中均匀抽取 `size` 个字符，使用线程本地 CSPRNG
    pub fn generate(&self, size: usize) -> Result<String> {
        generate_from_charset(self.chars, size)
    }
}

/// rounds 能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundsPolicy {
    /// 最小 rounds
    pub min: u32,
    /// 最大 rounds
    pub max: u32,
    /// 默认 rounds
    pub default: u32,
    /// 成本增长方式
    pub cost: RoundsCost,
}

impl RoundsPolicy {
    /// 规整请求的 rounds
    ///
    /// `None` 取默认值；超出 `[min, max]` 时钳制并给出警告。
    pub fn normalize(&self, requested: Option<u32>) -> Normalized<u32> {
        let Some(requested) = requested else {
            return Normalized::exact(self.default);
        };
        let applied = requested.clamp(self.min, self.max);
        if applied == requested {
            Normalized::exact(requested)
        } else {
            Normalized {
                value: applied,
                warning: Some(SettingWarning::RoundsClamped { requested, applied }),
            }
        }
    }

    /// 校验 rounds 是否在范围内
    pub fn validate(&self, rounds: u32) -> std::result::Result<(), String> {
        if rounds < self.min || rounds > self.max {
            return Err(format!(
                "rounds {} not in range {}..={}",
                rounds, self.min, self.max
            ));
        }
        Ok(())
    }

    /// 以新的默认值构造策略，默认值本身也会被钳制
    pub fn with_default(self, default: u32) -> Normalized<Self> {
        let normalized = self.normalize(Some(default));
        Normalized {
            value: Self {
                default: normalized.value,
                ..self
            },
            warning: normalized.warning,
        }
    }
}
