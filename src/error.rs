//! 统一错误类型模块
//!
//! 提供 passctx 库中所有操作的错误类型定义。

use std::fmt;

/// passctx 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// passctx 库的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 哈希字符串或哈希参数错误
    Hash(HashError),

    /// CryptContext 集合操作错误
    Context(ContextError),

    /// 密码学原语错误
    Crypto(CryptoError),
}

impl Error {
    /// 创建一个格式错误
    pub fn malformed(scheme: &'static str, reason: impl Into<String>) -> Self {
        Error::Hash(HashError::Malformed {
            scheme,
            reason: reason.into(),
        })
    }

    /// 创建一个参数错误
    pub fn invalid_setting(msg: impl Into<String>) -> Self {
        Error::Hash(HashError::InvalidSetting(msg.into()))
    }

    /// 是否为哈希格式错误
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Hash(HashError::Malformed { .. }))
    }
}

/// 哈希相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// 哈希字符串格式无效（字段数、字符集、长度、数字格式）
    Malformed {
        /// 解析所用的方案名称
        scheme: &'static str,
        /// 失败原因
        reason: String,
    },
    /// 显式传入的参数（如 salt 字符串）不满足方案约束
    InvalidSetting(String),
}

/// CryptContext 相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// 方案名称已存在
    DuplicateScheme(String),
    /// 方案未注册
    SchemeNotFound(String),
    /// 位置越界
    IndexOutOfRange { index: isize, len: usize },
    /// 集合为空，没有默认方案
    Empty,
}

/// 加密原语相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
    /// MAC 初始化失败
    MacFailed(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Hash(e) => write!(f, "Hash error: {}", e),
            Error::Context(e) => write!(f, "Context error: {}", e),
            Error::Crypto(e) => write!(f, "Crypto error: {}", e),
        }
    }
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::Malformed { scheme, reason } => {
                write!(f, "malformed {} hash: {}", scheme, reason)
            }
            HashError::InvalidSetting(msg) => write!(f, "invalid setting: {}", msg),
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::DuplicateScheme(name) => {
                write!(f, "scheme '{}' is already registered", name)
            }
            ContextError::SchemeNotFound(name) => write!(f, "scheme '{}' not found", name),
            ContextError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for context of length {}", index, len)
            }
            ContextError::Empty => write!(f, "context has no schemes"),
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
            CryptoError::MacFailed(msg) => write!(f, "mac initialization failed: {}", msg),
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Hash(e) => Some(e),
            Error::Context(e) => Some(e),
            Error::Crypto(e) => Some(e),
        }
    }
}

impl std::error::Error for HashError {}
impl std::error::Error for ContextError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<HashError> for Error {
    fn from(err: HashError) -> Self {
        Error::Hash(err)
    }
}

impl From<ContextError> for Error {
    fn from(err: ContextError) -> Self {
        Error::Context(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}
