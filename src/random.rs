//! 安全随机数生成模块
//!
//! 提供密码学安全的随机数据生成（用于 salt）以及常量时间比较。

use rand::distr::slice::Choose;
use rand::{Rng, TryRngCore, rngs::OsRng};

use crate::error::{CryptoError, Error, Result};

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)
///
/// # Example
///
/// ```rust
/// use passctx::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(32).unwrap();
/// assert_eq!(bytes.len(), 32);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Crypto(CryptoError::RngFailed(format!("{:?}", e))))?;
    Ok(bytes)
}

/// 从给定字符集中均匀抽取字符，生成随机字符串
///
/// 按字符（而非字节）抽样，字符集可以包含任意 Unicode 字符。
///
/// # Arguments
///
/// * `charset` - 字符集，不能为空
/// * `length` - 要生成的字符数
///
/// # Example
///
/// ```rust
/// use passctx::random::generate_from_charset;
///
/// let s = generate_from_charset("abc", 16).unwrap();
/// assert_eq!(s.len(), 16);
/// assert!(s.chars().all(|c| "abc".contains(c)));
/// ```
pub fn generate_from_charset(charset: &str, length: usize) -> Result<String> {
    let symbols: Vec<char> = charset.chars().collect();
    let dist = Choose::new(&symbols).map_err(|_| Error::invalid_setting("empty charset"))?;

    Ok(rand::rng().sample_iter(dist).take(length).copied().collect())
}

/// 常量时间比较两个字节切片
///
/// 用于防止时序攻击
///
/// # Example
///
/// ```rust
/// use passctx::random::constant_time_compare;
///
/// assert!(constant_time_compare(b"checksum", b"checksum"));
/// assert!(!constant_time_compare(b"checksum", b"checksun"));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

/// 常量时间比较两个字符串
pub fn constant_time_compare_str(a: &str, b: &str) -> bool {
    constant_time_compare(a.as_bytes(), b.as_bytes())
}
