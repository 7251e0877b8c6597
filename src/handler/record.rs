//! 哈希记录与方案描述

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::handler::capability::{RoundsPolicy, SaltPolicy};

/// 每个方案的常量描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeDescriptor {
    /// 方案名称，在 CryptContext 中唯一
    pub name: &'static str,
    /// 哈希字符串的标识前缀，如 `$sha1$`
    pub ident: &'static str,
    /// 编码后 checksum 的固定长度
    pub checksum_size: usize,
    /// checksum 允许的字符
    pub checksum_chars: &'static str,
    /// salt 能力，无 salt 的方案为 `None`
    pub salt: Option<SaltPolicy>,
    /// rounds 能力，固定成本的方案为 `None`
    pub rounds: Option<RoundsPolicy>,
}

impl SchemeDescriptor {
    /// 是否支持 salt
    pub fn has_salt(&self) -> bool {
        self.salt.is_some()
    }

    /// 是否支持可变 rounds
    pub fn has_rounds(&self) -> bool {
        self.rounds.is_some()
    }

    fn check(
        &self,
        rounds: u32,
        salt: &str,
        checksum: Option<&str>,
    ) -> std::result::Result<(), String> {
        match &self.rounds {
            Some(policy) => policy.validate(rounds)?,
            None if rounds != 0 => return Err("scheme does not take rounds".to_string()),
            None => {}
        }

        match &self.salt {
            Some(policy) => policy.validate(salt)?,
            None if !salt.is_empty() => return Err("scheme does not take a salt".to_string()),
            None => {}
        }

        if let Some(checksum) = checksum {
            if checksum.chars().count() != self.checksum_size {
                return Err(format!(
                    "checksum must be {} chars, got {}",
                    self.checksum_size,
                    checksum.chars().count()
                ));
            }
            if let Some(c) = checksum.chars().find(|c| !self.checksum_chars.contains(*c)) {
                return Err(format!("invalid character {:?} in checksum", c));
            }
        }

        Ok(())
    }
}

/// 一个哈希实例的解析结果
///
/// `checksum` 为 `None` 时表示仅含配置（rounds + salt）的记录，用于在计算
/// checksum 之前生成配置字符串。记录构造后不可变；重新哈希总是得到新记录。
///
/// 对不支持 rounds 的方案 `rounds` 为 0，不支持 salt 的方案 `salt` 为空串。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashRecord {
    scheme: &'static str,
    rounds: u32,
    salt: String,
    checksum: Option<String>,
}

impl HashRecord {
    /// 由显式参数构造记录，违反方案约束时返回 `InvalidSetting`
    pub fn new(
        descriptor: &SchemeDescriptor,
        rounds: u32,
        salt: impl Into<String>,
        checksum: Option<String>,
    ) -> Result<Self> {
        let salt = salt.into();
        descriptor
            .check(rounds, &salt, checksum.as_deref())
            .map_err(Error::invalid_setting)?;
        Ok(Self {
            scheme: descriptor.name,
            rounds,
            salt,
            checksum,
        })
    }

    /// 由解析出的字段构造记录，违反方案约束时返回 `Malformed`
    pub fn from_parsed(
        descriptor: &SchemeDescriptor,
        rounds: u32,
        salt: impl Into<String>,
        checksum: Option<String>,
    ) -> Result<Self> {
        let salt = salt.into();
        descriptor
            .check(rounds, &salt, checksum.as_deref())
            .map_err(|reason| Error::malformed(descriptor.name, reason))?;
        Ok(Self {
            scheme: descriptor.name,
            rounds,
            salt,
            checksum,
        })
    }

    /// 以同样的配置和新的 checksum 构造完整记录
    pub fn with_checksum(&self, descriptor: &SchemeDescriptor, checksum: String) -> Result<Self> {
        Self::new(descriptor, self.rounds, self.salt.clone(), Some(checksum))
    }

    /// 丢弃 checksum，得到仅含配置的记录
    pub fn to_config(&self) -> Self {
        Self {
            checksum: None,
            ..self.clone()
        }
    }

    /// 所属方案名称
    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// 是否为仅含配置的记录
    pub fn is_config(&self) -> bool {
        self.checksum.is_none()
    }
}

/// 生成哈希时的可选参数
///
/// 所有字段均可省略，省略时使用方案默认值。
///
/// ## 示例
///
/// ```rust
/// use passctx::HashSettings;
///
/// let settings = HashSettings::new().with_rounds(5000).with_salt_size(12);
/// assert_eq!(settings.rounds, Some(5000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashSettings {
    /// 显式 salt，必须满足方案的字符集和长度约束
    pub salt: Option<String>,
    /// 自动生成 salt 时的长度
    pub salt_size: Option<usize>,
    /// rounds
    pub rounds: Option<u32>,
}

impl HashSettings {
    /// 创建空参数
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置显式 salt
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// 设置 salt 长度
    pub fn with_salt_size(mut self, size: usize) -> Self {
        self.salt_size = Some(size);
        self
    }

    /// 设置 rounds
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HASH64_CHARS;
    use crate::handler::capability::RoundsCost;

    const DESC: SchemeDescriptor = SchemeDescriptor {
        name: "demo",
        ident: "$demo$",
        checksum_size: 4,
        checksum_chars: HASH64_CHARS,
        salt: Some(SaltPolicy {
            min_size: 2,
            max_size: 8,
            default_size: 4,
            chars: HASH64_CHARS,
        }),
        rounds: Some(RoundsPolicy {
            min: 1,
            max: 100,
            default: 10,
            cost: RoundsCost::Linear,
        }),
    };

    #[test]
    fn test_new_valid_record() {
        let record = HashRecord::new(&DESC, 10, "abcd", Some("zzzz".to_string())).unwrap();
        assert_eq!(record.scheme(), "demo");
        assert_eq!(record.rounds(), 10);
        assert_eq!(record.salt(), "abcd");
        assert_eq!(record.checksum(), Some("zzzz"));
        assert!(!record.is_config());
    }

    #[test]
    fn test_config_record() {
        let record = HashRecord::new(&DESC, 10, "abcd", None).unwrap();
        assert!(record.is_config());
        let full = record.with_checksum(&DESC, "..//".to_string()).unwrap();
        assert_eq!(full.to_config(), record);
    }

    #[test]
    fn test_invalid_setting_vs_malformed() {
        let err = HashRecord::new(&DESC, 0, "abcd", None).unwrap_err();
        assert!(!err.is_malformed());

        let err = HashRecord::from_parsed(&DESC, 0, "abcd", None).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_checksum_constraints() {
        assert!(HashRecord::new(&DESC, 10, "abcd", Some("zzz".to_string())).is_err());
        assert!(HashRecord::new(&DESC, 10, "abcd", Some("zz$z".to_string())).is_err());
    }

    #[test]
    fn test_salt_constraints() {
        assert!(HashRecord::new(&DESC, 10, "a", None).is_err());
        assert!(HashRecord::new(&DESC, 10, "abcdefghi", None).is_err());
        assert!(HashRecord::new(&DESC, 10, "ab_c", None).is_err());
    }

    #[test]
    fn test_capability_absent() {
        let plain = SchemeDescriptor {
            salt: None,
            rounds: None,
            ..DESC
        };
        assert!(HashRecord::new(&plain, 0, "", None).is_ok());
        assert!(HashRecord::new(&plain, 5, "", None).is_err());
        assert!(HashRecord::new(&plain, 0, "ab", None).is_err());
    }

    #[test]
    fn test_settings_deserialize() {
        let settings: HashSettings = serde_json::from_str(r#"{"rounds": 5000}"#).unwrap();
        assert_eq!(settings, HashSettings::new().with_rounds(5000));
    }
}
