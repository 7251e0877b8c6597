//! 哈希方案契约

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handler::record::{HashRecord, HashSettings, SchemeDescriptor};
use crate::random::constant_time_compare_str;

/// 共享的方案实例
pub type HandlerRef = Arc<dyn HashHandler>;

/// 所有密码哈希方案都要实现的契约
///
/// 必须实现的只有 [`descriptor`](Self::descriptor)、[`parse`](Self::parse)、
/// [`render`](Self::render) 和 [`compute_checksum`](Self::compute_checksum)；
/// salt 生成、rounds 规整、验证以及 `genconfig` / `genhash` / `encrypt`
/// 都基于描述中声明的能力提供默认实现。
///
/// 实现必须是 `Send + Sync`：除一次性的后端探测缓存外，方案实例不可变。
pub trait HashHandler: fmt::Debug + Send + Sync {
    /// 方案描述
    fn descriptor(&self) -> &SchemeDescriptor;

    /// 解析哈希字符串
    ///
    /// 前缀、字段数、字符集、长度或数字格式错误时返回 `Malformed`。
    fn parse(&self, encoded: &str) -> Result<HashRecord>;

    /// 渲染记录为规范字符串；仅含配置的记录不输出 checksum 字段
    fn render(&self, record: &HashRecord) -> String;

    /// 计算 checksum
    fn compute_checksum(&self, secret: &[u8], record: &HashRecord) -> Result<String>;

    /// 方案名称
    fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// 生成 `size` 个 salt 字符；不支持 salt 的方案返回空串
    fn generate_salt(&self, size: usize) -> Result<String> {
        match &self.descriptor().salt {
            Some(policy) => policy.generate(size),
            None => Ok(String::new()),
        }
    }

    /// 规整 rounds：`None` 取默认值，越界时钳制并记录警告
    fn normalize_rounds(&self, requested: Option<u32>) -> u32 {
        match &self.descriptor().rounds {
            Some(policy) => policy.normalize(requested).into_logged(self.name()),
            None => 0,
        }
    }

    /// 校验密码
    ///
    /// 解析失败时返回错误；仅含配置的字符串永远不匹配。
    fn verify(&self, secret: &[u8], encoded: &str) -> Result<bool> {
        let record = self.parse(encoded)?;
        let Some(expected) = record.checksum() else {
            return Ok(false);
        };
        let actual = self.compute_checksum(secret, &record)?;
        Ok(constant_time_compare_str(&actual, expected))
    }

    /// 字符串是否属于本方案
    fn identify(&self, encoded: &str) -> bool {
        self.parse(encoded).is_ok()
    }

    /// 按参数生成仅含配置的记录
    fn configure(&self, settings: &HashSettings) -> Result<HashRecord> {
        let descriptor = self.descriptor();

        let salt = match (&descriptor.salt, &settings.salt) {
            (Some(policy), Some(salt)) => {
                policy.validate(salt).map_err(Error::invalid_setting)?;
                salt.clone()
            }
            (Some(policy), None) => {
                let size = policy
                    .normalize_size(settings.salt_size)
                    .into_logged(self.name());
                self.generate_salt(size)?
            }
            (None, Some(_)) => {
                return Err(Error::invalid_setting(format!(
                    "{} does not take a salt",
                    self.name()
                )));
            }
            (None, None) => String::new(),
        };

        let rounds = self.normalize_rounds(settings.rounds);
        HashRecord::new(descriptor, rounds, salt, None)
    }

    /// 生成配置字符串
    fn genconfig(&self, settings: &HashSettings) -> Result<String> {
        Ok(self.render(&self.configure(settings)?))
    }

    /// 以配置字符串（或完整哈希）中的配置哈希 `secret`
    fn genhash(&self, secret: &[u8], config: &str) -> Result<String> {
        let record = self.parse(config)?.to_config();
        let checksum = self.compute_checksum(secret, &record)?;
        Ok(self.render(&record.with_checksum(self.descriptor(), checksum)?))
    }

    /// 以新配置哈希 `secret`
    fn encrypt(&self, secret: &[u8], settings: &HashSettings) -> Result<String> {
        let record = self.configure(settings)?;
        let checksum = self.compute_checksum(secret, &record)?;
        Ok(self.render(&record.with_checksum(self.descriptor(), checksum)?))
    }
}
