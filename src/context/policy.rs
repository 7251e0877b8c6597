//! 解析、识别、哈希与验证策略

use std::sync::Arc;

use crate::context::crypt_context::CryptContext;
use crate::error::{ContextError, Error, Result};
use crate::handler::{HandlerRef, HashSettings};

/// [`CryptContext::encrypt`] 的选项
///
/// ## 示例
///
/// ```rust
/// use passctx::context::EncryptOptions;
///
/// let existing = "$sha1$1$Wq3GL2Vp$C8U25GvfHS8qGHimExLaiSFlGkAe";
/// let options = EncryptOptions::new()
///     .with_alg("sha1_crypt")
///     .with_existing_hash(existing)
///     .keep_salt(true);
/// assert!(options.keep_salt);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncryptOptions<'a> {
    /// 已有的哈希；配合 `keep_salt` 复用其 salt
    pub existing_hash: Option<&'a str>,
    /// 显式指定的方案名称，省略时使用默认方案
    pub alg: Option<&'a str>,
    /// 是否复用 `existing_hash` 的 salt
    pub keep_salt: bool,
    /// 传给方案的参数
    pub settings: HashSettings,
}

impl<'a> EncryptOptions<'a> {
    /// 创建默认选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置已有哈希
    pub fn with_existing_hash(mut self, hash: &'a str) -> Self {
        self.existing_hash = Some(hash);
        self
    }

    /// 指定方案
    pub fn with_alg(mut self, alg: &'a str) -> Self {
        self.alg = Some(alg);
        self
    }

    /// 设置是否复用 salt
    pub fn keep_salt(mut self, keep: bool) -> Self {
        self.keep_salt = keep;
        self
    }

    /// 设置方案参数
    pub fn with_settings(mut self, settings: HashSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl CryptContext {
    /// 识别哈希所属方案，返回方案名称
    ///
    /// 按注册顺序尝试解析，返回第一个成功的方案；`None` 或空串返回 `None`。
    pub fn identify(&self, hash: Option<&str>) -> Option<&'static str> {
        self.identify_handler(hash).map(|h| h.name())
    }

    /// 识别哈希所属方案，返回方案实例
    pub fn identify_handler(&self, hash: Option<&str>) -> Option<&HandlerRef> {
        let hash = hash.filter(|h| !h.is_empty())?;
        self.iter().find(|handler| handler.identify(hash))
    }

    /// 按名称查找方案
    pub fn resolve(&self, name: &str) -> Option<&HandlerRef> {
        self.get_by_name(name)
    }

    /// 按候选名称列表查找方案
    ///
    /// 按调用方给出的顺序逐个尝试，返回第一个已注册的候选。候选顺序即优先级，
    /// 与方案在集合中的注册顺序无关（不会从最后注册的方案往前找）。
    ///
    /// ```rust
    /// use passctx::context::{CryptContext, HandlerSpec};
    /// use passctx::schemes::Sha1Crypt;
    ///
    /// let ctx = CryptContext::new([HandlerSpec::of::<Sha1Crypt>()]).unwrap();
    /// let handler = ctx.resolve_first(["md5_crypt", "sha1_crypt"]).unwrap();
    /// assert_eq!(handler.name(), "sha1_crypt");
    /// assert!(ctx.resolve_first(["md5_crypt"]).is_none());
    /// ```
    pub fn resolve_first<I, S>(&self, candidates: I) -> Option<&HandlerRef>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .find_map(|name| self.get_by_name(name.as_ref()))
    }

    /// 哈希密码
    ///
    /// 方案：`options.alg` 指定的方案，省略时为最后注册的方案。
    /// 同时给出 `existing_hash` 与 `keep_salt` 时，由所选方案解析已有哈希并原样
    /// 复用其 salt（未显式指定 rounds 时也复用其 rounds），相同密码会得到相同
    /// 哈希；否则总是生成新的 salt。
    ///
    /// # Errors
    ///
    /// - 指定的方案未注册：`SchemeNotFound`
    /// - 集合为空：`Empty`
    /// - `keep_salt` 时已有哈希无法被所选方案解析：`Malformed`
    pub fn encrypt(
        &self,
        secret: impl AsRef<[u8]>,
        options: &EncryptOptions<'_>,
    ) -> Result<String> {
        let handler = match options.alg {
            Some(name) => self.by_name(name)?,
            None => self
                .default_handler()
                .ok_or(Error::Context(ContextError::Empty))?,
        };

        let mut settings = options.settings.clone();
        if options.keep_salt
            && let Some(existing) = options.existing_hash
        {
            let record = handler.parse(existing)?;
            settings.salt = Some(record.salt().to_string());
            if settings.rounds.is_none() && handler.descriptor().has_rounds() {
                settings.rounds = Some(record.rounds());
            }
        }

        handler.encrypt(secret.as_ref(), &settings)
    }

    /// 验证密码
    ///
    /// 永远不返回错误：
    ///
    /// - `stored` 为 `None` 时返回 `false`
    /// - 指定 `alg` 时强制使用该方案（即使哈希属于其他方案），方案未注册或
    ///   无法解析哈希时返回 `false`
    /// - 否则识别所属方案，无法识别时返回 `false`
    pub fn verify(
        &self,
        secret: impl AsRef<[u8]>,
        stored: Option<&str>,
        alg: Option<&str>,
    ) -> bool {
        let Some(stored) = stored else {
            return false;
        };

        let handler = match alg {
            Some(name) => self.get_by_name(name),
            None => self.identify_handler(Some(stored)),
        };
        let Some(handler) = handler else {
            tracing::debug!(alg, "no scheme available to verify hash");
            return false;
        };

        match handler.verify(secret.as_ref(), stored) {
            Ok(matched) => matched,
            Err(error) => {
                tracing::debug!(scheme = handler.name(), %error, "hash rejected during verify");
                false
            }
        }
    }

    /// 哈希是否应该用默认方案重新生成
    ///
    /// 以下情况返回 `true`：
    ///
    /// - 哈希属于非默认方案
    /// - 哈希属于默认方案，但 rounds 低于默认方案当前的默认 rounds
    ///
    /// 无法识别的哈希返回 `false`。
    pub fn needs_update(&self, hash: &str) -> bool {
        let (Some(default), Some(owner)) =
            (self.default_handler(), self.identify_handler(Some(hash)))
        else {
            return false;
        };

        if !Arc::ptr_eq(default, owner) {
            return true;
        }

        match (default.descriptor().rounds, default.parse(hash)) {
            (Some(policy), Ok(record)) => record.rounds() < policy.default,
            _ => false,
        }
    }
}
