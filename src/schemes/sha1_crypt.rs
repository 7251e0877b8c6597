//! sha1_crypt 实现
//!
//! NetBSD 引入的基于 HMAC-SHA1 迭代的 crypt 格式：
//!
//! ```text
//! $sha1$<rounds>$<salt>$<checksum>
//! ```
//!
//! 算法：以 `salt || "$sha1$" || rounds` 为初始消息，以密码为密钥反复计算
//! HMAC-SHA1，每轮的消息是上一轮的 MAC 输出。最终 20 字节按固定偏移表转置
//! 为 21 字节后 hash64 编码，得到 28 字符的 checksum。

use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::crypto::h64::{self, HASH64_CHARS};
use crate::error::{CryptoError, Error, Result};
use crate::handler::{
    Backend, BackendSet, HashHandler, HashRecord, NativeCrypt, NativeProbe, RoundsCost,
    RoundsPolicy, SaltPolicy, SchemeDescriptor,
};

type HmacSha1 = Hmac<Sha1>;

/// sha1_crypt 的方案常量
pub const SHA1_CRYPT: SchemeDescriptor = SchemeDescriptor {
    name: "sha1_crypt",
    ident: "$sha1$",
    checksum_size: 28,
    checksum_chars: HASH64_CHARS,
    salt: Some(SaltPolicy {
        min_size: 0,
        max_size: 64,
        default_size: 8,
        chars: HASH64_CHARS,
    }),
    rounds: Some(RoundsPolicy {
        min: 1,
        max: u32::MAX,
        default: 40000,
        cost: RoundsCost::Linear,
    }),
};

// 下标 0 出现两次，与其他实现互通必须保持原样
const CHECKSUM_OFFSETS: [usize; 21] = [
    2, 1, 0, 5, 4, 3, 8, 7, 6, 11, 10, 9, 14, 13, 12, 17, 16, 15, 0, 19, 18,
];

const BACKENDS: &[Backend] = &[Backend::NativeSystem, Backend::PureComputation];

const PROBE: NativeProbe = NativeProbe {
    secret: b"test",
    hash: "$sha1$1$Wq3GL2Vp$C8U25GvfHS8qGHimExLaiSFlGkAe",
};

/// sha1_crypt 配置
#[derive(Debug, Clone)]
pub struct Sha1CryptConfig {
    /// 默认 rounds（默认 40000）
    pub default_rounds: u32,
    /// 默认 salt 长度（默认 8）
    pub default_salt_size: usize,
    /// 宿主系统 crypt 设施
    pub native: Option<Arc<dyn NativeCrypt>>,
}

impl Default for Sha1CryptConfig {
    fn default() -> Self {
        Self {
            default_rounds: 40000,
            default_salt_size: 8,
            native: None,
        }
    }
}

impl Sha1CryptConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置默认 rounds，超出 `1..=4294967295` 时钳制
    pub fn with_default_rounds(mut self, rounds: u32) -> Self {
        self.default_rounds = rounds;
        self
    }

    /// 设置默认 salt 长度，超出 `0..=64` 时钳制
    pub fn with_default_salt_size(mut self, size: usize) -> Self {
        self.default_salt_size = size;
        self
    }

    /// 注入宿主系统 crypt 设施
    pub fn with_native(mut self, native: Arc<dyn NativeCrypt>) -> Self {
        self.native = Some(native);
        self
    }
}

/// sha1_crypt 方案
///
/// # Example
///
/// ```rust
/// use passctx::handler::{HashHandler, HashSettings};
/// use passctx::schemes::Sha1Crypt;
///
/// let handler = Sha1Crypt::new();
/// let hash = handler
///     .encrypt(b"password", &HashSettings::new().with_rounds(1000))
///     .unwrap();
/// assert!(hash.starts_with("$sha1$1000$"));
/// assert!(handler.verify(b"password", &hash).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Sha1Crypt {
    descriptor: SchemeDescriptor,
    backends: BackendSet,
}

impl Default for Sha1Crypt {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha1Crypt {
    /// 以默认配置创建
    pub fn new() -> Self {
        Self::with_config(Sha1CryptConfig::default())
    }

    /// 以指定配置创建
    pub fn with_config(config: Sha1CryptConfig) -> Self {
        let name = SHA1_CRYPT.name;
        let mut descriptor = SHA1_CRYPT;

        if let Some(rounds) = descriptor.rounds {
            descriptor.rounds = Some(rounds.with_default(config.default_rounds).into_logged(name));
        }
        if let Some(salt) = descriptor.salt {
            let default_size = salt
                .normalize_size(Some(config.default_salt_size))
                .into_logged(name);
            descriptor.salt = Some(SaltPolicy {
                default_size,
                ..salt
            });
        }

        let mut backends = BackendSet::new(BACKENDS, PROBE);
        if let Some(native) = config.native {
            backends = backends.with_native(native);
        }

        Self {
            descriptor,
            backends,
        }
    }

    /// 当前选中的后端
    pub fn backend(&self) -> Backend {
        self.backends.selected().unwrap_or(Backend::PureComputation)
    }

    /// 后端是否可用
    pub fn has_backend(&self, backend: Backend) -> bool {
        self.backends.is_available(backend)
    }

    /// 强制使用指定后端计算 checksum
    ///
    /// 后端不可用或宿主设施本次调用失败时返回 `Ok(None)`，不回退。
    pub fn checksum_with(
        &self,
        backend: Backend,
        secret: &[u8],
        record: &HashRecord,
    ) -> Result<Option<String>> {
        match backend {
            Backend::NativeSystem => Ok(self
                .backends
                .native()
                .and_then(|native| self.native_checksum(native, secret, record))),
            Backend::PureComputation => builtin_checksum(secret, record).map(Some),
        }
    }

    fn native_checksum(
        &self,
        native: &dyn NativeCrypt,
        secret: &[u8],
        record: &HashRecord,
    ) -> Option<String> {
        let settings = self.render(&record.to_config());
        let (ok, hash) = native.crypt(secret, &settings);
        if !ok {
            return None;
        }
        let (prefix, checksum) = hash.rsplit_once('$')?;
        if prefix != settings
            || checksum.len() != self.descriptor.checksum_size
            || !h64::is_hash64(checksum)
        {
            return None;
        }
        Some(checksum.to_string())
    }
}

impl HashHandler for Sha1Crypt {
    fn descriptor(&self) -> &SchemeDescriptor {
        &self.descriptor
    }

    fn parse(&self, encoded: &str) -> Result<HashRecord> {
        let name = self.descriptor.name;
        let rest = encoded
            .strip_prefix(self.descriptor.ident)
            .ok_or_else(|| Error::malformed(name, "missing $sha1$ prefix"))?;

        let mut fields = rest.split('$');
        let rounds = fields.next().unwrap_or_default();
        let salt = fields
            .next()
            .ok_or_else(|| Error::malformed(name, "missing salt field"))?;
        let checksum = fields.next();
        if fields.next().is_some() {
            return Err(Error::malformed(name, "too many fields"));
        }

        let rounds = parse_rounds(rounds).map_err(|reason| Error::malformed(name, reason))?;
        // 空的 checksum 字段与省略等价
        let checksum = checksum.filter(|c| !c.is_empty()).map(str::to_string);

        HashRecord::from_parsed(&self.descriptor, rounds, salt, checksum)
    }

    fn render(&self, record: &HashRecord) -> String {
        let mut out = format!(
            "{}{}${}",
            self.descriptor.ident,
            record.rounds(),
            record.salt()
        );
        if let Some(checksum) = record.checksum() {
            out.push('$');
            out.push_str(checksum);
        }
        out
    }

    fn compute_checksum(&self, secret: &[u8], record: &HashRecord) -> Result<String> {
        for backend in self.backends.order() {
            match backend {
                Backend::NativeSystem => {
                    let Some(native) = self.backends.native() else {
                        continue;
                    };
                    if let Some(checksum) = self.native_checksum(native, secret, record) {
                        return Ok(checksum);
                    }
                    tracing::debug!(
                        scheme = self.descriptor.name,
                        "native crypt failed, falling back to builtin"
                    );
                }
                Backend::PureComputation => return builtin_checksum(secret, record),
            }
        }
        builtin_checksum(secret, record)
    }
}

/// 十进制、无前导零的 rounds 字段
fn parse_rounds(field: &str) -> std::result::Result<u32, &'static str> {
    if field.is_empty() {
        return Err("empty rounds field");
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err("non-numeric rounds field");
    }
    if field.starts_with('0') {
        return Err("zero-padded rounds");
    }
    field.parse::<u32>().map_err(|_| "rounds out of range")
}

fn builtin_checksum(secret: &[u8], record: &HashRecord) -> Result<String> {
    let keyed = HmacSha1::new_from_slice(secret)
        .map_err(|e| Error::Crypto(CryptoError::MacFailed(e.to_string())))?;

    // 注意初始消息的顺序与哈希字符串不同
    let seed = format!("{}$sha1${}", record.salt(), record.rounds());

    let mut mac = keyed.clone();
    mac.update(seed.as_bytes());
    let mut digest = mac.finalize().into_bytes();

    for _ in 1..record.rounds() {
        let mut mac = keyed.clone();
        mac.update(&digest);
        digest = mac.finalize().into_bytes();
    }

    Ok(h64::encode_transposed_bytes(&digest, &CHECKSUM_OFFSETS))
}
