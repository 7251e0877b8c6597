//! 集成测试共用的方案与宿主设施替身

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use passctx::crypto::HASH64_CHARS;
use passctx::handler::{HashHandler, HashRecord, NativeCrypt, SaltPolicy, SchemeDescriptor};
use passctx::schemes::Sha1Crypt;
use passctx::{Error, Result};
use sha1::{Digest, Sha1};

const HEX_CHARS: &str = "0123456789abcdef";

pub const PROBE_HASH: &str = "$sha1$1$Wq3GL2Vp$C8U25GvfHS8qGHimExLaiSFlGkAe";

fn hex_sha1(parts: &[&[u8]]) -> String {
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part);
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// ============================================================================
// 测试用方案
// ============================================================================

const UNSALTED: SchemeDescriptor = SchemeDescriptor {
    name: "unsalted",
    ident: "",
    checksum_size: 40,
    checksum_chars: HEX_CHARS,
    salt: None,
    rounds: None,
};

/// 无 salt：40 位十六进制摘要
#[derive(Debug, Default)]
pub struct Unsalted;

impl HashHandler for Unsalted {
    fn descriptor(&self) -> &SchemeDescriptor {
        &UNSALTED
    }

    fn parse(&self, encoded: &str) -> Result<HashRecord> {
        HashRecord::from_parsed(&UNSALTED, 0, "", Some(encoded.to_string()))
    }

    fn render(&self, record: &HashRecord) -> String {
        record.checksum().unwrap_or_default().to_string()
    }

    fn compute_checksum(&self, secret: &[u8], _record: &HashRecord) -> Result<String> {
        Ok(hex_sha1(&[b"boblious", secret]))
    }
}

const SALTED: SchemeDescriptor = SchemeDescriptor {
    name: "salted",
    ident: "@salt",
    checksum_size: 40,
    checksum_chars: HEX_CHARS,
    salt: Some(SaltPolicy {
        min_size: 2,
        max_size: 2,
        default_size: 2,
        chars: HASH64_CHARS,
    }),
    rounds: None,
};

/// 固定 2 字符 salt：`@salt<salt><hex>`
#[derive(Debug, Default)]
pub struct Salted;

impl HashHandler for Salted {
    fn descriptor(&self) -> &SchemeDescriptor {
        &SALTED
    }

    fn parse(&self, encoded: &str) -> Result<HashRecord> {
        let rest = encoded
            .strip_prefix(SALTED.ident)
            .ok_or_else(|| Error::malformed(SALTED.name, "missing prefix"))?;
        let Some(salt) = rest.get(..2) else {
            return Err(Error::malformed(SALTED.name, "missing salt"));
        };
        let checksum = &rest[2..];
        let checksum = (!checksum.is_empty()).then(|| checksum.to_string());
        HashRecord::from_parsed(&SALTED, 0, salt, checksum)
    }

    fn render(&self, record: &HashRecord) -> String {
        format!(
            "{}{}{}",
            SALTED.ident,
            record.salt(),
            record.checksum().unwrap_or_default()
        )
    }

    fn compute_checksum(&self, secret: &[u8], record: &HashRecord) -> Result<String> {
        Ok(hex_sha1(&[record.salt().as_bytes(), secret]))
    }
}

const SAMPLE: SchemeDescriptor = SchemeDescriptor {
    name: "sample",
    ident: "@sample$",
    checksum_size: 40,
    checksum_chars: HEX_CHARS,
    salt: Some(SaltPolicy {
        min_size: 4,
        max_size: 16,
        default_size: 8,
        chars: HASH64_CHARS,
    }),
    rounds: None,
};

/// 可变长度 salt：`@sample$<salt>$<hex>`
#[derive(Debug, Default)]
pub struct Sample;

impl HashHandler for Sample {
    fn descriptor(&self) -> &SchemeDescriptor {
        &SAMPLE
    }

    fn parse(&self, encoded: &str) -> Result<HashRecord> {
        let rest = encoded
            .strip_prefix(SAMPLE.ident)
            .ok_or_else(|| Error::malformed(SAMPLE.name, "missing prefix"))?;
        let (salt, checksum) = match rest.split_once('$') {
            Some((salt, checksum)) => (salt, Some(checksum.to_string())),
            None => (rest, None),
        };
        HashRecord::from_parsed(&SAMPLE, 0, salt, checksum)
    }

    fn render(&self, record: &HashRecord) -> String {
        match record.checksum() {
            Some(checksum) => format!("{}{}${}", SAMPLE.ident, record.salt(), checksum),
            None => format!("{}{}", SAMPLE.ident, record.salt()),
        }
    }

    fn compute_checksum(&self, secret: &[u8], record: &HashRecord) -> Result<String> {
        Ok(hex_sha1(&[record.salt().as_bytes(), b"$", secret]))
    }
}

// ============================================================================
// 宿主 crypt 设施替身
// ============================================================================

/// 宿主设施的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// 正确实现 sha1_crypt
    Correct,
    /// 通过探测，但之后的调用都报告失败
    FailAfterProbe,
    /// 通过探测，但之后返回固定的 checksum（用于确认优先走宿主设施）
    Marked,
    /// 不支持 sha1_crypt
    Unsupported,
}

/// 记录调用次数的宿主设施替身
#[derive(Debug)]
pub struct HostCrypt {
    mode: HostMode,
    calls: AtomicUsize,
}

pub const MARKED_CHECKSUM: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAA";

impl HostCrypt {
    pub fn new(mode: HostMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NativeCrypt for HostCrypt {
    fn crypt(&self, secret: &[u8], settings: &str) -> (bool, String) {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let is_probe = settings == PROBE_HASH;
        match self.mode {
            HostMode::Unsupported => (false, String::new()),
            HostMode::FailAfterProbe if !is_probe => (false, String::new()),
            HostMode::Marked if !is_probe => (true, format!("{}${}", settings, MARKED_CHECKSUM)),
            _ => match Sha1Crypt::new().genhash(secret, settings) {
                Ok(hash) => (true, hash),
                Err(_) => (false, String::new()),
            },
        }
    }
}
