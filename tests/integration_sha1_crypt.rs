//! 集成测试：sha1_crypt 方案
//!
//! 测试线格式、参考向量、多后端解析与回退。

mod common;

use std::sync::Arc;
use std::thread;

use common::{HostCrypt, HostMode, MARKED_CHECKSUM, PROBE_HASH};
use passctx::handler::{Backend, HashHandler, HashRecord, HashSettings};
use passctx::schemes::{SHA1_CRYPT, Sha1Crypt, Sha1CryptConfig};

fn with_host(mode: HostMode) -> (Sha1Crypt, Arc<HostCrypt>) {
    let host = Arc::new(HostCrypt::new(mode));
    let handler = Sha1Crypt::with_config(
        Sha1CryptConfig::new()
            .with_default_rounds(20)
            .with_native(host.clone()),
    );
    (handler, host)
}

/// 测试参考向量
#[test]
fn test_reference_vector() {
    let handler = Sha1Crypt::new();
    let record = HashRecord::new(&SHA1_CRYPT, 1, "Wq3GL2Vp", None).unwrap();

    let checksum = handler.compute_checksum(b"test", &record).unwrap();
    assert_eq!(checksum, "C8U25GvfHS8qGHimExLaiSFlGkAe");

    let full = record.with_checksum(&SHA1_CRYPT, checksum).unwrap();
    assert_eq!(handler.render(&full), PROBE_HASH);
    assert!(handler.verify(b"test", PROBE_HASH).unwrap());
    assert!(!handler.verify(b"Test", PROBE_HASH).unwrap());
}

/// 测试解析与渲染互逆
#[test]
fn test_parse_render_round_trip() {
    let handler = Sha1Crypt::new();
    let records = [
        HashRecord::new(&SHA1_CRYPT, 1, "", None).unwrap(),
        HashRecord::new(&SHA1_CRYPT, 40000, "abcdefgh", None).unwrap(),
        HashRecord::new(&SHA1_CRYPT, u32::MAX, "./09AZaz", None).unwrap(),
        HashRecord::new(&SHA1_CRYPT, 480000, "x".repeat(64), None).unwrap(),
        HashRecord::new(
            &SHA1_CRYPT,
            1,
            "Wq3GL2Vp",
            Some("C8U25GvfHS8qGHimExLaiSFlGkAe".to_string()),
        )
        .unwrap(),
    ];

    for record in records {
        let rendered = handler.render(&record);
        assert_eq!(handler.parse(&rendered).unwrap(), record, "{}", rendered);
    }
}

/// 测试补零的 rounds 被拒绝
#[test]
fn test_zero_padded_rounds_rejected() {
    let handler = Sha1Crypt::new();
    let hash = format!("$sha1$040000$abcdefgh${}", "x".repeat(28));
    assert!(handler.parse(&hash).unwrap_err().is_malformed());
    assert!(handler.verify(b"test", &hash).is_err());

    // 同样的值不补零则可以解析
    let hash = format!("$sha1$40000$abcdefgh${}", "x".repeat(28));
    assert_eq!(handler.parse(&hash).unwrap().rounds(), 40000);
}

/// 测试 checksum 只取决于密码、salt 与 rounds
#[test]
fn test_checksum_is_deterministic() {
    let a = Sha1Crypt::new();
    let b = Sha1Crypt::with_config(Sha1CryptConfig::new().with_default_rounds(7));
    let record = HashRecord::new(&SHA1_CRYPT, 25, "saltsalt", None).unwrap();

    let first = a.compute_checksum(b"secret", &record).unwrap();
    assert_eq!(first, a.compute_checksum(b"secret", &record).unwrap());
    assert_eq!(first, b.compute_checksum(b"secret", &record).unwrap());

    let other_salt = HashRecord::new(&SHA1_CRYPT, 25, "saltsalT", None).unwrap();
    assert_ne!(first, a.compute_checksum(b"secret", &other_salt).unwrap());

    let other_rounds = HashRecord::new(&SHA1_CRYPT, 26, "saltsalt", None).unwrap();
    assert_ne!(first, a.compute_checksum(b"secret", &other_rounds).unwrap());
}

/// 测试非 UTF-8 密码
#[test]
fn test_binary_secret() {
    let handler = Sha1Crypt::with_config(Sha1CryptConfig::new().with_default_rounds(3));
    let secret = [0xffu8, 0x00, 0xfe, 0x80];
    let hash = handler.encrypt(&secret, &HashSettings::new()).unwrap();
    assert!(handler.verify(&secret, &hash).unwrap());
    assert!(!handler.verify(&secret[..3], &hash).unwrap());
}

/// 测试两个后端结果逐字节一致
#[test]
fn test_backend_equivalence() {
    let (handler, _host) = with_host(HostMode::Correct);
    assert!(handler.has_backend(Backend::NativeSystem));
    assert!(handler.has_backend(Backend::PureComputation));

    for (salt, rounds) in [("Wq3GL2Vp", 1), ("", 3), ("abc./XYZ", 17)] {
        let record = HashRecord::new(&SHA1_CRYPT, rounds, salt, None).unwrap();
        let native = handler
            .checksum_with(Backend::NativeSystem, b"password", &record)
            .unwrap()
            .expect("native backend should succeed");
        let builtin = handler
            .checksum_with(Backend::PureComputation, b"password", &record)
            .unwrap()
            .expect("builtin backend always succeeds");
        assert_eq!(native, builtin);
    }
}

/// 测试可用时优先使用宿主设施
#[test]
fn test_native_backend_preferred() {
    let (handler, host) = with_host(HostMode::Marked);
    assert_eq!(handler.backend(), Backend::NativeSystem);

    let hash = handler.encrypt(b"password", &HashSettings::new()).unwrap();
    assert!(hash.ends_with(MARKED_CHECKSUM));
    // 探测一次 + 计算一次
    assert_eq!(host.calls(), 2);
}

/// 测试宿主设施单次失败时回退到纯计算
#[test]
fn test_per_call_fallback() {
    let (handler, host) = with_host(HostMode::FailAfterProbe);
    assert_eq!(handler.backend(), Backend::NativeSystem);

    let hash = handler
        .encrypt(b"test", &HashSettings::new().with_salt("Wq3GL2Vp").with_rounds(1))
        .unwrap();
    assert_eq!(hash, PROBE_HASH);
    assert!(handler.verify(b"test", &hash).unwrap());

    // 探测通过后仍然每次先尝试宿主设施
    assert_eq!(host.calls(), 3);
    assert_eq!(handler.backend(), Backend::NativeSystem);
}

/// 测试探测失败时使用纯计算，且探测结果被缓存
#[test]
fn test_probe_failure_cached() {
    let (handler, host) = with_host(HostMode::Unsupported);
    assert_eq!(handler.backend(), Backend::PureComputation);
    assert!(!handler.has_backend(Backend::NativeSystem));

    let hash = handler.encrypt(b"password", &HashSettings::new()).unwrap();
    assert!(handler.verify(b"password", &hash).unwrap());
    assert_eq!(host.calls(), 1);
}

/// 测试探测只在首次使用时进行
#[test]
fn test_probe_is_lazy() {
    let (handler, host) = with_host(HostMode::Correct);
    assert_eq!(host.calls(), 0);
    let _ = handler.backend();
    let _ = handler.backend();
    assert_eq!(host.calls(), 1);
}

/// 测试多线程共享同一方案实例
#[test]
fn test_concurrent_use() {
    let (handler, host) = with_host(HostMode::Correct);
    let handler = Arc::new(handler);

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let handler = Arc::clone(&handler);
            thread::spawn(move || {
                let secret = format!("secret-{}", i);
                let hash = handler
                    .encrypt(secret.as_bytes(), &HashSettings::new())
                    .unwrap();
                handler.verify(secret.as_bytes(), &hash).unwrap()
            })
        })
        .collect();

    for worker in workers {
        assert!(worker.join().unwrap());
    }
    assert!(host.calls() >= 1);
}
