//! 多后端解析
//!
//! 一个方案可以声明有序的后端列表。`NativeSystem` 委托给宿主系统的密码哈希
//! 设施（通过 [`NativeCrypt`] 注入），`PureComputation` 直接实现算法，总是可用。
//!
//! 宿主设施的可用性在首次使用时以方案专属的测试向量探测一次，结果缓存在
//! 方案实例内，之后不再重新探测。

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

/// 计算 checksum 的后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// 宿主系统的 crypt 设施
    NativeSystem,
    /// 纯计算实现
    PureComputation,
}

impl Backend {
    /// 后端名称
    pub fn name(&self) -> &'static str {
        match self {
            Backend::NativeSystem => "os_crypt",
            Backend::PureComputation => "builtin",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 宿主系统的密码哈希设施
///
/// 约定：返回 `(true, hash)` 且 `hash` 为完整的编码哈希时表示成功。
/// 本库不关心实现细节，只依赖这一约定。
pub trait NativeCrypt: fmt::Debug + Send + Sync {
    /// 以 `settings`（配置字符串或完整哈希）哈希 `secret`
    fn crypt(&self, secret: &[u8], settings: &str) -> (bool, String);
}

/// 探测宿主设施所用的测试向量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeProbe {
    pub secret: &'static [u8],
    pub hash: &'static str,
}

/// 方案持有的有序后端集合
#[derive(Debug)]
pub struct BackendSet {
    order: &'static [Backend],
    probe: NativeProbe,
    native: Option<Arc<dyn NativeCrypt>>,
    native_ok: OnceLock<bool>,
}

impl BackendSet {
    /// 以声明顺序和探测向量创建后端集合
    pub fn new(order: &'static [Backend], probe: NativeProbe) -> Self {
        Self {
            order,
            probe,
            native: None,
            native_ok: OnceLock::new(),
        }
    }

    /// 注入宿主设施
    pub fn with_native(mut self, native: Arc<dyn NativeCrypt>) -> Self {
        self.native = Some(native);
        self.native_ok = OnceLock::new();
        self
    }

    /// 声明的后端顺序
    pub fn order(&self) -> &'static [Backend] {
        self.order
    }

    /// 宿主设施（仅在探测通过时返回）
    pub fn native(&self) -> Option<&dyn NativeCrypt> {
        if self.is_available(Backend::NativeSystem) {
            self.native.as_deref()
        } else {
            None
        }
    }

    /// 后端是否可用
    ///
    /// 对 `NativeSystem` 的首次调用会执行探测并缓存结果。
    pub fn is_available(&self, backend: Backend) -> bool {
        if !self.order.contains(&backend) {
            return false;
        }
        match backend {
            Backend::PureComputation => true,
            Backend::NativeSystem => *self.native_ok.get_or_init(|| self.run_probe()),
        }
    }

    /// 当前选中的后端：声明顺序中第一个可用的
    pub fn selected(&self) -> Option<Backend> {
        self.order.iter().copied().find(|b| self.is_available(*b))
    }

    fn run_probe(&self) -> bool {
        let Some(native) = &self.native else {
            return false;
        };
        let (ok, result) = native.crypt(self.probe.secret, self.probe.hash);
        let available = ok && result == self.probe.hash;
        tracing::debug!(available, "probed native crypt backend");
        available
    }
}

impl Clone for BackendSet {
    /// 克隆得到的集合会重新探测
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            probe: self.probe,
            native: self.native.clone(),
            native_ok: OnceLock::new(),
        }
    }
}
