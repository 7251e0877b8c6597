//! 注册项与查找键

use std::sync::Arc;

use crate::handler::{HandlerRef, HashHandler};

/// 注册到 CryptContext 的方案：方案类型（以默认配置实例化）或现成实例
///
/// 两种形式在存入集合前都会被规整为共享实例。
#[derive(Debug, Clone)]
pub enum HandlerSpec {
    /// 以默认配置构造实例的工厂
    Factory(fn() -> HandlerRef),
    /// 现成的实例
    Instance(HandlerRef),
}

fn build_default<H: HashHandler + Default + 'static>() -> HandlerRef {
    Arc::new(H::default())
}

impl HandlerSpec {
    /// 以方案类型注册，使用其默认配置
    ///
    /// ```rust
    /// use passctx::context::HandlerSpec;
    /// use passctx::schemes::Sha1Crypt;
    ///
    /// let spec = HandlerSpec::of::<Sha1Crypt>();
    /// assert_eq!(spec.into_handler().name(), "sha1_crypt");
    /// ```
    pub fn of<H: HashHandler + Default + 'static>() -> Self {
        HandlerSpec::Factory(build_default::<H>)
    }

    /// 以现成实例注册
    pub fn instance(handler: impl HashHandler + 'static) -> Self {
        HandlerSpec::Instance(Arc::new(handler))
    }

    /// 规整为共享实例
    pub fn into_handler(self) -> HandlerRef {
        match self {
            HandlerSpec::Factory(build) => build(),
            HandlerSpec::Instance(handler) => handler,
        }
    }
}

impl From<HandlerRef> for HandlerSpec {
    fn from(handler: HandlerRef) -> Self {
        HandlerSpec::Instance(handler)
    }
}

impl From<&HandlerRef> for HandlerSpec {
    fn from(handler: &HandlerRef) -> Self {
        HandlerSpec::Instance(Arc::clone(handler))
    }
}

/// 集合成员的查找键：按实例（同一性）或按方案名称
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    /// 按实例查找，只匹配同一个实例
    Handler(&'a HandlerRef),
    /// 按方案名称查找
    Name(&'a str),
}

impl<'a> From<&'a str> for Member<'a> {
    fn from(name: &'a str) -> Self {
        Member::Name(name)
    }
}

impl<'a> From<&'a String> for Member<'a> {
    fn from(name: &'a String) -> Self {
        Member::Name(name.as_str())
    }
}

impl<'a> From<&'a HandlerRef> for Member<'a> {
    fn from(handler: &'a HandlerRef) -> Self {
        Member::Handler(handler)
    }
}

impl Member<'_> {
    /// 键对应的方案名称
    pub fn name(&self) -> &str {
        match self {
            Member::Handler(handler) => handler.name(),
            Member::Name(name) => name,
        }
    }
}
