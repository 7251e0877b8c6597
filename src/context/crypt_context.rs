//! CryptContext 集合
//!
//! 有序、按方案名称唯一的方案集合。所有修改操作失败时集合保持不变。

use std::collections::HashSet;
use std::ops::Add;
use std::sync::Arc;

use crate::context::entry::{HandlerSpec, Member};
use crate::error::{ContextError, Error, Result};
use crate::handler::HandlerRef;

#[derive(Debug, Clone)]
struct ContextEntry {
    name: &'static str,
    handler: HandlerRef,
}

impl ContextEntry {
    fn new(handler: HandlerRef) -> Self {
        Self {
            name: handler.name(),
            handler,
        }
    }
}

/// 有序的方案集合与哈希策略引擎
///
/// 最后注册的方案是 [`encrypt`](Self::encrypt) 的默认方案。
///
/// 修改操作需要 `&mut self`；只读操作（`encrypt`、`verify`、`identify`、按位置
/// 读取）可在多线程间共享执行。
///
/// ## 示例
///
/// ```rust
/// use passctx::context::{CryptContext, HandlerSpec};
/// use passctx::schemes::Sha1Crypt;
///
/// let mut ctx = CryptContext::new([HandlerSpec::of::<Sha1Crypt>()]).unwrap();
/// assert_eq!(ctx.len(), 1);
/// assert_eq!(ctx.names(), vec!["sha1_crypt"]);
///
/// // 同名方案不能重复注册
/// assert!(ctx.append(HandlerSpec::of::<Sha1Crypt>()).is_err());
/// assert_eq!(ctx.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CryptContext {
    entries: Vec<ContextEntry>,
}

impl CryptContext {
    /// 由方案列表构造，名称重复时返回 `DuplicateScheme`
    pub fn new<I, S>(handlers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<HandlerSpec>,
    {
        let mut ctx = Self::default();
        ctx.extend(handlers)?;
        Ok(ctx)
    }

    /// 创建空集合
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按注册顺序迭代
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// 按注册顺序列出方案名称
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// 默认方案（最后注册的）
    pub fn default_handler(&self) -> Option<&HandlerRef> {
        self.entries.last().map(|e| &e.handler)
    }

    // ========================================================================
    // 读取
    // ========================================================================

    fn slot(&self, index: isize) -> Option<usize> {
        let len = self.entries.len() as isize;
        let slot = if index < 0 { index + len } else { index };
        (0..len).contains(&slot).then_some(slot as usize)
    }

    fn out_of_range(&self, index: isize) -> Error {
        Error::Context(ContextError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// 按位置读取，负数从末尾计；越界返回 `IndexOutOfRange`
    pub fn at(&self, index: isize) -> Result<&HandlerRef> {
        self.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// 按位置读取，越界返回 `None`
    pub fn get(&self, index: isize) -> Option<&HandlerRef> {
        self.slot(index).map(|i| &self.entries[i].handler)
    }

    /// 按名称读取，未注册返回 `SchemeNotFound`
    pub fn by_name(&self, name: &str) -> Result<&HandlerRef> {
        self.get_by_name(name).ok_or_else(|| not_found(name))
    }

    /// 按名称读取，未注册返回 `None`
    pub fn get_by_name(&self, name: &str) -> Option<&HandlerRef> {
        self.position(name).map(|i| &self.entries[i].handler)
    }

    /// 名称所在位置，未注册返回 `None`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// 名称所在位置，未注册返回 `SchemeNotFound`
    pub fn index_of_name(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| not_found(name))
    }

    /// 实例所在位置（按同一性比较），不在集合中返回 `None`
    pub fn index(&self, handler: &HandlerRef) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| Arc::ptr_eq(&e.handler, handler))
    }

    fn find(&self, member: Member<'_>) -> Option<usize> {
        match member {
            Member::Handler(handler) => self.index(handler),
            Member::Name(name) => self.position(name),
        }
    }

    /// 是否包含实例或名称
    pub fn contains<'a>(&self, member: impl Into<Member<'a>>) -> bool {
        self.find(member.into()).is_some()
    }

    // ========================================================================
    // 修改
    // ========================================================================

    fn ensure_absent(&self, name: &str, except: Option<usize>) -> Result<()> {
        match self.position(name) {
            Some(i) if Some(i) != except => Err(Error::Context(ContextError::DuplicateScheme(
                name.to_string(),
            ))),
            _ => Ok(()),
        }
    }

    /// 追加到末尾（成为新的默认方案）
    pub fn append(&mut self, handler: impl Into<HandlerSpec>) -> Result<()> {
        let handler = handler.into().into_handler();
        self.ensure_absent(handler.name(), None)?;
        self.entries.push(ContextEntry::new(handler));
        Ok(())
    }

    /// 插入到指定位置
    ///
    /// 与列表插入语义一致：负数从末尾计，超出范围的位置钳制到两端。
    pub fn insert(&mut self, pos: isize, handler: impl Into<HandlerSpec>) -> Result<()> {
        let handler = handler.into().into_handler();
        self.ensure_absent(handler.name(), None)?;

        let len = self.entries.len() as isize;
        let pos = if pos < 0 {
            (pos + len).max(0)
        } else {
            pos.min(len)
        };
        self.entries.insert(pos as usize, ContextEntry::new(handler));
        Ok(())
    }

    /// 替换指定位置的方案，返回被替换的实例
    ///
    /// 新方案的名称与其他位置的方案重复时失败；与被替换者同名则允许。
    pub fn set(&mut self, index: isize, handler: impl Into<HandlerSpec>) -> Result<HandlerRef> {
        let slot = self.slot(index).ok_or_else(|| self.out_of_range(index))?;
        let handler = handler.into().into_handler();
        self.ensure_absent(handler.name(), Some(slot))?;

        let old = std::mem::replace(&mut self.entries[slot], ContextEntry::new(handler));
        Ok(old.handler)
    }

    /// 移除实例或名称，不存在时返回 `SchemeNotFound`
    pub fn remove<'a>(&mut self, member: impl Into<Member<'a>>) -> Result<HandlerRef> {
        let member = member.into();
        let slot = self.find(member).ok_or_else(|| not_found(member.name()))?;
        Ok(self.entries.remove(slot).handler)
    }

    /// 移除实例或名称，返回是否有元素被移除
    pub fn discard<'a>(&mut self, member: impl Into<Member<'a>>) -> bool {
        match self.find(member.into()) {
            Some(slot) => {
                self.entries.remove(slot);
                true
            }
            None => false,
        }
    }

    /// 批量追加
    ///
    /// 先检查所有名称（与已有方案以及批次内部），任何冲突都会使整个操作失败，
    /// 集合不会被部分修改。
    pub fn extend<I, S>(&mut self, handlers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<HandlerSpec>,
    {
        let incoming: Vec<HandlerRef> = handlers
            .into_iter()
            .map(|h| h.into().into_handler())
            .collect();

        let mut seen: HashSet<&'static str> = self.entries.iter().map(|e| e.name).collect();
        for handler in &incoming {
            if !seen.insert(handler.name()) {
                return Err(Error::Context(ContextError::DuplicateScheme(
                    handler.name().to_string(),
                )));
            }
        }

        self.entries.extend(incoming.into_iter().map(ContextEntry::new));
        Ok(())
    }

    /// 连接得到新集合，原集合不变；实例在两个集合间共享
    pub fn concat<I, S>(&self, handlers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<HandlerSpec>,
    {
        let mut out = self.clone();
        out.extend(handlers)?;
        Ok(out)
    }
}

fn not_found(name: &str) -> Error {
    Error::Context(ContextError::SchemeNotFound(name.to_string()))
}

impl Add<&CryptContext> for &CryptContext {
    type Output = Result<CryptContext>;

    fn add(self, rhs: &CryptContext) -> Self::Output {
        self.concat(rhs)
    }
}

impl Add<Vec<HandlerSpec>> for &CryptContext {
    type Output = Result<CryptContext>;

    fn add(self, rhs: Vec<HandlerSpec>) -> Self::Output {
        self.concat(rhs)
    }
}

/// [`CryptContext`] 的迭代器
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, ContextEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a HandlerRef;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.handler)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| &e.handler)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a CryptContext {
    type Item = &'a HandlerRef;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
