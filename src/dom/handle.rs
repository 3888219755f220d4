//! 共享文档句柄
//!
//! 所有行为（包括后台任务）通过同一个句柄读写文档，锁只在同步闭包内持有

use std::sync::{Arc, Mutex, PoisonError};

use crate::dom::Document;

/// 可克隆的文档句柄
#[derive(Debug, Clone, Default)]
pub struct DocumentHandle {
    inner: Arc<Mutex<Document>>,
}

impl DocumentHandle {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
        }
    }

    /// 只读访问
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// 可写访问
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
