use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Loading/uploading indicators, readable from another task while a send is
/// in flight.
#[derive(Debug, Clone, Default)]
pub struct ActivityFlags {
    inner: Arc<Flags>,
}

#[derive(Debug, Default)]
struct Flags {
    loading: AtomicBool,
    uploading: AtomicBool,
}

impl ActivityFlags {
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    pub fn is_uploading(&self) -> bool {
        self.inner.uploading.load(Ordering::SeqCst)
    }

    /// Raises the flags until the returned guard is dropped.
    pub(crate) fn begin(&self, uploading: bool) -> ActivityGuard {
        self.inner.loading.store(true, Ordering::SeqCst);
        self.inner.uploading.store(uploading, Ordering::SeqCst);
        ActivityGuard {
            flags: Arc::clone(&self.inner),
        }
    }
}

pub(crate) struct ActivityGuard {
    flags: Arc<Flags>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.flags.loading.store(false, Ordering::SeqCst);
        self.flags.uploading.store(false, Ordering::SeqCst);
    }
}
