use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation polled by the engine before every row and column.
///
/// Set by the host, never by this crate.
pub trait AbortSignal: Sync {
    fn is_aborted(&self) -> bool;
}

/// A signal that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    fn is_aborted(&self) -> bool {
        false
    }
}

impl AbortSignal for AtomicBool {
    fn is_aborted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for &T {
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}

impl<T: AbortSignal + Send + ?Sized> AbortSignal for Arc<T> {
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}
