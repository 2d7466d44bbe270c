use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tells an in-flight load whether its owner is still around.
///
/// The owner keeps one clone and calls [`Liveness::retire`] when it goes
/// away; loads check [`Liveness::is_alive`] before handing back results.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn retire(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
