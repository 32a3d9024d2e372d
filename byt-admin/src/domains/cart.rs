use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Read-only view of the shopping cart shown in the header.
pub trait CartContext: Send + Sync {
    fn total_items(&self) -> usize;
}

/// Cart counter shared with whatever owns the cart.
#[derive(Debug, Clone, Default)]
pub struct SharedCart(Arc<AtomicUsize>);

impl SharedCart {
    pub fn new(items: usize) -> Self {
        Self(Arc::new(AtomicUsize::new(items)))
    }

    pub fn set(&self, items: usize) {
        self.0.store(items, Ordering::Relaxed);
    }
}

impl CartContext for SharedCart {
    fn total_items(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}
