use std::sync::atomic::{AtomicUsize, Ordering};

static ALLOC_BYTES: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn record_alloc_bytes(bytes: usize) {
    ALLOC_BYTES.fetch_add(bytes, Ordering::Relaxed);
}

/// Bytes reserved for matrix storage since start-up or the last reset.
pub fn alloc_bytes_total() -> u64 {
    ALLOC_BYTES.load(Ordering::Relaxed) as u64
}

pub fn take_alloc_bytes() -> u64 {
    ALLOC_BYTES.swap(0, Ordering::Relaxed) as u64
}

pub fn reset_alloc_bytes() {
    ALLOC_BYTES.store(0, Ordering::Relaxed);
}
