//! Tracing/logging setup shared by every binary and test harness that embeds
//! the store.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init_with_default};

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    crate::tracing::init();
}
