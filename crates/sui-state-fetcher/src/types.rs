//! Shared bookkeeping types for providers.

/// Counters for lookups served by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Number of `get_objects` calls.
    pub object_requests: usize,

    /// Number of object IDs requested across all calls.
    pub objects_requested: usize,

    /// Number of objects successfully returned.
    pub objects_fetched: usize,

    /// Number of `get_move_function` calls.
    pub function_requests: usize,

    /// Number of `get_prices` calls.
    pub price_requests: usize,
}

impl FetchStats {
    /// Check if every requested object was returned.
    pub fn is_complete(&self) -> bool {
        self.objects_fetched == self.objects_requested
    }
}
