//! # Execution Context
//!
//! Per-call context threaded explicitly through the engine. The value
//! `me()` resolves to lives here, never in process-wide mutable state, so
//! two concurrent queries with different callers cannot observe each
//! other's identity.

use std::time::Instant;

use uuid::Uuid;

/// Identifier of the user a query runs as
pub type UserId = u64;

/// Context carried through a single query's processing.
///
/// Read-only for the duration of the call. Create a fresh one per request.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// The user `me()` resolves to
    pub current_user_id: UserId,

    /// Request ID for log correlation
    pub request_id: Uuid,

    /// Start time for duration tracking
    started_at: Instant,
}

impl ExecutionContext {
    /// Create a context for the given user
    pub fn new(current_user_id: UserId) -> Self {
        Self {
            current_user_id,
            request_id: Uuid::new_v4(),
            started_at: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_are_independent() {
        let a = ExecutionContext::new(1234);
        let b = ExecutionContext::new(5678);
        assert_eq!(a.current_user_id, 1234);
        assert_eq!(b.current_user_id, 5678);
        assert_ne!(a.request_id, b.request_id);
    }
}
