//! Request identifier allocation
//!
//! Every request needs a correlation id, and when several tasks share one
//! client the ids must not race. The allocator is a single mutex around a
//! `(next, auto_increment)` pair: allocate is a read-then-maybe-increment
//! over both fields, so one lock covers the whole decision.
//!
//! # Modes
//!
//! - **Autoincrement** (the default): each allocation returns the current
//!   counter and advances it, so sequential calls get `k, k+1, k+2, ...`.
//! - **Frozen**: after [`set_auto_increment(false)`](IdAllocator::set_auto_increment)
//!   every allocation returns the same value until [`set_next`](IdAllocator::set_next)
//!   or re-enabling. Useful against servers that key on a fixed client id;
//!   concurrent requests sharing one id is legal in this mode, on purpose.
//!
//! Ids are never reclaimed: a cancelled or failed call keeps its id
//! consumed, and retries get a fresh one via [`refresh_id`](IdAllocator::refresh_id).

use std::sync::Arc;

use jroh_core::JsonRpcRequest;
use parking_lot::Mutex;

/// Thread-safe request id source shared by clones of one client
///
/// # Examples
///
/// ```rust
/// use jroh_client::IdAllocator;
///
/// let ids = IdAllocator::new(0, true);
/// assert_eq!(ids.allocate(), 0);
/// assert_eq!(ids.allocate(), 1);
///
/// ids.set_auto_increment(false);
/// assert_eq!(ids.allocate(), 2);
/// assert_eq!(ids.allocate(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct IdAllocator {
    state: Arc<Mutex<IdState>>,
}

#[derive(Debug)]
struct IdState {
    next: i64,
    auto_increment: bool,
}

impl IdAllocator {
    /// Create an allocator starting at `first_id`
    pub fn new(first_id: i64, auto_increment: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(IdState {
                next: first_id,
                auto_increment,
            })),
        }
    }

    /// Take the next id
    ///
    /// Returns the current counter value; when autoincrement is on, the
    /// counter advances inside the same critical section.
    pub fn allocate(&self) -> i64 {
        let mut state = self.state.lock();
        let id = state.next;
        if state.auto_increment {
            state.next += 1;
        }
        id
    }

    /// Read the id the next allocation would return, without consuming it
    pub fn peek(&self) -> i64 {
        self.state.lock().next
    }

    /// Overwrite the counter; autoincrement mode is left untouched
    pub fn set_next(&self, id: i64) {
        self.state.lock().next = id;
    }

    /// Toggle autoincrement; no retroactive effect on already-issued ids
    pub fn set_auto_increment(&self, enabled: bool) {
        self.state.lock().auto_increment = enabled;
    }

    /// Assign a fresh id to an already-built request
    ///
    /// Follows the same allocate rule, so resubmitting a request (retry
    /// after failure, re-sending inside a new batch) gets a new correlation
    /// id while the rest of the envelope is reused.
    pub fn refresh_id(&self, request: &mut JsonRpcRequest) {
        request.id = self.allocate();
    }
}

impl Default for IdAllocator {
    /// Allocator with the stock policy: start at 0, autoincrement on
    fn default() -> Self {
        Self::new(0, true)
    }
}
