//! Timer host-service contracts for deferred, cancellable callbacks.
//!
//! The desktop runtime is single-threaded: callbacks run on the event loop that scheduled them and
//! never concurrently with a reducer dispatch.

use std::{cell::RefCell, fmt, rc::Rc};

/// Callback invoked once when a timer elapses.
pub type TimerCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Opaque handle for a scheduled timer, used for cancellation.
pub struct TimerHandle(pub i32);

/// Host service that schedules one-shot callbacks.
pub trait TimerService {
    /// Schedules `callback` to run once after `delay_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error string when the host cannot schedule the callback. The callback is
    /// dropped without running in that case.
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerHandle, String>;

    /// Cancels a pending timer. Unknown or already-fired handles are ignored.
    fn clear_timeout(&self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer service for hosts without an event loop. Every schedule request is refused.
pub struct NoopTimerService;

impl TimerService for NoopTimerService {
    fn set_timeout(&self, _delay_ms: u32, _callback: TimerCallback) -> Result<TimerHandle, String> {
        Err("timers are not available on this host".to_string())
    }

    fn clear_timeout(&self, _handle: TimerHandle) {}
}

struct PendingTimer {
    handle: TimerHandle,
    due_ms: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualClock {
    now_ms: u64,
    next_handle: i32,
    pending: Vec<PendingTimer>,
}

#[derive(Clone, Default)]
/// Deterministic in-memory timer service driven by explicit [`ManualTimerService::advance`] calls.
pub struct ManualTimerService {
    inner: Rc<RefCell<ManualClock>>,
}

impl fmt::Debug for ManualTimerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualTimerService")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl ManualTimerService {
    /// Returns the number of timers that have not fired or been cancelled.
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Returns the virtual clock value in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Advances the virtual clock and runs every timer that became due, in due order.
    ///
    /// Callbacks may schedule or cancel timers; newly scheduled timers that fall inside the
    /// advanced window also fire.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(delta_ms);
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.handle))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let timer = inner.pending.remove(index);
                        inner.now_ms = inner.now_ms.max(timer.due_ms);
                        Some(timer.callback)
                    }
                    None => {
                        inner.now_ms = target;
                        None
                    }
                }
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl TimerService for ManualTimerService {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerHandle, String> {
        let mut inner = self.inner.borrow_mut();
        inner.next_handle = inner.next_handle.wrapping_add(1);
        let handle = TimerHandle(inner.next_handle);
        let due_ms = inner.now_ms.saturating_add(u64::from(delay_ms));
        inner.pending.push(PendingTimer {
            handle,
            due_ms,
            callback,
        });
        Ok(handle)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|timer| timer.handle != handle);
    }
}
