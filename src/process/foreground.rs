use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// The pid of the job currently running in the foreground, if any.
///
/// Cloning shares the same slot. The main loop writes it around each child
/// it waits on and the signal relay reads it to decide where a signal goes.
#[derive(Clone, Debug, Default)]
pub struct Foreground {
    pid: Arc<Mutex<Option<u32>>>,
}

impl Foreground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<u32> {
        *self.lock()
    }

    /// Runs `f` with the slot locked, so the pid cannot be cleared while `f`
    /// is acting on it.
    pub fn with_current<R>(&self, f: impl FnOnce(Option<u32>) -> R) -> R {
        let guard = self.lock();
        f(*guard)
    }

    /// Records `pid` as the foreground process until the returned guard drops.
    pub fn hold(&self, pid: u32) -> ForegroundGuard<'_> {
        *self.lock() = Some(pid);
        debug!(pid, "foreground process recorded");
        ForegroundGuard { slot: self }
    }

    // A panic while holding the lock cannot leave the Option half-written.
    fn lock(&self) -> MutexGuard<'_, Option<u32>> {
        self.pid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[must_use = "the foreground pid is cleared as soon as the guard is dropped"]
pub struct ForegroundGuard<'a> {
    slot: &'a Foreground,
}

impl Drop for ForegroundGuard<'_> {
    fn drop(&mut self) {
        if let Some(pid) = self.slot.lock().take() {
            debug!(pid, "foreground process cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_and_release() {
        let foreground = Foreground::new();
        assert_eq!(foreground.current(), None);

        {
            let _guard = foreground.hold(42);
            assert_eq!(foreground.current(), Some(42));
        }

        assert_eq!(foreground.current(), None);
    }

    #[test]
    fn test_clones_share_slot() {
        let foreground = Foreground::new();
        let relay_view = foreground.clone();

        let guard = foreground.hold(7);
        assert_eq!(relay_view.with_current(|pid| pid), Some(7));
        drop(guard);
        assert_eq!(relay_view.current(), None);
    }

    #[test]
    fn test_released_on_early_return() {
        fn fails(foreground: &Foreground) -> Result<(), &'static str> {
            let _guard = foreground.hold(9);
            Err("wait failed")
        }

        let foreground = Foreground::new();
        assert!(fails(&foreground).is_err());
        assert_eq!(foreground.current(), None);
    }

    #[test]
    fn test_released_on_panic() {
        let foreground = Foreground::new();
        let inner = foreground.clone();

        let result = std::panic::catch_unwind(move || {
            let _guard = inner.hold(11);
            panic!("boom");
        });

        assert!(result.is_err());
        assert_eq!(foreground.current(), None);
    }
}
