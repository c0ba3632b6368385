//! Process-wide admission control for posting runs.

use std::sync::atomic::{AtomicBool, Ordering};

/// Exclusive run token.
///
/// At most one [`RunPermit`] exists at a time; while one is held, further
/// acquisition attempts are rejected, never queued. The guard is owned by
/// the coordinator that admits runs, not by global state, so sharing the
/// coordinator shares the admission control.
#[derive(Debug, Default)]
pub struct RunGuard {
    running: AtomicBool,
}

impl RunGuard {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Attempts the idle-to-running transition.
    ///
    /// Returns a permit on success, `None` if a run is already active (no
    /// state change). The check-and-set is a single atomic
    /// compare-exchange, so two concurrent callers can never both acquire.
    pub fn try_acquire(&self) -> Option<RunPermit<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(RunPermit { guard: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Proof of exclusive run admission.
///
/// Dropping the permit performs the unconditional running-to-idle
/// transition, so release happens on every exit path.
#[derive(Debug)]
pub struct RunPermit<'a> {
    guard: &'a RunGuard,
}

impl Drop for RunPermit<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn second_acquire_is_rejected_while_held() {
        let guard = RunGuard::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.try_acquire().is_none());
        assert!(guard.try_acquire().is_none());
    }

    #[test]
    fn release_makes_the_guard_available_again() {
        let guard = RunGuard::new();
        drop(guard.try_acquire().unwrap());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn is_running_tracks_permit_lifetime() {
        let guard = RunGuard::new();
        assert!(!guard.is_running());
        let permit = guard.try_acquire().unwrap();
        assert!(guard.is_running());
        drop(permit);
        assert!(!guard.is_running());
    }

    #[test]
    fn concurrent_acquire_admits_exactly_one() {
        const CALLERS: usize = 8;

        let guard = RunGuard::new();
        let admitted = AtomicUsize::new(0);
        let barrier = Barrier::new(CALLERS);

        std::thread::scope(|scope| {
            for _ in 0..CALLERS {
                scope.spawn(|| {
                    barrier.wait();
                    let permit = guard.try_acquire();
                    if permit.is_some() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                    // Hold the permit until everyone has attempted.
                    barrier.wait();
                });
            }
        });

        assert_eq!(admitted.load(Ordering::SeqCst), 1);
        assert!(!guard.is_running());
    }
}
