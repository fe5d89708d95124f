//! Best-effort scheduling hints for the timing-critical part of a read.
//!
//! On a non-realtime host the capture loop can be preempted mid-frame, which
//! shows up as missing or stretched pulses. A [`PriorityHint`] lets the caller
//! raise the thread priority around the capture. Failing to raise it never
//! fails the read.

use core::fmt::Debug;

/// Raises and restores the scheduling priority of the calling thread.
pub trait PriorityHint {
    type Error: Debug;

    /// Raises the priority of the calling thread.
    fn elevate(&mut self) -> Result<(), Self::Error>;

    /// Returns the calling thread to the default scheduling class.
    fn restore(&mut self) -> Result<(), Self::Error>;
}

impl<T: PriorityHint + ?Sized> PriorityHint for &mut T {
    type Error = T::Error;

    fn elevate(&mut self) -> Result<(), Self::Error> {
        T::elevate(self)
    }

    fn restore(&mut self) -> Result<(), Self::Error> {
        T::restore(self)
    }
}

/// Leaves scheduling alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPriorityHint;

impl PriorityHint for NoPriorityHint {
    type Error = core::convert::Infallible;

    fn elevate(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Holds the elevated priority until dropped.
///
/// `restore` runs on drop whether or not `elevate` succeeded, so every exit
/// path out of the guarded scope leaves the thread at default priority.
pub struct PriorityGuard<'a, H: PriorityHint> {
    hint: &'a mut H,
}

impl<'a, H: PriorityHint> PriorityGuard<'a, H> {
    pub fn acquire(hint: &'a mut H) -> Self {
        if let Err(e) = hint.elevate() {
            log_failure("raise", &e);
        }
        PriorityGuard { hint }
    }
}

impl<H: PriorityHint> Drop for PriorityGuard<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.hint.restore() {
            log_failure("restore", &e);
        }
    }
}

fn log_failure<E: Debug>(action: &str, e: &E) {
    #[cfg(all(feature = "defmt", not(feature = "log")))]
    let e = defmt::Debug2Format(e);
    warn!("could not {} scheduling priority: {:?}", action, e);
}

#[cfg(all(feature = "linux-sched", target_os = "linux"))]
pub use self::linux::SchedFifo;

#[cfg(all(feature = "linux-sched", target_os = "linux"))]
mod linux {
    use std::io;

    use super::PriorityHint;

    /// Switches the calling thread to `SCHED_FIFO` at the highest priority.
    ///
    /// Needs `CAP_SYS_NICE` (or root); without it `elevate` fails with
    /// `EPERM` and the read runs at normal priority.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SchedFifo;

    impl PriorityHint for SchedFifo {
        type Error = io::Error;

        fn elevate(&mut self) -> Result<(), Self::Error> {
            // SAFETY: plain syscall wrapper without pointer arguments.
            let max = unsafe { libc::sched_get_priority_max(libc::SCHED_FIFO) };
            if max < 0 {
                return Err(io::Error::last_os_error());
            }
            set_scheduler(libc::SCHED_FIFO, max)
        }

        fn restore(&mut self) -> Result<(), Self::Error> {
            set_scheduler(libc::SCHED_OTHER, 0)
        }
    }

    fn set_scheduler(policy: libc::c_int, priority: libc::c_int) -> io::Result<()> {
        // SAFETY: `sched_param` is plain data; musl adds fields glibc lacks.
        let mut param: libc::sched_param = unsafe { std::mem::zeroed() };
        param.sched_priority = priority;
        // SAFETY: `param` outlives the call and pid 0 targets the calling thread.
        let result = unsafe { libc::sched_setscheduler(0, policy, &param) };
        if result != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
