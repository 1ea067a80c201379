//! Scoped exclusion around bus transactions.
//!
//! Per-bit timing is derived from wall-clock delays, so a transaction that
//! gets preempted mid-bit corrupts the stream. Every transaction runs inside
//! [`Exclusion::free`]; the closure scope guarantees the prior state is
//! restored on every exit path, including early `?` returns.

/// An uninterruptible execution region. Implementations must be nestable:
/// register operations wrap transactions that are themselves guarded.
pub trait Exclusion {
    fn free<R>(f: impl FnOnce() -> R) -> R;
}

/// No-op exclusion for hosts where masking is handled elsewhere (a
/// single-threaded scheduler, an outer mutex, a test harness).
pub struct Unguarded;

impl Exclusion for Unguarded {
    fn free<R>(f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Masks interrupts for the scope of the region via
/// `cortex_m::interrupt::free`, which saves and restores PRIMASK and so
/// nests correctly.
#[cfg(feature = "cortexm")]
pub struct InterruptFree;

#[cfg(feature = "cortexm")]
impl Exclusion for InterruptFree {
    fn free<R>(f: impl FnOnce() -> R) -> R {
        cortex_m::interrupt::free(|_| f())
    }
}
