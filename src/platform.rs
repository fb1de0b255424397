//! Platform services consumed during long-running transfers
//!
//! Body collection can span many scheduler turns; on most embedded targets a
//! loop that reads a large response without ever returning control would trip
//! the hardware watchdog. The [`Platform`] trait is the narrow seam through
//! which the engine cooperates with the host firmware: it is called once per
//! read slice, first to reset the watchdog countdown and then to suspend at a
//! cooperative yield point.

/// Platform-specific liveness and scheduling hooks.
///
/// Implemented by the target firmware. Both operations must be cheap; they
/// are invoked on every read slice of every captured response body.
pub trait Platform {
    /// Resets the hardware watchdog countdown.
    fn feed_watchdog(&mut self);

    /// Suspension point for the cooperative scheduler.
    ///
    /// On bare-metal targets this typically pumps the scheduler or network
    /// stack; on hosted targets it can be a thread yield or a no-op.
    fn yield_now(&mut self);
}

/// A [`Platform`] that does nothing on either hook.
///
/// Suitable for hosts without a watchdog.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlatform;

impl Platform for NullPlatform {
    fn feed_watchdog(&mut self) {}

    fn yield_now(&mut self) {}
}
