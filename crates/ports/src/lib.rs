//! Tempora Ports
//!
//! Trait definitions for the two moment providers and the clock port they
//! read time through. Callers depend on these traits so any time source can
//! be injected behind them.

mod calendar;
mod clock;
mod offset;

pub use calendar::CalendarMomentProvider;
pub use clock::{Clock, MomentSource, fixed_source, source};
pub use offset::OffsetMomentProvider;

// Re-export the error type for convenience
pub use tempora_core::{MomentError, MomentResult};
