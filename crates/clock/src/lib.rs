//! Tempora Clock Infrastructure
//!
//! Concrete moment providers and the real system clock behind them:
//!
//! ```text
//! SystemClock (host wall clock + local zone)
//!     │
//!     ├── CalendarProvider ── now / utc_now sources (overridable)
//!     │                        └── pure parse / codec calls into tempora-core
//!     │
//!     └── OffsetProvider ──── now / utc_now sources (overridable)
//!                              └── pure parse / codec calls into tempora-core
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tempora_clock::{CalendarProvider, CalendarMomentProvider};
//! use tempora_core::{CalendarMoment, MomentKind};
//! use tempora_ports::fixed_source;
//!
//! // Production: reads the host clock
//! let live = CalendarProvider::new();
//!
//! // Tests: pin the clock
//! let t0 = CalendarMoment::new(633_491_154_000_000_000, MomentKind::Local)?;
//! let pinned = CalendarProvider::new().with_now_source(fixed_source(t0));
//! assert_eq!(pinned.now(), t0);
//! ```

mod calendar;
mod offset;
mod system;

pub use calendar::CalendarProvider;
pub use offset::OffsetProvider;
pub use system::SystemClock;

// Re-export the ports for convenience
pub use tempora_ports::{CalendarMomentProvider, Clock, MomentSource, OffsetMomentProvider};
