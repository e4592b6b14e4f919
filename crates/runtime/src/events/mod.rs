//! Telemetry event bus.
//!
//! Mission events emitted by the rules are stamped and fanned out to any
//! number of subscribers. Publishing is best-effort: no subscriber, no
//! delivery, and the caller never finds out.

mod bus;

pub use bus::{EventBus, MissionRecord};
