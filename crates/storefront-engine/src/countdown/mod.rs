//! Countdown module.
//!
//! Watches the deadline of a time-bound entity (a promotional event) and asks
//! for its deletion exactly once when the deadline passes.
//!
//! - [`CountdownController`] is the pure `Counting -> Expired` state machine.
//! - [`CountdownTimer`] drives a controller on a tokio interval and owns the
//!   one call to the [`EntityDeletionService`].

mod clock;
mod controller;
mod deletion;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    CountdownController, CountdownState, DeletionRequest, TickOutcome, TimeRemaining, TimedEntity,
};
pub use deletion::{DeletionAck, EntityDeletionService};
pub use timer::{CountdownConfig, CountdownHandle, CountdownTimer};
