//! Turning weapon events into log output and run statistics.
mod event_consumer;

pub use event_consumer::{EventImpact, EventTally, SimEventConsumer};
