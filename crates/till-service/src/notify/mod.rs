//! Notice sinks for the UI layers.

pub mod broadcast;
pub mod log;

pub use self::broadcast::BroadcastNotifier;
pub use self::log::TracingNotifier;
