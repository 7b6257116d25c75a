//! Declarative visibility gates for restricted UI.

pub mod visibility;

pub use visibility::{ContentReason, GateDecision, Requirement, VisibilityGate};
