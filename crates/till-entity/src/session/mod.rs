//! Session domain entities.

pub mod model;

pub use model::{AccessState, DemoSession, RoleOrigin, Session, UserSession};
