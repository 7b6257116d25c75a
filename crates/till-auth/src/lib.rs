//! # till-auth
//!
//! Client-side role resolution and visibility gating for the Till POS/ERP
//! surfaces (web and mobile share this crate).
//!
//! ## Modules
//!
//! - `rbac`: the role → permission table and the permission evaluator
//! - `jwt`: access-token claims and validation
//! - `identity`: the token-backed identity provider
//! - `session`: role resolution and the process-wide session context
//! - `gate`: declarative visibility gates for restricted UI
//!
//! ## Responsibility split
//!
//! Nothing in this crate enforces security. A missing permission hides a
//! control; it does not deny access. Every read and write is authorized by
//! the backend (row-level security on the database plus the API service).
//! Integrators must keep that enforcement in place regardless of what the
//! gates render.

pub mod gate;
pub mod identity;
pub mod jwt;
pub mod rbac;
pub mod session;

pub use gate::{ContentReason, GateDecision, Requirement, VisibilityGate};
pub use identity::JwtIdentityProvider;
pub use jwt::{Claims, JwtDecoder};
pub use rbac::{PermissionEvaluator, PermissionTable};
pub use session::{AccessSnapshot, AccessView, RoleResolver, SessionContext};
