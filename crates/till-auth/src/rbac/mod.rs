//! Role-based permission table and evaluation.

pub mod evaluator;
pub mod table;

pub use evaluator::PermissionEvaluator;
pub use table::PermissionTable;
