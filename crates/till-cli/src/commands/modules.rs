//! Print the module → cache group table.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use till_core::error::AppError;
use till_service::refresh::module_table;

/// One module and its cache groups
#[derive(Debug, Serialize, Tabled)]
struct ModuleRow {
    /// Module name
    module: String,
    /// Cache groups invalidated after its mutations
    groups: String,
}

/// Execute the modules command
pub fn execute(format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<ModuleRow> = module_table()
        .into_iter()
        .map(|(module, groups)| ModuleRow {
            module: module.to_string(),
            groups: groups.join(", "),
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
