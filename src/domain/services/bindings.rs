//! View binding table
//!
//! One generic table replaces the per-module, per-operation view classes:
//! a binding is the operation, its guard and the template context, derived
//! from the descriptor alone.

use std::collections::BTreeMap;

use crate::domain::entities::{ModuleDescriptor, OperationBinding};
use crate::domain::value_objects::{Guard, Operation};

/// Context key carrying the module's display title
pub const MODULE_NAME_KEY: &str = "module_name";
/// Context key marking dashboards as part of the HMS suite
pub const MODULE_TYPE_KEY: &str = "module_type";
pub const MODULE_TYPE_HMS: &str = "hms";

/// Bindings for every capability of `descriptor`, in canonical order
///
/// Operations outside the capability set produce nothing.
pub fn bindings_for(descriptor: &ModuleDescriptor) -> Vec<OperationBinding> {
    Operation::ALL
        .into_iter()
        .filter(|op| descriptor.supports(*op))
        .map(|op| binding(descriptor, op))
        .collect()
}

fn binding(descriptor: &ModuleDescriptor, operation: Operation) -> OperationBinding {
    let mut context = BTreeMap::new();
    context.insert(MODULE_NAME_KEY.to_string(), descriptor.title.clone());
    if operation == Operation::Dashboard {
        context.insert(MODULE_TYPE_KEY.to_string(), MODULE_TYPE_HMS.to_string());
    }
    OperationBinding {
        operation,
        guard: Guard::AuthenticationRequired,
        context,
    }
}
