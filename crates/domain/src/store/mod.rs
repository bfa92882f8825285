//! Value stores that back placeholder lookups

mod layered;
mod record;
mod variable;

pub use layered::{LayeredStore, StoreLayer};
pub use record::{RecordStore, flatten_record, render_value};
pub use variable::{ResolvedValue, StoreScope, Variable, VariableMap};
