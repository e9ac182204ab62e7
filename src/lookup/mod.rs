//! Scope and symbol lookup for code completion.
//!
//! - **[`registry`]** - permanent and temporary class tables
//! - **[`scope`]** - main and isolated scope stacks
//! - **[`resolver`]** - single and union type resolution
//! - **[`global`]** - global scope bootstrapping
//! - **[`table`]** - [`LookupTable`], the facade tying them together

pub mod config;
pub mod ds;
pub mod global;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod table;

pub use config::LookupConfig;
pub use ds::error::LookupError;
pub use ds::object::{same_object, JsObject, JsObjectType, ObjectMap};
pub use table::LookupTable;
