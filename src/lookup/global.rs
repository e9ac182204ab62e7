//! Global scope bootstrapping.
//!
//! The global scope is a function object sitting at the bottom of every scope
//! stack. Once the registry is populated it is seeded with instances of the
//! well-known root templates (`document`, `window`) and exposes every
//! registered class as a property, so `ClassName.member` resolves from the top
//! level.

use tracing::debug;

use crate::lookup::config::WellKnownGlobal;
use crate::lookup::ds::object::{JsObject, JsObjectType};
use crate::lookup::registry::ClassRegistry;
use crate::lookup::resolver::TypeResolver;

/// Create a fresh, empty global scope.
pub fn initialize_global_scope() -> JsObjectType {
    let mut global = JsObject::function("");
    global.set_global_scope();
    global.into_ref()
}

/// Seed `global` from the registry: well-known instances become variables,
/// registered classes become properties.
pub fn populate_globals(
    global: &JsObjectType,
    registry: &ClassRegistry,
    well_known: &[WellKnownGlobal],
) {
    let resolver = TypeResolver::new(registry);
    for entry in well_known {
        let template = match resolver.resolve(&entry.template) {
            Some(template) => template,
            None => continue,
        };
        let instance = template.borrow().new_instance(&entry.instance);
        debug!(
            template = %entry.template,
            instance = %entry.instance,
            "bound well-known global"
        );
        global.borrow_mut().add_variable(instance);
    }

    let mut global = global.borrow_mut();
    let properties = global.properties_mut();
    for (name, class) in registry.classes() {
        properties
            .entry(name.clone())
            .or_insert_with(|| class.clone());
    }
}
