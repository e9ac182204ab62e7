//! Type resolution.
//!
//! A type expression names one class (`"Document"`) or a union of classes
//! (`"Document|Window"`). A single name resolves to the registered object
//! itself. A union resolves to a synthesized object carrying the type tags,
//! the flattened properties and the extends entries of every member that is
//! known.
//!
//! Property collisions keep the value inserted first: members listed earlier
//! win over later ones, and own properties win over inherited ones.

use tracing::{debug, trace};

use crate::lookup::ds::object::{JsObject, JsObjectType, ObjectMap};
use crate::lookup::registry::ClassRegistry;
use crate::parser::split_type_expression;

pub struct TypeResolver<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(registry: &'a ClassRegistry) -> Self {
        TypeResolver { registry }
    }

    /// Resolve a type expression. Returns `None` when no candidate is known.
    pub fn resolve(&self, type_expression: &str) -> Option<JsObjectType> {
        let candidates = split_type_expression(type_expression);
        match candidates.len() {
            0 => None,
            1 => self.registry.find_single_type(&candidates[0]),
            _ => self.merge_union(&candidates),
        }
    }

    fn merge_union(&self, candidates: &[String]) -> Option<JsObjectType> {
        let mut result: Option<JsObject> = None;
        for candidate in candidates {
            let member = match self.registry.find_single_type(candidate) {
                Some(member) => member,
                None => {
                    trace!(candidate = %candidate, "skipping unknown union member");
                    continue;
                }
            };
            let member = member.borrow();
            let merged = result.get_or_insert_with(|| JsObject::ordinary(""));

            for type_name in member.types() {
                merged.add_type(type_name, false);
            }
            for (name, property) in self.effective_properties(&member) {
                merged.properties_mut().entry(name).or_insert(property);
            }
            for base in member.get_extends() {
                merged.extends(base);
            }
        }

        if let Some(merged) = &result {
            debug!(
                types = %merged.type_name(),
                properties = merged.properties().len(),
                "synthesized union type"
            );
        }
        result.map(JsObject::into_ref)
    }

    /// Own properties of `object` plus the own properties of every class it
    /// extends, one level deep. Extended names that do not resolve contribute
    /// nothing.
    pub fn effective_properties(&self, object: &JsObject) -> ObjectMap {
        let mut properties: ObjectMap = object.properties().clone();
        for base_expression in object.get_extends() {
            // An extends entry may itself be a union; each member is flattened
            // on its own so inheritance never recurses past one level.
            for base_name in split_type_expression(base_expression) {
                match self.registry.find_single_type(&base_name) {
                    Some(base) => {
                        for (name, property) in base.borrow().properties() {
                            properties
                                .entry(name.clone())
                                .or_insert_with(|| property.clone());
                        }
                    }
                    None => trace!(base = %base_name, "extended class is not registered"),
                }
            }
        }
        properties
    }
}

/// Convenience wrapper for one-off resolutions.
pub fn resolve_type(registry: &ClassRegistry, type_expression: &str) -> Option<JsObjectType> {
    TypeResolver::new(registry).resolve(type_expression)
}
