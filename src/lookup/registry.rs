//! Class registry: permanent classes discovered while parsing plus the
//! temporary classes inferred during a single analysis pass.

use std::collections::HashMap;

use tracing::debug;

use crate::lookup::config::DEFAULT_TEMP_TYPE_PREFIX;
use crate::lookup::ds::object::{JsObject, JsObjectType, ObjectMap};

pub struct ClassRegistry {
    /// Classes keyed by their fully-qualified path.
    classes: ObjectMap,
    /// Inferred classes keyed by their generated type name.
    temp_classes: ObjectMap,
    /// Last number handed out by `generate_new_type`.
    object_seed: usize,
    temp_type_prefix: String,
}

impl ClassRegistry {
    pub fn new() -> Self {
        ClassRegistry::with_temp_type_prefix(DEFAULT_TEMP_TYPE_PREFIX)
    }

    pub fn with_temp_type_prefix(prefix: &str) -> Self {
        ClassRegistry {
            classes: HashMap::new(),
            temp_classes: HashMap::new(),
            object_seed: 0,
            temp_type_prefix: prefix.to_string(),
        }
    }

    /// Register a class under its path. An existing class of the same path is
    /// replaced as a whole.
    pub fn register(&mut self, class: JsObjectType) {
        let path = class.borrow().path().to_string();
        if self.classes.insert(path.clone(), class).is_some() {
            debug!(path = %path, "replaced registered class");
        }
    }

    pub fn lookup_permanent(&self, name: &str) -> Option<JsObjectType> {
        self.classes.get(name).cloned()
    }

    pub fn lookup_temp(&self, name: &str) -> Option<JsObjectType> {
        self.temp_classes.get(name).cloned()
    }

    /// Exact-name lookup, permanent classes first.
    pub fn find_single_type(&self, name: &str) -> Option<JsObjectType> {
        self.lookup_permanent(name)
            .or_else(|| self.lookup_temp(name))
    }

    pub fn classes(&self) -> &ObjectMap {
        &self.classes
    }

    pub fn temp_classes(&self) -> &ObjectMap {
        &self.temp_classes
    }

    /// Replace both class maps with the content of `other`. With `move_content`
    /// the source maps are emptied afterwards.
    pub fn adopt(&mut self, other: &mut ClassRegistry, move_content: bool) {
        if move_content {
            self.classes = std::mem::take(&mut other.classes);
            self.temp_classes = std::mem::take(&mut other.temp_classes);
        } else {
            self.classes = other.classes.clone();
            self.temp_classes = other.temp_classes.clone();
        }
        debug!(
            classes = self.classes.len(),
            temp_classes = self.temp_classes.len(),
            move_content,
            "adopted class table"
        );
    }

    /// Next unique synthetic type name: `__object1`, `__object2`, ...
    pub fn generate_new_type(&mut self) -> String {
        self.object_seed += 1;
        format!("{}{}", self.temp_type_prefix, self.object_seed)
    }

    /// Create an object typed with a fresh synthetic name and register it as a
    /// temporary class.
    pub fn new_temp_class(&mut self) -> JsObjectType {
        let type_name = self.generate_new_type();
        let mut object = JsObject::ordinary("");
        object.add_type(&type_name, true);
        let object = object.into_ref();
        self.temp_classes.insert(type_name, object.clone());
        object
    }

    pub fn clear_temp(&mut self) {
        self.temp_classes.clear();
    }

    /// Empty both maps and restart synthetic type numbering.
    pub fn clear(&mut self) {
        self.classes.clear();
        self.temp_classes.clear();
        self.object_seed = 0;
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
