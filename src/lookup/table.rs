//! The lookup table used by the completion engine.
//!
//! A table is rebuilt for every analysis run:
//!
//! ```text
//! 1. add_object()      parser registers every class it discovers
//! 2. prepare_lookup()  global scope is rebuilt from the registered classes
//! 3. push/pop_scope()  inference walks function bodies
//!    find_class()      resolves (union) type names
//!    visible_variables()
//! ```
//!
//! `set_temp_scope` answers a question about one specific function against a
//! throwaway `[global, function]` stack; `swap_scopes` returns to the main one.

use std::path::Path;

use tracing::debug;

use crate::lookup::config::LookupConfig;
use crate::lookup::ds::error::LookupError;
use crate::lookup::ds::object::{JsObject, JsObjectType, ObjectMap};
use crate::lookup::global::{initialize_global_scope, populate_globals};
use crate::lookup::registry::ClassRegistry;
use crate::lookup::resolver::TypeResolver;
use crate::lookup::scope::{ActiveStack, ScopeStack};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableState {
    /// Global scope exists but has not been populated from the registry.
    Uninitialized,
    /// `prepare_lookup` has run.
    Ready,
}

pub struct LookupTable {
    registry: ClassRegistry,
    scopes: ScopeStack,
    global_scope: JsObjectType,
    config: LookupConfig,
    state: TableState,
}

impl LookupTable {
    pub fn new() -> Self {
        LookupTable::with_config(LookupConfig::new())
    }

    pub fn with_config(config: LookupConfig) -> Self {
        let global_scope = initialize_global_scope();
        let mut scopes = ScopeStack::new();
        scopes.push(global_scope.clone());
        LookupTable {
            registry: ClassRegistry::with_temp_type_prefix(&config.temp_type_prefix),
            scopes,
            global_scope,
            config,
            state: TableState::Uninitialized,
        }
    }

    /// Create a table configured from a TOML file.
    pub fn from_config_file(path: &Path) -> Result<Self, LookupError> {
        Ok(LookupTable::with_config(LookupConfig::load(path)?))
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == TableState::Ready
    }

    // ── Classes ──────────────────────────────────────────────────────────

    /// Register a class, replacing any class with the same path.
    pub fn add_object(&mut self, object: JsObjectType) {
        self.registry.register(object);
    }

    /// Resolve a type expression, e.g. `"Document"` or `"Document|Window"`.
    pub fn find_class(&self, type_expression: &str) -> Option<JsObjectType> {
        TypeResolver::new(&self.registry).resolve(type_expression)
    }

    /// Own and inherited properties of `object`.
    pub fn object_properties(&self, object: &JsObjectType) -> ObjectMap {
        TypeResolver::new(&self.registry).effective_properties(&object.borrow())
    }

    pub fn classes(&self) -> &ObjectMap {
        self.registry.classes()
    }

    pub fn temp_classes(&self) -> &ObjectMap {
        self.registry.temp_classes()
    }

    /// Take over the class tables of `other`. With `move_content` the tables
    /// of `other` are left empty. Scope stacks are not touched.
    pub fn copy_class_table(&mut self, other: &mut LookupTable, move_content: bool) {
        self.registry.adopt(&mut other.registry, move_content);
    }

    pub fn clear_temp_class_table(&mut self) {
        self.registry.clear_temp();
    }

    pub fn generate_new_type(&mut self) -> String {
        self.registry.generate_new_type()
    }

    pub fn new_object(&self) -> JsObjectType {
        JsObject::ordinary("").into_ref()
    }

    pub fn new_function(&self) -> JsObjectType {
        JsObject::function("").into_ref()
    }

    /// Create an object with a freshly generated type and register it as a
    /// temporary class.
    pub fn new_temp_object(&mut self) -> JsObjectType {
        self.registry.new_temp_class()
    }

    // ── Scopes ───────────────────────────────────────────────────────────

    pub fn global_scope(&self) -> JsObjectType {
        self.global_scope.clone()
    }

    pub fn current_scope(&self) -> JsObjectType {
        self.scopes.current()
    }

    pub fn current_path(&self) -> String {
        self.scopes.current_path()
    }

    pub fn push_scope(&mut self, scope: JsObjectType) {
        self.scopes.push(scope);
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Scopes of the active stack, outermost first.
    pub fn scopes(&self) -> &[JsObjectType] {
        self.scopes.scopes()
    }

    /// Answer lookups against `[global, scope]` until `swap_scopes` is called.
    /// A non-function `scope` switches back to the main stack.
    pub fn set_temp_scope(&mut self, scope: JsObjectType) {
        self.scopes.enter_isolated(self.global_scope.clone(), scope);
    }

    pub fn swap_scopes(&mut self) {
        self.scopes.restore_main();
    }

    pub fn is_isolated(&self) -> bool {
        self.scopes.active() == ActiveStack::Isolated
    }

    pub fn visible_variables(&self) -> ObjectMap {
        self.scopes.visible_variables()
    }

    /// Path of a member declared in the current scope.
    pub fn make_path(&self, last_part: &str) -> String {
        let current = self.current_path();
        if current.is_empty() {
            last_part.to_string()
        } else {
            format!("{}.{}", current, last_part)
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Rebuild the scope state for a new analysis run from the classes
    /// registered so far. Temporary classes are kept unless
    /// `clear_temp_on_prepare` is set in the config.
    pub fn prepare_lookup(&mut self) {
        if self.config.clear_temp_on_prepare {
            self.registry.clear_temp();
        }
        self.scopes.clear();
        self.global_scope = initialize_global_scope();
        populate_globals(
            &self.global_scope,
            &self.registry,
            &self.config.well_known_globals,
        );
        self.scopes.push(self.global_scope.clone());
        self.state = TableState::Ready;
        debug!(
            classes = self.registry.classes().len(),
            temp_classes = self.registry.temp_classes().len(),
            "lookup prepared"
        );
    }

    /// Drop every class and scope. The table is left as freshly constructed,
    /// including synthetic type numbering.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.scopes.clear();
        self.global_scope = initialize_global_scope();
        self.scopes.push(self.global_scope.clone());
        self.state = TableState::Uninitialized;
        debug!("lookup table cleared");
    }

    /// Render every registered class, sorted by name.
    pub fn dump(&self) -> String {
        let mut names: Vec<&String> = self.registry.classes().keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| self.registry.classes()[name].borrow().render(0))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::new()
    }
}
