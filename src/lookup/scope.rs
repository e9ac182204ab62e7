//! Lexical scope stacks.
//!
//! Two stacks are kept: the main stack mirrors the function nesting being
//! walked, the isolated stack answers one-off questions such as "what is
//! visible inside this function" without disturbing the main one. Exactly one
//! of them is active at a time.

use std::collections::HashMap;

use tracing::trace;

use crate::lookup::ds::object::{JsObjectType, ObjectMap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveStack {
    Main,
    Isolated,
}

pub struct ScopeStack {
    main: Vec<JsObjectType>,
    isolated: Vec<JsObjectType>,
    active: ActiveStack,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            main: Vec::new(),
            isolated: Vec::new(),
            active: ActiveStack::Main,
        }
    }

    fn stack(&self) -> &Vec<JsObjectType> {
        match self.active {
            ActiveStack::Main => &self.main,
            ActiveStack::Isolated => &self.isolated,
        }
    }

    fn stack_mut(&mut self) -> &mut Vec<JsObjectType> {
        match self.active {
            ActiveStack::Main => &mut self.main,
            ActiveStack::Isolated => &mut self.isolated,
        }
    }

    pub fn active(&self) -> ActiveStack {
        self.active
    }

    pub fn depth(&self) -> usize {
        self.stack().len()
    }

    /// Scopes of the active stack, outermost first.
    pub fn scopes(&self) -> &[JsObjectType] {
        self.stack()
    }

    /// Innermost scope of the active stack.
    ///
    /// # Panics
    ///
    /// Panics if the active stack is empty. The owning table always keeps the
    /// global scope at the bottom, so this only happens on misuse.
    pub fn current(&self) -> JsObjectType {
        self.stack()
            .last()
            .cloned()
            .expect("scope stack must hold the global scope")
    }

    pub fn current_path(&self) -> String {
        self.current().borrow().path().to_string()
    }

    /// Push a function scope. Anything that is not a function is ignored.
    pub fn push(&mut self, scope: JsObjectType) {
        if !scope.borrow().is_function() {
            trace!(path = %scope.borrow().path(), "ignoring push of non-function scope");
            return;
        }
        trace!(path = %scope.borrow().path(), depth = self.depth() + 1, "push scope");
        self.stack_mut().push(scope);
    }

    /// Pop the innermost scope. The outermost scope is never removed.
    pub fn pop(&mut self) {
        let stack = self.stack_mut();
        if stack.len() > 1 {
            stack.pop();
            trace!(depth = self.depth(), "pop scope");
        }
    }

    /// Activate a disposable `[global, scope]` stack. A non-function `scope`
    /// cancels isolation instead.
    pub fn enter_isolated(&mut self, global: JsObjectType, scope: JsObjectType) {
        if scope.borrow().is_function() {
            trace!(path = %scope.borrow().path(), "entering isolated scope");
            self.isolated.clear();
            self.isolated.push(global);
            self.isolated.push(scope);
            self.active = ActiveStack::Isolated;
        } else {
            self.restore_main();
        }
    }

    pub fn restore_main(&mut self) {
        if self.active == ActiveStack::Isolated {
            trace!("restoring main scope stack");
        }
        self.active = ActiveStack::Main;
    }

    /// Variables visible from the innermost scope. On name collisions the
    /// innermost binding wins.
    pub fn visible_variables(&self) -> ObjectMap {
        let mut variables: ObjectMap = HashMap::new();
        for scope in self.stack().iter().rev() {
            let scope = scope.borrow();
            if let Some(function) = scope.as_function() {
                for (name, variable) in function.variables() {
                    variables
                        .entry(name.clone())
                        .or_insert_with(|| variable.clone());
                }
            }
        }
        variables
    }

    /// Empty both stacks and make the main one active.
    pub fn clear(&mut self) {
        self.main.clear();
        self.isolated.clear();
        self.active = ActiveStack::Main;
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
