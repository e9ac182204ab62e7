use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

const TAB_WIDTH: usize = 2;

/// Shared handle to an object. Registry, scope stacks and merged results all
/// hold handles to the same allocation, so mutations are visible through every
/// holder.
pub type JsObjectType = Rc<RefCell<JsObject>>;

/// Member name to object mapping used for properties and variables.
pub type ObjectMap = HashMap<String, JsObjectType>;

#[derive(Clone, Default)]
pub struct FunctionData {
    variables: ObjectMap,
    is_global_scope: bool,
}
impl FunctionData {
    pub fn variables(&self) -> &ObjectMap {
        &self.variables
    }

    pub fn is_global_scope(&self) -> bool {
        self.is_global_scope
    }
}

#[derive(Clone)]
pub enum ObjectKind {
    Ordinary,
    Function(FunctionData),
}

/// A node of the object model: a class template, an instance, a function
/// scope or an inferred temporary type.
#[derive(Clone)]
pub struct JsObject {
    path: String,
    types: BTreeSet<String>,
    is_temp: bool,
    properties: ObjectMap,
    extends: BTreeSet<String>,
    kind: ObjectKind,
}
impl JsObject {
    fn new(path: &str, kind: ObjectKind) -> Self {
        JsObject {
            path: path.to_string(),
            types: BTreeSet::new(),
            is_temp: false,
            properties: HashMap::new(),
            extends: BTreeSet::new(),
            kind,
        }
    }

    pub fn ordinary(path: &str) -> Self {
        JsObject::new(path, ObjectKind::Ordinary)
    }

    pub fn function(path: &str) -> Self {
        JsObject::new(path, ObjectKind::Function(FunctionData::default()))
    }

    pub fn into_ref(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Adds a type tag. A tag added as `temp` marks the whole object as an
    /// inferred type.
    pub fn add_type(&mut self, type_name: &str, temp: bool) {
        self.types.insert(type_name.to_string());
        if temp {
            self.is_temp = true;
        }
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains(type_name)
    }

    /// All type tags joined into a single union type expression.
    pub fn type_name(&self) -> String {
        self.types.iter().cloned().collect::<Vec<String>>().join("|")
    }

    pub fn is_temp(&self) -> bool {
        self.is_temp
    }

    pub fn properties(&self) -> &ObjectMap {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut ObjectMap {
        &mut self.properties
    }

    /// Adds a property keyed by the property object's own path, replacing any
    /// previous one of the same name.
    pub fn add_property(&mut self, property: JsObjectType) {
        let name = property.borrow().path.clone();
        self.properties.insert(name, property);
    }

    pub fn extends(&mut self, type_name: &str) {
        self.extends.insert(type_name.to_string());
    }

    pub fn get_extends(&self) -> &BTreeSet<String> {
        &self.extends
    }

    pub fn is_function(&self) -> bool {
        match self.kind {
            ObjectKind::Function(_) => true,
            ObjectKind::Ordinary => false,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionData> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f),
            ObjectKind::Ordinary => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionData> {
        match &mut self.kind {
            ObjectKind::Function(f) => Some(f),
            ObjectKind::Ordinary => None,
        }
    }

    /// Binds `variable` under its path. Ordinary objects have no bindings, so
    /// this does nothing for them.
    pub fn add_variable(&mut self, variable: JsObjectType) {
        let name = variable.borrow().path.clone();
        if let Some(f) = self.as_function_mut() {
            f.variables.insert(name, variable);
        }
    }

    pub fn set_global_scope(&mut self) {
        if let Some(f) = self.as_function_mut() {
            f.is_global_scope = true;
        }
    }

    pub fn is_global_scope(&self) -> bool {
        self.as_function()
            .map(|f| f.is_global_scope)
            .unwrap_or(false)
    }

    /// Creates a named instance of this template. The instance shares the
    /// template's property handles.
    pub fn new_instance(&self, name: &str) -> JsObjectType {
        let mut instance = self.clone();
        instance.path = name.to_string();
        if let ObjectKind::Function(f) = &mut instance.kind {
            f.is_global_scope = false;
        }
        instance.into_ref()
    }

    /// Renders this object and its properties as an indented tree.
    pub fn render(&self, depth: usize) -> String {
        let mut lines = vec![];
        self.render_into(depth, &mut Vec::new(), &mut lines);
        lines.join("\n")
    }

    fn render_into(
        &self,
        depth: usize,
        ancestors: &mut Vec<*const RefCell<JsObject>>,
        lines: &mut Vec<String>,
    ) {
        let pad = spaces(depth * TAB_WIDTH);
        let kind = if self.is_function() { "function" } else { "object" };
        lines.push(format!("{}{} {} : {}", pad, kind, self.path, self.type_name()));
        if !self.extends.is_empty() {
            let extends: Vec<&str> = self.extends.iter().map(|e| e.as_str()).collect();
            lines.push(format!("{}  extends {}", pad, extends.join(", ")));
        }
        let mut names: Vec<&String> = self.properties.keys().collect();
        names.sort();
        for name in names {
            let property = &self.properties[name];
            let ptr = Rc::as_ptr(property);
            if ancestors.contains(&ptr) {
                lines.push(format!("{}{} <cycle>", spaces((depth + 1) * TAB_WIDTH), name));
                continue;
            }
            ancestors.push(ptr);
            property.borrow().render_into(depth + 1, ancestors, lines);
            ancestors.pop();
        }
    }
}

fn spaces(count: usize) -> String {
    " ".repeat(count)
}

/// True when both handles point at the same object.
pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}
