//! # jslookup - scope and symbol lookup for JavaScript code completion
//!
//! The lookup table backs IDE-style completion for JavaScript. It keeps:
//! - a registry of the classes (object templates) discovered while parsing
//! - temporary classes inferred during one analysis run
//! - a stack of function scopes mirroring the code being walked
//! - resolution of type names, including `|` separated union types
//!
//! Parsing JavaScript itself happens elsewhere; this crate only consumes the
//! objects the parser builds.
//!
//! ## Quick Start
//!
//! ```
//! use jslookup::lookup::{JsObject, LookupTable};
//!
//! let mut table = LookupTable::new();
//!
//! // Classes found by the parser
//! let mut document = JsObject::ordinary("Document");
//! document.add_type("Document", false);
//! document.add_property(JsObject::function("getElementById").into_ref());
//! table.add_object(document.into_ref());
//!
//! let mut element = JsObject::ordinary("Element");
//! element.add_type("Element", false);
//! element.add_property(JsObject::ordinary("innerHTML").into_ref());
//! table.add_object(element.into_ref());
//!
//! // Rebuild the global scope for this run
//! table.prepare_lookup();
//! assert!(table.visible_variables().contains_key("document"));
//!
//! // A value that may be either type exposes the members of both
//! let either = table.find_class("Document|Element").unwrap();
//! assert!(either.borrow().properties().contains_key("innerHTML"));
//! assert!(either.borrow().properties().contains_key("getElementById"));
//! ```
//!
//! ## Scopes
//!
//! The global scope is always at the bottom of the stack and can't be popped.
//! Only function objects can be pushed; pushing anything else is ignored.
//!
//! ```
//! use jslookup::lookup::{JsObject, LookupTable};
//!
//! let mut table = LookupTable::new();
//! table.prepare_lookup();
//!
//! let mut f = JsObject::function("init");
//! f.add_variable(JsObject::ordinary("count").into_ref());
//! table.push_scope(f.into_ref());
//! assert_eq!(table.make_path("helper"), "init.helper");
//! assert!(table.visible_variables().contains_key("count"));
//!
//! table.pop_scope();
//! table.pop_scope();
//! assert_eq!(table.scope_depth(), 1);
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - type expression tokenizer (PEG grammar)
//! - **[`lookup`]** - registry, scopes, resolver and the [`lookup::LookupTable`]
//!   - **[`lookup::ds`]** - object model and errors
//!   - **[`lookup::config`]** - well-known globals and temp type naming

#[macro_use]
extern crate lazy_static;

pub mod lookup;
pub mod parser;
