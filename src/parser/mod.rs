mod api;

pub use api::{split_type_expression, TypeExprParser};
