use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::warn;

#[derive(Parser)]
#[grammar = "parser/type_expr.pest"] // relative to src
pub struct TypeExprParser;

/// Splits a type expression such as `"Foo|Bar"` into its candidate type names.
///
/// Empty fields (`"|Foo||Bar|"`) are discarded. Names are returned exactly as
/// written, surrounding blanks included.
pub fn split_type_expression(expression: &str) -> Vec<String> {
    match TypeExprParser::parse(Rule::type_expression, expression) {
        Ok(pairs) => pairs.flat_map(type_names_of).collect(),
        Err(e) => {
            warn!(expression, error = %e, "failed to tokenize type expression");
            Vec::new()
        }
    }
}

fn type_names_of(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::type_name)
        .map(|p| p.as_str().to_string())
        .collect()
}
