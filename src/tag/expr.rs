//! Expression compilation and resolution
//!
//!     A grammar variable captures one fragment as an expression: either a
//!     literal that is finished at compile time, or a dotted lookup path
//!     that stays deferred until render time and resolves against the
//!     active context. Classification is tried in order: quoted string,
//!     number, keyword literal, lookup path. Anything else is rejected.
//!
//! Syntax
//!
//!     "text"  'text'          string literal
//!     42  -3  1.25            number literal
//!     true  false  none       keyword literal
//!     user  user.name  rows.0 lookup path (fields and array indices)
//!
//!     There are no filter pipelines and no operators; a fragment is one
//!     literal or one path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::tag::context::RenderContext;
use crate::tag::error::{CompileError, RenderError};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

static LOOKUP_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*$").unwrap());

/// A compiled fragment: a finished literal or a deferred lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    Lookup(Vec<String>),
}

impl Expression {
    /// Compile one raw fragment.
    pub fn compile(fragment: &str) -> Result<Self, CompileError> {
        if let Some(text) = quoted_text(fragment) {
            return Ok(Expression::Literal(Value::String(text.to_string())));
        }
        if NUMBER.is_match(fragment) {
            if let Ok(whole) = fragment.parse::<i64>() {
                return Ok(Expression::Literal(Value::from(whole)));
            }
            if let Ok(float) = fragment.parse::<f64>() {
                return Ok(Expression::Literal(Value::from(float)));
            }
        }
        match fragment {
            "true" => return Ok(Expression::Literal(Value::Bool(true))),
            "false" => return Ok(Expression::Literal(Value::Bool(false))),
            "none" => return Ok(Expression::Literal(Value::Null)),
            _ => {}
        }
        if LOOKUP_PATH.is_match(fragment) {
            let path = fragment.split('.').map(str::to_string).collect();
            return Ok(Expression::Lookup(path));
        }
        Err(CompileError::BadExpression {
            fragment: fragment.to_string(),
        })
    }

    /// Resolve against the render context.
    ///
    /// Literals ignore the context. Lookup paths read their first segment
    /// from the context and walk the rest through object fields and array
    /// indices; a step that does not exist fails with the full path.
    pub fn resolve(&self, context: &RenderContext) -> Result<Value, RenderError> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Lookup(path) => {
                let (first, rest) = path.split_first().ok_or_else(|| missing(path))?;
                let mut current = context.get(first).ok_or_else(|| missing(path))?;
                for segment in rest {
                    current = step(current, segment).ok_or_else(|| missing(path))?;
                }
                Ok(current.clone())
            }
        }
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn missing(path: &[String]) -> RenderError {
    RenderError::MissingVariable {
        path: path.join("."),
    }
}

fn quoted_text(fragment: &str) -> Option<&str> {
    let first = fragment.chars().next()?;
    if first != '"' && first != '\'' {
        return None;
    }
    if fragment.len() < 2 || !fragment.ends_with(first) {
        return None;
    }
    let body = &fragment[1..fragment.len() - 1];
    if body.contains(first) {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(fragment: &str, context: &RenderContext) -> Result<Value, RenderError> {
        Expression::compile(fragment).unwrap().resolve(context)
    }

    #[test]
    fn quoted_fragments_are_string_literals() {
        let context = RenderContext::new();
        assert_eq!(
            resolve("\"xela alex\"", &context).unwrap(),
            json!("xela alex")
        );
        assert_eq!(resolve("'single'", &context).unwrap(), json!("single"));
    }

    #[test]
    fn numbers_and_keywords_are_literals() {
        let context = RenderContext::new();
        assert_eq!(resolve("42", &context).unwrap(), json!(42));
        assert_eq!(resolve("-3", &context).unwrap(), json!(-3));
        assert_eq!(resolve("1.25", &context).unwrap(), json!(1.25));
        assert_eq!(resolve("true", &context).unwrap(), json!(true));
        assert_eq!(resolve("none", &context).unwrap(), Value::Null);
    }

    #[test]
    fn lookup_walks_fields_and_indices() {
        let context = RenderContext::with([
            ("user", json!({"name": "alex", "tags": ["a", "b"]})),
            ("rows", json!([10, 20, 30])),
        ]);
        assert_eq!(resolve("user.name", &context).unwrap(), json!("alex"));
        assert_eq!(resolve("user.tags.1", &context).unwrap(), json!("b"));
        assert_eq!(resolve("rows.0", &context).unwrap(), json!(10));
    }

    #[test]
    fn missing_lookup_reports_the_full_path() {
        let context = RenderContext::with([("user", json!({"name": "alex"}))]);
        let error = resolve("user.email", &context).unwrap_err();
        assert_eq!(
            error,
            RenderError::MissingVariable {
                path: "user.email".to_string()
            }
        );
    }

    #[test]
    fn malformed_fragments_do_not_compile() {
        assert!(matches!(
            Expression::compile("a..b"),
            Err(CompileError::BadExpression { .. })
        ));
        assert!(matches!(
            Expression::compile("|bad|"),
            Err(CompileError::BadExpression { .. })
        ));
        assert!(matches!(
            Expression::compile("\"unterminated"),
            Err(CompileError::BadExpression { .. })
        ));
    }

    #[test]
    fn compile_errors_are_syntax_class() {
        let error = Expression::compile("~").unwrap_err();
        assert!(error.is_syntax());
    }
}
