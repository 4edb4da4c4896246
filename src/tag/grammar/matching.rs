//! The matching engine
//!
//!     Matching walks one element against the token queue and either
//!     returns captures with the queue advanced past the consumed prefix,
//!     or fails with the queue restored to where the attempt started.
//!     Failures come in two classes: syntax-class failures are the signal
//!     `Optional` and `Sequence` use to stop consuming, while lookup
//!     failures always propagate to the compile call site.
//!
//!     Rollback is an index rewind on the queue, so abandoning an attempt
//!     costs nothing and cannot leave partial consumption behind.

use crate::tag::error::CompileError;
use crate::tag::expr::Expression;
use crate::tag::grammar::capture::{ArgValue, Capture};
use crate::tag::grammar::Element;
use crate::tag::registry::EntityRegistry;
use crate::tag::token::TokenQueue;

impl Element {
    /// Attempt to consume a prefix of the queue.
    ///
    /// On success the queue is left advanced past the consumed tokens and
    /// zero or more captures are returned. On failure the queue is back at
    /// the position the attempt started from.
    pub fn parse(
        &self,
        registry: &EntityRegistry,
        queue: &mut TokenQueue,
    ) -> Result<Vec<Capture>, CompileError> {
        match self {
            Element::Constant { text } => {
                let found = match queue.peek() {
                    Some(token) => token.to_string(),
                    None => return Err(CompileError::Exhausted),
                };
                if found != *text {
                    return Err(CompileError::Expected {
                        expected: text.clone(),
                        found,
                    });
                }
                queue.pop();
                Ok(Vec::new())
            }

            Element::Name { name } => {
                let token = queue.pop().ok_or(CompileError::Exhausted)?;
                Ok(vec![Capture::new(name.clone(), ArgValue::Text(token))])
            }

            Element::Variable { name } => {
                let mark = queue.mark();
                let token = queue.pop().ok_or(CompileError::Exhausted)?;
                let expression = match Expression::compile(&token) {
                    Ok(expression) => expression,
                    Err(error) => {
                        queue.rewind(mark);
                        return Err(error);
                    }
                };
                Ok(vec![Capture::new(name.clone(), ArgValue::Expr(expression))])
            }

            Element::EntityRef { name } => {
                let mark = queue.mark();
                let token = queue.pop().ok_or(CompileError::Exhausted)?;
                let (namespace, entity_name) = match split_entity_token(&token) {
                    Ok(parts) => parts,
                    Err(error) => {
                        queue.rewind(mark);
                        return Err(error);
                    }
                };
                let entity = registry.get(namespace, entity_name).ok_or_else(|| {
                    CompileError::UnknownEntity {
                        namespace: namespace.to_string(),
                        name: entity_name.to_string(),
                    }
                })?;
                Ok(vec![Capture::new(
                    name.clone(),
                    ArgValue::Entity(entity.clone()),
                )])
            }

            Element::Optional { parts } => {
                let mark = queue.mark();
                let mut captures = Vec::new();
                for part in parts {
                    match part.parse(registry, queue) {
                        Ok(more) => captures.extend(more),
                        Err(error) if error.is_syntax() => {
                            // A failed optional is a zero-width match, not an error.
                            queue.rewind(mark);
                            return Ok(Vec::new());
                        }
                        Err(error) => return Err(error),
                    }
                }
                Ok(captures)
            }

            Element::Sequence { part, name } => {
                let mut values = Vec::new();
                loop {
                    let mark = queue.mark();
                    match part.parse(registry, queue) {
                        Ok(captures) => {
                            values.extend(captures.into_iter().map(|capture| capture.value));
                            if queue.mark() == mark {
                                // Zero-width success; repeating would never advance.
                                break;
                            }
                        }
                        Err(error) if error.is_syntax() => {
                            queue.rewind(mark);
                            break;
                        }
                        Err(error) => return Err(error),
                    }
                }
                Ok(vec![Capture::new(name.clone(), ArgValue::List(values))])
            }

            Element::Choice { arms, name } => {
                let front = match queue.peek() {
                    Some(token) => token.to_string(),
                    None => return Err(CompileError::Exhausted),
                };
                let arm = match arms.iter().find(|arm| arm.keyword == front) {
                    Some(arm) => arm,
                    None => {
                        return Err(CompileError::UnknownKeyword {
                            expected: arms.iter().map(|arm| arm.keyword.clone()).collect(),
                            found: front,
                        })
                    }
                };
                let keyword = queue.pop().ok_or(CompileError::Exhausted)?;
                // The keyword is consumed: failures inside the branch are
                // hard from here on, there is no backtracking to try
                // another arm.
                let mut values = Vec::new();
                for part in &arm.parts {
                    let captures = part.parse(registry, queue)?;
                    values.extend(captures.into_iter().map(|capture| capture.value));
                }
                Ok(vec![Capture::new(
                    name.clone(),
                    ArgValue::Pair { keyword, values },
                )])
            }
        }
    }
}

fn split_entity_token(token: &str) -> Result<(&str, &str), CompileError> {
    let bad = || CompileError::BadEntityToken {
        token: token.to_string(),
    };
    let (namespace, name) = token.split_once('.').ok_or_else(bad)?;
    if namespace.is_empty() || name.is_empty() || name.contains('.') {
        return Err(bad());
    }
    Ok((namespace, name))
}
