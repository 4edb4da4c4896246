//! Error types for tag compilation and rendering

use std::fmt;

/// Errors raised while compiling one tag invocation against its grammar.
///
/// Syntax-class failures double as the control signal by which `Optional`
/// and `Sequence` detect "no more to consume"; see [`CompileError::is_syntax`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The invocation text contained no tag name
    EmptyInvocation,
    /// No tag registered under this name
    UnknownTag { name: String },
    /// A quoted section in the invocation was never closed
    UnbalancedQuote { text: String },
    /// A token was required but the queue was empty
    Exhausted,
    /// A literal token did not match
    Expected { expected: String, found: String },
    /// The front token was not one of the declared choice keywords
    UnknownKeyword { expected: Vec<String>, found: String },
    /// An entity fragment was not of the form `namespace.name`
    BadEntityToken { token: String },
    /// The expression compiler rejected a fragment
    BadExpression { fragment: String },
    /// Tokens were left over after the declared grammar ran
    Usage { tag: String, syntax: String },
    /// No entity registered under this namespace/name pair
    UnknownEntity { namespace: String, name: String },
}

impl CompileError {
    /// Whether `Optional` and `Sequence` may absorb this failure.
    ///
    /// Lookup failures and the top-level usage error always propagate to
    /// the compile call site unchanged.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            CompileError::Exhausted
                | CompileError::Expected { .. }
                | CompileError::UnknownKeyword { .. }
                | CompileError::BadEntityToken { .. }
                | CompileError::BadExpression { .. }
        )
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::EmptyInvocation => write!(f, "empty tag invocation"),
            CompileError::UnknownTag { name } => write!(f, "unknown tag '{}'", name),
            CompileError::UnbalancedQuote { text } => {
                write!(f, "unbalanced quote in '{}'", text)
            }
            CompileError::Exhausted => write!(f, "unexpected end of tag arguments"),
            CompileError::Expected { expected, found } => {
                write!(f, "{} expected, {} found", expected, found)
            }
            CompileError::UnknownKeyword { expected, found } => {
                write!(f, "[{}] expected, {} found", expected.join(" | "), found)
            }
            CompileError::BadEntityToken { token } => {
                write!(f, "'{}' is not of the form namespace.name", token)
            }
            CompileError::BadExpression { fragment } => {
                write!(f, "could not compile expression '{}'", fragment)
            }
            CompileError::Usage { tag, syntax } => {
                write!(
                    f,
                    "{} has the following syntax: {{% {} {} %}}",
                    tag, tag, syntax
                )
            }
            CompileError::UnknownEntity { namespace, name } => {
                write!(f, "no entity registered under {}.{}", namespace, name)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors raised while rendering a compiled tag node.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A lookup path did not resolve in the render context
    MissingVariable { path: String },
    /// The handler asked for an argument the grammar did not capture
    MissingArgument { name: String },
    /// The handler asked for an argument under the wrong kind
    WrongKind { name: String, expected: &'static str },
    /// Handler-specific failure
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingVariable { path } => {
                write!(f, "'{}' did not resolve in the render context", path)
            }
            RenderError::MissingArgument { name } => {
                write!(f, "no argument captured under '{}'", name)
            }
            RenderError::WrongKind { name, expected } => {
                write!(f, "argument '{}' is not a {}", name, expected)
            }
            RenderError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RenderError {}
