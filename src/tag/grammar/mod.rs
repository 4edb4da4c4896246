//! Grammar elements for declaring a tag's argument shape
//!
//!     A tag declares its arguments as an ordered list of grammar elements.
//!     Leaves consume one token each: a constant matches a literal keyword,
//!     a name captures raw text, a variable captures a deferred expression,
//!     an entity reference captures a registered entity. Combinators build
//!     on the leaves: optional tries a sub-sequence and rolls back without
//!     effect when it fails, sequence repeats one element greedily into a
//!     list, choice branches on a literal keyword and then commits to the
//!     matched branch.
//!
//! Syntax
//!
//!     Every element renders a short usage fragment; the compiler joins
//!     them into the message shown when an invocation does not match:
//!
//!         related has the following syntax: {% related for <item> [as <alias>] %}
//!
//!     Constants render as themselves, captures as `<label>` (or `<arg>`
//!     when unlabeled), optional as `[...]`, sequence as `[...]...`, and
//!     choice as its keywords joined by `|`.

pub mod capture;
pub mod matching;

pub use capture::{ArgValue, Capture};

/// One unit of a declared grammar.
///
/// The set of elements is closed: matching, syntax rendering, and
/// resolution all dispatch over these variants and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Literal token that must appear verbatim; captures nothing
    Constant { text: String },
    /// Captures the next token as raw text
    Name { name: Option<String> },
    /// Captures the next token as a deferred expression
    Variable { name: Option<String> },
    /// Captures the next token as a `namespace.name` entity reference
    EntityRef { name: Option<String> },
    /// Tries a sub-sequence; a failed attempt consumes nothing
    Optional { parts: Vec<Element> },
    /// Greedily repeats one element, collecting captured values into a list
    Sequence { part: Box<Element>, name: Option<String> },
    /// Branches on a literal keyword; the matched branch is committed
    Choice { arms: Vec<ChoiceArm>, name: Option<String> },
}

/// One keyword-discriminated branch of a [`Element::Choice`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceArm {
    pub keyword: String,
    pub parts: Vec<Element>,
}

impl ChoiceArm {
    pub fn new<K: Into<String>>(keyword: K, parts: Vec<Element>) -> Self {
        Self {
            keyword: keyword.into(),
            parts,
        }
    }
}

impl Element {
    pub fn constant<S: Into<String>>(text: S) -> Self {
        Element::Constant { text: text.into() }
    }

    pub fn name<S: Into<String>>(label: S) -> Self {
        Element::Name {
            name: Some(label.into()),
        }
    }

    pub fn variable<S: Into<String>>(label: S) -> Self {
        Element::Variable {
            name: Some(label.into()),
        }
    }

    pub fn entity_ref<S: Into<String>>(label: S) -> Self {
        Element::EntityRef {
            name: Some(label.into()),
        }
    }

    pub fn optional(parts: Vec<Element>) -> Self {
        Element::Optional { parts }
    }

    pub fn sequence<S: Into<String>>(part: Element, label: S) -> Self {
        Element::Sequence {
            part: Box::new(part),
            name: Some(label.into()),
        }
    }

    pub fn choice<S: Into<String>>(arms: Vec<ChoiceArm>, label: S) -> Self {
        Element::Choice {
            arms,
            name: Some(label.into()),
        }
    }

    /// Human-readable usage fragment for this element.
    pub fn syntax(&self) -> String {
        match self {
            Element::Constant { text } => text.clone(),
            Element::Name { name } | Element::Variable { name } | Element::EntityRef { name } => {
                match name {
                    Some(label) => format!("<{}>", label),
                    None => "<arg>".to_string(),
                }
            }
            Element::Optional { parts } => format!("[{}]", join_syntax(parts)),
            Element::Sequence { part, .. } => format!("[{}]...", part.syntax()),
            Element::Choice { arms, .. } => arms
                .iter()
                .map(|arm| {
                    if arm.parts.is_empty() {
                        arm.keyword.clone()
                    } else {
                        format!("{} {}", arm.keyword, join_syntax(&arm.parts))
                    }
                })
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// Join the usage fragments of consecutive elements with spaces.
pub fn join_syntax(parts: &[Element]) -> String {
    parts
        .iter()
        .map(Element::syntax)
        .collect::<Vec<_>>()
        .join(" ")
}
