//! Invocation tokenization and the token queue
//!
//!     One tag invocation arrives as raw text. Tokenization splits it into
//!     whitespace-delimited fragments while keeping quoted sections inside a
//!     fragment intact, so `greet "hello world"` yields two fragments and
//!     `key="a b"` stays one. The actual splitting is handled entirely by
//!     logos.
//!
//!     The queue consumed by grammar matching is an index cursor over the
//!     immutable fragment list. Rollback is a cursor restore: combinators
//!     record a mark before an attempt and rewind to it when the attempt
//!     fails, which keeps consumption transactional without copying the
//!     fragments themselves.

use logos::Logos;

use crate::tag::error::CompileError;

/// Raw lexer tokens for splitting an invocation into fragments
#[derive(Logos, Debug, PartialEq, Clone)]
enum RawToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // A fragment is a run of non-whitespace characters in which quoted
    // sections may contain whitespace.
    #[regex(r#"(?:[^ \t\r\n\f"']|"[^"]*"|'[^']*')+"#)]
    Fragment,
}

/// Split one invocation's raw text into fragments.
///
/// The first fragment is the tag name; grammar matching consumes everything
/// after it. An unclosed quote fails the whole invocation.
pub fn split_invocation(text: &str) -> Result<Vec<String>, CompileError> {
    let mut lexer = RawToken::lexer(text);
    let mut fragments = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(RawToken::Fragment) => fragments.push(lexer.slice().to_string()),
            Ok(RawToken::Whitespace) => {}
            Err(_) => {
                return Err(CompileError::UnbalancedQuote {
                    text: text.to_string(),
                })
            }
        }
    }
    Ok(fragments)
}

/// Ordered, front-consumed fragment queue for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenQueue {
    fragments: Vec<String>,
    cursor: usize,
}

impl TokenQueue {
    pub fn new(fragments: Vec<String>) -> Self {
        Self {
            fragments,
            cursor: 0,
        }
    }

    /// Look at the front fragment without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.fragments.get(self.cursor).map(String::as_str)
    }

    /// Consume and return the front fragment.
    pub fn pop(&mut self) -> Option<String> {
        let fragment = self.fragments.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(fragment)
    }

    /// Number of unconsumed fragments.
    pub fn remaining(&self) -> usize {
        self.fragments.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.fragments.len()
    }

    /// The unconsumed suffix of the queue.
    pub fn unconsumed(&self) -> &[String] {
        &self.fragments[self.cursor..]
    }

    /// Record the current position for a later [`TokenQueue::rewind`].
    pub fn mark(&self) -> usize {
        self.cursor
    }

    /// Restore the queue to a previously recorded mark.
    pub fn rewind(&mut self, mark: usize) {
        debug_assert!(mark <= self.cursor, "rewind must not advance the queue");
        self.cursor = mark;
    }
}
