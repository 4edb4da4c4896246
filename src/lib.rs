//! # tag-parser
//!
//! A grammar-driven argument parser for template tag invocations.
//!
//! A tag implementer declares the shape of a tag's arguments as an ordered
//! list of grammar elements and supplies a handler function. The parser
//! matches one invocation's tokens against that declaration at template
//! parse time and produces an executable node that resolves the captured
//! values and calls the handler at render time.
//!
//!     {% related for user.articles as items %}
//!
//! For the assertion and fixture helpers shared by the integration tests,
//! see the [testing module](tag::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod tag;
