//! # vocab-terms
//!
//! Tokenizer, AST and parser for the small Prolog-like language in which an
//! external authority hands over a principal's resolved capabilities.
//!
//! ## Syntax
//!
//! **Facts** are terms terminated by a period:
//! ```text
//! capability(rdf(concept), "CRUD").
//! capability(rdf(resource, lexicalization("en,it")), "C").
//! ```
//!
//! **Terms** are atoms (`rdf`, `objectProperty`), double-quoted strings
//! (`"CRUD"`), variables (`Project`, `_`) or compounds
//! (`rdf(cls, taxonomy)`). `%` starts a comment that runs to the end of the
//! line.
//!
//! The crate knows nothing about what the terms mean; interpreting them as
//! capabilities is the job of `vocab-access`.
//!
//! ## Example
//!
//! ```
//! use vocab_terms::{parse, ast::Term};
//!
//! let doc = parse("capability(rdf(concept), \"CRUD\").").unwrap();
//! let fact = &doc.facts[0];
//!
//! assert_eq!(fact.term.functor(), Some("capability"));
//! assert_eq!(fact.term.args()[1], Term::string("CRUD"));
//!
//! // Canonical rendering
//! assert_eq!(doc.to_string(), "capability(rdf(concept), \"CRUD\").");
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::{Document, Fact, Term};
pub use error::ParseError;
pub use parser::{MAX_DEPTH, parse, parse_fact, parse_term};
