//! Parser for the capability fact language.
//!
//! Converts a token stream (from [`crate::tokenizer`]) into an AST
//! ([`crate::ast`]).
//!
//! ```text
//! document = fact*
//! fact     = term '.'
//! term     = Atom '(' term (',' term)* ')'   → Compound
//!          | Atom                            → Atom
//!          | Str                             → Str
//!          | Var                             → Var
//! ```

use crate::ast::*;
use crate::error::ParseError;
use crate::tokenizer::{Spanned, Token};

/// Deepest compound nesting accepted. Capability topics need four levels.
pub const MAX_DEPTH: usize = 32;

/// A token-stream parser.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|spanned| &spanned.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, expected: Token, description: &str) -> Result<(), ParseError> {
        match self.advance() {
            Some(spanned) if spanned.token == expected => Ok(()),
            Some(spanned) => Err(ParseError::Expected {
                expected: description.into(),
                found: spanned.token.to_string(),
                offset: spanned.offset,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: description.into(),
            }),
        }
    }

    // --- Term parsing ---

    fn parse_term(&mut self, depth: usize) -> Result<Term, ParseError> {
        let Some(spanned) = self.advance() else {
            return Err(ParseError::UnexpectedEnd {
                expected: "term".into(),
            });
        };

        match spanned.token {
            Token::Atom(name) => {
                if self.peek() == Some(&Token::Open) {
                    if depth >= MAX_DEPTH {
                        return Err(ParseError::TooDeep {
                            limit: MAX_DEPTH,
                            offset: spanned.offset,
                        });
                    }
                    self.advance(); // consume `(`
                    let args = self.parse_args(depth + 1)?;
                    Ok(Term::Compound {
                        functor: name,
                        args,
                    })
                } else {
                    Ok(Term::Atom(name))
                }
            }
            Token::Str(value) => Ok(Term::Str(value)),
            Token::Var(name) => Ok(Term::Var(name)),
            other => Err(ParseError::Expected {
                expected: "term".into(),
                found: other.to_string(),
                offset: spanned.offset,
            }),
        }
    }

    /// Parse a comma separated argument list up to and including the closing
    /// parenthesis. The opening parenthesis has already been consumed.
    fn parse_args(&mut self, depth: usize) -> Result<Vec<Term>, ParseError> {
        let mut args = vec![self.parse_term(depth)?];
        loop {
            match self.advance() {
                Some(Spanned {
                    token: Token::Comma,
                    ..
                }) => args.push(self.parse_term(depth)?),
                Some(Spanned {
                    token: Token::Close,
                    ..
                }) => return Ok(args),
                Some(spanned) => {
                    return Err(ParseError::Expected {
                        expected: "`,` or `)`".into(),
                        found: spanned.token.to_string(),
                        offset: spanned.offset,
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "`,` or `)`".into(),
                    });
                }
            }
        }
    }

    // --- Fact parsing ---

    fn parse_fact(&mut self) -> Result<Fact, ParseError> {
        let term = self.parse_term(0)?;
        self.expect(Token::Period, "`.` after fact")?;
        Ok(Fact::new(term))
    }

    // --- Document parsing ---

    fn parse_document(&mut self) -> Result<Document, ParseError> {
        let mut facts = Vec::new();
        while !self.at_end() {
            facts.push(self.parse_fact()?);
        }
        Ok(Document::new(facts))
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        match self.advance() {
            None => Ok(()),
            Some(spanned) => Err(ParseError::Expected {
                expected: "end of input".into(),
                found: spanned.token.to_string(),
                offset: spanned.offset,
            }),
        }
    }
}

/// Parse a text into a [`Document`] of facts.
///
/// Facts are terminated by `.` and may span lines; blank lines and `%`
/// comments are ignored. An input without any fact yields an empty document.
///
/// # Example
///
/// ```
/// use vocab_terms::parse;
///
/// let doc = parse("capability(rdf(concept), \"CRUD\").\ncapability(rdf, \"R\").").unwrap();
/// assert_eq!(doc.facts.len(), 2);
/// ```
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let tokens = crate::tokenizer::tokenize(input)?;
    let mut parser = Parser::new(tokens);
    parser.parse_document()
}

/// Parse exactly one fact (a term followed by `.`).
///
/// # Example
///
/// ```
/// use vocab_terms::parse_fact;
///
/// let fact = parse_fact("capability(rdf, \"R\").").unwrap();
/// assert_eq!(fact.term.functor(), Some("capability"));
/// ```
pub fn parse_fact(input: &str) -> Result<Fact, ParseError> {
    let tokens = crate::tokenizer::tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut parser = Parser::new(tokens);
    let fact = parser.parse_fact()?;
    parser.finish()?;
    Ok(fact)
}

/// Parse a single term with no terminating period.
///
/// # Example
///
/// ```
/// use vocab_terms::{parse_term, ast::Term};
///
/// let term = parse_term("rdf(cls, taxonomy)").unwrap();
/// assert_eq!(term.arity(), 2);
/// ```
pub fn parse_term(input: &str) -> Result<Term, ParseError> {
    let tokens = crate::tokenizer::tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut parser = Parser::new(tokens);
    let term = parser.parse_term(0)?;
    parser.finish()?;
    Ok(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_capability_fact() {
        let doc = parse(r#"capability(rdf(concept), "CRUD")."#).unwrap();
        assert_eq!(doc.facts.len(), 1);
        assert_eq!(
            doc.facts[0].term,
            Term::compound(
                "capability",
                vec![
                    Term::compound("rdf", vec![Term::atom("concept")]),
                    Term::string("CRUD"),
                ]
            )
        );
    }

    #[test]
    fn test_parse_nested_qualifier() {
        let term = parse_term(r#"rdf(concept, lexicalization("en,it"))"#).unwrap();
        assert_eq!(
            term,
            Term::compound(
                "rdf",
                vec![
                    Term::atom("concept"),
                    Term::compound("lexicalization", vec![Term::string("en,it")]),
                ]
            )
        );
    }

    #[test]
    fn test_parse_multiple_facts() {
        let input = "\
% resolved capabilities
capability(rdf(concept), \"CRUD\").
capability(rdf(skos, notes), \"R\").

capability(cform(form), \"R\").";
        let doc = parse(input).unwrap();
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_fact_may_span_lines() {
        let doc = parse("capability(\n  rdf(cls),\n  \"C\"\n).").unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("  % nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_period() {
        assert_eq!(
            parse(r#"capability(rdf, "R")"#),
            Err(ParseError::UnexpectedEnd {
                expected: "`.` after fact".into()
            })
        );
    }

    #[test]
    fn test_missing_close_paren() {
        let error = parse(r#"capability(rdf, "R"."#).unwrap_err();
        assert_eq!(
            error,
            ParseError::Expected {
                expected: "`,` or `)`".into(),
                found: "`.`".into(),
                offset: 19,
            }
        );
    }

    #[test]
    fn test_empty_argument_list_is_rejected() {
        let error = parse_term("rdf()").unwrap_err();
        assert_eq!(error.offset(), Some(4));
    }

    #[test]
    fn test_parse_fact_rejects_trailing_input() {
        let error = parse_fact("rdf. cls.").unwrap_err();
        assert!(matches!(error, ParseError::Expected { offset: 5, .. }));
    }

    #[test]
    fn test_parse_fact_rejects_empty_input() {
        assert_eq!(parse_fact("   "), Err(ParseError::EmptyInput));
    }

    fn nested(levels: usize) -> String {
        format!("{}b{}", "a(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn test_nesting_up_to_limit_is_accepted() {
        let term = parse_term(&nested(MAX_DEPTH)).unwrap();
        assert_eq!(term.functor(), Some("a"));
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let error = parse_term(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(
            error,
            ParseError::TooDeep {
                limit: MAX_DEPTH,
                offset: 2 * MAX_DEPTH,
            }
        );
    }

    #[test]
    fn test_pathological_nesting_is_an_error() {
        let input = format!(r#"capability(rdf({}), "R")."#, nested(200_000));
        let error = parse(&input).unwrap_err();
        assert!(matches!(error, ParseError::TooDeep { .. }), "{error}");
    }

    #[test]
    fn test_roundtrip_document() {
        let input = "\
capability(rdf(concept), \"CRUD\").
capability(rdf(resource, lexicalization(\"en,it\")), \"C\").
capability(pm(project, _), \"R\").";
        let doc = parse(input).unwrap();
        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_roundtrip_normalizes_whitespace() {
        let doc = parse("capability( rdf ( cls ) ,\"C\" ) .").unwrap();
        assert_eq!(doc.to_string(), r#"capability(rdf(cls), "C")."#);
    }
}
