//! Abstract syntax tree types for the capability fact language.
//!
//! A fact like `capability(rdf(concept), "CRUD").` is represented as a
//! [`Fact`] wrapping a compound [`Term`] with functor `capability` and two
//! arguments: the compound `rdf(concept)` and the string `"CRUD"`.

use std::fmt;

/// A term of the fact language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A lowercase-initial constant such as `rdf` or `concept`.
    Atom(String),
    /// A double-quoted string such as `"CRUD"`.
    Str(String),
    /// A variable. `_` is the anonymous variable.
    Var(String),
    /// A functor applied to one or more arguments, e.g. `rdf(concept)`.
    Compound { functor: String, args: Vec<Term> },
}

impl Term {
    /// Create an atom term.
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Create a string term.
    pub fn string(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    /// Create a compound term.
    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    /// The anonymous variable `_`.
    pub fn wildcard() -> Self {
        Term::Var("_".into())
    }

    /// Name of this term's functor: the atom itself for atoms, the functor
    /// for compounds, `None` for strings and variables.
    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            Term::Compound { functor, .. } => Some(functor),
            Term::Str(_) | Term::Var(_) => None,
        }
    }

    /// Arguments of a compound term; empty for every other term.
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound { args, .. } => args,
            _ => &[],
        }
    }

    /// Number of arguments (0 for atoms).
    pub fn arity(&self) -> usize {
        self.args().len()
    }

    /// Returns `true` if this term is a variable (named or anonymous).
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Returns `true` if the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Compound { args, .. } => args.iter().all(Term::is_ground),
            Term::Atom(_) | Term::Str(_) => true,
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in value.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            other => write!(f, "{other}")?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{name}"),
            Term::Str(value) => write_quoted(f, value),
            Term::Var(name) => write!(f, "{name}"),
            Term::Compound { functor, args } => {
                write!(f, "{functor}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A fact: a term asserted as true, written with a terminating period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    pub term: Term,
}

impl Fact {
    pub fn new(term: Term) -> Self {
        Self { term }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.", self.term)
    }
}

/// A document is a sequence of facts parsed from one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub facts: Vec<Fact>,
}

impl Document {
    pub fn new(facts: Vec<Fact>) -> Self {
        Self { facts }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl IntoIterator for Document {
    type Item = Fact;
    type IntoIter = std::vec::IntoIter<Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.into_iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fact) in self.facts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{fact}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_display() {
        let term = Term::compound(
            "capability",
            vec![
                Term::compound("rdf", vec![Term::atom("concept")]),
                Term::string("CRUD"),
            ],
        );
        assert_eq!(term.to_string(), r#"capability(rdf(concept), "CRUD")"#);
    }

    #[test]
    fn test_string_display_escapes_quotes() {
        assert_eq!(Term::string("a\"b").to_string(), r#""a\"b""#);
    }

    #[test]
    fn test_fact_display_has_period() {
        let fact = Fact::new(Term::atom("rdf"));
        assert_eq!(fact.to_string(), "rdf.");
    }

    #[test]
    fn test_functor_and_arity() {
        let term = Term::compound("rdf", vec![Term::atom("cls"), Term::wildcard()]);
        assert_eq!(term.functor(), Some("rdf"));
        assert_eq!(term.arity(), 2);
        assert!(!term.is_ground());

        assert_eq!(Term::atom("rdf").arity(), 0);
        assert_eq!(Term::string("R").functor(), None);
    }
}
