//! Tokenizer for the capability fact language.
//!
//! Token types:
//! - **Atom**: identifier starting with a lowercase letter (e.g. `rdf`,
//!   `objectProperty`, `lexicalization`)
//! - **Var**: identifier starting with an uppercase letter or `_`
//! - **Str**: double-quoted string (e.g. `"CRUD"`, `"en,it"`)
//! - **Open** / **Close**: `(` and `)`
//! - **Comma**: `,`
//! - **Period**: `.` terminating a fact
//!
//! Whitespace is skipped and `%` starts a comment that runs to the end of
//! the line.

use std::fmt;

use crate::error::ParseError;

/// A classified token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A lowercase-initial identifier.
    Atom(String),
    /// An uppercase-initial or underscore-initial identifier.
    Var(String),
    /// A double-quoted string with escapes resolved.
    Str(String),
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
    /// `.`
    Period,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Atom(name) => write!(f, "atom `{name}`"),
            Token::Var(name) => write!(f, "variable `{name}`"),
            Token::Str(value) => write!(f, "string {value:?}"),
            Token::Open => write!(f, "`(`"),
            Token::Close => write!(f, "`)`"),
            Token::Comma => write!(f, "`,`"),
            Token::Period => write!(f, "`.`"),
        }
    }
}

/// A token together with the byte offset at which it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Tokenize the whole input into a flat token stream.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            ch if ch.is_whitespace() => continue,
            '%' => {
                // Comment runs to the end of the line.
                for (_, next) in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
                continue;
            }
            '(' => Token::Open,
            ')' => Token::Close,
            ',' => Token::Comma,
            '.' => Token::Period,
            '"' => {
                let mut value = String::new();
                let mut closed = false;
                while let Some((at, next)) = chars.next() {
                    match next {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, '"')) => value.push('"'),
                            Some((_, '\\')) => value.push('\\'),
                            Some((_, 'n')) => value.push('\n'),
                            Some((_, 't')) => value.push('\t'),
                            Some((_, other)) => {
                                return Err(ParseError::InvalidEscape {
                                    found: other,
                                    offset: at,
                                });
                            }
                            None => break,
                        },
                        other => value.push(other),
                    }
                }
                if !closed {
                    return Err(ParseError::UnterminatedString { offset });
                }
                Token::Str(value)
            }
            ch if ch.is_ascii_alphabetic() || ch == '_' => {
                let mut word = String::from(ch);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_identifier_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                if ch.is_ascii_lowercase() {
                    Token::Atom(word)
                } else {
                    Token::Var(word)
                }
            }
            other => {
                return Err(ParseError::UnexpectedCharacter {
                    found: other,
                    offset,
                });
            }
        };
        tokens.push(Spanned { token, offset });
    }

    Ok(tokens)
}
