//! The syntax checker.
//!
//! A single left-to-right pass over a `TokenBuffer` with one token of
//! lookahead. Each token decides what the token after it may be; a stack
//! of open containers supplies the context. The pass builds nothing and
//! mutates nothing, it only certifies that the builder can trust the
//! buffer.

use crate::buffer::TokenBuffer;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::token::TokenKind;

/// One entry of the context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    InObject,
    InArray,
}

impl Context {
    fn closed_by(self) -> TokenKind {
        match self {
            Context::InObject => TokenKind::ObjectClose,
            Context::InArray => TokenKind::ArrayClose,
        }
    }
}

/// The part a token plays in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A `String` naming an object member.
    Key,
    /// A token that starts a value.
    Value,
    /// `,`, `:` or a closing bracket.
    Punctuation,
}

/// Classifies a token from the kind before it and the innermost open
/// container.
///
/// A `String` is a key only directly after `{`, or after `,` inside an
/// object; every other `String` is a value.
pub fn role_of(kind: TokenKind, prev: Option<TokenKind>, context: Option<Context>) -> Role {
    match kind {
        TokenKind::String => match (prev, context) {
            (Some(TokenKind::ObjectOpen | TokenKind::Comma), Some(Context::InObject)) => Role::Key,
            _ => Role::Value,
        },
        k if k.starts_value() => Role::Value,
        _ => Role::Punctuation,
    }
}

/// What the next token must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// After `{`.
    KeyOrClose,
    /// After `,` in an object.
    Key,
    /// After a key.
    Colon,
    /// After `:`, or `,` in an array.
    Value,
    /// After `[`.
    ValueOrClose,
    /// After a scalar or a closing bracket.
    CommaOrClose,
}

fn fail(kind: SyntaxErrorKind, token_index: usize) -> SyntaxError {
    SyntaxError { kind, token_index }
}

/// Verifies that `buffer` is one well-formed JSON value.
///
/// # Errors
/// The first `SyntaxError` found, pointing at the offending token, or at
/// `buffer.len()` when the document ends inside a container.
pub fn check(buffer: &TokenBuffer<'_>) -> Result<(), SyntaxError> {
    let mut stack: Vec<Context> = Vec::new();

    match buffer.kind_at(0) {
        None => return Err(fail(SyntaxErrorKind::MissingValue, 0)),
        Some(TokenKind::ObjectClose | TokenKind::ArrayClose) => {
            return Err(fail(SyntaxErrorKind::UnbalancedBrackets, 0));
        }
        Some(kind) if !kind.starts_value() => {
            return Err(fail(SyntaxErrorKind::MissingValue, 0));
        }
        Some(_) => {}
    }

    let mut prev = None;
    for (index, token) in buffer.iter().enumerate() {
        let kind = token.kind;
        let role = role_of(kind, prev, stack.last().copied());

        let expect = match kind {
            TokenKind::ObjectOpen => {
                stack.push(Context::InObject);
                Expect::KeyOrClose
            }
            TokenKind::ArrayOpen => {
                stack.push(Context::InArray);
                Expect::ValueOrClose
            }
            TokenKind::ObjectClose | TokenKind::ArrayClose => {
                close(&mut stack, kind, index)?;
                Expect::CommaOrClose
            }
            TokenKind::Colon => Expect::Value,
            TokenKind::Comma => match stack.last() {
                Some(Context::InObject) => Expect::Key,
                Some(Context::InArray) => Expect::Value,
                None => return Err(fail(SyntaxErrorKind::TrailingTokens, index)),
            },
            TokenKind::String if role == Role::Key => Expect::Colon,
            _ => Expect::CommaOrClose,
        };

        let next = index + 1;
        verify(expect, buffer.kind_at(next), stack.last().copied(), next)?;
        prev = Some(kind);
    }

    Ok(())
}

/// Pops the context closed by `kind`.
fn close(stack: &mut Vec<Context>, kind: TokenKind, index: usize) -> Result<(), SyntaxError> {
    match stack.last() {
        None => Err(fail(SyntaxErrorKind::UnbalancedBrackets, index)),
        Some(context) if context.closed_by() != kind => {
            Err(fail(SyntaxErrorKind::MismatchedBracket, index))
        }
        Some(_) => {
            stack.pop();
            Ok(())
        }
    }
}

/// Checks the lookahead token `next` (at `index`) against `expect`.
fn verify(
    expect: Expect,
    next: Option<TokenKind>,
    context: Option<Context>,
    index: usize,
) -> Result<(), SyntaxError> {
    let Some(next) = next else {
        return match (context, expect) {
            (Some(_), _) => Err(fail(SyntaxErrorKind::UnbalancedBrackets, index)),
            (None, Expect::CommaOrClose) => Ok(()),
            (None, _) => Err(fail(SyntaxErrorKind::MissingValue, index)),
        };
    };

    // A close bracket that cannot close anything is a bracket error first.
    if matches!(next, TokenKind::ObjectClose | TokenKind::ArrayClose) {
        match context {
            None => return Err(fail(SyntaxErrorKind::UnbalancedBrackets, index)),
            Some(context) if context.closed_by() != next => {
                return Err(fail(SyntaxErrorKind::MismatchedBracket, index));
            }
            Some(_) => {}
        }
    }

    let ok = match expect {
        Expect::KeyOrClose => matches!(next, TokenKind::String | TokenKind::ObjectClose),
        Expect::Key => next == TokenKind::String,
        Expect::Colon => next == TokenKind::Colon,
        Expect::Value => next.starts_value(),
        Expect::ValueOrClose => next.starts_value() || next == TokenKind::ArrayClose,
        Expect::CommaOrClose => match context {
            Some(context) => next == TokenKind::Comma || next == context.closed_by(),
            None => return Err(fail(SyntaxErrorKind::TrailingTokens, index)),
        },
    };
    if ok {
        return Ok(());
    }

    let kind = match expect {
        Expect::KeyOrClose | Expect::Key => SyntaxErrorKind::MissingKey,
        Expect::Colon => SyntaxErrorKind::MissingColon,
        Expect::Value | Expect::ValueOrClose => SyntaxErrorKind::MissingValue,
        Expect::CommaOrClose => SyntaxErrorKind::MissingCommaOrClose,
    };
    Err(fail(kind, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::tokenize;

    fn check_str(input: &str) -> Result<(), SyntaxError> {
        check(&tokenize(input).expect("input should tokenize"))
    }

    fn kind_and_index(input: &str) -> (SyntaxErrorKind, usize) {
        let err = check_str(input).unwrap_err();
        (err.kind, err.token_index)
    }

    #[test]
    fn test_accepts_valid_documents() {
        for input in [
            "{}",
            "[]",
            r#"{"a":1,"b":[true,false,null]}"#,
            r#"[{"a": {"b": []}}, "s", -1.5e3, {}]"#,
            r#"{"k": "v", "k": "w"}"#,
            r#"["key-looking", "strings"]"#,
            "42",
            r#""bare""#,
        ] {
            assert_eq!(check_str(input), Ok(()), "{input}");
        }
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            kind_and_index(r#"{"a" 1}"#),
            (SyntaxErrorKind::MissingColon, 2)
        );
        assert_eq!(
            kind_and_index(r#"{"a":1,"b"}"#),
            (SyntaxErrorKind::MissingColon, 6)
        );
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(kind_and_index("{1:2}"), (SyntaxErrorKind::MissingKey, 1));
        assert_eq!(
            kind_and_index(r#"{"a":1,}"#),
            (SyntaxErrorKind::MissingKey, 5)
        );
        assert_eq!(
            kind_and_index(r#"{"a":1,2:3}"#),
            (SyntaxErrorKind::MissingKey, 5)
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(kind_and_index("[1,,2]"), (SyntaxErrorKind::MissingValue, 3));
        assert_eq!(kind_and_index("[1,]"), (SyntaxErrorKind::MissingValue, 3));
        assert_eq!(kind_and_index("[,]"), (SyntaxErrorKind::MissingValue, 1));
        assert_eq!(
            kind_and_index(r#"{"a":}"#),
            (SyntaxErrorKind::MissingValue, 3)
        );
        assert_eq!(kind_and_index(":"), (SyntaxErrorKind::MissingValue, 0));
    }

    #[test]
    fn test_missing_comma_or_close() {
        assert_eq!(
            kind_and_index("[1 true]"),
            (SyntaxErrorKind::MissingCommaOrClose, 2)
        );
        assert_eq!(
            kind_and_index(r#"{"a":1 "b":2}"#),
            (SyntaxErrorKind::MissingCommaOrClose, 4)
        );
        assert_eq!(
            kind_and_index("[1:2]"),
            (SyntaxErrorKind::MissingCommaOrClose, 2)
        );
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(
            kind_and_index(r#"{"a":1"#),
            (SyntaxErrorKind::UnbalancedBrackets, 4)
        );
        assert_eq!(kind_and_index("[[1]"), (SyntaxErrorKind::UnbalancedBrackets, 4));
        assert_eq!(kind_and_index("["), (SyntaxErrorKind::UnbalancedBrackets, 1));
        assert_eq!(kind_and_index("[1]]"), (SyntaxErrorKind::UnbalancedBrackets, 3));
        assert_eq!(kind_and_index("}"), (SyntaxErrorKind::UnbalancedBrackets, 0));
        assert_eq!(
            kind_and_index(r#"{"a":"#),
            (SyntaxErrorKind::UnbalancedBrackets, 3)
        );
    }

    #[test]
    fn test_mismatched_brackets() {
        assert_eq!(kind_and_index("[1}"), (SyntaxErrorKind::MismatchedBracket, 2));
        assert_eq!(
            kind_and_index(r#"{"a":1]"#),
            (SyntaxErrorKind::MismatchedBracket, 4)
        );
        assert_eq!(kind_and_index("[}"), (SyntaxErrorKind::MismatchedBracket, 1));
        assert_eq!(kind_and_index("{]"), (SyntaxErrorKind::MismatchedBracket, 1));
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(kind_and_index("[1] [2]"), (SyntaxErrorKind::TrailingTokens, 3));
        assert_eq!(kind_and_index("1 2"), (SyntaxErrorKind::TrailingTokens, 1));
        assert_eq!(kind_and_index("{},"), (SyntaxErrorKind::TrailingTokens, 2));
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(
            check(&TokenBuffer::new()),
            Err(SyntaxError {
                kind: SyntaxErrorKind::MissingValue,
                token_index: 0
            })
        );
    }

    #[test]
    fn test_role_of_strings() {
        let obj = Some(Context::InObject);
        let arr = Some(Context::InArray);
        assert_eq!(role_of(TokenKind::String, Some(TokenKind::ObjectOpen), obj), Role::Key);
        assert_eq!(role_of(TokenKind::String, Some(TokenKind::Comma), obj), Role::Key);
        assert_eq!(role_of(TokenKind::String, Some(TokenKind::Colon), obj), Role::Value);
        assert_eq!(role_of(TokenKind::String, Some(TokenKind::Comma), arr), Role::Value);
        assert_eq!(role_of(TokenKind::String, None, None), Role::Value);
        assert_eq!(role_of(TokenKind::ObjectOpen, None, None), Role::Value);
        assert_eq!(role_of(TokenKind::Colon, None, obj), Role::Punctuation);
    }

    #[test]
    fn test_check_is_repeatable() {
        let buffer = tokenize(r#"{"a" 1}"#).unwrap();
        assert_eq!(check(&buffer), check(&buffer));
    }
}
