//! Defines the `Token` and `TokenKind` types.
//!
//! These are the intermediate representation between the `Tokenizer`
//! (lexer), the syntax checker and the tree builder.

use std::borrow::Cow;

/// The kind of a `Token`.
///
/// This represents the smallest meaningful units of JSON grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// A string, e.g. `"hello"`
    String,
    /// A number, e.g. `-12.5e3`
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// Returned by the lexer once the input is exhausted. Never stored
    /// in a `TokenBuffer`.
    EndOfInput,
}

impl TokenKind {
    /// True for tokens that can begin a JSON value.
    pub fn starts_value(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::ObjectOpen
                | TokenKind::ArrayOpen
        )
    }

    /// True for `{ } [ ] , :`.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::ObjectOpen
                | TokenKind::ObjectClose
                | TokenKind::ArrayOpen
                | TokenKind::ArrayClose
                | TokenKind::Comma
                | TokenKind::Colon
        )
    }

    /// The source text of a structural or keyword token.
    pub fn literal(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::ObjectOpen => "{",
            TokenKind::ObjectClose => "}",
            TokenKind::ArrayOpen => "[",
            TokenKind::ArrayClose => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::String | TokenKind::Number | TokenKind::EndOfInput => return None,
        })
    }
}

/// A single token produced by the `Tokenizer`.
///
/// `text` is only set for `String` (the unescaped content) and `Number`
/// (the literal text). The location is where the token starts, which is
/// what error reports point at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Option<Cow<'a, str>>,
    /// Byte offset of the first byte of the token.
    pub offset: usize,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

impl<'a> Token<'a> {
    /// A token with no payload.
    pub(crate) fn bare(kind: TokenKind, offset: usize, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: None,
            offset,
            line,
            column,
        }
    }

    /// The payload as a `&str`, empty for payload-free tokens.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_starting_kinds() {
        let starts: Vec<TokenKind> = [
            TokenKind::ObjectOpen,
            TokenKind::ObjectClose,
            TokenKind::ArrayOpen,
            TokenKind::ArrayClose,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::String,
            TokenKind::Number,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EndOfInput,
        ]
        .into_iter()
        .filter(|k| k.starts_value())
        .collect();
        assert_eq!(
            starts,
            vec![
                TokenKind::ObjectOpen,
                TokenKind::ArrayOpen,
                TokenKind::String,
                TokenKind::Number,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(TokenKind::Colon.literal(), Some(":"));
        assert_eq!(TokenKind::False.literal(), Some("false"));
        assert_eq!(TokenKind::Number.literal(), None);
        assert!(TokenKind::Comma.is_structural());
        assert!(!TokenKind::Null.is_structural());
    }

    #[test]
    fn test_token_text() {
        let token = Token::bare(TokenKind::Comma, 3, 1, 4);
        assert_eq!(token.text(), "");
        let token = Token {
            text: Some(Cow::Borrowed("42")),
            ..Token::bare(TokenKind::Number, 0, 1, 1)
        };
        assert_eq!(token.text(), "42");
    }
}
