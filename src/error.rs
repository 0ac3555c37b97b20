//! Error types for every stage of the pipeline.
//!
//! Each stage reports its own error struct, carrying a `Copy` kind that
//! callers can match on and the location where the problem was found:
//! a byte offset plus line/column for the lexer, a token index for the
//! checker and the builder. The top-level [`Error`] wraps all of them.
use thiserror::Error;

/// What went wrong while turning characters into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input was reached before the closing `"`.
    UnterminatedString,
    /// End of input was reached in the middle of `true`, `false` or `null`.
    UnterminatedLiteral,
    /// A character that cannot start or continue a token.
    UnexpectedChar(char),
    /// An unknown escape letter, a malformed `\uXXXX`, or an unpaired surrogate.
    InvalidEscape,
    /// A raw control character (below U+0020) inside a string.
    ControlCharacter,
    /// A number with a leading zero, a bare `.`, or an exponent with no digits.
    InvalidNumber,
}

impl std::fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => f.write_str("unterminated string"),
            LexErrorKind::UnterminatedLiteral => f.write_str("unterminated literal"),
            LexErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            LexErrorKind::InvalidEscape => f.write_str("invalid escape sequence"),
            LexErrorKind::ControlCharacter => f.write_str("unescaped control character in string"),
            LexErrorKind::InvalidNumber => f.write_str("invalid number"),
        }
    }
}

/// A malformed token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column} (byte {offset})")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-indexed.
    pub line: usize,
    /// 1-indexed, counted in bytes.
    pub column: usize,
}

/// Grammar violations found by [`check`](crate::check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    MissingKey,
    MissingColon,
    MissingValue,
    MissingCommaOrClose,
    /// A close bracket with nothing open, or the document ended inside a container.
    UnbalancedBrackets,
    /// `}` closing an array or `]` closing an object.
    MismatchedBracket,
    /// More tokens after the root value was complete.
    TrailingTokens,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SyntaxErrorKind::MissingKey => "expected a string key",
            SyntaxErrorKind::MissingColon => "expected ':' after key",
            SyntaxErrorKind::MissingValue => "expected a value",
            SyntaxErrorKind::MissingCommaOrClose => "expected ',' or a closing bracket",
            SyntaxErrorKind::UnbalancedBrackets => "unbalanced brackets",
            SyntaxErrorKind::MismatchedBracket => "mismatched closing bracket",
            SyntaxErrorKind::TrailingTokens => "unexpected trailing token",
        })
    }
}

/// A grammatically invalid token sequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at token {token_index}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Index of the offending token, or the buffer length when the
    /// document ended too early.
    pub token_index: usize,
}

/// Failures raised while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The first token is not `{` or `[`.
    ExpectedRootContainer,
    /// The number text does not fit a finite `f64`.
    NumberOverflow,
    /// The number text could not be converted at all.
    InvalidNumber,
    /// Nesting went deeper than [`ParseOptions::max_depth`](crate::ParseOptions).
    MaxDepthExceeded,
    /// A token the checked grammar does not allow at this position.
    UnexpectedToken,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ParseErrorKind::ExpectedRootContainer => "expected an object or array at the root",
            ParseErrorKind::NumberOverflow => "number out of range",
            ParseErrorKind::InvalidNumber => "invalid number",
            ParseErrorKind::MaxDepthExceeded => "maximum nesting depth exceeded",
            ParseErrorKind::UnexpectedToken => "unexpected token",
        })
    }
}

/// A builder-level failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at token {token_index}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token_index: usize,
}

/// The primary error type returned by the parsing pipeline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("empty document")]
    EmptyDocument,
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
    #[error("invalid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
    #[error("token index {index} out of range for a buffer of {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Error {
    /// The lexer error kind, if this is a lexing failure.
    pub fn lex_kind(&self) -> Option<LexErrorKind> {
        match self {
            Error::Lex(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The syntax error kind, if the checker rejected the document.
    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            Error::Syntax(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The builder error kind, if tree construction failed.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse(e) => Some(e.kind),
            _ => None,
        }
    }
}
