//! # json-tree
//!
//! `json-tree` turns JSON text into an owned tree of [`JsonNode`]s in four
//! stages, each usable on its own:
//!
//! 1. **Lexer** ([`Tokenizer`]): one [`Token`] per call, no nesting logic.
//! 2. **Token buffer** ([`tokenize`] → [`TokenBuffer`]): the whole document
//!    as an indexable token sequence.
//! 3. **Syntax checker** ([`check`]): one pass with one token of lookahead
//!    and a stack of open containers; rejects every grammatically invalid
//!    sequence before anything is built.
//! 4. **Tree builder** ([`build`]): recursive descent over the checked
//!    buffer, bounded by [`ParseOptions::max_depth`].
//!
//! ## Quick Start
//!
//! ```
//! use json_tree::{parse, JsonNode};
//!
//! let root = parse(r#"{"name": "Babbage", "ids": [1815, 1871]}"#).unwrap();
//! assert_eq!(root.get("name").and_then(JsonNode::as_str), Some("Babbage"));
//! assert_eq!(root.get("ids").map(JsonNode::len), Some(2));
//! ```
//!
//! Errors say what was wrong and where:
//!
//! ```
//! use json_tree::{parse, SyntaxErrorKind};
//!
//! let err = parse(r#"{"a" 1}"#).unwrap_err();
//! assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingColon));
//! ```
//!
//! The root must be an object or an array. Objects keep every member in
//! document order, duplicates included; [`JsonNode::get`] returns the last
//! member with a given key.

/// Contains the `TokenBuffer` and the `tokenize` driver.
pub mod buffer;
/// Contains the recursive-descent tree builder.
pub mod builder;
/// Contains the one-pass syntax checker.
pub mod checker;
/// Contains the error types of every stage.
pub mod error;
/// Contains `ParseOptions` and the default limits.
pub mod options;
/// Contains the `Token` and `TokenKind` types.
pub mod token;
/// Contains the lexer.
pub mod tokenizer;
/// Contains the `JsonNode` tree.
pub mod value;

pub use buffer::{tokenize, TokenBuffer};
pub use builder::build;
pub use checker::{check, role_of, Context, Role};
pub use error::{
    Error, LexError, LexErrorKind, ParseError, ParseErrorKind, SyntaxError, SyntaxErrorKind,
};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH, MAX_JSON_SIZE_BYTES};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use value::{JsonNode, JsonNumber};

/// Parses a complete JSON document with the default [`ParseOptions`].
///
/// # Errors
/// The first failure of any stage: `Error::Lex`, `Error::EmptyDocument`,
/// `Error::Syntax`, `Error::Parse`, or `Error::InputTooLarge`.
pub fn parse(input: &str) -> Result<JsonNode, Error> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parses a complete JSON document under the given limits.
///
/// ```
/// use json_tree::{parse_with_options, ParseErrorKind, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// assert!(parse_with_options("[[1]]", &options).is_ok());
/// let err = parse_with_options("[[[1]]]", &options).unwrap_err();
/// assert_eq!(err.parse_kind(), Some(ParseErrorKind::MaxDepthExceeded));
/// ```
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<JsonNode, Error> {
    if input.len() > options.max_input_size {
        return Err(Error::InputTooLarge {
            size: input.len(),
            limit: options.max_input_size,
        });
    }
    let buffer = tokenize(input)?;
    check(&buffer)?;
    build(&buffer, options)
}

/// Parses a document handed over as raw bytes, such as a whole file.
///
/// # Errors
/// `Error::InvalidUtf8` if `bytes` is not UTF-8, otherwise as [`parse`].
pub fn from_slice(bytes: &[u8]) -> Result<JsonNode, Error> {
    let input = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    parse(input)
}
