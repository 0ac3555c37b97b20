//! The `TokenBuffer` and the `tokenize` driver that fills it.

use crate::error::Error;
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// An ordered, indexable sequence of tokens in document order.
///
/// Built once per document by [`tokenize`]; the checker and the builder
/// only read from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenBuffer<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenBuffer<'a> {
    pub fn new() -> Self {
        TokenBuffer { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenBuffer {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Appends a token. Amortized O(1).
    pub fn push(&mut self, token: Token<'a>) {
        self.tokens.push(token);
    }

    /// Returns the token at `index`.
    ///
    /// # Errors
    /// `Error::IndexOutOfRange` if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<&Token<'a>, Error> {
        self.tokens.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.tokens.len(),
        })
    }

    /// The kind of the token at `index`, or `None` past the end.
    pub fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|token| token.kind)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    /// Just the kinds, in order.
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|token| token.kind)
    }
}

impl<'a, 'b> IntoIterator for &'b TokenBuffer<'a> {
    type Item = &'b Token<'a>;
    type IntoIter = std::slice::Iter<'b, Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Runs the lexer over `input` until end of input.
///
/// Line breaks between tokens are consumed as framing. `EndOfInput` is
/// not stored.
///
/// # Errors
/// `Error::Lex` for the first malformed token, `Error::EmptyDocument` if
/// the input holds no tokens at all.
pub fn tokenize(input: &str) -> Result<TokenBuffer<'_>, Error> {
    let mut tokenizer = Tokenizer::new(input);
    // Roughly one token per eight bytes of typical JSON.
    let mut buffer = TokenBuffer::with_capacity(input.len() / 8 + 1);

    loop {
        tokenizer.skip_line_framing();
        let token = tokenizer.next_token()?;
        if token.kind == TokenKind::EndOfInput {
            break;
        }
        buffer.push(token);
    }

    if buffer.is_empty() {
        return Err(Error::EmptyDocument);
    }
    Ok(buffer)
}
