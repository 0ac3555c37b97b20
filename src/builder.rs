//! The recursive-descent tree builder.
//!
//! Consumes a checked `TokenBuffer` by index and returns the root
//! `JsonNode`. Each call to `build_value` consumes exactly one value
//! (one token for a scalar, the whole subtree for a container) and
//! returns the index just past it.

use crate::buffer::TokenBuffer;
use crate::error::{Error, ParseError, ParseErrorKind};
use crate::options::ParseOptions;
use crate::token::TokenKind;
use crate::value::{JsonNode, JsonNumber};

/// Builds the tree for a buffer that has passed [`check`](crate::check).
///
/// The grammar is not re-validated; tokens out of place are reported as
/// `ParseErrorKind::UnexpectedToken` rather than trusted.
///
/// # Errors
/// `ExpectedRootContainer` unless the first token is `{` or `[`,
/// `MaxDepthExceeded` past `options.max_depth`, `NumberOverflow` or
/// `InvalidNumber` for number text that does not convert.
pub fn build(buffer: &TokenBuffer<'_>, options: &ParseOptions) -> Result<JsonNode, Error> {
    match buffer.get(0)?.kind {
        TokenKind::ObjectOpen | TokenKind::ArrayOpen => {}
        _ => return Err(fail(ParseErrorKind::ExpectedRootContainer, 0)),
    }

    let builder = Builder {
        buffer,
        max_depth: options.max_depth,
    };
    let (root, next) = builder.build_value(0, 0)?;
    if next != buffer.len() {
        return Err(fail(ParseErrorKind::UnexpectedToken, next));
    }
    Ok(root)
}

fn fail(kind: ParseErrorKind, token_index: usize) -> Error {
    ParseError { kind, token_index }.into()
}

struct Builder<'b, 'a> {
    buffer: &'b TokenBuffer<'a>,
    max_depth: usize,
}

impl Builder<'_, '_> {
    fn kind(&self, index: usize) -> Result<TokenKind, Error> {
        Ok(self.buffer.get(index)?.kind)
    }

    /// `depth` is the nesting level of the container holding this value.
    fn build_value(&self, index: usize, depth: usize) -> Result<(JsonNode, usize), Error> {
        let token = self.buffer.get(index)?;
        let node = match token.kind {
            TokenKind::ObjectOpen => return self.build_object(index, depth + 1),
            TokenKind::ArrayOpen => return self.build_array(index, depth + 1),
            TokenKind::String => JsonNode::String(token.text().to_owned()),
            TokenKind::Number => {
                let number = convert_number(token.text()).map_err(|kind| fail(kind, index))?;
                JsonNode::Number(number)
            }
            TokenKind::True => JsonNode::Bool(true),
            TokenKind::False => JsonNode::Bool(false),
            TokenKind::Null => JsonNode::Null,
            _ => return Err(fail(ParseErrorKind::UnexpectedToken, index)),
        };
        Ok((node, index + 1))
    }

    fn enter(&self, depth: usize, index: usize) -> Result<(), Error> {
        if depth > self.max_depth {
            return Err(fail(ParseErrorKind::MaxDepthExceeded, index));
        }
        Ok(())
    }

    fn build_object(&self, open: usize, depth: usize) -> Result<(JsonNode, usize), Error> {
        self.enter(depth, open)?;
        let mut members = Vec::new();
        let mut index = open + 1;
        if self.kind(index)? == TokenKind::ObjectClose {
            return Ok((JsonNode::Object(members), index + 1));
        }

        loop {
            let key_token = self.buffer.get(index)?;
            if key_token.kind != TokenKind::String {
                return Err(fail(ParseErrorKind::UnexpectedToken, index));
            }
            if self.kind(index + 1)? != TokenKind::Colon {
                return Err(fail(ParseErrorKind::UnexpectedToken, index + 1));
            }
            let (value, next) = self.build_value(index + 2, depth)?;
            members.push((key_token.text().to_owned(), value));

            match self.kind(next)? {
                TokenKind::Comma => index = next + 1,
                TokenKind::ObjectClose => return Ok((JsonNode::Object(members), next + 1)),
                _ => return Err(fail(ParseErrorKind::UnexpectedToken, next)),
            }
        }
    }

    fn build_array(&self, open: usize, depth: usize) -> Result<(JsonNode, usize), Error> {
        self.enter(depth, open)?;
        let mut items = Vec::new();
        let mut index = open + 1;
        if self.kind(index)? == TokenKind::ArrayClose {
            return Ok((JsonNode::Array(items), index + 1));
        }

        loop {
            let (value, next) = self.build_value(index, depth)?;
            items.push(value);

            match self.kind(next)? {
                TokenKind::Comma => index = next + 1,
                TokenKind::ArrayClose => return Ok((JsonNode::Array(items), next + 1)),
                _ => return Err(fail(ParseErrorKind::UnexpectedToken, next)),
            }
        }
    }
}

/// Integers go to `i64`, then `u64`; anything else to a finite `f64`.
fn convert_number(text: &str) -> Result<JsonNumber, ParseErrorKind> {
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(JsonNumber::I64(n));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Ok(JsonNumber::U64(n));
        }
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(JsonNumber::F64(n)),
        Ok(_) => Err(ParseErrorKind::NumberOverflow),
        Err(_) => Err(ParseErrorKind::InvalidNumber),
    }
}
