//! The byte-based tokenizer (lexer).
//!
//! The `Tokenizer` owns its scan position and hands out one `Token` per
//! call to [`Tokenizer::next_token`]. It never looks at nesting; brackets
//! are single tokens and all grammar lives in the checker and the builder.

use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind};
use memchr::memchr2;
use std::borrow::Cow;

// --- The Lookup Table (LUT) ---
// One entry per byte value; classifies the byte at a token boundary.
const W: u8 = 1; // Blank (space, tab)
const B: u8 = 2; // Line break
const S: u8 = 3; // Structural
const L: u8 = 4; // Keyword start
const D: u8 = 5; // Digit or '-'
const Q: u8 = 6; // Quote

static BYTE_CLASS: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'\n' as usize] = B;
    table[b'\r' as usize] = B;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: everything else, including NUL, which `next_token` treats as end of input.
    table
};

/// Bytes allowed right after a keyword.
#[inline]
fn is_delimiter(byte: u8) -> bool {
    byte == 0 || matches!(BYTE_CLASS[byte as usize], W | B | S)
}

/// The JSON lexer.
///
/// `next_token` skips spaces and tabs only. Line breaks between tokens are
/// framing, consumed by [`Tokenizer::skip_line_framing`]; the `Iterator`
/// impl and [`tokenize`](crate::tokenize) apply it before every token.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Byte index of the next unread byte.
    cursor: usize,
    line: usize,
    column: usize,
    /// Set once the iterator has yielded an error.
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Current 1-indexed line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current 1-indexed column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// A `LexError` at the current position.
    fn error(&self, kind: LexErrorKind) -> LexError {
        self.error_ahead(kind, 0)
    }

    /// A `LexError` `ahead` bytes past the cursor on the current line.
    fn error_ahead(&self, kind: LexErrorKind, ahead: usize) -> LexError {
        LexError {
            kind,
            offset: self.cursor + ahead,
            line: self.line,
            column: self.column + ahead,
        }
    }

    /// The character starting at `offset`, for error reports.
    fn char_at(&self, offset: usize) -> char {
        self.input
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn unexpected_ahead(&self, ahead: usize) -> LexError {
        let c = self.char_at(self.cursor + ahead);
        self.error_ahead(LexErrorKind::UnexpectedChar(c), ahead)
    }

    /// Advances the cursor by one byte, updating line/column.
    /// Assumes the cursor is not at the end.
    #[inline]
    fn advance_byte(&mut self) -> u8 {
        let byte = self.bytes[self.cursor];
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.cursor += 1;
        byte
    }

    /// Advances over `n` bytes known not to contain a line break.
    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.cursor += n;
        self.column += n;
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn skip_blanks(&mut self) {
        while let Some(byte) = self.peek() {
            if BYTE_CLASS[byte as usize] != W {
                break;
            }
            self.advance_byte();
        }
    }

    /// Consumes blanks and line breaks (CR and LF, alone or paired) up to the
    /// next token.
    pub fn skip_line_framing(&mut self) {
        while let Some(byte) = self.peek() {
            match BYTE_CLASS[byte as usize] {
                W | B => {
                    self.advance_byte();
                }
                _ => break,
            }
        }
    }

    /// Scans one token.
    ///
    /// Returns `EndOfInput` once the cursor reaches the end of the input or
    /// a NUL byte; calling again keeps returning `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_blanks();

        let (offset, line, column) = (self.cursor, self.line, self.column);
        let byte = match self.peek() {
            Some(0) | None => {
                return Ok(Token::bare(TokenKind::EndOfInput, offset, line, column));
            }
            Some(b) => b,
        };

        let (kind, text) = match BYTE_CLASS[byte as usize] {
            S => {
                self.advance_byte();
                let kind = match byte {
                    b'{' => TokenKind::ObjectOpen,
                    b'}' => TokenKind::ObjectClose,
                    b'[' => TokenKind::ArrayOpen,
                    b']' => TokenKind::ArrayClose,
                    b':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                (kind, None)
            }
            L => {
                let kind = match byte {
                    b't' => self.lex_literal(b"true", TokenKind::True)?,
                    b'f' => self.lex_literal(b"false", TokenKind::False)?,
                    _ => self.lex_literal(b"null", TokenKind::Null)?,
                };
                (kind, None)
            }
            D => (TokenKind::Number, Some(self.lex_number()?)),
            Q => (TokenKind::String, Some(self.lex_string()?)),
            _ => return Err(self.unexpected_ahead(0)),
        };

        Ok(Token {
            kind,
            text,
            offset,
            line,
            column,
        })
    }

    /// Matches `true`, `false` or `null` exactly, followed by a delimiter.
    fn lex_literal(
        &mut self,
        expected: &'static [u8],
        kind: TokenKind,
    ) -> Result<TokenKind, LexError> {
        for (i, &want) in expected.iter().enumerate() {
            match self.bytes.get(self.cursor + i) {
                None => return Err(self.error(LexErrorKind::UnterminatedLiteral)),
                Some(&got) if got != want => return Err(self.unexpected_ahead(i)),
                Some(_) => {}
            }
        }
        if let Some(&next) = self.bytes.get(self.cursor + expected.len()) {
            if !is_delimiter(next) {
                return Err(self.unexpected_ahead(expected.len()));
            }
        }
        self.advance_by(expected.len());
        Ok(kind)
    }

    /// Rejects raw control characters in `self.bytes[self.cursor..self.cursor + len]`.
    fn check_control(&self, len: usize) -> Result<(), LexError> {
        match self.bytes[self.cursor..self.cursor + len]
            .iter()
            .position(|&b| b < 0x20)
        {
            Some(at) => Err(self.error_ahead(LexErrorKind::ControlCharacter, at)),
            None => Ok(()),
        }
    }

    /// Scans a string, returning its unescaped content.
    ///
    /// Strings without escapes are borrowed straight from the input.
    fn lex_string(&mut self) -> Result<Cow<'a, str>, LexError> {
        let unterminated = self.error(LexErrorKind::UnterminatedString);
        self.advance_byte(); // opening quote
        let content_start = self.cursor;

        // Hot path: no escapes before the closing quote.
        let i = memchr2(b'"', b'\\', &self.bytes[self.cursor..]).ok_or(unterminated)?;
        self.check_control(i)?;
        self.advance_by(i);
        if self.bytes[self.cursor] == b'"' {
            let content = &self.input[content_start..self.cursor];
            self.advance_byte();
            return Ok(Cow::Borrowed(content));
        }

        // Cold path: build the string piece by piece.
        let mut out = String::with_capacity(i + 16);
        out.push_str(&self.input[content_start..self.cursor]);
        loop {
            // The cursor sits on a backslash.
            self.advance_byte();
            let escape = self.peek().ok_or(unterminated)?;
            let c = if escape == b'u' {
                let escape_start = self.cursor - 1;
                self.advance_byte();
                self.lex_unicode_escape(escape_start, unterminated)?
            } else {
                let c = match escape {
                    b'"' => '"',
                    b'\\' => '\\',
                    b'/' => '/',
                    b'b' => '\u{0008}',
                    b'f' => '\u{000C}',
                    b'n' => '\n',
                    b'r' => '\r',
                    b't' => '\t',
                    _ => return Err(self.error(LexErrorKind::InvalidEscape)),
                };
                self.advance_byte();
                c
            };
            out.push(c);

            let i = memchr2(b'"', b'\\', &self.bytes[self.cursor..]).ok_or(unterminated)?;
            if self.finish_run(&mut out, i)? {
                return Ok(Cow::Owned(out));
            }
        }
    }

    /// Copies an unescaped run of `len` bytes and stops on the following
    /// quote or backslash. Returns `true` if the string is closed.
    fn finish_run(&mut self, out: &mut String, len: usize) -> Result<bool, LexError> {
        self.check_control(len)?;
        out.push_str(&self.input[self.cursor..self.cursor + len]);
        self.advance_by(len);
        if self.bytes[self.cursor] == b'"' {
            self.advance_byte();
            return Ok(true);
        }
        Ok(false)
    }

    /// Reads the digits of `\uXXXX`, combining a surrogate pair if present.
    /// The cursor starts on the first hex digit.
    fn lex_unicode_escape(
        &mut self,
        escape_start: usize,
        unterminated: LexError,
    ) -> Result<char, LexError> {
        let invalid = LexError {
            kind: LexErrorKind::InvalidEscape,
            offset: escape_start,
            line: self.line,
            column: self.column - (self.cursor - escape_start),
        };

        let high = self.read_hex4(invalid, unterminated)?;
        let code = match high {
            0xD800..=0xDBFF => {
                if self.bytes.get(self.cursor..self.cursor + 2) != Some(b"\\u".as_slice()) {
                    return Err(invalid);
                }
                self.advance_by(2);
                let low = self.read_hex4(invalid, unterminated)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(invalid);
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(invalid),
            _ => high,
        };
        char::from_u32(code).ok_or(invalid)
    }

    fn read_hex4(&mut self, invalid: LexError, unterminated: LexError) -> Result<u32, LexError> {
        let mut value = 0;
        for _ in 0..4 {
            let byte = self.peek().ok_or(unterminated)?;
            let digit = (byte as char).to_digit(16).ok_or(invalid)?;
            value = value * 16 + digit;
            self.advance_byte();
        }
        Ok(value)
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.cursor;
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance_byte();
        }
        self.cursor - start
    }

    /// Scans `-? digits (. digits)? ([eE] [+-]? digits)?` and returns the text.
    fn lex_number(&mut self) -> Result<Cow<'a, str>, LexError> {
        let start = self.cursor;
        let invalid = self.error(LexErrorKind::InvalidNumber);

        if self.peek() == Some(b'-') {
            self.advance_byte();
            match self.peek() {
                Some(b'0'..=b'9') => {}
                Some(_) => return Err(self.unexpected_ahead(0)),
                None => return Err(invalid),
            }
        }

        let leading_zero = self.peek() == Some(b'0');
        let int_digits = self.eat_digits();
        if leading_zero && int_digits > 1 {
            return Err(invalid);
        }

        if self.peek() == Some(b'.') {
            self.advance_byte();
            if self.eat_digits() == 0 {
                return Err(invalid);
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.advance_byte();
            if let Some(b'+' | b'-') = self.peek() {
                self.advance_byte();
            }
            if self.eat_digits() == 0 {
                return Err(invalid);
            }
        }

        Ok(Cow::Borrowed(&self.input[start..self.cursor]))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    /// Yields tokens with line framing applied, stopping at end of input
    /// or after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_line_framing();
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::EndOfInput => None,
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_kinds(input: &str) -> Result<Vec<TokenKind>, LexError> {
        Tokenizer::new(input)
            .map(|res| res.map(|token| token.kind))
            .collect()
    }

    fn collect_texts(input: &str) -> Result<Vec<String>, LexError> {
        Tokenizer::new(input)
            .map(|res| res.map(|token| token.text().to_string()))
            .collect()
    }

    fn first_error(input: &str) -> LexError {
        Tokenizer::new(input)
            .find_map(Result::err)
            .expect("input should fail to tokenize")
    }

    #[test]
    fn test_tokenizer_structurals() {
        assert_eq!(
            collect_kinds("{}[]:,").unwrap(),
            vec![
                TokenKind::ObjectOpen,
                TokenKind::ObjectClose,
                TokenKind::ArrayOpen,
                TokenKind::ArrayClose,
                TokenKind::Colon,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn test_tokenizer_literals() {
        assert_eq!(
            collect_kinds("true false\tnull").unwrap(),
            vec![TokenKind::True, TokenKind::False, TokenKind::Null]
        );
        assert_eq!(
            collect_kinds("[true,null]").unwrap(),
            vec![
                TokenKind::ArrayOpen,
                TokenKind::True,
                TokenKind::Comma,
                TokenKind::Null,
                TokenKind::ArrayClose,
            ]
        );
    }

    #[test]
    fn test_tokenizer_literal_errors() {
        let err = first_error("trux");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('x'));
        assert_eq!(err.offset, 3);
        assert_eq!(err.column, 4);

        let err = first_error("nullify");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('i'));
        assert_eq!(err.offset, 4);

        let err = first_error("[fals");
        assert_eq!(err.kind, LexErrorKind::UnterminatedLiteral);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_tokenizer_numbers() {
        assert_eq!(
            collect_texts("123 -7 0 -0.5 1e10 2.5E-3 6e+2").unwrap(),
            vec!["123", "-7", "0", "-0.5", "1e10", "2.5E-3", "6e+2"]
        );
    }

    #[test]
    fn test_tokenizer_number_errors() {
        let err = first_error("0123");
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert_eq!(err.offset, 0);

        assert_eq!(first_error("123.").kind, LexErrorKind::InvalidNumber);
        assert_eq!(first_error("1.e5").kind, LexErrorKind::InvalidNumber);
        assert_eq!(first_error("1e").kind, LexErrorKind::InvalidNumber);
        assert_eq!(first_error("-").kind, LexErrorKind::InvalidNumber);

        let err = first_error("-a");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('a'));
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_tokenizer_strings() {
        let input = r#" "hello" "a\nb" "\u1234" "\"" "\ud83d\ude00x" "#;
        assert_eq!(
            collect_texts(input).unwrap(),
            vec!["hello", "a\nb", "\u{1234}", "\"", "\u{1F600}x"]
        );
    }

    #[test]
    fn test_tokenizer_all_escapes() {
        let input = r#""\" \\ \/ \b \f \n \r \t""#;
        assert_eq!(
            collect_texts(input).unwrap(),
            vec!["\" \\ / \u{0008} \u{000C} \n \r \t"]
        );
    }

    #[test]
    fn test_unescaped_strings_are_borrowed() {
        let mut tokenizer = Tokenizer::new(r#""plain" "esc\taped""#);
        let plain = tokenizer.next_token().unwrap();
        assert!(matches!(plain.text, Some(Cow::Borrowed("plain"))));
        let escaped = tokenizer.next_token().unwrap();
        assert!(matches!(escaped.text, Some(Cow::Owned(_))));
        assert_eq!(escaped.text(), "esc\taped");
    }

    #[test]
    fn test_tokenizer_string_errors() {
        let err = first_error(r#"  "hello "#);
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.offset, 2);

        assert_eq!(first_error(r#""ab\"#).kind, LexErrorKind::UnterminatedString);
        assert_eq!(first_error(r#""\u12"#).kind, LexErrorKind::UnterminatedString);

        let err = first_error("\"a\nb\"");
        assert_eq!(err.kind, LexErrorKind::ControlCharacter);
        assert_eq!(err.offset, 2);

        assert_eq!(first_error(r#" "\z" "#).kind, LexErrorKind::InvalidEscape);
        assert_eq!(first_error(r#""\u12g4""#).kind, LexErrorKind::InvalidEscape);
        assert_eq!(first_error(r#""\ud83d""#).kind, LexErrorKind::InvalidEscape);
        assert_eq!(first_error(r#""\ude00""#).kind, LexErrorKind::InvalidEscape);
    }

    #[test]
    fn test_next_token_does_not_skip_newlines() {
        let mut tokenizer = Tokenizer::new("\n1");
        let err = tokenizer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('\n'));

        let mut tokenizer = Tokenizer::new(" \t\n1");
        tokenizer.skip_line_framing();
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!((token.line, token.column), (2, 1));
    }

    #[test]
    fn test_line_framing_accepts_lone_carriage_return() {
        let mut tokenizer = Tokenizer::new("\r\r\n\r2");
        tokenizer.skip_line_framing();
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.text(), "2");
        assert_eq!(token.offset, 4);
        // Only LF advances the line.
        assert_eq!(token.line, 2);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens: Vec<Token> = Tokenizer::new("{\r\n  \"key\" :\n 1 }")
            .collect::<Result<_, _>>()
            .unwrap();
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 9), (3, 2), (3, 4)]);
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut tokenizer = Tokenizer::new("1 ");
        assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Number);
        for _ in 0..3 {
            let token = tokenizer.next_token().unwrap();
            assert_eq!(token.kind, TokenKind::EndOfInput);
            assert_eq!(token.offset, 2);
        }
    }

    #[test]
    fn test_nul_marks_end_of_input() {
        assert_eq!(
            collect_kinds("[1]\0garbage").unwrap(),
            vec![TokenKind::ArrayOpen, TokenKind::Number, TokenKind::ArrayClose]
        );
    }

    #[test]
    fn test_tokenizer_invalid_char() {
        let err = first_error("?");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('?'));

        let err = first_error("[1, 2, &]");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('&'));
        assert_eq!(err.offset, 7);

        let err = first_error("[é]");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('é'));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("? 1");
        assert!(tokenizer.next().unwrap().is_err());
        assert!(tokenizer.next().is_none());
    }
}
