use bytes::Bytes;
use faststr::FastStr;

use crate::config::DeserializeCfg;
use crate::error::{Error, ErrorCode, Result};
use crate::lazy::Lazy;
use crate::lazyvalue::{LazyValue, Object};
use crate::reader::Read;
use crate::util::utf8::from_utf8;

macro_rules! perr {
    ($self:ident, $code:ident) => {
        Err($self.error(ErrorCode::$code))
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseStatus {
    None,
    HasEscaped,
}

#[inline(always)]
pub(crate) fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\r' | b'\n' | b'\t')
}

/// Classify a whole JSON text into a [`LazyValue`] tree.
///
/// The text is fully validated. Scalars keep their raw token (sliced from `src` without copying)
/// and are only decoded when accessed.
pub(crate) fn classify(src: &Bytes, cfg: DeserializeCfg) -> Result<LazyValue> {
    from_utf8(src)?;
    let mut parser = Parser::new(src).with_config(cfg);
    let value = parser.load_lazyvalue()?;
    parser.parse_trailing()?;
    Ok(value)
}

/// Check that `raw` is exactly one JSON number token, without surrounding whitespace.
pub(crate) fn validate_number(raw: &[u8]) -> Result<()> {
    let src = Bytes::copy_from_slice(raw);
    let mut parser = Parser::new(&src);
    match parser.read.next() {
        Some(c @ (b'-' | b'0'..=b'9')) => parser.skip_number(c)?,
        Some(_) => return perr!(parser, InvalidNumber),
        None => return perr!(parser, EofWhileParsingNumber),
    }
    if parser.read.remain() > 0 {
        parser.read.eat(1);
        return perr!(parser, InvalidNumber);
    }
    Ok(())
}

pub(crate) struct Parser<'de> {
    read: Read<'de>,
    src: &'de Bytes,
    cfg: DeserializeCfg,
    depth: usize,
}

impl<'de> Parser<'de> {
    pub(crate) fn new(src: &'de Bytes) -> Self {
        Self {
            read: Read::new(src.as_ref()),
            src,
            cfg: DeserializeCfg::default(),
            depth: 0,
        }
    }

    pub(crate) fn with_config(mut self, cfg: DeserializeCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[cold]
    fn error(&self, code: ErrorCode) -> Error {
        // point at the last consumed byte, which is the offending one
        let index = self.read.index().saturating_sub(1);
        Error::syntax(code, self.read.as_u8_slice(), index)
    }

    #[inline(always)]
    fn skip_space(&mut self) -> Option<u8> {
        while let Some(ch) = self.read.next() {
            if !is_whitespace(ch) {
                return Some(ch);
            }
        }
        None
    }

    #[inline(always)]
    fn skip_space_peek(&mut self) -> Option<u8> {
        let ret = self.skip_space()?;
        self.read.backward(1);
        Some(ret)
    }

    // raw bytes of the current token, sharing the input buffer
    #[inline(always)]
    fn token(&self, start: usize) -> Bytes {
        self.src.slice(start..self.read.index())
    }

    fn parse_literal(&mut self, literal: &str) -> Result<()> {
        match self.read.next_n(literal.len()) {
            Some(chunk) if chunk == literal.as_bytes() => Ok(()),
            Some(_) => perr!(self, InvalidLiteral),
            None => perr!(self, EofWhileParsingLiteral),
        }
    }

    fn parse_hex4(&mut self) -> Result<u16> {
        let mut n = 0u16;
        for _ in 0..4 {
            let digit = match self.read.next() {
                Some(c @ b'0'..=b'9') => c - b'0',
                Some(c @ b'a'..=b'f') => c - b'a' + 10,
                Some(c @ b'A'..=b'F') => c - b'A' + 10,
                Some(_) => return perr!(self, InvalidEscape),
                None => return perr!(self, EofWhileParsingString),
            };
            n = (n << 4) | digit as u16;
        }
        Ok(n)
    }

    fn skip_escaped_chars(&mut self) -> Result<()> {
        match self.read.next() {
            Some(b'u') => match self.parse_hex4()? {
                // a leading surrogate must be followed by an escaped trailing one
                0xD800..=0xDBFF => {
                    if self.read.next_n(2) != Some(&b"\\u"[..]) {
                        return perr!(self, InvalidUnicodeCodePoint);
                    }
                    if !(0xDC00..=0xDFFF).contains(&self.parse_hex4()?) {
                        return perr!(self, InvalidUnicodeCodePoint);
                    }
                }
                0xDC00..=0xDFFF => return perr!(self, InvalidUnicodeCodePoint),
                _ => {}
            },
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {}
            Some(_) => return perr!(self, InvalidEscape),
            None => return perr!(self, EofWhileParsingString),
        }
        Ok(())
    }

    // skip_string skips a JSON string with validation, the opening quote is consumed.
    fn skip_string(&mut self) -> Result<ParseStatus> {
        let mut status = ParseStatus::None;
        while let Some(ch) = self.read.next() {
            match ch {
                b'\\' => {
                    self.skip_escaped_chars()?;
                    status = ParseStatus::HasEscaped;
                }
                b'"' => return Ok(status),
                0..=0x1f => return perr!(self, ControlCharacterWhileParsingString),
                _ => {}
            }
        }
        perr!(self, EofWhileParsingString)
    }

    #[inline(always)]
    fn skip_single_digit(&mut self) -> Result<u8> {
        match self.read.next() {
            Some(ch) if ch.is_ascii_digit() => Ok(ch),
            Some(_) => perr!(self, InvalidNumber),
            None => perr!(self, EofWhileParsingNumber),
        }
    }

    #[inline(always)]
    fn skip_digits(&mut self) {
        while matches!(self.read.peek(), Some(b'0'..=b'9')) {
            self.read.eat(1);
        }
    }

    fn skip_exponent(&mut self) -> Result<()> {
        if let Some(b'-' | b'+') = self.read.peek() {
            self.read.eat(1);
        }
        self.skip_single_digit()?;
        self.skip_digits();
        Ok(())
    }

    // skip_number skips a RFC 8259 number, `first` is the consumed leading byte.
    pub(crate) fn skip_number(&mut self, mut first: u8) -> Result<()> {
        // check eof after the sign
        if first == b'-' {
            first = self.skip_single_digit()?;
        }

        // check the leading zeros
        if first == b'0' {
            if matches!(self.read.peek(), Some(b'0'..=b'9')) {
                self.read.eat(1);
                return perr!(self, NumberWithLeadingZero);
            }
        } else {
            self.skip_digits();
        }

        if self.read.peek() == Some(b'.') {
            self.read.eat(1);
            self.skip_single_digit()?;
            self.skip_digits();
        }

        if let Some(b'e' | b'E') = self.read.peek() {
            self.read.eat(1);
            self.skip_exponent()?;
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.cfg.max_depth {
            return perr!(self, RecursionLimitExceeded);
        }
        Ok(())
    }

    pub(crate) fn load_lazyvalue(&mut self) -> Result<LazyValue> {
        let ch = self.skip_space();
        let start = self.read.index().saturating_sub(1);
        match ch {
            Some(b'n') => {
                self.parse_literal("ull")?;
                Ok(LazyValue::Null)
            }
            Some(b't') => {
                self.parse_literal("rue")?;
                Ok(LazyValue::Bool(Lazy::from_bytes(self.token(start))))
            }
            Some(b'f') => {
                self.parse_literal("alse")?;
                Ok(LazyValue::Bool(Lazy::from_bytes(self.token(start))))
            }
            Some(c @ (b'-' | b'0'..=b'9')) => {
                self.skip_number(c)?;
                Ok(LazyValue::Number(Lazy::from_bytes(self.token(start))))
            }
            Some(b'"') => {
                self.skip_string()?;
                Ok(LazyValue::String(Lazy::from_bytes(self.token(start))))
            }
            Some(b'[') => self.load_array(),
            Some(b'{') => self.load_object(),
            Some(_) => perr!(self, InvalidJsonValue),
            None => perr!(self, EofWhileParsingValue),
        }
    }

    fn load_array(&mut self) -> Result<LazyValue> {
        self.enter()?;
        let mut elems = Vec::new();
        match self.skip_space_peek() {
            Some(b']') => self.read.eat(1),
            None => return perr!(self, EofWhileParsingArray),
            _ => loop {
                elems.push(self.load_lazyvalue()?);
                match self.skip_space() {
                    Some(b']') => break,
                    Some(b',') => continue,
                    None => return perr!(self, EofWhileParsingArray),
                    Some(_) => return perr!(self, ExpectedArrayCommaOrEnd),
                }
            },
        }
        self.depth -= 1;
        trace!(len = elems.len(), depth = self.depth, "classified array");
        Ok(LazyValue::Array(elems))
    }

    fn load_object(&mut self) -> Result<LazyValue> {
        self.enter()?;
        let mut entries = Vec::new();
        match self.skip_space() {
            Some(b'}') => {}
            Some(b'"') => loop {
                let key = self.parse_key()?;
                self.parse_object_clo()?;
                entries.push((key, self.load_lazyvalue()?));

                match self.skip_space() {
                    Some(b'}') => break,
                    Some(b',') => match self.skip_space() {
                        Some(b'"') => continue,
                        None => return perr!(self, EofWhileParsingObject),
                        Some(_) => return perr!(self, ExpectObjectKeyOrEnd),
                    },
                    None => return perr!(self, EofWhileParsingObject),
                    Some(_) => return perr!(self, ExpectedObjectCommaOrEnd),
                }
            },
            None => return perr!(self, EofWhileParsingObject),
            Some(_) => return perr!(self, ExpectObjectKeyOrEnd),
        }
        self.depth -= 1;
        trace!(len = entries.len(), depth = self.depth, "classified object");
        Ok(LazyValue::Object(Object::from_entries(entries)))
    }

    // parse an object key, the opening quote is consumed.
    fn parse_key(&mut self) -> Result<FastStr> {
        let start = self.read.index();
        let status = self.skip_string()?;
        let end = self.read.index() - 1;
        match status {
            // # Safety
            // the whole input is validated as UTF-8 before scanning
            ParseStatus::None => Ok(unsafe { FastStr::from_bytes_unchecked(self.src.slice(start..end)) }),
            ParseStatus::HasEscaped => {
                // escapes are already validated, the host decoder only unescapes
                let quoted = self.read.slice(start - 1, end + 1);
                serde_json::from_slice::<String>(quoted)
                    .map(FastStr::from_string)
                    .map_err(|_| self.error(ErrorCode::InvalidEscape))
            }
        }
    }

    // parse the Colon :
    fn parse_object_clo(&mut self) -> Result<()> {
        match self.skip_space() {
            Some(b':') => Ok(()),
            Some(_) => perr!(self, ExpectedColon),
            None => perr!(self, EofWhileParsingObject),
        }
    }

    pub(crate) fn parse_trailing(&mut self) -> Result<()> {
        match self.skip_space() {
            Some(_) => perr!(self, TrailingCharacters),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Category;

    fn parse(json: &str) -> Result<LazyValue> {
        classify(&Bytes::copy_from_slice(json.as_bytes()), DeserializeCfg::default())
    }

    #[test]
    fn test_classify_errors() {
        let cases = [
            ("", Category::Eof),
            ("  \n\t", Category::Eof),
            ("\"abc", Category::Eof),
            ("[1, 2", Category::Eof),
            ("{\"a\":1", Category::Eof),
            ("tru", Category::Eof),
            ("1 2", Category::Syntax),
            ("1.2.3", Category::Syntax),
            ("01", Category::Syntax),
            ("-", Category::Eof),
            ("1.", Category::Eof),
            ("1e", Category::Eof),
            ("[1,]", Category::Syntax),
            ("[1 2]", Category::Syntax),
            ("{\"a\" 1}", Category::Syntax),
            ("{1:1}", Category::Syntax),
            ("{\"a\":1,}", Category::Syntax),
            ("nul!", Category::Syntax),
            ("\"\\x\"", Category::Syntax),
            ("\"\\ud800\"", Category::Syntax),
            ("\"\\udc00\"", Category::Syntax),
            ("\"a\u{1}\"", Category::Syntax),
            ("[1]]", Category::Syntax),
            ("'a'", Category::Syntax),
        ];
        for (json, category) in cases {
            match parse(json) {
                Ok(v) => panic!("{json:?} should fail, got {v:?}"),
                Err(err) => assert_eq!(err.classify(), category, "{json:?}: {err}"),
            }
        }
    }

    #[test]
    fn test_error_position() {
        let err = parse("[1,\n  2 x]").unwrap_err();
        assert_eq!(err.to_string(), "expected `,` or `]` at line 2 column 5");
        assert_eq!(err.offset(), 8);

        let err = parse("{\"a\": 1} x").unwrap_err();
        assert_eq!(err.to_string(), "trailing characters at line 1 column 10");
    }

    #[test]
    fn test_recursion_limit() {
        let cfg = DeserializeCfg { max_depth: 3 };
        let src = Bytes::from_static(b"[[[1]]]");
        assert!(classify(&src, cfg).is_ok());

        let src = Bytes::from_static(b"[[[[1]]]]");
        let err = classify(&src, cfg).unwrap_err();
        assert_eq!(err.to_string(), "recursion limit exceeded at line 1 column 4");

        let deep = "[".repeat(129) + &"]".repeat(129);
        assert!(parse(&deep).is_err());
        let deep = "[".repeat(128) + &"]".repeat(128);
        assert!(parse(&deep).is_ok());
    }

    #[test]
    fn test_scalar_tokens_share_input() {
        let src = Bytes::from_static(b" [ 1.50 , \"x\\ty\" , true ] ");
        let value = classify(&src, DeserializeCfg::default()).unwrap();
        let LazyValue::Array(elems) = value else {
            panic!("expected an array");
        };
        let raws: Vec<&[u8]> = elems
            .iter()
            .map(|v| match v {
                LazyValue::Number(c) => c.raw().unwrap().as_ref(),
                LazyValue::String(c) => c.raw().unwrap().as_ref(),
                LazyValue::Bool(c) => c.raw().unwrap().as_ref(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(raws, [&b"1.50"[..], &b"\"x\\ty\""[..], &b"true"[..]]);
    }

    #[test]
    fn test_escaped_keys() {
        let value = parse(r#"{"a\"b": 1, "\u00e9": 2, "\ud83d\ude00": 3}"#).unwrap();
        let LazyValue::Object(obj) = value else {
            panic!("expected an object");
        };
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, ["a\"b", "é", "😀"]);
    }

    #[test]
    fn test_validate_number() {
        for ok in ["0", "-0", "12", "-1.5", "1e10", "1E+2", "2.5e-3", "123456789012345678901234567890"] {
            assert!(validate_number(ok.as_bytes()).is_ok(), "{ok}");
        }
        for bad in ["", " 1", "1 ", "+1", "01", "1.", ".5", "1.2.3", "abc", "1e", "--1", "0x10"] {
            assert!(validate_number(bad.as_bytes()).is_err(), "{bad}");
        }
    }
}
