//! When encoding, decoding or classifying JSON goes wrong.

use core::fmt::{self, Debug, Display};
use core::result;
use std::error;

use crate::reader::Position;

/// A boxed error produced by an [`Engine`](crate::Engine).
pub type BoxError = Box<dyn error::Error + Send + Sync + 'static>;

/// This type represents all possible errors that can occur when a lazy cell
/// encodes or decodes its content, or when a JSON text is classified.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `lazyjson::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// One-based line number at which a syntax error was detected.
    ///
    /// Returns 0 for errors that did not come from classifying JSON text.
    pub fn line(&self) -> usize {
        self.err.line
    }

    /// One-based column number at which a syntax error was detected.
    ///
    /// Returns 0 for errors that did not come from classifying JSON text.
    pub fn column(&self) -> usize {
        self.err.column
    }

    /// Byte offset into the classified input at which a syntax error was detected.
    pub fn offset(&self) -> usize {
        self.err.offset
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Encode` - the engine could not encode the value
    /// - `Category::Decode` - the engine could not decode the JSON text into the target type
    /// - `Category::Syntax` - input that is not syntactically valid JSON
    /// - `Category::Eof` - unexpected end of the input data
    pub fn classify(&self) -> Category {
        self.err.code.classify()
    }

    /// Returns true if this error was raised by the engine while encoding.
    pub fn is_encode(&self) -> bool {
        self.classify() == Category::Encode
    }

    /// Returns true if this error was raised by the engine while decoding.
    pub fn is_decode(&self) -> bool {
        self.classify() == Category::Decode
    }

    /// Returns true if this error was caused by input that was not
    /// syntactically valid JSON.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by prematurely reaching the end of
    /// the input data.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }
}

/// Categorizes the cause of a `lazyjson::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The engine failed to encode a value, e.g. a map key that is not a string.
    Encode,

    /// The engine failed to decode JSON text into the target type, e.g. an
    /// object decoded into a number.
    Decode,

    /// The error was caused by input that was not syntactically valid JSON.
    Syntax,

    /// The error was caused by prematurely reaching the end of the input data.
    Eof,
}

#[allow(clippy::fallible_impl_from)]
impl From<Error> for std::io::Error {
    /// Convert a `lazyjson::Error` into an `std::io::Error`.
    ///
    /// Encode, decode and syntax errors are turned into `InvalidData` I/O errors.
    /// EOF errors are turned into `UnexpectedEof` I/O errors.
    fn from(j: Error) -> Self {
        match j.classify() {
            Category::Eof => std::io::Error::new(std::io::ErrorKind::UnexpectedEof, j),
            _ => std::io::Error::new(std::io::ErrorKind::InvalidData, j),
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    offset: usize,
    line: usize,
    column: usize,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ErrorCode {
    /// The engine rejected the value.
    #[error("{0}")]
    Encode(#[source] BoxError),

    /// The engine rejected the JSON text for the target type.
    #[error("{0}")]
    Decode(#[source] BoxError),

    /// A type failed the encode/decode pre-flight check.
    #[error("type `{ty}` is not JSON parseable: {source}")]
    Unparseable {
        ty: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("EOF while parsing a array")]
    EofWhileParsingArray,

    #[error("EOF while parsing an object")]
    EofWhileParsingObject,

    #[error("EOF while parsing a string")]
    EofWhileParsingString,

    #[error("EOF while parsing a number")]
    EofWhileParsingNumber,

    #[error("EOF while parsing a literal, true, false or null")]
    EofWhileParsingLiteral,

    #[error("EOF while parsing a value")]
    EofWhileParsingValue,

    #[error("expected `:`")]
    ExpectedColon,

    #[error("expected `,` or `]`")]
    ExpectedArrayCommaOrEnd,

    #[error("expected `,` or `}}`")]
    ExpectedObjectCommaOrEnd,

    #[error("expected a object key or `}}`")]
    ExpectObjectKeyOrEnd,

    #[error("expected literal")]
    InvalidLiteral,

    #[error("invalid JSON value")]
    InvalidJsonValue,

    #[error("invalid escape")]
    InvalidEscape,

    #[error("invalid number")]
    InvalidNumber,

    #[error("Number with leading zero is not allowed, such as \"0123\"")]
    NumberWithLeadingZero,

    #[error("invalid unicode code point")]
    InvalidUnicodeCodePoint,

    #[error("control character (\\u0000-\\u001F) found while parsing a string")]
    ControlCharacterWhileParsingString,

    #[error("invalid UTF-8")]
    InvalidUTF8,

    #[error("trailing characters")]
    TrailingCharacters,

    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

impl ErrorCode {
    pub(crate) fn classify(&self) -> Category {
        match self {
            ErrorCode::Encode(_) => Category::Encode,
            ErrorCode::Decode(_) | ErrorCode::Unparseable { .. } => Category::Decode,

            ErrorCode::EofWhileParsingArray
            | ErrorCode::EofWhileParsingObject
            | ErrorCode::EofWhileParsingString
            | ErrorCode::EofWhileParsingNumber
            | ErrorCode::EofWhileParsingLiteral
            | ErrorCode::EofWhileParsingValue => Category::Eof,

            ErrorCode::ExpectedColon
            | ErrorCode::ExpectedArrayCommaOrEnd
            | ErrorCode::ExpectedObjectCommaOrEnd
            | ErrorCode::ExpectObjectKeyOrEnd
            | ErrorCode::InvalidLiteral
            | ErrorCode::InvalidJsonValue
            | ErrorCode::InvalidEscape
            | ErrorCode::InvalidNumber
            | ErrorCode::NumberWithLeadingZero
            | ErrorCode::InvalidUnicodeCodePoint
            | ErrorCode::ControlCharacterWhileParsingString
            | ErrorCode::InvalidUTF8
            | ErrorCode::TrailingCharacters
            | ErrorCode::RecursionLimitExceeded => Category::Syntax,
        }
    }
}

impl Error {
    #[cold]
    pub(crate) fn syntax(code: ErrorCode, json: &[u8], index: usize) -> Self {
        let pos = Position::from_index(index, json);
        Error {
            err: Box::new(ErrorImpl {
                code,
                offset: index,
                line: pos.line,
                column: pos.column,
            }),
        }
    }

    #[cold]
    pub(crate) fn encode(err: BoxError) -> Self {
        Self::from_code(ErrorCode::Encode(err))
    }

    #[cold]
    pub(crate) fn decode(err: BoxError) -> Self {
        Self::from_code(ErrorCode::Decode(err))
    }

    #[cold]
    pub(crate) fn unparseable(ty: &'static str, source: BoxError) -> Self {
        Self::from_code(ErrorCode::Unparseable { ty, source })
    }

    fn from_code(code: ErrorCode) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                offset: 0,
                line: 0,
                column: 0,
            }),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.err.code {
            ErrorCode::Encode(err) | ErrorCode::Decode(err) => Some(err.as_ref()),
            ErrorCode::Unparseable { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 {
            Display::fmt(&self.code, f)
        } else {
            write!(
                f,
                "{} at line {} column {}",
                self.code, self.line, self.column
            )
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error({:?}, line: {}, column: {})",
            self.err.code.to_string(),
            self.err.line,
            self.err.column
        )
    }
}
