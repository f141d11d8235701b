use std::fmt;
use std::str::FromStr;

use faststr::FastStr;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{Error, Result};
use crate::parser::validate_number;
use crate::raw::RawJson;

/// Represents a JSON number with arbitrary precision, the underlying representation of a string.
///
/// The text of the number is kept exactly as it appeared in the input, so `1.50` is written back
/// as `1.50` and big integers never lose digits.
///
/// ```
/// use lazyjson::RawNumber;
///
/// // RawNumber can be parsed from a JSON number text.
/// let num: RawNumber = serde_json::from_str("123").unwrap();
/// assert_eq!(num.as_i64(), Some(123));
/// assert_eq!(num.as_str(), "123");
///
/// // RawNumber can be parsed from a JSON string text that contains a number.
/// let num: RawNumber =
///     serde_json::from_str("\"1.2333333333333333333333333333333333333333\"").unwrap();
/// assert_eq!(num.as_f64(), Some(1.2333333333333334));
/// assert_eq!(num.as_str(), "1.2333333333333333333333333333333333333333");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RawNumber {
    n: FastStr,
}

impl RawNumber {
    // the caller guarantees `n` is a valid number token
    pub(crate) fn from_faststr(n: FastStr) -> Self {
        Self { n }
    }

    /// as_str returns the underlying string representation of the number.
    pub fn as_str(&self) -> &str {
        self.n.as_str()
    }

    /// Returns true if the number is an integer between `i64::MIN` and `i64::MAX`.
    #[inline]
    pub fn is_i64(&self) -> bool {
        self.as_i64().is_some()
    }

    /// Returns true if the number is an integer between zero and `u64::MAX`.
    #[inline]
    pub fn is_u64(&self) -> bool {
        self.as_u64().is_some()
    }

    /// Returns true if the number can be represented by a finite f64.
    #[inline]
    pub fn is_f64(&self) -> bool {
        self.as_f64().is_some()
    }

    /// If the number is an integer, represent it as i64 if possible. Returns
    /// None otherwise.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        self.n.parse().ok()
    }

    /// If the number is an integer, represent it as u64 if possible. Returns
    /// None otherwise.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        self.n.parse().ok()
    }

    /// Represents the number as finite f64 if possible. Returns None otherwise.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        self.n.parse::<f64>().ok().filter(|float| float.is_finite())
    }
}

impl FromStr for RawNumber {
    type Err = Error;

    /// Parses exactly one JSON number token, surrounding whitespace is rejected.
    fn from_str(s: &str) -> Result<Self> {
        validate_number(s.as_bytes())?;
        Ok(Self::from_faststr(FastStr::new(s)))
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for RawNumber {
                fn from(i: $ty) -> Self {
                    let mut buf = itoa::Buffer::new();
                    Self::from_faststr(FastStr::new(buf.format(i)))
                }
            }
        )*
    };
}

impl_from_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl TryFrom<f64> for RawNumber {
    type Error = f64;

    /// Fails with the input when it is NaN or infinite, which JSON cannot represent.
    fn try_from(f: f64) -> std::result::Result<Self, f64> {
        if !f.is_finite() {
            return Err(f);
        }
        let mut buf = ryu::Buffer::new();
        Ok(Self::from_faststr(FastStr::new(buf.format_finite(f))))
    }
}

impl<'de> Deserialize<'de> for RawNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<RawNumber, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RawJson(text) = RawJson::deserialize(deserializer)?;
        if text.starts_with('"') {
            let s: String = serde_json::from_str(&text).map_err(de::Error::custom)?;
            return s.parse().map_err(de::Error::custom);
        }
        validate_number(text.as_bytes())
            .map_err(|_| de::Error::invalid_type(de::Unexpected::Other(&text), &"a JSON number"))?;
        Ok(Self::from_faststr(FastStr::from_string(text)))
    }
}

impl Serialize for RawNumber {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // written verbatim, so the text round-trips unchanged
        let raw: &RawValue = serde_json::from_str(self.as_str()).map_err(ser::Error::custom)?;
        raw.serialize(serializer)
    }
}
