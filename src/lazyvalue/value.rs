use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes};
use faststr::FastStr;

use super::Object;
use crate::config::DeserializeCfg;
use crate::error::{Error, Result};
use crate::index::Index;
use crate::lazy::Lazy;
use crate::parser::classify;
use crate::util::utf8::from_utf8;
use crate::{JsonContainerTrait, JsonType, JsonValueTrait, RawNumber};

/// LazyValue is a JSON value of unknown shape. Its shape is found when the text is classified,
/// while the content of every scalar stays raw JSON until it is accessed.
///
/// Booleans, numbers and strings are each held in a [`Lazy`] cell over their original token, so
/// `as_bool`, `as_number` and `as_str` decode once and reuse the result. Arrays and objects hold
/// their already classified children.
///
/// # Examples
///
/// ```
/// use lazyjson::{JsonContainerTrait, JsonType, JsonValueTrait, LazyValue};
///
/// let input = r#"{
///  "a": "hello world",
///  "b": true,
///  "c": [0, 1.50, 2],
///  "d": null
/// }"#;
/// let value: LazyValue = input.parse().unwrap();
///
/// assert_eq!(value.get_type(), JsonType::Object);
/// assert_eq!(value.get("a").as_str(), Some("hello world"));
/// assert!(value.get("b").is_true());
/// assert_eq!(value.get("c").get(1).as_number().unwrap().as_str(), "1.50");
/// assert!(value.get("d").is_null());
/// assert_eq!(value.as_object().unwrap().len(), 4);
///
/// // numbers keep their original digits
/// assert_eq!(
///     value.marshal().unwrap().as_ref(),
///     br#"{"a":"hello world","b":true,"c":[0,1.50,2],"d":null}"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub enum LazyValue {
    #[default]
    Null,
    Bool(Lazy<bool>),
    Number(Lazy<RawNumber>),
    String(Lazy<FastStr>),
    Array(Vec<LazyValue>),
    Object(Object),
}

impl LazyValue {
    /// Classify a JSON text. The text is copied once, every scalar then shares that copy.
    pub fn from_slice(json: &[u8]) -> Result<Self> {
        Self::from_bytes(Bytes::copy_from_slice(json))
    }

    /// Classify a JSON text without copying it.
    pub fn from_bytes<B: Into<Bytes>>(json: B) -> Result<Self> {
        Self::from_bytes_with_config(json, DeserializeCfg::default())
    }

    /// Classify a JSON text with a custom nesting limit.
    pub fn from_bytes_with_config<B: Into<Bytes>>(json: B, cfg: DeserializeCfg) -> Result<Self> {
        classify(&json.into(), cfg)
    }

    /// Encode the value as compact JSON.
    ///
    /// Scalars are written from their cells, so text that was never decoded is copied through
    /// unchanged. A scalar cell without content is written as `null`. Any encode failure of a
    /// child fails the whole value.
    pub fn marshal(&self) -> Result<Bytes> {
        if let LazyValue::Null = self {
            return Ok(Bytes::from_static(b"null"));
        }
        let mut buf = Vec::with_capacity(128);
        self.write_to(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            LazyValue::Null => buf.put_slice(b"null"),
            LazyValue::Bool(c) => write_scalar(buf, c.marshal()?),
            LazyValue::Number(c) => write_scalar(buf, c.marshal()?),
            LazyValue::String(c) => write_scalar(buf, c.marshal()?),
            LazyValue::Array(elems) => {
                buf.put_u8(b'[');
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        buf.put_u8(b',');
                    }
                    elem.write_to(buf)?;
                }
                buf.put_u8(b']');
            }
            LazyValue::Object(obj) => {
                buf.put_u8(b'{');
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        buf.put_u8(b',');
                    }
                    serde_json::to_writer(&mut *buf, key).map_err(|e| Error::encode(e.into()))?;
                    buf.put_u8(b':');
                    value.write_to(buf)?;
                }
                buf.put_u8(b'}');
            }
        }
        Ok(())
    }
}

#[inline]
fn write_scalar(buf: &mut Vec<u8>, data: Bytes) {
    if data.is_empty() {
        buf.put_slice(b"null");
    } else {
        buf.put_slice(&data);
    }
}

impl FromStr for LazyValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

/// Writes the value as compact JSON, or indented by two spaces with `{:#}`.
///
/// ```
/// use lazyjson::LazyValue;
///
/// let value: LazyValue = r#"{"a": [1.50, null]}"#.parse().unwrap();
/// assert_eq!(value.to_string(), r#"{"a":[1.50,null]}"#);
/// assert_eq!(format!("{value:#}"), "{\n  \"a\": [\n    1.50,\n    null\n  ]\n}");
/// ```
impl fmt::Display for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let pretty = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
            return f.write_str(&pretty);
        }
        let compact = self.marshal().map_err(|_| fmt::Error)?;
        f.write_str(from_utf8(&compact).map_err(|_| fmt::Error)?)
    }
}

impl JsonValueTrait for LazyValue {
    type ValueType<'v> = &'v LazyValue;

    fn get_type(&self) -> JsonType {
        match self {
            LazyValue::Null => JsonType::Null,
            LazyValue::Bool(_) => JsonType::Boolean,
            LazyValue::Number(_) => JsonType::Number,
            LazyValue::String(_) => JsonType::String,
            LazyValue::Array(_) => JsonType::Array,
            LazyValue::Object(_) => JsonType::Object,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            LazyValue::Bool(c) => c.value().ok().flatten().copied(),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<RawNumber> {
        match self {
            LazyValue::Number(c) => c.value().ok().flatten().cloned(),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            LazyValue::String(c) => c.value().ok().flatten().map(|s| s.as_str()),
            _ => None,
        }
    }

    fn get<I: Index>(&self, index: I) -> Option<Self::ValueType<'_>> {
        index.index_into(self)
    }
}

impl JsonContainerTrait for LazyValue {
    type ObjectType = Object;
    type ArrayType = [LazyValue];

    fn as_object(&self) -> Option<&Object> {
        match self {
            LazyValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[LazyValue]> {
        match self {
            LazyValue::Array(elems) => Some(elems),
            _ => None,
        }
    }
}

impl From<()> for LazyValue {
    fn from(_: ()) -> Self {
        LazyValue::Null
    }
}

impl From<bool> for LazyValue {
    fn from(b: bool) -> Self {
        LazyValue::Bool(Lazy::new(b))
    }
}

impl From<RawNumber> for LazyValue {
    fn from(n: RawNumber) -> Self {
        LazyValue::Number(Lazy::new(n))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for LazyValue {
                fn from(i: $ty) -> Self {
                    RawNumber::from(i).into()
                }
            }
        )*
    };
}

impl_from_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl From<FastStr> for LazyValue {
    fn from(s: FastStr) -> Self {
        LazyValue::String(Lazy::new(s))
    }
}

impl From<&str> for LazyValue {
    fn from(s: &str) -> Self {
        FastStr::new(s).into()
    }
}

impl From<String> for LazyValue {
    fn from(s: String) -> Self {
        FastStr::from_string(s).into()
    }
}

impl From<Vec<LazyValue>> for LazyValue {
    fn from(elems: Vec<LazyValue>) -> Self {
        LazyValue::Array(elems)
    }
}

impl From<Object> for LazyValue {
    fn from(obj: Object) -> Self {
        LazyValue::Object(obj)
    }
}

impl<T: Into<LazyValue>> From<Option<T>> for LazyValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(LazyValue::Null, Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Category;

    macro_rules! test_type_tag {
        ($($name:ident: $json:expr => $ty:ident,)*) => {
            paste::paste! {
                $(
                    #[test]
                    fn [<test_type_tag_ $name>]() {
                        let value: LazyValue = $json.parse().unwrap();
                        assert_eq!(value.get_type(), JsonType::$ty, "{}", $json);
                    }
                )*
            }
        };
    }

    test_type_tag! {
        null: "null" => Null,
        bool_true: "true" => Boolean,
        bool_false: " false " => Boolean,
        integer: "42" => Number,
        float: "3.25" => Number,
        negative: "-7" => Number,
        exponent: "6.02e23" => Number,
        empty_string: r#""""# => String,
        escaped_quotes: r#""say \"hi\"""# => String,
        empty_array: "[]" => Array,
        empty_object: "{}" => Object,
        nested: r#"[{"a": [1, {"b": null}]}, [[]], {}]"# => Array,
        nested_object: r#"{"a": {"b": [true, {"c": "d"}]}}"# => Object,
    }

    #[test]
    fn test_classify_rejects() {
        for json in ["\"abc", "1 x", "", "   ", "1.2.3", "[1, 2", "{\"a\" 1}", "nul"] {
            let err = LazyValue::from_slice(json.as_bytes()).unwrap_err();
            assert!(matches!(err.classify(), Category::Syntax | Category::Eof), "{json:?}");
        }
    }

    #[test]
    fn test_array_of_numbers() {
        let value = LazyValue::from_slice(b"[1,2,3,4,5]").unwrap();
        assert_eq!(value.get_type(), JsonType::Array);
        let elems = value.as_array().unwrap();
        assert_eq!(elems.len(), 5);
        assert!(elems.iter().all(|v| v.get_type() == JsonType::Number));
        assert_eq!(value.get(4).as_u64(), Some(5));
        assert!(value.get(5).is_none());
    }

    #[test]
    fn test_object_with_null() {
        let value = LazyValue::from_slice(br#"{"a":1,"b":null}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        let b = obj.get("b").unwrap();
        assert_eq!(b.get_type(), JsonType::Null);
        assert!(b.is_null());
        assert_eq!(value.get("a").as_i64(), Some(1));
    }

    #[test]
    fn test_absent_value_is_null() {
        let none: Option<&LazyValue> = None;
        assert_eq!(none.get_type(), JsonType::Null);
        assert!(none.is_null());
        assert!(none.as_str().is_none());
        assert!(none.as_array().is_none());
    }

    #[test]
    fn test_accessor_shape_mismatch() {
        let value: LazyValue = r#"["s", 1, true]"#.parse().unwrap();
        assert_eq!(value.get(0).as_str(), Some("s"));
        assert!(value.get(0).as_bool().is_none());
        assert!(value.get(1).as_str().is_none());
        assert!(value.get(2).as_number().is_none());
        assert!(value.as_object().is_none());
        assert!(value.get("key").is_none());
    }

    #[test]
    fn test_scalars_decoded_lazily() {
        let value: LazyValue = r#"{"s": "a\nb", "n": 1.50}"#.parse().unwrap();
        let Some(LazyValue::String(cell)) = value.get("s") else {
            panic!("expected a string");
        };
        assert!(cell.cached().is_none());
        assert_eq!(value.get("s").as_str(), Some("a\nb"));
        assert_eq!(cell.cached().map(|s| s.as_str()), Some("a\nb"));
        assert_eq!(value.get("n").as_f64(), Some(1.5));
    }

    #[test]
    fn test_marshal() {
        let cases: [(&str, &str); 7] = [
            ("null", "null"),
            (" [ ] ", "[]"),
            ("{ }", "{}"),
            ("[1.50, -0, 1e400]", "[1.50,-0,1e400]"),
            (r#"{"a\"b" : "é"}"#, r#"{"a\"b":"é"}"#),
            (r#"{"k": [null, {"x": false}]}"#, r#"{"k":[null,{"x":false}]}"#),
            (r#"{"a": 1, "a": 2}"#, r#"{"a":2}"#),
        ];
        for (input, expect) in cases {
            let value = LazyValue::from_slice(input.as_bytes()).unwrap();
            assert_eq!(value.marshal().unwrap().as_ref(), expect.as_bytes(), "{input}");
        }
    }

    #[test]
    fn test_display() {
        let value: LazyValue = r#"{ "s" : "x\ty", "n": [1e2, -0.0], "o": {}, "e": [] }"#
            .parse()
            .unwrap();
        assert_eq!(value.to_string(), r#"{"s":"x\ty","n":[1e2,-0.0],"o":{},"e":[]}"#);
        assert_eq!(
            format!("{value:#}"),
            r#"{
  "s": "x\ty",
  "n": [
    1e2,
    -0.0
  ],
  "o": {},
  "e": []
}"#
        );

        assert_eq!(LazyValue::Null.to_string(), "null");
        assert_eq!(format!("{:#}", LazyValue::from("q")), r#""q""#);
        assert_eq!(LazyValue::String(Lazy::empty()).to_string(), "null");
    }

    #[test]
    fn test_marshal_built_value() {
        let mut obj = Object::new();
        obj.insert("name", "x\"y".into());
        obj.insert("n", 3u8.into());
        obj.insert("none", LazyValue::String(Lazy::empty()));
        let list = vec![LazyValue::from(true), LazyValue::from(()), LazyValue::from(None::<bool>)];
        obj.insert("list", LazyValue::from(list));
        let value = LazyValue::from(obj);
        assert_eq!(
            value.marshal().unwrap().as_ref(),
            br#"{"name":"x\"y","n":3,"none":null,"list":[true,null,null]}"#
        );
    }

    #[test]
    fn test_number_precision() {
        let big = "123456789012345678901234567890.000000000000000000001";
        let value: LazyValue = big.parse().unwrap();
        assert_eq!(value.as_number().unwrap().as_str(), big);
        assert_eq!(value.marshal().unwrap().as_ref(), big.as_bytes());
        assert!(value.as_i64().is_none());
    }

    #[test]
    fn test_from_bytes_with_config() {
        let cfg = DeserializeCfg { max_depth: 1 };
        assert!(LazyValue::from_bytes_with_config("[1]", cfg).is_ok());
        assert!(LazyValue::from_bytes_with_config("[[1]]", cfg).is_err());
    }
}
