use std::fmt;

use crate::index::Index;
use crate::RawNumber;

/// The shape of a classified JSON value.
///
/// ```
/// use lazyjson::{JsonType, JsonValueTrait, LazyValue};
///
/// let value: LazyValue = r#"{"id": 7, "tags": []}"#.parse().unwrap();
/// assert_eq!(value.get("id").get_type(), JsonType::Number);
/// assert_eq!(value.get("tags").get_type().to_string(), "array");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum JsonType {
    Null = 0,
    Boolean = 1,
    Number = 2,
    String = 3,
    Object = 4,
    Array = 5,
}

impl JsonType {
    fn name(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Object => "object",
            JsonType::Array => "array",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Read access to a classified value.
///
/// Scalar accessors decode the underlying cell on first use. They return `None` when the shape
/// does not match and also when the cell fails to decode. A missing value, such as the result of
/// `get` on an absent key, behaves as `null`:
///
/// ```
/// use lazyjson::{JsonType, JsonValueTrait, LazyValue};
///
/// let value: LazyValue = r#"{"a": [1, true]}"#.parse().unwrap();
///
/// assert!(value.get("a").get(1).is_true());
/// assert_eq!(value.get("a").get(0).as_u64(), Some(1));
/// assert_eq!(value.get("b").get_type(), JsonType::Null);
/// assert!(value.get("b").get(0).is_none());
/// ```
pub trait JsonValueTrait {
    type ValueType<'v>
    where
        Self: 'v;

    fn get_type(&self) -> JsonType;

    #[inline]
    fn is_null(&self) -> bool {
        self.get_type() == JsonType::Null
    }

    #[inline]
    fn is_true(&self) -> bool {
        self.as_bool() == Some(true)
    }

    /// The number as `i64`, if it is an integer in range.
    #[inline]
    fn as_i64(&self) -> Option<i64> {
        self.as_number()?.as_i64()
    }

    /// The number as `u64`, if it is a non-negative integer in range.
    #[inline]
    fn as_u64(&self) -> Option<u64> {
        self.as_number()?.as_u64()
    }

    /// The number as a finite `f64`.
    #[inline]
    fn as_f64(&self) -> Option<f64> {
        self.as_number()?.as_f64()
    }

    /// The number token exactly as written.
    fn as_number(&self) -> Option<RawNumber>;

    fn as_str(&self) -> Option<&str>;

    fn as_bool(&self) -> Option<bool>;

    /// Looks up an array element by `usize` or an object member by string key.
    fn get<I: Index>(&self, index: I) -> Option<Self::ValueType<'_>>;
}

/// Borrowing access to the children of an array or object.
pub trait JsonContainerTrait {
    type ObjectType;
    type ArrayType: ?Sized;

    fn as_object(&self) -> Option<&Self::ObjectType>;

    fn as_array(&self) -> Option<&Self::ArrayType>;
}

// lets lookups chain through `get` without unwrapping
impl<V: JsonValueTrait> JsonValueTrait for Option<V> {
    type ValueType<'v> = V::ValueType<'v> where V: 'v, Self: 'v;

    fn get_type(&self) -> JsonType {
        self.as_ref().map_or(JsonType::Null, V::get_type)
    }

    fn as_number(&self) -> Option<RawNumber> {
        self.as_ref()?.as_number()
    }

    fn as_str(&self) -> Option<&str> {
        self.as_ref()?.as_str()
    }

    fn as_bool(&self) -> Option<bool> {
        self.as_ref()?.as_bool()
    }

    fn get<I: Index>(&self, index: I) -> Option<Self::ValueType<'_>> {
        self.as_ref()?.get(index)
    }
}

impl<V: JsonContainerTrait> JsonContainerTrait for Option<V> {
    type ObjectType = V::ObjectType;
    type ArrayType = V::ArrayType;

    fn as_object(&self) -> Option<&Self::ObjectType> {
        self.as_ref()?.as_object()
    }

    fn as_array(&self) -> Option<&Self::ArrayType> {
        self.as_ref()?.as_array()
    }
}

impl<V: JsonValueTrait> JsonValueTrait for &V {
    type ValueType<'v> = V::ValueType<'v> where V: 'v, Self: 'v;

    fn get_type(&self) -> JsonType {
        V::get_type(self)
    }

    fn as_number(&self) -> Option<RawNumber> {
        V::as_number(self)
    }

    fn as_str(&self) -> Option<&str> {
        V::as_str(self)
    }

    fn as_bool(&self) -> Option<bool> {
        V::as_bool(self)
    }

    fn get<I: Index>(&self, index: I) -> Option<Self::ValueType<'_>> {
        V::get(self, index)
    }
}

impl<V: JsonContainerTrait> JsonContainerTrait for &V {
    type ObjectType = V::ObjectType;
    type ArrayType = V::ArrayType;

    fn as_object(&self) -> Option<&Self::ObjectType> {
        V::as_object(self)
    }

    fn as_array(&self) -> Option<&Self::ArrayType> {
        V::as_array(self)
    }
}
