use std::fmt;

use serde::de::{
    self, value::SeqAccessDeserializer, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor,
};
use serde_json::{Map, Value};

/// Name under which serde_json hands out the raw text of a slot.
pub(crate) const TOKEN: &str = "$serde_json::private::RawValue";

/// The JSON text of one slot of the surrounding document.
///
/// Straight from a serde_json deserializer the text is kept byte for byte. Behind serde's
/// buffering (internally tagged or untagged enums, `#[serde(flatten)]`) the slot only exists as
/// decoded content, so it is rebuilt and re-encoded compactly.
pub(crate) struct RawJson(pub(crate) String);

impl RawJson {
    fn encode<E: de::Error>(value: &Value) -> Result<Self, E> {
        serde_json::to_string(value).map(RawJson).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for RawJson {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_newtype_struct(TOKEN, RawJsonVisitor)
    }
}

struct RawJsonVisitor;

impl<'de> Visitor<'de> for RawJsonVisitor {
    type Value = RawJson;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
    where
        V: MapAccess<'de>,
    {
        let Some(key) = visitor.next_key::<String>()? else {
            return Ok(RawJson(String::from("{}")));
        };
        if key == TOKEN {
            return visitor.next_value::<String>().map(RawJson);
        }

        let mut map = Map::new();
        map.insert(key, visitor.next_value()?);
        while let Some((k, v)) = visitor.next_entry::<String, Value>()? {
            map.insert(k, v);
        }
        RawJson::encode(&Value::Object(map))
    }

    fn visit_seq<V>(self, seq: V) -> Result<Self::Value, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let value = Value::deserialize(SeqAccessDeserializer::new(seq))?;
        RawJson::encode(&value)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RawJson::encode(&value)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.visit_newtype_struct(deserializer)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawJson(String::from("null")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawJson(String::from("null")))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        RawJson::encode(&Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        RawJson::encode(&Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        RawJson::encode(&Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // NaN and infinities have no JSON form
        match serde_json::Number::from_f64(v) {
            Some(n) => RawJson::encode(&Value::Number(n)),
            None => Err(E::invalid_value(de::Unexpected::Float(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        RawJson::encode(&Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        RawJson::encode(&Value::String(v))
    }
}
