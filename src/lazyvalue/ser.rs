use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{LazyValue, Object};

impl Serialize for LazyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LazyValue::Null => serializer.serialize_unit(),
            // scalar cells write their raw token
            LazyValue::Bool(c) => c.serialize(serializer),
            LazyValue::Number(c) => c.serialize(serializer),
            LazyValue::String(c) => c.serialize(serializer),
            LazyValue::Array(elems) => elems.serialize(serializer),
            LazyValue::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
