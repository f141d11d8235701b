use bytes::Bytes;
use serde::{de, Deserialize, Deserializer};

use super::{LazyValue, Object};
use crate::raw::RawJson;

impl<'de> Deserialize<'de> for LazyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RawJson(json) = RawJson::deserialize(deserializer)?;
        LazyValue::from_bytes(Bytes::from(json)).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match LazyValue::deserialize(deserializer)? {
            LazyValue::Object(obj) => Ok(obj),
            _ => Err(de::Error::invalid_type(
                de::Unexpected::Other("non-object JSON value"),
                &"a JSON object",
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use serde::{Deserialize, Serialize};

    use crate::{JsonValueTrait, Lazy, LazyValue, Object};

    #[derive(Serialize, Deserialize)]
    struct Message {
        kind: String,
        body: LazyValue,
        #[serde(default)]
        meta: Option<Object>,
        inner: Lazy<LazyValue>,
    }

    #[test]
    fn test_lazyvalue_field() {
        let input = r#"{"kind":"x","body":{"n":1.50,"tags":["a","b"]},"inner":[1,{"z":null}]}"#;
        let msg: Message = serde_json::from_str(input).unwrap();
        assert_eq!(msg.body.get("n").as_f64(), Some(1.5));
        assert_eq!(msg.body.get("tags").get(1).as_str(), Some("b"));
        assert!(msg.meta.is_none());
        assert!(msg.inner.cached().is_none());

        let inner = msg.inner.value().unwrap().unwrap();
        assert!(inner.get(1).get("z").is_null());

        let out = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            out,
            r#"{"kind":"x","body":{"n":1.50,"tags":["a","b"]},"meta":null,"inner":[1,{"z":null}]}"#
        );
    }

    #[derive(Deserialize)]
    #[serde(tag = "op", rename_all = "lowercase")]
    enum Command {
        Set { key: String, value: LazyValue },
        Patch { fields: Object },
    }

    #[derive(Deserialize)]
    struct Extensible {
        name: String,
        #[serde(flatten)]
        other: std::collections::BTreeMap<String, LazyValue>,
    }

    #[test]
    fn test_lazyvalue_behind_buffered_content() {
        let cmd: Command =
            serde_json::from_str(r#"{"op":"set","key":"k","value":[1, "two", null]}"#).unwrap();
        let Command::Set { key, value } = cmd else {
            panic!("expected set");
        };
        assert_eq!(key, "k");
        assert_eq!(value.get(1).as_str(), Some("two"));
        assert_eq!(value.marshal().unwrap().as_ref(), br#"[1,"two",null]"#);

        let cmd: Command = serde_json::from_str(r#"{"fields":{"a":1},"op":"patch"}"#).unwrap();
        let Command::Patch { fields } = cmd else {
            panic!("expected patch");
        };
        assert_eq!(fields.get("a").and_then(|v| v.as_u64()), Some(1));
        assert!(serde_json::from_str::<Command>(r#"{"op":"patch","fields":[]}"#).is_err());

        let ext: Extensible =
            serde_json::from_str(r#"{"x":{"deep":[true]},"name":"n","y":-2}"#).unwrap();
        assert_eq!(ext.name, "n");
        assert_eq!(ext.other["x"].get("deep").get(0).as_bool(), Some(true));
        assert_eq!(ext.other["y"].as_i64(), Some(-2));
    }

    #[test]
    fn test_object_field_rejects_other_shapes() {
        assert!(serde_json::from_str::<Object>(r#"{"a":[]}"#).is_ok());
        assert!(serde_json::from_str::<Object>("[]").is_err());
        assert!(serde_json::from_str::<LazyValue>("[1,").is_err());
    }
}
