use serde::ser::{self, Serialize, Serializer};
use serde_json::value::RawValue;

use super::Lazy;
use crate::engine::Engine;

impl<T: Serialize, E: Engine> Serialize for Lazy<T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.marshal().map_err(ser::Error::custom)?;
        // keep the containing document valid when the cell holds nothing
        if data.is_empty() {
            return serializer.serialize_unit();
        }
        let json = std::str::from_utf8(&data).map_err(ser::Error::custom)?;
        // will directly write the text in the host serializer
        let raw: &RawValue = serde_json::from_str(json).map_err(ser::Error::custom)?;
        raw.serialize(serializer)
    }
}
