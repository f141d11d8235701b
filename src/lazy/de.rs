use bytes::Bytes;
use serde::{Deserialize, Deserializer};

use super::Lazy;
use crate::raw::RawJson;

impl<'de, T, E: Default> Deserialize<'de> for Lazy<T, E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // only capture the text of the slot, decoding `T` waits for the first access
        let RawJson(json) = RawJson::deserialize(deserializer)?;
        Ok(Lazy::from_bytes_with_engine(Bytes::from(json), E::default()))
    }
}
