use std::any::type_name;

use serde::{de::DeserializeOwned, Serialize};

use crate::engine::{Engine, SerdeJson};
use crate::error::{Error, Result};

/// Checks ahead of time that `T` survives a JSON round trip with the default engine.
///
/// `T::default()` is encoded, and the produced text is decoded back into a `T`. Types that can
/// never be JSON do not satisfy the bounds and are rejected at compile time. This catches the
/// ones that only fail at runtime, such as maps with non-string keys.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Weights(BTreeMap<(u8, u8), f32>);
///
/// impl Default for Weights {
///     fn default() -> Self {
///         Weights(BTreeMap::from([((0, 0), 1.0)]))
///     }
/// }
///
/// assert!(lazyjson::validate::<Vec<String>>().is_ok());
///
/// let err = lazyjson::validate::<Weights>().unwrap_err();
/// assert!(err.to_string().contains("is not JSON parseable"));
/// ```
pub fn validate<T>() -> Result<()>
where
    T: Serialize + DeserializeOwned + Default,
{
    let engine = SerdeJson::new();
    let data = engine
        .encode(&T::default())
        .map_err(|e| Error::unparseable(type_name::<T>(), e))?;
    engine
        .decode::<T>(&data)
        .map_err(|e| Error::unparseable(type_name::<T>(), e))?;
    trace!(ty = type_name::<T>(), "validated type");
    Ok(())
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::lazy::test::Person;

    #[derive(Default, Serialize, Deserialize)]
    struct EmptyKeys {
        map: BTreeMap<Vec<u8>, u8>,
    }

    #[derive(Serialize, Deserialize)]
    struct BadKeys {
        map: BTreeMap<Vec<u8>, u8>,
    }

    impl Default for BadKeys {
        fn default() -> Self {
            BadKeys {
                map: BTreeMap::from([(vec![1], 1)]),
            }
        }
    }

    #[derive(Default, Clone, Serialize, Deserialize)]
    #[serde(try_from = "u8", into = "u8")]
    struct Positive(u8);

    impl TryFrom<u8> for Positive {
        type Error = String;

        fn try_from(n: u8) -> std::result::Result<Self, String> {
            if n == 0 {
                return Err("must be positive".into());
            }
            Ok(Positive(n))
        }
    }

    impl From<Positive> for u8 {
        fn from(p: Positive) -> u8 {
            p.0
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate::<Person>().is_ok());
        assert!(validate::<Option<Box<i64>>>().is_ok());
        // an empty map has no keys to reject
        assert!(validate::<EmptyKeys>().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let err = validate::<Positive>().unwrap_err();
        assert!(err.is_decode());
        let msg = err.to_string();
        assert!(msg.contains("Positive"), "{msg}");
        assert!(msg.contains("must be positive"), "{msg}");

        let err = validate::<BadKeys>().unwrap_err();
        assert!(err.to_string().contains("BadKeys"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
