//! The encode/decode strategy a lazy cell delegates to.

use serde::{de::DeserializeOwned, Serialize};

use crate::config::SerializeCfg;
use crate::error::BoxError;

/// A pair of JSON encode/decode functions supplied by the host serialization framework.
///
/// A [`Lazy`](crate::Lazy) never parses or writes JSON itself. It calls into its engine on a
/// cache miss and stores the result. Engines are passed to cells explicitly, so replacing the
/// engine of one cell never affects another.
///
/// # Examples
///
/// ```
/// use lazyjson::{BoxError, Engine, Lazy};
/// use serde::{de::DeserializeOwned, Serialize};
///
/// #[derive(Clone, Default)]
/// struct Upper;
///
/// impl Engine for Upper {
///     fn name(&self) -> &str {
///         "upper"
///     }
///
///     fn encode<T: ?Sized + Serialize>(&self, value: &T) -> Result<Vec<u8>, BoxError> {
///         Ok(serde_json::to_string(value)?.to_uppercase().into_bytes())
///     }
///
///     fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, BoxError> {
///         Ok(serde_json::from_slice(data)?)
///     }
/// }
///
/// let cell = Lazy::with_engine("hello".to_string(), Upper);
/// assert_eq!(cell.marshal().unwrap().as_ref(), b"\"HELLO\"");
/// assert_eq!(cell.engine().name(), "upper");
/// ```
pub trait Engine {
    /// A short human readable name of the engine.
    fn name(&self) -> &str;

    /// Encode `value` into JSON text.
    fn encode<T: ?Sized + Serialize>(&self, value: &T) -> Result<Vec<u8>, BoxError>;

    /// Decode JSON text into a fresh `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, BoxError>;
}

/// The default engine, backed by `serde_json`.
///
/// The compact form is byte-for-byte what `serde_json::to_vec` produces for the same value, so
/// wrapping a value in a cell never changes its encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerdeJson {
    cfg: SerializeCfg,
}

impl SerdeJson {
    /// An engine producing compact JSON.
    pub const fn new() -> Self {
        Self {
            cfg: SerializeCfg { pretty: false },
        }
    }

    /// An engine producing pretty-printed JSON. Decoding is unaffected.
    pub const fn pretty() -> Self {
        Self {
            cfg: SerializeCfg { pretty: true },
        }
    }

    /// Returns true if this engine pretty-prints.
    pub fn is_pretty(&self) -> bool {
        self.cfg.pretty
    }
}

impl Engine for SerdeJson {
    fn name(&self) -> &str {
        if self.cfg.pretty {
            "serde_json(pretty)"
        } else {
            "serde_json"
        }
    }

    fn encode<T: ?Sized + Serialize>(&self, value: &T) -> Result<Vec<u8>, BoxError> {
        let data = if self.cfg.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(data)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, BoxError> {
        Ok(serde_json::from_slice(data)?)
    }
}
