//! Deferred JSON conversion.
//!
//! [`Lazy<T>`] holds the JSON text of a `T`, a decoded `T`, or both. It converts between them
//! only when asked and caches every result, so text that nobody reads is never parsed and a
//! value that nobody writes is never encoded. Used as a serde field it captures the raw text of
//! its slot and writes it back unchanged.
//!
//! [`LazyValue`] is the same idea for JSON of unknown shape. The text is classified into null,
//! boolean, number, string, array or object, and every scalar stays raw until it is accessed.
//!
//! ```
//! use lazyjson::{JsonValueTrait, Lazy, LazyValue};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Envelope {
//!     kind: String,
//!     payload: Lazy<Vec<u32>>,
//!     extra: LazyValue,
//! }
//!
//! let input = r#"{"kind":"ids","payload":[1,2,3],"extra":{"trace":"abc","ratio":0.50}}"#;
//! let env: Envelope = serde_json::from_str(input).unwrap();
//!
//! assert_eq!(env.extra.get("ratio").as_number().unwrap().as_str(), "0.50");
//! assert_eq!(serde_json::to_string(&env).unwrap(), input);
//! assert_eq!(env.payload.unmarshal().unwrap(), [1, 2, 3]);
//! ```

#[macro_use]
mod macros;

mod config;
mod engine;
mod error;
mod index;
mod lazy;
mod lazyvalue;
mod parser;
mod raw;
mod rawnumber;
mod reader;
mod util;
mod validate;

pub use crate::config::{DeserializeCfg, SerializeCfg, DEFAULT_MAX_DEPTH};
pub use crate::engine::{Engine, SerdeJson};
pub use crate::error::{BoxError, Category, Error, Result};
pub use crate::index::Index;
pub use crate::lazy::Lazy;
pub use crate::lazyvalue::{
    Iter as ObjectIter, JsonContainerTrait, JsonType, JsonValueTrait, LazyValue, Object,
};
pub use crate::rawnumber::RawNumber;
pub use crate::validate::validate;
