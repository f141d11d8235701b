mod de;
mod ser;

use std::cell::OnceCell;
use std::fmt;

use bytes::{buf::Reader, Buf, Bytes};
use serde::{de::DeserializeOwned, Serialize};

use crate::engine::{Engine, SerdeJson};
use crate::error::{Error, Result};

/// Lazy holds the JSON text of a `T`, a decoded `T`, or both, and converts between the two only
/// when asked.
///
/// A cell built from bytes keeps them untouched until [`value`](Lazy::value) or
/// [`unmarshal`](Lazy::unmarshal) is called. A cell built from a value is not encoded until
/// [`marshal`](Lazy::marshal) is called. Every conversion result is cached next to its source, so
/// repeated calls never run the engine again. A failed conversion caches nothing.
///
/// As a serde field, `Lazy` captures the raw JSON text of its slot when the containing structure
/// is decoded, and writes it back verbatim when the structure is encoded. Content that is never
/// accessed is never parsed.
///
/// `Lazy` fills its caches through a shared reference, so it is `Send` but not `Sync`. Wrap it in
/// a lock to share it between threads.
///
/// # Examples
///
/// ```
/// use lazyjson::Lazy;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     id: u64,
///     user: Lazy<User>,
/// }
///
/// let input = r#"{"id":7,"user":{"name":"John","age":30}}"#;
/// let event: Event = serde_json::from_str(input).unwrap();
///
/// // the user is still raw JSON
/// assert_eq!(event.user.raw().unwrap().as_ref(), br#"{"name":"John","age":30}"#);
/// assert_eq!(serde_json::to_string(&event).unwrap(), input);
///
/// // decoded on first use, cached afterwards
/// let user = event.user.unmarshal().unwrap();
/// assert_eq!(user, User { name: "John".into(), age: 30 });
/// ```
#[derive(Clone)]
pub struct Lazy<T, E = SerdeJson> {
    // the last known JSON text of the cell
    data: OnceCell<Bytes>,
    // the decoded value of the cell
    value: OnceCell<T>,
    engine: E,
}

impl<T> Lazy<T> {
    /// Creates a cell holding `value`, encoded later by the default engine.
    pub fn new(value: T) -> Self {
        Self::with_engine(value, SerdeJson::new())
    }

    /// Creates a cell holding the JSON text `data`, decoded later by the default engine.
    ///
    /// The text is not validated here. Empty `data` creates an empty cell.
    pub fn from_bytes<B: Into<Bytes>>(data: B) -> Self {
        Self::from_bytes_with_engine(data, SerdeJson::new())
    }

    /// Creates a cell holding nothing.
    pub fn empty() -> Self {
        Self::empty_with_engine(SerdeJson::new())
    }
}

impl<T, E> Lazy<T, E> {
    /// Creates a cell holding `value`, encoded later by `engine`.
    pub fn with_engine(value: T, engine: E) -> Self {
        Self {
            data: OnceCell::new(),
            value: OnceCell::from(value),
            engine,
        }
    }

    /// Creates a cell holding the JSON text `data`, decoded later by `engine`.
    pub fn from_bytes_with_engine<B: Into<Bytes>>(data: B, engine: E) -> Self {
        let mut lazy = Self::empty_with_engine(engine);
        lazy.set_bytes(data);
        lazy
    }

    /// Creates an empty cell using `engine`.
    pub fn empty_with_engine(engine: E) -> Self {
        Self {
            data: OnceCell::new(),
            value: OnceCell::new(),
            engine,
        }
    }

    /// Replaces the content with `value`. The cached JSON text is dropped.
    pub fn set(&mut self, value: T) {
        self.value = OnceCell::from(value);
        self.data = OnceCell::new();
    }

    /// Replaces the content with the JSON text `data`. The cached value is dropped.
    ///
    /// Empty `data` leaves the cell empty.
    pub fn set_bytes<B: Into<Bytes>>(&mut self, data: B) {
        let data = data.into();
        self.value = OnceCell::new();
        self.data = if data.is_empty() {
            OnceCell::new()
        } else {
            OnceCell::from(data)
        };
    }

    /// Returns the JSON text of the cell if it is known, without encoding anything.
    pub fn raw(&self) -> Option<&Bytes> {
        self.data.get()
    }

    /// Returns the value of the cell if it is known, without decoding anything.
    pub fn cached(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns true if the cell holds neither JSON text nor a value.
    pub fn is_empty(&self) -> bool {
        self.data.get().is_none() && self.value.get().is_none()
    }

    /// The engine used for conversions.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Replaces the engine. Already cached representations are kept.
    pub fn set_engine(&mut self, engine: E) {
        self.engine = engine;
    }
}

impl<T: Serialize, E: Engine> Lazy<T, E> {
    /// Returns the JSON text of the cell, encoding the value on the first call.
    ///
    /// An empty cell returns empty bytes and no error. The returned `Bytes` shares the cached
    /// buffer, so calling this repeatedly is cheap.
    pub fn marshal(&self) -> Result<Bytes> {
        if let Some(data) = self.data.get() {
            return Ok(data.clone());
        }
        let Some(value) = self.value.get() else {
            return Ok(Bytes::new());
        };

        let data = Bytes::from(self.engine.encode(value).map_err(Error::encode)?);
        trace!(engine = self.engine.name(), len = data.len(), "encoded lazy value");
        Ok(self.data.get_or_init(|| data).clone())
    }

    /// Returns a `std::io::Read` over the JSON text of the cell, for decoders that consume a
    /// stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyjson::Lazy;
    ///
    /// let cell = Lazy::new(vec![1, 2, 3]);
    /// let v: Vec<u8> = serde_json::from_reader(cell.reader().unwrap()).unwrap();
    /// assert_eq!(v, [1, 2, 3]);
    /// ```
    pub fn reader(&self) -> Result<Reader<Bytes>> {
        Ok(self.marshal()?.reader())
    }
}

impl<T: DeserializeOwned, E: Engine> Lazy<T, E> {
    /// Returns a reference to the value of the cell, decoding the JSON text on the first call.
    ///
    /// An empty cell returns `None`.
    pub fn value(&self) -> Result<Option<&T>> {
        if let Some(value) = self.value.get() {
            return Ok(Some(value));
        }
        let Some(data) = self.data.get() else {
            return Ok(None);
        };

        let value: T = self.engine.decode(data).map_err(Error::decode)?;
        trace!(engine = self.engine.name(), len = data.len(), "decoded lazy value");
        Ok(Some(self.value.get_or_init(|| value)))
    }

    /// Returns a copy of the value of the cell, decoding the JSON text on the first call.
    ///
    /// An empty cell returns `T::default()`.
    pub fn unmarshal(&self) -> Result<T>
    where
        T: Clone + Default,
    {
        Ok(self.value()?.cloned().unwrap_or_default())
    }

    /// Consumes the cell and returns its value, decoding the JSON text if needed.
    ///
    /// An empty cell returns `T::default()`.
    pub fn into_value(self) -> Result<T>
    where
        T: Default,
    {
        self.value()?;
        Ok(self.value.into_inner().unwrap_or_default())
    }
}

impl<T, E: Default> Default for Lazy<T, E> {
    fn default() -> Self {
        Self::empty_with_engine(E::default())
    }
}

impl<T> From<T> for Lazy<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Lazy<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("data", &self.data.get().map(|d| String::from_utf8_lossy(d)))
            .field("value", &self.value.get())
            .finish()
    }
}
