/// Maximum nesting of arrays and objects accepted when classifying JSON text.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for classifying JSON text into a [`LazyValue`](crate::LazyValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeserializeCfg {
    /// Nesting depth at which classification fails with "recursion limit exceeded".
    pub max_depth: usize,
}

impl Default for DeserializeCfg {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Options for the [`SerdeJson`](crate::SerdeJson) engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeCfg {
    pub pretty: bool,
}

impl From<SerializeCfg> for crate::SerdeJson {
    fn from(cfg: SerializeCfg) -> Self {
        if cfg.pretty {
            Self::pretty()
        } else {
            Self::new()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SerdeJson;

    #[test]
    fn test_cfg() {
        assert_eq!(DeserializeCfg::default().max_depth, 128);
        let engine: SerdeJson = SerializeCfg { pretty: true }.into();
        assert!(engine.is_pretty());
        assert_eq!(SerdeJson::from(SerializeCfg::default()), SerdeJson::new());
    }
}
