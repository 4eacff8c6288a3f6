//! Domain error types.
//!
//! These errors represent values that cannot be turned into domain types.
//! They are distinct from storage and network errors.

/// Error returned when a string does not name a known choice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct InvalidChoice {
    kind: &'static str,
    value: String,
}

impl InvalidChoice {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// The kind of value that failed to parse (e.g. "transport mode").
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidChoice::new("transport mode", "hovercraft");
        assert_eq!(err.to_string(), "unknown transport mode: \"hovercraft\"");
        assert_eq!(err.kind(), "transport mode");
    }
}
