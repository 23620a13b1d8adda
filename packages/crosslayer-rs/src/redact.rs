//! Secret redaction for sensitive data in logs, serialization, and display.
//!
//! Wrap private keys and explorer API keys in [`Redacted`] before they reach a
//! log line or a `Debug` impl. The wrapped value is only reachable through
//! [`Redacted::expose`].

use std::fmt::{self, Debug, Display};

/// Wrapper that redacts its inner value when formatted or serialized.
///
/// # Example
///
/// ```
/// use crosslayer_rs::redact::Redacted;
///
/// let api_key = Redacted("sk-12345".to_string());
/// assert_eq!(format!("{api_key}"), "<redacted>");
/// assert_eq!(api_key.expose(), "sk-12345");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Redacted<T>(pub T);

impl<T> Redacted<T> {
    /// Borrow the secret value. Call sites should pass it straight to the
    /// signer or HTTP request that needs it.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> serde::Serialize for Redacted<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        "<redacted>".serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_hide_value() {
        let key = Redacted("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");
        assert_eq!(format!("{:?}", key), "<redacted>");
        assert_eq!(format!("{}", key), "<redacted>");
    }

    #[test]
    fn test_serialize_hides_value() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            key: Redacted<String>,
        }

        let json = serde_json::to_string(&Wrapper {
            key: Redacted("secret".to_string()),
        })
        .unwrap();
        assert_eq!(json, r#"{"key":"<redacted>"}"#);
    }

    #[test]
    fn test_expose_returns_inner() {
        let key = Redacted(42u32);
        assert_eq!(*key.expose(), 42);
    }
}
