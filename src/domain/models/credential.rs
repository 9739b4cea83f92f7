use std::fmt;

/// Secret key authorizing calls to the generative API.
///
/// `Debug` is redacted so the key can sit inside config structs that get
/// logged without leaking it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let key = ApiKey::new("super-secret");
        let printed = format!("{:?}", key);
        assert!(!printed.contains("super-secret"));
        assert_eq!(key.expose(), "super-secret");
    }
}
