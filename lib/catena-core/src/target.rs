//! Request targets.
//!
//! A [`Target`] is the addressable part of an outbound call: either a parsed
//! [`url::Url`], or a string that may be absolute (`http://`/`https://`) or a
//! path to be resolved against a client's base address.

use derive_more::Display;

/// An outbound request target.
///
/// Parsed URLs always pass through target resolution unchanged. String
/// targets pass through when they carry an `http://` or `https://` prefix;
/// otherwise they are treated as paths relative to the client's base address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Target {
    /// An already-parsed URL; never re-resolved.
    #[display("{_0}")]
    Url(url::Url),
    /// A string form: an absolute URL or a relative path.
    #[display("{_0}")]
    Path(String),
}

impl Target {
    /// The target as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(url) => url.as_str(),
            Self::Path(path) => path.as_str(),
        }
    }

    /// Returns `true` if the target is already fully qualified.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        match self {
            Self::Url(_) => true,
            Self::Path(path) => {
                path.starts_with("http://") || path.starts_with("https://")
            }
        }
    }
}

impl From<url::Url> for Target {
    fn from(url: url::Url) -> Self {
        Self::Url(url)
    }
}

impl From<String> for Target {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for Target {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_from_str() {
        let target = Target::from("/users/1");
        assert_eq!(target.as_str(), "/users/1");
        assert!(!target.is_absolute());
    }

    #[test]
    fn target_absolute_string() {
        let target = Target::from("https://api.example.com/users");
        assert!(target.is_absolute());

        let target = Target::from("http://localhost:8080/ping");
        assert!(target.is_absolute());
    }

    #[test]
    fn target_from_url() {
        let url = url::Url::parse("https://api.example.com/users").expect("valid URL");
        let target = Target::from(url);
        assert!(target.is_absolute());
        assert_eq!(target.as_str(), "https://api.example.com/users");
    }

    #[test]
    fn target_display() {
        let target = Target::from("/get");
        assert_eq!(target.to_string(), "/get");
    }
}
