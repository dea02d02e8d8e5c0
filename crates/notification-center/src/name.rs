//! # Notification Names
//!
//! Names are pure lookup keys: compared byte-for-byte, case-sensitive,
//! never parsed.

use std::fmt;
use std::sync::Arc;

/// Immutable name of a notification.
///
/// Cloning is cheap; every binding keeps its own handle to the same text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationName(Arc<str>);

impl NotificationName {
    /// Create a name from any text.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The name as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact byte-wise comparison against raw text.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl From<&str> for NotificationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NotificationName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&NotificationName> for NotificationName {
    fn from(name: &NotificationName) -> Self {
        name.clone()
    }
}

impl AsRef<str> for NotificationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}
