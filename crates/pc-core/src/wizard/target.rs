use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Route the console navigates to when a wizard reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationTarget(String);

impl NavigationTarget {
    pub fn new(route: impl Into<String>) -> Self {
        Self(route.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NavigationTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NavigationTarget {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(s: String) -> Self {
        Self(s)
    }
}
