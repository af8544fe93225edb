use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Local-store key holding the serialized visibility map.
pub const VISIBILITY_KEY: &str = "visibleTimers";

/// Which timer names the operator wants on the grid. Names with no entry
/// are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityPreference {
    entries: BTreeMap<String, bool>,
    #[serde(skip)]
    known: BTreeSet<String>,
}

impl VisibilityPreference {
    /// Every known name switched on.
    pub fn with_defaults<S: AsRef<str>>(known: &[S]) -> Self {
        let known: BTreeSet<String> = known.iter().map(|name| name.as_ref().to_string()).collect();
        let entries = known.iter().map(|name| (name.clone(), true)).collect();
        Self { entries, known }
    }

    /// Decode a stored value, falling back to the defaults when it is
    /// missing or unreadable. Known names missing from the stored map are
    /// added as visible.
    pub fn from_stored<S: AsRef<str>>(stored: Option<&str>, known: &[S]) -> Self {
        match stored {
            Some(raw) => match serde_json::from_str::<Self>(raw) {
                Ok(mut preference) => {
                    for name in known {
                        let name = name.as_ref();
                        preference.entries.entry(name.to_string()).or_insert(true);
                        preference.known.insert(name.to_string());
                    }
                    preference
                }
                Err(e) => {
                    log::warn!("Stored timer filter is unreadable, using defaults: {}", e);
                    Self::with_defaults(known)
                }
            },
            None => Self::with_defaults(known),
        }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.entries.get(name).copied().unwrap_or(true)
    }

    /// Flip the effective visibility of `name`. Two toggles in a row leave
    /// the map exactly as it was: an unknown name switched back on drops
    /// its entry again.
    pub fn toggle(&mut self, name: &str) {
        let visible = !self.is_visible(name);
        if visible && !self.known.contains(name) {
            self.entries.remove(name);
        } else {
            self.entries.insert(name.to_string(), visible);
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries.get(name).copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
