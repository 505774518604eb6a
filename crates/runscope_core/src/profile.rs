//! User profiles and display-name resolution.

use crate::Run;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Name shown when a run or message references a user without a profile.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Builds `"{name} {surname}"` with surrounding whitespace trimmed.
///
/// Returns `None` when both parts are missing or blank.
///
/// # Examples
///
/// ```
/// use runscope_core::display_name;
///
/// assert_eq!(display_name(Some("Ada"), Some("Lovelace")).as_deref(), Some("Ada Lovelace"));
/// assert_eq!(display_name(Some("Ada"), None).as_deref(), Some("Ada"));
/// assert_eq!(display_name(None, Some("  ")), None);
/// ```
pub fn display_name(name: Option<&str>, surname: Option<&str>) -> Option<String> {
    let joined = format!("{} {}", name.unwrap_or_default(), surname.unwrap_or_default());
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Identity record referenced by runs and chat messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub user_id: String,
    /// Given name
    #[serde(default)]
    pub name: Option<String>,
    /// Family name
    #[serde(default)]
    pub surname: Option<String>,
    /// Derived display name, filled in by [`UserProfile::resolve_display_name`]
    #[serde(default)]
    pub display_name: String,
}

impl UserProfile {
    /// Fill in `display_name` from the name parts.
    pub fn resolve_display_name(&mut self) {
        self.display_name = display_name(self.name.as_deref(), self.surname.as_deref())
            .unwrap_or_else(|| UNKNOWN_USER.to_string());
    }
}

/// Distinct, sorted set of user IDs referenced by `runs`.
pub fn distinct_user_ids(runs: &[Run]) -> BTreeSet<String> {
    runs.iter().filter_map(|run| run.user_id.clone()).collect()
}

/// Attach a display name to every run from the looked-up `profiles`.
///
/// Runs whose user has no profile, and runs without a user, get [`UNKNOWN_USER`].
pub fn attach_user_names(runs: &mut [Run], profiles: &[UserProfile]) {
    let names: HashMap<&str, String> = profiles
        .iter()
        .filter_map(|profile| {
            display_name(profile.name.as_deref(), profile.surname.as_deref())
                .map(|name| (profile.user_id.as_str(), name))
        })
        .collect();

    for run in runs.iter_mut() {
        let resolved = run
            .user_id
            .as_deref()
            .and_then(|id| names.get(id))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER.to_string());
        run.user_name = Some(resolved);
    }
}
