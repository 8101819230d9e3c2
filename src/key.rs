//! Storage key derivation.
//!
//! Every record lives under a [`StorageKey`] computed from the adapter name,
//! the short name of the stored type, and an optional custom key. How the
//! custom key participates is decided by the [`KeyStrategy`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A string key addressing one record in a [`KeyValueStore`](crate::store::KeyValueStore).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

/// How a custom key combines with the type-derived key.
///
/// Both strategies produce `"<adapter>.<type>"` when no custom key is given.
/// They differ only once a non-empty custom key is supplied:
///
/// | strategy  | custom key `"X"`        |
/// |-----------|-------------------------|
/// | `Legacy`  | `"<adapter>.<type>.X"`  |
/// | `Current` | `"X"`                   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    /// The custom key is appended to the type-derived key.
    Legacy,
    /// A non-empty custom key replaces the type-derived key entirely.
    #[default]
    Current,
}

impl KeyStrategy {
    /// Adapter name used in derived keys when none is set explicitly.
    pub const fn default_adapter_name(self) -> &'static str {
        match self {
            Self::Legacy => "LegacyKvAdapter",
            Self::Current => "KvAdapter",
        }
    }

    /// Whether bulk removal by type name is available under this strategy.
    pub const fn supports_remove_all(self) -> bool {
        matches!(self, Self::Current)
    }

    /// Derive the storage key for a type.
    ///
    /// An empty custom key is treated as absent.
    pub fn storage_key(
        self,
        adapter_name: &str,
        type_name: &str,
        custom_key: Option<&str>,
    ) -> StorageKey {
        let custom_key = custom_key.filter(|k| !k.is_empty());

        match (self, custom_key) {
            (Self::Current, Some(custom)) => StorageKey::new(custom),
            (Self::Legacy, Some(custom)) => {
                StorageKey(format!("{}.{}.{}", adapter_name, type_name, custom))
            }
            (_, None) => StorageKey(format!("{}.{}", adapter_name, type_name)),
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Current => f.write_str("current"),
        }
    }
}

/// Short name of `T`, with module paths stripped from every segment.
///
/// `alloc::vec::Vec<my_app::User>` becomes `Vec<User>`. The rendering comes
/// from [`std::any::type_name`], so it is stable for a given toolchain but
/// not guaranteed across compiler releases.
pub fn type_name_of<T: ?Sized>() -> String {
    shorten_type_name(std::any::type_name::<T>())
}

fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (i, c) in full.char_indices() {
        if is_type_delimiter(c) {
            if let Some(segment) = full.get(segment_start..i) {
                out.push_str(last_path_component(segment));
            }
            out.push(c);
            segment_start = i + c.len_utf8();
        }
    }
    if let Some(tail) = full.get(segment_start..) {
        out.push_str(last_path_component(tail));
    }

    out
}

fn is_type_delimiter(c: char) -> bool {
    matches!(c, '<' | '>' | ',' | ';' | '(' | ')' | '[' | ']' | '&' | '*' | ' ')
}

fn last_path_component(segment: &str) -> &str {
    segment.rsplit_once("::").map_or(segment, |(_, last)| last)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestModel;

    #[test]
    fn test_current_without_custom_key() {
        let key = KeyStrategy::Current.storage_key("KvAdapter", "TestModel", None);
        assert_eq!(key.as_str(), "KvAdapter.TestModel");
    }

    #[test]
    fn test_custom_key_forms_diverge() {
        let legacy = KeyStrategy::Legacy.storage_key("Adapter", "Type", Some("X"));
        let current = KeyStrategy::Current.storage_key("Adapter", "Type", Some("X"));

        assert_eq!(legacy.as_str(), "Adapter.Type.X");
        assert_eq!(current.as_str(), "X");
    }

    #[test]
    fn test_empty_custom_key_is_absent() {
        for strategy in [KeyStrategy::Legacy, KeyStrategy::Current] {
            assert_eq!(
                strategy.storage_key("A", "T", Some("")),
                strategy.storage_key("A", "T", None)
            );
        }
    }

    #[test]
    fn test_default_names() {
        assert_eq!(KeyStrategy::default(), KeyStrategy::Current);
        assert_eq!(KeyStrategy::Current.default_adapter_name(), "KvAdapter");
        assert_eq!(KeyStrategy::Legacy.default_adapter_name(), "LegacyKvAdapter");
        assert!(KeyStrategy::Current.supports_remove_all());
        assert!(!KeyStrategy::Legacy.supports_remove_all());
    }

    #[test]
    fn test_type_name_of() {
        assert_eq!(type_name_of::<TestModel>(), "TestModel");
        assert_eq!(type_name_of::<u32>(), "u32");
        assert_eq!(type_name_of::<String>(), "String");
        assert_eq!(type_name_of::<Vec<Option<String>>>(), "Vec<Option<String>>");
        assert_eq!(type_name_of::<(u8, TestModel)>(), "(u8, TestModel)");
        assert_eq!(type_name_of::<[TestModel]>(), "[TestModel]");
    }

    #[test]
    fn test_shorten_nested_paths() {
        assert_eq!(
            shorten_type_name("std::collections::hash::map::HashMap<alloc::string::String, my::Thing>"),
            "HashMap<String, Thing>"
        );
        assert_eq!(shorten_type_name("&str"), "&str");
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(KeyStrategy::Legacy.to_string(), "legacy");
        assert_eq!(KeyStrategy::Current.to_string(), "current");
    }
}
