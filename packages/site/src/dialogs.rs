use crate::types::DialogKey;

/// Static description of one dialog: its DOM element and canonical path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogDefinition {
    pub key: DialogKey,
    pub element_id: &'static str,
    pub canonical_path: &'static str,
}

pub const DIALOGS: [DialogDefinition; 3] = [
    DialogDefinition {
        key: DialogKey::About,
        element_id: "about-dialog",
        canonical_path: "/about",
    },
    DialogDefinition {
        key: DialogKey::Imprint,
        element_id: "imprint-dialog",
        canonical_path: "/imprint",
    },
    DialogDefinition {
        key: DialogKey::Privacy,
        element_id: "privacy-dialog",
        canonical_path: "/privacy",
    },
];

pub fn definition(key: DialogKey) -> Option<&'static DialogDefinition> {
    DIALOGS.iter().find(|def| def.key == key)
}

/// Exact match on a normalized base path. First declared wins on duplicates.
pub fn key_by_path(base_path: &str) -> Option<DialogKey> {
    DIALOGS
        .iter()
        .find(|def| def.canonical_path == base_path)
        .map(|def| def.key)
}

/// Canonical base path for a dialog, `/` for no dialog or an unregistered key.
pub fn base_path_for_key(key: Option<DialogKey>) -> &'static str {
    key.and_then(definition)
        .map(|def| def.canonical_path)
        .unwrap_or("/")
}

/// Every canonical path the site serves, root first.
pub fn canonical_paths() -> impl Iterator<Item = &'static str> {
    std::iter::once("/").chain(DIALOGS.iter().map(|def| def.canonical_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_by_path_matches_exactly() {
        assert_eq!(key_by_path("/imprint"), Some(DialogKey::Imprint));
        assert_eq!(key_by_path("/about"), Some(DialogKey::About));
        assert_eq!(key_by_path("/unknown"), None);
        assert_eq!(key_by_path("/about/"), None);
        assert_eq!(key_by_path("/"), None);
    }

    #[test]
    fn base_path_for_key_falls_back_to_root() {
        assert_eq!(base_path_for_key(None), "/");
        assert_eq!(base_path_for_key(Some(DialogKey::Privacy)), "/privacy");
    }

    #[test]
    fn registry_is_one_to_one() {
        for key in DialogKey::ALL {
            let def = definition(key).unwrap();
            assert_eq!(key_by_path(def.canonical_path), Some(key));
        }
    }

    #[test]
    fn canonical_paths_start_with_root() {
        let paths: Vec<_> = canonical_paths().collect();
        assert_eq!(paths, vec!["/", "/about", "/imprint", "/privacy"]);
    }
}
