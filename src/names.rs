//! Element naming
//!
//! Naming of synthetic list items and validation of element names against
//! the XML NCName production.

use crate::types::TypeRef;
use once_cell::sync::Lazy;
use regex::Regex;

/// Name used for list items when no better name can be derived
pub const DEFAULT_ITEM_NAME: &str = "item";

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\-\.0-9\u{B7}]*$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Singular form of a list name, by dropping a trailing `s`
///
/// Returns `None` when the name has no trailing `s` to drop.
pub fn singularize(list_name: &str) -> Option<String> {
    let stem = list_name
        .strip_suffix('s')
        .or_else(|| list_name.strip_suffix('S'))?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_lowercase())
    }
}

/// Name of the synthetic item element of a list field
///
/// Complex item types are named after their type, everything else after
/// the singular form of the list name.
pub fn item_name(list_name: &str, item_type: &TypeRef, item_is_complex: bool) -> String {
    if item_is_complex {
        item_type.simple_name().to_lowercase()
    } else {
        singularize(list_name).unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("element"));
        assert!(is_valid_ncname("my-element"));
        assert!(is_valid_ncname("_element.v2"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("prefix:element"));
        assert!(!is_valid_ncname("123element"));
        assert!(!is_valid_ncname("-element"));
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("items").as_deref(), Some("item"));
        assert_eq!(singularize("Ports").as_deref(), Some("port"));
        assert_eq!(singularize("VOLUMES").as_deref(), Some("volume"));
        assert_eq!(singularize("data"), None);
        assert_eq!(singularize("s"), None);
    }

    #[test]
    fn test_item_name() {
        let string = TypeRef::string();
        assert_eq!(item_name("items", &string, false), "item");
        assert_eq!(item_name("data", &string, false), "item");
        assert_eq!(item_name("tags", &string, false), "tag");

        let widget = TypeRef::declared("pkg.Widget");
        assert_eq!(item_name("components", &widget, true), "widget");
        assert_eq!(item_name("data", &widget, true), "widget");
    }

    proptest! {
        #[test]
        fn prop_plural_names_lose_one_s(stem in "[a-z]{1,12}") {
            let plural = format!("{}s", stem);
            prop_assert_eq!(item_name(&plural, &TypeRef::string(), false), stem);
        }

        #[test]
        fn prop_names_without_s_fall_back(name in "[a-z]{0,11}[a-rt-z]") {
            prop_assert_eq!(item_name(&name, &TypeRef::string(), false), DEFAULT_ITEM_NAME);
        }
    }
}
