//! Lookup key derivation.
//!
//! A field identifier becomes an upper-snake lookup key: an `_` is inserted
//! before every ASCII uppercase letter, the whole string is uppercased, and a
//! single leading `_` is dropped. A non-empty prefix is joined with `_`.
//!
//! | Identifier    | Prefix   | Key                  |
//! |---------------|----------|----------------------|
//! | `url`         |          | `URL`                |
//! | `settingUrlA` |          | `SETTING_URL_A`      |
//! | `SecretKey`   | `APP`    | `APP_SECRET_KEY`     |
//! | `database_url`| `MYAPP`  | `MYAPP_DATABASE_URL` |

/// Derive the lookup key for `identifier`, optionally namespaced by `prefix`.
pub fn derive_key(identifier: &str, prefix: Option<&str>) -> String {
    let screaming = to_screaming_case(identifier);
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_{screaming}"),
        _ => screaming,
    }
}

fn to_screaming_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for c in identifier.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_uppercase());
    }
    match out.strip_prefix('_') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_identifier() {
        assert_eq!(derive_key("url", None), "URL");
    }

    #[test]
    fn camel_case_splits_on_uppercase() {
        assert_eq!(derive_key("settingUrlA", None), "SETTING_URL_A");
        assert_eq!(derive_key("urlA", None), "URL_A");
    }

    #[test]
    fn pascal_case_has_no_leading_underscore() {
        assert_eq!(derive_key("SecretKey", None), "SECRET_KEY");
    }

    #[test]
    fn snake_case_keeps_underscores() {
        assert_eq!(derive_key("database_url", None), "DATABASE_URL");
    }

    #[test]
    fn consecutive_capitals_each_split() {
        assert_eq!(derive_key("apiURL", None), "API_U_R_L");
    }

    #[test]
    fn prefix_is_joined_with_underscore() {
        assert_eq!(derive_key("settingUrl", Some("PREFIX")), "PREFIX_SETTING_URL");
    }

    #[test]
    fn prefixed_equals_prefix_plus_unprefixed() {
        for id in ["url", "settingUrlA", "SecretKey", "pool_size"] {
            assert_eq!(
                derive_key(id, Some("NEXT_PUBLIC")),
                format!("NEXT_PUBLIC_{}", derive_key(id, None))
            );
        }
    }

    #[test]
    fn empty_prefix_is_ignored() {
        assert_eq!(derive_key("url", Some("")), "URL");
    }

    #[test]
    fn non_ascii_uppercased_but_not_split() {
        assert_eq!(derive_key("caféÉtat", None), "CAFÉÉTAT");
    }
}
