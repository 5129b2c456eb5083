//! Identifier sanitization.
//!
//! Terraform block labels and references must be plain identifiers, while
//! application, key, and queue names are free text. [`sanitize`] maps any
//! name onto `[a-z0-9_]*`. It is stateless: two names that differ only in
//! punctuation or case collapse onto the same identifier, and nothing here
//! detects that.

/// Lowercase `raw` and replace every character outside `[a-z0-9_]` with `_`.
///
/// Empty input yields an empty identifier; callers must not pass empty names.
pub fn sanitize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Compose the identifier of a child block: `<app>_<entity>`, both sanitized.
pub fn block_ident(app_name: &str, entity: &str) -> String {
    format!("{}_{}", sanitize(app_name), sanitize(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe(ident: &str) -> bool {
        ident
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn lowercases_and_replaces_spaces() {
        assert_eq!(sanitize("My App"), "my_app");
        assert_eq!(sanitize("Prod Key"), "prod_key");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(sanitize("queue_42"), "queue_42");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn hostile_names_only_produce_safe_characters() {
        for raw in [
            "",
            " ",
            "\t\n",
            "quote\"d",
            "back\\slash",
            "${interp}",
            "Ünïcödé",
            "日本語",
            "emoji 🚀",
            "a.b-c:d/e",
            "İ",
        ] {
            let ident = sanitize(raw);
            assert!(is_safe(&ident), "{raw:?} sanitized to unsafe {ident:?}");
        }
    }

    #[test]
    fn multibyte_characters_become_underscores() {
        assert_eq!(sanitize("café"), "caf_");
        assert_eq!(sanitize("🚀"), "_");
    }

    #[test]
    fn block_ident_scopes_entity_by_app() {
        assert_eq!(block_ident("My App", "Prod Key"), "my_app_prod_key");
        assert_eq!(block_ident("My App", "chat"), "my_app_chat");
    }

    #[test]
    fn distinct_entities_get_distinct_idents() {
        let names = ["orders", "payments", "chat", "r1", "r2", "Prod Key"];
        let mut idents: Vec<String> = names.iter().map(|n| block_ident("app", n)).collect();
        idents.sort();
        idents.dedup();
        assert_eq!(idents.len(), names.len());
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(sanitize("Some Name!"), sanitize("Some Name!"));
    }
}
