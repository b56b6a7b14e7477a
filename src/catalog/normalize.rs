//! Canonical form of free-form identifiers.

/// Collapse an identifier to its canonical lookup key.
///
/// Lowercases, trims, and turns every run of whitespace or underscores into a
/// single `_`, so `"Blade Dance"`, `"blade_dance"` and `" BLADE  _dance "`
/// all map to `"blade_dance"`. Separators at either end are dropped, not
/// only whitespace, so `"_foo"`, `"foo_"` and `"foo"` share one key; a
/// catalog that needs those apart is rejected as a duplicate. The empty
/// input yields the empty key, which never matches a catalog entry.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for ch in raw.chars() {
        if ch.is_whitespace() || ch == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(ch.to_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_separators() {
        assert_eq!(normalize("Blade Dance"), "blade_dance");
        assert_eq!(normalize("blade_dance"), "blade_dance");
        assert_eq!(normalize("BLADE   DANCE"), "blade_dance");
        assert_eq!(normalize("Blade _ \t_Dance"), "blade_dance");
    }

    #[test]
    fn test_edge_separators_dropped() {
        assert_eq!(normalize("_foo"), "foo");
        assert_eq!(normalize("foo__"), "foo");
        assert_eq!(normalize(" _ Foo Bar _ "), "foo_bar");
        assert_eq!(normalize("___"), "");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(normalize("  Strike_G  "), "strike_g");
        assert_eq!(normalize("__Shiv__"), "shiv");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("___"), "");
    }

    #[test]
    fn test_punctuation_kept() {
        assert_eq!(normalize("J.A.X."), "j.a.x.");
        assert_eq!(normalize("Pandora's Box"), "pandora's_box");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["Ring of the Snake", "AcidSlime_L", "  Wraith Form v2 "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
