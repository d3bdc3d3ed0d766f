use factly_common::types::Verdict;

/// Normalize a provider's free-text verdict label into the fixed
/// vocabulary.
///
/// Keys are matched after lower-casing and whitespace collapsing, so
/// "Mostly  True" and "mostly true" land in the same bucket. Labels
/// outside the table map to `Unverified`; a rating we cannot read is
/// a rating we do not have.
pub fn normalize(raw: &str) -> Verdict {
    let key = collapse(raw);
    match key.as_str() {
        "true" | "correct" | "accurate" | "verified" | "mostly true" => Verdict::True,
        "false" | "incorrect" | "inaccurate" | "mostly false" | "pants on fire" => Verdict::False,
        "mixed" | "half true" | "partly true" | "partly false" | "misleading" | "satire" => {
            Verdict::Mixed
        }
        "unverified" | "unproven" => Verdict::Unverified,
        _ => Verdict::Unverified,
    }
}

/// Normalize an optional label; absence is `Unverified`.
pub fn normalize_opt(raw: Option<&str>) -> Verdict {
    raw.map(normalize).unwrap_or(Verdict::Unverified)
}

fn collapse(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_true_variants() {
        for label in ["true", "True", "CORRECT", "Accurate", "verified", "Mostly True"] {
            assert_eq!(normalize(label), Verdict::True, "label: {}", label);
        }
    }

    #[test]
    fn test_normalize_false_variants() {
        for label in ["false", "Incorrect", "inaccurate", "Mostly False", "Pants on Fire"] {
            assert_eq!(normalize(label), Verdict::False, "label: {}", label);
        }
    }

    #[test]
    fn test_normalize_mixed_variants() {
        for label in ["mixed", "Half True", "partly false", "Misleading", "satire"] {
            assert_eq!(normalize(label), Verdict::Mixed, "label: {}", label);
        }
    }

    #[test]
    fn test_whitespace_collapsed_before_lookup() {
        assert_eq!(normalize("  Mostly \t True "), Verdict::True);
        assert_eq!(normalize("pants\n on\n fire"), Verdict::False);
    }

    #[test]
    fn test_unrecognized_maps_to_unverified() {
        assert_eq!(normalize("four pinocchios"), Verdict::Unverified);
        assert_eq!(normalize(""), Verdict::Unverified);
        assert_eq!(normalize_opt(None), Verdict::Unverified);
    }

    #[test]
    fn test_normalize_is_idempotent_on_vocabulary() {
        for v in [Verdict::True, Verdict::False, Verdict::Mixed, Verdict::Unverified] {
            assert_eq!(normalize(v.as_str()), v);
        }
    }
}
