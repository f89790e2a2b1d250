use unicode_normalization::UnicodeNormalization;

/// Title-case a raw skill or designation entry.
///
/// Contract:
/// 1. trim, then split on whitespace (runs collapse to one space)
/// 2. each word: first char uppercased, remainder lowercased
/// 3. empty input yields an empty string (callers treat that as a no-op)
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive comparison key for a location entry (NFKC fold, trim,
/// lowercase). Two entries with equal keys are the same location.
pub fn location_key(raw: &str) -> String {
    raw.nfkc().collect::<String>().trim().to_lowercase()
}

/// Canonical location-list normalization: trim each value, drop empties,
/// dedup by `location_key` keeping the first occurrence (and its casing).
///
/// Idempotent: normalize_locations(normalize_locations(xs)) == normalize_locations(xs).
pub fn normalize_locations<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    let mut result = Vec::new();

    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = location_key(trimmed);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        result.push(trimmed.to_string());
    }

    result
}

/// Dedup a free-form list (benefits etc.) by exact value, preserving order.
pub fn dedup_exact(values: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() || result.iter().any(|v| v == trimmed) {
            continue;
        }
        result.push(trimmed.to_string());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_collapses_whitespace_and_capitalizes() {
        assert_eq!(title_case("  react   native "), "React Native");
        assert_eq!(title_case("JAVA"), "Java");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("   "), "");
    }

    #[test]
    fn location_key_folds_case_and_width() {
        assert_eq!(location_key(" Dubai "), "dubai");
        assert_eq!(location_key("ＤＵＢＡＩ"), "dubai");
        assert_eq!(location_key("Abu Dhabi"), "abu dhabi");
    }

    #[test]
    fn normalize_keeps_first_occurrence_casing() {
        let normalized = normalize_locations(["Dubai", "dubai", " DUBAI ", "Riyadh"]);
        assert_eq!(normalized, vec!["Dubai".to_string(), "Riyadh".to_string()]);
    }

    #[test]
    fn normalize_drops_empty_entries() {
        let normalized = normalize_locations(["", "  ", "Doha", " "]);
        assert_eq!(normalized, vec!["Doha".to_string()]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = vec![
            " Dubai ".to_string(),
            "dubai".to_string(),
            "Sharjah".to_string(),
            "".to_string(),
            "SHARJAH ".to_string(),
        ];
        let once = normalize_locations(&inputs);
        let twice = normalize_locations(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn dedup_exact_preserves_order() {
        let values = vec![
            "Health Insurance".to_string(),
            "Visa".to_string(),
            "Health Insurance".to_string(),
            " ".to_string(),
        ];
        assert_eq!(
            dedup_exact(&values),
            vec!["Health Insurance".to_string(), "Visa".to_string()]
        );
    }
}
