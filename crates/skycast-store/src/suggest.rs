//! City-name autocomplete over a candidate list.

/// Case-folded form used for every city-name comparison.
pub(crate) fn fold_case(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Up to `limit` candidates matching `input`, case-insensitively.
///
/// Prefix matches come first, then substring matches; within each group
/// the candidates keep their original order. Duplicates are dropped.
pub fn suggest<'a, I>(input: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = fold_case(input);
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut prefix = Vec::new();
    let mut substring = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for candidate in candidates {
        let candidate = candidate.trim();
        let folded = fold_case(candidate);
        if candidate.is_empty() || !seen.insert(folded.clone()) {
            continue;
        }
        if folded.starts_with(&needle) {
            prefix.push(candidate.to_string());
        } else if folded.contains(&needle) {
            substring.push(candidate.to_string());
        }
    }

    prefix.into_iter().chain(substring).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &[&str] = &["London", "Londrina", "New London", "Lisbon", "Oslo"];

    #[test]
    fn test_prefix_before_substring() {
        let got = suggest("lon", CITIES.iter().copied(), 10);
        assert_eq!(got, vec!["London", "Londrina", "New London"]);
    }

    #[test]
    fn test_limit() {
        let got = suggest("lon", CITIES.iter().copied(), 2);
        assert_eq!(got, vec!["London", "Londrina"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(suggest("", CITIES.iter().copied(), 5).is_empty());
        assert!(suggest("   ", CITIES.iter().copied(), 5).is_empty());
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let got = suggest("OS", ["Oslo", "oslo", "Kosice"], 5);
        assert_eq!(got, vec!["Oslo", "Kosice"]);
    }

    #[test]
    fn test_no_match() {
        assert!(suggest("zzz", CITIES.iter().copied(), 5).is_empty());
    }
}
