//! Ordered-subsequence matching

/// Whether every character of `pattern` occurs in `text` in order
///
/// Case-insensitive. The characters need not be contiguous, so `"gd"`
/// matches `"geometry dash"`. An empty pattern matches anything; an empty
/// text matches only the empty pattern.
pub fn fuzzy_match(text: &str, pattern: &str) -> bool {
    let text = text.to_lowercase();
    let mut remaining = text.chars();
    pattern
        .to_lowercase()
        .chars()
        .all(|p| remaining.any(|t| t == p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsequence() {
        assert!(fuzzy_match("geometry dash", "gd"));
        assert!(fuzzy_match("Geometry Dash", "GDH"));
        assert!(fuzzy_match("dash", "dash"));
        assert!(!fuzzy_match("dash", "xyz"));
    }

    #[test]
    fn test_order_matters() {
        assert!(fuzzy_match("platformer", "pfm"));
        assert!(!fuzzy_match("platformer", "mfp"));
        // each text character is consumed once
        assert!(!fuzzy_match("ab", "aab"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(fuzzy_match("anything", ""));
        assert!(fuzzy_match("", ""));
        assert!(!fuzzy_match("", "a"));
    }
}
