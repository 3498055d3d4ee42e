// Normalization of cell and header text.
//
// Every place where text becomes a key goes through `fold`. The casing as
// typed is only kept for display.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Canonical identity of a piece of text: trimmed and lowercased.
pub fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn eq_folded(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn starts_with_folded(text: &str, prefix: &str) -> bool {
    fold(text).starts_with(&fold(prefix))
}

/// Case-insensitive alphabetical order. Ties are broken on the raw text so
/// that the order is total.
pub fn cmp_folded(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

pub fn sort_folded(items: &mut [String]) {
    items.sort_by(|a, b| cmp_folded(a, b));
}

/// A set of strings compared case-insensitively.
///
/// Iteration follows insertion order and yields the casing of the first
/// occurrence.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FoldedSet {
    keys: HashSet<String>,
    items: Vec<String>,
}

impl FoldedSet {
    pub fn new() -> FoldedSet {
        FoldedSet::default()
    }

    /// Returns false if an equivalent entry was already present.
    pub fn insert(&mut self, s: &str) -> bool {
        if self.keys.insert(fold(s)) {
            self.items.push(s.to_string());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, s: &str) -> bool {
        self.keys.contains(&fold(s))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.as_str())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Splits a raw cell into its answer tokens.
///
/// Single-value cells give at most one token. Multi-value cells are split on
/// commas. Tokens are trimmed and blank tokens dropped.
pub fn split_tokens(raw: &str, multi_value: bool) -> Vec<&str> {
    if multi_value {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    } else {
        let t = raw.trim();
        if t.is_empty() {
            vec![]
        } else {
            vec![t]
        }
    }
}

/// The text between the first `[` and the first `]`, when it is not blank.
pub fn bracket_label(header: &str) -> Option<&str> {
    let start = header.find('[')?;
    let end = header.find(']')?;
    if end <= start {
        return None;
    }
    let inner = header[start + 1..end].trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

/// True if the header holds a `[` with a `]` somewhere after it.
pub fn has_bracket_segment(header: &str) -> bool {
    match header.find('[') {
        Some(start) => header[start + 1..].contains(']'),
        None => false,
    }
}

/// The question stem: the trimmed text before the first `[`.
/// Headers without brackets are their own stem.
pub fn question_stem(header: &str) -> Option<&str> {
    let stem = match header.find('[') {
        Some(idx) => &header[..idx],
        None => header,
    }
    .trim();
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folded_set_keeps_first_casing() {
        let mut set = FoldedSet::new();
        assert!(set.insert("Alpha"));
        assert!(!set.insert(" alpha "));
        assert!(set.insert("Beta"));
        assert!(set.contains("ALPHA"));
        assert_eq!(set.into_vec(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn split_single_and_multi() {
        assert_eq!(split_tokens("  a, b ", false), vec!["a, b"]);
        assert_eq!(split_tokens("a, ,b,", true), vec!["a", "b"]);
        assert!(split_tokens("   ", false).is_empty());
        assert!(split_tokens(" , ", true).is_empty());
    }

    #[test]
    fn brackets_and_stems() {
        assert_eq!(bracket_label("How often? [ Home ]"), Some("Home"));
        assert_eq!(bracket_label("How often? []"), None);
        assert_eq!(bracket_label("a ] b [ c"), None);
        assert_eq!(question_stem("How often? [Home]"), Some("How often?"));
        assert_eq!(question_stem("Plain header"), Some("Plain header"));
        assert_eq!(question_stem(" [Only label]"), None);
        assert!(has_bracket_segment("Q [A]"));
        assert!(!has_bracket_segment("Q ] [A"));
        assert!(!has_bracket_segment("Q [A"));
    }

    #[test]
    fn folded_order() {
        let mut items = vec![
            "beta".to_string(),
            "Others".to_string(),
            "Alpha".to_string(),
        ];
        sort_folded(&mut items);
        assert_eq!(items, vec!["Alpha", "beta", "Others"]);
    }
}
