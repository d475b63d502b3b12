//! English pluralization for collection type names.

const UNCOUNTABLE: &[&str] = &[
    "data", "equipment", "fish", "information", "jeans", "metadata", "money", "news", "police",
    "rice", "series", "sheep", "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("man", "men"),
    ("move", "moves"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("woman", "women"),
];

/// Pluralize the last word of a (possibly camel-cased) identifier.
///
/// # Examples
/// ```
/// use naming::pluralize;
/// assert_eq!(pluralize("FileFormat"), "FileFormats");
/// assert_eq!(pluralize("Currency"), "Currencies");
/// assert_eq!(pluralize("OrderStatus"), "OrderStatuses");
/// ```
pub fn pluralize(ident: &str) -> String {
    let split = last_word_start(ident);
    let (head, word) = ident.split_at(split);
    if word.is_empty() {
        return ident.to_string();
    }

    if word.chars().all(|c| !c.is_lowercase()) && word.chars().any(|c| c.is_uppercase()) {
        // acronyms (`ID` -> `IDs`)
        return format!("{ident}s");
    }

    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return ident.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return format!("{head}{}", match_case(word, plural));
    }
    format!("{head}{}", apply_suffix_rules(word))
}

fn apply_suffix_rules(word: &str) -> String {
    let lower = word.to_lowercase();
    let stem = |n: usize| &word[..word.len() - n];

    if lower.ends_with("is") && lower.len() > 3 {
        return format!("{}es", stem(2));
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }
    if lower.ends_with('y') && !ends_with_vowel_before(&lower, 1) {
        return format!("{}ies", stem(1));
    }
    if lower.ends_with("fe") && !lower.ends_with("ffe") {
        return format!("{}ves", stem(2));
    }
    if lower.ends_with("lf") || lower.ends_with("rf") {
        return format!("{}ves", stem(1));
    }
    format!("{word}s")
}

fn ends_with_vowel_before(lower: &str, suffix_len: usize) -> bool {
    lower
        .chars()
        .rev()
        .nth(suffix_len)
        .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

/// Byte offset where the last word starts: after the last separator, or at the
/// last lower-to-upper hump.
fn last_word_start(ident: &str) -> usize {
    let chars: Vec<(usize, char)> = ident.char_indices().collect();
    for i in (1..chars.len()).rev() {
        let (idx, c) = chars[i];
        let (_, prev) = chars[i - 1];
        if matches!(prev, '.' | '-' | '_' | '/' | ' ') {
            return idx;
        }
        if c.is_uppercase() && (prev.is_lowercase() || prev.is_ascii_digit()) {
            return idx;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_suffixes() {
        assert_eq!(pluralize("format"), "formats");
        assert_eq!(pluralize("Status"), "Statuses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("Batch"), "Batches");
        assert_eq!(pluralize("currency"), "currencies");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("half"), "halves");
        assert_eq!(pluralize("knife"), "knives");
    }

    #[test]
    fn test_last_word_only() {
        assert_eq!(pluralize("ReportType"), "ReportTypes");
        assert_eq!(pluralize("OrderEntity"), "OrderEntities");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(pluralize("ProductID"), "ProductIDs");
    }

    #[test]
    fn test_uncountable_and_irregular() {
        assert_eq!(pluralize("MarketData"), "MarketData");
        assert_eq!(pluralize("series"), "series");
        assert_eq!(pluralize("Child"), "Children");
    }
}
