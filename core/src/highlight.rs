use regex::RegexBuilder;

/// Wrap whole-word occurrences of each term in `<mark>` tags.
///
/// Matching is case-insensitive and word-boundary delimited, so "cat" never
/// matches inside "category". Terms are applied one after another over the
/// already-substituted text; a later term whose pattern happens to match text
/// introduced by an earlier substitution will wrap it again. That is a known
/// edge case of the sequential scheme, kept as-is.
pub fn highlight(text: &str, terms: &[String]) -> String {
    let mut out = text.to_string();
    for term in terms {
        if term.is_empty() {
            continue;
        }
        let pattern = RegexBuilder::new(&format!(r"\b({})\b", regex::escape(term)))
            .case_insensitive(true)
            .build()
            .expect("escaped term is a valid pattern");
        out = pattern.replace_all(&out, "<mark>$1</mark>").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn marks_whole_words_only() {
        assert_eq!(
            highlight("I have a cat", &terms(&["cat"])),
            "I have a <mark>cat</mark>"
        );
        assert_eq!(highlight("category", &terms(&["cat"])), "category");
    }

    #[test]
    fn is_case_insensitive_and_keeps_original_casing() {
        assert_eq!(
            highlight("Cat and CAT", &terms(&["cat"])),
            "<mark>Cat</mark> and <mark>CAT</mark>"
        );
    }

    #[test]
    fn marks_every_term() {
        assert_eq!(
            highlight("quick brown fox", &terms(&["quick", "fox"])),
            "<mark>quick</mark> brown <mark>fox</mark>"
        );
    }

    #[test]
    fn no_terms_is_identity() {
        assert_eq!(highlight("untouched text", &[]), "untouched text");
    }
}
