use crate::stopwords::StopwordSet;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"(?u)[^\w\s]").expect("valid regex");
}

/// Tokenize text into normalized index terms.
///
/// Lowercases, strips every character that is neither a word character nor
/// whitespace, splits on whitespace runs, then keeps a token only if it is
/// not a stopword and is entirely alphabetic. Digits and underscores survive
/// the strip but fail the alphabetic filter, so numeric tokens are never
/// indexed and never match a query.
pub fn tokenize(text: &str, stopwords: &StopwordSet) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    cleaned
        .split_whitespace()
        .filter(|word| !stopwords.contains(word) && word.chars().all(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stopwords() -> StopwordSet {
        StopwordSet::from_words(Vec::<&str>::new())
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        let toks = tokenize("Hello, World! It's fine.", &no_stopwords());
        assert_eq!(toks, vec!["hello", "world", "its", "fine"]);
    }

    #[test]
    fn drops_stopwords() {
        let sw = StopwordSet::from_words(["the", "and"]);
        let toks = tokenize("The cat and the dog", &sw);
        assert_eq!(toks, vec!["cat", "dog"]);
    }

    #[test]
    fn drops_numeric_and_mixed_tokens() {
        let toks = tokenize("version 2 of web2 and snake_case", &no_stopwords());
        assert_eq!(toks, vec!["version", "of", "and"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(tokenize("", &no_stopwords()).is_empty());
        assert!(tokenize("  \t\n ", &no_stopwords()).is_empty());
    }

    #[test]
    fn retokenizing_is_a_fixed_point() {
        let sw = StopwordSet::from_words(["a", "the"]);
        let once = tokenize("The quick, brown fox -- a classic!", &sw);
        let twice = tokenize(&once.join(" "), &sw);
        assert_eq!(once, twice);
    }
}
