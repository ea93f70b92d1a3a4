use sift_core::{tokenize, StopwordSet};

#[test]
fn it_lowercases_and_strips_punctuation() {
    let sw = StopwordSet::from_words(Vec::<&str>::new());
    let toks = tokenize("Quick, Brown FOX!", &sw);
    assert_eq!(toks, vec!["quick", "brown", "fox"]);
}

#[test]
fn it_filters_stopwords() {
    let sw = StopwordSet::from_words(["the", "and"]);
    let toks = tokenize("The quick brown fox and the lazy dog", &sw);
    assert!(!toks.contains(&"the".to_string()));
    assert!(!toks.contains(&"and".to_string()));
    assert!(toks.contains(&"quick".to_string()));
}

#[test]
fn it_rejects_non_alphabetic_tokens() {
    let sw = StopwordSet::from_words(Vec::<&str>::new());
    let toks = tokenize("room 101 holds mixed2tokens and some_name", &sw);
    assert_eq!(toks, vec!["room", "holds", "and"]);
}
