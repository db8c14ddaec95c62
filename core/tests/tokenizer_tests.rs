use plotindex::tokenizer::{tokenize, tokenize_title};

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let toks = tokenize("An Alien attacks Earth. Again?Yes;really!");
    assert_eq!(toks, vec!["an", "alien", "attacks", "earth", "again", "yes", "really"]);
}

#[test]
fn it_keeps_other_punctuation_and_stopwords() {
    let toks = tokenize("The man's (first) film - part 2:");
    assert_eq!(toks, vec!["the", "man's", "(first)", "film", "-", "part", "2:"]);
}

#[test]
fn it_is_deterministic() {
    let text = "Luke Skywalker, a farm boy, joins the Rebellion.";
    assert_eq!(tokenize(text), tokenize(text));
    assert_eq!(tokenize(text).len(), 8);
}

#[test]
fn title_tokens_drop_quotes() {
    assert_eq!(tokenize_title("\"Pimp My Ride\" "), vec!["pimp", "my", "ride"]);
    assert_eq!(tokenize_title(" \" \" "), Vec::<String>::new());
}
