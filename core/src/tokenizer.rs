use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // \W+ with Unicode semantics: anything that is not a letter, digit or
    // underscore separates tokens.
    static ref SEPARATORS: Regex = Regex::new(r"\W+").expect("valid regex");
}

/// Tokenize text by lowercasing and splitting on runs of non-alphanumeric
/// characters. Empty fragments are dropped; the index of a token in the
/// returned sequence is its position as stored in postings. No stemming,
/// no stop-word removal, no folding.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATORS
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        assert_eq!(tokenize("Hola, Mundo!! 2024"), vec!["hola", "mundo", "2024"]);
    }

    #[test]
    fn underscore_is_a_word_character() {
        assert_eq!(tokenize("foo_bar baz"), vec!["foo_bar", "baz"]);
    }

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(tokenize("Canción de año nuevo"), vec!["canción", "de", "año", "nuevo"]);
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ¡¿!? -- ").is_empty());
    }

    #[test]
    fn positions_are_contiguous() {
        let toks = tokenize("uno. dos... tres");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0], "uno");
        assert_eq!(toks[2], "tres");
    }
}
