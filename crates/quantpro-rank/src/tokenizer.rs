/// Tokens shorter than this many characters are dropped.
pub const MIN_TOKEN_LEN: usize = 3;

/// Splits `text` into lower-case terms.
///
/// Anything that is not a word character (ASCII alphanumeric or `_`) separates
/// terms, so punctuation behaves like whitespace. Terms of two characters or
/// fewer are discarded. Order is preserved and duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> { Tokens::new(text).iter().map(str::to_string).collect() }

/// Lower-cased text that can be walked as terms any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    lowered: String,
}

impl Tokens {
    pub fn new(text: &str) -> Self { Self { lowered: text.to_lowercase() } }

    /// Terms in text order; same rules as [`tokenize`].
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lowered
            .split(|c: char| !is_word_char(c))
            .filter(|term| term.len() >= MIN_TOKEN_LEN)
    }
}

fn is_word_char(c: char) -> bool { c.is_ascii_alphanumeric() || c == '_' }
