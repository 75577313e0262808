//! Text helpers shared by the scanners
//!
//! Case folding is one-to-one per character, so a char offset in the folded
//! text is the same char offset in the original. The automaton reports byte
//! offsets into the folded string; `FoldedText` maps them back.

/// Fold a single character to lowercase, keeping it as-is when the
/// lowercase form expands to more than one character.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Fold a whole string character by character
pub fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Letters, digits and underscore
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Original text plus its folded form with offset tables
pub struct FoldedText<'a> {
    original: &'a str,
    folded: String,
    /// Byte offset of each char in `original`, plus a trailing `original.len()`
    original_starts: Vec<usize>,
    /// Byte offset of each char in `folded`, plus a trailing `folded.len()`
    folded_starts: Vec<usize>,
    chars: Vec<char>,
}

impl<'a> FoldedText<'a> {
    pub fn new(original: &'a str) -> Self {
        let char_count = original.chars().count();
        let mut folded = String::with_capacity(original.len());
        let mut original_starts = Vec::with_capacity(char_count + 1);
        let mut folded_starts = Vec::with_capacity(char_count + 1);
        let mut chars = Vec::with_capacity(char_count);

        for (byte, c) in original.char_indices() {
            original_starts.push(byte);
            folded_starts.push(folded.len());
            folded.push(fold_char(c));
            chars.push(c);
        }
        original_starts.push(original.len());
        folded_starts.push(folded.len());

        Self {
            original,
            folded,
            original_starts,
            folded_starts,
            chars,
        }
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Char index of a byte offset in the folded text.
    /// Offsets reported by the automaton always fall on char boundaries.
    pub fn char_index(&self, folded_byte: usize) -> usize {
        match self.folded_starts.binary_search(&folded_byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Slice of the original text between two char offsets
    pub fn original_slice(&self, start: usize, end: usize) -> &'a str {
        &self.original[self.original_starts[start]..self.original_starts[end]]
    }

    /// True when [start, end) is not glued to a word character on either side
    pub fn is_whole_word(&self, start: usize, end: usize) -> bool {
        let before_ok = start == 0 || !is_word_char(self.chars[start - 1]);
        let after_ok = end >= self.chars.len() || !is_word_char(self.chars[end]);
        before_ok && after_ok
    }
}

/// Char offset of a byte offset in `s`
pub fn char_offset(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

/// Converts ascending byte offsets to char offsets without rescanning
/// from the start of the text each time
pub struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    /// Char offset of `byte`; offsets must be passed in ascending order
    pub fn advance_to(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            return char_offset(self.text, byte);
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
