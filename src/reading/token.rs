/// Whether a token is a word the learner can select or a separator between words.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Word,
    /// A whitespace run or a single `. , ! ? ; :` character.
    Separator,
}

/// Token struct for follow-along reading
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// Offset of the first character in the source sentence, counted in chars.
    pub start: usize,
}

impl Token {
    /// Width of the token in chars, the unit speech engines report offsets in.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn end(&self) -> usize {
        self.start + self.len()
    }

    /// Anything but whitespace can be selected, punctuation included.
    pub fn is_clickable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_chars_not_bytes() {
        let token = Token {
            text: "déjà".to_string(),
            kind: TokenKind::Word,
            start: 4,
        };
        assert_eq!(token.len(), 4);
        assert_eq!(token.end(), 8);
    }

    #[test]
    fn test_whitespace_is_not_clickable() {
        let token = Token {
            text: " ".to_string(),
            kind: TokenKind::Separator,
            start: 0,
        };
        assert!(!token.is_clickable());
    }

    #[test]
    fn test_punctuation_is_clickable() {
        let token = Token {
            text: "?".to_string(),
            kind: TokenKind::Separator,
            start: 9,
        };
        assert!(token.is_clickable());
    }
}
