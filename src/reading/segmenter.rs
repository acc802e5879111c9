// Word segmentation for follow-along highlighting

use crate::reading::token::{Token, TokenKind};

const SEPARATOR_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

fn is_separator_punctuation(c: char) -> bool {
    SEPARATOR_PUNCTUATION.contains(&c)
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !is_separator_punctuation(c)
}

/// Lazy token stream over a sentence.
///
/// Every char of the input lands in exactly one token, so concatenating the
/// token texts gives back the sentence. Clone the iterator to restart it.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    byte_pos: usize,
    char_pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.byte_pos..];
        let first = rest.chars().next()?;

        let (kind, byte_len) = if is_separator_punctuation(first) {
            (TokenKind::Separator, first.len_utf8())
        } else if first.is_whitespace() {
            let len = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            (TokenKind::Separator, len)
        } else {
            let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
            (TokenKind::Word, len)
        };

        let text = &rest[..byte_len];
        let token = Token {
            text: text.to_string(),
            kind,
            start: self.char_pos,
        };

        self.byte_pos += byte_len;
        self.char_pos += text.chars().count();
        Some(token)
    }
}

/// Splits a sentence at whitespace runs and at each of `. , ! ? ; :`.
pub fn segment(text: &str) -> Segments<'_> {
    Segments {
        text,
        byte_pos: 0,
        char_pos: 0,
    }
}

/// Eagerly collects the full token stream, separators included.
pub fn tokenize(text: &str) -> Vec<Token> {
    segment(text).collect()
}

/// Indices of the tokens a learner can select, in stream order.
///
/// Offsets stay tied to the unfiltered stream; this only drops separators.
pub fn clickable_indices(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_clickable())
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_segment_empty_string() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_segment_single_word() {
        let tokens = tokenize("Bonjour");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].start, 0);
    }

    #[test]
    fn test_segment_words_and_spaces() {
        let tokens = tokenize("Bonjour le monde");
        assert_eq!(texts(&tokens), vec!["Bonjour", " ", "le", " ", "monde"]);
        let starts: Vec<usize> = tokens.iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0, 7, 8, 10, 11]);
    }

    #[test]
    fn test_segment_whitespace_run_is_one_token() {
        let tokens = tokenize("oui  \t non");
        assert_eq!(texts(&tokens), vec!["oui", "  \t ", "non"]);
        assert_eq!(tokens[1].kind, TokenKind::Separator);
    }

    #[test]
    fn test_segment_each_punctuation_is_own_token() {
        let tokens = tokenize("Quoi?!");
        assert_eq!(texts(&tokens), vec!["Quoi", "?", "!"]);
        assert_eq!(tokens[1].kind, TokenKind::Separator);
        assert_eq!(tokens[2].start, 5);
    }

    #[test]
    fn test_segment_apostrophe_stays_in_word() {
        let tokens = tokenize("Je m'appelle Marie.");
        assert_eq!(texts(&tokens), vec!["Je", " ", "m'appelle", " ", "Marie", "."]);
        let starts: Vec<usize> = tokens.iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0, 2, 3, 12, 13, 18]);
    }

    #[test]
    fn test_segment_offsets_count_chars() {
        let tokens = tokenize("Ça va, très bien");
        assert_eq!(texts(&tokens), vec!["Ça", " ", "va", ",", " ", "très", " ", "bien"]);
        assert_eq!(tokens[5].start, 7);
        assert_eq!(tokens[7].start, 12);
    }

    #[test]
    fn test_segment_is_restartable() {
        let segments = segment("un deux");
        let first: Vec<Token> = segments.clone().collect();
        let second: Vec<Token> = segments.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clickable_indices_skip_whitespace_only() {
        let tokens = tokenize("Merci, madame !");
        assert_eq!(clickable_indices(&tokens), vec![0, 1, 3, 5]);
    }

    #[test]
    fn test_other_punctuation_stays_in_word() {
        // Only `. , ! ? ; :` split words; quotes and dashes do not.
        let tokens = tokenize("«peut-être»");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word);
    }
}
