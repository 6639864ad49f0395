use std::iter::Peekable;
use std::str::CharIndices;

use super::super::{
    is_reserved, COMMENT, KV_SEPARATOR, NL, SECTION_HEADER_END, SECTION_HEADER_START,
    TRIMMED_WHITESPACE,
};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TokenType {
    SectionHeaderStart, // [
    SectionHeaderEnd,   // ]
    KVSeparator,        // =
    Comment,            // ;
    NL,                 // \n
    Text,
}

impl TokenType {
    fn from_reserved(c: char) -> Option<Self> {
        match c {
            SECTION_HEADER_START => Some(Self::SectionHeaderStart),
            SECTION_HEADER_END => Some(Self::SectionHeaderEnd),
            KV_SEPARATOR => Some(Self::KVSeparator),
            COMMENT => Some(Self::Comment),
            NL => Some(Self::NL),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Token<'a> {
    pub token_type: TokenType,
    pub content: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType, content: &'a str) -> Self {
        Self {
            token_type,
            content,
        }
    }

    /// Any `Text` token, including an empty one.
    pub fn is_ident(&self) -> bool {
        self.token_type == TokenType::Text
    }
}

#[derive(Debug)]
pub struct Lexer<'a> {
    data: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            chars: data.char_indices().peekable(),
        }
    }

    /// Returns `None` once the input is exhausted. Whitespace-only runs come
    /// back as empty `Text` tokens.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let &(start, c) = self.chars.peek()?;

        if let Some(token_type) = TokenType::from_reserved(c) {
            self.chars.next();
            let end = start + c.len_utf8();
            return Some(Token::new(token_type, &self.data[start..end]));
        }

        let mut end = self.data.len();
        while let Some(&(pos, c)) = self.chars.peek() {
            if is_reserved(c) {
                end = pos;
                break;
            }
            self.chars.next();
        }

        let text = self.data[start..end].trim_matches(TRIMMED_WHITESPACE);
        Some(Token::new(TokenType::Text, text))
    }

    pub fn tokens_from(data: &'a str) -> Vec<Token<'a>> {
        let tokens: Vec<Token> = Lexer::new(data).collect();
        log::trace!("tokenized {} bytes into {} tokens", data.len(), tokens.len());
        tokens
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    /// Skips empty `Text` tokens, they carry nothing the grammar needs.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_token()? {
                Token {
                    token_type: TokenType::Text,
                    content: "",
                } => continue,
                token => return Some(token),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod next_token {
        use super::*;

        #[test]
        fn returns_none_for_empty_input() {
            let mut lexer = Lexer::new("");
            assert_eq!(lexer.next_token(), None);
        }

        #[test]
        fn returns_none_after_exhaustion() {
            let mut lexer = Lexer::new("a");
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::Text, "a")));
            assert_eq!(lexer.next_token(), None);
            assert_eq!(lexer.next_token(), None);
        }

        #[test]
        fn consecutive_reserved_chars_are_separate_tokens() {
            let mut lexer = Lexer::new("[]");
            assert_eq!(
                lexer.next_token(),
                Some(Token::new(TokenType::SectionHeaderStart, "["))
            );
            assert_eq!(
                lexer.next_token(),
                Some(Token::new(TokenType::SectionHeaderEnd, "]"))
            );
            assert_eq!(lexer.next_token(), None);
        }

        #[test]
        fn newline_is_returned_verbatim() {
            let mut lexer = Lexer::new("\n\n");
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::NL, "\n")));
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::NL, "\n")));
            assert_eq!(lexer.next_token(), None);
        }

        #[test]
        fn trims_text() {
            let mut lexer = Lexer::new(" \t some value \r\n");
            assert_eq!(
                lexer.next_token(),
                Some(Token::new(TokenType::Text, "some value"))
            );
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::NL, "\n")));
        }

        #[test]
        fn whitespace_only_collapses_to_empty_text() {
            let mut lexer = Lexer::new(" \t\r=");
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::Text, "")));
            assert_eq!(
                lexer.next_token(),
                Some(Token::new(TokenType::KVSeparator, "="))
            );
        }

        #[test]
        fn keeps_multibyte_text() {
            let mut lexer = Lexer::new("grüße=…");
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::Text, "grüße")));
            assert_eq!(
                lexer.next_token(),
                Some(Token::new(TokenType::KVSeparator, "="))
            );
            assert_eq!(lexer.next_token(), Some(Token::new(TokenType::Text, "…")));
            assert_eq!(lexer.next_token(), None);
        }
    }

    mod tokens_from {
        use super::*;

        #[test]
        fn with_empty_input_is_empty() {
            assert!(Lexer::tokens_from("").is_empty());
        }

        #[test]
        fn with_section_header_succeeds() {
            let tokens = Lexer::tokens_from("[Section A]\n");
            assert_eq!(
                tokens,
                vec![
                    Token::new(TokenType::SectionHeaderStart, "["),
                    Token::new(TokenType::Text, "Section A"),
                    Token::new(TokenType::SectionHeaderEnd, "]"),
                    Token::new(TokenType::NL, "\n"),
                ]
            );
        }

        #[test]
        fn entry_with_whitespace_succeeds() {
            let tokens = Lexer::tokens_from("KeyOne = Something");
            assert_eq!(
                tokens,
                vec![
                    Token::new(TokenType::Text, "KeyOne"),
                    Token::new(TokenType::KVSeparator, "="),
                    Token::new(TokenType::Text, "Something"),
                ]
            );
        }

        #[test]
        fn entry_with_empty_value_has_no_value_token() {
            let tokens = Lexer::tokens_from("KeyOne=\n");
            assert_eq!(
                tokens,
                vec![
                    Token::new(TokenType::Text, "KeyOne"),
                    Token::new(TokenType::KVSeparator, "="),
                    Token::new(TokenType::NL, "\n"),
                ]
            );
        }

        #[test]
        fn entry_with_blank_value_has_no_value_token() {
            let tokens = Lexer::tokens_from("KeyOne= \n");
            assert_eq!(
                tokens,
                vec![
                    Token::new(TokenType::Text, "KeyOne"),
                    Token::new(TokenType::KVSeparator, "="),
                    Token::new(TokenType::NL, "\n"),
                ]
            );
        }

        #[test]
        fn drops_whitespace_only_runs() {
            let tokens = Lexer::tokens_from("[sec] \r\n  \n\tk=v\r\n ");
            assert_eq!(
                tokens,
                vec![
                    Token::new(TokenType::SectionHeaderStart, "["),
                    Token::new(TokenType::Text, "sec"),
                    Token::new(TokenType::SectionHeaderEnd, "]"),
                    Token::new(TokenType::NL, "\n"),
                    Token::new(TokenType::NL, "\n"),
                    Token::new(TokenType::Text, "k"),
                    Token::new(TokenType::KVSeparator, "="),
                    Token::new(TokenType::Text, "v"),
                    Token::new(TokenType::NL, "\n"),
                ]
            );
        }

        #[test]
        fn with_whitespace_only_input_is_empty() {
            assert!(Lexer::tokens_from(" \t\r ").is_empty());
        }

        #[test]
        fn with_comments_succeeds() {
            let tokens = Lexer::tokens_from("; a comment\n");
            assert_eq!(
                tokens,
                vec![
                    Token::new(TokenType::Comment, ";"),
                    Token::new(TokenType::Text, "a comment"),
                    Token::new(TokenType::NL, "\n"),
                ]
            );
        }

        #[test]
        fn without_trailing_newline_keeps_last_token() {
            let tokens = Lexer::tokens_from("[a]\nk=v");
            assert_eq!(tokens.len(), 7);
            assert_eq!(tokens.last(), Some(&Token::new(TokenType::Text, "v")));
        }

        #[test]
        fn reserved_chars_inside_comments_are_still_tokens() {
            let tokens = Lexer::tokens_from(";a=b");
            let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
            assert_eq!(
                types,
                vec![
                    TokenType::Comment,
                    TokenType::Text,
                    TokenType::KVSeparator,
                    TokenType::Text,
                ]
            );
        }
    }

    mod is_ident {
        use super::*;

        #[test]
        fn text_is_ident() {
            assert!(Token::new(TokenType::Text, "key").is_ident());
        }

        #[test]
        fn empty_text_is_ident() {
            assert!(Token::new(TokenType::Text, "").is_ident());
        }

        #[test]
        fn reserved_tokens_are_not_idents() {
            for token in Lexer::new("[]=;\n") {
                assert!(!token.is_ident(), "{token:?} should not be an identifier");
            }
        }
    }
}
