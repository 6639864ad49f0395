pub(crate) mod lexer;

use self::lexer::{Token, TokenType};
use super::IniData;

type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("Syntax error on file \"{file}\" at line {line}.\n...{context}...")]
pub struct ParseError {
    pub(crate) file: String,
    pub(crate) line: usize,
    pub(crate) context: String,
}

impl ParseError {
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

// Names are carried along until the production that uses them is complete.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State<'a> {
    // STATEMENT      = SECTION_HEADER | ENTRY | COMMENT | NL
    StatementStart,
    // SECTION_HEADER = '[' TEXT ']'
    SectionName,
    SectionEnd { name: &'a str },
    // ENTRY          = TEXT '=' [TEXT] NL
    KVSeparator { key: &'a str },
    Value { key: &'a str },
    // COMMENT        = ';' TEXT
    Comment,
}

#[derive(Debug)]
pub struct Parser<'a> {
    file_name: &'a str,
    tokens: &'a [Token<'a>],
    state: State<'a>,
    section: &'a str,
    line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(file_name: &'a str, tokens: &'a [Token<'a>]) -> Self {
        Self {
            file_name,
            tokens,
            state: State::StatementStart,
            section: "",
            line: 1,
        }
    }

    /// Validates the token stream and adds every recognized entry to `data`.
    ///
    /// Entries are committed as soon as they are complete, so on error `data`
    /// keeps everything that was recognized before the offending token.
    pub fn parse_into(&mut self, data: &mut IniData) -> ParseResult<()> {
        let tokens = self.tokens;

        for (pos, token) in tokens.iter().enumerate() {
            self.state = match self.step(token, data) {
                Some(state) => state,
                None => return Err(self.error_at(pos)),
            };
        }

        if self.state != State::StatementStart {
            return Err(self.error_at_eof());
        }

        Ok(())
    }

    fn step(&mut self, token: &Token<'a>, data: &mut IniData) -> Option<State<'a>> {
        let next = match (self.state, token.token_type) {
            (State::StatementStart, TokenType::SectionHeaderStart) => State::SectionName,
            (State::StatementStart, _) if token.is_ident() => State::KVSeparator {
                key: token.content,
            },
            (State::StatementStart, TokenType::Comment) => State::Comment,
            (State::StatementStart, TokenType::NL) => {
                self.line += 1;
                State::StatementStart
            }

            (State::SectionName, _) if token.is_ident() => State::SectionEnd {
                name: token.content,
            },
            (State::SectionEnd { name }, TokenType::SectionHeaderEnd) => {
                log::trace!("line {}: entering section {name:?}", self.line);
                self.section = name;
                State::StatementStart
            }

            (State::KVSeparator { key }, TokenType::KVSeparator) => State::Value { key },
            (State::Value { key }, _) if token.is_ident() => {
                self.commit(data, key, token.content);
                State::StatementStart
            }
            (State::Value { key }, TokenType::NL) => {
                self.commit(data, key, "");
                self.line += 1;
                State::StatementStart
            }

            (State::Comment, _) if token.is_ident() => State::StatementStart,

            _ => return None,
        };

        Some(next)
    }

    fn commit(&self, data: &mut IniData, key: &str, value: &str) {
        log::trace!("line {}: [{}][{key}]={value}", self.line, self.section);
        data.add(self.section, key, value);
    }

    #[cold]
    fn error_at(&self, pos: usize) -> ParseError {
        let prev = pos.checked_sub(1).map_or("", |i| self.tokens[i].content);
        let next = self.tokens.get(pos + 1).map_or("", |t| t.content);

        self.error(format!(
            "{prev} ->{}<- {next}",
            display_token(&self.tokens[pos])
        ))
    }

    #[cold]
    fn error_at_eof(&self) -> ParseError {
        let len = self.tokens.len();
        let prev = len.checked_sub(2).map_or("", |i| self.tokens[i].content);
        let last = self.tokens.last().map_or("", display_token);

        self.error(format!("{prev} ->{last}<- EOF"))
    }

    fn error(&self, context: String) -> ParseError {
        ParseError {
            file: self.file_name.to_owned(),
            line: self.line,
            context,
        }
    }
}

fn display_token<'t>(token: &Token<'t>) -> &'t str {
    match token.token_type {
        TokenType::NL => "LF",
        _ => token.content,
    }
}
