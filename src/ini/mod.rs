mod data;
mod ini_file;
pub(crate) mod parser;

pub use self::data::{Entries, IniData};
pub use self::ini_file::IniFile;
pub use self::parser::lexer::{Lexer, Token, TokenType};
pub use self::parser::{ParseError, Parser};

use std::path::PathBuf;

pub(crate) const SECTION_HEADER_START: char = '[';
pub(crate) const SECTION_HEADER_END: char = ']';
pub(crate) const KV_SEPARATOR: char = '=';
pub(crate) const COMMENT: char = ';';
pub(crate) const NL: char = '\n';

pub(crate) const TRIMMED_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

pub(crate) fn is_reserved(c: char) -> bool {
    matches!(
        c,
        SECTION_HEADER_START | SECTION_HEADER_END | KV_SEPARATOR | COMMENT | NL
    )
}

pub(crate) type SectionKey = String;
pub(crate) type EntryKey = String;
pub(crate) type EntryValue = String;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("could not open file {0:?}")]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Syntax(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    mod is_reserved {
        use super::*;

        #[test]
        fn structural_chars_are_reserved() {
            for c in ['[', ']', '=', ';', '\n'] {
                assert!(is_reserved(c), "{c:?} should be reserved");
            }
        }

        #[test]
        fn whitespace_and_text_are_not_reserved() {
            for c in [' ', '\t', '\r', 'a', '#', '"', '\\'] {
                assert!(!is_reserved(c), "{c:?} should not be reserved");
            }
        }
    }

    mod error {
        use super::*;

        #[test]
        fn file_not_found_names_the_path() {
            let e = Error::FileNotFound(PathBuf::from("/does/not/exist.ini"));
            assert_eq!(e.to_string(), "could not open file \"/does/not/exist.ini\"");
        }
    }
}
