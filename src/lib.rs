//! Reader for simple `*.ini` files: `[section]` headers, `key=value` entries
//! and `;` comments, one statement per line.

mod ini;

pub use self::ini::*;
