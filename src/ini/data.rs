use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::io;
use std::ops::{Index, IndexMut};

use super::parser::lexer::Lexer;
use super::parser::{ParseError, Parser};
use super::{EntryKey, EntryValue, SectionKey};

/// Key/value pairs of one section. Keys are unique, the last assignment wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entries {
    data: BTreeMap<EntryKey, EntryValue>,
}

static EMPTY_ENTRIES: Entries = Entries::new();

impl Entries {
    pub const fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Returns the previous value of `key`
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<EntryValue>
    where
        K: Into<EntryKey>,
        V: Into<EntryValue>,
    {
        self.data.insert(key.into(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remove(&mut self, key: &str) -> Option<EntryValue> {
        self.data.remove(key)
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = (&'a EntryKey, &'a EntryValue);
    type IntoIter = btree_map::Iter<'a, EntryKey, EntryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Parsed contents of one or more INI sources: section -> key -> value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IniData {
    sections: BTreeMap<SectionKey, Entries>,
}

impl IniData {
    /// Sets `key=value` in `section`, creating the section if necessary
    pub fn add<S, K, V>(&mut self, section: S, key: K, value: V)
    where
        S: Into<SectionKey>,
        K: Into<EntryKey>,
        V: Into<EntryValue>,
    {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key, value);
    }

    /// Drops all sections
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|e| e.contains_key(key))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over all `(section, key, value)` triples, ordered by section and key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.sections.iter().flat_map(|(section, entries)| {
            entries
                .iter()
                .map(move |(key, value)| (section.as_str(), key, value))
        })
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Load from a string
    pub fn load_from_str(data: &str) -> Result<Self, ParseError> {
        let mut ini = Self::new();
        ini.parse_str("", data)?;

        Ok(ini)
    }

    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section).and_then(|e| e.get(key))
    }

    /// Copies all entries from `other`, overwriting existing keys
    pub fn merge_from(&mut self, other: &IniData) {
        for (section, key, value) in other.iter() {
            self.add(section, key, value);
        }
    }

    pub fn new() -> Self {
        Self {
            sections: BTreeMap::new(),
        }
    }

    /// Parses `data` and adds its entries to the ones already present.
    /// `file_name` is only used for error messages.
    pub fn parse_str(&mut self, file_name: &str, data: &str) -> Result<(), ParseError> {
        let tokens = Lexer::tokens_from(data);
        log::debug!("parsing {} tokens from {file_name:?}", tokens.len());

        Parser::new(file_name, &tokens).parse_into(self)
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Entries> {
        self.sections.remove(name)
    }

    pub fn section(&self, name: &str) -> Option<&Entries> {
        self.sections.get(name)
    }

    /// Like `section()`, but creates an empty section if it doesn't exist yet
    pub fn section_mut<S: Into<SectionKey>>(&mut self, name: S) -> &mut Entries {
        self.sections.entry(name.into()).or_default()
    }

    pub fn sections(&self) -> impl DoubleEndedIterator<Item = (&str, &Entries)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Writes the data back in INI syntax. Entries of the unnamed section come
    /// first, without a section header.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(entries) = self.sections.get("") {
            for (k, v) in entries {
                writeln!(writer, "{}={}", k, v)?;
            }
            writeln!(writer)?;
        }

        for (section, entries) in self.sections.iter().filter(|(s, _)| !s.is_empty()) {
            writeln!(writer, "[{}]", section)?;
            for (k, v) in entries {
                writeln!(writer, "{}={}", k, v)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

impl Index<&str> for IniData {
    type Output = Entries;

    /// Unknown sections yield an empty `Entries`
    fn index(&self, section: &str) -> &Self::Output {
        self.sections.get(section).unwrap_or(&EMPTY_ENTRIES)
    }
}

impl IndexMut<&str> for IniData {
    fn index_mut(&mut self, section: &str) -> &mut Self::Output {
        self.section_mut(section)
    }
}

/// One `[section][key]=value` line per entry
impl fmt::Display for IniData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, key, value) in self.iter() {
            writeln!(f, "[{section}][{key}]={value}")?;
        }

        Ok(())
    }
}
