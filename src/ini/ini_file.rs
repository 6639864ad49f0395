use std::fs::File;
use std::io::Read;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use super::data::IniData;
use super::Error;

/// An INI file on disk together with the data read from it.
#[derive(Debug, Default, PartialEq)]
pub struct IniFile {
    pub(crate) path: PathBuf,
    data: IniData,
}

impl Deref for IniFile {
    type Target = IniData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for IniFile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl IniFile {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut ini_file = IniFile::new(path);
        ini_file.read()?;

        Ok(ini_file)
    }

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        IniFile {
            path: path.as_ref().into(),
            data: IniData::new(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the file and adds its entries to the ones already present.
    /// Use `clear()` first to start from scratch.
    pub fn read(&mut self) -> Result<(), Error> {
        let buf = self.read_bytes()?;
        let content = String::from_utf8_lossy(&buf);

        self.data.parse_str(&self.path.to_string_lossy(), &content)?;

        Ok(())
    }

    fn read_bytes(&self) -> Result<Vec<u8>, Error> {
        let not_found = |e: std::io::Error| {
            log::debug!("cannot read {:?}: {e}", self.path);
            Error::FileNotFound(self.path.clone())
        };

        let mut file = File::open(&self.path).map_err(not_found)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(not_found)?;

        Ok(buf)
    }
}
