//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use std::path::Path;
use std::str::FromStr;

use super::cache::FileCache;
use super::settings::{Settings, SETTINGS_FILE};
use crate::error::{Error, LastError};
use crate::util::anyerror::Fault;

/// Per-invocation service state: the effective settings and the parse cache.
///
/// One `Session` is constructed per program run (the editor-host equivalent
/// is one per window) and passed by reference to every operation; nothing in
/// the core lives in process-wide state.
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    cache: FileCache,
}

impl Session {
    pub fn new() -> Self {
        Self {
            settings: Settings::new(),
            cache: FileCache::new(),
        }
    }

    /// Creates a session with settings layered from `dir`'s settings file,
    /// when one exists.
    pub fn load(dir: &Path) -> Result<Self, Fault> {
        let mut session = Self::new();
        let file = dir.join(SETTINGS_FILE);
        if file.exists() == true {
            let text = std::fs::read_to_string(&file)?;
            let overrides = Settings::from_str(&text)
                .map_err(|e| Error::SettingsNotParsed(LastError(e.to_string())))?;
            session.configure(overrides);
        }
        Ok(session)
    }

    /// Applies `overrides` on top of the current settings; populated fields
    /// in `overrides` win.
    pub fn configure(&mut self, mut overrides: Settings) -> () {
        std::mem::swap(&mut self.settings, &mut overrides);
        self.settings.merge(Some(overrides));
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get_cache(&self) -> &FileCache {
        &self.cache
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_without_settings_file() {
        let dir = tempdir().unwrap();
        let session = Session::load(dir.path()).unwrap();
        assert_eq!(session.get_settings().get_hierarchy_max_depth(), 32);
    }

    #[test]
    fn load_with_settings_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "hierarchy-max-depth = 4").unwrap();
        let session = Session::load(dir.path()).unwrap();
        assert_eq!(session.get_settings().get_hierarchy_max_depth(), 4);
    }

    #[test]
    fn malformed_settings_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "autoconnect = [").unwrap();
        assert_eq!(Session::load(dir.path()).is_err(), true);
    }

    #[test]
    fn configure_layers_overrides() {
        let mut session = Session::new();
        let mut first = Settings::new();
        first.set_hierarchy_max_depth(8);
        first.set_autoconnect(true);
        session.configure(first);

        let mut second = Settings::new();
        second.set_hierarchy_max_depth(2);
        session.configure(second);

        assert_eq!(session.get_settings().get_hierarchy_max_depth(), 2);
        // fields untouched by the later call survive
        assert_eq!(session.get_settings().is_autoconnect(), true);
    }
}
