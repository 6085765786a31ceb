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

use glob::Pattern;
use ignore::WalkBuilder;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::vhdl::comment;

/// The host-supplied symbol lookup: an ordered list of candidate files that
/// may define the named design unit.
///
/// The parser core only consumes this boundary; building and refreshing the
/// index is the host's concern.
pub trait SymbolIndex {
    fn candidates(&self, name: &str) -> Vec<PathBuf>;
}

/// Checks against file patterns if the file is a vhdl file.
pub fn is_vhdl(file: &str) -> bool {
    let match_opts = glob::MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let p1 = Pattern::new("*.vhd").unwrap();
    let p2 = Pattern::new("*.vhdl").unwrap();
    let p3 = Pattern::new("*.vho").unwrap();

    p1.matches_with(file, match_opts) == true
        || p2.matches_with(file, match_opts) == true
        || p3.matches_with(file, match_opts) == true
}

/// A one-shot index of the design units declared under a project directory.
#[derive(Debug)]
pub struct ProjectIndex {
    files: Vec<PathBuf>,
    /// lowercased unit name -> files mentioning it in a unit header
    units: HashMap<String, Vec<PathBuf>>,
    /// entity names as written, in discovery order, deduplicated
    entities: Vec<String>,
}

impl ProjectIndex {
    /// Walks `root` for VHDL files and records which design units each file
    /// declares (entity, component, architecture, and type headers all
    /// count).
    ///
    /// Unreadable files are skipped; the walk continues.
    pub fn scan(root: &Path) -> Self {
        let unit_header = Regex::new(r"(?im)^\s*(?:entity|component)\s+(?P<name>\w+)\b").unwrap();
        let arch_header =
            Regex::new(r"(?im)^\s*architecture\s+\w+\s+of\s+(?P<name>\w+)\b").unwrap();
        let type_header = Regex::new(r"(?im)^\s*(?:sub)?type\s+(?P<name>\w+)\s+is\b").unwrap();
        let entity_header = Regex::new(r"(?im)^\s*entity\s+(?P<name>\w+)\s+is\b").unwrap();

        let mut files = Vec::new();
        let mut units: HashMap<String, Vec<PathBuf>> = HashMap::new();
        let mut entities: Vec<String> = Vec::new();

        let walker = WalkBuilder::new(root).build();
        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() == false {
                continue;
            }
            if is_vhdl(&path.to_string_lossy()) == false {
                continue;
            }
            let text = match std::fs::read_to_string(path) {
                Ok(t) => comment::strip(&t),
                Err(_) => continue,
            };
            let mut mentioned = false;
            for caps in unit_header
                .captures_iter(&text)
                .chain(arch_header.captures_iter(&text))
                .chain(type_header.captures_iter(&text))
            {
                mentioned = true;
                let slot = units
                    .entry(caps.name("name").unwrap().as_str().to_ascii_lowercase())
                    .or_default();
                if slot.iter().any(|f| f == path) == false {
                    slot.push(path.to_path_buf());
                }
            }
            for caps in entity_header.captures_iter(&text) {
                let name = caps.name("name").unwrap().as_str();
                if entities.iter().any(|e| e.eq_ignore_ascii_case(name)) == false {
                    entities.push(name.to_string());
                }
            }
            if mentioned == true {
                files.push(path.to_path_buf());
            }
        }
        Self {
            files: files,
            units: units,
            entities: entities,
        }
    }

    /// Accesses every indexed file.
    pub fn get_files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Accesses the entity names found, in discovery order.
    pub fn get_entities(&self) -> &[String] {
        &self.entities
    }
}

impl SymbolIndex for ProjectIndex {
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        self.units
            .get(&name.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}
