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

use regex::Regex;
use serde_derive::Serialize;

use super::comment;
use super::declaration::{Declaration, Grammar};

/// The declarative region of one architecture body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitectureInfo {
    #[serde(rename = "identifier")]
    entity: String,
    #[serde(rename = "architecture")]
    name: String,
    signals: Vec<Declaration>,
    constants: Vec<Declaration>,
    aliases: Vec<Declaration>,
}

impl ArchitectureInfo {
    /// Accesses the name of the entity this architecture implements.
    pub fn get_entity(&self) -> &str {
        &self.entity
    }

    /// Accesses the architecture's own label.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_signals(&self) -> &[Declaration] {
        &self.signals
    }

    pub fn get_constants(&self) -> &[Declaration] {
        &self.constants
    }

    pub fn get_aliases(&self) -> &[Declaration] {
        &self.aliases
    }
}

fn name_pattern(name: Option<&str>) -> String {
    match name {
        Some(n) => regex::escape(n),
        None => String::from(r"\w+"),
    }
}

/// Locates `architecture <arch> of <name> is ... begin` and scans the
/// declarative part for signal, constant, and alias declarations.
///
/// Returns `None` when no architecture header matches `name`.
pub fn parse_architecture_decls(text: &str, name: Option<&str>) -> Option<ArchitectureInfo> {
    let clean = comment::strip(text);
    let re = Regex::new(&format!(
        r"(?ims)^\s*architecture\s+(?P<arch>\w+)\s+of\s+(?P<name>{})\s+is(?P<decl>.*?)\bbegin\b",
        name_pattern(name)
    ))
    .unwrap();
    let caps = re.captures(&clean)?;
    let region = caps.name("decl").unwrap().as_str();

    Some(ArchitectureInfo {
        entity: caps.name("name").unwrap().as_str().to_string(),
        name: caps.name("arch").unwrap().as_str().to_string(),
        signals: Grammar::Signal.scan(region),
        constants: Grammar::Constant.scan(region),
        aliases: Grammar::Alias.scan(region),
    })
}
