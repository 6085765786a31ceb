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
use std::fmt::Display;

use super::comment;
use super::declaration::{Declaration, Grammar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Entity,
    Component,
}

impl Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Entity => "entity",
                Self::Component => "component",
            }
        )
    }
}

/// The parsed interface of one entity or component declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleInfo {
    #[serde(rename = "identifier")]
    name: String,
    #[serde(rename = "unit")]
    kind: UnitKind,
    generics: Vec<Declaration>,
    ports: Vec<Declaration>,
}

impl ModuleInfo {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_kind(&self) -> UnitKind {
        self.kind
    }

    /// Accesses the generics in source declaration order.
    pub fn get_generics(&self) -> &[Declaration] {
        &self.generics
    }

    /// Accesses the ports in source declaration order.
    pub fn get_ports(&self) -> &[Declaration] {
        &self.ports
    }

    /// Checks if the module has no ports (the usual shape of a testbench).
    pub fn is_testbench(&self) -> bool {
        self.ports.is_empty()
    }
}

/// Puts each entry of a flat semicolon-separated clause body on its own
/// line, re-terminated, so a scan sees every declaration even when the
/// source packed several onto one line.
fn reflow_clause(body: &str) -> String {
    body.split(';')
        .map(|entry| format!("{};", entry.trim()))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Builds the search pattern for a unit block, matching either a literal
/// name or any name when `None`.
fn name_pattern(name: Option<&str>) -> String {
    match name {
        Some(n) => regex::escape(n),
        None => String::from(r"\w+"),
    }
}

/// Locates the first `entity`/`component` block matching `name` and parses
/// its generic and port clauses into an ordered interface.
///
/// Returns `None` when no unit block matches.
pub fn parse_unit(text: &str, name: Option<&str>) -> Option<ModuleInfo> {
    let clean = comment::strip(text);
    let re = Regex::new(&format!(
        r"(?ims)\b(?P<tag>entity|component)\s+(?P<name>{})\s+is\s+(?:generic\s*\(\s*(?P<generic>.*?)\)\s*;\s*)?(?:port\s*\(\s*(?P<port>.*?)\)\s*;)?\s*end\b.*?;",
        name_pattern(name)
    ))
    .unwrap();
    let caps = re.captures(&clean)?;

    let kind = match caps
        .name("tag")
        .unwrap()
        .as_str()
        .to_ascii_lowercase()
        .as_ref()
    {
        "component" => UnitKind::Component,
        _ => UnitKind::Entity,
    };
    let generics = match caps.name("generic") {
        Some(body) => Grammar::Generic.scan(&reflow_clause(body.as_str())),
        None => Vec::new(),
    };
    let ports = match caps.name("port") {
        Some(body) => Grammar::Port.scan(&reflow_clause(body.as_str())),
        None => Vec::new(),
    };

    Some(ModuleInfo {
        name: caps.name("name").unwrap().as_str().to_string(),
        kind: kind,
        generics: generics,
        ports: ports,
    })
}
