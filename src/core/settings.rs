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

use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;

/// Name of the optional settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "scry.toml";

/// Host-provided options, layered over the built-in defaults.
///
/// Every field is optional so that a partially filled settings file (or a
/// `configure` call carrying only the changed options) merges cleanly.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Settings {
    autoconnect: Option<bool>,
    #[serde(rename = "autoconnect-port-prefix")]
    autoconnect_port_prefix: Option<Vec<String>>,
    #[serde(rename = "autoconnect-port-suffix")]
    autoconnect_port_suffix: Option<Vec<String>>,
    #[serde(rename = "generic-fill")]
    generic_fill: Option<bool>,
    #[serde(rename = "hierarchy-max-depth")]
    hierarchy_max_depth: Option<usize>,
    #[serde(rename = "tab-size")]
    tab_size: Option<u8>,
    #[serde(rename = "instance-name")]
    instance_name: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            autoconnect: None,
            autoconnect_port_prefix: None,
            autoconnect_port_suffix: None,
            generic_fill: None,
            hierarchy_max_depth: None,
            tab_size: None,
            instance_name: None,
        }
    }

    pub fn is_autoconnect(&self) -> bool {
        self.autoconnect.unwrap_or(false)
    }

    pub fn get_autoconnect_port_prefix(&self) -> &[String] {
        self.autoconnect_port_prefix.as_deref().unwrap_or(&[])
    }

    pub fn get_autoconnect_port_suffix(&self) -> &[String] {
        self.autoconnect_port_suffix.as_deref().unwrap_or(&[])
    }

    pub fn is_generic_fill(&self) -> bool {
        self.generic_fill.unwrap_or(false)
    }

    /// Bounds recursive hierarchy expansion; guards cyclic designs.
    pub fn get_hierarchy_max_depth(&self) -> usize {
        self.hierarchy_max_depth.unwrap_or(32)
    }

    pub fn get_tab_size(&self) -> u8 {
        self.tab_size.unwrap_or(2)
    }

    pub fn get_instance_name(&self) -> &str {
        self.instance_name.as_deref().unwrap_or("uX")
    }

    pub fn set_autoconnect(&mut self, on: bool) -> () {
        self.autoconnect = Some(on);
    }

    pub fn set_autoconnect_port_prefix(&mut self, prefixes: Vec<String>) -> () {
        self.autoconnect_port_prefix = Some(prefixes);
    }

    pub fn set_autoconnect_port_suffix(&mut self, suffixes: Vec<String>) -> () {
        self.autoconnect_port_suffix = Some(suffixes);
    }

    pub fn set_generic_fill(&mut self, on: bool) -> () {
        self.generic_fill = Some(on);
    }

    pub fn set_hierarchy_max_depth(&mut self, depth: usize) -> () {
        self.hierarchy_max_depth = Some(depth);
    }

    /// Merges any populated data from `rhs` into attributes that do not
    /// already have data defined in `self`.
    pub fn merge(&mut self, rhs: Option<Self>) -> () {
        if let Some(rhs) = rhs {
            if self.autoconnect.is_some() == false {
                self.autoconnect = rhs.autoconnect
            }
            if self.autoconnect_port_prefix.is_some() == false {
                self.autoconnect_port_prefix = rhs.autoconnect_port_prefix
            }
            if self.autoconnect_port_suffix.is_some() == false {
                self.autoconnect_port_suffix = rhs.autoconnect_port_suffix
            }
            if self.generic_fill.is_some() == false {
                self.generic_fill = rhs.generic_fill
            }
            if self.hierarchy_max_depth.is_some() == false {
                self.hierarchy_max_depth = rhs.hierarchy_max_depth
            }
            if self.tab_size.is_some() == false {
                self.tab_size = rhs.tab_size
            }
            if self.instance_name.is_some() == false {
                self.instance_name = rhs.instance_name
            }
        }
    }
}

impl FromStr for Settings {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::new();
        assert_eq!(s.is_autoconnect(), false);
        assert_eq!(s.is_generic_fill(), false);
        assert_eq!(s.get_hierarchy_max_depth(), 32);
        assert_eq!(s.get_tab_size(), 2);
        assert_eq!(s.get_instance_name(), "uX");
        assert_eq!(s.get_autoconnect_port_prefix().is_empty(), true);
    }

    #[test]
    fn from_toml() {
        let s = Settings::from_str(
            "\
autoconnect = true
autoconnect-port-suffix = [\"_i\", \"_o\"]
hierarchy-max-depth = 8
",
        )
        .unwrap();
        assert_eq!(s.is_autoconnect(), true);
        assert_eq!(s.get_autoconnect_port_suffix(), &["_i", "_o"]);
        assert_eq!(s.get_hierarchy_max_depth(), 8);
        // untouched fields keep their defaults
        assert_eq!(s.get_tab_size(), 2);
    }

    #[test]
    fn merge_fills_only_missing() {
        let mut overrides = Settings::from_str("tab-size = 4").unwrap();
        let base = Settings::from_str("tab-size = 8\ninstance-name = \"i0\"").unwrap();
        overrides.merge(Some(base));
        assert_eq!(overrides.get_tab_size(), 4);
        assert_eq!(overrides.get_instance_name(), "i0");
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert_eq!(Settings::from_str("autoconnect = [").is_err(), true);
    }
}
