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

use indexmap::IndexMap;

use super::architecture;
use super::declaration::{squeeze, DeclKind, Declaration};
use super::unit::{self, ModuleInfo};
use crate::core::settings::Settings;

/// The result of matching an instance's ports against the destination
/// architecture's local signals and ports.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPlan {
    /// port name -> local signal/port to bind
    bindings: IndexMap<String, String>,
    /// declarations to add for ports with no local match
    new_declarations: Vec<String>,
    /// port name -> reason the match is suspicious
    warnings: IndexMap<String, String>,
}

impl ConnectionPlan {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
            new_declarations: Vec::new(),
            warnings: IndexMap::new(),
        }
    }

    pub fn get_bindings(&self) -> &IndexMap<String, String> {
        &self.bindings
    }

    pub fn get_new_declarations(&self) -> &[String] {
        &self.new_declarations
    }

    pub fn get_warnings(&self) -> &IndexMap<String, String> {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Verifies an existing local object is shape-compatible with the port it
/// would be bound to.
fn check_connect(port: &Declaration, local: &Declaration) -> Option<String> {
    if local.get_kind() == DeclKind::Port && local.get_direction() != port.get_direction() {
        return Some(String::from("incompatible port direction"));
    }
    let pt = port.get_type().map(|t| squeeze(t).to_ascii_lowercase());
    let lt = local.get_type().map(|t| squeeze(t).to_ascii_lowercase());
    if pt != lt {
        return Some(format!(
            "signal/port not matching: \"{}\" vs \"{}\"",
            port.get_decl(),
            local.get_decl()
        ));
    }
    None
}

/// Strips the first matching prefix and the first matching suffix from a
/// port name before looking for a local counterpart.
fn base_name(name: &str, prefixes: &[String], suffixes: &[String]) -> String {
    let mut base = name;
    for p in prefixes {
        if base.starts_with(p.as_str()) == true {
            base = &base[p.len()..];
            break;
        }
    }
    for s in suffixes {
        if base.ends_with(s.as_str()) == true {
            base = &base[..base.len() - s.len()];
            break;
        }
    }
    base.to_string()
}

/// Plans the connection of `module`'s ports to the signals and ports already
/// declared in `dest_text` (the file receiving the instantiation).
///
/// Ports with no local counterpart receive a fresh signal declaration named
/// after the stripped port name. All matching is by name; shape mismatches
/// are reported as warnings, never errors.
pub fn autoconnect(module: &ModuleInfo, dest_text: &str, settings: &Settings) -> ConnectionPlan {
    let mut plan = ConnectionPlan::new();
    if settings.is_autoconnect() == false || module.get_ports().is_empty() == true {
        return plan;
    }
    let prefixes = settings.get_autoconnect_port_prefix();
    let suffixes = settings.get_autoconnect_port_suffix();

    // gather the destination's own ports and signals into one lookup
    let mut locals: IndexMap<String, Declaration> = IndexMap::new();
    if let Some(dest) = unit::parse_unit(dest_text, None) {
        for p in dest.get_ports() {
            locals.insert(p.get_name().to_string(), p.clone());
        }
    }
    if let Some(arch) = architecture::parse_architecture_decls(dest_text, None) {
        for s in arch.get_signals() {
            locals.insert(s.get_name().to_string(), s.clone());
        }
    }

    for port in module.get_ports() {
        let pname = base_name(port.get_name(), prefixes, suffixes);
        match locals.get(&pname) {
            Some(local) => {
                if let Some(warn) = check_connect(port, local) {
                    plan.warnings.insert(port.get_name().to_string(), warn);
                }
            }
            None => {
                plan.new_declarations.push(format!(
                    "signal {} : {};",
                    pname,
                    port.get_type().unwrap_or("")
                ));
            }
        }
        plan.bindings
            .insert(port.get_name().to_string(), pname);
    }
    plan
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::vhdl::unit::parse_unit;

    const SUB: &str = "\
entity sub is
  port (
    clk   : in  std_logic;
    arm_i : in  std_logic;
    fire  : out std_logic
  );
end entity;";

    const DEST: &str = "\
entity top is
  port (clk : in std_logic);
end entity;
architecture rtl of top is
  signal arm : std_logic;
begin
end rtl;";

    fn settings_with_autoconnect() -> Settings {
        let mut s = Settings::new();
        s.set_autoconnect(true);
        s.set_autoconnect_port_prefix(vec![]);
        s.set_autoconnect_port_suffix(vec![String::from("_i")]);
        s
    }

    #[test]
    fn binds_by_stripped_name() {
        let module = parse_unit(SUB, Some("sub")).unwrap();
        let plan = autoconnect(&module, DEST, &settings_with_autoconnect());
        assert_eq!(plan.get_bindings().get("clk"), Some(&String::from("clk")));
        // suffix `_i` stripped before the local lookup
        assert_eq!(plan.get_bindings().get("arm_i"), Some(&String::from("arm")));
        assert_eq!(plan.get_warnings().contains_key("arm_i"), false);
    }

    #[test]
    fn missing_local_generates_declaration() {
        let module = parse_unit(SUB, Some("sub")).unwrap();
        let plan = autoconnect(&module, DEST, &settings_with_autoconnect());
        assert_eq!(plan.get_new_declarations(), &["signal fire : std_logic;"]);
        assert_eq!(plan.get_bindings().get("fire"), Some(&String::from("fire")));
    }

    #[test]
    fn direction_clash_warns() {
        let dest = "\
entity top is
  port (fire : in std_logic);
end entity;
architecture rtl of top is
begin
end rtl;";
        let module = parse_unit(SUB, Some("sub")).unwrap();
        let mut settings = settings_with_autoconnect();
        settings.set_autoconnect_port_suffix(vec![]);
        let plan = autoconnect(&module, dest, &settings);
        // instance drives `fire` out, local port is an input of the design
        assert_eq!(
            plan.get_warnings().get("fire"),
            Some(&String::from("incompatible port direction"))
        );
    }

    #[test]
    fn type_mismatch_warns() {
        let dest = "\
architecture rtl of top is
  signal arm : std_ulogic;
begin
end rtl;";
        let module = parse_unit(SUB, Some("sub")).unwrap();
        let plan = autoconnect(&module, dest, &settings_with_autoconnect());
        assert_eq!(plan.get_warnings().contains_key("arm_i"), true);
    }

    #[test]
    fn disabled_autoconnect_is_empty() {
        let module = parse_unit(SUB, Some("sub")).unwrap();
        let plan = autoconnect(&module, DEST, &Settings::new());
        assert_eq!(plan.is_empty(), true);
    }
}
