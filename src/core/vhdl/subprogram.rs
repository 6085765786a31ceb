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
use regex::{Captures, Regex};
use serde_derive::Serialize;
use std::str::FromStr;

use super::comment;
use super::declaration::{squeeze, DeclKind, Declaration, PortDir};

/// The interface of one function or procedure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subprogram {
    #[serde(rename = "identifier")]
    name: String,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    return_type: Option<String>,
    args: Vec<Declaration>,
}

impl Subprogram {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn get_args(&self) -> &[Declaration] {
        &self.args
    }
}

/// Parses a captured parameter list with the argument grammar: an optional
/// `signal|variable|constant` class, an identifier list, an optional
/// direction, and the type.
fn parse_args(text: Option<&str>) -> Vec<Declaration> {
    let text = match text {
        Some(t) => t,
        None => return Vec::new(),
    };
    let arg = Regex::new(
        r"(?is)^\s*(?:(?P<class>signal|variable|constant)\s+)?(?P<name>\w+(?:\s*,[\s\w,]*)?)\s*:\s*(?:(?P<dir>in|out|inout)\s+)?(?P<type>.+)$",
    )
    .unwrap();
    let mut args = Vec::new();
    for chunk in text.split(';') {
        let caps: Captures = match arg.captures(chunk.trim()) {
            Some(c) => c,
            None => continue,
        };
        let kind = match caps.name("class").map(|m| m.as_str().to_ascii_lowercase()) {
            Some(c) => match c.as_ref() {
                "signal" => DeclKind::Signal,
                "constant" => DeclKind::Constant,
                _ => DeclKind::Variable,
            },
            None => DeclKind::Variable,
        };
        let dir = caps
            .name("dir")
            .and_then(|m| PortDir::from_str(m.as_str()).ok());
        let dtype = squeeze(caps.name("type").unwrap().as_str());
        let list_text = caps.name("name").unwrap().as_str();
        let whole = caps.get(0).unwrap().as_str();
        for name in list_text.split(',').map(|n| n.trim()) {
            if name.is_empty() == true {
                continue;
            }
            args.push(
                Declaration::new(
                    name.to_string(),
                    kind,
                    squeeze(&whole.trim().replacen(list_text, name, 1)),
                )
                .dtype(Some(dtype.clone()))
                .direction(dir),
            );
        }
    }
    args
}

/// Collects every function declared in `text`, keyed by name.
///
/// The first occurrence of a name wins; later re-declarations and overloads
/// are ignored.
pub fn list_functions(text: &str) -> IndexMap<String, Subprogram> {
    let clean = comment::strip(text);
    let re = Regex::new(
        r"(?is)\bfunction\s+(?P<name>\w+)\s*(?:\(\s*(?P<args>.*?)\s*\))?\s*return\s+(?P<ret>[\w.]+(?:\s*\([\w\s,]*\))?)\s*(?:\bis\b|;)",
    )
    .unwrap();
    let mut found = IndexMap::new();
    for caps in re.captures_iter(&clean) {
        let name = caps.name("name").unwrap().as_str().to_string();
        found.entry(name.clone()).or_insert_with(|| Subprogram {
            name: name,
            return_type: Some(squeeze(caps.name("ret").unwrap().as_str())),
            args: parse_args(caps.name("args").map(|m| m.as_str())),
        });
    }
    found
}

/// Collects every procedure declared in `text`, keyed by name; first
/// occurrence wins.
pub fn list_procedures(text: &str) -> IndexMap<String, Subprogram> {
    let clean = comment::strip(text);
    let re = Regex::new(
        r"(?is)\bprocedure\s+(?P<name>\w+)\s*(?:\(\s*(?P<args>.*?)\s*\))?\s*(?:\bis\b|;)",
    )
    .unwrap();
    let mut found = IndexMap::new();
    for caps in re.captures_iter(&clean) {
        let name = caps.name("name").unwrap().as_str().to_string();
        found.entry(name.clone()).or_insert_with(|| Subprogram {
            name: name,
            return_type: None,
            args: parse_args(caps.name("args").map(|m| m.as_str())),
        });
    }
    found
}

/// Collects the labels of every labeled process in `text`, in source order.
pub fn list_processes(text: &str) -> Vec<String> {
    let clean = comment::strip(text);
    let re = Regex::new(r"(?im)^\s*(?P<label>\w+)\s*:\s*(?:postponed\s+)?process\b").unwrap();
    re.captures_iter(&clean)
        .map(|caps| caps.name("label").unwrap().as_str().to_string())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn function_with_args_and_return() {
        let text = "\
function crc8(d : std_logic_vector; constant init : in std_logic_vector) return std_logic_vector is
begin
end function;";
        let funcs = list_functions(text);
        assert_eq!(funcs.len(), 1);
        let f = funcs.get("crc8").unwrap();
        assert_eq!(f.get_return_type(), Some("std_logic_vector"));
        assert_eq!(f.get_args().len(), 2);
        assert_eq!(f.get_args()[0].get_name(), "d");
        assert_eq!(f.get_args()[1].get_kind(), DeclKind::Constant);
        assert_eq!(f.get_args()[1].get_direction(), Some(PortDir::In));
    }

    #[test]
    fn function_without_args() {
        let funcs = list_functions("function zero return natural;");
        assert_eq!(funcs.get("zero").unwrap().get_args().is_empty(), true);
        assert_eq!(funcs.get("zero").unwrap().get_return_type(), Some("natural"));
    }

    #[test]
    fn first_declaration_wins() {
        let text = "\
function f(a : bit) return bit;
function f(a : bit; b : bit) return bit;";
        let funcs = list_functions(text);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs.get("f").unwrap().get_args().len(), 1);
    }

    #[test]
    fn procedure_with_directions() {
        let text = "procedure push(signal q : inout queue_t; variable ok : out boolean);";
        let procs = list_procedures(text);
        let p = procs.get("push").unwrap();
        assert_eq!(p.get_return_type(), None);
        assert_eq!(p.get_args().len(), 2);
        assert_eq!(p.get_args()[0].get_kind(), DeclKind::Signal);
        assert_eq!(p.get_args()[0].get_direction(), Some(PortDir::Inout));
        assert_eq!(p.get_args()[1].get_direction(), Some(PortDir::Out));
    }

    #[test]
    fn argument_identifier_list() {
        let procs = list_procedures("procedure swap(a, b : inout integer);");
        let p = procs.get("swap").unwrap();
        assert_eq!(
            p.get_args().iter().map(|a| a.get_name()).collect::<Vec<&str>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn process_labels_in_order() {
        let text = "\
architecture rtl of top is
begin
  p_sync : process (clk)
  begin
  end process;
  unlabeled : bit; -- not a process
  p_comb : process (all)
  begin
  end process;
end rtl;";
        assert_eq!(list_processes(text), vec!["p_sync", "p_comb"]);
    }

    #[test]
    fn commented_subprograms_are_ignored() {
        let text = "-- function ghost return bit;\nfunction real_fn return bit;";
        let funcs = list_functions(text);
        assert_eq!(funcs.contains_key("ghost"), false);
        assert_eq!(funcs.contains_key("real_fn"), true);
    }
}
