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

/// A single instantiation statement found inside an architecture body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceRef {
    label: String,
    unit: String,
}

impl InstanceRef {
    pub fn new(label: String, unit: String) -> Self {
        Self {
            label: label,
            unit: unit,
        }
    }

    /// Accesses the instance's label (left of the colon).
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// Accesses the name of the referenced design unit.
    pub fn get_unit(&self) -> &str {
        &self.unit
    }
}

/// Erases function and procedure bodies so their `end` terminators cannot be
/// mistaken for the architecture's own.
///
/// The subprogram's closing pattern names its keyword or its identifier, so
/// each removal is a two-stage match: capture the header, then search for an
/// end built from the captured literals.
fn remove_subprograms(text: &str) -> String {
    let header = Regex::new(r"(?i)\b(?P<tag>function|procedure)\s+(?P<name>\w+)").unwrap();
    let mut result = String::from(text);
    loop {
        let (start, stop, name) = match header.captures(&result) {
            Some(caps) => {
                let m = caps.get(0).unwrap();
                (m.start(), m.end(), caps.name("name").unwrap().as_str().to_string())
            }
            None => break,
        };
        let ending = Regex::new(&format!(
            r"(?i)\bend(?:\s+function\b|\s+procedure\b|\s+{}\b|\s*;)",
            regex::escape(&name)
        ))
        .unwrap();
        let close = ending.find(&result[stop..]).map(|e| e.end());
        match close {
            Some(e) => result.replace_range(start..stop + e, ""),
            // no terminator: a prototype or a subprogram still being typed;
            // nothing left to erase
            None => break,
        }
    }
    result
}

fn name_pattern(name: Option<&str>) -> String {
    match name {
        Some(n) => regex::escape(n),
        None => String::from(r"\w+"),
    }
}

/// Lists the instantiation statements inside the architecture body for
/// `name`.
///
/// Returns `None` when the architecture itself is not found, which is
/// distinct from `Some` of an empty list ("found but instantiates nothing");
/// hierarchy construction uses the difference to classify leaf components.
pub fn list_instances(text: &str, name: Option<&str>) -> Option<Vec<InstanceRef>> {
    let clean = remove_subprograms(&comment::strip(text));
    // stage one: the architecture header gives us the label to close on
    let header = Regex::new(&format!(
        r"(?im)^\s*architecture\s+(?P<arch>\w+)\s+of\s+{}\s+is\b",
        name_pattern(name)
    ))
    .unwrap();
    let caps = header.captures(&clean)?;
    let arch = caps.name("arch").unwrap().as_str();
    let head = caps.get(0).unwrap();
    // stage two: bound the body by `end architecture`, `end <label>`, or a
    // bare `end;`
    let ending = Regex::new(&format!(
        r"(?i)\bend(?:\s+architecture\b|\s+{}\b|\s*;)",
        regex::escape(arch)
    ))
    .unwrap();
    let body = match ending.find(&clean[head.end()..]) {
        Some(e) => &clean[head.end()..head.end() + e.start()],
        None => return None,
    };

    let mut instances = Vec::new();
    // a statement may open at a line start or right after `begin`/`;`
    let direct = Regex::new(
        r"(?im)(?:^|\bbegin\b|;)\s*(?P<label>\w+)\s*:\s*entity\s+(?:\w+\.)?(?P<unit>\w+)\b",
    )
    .unwrap();
    for caps in direct.captures_iter(body) {
        instances.push(InstanceRef::new(
            caps.name("label").unwrap().as_str().to_string(),
            caps.name("unit").unwrap().as_str().to_string(),
        ));
    }
    // component or direct-name instantiation followed by a map aspect:
    // `label : [lib.]unit [(arch)] generic|port map`
    let mapped = Regex::new(
        r"(?im)(?:^|\bbegin\b|;)\s*(?P<label>\w+)\s*:\s*(?:\w+\.)?(?P<unit>\w+)\s*(?:\(\s*\w+\s*\))?\s+(?:generic|port)\s+map\b",
    )
    .unwrap();
    for caps in mapped.captures_iter(body) {
        instances.push(InstanceRef::new(
            caps.name("label").unwrap().as_str().to_string(),
            caps.name("unit").unwrap().as_str().to_string(),
        ));
    }
    Some(instances)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn direct_entity_instantiation() {
        let text = "architecture rtl of top is begin u1: entity work.sub port map(x=>y); end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_label(), "u1");
        assert_eq!(found[0].get_unit(), "sub");
    }

    #[test]
    fn component_instantiation_with_map() {
        let text = "\
architecture rtl of top is
begin
  u0 : adder
    port map (a => a, b => b, s => s);
  u1 : lib_math.mult generic map (W => 8) port map (a => a);
end architecture;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].get_unit(), "adder");
        assert_eq!(found[1].get_unit(), "mult");
    }

    #[test]
    fn direct_name_with_architecture_selection() {
        let text = "\
architecture rtl of top is
begin
  u0 : sub(fast) port map (a => a);
end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_unit(), "sub");
    }

    #[test]
    fn direct_entity_entries_precede_mapped_entries() {
        let text = "\
architecture rtl of top is
begin
  m0 : adder port map (a => a);
  e0 : entity work.sub port map (b => b);
end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found[0].get_unit(), "sub");
        assert_eq!(found[1].get_unit(), "adder");
    }

    #[test]
    fn missing_architecture_is_none() {
        assert_eq!(list_instances("entity top is end top;", Some("top")), None);
    }

    #[test]
    fn empty_architecture_is_some_empty() {
        let text = "architecture rtl of top is begin end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.is_empty(), true);
    }

    #[test]
    fn subprogram_end_does_not_close_architecture() {
        let text = "\
architecture rtl of top is
  function crc(d : std_logic_vector) return std_logic is
  begin
    return d(0);
  end function;
begin
  u0 : entity work.sub port map (a => a);
end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_unit(), "sub");
    }

    #[test]
    fn subprogram_prototype_does_not_hide_instances() {
        let text = "\
architecture rtl of top is
  function zero return natural;
begin
  u0 : entity work.sub port map (a => a);
end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_unit(), "sub");
    }

    #[test]
    fn commented_instances_are_ignored() {
        let text = "\
architecture rtl of top is
begin
  -- u0 : entity work.ghost port map (a => a);
  u1 : entity work.real_sub port map (a => a);
end rtl;";
        let found = list_instances(text, Some("top")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_unit(), "real_sub");
    }
}
