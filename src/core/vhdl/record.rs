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

use super::declaration::{squeeze, DeclKind, Declaration};

/// Parses the field list of a single record type declaration
/// (`record ... end record`) into one `Declaration` per field, preserving
/// declaration order.
///
/// A trailing same-line comment after a field is kept on that field.
pub fn fields_of_record(decl: &str) -> Vec<Declaration> {
    // isolate the field region; a record still being typed out runs to the
    // end of the text
    let body = Regex::new(r"(?is)\brecord\b(?P<body>.*?)\bend\s+record\b")
        .unwrap()
        .captures(decl)
        .and_then(|caps| caps.name("body").map(|m| m.as_str().to_string()))
        .or_else(|| {
            Regex::new(r"(?is)\brecord\b(?P<body>.*)$")
                .unwrap()
                .captures(decl)
                .and_then(|caps| caps.name("body").map(|m| m.as_str().to_string()))
        });
    let body = match body {
        Some(b) => b,
        None => return Vec::new(),
    };

    let field =
        Regex::new(r"(?m)\s*(?P<name>[\w\s,]+?)\s*:\s*(?P<type>[^;]+);[ \t]*(?:--(?P<comment>[^\r\n]*))?")
            .unwrap();
    let mut fields = Vec::new();
    for caps in field.captures_iter(&body) {
        let list_text = caps.name("name").unwrap().as_str();
        let dtype = squeeze(caps.name("type").unwrap().as_str());
        let comment = caps.name("comment").map(|m| m.as_str().trim().to_string());
        for name in list_text.split(',').map(|n| n.trim()) {
            if name.is_empty() == true {
                continue;
            }
            fields.push(
                Declaration::new(
                    name.to_string(),
                    DeclKind::Field,
                    format!("{} : {}", name, dtype),
                )
                .dtype(Some(dtype.clone()))
                .comment(comment.clone()),
            );
        }
    }
    fields
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fields_in_order() {
        let fields = fields_of_record("record f1: std_logic; f2: integer; end record");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].get_name(), "f1");
        assert_eq!(fields[0].get_type(), Some("std_logic"));
        assert_eq!(fields[1].get_name(), "f2");
        assert_eq!(fields[1].get_type(), Some("integer"));
        for f in &fields {
            assert_eq!(f.get_kind(), DeclKind::Field);
        }
    }

    #[test]
    fn full_type_declaration() {
        let text = "\
type axis_t is record
  tvalid : std_logic;
  tdata  : std_logic_vector(31 downto 0); -- beat payload
  tlast  : std_logic;
end record;";
        let fields = fields_of_record(text);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].get_comment(), Some("beat payload"));
        assert_eq!(fields[1].get_type(), Some("std_logic_vector(31 downto 0)"));
        assert_eq!(fields[2].get_comment(), None);
    }

    #[test]
    fn identifier_list_field() {
        let fields = fields_of_record("record a, b : bit; end record");
        assert_eq!(
            fields.iter().map(|f| f.get_name()).collect::<Vec<&str>>(),
            vec!["a", "b"]
        );
        assert_eq!(fields[0].get_decl(), "a : bit");
    }

    #[test]
    fn unterminated_record_runs_to_end() {
        let fields = fields_of_record("record x : bit;");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].get_name(), "x");
    }

    #[test]
    fn not_a_record_is_empty() {
        assert_eq!(fields_of_record("signal a : bit;").is_empty(), true);
    }
}
