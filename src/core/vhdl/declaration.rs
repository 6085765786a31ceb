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

use regex::{Captures, Regex};
use serde_derive::Serialize;
use std::fmt::Display;
use std::ops::BitOr;
use std::path::PathBuf;
use std::str::FromStr;

use super::comment;
use crate::util::anyerror::AnyError;

/// The category a matched declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Signal,
    Variable,
    Constant,
    Generic,
    Port,
    Alias,
    Field,
    Entity,
    Architecture,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDir {
    In,
    Out,
    Inout,
}

impl FromStr for PortDir {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "inout" => Ok(Self::Inout),
            _ => Err(()),
        }
    }
}

impl Display for PortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::In => "in",
                Self::Out => "out",
                Self::Inout => "inout",
            }
        )
    }
}

/// Bitmask selecting which declaration grammars a search is allowed to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclSet(u16);

impl DeclSet {
    pub const ENTITY: DeclSet = DeclSet(1 << 0);
    pub const ARCHITECTURE: DeclSet = DeclSet(1 << 1);
    pub const SIGNAL: DeclSet = DeclSet(1 << 2);
    pub const PORT: DeclSet = DeclSet(1 << 3);
    pub const CONSTANT: DeclSet = DeclSet(1 << 4);
    pub const GENERIC: DeclSet = DeclSet(1 << 5);
    pub const RECORD: DeclSet = DeclSet(1 << 6);
    pub const ALIAS: DeclSet = DeclSet(1 << 7);

    /// The value-object grammars (no header or type forms).
    pub const OBJECTS: DeclSet =
        DeclSet(Self::SIGNAL.0 | Self::PORT.0 | Self::CONSTANT.0 | Self::GENERIC.0);

    pub const ALL: DeclSet = DeclSet(u16::MAX);

    /// Checks if any category of `rhs` is enabled in `self`.
    pub fn intersects(&self, rhs: DeclSet) -> bool {
        self.0 & rhs.0 != 0
    }
}

impl BitOr for DeclSet {
    type Output = DeclSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        DeclSet(self.0 | rhs.0)
    }
}

impl FromStr for DeclSet {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "signal" => Ok(Self::SIGNAL),
            "port" => Ok(Self::PORT),
            "constant" => Ok(Self::CONSTANT),
            "generic" => Ok(Self::GENERIC),
            "record" => Ok(Self::RECORD),
            "alias" => Ok(Self::ALIAS),
            "entity" => Ok(Self::ENTITY),
            "architecture" => Ok(Self::ARCHITECTURE),
            _ => Err(AnyError(String::from(
                "value must be 'signal', 'port', 'constant', 'generic', 'record', 'alias', 'entity', or 'architecture'",
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
    pub col: usize,
}

/// One parsed declaration.
///
/// Absence of a declaration is always expressed as `Option::None` at the API
/// boundary, so an empty `dtype` on a returned value means "parsed, but the
/// grammar carries no type here", never "not found".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    name: String,
    kind: DeclKind,
    #[serde(rename = "type")]
    dtype: Option<String>,
    direction: Option<PortDir>,
    default: Option<String>,
    decl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<SourceLocation>,
    /// (line, col) of the identifier within the scanned text; (0, 0) when
    /// the producing scan did not track it.
    #[serde(skip_serializing)]
    span: (usize, usize),
}

impl Declaration {
    pub(crate) fn new(name: String, kind: DeclKind, decl: String) -> Self {
        Self {
            name: name,
            kind: kind,
            dtype: None,
            direction: None,
            default: None,
            decl: decl,
            comment: None,
            location: None,
            span: (0, 0),
        }
    }

    pub(crate) fn dtype(mut self, dtype: Option<String>) -> Self {
        self.dtype = dtype;
        self
    }

    pub(crate) fn direction(mut self, dir: Option<PortDir>) -> Self {
        self.direction = dir;
        self
    }

    pub(crate) fn default(mut self, value: Option<String>) -> Self {
        self.default = value;
        self
    }

    pub(crate) fn comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Attaches the project-wide resolution point for this declaration.
    pub fn set_location(&mut self, loc: SourceLocation) -> () {
        self.location = Some(loc);
    }

    pub(crate) fn set_span(&mut self, line: usize, col: usize) -> () {
        self.span = (line, col);
    }

    /// Accesses the (line, col) of the identifier within the text the
    /// declaration was scanned from.
    pub fn get_span(&self) -> (usize, usize) {
        self.span
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_kind(&self) -> DeclKind {
        self.kind
    }

    pub fn get_type(&self) -> Option<&str> {
        self.dtype.as_deref()
    }

    pub fn get_direction(&self) -> Option<PortDir> {
        self.direction
    }

    pub fn get_default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Accesses the normalized source text of the declaration.
    pub fn get_decl(&self) -> &str {
        &self.decl
    }

    pub fn get_comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn get_location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// Collapses every run of whitespace in `s` to a single space.
pub(crate) fn squeeze(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Removes the last closing parenthesis found in `s`, if any.
fn trim_last_paren(s: &str) -> String {
    match s.rfind(')') {
        Some(i) => {
            let mut t = String::from(&s[..i]);
            t.push_str(&s[i + 1..]);
            t
        }
        None => s.to_string(),
    }
}

/// Builds the identifier-list pattern with the target constrained to appear
/// anywhere in a comma-separated list.
fn id_list(target: Option<&str>) -> String {
    match target {
        Some(t) => format!(
            r"(?:[\s\w,]+,\s*)?{}(?:\s*,[\s\w,]+)?",
            regex::escape(t)
        ),
        None => String::from(r"\w+(?:\s*,[\s\w,]+)?"),
    }
}

fn single_id(target: Option<&str>) -> String {
    match target {
        Some(t) => regex::escape(t),
        None => String::from(r"\w+"),
    }
}

/// A single declaration grammar: its own search pattern and its own
/// extraction of the matched fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grammar {
    EntityHeader,
    ArchitectureHeader,
    Signal,
    Port,
    Constant,
    Generic,
    Record,
    Alias,
}

impl Grammar {
    /// The fixed dispatch order. Callers must try grammars in this order for
    /// first-match-wins behavior: header forms first, then tagged object
    /// forms, with the untagged generic form trailing the tagged ones.
    pub fn priority() -> &'static [Grammar] {
        &[
            Self::EntityHeader,
            Self::ArchitectureHeader,
            Self::Signal,
            Self::Port,
            Self::Constant,
            Self::Generic,
            Self::Record,
            Self::Alias,
        ]
    }

    pub fn category(&self) -> DeclSet {
        match self {
            Self::EntityHeader => DeclSet::ENTITY,
            Self::ArchitectureHeader => DeclSet::ARCHITECTURE,
            Self::Signal => DeclSet::SIGNAL,
            Self::Port => DeclSet::PORT,
            Self::Constant => DeclSet::CONSTANT,
            Self::Generic => DeclSet::GENERIC,
            Self::Record => DeclSet::RECORD,
            Self::Alias => DeclSet::ALIAS,
        }
    }

    /// Compiles the search pattern for this grammar, optionally pinned to a
    /// specific identifier. Patterns are fixed templates with only an escaped
    /// identifier substituted, so compilation cannot fail.
    pub fn pattern(&self, target: Option<&str>) -> Regex {
        let p = match self {
            Self::EntityHeader => format!(
                r"(?im)^\s*(?P<tag>entity|component)\s+(?P<name>{})\s+is\b",
                single_id(target)
            ),
            Self::ArchitectureHeader => format!(
                r"(?im)^\s*architecture\s+(?P<arch>\w+)\s+of\s+(?P<name>{})\s+is\b",
                single_id(target)
            ),
            Self::Signal => format!(
                r"(?im)^\s*(?P<tag>signal|variable)\s+(?P<name>{})\s*:\s*(?P<type>[^;]+)",
                id_list(target)
            ),
            Self::Port => format!(
                r"(?im)^\s*(?:port\b\s*\(?\s*)?(?P<payload>(?P<name>{})\s*:\s*(?P<dir>in|out|inout)\s+(?P<type>[^;]+))",
                id_list(target)
            ),
            Self::Constant => format!(
                r"(?im)^\s*constant\s+(?P<name>{})\s*:\s*(?P<type>[\w\s()]+)\s*:=\s*(?P<default>[^;]+)",
                id_list(target)
            ),
            Self::Generic => format!(
                r"(?im)^\s*(?:generic\s*\(\s*)?(?P<payload>(?P<name>{})\s*:\s*(?P<type>[\w\s()]+)(?:\s*:=\s*(?P<default>[^;]+))?)",
                id_list(target)
            ),
            Self::Record => format!(
                r"(?ims)^\s*type\s+(?P<name>{})\s+is\s+record\b.*?\bend\s+record\b",
                single_id(target)
            ),
            Self::Alias => format!(
                r"(?im)^\s*alias\s+(?P<name>{})(?:\s*:\s*(?P<type>[^;<]+?))?\s+is\s+(?P<default>[^;]+)",
                single_id(target)
            ),
        };
        Regex::new(&p).unwrap()
    }

    /// Produces the declarations described by one match of this grammar.
    ///
    /// A match over a comma-separated identifier list yields one entry per
    /// identifier, each with the list rewritten to contain only that name.
    /// When `target` is given, only that name's entry is produced.
    fn extract(&self, caps: &Captures, target: Option<&str>) -> Vec<Declaration> {
        let whole = caps.get(0).unwrap().as_str();
        match self {
            Self::EntityHeader => {
                let tag = caps.name("tag").unwrap().as_str().to_ascii_lowercase();
                let name = caps.name("name").unwrap().as_str();
                vec![
                    Declaration::new(name.to_string(), DeclKind::Entity, format!("{} {}", tag, name))
                        .dtype(Some(tag)),
                ]
            }
            Self::ArchitectureHeader => {
                let name = caps.name("name").unwrap().as_str();
                vec![Declaration::new(name.to_string(), DeclKind::Architecture, squeeze(whole))
                    .dtype(Some(String::from("architecture")))]
            }
            Self::Record => {
                let name = caps.name("name").unwrap().as_str();
                // type declarations carry no object category of their own
                vec![Declaration::new(name.to_string(), DeclKind::Unknown, squeeze(whole))
                    .dtype(Some(String::from("record")))]
            }
            Self::Alias => {
                let name = caps.name("name").unwrap().as_str();
                vec![Declaration::new(name.to_string(), DeclKind::Alias, squeeze(whole.trim()))
                    .dtype(caps.name("type").map(|m| squeeze(m.as_str())))
                    .default(caps.name("default").map(|m| m.as_str().trim().to_string()))]
            }
            Self::Signal | Self::Port | Self::Constant | Self::Generic => {
                self.extract_objects(caps, target)
            }
        }
    }

    fn extract_objects(&self, caps: &Captures, target: Option<&str>) -> Vec<Declaration> {
        // the payload excludes any `port (`/`generic (` opener the match may
        // have started on
        let whole = match caps.name("payload") {
            Some(m) => m.as_str(),
            None => caps.get(0).unwrap().as_str(),
        };
        let list_text = caps.name("name").unwrap().as_str();
        let names: Vec<String> = match target {
            Some(t) => vec![t.to_string()],
            None => list_text
                .split(',')
                .map(|n| n.trim().to_string())
                .filter(|n| n.is_empty() == false)
                .collect(),
        };
        let kind = match self {
            Self::Signal => {
                match caps.name("tag").unwrap().as_str().to_ascii_lowercase().as_ref() {
                    "variable" => DeclKind::Variable,
                    _ => DeclKind::Signal,
                }
            }
            Self::Port => DeclKind::Port,
            Self::Constant => DeclKind::Constant,
            _ => DeclKind::Generic,
        };
        let dir = caps
            .name("dir")
            .and_then(|m| PortDir::from_str(m.as_str()).ok());
        let dtype = caps.name("type").map(|m| m.as_str());
        let default = caps.name("default").map(|m| m.as_str().trim().to_string());
        // detect a type captured past the enclosing port list's closing paren
        let unbalanced = whole.matches('(').count() < whole.matches(')').count();

        names
            .into_iter()
            .map(|name| {
                let mut decl = whole.trim().replacen(list_text, &name, 1);
                let mut dtype = dtype.map(|t| t.to_string());
                if kind == DeclKind::Port {
                    decl = format!("port {}", decl);
                    if unbalanced == true {
                        decl = trim_last_paren(&decl);
                        dtype = dtype.map(|t| trim_last_paren(&t));
                    }
                }
                Declaration::new(name, kind, squeeze(&decl))
                    .dtype(dtype.map(|t| squeeze(&t)))
                    .direction(dir)
                    .default(default.clone())
            })
            .collect()
    }

    /// Collects every match of this grammar across `text`, expanding
    /// identifier lists. The text is expected to already be comment-free.
    pub fn scan(&self, text: &str) -> Vec<Declaration> {
        self.pattern(None)
            .captures_iter(text)
            .flat_map(|caps| self.extract(&caps, None))
            .collect()
    }
}

/// Blanks out `component ... end ...;` blocks so a component's interface
/// does not shadow the declarations being searched for. Newlines are kept so
/// match positions stay true to the input.
fn remove_component_blocks(text: &str) -> String {
    Regex::new(r"(?ims)^[ \t]*component\b.*?\bend\b.*?;")
        .unwrap()
        .replace_all(text, |caps: &Captures| {
            caps.get(0)
                .unwrap()
                .as_str()
                .chars()
                .map(|c| match c == '\n' {
                    true => '\n',
                    false => ' ',
                })
                .collect::<String>()
        })
        .into_owned()
}

/// Converts a byte offset into a 1-based line and 0-based column.
fn position_of(text: &str, offset: usize) -> (usize, usize) {
    let line = text[..offset].matches('\n').count() + 1;
    let col = offset
        - text[..offset]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    (line, col)
}

/// Searches `text` for the declaration of `name`, trying each grammar
/// enabled in `categories` in the fixed priority order.
///
/// Returns `None` when no enabled grammar matches; absence is a normal
/// outcome (mid-edit buffers, forward references), not an error.
pub fn find_declaration(text: &str, name: &str, categories: DeclSet) -> Option<Declaration> {
    let clean = comment::strip(text);
    let clean = match categories.intersects(DeclSet::ENTITY | DeclSet::ARCHITECTURE) {
        true => clean,
        false => remove_component_blocks(&clean),
    };
    for grammar in Grammar::priority() {
        if categories.intersects(grammar.category()) == false {
            continue;
        }
        if let Some(caps) = grammar.pattern(Some(name)).captures(&clean) {
            let offset = caps
                .name("name")
                .map(|m| m.start())
                .unwrap_or(caps.get(0).unwrap().start());
            let (line, col) = position_of(&clean, offset);
            let mut found = grammar.extract(&caps, Some(name)).into_iter().next();
            if let Some(d) = found.as_mut() {
                d.set_span(line, col);
            }
            return found;
        }
    }
    None
}

/// Finds the first declaration of any enabled grammar and expands its full
/// identifier list into one entry per identifier.
pub fn find_declaration_list(text: &str, categories: DeclSet) -> Vec<Declaration> {
    let clean = comment::strip(text);
    let clean = match categories.intersects(DeclSet::ENTITY | DeclSet::ARCHITECTURE) {
        true => clean,
        false => remove_component_blocks(&clean),
    };
    for grammar in Grammar::priority() {
        if categories.intersects(grammar.category()) == false {
            continue;
        }
        if let Some(caps) = grammar.pattern(None).captures(&clean) {
            return grammar.extract(&caps, None);
        }
    }
    Vec::new()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expand_identifier_list() {
        let decls = find_declaration_list("signal a, b, c : std_logic;", DeclSet::SIGNAL);
        assert_eq!(decls.len(), 3);
        assert_eq!(
            decls.iter().map(|d| d.get_name()).collect::<Vec<&str>>(),
            vec!["a", "b", "c"]
        );
        for d in &decls {
            assert_eq!(d.get_type(), Some("std_logic"));
            assert_eq!(d.get_kind(), DeclKind::Signal);
        }
        // each rewritten declaration names only its own identifier
        assert_eq!(decls[1].get_decl(), "signal b : std_logic");
    }

    #[test]
    fn find_port_with_direction() {
        let d = find_declaration("port (rst : in std_logic);", "rst", DeclSet::PORT).unwrap();
        assert_eq!(d.get_kind(), DeclKind::Port);
        assert_eq!(d.get_direction(), Some(PortDir::In));
        assert_eq!(d.get_type(), Some("std_logic"));
    }

    #[test]
    fn port_trailing_paren_is_trimmed() {
        // the permissive cutoff captures the port list's own closing paren
        let text = "port (\n  rst : in std_logic\n);";
        let d = find_declaration(text, "rst", DeclSet::PORT).unwrap();
        assert_eq!(d.get_type(), Some("std_logic"));
        assert_eq!(d.get_decl().ends_with(")"), false);
    }

    #[test]
    fn port_balanced_parens_survive() {
        let d = find_declaration(
            "dout : out std_logic_vector(7 downto 0);",
            "dout",
            DeclSet::PORT,
        )
        .unwrap();
        assert_eq!(d.get_type(), Some("std_logic_vector(7 downto 0)"));
    }

    #[test]
    fn target_in_middle_of_list() {
        let d = find_declaration("signal x, y, z : bit;", "y", DeclSet::SIGNAL).unwrap();
        assert_eq!(d.get_name(), "y");
        assert_eq!(d.get_decl(), "signal y : bit");
    }

    #[test]
    fn variable_tag_sets_kind() {
        let d =
            find_declaration("variable count : integer := 0;", "count", DeclSet::SIGNAL).unwrap();
        assert_eq!(d.get_kind(), DeclKind::Variable);
    }

    #[test]
    fn constant_captures_default() {
        let d = find_declaration(
            "constant WIDTH : integer := 8;",
            "WIDTH",
            DeclSet::CONSTANT,
        )
        .unwrap();
        assert_eq!(d.get_kind(), DeclKind::Constant);
        assert_eq!(d.get_default(), Some("8"));
    }

    #[test]
    fn generic_is_positional_fallback() {
        // no tag at all: only the generic grammar claims it
        let d = find_declaration("DEPTH : natural := 16;", "DEPTH", DeclSet::OBJECTS).unwrap();
        assert_eq!(d.get_kind(), DeclKind::Generic);
        assert_eq!(d.get_default(), Some("16"));
    }

    #[test]
    fn tagged_grammar_wins_over_generic() {
        let d = find_declaration("signal DEPTH : natural;", "DEPTH", DeclSet::OBJECTS).unwrap();
        assert_eq!(d.get_kind(), DeclKind::Signal);
    }

    #[test]
    fn typed_alias() {
        let d = find_declaration(
            "alias lsb : std_logic is data(0);",
            "lsb",
            DeclSet::ALIAS,
        )
        .unwrap();
        assert_eq!(d.get_kind(), DeclKind::Alias);
        assert_eq!(d.get_type(), Some("std_logic"));
        assert_eq!(d.get_default(), Some("data(0)"));
    }

    #[test]
    fn external_name_alias() {
        let d = find_declaration(
            "alias probe is <<signal .tb.dut.state : state_t>>;",
            "probe",
            DeclSet::ALIAS,
        )
        .unwrap();
        assert_eq!(d.get_type(), None);
        assert_eq!(d.get_default(), Some("<<signal .tb.dut.state : state_t>>"));
    }

    #[test]
    fn record_type_declaration() {
        let text = "type frame_t is record\n  sof : std_logic;\n  len : natural;\nend record;";
        let d = find_declaration(text, "frame_t", DeclSet::RECORD).unwrap();
        assert_eq!(d.get_type(), Some("record"));
        assert_eq!(d.get_decl().starts_with("type frame_t is record"), true);
    }

    #[test]
    fn entity_header() {
        let d = find_declaration("entity alu is\nend entity;", "alu", DeclSet::ENTITY).unwrap();
        assert_eq!(d.get_kind(), DeclKind::Entity);
        assert_eq!(d.get_type(), Some("entity"));
        assert_eq!(d.get_decl(), "entity alu");
    }

    #[test]
    fn architecture_header() {
        let d = find_declaration(
            "architecture rtl of alu is\nbegin\nend rtl;",
            "alu",
            DeclSet::ARCHITECTURE,
        )
        .unwrap();
        assert_eq!(d.get_kind(), DeclKind::Architecture);
        assert_eq!(d.get_type(), Some("architecture"));
    }

    #[test]
    fn component_ports_do_not_shadow_signals() {
        let text = "\
component sub
  port (a : in bit);
end component;
signal a : std_logic;";
        let d = find_declaration(text, "a", DeclSet::OBJECTS).unwrap();
        assert_eq!(d.get_kind(), DeclKind::Signal);
        assert_eq!(d.get_type(), Some("std_logic"));
    }

    #[test]
    fn declarations_inside_comments_are_ignored() {
        let text = "-- signal ghost : bit;\nsignal real_one : bit;";
        assert_eq!(find_declaration(text, "ghost", DeclSet::SIGNAL), None);
        assert_eq!(
            find_declaration(text, "real_one", DeclSet::SIGNAL).is_some(),
            true
        );
    }

    #[test]
    fn not_found_is_none() {
        assert_eq!(find_declaration("signal a : bit;", "b", DeclSet::ALL), None);
        assert_eq!(find_declaration_list("", DeclSet::ALL).is_empty(), true);
    }

    #[test]
    fn span_tracks_the_identifier() {
        let text = "-- preamble\nsignal a : bit;\nsignal b : bit;";
        let d = find_declaration(text, "b", DeclSet::SIGNAL).unwrap();
        // comment stripping keeps the line structure intact
        assert_eq!(d.get_span(), (3, 7));
    }

    #[test]
    fn category_names_parse() {
        assert_eq!(DeclSet::from_str("signal"), Ok(DeclSet::SIGNAL));
        assert_eq!(DeclSet::from_str("Record"), Ok(DeclSet::RECORD));
        assert_eq!(DeclSet::from_str("wires").is_err(), true);
    }

    #[test]
    fn normalization_round_trip() {
        let text = "signal   s0 ,  s1 :  std_logic_vector( 7\n downto 0 );";
        let first = find_declaration(text, "s1", DeclSet::SIGNAL).unwrap();
        // re-parsing the normalized declaration yields an equivalent result
        let again =
            find_declaration(&format!("{};", first.get_decl()), "s1", DeclSet::SIGNAL).unwrap();
        assert_eq!(first.get_type(), again.get_type());
        assert_eq!(first.get_decl(), again.get_decl());
        assert_eq!(first.get_kind(), again.get_kind());
    }

    #[test]
    fn port_round_trip() {
        let first = find_declaration("port (rst : in std_logic);", "rst", DeclSet::PORT).unwrap();
        let again =
            find_declaration(&format!("{};", first.get_decl()), "rst", DeclSet::PORT).unwrap();
        assert_eq!(first.get_decl(), again.get_decl());
        assert_eq!(first.get_type(), again.get_type());
        assert_eq!(first.get_direction(), again.get_direction());
        assert_eq!(first.get_kind(), again.get_kind());
    }
}
