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

/// Re-formats a complete instantiation block: one binding per line with the
/// `=>` arrows column-aligned and trailing comments preserved.
///
/// `indent` is the block's starting indentation level in tabs. Returns
/// `None` when `text` is not a single instantiation statement.
pub fn align_instance(text: &str, indent: usize) -> Option<String> {
    let re = Regex::new(
        r"(?is)^(?P<blank>\n*)[ \t]*(?P<label>\w+)\s*:\s*(?P<unit>(?:entity\s+\w+\.)?\w+\b(?:\s*\([\w\s]+\))?)\s*(?P<which>generic|port)\s+map\s*\((?P<content>.*)\)\s*;",
    )
    .unwrap();
    let caps = re.captures(text)?;

    let mut result = format!(
        "{}{}{} : {}\n",
        caps.name("blank").unwrap().as_str(),
        "\t".repeat(indent),
        caps.name("label").unwrap().as_str().trim(),
        caps.name("unit").unwrap().as_str().trim()
    );
    let mut port_content = caps.name("content").unwrap().as_str().to_string();

    if caps.name("which").unwrap().as_str().eq_ignore_ascii_case("generic") == true {
        let split = Regex::new(r"(?is)^(?P<generic>.*)\bport\s+map\s*\((?P<port>.*)$").unwrap();
        let inner = split.captures(&port_content)?;
        let generic_content = inner.name("generic").unwrap().as_str();
        // blank out line comments before hunting for the clause's last paren
        let masked = Regex::new(r"(?m)--.*$")
            .unwrap()
            .replace_all(generic_content, |m: &regex::Captures| {
                " ".repeat(m.get(0).unwrap().as_str().len())
            })
            .into_owned();
        let close = masked.rfind(')')?;
        // anything between the generic clause's `)` and `port map` (usually
        // nothing) is carried over on its own line
        let separator = generic_content[close + 1..].trim().to_string();
        let generic_body = generic_content[..close].trim().to_string();

        result.push_str(&format!("{}generic map (\n", "\t".repeat(indent + 1)));
        result.push_str(&align_bindings(&generic_body, indent + 2));
        result.push_str(&format!("{})\n", "\t".repeat(indent + 1)));
        if separator.is_empty() == false {
            result.push_str(&format!("{}{}\n", "\t".repeat(indent + 1), separator));
        }
        port_content = inner.name("port").unwrap().as_str().to_string();
    }

    result.push_str(&format!("{}port map (\n", "\t".repeat(indent + 1)));
    result.push_str(&align_bindings(&port_content, indent + 2));
    result.push_str(&format!("{});\n", "\t".repeat(indent + 1)));
    Some(result)
}

/// Aligns the `formal => actual` pairs of one map aspect.
fn align_bindings(text: &str, indent: usize) -> String {
    // ensure one binding per line
    let text = Regex::new(r",[ \t]*(\w)")
        .unwrap()
        .replace_all(text.trim(), ",\n$1")
        .into_owned();
    let bind = Regex::new(
        r"(?m)^\s*(?P<formal>\w+(?:\s*\(.*?\))?)\s*=>(?P<actual>.*?)(?P<sep>,?)(?P<comment>[ \t]*--.*)?$",
    )
    .unwrap();

    let mut formal_len = 0;
    let mut actual_len = 0;
    for caps in bind.captures_iter(&text) {
        formal_len = formal_len.max(caps.name("formal").unwrap().as_str().trim().len());
        actual_len = actual_len.max(caps.name("actual").unwrap().as_str().trim().len());
    }

    let mut result = String::new();
    for line in text.lines() {
        result.push_str(&"\t".repeat(indent));
        match bind.captures(line) {
            Some(caps) => {
                let actual = caps.name("actual").unwrap().as_str().trim();
                result.push_str(&format!(
                    "{:<fw$} => {}",
                    caps.name("formal").unwrap().as_str().trim(),
                    actual,
                    fw = formal_len
                ));
                if caps.name("sep").unwrap().as_str().is_empty() == false {
                    result.push(',');
                }
                // comments line up one column past the widest actual
                if let Some(comment) = caps.name("comment") {
                    result.push_str(&" ".repeat(actual_len.saturating_sub(actual.len()) + 1));
                    result.push_str(comment.as_str().trim());
                }
            }
            None => result.push_str(line.trim()),
        }
        result.push('\n');
    }
    result
}

/// Realigns every instantiation block found in a whole file, leaving all
/// other lines untouched.
pub fn align_file(text: &str) -> String {
    let opener = Regex::new(
        r"(?im)^(?P<ws>[ \t]*)\w+\s*:\s*(?:entity\s+\w+\.)?\w+(?:\s*\([\w\s]+\))?\s*(?:generic|port)\s+map\s*\(",
    )
    .unwrap();
    let mut result = String::new();
    let mut cursor = 0;
    while let Some(caps) = opener.captures_at(text, cursor) {
        let m = caps.get(0).unwrap();
        // balance parentheses from the map aspect's opener to find the
        // statement's terminator
        let open_at = text[m.start()..m.end()].rfind('(').unwrap() + m.start();
        let mut depth = 0;
        let mut stop = None;
        let mut chars = text[open_at..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        // expect the closing `;`
                        let rest = &text[open_at + i + 1..];
                        match rest.find(';') {
                            Some(j) if rest[..j].trim().is_empty() == true => {
                                stop = Some(open_at + i + 1 + j + 1);
                            }
                            _ => (),
                        }
                        break;
                    }
                }
                _ => (),
            }
        }
        let stop = match stop {
            Some(s) => s,
            None => break,
        };
        let indent = caps.name("ws").unwrap().as_str().matches('\t').count();
        match align_instance(&text[m.start()..stop], indent) {
            Some(aligned) => {
                result.push_str(&text[cursor..m.start()]);
                result.push_str(&aligned);
                cursor = stop;
                // the aligned block already ends with a newline
                if text[cursor..].starts_with('\n') {
                    cursor += 1;
                }
            }
            None => {
                result.push_str(&text[cursor..stop]);
                cursor = stop;
            }
        }
    }
    result.push_str(&text[cursor..]);
    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn align_single_line_instance() {
        let text = "u0 : sub port map (a=>x, long_name=>y, b=>z);";
        let aligned = align_instance(text, 0).unwrap();
        assert_eq!(
            aligned,
            "\
u0 : sub
\tport map (
\t\ta         => x,
\t\tlong_name => y,
\t\tb         => z
\t);
"
        );
    }

    #[test]
    fn align_with_generic_map() {
        let text = "u1 : entity work.fifo generic map (W=>8, D=>16) port map (clk=>clk, din=>data);";
        let aligned = align_instance(text, 0).unwrap();
        assert_eq!(
            aligned,
            "\
u1 : entity work.fifo
\tgeneric map (
\t\tW => 8,
\t\tD => 16
\t)
\tport map (
\t\tclk => clk,
\t\tdin => data
\t);
"
        );
    }

    #[test]
    fn trailing_comments_survive() {
        let text = "\
u0 : sub port map (
  a => x, -- feedback
  b => y
);";
        let aligned = align_instance(text, 0).unwrap();
        assert_eq!(aligned.contains("a => x, -- feedback"), true);
        assert_eq!(aligned.contains("b => y"), true);
    }

    #[test]
    fn not_an_instance_is_none() {
        assert_eq!(align_instance("signal a : bit;", 0), None);
    }

    #[test]
    fn align_file_touches_only_instances() {
        let text = "\
architecture rtl of top is
begin
u0 : sub port map (a=>x, bb=>y);
end rtl;
";
        let aligned = align_file(text);
        assert_eq!(aligned.contains("architecture rtl of top is"), true);
        assert_eq!(aligned.contains("a  => x,"), true);
        assert_eq!(aligned.contains("bb => y"), true);
        assert_eq!(aligned.contains("end rtl;"), true);
    }
}
