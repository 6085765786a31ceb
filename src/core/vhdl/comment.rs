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

/// Replaces every VHDL comment in `text` with a single space while leaving
/// string literal contents untouched.
///
/// Line comments run from `--` to the end of the line; the line ending itself
/// survives so `^`/`$` anchored scans still see the original line structure.
/// Delimited comments (`/* ... */`) collapse to one space, with any interior
/// newlines re-emitted to keep line counts stable. An unterminated delimited
/// comment consumes to the end of the text.
///
/// The pass is a single explicit scan over the characters, so pathological
/// inputs cannot trigger regex backtracking.
pub fn strip(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // string literal: copy verbatim until the closing quote
            '"' => {
                result.push(c);
                while let Some(s) = chars.next() {
                    result.push(s);
                    if s == '\\' {
                        // escaped character cannot close the literal
                        if let Some(esc) = chars.next() {
                            result.push(esc);
                        }
                    } else if s == '"' {
                        break;
                    }
                }
            }
            // possible line comment
            '-' => {
                if chars.peek() == Some(&'-') {
                    result.push(' ');
                    while let Some(d) = chars.peek() {
                        if d == &'\n' {
                            break;
                        }
                        chars.next();
                    }
                } else {
                    result.push(c);
                }
            }
            // possible delimited comment
            '/' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    result.push(' ');
                    let mut star = false;
                    while let Some(d) = chars.next() {
                        if d == '\n' {
                            result.push('\n');
                        }
                        if star == true && d == '/' {
                            break;
                        }
                        star = d == '*';
                    }
                } else {
                    result.push(c);
                }
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strip_line_comment() {
        let text = "signal a : bit; -- counter enable\nsignal b : bit;";
        assert_eq!(strip(text), "signal a : bit;  \nsignal b : bit;");
    }

    #[test]
    fn strip_delimited_comment() {
        let text = "signal a /* size? */ : bit;";
        assert_eq!(strip(text), "signal a   : bit;");
    }

    #[test]
    fn delimited_comment_keeps_line_count() {
        let text = "a;/* one\ntwo\nthree */b;";
        let clean = strip(text);
        assert_eq!(clean.lines().count(), text.lines().count());
        assert_eq!(clean.contains("two"), false);
    }

    #[test]
    fn preserves_string_contents() {
        let text = "x <= \"--not a comment\";";
        assert_eq!(strip(text).contains("\"--not a comment\""), true);
    }

    #[test]
    fn preserves_escaped_quote_in_string() {
        let text = "x <= \"a\\\"--b\"; -- real comment";
        let clean = strip(text);
        assert_eq!(clean.contains("\"a\\\"--b\""), true);
        assert_eq!(clean.contains("real comment"), false);
    }

    #[test]
    fn unterminated_delimited_comment_consumes_rest() {
        let text = "signal a : bit; /* never closed\nsignal b : bit;";
        let clean = strip(text);
        assert_eq!(clean.contains("signal b"), false);
        // line structure still intact
        assert_eq!(clean.matches('\n').count(), text.matches('\n').count());
    }

    #[test]
    fn stripping_is_idempotent() {
        let text = "u0 : sub port map (a => b); -- link /* x */\nc <= \"--\";";
        let once = strip(text);
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn minus_alone_is_not_a_comment() {
        let text = "a <= b - c;";
        assert_eq!(strip(text), text);
    }
}
