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

use super::cache::{FileCache, Query};
use super::index::SymbolIndex;
use super::vhdl::declaration::{DeclSet, Declaration, SourceLocation};

/// Resolves `name` across the project: each candidate file from the symbol
/// index is tried in order until one yields a typed declaration.
///
/// This is the explicit escalation loop for symbols not declared in the
/// local buffer; it is bounded by the candidate list, and a declaration it
/// returns carries its `SourceLocation`. Unreadable candidates are skipped.
pub fn lookup_declaration(
    index: &dyn SymbolIndex,
    cache: &FileCache,
    name: &str,
    categories: DeclSet,
) -> Option<Declaration> {
    for file in index.candidates(name) {
        let answer = match cache.get(
            &file,
            Query::Declaration {
                target: name.to_string(),
                categories: categories,
            },
        ) {
            Ok(answer) => answer,
            Err(_) => continue,
        };
        if let Some(mut found) = answer.into_declaration() {
            // a declaration with no type cannot be followed further
            if found.get_type().is_some() == true {
                let (line, col) = found.get_span();
                found.set_location(SourceLocation {
                    file: file,
                    line: line,
                    col: col,
                });
                return Some(found);
            }
        }
    }
    None
}
