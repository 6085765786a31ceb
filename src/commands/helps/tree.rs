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

// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"View the hardware design hierarchy.

Usage:
    scry tree [options]

Options:
    --root <unit>       top entity identifier to mark as the root node
    --path <dir>        project directory to search (default: current)
    --json              export the hierarchy as valid json
    --ascii             use chars from the original 128 ascii set

Use 'scry tree --help' to read more about the command.
"#;
