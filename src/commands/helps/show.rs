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
pub const HELP: &str = r#"List the declarations found in a source file.

Usage:
    scry show [options] <file>

Args:
    <file>              vhdl source file to inspect

Options:
    --name <pattern>    limit the report to the named design unit
    --ports             list the unit's ports
    --signals           list architecture signals
    --constants         list architecture constants
    --aliases           list architecture aliases
    --instances         list instantiations
    --subprograms       list functions and procedures
    --processes         list labeled processes
    --json              export the report as valid json

Use 'scry show --help' to read more about the command.
"#;
