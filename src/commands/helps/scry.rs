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
pub const HELP: &str = r#"Source code intelligence for VHDL.

Usage:
    scry [options] [command]

Commands:
    get             fetch an entity's interface for code integration
    find            locate the declaration of an identifier
    tree            view the instance hierarchy of a design
    show            list the declarations found in a source file
    align           realign instantiation blocks in a source file

Options:
    --version       print the version information and exit
    --help, -h      print this help information and exit

Use 'scry <command> --help' to read more about a command.
"#;
