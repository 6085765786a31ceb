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

use crate::commands::align::Align;
use crate::commands::find::Find;
use crate::commands::get::Get;
use crate::commands::helps::scry;
use crate::commands::show::Show;
use crate::commands::tree::Tree;
use crate::core::session::Session;
use std::env;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq)]
pub struct Scry {
    version: bool,
    command: Option<ScryCommand>,
}

impl Command for Scry {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(scry::HELP))?;
        Ok(Scry {
            version: cli.check(Arg::flag("version"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // prioritize version information
        if self.version == true {
            println!("scry {}", VERSION);
            return Ok(());
        }
        match self.command {
            Some(command) => {
                // settings are layered from the working directory's file
                let session = Session::load(&env::current_dir()?)?;
                command.execute(&session)
            }
            None => Ok(println!("{}", scry::HELP)),
        }
    }
}

#[derive(Debug, PartialEq)]
enum ScryCommand {
    Get(Get),
    Find(Find),
    Tree(Tree),
    Show(Show),
    Align(Align),
}

impl Subcommand<Session> for ScryCommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli.select(&["get", "find", "tree", "show", "align"])?.as_ref() {
            "get" => Ok(Self::Get(Get::interpret(cli)?)),
            "find" => Ok(Self::Find(Find::interpret(cli)?)),
            "tree" => Ok(Self::Tree(Tree::interpret(cli)?)),
            "show" => Ok(Self::Show(Show::interpret(cli)?)),
            "align" => Ok(Self::Align(Align::interpret(cli)?)),
            _ => panic!("an unimplemented command was selected"),
        }
    }

    fn execute(self, c: &Session) -> proc::Result {
        match self {
            Self::Get(sub) => sub.execute(c),
            Self::Find(sub) => sub.execute(c),
            Self::Tree(sub) => sub.execute(c),
            Self::Show(sub) => sub.execute(c),
            Self::Align(sub) => sub.execute(c),
        }
    }
}
