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

use crate::commands::helps::align;
use crate::core::session::Session;
use crate::core::vhdl::align::align_file;
use crate::error::{Error, LastError};
use regex::Regex;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Align {
    file: PathBuf,
}

impl Subcommand<Session> for Align {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(align::HELP))?;
        Ok(Align {
            file: cli.require(Arg::positional("file"))?,
        })
    }

    fn execute(self, _: &Session) -> proc::Result {
        let text = std::fs::read_to_string(&self.file)
            .map_err(|e| Error::FileNotRead(self.file.clone(), LastError(e.to_string())))?;
        let has_map = Regex::new(r"(?i)\b(?:generic|port)\s+map\b")
            .unwrap()
            .is_match(&text);
        if has_map == false {
            return Err(Error::NothingToAlign(self.file.clone()))?;
        }
        print!("{}", align_file(&text));
        Ok(())
    }
}
