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

use crate::commands::helps::get;
use crate::core::cache::Query;
use crate::core::index::{ProjectIndex, SymbolIndex};
use crate::core::session::Session;
use crate::core::vhdl::connect::{self, ConnectionPlan};
use crate::core::vhdl::unit::ModuleInfo;
use crate::error::{Error, Hint, LastError};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Get {
    unit: String,
    path: Option<PathBuf>,
    component: bool,
    instance: bool,
    signals: bool,
    architectures: bool,
    json: bool,
    name: Option<String>,
    connect: Option<PathBuf>,
    signal_prefix: String,
    signal_suffix: String,
}

impl Subcommand<Session> for Get {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(get::HELP))?;
        Ok(Self {
            component: cli.check(Arg::flag("component").switch('c'))?,
            instance: cli.check(Arg::flag("instance").switch('i'))?,
            signals: cli.check(Arg::flag("signals").switch('s'))?,
            architectures: cli.check(Arg::flag("architecture").switch('a'))?,
            json: cli.check(Arg::flag("json"))?,
            signal_prefix: cli
                .get(Arg::option("signal-prefix").value("str"))?
                .unwrap_or_default(),
            signal_suffix: cli
                .get(Arg::option("signal-suffix").value("str"))?
                .unwrap_or_default(),
            name: cli.get(Arg::option("name").value("identifier"))?,
            connect: cli.get(Arg::option("connect").value("file"))?,
            path: cli.get(Arg::option("path").value("dir"))?,
            unit: cli.require(Arg::positional("unit"))?,
        })
    }

    fn execute(self, c: &Session) -> proc::Result {
        let root = match &self.path {
            Some(p) => p.clone(),
            None => env::current_dir()?,
        };
        let index = ProjectIndex::scan(&root);
        let unit = match self.fetch_unit(&index, c) {
            Some(unit) => unit,
            None => return Err(Error::UnitNotFound(self.unit.clone(), Hint::PathOption))?,
        };
        self.run(&unit, &index, c)
    }
}

impl Get {
    /// Walks the candidate files for the requested name until one yields a
    /// parsed interface.
    fn fetch_unit(&self, index: &ProjectIndex, c: &Session) -> Option<ModuleInfo> {
        for file in index.candidates(&self.unit) {
            let answer = match c.get_cache().get(
                &file,
                Query::Unit {
                    name: Some(self.unit.clone()),
                },
            ) {
                Ok(answer) => answer,
                // unreadable candidate: keep scanning the remaining files
                Err(_) => continue,
            };
            if let Some(info) = answer.into_unit() {
                return Some(info);
            }
        }
        None
    }

    fn run(&self, unit: &ModuleInfo, index: &ProjectIndex, c: &Session) -> proc::Result {
        // determine if default print should appear
        let default_output = self.architectures == false
            && self.instance == false
            && self.json == false
            && self.signals == false
            && self.component == false;

        if self.architectures == true {
            println!("{}", self.list_architectures(index, c));
        }

        if self.component == true || default_output == true {
            println!("{}", unit.into_component(c.get_settings()));
        }

        if self.signals == true {
            let constants = unit.into_constants();
            if constants.is_empty() == false {
                println!("{}", constants);
            }
            let signals = unit.into_signals(&self.signal_prefix, &self.signal_suffix);
            if signals.is_empty() == false {
                println!("{}", signals);
            }
        }

        if self.instance == true {
            let plan = match &self.connect {
                Some(dest) => Some(self.plan_connections(unit, dest, c)?),
                None => None,
            };
            if let Some(plan) = &plan {
                for decl in plan.get_new_declarations() {
                    println!("{}", decl);
                }
                if plan.get_new_declarations().is_empty() == false {
                    println!();
                }
            }
            // only reference the library when not pairing with component code
            let lib = match self.component {
                true => None,
                false => Some("work"),
            };
            println!(
                "{}",
                unit.into_instance(self.name.as_deref(), lib, c.get_settings(), plan.as_ref())
            );
            if let Some(plan) = &plan {
                for (port, warning) in plan.get_warnings() {
                    eprintln!("{}: port {:?}: {}", "warning".yellow(), port, warning);
                }
            }
        }

        if self.json == true {
            println!("{}", serde_json::to_string(unit)?);
        }
        Ok(())
    }

    fn plan_connections(
        &self,
        unit: &ModuleInfo,
        dest: &PathBuf,
        c: &Session,
    ) -> Result<ConnectionPlan, Error> {
        let text = std::fs::read_to_string(dest)
            .map_err(|e| Error::FileNotRead(dest.clone(), LastError(e.to_string())))?;
        // asking to connect overrides the ambient default
        let mut settings = c.get_settings().clone();
        settings.set_autoconnect(true);
        Ok(connect::autoconnect(unit, &text, &settings))
    }

    fn list_architectures(&self, index: &ProjectIndex, c: &Session) -> String {
        let mut result = String::from("Architectures:\n");
        for file in index.candidates(&self.unit) {
            let answer = match c.get_cache().get(
                &file,
                Query::Architecture {
                    name: Some(self.unit.clone()),
                },
            ) {
                Ok(answer) => answer,
                Err(_) => continue,
            };
            if let Some(arch) = answer.into_architecture() {
                result.push_str(&format!("    {}\n", arch.get_name()));
            }
        }
        result
    }
}
