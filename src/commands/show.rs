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

use crate::commands::helps::show;
use crate::core::cache::{Outline, Query};
use crate::core::session::Session;
use crate::core::vhdl::architecture::ArchitectureInfo;
use crate::core::vhdl::declaration::{DeclKind, Declaration, PortDir};
use crate::core::vhdl::instance::InstanceRef;
use crate::core::vhdl::subprogram::Subprogram;
use crate::core::vhdl::unit::ModuleInfo;
use crate::error::{Error, LastError};
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Show {
    file: PathBuf,
    name: Option<String>,
    ports: bool,
    signals: bool,
    constants: bool,
    aliases: bool,
    instances: bool,
    subprograms: bool,
    processes: bool,
    json: bool,
}

impl Subcommand<Session> for Show {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(show::HELP))?;
        Ok(Show {
            ports: cli.check(Arg::flag("ports"))?,
            signals: cli.check(Arg::flag("signals"))?,
            constants: cli.check(Arg::flag("constants"))?,
            aliases: cli.check(Arg::flag("aliases"))?,
            instances: cli.check(Arg::flag("instances"))?,
            subprograms: cli.check(Arg::flag("subprograms"))?,
            processes: cli.check(Arg::flag("processes"))?,
            json: cli.check(Arg::flag("json"))?,
            name: cli.get(Arg::option("name").value("pattern"))?,
            file: cli.require(Arg::positional("file"))?,
        })
    }

    fn execute(self, c: &Session) -> proc::Result {
        let cache = c.get_cache();
        // the first access decides whether the file is readable at all
        let unit = match cache.get(
            &self.file,
            Query::Unit {
                name: self.name.clone(),
            },
        ) {
            Ok(answer) => answer.into_unit(),
            Err(e) => {
                return Err(Error::FileNotRead(self.file.clone(), LastError(e.to_string())))?
            }
        };
        let arch = cache
            .get(
                &self.file,
                Query::Architecture {
                    name: self.name.clone(),
                },
            )
            .ok()
            .and_then(|a| a.into_architecture());
        let instances = cache
            .get(
                &self.file,
                Query::Instances {
                    name: self.name.clone(),
                },
            )
            .ok()
            .and_then(|a| a.into_instances());
        let outline = cache
            .get(&self.file, Query::Outline)
            .ok()
            .and_then(|a| a.into_outline());

        if self.json == true {
            println!(
                "{}",
                serde_json::to_string(&serde_json::json!({
                    "unit": unit,
                    "architecture": arch,
                    "instances": instances,
                    "outline": outline,
                }))?
            );
            return Ok(());
        }
        self.render(unit, arch, instances, outline);
        Ok(())
    }
}

impl Show {
    /// Checks if a section is requested; with no section flags at all, every
    /// section prints.
    fn wants(&self, flag: bool) -> bool {
        let none_selected = self.ports == false
            && self.signals == false
            && self.constants == false
            && self.aliases == false
            && self.instances == false
            && self.subprograms == false
            && self.processes == false;
        flag == true || none_selected == true
    }

    fn render(
        &self,
        unit: Option<ModuleInfo>,
        arch: Option<ArchitectureInfo>,
        instances: Option<Vec<InstanceRef>>,
        outline: Option<Outline>,
    ) -> () {
        let title = unit
            .as_ref()
            .map(|u| u.get_name().to_string())
            .or(arch.as_ref().map(|a| a.get_entity().to_string()))
            .unwrap_or(self.file.file_stem().unwrap_or_default().to_string_lossy().into_owned());
        println!("{}", title);
        println!("{}", "-".repeat(title.len()));

        if self.wants(self.ports) == true {
            if let Some(unit) = &unit {
                if unit.get_ports().is_empty() == false {
                    println!("Ports:");
                    print_decls(unit.get_ports(), true);
                }
            }
        }
        if let Some(arch) = &arch {
            if self.wants(self.constants) == true && arch.get_constants().is_empty() == false {
                println!("Constants:");
                print_decls(arch.get_constants(), false);
            }
            if self.wants(self.signals) == true && arch.get_signals().is_empty() == false {
                println!("Signals:");
                print_decls(arch.get_signals(), false);
            }
            if self.wants(self.aliases) == true && arch.get_aliases().is_empty() == false {
                println!("Aliases:");
                print_decls(arch.get_aliases(), false);
            }
        }
        if self.wants(self.instances) == true {
            if let Some(instances) = &instances {
                if instances.is_empty() == false {
                    println!("Instances:");
                    for inst in instances {
                        println!("  {} ({})", inst.get_label(), inst.get_unit());
                    }
                }
            }
        }
        if let Some(outline) = &outline {
            if self.wants(self.subprograms) == true {
                if outline.procedures.is_empty() == false {
                    println!("Procedures:");
                    for (_, p) in &outline.procedures {
                        print_subprogram(p);
                    }
                }
                if outline.functions.is_empty() == false {
                    println!("Functions:");
                    for (_, f) in &outline.functions {
                        print_subprogram(f);
                    }
                }
            }
            if self.wants(self.processes) == true && outline.processes.is_empty() == false {
                println!("Processes:");
                for label in &outline.processes {
                    println!("  * {}", label);
                }
            }
        }
    }
}

/// The navbar-style direction arrow for one declaration.
fn dir_symbol(d: &Declaration) -> &'static str {
    if d.get_kind() == DeclKind::Constant {
        return " =>";
    }
    match d.get_direction() {
        Some(PortDir::Out) => "<- ",
        Some(PortDir::Inout) => "<->",
        _ => " ->",
    }
}

fn print_decls(decls: &[Declaration], with_dir: bool) -> () {
    let offset = decls.iter().map(|d| d.get_name().len()).max().unwrap_or(0);
    for d in decls {
        let mut line = String::from("  *");
        if with_dir == true {
            line.push_str(&format!(" {}", dir_symbol(d)));
        }
        line.push_str(&format!(" {:<w$}", d.get_name(), w = offset));
        match d.get_type() {
            Some(t) => line.push_str(&format!(" : {}", t)),
            None => (),
        }
        if let Some(value) = d.get_default() {
            match d.get_type() {
                Some(_) => line.push_str(&format!(" := {}", value)),
                // untyped aliases carry only the bound name
                None => line.push_str(&format!(" : {}", value)),
            }
        }
        println!("{}", line);
    }
}

fn print_subprogram(sub: &Subprogram) -> () {
    match sub.get_return_type() {
        Some(ret) => println!("  {} return {}", sub.get_name(), ret),
        None => println!("  {}", sub.get_name()),
    }
    let offset = sub
        .get_args()
        .iter()
        .map(|a| a.get_name().len())
        .max()
        .unwrap_or(0);
    for arg in sub.get_args() {
        println!(
            "    * {} {:<w$} : {}",
            dir_symbol(arg),
            arg.get_name(),
            arg.get_type().unwrap_or(""),
            w = offset
        );
    }
}
