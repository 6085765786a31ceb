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

use crate::commands::helps::tree;
use crate::core::cache::{FileCache, Query};
use crate::core::hierarchy::{HierarchyBuilder, NodeStatus};
use crate::core::index::ProjectIndex;
use crate::core::session::Session;
use crate::error::{Error, Hint};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Tree {
    root: Option<String>,
    path: Option<PathBuf>,
    ascii: bool,
    json: bool,
}

impl Subcommand<Session> for Tree {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(tree::HELP))?;
        Ok(Tree {
            root: cli.get(Arg::option("root").value("unit"))?,
            path: cli.get(Arg::option("path").value("dir"))?,
            ascii: cli.check(Arg::flag("ascii"))?,
            json: cli.check(Arg::flag("json"))?,
        })
    }

    fn execute(self, c: &Session) -> proc::Result {
        let root_dir = match &self.path {
            Some(p) => p.clone(),
            None => env::current_dir()?,
        };
        let index = ProjectIndex::scan(&root_dir);
        if index.get_files().is_empty() == true {
            return Err(Error::NoUnitsFound(root_dir))?;
        }

        let root_unit = match &self.root {
            Some(r) => r.clone(),
            None => Self::find_root(&index, c.get_cache())?,
        };

        let hierarchy = HierarchyBuilder::new(&index, c.get_cache()).build(&root_unit);
        match hierarchy.get_root().get_status() {
            NodeStatus::Unresolved => {
                return Err(Error::UnitNotFound(root_unit, Hint::PathOption))?
            }
            // a black-box component cannot be expanded into a tree
            NodeStatus::Component => return Err(Error::NoArchitectureFound(root_unit))?,
            NodeStatus::Resolved => (),
        }

        match self.json {
            true => println!("{}", serde_json::to_string(&hierarchy)?),
            false => print!(
                "{}",
                hierarchy.render(c.get_settings().get_hierarchy_max_depth(), self.ascii)
            ),
        }
        Ok(())
    }
}

impl Tree {
    /// Picks the root as the single entity never instantiated by any other
    /// unit in the project.
    fn find_root(index: &ProjectIndex, cache: &FileCache) -> Result<String, Error> {
        let mut instantiated: HashSet<String> = HashSet::new();
        for file in index.get_files() {
            let answer = match cache.get(file, Query::Instances { name: None }) {
                Ok(answer) => answer,
                Err(_) => continue,
            };
            if let Some(instances) = answer.into_instances() {
                for inst in instances {
                    instantiated.insert(inst.get_unit().to_ascii_lowercase());
                }
            }
        }
        let roots: Vec<&String> = index
            .get_entities()
            .iter()
            .filter(|e| instantiated.contains(&e.to_ascii_lowercase()) == false)
            .collect();
        match roots.len() {
            0 => Err(Error::NoRootFound(Hint::RootOption)),
            1 => Ok(roots[0].clone()),
            _ => {
                // gather all identifier names
                let mut err_msg = String::new();
                for r in roots {
                    err_msg.push_str(&format!("\t{}\n", r));
                }
                Err(Error::MultipleRoots(err_msg, Hint::RootOption))
            }
        }
    }
}
