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

use crate::commands::helps::find;
use crate::core::cache::Query;
use crate::core::index::ProjectIndex;
use crate::core::lookup::lookup_declaration;
use crate::core::session::Session;
use crate::core::vhdl::declaration::{DeclSet, Declaration};
use crate::core::vhdl::record::fields_of_record;
use crate::error::{Error, Hint};
use regex::Regex;
use std::env;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Find {
    symbol: String,
    file: Option<PathBuf>,
    path: Option<PathBuf>,
    kind: Option<DeclSet>,
    json: bool,
}

impl Subcommand<Session> for Find {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(find::HELP))?;
        Ok(Find {
            json: cli.check(Arg::flag("json"))?,
            file: cli.get(Arg::option("file").value("file"))?,
            path: cli.get(Arg::option("path").value("dir"))?,
            kind: cli.get(Arg::option("kind").value("category"))?,
            symbol: cli.require(Arg::positional("identifier"))?,
        })
    }

    fn execute(self, c: &Session) -> proc::Result {
        let root = match &self.path {
            Some(p) => p.clone(),
            None => env::current_dir()?,
        };
        let index = ProjectIndex::scan(&root);
        let categories = self.kind.unwrap_or(DeclSet::ALL);

        let found = match self.resolve(&self.symbol, categories, &index, c) {
            Some(d) => d,
            None => return Err(Error::SymbolNotFound(self.symbol.clone(), Hint::PathOption))?,
        };
        // one more hop when the declaration's type is a record
        let fields = self
            .record_of(&found, &index, c)
            .map(|record| fields_of_record(record.get_decl()));

        if self.json == true {
            println!(
                "{}",
                serde_json::to_string(&serde_json::json!({
                    "declaration": found,
                    "fields": fields,
                }))?
            );
            return Ok(());
        }

        println!("{}", found.get_decl());
        if let Some(location) = found.get_location() {
            println!("  from {}:{}", location.file.display(), location.line);
        }
        if let Some(fields) = fields {
            println!("Fields:");
            for f in &fields {
                println!("  * {}", f.get_decl());
            }
        }
        Ok(())
    }
}

impl Find {
    /// Resolves `symbol` the way an editor hover does: the local file first,
    /// escalating to the project candidates when the local match is missing
    /// or untyped.
    fn resolve(
        &self,
        symbol: &str,
        categories: DeclSet,
        index: &ProjectIndex,
        c: &Session,
    ) -> Option<Declaration> {
        let local = match &self.file {
            Some(file) => c
                .get_cache()
                .get(
                    file,
                    Query::Declaration {
                        target: symbol.to_string(),
                        categories: categories,
                    },
                )
                .ok()
                .and_then(|a| a.into_declaration()),
            None => None,
        };
        if let Some(d) = &local {
            if d.get_type().is_some() == true {
                return local;
            }
        }
        lookup_declaration(index, c.get_cache(), symbol, categories).or(local)
    }

    /// Follows `found`'s type one hop to a record declaration, when there is
    /// one to follow.
    fn record_of(
        &self,
        found: &Declaration,
        index: &ProjectIndex,
        c: &Session,
    ) -> Option<Declaration> {
        let dtype = found.get_type()?;
        if dtype == "record" {
            return Some(found.clone());
        }
        // strip any constraint/range from the type expression
        let base = Regex::new(r"\w+").unwrap().find(dtype)?.as_str();
        self.resolve(base, DeclSet::RECORD, index, c)
    }
}
