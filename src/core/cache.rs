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

use indexmap::IndexMap;
use serde_derive::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::SystemTime;

use super::vhdl::architecture::{self, ArchitectureInfo};
use super::vhdl::declaration::{self, DeclSet, Declaration};
use super::vhdl::instance::{self, InstanceRef};
use super::vhdl::subprogram::{self, Subprogram};
use super::vhdl::unit::{self, ModuleInfo};

/// Number of distinct (file, query) keys kept before evicting.
pub const CACHE_CAPACITY: usize = 32;

/// A parameterization of one extractor run against one file.
///
/// Every field that can change the produced answer is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    Declaration { target: String, categories: DeclSet },
    Unit { name: Option<String> },
    Architecture { name: Option<String> },
    Instances { name: Option<String> },
    Outline,
}

/// The subprograms and process labels of one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    pub functions: IndexMap<String, Subprogram>,
    pub procedures: IndexMap<String, Subprogram>,
    pub processes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Declaration(Option<Declaration>),
    Unit(Option<ModuleInfo>),
    Architecture(Option<ArchitectureInfo>),
    Instances(Option<Vec<InstanceRef>>),
    Outline(Outline),
}

impl Answer {
    pub fn into_declaration(self) -> Option<Declaration> {
        match self {
            Self::Declaration(d) => d,
            _ => None,
        }
    }

    pub fn into_unit(self) -> Option<ModuleInfo> {
        match self {
            Self::Unit(u) => u,
            _ => None,
        }
    }

    pub fn into_architecture(self) -> Option<ArchitectureInfo> {
        match self {
            Self::Architecture(a) => a,
            _ => None,
        }
    }

    pub fn into_instances(self) -> Option<Vec<InstanceRef>> {
        match self {
            Self::Instances(i) => i,
            _ => None,
        }
    }

    pub fn into_outline(self) -> Option<Outline> {
        match self {
            Self::Outline(o) => Some(o),
            _ => None,
        }
    }
}

impl Query {
    /// Runs the extractor this query selects over `text`.
    fn evaluate(&self, text: &str) -> Answer {
        match self {
            Self::Declaration { target, categories } => Answer::Declaration(
                declaration::find_declaration(text, target, *categories),
            ),
            Self::Unit { name } => Answer::Unit(unit::parse_unit(text, name.as_deref())),
            Self::Architecture { name } => Answer::Architecture(
                architecture::parse_architecture_decls(text, name.as_deref()),
            ),
            Self::Instances { name } => {
                Answer::Instances(instance::list_instances(text, name.as_deref()))
            }
            Self::Outline => Answer::Outline(Outline {
                functions: subprogram::list_functions(text),
                procedures: subprogram::list_procedures(text),
                processes: subprogram::list_processes(text),
            }),
        }
    }
}

#[derive(Debug)]
struct Slot {
    mtime: SystemTime,
    tick: u64,
    answer: Answer,
}

#[derive(Debug)]
struct Table {
    slots: HashMap<(PathBuf, Query), Slot>,
    tick: u64,
}

/// Memoizes extractor results per (file, query), invalidated by the file's
/// modification time.
///
/// Lookups are safe from multiple threads. The parse itself runs outside the
/// lock; two racing misses both compute the (identical) answer and the last
/// writer wins.
#[derive(Debug)]
pub struct FileCache {
    table: Mutex<Table>,
    capacity: usize,
    reads: AtomicUsize,
    hits: AtomicUsize,
}

impl FileCache {
    pub fn new() -> Self {
        Self::with_capacity(CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: Mutex::new(Table {
                slots: HashMap::new(),
                tick: 0,
            }),
            capacity: capacity,
            reads: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
        }
    }

    /// Answers `query` against the file at `path`, re-reading and re-parsing
    /// only when no entry exists or the file's modification time changed.
    pub fn get(&self, path: &Path, query: Query) -> Result<Answer, std::io::Error> {
        let mtime = std::fs::metadata(path)?.modified()?;
        let key = (path.to_path_buf(), query);
        {
            let mut table = self.table.lock().unwrap();
            table.tick += 1;
            let tick = table.tick;
            if let Some(slot) = table.slots.get_mut(&key) {
                if slot.mtime == mtime {
                    slot.tick = tick;
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(slot.answer.clone());
                }
            }
        }
        let text = std::fs::read_to_string(path)?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        let answer = key.1.evaluate(&text);

        let mut table = self.table.lock().unwrap();
        table.tick += 1;
        let tick = table.tick;
        if table.slots.len() >= self.capacity && table.slots.contains_key(&key) == false {
            // least-recently-used entry goes first
            let oldest = table
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.tick)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                table.slots.remove(&oldest);
            }
        }
        table.slots.insert(
            key,
            Slot {
                mtime: mtime,
                tick: tick,
                answer: answer.clone(),
            },
        );
        Ok(answer)
    }

    /// Number of times a file's contents were read and parsed.
    pub fn file_reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of lookups answered without touching the file's contents.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::tempdir;

    const TOP: &str = "\
entity top is
  port (clk : in std_logic);
end entity;
architecture rtl of top is
begin
  u0 : entity work.sub port map (clk => clk);
end rtl;";

    #[test]
    fn repeated_query_reads_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top.vhd");
        fs::write(&path, TOP).unwrap();

        let cache = FileCache::new();
        let q = Query::Unit {
            name: Some(String::from("top")),
        };
        let first = cache.get(&path, q.clone()).unwrap();
        let second = cache.get(&path, q).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.file_reads(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn mtime_change_invalidates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top.vhd");
        fs::write(&path, TOP).unwrap();

        let cache = FileCache::new();
        let q = Query::Instances {
            name: Some(String::from("top")),
        };
        let first = cache.get(&path, q.clone()).unwrap();
        assert_eq!(first.clone().into_instances().unwrap().len(), 1);

        // bump the timestamp past filesystem granularity
        let mut f = fs::OpenOptions::new().write(true).open(&path).unwrap();
        f.write_all(TOP.as_bytes()).unwrap();
        f.set_times(
            fs::FileTimes::new().set_modified(SystemTime::now() + Duration::from_secs(5)),
        )
        .unwrap();
        drop(f);

        let _ = cache.get(&path, q).unwrap();
        assert_eq!(cache.file_reads(), 2);
    }

    #[test]
    fn distinct_queries_are_distinct_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top.vhd");
        fs::write(&path, TOP).unwrap();

        let cache = FileCache::new();
        let unit = cache
            .get(&path, Query::Unit { name: None })
            .unwrap()
            .into_unit();
        let arch = cache
            .get(&path, Query::Architecture { name: None })
            .unwrap()
            .into_architecture();
        assert_eq!(unit.unwrap().get_name(), "top");
        assert_eq!(arch.unwrap().get_name(), "rtl");
        assert_eq!(cache.file_reads(), 2);
    }

    #[test]
    fn capacity_evicts_least_recent() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..3 {
            let path = dir.path().join(format!("u{}.vhd", i));
            fs::write(&path, format!("entity u{} is end;", i)).unwrap();
            paths.push(path);
        }

        let cache = FileCache::with_capacity(2);
        let q = Query::Unit { name: None };
        cache.get(&paths[0], q.clone()).unwrap();
        cache.get(&paths[1], q.clone()).unwrap();
        cache.get(&paths[2], q.clone()).unwrap();
        // oldest entry was evicted; this is a fresh read
        cache.get(&paths[0], q).unwrap();
        assert_eq!(cache.file_reads(), 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        let cache = FileCache::new();
        let result = cache.get(Path::new("does/not/exist.vhd"), Query::Outline);
        assert_eq!(result.is_err(), true);
    }
}
