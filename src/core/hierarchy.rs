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

use serde_derive::Serialize;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use super::cache::{FileCache, Query};
use super::index::SymbolIndex;

/// How a unit's definition was (or was not) located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// An architecture was found; the node's children are its instances.
    Resolved,
    /// The unit exists but has no architecture (a black-box component).
    Component,
    /// The symbol lookup produced no candidate files.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Child {
    /// The instantiation label.
    pub label: String,
    /// Index of the referenced unit's node in the arena.
    pub node: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    unit: String,
    status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<PathBuf>,
    children: Vec<Child>,
}

impl HierarchyNode {
    pub fn get_unit(&self) -> &str {
        &self.unit
    }

    pub fn get_status(&self) -> NodeStatus {
        self.status
    }

    pub fn get_file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    pub fn get_children(&self) -> &[Child] {
        &self.children
    }
}

/// The instance hierarchy as an arena of unit nodes.
///
/// Each design unit appears exactly once; a unit instantiated from several
/// places is shared by index, so cycles in the design close back onto
/// existing nodes instead of recursing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    root: usize,
}

impl Hierarchy {
    pub fn get_root(&self) -> &HierarchyNode {
        &self.nodes[self.root]
    }

    pub fn get_node(&self, index: usize) -> Option<&HierarchyNode> {
        self.nodes.get(index)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Draws the tree rooted at the hierarchy's root unit.
    ///
    /// Expansion stops at `max_depth` levels with an explicit truncation
    /// marker, so cyclic and self-referential designs always terminate.
    pub fn render(&self, max_depth: usize, ascii: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.get_root().get_unit()));
        self.render_level(self.root, "", 1, max_depth, &mut out);
        match ascii {
            true => Self::to_ascii(&out),
            false => out,
        }
    }

    fn render_level(
        &self,
        index: usize,
        prefix: &str,
        depth: usize,
        max_depth: usize,
        out: &mut String,
    ) -> () {
        let node = &self.nodes[index];
        if node.children.is_empty() == true {
            return;
        }
        if depth > max_depth {
            out.push_str(&format!("{}└─ ... (max depth reached)\n", prefix));
            return;
        }
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            let last = i + 1 == count;
            let branch = match last {
                true => "└─ ",
                false => "├─ ",
            };
            let target = &self.nodes[child.node];
            let marker = match target.get_status() {
                NodeStatus::Component => "  [C]",
                NodeStatus::Unresolved => "  [U]",
                NodeStatus::Resolved => "",
            };
            out.push_str(&format!(
                "{}{}{} ({}){}\n",
                prefix,
                branch,
                child.label,
                target.get_unit(),
                marker
            ));
            let extension = match last {
                true => "   ",
                false => "│  ",
            };
            self.render_level(
                child.node,
                &format!("{}{}", prefix, extension),
                depth + 1,
                max_depth,
                out,
            );
        }
    }

    /// Converts the treeview text from extended ascii characters to original
    /// ascii characters.
    fn to_ascii(s: &str) -> String {
        let mut transform = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            match c {
                '─' => transform.push('-'),
                '│' => transform.push('|'),
                '├' => transform.push('+'),
                '└' => transform.push('\\'),
                _ => transform.push(c),
            }
        }
        transform
    }
}

/// Expands instance lists across files into a `Hierarchy`, one unit at a
/// time, consulting the symbol index for candidate files and the cache for
/// each file's instance list.
pub struct HierarchyBuilder<'a> {
    index: &'a dyn SymbolIndex,
    cache: &'a FileCache,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(index: &'a dyn SymbolIndex, cache: &'a FileCache) -> Self {
        Self {
            index: index,
            cache: cache,
        }
    }

    /// Builds the hierarchy rooted at `root`.
    ///
    /// A failed file read or an unmatched grammar on one candidate never
    /// aborts the build; the walk moves to the next candidate, and a unit
    /// with no usable candidate is classified rather than reported as an
    /// error.
    pub fn build(&self, root: &str) -> Hierarchy {
        let mut nodes: Vec<HierarchyNode> = Vec::new();
        let mut visited: HashMap<String, usize> = HashMap::new();
        let mut pending: VecDeque<usize> = VecDeque::new();

        let root_index = Self::intern(root, &mut nodes, &mut visited, &mut pending);
        while let Some(current) = pending.pop_front() {
            let unit = nodes[current].unit.clone();
            let candidates = self.index.candidates(&unit);
            let had_candidates = candidates.is_empty() == false;

            let mut found: Option<(PathBuf, Vec<Child>)> = None;
            for file in candidates {
                let answer = match self.cache.get(
                    &file,
                    Query::Instances {
                        name: Some(unit.clone()),
                    },
                ) {
                    Ok(answer) => answer,
                    // unreadable candidate: move on to the next one
                    Err(_) => continue,
                };
                if let Some(instances) = answer.into_instances() {
                    let children = instances
                        .into_iter()
                        .map(|inst| Child {
                            node: Self::intern(
                                inst.get_unit(),
                                &mut nodes,
                                &mut visited,
                                &mut pending,
                            ),
                            label: inst.get_label().to_string(),
                        })
                        .collect();
                    found = Some((file, children));
                    break;
                }
            }
            match found {
                Some((file, children)) => {
                    nodes[current].status = NodeStatus::Resolved;
                    nodes[current].file = Some(file);
                    nodes[current].children = children;
                }
                None => {
                    nodes[current].status = match had_candidates {
                        true => NodeStatus::Component,
                        false => NodeStatus::Unresolved,
                    };
                }
            }
        }
        Hierarchy {
            nodes: nodes,
            root: root_index,
        }
    }

    /// Returns the node index for `unit`, creating and queueing it on first
    /// sight.
    fn intern(
        unit: &str,
        nodes: &mut Vec<HierarchyNode>,
        visited: &mut HashMap<String, usize>,
        pending: &mut VecDeque<usize>,
    ) -> usize {
        let key = unit.to_ascii_lowercase();
        match visited.get(&key) {
            Some(i) => *i,
            None => {
                let index = nodes.len();
                nodes.push(HierarchyNode {
                    unit: unit.to_string(),
                    status: NodeStatus::Unresolved,
                    file: None,
                    children: Vec::new(),
                });
                visited.insert(key, index);
                pending.push_back(index);
                index
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::index::ProjectIndex;
    use std::fs;
    use tempfile::tempdir;

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("top.vhd"),
            "\
entity top is end;
architecture rtl of top is
begin
  u_mid : entity work.mid port map (a => a);
end rtl;",
        )
        .unwrap();
        fs::write(
            dir.path().join("mid.vhd"),
            "\
entity mid is end;
architecture rtl of mid is
  component leaf_c
  end component;
begin
  u_leaf  : leaf_c port map (a => a);
  u_ghost : entity work.ghost port map (a => a);
end rtl;",
        )
        .unwrap();
        // leaf_c is declared but never given an architecture
        fs::write(
            dir.path().join("leaf_c.vhd"),
            "component leaf_c\nend component;",
        )
        .unwrap();
        dir
    }

    #[test]
    fn classification() {
        let dir = project();
        let index = ProjectIndex::scan(dir.path());
        let cache = FileCache::new();
        let hier = HierarchyBuilder::new(&index, &cache).build("top");

        assert_eq!(hier.get_root().get_status(), NodeStatus::Resolved);
        assert_eq!(hier.get_root().get_children().len(), 1);
        let mid = hier.get_node(hier.get_root().get_children()[0].node).unwrap();
        assert_eq!(mid.get_unit(), "mid");
        assert_eq!(mid.get_status(), NodeStatus::Resolved);
        // direct-entity instantiations are listed ahead of mapped ones
        let statuses: Vec<(&str, NodeStatus)> = mid
            .get_children()
            .iter()
            .map(|c| {
                let n = hier.get_node(c.node).unwrap();
                (n.get_unit(), n.get_status())
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("ghost", NodeStatus::Unresolved),
                ("leaf_c", NodeStatus::Component)
            ]
        );
    }

    #[test]
    fn render_marks_leaf_kinds() {
        let dir = project();
        let index = ProjectIndex::scan(dir.path());
        let cache = FileCache::new();
        let hier = HierarchyBuilder::new(&index, &cache).build("top");
        let text = hier.render(32, true);
        assert_eq!(text.starts_with("top\n"), true);
        assert_eq!(text.contains("u_mid (mid)"), true);
        assert_eq!(text.contains("u_leaf (leaf_c)  [C]"), true);
        assert_eq!(text.contains("u_ghost (ghost)  [U]"), true);
    }

    #[test]
    fn self_instantiation_terminates() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("rec.vhd"),
            "\
entity rec is end;
architecture rtl of rec is
begin
  again : entity work.rec port map (a => a);
end rtl;",
        )
        .unwrap();
        let index = ProjectIndex::scan(dir.path());
        let cache = FileCache::new();
        let hier = HierarchyBuilder::new(&index, &cache).build("rec");

        // one shared node, child pointing back at itself
        assert_eq!(hier.node_count(), 1);
        let text = hier.render(4, false);
        assert_eq!(text.contains("(max depth reached)"), true);
        // rendering is bounded: 1 root + 4 levels + 1 marker
        assert_eq!(text.lines().count() <= 6, true);
    }

    #[test]
    fn shared_subunit_is_one_node() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("dual.vhd"),
            "\
entity dual is end;
architecture rtl of dual is
begin
  left  : entity work.cell port map (a => a);
  right : entity work.cell port map (a => a);
end rtl;",
        )
        .unwrap();
        fs::write(
            dir.path().join("cell.vhd"),
            "entity cell is end;\narchitecture rtl of cell is begin end rtl;",
        )
        .unwrap();
        let index = ProjectIndex::scan(dir.path());
        let cache = FileCache::new();
        let hier = HierarchyBuilder::new(&index, &cache).build("dual");
        assert_eq!(hier.node_count(), 2);
        assert_eq!(hier.get_root().get_children().len(), 2);
    }
}
