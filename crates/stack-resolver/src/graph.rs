//! Dependency graph with cycle detection and deterministic ordering.
//!
//! Nodes are module names; edges point from a module to each provider it
//! requires. Node insertion order is remembered and used for every
//! tie-break, so a graph built from a normalized selection sorts the same
//! way every time.

use std::collections::{BTreeSet, HashMap};

/// Directed graph of requires-edges between included modules.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Names in insertion order.
    nodes: Vec<String>,
    /// Name → insertion index.
    index: HashMap<String, usize>,
    /// `edges[from]` = providers `from` depends on.
    edges: HashMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, keeping the first insertion's position on duplicates.
    pub fn add_node(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.index.contains_key(&name) {
            self.index.insert(name.clone(), self.nodes.len());
            self.edges.entry(name.clone()).or_default();
            self.nodes.push(name);
        }
    }

    /// Declare that `from` depends on `to`. Both nodes must exist; an edge
    /// naming an unknown node is ignored (the caller records it as missing).
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if !self.index.contains_key(from) || !self.index.contains_key(to) {
            return;
        }
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, name: &str) {
        let Some(position) = self.index.remove(name) else {
            return;
        };
        self.nodes.remove(position);
        for index in self.index.values_mut() {
            if *index > position {
                *index -= 1;
            }
        }
        self.edges.remove(name);
        for deps in self.edges.values_mut() {
            deps.remove(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Direct dependencies of a node, in deterministic order.
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.edges
            .get(name)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Find a requires-cycle via depth-first search tracking the current
    /// path.
    ///
    /// Returns the exact cycle in edge order — `[a, b, c]` means a requires
    /// b requires c requires a — rotated to start at its lexicographically
    /// smallest member so the same cycle always reads the same way. `None`
    /// when the graph is acyclic.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut marks: HashMap<&str, Mark> = self
            .nodes
            .iter()
            .map(|n| (n.as_str(), Mark::Unvisited))
            .collect();

        for start in &self.nodes {
            if marks[start.as_str()] != Mark::Unvisited {
                continue;
            }
            let mut path: Vec<&str> = Vec::new();
            if let Some(cycle) = self.dfs(start, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    fn dfs<'a>(
        &'a self,
        node: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        marks.insert(node, Mark::OnPath);
        path.push(node);

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                match marks.get(dep.as_str()).copied() {
                    Some(Mark::OnPath) => {
                        // Back-edge: the cycle is the path slice from the
                        // first occurrence of `dep` to the current node.
                        let start = path
                            .iter()
                            .position(|n| *n == dep.as_str())
                            .unwrap_or(0);
                        let mut cycle: Vec<String> =
                            path[start..].iter().map(|n| n.to_string()).collect();
                        rotate_to_smallest(&mut cycle);
                        return Some(cycle);
                    }
                    Some(Mark::Unvisited) => {
                        if let Some(cycle) = self.dfs(dep, marks, path) {
                            return Some(cycle);
                        }
                    }
                    _ => {}
                }
            }
        }

        path.pop();
        marks.insert(node, Mark::Done);
        None
    }

    /// Topologically sort so every provider precedes its dependents.
    ///
    /// Ties (no dependency relation) break by node insertion order. Returns
    /// the cycle when one prevents a complete ordering.
    pub fn topological_sort(&self) -> Result<Vec<String>, Vec<String>> {
        let mut remaining_deps: HashMap<&str, usize> = self
            .nodes
            .iter()
            .map(|n| {
                let deps = self.edges.get(n.as_str()).map_or(0, |d| {
                    d.iter().filter(|dep| self.contains(dep)).count()
                });
                (n.as_str(), deps)
            })
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut emitted: BTreeSet<&str> = BTreeSet::new();

        while order.len() < self.nodes.len() {
            // Lowest insertion index among nodes whose deps are all emitted.
            let next = self
                .nodes
                .iter()
                .map(String::as_str)
                .find(|n| !emitted.contains(n) && remaining_deps[n] == 0);

            let Some(next) = next else {
                return Err(self.find_cycle().unwrap_or_default());
            };

            emitted.insert(next);
            order.push(next.to_string());

            for (from, deps) in &self.edges {
                if deps.contains(next) && !emitted.contains(from.as_str()) {
                    if let Some(count) = remaining_deps.get_mut(from.as_str()) {
                        *count = count.saturating_sub(1);
                    }
                }
            }
        }

        Ok(order)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Rotate a cycle in place so it starts at its smallest member.
fn rotate_to_smallest(cycle: &mut Vec<String>) {
    if let Some(smallest) = cycle
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
    {
        cycle.rotate_left(smallest);
    }
}
