//! Profession chain walker.
//!
//! Every profession is walked along its `nextProfession` links inside its own
//! career system. A walk stops at the first repeated identifier (cycle) or at
//! the first link that does not resolve in the system (break). Backward
//! `previousProfession` requirements are checked against the forward links.
//!
//! Each defect is reported once: a cycle once per distinct loop, a broken link
//! once per `(from, to)` pair. Walks from inner professions still run because
//! a pure cycle has no head, but only walks from a chain head report
//! `VALID_CHAIN`.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use super::registry::IdentifierRegistry;
use crate::findings::{ChainLink, Detail, Finding};
use crate::parse::types::{CareerSystem, Profession, Worldbook};

#[derive(Debug, Default)]
pub struct ChainReport {
    pub findings: Vec<Finding>,
    /// Distinct cycles found across all systems.
    pub cycles: usize,
}

/// Forward-link graph of one career system. Node weights are the first
/// profession declared under each identifier.
pub struct SystemGraph<'a> {
    pub graph: DiGraph<&'a Profession, ()>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
}

impl<'a> SystemGraph<'a> {
    pub fn build(system: &'a CareerSystem) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for (_, profession) in system.professions() {
            let Some(uid) = profession.id() else { continue };
            node_indices
                .entry(uid)
                .or_insert_with(|| graph.add_node(profession));
        }

        let edges: Vec<(NodeIndex, NodeIndex)> = graph
            .node_indices()
            .filter_map(|idx| {
                let next = graph[idx].next()?;
                node_indices.get(next).map(|&target| (idx, target))
            })
            .collect();
        for (source, target) in edges {
            graph.add_edge(source, target, ());
        }

        SystemGraph {
            graph,
            node_indices,
        }
    }

    pub fn get(&self, uid: &str) -> Option<&'a Profession> {
        self.node_indices.get(uid).map(|&idx| self.graph[idx])
    }

    /// True when no profession of the system links forward to `uid`.
    pub fn is_head(&self, uid: &str) -> bool {
        self.node_indices.get(uid).is_none_or(|&idx| {
            self.graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
        })
    }
}

/// Walk every profession chain in every career system.
pub fn walk_chains(worldbook: &Worldbook, registry: &IdentifierRegistry) -> ChainReport {
    let mut report = ChainReport::default();

    for (system_name, system) in worldbook.systems() {
        tracing::debug!(system = system_name, "walking profession chains");
        let index = SystemGraph::build(system);
        let mut walker = SystemWalker {
            system: system_name,
            index: &index,
            registry,
            seen_cycles: HashSet::new(),
            seen_breaks: HashSet::new(),
            report: &mut report,
        };
        for (_, profession) in system.professions() {
            let Some(uid) = profession.id() else { continue };
            walker.walk(profession, uid);
        }
    }

    tracing::info!(
        findings = report.findings.len(),
        cycles = report.cycles,
        "profession chains analyzed"
    );
    report
}

struct SystemWalker<'a, 'r> {
    system: &'a str,
    index: &'r SystemGraph<'a>,
    registry: &'r IdentifierRegistry,
    seen_cycles: HashSet<Vec<&'a str>>,
    seen_breaks: HashSet<(&'a str, &'a str)>,
    report: &'r mut ChainReport,
}

impl<'a> SystemWalker<'a, '_> {
    fn walk(&mut self, start: &'a Profession, start_id: &'a str) {
        let complete = self.walk_forward(start, start_id);
        self.check_backlink(start, start_id);
        if let Some(chain) = complete {
            if chain.len() > 1 && self.index.is_head(start_id) {
                self.report.findings.push(Finding::info(
                    Detail::ValidChain {
                        system: self.system.to_string(),
                        start_profession: start_id.to_string(),
                        chain_length: chain.len(),
                        chain: owned(&chain),
                    },
                    format!("Valid chain in {}: {}", self.system, chain.join(" -> ")),
                ));
            }
        }
    }

    /// Follow forward links from `start`. Returns the chain when the walk
    /// ends without a cycle or a break.
    fn walk_forward(&mut self, start: &'a Profession, start_id: &'a str) -> Option<Vec<&'a str>> {
        let mut chain = vec![start_id];
        let mut visited = HashSet::from([start_id]);
        let mut current = start;
        let mut current_id = start_id;

        while let Some(next) = current.next() {
            if visited.contains(next) {
                self.report_cycle(&chain, next);
                return None;
            }
            let Some(profession) = self.index.get(next) else {
                self.report_break(current_id, next);
                return None;
            };
            visited.insert(next);
            chain.push(next);
            current = profession;
            current_id = next;
        }

        Some(chain)
    }

    fn report_cycle(&mut self, chain: &[&'a str], repeated: &'a str) {
        let loop_start = chain.iter().position(|id| *id == repeated).unwrap_or(0);
        let mut members = chain[loop_start..].to_vec();
        members.sort_unstable();
        if !self.seen_cycles.insert(members) {
            return;
        }

        let mut full = owned(chain);
        full.push(repeated.to_string());
        self.report.cycles += 1;
        self.report.findings.push(Finding::critical(
            Detail::CircularReference {
                system: self.system.to_string(),
                chain: full.clone(),
            },
            format!(
                "Circular reference detected in {}: {}",
                self.system,
                full.join(" -> ")
            ),
        ));
    }

    fn report_break(&mut self, from: &'a str, to: &'a str) {
        if !self.seen_breaks.insert((from, to)) {
            return;
        }
        let elsewhere = match self.registry.get(to) {
            Some(declaration) => format!(
                " (declared in {}; chains do not cross systems)",
                declaration.context
            ),
            None => String::new(),
        };
        self.report.findings.push(Finding::error(
            Detail::BrokenReference {
                system: self.system.to_string(),
                from: from.to_string(),
                to: to.to_string(),
                link: ChainLink::NextProfession,
            },
            format!(
                "nextProfession reference \"{}\" from {} not found in {}{}",
                to, from, self.system, elsewhere
            ),
        ));
    }

    fn check_backlink(&mut self, profession: &'a Profession, uid: &'a str) {
        let Some(previous) = profession.previous() else {
            return;
        };

        match self.index.get(previous) {
            None => self.report.findings.push(Finding::error(
                Detail::BrokenReference {
                    system: self.system.to_string(),
                    from: uid.to_string(),
                    to: previous.to_string(),
                    link: ChainLink::PreviousProfession,
                },
                format!(
                    "previousProfession reference \"{}\" from {} not found in {}",
                    previous, uid, self.system
                ),
            )),
            Some(prev) if prev.next() != Some(uid) => self.report.findings.push(Finding::warning(
                Detail::InconsistentChain {
                    system: self.system.to_string(),
                    profession: uid.to_string(),
                    previous: previous.to_string(),
                },
                format!(
                    "previousProfession chain inconsistency in {}: {}.nextProfession should be {}",
                    self.system, previous, uid
                ),
            )),
            Some(_) => {}
        }
    }
}

fn owned(chain: &[&str]) -> Vec<String> {
    chain.iter().map(|id| id.to_string()).collect()
}
