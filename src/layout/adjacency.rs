// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::model::ids::{CourseId, EdgeKey};
use crate::model::node::NodeRegistry;

/// Prerequisites declared for one course, as delivered by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPrerequisites {
    Listed(Vec<CourseId>),
    /// Could not be parsed; contributes no edges.
    Malformed,
}

impl RawPrerequisites {
    /// Interprets a JSON value: `null`, an id, a delimited string, or an array of ids.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Listed(Vec::new()),
            Value::String(text) => Self::from_text(text),
            Value::Number(number) => match number.as_u64() {
                Some(code) => Self::from_items([code.to_string()]),
                None => Self::Malformed,
            },
            Value::Array(items) => {
                let mut raw = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(text) => raw.push(text.clone()),
                        Value::Number(number) => match number.as_u64() {
                            Some(code) => raw.push(code.to_string()),
                            None => return Self::Malformed,
                        },
                        _ => return Self::Malformed,
                    }
                }
                Self::from_items(raw)
            }
            Value::Bool(_) | Value::Object(_) => Self::Malformed,
        }
    }

    /// Splits free text like `"101, 102 and CS 210"` into ids.
    pub fn from_text(text: &str) -> Self {
        let ids = prerequisite_separator()
            .split(text)
            .filter(|piece| !piece.trim().is_empty())
            .filter_map(|piece| CourseId::normalize(piece).ok())
            .collect();
        Self::Listed(ids)
    }

    fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = Vec::new();
        for item in items {
            match CourseId::normalize(item.as_ref()) {
                Ok(id) => ids.push(id),
                Err(_) => return Self::Malformed,
            }
        }
        Self::Listed(ids)
    }

    pub fn ids(&self) -> &[CourseId] {
        match self {
            Self::Listed(ids) => ids,
            Self::Malformed => &[],
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

fn prerequisite_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"(?i)\s*(?:[,;&/]|\band\b)\s*").expect("prerequisite separator regex")
    })
}

/// One declared requirement: `course` needs every id in `prerequisites`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntry {
    pub course: String,
    pub prerequisites: RawPrerequisites,
}

impl RequirementEntry {
    pub fn new(course: impl Into<String>, prerequisites: RawPrerequisites) -> Self {
        Self { course: course.into(), prerequisites }
    }
}

/// Ordinal of an edge among the edges sharing one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    pub index: usize,
    pub count: usize,
}

impl Lane {
    /// Position along the box side, as a fraction of its length: the side is
    /// divided into `count + 1` equal segments.
    pub fn fraction(&self) -> f64 {
        (self.index + 1) as f64 / (self.count + 1) as f64
    }
}

/// Outgoing/incoming prerequisite edges per course, in declaration order.
///
/// Declaration order seeds lane indices, so it is preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    outgoing: BTreeMap<CourseId, Vec<EdgeKey>>,
    incoming: BTreeMap<CourseId, Vec<EdgeKey>>,
    edges: Vec<EdgeKey>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from already normalized edges (duplicates and self-loops dropped).
    pub fn from_edges<I: IntoIterator<Item = EdgeKey>>(edges: I) -> Self {
        let mut index = Self::new();
        for edge in edges {
            index.insert_edge(edge);
        }
        index
    }

    fn register(&mut self, id: &CourseId) {
        self.outgoing.entry(id.clone()).or_default();
        self.incoming.entry(id.clone()).or_default();
    }

    /// Appends `edge`; returns `false` for a self-loop or an edge already present.
    pub fn insert_edge(&mut self, edge: EdgeKey) -> bool {
        if edge.from == edge.to {
            tracing::debug!(edge = %edge, "dropping self-referencing prerequisite");
            return false;
        }
        if self.outgoing.get(&edge.from).is_some_and(|edges| edges.contains(&edge)) {
            tracing::debug!(edge = %edge, "dropping duplicate prerequisite");
            return false;
        }

        self.register(&edge.from);
        self.outgoing.entry(edge.from.clone()).or_default().push(edge.clone());
        self.register(&edge.to);
        self.incoming.entry(edge.to.clone()).or_default().push(edge.clone());
        self.edges.push(edge);
        true
    }

    /// All edges in declaration order.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn outgoing(&self, id: &CourseId) -> &[EdgeKey] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming(&self, id: &CourseId) -> &[EdgeKey] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_course(&self, id: &CourseId) -> bool {
        self.outgoing.contains_key(id)
    }

    pub fn source_lane(&self, edge: &EdgeKey) -> Option<Lane> {
        lane_of(self.outgoing(&edge.from), edge)
    }

    pub fn dest_lane(&self, edge: &EdgeKey) -> Option<Lane> {
        lane_of(self.incoming(&edge.to), edge)
    }

    /// Direct prerequisites and direct dependents of `id`.
    pub fn neighbors(&self, id: &CourseId) -> BTreeSet<CourseId> {
        let successors = self.outgoing(id).iter().map(|edge| edge.to.clone());
        let predecessors = self.incoming(id).iter().map(|edge| edge.from.clone());
        successors.chain(predecessors).collect()
    }
}

fn lane_of(edges: &[EdgeKey], edge: &EdgeKey) -> Option<Lane> {
    let index = edges.iter().position(|candidate| candidate == edge)?;
    Some(Lane { index, count: edges.len() })
}

/// Builds the adjacency index for `nodes` from raw requirement declarations.
///
/// Registry nodes are registered first (so every rendered course has, possibly
/// empty, edge lists). Entries are then applied in declaration order; an entry
/// whose course id or prerequisite list cannot be parsed contributes nothing.
pub fn build_adjacency(nodes: &NodeRegistry, requirements: &[RequirementEntry]) -> AdjacencyIndex {
    let mut index = AdjacencyIndex::new();
    for node in nodes.iter() {
        index.register(node.id());
    }

    for entry in requirements {
        let course = match CourseId::normalize(&entry.course) {
            Ok(course) => course,
            Err(err) => {
                tracing::debug!(course = %entry.course, %err, "skipping requirement entry");
                continue;
            }
        };
        if entry.prerequisites.is_malformed() {
            tracing::debug!(%course, "malformed prerequisites treated as none");
            continue;
        }

        index.register(&course);
        for prerequisite in entry.prerequisites.ids() {
            index.insert_edge(EdgeKey::new(prerequisite.clone(), course.clone()));
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{build_adjacency, AdjacencyIndex, Lane, RawPrerequisites, RequirementEntry};
    use crate::model::fixtures;
    use crate::model::ids::{CourseId, EdgeKey};
    use crate::model::node::NodeRegistry;

    fn cid(value: &str) -> CourseId {
        CourseId::normalize(value).expect("course id")
    }

    fn ids(values: &[&str]) -> Vec<CourseId> {
        values.iter().map(|value| cid(value)).collect()
    }

    #[rstest]
    #[case(json!(null), Some(vec![]))]
    #[case(json!("101, 102; CS 210"), Some(vec!["0101", "0102", "CS 210"]))]
    #[case(json!("MATH 1 and PHYS 2 & 3"), Some(vec!["MATH 1", "PHYS 2", "0003"]))]
    #[case(json!(42), Some(vec!["0042"]))]
    #[case(json!(["7", 8, " CS 9 "]), Some(vec!["0007", "0008", "CS 9"]))]
    #[case(json!("101,,"), Some(vec!["0101"]))]
    #[case(json!(["7", {"x": 1}]), None)]
    #[case(json!(["7", ""]), None)]
    #[case(json!(1.5), None)]
    #[case(json!(-3), None)]
    #[case(json!(true), None)]
    #[case(json!({"all_of": ["101"]}), None)]
    fn parses_raw_prerequisites(
        #[case] value: serde_json::Value,
        #[case] expected: Option<Vec<&str>>,
    ) {
        let parsed = RawPrerequisites::from_json(&value);
        match expected {
            Some(expected) => assert_eq!(parsed, RawPrerequisites::Listed(ids(&expected))),
            None => assert!(parsed.is_malformed(), "expected malformed: {parsed:?}"),
        }
    }

    #[test]
    fn preserves_declaration_order_in_both_directions() {
        let registry = fixtures::three_node_fan_out();
        let requirements = vec![
            RequirementEntry::new("C", RawPrerequisites::from_text("A")),
            RequirementEntry::new("B", RawPrerequisites::from_text("A")),
        ];

        let index = build_adjacency(&registry, &requirements);

        assert_eq!(
            index.outgoing(&cid("A")),
            &[EdgeKey::new(cid("A"), cid("C")), EdgeKey::new(cid("A"), cid("B"))]
        );
        assert_eq!(index.incoming(&cid("B")), &[EdgeKey::new(cid("A"), cid("B"))]);
        assert_eq!(index.edges().len(), 2);
        assert_eq!(
            index.source_lane(&EdgeKey::new(cid("A"), cid("B"))),
            Some(Lane { index: 1, count: 2 })
        );
    }

    #[test]
    fn malformed_entries_degrade_locally() {
        let registry = fixtures::three_node_fan_out();
        let requirements = vec![
            RequirementEntry::new("B", RawPrerequisites::Malformed),
            RequirementEntry::new("   ", RawPrerequisites::from_text("A")),
            RequirementEntry::new("C", RawPrerequisites::from_text("A")),
        ];

        let index = build_adjacency(&registry, &requirements);

        assert!(index.incoming(&cid("B")).is_empty());
        assert!(index.contains_course(&cid("B")));
        assert_eq!(index.edges(), &[EdgeKey::new(cid("A"), cid("C"))]);
    }

    #[test]
    fn drops_duplicates_and_self_loops() {
        let requirements = vec![
            RequirementEntry::new("B", RawPrerequisites::from_text("A, A, B")),
            RequirementEntry::new("B", RawPrerequisites::from_text("A")),
        ];

        let index = build_adjacency(&NodeRegistry::new(), &requirements);

        assert_eq!(index.edges(), &[EdgeKey::new(cid("A"), cid("B"))]);
        assert!(index.outgoing(&cid("B")).is_empty());
    }

    #[test]
    fn registers_unreferenced_nodes_with_empty_lists() {
        let registry = fixtures::three_node_fan_out();
        let index = build_adjacency(&registry, &[]);
        for id in ["A", "B", "C"] {
            assert!(index.contains_course(&cid(id)));
            assert!(index.outgoing(&cid(id)).is_empty());
        }
    }

    #[test]
    fn neighbors_cover_both_directions() {
        let index = AdjacencyIndex::from_edges([
            EdgeKey::new(cid("A"), cid("B")),
            EdgeKey::new(cid("B"), cid("C")),
            EdgeKey::new(cid("D"), cid("E")),
        ]);
        assert_eq!(index.neighbors(&cid("B")).into_iter().collect::<Vec<_>>(), ids(&["A", "C"]));
        assert!(index.neighbors(&cid("missing")).is_empty());
    }

    #[test]
    fn lane_fraction_divides_the_side_evenly() {
        let lanes = (0..3).map(|index| Lane { index, count: 3 }.fraction()).collect::<Vec<_>>();
        assert_eq!(lanes, vec![0.25, 0.5, 0.75]);
    }
}
