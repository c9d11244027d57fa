// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use super::geometry::Rect;
use super::ids::{CourseId, EdgeKey};
use super::node::{Node, NodeRegistry};

pub(crate) fn cid(value: &str) -> CourseId {
    CourseId::normalize(value).expect("course id")
}

pub(crate) fn edge(from: &str, to: &str) -> EdgeKey {
    EdgeKey::new(cid(from), cid(to))
}

pub(crate) fn node(id: &str, column: usize, x: f64, y: f64) -> Node {
    Node::new(cid(id), Rect::new(x, y, 80.0, 40.0), column)
}

/// A in term 0; B and C stacked in term 1.
pub(crate) fn three_node_fan_out() -> NodeRegistry {
    [node("A", 0, 0.0, 0.0), node("B", 1, 150.0, 0.0), node("C", 1, 150.0, 100.0)]
        .into_iter()
        .collect()
}

/// Three terms with a blocker in the middle term at the source row.
pub(crate) fn blocked_middle_column() -> NodeRegistry {
    [
        node("A", 0, 0.0, 0.0),
        node("M1", 1, 150.0, 0.0),
        node("M2", 1, 150.0, 100.0),
        node("D", 2, 300.0, 200.0),
    ]
    .into_iter()
    .collect()
}

/// Two terms with the second one a full row lower.
pub(crate) fn level_pair(dy: f64) -> NodeRegistry {
    [node("A", 0, 0.0, 0.0), node("B", 1, 150.0, dy)].into_iter().collect()
}
