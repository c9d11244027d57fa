// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{OverlayTheme, SelectionPolicy, StrokeStyle};
use crate::layout::adjacency::AdjacencyIndex;
use crate::layout::router::EdgePath;
use crate::model::ids::{CourseId, EdgeKey};

/// Node ids and edge keys the rendering surface should emphasize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decorations {
    pub nodes: BTreeSet<CourseId>,
    pub edges: BTreeSet<EdgeKey>,
}

impl Decorations {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Active node set for `selected` under `policy`. No selection means no active nodes.
pub fn select(
    selected: Option<&CourseId>,
    adjacency: &AdjacencyIndex,
    policy: SelectionPolicy,
) -> BTreeSet<CourseId> {
    let Some(selected) = selected else {
        return BTreeSet::new();
    };

    let mut active = BTreeSet::from([selected.clone()]);
    if policy == SelectionPolicy::Neighbors {
        active.extend(adjacency.neighbors(selected));
    }
    active
}

/// Selection after a click on `clicked`: the same node again clears it,
/// any other node replaces it.
pub fn toggle_selection(current: Option<&CourseId>, clicked: &CourseId) -> Option<CourseId> {
    match current {
        Some(current) if current == clicked => None,
        _ => Some(clicked.clone()),
    }
}

/// An edge is active when either endpoint is.
pub fn is_active_edge(edge: &EdgeKey, active: &BTreeSet<CourseId>) -> bool {
    has_active_endpoint(&edge.from, &edge.to, active)
}

fn has_active_endpoint(from: &CourseId, to: &CourseId, active: &BTreeSet<CourseId>) -> bool {
    active.contains(from) || active.contains(to)
}

/// Restyles `paths` for the `active` set without touching their geometry.
///
/// Flags each path, moves active paths behind inactive ones (the draw order,
/// so active strokes end up on top) keeping relative order within each layer,
/// and returns the matching decorations.
pub fn apply(paths: &mut [EdgePath], active: &BTreeSet<CourseId>) -> Decorations {
    let mut decorations =
        Decorations { nodes: active.iter().cloned().collect(), edges: BTreeSet::new() };

    for path in paths.iter_mut() {
        path.active = has_active_endpoint(&path.from, &path.to, active);
        if path.active {
            decorations.nodes.insert(path.from.clone());
            decorations.nodes.insert(path.to.clone());
            decorations.edges.insert(path.key());
        }
    }

    paths.sort_by_key(|path| path.active);
    decorations
}

/// Paths paired with the stroke of their layer, in draw order.
pub fn styled<'a>(
    paths: &'a [EdgePath],
    theme: &'a OverlayTheme,
) -> impl Iterator<Item = (&'a EdgePath, &'a StrokeStyle)> + 'a {
    paths.iter().map(move |path| (path, theme.stroke(path.active)))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use smallvec::smallvec;

    use super::{apply, is_active_edge, select, styled, toggle_selection};
    use crate::config::{OverlayTheme, SelectionPolicy};
    use crate::layout::adjacency::AdjacencyIndex;
    use crate::layout::router::{EdgePath, RouteKind};
    use crate::model::fixtures::{cid, edge};
    use crate::model::geometry::Point;

    fn path(from: &str, to: &str) -> EdgePath {
        EdgePath {
            from: cid(from),
            to: cid(to),
            points: smallvec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            kind: RouteKind::Direct,
            active: false,
        }
    }

    fn two_chains() -> AdjacencyIndex {
        AdjacencyIndex::from_edges([edge("A", "B"), edge("C", "D")])
    }

    #[test]
    fn selecting_a_only_highlights_its_own_edge() {
        let adjacency = two_chains();
        let active = select(Some(&cid("A")), &adjacency, SelectionPolicy::Node);
        let mut paths = vec![path("A", "B"), path("C", "D")];

        let decorations = apply(&mut paths, &active);

        let flags =
            paths.iter().map(|path| (path.key().to_string(), path.active)).collect::<Vec<_>>();
        assert_eq!(flags, vec![("C->D".to_owned(), false), ("A->B".to_owned(), true)]);
        assert_eq!(decorations.nodes, BTreeSet::from([cid("A"), cid("B")]));
        assert_eq!(decorations.edges, BTreeSet::from([edge("A", "B")]));
    }

    #[test]
    fn neighbors_policy_activates_direct_peers() {
        let adjacency =
            AdjacencyIndex::from_edges([edge("A", "B"), edge("B", "C"), edge("C", "D")]);
        let active = select(Some(&cid("B")), &adjacency, SelectionPolicy::Neighbors);
        assert_eq!(active, BTreeSet::from([cid("A"), cid("B"), cid("C")]));

        let active = select(Some(&cid("B")), &adjacency, SelectionPolicy::Node);
        assert_eq!(active, BTreeSet::from([cid("B")]));
    }

    #[test]
    fn clearing_the_selection_deactivates_everything() {
        let adjacency = two_chains();
        let mut paths = vec![path("A", "B"), path("C", "D")];
        apply(&mut paths, &select(Some(&cid("A")), &adjacency, SelectionPolicy::Node));

        let decorations = apply(&mut paths, &select(None, &adjacency, SelectionPolicy::Node));

        assert!(paths.iter().all(|path| !path.active));
        assert!(decorations.is_empty());
    }

    #[test]
    fn selected_node_without_edges_is_still_decorated() {
        let active = select(Some(&cid("Z")), &two_chains(), SelectionPolicy::Neighbors);
        let mut paths = vec![path("A", "B")];
        let decorations = apply(&mut paths, &active);
        assert_eq!(decorations.nodes, BTreeSet::from([cid("Z")]));
        assert!(decorations.edges.is_empty());
    }

    #[test]
    fn toggling_the_same_node_deselects_it() {
        assert_eq!(toggle_selection(None, &cid("A")), Some(cid("A")));
        assert_eq!(toggle_selection(Some(&cid("A")), &cid("A")), None);
        assert_eq!(toggle_selection(Some(&cid("A")), &cid("B")), Some(cid("B")));
    }

    #[test]
    fn layers_use_the_theme_strokes() {
        let theme = OverlayTheme::default();
        let mut paths = vec![path("A", "B"), path("C", "D")];
        apply(&mut paths, &BTreeSet::from([cid("D")]));

        let markers =
            styled(&paths, &theme).map(|(_, stroke)| stroke.marker.as_str()).collect::<Vec<_>>();
        assert_eq!(markers, vec!["arrow", "arrow-active"]);
        assert!(is_active_edge(&edge("C", "D"), &BTreeSet::from([cid("D")])));
    }

    #[test]
    fn applied_flags_agree_with_the_edge_predicate() {
        let active = BTreeSet::from([cid("B"), cid("E")]);
        let mut paths = vec![path("A", "B"), path("C", "D"), path("E", "A"), path("D", "C")];

        apply(&mut paths, &active);

        for path in &paths {
            assert_eq!(path.active, is_active_edge(&path.key(), &active), "{}", path.key());
        }
        assert_eq!(paths.iter().filter(|path| path.active).count(), 2);
    }

    #[test]
    fn decorations_serialize_edge_keys_as_strings() {
        let mut paths = vec![path("A", "B")];
        let decorations = apply(&mut paths, &BTreeSet::from([cid("A")]));
        let json = serde_json::to_value(&decorations).expect("json");
        assert_eq!(json, serde_json::json!({"nodes": ["A", "B"], "edges": ["A->B"]}));
    }
}
