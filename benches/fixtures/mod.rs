// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use prereqmap::layout::{build_adjacency, AdjacencyIndex, RawPrerequisites, RequirementEntry};
use prereqmap::model::{CourseId, Node, NodeRegistry, Rect};

pub const BOX_WIDTH: f64 = 120.0;
pub const BOX_HEIGHT: f64 = 48.0;
pub const TERM_PITCH: f64 = 220.0;
pub const ROW_PITCH: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeLongSkips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurriculumParams {
    pub terms: usize,
    pub courses_per_term: usize,
    pub prerequisites_per_course: usize,
    /// How many terms back a prerequisite may reach.
    pub max_skip: usize,
}

impl CurriculumParams {
    pub const fn new(
        terms: usize,
        courses_per_term: usize,
        prerequisites_per_course: usize,
        max_skip: usize,
    ) -> Self {
        Self { terms, courses_per_term, prerequisites_per_course, max_skip }
    }
}

pub struct Curriculum {
    pub nodes: NodeRegistry,
    pub adjacency: AdjacencyIndex,
}

impl Curriculum {
    pub fn course(&self, term: usize, row: usize) -> CourseId {
        course_id(term, row)
    }
}

pub fn params(case: Case) -> CurriculumParams {
    match case {
        Case::Small => CurriculumParams::new(4, 4, 1, 1),
        Case::MediumDense => CurriculumParams::new(8, 10, 3, 2),
        Case::LargeLongSkips => CurriculumParams::new(12, 24, 4, 5),
    }
}

pub fn fixture(case: Case) -> Curriculum {
    curriculum(params(case))
}

fn course_id(term: usize, row: usize) -> CourseId {
    CourseId::normalize(&format!("{}", 1000 + term * 100 + row)).expect("course id")
}

/// Boxes in a `terms x courses_per_term` grid; every course after the first
/// term lists prerequisites from up to `max_skip` terms back.
pub fn curriculum(params: CurriculumParams) -> Curriculum {
    let mut nodes = NodeRegistry::new();
    for term in 0..params.terms {
        for row in 0..params.courses_per_term {
            let rect = Rect::new(
                term as f64 * TERM_PITCH,
                row as f64 * ROW_PITCH,
                BOX_WIDTH,
                BOX_HEIGHT,
            );
            nodes.insert(Node::new(course_id(term, row), rect, term));
        }
    }

    let mut requirements = Vec::new();
    for term in 1..params.terms {
        for row in 0..params.courses_per_term {
            let reach = params.max_skip.clamp(1, term);
            let prerequisites = (0..params.prerequisites_per_course)
                .map(|k| {
                    let source_term = term - 1 - (row + k) % reach;
                    let source_row = (row * 7 + k * 3) % params.courses_per_term;
                    course_id(source_term, source_row)
                })
                .collect();
            requirements.push(RequirementEntry::new(
                course_id(term, row).as_str(),
                RawPrerequisites::Listed(prerequisites),
            ));
        }
    }

    let adjacency = build_adjacency(&nodes, &requirements);
    Curriculum { nodes, adjacency }
}
