// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene files: one layout request as a JSON document.
//!
//! ```json
//! {
//!   "nodes": [{"id": "101", "box": {"x": 0, "y": 0, "width": 80, "height": 40}, "column": 0}],
//!   "requirements": {"201": "101, 102"},
//!   "selection": "101",
//!   "config": {"lane_spacing": 6}
//! }
//! ```
//!
//! Requirements keep their document order, which seeds lane assignment.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{ConfigError, LayoutConfig, OverlayTheme, StrokeStyle};
use crate::layout::adjacency::{build_adjacency, RawPrerequisites, RequirementEntry};
use crate::layout::engine::{Layout, LayoutEngine};
use crate::layout::router::EdgePath;
use crate::model::geometry::Rect;
use crate::model::ids::{CourseId, EdgeKey};
use crate::model::node::{Node, NodeRegistry};
use crate::render::overlay::{styled, Decorations};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneNode {
    pub id: String,
    #[serde(rename = "box")]
    pub rect: Rect,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    /// Course id to its raw prerequisites: `null`, an id, a delimited string or a list.
    #[serde(default)]
    pub requirements: Map<String, Value>,
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub config: LayoutConfig,
}

impl Scene {
    pub fn from_json_str(input: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_json::from_str(input).map_err(SceneError::Json)?;
        scene.config.validate().map_err(SceneError::Config)?;
        Ok(scene)
    }

    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let input = fs::read_to_string(path)
            .map_err(|source| SceneError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&input)
    }

    /// Node registry for this scene. Entries with a blank id, a malformed box or
    /// a repeated id are left out.
    pub fn registry(&self) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        for node in &self.nodes {
            match CourseId::normalize(&node.id) {
                Ok(id) => {
                    registry.insert(Node::new(id, node.rect, node.column));
                }
                Err(err) => tracing::debug!(id = %node.id, %err, "skipping scene node"),
            }
        }
        registry
    }

    pub fn requirement_entries(&self) -> Vec<RequirementEntry> {
        self.requirements
            .iter()
            .map(|(course, raw)| RequirementEntry::new(course, RawPrerequisites::from_json(raw)))
            .collect()
    }

    /// Normalized selection; a blank id selects nothing.
    pub fn selection_id(&self) -> Option<CourseId> {
        let raw = self.selection.as_deref()?;
        CourseId::normalize(raw).ok()
    }

    /// Runs one full layout for this scene with its own selection.
    pub fn compute(&self) -> Layout {
        let registry = self.registry();
        let adjacency = build_adjacency(&registry, &self.requirement_entries());
        let engine = LayoutEngine::new(self.config.clone());
        engine.compute(&registry, &adjacency, self.selection_id().as_ref())
    }
}

/// Reads a standalone [`LayoutConfig`] JSON file.
pub fn load_config(path: &Path) -> Result<LayoutConfig, SceneError> {
    let input = fs::read_to_string(path)
        .map_err(|source| SceneError::Io { path: path.to_path_buf(), source })?;
    let config: LayoutConfig = serde_json::from_str(&input).map_err(SceneError::Json)?;
    config.validate().map_err(SceneError::Config)?;
    Ok(config)
}

/// JSON schema of the scene file format.
pub fn scene_schema() -> schemars::Schema {
    schemars::schema_for!(Scene)
}

#[derive(Debug)]
pub enum SceneError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read scene {path:?}: {source}"),
            Self::Json(source) => write!(f, "invalid scene json: {source}"),
            Self::Config(source) => write!(f, "invalid scene config: {source}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(source) => Some(source),
            Self::Config(source) => Some(source),
        }
    }
}

/// One path as handed to the rendering surface, with its layer stroke.
#[derive(Debug, Clone, Serialize)]
pub struct StyledPath<'a> {
    #[serde(flatten)]
    pub path: &'a EdgePath,
    pub stroke: &'a StrokeStyle,
}

/// Output document: paths in draw order, decorations and skipped edges.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDocument<'a> {
    pub paths: Vec<StyledPath<'a>>,
    pub decorations: &'a Decorations,
    pub skipped: &'a [EdgeKey],
}

impl<'a> LayoutDocument<'a> {
    pub fn new(layout: &'a Layout, theme: &'a OverlayTheme) -> Self {
        let paths = styled(&layout.paths, theme)
            .map(|(path, stroke)| StyledPath { path, stroke })
            .collect();
        Self { paths, decorations: &layout.decorations, skipped: &layout.skipped }
    }
}
