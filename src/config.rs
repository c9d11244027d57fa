// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout tuning knobs.
//!
//! All distances are drawing-surface pixels. Every field has a default, so a
//! partial JSON object (or none at all) is a valid configuration.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which nodes become active when a node is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Only the selected node.
    #[default]
    Node,
    /// The selected node plus its direct prerequisites and dependents.
    Neighbors,
}

impl std::str::FromStr for SelectionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(Self::Node),
            "neighbors" => Ok(Self::Neighbors),
            other => Err(ConfigError::UnknownPolicy(other.to_owned())),
        }
    }
}

/// Stroke applied to one path layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: String,
    /// Arrow marker id the rendering surface attaches to the path end.
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OverlayTheme {
    pub inactive: StrokeStyle,
    pub active: StrokeStyle,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            inactive: StrokeStyle {
                width: 1.5,
                color: "#9aa5b1".to_owned(),
                marker: "arrow".to_owned(),
            },
            active: StrokeStyle {
                width: 3.0,
                color: "#d9480f".to_owned(),
                marker: "arrow-active".to_owned(),
            },
        }
    }
}

impl OverlayTheme {
    pub fn stroke(&self, active: bool) -> &StrokeStyle {
        if active {
            &self.active
        } else {
            &self.inactive
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LayoutConfig {
    /// Offset between parallel lanes sharing a corridor. Also the grid cell size.
    pub lane_spacing: f64,
    /// Clearance kept around every node box in the occupancy grid.
    pub box_padding: f64,
    /// Length of the final horizontal run into a destination box.
    pub approach_offset: f64,
    /// Direct (two point) segments are used below this horizontal distance...
    pub direct_max_dx: f64,
    /// ...and below this vertical distance.
    pub direct_max_dy: f64,
    /// Exit and entry heights closer than this count as level.
    pub straight_epsilon: f64,
    /// Chebyshev radius (in cells) of the nearest-free-cell search.
    pub snap_radius: u32,
    /// Rows searched above and below by the column/band searches.
    pub row_search: u32,
    pub selection_policy: SelectionPolicy,
    pub theme: OverlayTheme,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_spacing: 6.0,
            box_padding: 4.0,
            approach_offset: 12.0,
            direct_max_dx: 120.0,
            direct_max_dy: 48.0,
            straight_epsilon: 1.0,
            snap_radius: 8,
            row_search: 24,
            selection_policy: SelectionPolicy::Node,
            theme: OverlayTheme::default(),
        }
    }
}

impl LayoutConfig {
    /// Occupancy grid cell size, derived from the lane spacing.
    pub fn cell_size(&self) -> f64 {
        self.lane_spacing.max(1.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive =
            [("lane_spacing", self.lane_spacing), ("approach_offset", self.approach_offset)];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("box_padding", self.box_padding),
            ("direct_max_dx", self.direct_max_dx),
            ("direct_max_dy", self.direct_max_dy),
            ("straight_epsilon", self.straight_epsilon),
            ("theme.inactive.width", self.theme.inactive.width),
            ("theme.active.width", self.theme.active.width),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    UnknownPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "config field {field} must be a positive number (got {value})")
            }
            Self::Negative { field, value } => {
                write!(f, "config field {field} must be a non-negative number (got {value})")
            }
            Self::UnknownPolicy(raw) => {
                write!(f, "unknown selection policy {raw:?} (expected `node` or `neighbors`)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConfigError, LayoutConfig, SelectionPolicy};

    #[test]
    fn defaults_are_valid() {
        let config = LayoutConfig::default();
        config.validate().expect("default config");
        assert_eq!(config.cell_size(), 6.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"lane_spacing": 10, "selection_policy": "neighbors"}"#)
                .expect("config json");
        assert_eq!(config.lane_spacing, 10.0);
        assert_eq!(config.selection_policy, SelectionPolicy::Neighbors);
        assert_eq!(config.box_padding, LayoutConfig::default().box_padding);
        assert_eq!(config.theme, LayoutConfig::default().theme);
    }

    #[test]
    fn cell_size_never_drops_below_one_pixel() {
        let config = LayoutConfig { lane_spacing: 0.25, ..LayoutConfig::default() };
        assert_eq!(config.cell_size(), 1.0);
    }

    #[rstest]
    #[case(LayoutConfig { lane_spacing: 0.0, ..LayoutConfig::default() }, "lane_spacing")]
    #[case(
        LayoutConfig { approach_offset: f64::NAN, ..LayoutConfig::default() },
        "approach_offset"
    )]
    #[case(LayoutConfig { box_padding: -1.0, ..LayoutConfig::default() }, "box_padding")]
    #[case(
        LayoutConfig { direct_max_dy: f64::INFINITY, ..LayoutConfig::default() },
        "direct_max_dy"
    )]
    fn rejects_invalid_values(#[case] config: LayoutConfig, #[case] expected_field: &str) {
        let field = match config.validate() {
            Err(ConfigError::NotPositive { field, .. } | ConfigError::Negative { field, .. }) => {
                field
            }
            other => panic!("expected field error, got {other:?}"),
        };
        assert_eq!(field, expected_field);
    }

    #[test]
    fn parses_selection_policy_names() {
        assert_eq!("neighbors".parse::<SelectionPolicy>(), Ok(SelectionPolicy::Neighbors));
        assert!(matches!(
            "everything".parse::<SelectionPolicy>(),
            Err(ConfigError::UnknownPolicy(_))
        ));
    }
}
