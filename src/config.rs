// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunable thresholds and geometry for graph construction and layout.

use std::{env, fmt};

use serde::{Deserialize, Serialize};

use crate::graph::GraphMode;

pub const ENV_CLASS_CHAIN_THRESHOLD: &str = "CELLGRAPH_CLASS_CHAIN_THRESHOLD";
pub const ENV_CURVATURE: &str = "CELLGRAPH_CURVATURE";
pub const ENV_OCCURRENCE_SPACING: &str = "CELLGRAPH_OCCURRENCE_SPACING";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Visible-cell count above which the coarse class-chain graph replaces the occurrence graph.
    pub class_chain_threshold: usize,
    pub class_chain: ClassChainStyle,
    pub occurrence: OccurrenceStyle,
    /// Margin added around the content bounding box when sizing the canvas.
    pub canvas_padding: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            class_chain_threshold: 20,
            class_chain: ClassChainStyle::default(),
            occurrence: OccurrenceStyle::default(),
            canvas_padding: 20.0,
        }
    }
}

/// Geometry of the single-column class-chain graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassChainStyle {
    pub node_width: f64,
    pub node_height: f64,
    pub column_x: f64,
    pub top_margin: f64,
    pub row_pitch: f64,
    pub corner_radius: f64,
    /// Straightening of the transition curve toward its chord, `0.0` (straight) to `1.0`.
    pub bundle_beta: f64,
    pub anchor: ChainAnchor,
}

impl Default for ClassChainStyle {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 50.0,
            column_x: 100.0,
            top_margin: 50.0,
            row_pitch: 100.0,
            corner_radius: 10.0,
            bundle_beta: 0.5,
            anchor: ChainAnchor::default(),
        }
    }
}

/// Where class-chain transition curves attach to their boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainAnchor {
    #[default]
    BottomCenter,
    /// Left edge at half height, so curves stay beside the column instead of crossing boxes.
    LeftEdge,
}

/// Geometry of the per-occurrence grid graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccurrenceStyle {
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub margin: f64,
    pub node_radius: f64,
    pub curvature: f64,
    pub curvature_sign: CurvatureSign,
    pub arrow_length: f64,
}

impl Default for OccurrenceStyle {
    fn default() -> Self {
        Self {
            spacing_x: 150.0,
            spacing_y: 150.0,
            margin: 50.0,
            node_radius: 25.0,
            curvature: 50.0,
            curvature_sign: CurvatureSign::default(),
            arrow_length: 8.0,
        }
    }
}

/// How the perpendicular offset of an occurrence edge's control point is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvatureSign {
    /// Bow upward when travelling down and downward when travelling up, so `a -> b` and
    /// `b -> a` never share a path.
    #[default]
    BowAwayFromTravel,
    /// Always offset to the left of the travel direction.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEnv { name: String, value: String, reason: String },
    InvalidJson { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value, reason } => {
                write!(f, "invalid {name} value {value:?}: {reason}")
            }
            Self::InvalidJson { message } => write!(f, "invalid graph config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GraphConfig {
    /// Picks the graph shape for `visible_cells` cells: occurrence at or below the threshold,
    /// class chain above it.
    pub fn mode_for(&self, visible_cells: usize) -> GraphMode {
        if visible_cells > self.class_chain_threshold {
            GraphMode::ClassChain
        } else {
            GraphMode::Occurrence
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input)
            .map_err(|err| ConfigError::InvalidJson { message: err.to_string() })
    }

    /// Defaults overlaid with `CELLGRAPH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|name| match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
                name: name.to_owned(),
                value: "<non-unicode>".to_owned(),
                reason: "not valid unicode".to_owned(),
            }),
        })
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides<F>(mut self, mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Result<Option<String>, ConfigError>,
    {
        if let Some(threshold) = parse_var::<usize, _>(&mut lookup, ENV_CLASS_CHAIN_THRESHOLD)? {
            self.class_chain_threshold = threshold;
        }
        if let Some(curvature) = parse_var::<f64, _>(&mut lookup, ENV_CURVATURE)? {
            if !curvature.is_finite() {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_CURVATURE.to_owned(),
                    value: curvature.to_string(),
                    reason: "curvature must be a finite number".to_owned(),
                });
            }
            self.occurrence.curvature = curvature;
        }
        if let Some(spacing) = parse_var::<f64, _>(&mut lookup, ENV_OCCURRENCE_SPACING)? {
            if !(spacing.is_finite() && spacing > 0.0) {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_OCCURRENCE_SPACING.to_owned(),
                    value: spacing.to_string(),
                    reason: "spacing must be a positive number".to_owned(),
                });
            }
            self.occurrence.spacing_x = spacing;
            self.occurrence.spacing_y = spacing;
        }
        Ok(self)
    }
}

fn parse_var<T, F>(lookup: &mut F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
    F: FnMut(&str) -> Result<Option<String>, ConfigError>,
{
    let Some(raw) = lookup(name)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<T>().map(Some).map_err(|err| ConfigError::InvalidEnv {
        name: name.to_owned(),
        value: trimmed.to_owned(),
        reason: err.to_string(),
    })
}
