//! Widget configuration.
//!
//! Field names follow the JSON keys accepted by [`CurveConfig::from_json`],
//! e.g. `{"ctrlPts": [{"x": 0, "y": 0}, {"x": 400, "y": 100}], "isDualDirection": true}`.

use std::collections::BTreeMap;

use log::warn;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::style::{self, Style};

/// (De)serialises points as `{"x": .., "y": ..}` objects.
mod points {
    use nalgebra::Vector2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Point {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(
        points: &[Vector2<f64>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(points.iter().map(|p| Point { x: p.x, y: p.y }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vector2<f64>>, D::Error> {
        Vec::<Point>::deserialize(deserializer).map(to_vectors)
    }

    fn to_vectors(points: Vec<Point>) -> Vec<Vector2<f64>> {
        points.into_iter().map(|p| Vector2::new(p.x, p.y)).collect()
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            points: &Option<Vec<Vector2<f64>>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match points {
                Some(points) => super::serialize(points, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Vec<Vector2<f64>>>, D::Error> {
            let points = Option::<Vec<Point>>::deserialize(deserializer)?;
            Ok(points.map(to_vectors))
        }
    }
}

fn warn_unrecognised(extra: &BTreeMap<String, serde_json::Value>) {
    if !extra.is_empty() {
        let keys: Vec<&str> = extra.keys().map(String::as_str).collect();
        warn!("ignoring unrecognised config keys: {}", keys.join(", "));
    }
}

/// Everything a [`CubicBezierWidget`](crate::widget::CubicBezierWidget) can be configured with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Either the two anchors or all four control points
    #[serde(rename = "ctrlPts", with = "points")]
    pub points: Vec<Vector2<f64>>,

    /// Style of the curve
    #[serde(rename = "styleCurve")]
    pub style_curve: Style,

    /// Style of the anchor markers
    #[serde(rename = "styleAnchorPts")]
    pub style_anchor_points: Style,

    /// Style of the control point markers
    #[serde(rename = "styleCtrlPts")]
    pub style_control_points: Style,

    /// Style of the lines between anchors and their control points
    #[serde(rename = "styleHandles")]
    pub style_handles: Style,

    /// Draw anchors, control points and handles
    #[serde(rename = "shouldShowCtrlPts")]
    pub show_control_points: bool,

    /// Let handles flip sides when the end anchor is left of the start anchor
    #[serde(rename = "isDualDirection")]
    pub dual_direction: bool,

    /// Id of the svg marker drawn at the curve's start, empty for none
    #[serde(rename = "startMarkerId")]
    pub start_marker_id: String,

    /// Id of the svg marker drawn at the curve's end, empty for none
    #[serde(rename = "endMarkerId")]
    pub end_marker_id: String,

    /// Keys this crate doesn't know. Kept around, but never used.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig {
            points: Vec::new(),
            style_curve: style::curve(),
            style_anchor_points: style::anchor_points(),
            style_control_points: style::control_points(),
            style_handles: style::handles(),
            show_control_points: false,
            dual_direction: false,
            start_marker_id: String::new(),
            end_marker_id: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl CurveConfig {
    /// Default configuration for a curve between two anchors
    pub fn between(start: Vector2<f64>, end: Vector2<f64>) -> Self {
        CurveConfig {
            points: vec![start, end],
            ..Default::default()
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Style maps given in the document replace the defaults as a whole.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CurveConfig = serde_json::from_str(json)?;
        config.validate()?;
        warn_unrecognised(&config.extra);
        Ok(config)
    }

    /// Checks that the configured points describe a cubic curve.
    pub fn validate(&self) -> Result<()> {
        match self.points.len() {
            2 | 4 => {}
            n => return Err(Error::InvalidPointCount(n)),
        }
        Ok(())
    }

    /// Overwrites every option set in `patch`.
    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            points,
            style_curve,
            style_anchor_points,
            style_control_points,
            style_handles,
            show_control_points,
            dual_direction,
            start_marker_id,
            end_marker_id,
            extra,
        } = patch;

        if let Some(points) = points {
            self.points = points;
        }
        if let Some(style) = style_curve {
            self.style_curve = style;
        }
        if let Some(style) = style_anchor_points {
            self.style_anchor_points = style;
        }
        if let Some(style) = style_control_points {
            self.style_control_points = style;
        }
        if let Some(style) = style_handles {
            self.style_handles = style;
        }
        if let Some(show) = show_control_points {
            self.show_control_points = show;
        }
        if let Some(dual) = dual_direction {
            self.dual_direction = dual;
        }
        if let Some(id) = start_marker_id {
            self.start_marker_id = id;
        }
        if let Some(id) = end_marker_id {
            self.end_marker_id = id;
        }
        self.extra.extend(extra);
    }
}

/// A partial update of a [`CurveConfig`], unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    /// See [`CurveConfig::points`]
    #[serde(
        rename = "ctrlPts",
        with = "points::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub points: Option<Vec<Vector2<f64>>>,
    /// See [`CurveConfig::style_curve`]
    #[serde(rename = "styleCurve")]
    pub style_curve: Option<Style>,
    /// See [`CurveConfig::style_anchor_points`]
    #[serde(rename = "styleAnchorPts")]
    pub style_anchor_points: Option<Style>,
    /// See [`CurveConfig::style_control_points`]
    #[serde(rename = "styleCtrlPts")]
    pub style_control_points: Option<Style>,
    /// See [`CurveConfig::style_handles`]
    #[serde(rename = "styleHandles")]
    pub style_handles: Option<Style>,
    /// See [`CurveConfig::show_control_points`]
    #[serde(rename = "shouldShowCtrlPts")]
    pub show_control_points: Option<bool>,
    /// See [`CurveConfig::dual_direction`]
    #[serde(rename = "isDualDirection")]
    pub dual_direction: Option<bool>,
    /// See [`CurveConfig::start_marker_id`]
    #[serde(rename = "startMarkerId")]
    pub start_marker_id: Option<String>,
    /// See [`CurveConfig::end_marker_id`]
    #[serde(rename = "endMarkerId")]
    pub end_marker_id: Option<String>,
    /// See [`CurveConfig::extra`]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ConfigPatch {
    /// Parses a JSON patch
    pub fn from_json(json: &str) -> Result<Self> {
        let patch: ConfigPatch = serde_json::from_str(json)?;
        warn_unrecognised(&patch.extra);
        Ok(patch)
    }
}
