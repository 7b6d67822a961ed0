#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod bounding_box;
pub mod config;
pub mod draw;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod render;
pub mod scheduler;
pub mod style;
pub mod tween;
pub mod widget;

pub use crate::config::{ConfigPatch, CurveConfig};
pub use crate::draw::build_path_command;
pub use crate::easing::Easing;
pub use crate::error::{Error, Result};
pub use crate::geometry::{derive_control_points, CubicCurve};
pub use crate::render::{Renderer, SvgDocument};
pub use crate::scheduler::{Clock, Tick, TickStatus};
pub use crate::tween::{Tween, TweenHandle, TweenState};
pub use crate::widget::{animate_to, CubicBezierWidget, TweenOptions};
