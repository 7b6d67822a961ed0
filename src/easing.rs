//! Easing functions mapping normalised progress onto shaped progress.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Shape of a tween's progress over time.
///
/// Every variant maps `0` to `0` and `1` to `1`.
/// Inputs outside of `0..=1` are clamped.
#[derive(Clone, Copy, Default)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Quadratic ease-in
    InQuad,
    /// Quadratic ease-out
    OutQuad,
    /// Quadratic ease-in-out
    InOutQuad,
    /// Cubic ease-in
    InCubic,
    /// Cubic ease-out
    OutCubic,
    /// Cubic ease-in-out
    #[default]
    InOutCubic,
    /// Quartic ease-in
    InQuart,
    /// Quartic ease-out
    OutQuart,
    /// Quartic ease-in-out
    InOutQuart,
    /// Sine ease-in
    InSine,
    /// Sine ease-out
    OutSine,
    /// Sine ease-in-out
    InOutSine,
    /// User supplied curve
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Map normalised progress `t` onto eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = num::clamp(t, 0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => 1.0 - (1.0 - t).powi(2),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::InQuart => t.powi(4),
            Easing::OutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::InSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::OutSine => (t * PI / 2.0).sin(),
            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::Custom(f) => f(t),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::InQuad => "InQuad",
            Easing::OutQuad => "OutQuad",
            Easing::InOutQuad => "InOutQuad",
            Easing::InCubic => "InCubic",
            Easing::OutCubic => "OutCubic",
            Easing::InOutCubic => "InOutCubic",
            Easing::InQuart => "InQuart",
            Easing::OutQuart => "OutQuart",
            Easing::InOutQuart => "InOutQuart",
            Easing::InSine => "InSine",
            Easing::OutSine => "OutSine",
            Easing::InOutSine => "InOutSine",
            Easing::Custom(_) => "Custom",
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = String;

    /// Parses the variant names, e.g. `"InOutCubic"`. `Custom` can't be parsed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Linear" => Easing::Linear,
            "InQuad" => Easing::InQuad,
            "OutQuad" => Easing::OutQuad,
            "InOutQuad" => Easing::InOutQuad,
            "InCubic" => Easing::InCubic,
            "OutCubic" => Easing::OutCubic,
            "InOutCubic" => Easing::InOutCubic,
            "InQuart" => Easing::InQuart,
            "OutQuart" => Easing::OutQuart,
            "InOutQuart" => Easing::InOutQuart,
            "InSine" => Easing::InSine,
            "OutSine" => Easing::OutSine,
            "InOutSine" => Easing::InOutSine,
            _ => return Err(format!("unknown easing `{}`", s)),
        })
    }
}
