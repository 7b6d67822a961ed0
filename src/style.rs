//! CSS style maps for the widget's elements.

use std::collections::BTreeMap;

/// CSS properties by name, e.g. `"stroke" => "black"`
pub type Style = BTreeMap<String, String>;

fn style(properties: &[(&str, &str)]) -> Style {
    properties
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Default style of the curve itself
pub fn curve() -> Style {
    style(&[
        ("fill", "none"),
        ("stroke", "black"),
        ("stroke-width", "2px"),
        ("z-index", "-9999"),
    ])
}

/// Default style of the dashed lines connecting anchors and handles
pub fn handles() -> Style {
    style(&[
        ("fill", "none"),
        ("stroke", "black"),
        ("stroke-width", "1px"),
        ("stroke-dasharray", "2 2"),
    ])
}

/// Default style of the anchor markers
pub fn anchor_points() -> Style {
    style(&[
        ("fill", "rgba(255,0,0,0.0)"),
        ("stroke", "black"),
        ("stroke-width", "2px"),
        ("cursor", "pointer"),
        ("z-index", "-9999"),
    ])
}

/// Default style of the control point markers
pub fn control_points() -> Style {
    style(&[
        ("fill", "rgba(255,0,0,0.0)"),
        ("stroke", "black"),
        ("stroke-width", "2px"),
        ("cursor", "pointer"),
    ])
}

/// Renders `style` as the value of an inline `style` attribute
pub fn to_css(style: &Style) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("; ")
}
