use nalgebra::Vector2;
use svgbezier::bounding_box::BoundingBox;
use svgbezier::geometry::{END_HANDLE, START_ANCHOR};
use svgbezier::render::Renderer;
use svgbezier::widget::MARKER_RADIUS;
use svgbezier::{ConfigPatch, CubicBezierWidget, CurveConfig, SvgDocument};

/// Presses on the marker of `index`, drags it by `offset` in a few steps and releases.
fn drag<R: Renderer>(
    widget: &mut CubicBezierWidget,
    renderer: &mut R,
    elements: &[svgbezier::render::ElementId],
    index: usize,
    offset: Vector2<f64>,
) -> svgbezier::Result<()> {
    let Some(marker) = elements
        .iter()
        .copied()
        .find(|e| widget.control_point_of(*e) == Some(index))
    else {
        return Ok(());
    };
    let start = widget.control_points()[index];
    widget.pointer_down(marker);
    for step in 1..=4 {
        widget.pointer_move(start + offset * (step as f64 / 4.0), renderer)?;
    }
    widget.pointer_up();
    Ok(())
}

fn main() -> svgbezier::Result<()> {
    env_logger::init();

    let mut doc = SvgDocument::default();
    let mut widgets = Vec::new();
    for (start, end, dual) in [
        (Vector2::new(50.0, 50.0), Vector2::new(350.0, 350.0), false),
        (Vector2::new(350.0, 50.0), Vector2::new(50.0, 200.0), true),
        (Vector2::new(20.0, 380.0), Vector2::new(380.0, 300.0), false),
    ] {
        let mut config = CurveConfig::between(start, end);
        config.show_control_points = true;
        config.dual_direction = dual;
        config.end_marker_id = "arrow".to_string();
        let mut widget = CubicBezierWidget::new(config)?;
        widget.on_control_point_down(|index, curve| {
            println!("<!-- grabbed point {} of {:?} -->", index, curve.points());
        });
        widget.draw(&mut doc);
        widgets.push(widget);
    }

    for widget in widgets.iter_mut() {
        let elements: Vec<_> = doc.elements().map(|(id, _)| id).collect();
        drag(widget, &mut doc, &elements, END_HANDLE, Vector2::new(-40.0, 20.0))?;
        drag(widget, &mut doc, &elements, START_ANCHOR, Vector2::new(10.0, 10.0))?;
    }

    // hide the markers of the last curve again
    if let Some(widget) = widgets.last_mut() {
        widget.update(
            ConfigPatch {
                show_control_points: Some(false),
                ..Default::default()
            },
            &mut doc,
        )?;
    }

    // leave room for the markers around the outermost control points
    if let Some(bb) = BoundingBox::from_iter(widgets.iter().flat_map(|w| w.control_points())) {
        doc.fit(&bb.expand(2.0 * MARKER_RADIUS));
    }

    println!("{}", doc);
    Ok(())
}
