use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::Vector2;
use svgbezier::bounding_box::BoundingBox;
use svgbezier::geometry::END_ANCHOR;
use svgbezier::widget::MARKER_RADIUS;
use svgbezier::{
    animate_to, Clock, CubicBezierWidget, CubicCurve, CurveConfig, Easing, SvgDocument,
    TweenOptions,
};

fn main() -> svgbezier::Result<()> {
    env_logger::init();

    let doc = Rc::new(RefCell::new(SvgDocument::default()));
    let clock = Clock::new();

    let anchors = [
        [Vector2::new(50.0, 50.0), Vector2::new(350.0, 350.0)],
        [Vector2::new(50.0, 350.0), Vector2::new(350.0, 50.0)],
        [Vector2::new(200.0, 20.0), Vector2::new(200.0, 380.0)],
    ];

    let mut widgets = Vec::new();
    for points in anchors.iter() {
        let mut config = CurveConfig::between(points[0], points[1]);
        config.show_control_points = true;
        let widget = CubicBezierWidget::new(config)?;
        let widget = Rc::new(RefCell::new(widget));
        widget.borrow_mut().draw(&mut *doc.borrow_mut());

        // knock the curve out of shape
        widget
            .borrow_mut()
            .drag_to(END_ANCHOR, Vector2::new(380.0, 20.0), &mut *doc.borrow_mut())?;
        widgets.push(widget);
    }

    // the view has to hold both the distorted and the reset curves
    let extent = widgets
        .iter()
        .map(|w| w.borrow().curve().bounding_box())
        .map(Ok)
        .chain(
            anchors
                .iter()
                .map(|points| CubicCurve::from_points(points, false).map(|c| c.bounding_box())),
        )
        .collect::<svgbezier::Result<Vec<_>>>()?;
    let corners = extent.into_iter().flat_map(|bb| [bb.min, bb.max]);
    if let Some(bb) = BoundingBox::from_iter(corners) {
        doc.borrow_mut().fit(&bb.expand(2.0 * MARKER_RADIUS));
    }
    println!("{}", doc.borrow());

    // reset every curve to its initial anchors
    let options = TweenOptions {
        duration: 600.0,
        easing: Easing::InOutQuad,
        ..Default::default()
    };
    let tweens = widgets
        .iter()
        .zip(anchors.iter())
        .map(|(widget, points)| animate_to(widget, &doc, &clock, points, options))
        .collect::<svgbezier::Result<Vec<_>>>()?;

    let frames = clock.run(0.0, 1000.0 / 60.0, 600)?;
    println!("<!-- {} frames, all done: {} -->", frames, tweens.iter().all(|t| t.is_finished()));
    println!("{}", doc.borrow());
    Ok(())
}
