use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, BatchSize, Criterion};
use svgbezier::{
    animate_to, build_path_command, derive_control_points, Clock, CubicBezierWidget, CubicCurve,
    CurveConfig, SvgDocument, TweenOptions,
};

use crate::common::samples::ANCHORS;

pub fn derive(c: &mut Criterion) {
    c.bench_function("derive", |b| {
        b.iter(|| {
            for [start, end] in ANCHORS.iter() {
                black_box(derive_control_points(start, end, true));
            }
        })
    });
}

pub fn path(c: &mut Criterion) {
    let curves: Vec<CubicCurve> = ANCHORS
        .iter()
        .map(|anchors| CubicCurve::from_points(anchors, false).unwrap())
        .collect();
    c.bench_function("path", |b| {
        b.iter(|| {
            for curve in curves.iter() {
                black_box(build_path_command(curve));
            }
        })
    });
}

/// A single frame of a clock animating one widget per anchor pair
pub fn frame(c: &mut Criterion) {
    c.bench_function("frame", |b| {
        b.iter_batched(
            || {
                let doc = Rc::new(RefCell::new(SvgDocument::default()));
                let clock = Clock::new();
                for [start, end] in ANCHORS.iter() {
                    let mut config = CurveConfig::between(*start, *end);
                    config.show_control_points = true;
                    let widget = Rc::new(RefCell::new(CubicBezierWidget::new(config).unwrap()));
                    widget.borrow_mut().draw(&mut *doc.borrow_mut());
                    let target = [*end, *start];
                    animate_to(&widget, &doc, &clock, &target, TweenOptions::default()).unwrap();
                }
                clock.frame(0.0).unwrap();
                (clock, doc)
            },
            |(clock, doc)| {
                black_box(clock.frame(500.0).unwrap());
                doc
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn all(c: &mut Criterion) {
    derive(c);
    path(c);
    frame(c);
}
