//! The rendering side of the widget.
//!
//! The widget never reads anything back from its renderer. It only creates
//! elements, overwrites their attributes and destroys them again.
//! [`SvgDocument`] is an in-memory renderer serialising to svg markup.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use crate::bounding_box::BoundingBox;
use crate::style::{to_css, Style};

/// Opaque handle to an element created by a [`Renderer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Kinds of elements the widget draws
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// The curve, attributes `d`, `marker-start` and `marker-end`
    Path,
    /// Anchor and control point markers, attributes `cx`, `cy` and `r`
    Circle,
    /// Lines from anchors to their handles, attributes `x1`, `y1`, `x2` and `y2`
    Line,
}

impl Tag {
    /// The svg element name
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Path => "path",
            Tag::Circle => "circle",
            Tag::Line => "line",
        }
    }
}

/// Attribute values by name
pub type Attributes = BTreeMap<&'static str, String>;

/// Something the widget can draw into
pub trait Renderer {
    /// Create a new element
    fn create(&mut self, tag: Tag, style: &Style, attributes: Attributes) -> ElementId;

    /// Overwrite some of an element's attributes
    fn set_attributes(&mut self, element: ElementId, attributes: Attributes);

    /// Remove an element for good
    fn destroy(&mut self, element: ElementId);
}

/// An element stored in a [`SvgDocument`]
#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
    /// Element kind
    pub tag: Tag,
    /// Inline style
    pub style: Style,
    /// Attributes besides `style`
    pub attributes: Attributes,
}

type Rect = (f64, f64, f64, f64);

/// Renderer collecting elements in memory, printed as svg via [`Display`]
#[derive(Clone, Debug, Default)]
pub struct SvgDocument {
    /// `min-x min-y width height` of the svg's viewBox
    pub view_box: Rect,
    next_id: u64,
    elements: BTreeMap<ElementId, SvgElement>,
}

impl SvgDocument {
    /// Creates an empty document
    pub fn new(view_box: Rect) -> Self {
        SvgDocument {
            view_box,
            ..Default::default()
        }
    }

    /// Sets the viewBox to `bb`
    pub fn fit(&mut self, bb: &BoundingBox<f64>) {
        self.view_box = (bb.min.x, bb.min.y, bb.width(), bb.height());
    }

    /// Look up an element
    pub fn get(&self, element: ElementId) -> Option<&SvgElement> {
        self.elements.get(&element)
    }

    /// Iterate over all live elements in creation order
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &SvgElement)> {
        self.elements.iter().map(|(id, e)| (*id, e))
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Renderer for SvgDocument {
    fn create(&mut self, tag: Tag, style: &Style, attributes: Attributes) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            SvgElement {
                tag,
                style: style.clone(),
                attributes,
            },
        );
        id
    }

    fn set_attributes(&mut self, element: ElementId, attributes: Attributes) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.attributes.extend(attributes);
        }
    }

    fn destroy(&mut self, element: ElementId) {
        self.elements.remove(&element);
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

impl Display for SvgElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag.name())?;
        for (name, value) in self.attributes.iter() {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        if !self.style.is_empty() {
            write!(f, " style=\"{}\"", escape(&to_css(&self.style)))?;
        }
        writeln!(f, "/>")
    }
}

impl Display for SvgDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.view_box.0, self.view_box.1, self.view_box.2, self.view_box.3
        )?;
        for elem in self.elements.values() {
            write!(f, "{}", elem)?;
        }
        writeln!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CubicCurve;
    use nalgebra::Vector2;

    #[test]
    fn create_update_destroy() {
        let mut doc = SvgDocument::new((0.0, 0.0, 100.0, 100.0));
        let style = Style::from([("stroke".to_string(), "black".to_string())]);
        let circle = doc.create(
            Tag::Circle,
            &style,
            Attributes::from([("cx", "1".into()), ("cy", "2".into()), ("r", "4".into())]),
        );
        doc.set_attributes(circle, Attributes::from([("cx", "10".into())]));
        assert_eq!(
            doc.to_string(),
            "<svg viewBox=\"0 0 100 100\" xmlns=\"http://www.w3.org/2000/svg\">\n\
             <circle cx=\"10\" cy=\"2\" r=\"4\" style=\"stroke: black\"/>\n\
             </svg>\n"
        );

        doc.destroy(circle);
        assert!(doc.is_empty());
        assert!(doc.get(circle).is_none());
    }

    #[test]
    fn fit_view_box_around_curve() {
        let curve = CubicCurve::from_points(
            &[Vector2::new(0.0, 0.0), Vector2::new(400.0, 100.0)],
            false,
        )
        .unwrap();
        let mut doc = SvgDocument::default();
        doc.fit(&curve.bounding_box().expand(10.0));
        assert_eq!(doc.view_box, (-10.0, -10.0, 420.0, 120.0));
        assert!(doc
            .to_string()
            .starts_with("<svg viewBox=\"-10 -10 420 120\""));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut doc = SvgDocument::default();
        let line = doc.create(
            Tag::Line,
            &Style::new(),
            Attributes::from([("data-note", "a \"quoted\" <value>".into())]),
        );
        assert_eq!(
            doc.get(line).unwrap().to_string(),
            "<line data-note=\"a &quot;quoted&quot; &lt;value>\"/>\n"
        );
    }
}
