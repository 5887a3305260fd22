//! Scene model consumed by the rasterizer.
//!
//! The document is assumed to be parsed already: a [`Scene`] is a canvas
//! size, a canvas-to-screen transform, and a tree of [`Element`]s. Parents
//! own their children exclusively, so the tree cannot contain cycles.

use crate::color::Color;
use crate::geometry::Point;
use crate::texture::Texture;
use crate::transform::AffineTransform;

/// Paint attributes attached to every drawable element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Interior color. Alpha 0 disables the fill.
    pub fill_color: Color,
    /// Outline color. Alpha 0 disables the stroke.
    pub stroke_color: Color,
    /// Outline width in device units.
    pub stroke_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_color: Color::TRANSPARENT,
            stroke_color: Color::TRANSPARENT,
            stroke_width: 1.0,
        }
    }
}

impl Style {
    /// Fill only.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill_color: color,
            ..Self::default()
        }
    }

    /// Stroke only.
    #[must_use]
    pub fn stroke(color: Color) -> Self {
        Self {
            stroke_color: color,
            ..Self::default()
        }
    }

    /// Set the stroke color.
    #[must_use]
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    /// Set the stroke width.
    #[must_use]
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }
}

/// A single point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointShape {
    /// Position in object space.
    pub position: Point,
    /// Paint; the point uses `fill_color`.
    pub style: Style,
}

/// A single line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Paint; the segment uses `stroke_color`.
    pub style: Style,
}

/// An open chain of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    /// Vertices in order. The last point is not joined back to the first.
    pub points: Vec<Point>,
    /// Paint; the chain uses `stroke_color`.
    pub style: Style,
}

/// An axis-aligned rectangle in object space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    /// Top-left corner.
    pub position: Point,
    /// Width and height.
    pub dimension: Point,
    /// Paint.
    pub style: Style,
}

/// A closed simple polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    /// Vertices in order; the outline closes back to the first point.
    pub points: Vec<Point>,
    /// Paint.
    pub style: Style,
}

/// An axis-aligned ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    /// Center.
    pub center: Point,
    /// Radii along x and y.
    pub radius: Point,
    /// Paint.
    pub style: Style,
}

/// A bitmap drawn into an axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShape {
    /// Top-left corner of the destination.
    pub position: Point,
    /// Destination width and height.
    pub dimension: Point,
    /// Decoded pixels.
    pub texture: Texture,
}

/// An ordered list of child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Children, drawn in order.
    pub elements: Vec<Element>,
}

/// Element variants. Adding a primitive means adding a variant and a drawer.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// See [`PointShape`].
    Point(PointShape),
    /// See [`LineShape`].
    Line(LineShape),
    /// See [`PolylineShape`].
    Polyline(PolylineShape),
    /// See [`RectShape`].
    Rect(RectShape),
    /// See [`PolygonShape`].
    Polygon(PolygonShape),
    /// See [`EllipseShape`].
    Ellipse(EllipseShape),
    /// See [`ImageShape`].
    Image(ImageShape),
    /// See [`Group`].
    Group(Group),
}

/// A node of the scene tree: a primitive plus its local transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Object-to-parent transform, identity unless set.
    pub transform: AffineTransform,
    /// The primitive.
    pub kind: ElementKind,
}

impl From<ElementKind> for Element {
    fn from(kind: ElementKind) -> Self {
        Self {
            transform: AffineTransform::IDENTITY,
            kind,
        }
    }
}

impl Element {
    /// A point.
    #[must_use]
    pub fn point(position: Point, style: Style) -> Self {
        ElementKind::Point(PointShape { position, style }).into()
    }

    /// A line segment.
    #[must_use]
    pub fn line(from: Point, to: Point, style: Style) -> Self {
        ElementKind::Line(LineShape { from, to, style }).into()
    }

    /// An open polyline.
    #[must_use]
    pub fn polyline(points: Vec<Point>, style: Style) -> Self {
        ElementKind::Polyline(PolylineShape { points, style }).into()
    }

    /// A rectangle at `(x, y)` of size `w × h`.
    #[must_use]
    pub fn rect(x: f32, y: f32, w: f32, h: f32, style: Style) -> Self {
        ElementKind::Rect(RectShape {
            position: Point::new(x, y),
            dimension: Point::new(w, h),
            style,
        })
        .into()
    }

    /// A closed polygon.
    #[must_use]
    pub fn polygon(points: Vec<Point>, style: Style) -> Self {
        ElementKind::Polygon(PolygonShape { points, style }).into()
    }

    /// An ellipse.
    #[must_use]
    pub fn ellipse(center: Point, rx: f32, ry: f32, style: Style) -> Self {
        ElementKind::Ellipse(EllipseShape {
            center,
            radius: Point::new(rx, ry),
            style,
        })
        .into()
    }

    /// An image stretched over the rectangle at `position` of size `dimension`.
    #[must_use]
    pub fn image(position: Point, dimension: Point, texture: Texture) -> Self {
        ElementKind::Image(ImageShape {
            position,
            dimension,
            texture,
        })
        .into()
    }

    /// A group of children.
    #[must_use]
    pub fn group(elements: Vec<Element>) -> Self {
        ElementKind::Group(Group { elements }).into()
    }

    /// Attach a local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: AffineTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Number of elements in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        match &self.kind {
            ElementKind::Group(g) => 1 + g.elements.iter().map(Element::count).sum::<usize>(),
            _ => 1,
        }
    }
}

/// A document ready to rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Canvas width in object-space units.
    pub width: f32,
    /// Canvas height in object-space units.
    pub height: f32,
    /// Root transform from canvas space to device pixels.
    pub canvas_to_screen: AffineTransform,
    /// Top-level elements in draw order.
    pub elements: Vec<Element>,
}

impl Scene {
    /// Empty scene with an identity canvas-to-screen transform.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            canvas_to_screen: AffineTransform::IDENTITY,
            elements: Vec::new(),
        }
    }

    /// Set the canvas-to-screen transform.
    #[must_use]
    pub fn with_canvas_to_screen(mut self, transform: AffineTransform) -> Self {
        self.canvas_to_screen = transform;
        self
    }

    /// Append a top-level element.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Append a top-level element in place.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Total number of elements in the tree.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(Element::count).sum()
    }
}
