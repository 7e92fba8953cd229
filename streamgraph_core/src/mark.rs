// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark types and builders.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

/// Stable identity of a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id `offset` steps after this one.
    ///
    /// Chart generators reserve an id range per guide or series and hand out offsets from it.
    pub const fn offset(self, offset: u64) -> Self {
        Self(self.0 + offset)
    }
}

/// Horizontal text alignment relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical text alignment relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Position is the vertical middle of the text.
    Middle,
    /// Position is the alphabetic baseline.
    Alphabetic,
    /// Position is the top (hanging baseline).
    Hanging,
    /// Position is the ideographic baseline.
    Ideographic,
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (`500`).
    pub const MEDIUM: Self = Self(500);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Resolved geometry and paint of a rectangle mark.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Corner radius (`0` for square corners).
    pub corner_radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Resolved geometry and paint of a path mark.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Resolved text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Unshaped text.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The drawable content of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A (possibly rounded) rectangle.
    Rect(RectPayload),
    /// An arbitrary path.
    Path(PathPayload),
    /// A single line of text.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns geometric bounds, if known without text measurement.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }
}

/// A retained drawable with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint-order hint. Renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Drawable content.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark with the given id.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder { id, z_index: 0 }
    }
}

/// Builder for the shared mark fields; pick a kind to continue.
#[derive(Clone, Copy, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
}

impl MarkBuilder {
    /// Sets the paint-order hint.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Continues as a rectangle mark.
    pub fn rect(self, rect: Rect) -> RectBuilder {
        RectBuilder {
            head: self,
            payload: RectPayload {
                rect,
                corner_radius: 0.0,
                fill: Brush::default(),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            },
        }
    }

    /// Continues as a path mark.
    pub fn path(self, path: BezPath) -> PathBuilder {
        PathBuilder {
            head: self,
            payload: PathPayload {
                path,
                fill: Brush::default(),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            },
        }
    }

    /// Continues as a text mark.
    pub fn text(self, pos: impl Into<Point>, text: impl Into<String>) -> TextBuilder {
        TextBuilder {
            head: self,
            payload: TextPayload {
                pos: pos.into(),
                text: text.into(),
                font_size: 10.0,
                font_weight: FontWeight::NORMAL,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
                fill: Brush::default(),
            },
        }
    }
}

/// Builder for rectangle marks.
#[derive(Clone, Debug)]
pub struct RectBuilder {
    head: MarkBuilder,
    payload: RectPayload,
}

impl RectBuilder {
    /// Sets the corner radius.
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.payload.corner_radius = radius.max(0.0);
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.payload.fill = fill.into();
        self
    }

    /// Sets the stroke paint and width.
    pub fn stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.payload.stroke = stroke.into();
        self.payload.stroke_width = width;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        Mark {
            id: self.head.id,
            z_index: self.head.z_index,
            payload: MarkPayload::Rect(self.payload),
        }
    }
}

/// Builder for path marks.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    head: MarkBuilder,
    payload: PathPayload,
}

impl PathBuilder {
    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.payload.fill = fill.into();
        self
    }

    /// Sets the stroke paint and width.
    pub fn stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.payload.stroke = stroke.into();
        self.payload.stroke_width = width;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        Mark {
            id: self.head.id,
            z_index: self.head.z_index,
            payload: MarkPayload::Path(self.payload),
        }
    }
}

/// Builder for text marks.
#[derive(Clone, Debug)]
pub struct TextBuilder {
    head: MarkBuilder,
    payload: TextPayload,
}

impl TextBuilder {
    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.payload.font_size = font_size;
        self
    }

    /// Sets the font weight.
    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.payload.font_weight = weight;
        self
    }

    /// Sets the rotation in degrees.
    pub fn angle(mut self, degrees: f64) -> Self {
        self.payload.angle = degrees;
        self
    }

    /// Sets the horizontal alignment.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.payload.anchor = anchor;
        self
    }

    /// Sets the vertical alignment.
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.payload.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.payload.fill = fill.into();
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        Mark {
            id: self.head.id,
            z_index: self.head.z_index,
            payload: MarkPayload::Text(self.payload),
        }
    }
}
