//! Typed path segments with absolute coordinate operands.
//!
//! An [`Outline`] is one continuous path: an ordered list of
//! [`Segment`]s. Every segment stores exactly the points its kind
//! needs, so the "one pair for moves and lines, three for cubics,
//! none for close" rule cannot be broken after construction.

use kurbo::{Point, Vec2};

use crate::error::{RecenterError, Result};

/// Drawing command of a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    CubicCurveTo,
    ClosePath,
}

impl SegmentKind {
    /// Absolute SVG command letter.
    pub const fn letter(self) -> char {
        match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::CubicCurveTo => 'C',
            Self::ClosePath => 'Z',
        }
    }

    /// Parse an absolute command letter. `z` is accepted as a synonym
    /// for `Z` since a close carries no coordinates. Every other relative
    /// or unsupported letter is rejected rather than dropped.
    pub fn from_letter(letter: char) -> Result<Self> {
        match letter {
            'M' => Ok(Self::MoveTo),
            'L' => Ok(Self::LineTo),
            'C' => Ok(Self::CubicCurveTo),
            'Z' | 'z' => Ok(Self::ClosePath),
            other => Err(RecenterError::UnsupportedSegmentKind(other)),
        }
    }

    /// Number of coordinate pairs a segment of this kind carries.
    pub const fn pair_count(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::CubicCurveTo => 3,
            Self::ClosePath => 0,
        }
    }
}

/// One drawing command with its absolute operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    /// Control 1, control 2, end point.
    CubicCurveTo([Point; 3]),
    ClosePath,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::MoveTo(_) => SegmentKind::MoveTo,
            Self::LineTo(_) => SegmentKind::LineTo,
            Self::CubicCurveTo(_) => SegmentKind::CubicCurveTo,
            Self::ClosePath => SegmentKind::ClosePath,
        }
    }

    /// Coordinate operands in stored order.
    pub fn operands(&self) -> &[Point] {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => std::slice::from_ref(p),
            Self::CubicCurveTo(pts) => pts,
            Self::ClosePath => &[],
        }
    }

    /// Build a segment from a flat `(letter, values)` record, the shape
    /// used by path-data APIs: `values` holds `x, y` pairs back to back.
    pub fn from_record(letter: char, values: &[f64]) -> Result<Self> {
        let kind = SegmentKind::from_letter(letter)?;
        let expected = kind.pair_count() * 2;
        if values.len() != expected {
            return Err(RecenterError::InvalidOperands {
                kind: kind.letter(),
                expected,
                found: values.len(),
            });
        }
        let pt = |i: usize| Point::new(values[2 * i], values[2 * i + 1]);
        Ok(match kind {
            SegmentKind::MoveTo => Self::MoveTo(pt(0)),
            SegmentKind::LineTo => Self::LineTo(pt(0)),
            SegmentKind::CubicCurveTo => Self::CubicCurveTo([pt(0), pt(1), pt(2)]),
            SegmentKind::ClosePath => Self::ClosePath,
        })
    }

    /// Flat `(letter, values)` record; inverse of [`Segment::from_record`].
    pub fn to_record(&self) -> (char, Vec<f64>) {
        let values = self.operands().iter().flat_map(|p| [p.x, p.y]).collect();
        (self.kind().letter(), values)
    }

    /// Copy of this segment with `offset` added to every operand.
    pub fn translate(&self, offset: Vec2) -> Self {
        match *self {
            Self::MoveTo(p) => Self::MoveTo(p + offset),
            Self::LineTo(p) => Self::LineTo(p + offset),
            Self::CubicCurveTo(pts) => Self::CubicCurveTo(pts.map(|p| p + offset)),
            Self::ClosePath => Self::ClosePath,
        }
    }
}

/// One continuous path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    segments: Vec<Segment>,
}

impl Outline {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All operand points in order. Close segments contribute nothing.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments
            .iter()
            .flat_map(|seg| seg.operands().iter().copied())
    }

    /// New outline shifted by `offset`; `self` is left untouched.
    pub fn translate(&self, offset: Vec2) -> Outline {
        self.segments.iter().map(|seg| seg.translate(offset)).collect()
    }
}

impl FromIterator<Segment> for Outline {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
