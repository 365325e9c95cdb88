use crate::error::{Error, Result};

/// A 2D point. Equality is exact on both coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One of the four children of a subdivided node. North is +y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Insertion and traversal order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }
}

/// Axis-aligned rectangle given by its center and half-extents.
///
/// Both edges are inclusive for [`contains`](Self::contains) and
/// [`intersects`](Self::intersects). The edges are stored rather than
/// recomputed, so a quadrant's outer edges are bit-identical to its
/// parent's edges and its inner edges to the parent's center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingRegion {
    center_x: f64,
    center_y: f64,
    half_width: f64,
    half_height: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl BoundingRegion {
    /// Fails if the center is not finite or either half-extent is not
    /// strictly positive.
    pub fn new(center_x: f64, center_y: f64, half_width: f64, half_height: f64) -> Result<Self> {
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(Error::NonFiniteCenter { x: center_x, y: center_y });
        }
        if !(half_width > 0.0 && half_height > 0.0) {
            return Err(Error::InvalidExtent { half_width, half_height });
        }
        Ok(Self {
            center_x,
            center_y,
            half_width,
            half_height,
            min_x: center_x - half_width,
            max_x: center_x + half_width,
            min_y: center_y - half_height,
            max_y: center_y + half_height,
        })
    }

    /// Square region centered at `(cx, cy)`.
    pub fn square(cx: f64, cy: f64, half_size: f64) -> Result<Self> {
        Self::new(cx, cy, half_size, half_size)
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.center_x
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.center_y
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        self.min_x <= point.x
            && point.x <= self.max_x
            && self.min_y <= point.y
            && point.y <= self.max_y
    }

    #[inline]
    pub fn intersects(&self, other: &BoundingRegion) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// The child region for `quadrant`: half the extents, spanning from one
    /// of this region's edges to its center on each axis. Neighbouring
    /// quadrants share their seam edge and together cover this region
    /// exactly.
    pub fn quadrant(&self, quadrant: Quadrant) -> BoundingRegion {
        let (min_x, max_x) = match quadrant {
            Quadrant::NorthWest | Quadrant::SouthWest => (self.min_x, self.center_x),
            Quadrant::NorthEast | Quadrant::SouthEast => (self.center_x, self.max_x),
        };
        let (min_y, max_y) = match quadrant {
            Quadrant::NorthWest | Quadrant::NorthEast => (self.center_y, self.max_y),
            Quadrant::SouthWest | Quadrant::SouthEast => (self.min_y, self.center_y),
        };
        BoundingRegion {
            center_x: midpoint(min_x, max_x),
            center_y: midpoint(min_y, max_y),
            half_width: self.half_width / 2.0,
            half_height: self.half_height / 2.0,
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

// Never leaves [lo, hi] and never overflows.
#[inline]
fn midpoint(lo: f64, hi: f64) -> f64 {
    (lo / 2.0 + hi / 2.0).clamp(lo, hi)
}
