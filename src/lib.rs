mod arena;
mod error;
mod quadtree;
mod region;

/// Receives every node of a [`PointQuadtree`] in pre-order, e.g. to draw it.
pub trait PointQuadtreeVisitor {
    fn point(&mut self, depth: u32, point: Point);
    fn leaf(&mut self, depth: u32, boundary: &BoundingRegion);
    fn branch(&mut self, depth: u32, boundary: &BoundingRegion);
}

pub use error::*;
pub use quadtree::*;
pub use region::*;
