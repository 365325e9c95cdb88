use std::fmt;
use std::io::Write;

use crate::arena::{Arena, NodeId};
use crate::error::Result;
use crate::region::{BoundingRegion, Point, Quadrant};
use crate::PointQuadtreeVisitor;

#[derive(Clone, Debug)]
struct Node {
    boundary: BoundingRegion,
    point: Option<Point>,
    // NW, NE, SW, SE live at first_child + 0..4.
    first_child: Option<NodeId>,
    depth: u32,
}

impl Node {
    fn new(boundary: BoundingRegion, depth: u32) -> Self {
        Self {
            boundary,
            point: None,
            first_child: None,
            depth,
        }
    }
}

/// A point quadtree. Every node holds at most one point and is split into
/// four quadrants the first time a second point reaches it.
///
/// Nodes are never freed: removing a point only clears its slot, so the
/// shape of the tree only ever grows.
#[derive(Clone, Debug)]
pub struct PointQuadtree {
    nodes: Arena<Node>,
    len: usize,
    depth: u32,
}

impl PointQuadtree {
    pub fn new(boundary: BoundingRegion) -> Self {
        Self::with_capacity(boundary, 1)
    }

    /// Pre-sizes the node store for `nodes` nodes.
    pub fn with_capacity(boundary: BoundingRegion, nodes: usize) -> Self {
        let mut arena = Arena::with_capacity(nodes.max(1));
        let root = arena.push(Node::new(boundary, 0));
        debug_assert_eq!(root, NodeId::ROOT);
        Self {
            nodes: arena,
            len: 0,
            depth: 0,
        }
    }

    pub fn boundary(&self) -> &BoundingRegion {
        &self.nodes.get(NodeId::ROOT).boundary
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated nodes, including the ones whose point was removed.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest node. The root is at depth 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Stores `point`. Returns `false` without touching the tree when the
    /// point lies outside the root boundary.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.boundary().contains(&point) {
            log::debug!("rejected {:?}: outside {:?}", point, self.boundary());
            return false;
        }
        let inserted = self.node_insert(NodeId::ROOT, point);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Clears the first stored point equal to `point`, searching pre-order.
    pub fn remove(&mut self, point: Point) -> bool {
        let removed = self.node_remove(NodeId::ROOT, point);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Appends every stored point inside `range` to `found`, in pre-order.
    pub fn query(&self, range: &BoundingRegion, found: &mut Vec<Point>) {
        found.extend(self.query_iter(range));
    }

    /// Lazily yields the same points as [`query`](Self::query).
    pub fn query_iter(&self, range: &BoundingRegion) -> Query<'_> {
        Query {
            nodes: &self.nodes,
            range: *range,
            to_process: vec![NodeId::ROOT],
        }
    }

    /// Every stored point, in pre-order.
    pub fn points(&self) -> Query<'_> {
        self.query_iter(self.boundary())
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Walks every node in pre-order (self, then NW, NE, SW, SE).
    pub fn traverse<V>(&self, visitor: &mut V)
        where
            V: PointQuadtreeVisitor,
    {
        for node in self.preorder() {
            match node.first_child {
                Some(_) => visitor.branch(node.depth, &node.boundary),
                None => visitor.leaf(node.depth, &node.boundary),
            }
            if let Some(point) = node.point {
                visitor.point(node.depth, point);
            }
        }
    }

    /// Dumps one CSV row per node in pre-order. Width and height columns
    /// hold half-extents; the point columns are empty for vacant nodes.
    pub fn write_csv<W>(&self, mut writer: W) -> Result<()>
        where
            W: Write,
    {
        writeln!(writer, "boundary_x,boundary_y,boundary_width,boundary_height,point_x,point_y")?;
        let mut rows = 0;
        for node in self.preorder() {
            let b = &node.boundary;
            write!(
                writer,
                "{},{},{},{},",
                b.center_x(),
                b.center_y(),
                b.half_width(),
                b.half_height()
            )?;
            match node.point {
                Some(p) => writeln!(writer, "{},{}", p.x, p.y)?,
                None => writeln!(writer, ",")?,
            }
            rows += 1;
        }
        writer.flush()?;
        log::debug!("wrote {} quadtree nodes as csv", rows);
        Ok(())
    }

    fn preorder(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut to_process = vec![NodeId::ROOT];
        std::iter::from_fn(move || {
            let node = self.nodes.get(to_process.pop()?);
            if let Some(fc) = node.first_child {
                for i in (0..4).rev() {
                    to_process.push(fc.offset(i));
                }
            }
            Some(node)
        })
    }

    // Depth-first with an explicit stack: a point on a seam goes to the
    // first quadrant (NW, NE, SW, SE) whose subtree takes it.
    fn node_insert(&mut self, start: NodeId, point: Point) -> bool {
        let mut to_process = vec![start];
        while let Some(node_id) = to_process.pop() {
            let node = self.nodes.get(node_id);
            if !node.boundary.contains(&point) {
                continue;
            }
            let (occupied, first_child) = (node.point.is_some(), node.first_child);
            if !occupied {
                self.nodes.get_mut(node_id).point = Some(point);
                return true;
            }
            let fc = match first_child {
                Some(fc) => fc,
                None => self.subdivide(node_id),
            };
            for i in (0..4).rev() {
                to_process.push(fc.offset(i));
            }
        }
        false
    }

    fn node_remove(&mut self, start: NodeId, point: Point) -> bool {
        let mut to_process = vec![start];
        while let Some(node_id) = to_process.pop() {
            let node = self.nodes.get(node_id);
            if !node.boundary.contains(&point) {
                continue;
            }
            if node.point == Some(point) {
                self.nodes.get_mut(node_id).point = None;
                return true;
            }
            if let Some(fc) = node.first_child {
                for i in (0..4).rev() {
                    to_process.push(fc.offset(i));
                }
            }
        }
        false
    }

    fn subdivide(&mut self, node_id: NodeId) -> NodeId {
        let node = self.nodes.get(node_id);
        if let Some(fc) = node.first_child {
            return fc;
        }
        let boundary = node.boundary;
        let depth = node.depth + 1;

        let fc = self
            .nodes
            .push_quad(Quadrant::ALL.map(|q| Node::new(boundary.quadrant(q), depth)));
        self.nodes.get_mut(node_id).first_child = Some(fc);
        self.depth = self.depth.max(depth);

        log::trace!(
            "subdivided node {} at depth {} ({:?})",
            node_id.index(),
            depth - 1,
            boundary
        );
        fc
    }
}

/// Lazy range query, see [`PointQuadtree::query_iter`].
pub struct Query<'a> {
    nodes: &'a Arena<Node>,
    range: BoundingRegion,
    to_process: Vec<NodeId>,
}

impl Iterator for Query<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while let Some(node_id) = self.to_process.pop() {
            let node = self.nodes.get(node_id);
            if !node.boundary.intersects(&self.range) {
                continue;
            }
            if let Some(fc) = node.first_child {
                for i in (0..4).rev() {
                    self.to_process.push(fc.offset(i));
                }
            }
            match node.point {
                Some(p) if self.range.contains(&p) => return Some(p),
                _ => {}
            }
        }
        None
    }
}

/// Read-only handle to one node, for walking the tree from the outside.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    tree: &'a PointQuadtree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        self.tree.nodes.get(self.id)
    }

    pub fn boundary(&self) -> &'a BoundingRegion {
        &self.node().boundary
    }

    pub fn point(&self) -> Option<Point> {
        self.node().point
    }

    pub fn is_divided(&self) -> bool {
        self.node().first_child.is_some()
    }

    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeRef<'a>> {
        let fc = self.node().first_child?;
        Some(NodeRef {
            tree: self.tree,
            id: fc.offset(quadrant.index()),
        })
    }

    /// The four children in NW, NE, SW, SE order, if divided.
    pub fn children(&self) -> Option<[NodeRef<'a>; 4]> {
        let fc = self.node().first_child?;
        let tree = self.tree;
        Some([0, 1, 2, 3].map(|i| NodeRef {
            tree,
            id: fc.offset(i),
        }))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("boundary", self.boundary())
            .field("point", &self.point())
            .field("divided", &self.is_divided())
            .finish()
    }
}
