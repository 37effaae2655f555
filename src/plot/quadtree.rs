use eframe::egui::{Vec2, vec2};

const QUADTREE_LEAF_CAPACITY: usize = 4;
const QUADTREE_MAX_DEPTH: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBounds {
    pub center: Vec2,
    pub half_extent: f32,
}

impl QuadBounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span_x = (max.x - min.x).max(1.0);
        let span_y = (max.y - min.y).max(1.0);
        let half_extent = (span_x.max(span_y) * 0.5) + 1.0;

        Some(Self {
            center,
            half_extent,
        })
    }

    pub fn min(self) -> Vec2 {
        self.center - vec2(self.half_extent, self.half_extent)
    }

    pub fn max(self) -> Vec2 {
        self.center + vec2(self.half_extent, self.half_extent)
    }

    pub fn contains(self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Whether this cell intersects the axis-aligned box `[min, max]`.
    pub fn overlaps_box(self, min: Vec2, max: Vec2) -> bool {
        let own_min = self.min();
        let own_max = self.max();
        !(own_min.x > max.x || own_max.x < min.x || own_min.y > max.y || own_max.y < min.y)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };

        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        match (right, lower) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }
}

pub struct QuadNode {
    bounds: QuadBounds,
    indices: Vec<usize>,
    children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    fn build_node(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        depth: usize,
    ) -> Self {
        let mut node = Self {
            bounds,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            let quadrant = bounds.quadrant_for(positions[index]);
            buckets[quadrant].push(index);
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let child_bounds = bounds.child(quadrant);
            node.children[quadrant] = Some(Box::new(Self::build_node(
                child_bounds,
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub fn bounds(&self) -> QuadBounds {
        self.bounds
    }

    /// Point indices held by this cell; empty for internal cells.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }

    fn visit<F>(&self, visitor: &mut F)
    where
        F: FnMut(&QuadNode) -> bool,
    {
        if visitor(self) {
            return;
        }
        for child in self.children.iter().flatten() {
            child.visit(visitor);
        }
    }

    fn collect_cells(&self, depth: usize, cells: &mut Vec<QuadtreeCell>) {
        cells.push(QuadtreeCell {
            center: self.bounds.center,
            half_extent: self.bounds.half_extent,
            depth,
            is_leaf: self.is_leaf(),
        });

        for child in self.children.iter().flatten() {
            child.collect_cells(depth + 1, cells);
        }
    }
}

/// Flattened cell used by the debug overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadtreeCell {
    pub center: Vec2,
    pub half_extent: f32,
    pub depth: usize,
    pub is_leaf: bool,
}

/// Region quadtree over point indices, rebuilt from scratch for every query pass.
#[derive(Default)]
pub struct Quadtree {
    root: Option<QuadNode>,
    len: usize,
}

impl Quadtree {
    pub fn build(positions: &[Vec2]) -> Self {
        let mut tree = Self::default();
        tree.rebuild(positions);
        tree
    }

    pub fn rebuild(&mut self, positions: &[Vec2]) {
        self.len = positions.len();
        self.root = QuadBounds::from_points(positions).map(|bounds| {
            let indices = (0..positions.len()).collect::<Vec<_>>();
            QuadNode::build_node(bounds, indices, positions, 0)
        });
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Depth-first traversal. Returning `true` from `visitor` skips the
    /// children of the visited cell.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&QuadNode) -> bool,
    {
        if let Some(root) = &self.root {
            root.visit(&mut visitor);
        }
    }

    /// Calls `found` for every point index stored in a leaf overlapping `[min, max]`.
    pub fn query_box<F>(&self, min: Vec2, max: Vec2, mut found: F)
    where
        F: FnMut(usize),
    {
        self.visit(|cell| {
            if !cell.bounds().overlaps_box(min, max) {
                return true;
            }
            for &index in cell.indices() {
                found(index);
            }
            false
        });
    }

    pub fn cells(&self, cells: &mut Vec<QuadtreeCell>) {
        cells.clear();
        if let Some(root) = &self.root {
            root.collect_cells(0, cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(side: usize, spacing: f32) -> Vec<Vec2> {
        (0..side * side)
            .map(|index| vec2((index % side) as f32 * spacing, (index / side) as f32 * spacing))
            .collect()
    }

    #[test]
    fn every_point_lands_in_exactly_one_leaf() {
        let positions = grid(8, 25.0);
        let tree = Quadtree::build(&positions);

        let mut seen = vec![0usize; positions.len()];
        tree.visit(|cell| {
            if cell.is_leaf() {
                assert!(cell.indices().len() <= QUADTREE_LEAF_CAPACITY);
            } else {
                assert!(cell.indices().is_empty());
            }
            for &index in cell.indices() {
                assert!(cell.bounds().contains(positions[index]));
                seen[index] += 1;
            }
            false
        });
        assert!(seen.iter().all(|count| *count == 1));
    }

    #[test]
    fn box_query_prunes_distant_cells() {
        let positions = grid(10, 40.0);
        let tree = Quadtree::build(&positions);

        let mut total_cells = 0;
        tree.visit(|_| {
            total_cells += 1;
            false
        });

        let mut visited = 0;
        tree.visit(|cell| {
            visited += 1;
            !cell.bounds().overlaps_box(vec2(-5.0, -5.0), vec2(45.0, 45.0))
        });
        assert!(visited < total_cells);

        let mut found = Vec::new();
        tree.query_box(vec2(-5.0, -5.0), vec2(45.0, 45.0), |index| found.push(index));
        for expected in [0, 1, 10, 11] {
            assert!(found.contains(&expected));
        }
        assert!(!found.contains(&99));
    }

    #[test]
    fn coincident_points_stop_at_depth_limit() {
        let positions = vec![vec2(3.0, 3.0); 20];
        let tree = Quadtree::build(&positions);
        let mut found = 0;
        tree.query_box(vec2(0.0, 0.0), vec2(6.0, 6.0), |_| found += 1);
        assert_eq!(found, 20);
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let tree = Quadtree::build(&[]);
        assert!(tree.is_empty());
        let mut cells = Vec::new();
        tree.cells(&mut cells);
        assert!(cells.is_empty());
    }

    #[test]
    fn cells_report_depth_and_leaves() {
        let tree = Quadtree::build(&grid(6, 30.0));
        let mut cells = Vec::new();
        tree.cells(&mut cells);
        assert_eq!(cells[0].depth, 0);
        assert!(!cells[0].is_leaf);
        assert!(cells.iter().any(|cell| cell.is_leaf && cell.depth > 0));
    }
}
