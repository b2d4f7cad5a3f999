// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric queries: node boxes, edge proximity, and nearest-node search.
//!
//! All queries walk the tree from a given root in preorder and stop at the
//! first match, so precedence is traversal order rather than paint order. A
//! node that was never placed has no box and no edge endpoint; it is skipped as
//! a candidate but its children are still searched. A query from a root that
//! is not [rooted](Tree::is_rooted) finds nothing.

use kurbo::{Line, Point, Rect};

use crate::tree::Tree;
use crate::types::NodeId;
use crate::util::{distance_to_line, rect_contains_closed};

impl Tree {
    /// The node box: its position extended by the tree's node size.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        let origin = self.position(id)?;
        Some(Rect::from_origin_size(origin, self.params().node_size))
    }

    /// Centre of the node box. Edges are drawn between centres.
    pub fn middle_point(&self, id: NodeId) -> Option<Point> {
        self.bounds(id).map(|r| r.center())
    }

    /// First node in preorder under `root` whose box contains `pt`.
    ///
    /// Box edges count as inside. When an ancestor's box and a descendant's
    /// box both contain the point, the ancestor is returned.
    pub fn locate_point(&self, root: NodeId, pt: Point) -> Option<NodeId> {
        if !self.is_rooted(root) {
            return None;
        }
        self.locate_point_recursive(root, pt)
    }

    fn locate_point_recursive(&self, id: NodeId, pt: Point) -> Option<NodeId> {
        if let Some(b) = self.bounds(id)
            && rect_contains_closed(b, pt)
        {
            return Some(id);
        }
        self.node_ref(id)
            .children()
            .iter()
            .find_map(|&child| self.locate_point_recursive(child, pt))
    }

    /// First edge under `root` passing near `pt`, identified by its child end.
    ///
    /// For each child in order, the edge to that child is tested before the
    /// child's own subtree. An edge matches when the distance from `pt` to the
    /// infinite line through both centres is below
    /// [`TreeParams::edge_tolerance`](crate::TreeParams::edge_tolerance). The
    /// test is not clamped to the segment, so points beyond either end of an
    /// edge can still match it. Edges whose ends share a centre never match.
    pub fn locate_edge(&self, root: NodeId, pt: Point) -> Option<NodeId> {
        if !self.is_rooted(root) {
            return None;
        }
        self.locate_edge_recursive(root, pt, self.params().edge_tolerance)
    }

    fn locate_edge_recursive(&self, id: NodeId, pt: Point, tolerance: f64) -> Option<NodeId> {
        let from = self.middle_point(id);
        for &child in self.node_ref(id).children() {
            if let (Some(p0), Some(p1)) = (from, self.middle_point(child))
                && distance_to_line(pt, Line::new(p0, p1)) < tolerance
            {
                return Some(child);
            }
            if let Some(hit) = self.locate_edge_recursive(child, pt, tolerance) {
                return Some(hit);
            }
        }
        None
    }

    /// Greedy nearest-node search under `root`.
    ///
    /// The running best starts as `root` itself, scored by the distance from
    /// `pt` to its centre. Each child subtree is searched recursively and its
    /// answer is scored by the distance from `pt` to that answer's position
    /// (the top-left corner, not the centre); a strictly smaller score
    /// replaces the running best. This is a level-by-level comparison of
    /// subtree answers and can miss the globally closest node.
    ///
    /// Returns `None` only if `root` is stale or not rooted.
    pub fn nearest_node(&self, root: NodeId, pt: Point) -> Option<NodeId> {
        if !self.is_rooted(root) {
            return None;
        }
        Some(self.nearest_recursive(root, pt))
    }

    fn nearest_recursive(&self, id: NodeId, pt: Point) -> NodeId {
        let mut best = id;
        let mut best_distance = self
            .middle_point(id)
            .map_or(f64::INFINITY, |p| p.distance(pt));
        for &child in self.node_ref(id).children() {
            let candidate = self.nearest_recursive(child, pt);
            let distance = self
                .position(candidate)
                .map_or(f64::INFINITY, |p| p.distance(pt));
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Label, TreeParams};
    use kurbo::Size;

    fn at(tree: &mut Tree, parent: Option<NodeId>, text: &str, x: f64, y: f64) -> NodeId {
        tree.insert(parent, Label::from(text), Some(Point::new(x, y)))
    }

    #[test]
    fn bounds_follow_node_size() {
        let mut tree = Tree::with_params(TreeParams {
            node_size: Size::new(20.0, 10.0),
            ..TreeParams::default()
        });
        let n = at(&mut tree, None, "0", 5.0, 5.0);
        assert_eq!(tree.bounds(n), Some(Rect::new(5.0, 5.0, 25.0, 15.0)));
        assert_eq!(tree.middle_point(n), Some(Point::new(15.0, 10.0)));

        let unplaced = tree.insert(None, Label::default(), None);
        assert_eq!(tree.bounds(unplaced), None);
    }

    #[test]
    fn locate_point_prefers_ancestor_over_overlapping_descendant() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let child = at(&mut tree, Some(root), "1", 20.0, 20.0);
        at(&mut tree, Some(child), "2", 30.0, 30.0);

        // Inside all three boxes.
        assert_eq!(tree.locate_point(root, Point::new(40.0, 40.0)), Some(root));
        // Inside child and grandchild only.
        assert_eq!(tree.locate_point(root, Point::new(60.0, 60.0)), Some(child));
        assert_eq!(tree.locate_point(root, Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn locate_point_uses_sibling_order() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let late = at(&mut tree, Some(root), "9", 100.0, 100.0);
        let early = at(&mut tree, Some(root), "1", 120.0, 120.0);
        assert_eq!(tree.children_of(root), &[early, late]);
        assert_eq!(tree.locate_point(root, Point::new(130.0, 130.0)), Some(early));
        assert_eq!(tree.locate_point(root, Point::new(110.0, 110.0)), Some(late));
    }

    #[test]
    fn locate_point_includes_box_edges() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        assert_eq!(tree.locate_point(root, Point::new(50.0, 50.0)), Some(root));
        assert_eq!(tree.locate_point(root, Point::new(50.5, 50.0)), None);
    }

    #[test]
    fn locate_edge_hits_near_segment() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let child = at(&mut tree, Some(root), "1", 100.0, 0.0);
        // Centres at (25, 25) and (125, 25).
        assert_eq!(tree.locate_edge(root, Point::new(75.0, 28.0)), Some(child));
        assert_eq!(tree.locate_edge(root, Point::new(75.0, 31.0)), None);
    }

    #[test]
    fn locate_edge_does_not_clamp_to_segment() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let child = at(&mut tree, Some(root), "1", 100.0, 0.0);
        // 75 units past the child's centre, 2 units off the line.
        assert_eq!(tree.locate_edge(root, Point::new(200.0, 27.0)), Some(child));
        // Also before the parent's centre.
        assert_eq!(tree.locate_edge(root, Point::new(-300.0, 23.0)), Some(child));
    }

    #[test]
    fn locate_edge_tests_edge_before_subtree() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let a = at(&mut tree, Some(root), "1", 100.0, 0.0);
        // Edge a -> b lies on the same line as root -> a.
        at(&mut tree, Some(a), "2", 200.0, 0.0);
        assert_eq!(tree.locate_edge(root, Point::new(175.0, 26.0)), Some(a));
    }

    #[test]
    fn locate_edge_ignores_coincident_centres() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 10.0, 10.0);
        let born = tree.born_child(root).unwrap();
        assert_eq!(tree.position(born), tree.position(root));
        assert_eq!(tree.locate_edge(root, Point::new(35.0, 35.0)), None);
    }

    #[test]
    fn queries_from_a_cycle_find_nothing() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let n = at(&mut tree, Some(root), "1", 100.0, 0.0);
        let m = at(&mut tree, Some(n), "2", 200.0, 0.0);
        tree.remove_child(root, n);
        tree.add_child(m, n);

        assert_eq!(tree.locate_point(n, Point::new(110.0, 10.0)), None);
        assert_eq!(tree.locate_edge(n, Point::new(175.0, 25.0)), None);
        assert_eq!(tree.nearest_node(m, Point::new(200.0, 0.0)), None);
        // From the working root the detached pair is simply absent.
        assert_eq!(tree.locate_point(root, Point::new(110.0, 10.0)), None);
        assert_eq!(tree.nearest_node(root, Point::new(200.0, 0.0)), Some(root));
    }

    #[test]
    fn nearest_compares_subtree_answers_by_position() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 0.0, 0.0);
        let a = at(&mut tree, Some(root), "1", 200.0, 0.0);
        // Root centre is (25, 25): about 35.4 from the origin query below,
        // while `a` is 200 away, so the root wins.
        assert_eq!(tree.nearest_node(root, Point::new(0.0, 0.0)), Some(root));
        // Query at a's top-left corner: a scores 0.
        assert_eq!(tree.nearest_node(root, Point::new(200.0, 0.0)), Some(a));
    }

    #[test]
    fn nearest_is_greedy_not_global() {
        let mut tree = Tree::new();
        let root = at(&mut tree, None, "0", 1000.0, 1000.0);
        let a = at(&mut tree, Some(root), "1", 0.0, 0.0);
        // `a`'s centre (25, 25) is 10 from the query, while its child sits
        // about 22 away by position, so `a`'s own search keeps `a`...
        at(&mut tree, Some(a), "2", 15.0, 35.0);
        let q = Point::new(35.0, 25.0);
        // ...and at the root level `a` is then scored by its top-left corner
        // (about 43 away), still beating the root.
        assert_eq!(tree.nearest_node(root, q), Some(a));

        // A sibling whose corner is 30 away now wins, even though `a`'s
        // centre is still the closest point of any node.
        let c = at(&mut tree, Some(root), "3", 35.0, 55.0);
        assert_eq!(tree.nearest_node(root, q), Some(c));
    }
}
