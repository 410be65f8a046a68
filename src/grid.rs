//! The planning substrate: a fixed lattice of Nodes with uniform spacing.

use crate::node::{Node, NodeKind};
use crate::{NavError, NodeId, Point, PointMap, Result};
use glam::Vec3;

/// A fixed-shape lattice of [`Node`]s embedded in 3D space.
///
/// The shape of the Grid never changes after [`build`](GridGraph::build):
/// searches and sensor sweeps only mutate the content of the Nodes. Nodes
/// live in an arena and are addressed by [`NodeId`]; the ids are assigned in
/// row-major build order and stay stable for the lifetime of the Grid.
///
/// Every Node sits at `(x * spacing, 0, y * spacing)`, so the lattice is
/// planar and anchored at the world origin. The elevation axis is carried
/// through all position math but never varies.
///
/// ## Examples
/// ```
/// use incremental_pathfinding::GridGraph;
/// use glam::Vec3;
///
/// let mut grid = GridGraph::new(5, 5, 1.0).unwrap();
/// grid.build(None);
///
/// let id = grid.nearest_node(Vec3::new(2.2, 0.0, 2.8)).unwrap();
/// assert_eq!(grid[id].cell, (2, 3));
/// ```
#[derive(Clone, Debug)]
pub struct GridGraph {
	width: usize,
	height: usize,
	spacing: f32,
	nodes: slab::Slab<Node>,
	cell_map: PointMap<NodeId>,
	built: bool,
}

/// Neighbor offsets in wiring order: the row below left to right, then the
/// own row, then the row above left to right. The fixed order is what makes
/// searches reproducible.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
	(-1, -1),
	(0, -1),
	(1, -1),
	(-1, 0),
	(1, 0),
	(-1, 1),
	(0, 1),
	(1, 1),
];

impl GridGraph {
	/// Allocates a Grid of `width * height` Nodes with the given spacing.
	///
	/// The Nodes themselves are created by [`build`](GridGraph::build).
	///
	/// ## Errors
	/// [`NavError::InvalidDimensions`] if either dimension is zero or the
	/// spacing is not a positive finite number.
	pub fn new(width: usize, height: usize, spacing: f32) -> Result<GridGraph> {
		if width == 0 || height == 0 || !spacing.is_finite() || spacing <= 0.0 {
			return Err(NavError::InvalidDimensions {
				width,
				height,
				spacing,
			});
		}
		Ok(GridGraph {
			width,
			height,
			spacing,
			nodes: slab::Slab::with_capacity(width * height),
			cell_map: PointMap::with_capacity(width * height),
			built: false,
		})
	}

	/// Creates every Node and wires the adjacency. Must be called exactly
	/// once; repeated calls are ignored.
	///
	/// When a `probe` is given, it is asked once per Cell whether the world
	/// is blocked at that position, pre-classifying the Node as
	/// [`Obstructed`](NodeKind::Obstructed) or [`Walkable`](NodeKind::Walkable).
	/// Without a probe all Nodes start [`Unexplored`](NodeKind::Unexplored)
	/// and classification is left to the sensor sweeps.
	///
	/// Adjacency is the 8-neighborhood clipped at the lattice border: corner
	/// Nodes have 3 neighbors, other border Nodes 5, interior Nodes 8.
	/// Neighbor lists are built in a fixed order (row below, own row, row
	/// above, each left to right).
	pub fn build(&mut self, probe: Option<&dyn Fn(Vec3) -> bool>) {
		if self.built {
			log::warn!("GridGraph::build called twice, ignoring");
			return;
		}
		self.built = true;

		for y in 0..self.height {
			for x in 0..self.width {
				let pos = Vec3::new(x as f32 * self.spacing, 0.0, y as f32 * self.spacing);
				let entry = self.nodes.vacant_entry();
				let id = entry.key();
				let mut node = Node::new(id, (x, y), pos);
				if let Some(probe) = probe {
					node.kind = if probe(pos) {
						NodeKind::Obstructed
					} else {
						NodeKind::Walkable
					};
				}
				entry.insert(node);
				self.cell_map.insert((x, y), id);
			}
		}

		for y in 0..self.height {
			for x in 0..self.width {
				let id = self.cell_map[&(x, y)];
				let mut neighbors = Vec::with_capacity(8);
				for (dx, dy) in NEIGHBOR_OFFSETS {
					let nx = x as isize + dx;
					let ny = y as isize + dy;
					if nx < 0 || ny < 0 {
						continue;
					}
					if let Some(&other) = self.cell_map.get(&(nx as usize, ny as usize)) {
						neighbors.push(other);
					}
				}
				self.nodes[id].neighbors = neighbors;
			}
		}

		let obstructed = self
			.nodes
			.iter()
			.filter(|(_, n)| n.is_obstructed())
			.count();
		log::debug!(
			"built {}x{} grid, spacing {}, {} cells pre-classified obstructed",
			self.width,
			self.height,
			self.spacing,
			obstructed
		);
	}

	/// Number of columns.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Number of rows.
	pub fn height(&self) -> usize {
		self.height
	}

	/// Distance between orthogonally neighboring Nodes.
	pub fn spacing(&self) -> f32 {
		self.spacing
	}

	/// Number of Nodes. Zero before [`build`](GridGraph::build).
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// `true` before [`build`](GridGraph::build) has run.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The id of the Node at the given lattice Cell, if it exists.
	pub fn node_at(&self, cell: Point) -> Option<NodeId> {
		self.cell_map.get(&cell).copied()
	}

	/// Iterates over all Nodes in id (row-major) order.
	pub fn iter(&self) -> slab::Iter<Node> {
		self.nodes.iter()
	}

	pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
		&mut self.nodes[id]
	}

	/// The Node whose position is closest (Euclidean) to `point`.
	///
	/// No classification filter is applied. Ties are broken by row-major
	/// scan order: the first Node with the minimal distance wins. `None`
	/// only before [`build`](GridGraph::build).
	pub fn nearest_node(&self, point: Vec3) -> Option<NodeId> {
		self.nearest_where(point, |_| true)
	}

	/// Like [`nearest_node`](GridGraph::nearest_node), but skips
	/// [`Obstructed`](NodeKind::Obstructed) Nodes.
	///
	/// Used to anchor the start and destination of a search onto the
	/// walkable lattice. `None` if no walkable Node exists, which callers
	/// must treat as a planning failure.
	pub fn nearest_unobstructed_node(&self, point: Vec3) -> Option<NodeId> {
		self.nearest_where(point, |node| !node.is_obstructed())
	}

	fn nearest_where(&self, point: Vec3, accept: impl Fn(&Node) -> bool) -> Option<NodeId> {
		let mut best: Option<(NodeId, f32)> = None;
		for (id, node) in self.nodes.iter() {
			if !accept(node) {
				continue;
			}
			let dist = node.pos.distance_squared(point);
			if best.map_or(true, |(_, best_dist)| dist < best_dist) {
				best = Some((id, dist));
			}
		}
		best.map(|(id, _)| id)
	}

	/// Records that `node` was reached from `parent` and recomputes the
	/// Node's `g` as the parent's `g` plus the Euclidean distance between
	/// the two. Mutation and cost recomputation are deliberately one
	/// operation.
	pub fn set_parent(&mut self, node: NodeId, parent: NodeId) {
		let (parent_g, parent_pos) = {
			let p = &self.nodes[parent];
			(p.g, p.pos)
		};
		let n = &mut self.nodes[node];
		n.parent = Some(parent);
		n.g = parent_g + n.pos.distance(parent_pos);
	}

	/// Removes the parent link and resets `g` to 0.
	pub fn clear_parent(&mut self, node: NodeId) {
		let n = &mut self.nodes[node];
		n.parent = None;
		n.g = 0.0;
	}

	/// Points `node` at the search destination and recomputes its `h` as
	/// the sum of absolute per-axis differences to it.
	///
	/// The sum runs over all three axes even though the lattice is planar;
	/// the elevation term is constant and only adds a fixed bias.
	pub fn set_destination_ref(&mut self, node: NodeId, destination: NodeId) {
		let dest_pos = self.nodes[destination].pos;
		let n = &mut self.nodes[node];
		n.destination = Some(destination);
		let diff = n.pos - dest_pos;
		n.h = diff.x.abs() + diff.y.abs() + diff.z.abs();
	}

	/// Removes the destination link and resets `h` to 0.
	pub fn clear_destination_ref(&mut self, node: NodeId) {
		let n = &mut self.nodes[node];
		n.destination = None;
		n.h = 0.0;
	}

	/// Resets the search bookkeeping of every Node: statuses back to
	/// [`Regular`](crate::NodeStatus::Regular), costs to 0, all parent/child/
	/// destination links cleared. Classification persists, obstacle
	/// knowledge accumulates across searches.
	pub fn reset_search_state(&mut self) {
		for (_, node) in self.nodes.iter_mut() {
			node.reset_search_state();
		}
	}
}

use std::ops::Index;
impl Index<NodeId> for GridGraph {
	type Output = Node;
	#[track_caller]
	fn index(&self, index: NodeId) -> &Node {
		&self.nodes[index]
	}
}
