//! Visual inspection hooks: the live lattice and Path as draw commands.
//!
//! The Navigator owns no rendering. These hooks emit structured commands and
//! leave colors, meshes and immediate-mode calls to the presentation layer.
//! Emitting commands never touches algorithm state.

use super::GridNavigator;
use crate::node::{Node, NodeKind, NodeStatus};
use glam::Vec3;

/// What a draw command represents, for the presentation layer to map to an
/// actual color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
	/// A Cell nothing is known about.
	Unexplored,
	/// A Cell a sensor ray has cleared.
	Walkable,
	/// A blocked Cell. Rendered distinctly from everything else.
	Obstructed,
	/// A Cell on the open list of the running search.
	Open,
	/// A Cell the running search has expanded.
	Closed,
	/// A Cell on the reconstructed Path, or an edge of its child chain.
	Path,
	/// The search start.
	Start,
	/// The search destination.
	Destination,
}

/// One unit of debug geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
	/// A marker at a Node position.
	Cell {
		/// World position of the Node.
		center: Vec3,
		/// Half the lattice spacing, so neighboring markers touch.
		half_extent: f32,
		/// What the Node currently is.
		shade: Shade,
	},
	/// A line between two Node positions.
	Link {
		/// World position of the Node the link starts at.
		from: Vec3,
		/// World position of the Node the link points to.
		to: Vec3,
		/// [`Shade::Closed`] for search-tree (parent) edges,
		/// [`Shade::Path`] for child-chain edges.
		shade: Shade,
	},
}

fn shade_of(node: &Node) -> Shade {
	if node.is_obstructed() {
		return Shade::Obstructed;
	}
	match node.status {
		NodeStatus::Start => Shade::Start,
		NodeStatus::Destination => Shade::Destination,
		NodeStatus::Path => Shade::Path,
		NodeStatus::Open => Shade::Open,
		NodeStatus::Closed => Shade::Closed,
		NodeStatus::Regular => match node.kind {
			NodeKind::Walkable => Shade::Walkable,
			_ => Shade::Unexplored,
		},
	}
}

impl GridNavigator {
	/// Emits one [`DrawCommand::Cell`] per Node of the lattice.
	///
	/// Obstructed Cells shade distinctly; all others shade by their current
	/// search status, falling back to their classification.
	pub fn debug_draw_lattice(&self, out: &mut Vec<DrawCommand>) {
		let half_extent = self.grid.spacing() * 0.5;
		for (_, node) in self.grid.iter() {
			out.push(DrawCommand::Cell {
				center: node.pos,
				half_extent,
				shade: shade_of(node),
			});
		}
	}

	/// Emits one [`DrawCommand::Link`] per parent edge of the search tree
	/// and per child edge of the reconstructed Path.
	pub fn debug_draw_path(&self, out: &mut Vec<DrawCommand>) {
		for (_, node) in self.grid.iter() {
			if let Some(parent) = node.parent {
				out.push(DrawCommand::Link {
					from: node.pos,
					to: self.grid[parent].pos,
					shade: Shade::Closed,
				});
			}
			if let Some(child) = node.child {
				out.push(DrawCommand::Link {
					from: node.pos,
					to: self.grid[child].pos,
					shade: Shade::Path,
				});
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{NavigatorConfig, SearchBounds, StepResult};

	fn navigator() -> GridNavigator {
		let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
		GridNavigator::new(bounds, NavigatorConfig::default()).unwrap()
	}

	#[test]
	fn one_cell_per_node() {
		let nav = navigator();
		let mut out = Vec::new();
		nav.debug_draw_lattice(&mut out);
		assert_eq!(out.len(), nav.grid().len());
		assert!(out.iter().all(|cmd| matches!(
			cmd,
			DrawCommand::Cell {
				shade: Shade::Unexplored,
				..
			}
		)));
	}

	#[test]
	fn obstructions_shade_distinctly() {
		let mut nav = navigator();
		nav.proximity_sensor(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), true);
		let mut out = Vec::new();
		nav.debug_draw_lattice(&mut out);
		let obstructed = out
			.iter()
			.filter(|cmd| matches!(
				cmd,
				DrawCommand::Cell {
					shade: Shade::Obstructed,
					..
				}
			))
			.count();
		assert_eq!(obstructed, 1);
	}

	#[test]
	fn path_links_after_success() {
		let mut nav = navigator();
		nav.start_search_between(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
		assert_eq!(nav.run_to_completion(Vec3::ZERO, 100), StepResult::Succeeded);

		let mut out = Vec::new();
		nav.debug_draw_path(&mut out);
		let path_links = out
			.iter()
			.filter(|cmd| matches!(
				cmd,
				DrawCommand::Link {
					shade: Shade::Path,
					..
				}
			))
			.count();
		// 5 path cells, 4 child edges
		assert_eq!(path_links, 4);
	}
}
