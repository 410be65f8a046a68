//! Turns sensor rays into Node classification and replan requests.

use crate::grid::GridGraph;
use crate::node::NodeKind;
use crate::planner::IncrementalPlanner;
use glam::Vec3;

/// Applies one sensor report to the Grid: a ray from `from` to `to` and
/// whether it was blocked at its end.
///
/// The ray is sampled at spacing intervals up to and including the endpoint;
/// cells beyond the endpoint are never touched. Each sample's nearest Node is
/// marked [`Walkable`](NodeKind::Walkable) unless it is already
/// [`Obstructed`](NodeKind::Obstructed), so a clear ray never downgrades a
/// known obstruction. A blocked ray additionally marks the Node nearest the
/// endpoint as obstructed, overriding any prior classification.
///
/// If the freshly obstructed Node lies on the active Path, a replan is
/// requested on the Planner. This is the sole dynamic-replanning trigger:
/// classification changes elsewhere on the lattice wait for the next sweep
/// that lands on the Path, or for an explicit re-arm by the caller.
pub(crate) fn observe_ray(
	grid: &mut GridGraph,
	planner: &mut IncrementalPlanner,
	from: Vec3,
	to: Vec3,
	obstructed: bool,
) {
	if grid.is_empty() {
		return;
	}

	let delta = to - from;
	let length = delta.length();
	let spacing = grid.spacing();

	let mut t = 0.0;
	loop {
		let sample = from + delta * if length > 0.0 { t / length } else { 0.0 };
		if let Some(id) = grid.nearest_node(sample) {
			let node = grid.node_mut(id);
			if node.kind != NodeKind::Obstructed {
				node.kind = NodeKind::Walkable;
			}
		}
		if t >= length {
			break;
		}
		// final sample lands exactly on the endpoint
		t = if t + spacing > length { length } else { t + spacing };
	}

	if obstructed {
		if let Some(hit) = grid.nearest_node(to) {
			grid.node_mut(hit).kind = NodeKind::Obstructed;
			log::debug!("sweep: obstruction at cell {:?}", grid[hit].cell);
			if planner.active_path_contains(grid, hit) {
				log::info!(
					"sweep: obstruction at {:?} blocks the active path, replanning",
					grid[hit].cell
				);
				planner.request_replan();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::planner::StepResult;

	fn built(size: usize) -> (GridGraph, IncrementalPlanner) {
		let mut grid = GridGraph::new(size, size, 1.0).unwrap();
		grid.build(None);
		(grid, IncrementalPlanner::new())
	}

	fn kind_at(grid: &GridGraph, cell: (usize, usize)) -> NodeKind {
		grid[grid.node_at(cell).unwrap()].kind
	}

	#[test]
	fn clear_ray_marks_walkable() {
		let (mut grid, mut planner) = built(5);
		observe_ray(
			&mut grid,
			&mut planner,
			Vec3::ZERO,
			Vec3::new(3.0, 0.0, 0.0),
			false,
		);
		for x in 0..=3 {
			assert_eq!(kind_at(&grid, (x, 0)), NodeKind::Walkable);
		}
		// beyond the endpoint: untouched
		assert_eq!(kind_at(&grid, (4, 0)), NodeKind::Unexplored);
	}

	#[test]
	fn clear_ray_never_downgrades_obstructions() {
		let (mut grid, mut planner) = built(5);
		let id = grid.node_at((2, 0)).unwrap();
		grid.node_mut(id).kind = NodeKind::Obstructed;

		observe_ray(
			&mut grid,
			&mut planner,
			Vec3::ZERO,
			Vec3::new(4.0, 0.0, 0.0),
			false,
		);
		assert_eq!(kind_at(&grid, (2, 0)), NodeKind::Obstructed);
		assert_eq!(kind_at(&grid, (1, 0)), NodeKind::Walkable);
	}

	#[test]
	fn blocked_ray_obstructs_the_endpoint() {
		let (mut grid, mut planner) = built(5);
		observe_ray(
			&mut grid,
			&mut planner,
			Vec3::ZERO,
			Vec3::new(2.0, 0.0, 2.0),
			true,
		);
		assert_eq!(kind_at(&grid, (2, 2)), NodeKind::Obstructed);
		// the ray up to the hit is free space
		assert_eq!(kind_at(&grid, (1, 1)), NodeKind::Walkable);
		assert_eq!(kind_at(&grid, (0, 0)), NodeKind::Walkable);
	}

	#[test]
	fn obstruction_on_active_path_triggers_replan() {
		let (mut grid, mut planner) = built(5);
		planner.arm(Vec3::new(4.0, 0.0, 4.0));
		loop {
			match planner.step(&mut grid, Vec3::ZERO) {
				StepResult::Continue => {}
				done => {
					assert_eq!(done, StepResult::Succeeded);
					break;
				}
			}
		}
		assert!(planner.path_found());

		// (2, 2) is on the diagonal path
		observe_ray(
			&mut grid,
			&mut planner,
			Vec3::ZERO,
			Vec3::new(2.0, 0.0, 2.0),
			true,
		);
		assert!(!planner.path_found());
		assert!(planner.is_searching());
	}

	#[test]
	fn obstruction_off_the_path_does_not_replan() {
		let (mut grid, mut planner) = built(5);
		planner.arm(Vec3::new(4.0, 0.0, 4.0));
		loop {
			match planner.step(&mut grid, Vec3::ZERO) {
				StepResult::Continue => {}
				_ => break,
			}
		}
		assert!(planner.path_found());

		observe_ray(
			&mut grid,
			&mut planner,
			Vec3::ZERO,
			Vec3::new(4.0, 0.0, 0.0),
			true,
		);
		assert!(planner.path_found());
		assert!(!planner.is_searching());
	}
}
