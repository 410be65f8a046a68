//! The incremental best-first search over the Grid Graph.

use crate::grid::GridGraph;
use crate::node::NodeStatus;
use crate::node_id::{node_id_set, NodeIdSet};
use crate::{NodeId, Point};
use glam::Vec3;

/// The outcome of driving the Planner by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
	/// No search is armed or running.
	Idle,
	/// The search made one unit of progress and wants another step.
	Continue,
	/// A Path is reconstructed and ready for direction queries. Returned
	/// again on every further step until a new search is armed.
	Succeeded,
	/// The search terminated without a Path. Returned again on every
	/// further step until a new search is armed.
	Failed(SearchFailure),
}

/// Why a search terminated without producing a Path.
///
/// The anchoring failures are preconditions of the search and are reported
/// distinctly from ordinary exhaustion so that callers can react (for
/// example by widening the search bounds) instead of retrying identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFailure {
	/// The open list ran dry before the destination was reached.
	Exhausted,
	/// No walkable Node exists to anchor the start position onto.
	NoStartAnchor,
	/// No walkable Node exists to anchor the destination onto.
	NoDestinationAnchor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	Idle,
	Expanding,
	Reconstructing,
	Succeeded,
	Failed,
}

/// A best-first search that spreads its work over scheduling ticks.
///
/// The Planner is an explicit state object: every call to
/// [`step`](IncrementalPlanner::step) performs exactly one unit of work (one
/// frontier expansion, or one parent-link resolution during reconstruction)
/// and returns control to the caller. Arming a new search while one is in
/// flight is normal control flow: all search state is reinitialized when the
/// next step enters the new search, so the superseded one can never resume.
///
/// Most users drive the Planner through a
/// [`GridNavigator`](crate::GridNavigator) instead of using it directly.
#[derive(Clone, Debug)]
pub struct IncrementalPlanner {
	open: Vec<NodeId>,
	open_lookup: NodeIdSet,
	closed: NodeIdSet,
	start: Option<NodeId>,
	destination: Option<NodeId>,
	/// reconstruction walker, runs destination -> start
	recon: Option<NodeId>,
	/// direction-query cursor, runs start -> destination
	cursor: Option<NodeId>,
	path_found: bool,
	pending: Option<Vec3>,
	target: Option<Vec3>,
	phase: Phase,
	failure: Option<SearchFailure>,
	epoch: u64,
	expansions: usize,
}

impl IncrementalPlanner {
	/// Creates an idle Planner.
	pub fn new() -> IncrementalPlanner {
		IncrementalPlanner {
			open: Vec::new(),
			open_lookup: node_id_set(),
			closed: node_id_set(),
			start: None,
			destination: None,
			recon: None,
			cursor: None,
			path_found: false,
			pending: None,
			target: None,
			phase: Phase::Idle,
			failure: None,
			epoch: 0,
			expansions: 0,
		}
	}

	/// Requests a search towards `target` on the next step.
	///
	/// May be called at any time, including mid-search; the in-flight search
	/// is discarded. Readiness drops immediately so that no caller keeps
	/// following a Path the request just declared stale.
	pub fn arm(&mut self, target: Vec3) {
		log::debug!("search armed towards {target}");
		self.pending = Some(target);
		self.target = Some(target);
		self.path_found = false;
		self.cursor = None;
	}

	/// Re-arms towards the most recently armed target, if any. Used by the
	/// Obstruction Sweep when a fresh obstacle lands on the active Path.
	pub(crate) fn request_replan(&mut self) {
		if let Some(target) = self.target {
			self.arm(target);
		}
	}

	/// Performs one unit of search work.
	///
	/// `agent_pos` is the current position of the agent; it anchors the
	/// start Node when a pending search begins on this step.
	pub fn step(&mut self, grid: &mut GridGraph, agent_pos: Vec3) -> StepResult {
		if let Some(goal) = self.pending.take() {
			return self.begin(grid, agent_pos, goal);
		}
		match self.phase {
			Phase::Idle => StepResult::Idle,
			Phase::Expanding => self.expand(grid),
			Phase::Reconstructing => self.reconstruct(grid),
			Phase::Succeeded => StepResult::Succeeded,
			Phase::Failed => StepResult::Failed(self.failure.unwrap_or(SearchFailure::Exhausted)),
		}
	}

	/// Search entry: reset every Node, clear the sets, anchor start and
	/// destination onto the walkable lattice.
	fn begin(&mut self, grid: &mut GridGraph, agent_pos: Vec3, goal: Vec3) -> StepResult {
		self.epoch += 1;
		self.expansions = 0;
		self.failure = None;
		self.path_found = false;
		self.start = None;
		self.destination = None;
		self.recon = None;
		self.cursor = None;
		self.open.clear();
		self.open_lookup.clear();
		self.closed.clear();
		grid.reset_search_state();

		let Some(start) = grid.nearest_unobstructed_node(agent_pos) else {
			log::warn!("search {}: no walkable node near start {agent_pos}", self.epoch);
			return self.fail(SearchFailure::NoStartAnchor);
		};
		let Some(destination) = grid.nearest_unobstructed_node(goal) else {
			log::warn!("search {}: no walkable node near goal {goal}", self.epoch);
			return self.fail(SearchFailure::NoDestinationAnchor);
		};

		grid.node_mut(destination).status = NodeStatus::Destination;
		grid.node_mut(start).status = NodeStatus::Start;
		grid.set_destination_ref(start, destination);

		self.start = Some(start);
		self.destination = Some(destination);
		self.open.push(start);
		self.open_lookup.insert(start);
		self.phase = Phase::Expanding;

		log::debug!(
			"search {}: {:?} -> {:?}",
			self.epoch,
			grid[start].cell,
			grid[destination].cell
		);
		StepResult::Continue
	}

	fn fail(&mut self, failure: SearchFailure) -> StepResult {
		self.phase = Phase::Failed;
		self.failure = Some(failure);
		StepResult::Failed(failure)
	}

	/// One frontier expansion: pop the open Node with minimal `f`, close it
	/// and relax its neighbors.
	fn expand(&mut self, grid: &mut GridGraph) -> StepResult {
		let Some(destination) = self.destination else {
			return StepResult::Idle;
		};
		if self.open.is_empty() {
			log::warn!(
				"search {}: open list exhausted after {} expansions",
				self.epoch,
				self.expansions
			);
			return self.fail(SearchFailure::Exhausted);
		}

		// linear scan, first minimal f wins (encounter order tie-break)
		let mut best = 0;
		for i in 1..self.open.len() {
			if grid[self.open[i]].f() < grid[self.open[best]].f() {
				best = i;
			}
		}
		let current = self.open.remove(best);
		self.open_lookup.remove(&current);
		self.expansions += 1;

		if current == destination {
			log::debug!(
				"search {}: destination reached after {} expansions",
				self.epoch,
				self.expansions
			);
			self.recon = Some(current);
			self.phase = Phase::Reconstructing;
			return StepResult::Continue;
		}

		self.closed.insert(current);
		if grid[current].status != NodeStatus::Start {
			grid.node_mut(current).status = NodeStatus::Closed;
		}
		log::trace!(
			"search {}: expanding {:?} (f = {})",
			self.epoch,
			grid[current].cell,
			grid[current].f()
		);

		let neighbors = grid[current].neighbors.clone();
		for other in neighbors {
			if self.closed.contains(&other) || grid[other].is_obstructed() {
				continue;
			}
			let tentative = grid[current].g + grid[current].pos.distance(grid[other].pos);
			let discovered = !self.open_lookup.contains(&other);
			if discovered || tentative < grid[other].g {
				grid.set_parent(other, current);
				grid.set_destination_ref(other, destination);
				if discovered {
					if grid[other].status != NodeStatus::Destination {
						grid.node_mut(other).status = NodeStatus::Open;
					}
					self.open.push(other);
					self.open_lookup.insert(other);
				}
			}
		}
		StepResult::Continue
	}

	/// One reconstruction step: resolve a single parent link, mirroring the
	/// expansion cadence.
	fn reconstruct(&mut self, grid: &mut GridGraph) -> StepResult {
		let (Some(current), Some(start)) = (self.recon, self.start) else {
			return StepResult::Idle;
		};
		if current == start {
			self.cursor = Some(start);
			self.path_found = true;
			self.phase = Phase::Succeeded;
			log::info!(
				"search {}: path ready, {} cells, {} expansions",
				self.epoch,
				self.path_cells(grid).len(),
				self.expansions
			);
			return StepResult::Succeeded;
		}
		let Some(parent) = grid[current].parent else {
			log::warn!(
				"search {}: parent chain broken at {:?}",
				self.epoch,
				grid[current].cell
			);
			return self.fail(SearchFailure::Exhausted);
		};
		grid.node_mut(parent).child = Some(current);
		if grid[current].status == NodeStatus::Closed {
			grid.node_mut(current).status = NodeStatus::Path;
		}
		self.recon = Some(parent);
		StepResult::Continue
	}

	/// The movement vector towards the next Path waypoint.
	///
	/// Returns [`Vec3::ZERO`] while no Path is ready, so callers can poll
	/// unconditionally. Otherwise the Path cursor advances to its child (at
	/// most once per call) when the agent is within one spacing unit of it,
	/// and the returned vector points from `agent_pos` to the cursor. It is
	/// not normalized; callers combine it with their own movement speed.
	pub fn direction(&mut self, grid: &GridGraph, agent_pos: Vec3) -> Vec3 {
		if !self.path_found {
			return Vec3::ZERO;
		}
		let Some(cursor) = self.cursor else {
			return Vec3::ZERO;
		};
		let mut target = cursor;
		if Some(cursor) != self.destination
			&& grid[cursor].pos.distance(agent_pos) <= grid.spacing()
		{
			if let Some(child) = grid[cursor].child {
				target = child;
				self.cursor = Some(child);
			}
		}
		grid[target].pos - agent_pos
	}

	/// `true` once a reconstructed Path is ready for direction queries.
	pub fn path_found(&self) -> bool {
		self.path_found
	}

	/// `true` while a search is armed or in flight.
	pub fn is_searching(&self) -> bool {
		self.pending.is_some()
			|| matches!(self.phase, Phase::Expanding | Phase::Reconstructing)
	}

	/// Why the most recent search failed, if it did.
	pub fn last_failure(&self) -> Option<SearchFailure> {
		self.failure
	}

	/// Counts how many searches have been entered. Identifies a search in
	/// diagnostics.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	/// Number of frontier expansions performed by the current search.
	pub fn expansions(&self) -> usize {
		self.expansions
	}

	/// The anchored destination Node of the current search, if any.
	pub fn destination_node(&self) -> Option<NodeId> {
		self.destination
	}

	/// The Cells of the reconstructed Path from start to destination.
	/// Empty while no Path is ready.
	pub fn path_cells(&self, grid: &GridGraph) -> Vec<Point> {
		self.walk_path(grid, |node_id| grid[node_id].cell)
	}

	/// The world positions of the reconstructed Path from start to
	/// destination. Empty while no Path is ready.
	pub fn path_points(&self, grid: &GridGraph) -> Vec<Vec3> {
		self.walk_path(grid, |node_id| grid[node_id].pos)
	}

	/// Total Euclidean length of the reconstructed Path, 0 while none is
	/// ready.
	pub fn path_length(&self, grid: &GridGraph) -> f32 {
		let points = self.path_points(grid);
		points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
	}

	fn walk_path<T>(&self, grid: &GridGraph, mut map: impl FnMut(NodeId) -> T) -> Vec<T> {
		let mut out = Vec::new();
		if !self.path_found {
			return out;
		}
		let mut current = self.start;
		while let Some(id) = current {
			out.push(map(id));
			if Some(id) == self.destination || out.len() > grid.len() {
				break;
			}
			current = grid[id].child;
		}
		out
	}

	/// Whether `node` lies on the active Path, checked by walking the parent
	/// chain from the destination back to the start. Only meaningful while a
	/// Path is reconstructed or being reconstructed.
	pub(crate) fn active_path_contains(&self, grid: &GridGraph, node: NodeId) -> bool {
		if !self.path_found && self.phase != Phase::Reconstructing {
			return false;
		}
		let mut current = self.destination;
		let mut steps = 0;
		while let Some(id) = current {
			if id == node {
				return true;
			}
			steps += 1;
			if steps > grid.len() {
				break;
			}
			current = grid[id].parent;
		}
		false
	}
}

impl Default for IncrementalPlanner {
	fn default() -> IncrementalPlanner {
		IncrementalPlanner::new()
	}
}
