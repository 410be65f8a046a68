//! The Navigation Capability surface consumed by the agent and orchestrator.

use crate::grid::GridGraph;
use crate::planner::{IncrementalPlanner, SearchFailure, StepResult};
use crate::{sweep, NavError, Point, Result, SearchBounds};
use glam::Vec3;

mod config;
pub use self::config::NavigatorConfig;

mod debug_draw;
pub use self::debug_draw::{DrawCommand, Shade};

/// Declares which coordinate frame positions and vectors are exchanged in.
///
/// A fixed, queryable property of the Navigator, not negotiated per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOfReference {
	/// Positions and vectors are absolute world coordinates.
	World,
	/// Positions and vectors are relative to the agent.
	Agent,
}

/// The Navigation Capability: plans Paths across a fixed lattice towards a
/// destination, incrementally, while sensor sweeps discover obstacles at
/// runtime.
///
/// The Navigator owns a [`GridGraph`] sized from its search bounds and an
/// [`IncrementalPlanner`] that spreads search work over
/// [`tick`](GridNavigator::tick) calls. The agent polls
/// [`path_direction`](GridNavigator::path_direction) every tick for a
/// movement vector and reports sensor rays through
/// [`proximity_sensor`](GridNavigator::proximity_sensor); a ray that blocks
/// the active Path re-arms the search automatically.
///
/// No planning failure crosses this boundary as an error: outcomes are
/// observable through [`path_found`](GridNavigator::path_found),
/// [`last_failure`](GridNavigator::last_failure) and the log.
///
/// ## Examples
/// ```
/// use incremental_pathfinding::prelude::*;
/// use glam::Vec3;
///
/// // a 5x5 lattice with the default spacing of 1.0
/// let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
/// let mut nav = GridNavigator::new(bounds, NavigatorConfig::default()).unwrap();
///
/// nav.start_search_between(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
/// let result = nav.run_to_completion(Vec3::ZERO, 100);
/// assert_eq!(result, StepResult::Succeeded);
/// assert!(nav.path_found());
///
/// // the direction vector points at the next waypoint and is not normalized
/// let dir = nav.path_direction(Vec3::ZERO);
/// assert_eq!(dir, Vec3::new(1.0, 0.0, 1.0));
///
/// // a sensor ray hits something on the path: the search re-arms itself
/// nav.proximity_sensor(Vec3::ZERO, Vec3::new(2.0, 0.0, 2.0), true);
/// assert!(!nav.path_found());
/// assert_eq!(nav.run_to_completion(Vec3::ZERO, 100), StepResult::Succeeded);
/// ```
#[derive(Clone, Debug)]
pub struct GridNavigator {
	grid: GridGraph,
	planner: IncrementalPlanner,
	config: NavigatorConfig,
	bounds: SearchBounds,
	origin: Vec3,
	destination: Vec3,
	cooldown: u32,
}

impl GridNavigator {
	/// Creates a Navigator whose lattice covers `bounds` at
	/// `config.spacing`, with all Cells unexplored.
	///
	/// The lattice shape is fixed here and never rebuilt; later bounds
	/// changes only re-scope target clamping.
	///
	/// ## Errors
	/// [`NavError::EmptyBounds`] for inverted or zero-area bounds,
	/// [`NavError::InvalidDimensions`] for a non-positive spacing.
	pub fn new(bounds: SearchBounds, config: NavigatorConfig) -> Result<GridNavigator> {
		Self::build(bounds, config, None)
	}

	/// Like [`new`](GridNavigator::new), but pre-classifies every Cell by
	/// asking `probe` whether the world is blocked at its position.
	///
	/// The probe is only consulted when `config.detect_obstacles` is set;
	/// otherwise it is ignored and all Cells start unexplored.
	pub fn with_probe(
		bounds: SearchBounds,
		config: NavigatorConfig,
		probe: impl Fn(Vec3) -> bool,
	) -> Result<GridNavigator> {
		if config.detect_obstacles {
			Self::build(bounds, config, Some(&probe))
		} else {
			Self::build(bounds, config, None)
		}
	}

	fn build(
		bounds: SearchBounds,
		config: NavigatorConfig,
		probe: Option<&dyn Fn(Vec3) -> bool>,
	) -> Result<GridNavigator> {
		if bounds.is_empty() {
			return Err(NavError::EmptyBounds);
		}
		let extent = bounds.extent();
		let width = (extent.x / config.spacing).floor() as usize + 1;
		let height = (extent.z / config.spacing).floor() as usize + 1;
		let mut grid = GridGraph::new(width, height, config.spacing)?;
		grid.build(probe);
		Ok(GridNavigator {
			grid,
			planner: IncrementalPlanner::new(),
			config,
			bounds,
			origin: Vec3::ZERO,
			destination: Vec3::ZERO,
			cooldown: 0,
		})
	}

	/// The volume the Navigator plans within.
	pub fn search_bounds(&self) -> SearchBounds {
		self.bounds
	}

	/// Re-scopes the planning volume. The lattice keeps its shape; only the
	/// clamping of future search targets changes.
	pub fn set_search_bounds(&mut self, bounds: SearchBounds) {
		self.bounds = bounds;
	}

	/// The position the current Path request starts from.
	pub fn origin(&self) -> Vec3 {
		self.origin
	}

	/// Updates the origin of the current Path request. The position passed
	/// to [`tick`](GridNavigator::tick) supersedes this at every step.
	pub fn set_origin(&mut self, origin: Vec3) {
		self.origin = origin;
	}

	/// The position the current Path request aims for.
	pub fn destination(&self) -> Vec3 {
		self.destination
	}

	/// Updates the destination of the current Path request. Takes effect on
	/// the next [`start_search`](GridNavigator::start_search).
	pub fn set_destination(&mut self, destination: Vec3) {
		self.destination = destination;
	}

	/// Arms a search from the current origin towards the current
	/// destination. The search begins on the next tick; an in-flight search
	/// is discarded.
	pub fn start_search(&mut self) {
		let target = self.bounds.clamp(self.destination);
		if target != self.destination {
			log::debug!(
				"destination {} clamped into search bounds at {target}",
				self.destination
			);
		}
		self.planner.arm(target);
	}

	/// Arms a search with explicit origin and destination overrides.
	pub fn start_search_between(&mut self, origin: Vec3, destination: Vec3) {
		self.origin = origin;
		self.destination = destination;
		self.start_search();
	}

	/// Drives the Planner by exactly one unit of work.
	///
	/// `agent_pos` is recorded as the current origin and anchors the start
	/// Node when a pending search enters on this tick. While
	/// `config.step_delay` is non-zero, that many ticks are skipped between
	/// consecutive search steps.
	pub fn tick(&mut self, agent_pos: Vec3) -> StepResult {
		self.origin = agent_pos;
		if self.planner.is_searching() && self.cooldown > 0 {
			self.cooldown -= 1;
			return StepResult::Continue;
		}
		let result = self.planner.step(&mut self.grid, agent_pos);
		if result == StepResult::Continue {
			self.cooldown = self.config.step_delay;
		}
		result
	}

	/// Runs the Planner until it terminates or `max_steps` is spent,
	/// whatever comes first. Returns the last [`StepResult`]; a returned
	/// [`Continue`](StepResult::Continue) means the budget ran out.
	///
	/// This is the external step budget for callers that need bounded
	/// latency on an unreachable destination. `config.step_delay` is not
	/// honored here, every iteration performs work.
	pub fn run_to_completion(&mut self, agent_pos: Vec3, max_steps: usize) -> StepResult {
		self.origin = agent_pos;
		let mut result = StepResult::Idle;
		for _ in 0..max_steps {
			result = self.planner.step(&mut self.grid, agent_pos);
			match result {
				StepResult::Continue => {}
				_ => break,
			}
		}
		result
	}

	/// `true` once a reconstructed Path is ready for
	/// [`path_direction`](GridNavigator::path_direction) queries.
	pub fn path_found(&self) -> bool {
		self.planner.path_found()
	}

	/// `true` while a search is armed or in flight.
	pub fn is_searching(&self) -> bool {
		self.planner.is_searching()
	}

	/// Why the most recent search produced no Path, if it did not.
	pub fn last_failure(&self) -> Option<SearchFailure> {
		self.planner.last_failure()
	}

	/// The movement vector from `agent_pos` towards the next Path waypoint,
	/// or zero while no Path is ready. Callers can poll this
	/// unconditionally; see
	/// [`IncrementalPlanner::direction`] for the cursor rules.
	pub fn path_direction(&mut self, agent_pos: Vec3) -> Vec3 {
		self.planner.direction(&self.grid, agent_pos)
	}

	/// Feeds one sensor ray into the Obstruction Sweep: free space is
	/// recorded along the ray, and a blocked ray obstructs the Cell at its
	/// endpoint. An obstruction on the active Path re-arms the search.
	pub fn proximity_sensor(&mut self, from: Vec3, to: Vec3, obstructed: bool) {
		sweep::observe_ray(&mut self.grid, &mut self.planner, from, to, obstructed);
	}

	/// The coordinate frame of all positions and vectors exchanged with
	/// this Navigator. Always [`FrameOfReference::World`].
	pub fn frame_of_reference(&self) -> FrameOfReference {
		FrameOfReference::World
	}

	/// Read access to the lattice, for inspection and rendering.
	pub fn grid(&self) -> &GridGraph {
		&self.grid
	}

	/// The configuration this Navigator was created with.
	pub fn config(&self) -> NavigatorConfig {
		self.config
	}

	/// Counts how many searches have been entered.
	pub fn epoch(&self) -> u64 {
		self.planner.epoch()
	}

	/// Number of frontier expansions performed by the current search.
	pub fn expansions(&self) -> usize {
		self.planner.expansions()
	}

	/// The Cells of the reconstructed Path, start to destination. Empty
	/// while no Path is ready.
	pub fn path_cells(&self) -> Vec<Point> {
		self.planner.path_cells(&self.grid)
	}

	/// The world positions of the reconstructed Path, start to destination.
	/// Empty while no Path is ready.
	pub fn path_points(&self) -> Vec<Vec3> {
		self.planner.path_points(&self.grid)
	}

	/// Total Euclidean length of the reconstructed Path, 0 while none is
	/// ready.
	pub fn path_length(&self) -> f32 {
		self.planner.path_length(&self.grid)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn five_by_five() -> GridNavigator {
		let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
		GridNavigator::new(bounds, NavigatorConfig::default()).unwrap()
	}

	#[test]
	fn lattice_shape_from_bounds() {
		let nav = five_by_five();
		assert_eq!(nav.grid().width(), 5);
		assert_eq!(nav.grid().height(), 5);
		assert_eq!(nav.grid().len(), 25);
	}

	#[test]
	fn empty_bounds_rejected() {
		let bounds = SearchBounds::new(Vec3::ONE, Vec3::ZERO);
		let err = GridNavigator::new(bounds, NavigatorConfig::default()).unwrap_err();
		assert_eq!(err, NavError::EmptyBounds);
	}

	#[test]
	fn probe_requires_detection_flag() {
		let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 2.0));
		let nav =
			GridNavigator::with_probe(bounds, NavigatorConfig::default(), |_| true).unwrap();
		// detect_obstacles defaults to false: the probe was ignored
		assert!(nav
			.grid()
			.iter()
			.all(|(_, node)| !node.is_obstructed()));

		let config = NavigatorConfig {
			detect_obstacles: true,
			..Default::default()
		};
		let nav = GridNavigator::with_probe(bounds, config, |_| true).unwrap();
		assert!(nav.grid().iter().all(|(_, node)| node.is_obstructed()));
	}

	#[test]
	fn destination_clamped_into_bounds() {
		let mut nav = five_by_five();
		nav.start_search_between(Vec3::ZERO, Vec3::new(40.0, 0.0, 40.0));
		let result = nav.run_to_completion(Vec3::ZERO, 100);
		assert_eq!(result, StepResult::Succeeded);
		assert_eq!(nav.path_cells().last(), Some(&(4, 4)));
	}

	#[test]
	fn step_delay_spreads_the_work() {
		let config = NavigatorConfig {
			step_delay: 1,
			..Default::default()
		};
		let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
		let mut nav = GridNavigator::new(bounds, config).unwrap();
		nav.start_search_between(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));

		// entry step
		assert_eq!(nav.tick(Vec3::ZERO), StepResult::Continue);
		let before = nav.expansions();
		// cooldown tick: no work
		assert_eq!(nav.tick(Vec3::ZERO), StepResult::Continue);
		assert_eq!(nav.expansions(), before);
		// work resumes
		nav.tick(Vec3::ZERO);
		assert_eq!(nav.expansions(), before + 1);
	}

	#[test]
	fn frame_is_fixed() {
		let nav = five_by_five();
		assert_eq!(nav.frame_of_reference(), FrameOfReference::World);
	}
}
