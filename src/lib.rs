#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to incrementally plan and repair Paths on a Grid.
//!
//! ## Introduction
//! An agent moving through a world it only discovers at runtime cannot plan
//! once and walk blindly. Obstacles show up in sensor sweeps mid-traversal,
//! and a Path that was optimal when the search began may suddenly cross a
//! wall. This crate plans on a fixed lattice of Nodes, spreads the best-first
//! search over the host's frame loop one frontier expansion at a time, and
//! re-arms itself when a sensor reports an obstruction on the active Path.
//!
//! The search is optimal against the obstacle knowledge held at the moment it
//! begins; knowledge gained later triggers a new search instead of patching
//! the old Path.
//!
//! ## Examples
//! Creating the Navigator and finding a Path:
//! ```
//! use incremental_pathfinding::prelude::*;
//! use glam::Vec3;
//!
//! // a lattice covering a 10x10 world area at the default spacing of 1.0
//! let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(9.0, 0.0, 9.0));
//! let mut nav = GridNavigator::new(bounds, NavigatorConfig::default()).unwrap();
//!
//! // the orchestrator sets a destination and arms the search
//! nav.set_destination(Vec3::new(9.0, 0.0, 9.0));
//! nav.start_search();
//!
//! // the host drives one unit of search work per frame
//! let agent = Vec3::ZERO;
//! loop {
//! 	match nav.tick(agent) {
//! 		StepResult::Continue => {}
//! 		result => {
//! 			assert_eq!(result, StepResult::Succeeded);
//! 			break;
//! 		}
//! 	}
//! }
//!
//! // every frame: poll for a movement vector (zero while no Path is ready)
//! let direction = nav.path_direction(agent);
//! assert!(direction != Vec3::ZERO);
//! ```
//!
//! Feeding sensor sweeps:
//! ```
//! # use incremental_pathfinding::prelude::*;
//! # use glam::Vec3;
//! #
//! # let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(9.0, 0.0, 9.0));
//! # let mut nav = GridNavigator::new(bounds, NavigatorConfig::default()).unwrap();
//! #
//! nav.start_search_between(Vec3::ZERO, Vec3::new(9.0, 0.0, 9.0));
//! nav.run_to_completion(Vec3::ZERO, 500);
//! assert!(nav.path_found());
//!
//! // a sensor ray from the agent hits something at (5, 0, 5), which lies on
//! // the Path: the Navigator re-arms the search by itself
//! nav.proximity_sensor(Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0), true);
//! assert!(!nav.path_found());
//! assert!(nav.is_searching());
//!
//! // the next ticks compute a route around the fresh obstruction
//! nav.run_to_completion(Vec3::ZERO, 500);
//! assert!(nav.path_found());
//! ```
//!
//! ## Cooperative scheduling
//! Nothing in this crate blocks: every [`tick`](GridNavigator::tick)
//! performs at most one frontier expansion or one parent-link resolution and
//! returns. An unreachable destination runs the open list dry, which on a
//! large lattice takes many ticks; callers that need bounded latency use
//! [`run_to_completion`](GridNavigator::run_to_completion) with a step
//! budget. All state is single-writer and lives on one thread.

/// The Type used to reference a Node in the Grid Graph
pub type NodeId = usize;

/// A shorthand for Cells on the grid
pub type Point = (usize, usize);

pub(crate) type PointMap<V> = hashbrown::HashMap<Point, V>;

mod bounds;
pub use self::bounds::SearchBounds;

mod error;
pub use self::error::{NavError, Result};

mod grid;
pub use self::grid::GridGraph;

mod node;
pub use self::node::{Node, NodeKind, NodeStatus};

pub mod node_id;

mod planner;
pub use self::planner::{IncrementalPlanner, SearchFailure, StepResult};

mod navigator;
pub use self::navigator::{
	DrawCommand, FrameOfReference, GridNavigator, NavigatorConfig, Shade,
};

mod sweep;

/// A collection of the most common imports
pub mod prelude {
	pub use crate::{
		FrameOfReference, GridGraph, GridNavigator, NavigatorConfig, NodeKind, NodeStatus,
		SearchBounds, SearchFailure, StepResult,
	};
}
