//! Error types for constructing the planning substrate.

use thiserror::Error;

/// Errors raised while setting up a Grid or Navigator.
///
/// Note that failing to find a Path is **not** an error: it is an expected
/// outcome of planning with incomplete obstacle knowledge and is reported
/// through [`StepResult`](crate::StepResult) and
/// [`last_failure`](crate::GridNavigator::last_failure) instead.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NavError {
	/// The requested lattice shape cannot hold any Nodes.
	#[error("invalid grid dimensions: {width}x{height} with spacing {spacing}")]
	InvalidDimensions {
		/// requested number of columns
		width: usize,
		/// requested number of rows
		height: usize,
		/// requested distance between neighboring Nodes
		spacing: f32,
	},

	/// The search bounds are inverted or have no area on the lattice plane.
	#[error("search bounds are empty")]
	EmptyBounds,
}

/// Result alias for fallible setup functions of this crate.
pub type Result<T> = std::result::Result<T, NavError>;
