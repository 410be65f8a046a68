/// Options for configuring the [`GridNavigator`](crate::GridNavigator)
///
/// Default options:
/// ```
/// # use incremental_pathfinding::NavigatorConfig;
/// assert_eq!(
/// 	NavigatorConfig {
/// 		spacing: 1.0,
/// 		detect_obstacles: false,
/// 		step_delay: 0,
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorConfig {
	/// Distance between orthogonally neighboring Nodes (defaults to `1.0`).
	///
	/// Also the sampling interval of sensor sweeps and the advance
	/// threshold of the Path cursor.
	pub spacing: f32,
	/// `false` (default): all Cells start unexplored and classification is
	/// learned entirely from sensor sweeps.
	///
	/// `true`: an obstacle probe passed to
	/// [`GridNavigator::with_probe`](crate::GridNavigator::with_probe)
	/// pre-classifies every Cell at build time.
	pub detect_obstacles: bool,
	/// Number of ticks to skip between consecutive search steps (defaults
	/// to `0`, meaning one unit of search work on every tick).
	///
	/// Raising this slows the search down without ever blocking the
	/// scheduler for more than one step's work. Mostly useful to watch the
	/// frontier spread through the debug draw hooks.
	pub step_delay: u32,
}

impl Default for NavigatorConfig {
	fn default() -> NavigatorConfig {
		NavigatorConfig {
			spacing: 1.0,
			detect_obstacles: false,
			step_delay: 0,
		}
	}
}
