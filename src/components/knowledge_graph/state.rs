use glam::DVec2;
use log::{info, warn};

use crate::graph::{
	Category, CancelToken, DragController, GraphData, PulseConfig, PulseSet, Simulation,
	TickScheduler, Viewport,
};
use crate::theme::Palette;

/// What the renderer needs to know about a node besides its position.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub label: String,
	pub category: Category,
}

/// A laid-out graph with its interaction and decoration state.
pub struct KnowledgeGraphState {
	pub sim: Simulation,
	pub drag: DragController,
	pub pulses: PulseSet,
	pub scheduler: TickScheduler,
	pub nodes: Vec<NodeInfo>,
	pub palette: Palette,
}

impl KnowledgeGraphState {
	pub fn new(data: &GraphData, viewport: Viewport, palette: Palette, seed: u64) -> Self {
		for problem in data.validate() {
			warn!("Knowledge graph data: {problem}");
		}
		let nodes = data
			.nodes
			.iter()
			.map(|n| NodeInfo {
				label: n.label.clone(),
				category: n.category,
			})
			.collect();

		Self {
			sim: Simulation::new(data, viewport),
			drag: DragController::new(),
			pulses: PulseSet::new(&data.nodes, PulseConfig::default(), seed),
			scheduler: TickScheduler::new(),
			nodes,
			palette,
		}
	}

	pub fn start(&mut self) -> CancelToken {
		self.scheduler.start()
	}

	/// One animation frame. Returns whether another should be requested.
	pub fn frame(&mut self, dt: f64) -> bool {
		if !self.scheduler.tick(&mut self.sim) {
			return false;
		}
		self.pulses.advance(dt);
		true
	}

	/// Grab the node under `point`, if any.
	pub fn pointer_down(&mut self, point: DVec2) -> bool {
		match self.sim.node_at(point) {
			Some(index) => self.drag.start(&mut self.sim, index, point),
			None => false,
		}
	}

	pub fn pointer_move(&mut self, point: DVec2) -> bool {
		self.drag.drag_to(&mut self.sim, point)
	}

	pub fn pointer_up(&mut self) {
		self.drag.end(&mut self.sim);
	}
}

enum Stage {
	/// Waiting for a viewport with a usable size.
	Pending {
		data: GraphData,
		palette: Palette,
		seed: u64,
	},
	Ready(Box<KnowledgeGraphState>),
}

/// A graph view that may still be waiting for its first usable size.
pub struct GraphView {
	stage: Stage,
	stopped: bool,
}

impl GraphView {
	pub fn new(data: GraphData, viewport: Viewport, palette: Palette, seed: u64) -> Self {
		let mut view = Self {
			stage: Stage::Pending {
				data,
				palette,
				seed,
			},
			stopped: false,
		};
		if viewport.is_valid() {
			view.initialize(viewport);
		} else {
			info!("Deferring knowledge graph layout until the container has a size");
		}
		view
	}

	fn initialize(&mut self, viewport: Viewport) {
		if let Stage::Pending {
			data,
			palette,
			seed,
		} = &self.stage
		{
			let mut state = KnowledgeGraphState::new(data, viewport, *palette, *seed);
			state.start();
			info!(
				"Knowledge graph laid out in {}x{}",
				viewport.width, viewport.height
			);
			self.stage = Stage::Ready(Box::new(state));
		}
	}

	pub fn state(&self) -> Option<&KnowledgeGraphState> {
		match &self.stage {
			Stage::Ready(state) => Some(state.as_ref()),
			Stage::Pending { .. } => None,
		}
	}

	pub fn state_mut(&mut self) -> Option<&mut KnowledgeGraphState> {
		match &mut self.stage {
			Stage::Ready(state) => Some(state.as_mut()),
			Stage::Pending { .. } => None,
		}
	}

	/// Apply a new container size, laying out for the first time if the
	/// view was still waiting.
	pub fn resize(&mut self, viewport: Viewport) {
		if self.stopped {
			return;
		}
		if let Stage::Ready(state) = &mut self.stage {
			state.sim.resize(viewport);
		} else if viewport.is_valid() {
			self.initialize(viewport);
		}
	}

	pub fn set_palette(&mut self, new_palette: Palette) {
		match &mut self.stage {
			Stage::Ready(state) => state.palette = new_palette,
			Stage::Pending { palette, .. } => *palette = new_palette,
		}
	}

	/// One animation frame; false once the view has been stopped.
	pub fn frame(&mut self, dt: f64) -> bool {
		if self.stopped {
			return false;
		}
		match &mut self.stage {
			Stage::Ready(state) => state.frame(dt),
			Stage::Pending { .. } => true,
		}
	}

	pub fn pointer_down(&mut self, point: DVec2) -> bool {
		self.state_mut().is_some_and(|s| s.pointer_down(point))
	}

	pub fn pointer_move(&mut self, point: DVec2) -> bool {
		self.state_mut().is_some_and(|s| s.pointer_move(point))
	}

	pub fn pointer_up(&mut self) {
		if let Some(state) = self.state_mut() {
			state.pointer_up();
		}
	}

	/// Halt the tick loop for good.
	pub fn stop(&mut self) {
		self.stopped = true;
		if let Some(state) = self.state_mut() {
			state.scheduler.stop();
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::graph::{KnowledgeNode, Phase};
	use crate::theme::Theme;

	fn data() -> GraphData {
		let nodes = vec![
			KnowledgeNode::new("a", "Alpha", Category::Policy, 40.0, &["b"]),
			KnowledgeNode::new("b", "Beta", Category::Concept, 20.0, &["a"]),
		];
		GraphData::from_nodes(nodes, &mut SmallRng::seed_from_u64(8))
	}

	#[test]
	fn zero_width_defers_layout_until_resize() {
		let mut view = GraphView::new(data(), Viewport::new(0.0, 500.0), Theme::Light.palette(), 1);
		assert!(view.state().is_none());
		assert!(view.frame(0.016));

		view.resize(Viewport::new(0.0, 500.0));
		assert!(view.state().is_none());

		view.resize(Viewport::new(640.0, 500.0));
		let state = view.state().expect("laid out after a valid resize");
		assert_eq!(state.sim.center(), DVec2::new(320.0, 250.0));
		assert!(state.scheduler.is_running());
	}

	#[test]
	fn frames_advance_layout_until_stopped() {
		let mut view = GraphView::new(data(), Viewport::new(640.0, 500.0), Theme::Light.palette(), 1);
		let alpha = view.state().map(|s| s.sim.alpha());

		assert!(view.frame(0.016));
		assert!(view.state().map(|s| s.sim.alpha()) < alpha);

		view.stop();
		assert!(!view.frame(0.016));
		assert!(!view.state().is_some_and(|s| s.scheduler.is_running()));
	}

	#[test]
	fn pointer_drag_pins_node_under_cursor() {
		let mut view = GraphView::new(data(), Viewport::new(640.0, 500.0), Theme::Dark.palette(), 1);
		let first = view.state().map(|s| s.sim.nodes()[0].position);
		let first = first.expect("ready");

		assert!(view.pointer_down(first));
		let target = DVec2::new(100.0, 100.0);
		assert!(view.pointer_move(target));
		view.frame(0.016);

		let state = view.state().expect("ready");
		assert_eq!(state.sim.nodes()[0].position, target);
		assert_eq!(state.sim.phase(), Phase::Perturbed);

		view.pointer_up();
		let state = view.state().expect("ready");
		assert!(!state.sim.nodes()[0].is_pinned());
		assert!(!state.drag.is_dragging());
	}

	#[test]
	fn empty_space_does_not_start_drag() {
		let mut view = GraphView::new(data(), Viewport::new(640.0, 500.0), Theme::Light.palette(), 1);
		assert!(!view.pointer_down(DVec2::new(-1000.0, -1000.0)));
		assert!(!view.pointer_move(DVec2::ZERO));
	}

	#[test]
	fn palette_change_leaves_layout_alone() {
		let mut view = GraphView::new(data(), Viewport::new(640.0, 500.0), Theme::Light.palette(), 1);
		view.frame(0.016);
		let before: Vec<DVec2> = view
			.state()
			.map(|s| s.sim.nodes().iter().map(|n| n.position).collect())
			.unwrap_or_default();

		view.set_palette(Theme::Dark.palette());

		let state = view.state().expect("ready");
		assert_eq!(state.palette, Theme::Dark.palette());
		let after: Vec<DVec2> = state.sim.nodes().iter().map(|n| n.position).collect();
		assert_eq!(before, after);
	}
}
