use glam::DVec2;
use log::debug;

use super::simulation::Simulation;

/// Tracks the single node currently held by the pointer.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	active: Option<usize>,
}

impl DragController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active(&self) -> Option<usize> {
		self.active
	}

	pub fn is_dragging(&self) -> bool {
		self.active.is_some()
	}

	/// Pin `index` under the pointer and keep the layout warm while held.
	///
	/// An earlier drag that never ended is released first.
	pub fn start(&mut self, sim: &mut Simulation, index: usize, pointer: DVec2) -> bool {
		if self.active.is_some() {
			self.end(sim);
		}
		if !sim.pin(index, pointer) {
			return false;
		}
		let reheat = sim.config().reheat_alpha;
		sim.set_alpha_target(reheat);
		sim.reheat(reheat);
		self.active = Some(index);
		debug!("Drag start on node {index}");
		true
	}

	/// Follow the pointer. Returns false when nothing is being dragged.
	pub fn drag_to(&mut self, sim: &mut Simulation, pointer: DVec2) -> bool {
		match self.active {
			Some(index) => sim.pin(index, pointer),
			None => false,
		}
	}

	/// Release the held node, letting it move freely again.
	pub fn end(&mut self, sim: &mut Simulation) -> Option<usize> {
		let index = self.active.take()?;
		sim.unpin(index);
		sim.set_alpha_target(0.0);
		debug!("Drag end on node {index}");
		Some(index)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::graph::model::{Category, GraphData, KnowledgeNode};
	use crate::graph::simulation::Phase;
	use crate::graph::viewport::Viewport;

	fn settled() -> Simulation {
		let nodes = vec![
			KnowledgeNode::new("a", "A", Category::Process, 30.0, &["b", "c"]),
			KnowledgeNode::new("b", "B", Category::Process, 20.0, &["c"]),
			KnowledgeNode::new("c", "C", Category::Metric, 40.0, &[]),
		];
		let data = GraphData::from_nodes(nodes, &mut SmallRng::seed_from_u64(2));
		let mut sim = Simulation::new(&data, Viewport::new(600.0, 400.0));
		sim.tick_until_settled(1_000);
		sim
	}

	#[test]
	fn drag_pins_reheats_and_releases() {
		let mut sim = settled();
		let mut drag = DragController::new();
		let grab = DVec2::new(50.0, 60.0);

		assert!(drag.start(&mut sim, 1, grab));
		assert_eq!(sim.phase(), Phase::Perturbed);
		assert!(sim.alpha() >= 0.3);
		sim.tick();
		assert_eq!(sim.nodes()[1].position, grab);

		let moved = DVec2::new(80.0, 90.0);
		assert!(drag.drag_to(&mut sim, moved));
		sim.tick();
		assert_eq!(sim.nodes()[1].position, moved);

		assert_eq!(drag.end(&mut sim), Some(1));
		assert!(!sim.nodes()[1].is_pinned());
		assert_eq!(sim.phase(), Phase::Cooling);
		sim.tick();
		assert_ne!(sim.nodes()[1].position, moved);
	}

	#[test]
	fn second_start_releases_first_node() {
		let mut sim = settled();
		let mut drag = DragController::new();

		drag.start(&mut sim, 0, DVec2::ZERO);
		drag.start(&mut sim, 2, DVec2::new(10.0, 10.0));

		assert_eq!(drag.active(), Some(2));
		assert!(!sim.nodes()[0].is_pinned());
		assert!(sim.nodes()[2].is_pinned());
	}

	#[test]
	fn unknown_node_is_not_dragged() {
		let mut sim = settled();
		let mut drag = DragController::new();

		assert!(!drag.start(&mut sim, 42, DVec2::ZERO));
		assert!(!drag.is_dragging());
		assert!(!drag.drag_to(&mut sim, DVec2::ZERO));
		assert_eq!(drag.end(&mut sim), None);
	}
}
