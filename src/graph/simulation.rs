//! Force-directed layout state: one mutable record per node, addressed by
//! index, and the cooling schedule that drives it.

use std::collections::HashMap;

use glam::DVec2;
use log::{debug, warn};

use super::forces;
use super::model::GraphData;
use super::viewport::Viewport;

/// Mutable per-node layout record.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	pub position: DVec2,
	pub velocity: DVec2,
	/// Fixed position while the node is held by a drag.
	pub pin: Option<DVec2>,
	/// Drawn disc radius (`size / 2`).
	pub radius: f64,
}

impl SimNode {
	pub fn new(position: DVec2, radius: f64) -> Self {
		Self {
			position,
			velocity: DVec2::ZERO,
			pin: None,
			radius,
		}
	}

	pub fn is_pinned(&self) -> bool {
		self.pin.is_some()
	}
}

/// A link resolved to node indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
	/// Caller-supplied weight, used for drawing only.
	pub strength: f64,
	/// Spring stiffness, `1 / min(degree(source), degree(target))`.
	pub stiffness: f64,
	/// Share of the spring correction applied to the target.
	pub bias: f64,
}

impl SimLink {
	pub fn new(source: usize, target: usize, strength: f64, stiffness: f64, bias: f64) -> Self {
		Self {
			source,
			target,
			strength,
			stiffness,
			bias,
		}
	}
}

/// Tuning for the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Distances below this are clamped when computing charge.
	pub charge_distance_min: f64,
	/// How much of the centroid offset is corrected each tick.
	pub center_strength: f64,
	/// Added to the drawn radius to get the collision radius.
	pub collision_margin: f64,
	pub collision_iterations: usize,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Alpha used when a drag or resize wakes the layout.
	pub reheat_alpha: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001_f64;
		Self {
			link_distance: 100.0,
			charge_strength: -200.0,
			charge_distance_min: 1.0,
			center_strength: 1.0,
			collision_margin: 5.0,
			collision_iterations: 2,
			velocity_decay: 0.4,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			reheat_alpha: 0.3,
		}
	}
}

/// Where the layout is in its cooling cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Alpha is decaying toward zero; ticks move nodes.
	Cooling,
	/// Alpha is below the minimum; ticks do nothing.
	Settled,
	/// A drag is holding the layout warm.
	Perturbed,
}

const INITIAL_RADIUS: f64 = 10.0;

/// Iterative layout of one graph.
#[derive(Clone, Debug)]
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	config: SimulationConfig,
	alpha: f64,
	alpha_target: f64,
	viewport: Viewport,
	center: DVec2,
	phase: Phase,
}

impl Simulation {
	pub fn new(data: &GraphData, viewport: Viewport) -> Self {
		Self::with_config(data, viewport, SimulationConfig::default())
	}

	pub fn with_config(data: &GraphData, viewport: Viewport, config: SimulationConfig) -> Self {
		let center = viewport.center().unwrap_or_else(|| {
			debug!("Viewport {viewport:?} has no size yet, laying out around the origin");
			DVec2::ZERO
		});

		// Phyllotaxis spiral, so no two nodes start on top of each other.
		let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
		let nodes: Vec<SimNode> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden_angle;
				SimNode::new(center + DVec2::new(r * angle.cos(), r * angle.sin()), node.radius())
			})
			.collect();

		let index: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let mut resolved = Vec::with_capacity(data.links.len());
		for link in &data.links {
			match (index.get(link.source.as_str()), index.get(link.target.as_str())) {
				(Some(&s), Some(&t)) => resolved.push((s, t, link.strength)),
				_ => warn!(
					"Skipping link {} -> {}: endpoint not in graph",
					link.source, link.target
				),
			}
		}

		let mut degree = vec![0usize; nodes.len()];
		for &(s, t, _) in &resolved {
			degree[s] += 1;
			degree[t] += 1;
		}

		let links = resolved
			.into_iter()
			.map(|(s, t, strength)| {
				let (ds, dt) = (degree[s] as f64, degree[t] as f64);
				SimLink::new(s, t, strength, 1.0 / ds.min(dt), ds / (ds + dt))
			})
			.collect();

		Self {
			nodes,
			links,
			config,
			alpha: 1.0,
			alpha_target: 0.0,
			viewport,
			center,
			phase: Phase::Cooling,
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Target of the center force.
	pub fn center(&self) -> DVec2 {
		self.center
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	fn current_phase(&self) -> Phase {
		if self.alpha_target >= self.config.alpha_min {
			Phase::Perturbed
		} else if self.alpha < self.config.alpha_min {
			Phase::Settled
		} else {
			Phase::Cooling
		}
	}

	fn refresh_phase(&mut self) {
		let phase = self.current_phase();
		if phase != self.phase {
			debug!("Layout {:?} -> {:?} (alpha {:.4})", self.phase, phase, self.alpha);
			self.phase = phase;
		}
	}

	/// Raise alpha to at least `alpha`. Never lowers it.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
		self.refresh_phase();
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.max(0.0);
		self.refresh_phase();
	}

	/// Hold node `index` at `position`. Returns false for an unknown index.
	pub fn pin(&mut self, index: usize, position: DVec2) -> bool {
		match self.nodes.get_mut(index) {
			Some(node) => {
				node.pin = Some(position);
				true
			}
			None => false,
		}
	}

	/// Release node `index`; its velocity starts from zero.
	pub fn unpin(&mut self, index: usize) -> bool {
		match self.nodes.get_mut(index) {
			Some(node) => {
				node.pin = None;
				node.velocity = DVec2::ZERO;
				true
			}
			None => false,
		}
	}

	/// Move the center target to the new midpoint and nudge alpha so the
	/// layout drifts there. Positions are left untouched.
	///
	/// Returns false, changing nothing, when `viewport` has no size.
	pub fn resize(&mut self, viewport: Viewport) -> bool {
		let Some(center) = viewport.center() else {
			debug!("Ignoring resize to {viewport:?}");
			return false;
		};
		debug!("Resize to {}x{}", viewport.width, viewport.height);
		self.viewport = viewport;
		self.center = center;
		self.reheat(self.config.reheat_alpha);
		true
	}

	/// Index of the top-most node whose drawn disc contains `point`.
	pub fn node_at(&self, point: DVec2) -> Option<usize> {
		self.nodes
			.iter()
			.rposition(|n| n.position.distance_squared(point) <= n.radius * n.radius)
	}

	/// Sum of squared speeds.
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes.iter().map(|n| n.velocity.length_squared()).sum()
	}

	/// Advance one step. Returns false when there was nothing to do
	/// (empty graph or settled layout).
	pub fn tick(&mut self) -> bool {
		if self.nodes.is_empty() || self.current_phase() == Phase::Settled {
			self.refresh_phase();
			return false;
		}

		let config = &self.config;
		self.alpha += (self.alpha_target - self.alpha) * config.alpha_decay;

		forces::apply_links(&mut self.nodes, &self.links, config.link_distance, self.alpha);
		forces::apply_charge(
			&mut self.nodes,
			config.charge_strength,
			config.charge_distance_min,
			self.alpha,
		);
		forces::apply_center(&mut self.nodes, self.center, config.center_strength);

		let keep = 1.0 - config.velocity_decay;
		for node in &mut self.nodes {
			match node.pin {
				Some(pin) => {
					node.position = pin;
					node.velocity = DVec2::ZERO;
				}
				None => {
					node.velocity *= keep;
					node.position += node.velocity;
				}
			}
		}

		forces::resolve_collisions(
			&mut self.nodes,
			config.collision_margin,
			config.collision_iterations,
		);

		self.refresh_phase();
		true
	}

	/// Tick until settled or `max_ticks` have run; returns ticks taken.
	pub fn tick_until_settled(&mut self, max_ticks: usize) -> usize {
		let mut ticks = 0;
		while ticks < max_ticks && self.tick() {
			ticks += 1;
		}
		ticks
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::graph::model::{Category, KnowledgeLink, KnowledgeNode};

	fn viewport() -> Viewport {
		Viewport::new(800.0, 500.0)
	}

	fn pair() -> GraphData {
		let nodes = vec![
			KnowledgeNode::new("a", "A", Category::Policy, 20.0, &["b"]),
			KnowledgeNode::new("b", "B", Category::Concept, 20.0, &[]),
		];
		GraphData::from_nodes(nodes, &mut SmallRng::seed_from_u64(5))
	}

	#[test]
	fn empty_graph_does_no_work() {
		let mut sim = Simulation::new(&GraphData::default(), viewport());

		assert!(sim.is_empty());
		assert!(!sim.tick());
		assert_eq!(sim.tick_until_settled(100), 0);
		assert!(sim.nodes().is_empty());
	}

	#[test]
	fn dangling_links_are_skipped() {
		let mut data = pair();
		data.links.push(KnowledgeLink {
			source: "a".into(),
			target: "nowhere".into(),
			strength: 0.7,
		});

		let mut sim = Simulation::new(&data, viewport());
		assert_eq!(sim.links().len(), 1);
		assert!(sim.tick());
	}

	#[test]
	fn cools_then_settles() {
		let mut sim = Simulation::new(&pair(), viewport());
		assert_eq!(sim.phase(), Phase::Cooling);

		let ticks = sim.tick_until_settled(1_000);
		assert!(ticks > 0 && ticks < 1_000, "{ticks}");
		assert_eq!(sim.phase(), Phase::Settled);
		assert!(!sim.tick());
	}

	#[test]
	fn single_link_relaxes_to_rest_length() {
		let config = SimulationConfig {
			charge_strength: 0.0,
			..SimulationConfig::default()
		};
		let mut sim = Simulation::with_config(&pair(), viewport(), config);
		sim.tick_until_settled(1_000);

		let distance = sim.nodes()[0].position.distance(sim.nodes()[1].position);
		assert!((distance - 100.0).abs() < 1.0, "{distance}");
	}

	#[test]
	fn pinned_node_sits_exactly_on_pin() {
		let mut sim = Simulation::new(&pair(), viewport());
		let pin = DVec2::new(123.5, 77.25);

		assert!(sim.pin(0, pin));
		sim.tick();
		assert_eq!(sim.nodes()[0].position, pin);

		assert!(sim.unpin(0));
		sim.reheat(0.3);
		for _ in 0..5 {
			sim.tick();
		}
		assert_ne!(sim.nodes()[0].position, pin);
	}

	#[test]
	fn pin_out_of_range_is_rejected() {
		let mut sim = Simulation::new(&pair(), viewport());
		assert!(!sim.pin(9, DVec2::ZERO));
		assert!(!sim.unpin(9));
	}

	#[test]
	fn alpha_target_keeps_layout_perturbed() {
		let mut sim = Simulation::new(&pair(), viewport());
		sim.tick_until_settled(1_000);

		sim.set_alpha_target(0.3);
		assert_eq!(sim.phase(), Phase::Perturbed);
		for _ in 0..500 {
			assert!(sim.tick());
		}

		sim.set_alpha_target(0.0);
		assert_eq!(sim.phase(), Phase::Cooling);
	}

	#[test]
	fn resize_moves_center_not_nodes() {
		let mut sim = Simulation::new(&pair(), viewport());
		sim.tick_until_settled(1_000);
		let before: Vec<DVec2> = sim.nodes().iter().map(|n| n.position).collect();

		assert!(sim.resize(Viewport::new(1200.0, 500.0)));
		assert_eq!(sim.center(), DVec2::new(600.0, 250.0));
		assert_eq!(sim.phase(), Phase::Cooling);
		assert!(sim.alpha() >= 0.3);
		let after: Vec<DVec2> = sim.nodes().iter().map(|n| n.position).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn zero_resize_is_ignored() {
		let mut sim = Simulation::new(&pair(), viewport());
		assert!(!sim.resize(Viewport::new(0.0, 500.0)));
		assert_eq!(sim.center(), DVec2::new(400.0, 250.0));
	}

	#[test]
	fn node_at_hits_drawn_disc() {
		let sim = Simulation::new(&pair(), viewport());
		let first = sim.nodes()[0].position;

		assert_eq!(sim.node_at(first), Some(0));
		assert_eq!(sim.node_at(first + DVec2::new(500.0, 500.0)), None);
	}
}
