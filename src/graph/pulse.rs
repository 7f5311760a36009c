//! Decorative expanding rings around large nodes.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::model::KnowledgeNode;

#[derive(Clone, Debug, PartialEq)]
pub struct PulseConfig {
	/// Nodes strictly larger than this pulse.
	pub size_threshold: f64,
	/// Seconds for one expansion.
	pub duration: f64,
	/// How far the ring grows past the node's radius.
	pub growth: f64,
	/// Upper bound (exclusive) of the random pause between pulses, seconds.
	pub max_delay: f64,
	pub opacity: f64,
}

impl Default for PulseConfig {
	fn default() -> Self {
		Self {
			size_threshold: 30.0,
			duration: 1.5,
			growth: 10.0,
			max_delay: 1.0,
			opacity: 0.5,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
	Expanding { elapsed: f64 },
	Waiting { remaining: f64 },
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// One node's ring.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseRing {
	pub node: usize,
	base_radius: f64,
	stage: Stage,
}

impl PulseRing {
	fn progress(&self, config: &PulseConfig) -> f64 {
		match self.stage {
			Stage::Expanding { elapsed } => {
				ease_in_out_cubic((elapsed / config.duration).clamp(0.0, 1.0))
			}
			Stage::Waiting { .. } => 0.0,
		}
	}

	pub fn radius(&self, config: &PulseConfig) -> f64 {
		self.base_radius + config.growth * self.progress(config)
	}

	pub fn opacity(&self, config: &PulseConfig) -> f64 {
		config.opacity * (1.0 - self.progress(config))
	}

	pub fn is_waiting(&self) -> bool {
		matches!(self.stage, Stage::Waiting { .. })
	}

	fn advance<R: Rng>(&mut self, dt: f64, config: &PulseConfig, rng: &mut R) {
		let mut budget = dt;
		while budget > 0.0 {
			self.stage = match self.stage {
				Stage::Expanding { elapsed } => {
					let left = config.duration - elapsed;
					if budget < left {
						let stage = Stage::Expanding {
							elapsed: elapsed + budget,
						};
						budget = 0.0;
						stage
					} else {
						budget -= left;
						let delay = if config.max_delay > 0.0 {
							rng.gen_range(0.0..config.max_delay)
						} else {
							0.0
						};
						Stage::Waiting { remaining: delay }
					}
				}
				Stage::Waiting { remaining } => {
					if budget < remaining {
						let stage = Stage::Waiting {
							remaining: remaining - budget,
						};
						budget = 0.0;
						stage
					} else {
						budget -= remaining;
						Stage::Expanding { elapsed: 0.0 }
					}
				}
			};
			if config.duration <= 0.0 {
				break;
			}
		}
	}
}

/// Rings for every node above the size threshold, each on its own clock.
#[derive(Clone, Debug)]
pub struct PulseSet {
	rings: Vec<PulseRing>,
	config: PulseConfig,
	rng: SmallRng,
}

impl PulseSet {
	pub fn new(nodes: &[KnowledgeNode], config: PulseConfig, seed: u64) -> Self {
		let rings = nodes
			.iter()
			.enumerate()
			.filter(|(_, node)| node.size > config.size_threshold)
			.map(|(i, node)| PulseRing {
				node: i,
				base_radius: node.radius(),
				stage: Stage::Expanding { elapsed: 0.0 },
			})
			.collect();
		Self {
			rings,
			config,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	pub fn config(&self) -> &PulseConfig {
		&self.config
	}

	pub fn rings(&self) -> &[PulseRing] {
		&self.rings
	}

	/// Advance every ring by `dt` seconds.
	pub fn advance(&mut self, dt: f64) {
		if dt.is_nan() || dt <= 0.0 {
			return;
		}
		for ring in &mut self.rings {
			ring.advance(dt, &self.config, &mut self.rng);
		}
	}
}
