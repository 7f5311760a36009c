pub mod knowledge_graph;
pub mod metrics_card;

/// Seed for per-view randomness (link strengths, pulse delays).
pub(crate) fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}
