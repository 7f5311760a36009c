//! Knowledge graph data: nodes with adjacency lists and the flat link list
//! derived from them.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use thiserror::Error;

/// Kind of organisational knowledge a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	/// A written policy (leave, remote work, ...).
	Policy,
	/// A recurring HR process.
	Process,
	/// Something that is measured.
	Metric,
	/// An abstract idea tying other nodes together.
	Concept,
}

impl Category {
	/// All categories, in legend order.
	pub const ALL: [Category; 4] = [
		Category::Policy,
		Category::Process,
		Category::Metric,
		Category::Concept,
	];

	/// Lowercase name used in labels and legends.
	pub fn as_str(self) -> &'static str {
		match self {
			Category::Policy => "policy",
			Category::Process => "process",
			Category::Metric => "metric",
			Category::Concept => "concept",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A node as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct KnowledgeNode {
	pub id: String,
	pub label: String,
	pub category: Category,
	/// Visual size; the drawn disc has radius `size / 2`.
	pub size: f64,
	/// Neighbour ids, in the order they were declared.
	pub connections: Vec<String>,
}

impl KnowledgeNode {
	/// Build a node from string slices.
	pub fn new(id: &str, label: &str, category: Category, size: f64, connections: &[&str]) -> Self {
		Self {
			id: id.to_string(),
			label: label.to_string(),
			category,
			size,
			connections: connections.iter().map(|c| c.to_string()).collect(),
		}
	}

	/// Radius of the drawn disc.
	pub fn radius(&self) -> f64 {
		self.size / 2.0
	}
}

/// A directed edge between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct KnowledgeLink {
	pub source: String,
	pub target: String,
	/// Drives stroke opacity and width, expected in `[0, 1]`.
	pub strength: f64,
}

/// Problems found in caller-supplied graph data.
///
/// None of these are fatal: the layout skips what it cannot place.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
	#[error("link {from} -> {to} references a missing node")]
	DanglingLink { from: String, to: String },
	#[error("node id {0} appears more than once")]
	DuplicateNode(String),
	#[error("node {id} has non-positive size {size}")]
	NonPositiveSize { id: String, size: f64 },
}

/// Flatten every node's `connections` into one link per entry.
///
/// Mirrored pairs (both endpoints listing each other) produce two links.
/// Strengths are drawn uniformly from `[0.5, 1.0)`.
pub fn flatten_links<R: Rng>(nodes: &[KnowledgeNode], rng: &mut R) -> Vec<KnowledgeLink> {
	nodes
		.iter()
		.flat_map(|node| node.connections.iter().map(move |target| (node, target)))
		.map(|(node, target)| KnowledgeLink {
			source: node.id.clone(),
			target: target.clone(),
			strength: rng.gen_range(0.5..1.0),
		})
		.collect()
}

/// Nodes and links for one graph view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<KnowledgeNode>,
	pub links: Vec<KnowledgeLink>,
}

impl GraphData {
	/// Build the graph from adjacency lists alone.
	pub fn from_nodes<R: Rng>(nodes: Vec<KnowledgeNode>, rng: &mut R) -> Self {
		let links = flatten_links(&nodes, rng);
		Self { nodes, links }
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Position of the node with `id`, if any.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Collect every data-quality problem. An empty result means the graph
	/// is fully drawable.
	pub fn validate(&self) -> Vec<GraphError> {
		let mut errors = Vec::new();
		let mut seen = HashSet::new();

		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				errors.push(GraphError::DuplicateNode(node.id.clone()));
			}
			if node.size <= 0.0 || node.size.is_nan() {
				errors.push(GraphError::NonPositiveSize {
					id: node.id.clone(),
					size: node.size,
				});
			}
		}

		for link in &self.links {
			if !seen.contains(link.source.as_str()) || !seen.contains(link.target.as_str()) {
				errors.push(GraphError::DanglingLink {
					from: link.source.clone(),
					to: link.target.clone(),
				});
			}
		}

		errors
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn triangle() -> Vec<KnowledgeNode> {
		vec![
			KnowledgeNode::new("a", "A", Category::Policy, 20.0, &["b", "c"]),
			KnowledgeNode::new("b", "B", Category::Process, 30.0, &["a"]),
			KnowledgeNode::new("c", "C", Category::Metric, 40.0, &[]),
		]
	}

	#[test]
	fn flattening_keeps_one_link_per_connection_entry() {
		let mut rng = SmallRng::seed_from_u64(7);
		let links = flatten_links(&triangle(), &mut rng);

		let pairs: Vec<_> = links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect();
		assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "a")]);
	}

	#[test]
	fn strengths_fall_in_half_open_upper_range() {
		let mut rng = SmallRng::seed_from_u64(42);
		let nodes: Vec<_> = (0..20)
			.map(|i| KnowledgeNode::new(&i.to_string(), "", Category::Concept, 10.0, &["0", "1"]))
			.collect();

		for link in flatten_links(&nodes, &mut rng) {
			assert!((0.5..1.0).contains(&link.strength), "{}", link.strength);
		}
	}

	#[test]
	fn validate_reports_dangling_duplicate_and_size() {
		let mut nodes = triangle();
		nodes.push(KnowledgeNode::new("a", "dup", Category::Concept, 0.0, &["ghost"]));
		let data = GraphData::from_nodes(nodes, &mut SmallRng::seed_from_u64(1));

		let errors = data.validate();
		assert!(errors.contains(&GraphError::DuplicateNode("a".into())));
		assert!(errors.contains(&GraphError::NonPositiveSize {
			id: "a".into(),
			size: 0.0
		}));
		assert!(errors.contains(&GraphError::DanglingLink {
			from: "a".into(),
			to: "ghost".into()
		}));
		assert_eq!(errors.len(), 3);
	}

	#[test]
	fn clean_graph_validates() {
		let data = GraphData::from_nodes(triangle(), &mut SmallRng::seed_from_u64(3));
		assert!(data.validate().is_empty());
		assert_eq!(data.index_of("c"), Some(2));
		assert_eq!(data.index_of("z"), None);
	}
}
