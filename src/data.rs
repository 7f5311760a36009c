//! Static sample data for the OGI view.

use crate::graph::{Category, KnowledgeNode};
use crate::metrics::{Metric, Trend};

/// The organisational knowledge nodes, with their adjacency lists.
pub fn knowledge_nodes() -> Vec<KnowledgeNode> {
	vec![
		KnowledgeNode::new("n1", "Maternity Leave", Category::Policy, 25.0, &["n2", "n8", "n12"]),
		KnowledgeNode::new("n2", "Leave Policy", Category::Policy, 30.0, &["n1", "n3", "n6"]),
		KnowledgeNode::new("n3", "Remote Work", Category::Policy, 35.0, &["n2", "n5", "n7", "n11"]),
		KnowledgeNode::new("n4", "Performance Reviews", Category::Process, 40.0, &["n5", "n9", "n10"]),
		KnowledgeNode::new("n5", "Employee Satisfaction", Category::Metric, 45.0, &["n3", "n4", "n7", "n13"]),
		KnowledgeNode::new("n6", "Compensation", Category::Policy, 30.0, &["n2", "n10", "n14"]),
		KnowledgeNode::new("n7", "Work-Life Balance", Category::Concept, 35.0, &["n3", "n5", "n15"]),
		KnowledgeNode::new("n8", "Benefits", Category::Policy, 25.0, &["n1", "n6", "n14"]),
		KnowledgeNode::new("n9", "Career Development", Category::Process, 30.0, &["n4", "n10", "n15"]),
		KnowledgeNode::new("n10", "Promotions", Category::Process, 25.0, &["n4", "n6", "n9"]),
		KnowledgeNode::new("n11", "Office Policy", Category::Policy, 20.0, &["n3", "n13"]),
		KnowledgeNode::new("n12", "Paternity Leave", Category::Policy, 15.0, &["n1", "n2"]),
		KnowledgeNode::new("n13", "Office Environment", Category::Concept, 20.0, &["n5", "n11"]),
		KnowledgeNode::new("n14", "Salary Structure", Category::Policy, 25.0, &["n6", "n8"]),
		KnowledgeNode::new("n15", "Learning & Development", Category::Process, 30.0, &["n7", "n9"]),
	]
}

pub fn hr_metrics() -> Vec<Metric> {
	vec![
		Metric::new("Employee Satisfaction", 4.2, Trend::Up, 0.3, Some("/5")),
		Metric::new("Turnover Rate", 12.0, Trend::Down, 2.0, Some("%")),
		Metric::new("Time to Hire", 21.0, Trend::Down, 3.0, Some("days")),
		Metric::new("Offer Acceptance", 82.0, Trend::Up, 5.0, Some("%")),
		Metric::new("Learning Engagement", 67.0, Trend::Up, 8.0, Some("%")),
		Metric::new("Performance Score", 3.8, Trend::Up, 0.2, Some("/5")),
	]
}
