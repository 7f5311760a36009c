//! The four forces acting on the layout. Each function makes one pass over
//! the node records; the simulation decides order and alpha.

use glam::DVec2;

use super::simulation::{SimLink, SimNode};

/// Tiny deterministic offset used when two points coincide, so the
/// direction of a push is never undefined.
fn jiggle(a: usize, b: usize) -> DVec2 {
	let seed = (a.wrapping_mul(31) ^ b.wrapping_mul(17)) % 97;
	let angle = seed as f64 / 97.0 * std::f64::consts::TAU;
	DVec2::new(angle.cos(), angle.sin()) * 1e-6
}

/// Springs along every link, pulling endpoints toward `distance` apart.
///
/// Works on predicted positions (`position + velocity`) and writes into
/// velocities, splitting the correction by each link's degree bias.
pub(super) fn apply_links(nodes: &mut [SimNode], links: &[SimLink], distance: f64, alpha: f64) {
	for link in links {
		let (s, t) = (link.source, link.target);
		if s == t {
			continue;
		}
		let source = nodes[s].position + nodes[s].velocity;
		let target = nodes[t].position + nodes[t].velocity;
		let mut delta = target - source;
		if delta == DVec2::ZERO {
			delta = jiggle(s, t);
		}
		let length = delta.length();
		let correction = delta * ((length - distance) / length * alpha * link.stiffness);

		nodes[t].velocity -= correction * link.bias;
		nodes[s].velocity += correction * (1.0 - link.bias);
	}
}

/// Many-body repulsion; negative `strength` repels.
///
/// Quadratic in node count, which is fine for the few dozen nodes a
/// knowledge view holds.
pub(super) fn apply_charge(nodes: &mut [SimNode], strength: f64, distance_min: f64, alpha: f64) {
	let distance_min_sq = distance_min * distance_min;
	let count = nodes.len();

	for i in 0..count {
		let mut push = DVec2::ZERO;
		for j in 0..count {
			if i == j {
				continue;
			}
			let mut delta = nodes[j].position - nodes[i].position;
			if delta == DVec2::ZERO {
				delta = jiggle(i, j);
			}
			let mut length_sq = delta.length_squared();
			if length_sq < distance_min_sq {
				length_sq = (distance_min_sq * length_sq).sqrt();
			}
			push += delta * (strength * alpha / length_sq);
		}
		nodes[i].velocity += push;
	}
}

/// Translate the whole layout so its centroid moves toward `center`.
pub(super) fn apply_center(nodes: &mut [SimNode], center: DVec2, strength: f64) {
	if nodes.is_empty() {
		return;
	}
	let centroid = nodes.iter().map(|n| n.position).sum::<DVec2>() / nodes.len() as f64;
	let shift = (centroid - center) * strength;
	for node in nodes {
		node.position -= shift;
	}
}

/// Push overlapping discs apart directly on positions.
///
/// Each disc has radius `node.radius + margin`. A pinned node never moves;
/// its partner takes the whole correction. Otherwise the correction is
/// split so the smaller disc moves more.
pub(super) fn resolve_collisions(nodes: &mut [SimNode], margin: f64, iterations: usize) {
	let count = nodes.len();
	for _ in 0..iterations {
		for i in 0..count {
			for j in (i + 1)..count {
				let ri = nodes[i].radius + margin;
				let rj = nodes[j].radius + margin;
				let reach = ri + rj;

				let delta = nodes[i].position - nodes[j].position;
				let length_sq = delta.length_squared();
				if length_sq >= reach * reach {
					continue;
				}
				let (direction, length) = if length_sq == 0.0 {
					(jiggle(i, j).normalize(), 0.0)
				} else {
					let length = length_sq.sqrt();
					(delta / length, length)
				};
				let overlap = direction * (reach - length);

				let (share_i, share_j) = match (nodes[i].pin.is_some(), nodes[j].pin.is_some()) {
					(true, true) => continue,
					(true, false) => (0.0, 1.0),
					(false, true) => (1.0, 0.0),
					(false, false) => {
						let (wi, wj) = (ri * ri, rj * rj);
						(wj / (wi + wj), wi / (wi + wj))
					}
				};
				nodes[i].position += overlap * share_i;
				nodes[j].position -= overlap * share_j;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(x: f64, y: f64, radius: f64) -> SimNode {
		SimNode::new(DVec2::new(x, y), radius)
	}

	#[test]
	fn stretched_link_pulls_endpoints_together() {
		let mut nodes = vec![node(0.0, 0.0, 5.0), node(300.0, 0.0, 5.0)];
		let links = [SimLink::new(0, 1, 1.0, 1.0, 0.5)];

		apply_links(&mut nodes, &links, 100.0, 1.0);

		assert!(nodes[0].velocity.x > 0.0);
		assert!(nodes[1].velocity.x < 0.0);
	}

	#[test]
	fn compressed_link_pushes_endpoints_apart() {
		let mut nodes = vec![node(0.0, 0.0, 5.0), node(20.0, 0.0, 5.0)];
		let links = [SimLink::new(0, 1, 1.0, 1.0, 0.5)];

		apply_links(&mut nodes, &links, 100.0, 1.0);

		assert!(nodes[0].velocity.x < 0.0);
		assert!(nodes[1].velocity.x > 0.0);
	}

	#[test]
	fn negative_charge_repels() {
		let mut nodes = vec![node(0.0, 0.0, 5.0), node(10.0, 0.0, 5.0)];
		apply_charge(&mut nodes, -200.0, 1.0, 1.0);

		assert!(nodes[0].velocity.x < 0.0);
		assert!(nodes[1].velocity.x > 0.0);
		assert!((nodes[0].velocity.x + nodes[1].velocity.x).abs() < 1e-9);
	}

	#[test]
	fn coincident_nodes_still_separate() {
		let mut nodes = vec![node(5.0, 5.0, 10.0), node(5.0, 5.0, 10.0)];
		resolve_collisions(&mut nodes, 0.0, 1);

		let distance = nodes[0].position.distance(nodes[1].position);
		assert!((distance - 20.0).abs() < 1e-6, "{distance}");
	}

	#[test]
	fn center_moves_centroid_onto_target() {
		let mut nodes = vec![node(0.0, 0.0, 1.0), node(10.0, 0.0, 1.0)];
		apply_center(&mut nodes, DVec2::new(100.0, 50.0), 1.0);

		let centroid = (nodes[0].position + nodes[1].position) / 2.0;
		assert!(centroid.distance(DVec2::new(100.0, 50.0)) < 1e-9);
		assert_eq!(nodes[1].position - nodes[0].position, DVec2::new(10.0, 0.0));
	}

	#[test]
	fn pinned_node_is_not_moved_by_collision() {
		let mut nodes = vec![node(0.0, 0.0, 10.0), node(5.0, 0.0, 10.0)];
		nodes[0].pin = Some(DVec2::ZERO);

		resolve_collisions(&mut nodes, 0.0, 1);

		assert_eq!(nodes[0].position, DVec2::ZERO);
		assert!((nodes[1].position.x - 20.0).abs() < 1e-9);
	}
}
