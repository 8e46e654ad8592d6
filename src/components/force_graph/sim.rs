//! Force layout for the collaboration graph.
//!
//! A small velocity integrator with the four forces the visualization
//! needs: link springs, many-body repulsion, pairwise collision and
//! mean-position centering. The simulation cools along an `alpha`
//! schedule and stops ticking once `alpha` drops below `alpha_min`;
//! dragging and slider changes raise the energy again.

use std::f64::consts::PI;

/// Distance from the layout center at which the first node is seeded.
const INITIAL_RADIUS: f64 = 10.0;

/// Collision footprint used by the overlap force.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollideRadius {
	/// Every node collides at its own render radius plus a margin.
	PerNode { margin: f64 },
	/// One shared radius for all nodes (slider override).
	Uniform(f64),
}

/// Live-tunable force configuration.
///
/// Values are applied as-is on the next tick. Nothing range-checks them;
/// a nonsensical value produces a degenerate layout, not an error.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
	/// Many-body strength. Negative repels, positive attracts.
	pub repulsion_strength: f64,
	pub collide: CollideRadius,
	/// Resting length of a collaboration link.
	pub link_distance: f64,
	/// Spring stiffness of a collaboration link.
	pub link_strength: f64,
	/// Point the mean node position is held at.
	pub center: (f64, f64),
}

impl Default for SimParams {
	fn default() -> Self {
		Self {
			repulsion_strength: -100.0,
			collide: CollideRadius::PerNode { margin: 5.0 },
			link_distance: 30.0,
			link_strength: 1.0,
			center: (400.0, 300.0),
		}
	}
}

/// A point mass in the layout.
#[derive(Clone, Debug)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned position; overrides integration while set.
	pub fx: Option<f64>,
	/// See `fx`.
	pub fy: Option<f64>,
	/// Render radius, reused by the per-node collision footprint.
	pub radius: f64,
}

/// Iterative force simulation over the author nodes.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<(usize, usize)>,
	params: SimParams,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	/// Velocity fraction kept per tick.
	velocity_decay: f64,
}

impl Simulation {
	/// Seed nodes on a phyllotaxis spiral around the center and attach
	/// the given index pairs as springs. Pairs must index into `radii`.
	pub fn new(radii: &[f64], links: Vec<(usize, usize)>, params: SimParams) -> Self {
		let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
		let (cx, cy) = params.center;
		let nodes = radii
			.iter()
			.enumerate()
			.map(|(i, &radius)| {
				let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let a = i as f64 * golden_angle;
				SimNode {
					x: cx + r * a.cos(),
					y: cy + r * a.sin(),
					vx: 0.0,
					vy: 0.0,
					fx: None,
					fy: None,
					radius,
				}
			})
			.collect();

		Self {
			nodes,
			links,
			params,
			alpha: 1.0,
			alpha_min: 0.001,
			// reaches alpha_min in roughly 300 ticks
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			alpha_target: 0.0,
			velocity_decay: 0.6,
		}
	}

	/// Advance the layout one step. Does nothing once the simulation has
	/// cooled below `alpha_min` with no outstanding target.
	pub fn tick(&mut self) {
		if self.is_settled() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_repulsion();
		self.apply_collision();
		self.apply_centering();

		for node in &mut self.nodes {
			if let Some(fx) = node.fx {
				node.x = fx;
				node.vx = 0.0;
			} else {
				node.vx *= self.velocity_decay;
				node.x += node.vx;
			}
			if let Some(fy) = node.fy {
				node.y = fy;
				node.vy = 0.0;
			} else {
				node.vy *= self.velocity_decay;
				node.y += node.vy;
			}
		}
	}

	/// True once the layout has cooled and stopped advancing.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.alpha_min && self.alpha_target < self.alpha_min
	}

	/// Reset the temperature so the layout visibly readjusts.
	pub fn reheat(&mut self) {
		self.alpha = 1.0;
	}

	/// Hold alpha at `target` instead of letting it decay to zero. A
	/// target above `alpha_min` keeps a settled layout moving.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Pin a node; its position tracks the pin until [`Self::unpin`].
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		let node = &mut self.nodes[idx];
		node.x = x;
		node.y = y;
		node.fx = Some(x);
		node.fy = Some(y);
		node.vx = 0.0;
		node.vy = 0.0;
	}

	/// Release a pinned node back to the simulation. Its position keeps
	/// the pinned value until the next tick moves it.
	pub fn unpin(&mut self, idx: usize) {
		let node = &mut self.nodes[idx];
		node.fx = None;
		node.fy = None;
	}

	pub fn position(&self, idx: usize) -> (f64, f64) {
		(self.nodes[idx].x, self.nodes[idx].y)
	}

	pub fn params(&self) -> &SimParams {
		&self.params
	}

	pub fn params_mut(&mut self) -> &mut SimParams {
		&mut self.params
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	fn apply_links(&mut self) {
		let k = self.params.link_strength * self.alpha;
		for &(source, target) in &self.links {
			if source == target {
				continue;
			}
			let (sx, sy) = (
				self.nodes[source].x + self.nodes[source].vx,
				self.nodes[source].y + self.nodes[source].vy,
			);
			let (tx, ty) = (
				self.nodes[target].x + self.nodes[target].vx,
				self.nodes[target].y + self.nodes[target].vy,
			);
			let (dx, dy) = (tx - sx, ty - sy);
			let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
			let pull = (dist - self.params.link_distance) / dist * k;
			let (px, py) = (dx * pull * 0.5, dy * pull * 0.5);
			self.nodes[target].vx -= px;
			self.nodes[target].vy -= py;
			self.nodes[source].vx += px;
			self.nodes[source].vy += py;
		}
	}

	fn apply_repulsion(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = self.nodes[j].x - self.nodes[i].x;
				let dy = self.nodes[j].y - self.nodes[i].y;
				let d2 = (dx * dx + dy * dy).max(1.0);
				let w = self.params.repulsion_strength * self.alpha / d2;
				self.nodes[i].vx += dx * w;
				self.nodes[i].vy += dy * w;
				self.nodes[j].vx -= dx * w;
				self.nodes[j].vy -= dy * w;
			}
		}
	}

	fn apply_collision(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let min_dist = self.collide_radius(i) + self.collide_radius(j);
				let dx = self.nodes[j].x - self.nodes[i].x;
				let dy = self.nodes[j].y - self.nodes[i].y;
				let dist = (dx * dx + dy * dy).sqrt();
				// NaN radii from unchecked slider input fail the
				// comparison and leave the pair untouched.
				if !(dist < min_dist) {
					continue;
				}
				let dist = dist.max(1e-6);
				let push = (min_dist - dist) / dist * 0.5;
				self.nodes[i].vx -= dx * push;
				self.nodes[i].vy -= dy * push;
				self.nodes[j].vx += dx * push;
				self.nodes[j].vy += dy * push;
			}
		}
	}

	fn collide_radius(&self, idx: usize) -> f64 {
		match self.params.collide {
			CollideRadius::PerNode { margin } => self.nodes[idx].radius + margin,
			CollideRadius::Uniform(radius) => radius,
		}
	}

	/// Translate every node so the mean position lands on the configured
	/// center. Pinned nodes win at integration time.
	fn apply_centering(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (cx, cy) = self.params.center;
		let sx = self.nodes.iter().map(|node| node.x).sum::<f64>() / n - cx;
		let sy = self.nodes.iter().map(|node| node.y).sum::<f64>() / n - cy;
		for node in &mut self.nodes {
			node.x -= sx;
			node.y -= sy;
		}
	}
}
