use std::collections::HashMap;

use super::classify::AffiliationColors;
use super::sim::{CollideRadius, SimParams, Simulation};
use super::types::NetworkData;

/// Pointer slop for grabbing small nodes.
const HIT_RADIUS: f64 = 12.0;

/// Alpha held while a node is being dragged.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Opacity of nodes and links unrelated to the hovered node.
const DIM_ALPHA: f64 = 0.2;

/// Display data for one author node.
#[derive(Clone, Debug)]
pub struct NodeMeta {
	pub id: String,
	pub affiliation: Option<String>,
	pub color: &'static str,
	pub radius: f64,
}

/// Drag interaction machine.
///
/// `grab_dx`/`grab_dy` is the node-center-to-pointer offset captured on
/// drag-start, so a node grabbed by its edge does not jump under the
/// cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
	/// Position governed by the simulation.
	Free,
	/// Node pinned to the pointer.
	Dragging {
		node: usize,
		grab_dx: f64,
		grab_dy: f64,
	},
	/// Released while reheated; waiting for the layout to come to rest.
	Settling,
}

/// Everything the canvas needs per frame: the simulation, per-node
/// display metadata, and the drag/hover interaction state.
pub struct ForceGraphState {
	pub sim: Simulation,
	meta: Vec<NodeMeta>,
	links: Vec<(usize, usize)>,
	pub drag: DragPhase,
	hover: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	/// Build display metadata, resolve links and seed the simulation.
	/// Links naming unknown authors are dropped.
	pub fn new(data: &NetworkData, width: f64, height: f64) -> Self {
		let colors = AffiliationColors::rank(&data.nodes);
		let meta: Vec<NodeMeta> = data
			.nodes
			.iter()
			.map(|node| NodeMeta {
				id: node.id.clone(),
				affiliation: node.affiliation.clone(),
				color: colors.color_of(node.affiliation.as_deref()),
				radius: node.radius(),
			})
			.collect();

		let id_to_idx: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(idx, node)| (node.id.as_str(), idx))
			.collect();
		let links: Vec<(usize, usize)> = data
			.links
			.iter()
			.filter_map(|link| {
				Some((
					*id_to_idx.get(link.source.as_str())?,
					*id_to_idx.get(link.target.as_str())?,
				))
			})
			.collect();

		let radii: Vec<f64> = meta.iter().map(|m| m.radius).collect();
		let params = SimParams {
			center: (width / 2.0, height / 2.0),
			..SimParams::default()
		};
		let sim = Simulation::new(&radii, links.clone(), params);

		Self {
			sim,
			meta,
			links,
			drag: DragPhase::Free,
			hover: None,
			width,
			height,
		}
	}

	/// Advance the layout one frame and collapse the drag machine back
	/// to `Free` once the released layout has come to rest.
	pub fn tick(&mut self) {
		self.sim.tick();
		if self.drag == DragPhase::Settling && self.sim.is_settled() {
			self.drag = DragPhase::Free;
		}
	}

	/// Topmost node under the pointer (later nodes draw on top).
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let mut found = None;
		for (idx, meta) in self.meta.iter().enumerate() {
			let (nx, ny) = self.sim.position(idx);
			let (dx, dy) = (nx - x, ny - y);
			if (dx * dx + dy * dy).sqrt() <= meta.radius.max(HIT_RADIUS) {
				found = Some(idx);
			}
		}
		found
	}

	/// Begin dragging the node under the pointer, if any. Returns
	/// whether a drag actually started.
	pub fn drag_start(&mut self, x: f64, y: f64) -> bool {
		let Some(node) = self.node_at_position(x, y) else {
			return false;
		};
		let (nx, ny) = self.sim.position(node);
		self.sim.set_alpha_target(DRAG_ALPHA_TARGET);
		self.sim.pin(node, nx, ny);
		self.drag = DragPhase::Dragging {
			node,
			grab_dx: nx - x,
			grab_dy: ny - y,
		};
		true
	}

	/// Track the pointer while dragging; no-op in other phases.
	pub fn drag_move(&mut self, x: f64, y: f64) {
		if let DragPhase::Dragging {
			node,
			grab_dx,
			grab_dy,
		} = self.drag
		{
			self.sim.pin(node, x + grab_dx, y + grab_dy);
		}
	}

	/// Release the dragged node and let the layout settle again.
	pub fn drag_end(&mut self) {
		if let DragPhase::Dragging { node, .. } = self.drag {
			self.sim.unpin(node);
			self.sim.set_alpha_target(0.0);
			self.drag = DragPhase::Settling;
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hover = node;
	}

	pub fn hovered_meta(&self) -> Option<&NodeMeta> {
		self.hover.map(|idx| &self.meta[idx])
	}

	/// Full opacity for the hovered node and its affiliation peers,
	/// dimmed otherwise.
	pub fn node_alpha(&self, idx: usize) -> f64 {
		match self.hover {
			Some(hovered) if self.meta[idx].affiliation == self.meta[hovered].affiliation => 1.0,
			Some(_) => DIM_ALPHA,
			None => 1.0,
		}
	}

	/// Full opacity for links incident to the hovered node, dimmed
	/// otherwise.
	pub fn link_alpha(&self, source: usize, target: usize) -> f64 {
		match self.hover {
			Some(hovered) if source == hovered || target == hovered => 1.0,
			Some(_) => DIM_ALPHA,
			None => 1.0,
		}
	}

	pub fn meta(&self) -> &[NodeMeta] {
		&self.meta
	}

	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	/// Slider wiring: swap in the new many-body strength and kick the
	/// layout so the change is visible.
	pub fn set_repulsion_strength(&mut self, value: f64) {
		self.sim.params_mut().repulsion_strength = value;
		self.sim.reheat();
	}

	/// Slider wiring: replace the per-node collision footprint with a
	/// uniform radius.
	pub fn set_collide_radius(&mut self, value: f64) {
		self.sim.params_mut().collide = CollideRadius::Uniform(value);
		self.sim.reheat();
	}

	/// Slider wiring: swap in the new link stiffness.
	pub fn set_link_strength(&mut self, value: f64) {
		self.sim.params_mut().link_strength = value;
		self.sim.reheat();
	}
}

#[cfg(test)]
mod tests {
	use super::super::classify::{FALLBACK_COLOR, PALETTE};
	use super::super::types::{AuthorNode, CollabLink};
	use super::*;

	fn author(id: &str, affiliation: Option<&str>, degree: f64) -> AuthorNode {
		AuthorNode {
			id: id.into(),
			affiliation: affiliation.map(str::to_owned),
			degree: Some(degree),
		}
	}

	fn link(source: &str, target: &str) -> CollabLink {
		CollabLink {
			source: source.into(),
			target: target.into(),
		}
	}

	fn sample_network() -> NetworkData {
		NetworkData {
			nodes: vec![
				author("alice", Some("United States"), 2.0),
				author("bob", Some("United States"), 1.0),
				author("chen", Some("China"), 1.0),
			],
			links: vec![link("alice", "bob"), link("alice", "chen")],
		}
	}

	#[test]
	fn links_to_unknown_authors_are_dropped() {
		let mut data = sample_network();
		data.links.push(link("alice", "nobody"));
		data.links.push(link("ghost", "bob"));

		let state = ForceGraphState::new(&data, 800.0, 600.0);
		assert_eq!(state.links().to_vec(), vec![(0, 1), (0, 2)]);
	}

	#[test]
	fn colors_follow_the_affiliation_ranking() {
		let state = ForceGraphState::new(&sample_network(), 800.0, 600.0);
		assert_eq!(state.meta()[0].color, PALETTE[0]);
		assert_eq!(state.meta()[1].color, PALETTE[0]);
		assert_eq!(state.meta()[2].color, PALETTE[1]);
		for meta in state.meta() {
			assert_ne!(meta.color, FALLBACK_COLOR);
		}
	}

	#[test]
	fn drag_pins_the_node_to_the_pointer() {
		let mut state = ForceGraphState::new(&sample_network(), 800.0, 600.0);
		// Park the node somewhere unambiguous before grabbing it.
		state.sim.pin(0, 50.0, 50.0);
		state.sim.unpin(0);

		assert!(state.drag_start(50.0, 50.0));
		assert!(matches!(state.drag, DragPhase::Dragging { node: 0, .. }));

		state.drag_move(100.0, 200.0);
		for _ in 0..20 {
			state.tick();
		}
		assert_eq!(state.sim.position(0), (100.0, 200.0));

		state.drag_end();
		assert_eq!(state.drag, DragPhase::Settling);
		assert_eq!(state.sim.position(0), (100.0, 200.0));

		// Released: the next ticks are free to move it again.
		for _ in 0..60 {
			state.tick();
		}
		assert_ne!(state.sim.position(0), (100.0, 200.0));

		while !state.sim.is_settled() {
			state.tick();
		}
		assert_eq!(state.drag, DragPhase::Free);
	}

	#[test]
	fn grab_offset_is_preserved_while_dragging() {
		let mut state = ForceGraphState::new(&sample_network(), 800.0, 600.0);
		state.sim.pin(0, 50.0, 50.0);
		state.sim.unpin(0);

		assert!(state.drag_start(53.0, 50.0));
		state.drag_move(100.0, 200.0);
		assert_eq!(state.sim.position(0), (97.0, 200.0));
	}

	#[test]
	fn drag_start_on_empty_space_is_ignored() {
		let mut state = ForceGraphState::new(&sample_network(), 800.0, 600.0);
		assert!(!state.drag_start(10.0, 590.0));
		assert_eq!(state.drag, DragPhase::Free);
	}

	#[test]
	fn hover_dims_unrelated_nodes_and_links() {
		let mut state = ForceGraphState::new(&sample_network(), 800.0, 600.0);
		state.set_hover(Some(0));
		assert_eq!(state.node_alpha(0), 1.0);
		assert_eq!(state.node_alpha(1), 1.0);
		assert_eq!(state.node_alpha(2), DIM_ALPHA);
		assert_eq!(state.link_alpha(0, 1), 1.0);
		assert_eq!(state.link_alpha(1, 2), DIM_ALPHA);

		state.set_hover(None);
		assert_eq!(state.node_alpha(2), 1.0);
		assert_eq!(state.link_alpha(1, 2), 1.0);
	}

	#[test]
	fn slider_changes_reconfigure_and_reheat() {
		let mut state = ForceGraphState::new(&sample_network(), 800.0, 600.0);
		while !state.sim.is_settled() {
			state.tick();
		}

		state.set_repulsion_strength(-250.0);
		assert!(!state.sim.is_settled());
		assert_eq!(state.sim.params().repulsion_strength, -250.0);

		state.set_collide_radius(20.0);
		assert_eq!(state.sim.params().collide, CollideRadius::Uniform(20.0));

		state.set_link_strength(0.5);
		assert_eq!(state.sim.params().link_strength, 0.5);
	}
}
