//! Ranks affiliations by author count and assigns each of the ten
//! largest a stable category color.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::types::AuthorNode;

/// Category colors for the ten most frequent affiliations, in rank order.
pub const PALETTE: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Shared color for every affiliation outside the top ten.
pub const FALLBACK_COLOR: &str = "#A9A9A9";

/// Affiliation -> color assignment, computed once per data set.
///
/// Authors without an affiliation form their own group and can rank like
/// any other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AffiliationColors {
	ranked: Vec<Option<String>>,
}

impl AffiliationColors {
	/// Group the nodes by affiliation, sort groups by descending member
	/// count (first-seen order breaks ties) and keep the ten largest.
	pub fn rank(nodes: &[AuthorNode]) -> Self {
		let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
		let mut first_seen: Vec<Option<&str>> = Vec::new();
		for node in nodes {
			let key = node.affiliation.as_deref();
			match counts.entry(key) {
				Entry::Vacant(slot) => {
					slot.insert(1);
					first_seen.push(key);
				}
				Entry::Occupied(mut slot) => *slot.get_mut() += 1,
			}
		}

		// Stable sort keeps first-seen order among equal counts.
		let mut groups: Vec<(Option<&str>, usize)> = first_seen
			.into_iter()
			.map(|key| (key, counts[&key]))
			.collect();
		groups.sort_by(|a, b| b.1.cmp(&a.1));

		Self {
			ranked: groups
				.into_iter()
				.take(PALETTE.len())
				.map(|(key, _)| key.map(str::to_owned))
				.collect(),
		}
	}

	/// Palette color for a ranked affiliation, fallback gray otherwise.
	pub fn color_of(&self, affiliation: Option<&str>) -> &'static str {
		self.ranked
			.iter()
			.position(|ranked| ranked.as_deref() == affiliation)
			.map(|rank| PALETTE[rank])
			.unwrap_or(FALLBACK_COLOR)
	}

	/// Ranked affiliation keys, most members first.
	pub fn top(&self) -> &[Option<String>] {
		&self.ranked
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn node(id: &str, affiliation: Option<&str>) -> AuthorNode {
		AuthorNode {
			id: id.into(),
			affiliation: affiliation.map(str::to_owned),
			degree: None,
		}
	}

	#[test]
	fn three_affiliations_all_rank_with_distinct_colors() {
		let mut nodes = Vec::new();
		for i in 0..8 {
			nodes.push(node(&format!("a{i}"), Some("United States")));
		}
		for i in 0..5 {
			nodes.push(node(&format!("b{i}"), Some("China")));
		}
		for i in 0..2 {
			nodes.push(node(&format!("c{i}"), Some("Germany")));
		}

		let colors = AffiliationColors::rank(&nodes);
		assert_eq!(
			colors.top().to_vec(),
			vec![
				Some("United States".to_owned()),
				Some("China".to_owned()),
				Some("Germany".to_owned()),
			]
		);
		assert_eq!(colors.color_of(Some("United States")), PALETTE[0]);
		assert_eq!(colors.color_of(Some("China")), PALETTE[1]);
		assert_eq!(colors.color_of(Some("Germany")), PALETTE[2]);

		// With only three groups the fallback is never used.
		for n in &nodes {
			assert_ne!(colors.color_of(n.affiliation.as_deref()), FALLBACK_COLOR);
		}
	}

	#[test]
	fn ranking_caps_at_the_ten_largest() {
		let mut nodes = Vec::new();
		for i in 0..12 {
			let country = format!("country-{i}");
			for j in 0..(12 - i) {
				nodes.push(node(&format!("n{i}-{j}"), Some(country.as_str())));
			}
		}

		let colors = AffiliationColors::rank(&nodes);
		assert_eq!(colors.top().len(), 10);
		assert_eq!(colors.color_of(Some("country-0")), PALETTE[0]);
		assert_eq!(colors.color_of(Some("country-9")), PALETTE[9]);
		assert_eq!(colors.color_of(Some("country-10")), FALLBACK_COLOR);
		assert_eq!(colors.color_of(Some("country-11")), FALLBACK_COLOR);

		let distinct: HashSet<&str> = (0..10)
			.map(|i| {
				let country = format!("country-{i}");
				colors.color_of(Some(country.as_str()))
			})
			.collect();
		assert_eq!(distinct.len(), 10);
	}

	#[test]
	fn equal_counts_keep_first_seen_order() {
		let nodes = vec![
			node("a", Some("X")),
			node("b", Some("Y")),
			node("c", Some("Z")),
			node("d", Some("Y")),
		];

		let colors = AffiliationColors::rank(&nodes);
		assert_eq!(
			colors.top().to_vec(),
			vec![
				Some("Y".to_owned()),
				Some("X".to_owned()),
				Some("Z".to_owned()),
			]
		);
	}

	#[test]
	fn ranking_is_idempotent() {
		let nodes = vec![
			node("a", Some("X")),
			node("b", Some("X")),
			node("c", Some("Y")),
			node("d", None),
		];

		let first = AffiliationColors::rank(&nodes);
		let second = AffiliationColors::rank(&nodes);
		assert_eq!(first, second);
		assert_eq!(first.color_of(Some("Y")), second.color_of(Some("Y")));
	}

	#[test]
	fn empty_input_maps_everything_to_fallback() {
		let colors = AffiliationColors::rank(&[]);
		assert!(colors.top().is_empty());
		assert_eq!(colors.color_of(Some("anything")), FALLBACK_COLOR);
		assert_eq!(colors.color_of(None), FALLBACK_COLOR);
	}

	#[test]
	fn missing_affiliation_is_its_own_group() {
		let nodes = vec![
			node("a", None),
			node("b", None),
			node("c", None),
			node("d", Some("X")),
		];

		let colors = AffiliationColors::rank(&nodes);
		assert_eq!(colors.top()[0], None);
		assert_eq!(colors.color_of(None), PALETTE[0]);
		assert_eq!(colors.color_of(Some("X")), PALETTE[1]);
	}
}
