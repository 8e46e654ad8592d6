use serde::Deserialize;

/// An author in the collaboration network.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthorNode {
	pub id: String,
	#[serde(default)]
	pub affiliation: Option<String>,
	#[serde(default)]
	pub degree: Option<f64>,
}

impl AuthorNode {
	/// Render radius, sqrt-scaled by collaboration degree.
	pub fn radius(&self) -> f64 {
		match self.degree {
			Some(degree) if degree > 0.0 => degree.sqrt() * 3.0,
			_ => 3.0,
		}
	}
}

/// A co-authorship between two authors. Extra fields in the input (e.g.
/// the publication id) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct CollabLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NetworkData {
	pub nodes: Vec<AuthorNode>,
	pub links: Vec<CollabLink>,
}
