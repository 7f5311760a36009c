//! Light/dark colour constants. Layout never depends on these.

use crate::graph::Category;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

impl Theme {
	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Value for the `data-theme` attribute.
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	pub fn palette(self) -> Palette {
		match self {
			Theme::Light => Palette {
				background: "#FFFFFF",
				link_stroke: "#D1D5DB",
				label_fill: "#4B5563",
			},
			Theme::Dark => Palette {
				background: "#1F2937",
				link_stroke: "#4B5563",
				label_fill: "#D1D5DB",
			},
		}
	}
}

/// Colours for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	pub background: &'static str,
	pub link_stroke: &'static str,
	pub label_fill: &'static str,
}

impl Palette {
	/// Node fill and ring stroke. Categories share greys across themes.
	pub fn category_color(&self, category: Category) -> &'static str {
		match category {
			Category::Policy => "#404040",
			Category::Process => "#606060",
			Category::Metric => "#808080",
			Category::Concept => "#A0A0A0",
		}
	}
}
