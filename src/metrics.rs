//! HR metric figures shown beside the knowledge graph.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
	Up,
	Down,
	Stable,
}

/// Whether a trend is good news, bad news, or neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
	Favorable,
	Unfavorable,
	Neutral,
}

impl Tone {
	pub fn css_class(self) -> &'static str {
		match self {
			Tone::Favorable => "trend-favorable",
			Tone::Unfavorable => "trend-unfavorable",
			Tone::Neutral => "trend-neutral",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
	pub label: String,
	pub value: f64,
	pub trend: Trend,
	pub change: f64,
	pub unit: Option<String>,
}

impl Metric {
	pub fn new(label: &str, value: f64, trend: Trend, change: f64, unit: Option<&str>) -> Self {
		Self {
			label: label.to_string(),
			value,
			trend,
			change,
			unit: unit.map(str::to_string),
		}
	}

	/// Unit suffix; metrics without one are percentages.
	pub fn unit(&self) -> &str {
		self.unit.as_deref().unwrap_or("%")
	}

	/// Metrics where falling numbers are good news.
	fn lower_is_better(&self) -> bool {
		self.label.contains("Turnover") || self.label.contains("Time")
	}

	pub fn tone(&self) -> Tone {
		match self.trend {
			Trend::Up => Tone::Favorable,
			Trend::Down if self.lower_is_better() => Tone::Favorable,
			Trend::Down => Tone::Unfavorable,
			Trend::Stable => Tone::Neutral,
		}
	}

	pub fn trend_arrow(&self) -> &'static str {
		match self.trend {
			Trend::Up => "↑",
			Trend::Down => "↓",
			Trend::Stable => "→",
		}
	}

	pub fn display_value(&self) -> String {
		format!("{}{}", self.value, self.unit())
	}

	pub fn display_change(&self) -> String {
		format!("{}{}", self.change, self.unit())
	}
}
