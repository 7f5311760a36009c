use leptos::prelude::*;

use crate::metrics::Metric;

/// One HR figure with its trend against the previous period.
#[component]
pub fn MetricsCard(metric: Metric) -> impl IntoView {
	let trend_class = format!("metrics-card-trend {}", metric.tone().css_class());

	view! {
		<div class="metrics-card">
			<div class="metrics-card-header">
				<h3 class="metrics-card-label">{metric.label.clone()}</h3>
				<span class=trend_class>
					{metric.trend_arrow()}
					" "
					{metric.display_change()}
				</span>
			</div>
			<p class="metrics-card-value">{metric.display_value()}</p>
		</div>
	}
}
