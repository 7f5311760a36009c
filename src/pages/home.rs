use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::components::knowledge_graph::KnowledgeGraph;
use crate::components::metrics_card::MetricsCard;
use crate::components::random_seed;
use crate::data::{hr_metrics, knowledge_nodes};
use crate::graph::GraphData;
use crate::theme::Theme;

/// Organizational knowledge overview: HR metrics and the knowledge map.
#[component]
pub fn Home() -> impl IntoView {
	let graph = GraphData::from_nodes(
		knowledge_nodes(),
		&mut SmallRng::seed_from_u64(random_seed()),
	);
	let GraphData { nodes, links } = graph;
	let nodes = Signal::derive(move || nodes.clone());
	let links = Signal::derive(move || links.clone());
	let theme = RwSignal::new(Theme::Light);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="ogi-page" data-theme=move || theme.get().as_str()>
				<header class="ogi-header">
					<div>
						<h1>"Organizational General Intelligence (OGI)"</h1>
						<p class="subtitle">
							"Explore organizational knowledge, insights, and patterns"
						</p>
					</div>
					<button
						class="theme-toggle"
						on:click=move |_| theme.update(|t| *t = t.toggled())
					>
						{move || match theme.get() {
							Theme::Light => "Dark mode",
							Theme::Dark => "Light mode",
						}}
					</button>
				</header>

				<section>
					<h2>"HR Metrics"</h2>
					<div class="metrics-grid">
						{hr_metrics()
							.into_iter()
							.map(|metric| view! { <MetricsCard metric=metric /> })
							.collect_view()}
					</div>
				</section>

				<section>
					<h2>"Knowledge Map"</h2>
					<KnowledgeGraph nodes=nodes links=links theme=theme />
				</section>
			</div>
		</ErrorBoundary>
	}
}
