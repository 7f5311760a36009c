use leptos::prelude::*;
use ogi_knowledge_graph::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
