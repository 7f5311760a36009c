//! Force-directed layout engine for the knowledge graph.
//!
//! Nothing here touches the DOM; the canvas component drives it one frame
//! at a time through [`TickScheduler`].

pub mod drag;
mod forces;
pub mod model;
pub mod pulse;
pub mod scheduler;
pub mod simulation;
pub mod viewport;

pub use drag::DragController;
pub use model::{Category, GraphData, GraphError, KnowledgeLink, KnowledgeNode, flatten_links};
pub use pulse::{PulseConfig, PulseRing, PulseSet};
pub use scheduler::{CancelToken, SchedulerState, TickScheduler};
pub use simulation::{Phase, SimLink, SimNode, Simulation, SimulationConfig};
pub use viewport::Viewport;
