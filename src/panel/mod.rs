//! Resizable side-panel width: drag gesture handling, viewport-derived bounds
//! and persistence of the chosen width.

pub mod affordance;
pub mod bounds;
pub mod controller;
pub mod store;
pub mod viewport;

pub use affordance::{DragAffordance, NoAffordance, TerminalAffordance};
pub use controller::ResizablePanelController;
pub use store::{FileStore, MemoryStore, WidthStore};
pub use viewport::{SharedViewport, TerminalViewport, Viewport};

pub const STORAGE_KEY: &str = "vibe-kanban-task-panel-width";
pub const MIN_WIDTH: u32 = 400;
pub const DEFAULT_WIDTH: u32 = 800;
/// Share of the viewport the panel may cover, leaving the rest for the board.
pub const MAX_WIDTH_RATIO: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub min_width: u32,
    pub default_width: u32,
    pub storage_key: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            default_width: DEFAULT_WIDTH,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}
