use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::layout::{PanelLayout, body_area};
use crate::panel::{
    DragAffordance, FileStore, ResizablePanelController, TerminalAffordance, TerminalViewport,
    Viewport, WidthStore,
};
use crate::settings::Settings;

/// Input already reduced to what the panel host reacts to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Message {
    PointerDown { column: u16, row: u16 },
    PointerMove { column: u16, row: u16 },
    PointerUp,
    Resize(u16, u16),
    ResetWidth,
    Cancel,
    Quit,
}

/// Terminal host around a single side-panel controller.
pub struct App<S = FileStore, V = TerminalViewport, A = TerminalAffordance>
where
    A: DragAffordance,
{
    pub panel: ResizablePanelController<S, V, A>,
    pub side_by_side_min_width: u16,
    pub columns: u16,
    pub rows: u16,
    should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings, store_path: Option<PathBuf>) -> Result<Self> {
        let store_path = match store_path {
            Some(path) => path,
            None => FileStore::default_path().context("unable to determine panel state path")?,
        };
        let (columns, rows) =
            crossterm::terminal::size().context("failed to query terminal size")?;
        info!(path = %store_path.display(), columns, rows, "starting panel host");

        Ok(Self::with_parts(
            settings,
            FileStore::open(store_path),
            TerminalViewport,
            TerminalAffordance,
            (columns, rows),
        ))
    }
}

impl<S, V, A> App<S, V, A>
where
    S: WidthStore,
    V: Viewport,
    A: DragAffordance,
{
    pub fn with_parts(
        settings: &Settings,
        store: S,
        viewport: V,
        affordance: A,
        (columns, rows): (u16, u16),
    ) -> Self {
        Self {
            panel: ResizablePanelController::with_affordance(
                settings.panel_config(),
                store,
                viewport,
                affordance,
            ),
            side_by_side_min_width: settings.side_by_side_min_width,
            columns,
            rows,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn layout(&self) -> PanelLayout {
        PanelLayout::compute(
            body_area(self.columns, self.rows),
            self.panel.width(),
            self.side_by_side_min_width,
        )
    }

    pub fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::PointerDown { column, row } => {
                if self.layout().hits_handle(column, row) {
                    self.panel.begin_drag(i32::from(column));
                }
            }
            Message::PointerMove { column, .. } => {
                self.panel.on_pointer_move(i32::from(column));
            }
            Message::PointerUp => {
                self.panel.end_drag();
            }
            Message::Resize(columns, rows) => {
                debug!(columns, rows, "terminal resized");
                self.columns = columns;
                self.rows = rows;
                self.panel.on_viewport_resize();
            }
            Message::ResetWidth => {
                if !self.panel.is_dragging() {
                    self.panel.reset_width();
                }
            }
            Message::Cancel => {
                if self.panel.is_dragging() {
                    self.panel.end_drag();
                } else {
                    self.should_quit = true;
                }
            }
            Message::Quit => {
                self.panel.end_drag();
                self.should_quit = true;
            }
        }
        Ok(())
    }
}
