use tracing::{debug, warn};

use super::PanelConfig;
use super::affordance::{DragAffordance, NoAffordance};
use super::bounds::{clamp_width, max_width_for, parse_stored_width};
use super::store::WidthStore;
use super::viewport::Viewport;

enum DragState<L> {
    Idle,
    Dragging {
        origin_pointer_x: i32,
        origin_width: u32,
        _lease: L,
    },
}

/// Width controller for a side panel resized from its left edge.
///
/// The panel is either idle or in a drag gesture. While dragging, the
/// affordance lease is held inside the drag state, so leaving the gesture
/// (ending it, or dropping the controller) releases it.
pub struct ResizablePanelController<S, V, A = NoAffordance>
where
    A: DragAffordance,
{
    config: PanelConfig,
    width: u32,
    state: DragState<A::Lease>,
    store: S,
    viewport: V,
    affordance: A,
}

impl<S, V> ResizablePanelController<S, V, NoAffordance>
where
    S: WidthStore,
    V: Viewport,
{
    pub fn new(config: PanelConfig, store: S, viewport: V) -> Self {
        Self::with_affordance(config, store, viewport, NoAffordance)
    }
}

impl<S, V, A> ResizablePanelController<S, V, A>
where
    S: WidthStore,
    V: Viewport,
    A: DragAffordance,
{
    pub fn with_affordance(config: PanelConfig, store: S, viewport: V, affordance: A) -> Self {
        let max_width = max_width_for(viewport.width());
        let fallback = clamp_width(
            i64::from(config.default_width),
            config.min_width,
            max_width,
        );
        let width = match store.get(&config.storage_key) {
            Some(raw) => match parse_stored_width(&raw, config.min_width, max_width) {
                Some(width) => width,
                None => {
                    warn!(
                        key = %config.storage_key,
                        stored = %raw,
                        max_width,
                        "ignoring stored panel width outside bounds"
                    );
                    fallback
                }
            },
            None => fallback,
        };

        let mut controller = Self {
            config,
            width,
            state: DragState::Idle,
            store,
            viewport,
            affordance,
        };
        controller.persist_width();
        controller
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current upper bound, computed from the live viewport.
    pub fn max_width(&self) -> u32 {
        max_width_for(self.viewport.width())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts a resize gesture at `pointer_x`. Calling it mid-gesture moves
    /// the gesture origin and keeps the current affordance lease.
    pub fn begin_drag(&mut self, pointer_x: i32) -> bool {
        let origin_width = self.width;
        if let DragState::Dragging {
            origin_pointer_x,
            origin_width: width,
            ..
        } = &mut self.state
        {
            *origin_pointer_x = pointer_x;
            *width = origin_width;
            debug!(pointer_x, width = origin_width, "panel resize restarted");
            return true;
        }

        let lease = self.affordance.acquire();
        self.state = DragState::Dragging {
            origin_pointer_x: pointer_x,
            origin_width,
            _lease: lease,
        };
        debug!(pointer_x, width = origin_width, "panel resize started");
        true
    }

    /// Applies pointer motion to the width. Ignored outside a gesture.
    pub fn on_pointer_move(&mut self, pointer_x: i32) {
        let DragState::Dragging {
            origin_pointer_x,
            origin_width,
            ..
        } = &self.state
        else {
            return;
        };

        let delta = i64::from(*origin_pointer_x) - i64::from(pointer_x);
        let candidate = i64::from(*origin_width) + delta;
        let next = clamp_width(candidate, self.config.min_width, self.max_width());
        self.commit_width(next);
    }

    pub fn end_drag(&mut self) {
        if let DragState::Dragging { .. } = std::mem::replace(&mut self.state, DragState::Idle) {
            debug!(width = self.width, "panel resize finished");
        }
    }

    /// Shrinks the width when the viewport no longer leaves room for it.
    pub fn on_viewport_resize(&mut self) {
        let max_width = self.max_width();
        if self.width > max_width {
            self.commit_width(max_width);
        }
    }

    /// Returns to the configured default width, clamped to the live bounds.
    pub fn reset_width(&mut self) {
        let next = clamp_width(
            i64::from(self.config.default_width),
            self.config.min_width,
            self.max_width(),
        );
        self.commit_width(next);
    }

    fn commit_width(&mut self, next: u32) {
        if next == self.width {
            return;
        }
        self.width = next;
        self.persist_width();
    }

    fn persist_width(&mut self) {
        let value = self.width.to_string();
        if let Err(err) = self.store.set(&self.config.storage_key, &value) {
            warn!(
                key = %self.config.storage_key,
                "failed to persist panel width: {err:#}"
            );
        }
    }
}
