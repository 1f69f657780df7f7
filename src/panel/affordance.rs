use std::io::{self, Write};

use crossterm::QueueableCommand;
use tracing::{debug, warn};

use crate::terminal::{ButtonMotionReporting, PointerShape, SetPointerShape};

/// Global UI effects held for the duration of a resize gesture.
///
/// `acquire` applies the effects (resize cursor, selection suppression,
/// pointer-motion reporting) and the returned lease reverts them when it is
/// dropped, so every way out of a gesture releases them.
pub trait DragAffordance {
    type Lease;

    fn acquire(&mut self) -> Self::Lease;
}

/// Affordance with no visible effect, for hosts that draw their own cues.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAffordance;

impl DragAffordance for NoAffordance {
    type Lease = ();

    fn acquire(&mut self) -> Self::Lease {}
}

/// Terminal affordance: switches the pointer to a horizontal-resize shape and
/// turns on button-motion reporting so drag events arrive from anywhere in the
/// terminal, not only over the panel. Text selection is already suppressed by
/// mouse capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalAffordance;

impl DragAffordance for TerminalAffordance {
    type Lease = TerminalDragLease;

    fn acquire(&mut self) -> Self::Lease {
        if let Err(err) = apply_drag_effects(true) {
            warn!("failed to apply resize affordance: {err}");
        }
        debug!("resize affordance acquired");
        TerminalDragLease { _private: () }
    }
}

#[derive(Debug)]
pub struct TerminalDragLease {
    _private: (),
}

impl Drop for TerminalDragLease {
    fn drop(&mut self) {
        if let Err(err) = apply_drag_effects(false) {
            warn!("failed to release resize affordance: {err}");
        }
        debug!("resize affordance released");
    }
}

fn apply_drag_effects(active: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if active {
        stdout
            .queue(SetPointerShape(PointerShape::ColumnResize))?
            .queue(ButtonMotionReporting(true))?;
    } else {
        stdout
            .queue(ButtonMotionReporting(false))?
            .queue(SetPointerShape(PointerShape::Default))?;
    }
    stdout.flush()
}
