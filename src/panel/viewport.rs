use std::cell::Cell;
use std::rc::Rc;

/// Source of the live viewport width. `None` means no viewport is observable.
pub trait Viewport {
    fn width(&self) -> Option<u32>;
}

/// Queries the controlling terminal on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn width(&self) -> Option<u32> {
        crossterm::terminal::size()
            .ok()
            .map(|(columns, _)| u32::from(columns))
    }
}

/// Viewport whose width is pushed in by its owner, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    width: Rc<Cell<Option<u32>>>,
}

impl SharedViewport {
    pub fn new(width: Option<u32>) -> Self {
        Self {
            width: Rc::new(Cell::new(width)),
        }
    }

    pub fn set(&self, width: Option<u32>) {
        self.width.set(width);
    }
}

impl Viewport for SharedViewport {
    fn width(&self) -> Option<u32> {
        self.width.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_viewport_clones_observe_updates() {
        let viewport = SharedViewport::new(Some(1000));
        let observer = viewport.clone();

        viewport.set(Some(640));
        assert_eq!(observer.width(), Some(640));

        viewport.set(None);
        assert_eq!(observer.width(), None);
    }
}
