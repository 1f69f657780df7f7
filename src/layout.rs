use tuirealm::ratatui::layout::Rect;

/// Where the board, side panel and drag handle land for a given body area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub board: Rect,
    pub panel: Rect,
    /// Column of the panel's left edge, present only in side-by-side mode.
    pub handle_x: Option<u16>,
}

impl PanelLayout {
    /// Splits `body` between board and panel. Below `side_by_side_min_width`
    /// the panel covers the whole body and cannot be resized.
    pub fn compute(body: Rect, panel_width: u32, side_by_side_min_width: u16) -> Self {
        if body.width < side_by_side_min_width {
            return Self {
                board: Rect::new(body.x, body.y, 0, body.height),
                panel: body,
                handle_x: None,
            };
        }

        let width = u16::try_from(panel_width)
            .unwrap_or(u16::MAX)
            .min(body.width);
        let board_width = body.width - width;
        let panel_x = body.x + board_width;

        Self {
            board: Rect::new(body.x, body.y, board_width, body.height),
            panel: Rect::new(panel_x, body.y, width, body.height),
            handle_x: Some(panel_x),
        }
    }

    /// The handle straddles the panel edge: the border column and the board
    /// column next to it both start a drag.
    pub fn hits_handle(&self, column: u16, row: u16) -> bool {
        let Some(handle_x) = self.handle_x else {
            return false;
        };
        if row < self.panel.y || row >= self.panel.y.saturating_add(self.panel.height) {
            return false;
        }
        column == handle_x || (handle_x > self.board.x && column == handle_x - 1)
    }
}

/// Body area between the one-line header and footer.
pub fn body_area(columns: u16, rows: u16) -> Rect {
    Rect::new(0, 1, columns, rows.saturating_sub(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_by_side_puts_panel_on_the_right() {
        let layout = PanelLayout::compute(body_area(120, 40), 50, 80);
        assert_eq!(layout.board, Rect::new(0, 1, 70, 38));
        assert_eq!(layout.panel, Rect::new(70, 1, 50, 38));
        assert_eq!(layout.handle_x, Some(70));
    }

    #[test]
    fn narrow_body_stacks_panel_without_handle() {
        let layout = PanelLayout::compute(body_area(60, 20), 40, 80);
        assert_eq!(layout.panel, body_area(60, 20));
        assert_eq!(layout.board.width, 0);
        assert_eq!(layout.handle_x, None);
        assert!(!layout.hits_handle(20, 5));
    }

    #[test]
    fn oversized_width_is_capped_to_body() {
        let layout = PanelLayout::compute(body_area(100, 10), 500, 80);
        assert_eq!(layout.panel.width, 100);
        assert_eq!(layout.board.width, 0);
        assert_eq!(layout.handle_x, Some(0));
        assert!(layout.hits_handle(0, 2));
    }

    #[test]
    fn handle_hit_test_covers_edge_and_neighbour() {
        let layout = PanelLayout::compute(body_area(120, 40), 50, 80);
        assert!(layout.hits_handle(70, 10));
        assert!(layout.hits_handle(69, 10));
        assert!(!layout.hits_handle(71, 10));
        assert!(!layout.hits_handle(68, 10));
        assert!(!layout.hits_handle(70, 0));
        assert!(!layout.hits_handle(70, 39));
    }
}
