use tuirealm::ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::panel::{DragAffordance, Viewport, WidthStore};

const LANES: [&str; 3] = ["To Do", "In Progress", "Done"];

pub fn render<S, V, A>(frame: &mut Frame<'_>, app: &App<S, V, A>)
where
    S: WidthStore,
    V: Viewport,
    A: DragAffordance,
{
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let layout = app.layout();

    render_header(frame, chunks[0]);
    render_board(frame, layout.board);
    render_panel(frame, layout.panel, layout.handle_x.is_some(), app.panel.is_dragging());
    render_footer(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let header = Paragraph::new(" kanban-panel ")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Left);
    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame<'_>, area: Rect) {
    if area.width == 0 {
        return;
    }

    let lanes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, LANES.len() as u32); LANES.len()])
        .split(area);

    for (lane, title) in lanes.iter().zip(LANES) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {title} "));
        frame.render_widget(block, *lane);
    }
}

fn render_panel(frame: &mut Frame<'_>, area: Rect, resizable: bool, dragging: bool) {
    let border_style = if dragging {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(border_style)
        .title(" Task details ");
    if resizable {
        block = block.title_bottom(Line::from(" ⇔ ").left_aligned());
    }

    let body = Paragraph::new(vec![
        Line::from(format!("{} cells wide", area.width)),
        Line::from(""),
        Line::from(if resizable {
            "Drag the left edge to resize."
        } else {
            "Widen the terminal to show the board alongside."
        }),
    ])
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(body, area);
}

fn render_footer<S, V, A>(frame: &mut Frame<'_>, area: Rect, app: &App<S, V, A>)
where
    S: WidthStore,
    V: Viewport,
    A: DragAffordance,
{
    let status = if app.panel.is_dragging() {
        "resizing"
    } else {
        "r: reset width  q: quit"
    };
    let footer = Paragraph::new(format!(
        " width {} (min {}, max {})  {status} ",
        app.panel.width(),
        app.panel.config().min_width,
        app.panel.max_width(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Message;
    use crate::panel::{MemoryStore, NoAffordance, SharedViewport};
    use crate::settings::Settings;
    use tuirealm::ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render_app(app: &App<MemoryStore, SharedViewport, NoAffordance>) -> String {
        let backend = TestBackend::new(app.columns, app.rows);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| render(frame, app))
            .expect("draw should succeed");
        buffer_to_string(terminal.backend().buffer())
    }

    fn app(columns: u16, rows: u16) -> App<MemoryStore, SharedViewport, NoAffordance> {
        App::with_parts(
            &Settings::default(),
            MemoryStore::new(),
            SharedViewport::new(Some(u32::from(columns))),
            NoAffordance,
            (columns, rows),
        )
    }

    #[test]
    fn renders_board_and_panel_side_by_side() {
        let rendered = render_app(&app(120, 20));
        assert!(rendered.contains("To Do"));
        assert!(rendered.contains("Task details"));
        assert!(rendered.contains("width 60 (min 30, max 102)"));
    }

    #[test]
    fn narrow_terminal_hides_board() {
        let rendered = render_app(&app(60, 20));
        assert!(!rendered.contains("To Do"));
        assert!(rendered.contains("Widen the terminal"));
    }

    #[test]
    fn footer_reports_active_resize() {
        let mut app = app(120, 20);
        app.update(Message::PointerDown { column: 60, row: 5 })
            .expect("update should succeed");

        let rendered = render_app(&app);
        assert!(rendered.contains("resizing"));
    }
}
