use crate::ui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const TAB_WIDTH: usize = 4;

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub list: Rect,
    pub output: Rect,
    pub footer: Rect,
}

/// Split `area` into a fixed-width command list, the output pane taking the
/// rest of the width, and a one-line footer.
pub fn layout(area: Rect, list_width: u16) -> Panes {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(0)])
        .split(main_chunks[0]);

    Panes {
        list: body_chunks[0],
        output: body_chunks[1],
        footer: main_chunks[1],
    }
}

/// Text rows inside the output pane's border for a screen of size `area`,
/// never less than one so paging always moves.
pub fn output_page_height(area: Rect, list_width: u16) -> usize {
    text_rows(layout(area, list_width).output)
}

fn text_rows(pane: Rect) -> usize {
    usize::from(pane.height.saturating_sub(2)).max(1)
}

pub fn render(frame: &mut Frame, app: &App) {
    let panes = layout(frame.area(), app.registry.list_width());

    render_command_list(frame, app, panes.list);
    render_output(frame, app, panes.output);
    render_footer(frame, panes.footer);
}

fn render_command_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .registry
        .commands()
        .iter()
        .enumerate()
        .map(|(i, command)| {
            let style = if i == app.selected_index {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else if command.is_implemented() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(command.name.clone()).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(list, area);
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let page = text_rows(area);

    let text: Vec<Line> = app
        .output
        .visible(page)
        .map(|line| Line::raw(expand_tabs(line)))
        .collect();

    let title = if app.output.is_empty() {
        " Output ".to_string()
    } else {
        let first = app.output.scroll_offset() + 1;
        let last = (app.output.scroll_offset() + page).min(app.output.len());
        format!(" Output {}-{}/{} ", first, last, app.output.len())
    };

    // No wrapping: long lines are clipped at the pane edge.
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new("[↑↓] Navigate  [Enter] Run  [PgUp/PgDn] Scroll  [q/Esc] Quit")
        .style(Style::default().fg(Color::Gray));

    frame.render_widget(footer, area);
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.push_str(&" ".repeat(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Registry};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_lines(app: &App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buf = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_layout_list_has_fixed_width() {
        let panes = layout(Rect::new(0, 0, 80, 24), 13);
        assert_eq!(panes.list.width, 13);
        assert_eq!(panes.output.x, 13);
        assert_eq!(panes.output.width, 67);
        assert_eq!(panes.list.height, 23);
        assert_eq!(panes.footer.height, 1);
    }

    #[test]
    fn test_output_page_height_excludes_borders_and_footer() {
        assert_eq!(output_page_height(Rect::new(0, 0, 80, 24), 13), 21);
        assert_eq!(output_page_height(Rect::new(0, 0, 80, 3), 13), 1);
        assert_eq!(output_page_height(Rect::new(0, 0, 80, 2), 13), 1);
    }

    #[test]
    fn test_tiny_terminal_title_and_paging() {
        let mut app = App::new(Registry::new(vec![Command::not_implemented("x")]), 1000);
        for i in 0..101 {
            app.output.push_line(i.to_string());
        }
        app.set_page_height(output_page_height(Rect::new(0, 0, 40, 3), 5));
        app.output.scroll_to_bottom(app.page_height());
        assert_eq!(app.output.scroll_offset(), 100);

        let lines = render_to_lines(&app, 40, 3);
        assert!(lines[0].contains("Output 101-101/101"));

        app.page_up();
        assert_eq!(app.output.scroll_offset(), 99);
        app.page_down();
        assert_eq!(app.output.scroll_offset(), 100);
    }

    #[test]
    fn test_render_shows_every_command() {
        let app = App::new(Registry::builtin(), 100);
        let screen = render_to_lines(&app, 60, 12).join("\n");
        for name in ["build", "clean", "info", "configure", "meson", "logs", "exit"] {
            assert!(screen.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_render_highlights_selection() {
        let mut app = App::new(Registry::builtin(), 100);
        app.selected_index = 1;

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let buf = terminal.backend().buffer();

        // Row 0 is the border; "build" is on row 1, "clean" on row 2.
        assert!(!buf[(1, 1)].modifier.contains(Modifier::REVERSED));
        assert!(buf[(1, 2)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_render_output_window_and_clipping() {
        let mut app = App::new(Registry::new(vec![Command::not_implemented("x")]), 100);
        for i in 0..30 {
            app.output.push_line(format!("row {} {}", i, "#".repeat(100)));
        }
        app.set_page_height(5);
        app.page_down();

        // list width 5, output pane 35 wide, 5 text rows
        let lines = render_to_lines(&app, 40, 8);
        assert!(lines[1].contains("row 5 "));
        assert!(lines[5].contains("row 9 "));
        assert!(!lines.iter().any(|l| l.contains("row 10 ")));
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
        assert!(lines[0].contains("Output 6-10/30"));
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("a\tb"), "a   b");
        assert_eq!(expand_tabs("\tx"), "    x");
        assert_eq!(expand_tabs("plain"), "plain");
    }
}
