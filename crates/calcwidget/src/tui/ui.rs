//! Terminal rendering

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Widget},
    Frame,
};

use super::app::{CalculatorApp, DateField};
use super::input::help;
use super::keypad::KeypadWidget;
use crate::core::format::format_number;
use crate::keypad::Keypad;
use crate::theme::Theme;
use crate::widget::Tab;

/// Window title
pub const TITLE: &str = " calcwidget ";

/// Renders the app at `now_ms`
pub fn render(app: &CalculatorApp, frame: &mut Frame, now_ms: u64) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app, now_ms), area);
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Color,
    dim: Color,
    accent: Color,
    border: Color,
}

impl Palette {
    const fn of(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Color::Black,
                dim: Color::DarkGray,
                accent: Color::Blue,
                border: Color::Gray,
            },
            Theme::Dark => Self {
                text: Color::White,
                dim: Color::Gray,
                accent: Color::Yellow,
                border: Color::DarkGray,
            },
        }
    }
}

/// Whole-screen widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
    now_ms: u64,
    palette: Palette,
}

impl<'a> CalculatorUI<'a> {
    /// Creates the screen for `app` at `now_ms`
    #[must_use]
    pub fn new(app: &'a CalculatorApp, now_ms: u64) -> Self {
        Self {
            app,
            now_ms,
            palette: Palette::of(app.widget().theme()),
        }
    }

    fn block(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        let selected = Tab::ALL
            .iter()
            .position(|t| *t == self.app.widget().tab())
            .unwrap_or_default();
        Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(self.palette.dim))
            .highlight_style(
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .block(self.block(" Tab ⇥ "))
            .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let widget = self.app.widget();
        let display = widget.display();
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{:<4}", widget.state().angle_mode().label()),
                    Style::default().fg(self.palette.dim),
                ),
                Span::styled(display.expression, Style::default().fg(self.palette.dim)),
            ])
            .right_aligned(),
            Line::from(Span::styled(
                display.result,
                Style::default()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ];
        Paragraph::new(lines)
            .block(self.block(" Display "))
            .render(area, buf);
    }

    fn render_keypads(&self, area: Rect, buf: &mut Buffer) {
        let tab = self.app.widget().tab();
        let pads = Keypad::for_tab(tab);
        let constraints: Vec<Constraint> = pads
            .iter()
            .map(|p| Constraint::Length(p.dimensions().0 as u16 * 2 + 2))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        for (pad, chunk) in pads.iter().zip(chunks.iter()) {
            KeypadWidget::new(pad)
                .title(" Keypad ")
                .highlight(self.app.last_command())
                .render(*chunk, buf);
        }
    }

    fn render_statistics(&self, area: Rect, buf: &mut Buffer) {
        let widget = self.app.widget();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled(widget.stats_input(), Style::default().fg(self.palette.text)),
            Span::styled("▏", Style::default().fg(self.palette.accent)),
        ]))
        .block(self.block(" Data (comma separated) "))
        .render(chunks[0], buf);

        Paragraph::new(widget.data_values())
            .style(Style::default().fg(self.palette.dim))
            .block(self.block(" Values "))
            .render(chunks[1], buf);

        Paragraph::new(widget.stats_results())
            .style(Style::default().fg(self.palette.accent))
            .block(self.block(" Results "))
            .render(chunks[2], buf);

        KeypadWidget::new(&Keypad::statistics())
            .title(" Actions ")
            .highlight(self.app.last_command())
            .render(chunks[3], buf);
    }

    fn render_date(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(6),
            ])
            .split(area);

        let items: Vec<ListItem> = DateField::ALL
            .iter()
            .map(|field| {
                let focused = *field == self.app.date_field();
                let marker = if focused { "▶ " } else { "  " };
                let style = if focused {
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.palette.text)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{:<11}", field.label()),
                        Style::default().fg(self.palette.dim),
                    ),
                    Span::styled(self.app.field_text(*field).to_string(), style),
                ]))
            })
            .collect();
        List::new(items)
            .block(self.block(" Fields "))
            .render(chunks[0], buf);

        Paragraph::new(self.app.widget().date_results())
            .style(Style::default().fg(self.palette.accent))
            .block(self.block(" Results "))
            .render(chunks[1], buf);

        KeypadWidget::new(&Keypad::date())
            .title(" Actions ")
            .highlight(self.app.last_command())
            .render(chunks[2], buf);
    }

    fn render_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(6), Constraint::Length(3)])
            .split(area);

        let shortcuts: Vec<ListItem> = help(self.app.widget().tab())
            .iter()
            .chain(GLOBAL_HELP)
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>8}"), Style::default().fg(self.palette.accent)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(self.palette.dim)),
                ]))
            })
            .collect();
        List::new(shortcuts)
            .block(self.block(" Help "))
            .render(chunks[0], buf);

        let notes: Vec<ListItem> = self
            .app
            .widget()
            .notifier()
            .visible(self.now_ms)
            .map(|n| {
                let color = if n.warning { Color::Red } else { Color::Green };
                ListItem::new(Span::styled(n.message.as_str(), Style::default().fg(color)))
            })
            .collect();
        List::new(notes)
            .block(self.block(" Notifications "))
            .render(chunks[1], buf);

        let memory = self.app.widget().memory();
        let theme = self.app.widget().theme();
        let status = if memory.is_set() {
            format!("M={}  {theme}", format_number(memory.value()))
        } else {
            theme.to_string()
        };
        Paragraph::new(status)
            .style(Style::default().fg(self.palette.dim))
            .block(self.block(" Status "))
            .render(chunks[2], buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
            .render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Min(36), Constraint::Length(30)])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(columns[0]);

        self.render_tabs(main[0], buf);

        match self.app.widget().tab() {
            Tab::Basic | Tab::Scientific => {
                let body = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(4), Constraint::Min(0)])
                    .split(main[1]);
                self.render_display(body[0], buf);
                self.render_keypads(body[1], buf);
            }
            Tab::Statistics => self.render_statistics(main[1], buf),
            Tab::Date => self.render_date(main[1], buf),
        }

        self.render_sidebar(columns[1], buf);
    }
}

/// Keys available on every tab
pub const GLOBAL_HELP: &[(&str, &str)] = &[
    ("Tab", "Next tab"),
    ("F12", "Theme"),
    ("Ctrl+C", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::config::WidgetConfig;
    use crate::theme::MemoryStore;
    use crate::widget::{Command, Widget};

    fn app() -> CalculatorApp {
        CalculatorApp::new(Widget::new(
            WidgetConfig::new().with_rng_seed(5),
            Box::new(MemoryStore::new()),
        ))
    }

    fn screen(app: &CalculatorApp, now_ms: u64) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 36)).unwrap();
        terminal.draw(|frame| render(app, frame, now_ms)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press(app: &mut CalculatorApp, actions: &[&str]) {
        for a in actions {
            app.dispatch(Command::from_action(a).unwrap(), 0);
        }
    }

    #[test]
    fn test_render_initial_screen() {
        let text = screen(&app(), 0);
        assert!(text.contains("calcwidget"));
        for title in ["Basic", "Scientific", "Statistics", "Date"] {
            assert!(text.contains(title), "{title}");
        }
        assert!(text.contains("DEG"));
        assert!(text.contains("[MC]"));
        assert!(text.contains("Help"));
    }

    #[test]
    fn test_render_expression_and_result() {
        let mut app = app();
        press(&mut app, &["1", "2", "3", "4", "add", "5"]);
        let text = screen(&app, 0);
        assert!(text.contains("1,234 +"));
        assert!(text.contains('5'));
    }

    #[test]
    fn test_render_scientific_keypads() {
        let mut app = app();
        press(&mut app, &["tab-scientific"]);
        let text = screen(&app, 0);
        assert!(text.contains("[sin]"));
        assert!(text.contains("[7]"));
    }

    #[test]
    fn test_render_notifications_expire() {
        let mut app = app();
        press(&mut app, &["1", "divide", "0", "calculate"]);
        assert!(screen(&app, 0).contains("Cannot divide by zero!"));
        assert!(!screen(&app, 2000).contains("Cannot divide by zero!"));
    }

    #[test]
    fn test_render_statistics_tab() {
        let mut app = app();
        press(&mut app, &["tab-statistics"]);
        app.widget_mut().set_stats_input("4, 8");
        press(&mut app, &["add-data", "variance"]);
        let text = screen(&app, 0);
        assert!(text.contains("4, 8"));
        assert!(text.contains("Variance: 4.0000"));
        assert!(text.contains("[Mean]"));
    }

    #[test]
    fn test_render_date_tab() {
        let mut app = app();
        press(&mut app, &["tab-date"]);
        app.widget_mut().date_panel_mut().start = "not a date".into();
        press(&mut app, &["week-number"]);
        let text = screen(&app, 0);
        assert!(text.contains("Start date"));
        assert!(text.contains("not a date"));
        assert!(text.contains("Please select valid dates"));
    }

    #[test]
    fn test_render_memory_status_and_theme() {
        let mut app = app();
        press(&mut app, &["9", "memory-add", "theme"]);
        let text = screen(&app, 0);
        assert!(text.contains("M=9"));
        assert!(text.contains("dark"));
    }

    #[test]
    fn test_render_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|frame| render(&app(), frame, 0)).unwrap();
    }
}
