//! Keypad rendering for the terminal

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::keypad::{ButtonGroup, Keypad};
use crate::widget::Command;

/// Foreground color of a button group
#[must_use]
pub const fn group_color(group: ButtonGroup) -> Color {
    match group {
        ButtonGroup::Number => Color::White,
        ButtonGroup::Operator => Color::Yellow,
        ButtonGroup::Memory => Color::Magenta,
        ButtonGroup::Scientific => Color::Cyan,
        ButtonGroup::Stats => Color::Green,
        ButtonGroup::Date => Color::Blue,
    }
}

/// Draws a [`Keypad`] as a grid of bracketed labels
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    title: &'a str,
    highlight: Option<Command>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a widget for `keypad`
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            title: " Keypad ",
            highlight: None,
        }
    }

    /// Sets the border title
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Highlights the button for `command`
    #[must_use]
    pub fn highlight(mut self, command: Option<Command>) -> Self {
        self.highlight = command;
        self
    }
}

/// Command under a cell of a keypad drawn in `area`
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<Command> {
    let (rows, cols) = keypad.dimensions();
    if rows == 0 || cols == 0 {
        return None;
    }
    let inner = inner(area);
    if x < inner.x || y < inner.y || x >= inner.right() || y >= inner.bottom() {
        return None;
    }
    let btn_width = inner.width / cols as u16;
    let btn_height = inner.height / rows as u16;
    if btn_width == 0 || btn_height == 0 {
        return None;
    }
    let col = usize::from((x - inner.x) / btn_width);
    let row = usize::from((y - inner.y) / btn_height);
    keypad.get_button_at(row, col).map(|b| b.command)
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = inner(area);
        let (rows, cols) = self.keypad.dimensions();
        if rows == 0 || cols == 0 || inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for btn in self.keypad.buttons() {
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height + btn_height / 2;

            let style = if self.highlight == Some(btn.command) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(group_color(btn.group))
            };

            let label = format!("[{}]", btn.label);
            let width = label.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(width) / 2;
            if y < inner.bottom() && label_x < inner.right() {
                buf.set_span(label_x, y, &Span::styled(label, style), btn_width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;
    use crate::widget::MemoryAction;

    fn rendered(widget: KeypadWidget<'_>, area: Rect) -> (Buffer, String) {
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let text = buf.content().iter().map(|c| c.symbol()).collect();
        (buf, text)
    }

    #[test]
    fn test_render_basic_labels() {
        let keypad = Keypad::basic();
        let (_, text) = rendered(KeypadWidget::new(&keypad), Rect::new(0, 0, 30, 14));
        for label in ["[7]", "[M+]", "[÷]", "[=]", "[CE]"] {
            assert!(text.contains(label), "{label} missing");
        }
        assert!(text.contains("Keypad"));
    }

    #[test]
    fn test_render_too_small_draws_border_only() {
        let keypad = Keypad::basic();
        let (_, text) = rendered(KeypadWidget::new(&keypad), Rect::new(0, 0, 4, 4));
        assert!(!text.contains("[7]"));
    }

    #[test]
    fn test_highlight_style() {
        let keypad = Keypad::basic();
        let area = Rect::new(0, 0, 30, 14);
        let widget = KeypadWidget::new(&keypad)
            .title(" Basic ")
            .highlight(Some(Command::Digit(7)));
        let (buf, text) = rendered(widget, area);
        assert!(text.contains("Basic"));
        let highlighted = buf
            .content()
            .iter()
            .filter(|c| c.bg == Color::Yellow)
            .map(|c| c.symbol())
            .collect::<String>();
        assert_eq!(highlighted, "[7]");
    }

    #[test]
    fn test_hit_test() {
        let keypad = Keypad::basic();
        // 6 rows x 4 cols, 7 px per button horizontally, 2 rows per button
        let area = Rect::new(0, 0, 30, 14);
        assert_eq!(
            hit_test(&keypad, area, 1, 1),
            Some(Command::Memory(MemoryAction::Clear))
        );
        assert_eq!(hit_test(&keypad, area, 1, 5), Some(Command::Digit(7)));
        assert_eq!(
            hit_test(&keypad, area, 22, 3),
            Some(Command::Operator(Operator::Divide))
        );
        assert_eq!(hit_test(&keypad, area, 0, 0), None);
        assert_eq!(hit_test(&keypad, area, 50, 5), None);
    }

    #[test]
    fn test_group_colors() {
        assert_eq!(group_color(ButtonGroup::Number), Color::White);
        assert_ne!(group_color(ButtonGroup::Stats), group_color(ButtonGroup::Date));
    }
}
