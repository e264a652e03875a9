//! Toast component - transient fire-and-forget notifications
//!
//! Toasts stack in the top-right corner above all page content and
//! expire a few seconds after creation.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug)]
struct Toast {
    message: String,
    created: Instant,
}

/// Owns all live toasts
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message; it expires on its own
    pub fn create(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast {
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Drop expired toasts. Called once per tick.
    pub fn tick(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created) < TOAST_TTL);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.toasts.iter().map(|t| t.message.as_str()).collect()
    }

    /// Draw toasts stacked from the top-right corner
    pub fn draw(&self, frame: &mut Frame) {
        if self.is_empty() {
            return;
        }
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        for (i, toast) in self.toasts.iter().enumerate() {
            let width = (toast.message.width() as u16 + 2).min(area.width);
            let y = area.y + 1 + i as u16 * 2;
            if y >= area.bottom() {
                break;
            }
            let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 1);

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(format!(" {} ", toast.message)).style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Rgb(222, 196, 120)),
                ),
                rect,
            );
        }
    }
}
