//! Terminal User Interface management
//!
//! Handles terminal setup, teardown, and event polling, and implements
//! the `Frames` pump that animations draw through: each pumped frame
//! blits the current backdrop (the page content captured before the
//! animation started) and composites the stage sprites on top.

use crate::anim::Frames;
use crate::stage::Stage;
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Position, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Terminal wrapper for managing the TUI lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Polling timeout for events
    pub tick_rate: Duration,
    /// Pacing between animation frames
    frame_rate: Duration,
    animate: bool,
    backdrop: Option<Buffer>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            frame_rate: Duration::from_millis(16),
            animate: true,
            backdrop: None,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_animations(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Exit the alternate screen and disable raw mode.
    /// Also called automatically on Drop.
    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    /// Poll for the next event
    ///
    /// Returns `Some(Event)` if an event is available within the tick
    /// rate, or `None` on tick timeout.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if event::poll(self.tick_rate)? {
            let event = event::read()?;

            // Filter out key release events (Windows compatibility)
            if let Event::Key(key) = &event {
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
            }

            Ok(Some(event))
        } else {
            Ok(None)
        }
    }

    /// Draw to the terminal using the provided closure
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Frames for Tui {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn set_backdrop(&mut self, backdrop: Buffer) {
        self.backdrop = Some(backdrop);
    }

    fn reduced_motion(&self) -> bool {
        !self.animate
    }

    fn frame(&mut self, stage: &Stage) -> Result<()> {
        let backdrop = &self.backdrop;
        self.terminal.draw(|frame| {
            if let Some(backdrop) = backdrop {
                blit(backdrop, frame.buffer_mut());
            }
            stage.draw_sprites(frame);
        })?;
        std::thread::sleep(self.frame_rate);
        Ok(())
    }
}

/// Copy every cell of `src` into `dst`, clipped to the overlap
fn blit(src: &Buffer, dst: &mut Buffer) {
    let area = src.area.intersection(dst.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let pos = Position::new(x, y);
            if let (Some(s), Some(d)) = (src.cell(pos), dst.cell_mut(pos)) {
                *d = s.clone();
            }
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Best effort cleanup on drop
        let _ = self.exit();
    }
}
