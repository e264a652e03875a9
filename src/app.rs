//! Root application component
//!
//! The App coordinates between the router's pages, the stage, and the
//! toaster. It converts terminal events into Actions, applies the global
//! ones itself, and delegates the rest to the page currently on screen.

use crate::action::Action;
use crate::anim::Frames;
use crate::components::{DetailsPage, HomePage, Toaster};
use crate::config::Config;
use crate::model::PersonRepository;
use crate::router::{Route, Router};
use crate::section::Host;
use crate::stage::Stage;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::collections::VecDeque;
use std::time::Instant;

pub struct App {
    pub config: Config,
    repo: PersonRepository,
    stage: Stage,
    toaster: Toaster,
    router: Router,
    /// Navigations requested during lifecycle calls; drained iteratively
    /// so a redirect issued inside `show` never recurses.
    pending_nav: VecDeque<Route>,
    viewport: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, repo: PersonRepository) -> Result<Self> {
        let people = repo.all()?;
        let router = Router::new(
            Box::new(HomePage::new(people)),
            Box::new(DetailsPage::new()),
        );

        Ok(Self {
            config,
            repo,
            stage: Stage::new(),
            toaster: Toaster::new(),
            router,
            pending_nav: VecDeque::new(),
            viewport: Rect::default(),
            should_quit: false,
        })
    }

    /// Show the home page. Called once before the main loop.
    pub fn init(&mut self, frames: &mut dyn Frames) -> Result<()> {
        self.pending_nav.push_back(Route::Home);
        self.process_navigations(frames)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Convert a key event into an Action: global keys first, then the
    /// current page.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(Action::Quit));
            }
            _ => {}
        }
        self.router.current_mut().handle_key_event(key)
    }

    /// Apply an Action, optionally producing a follow-up
    pub fn update(&mut self, action: Action, frames: &mut dyn Frames) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.toaster.tick(Instant::now());
                Ok(None)
            }
            Action::Resize(w, h) => {
                self.viewport = Rect::new(0, 0, w, h);
                self.router.current_mut().state().area = self.viewport;
                Ok(None)
            }
            Action::Quit => {
                self.should_quit = true;
                Ok(None)
            }
            Action::NavigateHome => {
                self.pending_nav.push_back(Route::Home);
                self.process_navigations(frames)?;
                Ok(None)
            }
            Action::NavigateDetails(id) => {
                self.pending_nav.push_back(Route::Details { id });
                self.process_navigations(frames)?;
                Ok(None)
            }
            other => self.router.current_mut().update(&other),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        self.viewport = area;

        self.router.current_mut().draw(frame, area, &mut self.stage)?;
        self.stage.draw_sprites(frame);
        self.toaster.draw(frame);
        Ok(())
    }

    /// Drain queued navigations, running the lifecycle for each. A
    /// lifecycle call may queue more (the not-found redirect); those are
    /// picked up in the same drain.
    fn process_navigations(&mut self, frames: &mut dyn Frames) -> Result<()> {
        loop {
            let Some(route) = self.pending_nav.pop_front() else {
                return Ok(());
            };
            let mut host = Host {
                stage: &mut self.stage,
                toaster: &mut self.toaster,
                repo: &self.repo,
                nav: &mut self.pending_nav,
                frames,
                viewport: self.viewport,
            };
            self.router.navigate(route, &mut host)?;
        }
    }
}
