//! Section trait - the page lifecycle contract
//!
//! The router drives pages through `before_show` -> `show` -> `hide`.
//! `before_show` runs while the previous page is still on screen and may
//! return a `Transition` context (resolved data plus an avatar-copy
//! sprite); the router threads that context into the matching `show` and
//! later `hide`, so no lifecycle state lives on the page between
//! navigations.

use crate::action::Action;
use crate::anim::Frames;
use crate::components::toast::Toaster;
use crate::model::{Person, PersonRepository};
use crate::router::Route;
use crate::stage::{SpriteId, Stage};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::collections::VecDeque;

/// Parameters passed by the router describing what to display
#[derive(Debug, Clone, Default)]
pub struct RouteData {
    pub id: Option<String>,
}

/// Everything a page may reach during a lifecycle call: the shared stage,
/// the toaster, the person repository, the navigation queue, and the
/// animation frame pump.
pub struct Host<'a> {
    pub stage: &'a mut Stage,
    pub toaster: &'a mut Toaster,
    pub repo: &'a PersonRepository,
    pub nav: &'a mut VecDeque<Route>,
    pub frames: &'a mut dyn Frames,
    pub viewport: Rect,
}

/// Proof that the base show behavior ran. Only `base_show` constructs
/// one, so an overriding `show` cannot skip the base bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shown {
    _base_ran: (),
}

/// Base bookkeeping every section carries
#[derive(Debug, Default)]
pub struct SectionState {
    pub visible: bool,
    pub area: Rect,
}

/// Context created by `before_show` and consumed by `show`/`hide`
#[derive(Debug, Default)]
pub struct Transition {
    /// Person resolved from the route id, if any
    pub person: Option<Person>,
    /// Avatar-copy sprite attached for the entrance animation.
    /// `None` whenever no copy is attached to the stage.
    pub avatar_copy: Option<SpriteId>,
}

/// Page lifecycle contract
pub trait Section {
    fn state(&mut self) -> &mut SectionState;

    /// Prepare for display while the previous page is still visible.
    /// Returning a `Transition` hands its ownership to the router.
    fn before_show(
        &mut self,
        host: &mut Host<'_>,
        route: &RouteData,
    ) -> Result<Option<Transition>> {
        let _ = (host, route);
        Ok(None)
    }

    /// Make the page visible. Implementations must call `base_show`
    /// before any branching and return its result.
    fn show(
        &mut self,
        host: &mut Host<'_>,
        route: &RouteData,
        transition: &mut Option<Transition>,
    ) -> Result<Shown> {
        let _ = (route, transition);
        Ok(self.base_show(host))
    }

    /// Take the page off screen. Implementations must end by delegating
    /// to `base_hide`.
    fn hide(&mut self, host: &mut Host<'_>, transition: &mut Option<Transition>) -> Result<()> {
        let _ = (host, transition);
        self.base_hide();
        Ok(())
    }

    /// Convert a key event into an Action; no state changes here
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action, optionally producing a follow-up
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, stage: &mut Stage) -> Result<()>;

    /// Base show behavior: mark visible and adopt the host viewport as
    /// the page area (layout exists before the first draw).
    fn base_show(&mut self, host: &Host<'_>) -> Shown {
        let viewport = host.viewport;
        let state = self.state();
        state.visible = true;
        state.area = viewport;
        Shown { _base_ran: () }
    }

    /// Base hide behavior: mark hidden
    fn base_hide(&mut self) {
        self.state().visible = false;
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::anim::testing::MockFrames;

    /// Owns every collaborator a `Host` borrows, so tests can build
    /// hosts scoped to single lifecycle calls and inspect the parts
    /// afterwards.
    pub struct HostFixture {
        pub stage: Stage,
        pub toaster: Toaster,
        pub repo: PersonRepository,
        pub nav: VecDeque<Route>,
        pub frames: MockFrames,
        pub viewport: Rect,
    }

    impl HostFixture {
        pub fn new() -> Self {
            Self::with_repo(PersonRepository::builtin())
        }

        pub fn with_repo(repo: PersonRepository) -> Self {
            Self {
                stage: Stage::new(),
                toaster: Toaster::new(),
                repo,
                nav: VecDeque::new(),
                frames: MockFrames::new(),
                viewport: Rect::new(0, 0, 80, 24),
            }
        }

        pub fn host(&mut self) -> Host<'_> {
            Host {
                stage: &mut self.stage,
                toaster: &mut self.toaster,
                repo: &self.repo,
                nav: &mut self.nav,
                frames: &mut self.frames,
                viewport: self.viewport,
            }
        }
    }
}
