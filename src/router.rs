//! Router - drives page changes through the section lifecycle
//!
//! Pages are constructed in `main` and injected here; the router owns
//! them and the transition context of whichever page is on screen.
//!
//! Navigation order matters for the avatar transition: the next page's
//! `before_show` runs while the previous page is still on screen (so its
//! anchors are capturable), then the previous page hides, then the next
//! page shows.

use crate::section::{Host, RouteData, Section, Transition};
use crate::stage::PageTag;
use anyhow::Result;

/// Where the app can navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Details { id: String },
}

impl Route {
    fn destination(&self) -> (PageTag, RouteData) {
        match self {
            Route::Home => (PageTag::Home, RouteData { id: None }),
            Route::Details { id } => (
                PageTag::Details,
                RouteData {
                    id: Some(id.clone()),
                },
            ),
        }
    }
}

pub struct Router {
    home: Box<dyn Section>,
    details: Box<dyn Section>,
    current: PageTag,
    /// Transition context of the page currently on screen
    transition: Option<Transition>,
}

impl Router {
    pub fn new(home: Box<dyn Section>, details: Box<dyn Section>) -> Self {
        Self {
            home,
            details,
            current: PageTag::Home,
            transition: None,
        }
    }

    pub fn current_tag(&self) -> PageTag {
        self.current
    }

    pub fn current_mut(&mut self) -> &mut dyn Section {
        match self.current {
            PageTag::Home => self.home.as_mut(),
            PageTag::Details => self.details.as_mut(),
        }
    }

    /// Run the full lifecycle for a route change:
    /// `next.before_show` -> `current.hide` -> `next.show`.
    ///
    /// The outgoing page's transition context is handed to its `hide`
    /// (it may still hold an avatar copy to fade out); the incoming
    /// page's context comes from its own `before_show`.
    pub fn navigate(&mut self, route: Route, host: &mut Host<'_>) -> Result<()> {
        let (to, route_data) = route.destination();
        let mut outgoing = self.transition.take();

        if to == self.current {
            let page = self.current_mut();
            let mut incoming = page.before_show(host, &route_data)?;
            page.hide(host, &mut outgoing)?;
            page.show(host, &route_data, &mut incoming)?;
            self.transition = incoming;
        } else {
            let (next, current) = self.pair_mut(to);
            let mut incoming = next.before_show(host, &route_data)?;
            current.hide(host, &mut outgoing)?;
            next.show(host, &route_data, &mut incoming)?;
            self.transition = incoming;
        }

        self.current = to;
        Ok(())
    }

    /// Navigate to the home page
    pub fn home(&mut self, host: &mut Host<'_>) -> Result<()> {
        self.navigate(Route::Home, host)
    }

    fn pair_mut(&mut self, to: PageTag) -> (&mut dyn Section, &mut dyn Section) {
        match to {
            PageTag::Home => (self.home.as_mut(), self.details.as_mut()),
            PageTag::Details => (self.details.as_mut(), self.home.as_mut()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::testing::HostFixture;
    use crate::section::{SectionState, Shown};
    use crate::stage::Stage;
    use ratatui::{layout::Rect, Frame};
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<String>>>;

    struct ProbeSection {
        name: &'static str,
        state: SectionState,
        log: CallLog,
        saw_transition_in_show: Rc<RefCell<bool>>,
    }

    impl ProbeSection {
        fn new(name: &'static str, log: CallLog) -> Self {
            Self {
                name,
                state: SectionState::default(),
                log,
                saw_transition_in_show: Rc::new(RefCell::new(false)),
            }
        }
    }

    impl Section for ProbeSection {
        fn state(&mut self) -> &mut SectionState {
            &mut self.state
        }

        fn before_show(
            &mut self,
            _host: &mut Host<'_>,
            _route: &RouteData,
        ) -> Result<Option<Transition>> {
            self.log.borrow_mut().push(format!("{}.before_show", self.name));
            Ok(Some(Transition::default()))
        }

        fn show(
            &mut self,
            host: &mut Host<'_>,
            _route: &RouteData,
            transition: &mut Option<Transition>,
        ) -> Result<Shown> {
            self.log.borrow_mut().push(format!("{}.show", self.name));
            *self.saw_transition_in_show.borrow_mut() = transition.is_some();
            Ok(self.base_show(host))
        }

        fn hide(&mut self, _host: &mut Host<'_>, _transition: &mut Option<Transition>) -> Result<()> {
            self.log.borrow_mut().push(format!("{}.hide", self.name));
            self.base_hide();
            Ok(())
        }

        fn draw(&mut self, _frame: &mut Frame<'_>, _area: Rect, _stage: &mut Stage) -> Result<()> {
            Ok(())
        }
    }

    fn probe_router(log: &CallLog) -> Router {
        Router::new(
            Box::new(ProbeSection::new("home", log.clone())),
            Box::new(ProbeSection::new("details", log.clone())),
        )
    }

    #[test]
    fn test_navigate_runs_lifecycle_in_order() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let mut router = probe_router(&log);
        let mut fx = HostFixture::new();

        let mut host = fx.host();
        router
            .navigate(
                Route::Details {
                    id: "amara".to_string(),
                },
                &mut host,
            )
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["details.before_show", "home.hide", "details.show"]
        );
        assert_eq!(router.current_tag(), PageTag::Details);
    }

    #[test]
    fn test_same_page_navigation_reuses_one_page() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let mut router = probe_router(&log);
        let mut fx = HostFixture::new();

        let mut host = fx.host();
        router.home(&mut host).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["home.before_show", "home.hide", "home.show"]
        );
        assert_eq!(router.current_tag(), PageTag::Home);
    }

    #[test]
    fn test_transition_from_before_show_reaches_show() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let details = ProbeSection::new("details", log.clone());
        let seen = details.saw_transition_in_show.clone();
        let mut router = Router::new(
            Box::new(ProbeSection::new("home", log.clone())),
            Box::new(details),
        );
        let mut fx = HostFixture::new();

        let mut host = fx.host();
        router
            .navigate(
                Route::Details {
                    id: "amara".to_string(),
                },
                &mut host,
            )
            .unwrap();

        assert!(*seen.borrow());
    }
}
