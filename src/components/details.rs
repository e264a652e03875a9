//! Details page - one person record, entered via an avatar transition
//!
//! `before_show` resolves the person and, while the home page is still
//! on screen, clones its avatar anchor into a fixed-position sprite over
//! the same cells. `show` then hides the page's own avatar block and
//! animates the clone onto it, producing the illusion of the list avatar
//! flying and growing into place. `hide` fades out any clone that is
//! still attached.

use crate::action::Action;
use crate::anim::{self, calculate_diff, FadeParams, MoveParams};
use crate::components::layout::avatar_rect;
use crate::router::Route;
use crate::section::{Host, RouteData, Section, SectionState, Shown, Transition};
use crate::stage::{dim, AvatarFace, PageTag, Sprite, SpriteId, Stage};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use std::time::Duration;

const EXIT_FADE: Duration = Duration::from_millis(200);

#[derive(Default)]
pub struct DetailsPage {
    state: SectionState,
    heading: String,
    avatar: Option<AvatarFace>,
    avatar_visible: bool,
    fields: Vec<(&'static str, String)>,
    notes: String,
}

impl DetailsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach the avatar copy if one is held. Safe to call twice.
    fn remove_avatar_copy(stage: &mut Stage, slot: &mut Option<SpriteId>) {
        if let Some(id) = slot.take() {
            stage.remove(id);
        }
    }

    /// Render the page into a standalone buffer; used as the static
    /// backdrop behind the flying sprite while an animation pumps frames.
    fn backdrop(&self, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        self.paint(&mut buf, area);
        buf
    }

    fn paint(&self, buf: &mut Buffer, area: Rect) {
        let area = area.intersection(*buf.area());
        if area.width == 0 || area.height == 0 {
            return;
        }

        Block::default()
            .borders(Borders::ALL)
            .title(" Person ")
            .border_style(Style::default().fg(Color::DarkGray))
            .render(area, buf);

        let avatar_area = avatar_rect(area);
        if self.avatar_visible {
            if let Some(face) = &self.avatar {
                self.paint_avatar(buf, avatar_area, face);
            }
        }

        // Heading and fields to the right of the avatar block
        let text_x = avatar_area.right().saturating_add(3);
        if text_x < area.right().saturating_sub(1) {
            let text_width = area.right() - 1 - text_x;
            let heading_area = Rect::new(text_x, avatar_area.y, text_width, 1).intersection(area);
            Paragraph::new(Line::from(Span::styled(
                self.heading.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )))
            .render(heading_area, buf);

            for (i, (label, value)) in self.fields.iter().enumerate() {
                let y = avatar_area.y + 2 + i as u16;
                if y >= area.bottom().saturating_sub(1) {
                    break;
                }
                let field_area = Rect::new(text_x, y, text_width, 1).intersection(area);
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!("{:<10}", label),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value.clone(), Style::default().fg(Color::White)),
                ]))
                .render(field_area, buf);
            }
        }

        if !self.notes.is_empty() {
            let y = avatar_area.bottom() + 2;
            if y < area.bottom().saturating_sub(1) {
                let notes_area = Rect::new(
                    area.x + 3,
                    y,
                    area.width.saturating_sub(6),
                    area.bottom() - 1 - y,
                )
                .intersection(area);
                Paragraph::new(self.notes.clone())
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: true })
                    .render(notes_area, buf);
            }
        }

        if area.height > 2 {
            let hint_area = Rect::new(area.x + 2, area.bottom() - 2, area.width.saturating_sub(4), 1)
                .intersection(area);
            Paragraph::new(Line::from(Span::styled(
                "Esc back   q quit",
                Style::default().fg(Color::DarkGray),
            )))
            .render(hint_area, buf);
        }
    }

    fn paint_avatar(&self, buf: &mut Buffer, avatar_area: Rect, face: &AvatarFace) {
        if avatar_area.width == 0 || avatar_area.height == 0 {
            return;
        }
        Block::default()
            .style(Style::default().bg(dim(face.color, 1.0)))
            .render(avatar_area, buf);

        let initials = face.initials.as_str();
        if avatar_area.width as usize >= initials.len() {
            let x = avatar_area.x + (avatar_area.width - initials.len() as u16) / 2;
            let y = avatar_area.y + avatar_area.height / 2;
            let text_area =
                Rect::new(x, y, initials.len() as u16, 1).intersection(*buf.area());
            Paragraph::new(Line::from(Span::styled(
                initials.to_string(),
                Style::default()
                    .fg(Color::White)
                    .bg(dim(face.color, 1.0))
                    .add_modifier(Modifier::BOLD),
            )))
            .render(text_area, buf);
        }
    }
}

impl Section for DetailsPage {
    fn state(&mut self) -> &mut SectionState {
        &mut self.state
    }

    fn before_show(
        &mut self,
        host: &mut Host<'_>,
        route: &RouteData,
    ) -> Result<Option<Transition>> {
        let Some(id) = route.id.as_deref() else {
            return Ok(None);
        };

        // Repository failures are not caught here; they surface to the
        // event loop (see DESIGN.md on the original's uncaught rejection).
        let person = host.repo.retrieve(id)?;
        let mut transition = Transition {
            person,
            avatar_copy: None,
        };

        // Best-effort clone of the home page's avatar for the view
        // transition. A missing anchor just means no animation.
        let Some(anchor) = host.stage.anchor(PageTag::Home, id) else {
            return Ok(Some(transition));
        };

        let copy = Sprite::new(anchor.rect, anchor.face.clone());
        transition.avatar_copy = Some(host.stage.attach(copy));
        Ok(Some(transition))
    }

    fn show(
        &mut self,
        host: &mut Host<'_>,
        _route: &RouteData,
        transition: &mut Option<Transition>,
    ) -> Result<Shown> {
        let shown = self.base_show(host);

        let person = transition.as_mut().and_then(|t| t.person.take());
        let Some(person) = person else {
            host.toaster.create("🔍 Unable to find person.");
            host.nav.push_back(Route::Home);
            return Ok(shown);
        };

        self.heading = person.name.clone();
        self.avatar = Some(AvatarFace {
            initials: person.initials(),
            color: person.color,
        });
        self.avatar_visible = true;
        self.fields = vec![
            ("Role", person.role.clone()),
            ("Email", person.email.clone()),
            ("Location", person.location.clone()),
            ("Joined", person.joined.format("%b %e, %Y").to_string()),
        ];
        self.notes = person.notes.clone();

        if let Some(copy_id) = transition.as_ref().and_then(|t| t.avatar_copy) {
            let area = self.state.area;
            let avatar_area = avatar_rect(area);
            let copy_rect = host.stage.sprite(copy_id).map(|s| s.rect);

            if let Some(copy_rect) = copy_rect {
                if avatar_area.width > 0 && avatar_area.height > 0 {
                    let to = calculate_diff(avatar_area.into(), copy_rect);

                    self.avatar_visible = false;
                    host.frames.set_backdrop(self.backdrop(area));
                    anim::move_to(
                        host.frames,
                        host.stage,
                        MoveParams {
                            id: copy_id,
                            to,
                            duration: None,
                        },
                    )?;
                }
            }

            if let Some(t) = transition.as_mut() {
                Self::remove_avatar_copy(host.stage, &mut t.avatar_copy);
            }
            self.avatar_visible = true;
        }

        Ok(shown)
    }

    fn hide(&mut self, host: &mut Host<'_>, transition: &mut Option<Transition>) -> Result<()> {
        if let Some(t) = transition.as_mut() {
            if let Some(copy_id) = t.avatar_copy {
                host.frames.set_backdrop(self.backdrop(self.state.area));
                anim::fade(
                    host.frames,
                    host.stage,
                    FadeParams {
                        id: copy_id,
                        to: 0.0,
                        duration: Some(EXIT_FADE),
                    },
                )?;
                Self::remove_avatar_copy(host.stage, &mut t.avatar_copy);
            }
        }

        self.base_hide();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => Some(Action::NavigateHome),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, _stage: &mut Stage) -> Result<()> {
        self.state.area = area;
        self.paint(frame.buffer_mut(), area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::testing::HostFixture;
    use crate::stage::{Anchor, RectF};

    fn details() -> DetailsPage {
        DetailsPage::new()
    }

    fn route(id: &str) -> RouteData {
        RouteData {
            id: Some(id.to_string()),
        }
    }

    fn register_home_anchor(fx: &mut HostFixture, id: &str) {
        fx.stage.register_anchor(
            PageTag::Home,
            id,
            Anchor {
                rect: RectF::new(2.0, 8.0, 4.0, 1.0),
                face: AvatarFace {
                    initials: "AO".to_string(),
                    color: [198, 86, 86],
                },
            },
        );
    }

    #[test]
    fn test_entrance_leaves_no_copy_and_reveals_avatar() {
        let mut fx = HostFixture::new();
        register_home_anchor(&mut fx, "amara");
        let mut page = details();

        let mut transition = {
            let mut host = fx.host();
            page.before_show(&mut host, &route("amara")).unwrap()
        };
        assert_eq!(fx.stage.sprite_count(), 1);

        {
            let mut host = fx.host();
            page.show(&mut host, &route("amara"), &mut transition).unwrap();
        }

        assert_eq!(fx.stage.sprite_count(), 0);
        assert!(page.avatar_visible);
        assert_eq!(page.heading, "Amara Okafor");
        assert!(fx.frames.frames_presented > 0);
    }

    #[test]
    fn test_missing_route_id_skips_preparation() {
        let mut fx = HostFixture::new();
        let mut page = details();

        let mut transition = {
            let mut host = fx.host();
            page.before_show(&mut host, &RouteData::default()).unwrap()
        };
        assert!(transition.is_none());
        assert_eq!(fx.stage.sprite_count(), 0);

        {
            let mut host = fx.host();
            page.show(&mut host, &RouteData::default(), &mut transition)
                .unwrap();
        }

        assert_eq!(fx.toaster.messages(), vec!["🔍 Unable to find person."]);
        assert_eq!(fx.nav.front(), Some(&Route::Home));
    }

    #[test]
    fn test_unknown_person_takes_not_found_path() {
        let mut fx = HostFixture::new();
        let mut page = details();

        let mut transition = {
            let mut host = fx.host();
            page.before_show(&mut host, &route("nobody")).unwrap()
        };

        {
            let mut host = fx.host();
            page.show(&mut host, &route("nobody"), &mut transition).unwrap();
        }

        assert!(!fx.toaster.is_empty());
        assert_eq!(fx.nav.front(), Some(&Route::Home));
    }

    #[test]
    fn test_missing_anchor_degrades_to_no_animation() {
        let mut fx = HostFixture::new();
        let mut page = details();

        let mut transition = {
            let mut host = fx.host();
            page.before_show(&mut host, &route("amara")).unwrap()
        };
        let t = transition.as_ref().unwrap();
        assert!(t.avatar_copy.is_none());
        assert!(t.person.is_some());

        {
            let mut host = fx.host();
            page.show(&mut host, &route("amara"), &mut transition).unwrap();
        }

        assert_eq!(page.heading, "Amara Okafor");
        assert!(page.avatar_visible);
        assert_eq!(fx.frames.frames_presented, 0);
    }

    #[test]
    fn test_repository_failure_propagates() {
        use crate::model::PersonRepository;
        use std::path::Path;

        let mut fx =
            HostFixture::with_repo(PersonRepository::new(Some(Path::new("/nonexistent.json"))));
        let mut page = details();

        let mut host = fx.host();
        assert!(page.before_show(&mut host, &route("amara")).is_err());
    }

    #[test]
    fn test_remove_avatar_copy_is_idempotent() {
        let mut fx = HostFixture::new();
        let id = fx.stage.attach(Sprite::new(
            RectF::new(0.0, 0.0, 4.0, 1.0),
            AvatarFace {
                initials: "AO".to_string(),
                color: [198, 86, 86],
            },
        ));
        let mut slot = Some(id);

        DetailsPage::remove_avatar_copy(&mut fx.stage, &mut slot);
        assert_eq!(fx.stage.sprite_count(), 0);
        assert!(slot.is_none());

        DetailsPage::remove_avatar_copy(&mut fx.stage, &mut slot);
        assert_eq!(fx.stage.sprite_count(), 0);
    }

    #[test]
    fn test_hide_without_copy_skips_fade_but_hides() {
        let mut fx = HostFixture::new();
        let mut page = details();

        {
            let mut host = fx.host();
            let mut transition = Some(Transition::default());
            page.show(&mut host, &route("amara"), &mut transition).unwrap();
        }

        let mut transition = Some(Transition::default());
        {
            let mut host = fx.host();
            page.hide(&mut host, &mut transition).unwrap();
        }

        assert_eq!(fx.frames.frames_presented, 0);
        assert!(!page.state.visible);
    }

    #[test]
    fn test_hide_fades_and_removes_leftover_copy() {
        let mut fx = HostFixture::new();
        register_home_anchor(&mut fx, "nobody-with-anchor");
        let mut page = details();

        // Person lookup misses but the anchor exists, so a copy is
        // attached and the not-found path leaves it for hide to clean up.
        let mut transition = {
            let mut host = fx.host();
            page.before_show(&mut host, &route("nobody-with-anchor")).unwrap()
        };
        assert_eq!(fx.stage.sprite_count(), 1);

        {
            let mut host = fx.host();
            page.show(&mut host, &route("nobody-with-anchor"), &mut transition)
                .unwrap();
        }
        assert_eq!(fx.stage.sprite_count(), 1);

        {
            let mut host = fx.host();
            page.hide(&mut host, &mut transition).unwrap();
        }
        assert_eq!(fx.stage.sprite_count(), 0);
        assert!(fx.frames.frames_presented > 0);
        assert!(transition.unwrap().avatar_copy.is_none());
    }

    #[test]
    fn test_escape_navigates_home() {
        let mut page = details();
        let action = page.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::NavigateHome));
    }
}
