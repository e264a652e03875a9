//! Home page - the people list
//!
//! Each row shows an avatar cell (initials on the person's color) next
//! to the name and role. While drawing, the page registers every visible
//! avatar's rect and content in the stage anchor registry so the details
//! page can clone it for the entrance transition.

use crate::action::Action;
use crate::components::layout::{home_list_area, LIST_AVATAR_WIDTH};
use crate::model::Person;
use crate::section::{Section, SectionState};
use crate::stage::{dim, Anchor, AvatarFace, PageTag, Stage};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct HomePage {
    state: SectionState,
    people: Vec<Person>,
    selected: usize,
    offset: usize,
}

impl HomePage {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            state: SectionState::default(),
            people,
            selected: 0,
            offset: 0,
        }
    }

    pub fn selected_person(&self) -> Option<&Person> {
        self.people.get(self.selected)
    }

    fn select_next(&mut self) {
        if !self.people.is_empty() && self.selected + 1 < self.people.len() {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_first(&mut self) {
        self.selected = 0;
    }

    fn select_last(&mut self) {
        self.selected = self.people.len().saturating_sub(1);
    }

    /// Keep the selected row inside the visible window
    fn scroll_into_view(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
    }

    fn avatar_face(person: &Person) -> AvatarFace {
        AvatarFace {
            initials: person.initials(),
            color: person.color,
        }
    }

    /// Avatar cell of a row, clipped to the row
    fn row_avatar_area(row_area: Rect) -> Rect {
        Rect::new(row_area.x + 1, row_area.y, LIST_AVATAR_WIDTH, 1).intersection(row_area)
    }

    fn draw_row(frame: &mut Frame, person: &Person, row_area: Rect, selected: bool) {
        let face = Self::avatar_face(person);
        let avatar_area = Self::row_avatar_area(row_area);
        if avatar_area.width == 0 {
            return;
        }

        let avatar_style = Style::default()
            .fg(Color::White)
            .bg(dim(face.color, 1.0))
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(format!(
                "{:^width$}",
                face.initials,
                width = avatar_area.width as usize
            ))
            .style(avatar_style),
            avatar_area,
        );

        let text_x = avatar_area.right() + 1;
        if text_x >= row_area.right() {
            return;
        }
        let text_area = Rect::new(text_x, row_area.y, row_area.right() - text_x, 1);

        let name_style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(222, 196, 120))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", person.name), name_style),
            Span::styled(
                format!(" {}", person.role),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), text_area);
    }
}

impl Section for HomePage {
    fn state(&mut self) -> &mut SectionState {
        &mut self.state
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextPerson),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevPerson),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPerson),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastPerson),
            KeyCode::Enter => self
                .selected_person()
                .map(|p| Action::NavigateDetails(p.id.clone())),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::NextPerson => self.select_next(),
            Action::PrevPerson => self.select_prev(),
            Action::FirstPerson => self.select_first(),
            Action::LastPerson => self.select_last(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, stage: &mut Stage) -> Result<()> {
        self.state.area = area;
        stage.clear_anchors(PageTag::Home);
        if area.width == 0 || area.height == 0 {
            return Ok(());
        }

        let title = Line::from(vec![
            Span::styled(
                " People",
                Style::default()
                    .fg(Color::Rgb(222, 196, 120))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} in the directory", self.people.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(title),
            Rect::new(area.x, area.y, area.width, 1),
        );

        let list_area = home_list_area(area);
        let rows = list_area.height as usize;
        self.scroll_into_view(rows);

        for (row, person) in self.people.iter().skip(self.offset).take(rows).enumerate() {
            let row_area = Rect::new(list_area.x, list_area.y + row as u16, list_area.width, 1);
            let avatar_area = Self::row_avatar_area(row_area);
            if avatar_area.width > 0 {
                stage.register_anchor(
                    PageTag::Home,
                    &person.id,
                    Anchor {
                        rect: avatar_area.into(),
                        face: Self::avatar_face(person),
                    },
                );
            }
            let selected = self.offset + row == self.selected;
            Self::draw_row(frame, person, row_area, selected);
        }

        let hint = Line::from(Span::styled(
            " ↑/↓ move   Enter open   q quit",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(
            Paragraph::new(hint),
            Rect::new(area.x, area.bottom() - 1, area.width, 1),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_people;

    fn page() -> HomePage {
        HomePage::new(sample_people())
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut home = page();
        let count = sample_people().len();

        home.update(&Action::PrevPerson).unwrap();
        assert_eq!(home.selected_person().unwrap().id, "amara");

        for _ in 0..count + 5 {
            home.update(&Action::NextPerson).unwrap();
        }
        assert_eq!(home.selected, count - 1);

        home.update(&Action::FirstPerson).unwrap();
        assert_eq!(home.selected, 0);

        home.update(&Action::LastPerson).unwrap();
        assert_eq!(home.selected, count - 1);
    }

    #[test]
    fn test_enter_navigates_to_selected_person() {
        let mut home = page();
        home.update(&Action::NextPerson).unwrap();

        let action = home
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        assert_eq!(action, Some(Action::NavigateDetails("bjorn".to_string())));
    }

    #[test]
    fn test_enter_with_no_people_is_noop() {
        let mut home = HomePage::new(Vec::new());
        let action = home
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut home = page();
        home.select_last();
        home.scroll_into_view(3);
        assert_eq!(home.offset, sample_people().len() - 3);

        home.select_first();
        home.scroll_into_view(3);
        assert_eq!(home.offset, 0);
    }
}
