//! Stage - floating overlay surface shared by all pages
//!
//! The stage owns everything that renders above the current page: sprites
//! (fixed-position avatar overlays used during view transitions) and the
//! anchor registry that lets one page look up the on-screen rectangle of
//! an element owned by another page.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;

/// Float-precision rectangle in terminal cell coordinates
///
/// Animations interpolate sub-cell positions; rounding to whole cells
/// happens only at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RectF {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Round to a whole-cell rect, clamping negative positions to zero
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x.round().max(0.0) as u16,
            self.y.round().max(0.0) as u16,
            self.w.round().max(0.0) as u16,
            self.h.round().max(0.0) as u16,
        )
    }
}

impl From<Rect> for RectF {
    fn from(r: Rect) -> Self {
        Self::new(r.x as f64, r.y as f64, r.width as f64, r.height as f64)
    }
}

/// Which page registered an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageTag {
    Home,
    Details,
}

/// Visual content of an avatar cell: initials on a colored block
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarFace {
    pub initials: String,
    pub color: [u8; 3],
}

/// A fixed-position element attached to the stage body
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub rect: RectF,
    pub opacity: f64,
    pub face: AvatarFace,
}

impl Sprite {
    pub fn new(rect: RectF, face: AvatarFace) -> Self {
        Self {
            rect,
            opacity: 1.0,
            face,
        }
    }
}

/// Handle to an attached sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteId(u64);

/// A named element one page exposes for peers to clone: its on-screen
/// rect plus the content a clone of it should carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub rect: RectF,
    pub face: AvatarFace,
}

/// Overlay surface: attached sprites plus the cross-page anchor registry
#[derive(Debug, Default)]
pub struct Stage {
    next_id: u64,
    sprites: Vec<(SpriteId, Sprite)>,
    anchors: HashMap<(PageTag, String), Anchor>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sprite to the stage body, above all page content
    pub fn attach(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.sprites.push((id, sprite));
        id
    }

    /// Detach a sprite; returns it if it was still attached
    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        let pos = self.sprites.iter().position(|(sid, _)| *sid == id)?;
        Some(self.sprites.remove(pos).1)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, s)| s)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .map(|(_, s)| s)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Anchor registry (cross-page element lookup)
    // ─────────────────────────────────────────────────────────────────────

    /// Register a named anchor for a page. Pages re-register their
    /// visible anchors on every draw, so entries track scrolling.
    pub fn register_anchor(&mut self, tag: PageTag, name: &str, anchor: Anchor) {
        self.anchors.insert((tag, name.to_string()), anchor);
    }

    /// Drop all anchors a page registered. Called at the start of that
    /// page's draw so rows scrolled out of view stop resolving.
    pub fn clear_anchors(&mut self, tag: PageTag) {
        self.anchors.retain(|(t, _), _| *t != tag);
    }

    /// Look up a peer page's anchor. Absent page or name resolves to None.
    pub fn anchor(&self, tag: PageTag, name: &str) -> Option<&Anchor> {
        self.anchors.get(&(tag, name.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────

    /// Draw all attached sprites in attach order, clipped to the frame
    pub fn draw_sprites(&self, frame: &mut Frame) {
        for (_, sprite) in &self.sprites {
            draw_sprite(frame, sprite);
        }
    }
}

/// Scale an RGB color toward the terminal's black background.
/// Cell terminals have no alpha channel, so fading dims instead.
pub fn dim(color: [u8; 3], opacity: f64) -> Color {
    let o = opacity.clamp(0.0, 1.0);
    Color::Rgb(
        (color[0] as f64 * o) as u8,
        (color[1] as f64 * o) as u8,
        (color[2] as f64 * o) as u8,
    )
}

fn draw_sprite(frame: &mut Frame, sprite: &Sprite) {
    let area = sprite.rect.to_rect().intersection(frame.area());
    if area.width == 0 || area.height == 0 {
        return;
    }

    let bg = dim(sprite.face.color, sprite.opacity);
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

    // Center the initials if the block is big enough to hold them
    let initials = sprite.face.initials.as_str();
    if area.width as usize >= initials.len() && area.height >= 1 {
        let line = Line::from(Span::styled(
            initials.to_string(),
            Style::default()
                .fg(dim([255, 255, 255], sprite.opacity))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        let x = area.x + (area.width - initials.len() as u16) / 2;
        let y = area.y + area.height / 2;
        let text_area = Rect::new(x, y, initials.len() as u16, 1);
        frame.render_widget(Paragraph::new(line), text_area);
    }
}
