//! Animation utilities for stage sprites
//!
//! `fade` and `move_to` are synchronous from the caller's point of view:
//! they pump frames through a `Frames` sink until the animation completes,
//! so the caller resumes only once the sprite has reached its target.

use crate::stage::{RectF, SpriteId, Stage};
use anyhow::Result;
use ratatui::buffer::Buffer;
use std::time::{Duration, Instant};

/// Default duration when a caller does not supply one
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Scale-and-translate descriptor between two rects.
///
/// `h`/`w` are ratios of the source box over the destination box, `x`/`y`
/// are deltas of the top-left corners. Applying a diff to the destination
/// rect yields the source rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diff {
    pub h: f64,
    pub w: f64,
    pub x: f64,
    pub y: f64,
}

/// Compute the diff that maps `dest` onto `src`
pub fn calculate_diff(src: RectF, dest: RectF) -> Diff {
    Diff {
        h: src.h / dest.h,
        w: src.w / dest.w,
        x: src.x - dest.x,
        y: src.y - dest.y,
    }
}

/// Render/clock port for frame-pumped animations.
///
/// The terminal implementation presents a frame and paces to the frame
/// rate; tests drive a mock clock so animations complete instantly.
pub trait Frames {
    fn now(&self) -> Instant;

    /// Present one frame: the previously set backdrop with the stage's
    /// sprites composited on top.
    fn frame(&mut self, stage: &Stage) -> Result<()>;

    /// Replace the static page content drawn behind the sprites
    fn set_backdrop(&mut self, backdrop: Buffer);

    /// When true, animations jump to their end state in a single frame
    fn reduced_motion(&self) -> bool {
        false
    }
}

pub struct FadeParams {
    pub id: SpriteId,
    pub to: f64,
    pub duration: Option<Duration>,
}

pub struct MoveParams {
    pub id: SpriteId,
    pub to: Diff,
    pub duration: Option<Duration>,
}

/// Animate a sprite's opacity to `to`. Completes immediately if the
/// sprite is no longer attached.
pub fn fade(frames: &mut dyn Frames, stage: &mut Stage, params: FadeParams) -> Result<()> {
    let Some(sprite) = stage.sprite(params.id) else {
        return Ok(());
    };
    let from = sprite.opacity;
    let duration = params.duration.unwrap_or(DEFAULT_DURATION);

    run(frames, stage, duration, |stage, eased| {
        if let Some(sprite) = stage.sprite_mut(params.id) {
            sprite.opacity = from + (params.to - from) * eased;
        }
    })
}

/// Animate a sprite by a scale-and-translate diff: the target rect is the
/// sprite's current rect with the diff applied.
pub fn move_to(frames: &mut dyn Frames, stage: &mut Stage, params: MoveParams) -> Result<()> {
    let Some(sprite) = stage.sprite(params.id) else {
        return Ok(());
    };
    let from = sprite.rect;
    let to = RectF::new(
        from.x + params.to.x,
        from.y + params.to.y,
        from.w * params.to.w,
        from.h * params.to.h,
    );
    let duration = params.duration.unwrap_or(DEFAULT_DURATION);

    run(frames, stage, duration, |stage, eased| {
        if let Some(sprite) = stage.sprite_mut(params.id) {
            sprite.rect = RectF::new(
                lerp(from.x, to.x, eased),
                lerp(from.y, to.y, eased),
                lerp(from.w, to.w, eased),
                lerp(from.h, to.h, eased),
            );
        }
    })
}

/// Pump frames until the animation's clock runs out, applying the
/// interpolation step before each presented frame. The final step always
/// runs with eased progress 1.0.
fn run(
    frames: &mut dyn Frames,
    stage: &mut Stage,
    duration: Duration,
    mut step: impl FnMut(&mut Stage, f64),
) -> Result<()> {
    let start = frames.now();
    loop {
        let t = if duration.is_zero() || frames.reduced_motion() {
            1.0
        } else {
            let elapsed = frames.now().saturating_duration_since(start);
            (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };

        step(stage, ease_in_out_quad(t));
        frames.frame(stage)?;

        if t >= 1.0 {
            return Ok(());
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
