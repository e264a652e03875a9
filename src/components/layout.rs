//! Layout helpers shared by the pages

use ratatui::layout::Rect;

/// Width of an avatar cell in a home list row
pub const LIST_AVATAR_WIDTH: u16 = 4;

/// The details page's avatar block, positioned inside the page border.
/// Shrinks via intersection when the terminal is small.
pub fn avatar_rect(area: Rect) -> Rect {
    let block = Rect::new(
        area.x.saturating_add(3),
        area.y.saturating_add(2),
        14,
        5,
    );
    block.intersection(area)
}

/// Rows of the home list: everything between the two-line header and the
/// one-line footer hint.
pub fn home_list_area(area: Rect) -> Rect {
    let top = 2u16;
    let bottom = 1u16;
    if area.height <= top + bottom {
        return Rect::new(area.x, area.y, area.width, 0);
    }
    Rect::new(
        area.x,
        area.y + top,
        area.width,
        area.height - top - bottom,
    )
}
