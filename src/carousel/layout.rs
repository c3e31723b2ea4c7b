use raylib::prelude::*;

use crate::constants::WIDE_SCREEN;
use crate::input::Action;

const MARGIN: f32 = 16.0;
const MAX_STAGE_WIDTH: f32 = 1152.0;
const MAX_STAGE_HEIGHT: f32 = 600.0;
const MIN_STAGE_HEIGHT: f32 = 120.0;
const ARROW_RADIUS: f32 = 24.0;
const TOGGLE_RADIUS: f32 = 22.0;
const DOT_RADIUS: f32 = 6.0;
const DOT_GAP: f32 = 8.0;
const PROGRESS_HEIGHT: f32 = 4.0;
const THUMB_SIZE: f32 = 96.0;
const THUMB_SIZE_SMALL: f32 = 80.0;
const THUMB_GAP: f32 = 16.0;
const THUMB_TOP: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f32,
}

impl Circle {
    fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vector2::new(x, y),
            radius,
        }
    }

    pub fn contains(&self, p: Vector2) -> bool {
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

pub fn contains(rec: &Rectangle, p: Vector2) -> bool {
    p.x >= rec.x && p.x <= rec.x + rec.width && p.y >= rec.y && p.y <= rec.y + rec.height
}

/// A clickable element of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    PreviousArrow,
    NextArrow,
    AutoplayToggle,
    Dot(usize),
    Thumbnail(usize),
}

impl Control {
    pub fn action(self) -> Action {
        match self {
            Control::PreviousArrow => Action::Previous,
            Control::NextArrow => Action::Next,
            Control::AutoplayToggle => Action::ToggleAutoplay,
            Control::Dot(i) | Control::Thumbnail(i) => Action::Select(i),
        }
    }
}

/// Screen geometry of the stage and every control, recomputed each frame
/// from the window size.
#[derive(Debug, Clone)]
pub struct Layout {
    pub stage: Rectangle,
    pub previous_arrow: Circle,
    pub next_arrow: Circle,
    pub toggle: Circle,
    pub dots: Vec<Circle>,
    pub progress_track: Rectangle,
    pub thumbnails: Vec<Rectangle>,
}

impl Layout {
    pub fn compute(screen_width: f32, screen_height: f32, count: usize, current: usize) -> Self {
        let thumb = if screen_width < WIDE_SCREEN { THUMB_SIZE_SMALL } else { THUMB_SIZE };
        // Room for the enlarged current thumbnail and its ring.
        let thumb_row = THUMB_TOP + thumb * 1.1 + MARGIN;

        let stage_width = (screen_width - 2.0 * MARGIN).clamp(1.0, MAX_STAGE_WIDTH);
        let stage_height = (screen_height - 2.0 * MARGIN - thumb_row).clamp(MIN_STAGE_HEIGHT, MAX_STAGE_HEIGHT);
        let top = ((screen_height - stage_height - thumb_row) * 0.5).max(MARGIN);
        let stage = Rectangle::new((screen_width - stage_width) * 0.5, top, stage_width, stage_height);

        let center_y = stage.y + stage.height * 0.5;
        let right = stage.x + stage.width;
        let bottom = stage.y + stage.height;

        let previous_arrow = Circle::new(stage.x + MARGIN + ARROW_RADIUS, center_y, ARROW_RADIUS);
        let next_arrow = Circle::new(right - MARGIN - ARROW_RADIUS, center_y, ARROW_RADIUS);
        let toggle = Circle::new(right - MARGIN - TOGGLE_RADIUS, stage.y + MARGIN + TOGGLE_RADIUS, TOGGLE_RADIUS);

        let dots_width = count as f32 * 2.0 * DOT_RADIUS + count.saturating_sub(1) as f32 * DOT_GAP;
        let dots_x = stage.x + (stage.width - dots_width) * 0.5 + DOT_RADIUS;
        let dots_y = bottom - MARGIN - DOT_RADIUS;
        let dots = (0..count)
            .map(|i| Circle::new(dots_x + i as f32 * (2.0 * DOT_RADIUS + DOT_GAP), dots_y, DOT_RADIUS))
            .collect();

        let progress_track = Rectangle::new(stage.x, bottom - PROGRESS_HEIGHT, stage.width, PROGRESS_HEIGHT);

        let thumbs_width = count as f32 * thumb + count.saturating_sub(1) as f32 * THUMB_GAP;
        let thumbs_x = thumb_row_start(screen_width, thumbs_width, thumb, current);
        let thumbs_y = bottom + THUMB_TOP;
        let thumbnails = (0..count)
            .map(|i| Rectangle::new(thumbs_x + i as f32 * (thumb + THUMB_GAP), thumbs_y, thumb, thumb))
            .collect();

        Self {
            stage,
            previous_arrow,
            next_arrow,
            toggle,
            dots,
            progress_track,
            thumbnails,
        }
    }

    /// The control under `p`, if any. Buttons drawn on top win.
    pub fn hit_test(&self, p: Vector2) -> Option<Control> {
        if self.toggle.contains(p) {
            return Some(Control::AutoplayToggle);
        }
        if self.previous_arrow.contains(p) {
            return Some(Control::PreviousArrow);
        }
        if self.next_arrow.contains(p) {
            return Some(Control::NextArrow);
        }
        if let Some(i) = self.dots.iter().position(|dot| dot.contains(p)) {
            return Some(Control::Dot(i));
        }
        self.thumbnails
            .iter()
            .position(|thumb| contains(thumb, p))
            .map(Control::Thumbnail)
    }
}

/// Left edge of the thumbnail row: centered when it fits, otherwise
/// scrolled to keep the current thumbnail in view.
fn thumb_row_start(screen_width: f32, row_width: f32, thumb: f32, current: usize) -> f32 {
    let available = screen_width - 2.0 * MARGIN;
    if row_width <= available {
        return (screen_width - row_width) * 0.5;
    }
    let current_center = current as f32 * (thumb + THUMB_GAP) + thumb * 0.5;
    let scroll = (current_center - available * 0.5).clamp(0.0, row_width - available);
    MARGIN - scroll
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(rec: &Rectangle) -> Vector2 {
        Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5)
    }

    #[test]
    fn stage_is_centered_and_capped() {
        let layout = Layout::compute(1600.0, 1000.0, 5, 0);
        assert_eq!(layout.stage.width, MAX_STAGE_WIDTH);
        assert_eq!(layout.stage.height, MAX_STAGE_HEIGHT);
        assert_eq!(layout.stage.x, (1600.0 - MAX_STAGE_WIDTH) * 0.5);
    }

    #[test]
    fn one_dot_and_thumbnail_per_image() {
        let layout = Layout::compute(1280.0, 860.0, 5, 0);
        assert_eq!(layout.dots.len(), 5);
        assert_eq!(layout.thumbnails.len(), 5);
    }

    #[test]
    fn controls_map_to_actions() {
        let layout = Layout::compute(1280.0, 860.0, 5, 0);

        let hit = |p| layout.hit_test(p).map(Control::action);
        assert_eq!(hit(layout.previous_arrow.center), Some(Action::Previous));
        assert_eq!(hit(layout.next_arrow.center), Some(Action::Next));
        assert_eq!(hit(layout.toggle.center), Some(Action::ToggleAutoplay));
        assert_eq!(hit(layout.dots[3].center), Some(Action::Select(3)));
        assert_eq!(hit(center(&layout.thumbnails[2])), Some(Action::Select(2)));
        assert_eq!(hit(center(&layout.stage)), None);
    }

    #[test]
    fn arrows_sit_inside_the_stage() {
        let layout = Layout::compute(1280.0, 860.0, 5, 0);
        assert!(contains(&layout.stage, layout.previous_arrow.center));
        assert!(contains(&layout.stage, layout.next_arrow.center));
        assert!(layout.previous_arrow.center.x < layout.next_arrow.center.x);
    }

    #[test]
    fn narrow_screens_use_small_thumbnails() {
        let layout = Layout::compute(600.0, 800.0, 3, 0);
        assert_eq!(layout.thumbnails[0].width, THUMB_SIZE_SMALL);
    }

    #[test]
    fn overflowing_thumbnails_scroll_to_current() {
        let layout = Layout::compute(640.0, 800.0, 20, 19);
        let last = layout.thumbnails[19];
        assert!(last.x + last.width <= 640.0 - MARGIN + 0.01);
        assert!(layout.thumbnails[0].x < 0.0);

        let first = Layout::compute(640.0, 800.0, 20, 0);
        assert_eq!(first.thumbnails[0].x, MARGIN);
    }

    #[test]
    fn circle_hit_is_round() {
        let circle = Circle::new(0.0, 0.0, 10.0);
        assert!(circle.contains(Vector2::new(6.0, 6.0)));
        assert!(!circle.contains(Vector2::new(8.0, 8.0)));
    }
}
