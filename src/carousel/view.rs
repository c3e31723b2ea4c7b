use raylib::prelude::*;

use crate::carousel::layout::{Circle, Control, Layout};
use crate::carousel::slide::{cover_source, fade, Slide};

const SLATE: Color = Color::new(15, 23, 42, 255);
const PURPLE_DARK: Color = Color::new(88, 28, 135, 255);
const PURPLE: Color = Color::new(192, 132, 252, 255);
const PURPLE_LIGHT: Color = Color::new(233, 213, 255, 255);
const PINK: Color = Color::new(236, 72, 153, 255);
const PINK_LIGHT: Color = Color::new(244, 114, 182, 255);
pub const STAGE_BACKDROP: Color = Color::new(0, 0, 0, 51);

/// Slate to purple and back, top to bottom.
pub fn draw_background(d: &mut impl RaylibDraw, width: i32, height: i32) {
    let half = height / 2;
    d.draw_rectangle_gradient_v(0, 0, width, half, SLATE, PURPLE_DARK);
    d.draw_rectangle_gradient_v(0, half, width, height - half, PURPLE_DARK, SLATE);
}

/// A faint track with two arcs chasing each other around it.
pub fn draw_spinner(d: &mut impl RaylibDraw, center: Vector2, angle: f32) {
    d.draw_ring(center, 36.0, 40.0, 0.0, 360.0, 48, fade(PURPLE_LIGHT, 0.8));
    d.draw_ring(center, 36.0, 40.0, angle, angle + 90.0, 24, PURPLE);
    d.draw_ring(center, 36.0, 40.0, angle - 54.0, angle + 36.0, 24, PINK);
}

fn draw_button(d: &mut impl RaylibDraw, button: &Circle, hovered: bool) {
    let (radius, alpha) = if hovered { (button.radius * 1.1, 0.3) } else { (button.radius, 0.2) };
    d.draw_circle_v(button.center, radius, fade(Color::WHITE, alpha));
}

fn glyph_color(hovered: bool) -> Color {
    if hovered { PURPLE_LIGHT } else { Color::WHITE }
}

/// Chevron pointing left (`direction` -1) or right (1).
pub fn draw_arrow(d: &mut impl RaylibDraw, button: &Circle, direction: f32, hovered: bool) {
    draw_button(d, button, hovered);
    let c = button.center;
    let size = button.radius * 0.35;
    let tip = Vector2::new(c.x + direction * size * 0.6, c.y);
    let top = Vector2::new(c.x - direction * size * 0.6, c.y - size);
    let bottom = Vector2::new(c.x - direction * size * 0.6, c.y + size);
    let color = glyph_color(hovered);
    d.draw_line_ex(top, tip, 3.0, color);
    d.draw_line_ex(tip, bottom, 3.0, color);
}

/// Pause bars while playing, play triangle while paused.
pub fn draw_toggle(d: &mut impl RaylibDraw, button: &Circle, playing: bool, hovered: bool) {
    draw_button(d, button, hovered);
    let c = button.center;
    let size = button.radius * 0.4;
    let color = glyph_color(hovered);
    if playing {
        let bar = size * 0.45;
        d.draw_rectangle_rec(Rectangle::new(c.x - size * 0.7, c.y - size, bar, size * 2.0), color);
        d.draw_rectangle_rec(Rectangle::new(c.x + size * 0.7 - bar, c.y - size, bar, size * 2.0), color);
    } else {
        // Counter-clockwise winding.
        d.draw_triangle(
            Vector2::new(c.x - size * 0.6, c.y - size),
            Vector2::new(c.x - size * 0.6, c.y + size),
            Vector2::new(c.x + size, c.y),
            color,
        );
    }
}

pub fn draw_dots(d: &mut impl RaylibDraw, dots: &[Circle], current: usize, hovered: Option<usize>) {
    for (i, dot) in dots.iter().enumerate() {
        let (scale, color) = if i == current {
            (1.25, Color::WHITE)
        } else if hovered == Some(i) {
            (1.1, fade(Color::WHITE, 0.75))
        } else {
            (1.0, fade(Color::WHITE, 0.5))
        };
        d.draw_circle_v(dot.center, dot.radius * scale, color);
    }
}

pub fn draw_progress(d: &mut impl RaylibDraw, track: Rectangle, fraction: f32) {
    d.draw_rectangle_rec(track, fade(Color::WHITE, 0.2));
    let width = (track.width * fraction.clamp(0.0, 1.0)) as i32;
    d.draw_rectangle_gradient_h(track.x as i32, track.y as i32, width, track.height as i32, PURPLE, PINK_LIGHT);
}

pub fn draw_thumbnails(
    d: &mut impl RaylibDraw,
    thumbnails: &[Rectangle],
    slides: &[Slide],
    current: usize,
    hovered: Option<usize>,
) {
    for (i, (rect, slide)) in thumbnails.iter().zip(slides).enumerate() {
        let (scale, ring, ring_color) = if i == current {
            (1.1, 4.0, PURPLE)
        } else if hovered == Some(i) {
            (1.05, 2.0, fade(Color::WHITE, 0.4))
        } else {
            (1.0, 2.0, fade(Color::WHITE, 0.2))
        };

        let w = rect.width * scale;
        let h = rect.height * scale;
        let dest = Rectangle::new(rect.x - (w - rect.width) * 0.5, rect.y - (h - rect.height) * 0.5, w, h);

        match slide.texture() {
            Some(texture) => {
                let source = cover_source(texture.width() as f32, texture.height() as f32, w, h);
                d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
            }
            None => d.draw_rectangle_rec(dest, fade(Color::WHITE, 0.1)),
        }

        let outline = Rectangle::new(dest.x - ring, dest.y - ring, dest.width + 2.0 * ring, dest.height + 2.0 * ring);
        d.draw_rectangle_lines_ex(outline, ring, ring_color);
    }
}

/// Draw everything that sits on top of the slides.
pub fn draw_controls(
    d: &mut impl RaylibDraw,
    layout: &Layout,
    slides: &[Slide],
    current: usize,
    autoplay: bool,
    progress: f32,
    hovered: Option<Control>,
) {
    draw_arrow(d, &layout.previous_arrow, -1.0, hovered == Some(Control::PreviousArrow));
    draw_arrow(d, &layout.next_arrow, 1.0, hovered == Some(Control::NextArrow));
    draw_toggle(d, &layout.toggle, autoplay, hovered == Some(Control::AutoplayToggle));

    let hovered_dot = match hovered {
        Some(Control::Dot(i)) => Some(i),
        _ => None,
    };
    draw_dots(d, &layout.dots, current, hovered_dot);

    if autoplay {
        draw_progress(d, layout.progress_track, progress);
    }

    let hovered_thumb = match hovered {
        Some(Control::Thumbnail(i)) => Some(i),
        _ => None,
    };
    draw_thumbnails(d, &layout.thumbnails, slides, current, hovered_thumb);
}
