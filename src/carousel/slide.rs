use raylib::prelude::*;

use crate::carousel::state::Placement;
use crate::catalog::ImageRecord;
use crate::constants::*;

const PLACEHOLDER: Color = Color::new(30, 27, 48, 255);

pub struct Slide {
    pub record: ImageRecord,
    texture: Option<Texture2D>,
    failed: bool,

    placement: Placement,
    offset: f32,
    opacity: f32,
    scale: f32,

    end_offset: f32,
    end_opacity: f32,
    end_scale: f32,

    animation_timer: f32,
    pub is_animating: bool,
    // Time on stage, drives the caption fade-in.
    current_for: f32,

    tween_offset: Option<ease::Tween>,
    tween_opacity: Option<ease::Tween>,
    tween_scale: Option<ease::Tween>,
}

impl Slide {
    pub fn new(record: ImageRecord, placement: Placement) -> Self {
        Self {
            record,
            texture: None,
            failed: false,

            placement,
            offset: placement.offset(),
            opacity: placement.opacity(),
            scale: placement.scale(),

            end_offset: placement.offset(),
            end_opacity: placement.opacity(),
            end_scale: placement.scale(),

            animation_timer: 0.0,
            is_animating: false,
            current_for: 0.0,

            tween_offset: None,
            tween_opacity: None,
            tween_scale: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture2D) {
        self.texture = Some(texture);
        self.failed = false;
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Animate toward `placement`, starting from wherever the slide is now.
    pub fn move_to(&mut self, placement: Placement) {
        if placement == self.placement {
            return;
        }
        if placement == Placement::Current {
            self.current_for = 0.0;
        }
        self.placement = placement;
        self.end_offset = placement.offset();
        self.end_opacity = placement.opacity();
        self.end_scale = placement.scale();

        self.tween_offset = Some(ease::Tween::new(ease::cubic_in_out, self.offset, self.end_offset, TRANSITION_DURATION));
        self.tween_opacity = Some(ease::Tween::new(ease::cubic_in_out, self.opacity, self.end_opacity, TRANSITION_DURATION));
        self.tween_scale = Some(ease::Tween::new(ease::cubic_in_out, self.scale, self.end_scale, TRANSITION_DURATION));
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    pub fn update(&mut self, dt: f32) {
        if self.placement == Placement::Current {
            self.current_for += dt;
        }
        if !self.is_animating {
            return;
        }

        if let (Some(offset), Some(opacity), Some(scale)) =
            (self.tween_offset.as_mut(), self.tween_opacity.as_mut(), self.tween_scale.as_mut())
        {
            self.offset = offset.apply(dt);
            self.opacity = opacity.apply(dt);
            self.scale = scale.apply(dt);
        }

        self.animation_timer += dt;
        if self.animation_timer >= TRANSITION_DURATION {
            self.is_animating = false;
            self.offset = self.end_offset;
            self.opacity = self.end_opacity;
            self.scale = self.end_scale;
        }
    }

    /// Caption opacity: each line fades in after its delay on stage.
    pub fn caption_alpha(&self, delay: f32) -> f32 {
        if self.placement != Placement::Current {
            return 0.0;
        }
        let t = ((self.current_for - delay) / TEXT_FADE_DURATION).clamp(0.0, 1.0);
        t * self.opacity
    }

    /// Destination of the slide for a stage, after offset and scale.
    pub fn dest(&self, stage: Rectangle) -> Rectangle {
        let width = stage.width * self.scale;
        let height = stage.height * self.scale;
        Rectangle::new(
            stage.x + self.offset * stage.width - (width - stage.width) * 0.5,
            stage.y - (height - stage.height) * 0.5,
            width,
            height,
        )
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, stage: Rectangle, large_text: bool) {
        if self.opacity <= 0.0 {
            return;
        }
        let dest = self.dest(stage);

        match &self.texture {
            Some(texture) => {
                let source = cover_source(texture.width() as f32, texture.height() as f32, dest.width, dest.height);
                d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, fade(Color::WHITE, self.opacity));
            }
            None => {
                d.draw_rectangle_rec(dest, fade(PLACEHOLDER, self.opacity));
                if self.failed {
                    d.draw_text(
                        "image unavailable",
                        (dest.x + 32.0) as i32,
                        (dest.y + 32.0) as i32,
                        20,
                        fade(Color::LIGHTGRAY, self.opacity),
                    );
                }
            }
        }

        // Bottom half darkens toward the caption.
        d.draw_rectangle_gradient_v(
            dest.x as i32,
            (dest.y + dest.height * 0.5) as i32,
            dest.width as i32,
            (dest.height * 0.5).ceil() as i32,
            Color::new(0, 0, 0, 0),
            fade(Color::BLACK, 0.6 * self.opacity),
        );

        let (title_size, description_size) = if large_text { (48, 20) } else { (30, 18) };
        let x = (stage.x + 32.0) as i32;
        let description_y = (stage.y + stage.height - 32.0) as i32 - description_size;
        let title_y = description_y - 8 - title_size;

        d.draw_text(&self.record.title, x, title_y, title_size, fade(Color::WHITE, self.caption_alpha(TITLE_DELAY)));
        if !self.record.description.is_empty() {
            d.draw_text(
                &self.record.description,
                x,
                description_y,
                description_size,
                fade(Color::WHITE, 0.9 * self.caption_alpha(DESCRIPTION_DELAY)),
            );
        }
    }
}

/// Centered crop of a texture that fills `dest_width` x `dest_height`
/// without distortion.
pub fn cover_source(tex_width: f32, tex_height: f32, dest_width: f32, dest_height: f32) -> Rectangle {
    if tex_width <= 0.0 || tex_height <= 0.0 || dest_width <= 0.0 || dest_height <= 0.0 {
        return Rectangle::new(0.0, 0.0, tex_width, tex_height);
    }
    let scale = (dest_width / tex_width).max(dest_height / tex_height);
    let width = dest_width / scale;
    let height = dest_height / scale;
    Rectangle::new((tex_width - width) * 0.5, (tex_height - height) * 0.5, width, height)
}

pub fn fade(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(placement: Placement) -> Slide {
        Slide::new(ImageRecord::new(1, "a.png", "A", "first"), placement)
    }

    fn settle(slide: &mut Slide) {
        for _ in 0..60 {
            slide.update(1.0 / 60.0);
        }
    }

    #[test]
    fn starts_at_rest() {
        let s = slide(Placement::Next);
        assert!(!s.is_animating);
        assert_eq!(s.offset(), 1.0);
        assert_eq!(s.opacity(), 0.0);
    }

    #[test]
    fn moving_to_current_settles_on_stage() {
        let mut s = slide(Placement::Next);
        s.move_to(Placement::Current);
        assert!(s.is_animating);

        s.update(TRANSITION_DURATION / 2.0);
        assert!(s.offset() > 0.0 && s.offset() < 1.0);

        settle(&mut s);
        assert!(!s.is_animating);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.opacity(), 1.0);
        assert_eq!(s.scale(), 1.0);
    }

    #[test]
    fn leaving_slide_exits_left() {
        let mut s = slide(Placement::Current);
        s.move_to(Placement::Previous);
        settle(&mut s);
        assert_eq!(s.offset(), -1.0);
        assert_eq!(s.opacity(), 0.0);
        assert_eq!(s.scale(), INACTIVE_SCALE);
    }

    #[test]
    fn same_placement_does_not_restart() {
        let mut s = slide(Placement::Current);
        s.move_to(Placement::Current);
        assert!(!s.is_animating);
    }

    #[test]
    fn captions_fade_in_after_delay() {
        let mut s = slide(Placement::Current);
        s.update(TITLE_DELAY / 2.0);
        assert_eq!(s.caption_alpha(TITLE_DELAY), 0.0);

        s.update(TITLE_DELAY + TEXT_FADE_DURATION);
        assert_eq!(s.caption_alpha(TITLE_DELAY), 1.0);
        assert!(s.caption_alpha(DESCRIPTION_DELAY) > 0.0);

        assert_eq!(slide(Placement::Next).caption_alpha(0.0), 0.0);
    }

    #[test]
    fn dest_scales_around_stage_center() {
        let mut s = slide(Placement::Next);
        s.move_to(Placement::Current);
        settle(&mut s);
        let stage = Rectangle::new(100.0, 50.0, 800.0, 400.0);
        assert_eq!(s.dest(stage), stage);

        let off = slide(Placement::Previous).dest(stage);
        assert!((off.x - (100.0 - 800.0 - 20.0)).abs() < 1e-3);
        assert!((off.width - 840.0).abs() < 1e-3);
    }

    #[test]
    fn cover_crops_the_long_side() {
        let wide = cover_source(2000.0, 1000.0, 1000.0, 1000.0);
        assert_eq!(wide, Rectangle::new(500.0, 0.0, 1000.0, 1000.0));

        let tall = cover_source(1000.0, 2000.0, 1000.0, 500.0);
        assert_eq!(tall, Rectangle::new(0.0, 750.0, 1000.0, 500.0));
    }

    #[test]
    fn fade_scales_alpha() {
        assert_eq!(fade(Color::WHITE, 0.5).a, 127);
        assert_eq!(fade(Color::WHITE, 2.0).a, 255);
    }
}
