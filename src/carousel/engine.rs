use std::time::Duration;

use anyhow::Context;
use raylib::prelude::*;

use crate::carousel::cursor::Cursor;
use crate::carousel::layout::{Control, Layout};
use crate::carousel::slide::Slide;
use crate::carousel::state::{CarouselState, Placement};
use crate::carousel::view;
use crate::catalog::{CatalogError, ImageRecord};
use crate::config::Settings;
use crate::constants::*;
use crate::fetcher::Fetcher;
use crate::input::{self, Action, SwipeTracker};
use crate::texture_loader;
use crate::timer::{Interval, Timeout};

pub struct CarouselEngine {
    state: CarouselState,
    cursor: Cursor,
    slides: Vec<Slide>,

    autoplay: Interval,
    loading: Timeout,
    swipe: SwipeTracker,

    fetcher: Option<Fetcher>,
    fetch_timeout: Duration,

    spinner_angle: f32,
}

impl CarouselEngine {
    pub fn new(records: Vec<ImageRecord>, settings: &Settings) -> Result<Self, CatalogError> {
        let cursor = Cursor::new(records.len(), settings.autoplay)
            .ok_or_else(|| CatalogError::Empty("catalog".to_string()))?;

        let predecessor = cursor.predecessor();
        let slides = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Slide::new(record, Placement::of(i, cursor.index(), predecessor)))
            .collect();

        Ok(Self {
            state: CarouselState::Loading,
            autoplay: Interval::new(settings.autoplay_interval, cursor.is_autoplay()),
            loading: Timeout::new(settings.loading_duration),
            swipe: SwipeTracker::new(settings.swipe_threshold),
            cursor,
            slides,
            fetcher: None,
            fetch_timeout: settings.fetch_timeout,
            spinner_angle: 0.0,
        })
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Apply this frame's actions and advance every timer and animation by `dt`.
    pub fn advance(&mut self, dt: f32, actions: &[Action]) {
        for action in actions {
            self.apply(*action);
        }

        if self.loading.tick(dt) {
            self.cursor.finish_loading();
            self.state = CarouselState::Browsing;
            log::debug!("loading finished");
        }

        for _ in 0..self.autoplay.tick(dt) {
            self.cursor.next();
            log::debug!("autoplay advanced to {}", self.cursor.index());
        }

        self.sync_placements();
        for slide in self.slides.iter_mut() {
            slide.update(dt);
        }
        self.spinner_angle = (self.spinner_angle + SPINNER_SPEED * dt) % 360.0;
    }

    fn apply(&mut self, action: Action) {
        self.cursor.apply(action);
        if action == Action::ToggleAutoplay {
            if self.cursor.is_autoplay() {
                self.autoplay.start();
            } else {
                self.autoplay.stop();
            }
            log::info!("autoplay {}", if self.cursor.is_autoplay() { "on" } else { "off" });
        }
    }

    fn sync_placements(&mut self) {
        let (current, predecessor) = (self.cursor.index(), self.cursor.predecessor());
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.move_to(Placement::of(i, current, predecessor));
        }
    }

    /// Upload whatever the fetch worker finished since the last frame.
    fn receive_images(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let Some(fetcher) = self.fetcher.as_mut() else {
            return;
        };
        for (index, result) in fetcher.drain() {
            let Some(slide) = self.slides.get_mut(index) else {
                continue;
            };
            let loaded = result.and_then(|encoded| {
                texture_loader::load_texture(rl, thread, &slide.record.title, &encoded)
            });
            match loaded {
                Ok(texture) => {
                    log::debug!("loaded image {} ({}x{})", slide.record.id, texture.width(), texture.height());
                    slide.set_texture(texture);
                }
                Err(e) => {
                    log::warn!("image {} unavailable: {}", slide.record.id, e);
                    slide.mark_failed();
                }
            }
        }
        if fetcher.is_done() {
            log::info!("all images fetched");
            self.fetcher = None;
        }
    }

    fn draw(&self, d: &mut RaylibDrawHandle, layout: &Layout, hovered: Option<Control>) {
        let (width, height) = (d.get_screen_width(), d.get_screen_height());
        view::draw_background(d, width, height);

        if self.state == CarouselState::Loading {
            let center = Vector2::new(width as f32 * 0.5, height as f32 * 0.5);
            view::draw_spinner(d, center, self.spinner_angle);
            return;
        }

        let stage = layout.stage;
        d.draw_rectangle_rec(stage, view::STAGE_BACKDROP);
        {
            let mut s = d.begin_scissor_mode(stage.x as i32, stage.y as i32, stage.width as i32, stage.height as i32);
            let large_text = width as f32 >= WIDE_SCREEN;
            // Current slide last so it sits on top of the one leaving.
            for slide in self.slides.iter().filter(|slide| slide.placement() != Placement::Current) {
                slide.draw(&mut s, stage, large_text);
            }
            if let Some(slide) = self.slides.get(self.cursor.index()) {
                slide.draw(&mut s, stage, large_text);
            }
        }

        view::draw_controls(
            d,
            layout,
            &self.slides,
            self.cursor.index(),
            self.cursor.is_autoplay(),
            self.cursor.progress(),
            hovered,
        );
    }
}

impl crate::engine::Engine for CarouselEngine {
    fn initialize(&mut self) -> anyhow::Result<()> {
        let records = self.slides.iter().map(|s| s.record.clone()).collect();
        let fetcher = Fetcher::spawn(records, self.fetch_timeout).context("failed to start image worker")?;
        self.fetcher = Some(fetcher);
        log::info!("carousel initialized with {} images", self.cursor.len());
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let (width, height) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let browsing = self.state == CarouselState::Browsing;

        let layout = Layout::compute(width, height, self.slides.len(), self.cursor.index());
        let actions = input::poll(rl, &mut self.swipe, browsing.then_some(&layout));

        self.receive_images(rl, thread);
        self.advance(dt, &actions);

        let layout = Layout::compute(width, height, self.slides.len(), self.cursor.index());
        // No hover highlight while a swipe is in progress.
        let hovered = if self.swipe.is_tracking() { None } else { layout.hit_test(rl.get_mouse_position()) };
        let mut d = rl.begin_drawing(thread);
        self.draw(&mut d, &layout, hovered);
    }

    fn teardown(&mut self) {
        self.autoplay.stop();
        self.loading.cancel();
        self.fetcher = None;
        log::debug!("carousel torn down");
    }
}
