use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use raylib::prelude::*;

use image_carousel::carousel::CarouselEngine;
use image_carousel::catalog;
use image_carousel::config::{Args, Settings};
use image_carousel::engine::Engine;

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("image_carousel", LevelFilter::Debug)
        .filter_module("carousel", LevelFilter::Debug)
        .init();
}

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let args = Args::parse();
    let settings = Settings::from_args(&args).context("invalid configuration")?;

    // --- Load Catalog ---
    let mut records = catalog::load(settings.source.as_deref()).with_context(|| match &settings.source {
        Some(path) => format!("failed to load images from '{}'", path.display()),
        None => "failed to load built-in catalog".to_string(),
    })?;
    if settings.shuffle {
        catalog::shuffle(&mut records);
    }
    log::info!("{} images in catalog", records.len());

    let (mut rl, thread) = raylib::init()
        .size(settings.width, settings.height)
        .title("Image Carousel")
        .vsync()
        .resizable()
        .msaa_4x()
        .build();
    rl.set_target_fps(settings.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = CarouselEngine::new(records, &settings)?;
    engine.initialize()?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        engine.render_frame(dt, &mut rl, &thread);
    }

    engine.teardown();
    Ok(())
}
