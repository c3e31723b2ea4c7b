//! Image carousel: a fixed list of images with autoplay, arrow, dot and
//! thumbnail navigation, swipe and keyboard control, rendered with raylib.

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod fetcher;
pub mod input;
pub mod texture_loader;
pub mod timer;
