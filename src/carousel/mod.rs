pub mod cursor;
pub mod engine;
pub mod layout;
pub mod slide;
pub mod state;
pub mod view;

pub use engine::CarouselEngine;
