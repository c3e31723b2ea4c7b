pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 860;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second
pub const WIDE_SCREEN: f32 = 768.0;           // Below this width thumbnails and captions shrink

pub const AUTOPLAY_INTERVAL: f32 = 4.0;       // Time between automatic advances (seconds)
pub const LOADING_DURATION: f32 = 1.0;        // Time the loading spinner is shown (seconds)
pub const SWIPE_THRESHOLD: f32 = 50.0;        // Horizontal displacement needed for a swipe (pixels)
pub const FETCH_TIMEOUT: u64 = 15;            // Per-image request timeout (seconds)

pub const TRANSITION_DURATION: f32 = 0.7;     // Slide placement animation (seconds)
pub const TITLE_DELAY: f32 = 0.3;             // Title fades in after the slide becomes current
pub const DESCRIPTION_DELAY: f32 = 0.5;       // Description fades in after the title
pub const TEXT_FADE_DURATION: f32 = 0.7;
pub const INACTIVE_SCALE: f32 = 1.05;         // Scale of slides resting off stage

pub const SPINNER_SPEED: f32 = 360.0;         // Degrees per second
