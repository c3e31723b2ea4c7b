use raylib::prelude::*;

pub trait Engine {
    fn initialize(&mut self) -> anyhow::Result<()>;
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread);
    fn teardown(&mut self);
}
