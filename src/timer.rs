/// Repeating timer driven by the frame delta.
///
/// Fires once every `period` seconds while running. Stopping it discards the
/// accumulated time, so a restart waits a full period before the next fire.
#[derive(Debug, Clone)]
pub struct Interval {
    period: f32,
    elapsed: f32,
    running: bool,
}

impl Interval {
    pub fn new(period: f32, running: bool) -> Self {
        Self {
            period,
            elapsed: 0.0,
            running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    /// Advance by `dt` seconds and return how many periods elapsed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.running || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// One-shot timer: `tick` returns true exactly once, on the frame the delay
/// is reached.
#[derive(Debug, Clone)]
pub struct Timeout {
    delay: f32,
    elapsed: f32,
    fired: bool,
}

impl Timeout {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            elapsed: 0.0,
            fired: false,
        }
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.fired = true;
    }
}
