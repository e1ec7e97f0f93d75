use std::time::Instant;

/// How the timer advances on each `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickMode {
    /// Wall-clock delta since the previous tick.
    RealTime,
    /// A constant delta per tick, for deterministic headless output.
    Fixed(f32),
}

/// Frame timer consumed by camera movement and the mesh rotation.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    mode: TickMode,
    last_tick: Instant,
    /// Seconds since the previous tick.
    elapsed: f32,
    /// Seconds since the timer was created.
    total: f64,
    pub frame_count: u64,
}

impl FrameTimer {
    pub fn new(mode: TickMode) -> Self {
        Self {
            mode,
            last_tick: Instant::now(),
            elapsed: 0.0,
            total: 0.0,
            frame_count: 0,
        }
    }

    pub fn real_time() -> Self {
        Self::new(TickMode::RealTime)
    }

    pub fn fixed(step: f32) -> Self {
        Self::new(TickMode::Fixed(step.max(0.0)))
    }

    /// Advances the timer by one frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.elapsed = match self.mode {
            TickMode::RealTime => now.duration_since(self.last_tick).as_secs_f32(),
            TickMode::Fixed(step) => step,
        };
        self.last_tick = now;
        self.total += self.elapsed as f64;
        self.frame_count += 1;
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn total(&self) -> f32 {
        self.total as f32
    }
}
