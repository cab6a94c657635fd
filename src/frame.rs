//! Frame driver
//!
//! The top-level per-frame entry point: invoked once per display refresh
//! with a monotonic timestamp, it derives the elapsed time, keeps an FPS
//! estimate, advances the simulation, and always asks the renderer for a
//! pass. A paused or game-over session still draws its last snapshot.

use crate::consts::MAX_FRAME_DT;
use crate::sim::{GameState, TickInput, tick};

/// Presentation sink. Receives a read-only snapshot after every frame.
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// A renderer that draws nothing; the core passes all logic tests with it
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Drives one advance-and-render pass per display refresh
#[derive(Debug, Default)]
pub struct FrameDriver {
    last_time_ms: Option<f64>,
    frame_count: u64,
    fps: u32,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest FPS estimate, resampled every 60 frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run one frame at the given monotonic timestamp (milliseconds)
    pub fn frame<R: Renderer>(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        renderer: &mut R,
        now_ms: f64,
    ) {
        let dt = match self.last_time_ms {
            Some(prev) if now_ms > prev => (((now_ms - prev) / 1000.0) as f32).min(MAX_FRAME_DT),
            _ => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.frame_count += 1;

        if self.frame_count.is_multiple_of(60) && dt > 0.0 {
            self.fps = (1.0 / dt).round() as u32;
        }

        tick(state, input, dt);
        renderer.render(state);
    }
}
