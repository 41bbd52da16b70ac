//! Frame pacing for the game loop.
//!
//! Each tick measures its own work time. A tick that finishes early waits out
//! the rest of the target frame; a tick that overruns is followed immediately
//! by the next one. Overruns are absorbed: the next tick gets a full frame
//! budget, with no catch-up ticks and no shortened waits.

use std::time::{Duration, Instant};

use crate::world::FrameStats;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameTimer {
    pub target_frame: Duration,
    pub tick_count: u64,
    pub overrun_count: u64,
    /// Work time of the last finished tick.
    pub last_work: Duration,
    tick_start: Option<Instant>,
    last_tick_start: Option<Instant>,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameTimer {
    /// `target_fps` of zero is treated as one.
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        let target_frame = Duration::from_secs(1) / target_fps;
        let target_secs = target_frame.as_secs_f64();
        Self {
            target_frame,
            tick_count: 0,
            overrun_count: 0,
            last_work: Duration::ZERO,
            tick_start: None,
            last_tick_start: None,
            fps_samples: [target_secs; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: f64::from(target_fps),
            smoothed_frame_time_ms: target_secs * 1000.0,
        }
    }

    pub fn begin_tick(&mut self, now: Instant) {
        // Tick-to-tick time includes the previous wait, so it is the real
        // frame time the player sees.
        if let Some(previous) = self.last_tick_start {
            let frame_dt = now.saturating_duration_since(previous).as_secs_f64();
            self.fps_samples[self.fps_sample_index] = frame_dt;
            self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
            let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
            self.smoothed_frame_time_ms = avg_dt * 1000.0;
            self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
        }

        self.last_tick_start = Some(now);
        self.tick_start = Some(now);
        self.tick_count += 1;
    }

    /// Close the current tick and return how long to wait before the next
    /// one, or `None` when the tick used up its whole frame.
    pub fn end_tick(&mut self, now: Instant) -> Option<Duration> {
        let start = self.tick_start.take().unwrap_or(now);
        let work = now.saturating_duration_since(start);
        self.last_work = work;

        let wait = self.target_frame.checked_sub(work).filter(|w| !w.is_zero());
        if wait.is_none() {
            self.overrun_count += 1;
            log::debug!(
                "Tick {} took {:.2}ms (target {:.2}ms), not waiting",
                self.tick_count,
                work.as_secs_f64() * 1000.0,
                self.target_frame.as_secs_f64() * 1000.0
            );
        }
        wait
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            tick: self.tick_count,
            smoothed_fps: self.smoothed_fps,
            smoothed_frame_time_ms: self.smoothed_frame_time_ms,
            overruns: self.overrun_count,
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TARGET_FPS)
    }
}
