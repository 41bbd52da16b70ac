//! Threaded game loop: update, render, pace.
//!
//! The loop runs on a dedicated thread between [`GameLoop::start`] and
//! [`GameLoop::stop`]. The renderer is moved onto that thread while it runs and
//! handed back through the join handle, so the same renderer (and its GPU
//! resources) survives a pause/resume cycle.
//!
//! Pacing waits on the stop channel with a timeout instead of sleeping, which
//! lets `stop()` wake a waiting loop immediately. A disconnected channel
//! without a stop request counts as an interrupted wait: it is logged and the
//! loop exits.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use thiserror::Error;

use crate::time::FrameTimer;
use crate::world::{FrameSnapshot, SharedWorld};

const LOOP_THREAD_NAME: &str = "game-loop";

/// Draws one frame from a snapshot. Called once per tick on the loop thread.
pub trait FrameRenderer: Send + 'static {
    fn render(&mut self, frame: &FrameSnapshot);
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("renderer was lost when the previous loop thread panicked")]
    RendererLost,
}

struct Worker<R> {
    stop_tx: Sender<()>,
    handle: JoinHandle<R>,
}

pub struct GameLoop<R: FrameRenderer> {
    world: SharedWorld,
    target_fps: u32,
    renderer: Option<R>,
    worker: Option<Worker<R>>,
}

impl<R: FrameRenderer> GameLoop<R> {
    pub fn new(world: SharedWorld, renderer: R, target_fps: u32) -> Self {
        Self {
            world,
            target_fps,
            renderer: Some(renderer),
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// The renderer, while the loop is stopped.
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Spawn the loop thread. Starting a running loop does nothing.
    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.worker.is_some() {
            log::debug!("Game loop already running");
            return Ok(());
        }
        let renderer = self.renderer.take().ok_or(LoopError::RendererLost)?;

        let (stop_tx, stop_rx) = mpsc::channel();
        let world = self.world.clone();
        let timer = FrameTimer::new(self.target_fps);
        let spawned = thread::Builder::new()
            .name(LOOP_THREAD_NAME.to_string())
            .spawn(move || run_loop(world, renderer, timer, stop_rx));

        match spawned {
            Ok(handle) => {
                self.worker = Some(Worker { stop_tx, handle });
                log::info!("Game loop started ({} fps target)", self.target_fps);
                Ok(())
            }
            // The closure (and the renderer inside it) is gone with the error.
            Err(err) => Err(LoopError::Spawn(err)),
        }
    }

    /// Stop the loop and wait for its thread to exit. No render call runs
    /// after this returns. Stopping a stopped loop does nothing.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        // A send error means the loop already exited on its own.
        let _ = worker.stop_tx.send(());
        match worker.handle.join() {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                log::info!("Game loop stopped");
            }
            Err(_) => {
                log::error!("Game loop thread panicked; renderer dropped");
            }
        }
    }
}

impl<R: FrameRenderer> Drop for GameLoop<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

enum Pacing {
    Continue,
    Stop,
    Interrupted,
}

fn run_loop<R: FrameRenderer>(
    world: SharedWorld,
    mut renderer: R,
    mut timer: FrameTimer,
    stop_rx: Receiver<()>,
) -> R {
    loop {
        timer.begin_tick(Instant::now());

        let stats = timer.stats();
        let frame = world.with(|w| {
            w.update();
            w.snapshot(stats)
        });
        renderer.render(&frame);

        let pacing = match timer.end_tick(Instant::now()) {
            Some(wait) => match stop_rx.recv_timeout(wait) {
                Ok(()) => Pacing::Stop,
                Err(RecvTimeoutError::Timeout) => Pacing::Continue,
                Err(RecvTimeoutError::Disconnected) => Pacing::Interrupted,
            },
            None => match stop_rx.try_recv() {
                Ok(()) => Pacing::Stop,
                Err(TryRecvError::Empty) => Pacing::Continue,
                Err(TryRecvError::Disconnected) => Pacing::Interrupted,
            },
        };

        match pacing {
            Pacing::Continue => {}
            Pacing::Stop => break,
            Pacing::Interrupted => {
                log::error!(
                    "Frame pacing interrupted after {} ticks, exiting game loop",
                    timer.tick_count
                );
                break;
            }
        }
    }

    log::debug!(
        "Game loop thread exiting after {} ticks ({} overruns)",
        timer.tick_count,
        timer.overrun_count
    );
    renderer
}
