use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::session::SpinCommit;
use super::wheel::{ease_out_cubic, Wheel};
use crate::config::SpinnerConfig;

/// Frame pacing for a spin animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTiming {
    pub duration: Duration,
    pub frame_interval: Duration,
}

impl SpinTiming {
    pub fn from_config(config: &SpinnerConfig) -> Self {
        Self {
            duration: config.duration(),
            frame_interval: config.frame_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinFrame {
    pub rotation: f64,
    pub progress: f64,
    pub sector: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinOutcome {
    Finished,
    Cancelled,
}

/// Eases the wheel from rest to `commit.final_rotation`, reporting each frame.
///
/// The outcome is already fixed in `commit`; this only paces the display.
/// Resolves to `Cancelled` as soon as `cancel` completes.
pub async fn animate<C, F>(
    wheel: &Wheel,
    commit: &SpinCommit,
    timing: SpinTiming,
    cancel: C,
    mut on_frame: F,
) -> SpinOutcome
where
    C: Future<Output = ()>,
    F: FnMut(&SpinFrame),
{
    let mut ticker = time::interval(timing.frame_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = Instant::now();
    tokio::pin!(cancel);

    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => {
                debug!(spin_id = commit.spin_id, "Spin animation cancelled");
                return SpinOutcome::Cancelled;
            }
            _ = ticker.tick() => {
                let progress = if timing.duration.is_zero() {
                    1.0
                } else {
                    (started.elapsed().as_secs_f64() / timing.duration.as_secs_f64()).min(1.0)
                };
                let rotation = commit.final_rotation * ease_out_cubic(progress);
                on_frame(&SpinFrame {
                    rotation,
                    progress,
                    sector: wheel.sector_at_rotation(rotation),
                });
                if progress >= 1.0 {
                    return SpinOutcome::Finished;
                }
            }
        }
    }
}
