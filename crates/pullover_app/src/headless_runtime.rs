//! Headless runtime primitives for replay execution.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Frame budget for a `settle` step that does not set its own.
    pub settle_max_frames: u32,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            settle_max_frames: 600,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        if self.settle_max_frames == 0 {
            bail!("headless settle_max_frames must be > 0");
        }
        Ok(())
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Logical time since the start of this run segment.
    pub elapsed_ms: u64,
}

/// Deterministic headless frame loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run up to `max_frames` frames, stopping early when `on_frame` returns false.
    ///
    /// Returns the number of frames executed.
    pub fn run<F>(cfg: HeadlessRunConfig, max_frames: u32, mut on_frame: F) -> Result<u32>
    where
        F: FnMut(&HeadlessContext) -> bool,
    {
        cfg.validate()?;

        let mut executed = 0;
        for frame in 0..max_frames {
            executed += 1;
            let keep_going = on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms: cfg.tick_ms.saturating_mul(frame as u64),
            });
            if !keep_going {
                break;
            }
        }

        Ok(executed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_when_callback_declines() {
        let cfg = HeadlessRunConfig::default();
        let frames = HeadlessRuntime::run(cfg, 10, |ctx| ctx.frame_index < 2).expect("run");
        assert_eq!(frames, 3);
    }

    #[test]
    fn zero_frames_runs_nothing() {
        let frames = HeadlessRuntime::run(HeadlessRunConfig::default(), 0, |_| true).expect("run");
        assert_eq!(frames, 0);
    }

    #[test]
    fn rejects_zero_tick() {
        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(cfg, 1, |_| true).is_err());
    }
}
