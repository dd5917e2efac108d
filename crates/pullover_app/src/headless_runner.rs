//! Scenario runner that replays gestures against a refresh container.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use pullover_layout::{
    MeasuredRegion, NestedScrollParent, Orientation, RefreshConfig, RefreshEvent, RefreshLayout,
    RefreshListener, RefreshOptions, Side,
};

use crate::headless_assert::{
    evaluate_assert_events, evaluate_assert_loading, evaluate_assert_offset,
    evaluate_assert_phase, AssertionResult, LayoutSnapshot,
};
use crate::headless_report::{HeadlessReport, RunTotals};
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, LayoutSpec, ScenarioStep};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn into_report(self) -> HeadlessReport {
        match self {
            RunOutcome::Passed { report } | RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON with default configuration.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    run_scenario_with_config(input, &RefreshConfig::default(), HeadlessRunConfig::default())
}

/// Execute scenario JSON with an explicit refresh and runtime configuration.
pub fn run_scenario_with_config(
    input: &str,
    config: &RefreshConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, config, runtime_cfg)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    config: &RefreshConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    runtime_cfg.validate()?;
    let mut replay = Replay::new(&scenario.layout, config, runtime_cfg);

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {}: {:?}", step_index, step);
        if let Some((assertion, message)) = replay.apply(step)? {
            tracing::debug!("step {} failed: {}", step_index, message);
            let report = HeadlessReport::failed(assertion, step_index, message, replay.totals());
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(replay.totals()),
    })
}

/// Records one side's listener callbacks into the shared event log
struct EventRecorder {
    side: Side,
    log: Rc<RefCell<Vec<RefreshEvent>>>,
}

impl RefreshListener for EventRecorder {
    fn on_start(&mut self, offset: u32) {
        self.log.borrow_mut().push(RefreshEvent::Started {
            side: self.side,
            offset,
        });
    }

    fn on_refresh(&mut self) {
        self.log
            .borrow_mut()
            .push(RefreshEvent::Refreshed { side: self.side });
    }

    fn on_end(&mut self) {
        self.log
            .borrow_mut()
            .push(RefreshEvent::Ended { side: self.side });
    }
}

/// Mutable state of one run
struct Replay {
    layout: RefreshLayout,
    orientation: Orientation,
    header: Option<MeasuredRegion>,
    tail: Option<MeasuredRegion>,
    log: Rc<RefCell<Vec<RefreshEvent>>>,
    /// Events before this index were already checked by `assert_events`
    asserted: usize,
    runtime_cfg: HeadlessRunConfig,
    elapsed_frames: u64,
    elapsed_ms: u64,
}

type StepFailure = Option<(&'static str, String)>;

impl Replay {
    fn new(spec: &LayoutSpec, config: &RefreshConfig, runtime_cfg: HeadlessRunConfig) -> Self {
        let orientation = spec.orientation.unwrap_or(config.orientation);
        let threshold = spec.threshold.unwrap_or(config.threshold);

        let region = |extent: Option<i32>| {
            extent.map(|extent| {
                let region = MeasuredRegion::default();
                region.set_extent(orientation, extent);
                region
            })
        };
        let header = region(spec.header);
        let tail = region(spec.tail);

        let mut options = RefreshOptions::new()
            .threshold(threshold)
            .orientation(orientation);
        if let Some(header) = &header {
            options = options.header(header.clone());
        }
        if let Some(tail) = &tail {
            options = options.tail(tail.clone());
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut layout = RefreshLayout::with_options(options)
            .with_header_listener(EventRecorder {
                side: Side::Header,
                log: log.clone(),
            })
            .with_tail_listener(EventRecorder {
                side: Side::Tail,
                log: log.clone(),
            });
        layout.set_animation(config.animation_spec());

        Self {
            layout,
            orientation,
            header,
            tail,
            log,
            asserted: 0,
            runtime_cfg,
            elapsed_frames: 0,
            elapsed_ms: 0,
        }
    }

    fn apply(&mut self, step: &ScenarioStep) -> Result<StepFailure> {
        match step {
            ScenarioStep::StartSession => {
                let axes = self.orientation.axes();
                if self.layout.on_start_nested_scroll(axes) {
                    self.layout.on_nested_scroll_accepted(axes);
                } else {
                    tracing::debug!("container declined the nested scroll");
                }
            }
            ScenarioStep::PreScroll { delta } => {
                self.pre_scroll(*delta);
            }
            ScenarioStep::Scroll { delta } => self.scroll(*delta),
            ScenarioStep::Drag { delta } => {
                let consumed = self.pre_scroll(*delta);
                self.scroll(delta - consumed);
            }
            ScenarioStep::EndSession => self.layout.on_stop_nested_scroll(),
            ScenarioStep::Tick { frames } => {
                let tick_ms = self.runtime_cfg.tick_ms;
                self.run_frames(*frames, |_| tick_ms)?;
            }
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, self.runtime_cfg.tick_ms);
                let tick_ms = self.runtime_cfg.tick_ms;
                let mut remaining_ms = *ms;
                self.run_frames(frames, move |_| {
                    let step_ms = remaining_ms.min(tick_ms);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    step_ms
                })?;
            }
            ScenarioStep::Settle { max_frames } => {
                let budget = max_frames.unwrap_or(self.runtime_cfg.settle_max_frames);
                if !self.settle(budget)? {
                    return Ok(Some((
                        "settle",
                        format!(
                            "animation still running after {budget} frames at offset {}",
                            self.layout.offset()
                        ),
                    )));
                }
            }
            ScenarioStep::RefreshHeader { active } => self.layout.refresh_header(*active),
            ScenarioStep::RefreshTail { active } => self.layout.refresh_tail(*active),
            ScenarioStep::Cancel => self.layout.refresh_cancel(),
            ScenarioStep::SetExtent { side, extent } => {
                let side = Side::from(*side);
                let region = match side {
                    Side::Header => self.header.as_ref(),
                    Side::Tail => self.tail.as_ref(),
                };
                let Some(region) = region else {
                    return Ok(Some(("set_extent", format!("scenario layout has no {side}"))));
                };
                region.set_extent(self.orientation, *extent);
            }
            ScenarioStep::AssertOffset { value } => {
                let result = evaluate_assert_offset(*value, &self.snapshot());
                return Ok(failure("assert_offset", result));
            }
            ScenarioStep::AssertLoading { value } => {
                let result = evaluate_assert_loading(*value, &self.snapshot());
                return Ok(failure("assert_loading", result));
            }
            ScenarioStep::AssertPhase { value } => {
                let result = evaluate_assert_phase(value, &self.snapshot());
                return Ok(failure("assert_phase", result));
            }
            ScenarioStep::AssertEvents { expected } => {
                let actual: Vec<String> = self.log.borrow()[self.asserted..]
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                self.asserted = self.log.borrow().len();
                let result = evaluate_assert_events(expected, &actual);
                return Ok(failure("assert_events", result));
            }
        }
        Ok(None)
    }

    /// Offer `delta` before the child scrolls; returns what the container took
    fn pre_scroll(&mut self, delta: i32) -> i32 {
        let (dx, dy) = on_axis(self.orientation, delta);
        let mut consumed = [0, 0];
        self.layout.on_nested_pre_scroll(dx, dy, &mut consumed);
        consumed[self.orientation.index()]
    }

    fn scroll(&mut self, delta: i32) {
        let (dx, dy) = on_axis(self.orientation, delta);
        self.layout.on_nested_scroll(0, 0, dx, dy);
    }

    fn run_frames<A>(&mut self, frames: u32, mut advance_ms: A) -> Result<()>
    where
        A: FnMut(u32) -> u64,
    {
        let layout = &mut self.layout;
        let elapsed_frames = &mut self.elapsed_frames;
        let elapsed_ms = &mut self.elapsed_ms;
        HeadlessRuntime::run(self.runtime_cfg, frames, |ctx| {
            let dt = advance_ms(ctx.frame_index);
            layout.compute_scroll(dt as f32);
            *elapsed_frames = (*elapsed_frames).saturating_add(1);
            *elapsed_ms = (*elapsed_ms).saturating_add(dt);
            true
        })?;
        Ok(())
    }

    /// Pump frames until the animation stops. Returns false if the budget ran out.
    fn settle(&mut self, budget: u32) -> Result<bool> {
        if !self.layout.coordinator().is_animating() {
            return Ok(true);
        }

        let tick_ms = self.runtime_cfg.tick_ms;
        let layout = &mut self.layout;
        let elapsed_frames = &mut self.elapsed_frames;
        let elapsed_ms = &mut self.elapsed_ms;
        HeadlessRuntime::run(self.runtime_cfg, budget, |_| {
            let running = layout.compute_scroll(tick_ms as f32);
            *elapsed_frames = (*elapsed_frames).saturating_add(1);
            *elapsed_ms = (*elapsed_ms).saturating_add(tick_ms);
            running
        })?;

        if self.layout.coordinator().is_animating() {
            return Ok(false);
        }
        Ok(true)
    }

    fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(&self.layout)
    }

    fn totals(&self) -> RunTotals {
        RunTotals {
            elapsed_frames: self.elapsed_frames,
            elapsed_ms: self.elapsed_ms,
            final_offset: self.layout.offset(),
            events: self.log.borrow().iter().map(ToString::to_string).collect(),
        }
    }
}

fn failure(assertion: &'static str, result: AssertionResult) -> StepFailure {
    match result {
        AssertionResult::Passed => None,
        AssertionResult::Failed { message, .. } => Some((assertion, message)),
    }
}

fn on_axis(orientation: Orientation, delta: i32) -> (i32, i32) {
    match orientation {
        Orientation::Horizontal => (delta, 0),
        Orientation::Vertical => (0, delta),
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

/// Fail fast on scenarios that can never pass, before any frame runs.
pub fn lint_scenario(scenario: &HeadlessScenario) -> Result<()> {
    if scenario.steps.is_empty() {
        bail!("scenario has no steps");
    }
    if !scenario.steps.iter().any(ScenarioStep::is_assertion) {
        tracing::warn!("scenario has no assertions; it can only fail on settle budgets");
    }
    Ok(())
}
