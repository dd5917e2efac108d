//! Scenario definition for headless gesture replay.

use pullover_layout::{Orientation, Side};
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, ScenarioError};

/// A container description plus the gesture steps to replay against it.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub layout: LayoutSpec,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: HeadlessScenario = serde_json::from_str(input)?;
        scenario.layout.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

/// Container under test. Unset fields fall back to the run configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutSpec {
    /// Header extent along the scroll axis; absent = no header
    #[serde(default)]
    pub header: Option<i32>,
    /// Tail extent along the scroll axis; absent = no tail
    #[serde(default)]
    pub tail: Option<i32>,
    /// Overrides the configured threshold (-1 = region extent)
    #[serde(default)]
    pub threshold: Option<i32>,
    /// Overrides the configured orientation
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

impl LayoutSpec {
    fn validate(&self) -> Result<()> {
        for (name, extent) in [("header", self.header), ("tail", self.tail)] {
            if let Some(extent) = extent {
                if extent < 0 {
                    return Err(ScenarioError::InvalidLayout(format!(
                        "{name} extent must be >= 0, got {extent}"
                    )));
                }
            }
        }
        if let Some(threshold) = self.threshold {
            if threshold < -1 {
                return Err(ScenarioError::InvalidLayout(format!(
                    "threshold must be -1 or >= 0, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

/// Which region a step targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideSpec {
    Header,
    Tail,
}

impl From<SideSpec> for Side {
    fn from(side: SideSpec) -> Self {
        match side {
            SideSpec::Header => Side::Header,
            SideSpec::Tail => Side::Tail,
        }
    }
}

/// One replay step.
///
/// Deltas use the child's convention: negative pulls the header into view,
/// positive pulls the tail.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Child asks to start a nested scroll on the container's axis
    StartSession,
    /// Offer `delta` to the container before the child scrolls
    PreScroll { delta: i32 },
    /// Forward `delta` the child could not consume
    Scroll { delta: i32 },
    /// Pre-scroll, then forward whatever the container left over
    Drag { delta: i32 },
    /// Child releases the gesture
    EndSession,
    Tick { frames: u32 },
    Wait { ms: u64 },
    /// Pump frames until no animation is running
    Settle {
        #[serde(default)]
        max_frames: Option<u32>,
    },
    RefreshHeader { active: bool },
    RefreshTail { active: bool },
    Cancel,
    /// Re-measure a region between layout passes
    SetExtent { side: SideSpec, extent: i32 },
    AssertOffset { value: i32 },
    AssertLoading { value: bool },
    AssertPhase { value: String },
    /// Compare events recorded since the previous `assert_events`
    AssertEvents { expected: Vec<String> },
}

impl ScenarioStep {
    /// Whether this step checks state rather than driving it
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertOffset { .. }
                | ScenarioStep::AssertLoading { .. }
                | ScenarioStep::AssertPhase { .. }
                | ScenarioStep::AssertEvents { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_and_layout() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "layout": { "header": 60, "orientation": "horizontal" },
                "steps": [
                    { "type": "start_session" },
                    { "type": "drag", "delta": -140 },
                    { "type": "settle" },
                    { "type": "set_extent", "side": "tail", "extent": 12 },
                    { "type": "assert_events", "expected": ["header:refresh"] }
                ]
            }"#,
        )
        .expect("scenario should parse");

        assert_eq!(scenario.layout.header, Some(60));
        assert_eq!(scenario.layout.tail, None);
        assert_eq!(scenario.layout.orientation, Some(Orientation::Horizontal));
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(
            scenario.steps[2],
            ScenarioStep::Settle { max_frames: None }
        ));
        assert!(matches!(
            scenario.steps[3],
            ScenarioStep::SetExtent {
                side: SideSpec::Tail,
                extent: 12
            }
        ));
        assert!(scenario.steps[4].is_assertion());
    }

    #[test]
    fn layout_is_optional() {
        let scenario = HeadlessScenario::from_json(r#"{ "steps": [] }"#).expect("parse");
        assert!(scenario.layout.header.is_none());
        assert!(scenario.steps.is_empty());
    }

    #[test]
    fn rejects_unknown_step() {
        let err = HeadlessScenario::from_json(r#"{ "steps": [{ "type": "fling" }] }"#)
            .expect_err("unknown step must fail");
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn rejects_negative_extent() {
        let err = HeadlessScenario::from_json(r#"{ "layout": { "tail": -4 }, "steps": [] }"#)
            .expect_err("negative extent must fail");
        assert!(matches!(err, ScenarioError::InvalidLayout(_)));
    }
}
