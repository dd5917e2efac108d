//! Easing functions for settle animations

use serde::{Deserialize, Serialize};

/// Scale applied to progress before the viscous-fluid curve is evaluated
const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    /// Fast start with a long exponential tail, the default scroller feel
    #[default]
    ViscousFluid,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::ViscousFluid => viscous_fluid_ease(t),
        }
    }
}

/// Normalized viscous-fluid curve: exactly 0.0 at the start and 1.0 at the end
fn viscous_fluid_ease(t: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let normalize = 1.0 / viscous_fluid(1.0);
    let offset = 1.0 - normalize * viscous_fluid(1.0);
    let interpolated = normalize * viscous_fluid(t);
    if interpolated > 0.0 {
        interpolated + offset
    } else {
        interpolated
    }
}

/// Raw viscous-fluid response: linear drag phase, then exponential release
#[inline]
fn viscous_fluid(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e, where the two phases meet
        let start = 0.367_879_44_f32;
        let released = 1.0 - (1.0 - x).exp();
        start + released * (1.0 - start)
    }
}
