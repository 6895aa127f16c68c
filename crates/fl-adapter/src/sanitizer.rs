//! Non-finite guard for solver-read scalars.
//!
//! A single NaN from the solver must not corrupt the whole snapshot: every
//! field is checked independently, replaced with `0.0` when non-finite, and
//! flagged for diagnostics.

use crate::error::AdapterError;
use fl_core::ensure_finite;
use fl_solver::Property;
use tracing::warn;

/// Every scalar read from the solver after a step, in solver units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateField {
    AltitudeFt,
    RollRad,
    PitchRad,
    HeadingRad,
    UFps,
    VFps,
    WFps,
    VNorthFps,
    VEastFps,
    VDownFps,
    PRadSec,
    QRadSec,
    RRadSec,
    UdotFtSec2,
    VdotFtSec2,
    WdotFtSec2,
    AlphaDeg,
    BetaDeg,
    Mach,
}

impl StateField {
    pub const COUNT: usize = 19;

    pub const ALL: [StateField; StateField::COUNT] = [
        StateField::AltitudeFt,
        StateField::RollRad,
        StateField::PitchRad,
        StateField::HeadingRad,
        StateField::UFps,
        StateField::VFps,
        StateField::WFps,
        StateField::VNorthFps,
        StateField::VEastFps,
        StateField::VDownFps,
        StateField::PRadSec,
        StateField::QRadSec,
        StateField::RRadSec,
        StateField::UdotFtSec2,
        StateField::VdotFtSec2,
        StateField::WdotFtSec2,
        StateField::AlphaDeg,
        StateField::BetaDeg,
        StateField::Mach,
    ];

    /// Solver property this field is read from.
    pub const fn property(self) -> Property {
        match self {
            StateField::AltitudeFt => Property::AltitudeFt,
            StateField::RollRad => Property::RollRad,
            StateField::PitchRad => Property::PitchRad,
            StateField::HeadingRad => Property::HeadingRad,
            StateField::UFps => Property::UFps,
            StateField::VFps => Property::VFps,
            StateField::WFps => Property::WFps,
            StateField::VNorthFps => Property::VNorthFps,
            StateField::VEastFps => Property::VEastFps,
            StateField::VDownFps => Property::VDownFps,
            StateField::PRadSec => Property::PRadSec,
            StateField::QRadSec => Property::QRadSec,
            StateField::RRadSec => Property::RRadSec,
            StateField::UdotFtSec2 => Property::UdotFtSec2,
            StateField::VdotFtSec2 => Property::VdotFtSec2,
            StateField::WdotFtSec2 => Property::WdotFtSec2,
            StateField::AlphaDeg => Property::AlphaDeg,
            StateField::BetaDeg => Property::BetaDeg,
            StateField::Mach => Property::Mach,
        }
    }

    pub const fn name(self) -> &'static str {
        self.property().path()
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Unvalidated solver output for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawState {
    values: [f64; StateField::COUNT],
}

impl Default for RawState {
    fn default() -> Self {
        Self {
            values: [0.0; StateField::COUNT],
        }
    }
}

impl RawState {
    pub fn get(&self, field: StateField) -> f64 {
        self.values[field.index()]
    }

    pub fn set(&mut self, field: StateField, value: f64) {
        self.values[field.index()] = value;
    }

    /// Build a raw state by reading every field through `read`.
    pub fn try_from_fn<E, F>(mut read: F) -> Result<Self, E>
    where
        F: FnMut(StateField) -> Result<f64, E>,
    {
        let mut raw = RawState::default();
        for field in StateField::ALL {
            raw.set(field, read(field)?);
        }
        Ok(raw)
    }
}

/// Sanitized state: every value finite, replaced fields listed in `flagged`.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeState {
    pub state: RawState,
    pub flagged: Vec<StateField>,
}

impl SafeState {
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StateSanitizer;

impl StateSanitizer {
    /// Replace non-finite fields with `0.0`. Never fails.
    pub fn sanitize(raw: RawState) -> SafeState {
        let mut state = raw;
        let mut flagged = Vec::new();
        for field in StateField::ALL {
            if let Err(e) = ensure_finite(raw.get(field), field.name()) {
                let e = AdapterError::from(e);
                warn!(property = field.name(), error = %e, "replacing non-finite solver value");
                state.set(field, 0.0);
                flagged.push(field);
            }
        }
        SafeState { state, flagged }
    }
}
