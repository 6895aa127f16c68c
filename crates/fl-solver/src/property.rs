//! Typed keys for the solver's property tree.
//!
//! The solver addresses everything by slash-separated path strings whose
//! availability varies per installation and per aircraft model. `Property`
//! enumerates the paths flightlink uses so call sites are checked at compile
//! time; the string form only exists at the `FlightSolver` boundary.

use std::fmt;

/// A known solver property path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    // Initial conditions
    IcLatitudeDeg,
    IcLongitudeDeg,
    IcAltitudeFt,
    IcUFps,
    IcVFps,
    IcWFps,
    IcRollDeg,
    IcPitchDeg,
    IcHeadingDeg,

    // Position
    AltitudeFt,
    LatitudeDeg,
    LongitudeDeg,

    // Attitude
    RollRad,
    PitchRad,
    HeadingRad,

    // Body-axis velocity
    UFps,
    VFps,
    WFps,

    // Local NED velocity
    VNorthFps,
    VEastFps,
    VDownFps,

    // Body angular rates
    PRadSec,
    QRadSec,
    RRadSec,

    // Body accelerations
    UdotFtSec2,
    VdotFtSec2,
    WdotFtSec2,

    // Aerodynamic state
    AlphaDeg,
    BetaDeg,
    Mach,

    // Flight control system commands
    ThrottleCmd,
    ElevatorCmd,
    AileronCmd,
    RudderCmd,
    FlapCmd,
    BrakeCmd,

    // Propulsion
    EngineSetRunning,
    NumEngines,
}

impl Property {
    /// Every known property, in declaration order.
    pub const ALL: [Property; 38] = [
        Property::IcLatitudeDeg,
        Property::IcLongitudeDeg,
        Property::IcAltitudeFt,
        Property::IcUFps,
        Property::IcVFps,
        Property::IcWFps,
        Property::IcRollDeg,
        Property::IcPitchDeg,
        Property::IcHeadingDeg,
        Property::AltitudeFt,
        Property::LatitudeDeg,
        Property::LongitudeDeg,
        Property::RollRad,
        Property::PitchRad,
        Property::HeadingRad,
        Property::UFps,
        Property::VFps,
        Property::WFps,
        Property::VNorthFps,
        Property::VEastFps,
        Property::VDownFps,
        Property::PRadSec,
        Property::QRadSec,
        Property::RRadSec,
        Property::UdotFtSec2,
        Property::VdotFtSec2,
        Property::WdotFtSec2,
        Property::AlphaDeg,
        Property::BetaDeg,
        Property::Mach,
        Property::ThrottleCmd,
        Property::ElevatorCmd,
        Property::AileronCmd,
        Property::RudderCmd,
        Property::FlapCmd,
        Property::BrakeCmd,
        Property::EngineSetRunning,
        Property::NumEngines,
    ];

    /// The solver's path string for this property.
    pub const fn path(self) -> &'static str {
        match self {
            Property::IcLatitudeDeg => "ic/lat-geod-deg",
            Property::IcLongitudeDeg => "ic/long-gc-deg",
            Property::IcAltitudeFt => "ic/h-sl-ft",
            Property::IcUFps => "ic/u-fps",
            Property::IcVFps => "ic/v-fps",
            Property::IcWFps => "ic/w-fps",
            Property::IcRollDeg => "ic/phi-deg",
            Property::IcPitchDeg => "ic/theta-deg",
            Property::IcHeadingDeg => "ic/psi-deg",
            Property::AltitudeFt => "position/h-sl-ft",
            Property::LatitudeDeg => "position/lat-geod-deg",
            Property::LongitudeDeg => "position/long-gc-deg",
            Property::RollRad => "attitude/roll-rad",
            Property::PitchRad => "attitude/pitch-rad",
            Property::HeadingRad => "attitude/heading-true-rad",
            Property::UFps => "velocities/u-fps",
            Property::VFps => "velocities/v-fps",
            Property::WFps => "velocities/w-fps",
            Property::VNorthFps => "velocities/v-north-fps",
            Property::VEastFps => "velocities/v-east-fps",
            Property::VDownFps => "velocities/v-down-fps",
            Property::PRadSec => "velocities/p-rad_sec",
            Property::QRadSec => "velocities/q-rad_sec",
            Property::RRadSec => "velocities/r-rad_sec",
            Property::UdotFtSec2 => "accelerations/udot-ft_sec2",
            Property::VdotFtSec2 => "accelerations/vdot-ft_sec2",
            Property::WdotFtSec2 => "accelerations/wdot-ft_sec2",
            Property::AlphaDeg => "aero/alpha-deg",
            Property::BetaDeg => "aero/beta-deg",
            Property::Mach => "velocities/mach",
            Property::ThrottleCmd => "fcs/throttle-cmd-norm",
            Property::ElevatorCmd => "fcs/elevator-cmd-norm",
            Property::AileronCmd => "fcs/aileron-cmd-norm",
            Property::RudderCmd => "fcs/rudder-cmd-norm",
            Property::FlapCmd => "fcs/flap-cmd-norm",
            Property::BrakeCmd => "fcs/brake-cmd-norm",
            Property::EngineSetRunning => "propulsion/engine[0]/set-running",
            Property::NumEngines => "propulsion/num-engines",
        }
    }

    /// Look up a property by its path string.
    pub fn from_path(path: &str) -> Option<Property> {
        Property::ALL.iter().copied().find(|p| p.path() == path)
    }

    /// Whether this is an initial-condition property (`ic/...`).
    pub fn is_initial_condition(self) -> bool {
        self.path().starts_with("ic/")
    }

    /// Whether this is a flight control command channel (`fcs/...`).
    pub fn is_control_channel(self) -> bool {
        self.path().starts_with("fcs/")
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
