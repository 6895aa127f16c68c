// fl-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Angle as UomAngle, Length as UomLength,
    Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Angle = UomAngle;
pub type Length = UomLength;
pub type Velocity = UomVelocity;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn fps(v: f64) -> Velocity {
    use uom::si::velocity::foot_per_second;
    Velocity::new::<foot_per_second>(v)
}

#[inline]
pub fn kts(v: f64) -> Velocity {
    use uom::si::velocity::knot;
    Velocity::new::<knot>(v)
}

/// Plain-`f64` conversions at the solver boundary.
///
/// The solver speaks feet, degrees and knots in its property paths while the
/// host speaks meters and degrees; these helpers route through uom so the
/// factors live in one place.
pub mod convert {
    use super::*;

    /// Feet to meters (x 0.3048).
    #[inline]
    pub fn feet_to_meters(v: f64) -> f64 {
        use uom::si::length::meter;
        ft(v).get::<meter>()
    }

    #[inline]
    pub fn meters_to_feet(v: f64) -> f64 {
        use uom::si::length::foot;
        m(v).get::<foot>()
    }

    #[inline]
    pub fn radians_to_degrees(v: f64) -> f64 {
        use uom::si::angle::degree;
        rad(v).get::<degree>()
    }

    #[inline]
    pub fn degrees_to_radians(v: f64) -> f64 {
        use uom::si::angle::radian;
        deg(v).get::<radian>()
    }

    #[inline]
    pub fn knots_to_mps(v: f64) -> f64 {
        use uom::si::velocity::meter_per_second;
        kts(v).get::<meter_per_second>()
    }

    #[inline]
    pub fn mps_to_knots(v: f64) -> f64 {
        use uom::si::velocity::knot;
        mps(v).get::<knot>()
    }

    #[inline]
    pub fn fps_to_mps(v: f64) -> f64 {
        use uom::si::velocity::meter_per_second;
        fps(v).get::<meter_per_second>()
    }

    #[inline]
    pub fn mps_to_fps(v: f64) -> f64 {
        use uom::si::velocity::foot_per_second;
        mps(v).get::<foot_per_second>()
    }

    #[inline]
    pub fn knots_to_fps(v: f64) -> f64 {
        use uom::si::velocity::foot_per_second;
        kts(v).get::<foot_per_second>()
    }

    /// ft/s² to m/s².
    #[inline]
    pub fn fps2_to_mps2(v: f64) -> f64 {
        use uom::si::acceleration::{foot_per_second_squared, meter_per_second_squared};
        Accel::new::<foot_per_second_squared>(v).get::<meter_per_second_squared>()
    }
}

pub mod constants {
    /// Meters per degree of latitude used for local flat-earth offsets.
    pub const METERS_PER_DEGREE: f64 = 111_000.0;

    /// Speed of sound at sea level, standard atmosphere [ft/s].
    pub const SEA_LEVEL_SPEED_OF_SOUND_FPS: f64 = 1116.45;
}
