use std::fmt;

use uom::si::f64::{Angle, Length};

/// Nozzle flow regime, selected by comparing the back-pressure ratio with
/// the [`super::CriticalPressureRatios`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// `pb > r1`: the throat is not choked and the flow is subsonic throughout.
    SubsonicThroat,
    /// `r2 < pb ≤ r1`: a normal shock stands in the diverging section.
    NormalShockInside,
    /// `r3 < pb ≤ r2`: the exit is supersonic and an oblique shock forms at the lip.
    ObliqueShockAtExit,
    /// `pb ≤ r3`: the exit is supersonic and a Prandtl–Meyer fan forms at the lip.
    ExpansionFanAtExit,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SubsonicThroat => "Subsonic Throat",
            Self::NormalShockInside => "Sonic Throat - Normal Shock Inside Expansion",
            Self::ObliqueShockAtExit => "Sonic Throat - Oblique Shock at Exit",
            Self::ExpansionFanAtExit => "Sonic Throat - Expansion Fan at Exit",
        })
    }
}

/// Wave structure that terminates the isentropic interior solution.
#[derive(Debug, Clone, PartialEq)]
pub enum Discontinuity {
    /// Isentropic flow everywhere.
    None,

    /// A normal shock inside the diverging section.
    NormalShock {
        /// Axial shock position.
        position: Length,
        /// Mach number just upstream of the shock.
        upstream_mach: f64,
        /// Mach number just downstream of the shock.
        downstream_mach: f64,
        /// Stagnation pressure ratio across the shock, `p02/p01`.
        stagnation_pressure_ratio: f64,
    },

    /// An attached oblique shock from the exit lip.
    ObliqueShock {
        shock_angle: Angle,
        deflection_angle: Angle,
        /// Axial position where the shock reaches the centerline.
        centerline_crossing: Length,
        /// Mach number behind the shock.
        downstream_mach: f64,
    },

    /// A centered Prandtl–Meyer expansion fan from the exit lip.
    ExpansionFan {
        /// Mach angles of representative characteristics, from the tail
        /// (far-field Mach angle) to the head (exit Mach angle).
        rays: Vec<Angle>,
        /// Axial position where the head characteristic reaches the centerline.
        head_crossing: Length,
        /// Axial position where the tail characteristic reaches the centerline.
        tail_crossing: Length,
        /// Fully expanded Mach number at the back pressure.
        far_field_mach: f64,
    },
}

/// Flow along the sampled nozzle and plume for one back-pressure ratio.
///
/// `mach` and `pressure_ratio` hold one value per evaluation position: the
/// interior stations followed by the plume stations.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowProfile {
    pub regime: Regime,
    pub mach: Vec<f64>,
    /// Static-to-inlet-stagnation pressure ratio, `p/p0`.
    pub pressure_ratio: Vec<f64>,
    pub discontinuity: Discontinuity,
}
