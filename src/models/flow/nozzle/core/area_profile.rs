use uom::si::f64::{Area, Length};

/// Cross-sectional area as a function of axial position.
///
/// Any `Fn(Length) -> Area` closure is an area profile. The profile must be
/// finite and strictly positive on the nozzle domain and must have a single
/// interior minimum, the throat.
pub trait AreaProfile {
    /// Cross-sectional area at axial position `x`.
    fn area(&self, x: Length) -> Area;
}

impl<F> AreaProfile for F
where
    F: Fn(Length) -> Area,
{
    fn area(&self, x: Length) -> Area {
        self(x)
    }
}
