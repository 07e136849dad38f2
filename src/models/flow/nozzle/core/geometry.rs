use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::support::constraint::StrictlyPositive;

use super::{AreaProfile, NozzleConfig, NozzleError};

/// Stations sampled from an area profile at construction.
///
/// Interior stations are uniformly spaced on `[xmin, xmax]` with the last
/// station exactly at `xmax`. Plume stations extend past the exit and carry
/// no area; flow arrays cover the interior stations followed by the plume.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySample {
    pub(super) x: Vec<f64>,
    pub(super) tail: Vec<f64>,
    pub(super) area: Vec<f64>,
}

impl GeometrySample {
    pub(super) fn sample(
        profile: &impl AreaProfile,
        xmin: Length,
        xmax: Length,
        config: &NozzleConfig,
    ) -> Result<Self, NozzleError> {
        let (lo, hi) = (xmin.get::<meter>(), xmax.get::<meter>());

        if !lo.is_finite() || !hi.is_finite() {
            return Err(NozzleError::Geometry {
                context: format!("domain bounds must be finite, got [{lo}, {hi}]"),
            });
        }
        if lo >= hi {
            return Err(NozzleError::Geometry {
                context: format!("xmin must be less than xmax, got [{lo}, {hi}]"),
            });
        }

        let x = linspace(lo, hi, config.stations);
        let tail = linspace(hi, hi + config.tail_length_factor * (hi - lo), config.tail_stations)
            .split_off(1);

        let area = x
            .iter()
            .map(|&x| {
                let area = profile.area(Length::new::<meter>(x));
                StrictlyPositive::new(area)
                    .ok()
                    .filter(|area| area.as_ref().is_finite())
                    .map(|area| area.into_inner().get::<square_meter>())
                    .ok_or_else(|| NozzleError::Geometry {
                        context: format!(
                            "area must be finite and positive, got {} m² at x = {x}",
                            area.get::<square_meter>()
                        ),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { x, tail, area })
    }

    /// Number of interior stations.
    #[must_use]
    pub fn station_count(&self) -> usize {
        self.x.len()
    }

    /// Number of stations in a flow profile, interior and plume.
    #[must_use]
    pub fn evaluation_count(&self) -> usize {
        self.x.len() + self.tail.len()
    }

    /// Interior station positions.
    #[must_use]
    pub fn positions(&self) -> Vec<Length> {
        self.x.iter().copied().map(Length::new::<meter>).collect()
    }

    /// Plume station positions, past the exit.
    #[must_use]
    pub fn plume_positions(&self) -> Vec<Length> {
        self.tail.iter().copied().map(Length::new::<meter>).collect()
    }

    /// Interior positions followed by plume positions.
    #[must_use]
    pub fn evaluation_positions(&self) -> Vec<Length> {
        self.x
            .iter()
            .chain(&self.tail)
            .copied()
            .map(Length::new::<meter>)
            .collect()
    }

    /// Cross-sectional area at each interior station.
    #[must_use]
    pub fn areas(&self) -> Vec<Area> {
        self.area.iter().copied().map(Area::new::<square_meter>).collect()
    }

    /// Equivalent circular radius `sqrt(A/π)` at each interior station.
    #[must_use]
    pub fn radii(&self) -> Vec<Length> {
        self.area
            .iter()
            .map(|&area| Length::new::<meter>(radius(area)))
            .collect()
    }

    /// Exit position, `xmax`, in meters.
    pub(super) fn exit_m(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Exit area in square meters.
    pub(super) fn exit_area_m2(&self) -> f64 {
        self.area[self.area.len() - 1]
    }

    /// Exit radius in meters.
    pub(super) fn exit_radius_m(&self) -> f64 {
        radius(self.exit_area_m2())
    }

    /// Nozzle length `xmax − xmin` in meters.
    pub(super) fn length_m(&self) -> f64 {
        self.exit_m() - self.x[0]
    }
}

fn radius(area: f64) -> f64 {
    (area / PI).sqrt()
}

/// `n` evenly spaced values from `start` to `end`, with the last exactly `end`.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    if let Some(last) = values.last_mut() {
        *last = end;
    }
    values
}
