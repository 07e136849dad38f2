use crate::support::gas_dynamics::{
    isentropic::{self, Branch, InversionConfig, MachInversionError},
    normal_shock,
};

use super::Regime;

/// Back-pressure ratios that separate the nozzle flow regimes.
///
/// For any exit area ratio above one, `1 > r1 > r2 > r3 > 0`:
///
/// - `r1`: isentropic exit pressure on the subsonic branch. The throat just
///   reaches sonic conditions.
/// - `r2`: static pressure behind a normal shock standing at the exit.
/// - `r3`: isentropic exit pressure on the supersonic branch, the design
///   condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPressureRatios {
    r1: f64,
    r2: f64,
    r3: f64,
}

impl CriticalPressureRatios {
    /// Derives the critical ratios for exit-to-throat area ratio `exit_area_ratio`.
    ///
    /// # Errors
    ///
    /// Returns [`MachInversionError`] if the exit area ratio is below one or
    /// not finite, or if an inversion fails to converge.
    pub fn from_exit_area_ratio(
        exit_area_ratio: f64,
        gamma: f64,
    ) -> Result<Self, MachInversionError> {
        Self::from_exit_area_ratio_with(exit_area_ratio, gamma, &InversionConfig::default())
    }

    /// Derives the critical ratios using explicit Mach inversion settings.
    ///
    /// A nozzle passes its own [`InversionConfig`] here so that the ratios
    /// agree with the exit states of its regime solutions.
    ///
    /// # Errors
    ///
    /// Returns [`MachInversionError`] under the same conditions as
    /// [`CriticalPressureRatios::from_exit_area_ratio`].
    pub fn from_exit_area_ratio_with(
        exit_area_ratio: f64,
        gamma: f64,
        inversion: &InversionConfig,
    ) -> Result<Self, MachInversionError> {
        let m_sub = isentropic::mach_from_area_ratio_with(
            exit_area_ratio,
            gamma,
            Branch::Subsonic,
            inversion,
        )?;
        let m_sup = isentropic::mach_from_area_ratio_with(
            exit_area_ratio,
            gamma,
            Branch::Supersonic,
            inversion,
        )?;

        let r1 = isentropic::pressure_ratio(m_sub, gamma);
        let r3 = isentropic::pressure_ratio(m_sup, gamma);
        let r2 = r3 * normal_shock::pressure_ratio(m_sup, gamma);

        Ok(Self { r1, r2, r3 })
    }

    /// `r1`, the largest back-pressure ratio at which the throat is sonic.
    #[must_use]
    pub fn r1(&self) -> f64 {
        self.r1
    }

    /// `r2`, the back-pressure ratio with a normal shock exactly at the exit.
    #[must_use]
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// `r3`, the design back-pressure ratio for a perfectly expanded exit.
    #[must_use]
    pub fn r3(&self) -> f64 {
        self.r3
    }

    /// Selects the flow regime for back-pressure ratio `pb_over_p0`.
    ///
    /// Boundaries are inclusive on the lower-pressure side: `pb = r1` is
    /// already choked, `pb = r2` puts an oblique shock at the exit, and
    /// `pb = r3` is treated as the onset of the expansion fan.
    #[must_use]
    pub fn classify(&self, pb_over_p0: f64) -> Regime {
        if pb_over_p0 > self.r1 {
            Regime::SubsonicThroat
        } else if pb_over_p0 > self.r2 {
            Regime::NormalShockInside
        } else if pb_over_p0 > self.r3 {
            Regime::ObliqueShockAtExit
        } else {
            Regime::ExpansionFanAtExit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn matches_reference_area_ratio() {
        let critical = CriticalPressureRatios::from_exit_area_ratio(1.96, 1.4).unwrap();

        assert_relative_eq!(critical.r1(), 0.934_36, epsilon = 1e-4);
        assert_relative_eq!(critical.r2(), 0.520_75, epsilon = 1e-4);
        assert_relative_eq!(critical.r3(), 0.097_354, epsilon = 1e-5);
    }

    #[test]
    fn ordered_for_any_gas_and_expansion() {
        for gamma in [1.1, 1.2, 1.3, 1.4, 1.67, 1.8] {
            for ratio in [1.01, 1.2, 2.0, 4.0, 10.0] {
                let c = CriticalPressureRatios::from_exit_area_ratio(ratio, gamma).unwrap();
                assert!(
                    0.0 < c.r3() && c.r3() < c.r2() && c.r2() < c.r1() && c.r1() < 1.0,
                    "gamma = {gamma}, ratio = {ratio}: {c:?}"
                );
            }
        }
    }

    #[test]
    fn classification_boundaries() {
        let c = CriticalPressureRatios::from_exit_area_ratio(1.96, 1.4).unwrap();

        assert_eq!(c.classify(1.0), Regime::SubsonicThroat);
        assert_eq!(c.classify(c.r1()), Regime::NormalShockInside);
        assert_eq!(c.classify(c.r2()), Regime::ObliqueShockAtExit);
        assert_eq!(c.classify(c.r3()), Regime::ExpansionFanAtExit);
        assert_eq!(c.classify(1e-6), Regime::ExpansionFanAtExit);
    }

    #[test]
    fn explicit_inversion_settings_are_used() {
        let coarse = InversionConfig {
            max_iters: 5,
            ..InversionConfig::default()
        };
        let err = CriticalPressureRatios::from_exit_area_ratio_with(1.96, 1.4, &coarse)
            .unwrap_err();
        assert!(!err.is_domain());
    }

    #[test]
    fn sub_unity_ratio_is_rejected() {
        let err = CriticalPressureRatios::from_exit_area_ratio(0.9, 1.4).unwrap_err();
        assert!(err.is_domain());
    }
}
