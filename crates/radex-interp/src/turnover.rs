//! Tabulated minihalo turnover mass as a function of redshift.
//!
//! The table stores `log10(M_turn / Msun)` on 100 redshift nodes. Lookups
//! interpolate linearly in the stored log space, clamp at the table edges,
//! and return the mass itself.

use radex_core::RadioError;

use crate::interp::{InterpOptions, Table};

const REDSHIFTS: [f64; 100] = [
    5.39517E+00, 5.64340E+00, 5.89163E+00, 6.13987E+00, 6.38810E+00, 6.63633E+00, 6.88456E+00,
    7.13280E+00, 7.38103E+00, 7.62926E+00, 7.87749E+00, 8.12572E+00, 8.37396E+00, 8.62219E+00,
    8.87042E+00, 9.11865E+00, 9.36689E+00, 9.61512E+00, 9.86335E+00, 1.01116E+01, 1.03598E+01,
    1.06080E+01, 1.08563E+01, 1.11045E+01, 1.13527E+01, 1.16010E+01, 1.18492E+01, 1.20974E+01,
    1.23457E+01, 1.25939E+01, 1.28421E+01, 1.30904E+01, 1.33386E+01, 1.35868E+01, 1.38351E+01,
    1.40833E+01, 1.43315E+01, 1.45798E+01, 1.48280E+01, 1.50762E+01, 1.53245E+01, 1.55727E+01,
    1.58209E+01, 1.60692E+01, 1.63174E+01, 1.65656E+01, 1.68139E+01, 1.70621E+01, 1.73103E+01,
    1.75586E+01, 1.78068E+01, 1.80550E+01, 1.83033E+01, 1.85515E+01, 1.87997E+01, 1.90480E+01,
    1.92962E+01, 1.95444E+01, 1.97926E+01, 2.00409E+01, 2.02891E+01, 2.05373E+01, 2.07856E+01,
    2.10338E+01, 2.12820E+01, 2.15303E+01, 2.17785E+01, 2.20267E+01, 2.22750E+01, 2.25232E+01,
    2.27714E+01, 2.30197E+01, 2.32679E+01, 2.35161E+01, 2.37644E+01, 2.40126E+01, 2.42608E+01,
    2.45091E+01, 2.47573E+01, 2.50055E+01, 2.52538E+01, 2.55020E+01, 2.57502E+01, 2.59985E+01,
    2.62467E+01, 2.64949E+01, 2.67432E+01, 2.69914E+01, 2.72396E+01, 2.74879E+01, 2.77361E+01,
    2.79843E+01, 2.82325E+01, 2.84808E+01, 2.87290E+01, 2.89772E+01, 2.92255E+01, 2.94737E+01,
    2.97219E+01, 2.99702E+01,
];

const LOG10_MASSES: [f64; 100] = [
    8.46618E+00, 8.31289E+00, 8.16164E+00, 8.02782E+00, 7.91852E+00, 7.82774E+00, 7.74884E+00,
    7.67793E+00, 7.61205E+00, 7.54858E+00, 7.48743E+00, 7.42967E+00, 7.37632E+00, 7.32775E+00,
    7.28281E+00, 7.24020E+00, 7.19866E+00, 7.15769E+00, 7.11745E+00, 7.07812E+00, 7.03990E+00,
    7.00295E+00, 6.96732E+00, 6.93301E+00, 6.89998E+00, 6.86825E+00, 6.83778E+00, 6.80856E+00,
    6.78048E+00, 6.75343E+00, 6.72725E+00, 6.70181E+00, 6.67699E+00, 6.65263E+00, 6.62862E+00,
    6.60480E+00, 6.58107E+00, 6.55744E+00, 6.53405E+00, 6.51103E+00, 6.48851E+00, 6.46663E+00,
    6.44550E+00, 6.42528E+00, 6.40601E+00, 6.38760E+00, 6.36995E+00, 6.35297E+00, 6.33654E+00,
    6.32056E+00, 6.30493E+00, 6.28955E+00, 6.27432E+00, 6.25912E+00, 6.24387E+00, 6.22859E+00,
    6.21337E+00, 6.19829E+00, 6.18344E+00, 6.16891E+00, 6.15479E+00, 6.14116E+00, 6.12812E+00,
    6.11569E+00, 6.10380E+00, 6.09240E+00, 6.08142E+00, 6.07081E+00, 6.06050E+00, 6.05042E+00,
    6.04053E+00, 6.03076E+00, 6.02112E+00, 6.01160E+00, 6.00219E+00, 5.99288E+00, 5.98368E+00,
    5.97457E+00, 5.96554E+00, 5.95661E+00, 5.94774E+00, 5.93897E+00, 5.93029E+00, 5.92171E+00,
    5.91325E+00, 5.90491E+00, 5.89671E+00, 5.88864E+00, 5.88073E+00, 5.87300E+00, 5.86546E+00,
    5.85814E+00, 5.85106E+00, 5.84424E+00, 5.83770E+00, 5.83146E+00, 5.82555E+00, 5.81998E+00,
    5.81477E+00, 5.80995E+00,
];

/// The embedded turnover-mass table.
///
/// ```
/// use radex_interp::TurnoverTable;
///
/// let table = TurnoverTable::new();
/// let m = table.mass(15.0).unwrap();
/// assert!(m > 1e6 && m < 1e7);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TurnoverTable {
    table: Table<'static>,
}

impl TurnoverTable {
    /// Borrow the embedded table.
    pub const fn new() -> Self {
        Self {
            table: Table {
                axis: &REDSHIFTS,
                values: &LOG10_MASSES,
                options: InterpOptions::CLAMPED,
            },
        }
    }

    /// `log10` of the turnover mass at redshift `z`.
    pub fn log10_mass(&self, z: f64) -> Result<f64, RadioError> {
        self.table.eval(z)
    }

    /// Turnover mass in Msun at redshift `z`.
    pub fn mass(&self, z: f64) -> Result<f64, RadioError> {
        Ok(10f64.powf(self.log10_mass(z)?))
    }

    /// Tabulated `(lowest, highest)` redshift.
    pub fn redshift_range(&self) -> (f64, f64) {
        self.table.range()
    }

    /// The tabulated `(redshift, log10 mass)` nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (f64, f64)> {
        REDSHIFTS.iter().copied().zip(LOG10_MASSES.iter().copied())
    }
}

impl Default for TurnoverTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Turnover mass in Msun at redshift `z`, clamped to the table edges.
pub fn turnover_mass(z: f64) -> Result<f64, RadioError> {
    TurnoverTable::new().mass(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabulated_nodes_are_reproduced() {
        let table = TurnoverTable::new();
        for (z, lm) in table.nodes() {
            let m = table.mass(z).unwrap();
            let expected = 10f64.powf(lm);
            assert!((m / expected - 1.0).abs() < 1e-9, "z = {z}: {m} vs {expected}");
        }
    }

    #[test]
    fn clamps_outside_table() {
        let table = TurnoverTable::new();
        let low_edge = 10f64.powf(LOG10_MASSES[0]);
        let high_edge = 10f64.powf(LOG10_MASSES[99]);
        assert_eq!(turnover_mass(0.0).unwrap(), low_edge);
        assert_eq!(turnover_mass(5.0).unwrap(), low_edge);
        assert_eq!(turnover_mass(35.0).unwrap(), high_edge);
        assert_eq!(table.redshift_range(), (REDSHIFTS[0], REDSHIFTS[99]));
    }

    #[test]
    fn midpoint_interpolates_in_log_mass() {
        let z = 0.5 * (REDSHIFTS[10] + REDSHIFTS[11]);
        let lm = 0.5 * (LOG10_MASSES[10] + LOG10_MASSES[11]);
        let got = TurnoverTable::new().log10_mass(z).unwrap();
        assert!((got - lm).abs() < 1e-9);
    }

    #[test]
    fn mass_decreases_with_redshift() {
        let table = TurnoverTable::new();
        let masses: Vec<f64> = [6.0, 10.0, 20.0, 29.0]
            .iter()
            .map(|&z| table.mass(z).unwrap())
            .collect();
        assert!(masses.windows(2).all(|w| w[0] > w[1]));
    }
}
