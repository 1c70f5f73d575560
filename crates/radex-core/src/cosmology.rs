//! Cosmology constants and the background expansion rate.
//!
//! Units follow the surrounding simulation: CGS for physical constants,
//! Msun/Mpc^3 for densities, 1/s for the Hubble rate.

use crate::params::CosmoParams;

/// Seconds in one year.
pub const SECONDS_PER_YEAR: f64 = 31_556_925.9747;

/// Hubble constant per unit `hlittle`, in 1/s.
pub const HUBBLE_PER_H: f64 = 3.2407e-18;

/// Gravitational constant in cm^3 / g / s^2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67259e-8;

/// Centimetres per megaparsec.
pub const CM_PER_MPC: f64 = 3.086e24;

/// Solar mass in grams.
pub const SOLAR_MASS_G: f64 = 1.989e33;

/// Radiation density parameter today.
pub const OMEGA_RADIATION: f64 = 8.6e-5;

/// Hubble constant today in 1/s.
pub fn hubble_constant(hlittle: f64) -> f64 {
    hlittle * HUBBLE_PER_H
}

/// Critical density today in Msun/Mpc^3.
pub fn critical_density(hlittle: f64) -> f64 {
    let h0 = hubble_constant(hlittle);
    3.0 * h0 * h0 / (8.0 * std::f64::consts::PI * GRAVITATIONAL_CONSTANT)
        * (CM_PER_MPC * CM_PER_MPC * CM_PER_MPC)
        / SOLAR_MASS_G
}

/// Hubble rate at redshift `z` in 1/s for flat LCDM with radiation.
pub fn hubble(z: f64, cosmo: &CosmoParams) -> f64 {
    let zp1 = 1.0 + z;
    let omega_lambda = 1.0 - cosmo.omm;
    hubble_constant(cosmo.hlittle)
        * (cosmo.omm * zp1 * zp1 * zp1 + OMEGA_RADIATION * zp1 * zp1 * zp1 * zp1 + omega_lambda)
            .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_density_matches_reference_value() {
        // 2.775e11 h^2 Msun/Mpc^3
        let rho = critical_density(1.0);
        assert!((rho / 2.775e11 - 1.0).abs() < 2e-3, "rho = {rho:E}");
        let rho_h = critical_density(0.7);
        assert!((rho_h / (rho * 0.49) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hubble_today_is_h0() {
        let cosmo = CosmoParams::default();
        let h = hubble(0.0, &cosmo);
        let h0 = hubble_constant(cosmo.hlittle);
        // radiation term makes it marginally larger than H0
        assert!(h > h0);
        assert!((h / h0 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn hubble_matter_dominated_scaling() {
        let cosmo = CosmoParams::default();
        let ratio = hubble(99.0, &cosmo) / hubble(49.0, &cosmo);
        // close to (100/50)^1.5 during matter domination
        assert!((ratio / 2f64.powf(1.5) - 1.0).abs() < 0.02, "ratio = {ratio}");
    }
}
