//! Conversion from an archived photon production rate to a star formation
//! rate density.

use radex_core::cosmology::{critical_density, SECONDS_PER_YEAR};
use radex_core::{AstroParams, CosmoParams, Population};

/// Star formation rate density in Msun / Mpc^3 / yr.
///
/// `phi` is the production rate as stored in the history archive and
/// `hubble_rate` the Hubble rate at `z` in 1/s, as supplied by the caller
/// (see [`radex_core::cosmology::hubble`]). The star formation efficiency
/// normalisation is chosen by `population`.
pub fn emissivity_to_sfrd(
    phi: f64,
    z: f64,
    hubble_rate: f64,
    astro: &AstroParams,
    cosmo: &CosmoParams,
    population: Population,
) -> f64 {
    phi * cosmo.omb
        * critical_density(cosmo.hlittle)
        * population.star_formation_efficiency(astro)
        * (1.0 + z).powf(astro.x_ray_spec_index + 1.0)
        * hubble_rate
        * SECONDS_PER_YEAR
}
