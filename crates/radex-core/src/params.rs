//! Astrophysical, cosmological and flag parameters read by the radio
//! background and field correction.
//!
//! These mirror the subset of the surrounding simulation's parameter
//! structs that this subsystem consumes. They are plain data with
//! reference defaults; call `validate()` once at setup.

use crate::error::ConfigError;

/// Astrophysical parameters of the two source populations.
#[derive(Clone, Debug, PartialEq)]
pub struct AstroParams {
    /// Star formation efficiency of atomically-cooled halos at 1e10 Msun.
    pub f_star10: f64,
    /// Star formation efficiency of molecularly-cooled halos at 1e7 Msun.
    pub f_star7_mini: f64,
    /// Spectral index of the emissivity history (`X_RAY_SPEC_INDEX`).
    pub x_ray_spec_index: f64,
    /// Radio-loudness scale factor of the atomic-cooling population.
    pub f_r: f64,
    /// Radio spectral exponent of the atomic-cooling population.
    pub a_r: f64,
    /// Radio-loudness scale factor of the minihalo population.
    pub f_r_mini: f64,
    /// Radio spectral exponent of the minihalo population.
    pub a_r_mini: f64,
    /// Redshift below which radio sources are excluded from the archive sum
    /// and the per-cell field is rescaled analytically.
    pub radio_zmin: f64,
}

impl Default for AstroParams {
    fn default() -> Self {
        Self {
            f_star10: 0.050_118_723_362_727_22,
            f_star7_mini: 0.01,
            x_ray_spec_index: 1.0,
            f_r: 1.0,
            a_r: 0.7,
            f_r_mini: 1.0,
            a_r_mini: 0.7,
            radio_zmin: 0.0,
        }
    }
}

impl AstroParams {
    /// Check every field against its physical domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("f_star10", self.f_star10)?;
        positive("f_star7_mini", self.f_star7_mini)?;
        finite("x_ray_spec_index", self.x_ray_spec_index)?;
        non_negative("f_r", self.f_r)?;
        finite("a_r", self.a_r)?;
        non_negative("f_r_mini", self.f_r_mini)?;
        finite("a_r_mini", self.a_r_mini)?;
        non_negative("radio_zmin", self.radio_zmin)?;
        Ok(())
    }
}

/// Cosmological parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CosmoParams {
    /// Hubble parameter in units of 100 km/s/Mpc.
    pub hlittle: f64,
    /// Baryon density parameter today.
    pub omb: f64,
    /// Total matter density parameter today.
    pub omm: f64,
}

impl Default for CosmoParams {
    fn default() -> Self {
        Self {
            hlittle: 0.6766,
            omb: 0.048_974_681_618_696_67,
            omm: 0.309_641_441_545_506_44,
        }
    }
}

impl CosmoParams {
    /// Check every field against its physical domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("hlittle", self.hlittle)?;
        positive("omb", self.omb)?;
        positive("omm", self.omm)?;
        if self.omb > self.omm {
            return Err(ConfigError::InvalidParameter {
                name: "omb",
                value: self.omb,
                constraint: "no larger than omm",
            });
        }
        if self.omm > 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "omm",
                value: self.omm,
                constraint: "at most 1 in a flat universe",
            });
        }
        Ok(())
    }
}

/// Population enable switches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagOptions {
    /// Include radio emission from atomically-cooled halos.
    pub use_radio_acg: bool,
    /// Include radio emission from molecularly-cooled minihalos.
    pub use_radio_mcg: bool,
}

impl Default for FlagOptions {
    fn default() -> Self {
        Self {
            use_radio_acg: true,
            use_radio_mcg: false,
        }
    }
}

/// One of the two source populations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Population {
    /// Atomically-cooled galaxies (the major-source population).
    Atomic,
    /// Molecularly-cooled minihalos (the minor-source population).
    Minihalo,
}

impl Population {
    /// Both populations, major first.
    pub const ALL: [Population; 2] = [Population::Atomic, Population::Minihalo];

    /// Star formation efficiency normalisation of this population.
    pub fn star_formation_efficiency(self, astro: &AstroParams) -> f64 {
        match self {
            Self::Atomic => astro.f_star10,
            Self::Minihalo => astro.f_star7_mini,
        }
    }

    /// Radio-loudness scale factor.
    pub fn radio_loudness(self, astro: &AstroParams) -> f64 {
        match self {
            Self::Atomic => astro.f_r,
            Self::Minihalo => astro.f_r_mini,
        }
    }

    /// Radio spectral exponent.
    pub fn spectral_exponent(self, astro: &AstroParams) -> f64 {
        match self {
            Self::Atomic => astro.a_r,
            Self::Minihalo => astro.a_r_mini,
        }
    }

    /// Whether this population's radio emission is switched on.
    pub fn enabled(self, flags: &FlagOptions) -> bool {
        match self {
            Self::Atomic => flags.use_radio_acg,
            Self::Minihalo => flags.use_radio_mcg,
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            constraint: "finite",
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            constraint: "finite and > 0",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            constraint: "finite and >= 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        AstroParams::default().validate().unwrap();
        CosmoParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_negative_loudness() {
        let astro = AstroParams {
            f_r: -1.0,
            ..AstroParams::default()
        };
        assert_eq!(
            astro.validate(),
            Err(ConfigError::InvalidParameter {
                name: "f_r",
                value: -1.0,
                constraint: "finite and >= 0",
            })
        );
    }

    #[test]
    fn rejects_nan_exponent() {
        let astro = AstroParams {
            a_r_mini: f64::NAN,
            ..AstroParams::default()
        };
        assert!(matches!(
            astro.validate(),
            Err(ConfigError::InvalidParameter { name: "a_r_mini", .. })
        ));
    }

    #[test]
    fn rejects_baryons_exceeding_matter() {
        let cosmo = CosmoParams {
            omb: 0.5,
            omm: 0.3,
            ..CosmoParams::default()
        };
        assert!(matches!(
            cosmo.validate(),
            Err(ConfigError::InvalidParameter { name: "omb", .. })
        ));
    }

    #[test]
    fn population_selects_its_parameters() {
        let astro = AstroParams {
            f_r: 2.0,
            a_r: 0.5,
            f_r_mini: 3.0,
            a_r_mini: 0.9,
            ..AstroParams::default()
        };
        assert_eq!(Population::Atomic.radio_loudness(&astro), 2.0);
        assert_eq!(Population::Minihalo.radio_loudness(&astro), 3.0);
        assert_eq!(Population::Atomic.spectral_exponent(&astro), 0.5);
        assert_eq!(Population::Minihalo.spectral_exponent(&astro), 0.9);
        assert_eq!(
            Population::Minihalo.star_formation_efficiency(&astro),
            astro.f_star7_mini
        );

        let flags = FlagOptions::default();
        assert!(Population::Atomic.enabled(&flags));
        assert!(!Population::Minihalo.enabled(&flags));
    }
}
