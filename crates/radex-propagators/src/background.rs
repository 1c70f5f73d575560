//! Homogeneous radio background from sources older than the active
//! integration window.
//!
//! The active window `[z_now, zpp_max]` is integrated elsewhere. Sources
//! above `zpp_max` only survive in the history archive, so their radio
//! emission is reconstructed from the archived photon production rates and
//! summed with the rectangle rule up to just below the oldest archived
//! redshift.
//!
//! Constructed via the builder pattern: [`RadioBackground::builder`].

use radex_archive::{HistoryArchive, Quantity};
use radex_core::{AstroParams, ConfigError, CosmoParams, FlagOptions, Population, RadioError};

/// Number of rectangle-rule samples across the window.
pub const SUB_STEPS: usize = 1000;

/// Gap kept below the oldest archived rate redshift so the last sample
/// never lands on the open end of the archive coverage.
pub const UPPER_MARGIN: f64 = 0.01;

/// Brightness-temperature normalisation of the emission law, in kelvin.
pub const TEMPERATURE_NORMALISATION: f64 = 113.6161;

/// Observed frequency the background is evaluated at, in GHz.
pub const OBSERVED_FREQUENCY_GHZ: f64 = 0.15;

/// Frequency the radio-loudness scale factors are quoted at, in GHz.
pub const REFERENCE_FREQUENCY_GHZ: f64 = 1.4276;

/// Most negative integral still accepted as round-off around zero.
pub const NEGATIVE_TOLERANCE: f64 = -1.0e-8;

/// Switches applied on top of the physics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackgroundOptions {
    /// Report a zero background regardless of the integral. Validation still
    /// runs first, so a corrupt archive is reported even in this mode.
    pub force_zero: bool,
}

/// Integrator for the homogeneous radio background temperature.
///
/// ```
/// use radex_archive::{ArchiveRecord, ArchiveWriter};
/// use radex_propagators::RadioBackground;
///
/// let mut writer = ArchiveWriter::new();
/// for z in [35.0, 30.0, 25.0, 20.0] {
///     writer.push(ArchiveRecord {
///         temperature_redshift: z,
///         atomic_rate: 1.0e-3,
///         gas_temperature: 20.0,
///         minihalo_rate: 0.0,
///         rate_redshift: z,
///     }).unwrap();
/// }
/// let archive = writer.archive().unwrap();
///
/// let background = RadioBackground::builder().build().unwrap();
/// let t = background.homogeneous_temperature(&archive, 22.0, 18.0).unwrap();
/// assert!(t > 0.0);
/// // An empty window contributes nothing.
/// assert_eq!(background.homogeneous_temperature(&archive, 40.0, 18.0).unwrap(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct RadioBackground {
    astro: AstroParams,
    cosmo: CosmoParams,
    flags: FlagOptions,
    options: BackgroundOptions,
}

/// Builder for [`RadioBackground`].
///
/// Every input defaults to the reference parameter set.
pub struct RadioBackgroundBuilder {
    astro: AstroParams,
    cosmo: CosmoParams,
    flags: FlagOptions,
    options: BackgroundOptions,
}

impl RadioBackground {
    /// Create a new builder.
    pub fn builder() -> RadioBackgroundBuilder {
        RadioBackgroundBuilder {
            astro: AstroParams::default(),
            cosmo: CosmoParams::default(),
            flags: FlagOptions::default(),
            options: BackgroundOptions::default(),
        }
    }

    /// Astrophysical parameters in use.
    pub fn astro(&self) -> &AstroParams {
        &self.astro
    }

    /// Cosmological parameters in use.
    pub fn cosmo(&self) -> &CosmoParams {
        &self.cosmo
    }

    /// Population switches in use.
    pub fn flags(&self) -> &FlagOptions {
        &self.flags
    }

    /// Override switches in use.
    pub fn options(&self) -> &BackgroundOptions {
        &self.options
    }

    /// Redshift-independent part of a population's emission law, scaled to
    /// the current step redshift `redshift`. Zero for a disabled population.
    pub fn prefactor(&self, population: Population, redshift: f64) -> f64 {
        if !population.enabled(&self.flags) {
            return 0.0;
        }
        let a = population.spectral_exponent(&self.astro);
        TEMPERATURE_NORMALISATION
            * population.radio_loudness(&self.astro)
            * self.cosmo.omb
            * self.cosmo.hlittle.powi(2)
            * population.star_formation_efficiency(&self.astro)
            * (OBSERVED_FREQUENCY_GHZ / REFERENCE_FREQUENCY_GHZ).powf(a)
            * (1.0 + redshift).powf(3.0 + a)
    }

    /// The raw integral over `[zpp_max, z_max - UPPER_MARGIN]`, where
    /// `z_max` is the archive's largest rate redshift.
    ///
    /// Returns exactly zero when the window is empty. Disabled populations
    /// still have their rates looked up, with a zero prefactor.
    ///
    /// # Errors
    ///
    /// [`RadioError::ArchiveOutOfRange`] if any sample falls outside the
    /// archive's rate coverage, typically because `zpp_max` is below it.
    pub fn astro_temperature(
        &self,
        archive: &HistoryArchive<'_>,
        zpp_max: f64,
        redshift: f64,
    ) -> Result<f64, RadioError> {
        let z_lo = zpp_max;
        let z_hi = archive.max_redshift() - UPPER_MARGIN;
        if z_lo >= z_hi {
            return Ok(0.0);
        }
        let dz = (z_hi - z_lo) / (SUB_STEPS as f64 - 1.0);

        let pref_atomic = self.prefactor(Population::Atomic, redshift);
        let pref_minihalo = self.prefactor(Population::Minihalo, redshift);
        let tilt_atomic = self.astro.x_ray_spec_index - self.astro.a_r;
        let tilt_minihalo = self.astro.x_ray_spec_index - self.astro.a_r_mini;

        let mut z = z_lo;
        let mut total = 0.0;
        for _ in 0..SUB_STEPS {
            let phi = archive.interpolate(z, Quantity::AtomicRate)?;
            let phi_mini = archive.interpolate(z, Quantity::MinihaloRate)?;
            let atomic = pref_atomic * phi * (1.0 + z).powf(tilt_atomic) * dz;
            let minihalo = pref_minihalo * phi_mini * (1.0 + z).powf(tilt_minihalo) * dz;
            if z > self.astro.radio_zmin {
                total += atomic + minihalo;
            }
            z += dz;
        }
        Ok(total)
    }

    /// The homogeneous background temperature in kelvin.
    ///
    /// Applies the physical sanity check to [`astro_temperature`] and then
    /// the [`BackgroundOptions::force_zero`] override.
    ///
    /// # Errors
    ///
    /// Everything [`astro_temperature`] returns, plus
    /// [`RadioError::NegativeTemperature`] for an integral below
    /// [`NEGATIVE_TOLERANCE`].
    ///
    /// [`astro_temperature`]: Self::astro_temperature
    pub fn homogeneous_temperature(
        &self,
        archive: &HistoryArchive<'_>,
        zpp_max: f64,
        redshift: f64,
    ) -> Result<f64, RadioError> {
        let value = self.astro_temperature(archive, zpp_max, redshift)?;
        if value < NEGATIVE_TOLERANCE {
            return Err(RadioError::NegativeTemperature { value });
        }
        if self.options.force_zero {
            return Ok(0.0);
        }
        Ok(value)
    }
}

impl RadioBackgroundBuilder {
    /// Set the astrophysical parameters.
    pub fn astro(mut self, astro: AstroParams) -> Self {
        self.astro = astro;
        self
    }

    /// Set the cosmological parameters.
    pub fn cosmo(mut self, cosmo: CosmoParams) -> Self {
        self.cosmo = cosmo;
        self
    }

    /// Set the population switches.
    pub fn flags(mut self, flags: FlagOptions) -> Self {
        self.flags = flags;
        self
    }

    /// Set the override switches.
    pub fn options(mut self, options: BackgroundOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the parameters and build the integrator.
    pub fn build(self) -> Result<RadioBackground, ConfigError> {
        self.astro.validate()?;
        self.cosmo.validate()?;
        Ok(RadioBackground {
            astro: self.astro,
            cosmo: self.cosmo,
            flags: self.flags,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radex_test_utils::{archive_from_fn, constant_rate_archive};

    fn both_enabled() -> FlagOptions {
        FlagOptions {
            use_radio_acg: true,
            use_radio_mcg: true,
        }
    }

    /// Emission-law tilt cancelled so the integrand is constant in z.
    fn flat_astro() -> AstroParams {
        AstroParams {
            x_ray_spec_index: 0.7,
            a_r: 0.7,
            a_r_mini: 0.7,
            ..AstroParams::default()
        }
    }

    #[test]
    fn prefactor_matches_emission_law() {
        let bg = RadioBackground::builder().build().unwrap();
        let astro = AstroParams::default();
        let cosmo = CosmoParams::default();
        let expected = 113.6161
            * astro.f_r
            * cosmo.omb
            * cosmo.hlittle
            * cosmo.hlittle
            * astro.f_star10
            * (0.15f64 / 1.4276).powf(astro.a_r)
            * 11.0f64.powf(3.0 + astro.a_r);
        let got = bg.prefactor(Population::Atomic, 10.0);
        assert!((got - expected).abs() <= 1e-12 * expected, "{got} vs {expected}");
        assert_eq!(bg.prefactor(Population::Minihalo, 10.0), 0.0);
    }

    #[test]
    fn empty_window_is_exactly_zero() {
        let buf = constant_rate_archive(30.0, 10.0, 21, 1.0, 1.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder().flags(both_enabled()).build().unwrap();
        for zpp_max in [30.0 - UPPER_MARGIN, 30.0, 45.0] {
            assert_eq!(bg.astro_temperature(&archive, zpp_max, 8.0), Ok(0.0));
        }
    }

    #[test]
    fn both_populations_disabled_is_zero() {
        let buf = constant_rate_archive(30.0, 10.0, 21, 5.0, 7.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder()
            .flags(FlagOptions {
                use_radio_acg: false,
                use_radio_mcg: false,
            })
            .build()
            .unwrap();
        assert_eq!(bg.homogeneous_temperature(&archive, 12.0, 9.0), Ok(0.0));
    }

    #[test]
    fn flat_integrand_matches_closed_form() {
        let phi = 2.0e-3;
        let buf = constant_rate_archive(30.0, 10.0, 21, phi, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder().astro(flat_astro()).build().unwrap();

        let (z_lo, z_now) = (12.0, 9.0);
        let z_hi = 30.0 - UPPER_MARGIN;
        let width = z_hi - z_lo;
        let expected = bg.prefactor(Population::Atomic, z_now) * phi * width * 1000.0 / 999.0;
        let got = bg.astro_temperature(&archive, z_lo, z_now).unwrap();
        assert!((got - expected).abs() <= 1e-10 * expected, "{got} vs {expected}");
    }

    #[test]
    fn contributions_are_additive_across_populations() {
        let buf = archive_from_fn(30.0, 10.0, 41, |z| (1e-3 * z, 4e-4 * z, 100.0));
        let archive = HistoryArchive::new(&buf).unwrap();
        let atomic_only = RadioBackground::builder().build().unwrap();
        let minihalo_only = RadioBackground::builder()
            .flags(FlagOptions {
                use_radio_acg: false,
                use_radio_mcg: true,
            })
            .build()
            .unwrap();
        let both = RadioBackground::builder().flags(both_enabled()).build().unwrap();

        let a = atomic_only.astro_temperature(&archive, 15.0, 14.0).unwrap();
        let m = minihalo_only.astro_temperature(&archive, 15.0, 14.0).unwrap();
        let t = both.astro_temperature(&archive, 15.0, 14.0).unwrap();
        assert!(a > 0.0 && m > 0.0);
        assert!((t - (a + m)).abs() <= 1e-12 * t);
    }

    #[test]
    fn radio_loudness_scales_linearly() {
        let buf = constant_rate_archive(30.0, 10.0, 21, 1e-3, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let base = RadioBackground::builder().build().unwrap();
        let loud = RadioBackground::builder()
            .astro(AstroParams {
                f_r: 3.0,
                ..AstroParams::default()
            })
            .build()
            .unwrap();
        let t1 = base.astro_temperature(&archive, 11.0, 10.5).unwrap();
        let t3 = loud.astro_temperature(&archive, 11.0, 10.5).unwrap();
        assert!((t3 - 3.0 * t1).abs() <= 1e-12 * t3);
    }

    #[test]
    fn cutoff_above_window_excludes_every_sample() {
        let buf = constant_rate_archive(30.0, 10.0, 21, 1e-3, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder()
            .astro(AstroParams {
                radio_zmin: 35.0,
                ..AstroParams::default()
            })
            .build()
            .unwrap();
        assert_eq!(bg.astro_temperature(&archive, 12.0, 9.0), Ok(0.0));
    }

    #[test]
    fn window_below_archive_is_range_error() {
        let buf = constant_rate_archive(30.0, 10.0, 21, 1e-3, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder().build().unwrap();
        assert!(matches!(
            bg.homogeneous_temperature(&archive, 8.0, 7.0),
            Err(RadioError::ArchiveOutOfRange { redshift, z_min, z_max })
                if redshift == 8.0 && z_min == 10.0 && z_max == 30.0
        ));
    }

    #[test]
    fn lookups_run_even_below_cutoff() {
        // Every sample is excluded by the cutoff, but the first one is still
        // outside the archive and must be reported.
        let buf = constant_rate_archive(30.0, 10.0, 21, 1e-3, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder()
            .astro(AstroParams {
                radio_zmin: 50.0,
                ..AstroParams::default()
            })
            .build()
            .unwrap();
        assert!(bg.astro_temperature(&archive, 5.0, 4.0).is_err());
    }

    #[test]
    fn negative_integral_is_rejected_even_when_forced_to_zero() {
        let buf = constant_rate_archive(30.0, 10.0, 21, -1.0, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        for force_zero in [false, true] {
            let bg = RadioBackground::builder()
                .options(BackgroundOptions { force_zero })
                .build()
                .unwrap();
            assert!(matches!(
                bg.homogeneous_temperature(&archive, 12.0, 9.0),
                Err(RadioError::NegativeTemperature { value }) if value < 0.0
            ));
        }
    }

    #[test]
    fn round_off_below_zero_is_tolerated() {
        let buf = constant_rate_archive(30.0, 10.0, 21, -1e-18, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder().build().unwrap();
        let t = bg.homogeneous_temperature(&archive, 12.0, 9.0).unwrap();
        assert!(t < 0.0 && t >= NEGATIVE_TOLERANCE);
    }

    #[test]
    fn force_zero_overrides_valid_result() {
        let buf = constant_rate_archive(30.0, 10.0, 21, 1e-3, 0.0);
        let archive = HistoryArchive::new(&buf).unwrap();
        let bg = RadioBackground::builder()
            .options(BackgroundOptions { force_zero: true })
            .build()
            .unwrap();
        assert!(bg.astro_temperature(&archive, 12.0, 9.0).unwrap() > 0.0);
        assert_eq!(bg.homogeneous_temperature(&archive, 12.0, 9.0), Ok(0.0));
    }

    #[test]
    fn builder_rejects_invalid_parameters() {
        let err = RadioBackground::builder()
            .cosmo(CosmoParams {
                hlittle: -1.0,
                ..CosmoParams::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "hlittle", .. }));
        assert!(RadioBackground::builder()
            .astro(AstroParams {
                a_r: f64::NAN,
                ..AstroParams::default()
            })
            .build()
            .is_err());
    }
}
