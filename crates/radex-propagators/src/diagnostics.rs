//! Tabular diagnostic dumps for offline inspection.
//!
//! Two row formats, both whitespace separated with C-style `%E` numbers:
//!
//! - halo mass function: `z  dndm(m_0)  dndm(m_1) ... ` over
//!   [`HMF_POINTS`] masses log-spaced from `1e2` to `1e20` Msun;
//! - minihalo emissivity: `z  Nion`.
//!
//! The physics is injected through [`HaloMassFunction`] and
//! [`MinihaloEmissivity`]; this module only samples and formats. The
//! format carries no stability guarantee.

use std::error::Error;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use radex_core::{AstroParams, RadioError};
use radex_interp::turnover_mass;

/// Mass samples per halo mass function row.
pub const HMF_POINTS: usize = 1000;
/// log10 of the smallest sampled halo mass.
pub const HMF_LOG10_MASS_MIN: f64 = 2.0;
/// log10 of the largest sampled halo mass.
pub const HMF_LOG10_MASS_MAX: f64 = 20.0;

/// Conventional file name of the halo mass function dump.
pub const HMF_TABLE_FILE: &str = "HMF_Table_tmp.txt";
/// Conventional file name of the minihalo emissivity dump.
pub const NION_TABLE_FILE: &str = "Nion_Table_tmp.txt";

/// Halo mass function fit, selected by the simulation's numeric code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HmfKind {
    /// Press-Schechter (code 0).
    PressSchechter,
    /// Sheth-Tormen (code 1).
    ShethTormen,
    /// Watson FOF (code 2).
    WatsonFof,
    /// Redshift-dependent Watson FOF (code 3).
    WatsonFofRedshift,
}

impl HmfKind {
    /// Decode the numeric selector.
    ///
    /// # Errors
    ///
    /// [`RadioError::InvalidSelector`] for anything outside 0..=3.
    pub fn from_code(code: i32) -> Result<Self, RadioError> {
        match code {
            0 => Ok(Self::PressSchechter),
            1 => Ok(Self::ShethTormen),
            2 => Ok(Self::WatsonFof),
            3 => Ok(Self::WatsonFofRedshift),
            _ => Err(RadioError::InvalidSelector {
                selector: "halo mass function",
                value: code,
                allowed: "[0, 1, 2, 3]",
            }),
        }
    }
}

/// Halo mass function supplied by the surrounding simulation.
pub trait HaloMassFunction {
    /// Linear growth factor at `z`.
    fn growth_factor(&self, z: f64) -> f64;

    /// Comoving number density per unit mass, dn/dM, of halos of `mass`
    /// Msun at redshift `z` with growth factor `growth`.
    fn dndm(&self, kind: HmfKind, z: f64, growth: f64, mass: f64) -> f64;
}

/// Minihalo ionizing emissivity model supplied by the surrounding
/// simulation.
pub trait MinihaloEmissivity {
    /// Atomic cooling mass threshold at `z`, in Msun.
    fn atomic_cooling_threshold(&self, z: f64) -> f64;

    /// Ionizing photon number from molecularly-cooled halos at `z`.
    fn nion_minihalo(
        &self,
        z: f64,
        turnover_mass: f64,
        atomic_threshold: f64,
        f_star7_mini: f64,
    ) -> f64;
}

/// Errors from writing a diagnostic row.
#[derive(Debug)]
pub enum DumpError {
    /// The sink rejected the write.
    Io(io::Error),
    /// The row could not be computed.
    Radio(RadioError),
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "diagnostic dump i/o: {e}"),
            Self::Radio(e) => write!(f, "diagnostic dump: {e}"),
        }
    }
}

impl Error for DumpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Radio(e) => Some(e),
        }
    }
}

impl From<io::Error> for DumpError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RadioError> for DumpError {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

/// Formats a float like C's `%E`: six fractional digits and a signed
/// exponent of at least two digits.
///
/// ```
/// use radex_propagators::diagnostics::Exp;
///
/// assert_eq!(Exp(12.5).to_string(), "1.250000E+01");
/// assert_eq!(Exp(-3.0e-7).to_string(), "-3.000000E-07");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exp(pub f64);

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("NAN");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "INF" } else { "-INF" });
        }
        let s = format!("{v:.6E}");
        match s.split_once('E') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{mantissa}E{sign}{:02}", exp.abs())
            }
            None => f.write_str(&s),
        }
    }
}

/// Append one halo mass function row for redshift `z`.
pub fn write_hmf_row<W: Write + ?Sized>(
    out: &mut W,
    z: f64,
    kind: HmfKind,
    hmf: &dyn HaloMassFunction,
) -> Result<(), DumpError> {
    let growth = hmf.growth_factor(z);
    let dlm = (HMF_LOG10_MASS_MAX - HMF_LOG10_MASS_MIN) / (HMF_POINTS as f64 - 1.0);
    let mut lm = HMF_LOG10_MASS_MIN;

    let mut row = format!("{}  ", Exp(z));
    for _ in 0..HMF_POINTS {
        let mass = 10f64.powf(lm);
        row.push_str(&format!("{}  ", Exp(hmf.dndm(kind, z, growth, mass))));
        lm += dlm;
    }
    row.push('\n');
    out.write_all(row.as_bytes())?;
    Ok(())
}

/// Append one halo mass function row, decoding the numeric HMF selector
/// first. Nothing is written for an invalid selector.
pub fn write_hmf_row_code<W: Write + ?Sized>(
    out: &mut W,
    z: f64,
    code: i32,
    hmf: &dyn HaloMassFunction,
) -> Result<(), DumpError> {
    let kind = HmfKind::from_code(code)?;
    write_hmf_row(out, z, kind, hmf)
}

/// Append one `z  Nion` row of the minihalo emissivity.
pub fn write_nion_row<W: Write + ?Sized>(
    out: &mut W,
    z: f64,
    astro: &AstroParams,
    model: &dyn MinihaloEmissivity,
) -> Result<(), DumpError> {
    let mturn = turnover_mass(z)?;
    let matom = model.atomic_cooling_threshold(z);
    let nion = model.nion_minihalo(z, mturn, matom, astro.f_star7_mini);
    writeln!(out, "{}  {}", Exp(z), Exp(nion))?;
    Ok(())
}

/// Open `path` for appending, creating it if needed.
pub fn append_to(path: impl AsRef<Path>) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

/// A minihalo emissivity dump attached to the step driver: one row per
/// step, written to `sink`.
pub struct EmissivityDump {
    model: Box<dyn MinihaloEmissivity + Send>,
    sink: Box<dyn Write + Send>,
}

impl EmissivityDump {
    /// Dump rows computed by `model` into `sink`.
    pub fn new(model: Box<dyn MinihaloEmissivity + Send>, sink: Box<dyn Write + Send>) -> Self {
        Self { model, sink }
    }

    /// Write and flush the row for redshift `z`.
    pub fn record(&mut self, z: f64, astro: &AstroParams) -> Result<(), DumpError> {
        write_nion_row(&mut *self.sink, z, astro, &*self.model)?;
        self.sink.flush()?;
        Ok(())
    }
}

impl fmt::Debug for EmissivityDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissivityDump").finish_non_exhaustive()
    }
}
