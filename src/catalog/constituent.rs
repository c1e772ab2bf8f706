//! Tidal constituents and their astronomical speeds.

use serde::{Deserialize, Serialize};

/// A named periodic tidal component.
///
/// The speed is the phase advance in degrees per hour. It is an astronomical
/// constant: identical for every station and every year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    /// Name of the constituent (e.g., "M2", "S2", "K1")
    pub name: String,
    /// Speed in degrees per hour
    pub speed: f64,
}

impl Constituent {
    /// Create a constituent with an explicit speed.
    pub fn new(name: impl Into<String>, speed: f64) -> Self {
        Self {
            name: name.into(),
            speed,
        }
    }

    /// Create one of the standard constituents, using its tabulated speed.
    ///
    /// Returns `None` for names not in [`constituent_speed`].
    pub fn standard(name: &str) -> Option<Self> {
        constituent_speed(name).map(|speed| Self::new(name, speed))
    }

    /// Period in hours (360° / speed).
    pub fn period_hours(&self) -> f64 {
        360.0 / self.speed
    }
}

/// Standard constituent speeds in degrees per hour.
///
/// Covers the 37 constituents used for NOAA harmonic predictions. Lookup is
/// case-insensitive.
///
/// # Supported Constituents
///
/// ## Semidiurnal
/// M2, S2, N2, K2, NU2, MU2, 2N2, LAM2, T2, R2, L2, 2SM2
///
/// ## Diurnal
/// K1, O1, P1, Q1, OO1, S1, M1, J1, RHO, 2Q1
///
/// ## Shallow water and overtides
/// M4, M6, M8, S4, S6, MN4, MS4, MK3, M3, 2MK3
///
/// ## Long period
/// MM, SSA, SA, MSF, MF
pub fn constituent_speed(name: &str) -> Option<f64> {
    match name.to_uppercase().as_str() {
        // Semidiurnal constituents
        "M2" => Some(28.9841042),
        "S2" => Some(30.0),
        "N2" => Some(28.4397295),
        "K2" => Some(30.0821373),
        "NU2" => Some(28.5125831),
        "MU2" => Some(27.9682084),
        "2N2" => Some(27.8953548),
        "LAM2" => Some(29.4556253),
        "T2" => Some(29.9589333),
        "R2" => Some(30.0410667),
        "L2" => Some(29.5284789),
        "2SM2" => Some(31.0158958),

        // Diurnal constituents
        "K1" => Some(15.0410686),
        "O1" => Some(13.9430356),
        "P1" => Some(14.9589314),
        "Q1" => Some(13.3986609),
        "OO1" => Some(16.1391017),
        "S1" => Some(15.0),
        "M1" => Some(14.4966939),
        "J1" => Some(15.5854433),
        "RHO" => Some(13.4715145),
        "2Q1" => Some(12.8542862),

        // Shallow water (overtides and compound tides)
        "M4" => Some(57.9682084),
        "M6" => Some(86.9523127),
        "M8" => Some(115.9364166),
        "S4" => Some(60.0),
        "S6" => Some(90.0),
        "MN4" => Some(57.4238337),
        "MS4" => Some(58.9841042),
        "MK3" => Some(44.0251729),
        "M3" => Some(43.4761563),
        "2MK3" => Some(42.9271398),

        // Long period
        "MM" => Some(0.5443747),
        "SSA" => Some(0.0821373),
        "SA" => Some(0.0410686),
        "MSF" => Some(1.0158958),
        "MF" => Some(1.0980331),

        _ => None,
    }
}
