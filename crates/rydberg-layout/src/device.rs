//! Device constraints and the strength/distance calibration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};

/// `C6` coefficient (rad/µs · µm⁶) of the `|70S⟩` Rydberg level.
pub const C6_RYDBERG_70: f64 = 5_420_158.53;
/// `C6` coefficient (rad/µs · µm⁶) of the `|60S⟩` Rydberg level.
pub const C6_RYDBERG_60: f64 = 865_723.02;

/// Monotonic map between an interaction strength and a physical separation.
pub trait Calibration: fmt::Debug + Send + Sync {
    fn strength_to_distance(&self, strength: f64) -> f64;
    fn distance_to_strength(&self, distance: f64) -> f64;
}

/// Van der Waals calibration: `U = C6 / r^6`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RydbergCalibration {
    pub c6: f64,
}

impl RydbergCalibration {
    pub fn new(c6: f64) -> Self {
        Self { c6 }
    }
}

impl Calibration for RydbergCalibration {
    fn strength_to_distance(&self, strength: f64) -> f64 {
        (self.c6 / strength).powf(1.0 / 6.0)
    }

    fn distance_to_strength(&self, distance: f64) -> f64 {
        self.c6 / distance.powi(6)
    }
}

#[derive(Debug, Clone)]
pub struct Device {
    name: String,
    min_distance: f64,
    max_radius: f64,
    pre_calibrated_layouts: usize,
    min_layout_traps: usize,
    calibration: Arc<dyn Calibration>,
}

impl Device {
    pub fn new(
        name: impl Into<String>,
        min_distance: f64,
        max_radius: f64,
        calibration: impl Calibration + 'static,
    ) -> Result<Self> {
        check_positive("min_distance", min_distance)?;
        check_positive("max_radius", max_radius)?;
        Ok(Self {
            name: name.into(),
            min_distance,
            max_radius,
            pre_calibrated_layouts: 0,
            min_layout_traps: 1,
            calibration: Arc::new(calibration),
        })
    }

    /// Analog device preset (`|60S⟩`, 5 µm minimum spacing, 38 µm radius).
    pub fn analog() -> Self {
        Self {
            name: "AnalogDevice".to_string(),
            min_distance: 5.0,
            max_radius: 38.0,
            pre_calibrated_layouts: 1,
            min_layout_traps: 1,
            calibration: Arc::new(RydbergCalibration::new(C6_RYDBERG_60)),
        }
    }

    /// Digital-analog device preset (`|70S⟩`, 4 µm minimum spacing, 50 µm radius).
    pub fn digital_analog() -> Self {
        Self {
            name: "DigitalAnalogDevice".to_string(),
            min_distance: 4.0,
            max_radius: 50.0,
            pre_calibrated_layouts: 1,
            min_layout_traps: 1,
            calibration: Arc::new(RydbergCalibration::new(C6_RYDBERG_70)),
        }
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Result<Self> {
        check_positive("min_distance", min_distance)?;
        self.min_distance = min_distance;
        Ok(self)
    }

    pub fn with_max_radius(mut self, max_radius: f64) -> Result<Self> {
        check_positive("max_radius", max_radius)?;
        self.max_radius = max_radius;
        Ok(self)
    }

    pub fn with_calibration(mut self, calibration: impl Calibration + 'static) -> Self {
        self.calibration = Arc::new(calibration);
        self
    }

    pub fn with_pre_calibrated_layouts(mut self, count: usize) -> Self {
        self.pre_calibrated_layouts = count;
        self
    }

    pub fn with_min_layout_traps(mut self, traps: usize) -> Self {
        self.min_layout_traps = traps;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn pre_calibrated_layouts(&self) -> usize {
        self.pre_calibrated_layouts
    }

    pub fn min_layout_traps(&self) -> usize {
        self.min_layout_traps
    }

    pub fn strength_to_distance(&self, strength: f64) -> f64 {
        self.calibration.strength_to_distance(strength)
    }

    pub fn distance_to_strength(&self, distance: f64) -> f64 {
        self.calibration.distance_to_strength(distance)
    }

    /// Calibrated separation for `strength`, floored at the minimum distance.
    pub fn target_distance(&self, strength: f64) -> Result<f64> {
        let d = self.strength_to_distance(strength);
        if !d.is_finite() {
            return Err(Error::degenerate(format!(
                "interaction strength {strength} maps to non-finite distance {d}"
            )));
        }
        Ok(d.max(self.min_distance))
    }

    /// `max_radius / min_distance`, the widest spread a register can have.
    pub fn distance_ratio(&self) -> f64 {
        self.max_radius / self.min_distance
    }
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::config(format!(
            "{field} must be finite and positive, got {value}"
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceKind {
    Analog,
    #[default]
    DigitalAnalog,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Analog => "analog",
            DeviceKind::DigitalAnalog => "digital-analog",
        }
    }

    pub fn device(self) -> Device {
        match self {
            DeviceKind::Analog => Device::analog(),
            DeviceKind::DigitalAnalog => Device::digital_analog(),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "analog" | "analogdevice" => Ok(DeviceKind::Analog),
            "digital-analog" | "digitalanalogdevice" => Ok(DeviceKind::DigitalAnalog),
            other => Err(Error::config(format!("unknown device: {other}"))),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
