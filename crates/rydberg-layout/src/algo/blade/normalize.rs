//! Fitting a refined layout to the device's physical range.

use crate::device::Device;
use crate::error::{Error, Result};
use crate::geometry::{Layout, Point};

const TOLERANCE: f64 = 1e-9;

/// Rescales `layout` uniformly about its centroid so that its closest pair sits exactly at the
/// device minimum distance, then moves the centroid to the origin.
///
/// Uniform scaling keeps the [`spread_ratio`]. When that ratio is at most
/// `max_radius / min_distance`, the farthest pair ends up at most `max_radius` apart and every
/// atom lies within `max_radius` of the centroid.
pub fn enforce_min_max_dist_ratio(layout: &Layout, device: &Device) -> Result<Layout> {
    let Some(centroid) = layout.centroid() else {
        return Ok(layout.clone());
    };
    let recentered = layout.translated(&(-centroid.coords));

    let Some((a, b, closest)) = layout.min_pairwise_distance() else {
        return Ok(recentered);
    };
    if closest <= 0.0 {
        return Err(Error::MinDistanceViolated {
            a,
            b,
            distance: closest,
            min_distance: device.min_distance(),
        });
    }

    let factor = device.min_distance() / closest;
    tracing::trace!(factor, closest, "rescaling layout to the device minimum distance");
    Ok(recentered.scaled_about(&Point::origin(), factor))
}

/// Largest pairwise distance divided by the smallest one.
pub fn spread_ratio(layout: &Layout) -> Option<f64> {
    let (_, _, closest) = layout.min_pairwise_distance()?;
    let (_, _, farthest) = layout.max_pairwise_distance()?;
    Some(farthest / closest)
}

/// Fails on the first pair closer than the device minimum, then on the atom farthest beyond the
/// device radius.
pub fn check_feasible(layout: &Layout, device: &Device) -> Result<()> {
    let min_distance = device.min_distance();
    let max_radius = device.max_radius();

    for a in 0..layout.len() {
        for b in (a + 1)..layout.len() {
            let distance = layout.distance(a, b);
            if distance < min_distance * (1.0 - TOLERANCE) {
                return Err(Error::MinDistanceViolated {
                    a,
                    b,
                    distance,
                    min_distance,
                });
            }
        }
    }

    if let Some((variable, radius)) = layout.max_distance_from(&Point::origin()) {
        if radius > max_radius * (1.0 + TOLERANCE) {
            return Err(Error::OutsideRadius {
                variable,
                radius,
                max_radius,
            });
        }
    }

    Ok(())
}
