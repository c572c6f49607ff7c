//! # Soil Stratigraphy
//!
//! Ordered soil layers and the depth queries the analyzers run against them:
//! point lookup for the bearing layer, range slicing for settlement
//! integration, overburden pressure, and submerged-density averaging for
//! buoyancy.
//!
//! Layers are immutable once loaded for a request. A query outside the
//! covered depth range is a hard `SoilData` error rather than a
//! nearest-layer guess.

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};
use crate::units::WATER_UNIT_WEIGHT;

/// Depth bookkeeping tolerance between adjacent layers (m)
const DEPTH_TOLERANCE: f64 = 1e-6;

/// One soil layer between two depths below grade.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Silty clay",
///   "top_depth_m": 0.0,
///   "bottom_depth_m": 12.0,
///   "unit_weight_kn_m3": 18.5,
///   "compression_modulus_mpa": 15.0,
///   "dynamic_modulus_mpa": null,
///   "poisson_ratio": 0.3,
///   "friction_coefficient": 0.3,
///   "bearing_capacity_kpa": 220.0,
///   "eta_b": 0.3,
///   "eta_d": 1.6,
///   "zeta_a": 1.3
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Stratum name as logged in the site investigation
    pub name: String,

    /// Depth of the layer top below grade (m)
    pub top_depth_m: f64,

    /// Depth of the layer bottom below grade (m)
    pub bottom_depth_m: f64,

    /// Natural unit weight (kN/m³)
    pub unit_weight_kn_m3: f64,

    /// Static compression modulus Es (MPa)
    pub compression_modulus_mpa: f64,

    /// Measured dynamic compression modulus (MPa); estimated from the
    /// static value when absent
    pub dynamic_modulus_mpa: Option<f64>,

    /// Poisson ratio ν
    pub poisson_ratio: f64,

    /// Base friction coefficient μ against this layer
    pub friction_coefficient: f64,

    /// Characteristic bearing capacity fak (kPa)
    pub bearing_capacity_kpa: f64,

    /// Width correction coefficient ηb
    pub eta_b: f64,

    /// Depth correction coefficient ηd
    pub eta_d: f64,

    /// Seismic bearing adjustment coefficient ζa
    pub zeta_a: f64,
}

impl SoilLayer {
    /// Layer thickness (m)
    pub fn thickness_m(&self) -> f64 {
        self.bottom_depth_m - self.top_depth_m
    }

    /// Effective (submerged) unit weight, floored at zero (kN/m³)
    pub fn submerged_unit_weight_kn_m3(&self) -> f64 {
        (self.unit_weight_kn_m3 - WATER_UNIT_WEIGHT).max(0.0)
    }

    /// Dynamic compression modulus (MPa), estimated when not measured
    pub fn dynamic_modulus_or_estimate_mpa(&self) -> f64 {
        self.dynamic_modulus_mpa
            .unwrap_or_else(|| crate::units::dynamic_modulus_from_static(self.compression_modulus_mpa))
    }

    fn validate(&self, index: usize) -> VerifyResult<()> {
        if self.thickness_m() <= 0.0 {
            return Err(VerifyError::soil_data(format!(
                "layer {} '{}' has non-positive thickness ({:.3} m to {:.3} m)",
                index, self.name, self.top_depth_m, self.bottom_depth_m
            )));
        }
        if self.unit_weight_kn_m3 <= 0.0 {
            return Err(VerifyError::soil_data(format!(
                "layer {} '{}' has non-positive unit weight",
                index, self.name
            )));
        }
        if self.compression_modulus_mpa <= 0.0 {
            return Err(VerifyError::soil_data(format!(
                "layer {} '{}' has non-positive compression modulus",
                index, self.name
            )));
        }
        if self.poisson_ratio <= 0.0 || self.poisson_ratio >= 0.5 {
            return Err(VerifyError::soil_data(format!(
                "layer {} '{}' Poisson ratio {} outside (0, 0.5)",
                index, self.name, self.poisson_ratio
            )));
        }
        Ok(())
    }
}

/// A layer reference with the overlap length it contributes to a depth-range
/// query, for depth-weighted integration downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSlice {
    /// Index into the profile's layer sequence
    pub layer_index: usize,

    /// Length of the query range falling inside this layer (m)
    pub overlap_m: f64,
}

/// The ordered stratigraphy below grade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilProfile {
    pub layers: Vec<SoilLayer>,
}

impl SoilProfile {
    pub fn new(layers: Vec<SoilLayer>) -> Self {
        SoilProfile { layers }
    }

    /// Validate ordering, overlap, and per-layer properties
    pub fn validate(&self) -> VerifyResult<()> {
        if self.layers.is_empty() {
            return Err(VerifyError::soil_data("soil profile contains no layers"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(i)?;
            if i > 0 {
                let previous = &self.layers[i - 1];
                let step = layer.top_depth_m - previous.bottom_depth_m;
                if step < -DEPTH_TOLERANCE {
                    return Err(VerifyError::soil_data(format!(
                        "layers '{}' and '{}' overlap at depth {:.3} m",
                        previous.name, layer.name, layer.top_depth_m
                    )));
                }
                if step > DEPTH_TOLERANCE {
                    return Err(VerifyError::soil_data(format!(
                        "coverage gap between '{}' (bottom {:.3} m) and '{}' (top {:.3} m)",
                        previous.name, previous.bottom_depth_m, layer.name, layer.top_depth_m
                    )));
                }
            }
        }
        Ok(())
    }

    /// Depth of the deepest covered point (m)
    pub fn covered_depth_m(&self) -> f64 {
        self.layers.last().map(|l| l.bottom_depth_m).unwrap_or(0.0)
    }

    /// Locate the layer whose [top, bottom) interval contains a depth.
    ///
    /// The bottom of the deepest layer is treated as inclusive so a
    /// foundation bearing exactly at the profile floor still resolves.
    pub fn layer_at(&self, depth_m: f64) -> VerifyResult<&SoilLayer> {
        if depth_m < 0.0 {
            return Err(VerifyError::soil_data(format!(
                "query depth {:.3} m is above grade",
                depth_m
            )));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            let is_last = i + 1 == self.layers.len();
            let within = depth_m >= layer.top_depth_m - DEPTH_TOLERANCE
                && (depth_m < layer.bottom_depth_m
                    || (is_last && depth_m <= layer.bottom_depth_m + DEPTH_TOLERANCE));
            if within {
                return Ok(layer);
            }
        }
        Err(VerifyError::soil_data(format!(
            "no layer covers depth {:.3} m (profile covers 0 to {:.3} m)",
            depth_m,
            self.covered_depth_m()
        )))
    }

    /// Ordered sublist of layers intersecting [top, bottom], each with its
    /// overlap length. Fails when the range is not fully covered.
    pub fn slices_in_range(&self, top_m: f64, bottom_m: f64) -> VerifyResult<Vec<LayerSlice>> {
        if bottom_m <= top_m {
            return Err(VerifyError::soil_data(format!(
                "invalid depth range [{:.3}, {:.3}] m",
                top_m, bottom_m
            )));
        }
        if top_m < -DEPTH_TOLERANCE || bottom_m > self.covered_depth_m() + DEPTH_TOLERANCE {
            return Err(VerifyError::soil_data(format!(
                "depth range [{:.3}, {:.3}] m outside profile coverage (0 to {:.3} m)",
                top_m,
                bottom_m,
                self.covered_depth_m()
            )));
        }
        let mut slices = Vec::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let overlap =
                layer.bottom_depth_m.min(bottom_m) - layer.top_depth_m.max(top_m);
            if overlap > DEPTH_TOLERANCE {
                slices.push(LayerSlice {
                    layer_index: i,
                    overlap_m: overlap,
                });
            }
        }
        if slices.is_empty() {
            return Err(VerifyError::soil_data(format!(
                "no layer intersects depth range [{:.3}, {:.3}] m",
                top_m, bottom_m
            )));
        }
        Ok(slices)
    }

    /// Effective overburden pressure at a depth, kPa.
    ///
    /// Natural unit weight above the water table, submerged weight below.
    pub fn effective_overburden_kpa(
        &self,
        depth_m: f64,
        water_depth_m: Option<f64>,
    ) -> VerifyResult<f64> {
        let slices = self.slices_in_range(0.0, depth_m)?;
        let water = water_depth_m.unwrap_or(f64::INFINITY);
        let mut pressure = 0.0;
        for slice in &slices {
            let layer = &self.layers[slice.layer_index];
            let top = layer.top_depth_m.max(0.0);
            let bottom = layer.bottom_depth_m.min(depth_m);
            let dry_thickness = (bottom.min(water) - top).max(0.0);
            let wet_thickness = (bottom - top.max(water)).max(0.0);
            pressure += layer.unit_weight_kn_m3 * dry_thickness
                + layer.submerged_unit_weight_kn_m3() * wet_thickness;
        }
        Ok(pressure)
    }

    /// Depth-weighted average effective unit weight of the soil between the
    /// water table and the bearing plane (kN/m³), used for buoyant uplift.
    ///
    /// Returns 0.0 when the water table sits below the bearing plane.
    pub fn average_submerged_weight_kn_m3(
        &self,
        water_depth_m: f64,
        buried_depth_m: f64,
    ) -> VerifyResult<f64> {
        if water_depth_m >= buried_depth_m {
            return Ok(0.0);
        }
        let slices = self.slices_in_range(water_depth_m.max(0.0), buried_depth_m)?;
        let mut weighted = 0.0;
        let mut total = 0.0;
        for slice in &slices {
            let layer = &self.layers[slice.layer_index];
            weighted += layer.submerged_unit_weight_kn_m3() * slice.overlap_m;
            total += slice.overlap_m;
        }
        Ok(weighted / total)
    }

    /// Weighted average unit weight of the soil flanking the foundation,
    /// grade down to the bearing plane (kN/m³). Feeds the depth correction
    /// of the allowable bearing capacity.
    pub fn average_flanking_weight_kn_m3(
        &self,
        buried_depth_m: f64,
        water_depth_m: Option<f64>,
    ) -> VerifyResult<f64> {
        let pressure = self.effective_overburden_kpa(buried_depth_m, water_depth_m)?;
        Ok(pressure / buried_depth_m)
    }
}
