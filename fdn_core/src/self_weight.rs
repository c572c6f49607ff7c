//! # Self-Weight, Backfill, and Buoyancy
//!
//! Net effective weight bearing on the soil:
//!
//! Gk = G1 (concrete) + G2 (soil prism over the base) - Gw (buoyant uplift)
//!
//! Concrete volume is the body of revolution below grade plus the cushion;
//! the soil term is the cylinder of excavated ground above the base slab
//! minus the concrete it contains; uplift applies only when the water table
//! sits above the bearing plane, using the depth-averaged effective weight
//! of the submerged strata. The excavation cone (working margin 0.5 m,
//! 1:1 batter) is reported for earthworks takeoff.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::VerifyResult;
use crate::geometry::FoundationGeometry;
use crate::materials::ConcreteMaterial;
use crate::soil::SoilProfile;

/// Working margin around the slab at the pit floor (m)
const PIT_MARGIN: f64 = 0.5;

/// Inputs for the self-weight roll-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfWeightInput {
    pub geometry: FoundationGeometry,
    pub material: ConcreteMaterial,

    /// Unit weight of the compacted cover soil over the slab (kN/m³)
    pub cover_soil_weight_kn_m3: f64,

    /// Groundwater depth below grade (m); `None` means no groundwater
    pub water_depth_m: Option<f64>,
}

/// Weight and volume breakdown for audit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concrete_volume_m3": 1328.6,
///   "backfill_volume_m3": 585.1,
///   "excavation_volume_m3": 3697.4,
///   "concrete_weight_kn": 33215.4,
///   "backfill_weight_kn": 10531.4,
///   "buoyancy_kn": 5297.3,
///   "total_weight_kn": 38449.5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfWeightResult {
    /// Concrete volume V1, cushion included (m³)
    pub concrete_volume_m3: f64,

    /// Soil prism over the base minus embedded concrete (m³)
    pub backfill_volume_m3: f64,

    /// Excavation cone volume for earthworks takeoff (m³)
    pub excavation_volume_m3: f64,

    /// G1 (kN)
    pub concrete_weight_kn: f64,

    /// G2 (kN)
    pub backfill_weight_kn: f64,

    /// Gw (kN)
    pub buoyancy_kn: f64,

    /// Gk = G1 + G2 - Gw (kN)
    pub total_weight_kn: f64,
}

/// Concrete volume of the foundation body: edge cylinder, frustum, the
/// below-grade part of the pedestal, and the cushion (m³).
pub fn concrete_volume_m3(geometry: &FoundationGeometry) -> f64 {
    let r1 = geometry.base_radius_m;
    let r2 = geometry.column_radius_m;
    let edge = PI * r1 * r1 * geometry.edge_height_m;
    let frustum = PI / 3.0 * geometry.frustum_height_m * (r1 * r1 + r1 * r2 + r2 * r2);
    let column_below_grade =
        PI * r2 * r2 * (geometry.column_height_m - geometry.above_ground_height_m);
    let cushion_radius = r1 + 0.1;
    let cushion = PI * cushion_radius * cushion_radius * geometry.cushion_thickness_m();
    (edge + frustum + column_below_grade + cushion).max(0.0)
}

/// Excavation cone volume: pit depth = buried depth + cushion, floor radius
/// = base radius + working margin, 1:1 batter to grade (m³).
pub fn excavation_volume_m3(geometry: &FoundationGeometry) -> f64 {
    let depth = geometry.buried_depth_m + geometry.cushion_thickness_m();
    let floor_radius = geometry.base_radius_m + PIT_MARGIN;
    let grade_radius = floor_radius + depth;
    PI / 3.0
        * depth
        * (floor_radius * floor_radius
            + grade_radius * grade_radius
            + floor_radius * grade_radius)
}

/// Compute the full weight breakdown
pub fn calculate(
    input: &SelfWeightInput,
    profile: &SoilProfile,
) -> VerifyResult<SelfWeightResult> {
    let geometry = &input.geometry;

    let concrete_volume = concrete_volume_m3(geometry);
    let concrete_weight = concrete_volume * input.material.density_kn_m3;

    // Only the soil column directly above the base bears on it: the prism
    // over the slab footprint minus the concrete it contains.
    let pit_depth = geometry.buried_depth_m + geometry.cushion_thickness_m();
    let prism_volume = geometry.base_area_m2() * pit_depth;
    let backfill_volume = (prism_volume - concrete_volume).max(0.0);
    let backfill_weight = backfill_volume * input.cover_soil_weight_kn_m3;

    let buoyancy = match input.water_depth_m {
        Some(water_depth) if water_depth < geometry.buried_depth_m => {
            let submerged_depth = geometry.buried_depth_m - water_depth;
            let submerged_volume = geometry.base_area_m2() * submerged_depth;
            let effective_weight =
                profile.average_submerged_weight_kn_m3(water_depth, geometry.buried_depth_m)?;
            submerged_volume * effective_weight
        }
        _ => 0.0,
    };

    Ok(SelfWeightResult {
        concrete_volume_m3: concrete_volume,
        backfill_volume_m3: backfill_volume,
        excavation_volume_m3: excavation_volume_m3(geometry),
        concrete_weight_kn: concrete_weight,
        backfill_weight_kn: backfill_weight,
        buoyancy_kn: buoyancy,
        total_weight_kn: concrete_weight + backfill_weight - buoyancy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteGrade, ConcreteMaterial};
    use crate::soil::SoilLayer;

    fn reference_geometry() -> FoundationGeometry {
        FoundationGeometry {
            base_radius_m: 11.5,
            column_radius_m: 3.5,
            edge_height_m: 0.8,
            frustum_height_m: 2.4,
            column_height_m: 1.5,
            above_ground_height_m: 0.2,
            buried_depth_m: 4.5,
            cushion_thickness_mm: 100.0,
        }
    }

    fn single_layer_profile() -> SoilProfile {
        SoilProfile::new(vec![SoilLayer {
            name: "Silty clay".to_string(),
            top_depth_m: 0.0,
            bottom_depth_m: 30.0,
            unit_weight_kn_m3: 18.5,
            compression_modulus_mpa: 15.0,
            dynamic_modulus_mpa: None,
            poisson_ratio: 0.3,
            friction_coefficient: 0.3,
            bearing_capacity_kpa: 220.0,
            eta_b: 0.3,
            eta_d: 1.6,
            zeta_a: 1.3,
        }])
    }

    fn dry_input() -> SelfWeightInput {
        SelfWeightInput {
            geometry: reference_geometry(),
            material: ConcreteMaterial::from_grade(ConcreteGrade::C40),
            cover_soil_weight_kn_m3: 18.0,
            water_depth_m: None,
        }
    }

    #[test]
    fn test_concrete_volume_terms() {
        let g = reference_geometry();
        let v = concrete_volume_m3(&g);
        // edge 332.38 + frustum 671.52 + column 50.04 + cushion 42.27
        let edge = PI * 11.5_f64.powi(2) * 0.8;
        let frustum = PI / 3.0 * 2.4 * (11.5_f64.powi(2) + 11.5 * 3.5 + 3.5_f64.powi(2));
        let column = PI * 3.5_f64.powi(2) * 1.3;
        let cushion = PI * 11.6_f64.powi(2) * 0.1;
        assert!((v - (edge + frustum + column + cushion)).abs() < 1e-9);
    }

    #[test]
    fn test_weight_identity() {
        let input = SelfWeightInput {
            water_depth_m: Some(2.0),
            ..dry_input()
        };
        let result = calculate(&input, &single_layer_profile()).unwrap();
        let expected = result.concrete_weight_kn + result.backfill_weight_kn - result.buoyancy_kn;
        assert!((result.total_weight_kn - expected).abs() < 1e-6);
    }

    #[test]
    fn test_no_buoyancy_when_dry() {
        let result = calculate(&dry_input(), &single_layer_profile()).unwrap();
        assert_eq!(result.buoyancy_kn, 0.0);
        assert!(result.total_weight_kn > 0.0);
    }

    #[test]
    fn test_buoyancy_uses_submerged_cylinder() {
        let input = SelfWeightInput {
            water_depth_m: Some(2.0),
            ..dry_input()
        };
        let result = calculate(&input, &single_layer_profile()).unwrap();
        // Submerged 2.5 m cylinder, effective weight 8.5 kN/m³
        let expected = PI * 11.5_f64.powi(2) * 2.5 * 8.5;
        assert!((result.buoyancy_kn - expected).abs() < 1e-6);
    }

    #[test]
    fn test_water_below_base_no_uplift() {
        let input = SelfWeightInput {
            water_depth_m: Some(6.0),
            ..dry_input()
        };
        let result = calculate(&input, &single_layer_profile()).unwrap();
        assert_eq!(result.buoyancy_kn, 0.0);
    }

    #[test]
    fn test_excavation_exceeds_concrete() {
        let g = reference_geometry();
        assert!(excavation_volume_m3(&g) > concrete_volume_m3(&g));
    }
}
