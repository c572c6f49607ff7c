//! # Punching-Shear Verification
//!
//! Two-way shear on the 45° failure cone around the column base. Capacity
//! comes from the mean of the cone's top and bottom perimeters,
//!
//! ```text
//! Fr = 0.35·βhp·ft·(Bt + Bb)·h0
//! ```
//!
//! with βhp tapering from 1.0 at h0 = 800 mm to 0.9 at 2000 mm. Demand is
//! the net reaction outside the cone bottom, Fl = Pj·π·(R² − (r + h0)²).

use serde::{Deserialize, Serialize};

use crate::geometry::FoundationGeometry;
use crate::loads::CombinedLoad;
use crate::materials::{ConcreteMaterial, Reinforcement};
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};
use crate::units::mm_to_m;

use super::shear::effective_depth_mm;

use std::f64::consts::PI;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchingInput {
    pub geometry: FoundationGeometry,
    pub material: ConcreteMaterial,
    pub reinforcement: Reinforcement,

    /// Importance factor γ0
    pub importance_factor: f64,
}

/// Cone geometry and punching capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchingCapacity {
    /// Effective depth h0 (m)
    pub h0_m: f64,

    /// Section-depth factor βhp
    pub depth_factor: f64,

    /// Cone top perimeter Bt (m)
    pub top_perimeter_m: f64,

    /// Cone bottom perimeter Bb (m)
    pub bottom_perimeter_m: f64,

    /// Capacity Fr (kN)
    pub fr_kn: f64,
}

/// Section-depth factor βhp, 1.0 up to 800 mm and 0.9 from 2000 mm
fn depth_factor(h0_mm: f64) -> f64 {
    if h0_mm <= 800.0 {
        1.0
    } else if h0_mm >= 2000.0 {
        0.9
    } else {
        1.0 - (h0_mm - 800.0) / (2000.0 - 800.0) * 0.1
    }
}

/// Compute the punching cone and its capacity
pub fn capacity(input: &PunchingInput) -> PunchingCapacity {
    let geometry = &input.geometry;
    let h0_mm = effective_depth_mm(geometry, &input.reinforcement);
    let h0_m = mm_to_m(h0_mm);
    let beta_hp = depth_factor(h0_mm);

    let top = 2.0 * PI * geometry.column_radius_m;
    let bottom = 2.0 * PI * (geometry.base_radius_m + h0_m);
    let fr = 0.35 * beta_hp * input.material.ft_kpa() * (top + bottom) * h0_m;

    PunchingCapacity {
        h0_m,
        depth_factor: beta_hp,
        top_perimeter_m: top,
        bottom_perimeter_m: bottom,
        fr_kn: fr,
    }
}

/// Verify γ0·Fl ≤ Fr for every case
pub fn check(input: &PunchingInput, loads: &[CombinedLoad]) -> AnalyzerReport {
    let mut report = AnalyzerReport::new("punching shear");
    let cone = capacity(input);
    let geometry = &input.geometry;

    // Reaction area outside the cone bottom; vanishes when the cone
    // daylights beyond the base edge
    let cone_bottom_radius = geometry.column_radius_m + cone.h0_m;
    let reaction_area =
        (PI * (geometry.base_radius_m.powi(2) - cone_bottom_radius.powi(2))).max(0.0);

    for load in loads {
        let pj = load.design_reaction_kpa(geometry);
        let demand = input.importance_factor * (pj * reaction_area).abs();
        let outcome = CheckOutcome::new(load.case, demand, cone.fr_kn);
        report.verdicts.push(CaseVerdict::Evaluated(outcome));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{CombinationKind, ContactPressure, LoadCaseKind};
    use crate::materials::ConcreteGrade;

    fn reference_input() -> PunchingInput {
        PunchingInput {
            geometry: FoundationGeometry {
                base_radius_m: 11.5,
                column_radius_m: 3.5,
                edge_height_m: 0.8,
                frustum_height_m: 2.4,
                column_height_m: 1.5,
                above_ground_height_m: 0.2,
                buried_depth_m: 4.5,
                cushion_thickness_mm: 100.0,
            },
            material: ConcreteMaterial::from_grade(ConcreteGrade::C40),
            reinforcement: Reinforcement::default(),
            importance_factor: 1.1,
        }
    }

    fn combined(pj_kpa: f64, area_m2: f64) -> CombinedLoad {
        CombinedLoad {
            case: LoadCaseKind::Normal,
            combination: CombinationKind::Standard,
            vertical_kn: pj_kpa * area_m2,
            moment_kn_m: 0.0,
            shear_kn: 0.0,
            eccentricity_m: 0.0,
            contact: ContactPressure::FullContact {
                p_max_kpa: pj_kpa,
                p_min_kpa: pj_kpa,
                p_avg_kpa: pj_kpa,
            },
            advisory: None,
        }
    }

    #[test]
    fn test_depth_factor_taper() {
        assert!((depth_factor(600.0) - 1.0).abs() < 1e-12);
        assert!((depth_factor(800.0) - 1.0).abs() < 1e-12);
        assert!((depth_factor(1400.0) - 0.95).abs() < 1e-12);
        assert!((depth_factor(2000.0) - 0.9).abs() < 1e-12);
        assert!((depth_factor(3000.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_cone_reference_values() {
        let cone = capacity(&reference_input());

        assert!((cone.h0_m - 3.1375).abs() < 1e-9);
        assert!((cone.depth_factor - 0.9).abs() < 1e-12);
        assert!((cone.top_perimeter_m - 2.0 * PI * 3.5).abs() < 1e-9);
        assert!((cone.bottom_perimeter_m - 2.0 * PI * 14.6375).abs() < 1e-9);

        // 0.35·0.9·1710·(21.99 + 91.97)·3.1375 ≈ 1.93e5 kN
        assert!(cone.fr_kn > 185_000.0 && cone.fr_kn < 200_000.0);
    }

    #[test]
    fn test_moderate_reaction_passes() {
        let input = reference_input();
        let area = input.geometry.base_area_m2();
        let report = check(&input, &[combined(120.0, area)]);
        assert!(report.passes());
    }

    #[test]
    fn test_excessive_reaction_fails() {
        let input = reference_input();
        let area = input.geometry.base_area_m2();
        let report = check(&input, &[combined(700.0, area)]);
        assert!(!report.passes());
    }
}
