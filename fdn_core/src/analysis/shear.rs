//! # Critical-Section Shear Verification
//!
//! One-way shear across the slab at the column face. The effective depth h0
//! spans the edge and frustum heights minus the bottom reinforcement
//! centroid; the critical width is the column-face chord reduced for the
//! frustum taper. Capacity Vr = 0.7·βh·ft·b·h0 with the size-effect factor
//! βh = (edge_height / h0)^(1/4) and h0 capped at 2000 mm inside βh. Demand
//! per case is the net reaction integrated over the circular segment beyond
//! the critical section, V = Pj·(S1 − S2).

use serde::{Deserialize, Serialize};

use crate::geometry::FoundationGeometry;
use crate::loads::CombinedLoad;
use crate::materials::{ConcreteMaterial, Reinforcement};
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};
use crate::units::{m_to_mm, mm_to_m};

/// h0 ceiling inside the size-effect factor (mm)
const SIZE_EFFECT_DEPTH_CAP_MM: f64 = 2000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShearInput {
    pub geometry: FoundationGeometry,
    pub material: ConcreteMaterial,
    pub reinforcement: Reinforcement,

    /// Importance factor γ0
    pub importance_factor: f64,
}

/// Section properties and capacity of the critical shear section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShearCapacity {
    /// Effective depth h0 (m)
    pub h0_m: f64,

    /// Critical section width b (m)
    pub width_m: f64,

    /// Size-effect factor βh
    pub size_effect: f64,

    /// Capacity Vr (kN)
    pub vr_kn: f64,

    /// Sector area S1 beyond the critical section (m²)
    pub s1_m2: f64,

    /// Triangular area S2 inside the sector (m²)
    pub s2_m2: f64,
}

/// Effective shear depth from slab heights and reinforcement placement (mm)
pub fn effective_depth_mm(geometry: &FoundationGeometry, reinforcement: &Reinforcement) -> f64 {
    m_to_mm(geometry.edge_height_m + geometry.frustum_height_m)
        - reinforcement.centroid_offset_mm()
}

/// Compute the critical-section geometry and shear capacity
pub fn capacity(input: &ShearInput) -> ShearCapacity {
    let geometry = &input.geometry;
    let h0_mm = effective_depth_mm(geometry, &input.reinforcement);
    let h0_m = mm_to_m(h0_mm);
    let h0_capped_mm = h0_mm.min(SIZE_EFFECT_DEPTH_CAP_MM);

    let chord = 2.0
        * (geometry.base_radius_m.powi(2) - geometry.column_radius_m.powi(2)).sqrt();
    let width = (1.0 - geometry.frustum_height_m / (2.0 * h0_m)) * chord;

    let size_effect = (m_to_mm(geometry.edge_height_m) / h0_capped_mm).powf(0.25);
    let vr = 0.7 * size_effect * input.material.ft_kpa() * width * h0_m;

    let half_angle = (geometry.column_radius_m / geometry.base_radius_m).acos();
    let s1 = half_angle * geometry.base_radius_m.powi(2);
    let s2 = geometry.column_radius_m.powi(2) * half_angle.tan();

    ShearCapacity {
        h0_m,
        width_m: width,
        size_effect,
        vr_kn: vr,
        s1_m2: s1,
        s2_m2: s2,
    }
}

/// Verify γ0·V ≤ Vr for every case, V = Pj·(S1 − S2)
pub fn check(input: &ShearInput, loads: &[CombinedLoad]) -> AnalyzerReport {
    let mut report = AnalyzerReport::new("shear strength");
    let section = capacity(input);

    for load in loads {
        let pj = load.design_reaction_kpa(&input.geometry);
        let demand = (pj * (section.s1_m2 - section.s2_m2)).abs();
        let factored = input.importance_factor * demand;
        let outcome = CheckOutcome::new(load.case, factored, section.vr_kn);
        report.verdicts.push(CaseVerdict::Evaluated(outcome));
    }

    report
}
