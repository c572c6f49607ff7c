//! # Bearing Capacity Verification
//!
//! Corrects the characteristic bearing capacity of the founding layer for
//! width and depth, applies the seismic adjustment factor, and verifies the
//! base pressures of every combined load case against the allowables.
//!
//! The corrected capacity follows
//!
//! ```text
//! fa  = fak + ηb·γm·(b − 3) + ηd·γm·(d − 0.5)
//! fae = ζa·fa
//! ```
//!
//! with b taken as 6 m whenever the base diameter does not exceed 6 m, and
//! γm the weighted average unit weight of the flanking soil above the base.
//! Each case must satisfy both pk ≤ fa and pkmax ≤ 1.2·fa (fae for seismic
//! cases).

use serde::{Deserialize, Serialize};

use crate::errors::VerifyResult;
use crate::geometry::FoundationGeometry;
use crate::loads::CombinedLoad;
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};
use crate::soil::SoilProfile;

/// Minimum effective width entering the width correction (m)
const MIN_CORRECTION_WIDTH_M: f64 = 6.0;

/// Edge pressures may exceed the allowable by this factor
const EDGE_PRESSURE_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearingInput {
    pub geometry: FoundationGeometry,
    pub profile: SoilProfile,

    /// Water table depth below grade, if present (m)
    pub water_depth_m: Option<f64>,
}

/// Corrected capacities of the founding layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearingCapacity {
    /// Effective width used in the correction (m)
    pub b_effective_m: f64,

    /// Embedment depth used in the correction (m)
    pub depth_m: f64,

    /// Weighted average unit weight of flanking soil (kN/m³)
    pub gamma_m_kn_m3: f64,

    /// Corrected static capacity fa (kPa)
    pub fa_kpa: f64,

    /// Seismic capacity fae = ζa·fa (kPa)
    pub fae_kpa: f64,
}

impl BearingCapacity {
    /// Allowable mean pressure for one case (kPa)
    pub fn allowable_mean_kpa(&self, seismic: bool) -> f64 {
        if seismic {
            self.fae_kpa
        } else {
            self.fa_kpa
        }
    }
}

/// Correct the founding layer's characteristic capacity for width and depth
pub fn corrected_capacity(input: &BearingInput) -> VerifyResult<BearingCapacity> {
    let depth = input.geometry.buried_depth_m;
    let layer = input.profile.layer_at(depth)?;

    let diameter = 2.0 * input.geometry.base_radius_m;
    let b_effective = if diameter <= MIN_CORRECTION_WIDTH_M {
        MIN_CORRECTION_WIDTH_M
    } else {
        diameter
    };

    let gamma_m = input
        .profile
        .average_flanking_weight_kn_m3(depth, input.water_depth_m)?;

    let fa = layer.bearing_capacity_kpa
        + layer.eta_b * gamma_m * (b_effective - 3.0)
        + layer.eta_d * gamma_m * (depth - 0.5);
    let fae = layer.zeta_a * fa;

    Ok(BearingCapacity {
        b_effective_m: b_effective,
        depth_m: depth,
        gamma_m_kn_m3: gamma_m,
        fa_kpa: fa,
        fae_kpa: fae,
    })
}

/// Verify the base pressures of every case against the corrected capacity
pub fn check(
    capacity: &BearingCapacity,
    geometry: &FoundationGeometry,
    loads: &[CombinedLoad],
) -> AnalyzerReport {
    let mut report = AnalyzerReport::new("bearing capacity");

    for load in loads {
        let seismic = load.case.is_seismic();
        let allowable_mean = capacity.allowable_mean_kpa(seismic);
        let allowable_edge = EDGE_PRESSURE_FACTOR * allowable_mean;

        let p_mean = load.average_pressure_kpa(geometry);
        let p_edge = load.contact.p_max_kpa();

        let passes = p_mean <= allowable_mean && p_edge <= allowable_edge;
        let mut outcome =
            CheckOutcome::new(load.case, p_edge, allowable_edge).with_verdict(passes);
        if p_mean > allowable_mean && p_edge <= allowable_edge {
            outcome = outcome.with_advisory(format!(
                "{}: mean pressure {:.1} kPa exceeds allowable {:.1} kPa",
                load.case, p_mean, allowable_mean
            ));
        }
        report.verdicts.push(CaseVerdict::Evaluated(outcome));
    }

    report
}
