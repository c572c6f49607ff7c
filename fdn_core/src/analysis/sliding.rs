//! # Sliding Stability Verification
//!
//! Frictional resistance at the bearing plane against the factored horizontal
//! resultant, checked on the standard combination. The friction coefficient
//! comes from the founding soil layer.

use crate::errors::VerifyResult;
use crate::loads::CombinedLoad;
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};
use crate::soil::SoilProfile;

/// Partial stability factor against sliding
pub const SLIDING_STABILITY_FACTOR: f64 = 1.3;

/// Verify γ0·γd·H ≤ μ·N for every case
pub fn check(
    profile: &SoilProfile,
    founding_depth_m: f64,
    importance_factor: f64,
    loads: &[CombinedLoad],
) -> VerifyResult<AnalyzerReport> {
    let mut report = AnalyzerReport::new("sliding stability");
    let friction = profile.layer_at(founding_depth_m)?.friction_coefficient;

    for load in loads {
        let resistance = friction * load.vertical_kn;
        let demand = importance_factor * SLIDING_STABILITY_FACTOR * load.shear_kn.abs();
        let outcome = CheckOutcome::new(load.case, demand, resistance);
        report.verdicts.push(CaseVerdict::Evaluated(outcome));
    }

    Ok(report)
}
