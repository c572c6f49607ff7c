//! # Overturning Stability Verification
//!
//! The restoring moment of the gravity base about its downwind edge must
//! exceed the factored overturning moment in every case. Stability is checked
//! on the standard combination.

use crate::geometry::FoundationGeometry;
use crate::loads::CombinedLoad;
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};

/// Partial stability factor against overturning
pub const OVERTURNING_STABILITY_FACTOR: f64 = 1.6;

/// Verify γ0·γd·Ms ≤ Mr with Mr = N·R about the base edge
pub fn check(
    geometry: &FoundationGeometry,
    importance_factor: f64,
    loads: &[CombinedLoad],
) -> AnalyzerReport {
    let mut report = AnalyzerReport::new("overturning stability");

    for load in loads {
        let restoring = load.vertical_kn * geometry.base_radius_m;
        let demand = importance_factor * OVERTURNING_STABILITY_FACTOR * load.moment_kn_m.abs();
        let outcome = CheckOutcome::new(load.case, demand, restoring);
        report.verdicts.push(CaseVerdict::Evaluated(outcome));
    }

    report
}
