//! # Base Detachment Verification
//!
//! Compares the lifted fraction of the base against the per-case limit. Under
//! normal operation the base must stay in full contact; transient cases may
//! tolerate a limited detached fraction (the customary limit is a quarter of
//! the base area).

use serde::{Deserialize, Serialize};

use crate::geometry::FoundationGeometry;
use crate::loads::{CombinedLoad, LoadCaseKind};
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};

/// Permitted detached-area fraction per case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetachmentLimits {
    pub limits: Vec<(LoadCaseKind, f64)>,
}

impl Default for DetachmentLimits {
    fn default() -> Self {
        DetachmentLimits {
            limits: vec![
                (LoadCaseKind::Normal, 0.0),
                (LoadCaseKind::Fatigue, 0.0),
                (LoadCaseKind::Extreme, 0.25),
                (LoadCaseKind::FrequentSeismic, 0.25),
                (LoadCaseKind::DesignSeismic, 0.25),
                (LoadCaseKind::RareSeismic, 0.25),
            ],
        }
    }
}

impl DetachmentLimits {
    /// Permitted fraction for one case; unnamed cases get the transient limit
    pub fn limit_for(&self, case: LoadCaseKind) -> f64 {
        self.limits
            .iter()
            .find(|(kind, _)| *kind == case)
            .map(|(_, limit)| *limit)
            .unwrap_or(0.25)
    }
}

/// Verify the detached fraction of every case against its limit
pub fn check(
    limits: &DetachmentLimits,
    geometry: &FoundationGeometry,
    loads: &[CombinedLoad],
) -> AnalyzerReport {
    let mut report = AnalyzerReport::new("base detachment");
    let full_area = geometry.base_area_m2();

    for load in loads {
        let ratio = load.contact.detached_area_m2() / full_area;
        let limit = limits.limit_for(load.case);

        let mut outcome = CheckOutcome::new(load.case, ratio, limit);
        if ratio > 0.0 && outcome.passes {
            outcome = outcome.with_advisory(format!(
                "{}: base lifts over {:.1}% of its area (limit {:.0}%)",
                load.case,
                ratio * 100.0,
                limit * 100.0
            ));
        }
        report.verdicts.push(CaseVerdict::Evaluated(outcome));
    }

    report
}
