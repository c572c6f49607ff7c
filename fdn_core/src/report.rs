//! # Verification Reports
//!
//! Per-check outcomes and the aggregated summary handed back to the caller.
//! Every run is stamped with a fresh id and UTC timestamp so reports can be
//! archived and cross-referenced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::loads::LoadCaseKind;

/// Outcome of one check for one load case.
///
/// ## JSON Example
///
/// ```json
/// {
///   "case": "Normal",
///   "demand": 152.3,
///   "capacity": 264.1,
///   "margin": 1.73,
///   "passes": true,
///   "advisory": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub case: LoadCaseKind,

    /// Computed demand (units per check)
    pub demand: f64,

    /// Computed capacity or allowable (same units as demand)
    pub capacity: f64,

    /// capacity / demand; infinite when the demand vanishes
    pub margin: f64,

    pub passes: bool,

    /// Optional human-readable note for the summary advisory list
    pub advisory: Option<String>,
}

impl CheckOutcome {
    /// Build an outcome, passing when demand ≤ capacity
    pub fn new(case: LoadCaseKind, demand: f64, capacity: f64) -> Self {
        let margin = if demand > 0.0 {
            capacity / demand
        } else {
            f64::INFINITY
        };
        CheckOutcome {
            case,
            demand,
            capacity,
            margin,
            passes: demand <= capacity,
            advisory: None,
        }
    }

    /// Attach an advisory (builder pattern)
    pub fn with_advisory(mut self, advisory: impl Into<String>) -> Self {
        self.advisory = Some(advisory.into());
        self
    }

    /// Force the verdict where the pass rule is not a plain demand/capacity
    /// comparison (e.g. factored safety ratios)
    pub fn with_verdict(mut self, passes: bool) -> Self {
        self.passes = passes;
        self
    }
}

/// How one analyzer concluded for one case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum CaseVerdict {
    /// The check ran to completion
    Evaluated(CheckOutcome),
    /// A per-case computational failure; other cases proceeded
    Indeterminate { case: LoadCaseKind, reason: String },
}

impl CaseVerdict {
    /// An indeterminate case never counts as passing
    pub fn passes(&self) -> bool {
        match self {
            CaseVerdict::Evaluated(outcome) => outcome.passes,
            CaseVerdict::Indeterminate { .. } => false,
        }
    }
}

/// All per-case verdicts of one analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerReport {
    /// Analyzer name, e.g. "bearing capacity"
    pub analyzer: String,
    pub verdicts: Vec<CaseVerdict>,
}

impl AnalyzerReport {
    pub fn new(analyzer: impl Into<String>) -> Self {
        AnalyzerReport {
            analyzer: analyzer.into(),
            verdicts: Vec::new(),
        }
    }

    pub fn passes(&self) -> bool {
        self.verdicts.iter().all(|v| v.passes())
    }
}

/// The aggregated verification summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Fresh id for this verification run
    pub run_id: Uuid,

    /// UTC timestamp of the run
    pub generated_at: DateTime<Utc>,

    /// Logical AND of every verdict across every analyzer and case
    pub acceptable: bool,

    pub reports: Vec<AnalyzerReport>,

    /// Flat list of advisory strings for UI display
    pub advisories: Vec<String>,
}

impl SummaryResult {
    pub fn new(reports: Vec<AnalyzerReport>, advisories: Vec<String>) -> Self {
        let acceptable = reports.iter().all(|r| r.passes());
        SummaryResult {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            acceptable,
            reports,
            advisories,
        }
    }

    /// Look up one analyzer's report by name
    pub fn report(&self, analyzer: &str) -> Option<&AnalyzerReport> {
        self.reports.iter().find(|r| r.analyzer == analyzer)
    }
}
