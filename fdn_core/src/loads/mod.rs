//! # Load Cases and Combinations
//!
//! The turbine supplier hands over one load set per prescribed case; this
//! module models the six cases, the partial safety factors, and the
//! standard/basic combinations the downstream checks evaluate.
//!
//! # Overview
//!
//! - [`LoadCaseKind`] - the six prescribed verification cases
//! - [`TurbineLoad`] - one Fr/Fv/Fz/Mx/My/Mz set at the foundation top
//! - [`LoadCaseSet`] - the supplied collection, with seismic fallbacks
//! - [`LoadFactors`] / [`CombinationKind`] - partial factors per combination
//!
//! # Example
//!
//! ```
//! use fdn_core::loads::{LoadCaseKind, LoadCaseSet, TurbineLoad};
//!
//! let set = LoadCaseSet::new()
//!     .with_case(LoadCaseKind::Normal, TurbineLoad {
//!         fr_kn: 1100.0, fv_kn: 0.0, fz_kn: 4800.0,
//!         mx_kn_m: 105_000.0, my_kn_m: 0.0, mz_kn_m: 3000.0,
//!     })
//!     .with_case(LoadCaseKind::Extreme, TurbineLoad {
//!         fr_kn: 1500.0, fv_kn: 0.0, fz_kn: 5100.0,
//!         mx_kn_m: 150_000.0, my_kn_m: 0.0, mz_kn_m: 4200.0,
//!     });
//!
//! assert!(set.load_for(LoadCaseKind::Normal).is_some());
//! // Seismic cases fall back to the normal-case turbine loads
//! assert!(set.load_for(LoadCaseKind::FrequentSeismic).is_some());
//! ```

pub mod base_pressure;
pub mod coefficients;

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};

pub use base_pressure::{combine, CombinedLoad, ContactPressure};

/// The six prescribed load cases.
///
/// Seismic verification runs at three ground-motion levels: the frequently
/// occurring earthquake, the fortification (design) earthquake, and the
/// rarely occurring earthquake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCaseKind {
    Normal,
    Extreme,
    Fatigue,
    FrequentSeismic,
    DesignSeismic,
    RareSeismic,
}

impl LoadCaseKind {
    pub const ALL: [LoadCaseKind; 6] = [
        LoadCaseKind::Normal,
        LoadCaseKind::Extreme,
        LoadCaseKind::Fatigue,
        LoadCaseKind::FrequentSeismic,
        LoadCaseKind::DesignSeismic,
        LoadCaseKind::RareSeismic,
    ];

    /// Human-readable case name used in advisories
    pub fn label(&self) -> &'static str {
        match self {
            LoadCaseKind::Normal => "normal",
            LoadCaseKind::Extreme => "extreme",
            LoadCaseKind::Fatigue => "fatigue",
            LoadCaseKind::FrequentSeismic => "frequent seismic",
            LoadCaseKind::DesignSeismic => "design seismic",
            LoadCaseKind::RareSeismic => "rare seismic",
        }
    }

    pub fn is_seismic(&self) -> bool {
        matches!(
            self,
            LoadCaseKind::FrequentSeismic | LoadCaseKind::DesignSeismic | LoadCaseKind::RareSeismic
        )
    }
}

impl std::fmt::Display for LoadCaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Turbine loads at the foundation top flange, characteristic values.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fr_kn": 1100.0,
///   "fv_kn": 0.0,
///   "fz_kn": 4800.0,
///   "mx_kn_m": 105000.0,
///   "my_kn_m": 0.0,
///   "mz_kn_m": 3000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TurbineLoad {
    /// Horizontal force, x direction (kN)
    pub fr_kn: f64,

    /// Horizontal force, y direction (kN)
    pub fv_kn: f64,

    /// Vertical force, downward positive (kN)
    pub fz_kn: f64,

    /// Overturning moment about x (kN·m)
    pub mx_kn_m: f64,

    /// Overturning moment about y (kN·m)
    pub my_kn_m: f64,

    /// Torsion about the tower axis (kN·m)
    pub mz_kn_m: f64,
}

impl TurbineLoad {
    /// Resultant horizontal shear Fr = √(Fx² + Fy²) (kN)
    pub fn resultant_shear_kn(&self) -> f64 {
        self.fr_kn.hypot(self.fv_kn)
    }

    /// Resultant overturning moment √(Mx² + My²) (kN·m)
    pub fn resultant_moment_kn_m(&self) -> f64 {
        self.mx_kn_m.hypot(self.my_kn_m)
    }

    /// Superpose another load set (seismic augmentation)
    pub fn plus(&self, other: &TurbineLoad) -> TurbineLoad {
        TurbineLoad {
            fr_kn: self.fr_kn + other.fr_kn,
            fv_kn: self.fv_kn + other.fv_kn,
            fz_kn: self.fz_kn + other.fz_kn,
            mx_kn_m: self.mx_kn_m + other.mx_kn_m,
            my_kn_m: self.my_kn_m + other.my_kn_m,
            mz_kn_m: self.mz_kn_m + other.mz_kn_m,
        }
    }

    pub fn validate(&self, case: LoadCaseKind) -> VerifyResult<()> {
        for (name, value) in [
            ("fr_kn", self.fr_kn),
            ("fv_kn", self.fv_kn),
            ("fz_kn", self.fz_kn),
            ("mx_kn_m", self.mx_kn_m),
            ("my_kn_m", self.my_kn_m),
            ("mz_kn_m", self.mz_kn_m),
        ] {
            if !value.is_finite() {
                return Err(VerifyError::invalid_input(
                    format!("{} ({})", name, case.label()),
                    value.to_string(),
                    "Load component must be finite",
                ));
            }
        }
        if self.fz_kn < 0.0 {
            return Err(VerifyError::invalid_input(
                format!("fz_kn ({})", case.label()),
                self.fz_kn.to_string(),
                "Net tower uplift is outside the gravity-foundation model",
            ));
        }
        Ok(())
    }
}

/// The supplied per-case load collection.
///
/// Normal, extreme, and fatigue sets must be supplied explicitly; a seismic
/// case without its own set reuses the normal-case turbine loads (the
/// seismic inertial contribution is superposed downstream).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadCaseSet {
    pub cases: Vec<(LoadCaseKind, TurbineLoad)>,
}

impl LoadCaseSet {
    pub fn new() -> Self {
        LoadCaseSet::default()
    }

    /// Add or replace a case (builder pattern)
    pub fn with_case(mut self, kind: LoadCaseKind, load: TurbineLoad) -> Self {
        self.cases.retain(|(k, _)| *k != kind);
        self.cases.push((kind, load));
        self
    }

    /// Explicit entry for a case, if supplied
    pub fn get(&self, kind: LoadCaseKind) -> Option<&TurbineLoad> {
        self.cases.iter().find(|(k, _)| *k == kind).map(|(_, l)| l)
    }

    /// The load set to evaluate for a case, applying the normal-case
    /// fallback for seismic cases
    pub fn load_for(&self, kind: LoadCaseKind) -> Option<&TurbineLoad> {
        self.get(kind).or_else(|| {
            if kind.is_seismic() {
                self.get(LoadCaseKind::Normal)
            } else {
                None
            }
        })
    }

    pub fn validate(&self) -> VerifyResult<()> {
        for required in [
            LoadCaseKind::Normal,
            LoadCaseKind::Extreme,
            LoadCaseKind::Fatigue,
        ] {
            if self.get(required).is_none() {
                return Err(VerifyError::invalid_input(
                    "cases",
                    required.label().to_string(),
                    "Required load case not supplied",
                ));
            }
        }
        for (kind, load) in &self.cases {
            load.validate(*kind)?;
        }
        Ok(())
    }
}

/// Partial safety factors (fixed values per the loads code)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadFactors {
    /// Permanent load, favorable
    pub dead_favorable: f64,

    /// Permanent load, unfavorable
    pub dead_unfavorable: f64,

    /// Variable load
    pub live: f64,

    /// Horizontal seismic action
    pub seismic_horizontal: f64,
}

impl Default for LoadFactors {
    fn default() -> Self {
        LoadFactors {
            dead_favorable: 1.0,
            dead_unfavorable: 1.3,
            live: 1.5,
            seismic_horizontal: 1.3,
        }
    }
}

/// Which combination a pressure set is evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinationKind {
    /// Characteristic values, no factors
    Standard,
    /// Basic combination, permanent loads unfavorable
    BasicUnfavorable,
    /// Basic combination, permanent loads favorable
    BasicFavorable,
}

impl CombinationKind {
    /// Factor on the vertical resultant (permanent-dominated)
    pub fn dead_factor(&self, factors: &LoadFactors) -> f64 {
        match self {
            CombinationKind::Standard => 1.0,
            CombinationKind::BasicUnfavorable => factors.dead_unfavorable,
            CombinationKind::BasicFavorable => factors.dead_favorable,
        }
    }

    /// Factor on the moment resultant (variable-dominated); horizontal
    /// seismic actions carry their own partial factor
    pub fn variable_factor(&self, factors: &LoadFactors, case: LoadCaseKind) -> f64 {
        match self {
            CombinationKind::Standard => 1.0,
            CombinationKind::BasicUnfavorable | CombinationKind::BasicFavorable => {
                if case.is_seismic() {
                    factors.seismic_horizontal
                } else {
                    factors.live
                }
            }
        }
    }
}
