//! # Verification Pipeline
//!
//! Sequences the calculators and analyzers in dependency order: geometry and
//! input validation, self-weight and tower-load reduction, per-case load
//! combination, then the independent downstream checks. Hard validation
//! failures abort the run; a combination that fails to converge only voids
//! its own case and the remaining cases proceed.
//!
//! ## Example
//!
//! ```no_run
//! use fdn_core::verify::{run_verification, DesignInput};
//!
//! # fn demo(input: DesignInput) -> fdn_core::errors::VerifyResult<()> {
//! let output = run_verification(&input)?;
//! println!("acceptable: {}", output.summary.acceptable);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::{
    bearing, detachment, overturning, punching, settlement, shear, sliding, stiffness,
};
use crate::analysis::{
    BearingCapacity, BearingInput, DetachmentLimits, PunchingInput, SettlementInput,
    SettlementResult, ShearInput, StiffnessInput, StiffnessResult,
};
use crate::analysis::stiffness::StiffnessMinima;
use crate::errors::VerifyResult;
use crate::geometry::FoundationGeometry;
use crate::loads::{
    combine, CombinationKind, CombinedLoad, ContactPressure, LoadCaseKind, LoadCaseSet,
    LoadFactors, TurbineLoad,
};
use crate::materials::{ConcreteMaterial, Reinforcement};
use crate::report::{AnalyzerReport, CaseVerdict, SummaryResult};
use crate::self_weight::{self, SelfWeightInput, SelfWeightResult};
use crate::soil::SoilProfile;
use crate::tower::{self, SeismicAction, TowerInput, TowerLoadResult};

/// Structural importance factor γ0 for wind turbine foundations
pub const DEFAULT_IMPORTANCE_FACTOR: f64 = 1.1;

/// Unit weight of compacted cover soil (kN/m³)
pub const DEFAULT_COVER_SOIL_WEIGHT: f64 = 18.0;

/// Ratio of the fortification-level spectrum to the frequent-earthquake
/// spectrum, used for the design-level seismic case
const DESIGN_SEISMIC_SCALE: f64 = 2.85;

/// Run-wide configuration with conventional defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Importance factor γ0
    pub importance_factor: f64,

    pub load_factors: LoadFactors,
    pub detachment_limits: DetachmentLimits,

    /// Supplier minimum dynamic stiffness requirements
    pub stiffness_minima: Option<StiffnessMinima>,

    pub allowable_settlement_mm: f64,

    /// Unit weight of the cover soil over the slab (kN/m³)
    pub cover_soil_weight_kn_m3: f64,

    /// Groundwater depth below grade (m); `None` means dry
    pub water_depth_m: Option<f64>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        VerificationConfig {
            importance_factor: DEFAULT_IMPORTANCE_FACTOR,
            load_factors: LoadFactors::default(),
            detachment_limits: DetachmentLimits::default(),
            stiffness_minima: None,
            allowable_settlement_mm: settlement::ALLOWABLE_SETTLEMENT_MM,
            cover_soil_weight_kn_m3: DEFAULT_COVER_SOIL_WEIGHT,
            water_depth_m: None,
        }
    }
}

/// The validated input bundle for one verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignInput {
    pub geometry: FoundationGeometry,
    pub material: ConcreteMaterial,
    pub reinforcement: Reinforcement,
    pub profile: SoilProfile,
    pub loads: LoadCaseSet,

    /// Tower stack for the seismic reduction; without it the seismic cases
    /// are skipped
    pub tower: Option<TowerInput>,

    pub config: VerificationConfig,
}

impl DesignInput {
    /// Fail-fast validation of every input entity
    pub fn validate(&self) -> VerifyResult<()> {
        self.geometry.validate()?;
        self.material.validate()?;
        self.reinforcement.validate()?;
        self.profile.validate()?;
        self.loads.validate()?;
        if let Some(tower) = &self.tower {
            tower.validate()?;
        }
        Ok(())
    }
}

/// Everything one run produces: intermediate quantities plus the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutput {
    pub self_weight: SelfWeightResult,
    pub tower: Option<TowerLoadResult>,

    /// Standard-combination loads, one per evaluated case
    pub standard_loads: Vec<CombinedLoad>,

    /// Basic-combination (unfavorable) loads for the design record
    pub design_loads: Vec<CombinedLoad>,

    pub bearing: BearingCapacity,
    pub settlement: Option<SettlementResult>,
    pub stiffness: StiffnessResult,
    pub summary: SummaryResult,
}

/// Tower seismic action expressed as a load increment at the foundation top
fn seismic_increment(action: &SeismicAction, scale: f64) -> TurbineLoad {
    TurbineLoad {
        fr_kn: scale * action.shear_kn,
        fv_kn: 0.0,
        fz_kn: 0.0,
        mx_kn_m: scale * action.moment_kn_m,
        my_kn_m: 0.0,
        mz_kn_m: 0.0,
    }
}

/// The turbine load to evaluate for one case, seismic superposition applied
fn effective_load(
    loads: &LoadCaseSet,
    tower: Option<&TowerLoadResult>,
    kind: LoadCaseKind,
) -> Option<TurbineLoad> {
    let base = *loads.load_for(kind)?;
    if !kind.is_seismic() {
        return Some(base);
    }
    let tower = tower?;
    let increment = match kind {
        LoadCaseKind::FrequentSeismic => seismic_increment(&tower.frequent, 1.0),
        LoadCaseKind::DesignSeismic => seismic_increment(&tower.frequent, DESIGN_SEISMIC_SCALE),
        LoadCaseKind::RareSeismic => seismic_increment(&tower.rare, 1.0),
        _ => unreachable!(),
    };
    Some(base.plus(&increment))
}

/// Pressure extremes of a combined load for the settlement input (kPa)
fn pressure_extremes(load: &CombinedLoad) -> (f64, f64) {
    match load.contact {
        ContactPressure::FullContact {
            p_max_kpa,
            p_min_kpa,
            ..
        } => (p_max_kpa, p_min_kpa),
        ContactPressure::PartialContact { p_max_kpa, .. } => (p_max_kpa, 0.0),
    }
}

/// Run the whole verification pipeline
pub fn run_verification(input: &DesignInput) -> VerifyResult<VerificationOutput> {
    input.validate()?;
    let geometry = &input.geometry;
    let config = &input.config;

    let self_weight = self_weight::calculate(
        &SelfWeightInput {
            geometry: geometry.clone(),
            material: input.material.clone(),
            cover_soil_weight_kn_m3: config.cover_soil_weight_kn_m3,
            water_depth_m: config.water_depth_m,
        },
        &input.profile,
    )?;

    let tower_result = match &input.tower {
        Some(tower_input) => Some(tower::calculate(tower_input)?),
        None => None,
    };

    // Combine every evaluable case; a non-converging combination voids only
    // its own case
    let mut standard_loads = Vec::new();
    let mut design_loads = Vec::new();
    let mut combination_report = AnalyzerReport::new("load combination");

    for kind in LoadCaseKind::ALL {
        let Some(load) = effective_load(&input.loads, tower_result.as_ref(), kind) else {
            continue;
        };

        for (combination, sink) in [
            (CombinationKind::Standard, &mut standard_loads),
            (CombinationKind::BasicUnfavorable, &mut design_loads),
        ] {
            match combine(
                geometry,
                self_weight.total_weight_kn,
                &load,
                kind,
                combination,
                &config.load_factors,
            ) {
                Ok(combined) => sink.push(combined),
                Err(err) if err.is_recoverable() => {
                    combination_report.verdicts.push(CaseVerdict::Indeterminate {
                        case: kind,
                        reason: err.to_string(),
                    });
                    break;
                }
                Err(err) => return Err(err),
            }
        }
    }

    let bearing_input = BearingInput {
        geometry: geometry.clone(),
        profile: input.profile.clone(),
        water_depth_m: config.water_depth_m,
    };
    let bearing_capacity = bearing::corrected_capacity(&bearing_input)?;
    let bearing_report = bearing::check(&bearing_capacity, geometry, &standard_loads);

    let detachment_report =
        detachment::check(&config.detachment_limits, geometry, &standard_loads);

    // Settlement runs on the normal-case standard combination
    let normal_standard = standard_loads
        .iter()
        .find(|l| l.case == LoadCaseKind::Normal && l.combination == CombinationKind::Standard);
    let hub_height_m = input
        .tower
        .as_ref()
        .map(|t| t.hub_height_m)
        .unwrap_or(0.0);
    let (settlement_result, settlement_report) = match normal_standard {
        Some(load) => {
            let (pk_max, pk_min) = pressure_extremes(load);
            let (result, report) = settlement::check(&SettlementInput {
                geometry: geometry.clone(),
                profile: input.profile.clone(),
                pk_kpa: load.average_pressure_kpa(geometry),
                pk_max_kpa: pk_max,
                pk_min_kpa: pk_min,
                water_depth_m: config.water_depth_m,
                hub_height_m,
                allowable_settlement_mm: config.allowable_settlement_mm,
            })?;
            (Some(result), report)
        }
        None => {
            let mut report = AnalyzerReport::new("settlement");
            report.verdicts.push(CaseVerdict::Indeterminate {
                case: LoadCaseKind::Normal,
                reason: "normal-case combined load unavailable".to_string(),
            });
            (None, report)
        }
    };

    let overturning_report =
        overturning::check(geometry, config.importance_factor, &standard_loads);
    let sliding_report = sliding::check(
        &input.profile,
        geometry.buried_depth_m,
        config.importance_factor,
        &standard_loads,
    )?;

    let stiffness_input = StiffnessInput {
        profile: input.profile.clone(),
        founding_depth_m: geometry.buried_depth_m,
        base_radius_m: geometry.base_radius_m,
        minima: config.stiffness_minima,
    };
    let stiffness_result = stiffness::calculate(&stiffness_input)?;
    let stiffness_report = stiffness::check(&stiffness_input, &stiffness_result)?;

    let shear_input = ShearInput {
        geometry: geometry.clone(),
        material: input.material.clone(),
        reinforcement: input.reinforcement.clone(),
        importance_factor: config.importance_factor,
    };
    let shear_report = shear::check(&shear_input, &standard_loads);

    let punching_input = PunchingInput {
        geometry: geometry.clone(),
        material: input.material.clone(),
        reinforcement: input.reinforcement.clone(),
        importance_factor: config.importance_factor,
    };
    let punching_report = punching::check(&punching_input, &standard_loads);

    let mut reports = Vec::new();
    if !combination_report.verdicts.is_empty() {
        reports.push(combination_report);
    }
    reports.extend([
        bearing_report,
        detachment_report,
        settlement_report,
        overturning_report,
        sliding_report,
        stiffness_report,
        shear_report,
        punching_report,
    ]);

    let mut advisories: Vec<String> = standard_loads
        .iter()
        .chain(design_loads.iter())
        .filter_map(|l| l.advisory.clone())
        .collect();
    for report in &reports {
        for verdict in &report.verdicts {
            if let CaseVerdict::Evaluated(outcome) = verdict {
                if let Some(advisory) = &outcome.advisory {
                    advisories.push(advisory.clone());
                }
            }
        }
    }

    let summary = SummaryResult::new(reports, advisories);

    Ok(VerificationOutput {
        self_weight,
        tower: tower_result,
        standard_loads,
        design_loads,
        bearing: bearing_capacity,
        settlement: settlement_result,
        stiffness: stiffness_result,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ConcreteGrade;
    use crate::soil::SoilLayer;
    use crate::tower::{SeismicIntensity, TowerSegment};

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

    fn reference_profile() -> SoilProfile {
        SoilProfile {
            layers: vec![SoilLayer {
                name: "silty clay".to_string(),
                top_depth_m: 0.0,
                bottom_depth_m: 80.0,
                unit_weight_kn_m3: 18.5,
                compression_modulus_mpa: 8.0,
                dynamic_modulus_mpa: None,
                poisson_ratio: 0.3,
                friction_coefficient: 0.4,
                bearing_capacity_kpa: 180.0,
                eta_b: 0.3,
                eta_d: 1.6,
                zeta_a: 1.3,
            }],
        }
    }

    fn turbine_load(moment_kn_m: f64) -> TurbineLoad {
        TurbineLoad {
            fr_kn: 600.0,
            fv_kn: 200.0,
            fz_kn: 4200.0,
            mx_kn_m: moment_kn_m,
            my_kn_m: 0.0,
            mz_kn_m: 1500.0,
        }
    }

    fn reference_tower() -> TowerInput {
        TowerInput {
            segments: vec![
                TowerSegment {
                    diameter_m: 4.2,
                    wall_thickness_mm: 30.0,
                    height_m: 45.0,
                    density_t_m3: 7.85,
                },
                TowerSegment {
                    diameter_m: 3.6,
                    wall_thickness_mm: 22.0,
                    height_m: 45.0,
                    density_t_m3: 7.85,
                },
            ],
            hub_mass_t: 95.0,
            hub_height_m: 92.0,
            steel_modulus_mpa: 206_000.0,
            site_period_s: 0.45,
            intensity: SeismicIntensity::Degree7,
        }
    }

    fn reference_input() -> DesignInput {
        DesignInput {
            geometry: reference_geometry(),
            material: ConcreteMaterial::from_grade(ConcreteGrade::C40),
            reinforcement: Reinforcement::default(),
            profile: reference_profile(),
            loads: LoadCaseSet::new()
                .with_case(LoadCaseKind::Normal, turbine_load(40_000.0))
                .with_case(LoadCaseKind::Extreme, turbine_load(65_000.0))
                .with_case(LoadCaseKind::Fatigue, turbine_load(25_000.0)),
            tower: Some(reference_tower()),
            config: VerificationConfig {
                stiffness_minima: Some(StiffnessMinima {
                    rotational_n_m_rad: 6.0e10,
                    horizontal_n_m: 4.0e8,
                }),
                ..VerificationConfig::default()
            },
        }
    }

    #[test]
    fn test_acceptable_design_passes_every_check() {
        let output = run_verification(&reference_input()).unwrap();

        assert!(output.summary.acceptable, "{:?}", output.summary);
        assert!(output.tower.is_some());
        assert!(output.settlement.is_some());

        // Normal, Extreme, Fatigue plus the three seismic variants
        assert_eq!(output.standard_loads.len(), 6);
        assert_eq!(output.design_loads.len(), 6);
    }

    #[test]
    fn test_seismic_cases_skipped_without_tower() {
        let mut input = reference_input();
        input.tower = None;
        let output = run_verification(&input).unwrap();
        assert_eq!(output.standard_loads.len(), 3);
        assert!(output
            .standard_loads
            .iter()
            .all(|l| !l.case.is_seismic()));
    }

    #[test]
    fn test_seismic_superposition_raises_moment() {
        let output = run_verification(&reference_input()).unwrap();
        let normal = output
            .standard_loads
            .iter()
            .find(|l| l.case == LoadCaseKind::Normal)
            .unwrap();
        let frequent = output
            .standard_loads
            .iter()
            .find(|l| l.case == LoadCaseKind::FrequentSeismic)
            .unwrap();
        let design = output
            .standard_loads
            .iter()
            .find(|l| l.case == LoadCaseKind::DesignSeismic)
            .unwrap();

        assert!(frequent.moment_kn_m > normal.moment_kn_m);
        assert!(design.moment_kn_m > frequent.moment_kn_m);
    }

    #[test]
    fn test_invalid_geometry_aborts_run() {
        let mut input = reference_input();
        input.geometry.column_radius_m = 12.0;
        let err = run_verification(&input).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
    }

    #[test]
    fn test_missing_required_case_aborts_run() {
        let mut input = reference_input();
        input.loads.cases.retain(|(k, _)| *k != LoadCaseKind::Fatigue);
        let err = run_verification(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_stiffness_minima_aborts_run() {
        let mut input = reference_input();
        input.config.stiffness_minima = None;
        let err = run_verification(&input).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_overloaded_design_fails_summary() {
        let mut input = reference_input();
        input.loads = input
            .loads
            .clone()
            .with_case(LoadCaseKind::Extreme, turbine_load(260_000.0));
        let output = run_verification(&input).unwrap();
        assert!(!output.summary.acceptable);
    }

    #[test]
    fn test_degenerate_case_voided_while_others_proceed() {
        // An extreme moment that throws the resultant past the base edge;
        // the normal and fatigue cases are untouched
        let mut input = reference_input();
        input.loads = input
            .loads
            .clone()
            .with_case(LoadCaseKind::Extreme, turbine_load(900_000.0));
        let output = run_verification(&input).unwrap();

        let combination = output.summary.report("load combination").unwrap();
        assert!(combination.verdicts.iter().any(|v| matches!(
            v,
            CaseVerdict::Indeterminate {
                case: LoadCaseKind::Extreme,
                ..
            }
        )));
        assert!(!output.summary.acceptable);

        // The remaining cases still carry evaluated outcomes
        assert!(output
            .standard_loads
            .iter()
            .any(|l| l.case == LoadCaseKind::Normal));
        assert!(!output
            .standard_loads
            .iter()
            .any(|l| l.case == LoadCaseKind::Extreme));
        let bearing = output.summary.report("bearing capacity").unwrap();
        assert!(bearing
            .verdicts
            .iter()
            .any(|v| matches!(v, CaseVerdict::Evaluated(o) if o.case == LoadCaseKind::Normal)));
    }

    #[test]
    fn test_advisories_collected_from_partial_contact() {
        // Push the extreme case into partial contact but keep it bearable
        let mut input = reference_input();
        input.loads = input
            .loads
            .clone()
            .with_case(LoadCaseKind::Extreme, turbine_load(150_000.0));
        let output = run_verification(&input).unwrap();

        let extreme = output
            .standard_loads
            .iter()
            .find(|l| l.case == LoadCaseKind::Extreme)
            .unwrap();
        assert!(extreme.contact.detached_area_m2() > 0.0);
        assert!(!output.summary.advisories.is_empty());
    }
}
