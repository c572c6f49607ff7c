//! # Settlement and Tilt Verification
//!
//! Layered summation of consolidation settlement under the base center and
//! the tilt of the base from the uneven pressure distribution.
//!
//! Sublayers are 1.0 m thick below a first 0.8 m slice. Each contributes
//!
//! ```text
//! ΔSi = (P0k / Esi)·(zi·ᾱi − zi−1·ᾱi−1)
//! ```
//!
//! with ᾱ the mean influence factor at z/r. Summation stops once a layer
//! contributes no more than 2.5 % of the running total; the raw sum is then
//! scaled by the adjustment coefficient ψs interpolated from the equivalent
//! compression modulus. Tilt decomposes the edge pressures into a uniform
//! block plus a triangular block and differences the settlements of the two
//! base edges.

use serde::{Deserialize, Serialize};

use crate::errors::VerifyResult;
use crate::geometry::FoundationGeometry;
use crate::loads::coefficients::{
    settlement_adjustment, triangular_influence_high_edge, triangular_influence_low_edge,
    uniform_influence_factor,
};
use crate::loads::LoadCaseKind;
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};
use crate::soil::SoilProfile;

/// First sublayer boundary below the base (m)
const FIRST_SUBLAYER_M: f64 = 0.8;

/// Thickness of every following sublayer (m)
const SUBLAYER_THICKNESS_M: f64 = 1.0;

/// A layer contributing no more than this fraction ends the summation
const CONVERGENCE_RATIO: f64 = 0.025;

/// Sublayer cap; hitting it is reported as an advisory
const MAX_SUBLAYERS: usize = 50;

/// Default allowable settlement (mm)
pub const ALLOWABLE_SETTLEMENT_MM: f64 = 100.0;

/// Allowable tilt, and the tighter limit for hubs above 100 m
pub const ALLOWABLE_TILT: f64 = 0.004;
pub const ALLOWABLE_TILT_TALL_HUB: f64 = 0.003;
const TALL_HUB_HEIGHT_M: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInput {
    pub geometry: FoundationGeometry,
    pub profile: SoilProfile,

    /// Mean standard-combination base pressure Pk (kPa)
    pub pk_kpa: f64,

    /// Edge pressures of the governing standard combination (kPa)
    pub pk_max_kpa: f64,
    pub pk_min_kpa: f64,

    /// Water table depth below grade, if present (m)
    pub water_depth_m: Option<f64>,

    /// Hub height above grade, selects the tilt limit (m)
    pub hub_height_m: f64,

    pub allowable_settlement_mm: f64,
}

/// One sublayer of the summation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubLayer {
    /// Sublayer bottom below the base (m)
    pub z_bottom_m: f64,

    /// Mean influence factor at the sublayer bottom
    pub alpha: f64,

    /// Compression modulus used for this sublayer (MPa)
    pub es_mpa: f64,

    /// Settlement contribution (mm)
    pub delta_s_mm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Effective overburden removed by excavation, Ps (kPa)
    pub ps_kpa: f64,

    /// Net additional pressure P0k = Pk − Ps (kPa)
    pub p0k_kpa: f64,

    pub layers: Vec<SubLayer>,

    /// Equivalent compression modulus of the compressed zone (MPa)
    pub equivalent_es_mpa: f64,

    /// Settlement adjustment coefficient ψs
    pub psi_s: f64,

    /// Raw layered sum before ψs (mm)
    pub raw_settlement_mm: f64,

    /// Final settlement s = ψs·Σ ΔSi (mm)
    pub settlement_mm: f64,

    /// Whether the summation converged before the sublayer cap
    pub converged: bool,

    /// Base tilt |s2 − s1| / D
    pub tilt: f64,

    pub allowable_settlement_mm: f64,
    pub allowable_tilt: f64,
}

struct LayeredSum {
    layers: Vec<SubLayer>,
    equivalent_es_mpa: f64,
    raw_mm: f64,
    converged: bool,
}

/// Layered summation for one pressure block under one influence-factor
/// profile. Stress in kPa and moduli in MPa make each term come out in mm.
fn layered_sum(
    profile: &SoilProfile,
    buried_depth_m: f64,
    base_radius_m: f64,
    stress_kpa: f64,
    alpha_at: impl Fn(f64) -> f64,
) -> VerifyResult<LayeredSum> {
    let mut layers = Vec::new();
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut total_mm = 0.0;
    let mut converged = false;

    if stress_kpa <= 0.0 {
        return Ok(LayeredSum {
            layers,
            equivalent_es_mpa: 0.0,
            raw_mm: 0.0,
            converged: true,
        });
    }

    let mut z_prev = 0.0_f64;
    for i in 0..MAX_SUBLAYERS {
        let z = FIRST_SUBLAYER_M + i as f64 * SUBLAYER_THICKNESS_M;
        let alpha = alpha_at(z / base_radius_m);
        let alpha_prev = if i == 0 {
            0.0
        } else {
            alpha_at(z_prev / base_radius_m)
        };

        let es_mpa = profile
            .layer_at(buried_depth_m + z)?
            .compression_modulus_mpa;
        let delta_term = z * alpha - z_prev * alpha_prev;

        numerator += delta_term;
        if es_mpa > 0.0 {
            denominator += delta_term / es_mpa;
        }

        let delta_s = stress_kpa / es_mpa * delta_term;
        total_mm += delta_s;

        layers.push(SubLayer {
            z_bottom_m: z,
            alpha,
            es_mpa,
            delta_s_mm: delta_s,
        });

        if delta_s / total_mm <= CONVERGENCE_RATIO {
            converged = true;
            break;
        }
        z_prev = z;
    }

    let equivalent_es = if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    };

    Ok(LayeredSum {
        layers,
        equivalent_es_mpa: equivalent_es,
        raw_mm: total_mm,
        converged,
    })
}

/// ψs-adjusted settlement of one pressure block (mm)
fn adjusted_settlement(sum: &LayeredSum, stress_kpa: f64, fak_kpa: f64) -> f64 {
    if sum.raw_mm <= 0.0 {
        return 0.0;
    }
    sum.raw_mm * settlement_adjustment(sum.equivalent_es_mpa, stress_kpa, fak_kpa)
}

/// Run the full settlement and tilt computation
pub fn calculate(input: &SettlementInput) -> VerifyResult<SettlementResult> {
    let geometry = &input.geometry;
    let depth = geometry.buried_depth_m;
    let radius = geometry.base_radius_m;

    let ps = input
        .profile
        .effective_overburden_kpa(depth, input.water_depth_m)?;
    let p0k = input.pk_kpa - ps;
    let fak = input.profile.layer_at(depth)?.bearing_capacity_kpa;

    let center = layered_sum(&input.profile, depth, radius, p0k, uniform_influence_factor)?;
    let psi_s = if center.raw_mm > 0.0 {
        settlement_adjustment(center.equivalent_es_mpa, p0k, fak)
    } else {
        0.0
    };
    let settlement_mm = center.raw_mm * psi_s;

    // Tilt: uniform block at P0k,min plus a triangular block peaking at
    // P0k,max − P0k,min; settle both base edges and difference them
    let p0k_max = input.pk_max_kpa - ps;
    let p0k_min = input.pk_min_kpa - ps;
    let triangular = p0k_max - p0k_min;

    let tri_high = layered_sum(
        &input.profile,
        depth,
        radius,
        triangular,
        triangular_influence_high_edge,
    )?;
    let tri_low = layered_sum(
        &input.profile,
        depth,
        radius,
        triangular,
        triangular_influence_low_edge,
    )?;
    let uniform = layered_sum(&input.profile, depth, radius, p0k_min, uniform_influence_factor)?;

    let s_uniform = adjusted_settlement(&uniform, p0k_min, fak);
    let s_high = adjusted_settlement(&tri_high, triangular, fak) + s_uniform;
    let s_low = adjusted_settlement(&tri_low, triangular, fak) + s_uniform;

    // Settlements are in mm, the diameter in m
    let tilt = (s_high - s_low).abs() / (2.0 * radius * 1000.0);

    let allowable_tilt = if input.hub_height_m > TALL_HUB_HEIGHT_M {
        ALLOWABLE_TILT_TALL_HUB
    } else {
        ALLOWABLE_TILT
    };

    let converged = center.converged && tri_high.converged && tri_low.converged
        && uniform.converged;

    Ok(SettlementResult {
        ps_kpa: ps,
        p0k_kpa: p0k,
        layers: center.layers,
        equivalent_es_mpa: center.equivalent_es_mpa,
        psi_s,
        raw_settlement_mm: center.raw_mm,
        settlement_mm,
        converged,
        tilt,
        allowable_settlement_mm: input.allowable_settlement_mm,
        allowable_tilt,
    })
}

/// Verify settlement and tilt against their allowables
pub fn check(input: &SettlementInput) -> VerifyResult<(SettlementResult, AnalyzerReport)> {
    let result = calculate(input)?;
    let mut report = AnalyzerReport::new("settlement");

    let mut settlement_outcome = CheckOutcome::new(
        LoadCaseKind::Normal,
        result.settlement_mm,
        result.allowable_settlement_mm,
    );
    if !result.converged {
        settlement_outcome = settlement_outcome.with_advisory(format!(
            "settlement summation stopped at the {MAX_SUBLAYERS}-sublayer cap without converging"
        ));
    }
    report
        .verdicts
        .push(CaseVerdict::Evaluated(settlement_outcome));

    report.verdicts.push(CaseVerdict::Evaluated(CheckOutcome::new(
        LoadCaseKind::Normal,
        result.tilt,
        result.allowable_tilt,
    )));

    Ok((result, report))
}
