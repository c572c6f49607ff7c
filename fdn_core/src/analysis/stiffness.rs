//! # Dynamic Ground Stiffness Verification
//!
//! Elastic half-space estimates of the rotational and horizontal dynamic
//! stiffness under the base, compared against the turbine supplier's minimum
//! requirements:
//!
//! ```text
//! Kφ = 4(1−2ν) / [3(1−ν)²] · R³ · Es,dyn
//! KH = 2(1−2ν) / (1−ν)²    · R  · Es,dyn
//! ```
//!
//! ν and Es,dyn come from the founding layer; with no measured dynamic
//! modulus the static compression modulus is scaled by the customary factor
//! of ten.

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};
use crate::loads::LoadCaseKind;
use crate::report::{AnalyzerReport, CaseVerdict, CheckOutcome};
use crate::soil::SoilProfile;
use crate::units::mpa_to_pa;

/// Supplier minimum stiffness requirements
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StiffnessMinima {
    /// Minimum rotational stiffness (N·m/rad)
    pub rotational_n_m_rad: f64,

    /// Minimum horizontal stiffness (N/m)
    pub horizontal_n_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiffnessInput {
    pub profile: SoilProfile,

    /// Founding depth where the supporting layer is selected (m)
    pub founding_depth_m: f64,

    /// Base radius R (m)
    pub base_radius_m: f64,

    pub minima: Option<StiffnessMinima>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiffnessResult {
    /// Dynamic modulus used (MPa)
    pub dynamic_modulus_mpa: f64,

    pub poisson_ratio: f64,

    /// Rotational stiffness Kφ (N·m/rad)
    pub rotational_n_m_rad: f64,

    /// Horizontal stiffness KH (N/m)
    pub horizontal_n_m: f64,
}

/// Compute both stiffness estimates from the founding layer
pub fn calculate(input: &StiffnessInput) -> VerifyResult<StiffnessResult> {
    let layer = input.profile.layer_at(input.founding_depth_m)?;
    let nu = layer.poisson_ratio;
    let es_dyn_mpa = layer.dynamic_modulus_or_estimate_mpa();
    let es_dyn_pa = mpa_to_pa(es_dyn_mpa);
    let r = input.base_radius_m;

    let rotational =
        4.0 * (1.0 - 2.0 * nu) / (3.0 * (1.0 - nu).powi(2)) * r.powi(3) * es_dyn_pa;
    let horizontal = 2.0 * (1.0 - 2.0 * nu) / (1.0 - nu).powi(2) * r * es_dyn_pa;

    Ok(StiffnessResult {
        dynamic_modulus_mpa: es_dyn_mpa,
        poisson_ratio: nu,
        rotational_n_m_rad: rotational,
        horizontal_n_m: horizontal,
    })
}

/// Verify both stiffness estimates against the supplier minima.
///
/// The check is case independent; the outcomes are reported once under the
/// normal case. Missing minima are a configuration fault.
pub fn check(input: &StiffnessInput, result: &StiffnessResult) -> VerifyResult<AnalyzerReport> {
    let minima = input.minima.ok_or_else(|| {
        VerifyError::configuration(
            "stiffness_minima",
            "minimum rotational and horizontal stiffness requirements are not set",
        )
    })?;

    let mut report = AnalyzerReport::new("dynamic stiffness");
    report.verdicts.push(CaseVerdict::Evaluated(
        CheckOutcome::new(
            LoadCaseKind::Normal,
            minima.rotational_n_m_rad,
            result.rotational_n_m_rad,
        )
        .with_verdict(result.rotational_n_m_rad >= minima.rotational_n_m_rad),
    ));
    report.verdicts.push(CaseVerdict::Evaluated(
        CheckOutcome::new(
            LoadCaseKind::Normal,
            minima.horizontal_n_m,
            result.horizontal_n_m,
        )
        .with_verdict(result.horizontal_n_m >= minima.horizontal_n_m),
    ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::SoilLayer;

    fn reference_input(minima: Option<StiffnessMinima>) -> StiffnessInput {
        StiffnessInput {
            profile: SoilProfile {
                layers: vec![SoilLayer {
                    name: "silty clay".to_string(),
                    top_depth_m: 0.0,
                    bottom_depth_m: 30.0,
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
            },
            founding_depth_m: 4.5,
            base_radius_m: 11.5,
            minima,
        }
    }

    #[test]
    fn test_stiffness_reference_values() {
        let input = reference_input(None);
        let result = calculate(&input).unwrap();

        // Es,dyn = 10·8 MPa = 80 MPa
        assert!((result.dynamic_modulus_mpa - 80.0).abs() < 1e-9);

        // Kφ = 4·0.4/(3·0.49)·11.5³·8e7 ≈ 1.324e11 N·m/rad
        let expected_rot = 4.0 * 0.4 / (3.0 * 0.49) * 11.5f64.powi(3) * 8.0e7;
        assert!((result.rotational_n_m_rad - expected_rot).abs() / expected_rot < 1e-12);

        // KH = 2·0.4/0.49·11.5·8e7 ≈ 1.50e9 N/m
        let expected_h = 2.0 * 0.4 / 0.49 * 11.5 * 8.0e7;
        assert!((result.horizontal_n_m - expected_h).abs() / expected_h < 1e-12);
    }

    #[test]
    fn test_documented_regression_case() {
        // 15 MPa clay under a 12 m base, ν = 0.3
        let mut input = reference_input(None);
        input.profile.layers[0].compression_modulus_mpa = 15.0;
        input.base_radius_m = 12.0;
        let result = calculate(&input).unwrap();

        assert!((result.rotational_n_m_rad - 2.82e11).abs() / 2.82e11 < 0.005);
        assert!((result.horizontal_n_m - 2.94e9).abs() / 2.94e9 < 0.005);
    }

    #[test]
    fn test_measured_dynamic_modulus_preferred() {
        let mut input = reference_input(None);
        input.profile.layers[0].dynamic_modulus_mpa = Some(120.0);
        let result = calculate(&input).unwrap();
        assert!((result.dynamic_modulus_mpa - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_against_minima() {
        let input = reference_input(Some(StiffnessMinima {
            rotational_n_m_rad: 1.0e11,
            horizontal_n_m: 5.0e8,
        }));
        let result = calculate(&input).unwrap();
        let report = check(&input, &result).unwrap();
        assert!(report.passes());

        let strict = reference_input(Some(StiffnessMinima {
            rotational_n_m_rad: 5.0e11,
            horizontal_n_m: 5.0e8,
        }));
        let result = calculate(&strict).unwrap();
        let report = check(&strict, &result).unwrap();
        assert!(!report.passes());
    }

    #[test]
    fn test_missing_minima_is_configuration_error() {
        let input = reference_input(None);
        let result = calculate(&input).unwrap();
        let err = check(&input, &result).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
