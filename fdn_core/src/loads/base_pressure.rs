//! # Base Pressure Under Combined Loading
//!
//! Combines self-weight with one turbine load case into the resultant
//! vertical force, moment, and eccentricity at the bearing plane, then
//! resolves the contact-pressure distribution.
//!
//! The eccentricity branch is the load-bearing decision of the whole
//! pipeline: e ≤ R/4 keeps the full circle in contact with a trapezoidal
//! pressure block, e > R/4 lifts part of the base off the soil and the
//! pressure must be rebuilt from the compressed circular segment alone. The
//! two regimes are a discriminated type so no downstream check can read a
//! full-contact field off a partially detached base. Equality sits on the
//! full-contact side.
//!
//! The partial-contact regime has no closed form for the compressed height;
//! it is solved by bounded bisection on the force balance of the linear
//! pressure wedge over the segment.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};
use crate::geometry::FoundationGeometry;
use crate::loads::{CombinationKind, LoadCaseKind, LoadFactors, TurbineLoad};

/// Bisection iteration cap
const MAX_ITERATIONS: u32 = 100;

/// Bisection tolerance on the compressed height, relative to R
const HEIGHT_TOLERANCE: f64 = 1e-9;

/// Simpson integration slices for the segment force balance
const INTEGRATION_SLICES: usize = 200;

/// Reasonableness limit on e / r_column for a solid circular base
const ECCENTRICITY_COLUMN_LIMIT: f64 = 0.52;

/// Contact-pressure distribution at the bearing plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "regime")]
pub enum ContactPressure {
    /// e ≤ R/4: the whole base bears, trapezoidal block
    FullContact {
        p_max_kpa: f64,
        p_min_kpa: f64,
        p_avg_kpa: f64,
    },
    /// e > R/4: only a circular segment bears
    PartialContact {
        /// Compressed height measured from the most loaded edge (m)
        contact_height_m: f64,
        /// Bearing segment area (m²)
        contact_area_m2: f64,
        /// Lifted area (m²)
        detached_area_m2: f64,
        /// Peak pressure at the loaded edge (kPa)
        p_max_kpa: f64,
    },
}

impl ContactPressure {
    /// Peak pressure in either regime (kPa)
    pub fn p_max_kpa(&self) -> f64 {
        match self {
            ContactPressure::FullContact { p_max_kpa, .. } => *p_max_kpa,
            ContactPressure::PartialContact { p_max_kpa, .. } => *p_max_kpa,
        }
    }

    /// Detached area; zero with the base fully in contact (m²)
    pub fn detached_area_m2(&self) -> f64 {
        match self {
            ContactPressure::FullContact { .. } => 0.0,
            ContactPressure::PartialContact {
                detached_area_m2, ..
            } => *detached_area_m2,
        }
    }

    /// Bearing area (m²)
    pub fn contact_area_m2(&self, full_area_m2: f64) -> f64 {
        match self {
            ContactPressure::FullContact { .. } => full_area_m2,
            ContactPressure::PartialContact {
                contact_area_m2, ..
            } => *contact_area_m2,
        }
    }
}

/// One load case combined down to the bearing plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedLoad {
    pub case: LoadCaseKind,
    pub combination: CombinationKind,

    /// Vertical resultant N, self-weight included (kN)
    pub vertical_kn: f64,

    /// Resultant overturning moment at the bearing plane (kN·m)
    pub moment_kn_m: f64,

    /// Resultant horizontal shear (kN)
    pub shear_kn: f64,

    /// Eccentricity e = M / N (m)
    pub eccentricity_m: f64,

    pub contact: ContactPressure,

    /// Reasonableness advisory, e.g. the e/r column limit
    pub advisory: Option<String>,
}

impl CombinedLoad {
    /// Average gross pressure over the bearing area (kPa)
    pub fn average_pressure_kpa(&self, geometry: &FoundationGeometry) -> f64 {
        self.vertical_kn / self.contact.contact_area_m2(geometry.base_area_m2())
    }

    /// Net design reaction at the critical-section fiber, Pj (kPa).
    ///
    /// Pj = N / A_contact + (M / I) · (2R + r_col) / 3
    pub fn design_reaction_kpa(&self, geometry: &FoundationGeometry) -> f64 {
        let contact_area = self.contact.contact_area_m2(geometry.base_area_m2());
        let fiber = (2.0 * geometry.base_radius_m + geometry.column_radius_m) / 3.0;
        self.vertical_kn / contact_area
            + self.moment_kn_m / geometry.moment_of_inertia_m4() * fiber
    }
}

/// Combine self-weight and one turbine case into the bearing-plane load set
/// and resolve the pressure regime.
pub fn combine(
    geometry: &FoundationGeometry,
    self_weight_kn: f64,
    load: &TurbineLoad,
    case: LoadCaseKind,
    combination: CombinationKind,
    factors: &LoadFactors,
) -> VerifyResult<CombinedLoad> {
    let dead = combination.dead_factor(factors);
    let variable = combination.variable_factor(factors, case);

    let vertical = (self_weight_kn + load.fz_kn) * dead;
    let shear = load.resultant_shear_kn() * variable;
    let moment = load.resultant_moment_kn_m() * variable + shear * geometry.lever_arm_m();

    // Either condition leaves the case with no bearing equilibrium to solve;
    // it is voided on its own and the remaining cases proceed
    if vertical <= 0.0 {
        return Err(VerifyError::convergence(
            "load combination",
            case.label(),
            0,
            format!(
                "buoyant uplift exceeds the bearing weight ({:.1} kN)",
                vertical
            ),
        ));
    }

    let radius = geometry.base_radius_m;
    let eccentricity = moment / vertical;
    if eccentricity >= radius {
        return Err(VerifyError::convergence(
            "load combination",
            case.label(),
            0,
            format!(
                "resultant falls outside the base (e = {:.3} m, R = {:.3} m)",
                eccentricity, radius
            ),
        ));
    }

    let advisory = if eccentricity / geometry.column_radius_m > ECCENTRICITY_COLUMN_LIMIT {
        Some(format!(
            "{} case: e/r = {:.3} exceeds the {} limit for solid circular bases; enlarge the base or add ballast",
            case.label(),
            eccentricity / geometry.column_radius_m,
            ECCENTRICITY_COLUMN_LIMIT
        ))
    } else {
        None
    };

    let area = geometry.base_area_m2();
    let contact = if eccentricity <= radius / 4.0 {
        let p_avg = vertical / area;
        let bending = moment / geometry.section_modulus_m3();
        ContactPressure::FullContact {
            p_max_kpa: p_avg + bending,
            p_min_kpa: p_avg - bending,
            p_avg_kpa: p_avg,
        }
    } else {
        solve_partial_contact(radius, vertical, eccentricity, case)?
    };

    Ok(CombinedLoad {
        case,
        combination,
        vertical_kn: vertical,
        moment_kn_m: moment,
        shear_kn: shear,
        eccentricity_m: eccentricity,
        contact,
        advisory,
    })
}

/// Chord width of the base circle at distance `u` from the loaded edge (m)
fn chord_width(u: f64, radius: f64) -> f64 {
    2.0 * (u * (2.0 * radius - u)).max(0.0).sqrt()
}

/// Force balance of the linear pressure wedge over the compressed segment
/// of height `a`: returns the wedge volume per unit peak pressure and the
/// centroid distance of that volume from the loaded edge.
fn wedge_properties(a: f64, radius: f64) -> (f64, f64) {
    // Simpson's rule over [0, a]
    let n = INTEGRATION_SLICES;
    let h = a / n as f64;
    let mut volume = 0.0;
    let mut first_moment = 0.0;
    for i in 0..=n {
        let u = i as f64 * h;
        let weight = if i == 0 || i == n {
            1.0
        } else if i % 2 == 1 {
            4.0
        } else {
            2.0
        };
        let pressure_shape = 1.0 - u / a;
        let strip = pressure_shape * chord_width(u, radius);
        volume += weight * strip;
        first_moment += weight * u * strip;
    }
    volume *= h / 3.0;
    first_moment *= h / 3.0;
    (volume, first_moment / volume)
}

/// Area of the base circle within distance `a` of the loaded edge (m²)
fn segment_area(a: f64, radius: f64) -> f64 {
    // Zero-pressure line at x = a - R in circle-centered coordinates
    let c = (a - radius).clamp(-radius, radius);
    let lifted = radius * radius * (c / radius).acos() - c * (radius * radius - c * c).sqrt();
    (PI * radius * radius - lifted).clamp(0.0, PI * radius * radius)
}

/// Solve the compressed height for e > R/4 by bounded bisection.
///
/// The resultant of the pressure wedge must act at distance R - e from the
/// loaded edge; the wedge centroid grows monotonically with the compressed
/// height, so the root is bracketed by (0, 2R].
fn solve_partial_contact(
    radius: f64,
    vertical_kn: f64,
    eccentricity_m: f64,
    case: LoadCaseKind,
) -> VerifyResult<ContactPressure> {
    let target = radius - eccentricity_m;
    let residual = |a: f64| wedge_properties(a, radius).1 - target;

    let mut low = radius * 1e-6;
    let mut high = 2.0 * radius;
    if residual(low) > 0.0 || residual(high) < 0.0 {
        return Err(VerifyError::convergence(
            "partial contact",
            case.label(),
            0,
            format!(
                "force balance not bracketed for e = {:.3} m, R = {:.3} m",
                eccentricity_m, radius
            ),
        ));
    }

    let mut iterations = 0;
    while high - low > HEIGHT_TOLERANCE * radius {
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            return Err(VerifyError::convergence(
                "partial contact",
                case.label(),
                iterations,
                "bisection failed to converge on the compressed height",
            ));
        }
        let mid = 0.5 * (low + high);
        if residual(mid) < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    let contact_height = 0.5 * (low + high);
    let (wedge_volume, _) = wedge_properties(contact_height, radius);
    let contact_area = segment_area(contact_height, radius);
    let full_area = PI * radius * radius;

    Ok(ContactPressure::PartialContact {
        contact_height_m: contact_height,
        contact_area_m2: contact_area,
        detached_area_m2: (full_area - contact_area).max(0.0),
        p_max_kpa: vertical_kn / wedge_volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn combine_with_moment(moment_kn_m: f64, vertical_kn: f64) -> CombinedLoad {
        let load = TurbineLoad {
            mx_kn_m: moment_kn_m,
            fz_kn: 0.0,
            ..Default::default()
        };
        combine(
            &reference_geometry(),
            vertical_kn,
            &load,
            LoadCaseKind::Normal,
            CombinationKind::Standard,
            &LoadFactors::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_trapezoidal_identity() {
        let combined = combine_with_moment(50_000.0, 40_000.0);
        match combined.contact {
            ContactPressure::FullContact {
                p_max_kpa,
                p_min_kpa,
                p_avg_kpa,
            } => {
                assert!((p_max_kpa + p_min_kpa - 2.0 * p_avg_kpa).abs() < 1e-9);
            }
            other => panic!("expected full contact, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_eccentricity_stays_full_contact() {
        // M/N exactly R/4 = 2.875 m
        let combined = combine_with_moment(2.875 * 40_000.0, 40_000.0);
        assert!((combined.eccentricity_m - 2.875).abs() < 1e-9);
        assert!(matches!(combined.contact, ContactPressure::FullContact { .. }));
        assert_eq!(combined.contact.detached_area_m2(), 0.0);
    }

    #[test]
    fn test_partial_contact_just_past_boundary() {
        let combined = combine_with_moment(2.9 * 40_000.0, 40_000.0);
        match combined.contact {
            ContactPressure::PartialContact {
                contact_height_m,
                detached_area_m2,
                p_max_kpa,
                ..
            } => {
                // Barely detached: contact height close to the full diameter
                assert!(contact_height_m > 21.0 && contact_height_m < 23.0);
                assert!(detached_area_m2 > 0.0);
                assert!(detached_area_m2 < 0.05 * PI * 11.5_f64.powi(2));
                // Peak pressure continuous with the triangular limit 2N/A
                let triangular_limit = 2.0 * 40_000.0 / (PI * 11.5_f64.powi(2));
                assert!((p_max_kpa - triangular_limit).abs() / triangular_limit < 0.08);
            }
            other => panic!("expected partial contact, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_detachment_shrinks_contact() {
        let mild = combine_with_moment(3.5 * 40_000.0, 40_000.0);
        let severe = combine_with_moment(6.0 * 40_000.0, 40_000.0);
        assert!(severe.contact.detached_area_m2() > mild.contact.detached_area_m2());
        assert!(severe.contact.p_max_kpa() > mild.contact.p_max_kpa());
    }

    #[test]
    fn test_resultant_outside_base_is_recoverable() {
        let load = TurbineLoad {
            mx_kn_m: 12.0 * 40_000.0,
            ..Default::default()
        };
        let err = combine(
            &reference_geometry(),
            40_000.0,
            &load,
            LoadCaseKind::Extreme,
            CombinationKind::Standard,
            &LoadFactors::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "CONVERGENCE_ERROR");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_uplift_exceeding_weight_is_recoverable() {
        let load = TurbineLoad {
            fz_kn: -50_000.0,
            ..Default::default()
        };
        let err = combine(
            &reference_geometry(),
            40_000.0,
            &load,
            LoadCaseKind::Extreme,
            CombinationKind::Standard,
            &LoadFactors::default(),
        )
        .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_moment_includes_shear_lever_arm() {
        let load = TurbineLoad {
            fr_kn: 1000.0,
            mx_kn_m: 10_000.0,
            ..Default::default()
        };
        let combined = combine(
            &reference_geometry(),
            40_000.0,
            &load,
            LoadCaseKind::Normal,
            CombinationKind::Standard,
            &LoadFactors::default(),
        )
        .unwrap();
        // Lever arm 4.8 m: 10000 + 1000 * 4.8
        assert!((combined.moment_kn_m - 14_800.0).abs() < 1e-9);
    }

    #[test]
    fn test_basic_unfavorable_factors_applied() {
        let load = TurbineLoad {
            fz_kn: 1000.0,
            mx_kn_m: 10_000.0,
            ..Default::default()
        };
        let combined = combine(
            &reference_geometry(),
            40_000.0,
            &load,
            LoadCaseKind::Normal,
            CombinationKind::BasicUnfavorable,
            &LoadFactors::default(),
        )
        .unwrap();
        assert!((combined.vertical_kn - 41_000.0 * 1.3).abs() < 1e-9);
        assert!((combined.moment_kn_m - 10_000.0 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_eccentricity_advisory() {
        // e = 2.0 m gives e/r = 0.571 over the 3.5 m column
        let combined = combine_with_moment(2.0 * 40_000.0, 40_000.0);
        assert!(combined.advisory.is_some());

        let mild = combine_with_moment(1.0 * 40_000.0, 40_000.0);
        assert!(mild.advisory.is_none());
    }

    #[test]
    fn test_design_reaction_uses_contact_area() {
        let combined = combine_with_moment(50_000.0, 40_000.0);
        let geometry = reference_geometry();
        let expected = 40_000.0 / geometry.base_area_m2()
            + combined.moment_kn_m / geometry.moment_of_inertia_m4()
                * (2.0 * 11.5 + 3.5)
                / 3.0;
        assert!((combined.design_reaction_kpa(&geometry) - expected).abs() < 1e-9);
    }
}
