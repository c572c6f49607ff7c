//! # Foundation Geometry
//!
//! The gravity foundation is a body of revolution: a cylindrical edge slab,
//! a conical frustum, and a cylindrical pedestal column, cast on a lean
//! concrete cushion. This module holds the dimensions, the validity checks,
//! and the derived section properties every analyzer consumes.
//!
//! ## Example
//!
//! ```rust
//! use fdn_core::geometry::FoundationGeometry;
//!
//! let geometry = FoundationGeometry {
//!     base_radius_m: 11.5,
//!     column_radius_m: 3.5,
//!     edge_height_m: 0.8,
//!     frustum_height_m: 2.4,
//!     column_height_m: 1.5,
//!     above_ground_height_m: 0.2,
//!     buried_depth_m: 4.5,
//!     cushion_thickness_mm: 100.0,
//! };
//! assert!(geometry.validate().is_ok());
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};

/// Height bookkeeping tolerance (m)
const HEIGHT_TOLERANCE: f64 = 0.01;

/// Flattest permitted plan-to-height ratio of the stepped base
const MAX_DIMENSION_RATIO: f64 = 2.5;

/// Steepest permitted frustum face, expressed as horizontal/vertical ≥ 1/4
const MIN_SLOPE_RATIO: f64 = 0.25;

/// Dimensions of the circular gravity foundation.
///
/// All radii and heights in meters; the cushion thickness follows drawing
/// practice and is given in millimeters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "base_radius_m": 11.5,
///   "column_radius_m": 3.5,
///   "edge_height_m": 0.8,
///   "frustum_height_m": 2.4,
///   "column_height_m": 1.5,
///   "above_ground_height_m": 0.2,
///   "buried_depth_m": 4.5,
///   "cushion_thickness_mm": 100.0
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FoundationGeometry {
    /// Base slab radius (m)
    pub base_radius_m: f64,

    /// Pedestal column radius (m)
    pub column_radius_m: f64,

    /// Edge slab height at the rim (m)
    pub edge_height_m: f64,

    /// Conical frustum height (m)
    pub frustum_height_m: f64,

    /// Pedestal column height, including the part above grade (m)
    pub column_height_m: f64,

    /// Height of the pedestal top above finished grade (m)
    pub above_ground_height_m: f64,

    /// Embedment depth from grade to the base underside (m)
    pub buried_depth_m: f64,

    /// Lean concrete cushion thickness (mm)
    pub cushion_thickness_mm: f64,
}

impl FoundationGeometry {
    /// Validate the dimensions, collecting every violation so a caller can
    /// fix all of them in one round trip.
    pub fn validate(&self) -> VerifyResult<()> {
        let mut violations = Vec::new();

        for (name, value) in [
            ("base_radius_m", self.base_radius_m),
            ("column_radius_m", self.column_radius_m),
            ("edge_height_m", self.edge_height_m),
            ("frustum_height_m", self.frustum_height_m),
            ("column_height_m", self.column_height_m),
            ("buried_depth_m", self.buried_depth_m),
        ] {
            if value <= 0.0 {
                violations.push(format!("{} must be positive (got {})", name, value));
            }
        }
        if self.above_ground_height_m < 0.0 {
            violations.push(format!(
                "above_ground_height_m cannot be negative (got {})",
                self.above_ground_height_m
            ));
        }
        if self.cushion_thickness_mm < 0.0 {
            violations.push(format!(
                "cushion_thickness_mm cannot be negative (got {})",
                self.cushion_thickness_mm
            ));
        }

        if self.base_radius_m > 0.0
            && self.column_radius_m > 0.0
            && self.column_radius_m >= self.base_radius_m
        {
            violations.push(format!(
                "base radius ({} m) must exceed column radius ({} m)",
                self.base_radius_m, self.column_radius_m
            ));
        }

        // Embedment bookkeeping: the body height must equal buried depth
        // plus the above-grade projection.
        let body_height = self.edge_height_m + self.frustum_height_m + self.column_height_m;
        let expected = self.buried_depth_m + self.above_ground_height_m;
        if self.buried_depth_m > 0.0 && (body_height - expected).abs() > HEIGHT_TOLERANCE {
            violations.push(format!(
                "body height {:.3} m inconsistent with buried depth + above-grade height {:.3} m",
                body_height, expected
            ));
        }

        if self.column_radius_m < self.base_radius_m
            && self.frustum_height_m > 0.0
            && self.edge_height_m > 0.0
        {
            let overhang = self.base_radius_m - self.column_radius_m;
            let slope = overhang / self.frustum_height_m;
            if slope < MIN_SLOPE_RATIO {
                violations.push(format!(
                    "frustum face slope 1:{:.2} steeper than the permitted 1:4",
                    slope
                ));
            }
            let ratio = overhang / (self.edge_height_m + self.frustum_height_m);
            if ratio > MAX_DIMENSION_RATIO {
                violations.push(format!(
                    "base overhang to depth ratio {:.2} exceeds the permitted {:.1}",
                    ratio, MAX_DIMENSION_RATIO
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::geometry(violations))
        }
    }

    /// Base diameter D (m)
    pub fn base_diameter_m(&self) -> f64 {
        2.0 * self.base_radius_m
    }

    /// Base contact area A = πR² (m²)
    pub fn base_area_m2(&self) -> f64 {
        PI * self.base_radius_m * self.base_radius_m
    }

    /// Elastic section modulus of the circular base, W = πD³/32 (m³)
    pub fn section_modulus_m3(&self) -> f64 {
        PI * self.base_diameter_m().powi(3) / 32.0
    }

    /// Second moment of area of the circular base, I = πD⁴/64 (m⁴)
    pub fn moment_of_inertia_m4(&self) -> f64 {
        PI * self.base_diameter_m().powi(4) / 64.0
    }

    /// Cushion thickness in meters
    pub fn cushion_thickness_m(&self) -> f64 {
        crate::units::mm_to_m(self.cushion_thickness_mm)
    }

    /// Moment lever arm from the tower flange down to the bearing plane (m)
    pub fn lever_arm_m(&self) -> f64 {
        self.edge_height_m + self.frustum_height_m + self.column_height_m
            + self.cushion_thickness_m()
    }

    /// Slab thickness at the column face, edge + frustum (m)
    pub fn slab_thickness_m(&self) -> f64 {
        self.edge_height_m + self.frustum_height_m
    }
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

    #[test]
    fn test_reference_geometry_valid() {
        assert!(reference_geometry().validate().is_ok());
    }

    #[test]
    fn test_section_properties() {
        let g = reference_geometry();
        assert!((g.base_area_m2() - 415.4756).abs() < 1e-3);
        // W = pi * 23^3 / 32 = 1194.49 m^3
        assert!((g.section_modulus_m3() - 1194.49).abs() < 0.01);
        // I = pi * 23^4 / 64 = 13736.7 m^4
        assert!((g.moment_of_inertia_m4() - 13736.66).abs() < 0.1);
    }

    #[test]
    fn test_lever_arm_includes_cushion() {
        let g = reference_geometry();
        assert!((g.lever_arm_m() - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_column_radius_exceeding_base_rejected() {
        let mut g = reference_geometry();
        g.column_radius_m = 12.0;
        let err = g.validate().unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
    }

    #[test]
    fn test_all_violations_collected() {
        let mut g = reference_geometry();
        g.edge_height_m = -0.5;
        g.column_radius_m = 12.0;
        match g.validate() {
            Err(VerifyError::Geometry { violations }) => {
                assert!(violations.len() >= 2);
            }
            other => panic!("expected geometry error, got {:?}", other),
        }
    }

    #[test]
    fn test_steep_frustum_rejected() {
        let mut g = reference_geometry();
        // Overhang 8 m over a 40 m frustum is 1:5, steeper than 1:4
        g.frustum_height_m = 40.0;
        g.column_height_m = 1.5;
        g.buried_depth_m = 42.1;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_height_bookkeeping_enforced() {
        let mut g = reference_geometry();
        g.buried_depth_m = 3.0;
        assert!(g.validate().is_err());
    }
}
