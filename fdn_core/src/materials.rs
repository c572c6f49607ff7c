//! # Materials
//!
//! Concrete grades and their code-tabulated design properties, plus the
//! reinforcement detail needed for effective-depth computations.
//!
//! Strength values follow the national concrete structures code tables;
//! `ConcreteMaterial::validate()` rejects custom values that stray outside
//! the tabulated bounds for the declared grade.
//!
//! ## Example
//!
//! ```rust
//! use fdn_core::materials::{ConcreteGrade, ConcreteMaterial};
//!
//! let concrete = ConcreteMaterial::from_grade(ConcreteGrade::C40);
//! assert_eq!(concrete.ft_n_mm2, 1.71);
//! assert_eq!(concrete.density_kn_m3, 25.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};

/// Standard concrete strength grades used for turbine foundations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteGrade {
    C25,
    C30,
    C35,
    C40,
    C45,
    C50,
}

impl ConcreteGrade {
    /// All supported grades
    pub const ALL: [ConcreteGrade; 6] = [
        ConcreteGrade::C25,
        ConcreteGrade::C30,
        ConcreteGrade::C35,
        ConcreteGrade::C40,
        ConcreteGrade::C45,
        ConcreteGrade::C50,
    ];

    /// Grade label as printed on drawings
    pub fn label(&self) -> &'static str {
        match self {
            ConcreteGrade::C25 => "C25",
            ConcreteGrade::C30 => "C30",
            ConcreteGrade::C35 => "C35",
            ConcreteGrade::C40 => "C40",
            ConcreteGrade::C45 => "C45",
            ConcreteGrade::C50 => "C50",
        }
    }

    /// Code-tabulated properties:
    /// (fc, ft, fck, ftk, Ec, fatigue deformation modulus), all N/mm²
    fn table(&self) -> (f64, f64, f64, f64, f64, f64) {
        match self {
            ConcreteGrade::C25 => (11.9, 1.27, 16.7, 1.78, 28000.0, 12000.0),
            ConcreteGrade::C30 => (14.3, 1.43, 20.1, 2.01, 30000.0, 13000.0),
            ConcreteGrade::C35 => (16.7, 1.57, 23.4, 2.20, 31500.0, 14000.0),
            ConcreteGrade::C40 => (19.1, 1.71, 26.8, 2.39, 32500.0, 15000.0),
            ConcreteGrade::C45 => (21.1, 1.80, 29.6, 2.51, 33500.0, 15500.0),
            ConcreteGrade::C50 => (23.1, 1.89, 32.4, 2.64, 34500.0, 16000.0),
        }
    }
}

/// Concrete material for the foundation body.
///
/// ## JSON Example
///
/// ```json
/// {
///   "grade": "C40",
///   "fc_n_mm2": 19.1,
///   "ft_n_mm2": 1.71,
///   "fck_n_mm2": 26.8,
///   "ftk_n_mm2": 2.39,
///   "ec_n_mm2": 32500.0,
///   "efc_n_mm2": 15000.0,
///   "density_kn_m3": 25.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    /// Declared strength grade
    pub grade: ConcreteGrade,

    /// Axial compressive design strength (N/mm²)
    pub fc_n_mm2: f64,

    /// Axial tensile design strength (N/mm²)
    pub ft_n_mm2: f64,

    /// Axial compressive characteristic strength (N/mm²)
    pub fck_n_mm2: f64,

    /// Axial tensile characteristic strength (N/mm²)
    pub ftk_n_mm2: f64,

    /// Elastic modulus (N/mm²)
    pub ec_n_mm2: f64,

    /// Fatigue deformation modulus (N/mm²)
    pub efc_n_mm2: f64,

    /// Unit weight of reinforced concrete (kN/m³)
    pub density_kn_m3: f64,
}

impl ConcreteMaterial {
    /// Build a material with the tabulated properties for a grade
    pub fn from_grade(grade: ConcreteGrade) -> Self {
        let (fc, ft, fck, ftk, ec, efc) = grade.table();
        ConcreteMaterial {
            grade,
            fc_n_mm2: fc,
            ft_n_mm2: ft,
            fck_n_mm2: fck,
            ftk_n_mm2: ftk,
            ec_n_mm2: ec,
            efc_n_mm2: efc,
            density_kn_m3: 25.0,
        }
    }

    /// Validate that supplied strengths stay within 5 % of the tabulated
    /// values for the declared grade and that the density is plausible.
    pub fn validate(&self) -> VerifyResult<()> {
        let (fc, ft, fck, ftk, _, _) = self.grade.table();
        let checks = [
            ("fc_n_mm2", self.fc_n_mm2, fc),
            ("ft_n_mm2", self.ft_n_mm2, ft),
            ("fck_n_mm2", self.fck_n_mm2, fck),
            ("ftk_n_mm2", self.ftk_n_mm2, ftk),
        ];
        for (field, actual, tabulated) in checks {
            if actual <= 0.0 || (actual - tabulated).abs() > 0.05 * tabulated {
                return Err(VerifyError::invalid_input(
                    field,
                    actual.to_string(),
                    format!(
                        "outside tabulated bounds for grade {} (expected about {:.2} N/mm²)",
                        self.grade.label(),
                        tabulated
                    ),
                ));
            }
        }
        if self.density_kn_m3 < 22.0 || self.density_kn_m3 > 27.0 {
            return Err(VerifyError::invalid_input(
                "density_kn_m3",
                self.density_kn_m3.to_string(),
                "Reinforced concrete unit weight expected between 22 and 27 kN/m³",
            ));
        }
        Ok(())
    }

    /// Tensile design strength converted to kPa for force-balance formulas
    pub fn ft_kpa(&self) -> f64 {
        crate::units::n_per_mm2_to_kpa(self.ft_n_mm2)
    }
}

/// Bottom reinforcement detail of the base slab
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reinforcement {
    /// Concrete cover to the outermost bar (mm)
    pub cover_mm: f64,

    /// Bottom bar diameter (mm)
    pub bar_diameter_mm: f64,
}

impl Default for Reinforcement {
    fn default() -> Self {
        Reinforcement {
            cover_mm: 50.0,
            bar_diameter_mm: 25.0,
        }
    }
}

impl Reinforcement {
    pub fn validate(&self) -> VerifyResult<()> {
        if self.cover_mm < 15.0 || self.cover_mm > 120.0 {
            return Err(VerifyError::invalid_input(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover expected between 15 and 120 mm",
            ));
        }
        if self.bar_diameter_mm < 6.0 || self.bar_diameter_mm > 50.0 {
            return Err(VerifyError::invalid_input(
                "bar_diameter_mm",
                self.bar_diameter_mm.to_string(),
                "Bar diameter expected between 6 and 50 mm",
            ));
        }
        Ok(())
    }

    /// Distance from slab soffit to the bar centroid (mm)
    pub fn centroid_offset_mm(&self) -> f64 {
        self.cover_mm + self.bar_diameter_mm / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c40_tabulated_values() {
        let c40 = ConcreteMaterial::from_grade(ConcreteGrade::C40);
        assert!((c40.fc_n_mm2 - 19.1).abs() < 1e-9);
        assert!((c40.ftk_n_mm2 - 2.39).abs() < 1e-9);
        assert!(c40.validate().is_ok());
    }

    #[test]
    fn test_ft_conversion() {
        let c40 = ConcreteMaterial::from_grade(ConcreteGrade::C40);
        assert!((c40.ft_kpa() - 1710.0).abs() < 1e-9);
    }

    #[test]
    fn test_strength_out_of_bounds_rejected() {
        let mut c30 = ConcreteMaterial::from_grade(ConcreteGrade::C30);
        c30.ft_n_mm2 = 2.5; // C40-class tensile strength declared as C30
        assert!(c30.validate().is_err());
    }

    #[test]
    fn test_reinforcement_centroid() {
        let rebar = Reinforcement {
            cover_mm: 50.0,
            bar_diameter_mm: 25.0,
        };
        assert!((rebar.centroid_offset_mm() - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let c35 = ConcreteMaterial::from_grade(ConcreteGrade::C35);
        let json = serde_json::to_string(&c35).unwrap();
        let roundtrip: ConcreteMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(c35.grade, roundtrip.grade);
        assert_eq!(c35.ec_n_mm2, roundtrip.ec_n_mm2);
    }
}
