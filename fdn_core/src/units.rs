//! # Unit Conversions
//!
//! Conversion helpers between the unit systems that coexist in Chinese
//! foundation design practice. Forces are carried in kilonewtons, lengths in
//! meters, and pressures in kilopascals throughout the pipeline; concrete
//! strengths arrive in N/mm² and soil moduli in MPa, so the boundary
//! conversions live here.
//!
//! ## Design Philosophy
//!
//! Plain functions over newtype wrappers: the pipeline works in one
//! consistent kN/m/kPa system internally, so the type-safety payoff of
//! wrappers is small and raw `f64` keeps JSON clean.
//!
//! ## Example
//!
//! ```rust
//! use fdn_core::units::n_per_mm2_to_kpa;
//!
//! // C40 tensile design strength: 1.71 N/mm² = 1710 kPa
//! assert_eq!(n_per_mm2_to_kpa(1.71), 1710.0);
//! ```

/// Effective unit weight of water, kN/m³
pub const WATER_UNIT_WEIGHT: f64 = 10.0;

/// Convert a concrete strength from N/mm² (MPa) to kPa (kN/m²)
pub fn n_per_mm2_to_kpa(strength: f64) -> f64 {
    strength * 1000.0
}

/// Convert a soil modulus from MPa to Pa
pub fn mpa_to_pa(modulus: f64) -> f64 {
    modulus * 1.0e6
}

/// Convert a length from millimeters to meters
pub fn mm_to_m(length: f64) -> f64 {
    length / 1000.0
}

/// Convert a length from meters to millimeters
pub fn m_to_mm(length: f64) -> f64 {
    length * 1000.0
}

/// Dynamic compression modulus from a static one, MPa in and out.
///
/// Measured dynamic moduli are preferred; when only a static consolidation
/// modulus is available, a tenfold increase is the accepted estimate for the
/// small-strain dynamic range.
pub fn dynamic_modulus_from_static(static_modulus_mpa: f64) -> f64 {
    static_modulus_mpa * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_conversion() {
        assert!((n_per_mm2_to_kpa(19.1) - 19100.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_round_trip() {
        assert!((mm_to_m(m_to_mm(3.2)) - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_modulus_estimate() {
        // 15 MPa static consolidation modulus -> 150 MPa dynamic
        assert!((dynamic_modulus_from_static(15.0) - 150.0).abs() < 1e-9);
    }
}
