//! # Tower Load Calculator
//!
//! Reduces the tower-drum stack to the quantities the seismic load cases
//! need: cumulative mass, first-mode vibration period from a cantilever
//! stiffness model, and the equivalent seismic shear and moment applied at
//! the foundation top via the design response spectrum (base shear method,
//! 5 % damping).

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{VerifyError, VerifyResult};

const GRAVITY: f64 = 9.81;

/// Fraction of tower mass lumped with the hub for the first mode
const TOWER_MASS_PARTICIPATION: f64 = 0.25;

/// Equivalent-gravity factor of the base shear method
const EQUIVALENT_GRAVITY_FACTOR: f64 = 0.85;

/// Height factor locating the resultant of the first-mode inertia forces
const RESULTANT_HEIGHT_FACTOR: f64 = 2.0 / 3.0;

/// Seismic fortification intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeismicIntensity {
    Degree6,
    Degree7,
    Degree8,
    Degree9,
}

impl SeismicIntensity {
    /// Maximum seismic influence coefficient, frequent and rare earthquakes
    pub fn alpha_max(&self, frequency: SpectrumFrequency) -> f64 {
        match (self, frequency) {
            (SeismicIntensity::Degree6, SpectrumFrequency::Frequent) => 0.04,
            (SeismicIntensity::Degree7, SpectrumFrequency::Frequent) => 0.08,
            (SeismicIntensity::Degree8, SpectrumFrequency::Frequent) => 0.16,
            (SeismicIntensity::Degree9, SpectrumFrequency::Frequent) => 0.32,
            (SeismicIntensity::Degree6, SpectrumFrequency::Rare) => 0.28,
            (SeismicIntensity::Degree7, SpectrumFrequency::Rare) => 0.50,
            (SeismicIntensity::Degree8, SpectrumFrequency::Rare) => 0.90,
            (SeismicIntensity::Degree9, SpectrumFrequency::Rare) => 1.40,
        }
    }
}

/// Which branch of the fortification spectrum to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectrumFrequency {
    /// Frequently occurring (serviceability-level) earthquake
    Frequent,
    /// Rarely occurring (maximum considered) earthquake
    Rare,
}

/// One welded tower drum segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerSegment {
    /// Mean shell diameter (m)
    pub diameter_m: f64,

    /// Wall thickness (mm)
    pub wall_thickness_mm: f64,

    /// Segment height (m)
    pub height_m: f64,

    /// Shell material density (t/m³); 7.85 for structural steel
    pub density_t_m3: f64,
}

impl TowerSegment {
    /// Shell mass (t)
    pub fn mass_t(&self) -> f64 {
        let t = crate::units::mm_to_m(self.wall_thickness_mm);
        PI * self.diameter_m * t * self.height_m * self.density_t_m3
    }

    /// Thin-walled second moment of area (m⁴)
    pub fn moment_of_inertia_m4(&self) -> f64 {
        let t = crate::units::mm_to_m(self.wall_thickness_mm);
        let r = self.diameter_m / 2.0;
        PI * r.powi(3) * t
    }
}

/// Tower and turbine head description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerInput {
    /// Drum segments, bottom to top
    pub segments: Vec<TowerSegment>,

    /// Nacelle plus rotor mass at the hub (t)
    pub hub_mass_t: f64,

    /// Hub height above the foundation top (m)
    pub hub_height_m: f64,

    /// Shell elastic modulus (MPa)
    pub steel_modulus_mpa: f64,

    /// Site characteristic period Tg (s)
    pub site_period_s: f64,

    /// Fortification intensity of the site
    pub intensity: SeismicIntensity,
}

impl TowerInput {
    pub fn validate(&self) -> VerifyResult<()> {
        if self.segments.is_empty() {
            return Err(VerifyError::invalid_input(
                "segments",
                "[]",
                "At least one tower segment is required",
            ));
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.diameter_m <= 0.0
                || segment.wall_thickness_mm <= 0.0
                || segment.height_m <= 0.0
                || segment.density_t_m3 <= 0.0
            {
                return Err(VerifyError::invalid_input(
                    format!("segments[{}]", i),
                    format!("{:?}", segment),
                    "Segment dimensions and density must be positive",
                ));
            }
        }
        if self.hub_mass_t <= 0.0 {
            return Err(VerifyError::invalid_input(
                "hub_mass_t",
                self.hub_mass_t.to_string(),
                "Hub mass must be positive",
            ));
        }
        let stack_height: f64 = self.segments.iter().map(|s| s.height_m).sum();
        if self.hub_height_m < stack_height {
            return Err(VerifyError::invalid_input(
                "hub_height_m",
                self.hub_height_m.to_string(),
                format!("Hub height below the segment stack height {:.2} m", stack_height),
            ));
        }
        if self.site_period_s <= 0.0 || self.site_period_s > 1.5 {
            return Err(VerifyError::invalid_input(
                "site_period_s",
                self.site_period_s.to_string(),
                "Characteristic period expected in (0, 1.5] s",
            ));
        }
        Ok(())
    }

    /// Total shell mass (t)
    pub fn tower_mass_t(&self) -> f64 {
        self.segments.iter().map(|s| s.mass_t()).sum()
    }

    /// Height-weighted average bending inertia of the stack (m⁴)
    fn average_inertia_m4(&self) -> f64 {
        let total_height: f64 = self.segments.iter().map(|s| s.height_m).sum();
        self.segments
            .iter()
            .map(|s| s.moment_of_inertia_m4() * s.height_m)
            .sum::<f64>()
            / total_height
    }
}

/// Equivalent loads at the foundation top for one spectrum branch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeismicAction {
    /// Seismic influence coefficient α(T)
    pub alpha: f64,

    /// Horizontal base shear (kN)
    pub shear_kn: f64,

    /// Overturning moment at the foundation top (kN·m)
    pub moment_kn_m: f64,
}

/// Tower reduction results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerLoadResult {
    /// Shell mass of the drum stack (t)
    pub tower_mass_t: f64,

    /// First-mode vibration period (s)
    pub period_s: f64,

    /// Frequent-earthquake equivalent action
    pub frequent: SeismicAction,

    /// Rare-earthquake equivalent action
    pub rare: SeismicAction,
}

/// Seismic influence coefficient α(T) on the standard design spectrum,
/// 5 % damping (η2 = 1.0, γ = 0.9, η1 = 0.02).
pub fn spectrum_alpha(period_s: f64, site_period_s: f64, alpha_max: f64) -> f64 {
    let tg = site_period_s;
    if period_s <= 0.1 {
        (0.45 + 5.5 * period_s) * alpha_max
    } else if period_s <= tg {
        alpha_max
    } else if period_s <= 5.0 * tg {
        (tg / period_s).powf(0.9) * alpha_max
    } else {
        let tail = 0.2_f64.powf(0.9) - 0.02 * (period_s - 5.0 * tg);
        (tail * alpha_max).max(0.0)
    }
}

/// Reduce the tower stack to period and equivalent seismic actions
pub fn calculate(input: &TowerInput) -> VerifyResult<TowerLoadResult> {
    input.validate()?;

    let tower_mass = input.tower_mass_t();
    let hub_mass = input.hub_mass_t;

    // Cantilever tip stiffness with a height-weighted inertia
    let e_pa = crate::units::mpa_to_pa(input.steel_modulus_mpa);
    let inertia = input.average_inertia_m4();
    let stiffness_n_m = 3.0 * e_pa * inertia / input.hub_height_m.powi(3);

    // First mode: hub mass plus a participation share of the shell
    let modal_mass_kg = (hub_mass + TOWER_MASS_PARTICIPATION * tower_mass) * 1000.0;
    let period_s = 2.0 * PI * (modal_mass_kg / stiffness_n_m).sqrt();

    // Base shear method on the total representative gravity load
    let total_gravity_kn = (tower_mass + hub_mass) * GRAVITY;
    let equivalent_gravity_kn = EQUIVALENT_GRAVITY_FACTOR * total_gravity_kn;
    let resultant_height_m = RESULTANT_HEIGHT_FACTOR * input.hub_height_m;

    let action = |frequency: SpectrumFrequency| {
        let alpha = spectrum_alpha(
            period_s,
            input.site_period_s,
            input.intensity.alpha_max(frequency),
        );
        let shear = alpha * equivalent_gravity_kn;
        SeismicAction {
            alpha,
            shear_kn: shear,
            moment_kn_m: shear * resultant_height_m,
        }
    };

    Ok(TowerLoadResult {
        tower_mass_t: tower_mass,
        period_s,
        frequent: action(SpectrumFrequency::Frequent),
        rare: action(SpectrumFrequency::Rare),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tower() -> TowerInput {
        TowerInput {
            segments: vec![
                TowerSegment {
                    diameter_m: 4.5,
                    wall_thickness_mm: 34.0,
                    height_m: 30.0,
                    density_t_m3: 7.85,
                },
                TowerSegment {
                    diameter_m: 4.0,
                    wall_thickness_mm: 26.0,
                    height_m: 30.0,
                    density_t_m3: 7.85,
                },
                TowerSegment {
                    diameter_m: 3.4,
                    wall_thickness_mm: 20.0,
                    height_m: 28.0,
                    density_t_m3: 7.85,
                },
            ],
            hub_mass_t: 110.0,
            hub_height_m: 90.0,
            steel_modulus_mpa: 206_000.0,
            site_period_s: 0.45,
            intensity: SeismicIntensity::Degree7,
        }
    }

    #[test]
    fn test_segment_mass() {
        let s = TowerSegment {
            diameter_m: 4.0,
            wall_thickness_mm: 25.0,
            height_m: 10.0,
            density_t_m3: 7.85,
        };
        // pi * 4 * 0.025 * 10 * 7.85 = 24.66 t
        assert!((s.mass_t() - 24.66).abs() < 0.01);
    }

    #[test]
    fn test_period_in_soft_tower_range() {
        let result = calculate(&test_tower()).unwrap();
        // Large turbine towers sit well past the spectrum plateau
        assert!(result.period_s > 1.0, "period {}", result.period_s);
        assert!(result.period_s < 6.0, "period {}", result.period_s);
    }

    #[test]
    fn test_spectrum_branches() {
        let alpha_max = 0.08;
        let tg = 0.45;
        // Plateau
        assert!((spectrum_alpha(0.3, tg, alpha_max) - alpha_max).abs() < 1e-12);
        // Power-decay branch is below the plateau
        assert!(spectrum_alpha(2.0, tg, alpha_max) < alpha_max);
        // Monotone decay past Tg
        assert!(spectrum_alpha(1.0, tg, alpha_max) > spectrum_alpha(2.0, tg, alpha_max));
        // Never negative far out on the tail
        assert!(spectrum_alpha(6.0, tg, alpha_max) >= 0.0);
    }

    #[test]
    fn test_rare_exceeds_frequent() {
        let result = calculate(&test_tower()).unwrap();
        assert!(result.rare.shear_kn > result.frequent.shear_kn);
        assert!(result.rare.moment_kn_m > result.frequent.moment_kn_m);
    }

    #[test]
    fn test_moment_is_shear_times_resultant_height() {
        let result = calculate(&test_tower()).unwrap();
        let expected = result.frequent.shear_kn * (2.0 / 3.0) * 90.0;
        assert!((result.frequent.moment_kn_m - expected).abs() < 1e-6);
    }

    #[test]
    fn test_empty_segments_rejected() {
        let mut tower = test_tower();
        tower.segments.clear();
        assert!(calculate(&tower).is_err());
    }
}
