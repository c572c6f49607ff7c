//! # Foundation CLI Application
//!
//! Terminal front end for the verification engine. Prompts for the handful
//! of quantities that usually vary between sites, runs the full pipeline on
//! a representative foundation, and prints the per-check verdicts plus the
//! JSON summary.

use std::io::{self, BufRead, Write};

use fdn_core::analysis::stiffness::StiffnessMinima;
use fdn_core::geometry::FoundationGeometry;
use fdn_core::loads::{LoadCaseKind, LoadCaseSet, TurbineLoad};
use fdn_core::materials::{ConcreteGrade, ConcreteMaterial, Reinforcement};
use fdn_core::soil::{SoilLayer, SoilProfile};
use fdn_core::tower::{SeismicIntensity, TowerInput, TowerSegment};
use fdn_core::verify::{run_verification, DesignInput, VerificationConfig};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Foundation CLI - Wind Turbine Foundation Verifier");
    println!("=================================================");
    println!();

    let base_radius = prompt_f64("Enter base radius (m) [11.5]: ", 11.5);
    let buried_depth = prompt_f64("Enter buried depth (m) [4.5]: ", 4.5);
    let fz = prompt_f64("Enter vertical turbine force Fz (kN) [4200]: ", 4200.0);
    let extreme_moment = prompt_f64("Enter extreme moment (kN·m) [65000]: ", 65_000.0);

    println!();
    println!("Verifying C40 foundation on silty clay...");
    println!();

    let geometry = FoundationGeometry {
        base_radius_m: base_radius,
        column_radius_m: 3.5,
        edge_height_m: 0.8,
        frustum_height_m: 2.4,
        column_height_m: 1.5,
        above_ground_height_m: 0.2,
        buried_depth_m: buried_depth,
        cushion_thickness_mm: 100.0,
    };

    let profile = SoilProfile {
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
    };

    let case = |moment: f64| TurbineLoad {
        fr_kn: 600.0,
        fv_kn: 200.0,
        fz_kn: fz,
        mx_kn_m: moment,
        my_kn_m: 0.0,
        mz_kn_m: 1500.0,
    };

    let input = DesignInput {
        geometry,
        material: ConcreteMaterial::from_grade(ConcreteGrade::C40),
        reinforcement: Reinforcement::default(),
        profile,
        loads: LoadCaseSet::new()
            .with_case(LoadCaseKind::Normal, case(40_000.0))
            .with_case(LoadCaseKind::Extreme, case(extreme_moment))
            .with_case(LoadCaseKind::Fatigue, case(25_000.0)),
        tower: Some(TowerInput {
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
        }),
        config: VerificationConfig {
            stiffness_minima: Some(StiffnessMinima {
                rotational_n_m_rad: 6.0e10,
                horizontal_n_m: 4.0e8,
            }),
            ..VerificationConfig::default()
        },
    };

    match run_verification(&input) {
        Ok(output) => {
            println!("═══════════════════════════════════════");
            println!("  FOUNDATION VERIFICATION RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Self-weight:");
            println!("  Concrete: {:.0} kN", output.self_weight.concrete_weight_kn);
            println!("  Backfill: {:.0} kN", output.self_weight.backfill_weight_kn);
            println!("  Buoyancy: {:.0} kN", output.self_weight.buoyancy_kn);
            println!("  Total Gk: {:.0} kN", output.self_weight.total_weight_kn);
            println!();
            if let Some(tower) = &output.tower {
                println!("Tower:");
                println!("  Mass:   {:.0} t", tower.tower_mass_t);
                println!("  Period: {:.2} s", tower.period_s);
                println!(
                    "  Rare-earthquake action: V={:.0} kN, M={:.0} kN·m",
                    tower.rare.shear_kn, tower.rare.moment_kn_m
                );
                println!();
            }
            println!("Checks:");
            for report in &output.summary.reports {
                println!(
                    "  {:<22} {}",
                    report.analyzer,
                    status_icon(report.passes())
                );
            }
            if !output.summary.advisories.is_empty() {
                println!();
                println!("Advisories:");
                for advisory in &output.summary.advisories {
                    println!("  - {}", advisory);
                }
            }
            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  RESULT: {}",
                if output.summary.acceptable {
                    "ACCEPTABLE"
                } else {
                    "NOT ACCEPTABLE"
                }
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Summary (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&output.summary) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
