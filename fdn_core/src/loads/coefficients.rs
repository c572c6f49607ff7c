//! # Code Coefficient Tables
//!
//! Interpolated lookup tables from the foundation design code appendices:
//! the mean additional-stress influence factor under a uniformly loaded
//! circular area (table D.0.3), the edge-point factors under a triangular
//! pressure distribution (table D.0.4), and the settlement adjustment
//! coefficient ψs (table 6.4.2). All lookups clamp at the table boundaries
//! and interpolate linearly between tabulated rows.

use once_cell::sync::Lazy;

/// Mean influence factor values for z/r = 0.0, 0.1, … 5.0 (table D.0.3,
/// center of a uniformly loaded circular area)
const UNIFORM_INFLUENCE_VALUES: [f64; 51] = [
    1.000, 1.000, 0.998, 0.993, 0.986, 0.974, 0.960, 0.942, 0.923, 0.901, //
    0.878, 0.855, 0.831, 0.808, 0.784, 0.762, 0.739, 0.718, 0.697, 0.677, //
    0.658, 0.640, 0.623, 0.606, 0.590, 0.574, 0.560, 0.546, 0.532, 0.519, //
    0.507, 0.495, 0.484, 0.473, 0.463, 0.453, 0.443, 0.434, 0.425, 0.417, //
    0.409, 0.401, 0.393, 0.386, 0.379, 0.372, 0.365, 0.359, 0.353, 0.347, //
    0.341,
];

static UNIFORM_INFLUENCE: Lazy<Vec<(f64, f64)>> = Lazy::new(|| {
    UNIFORM_INFLUENCE_VALUES
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64 * 0.1, *v))
        .collect()
});

/// Edge factors under a triangular pressure distribution (table D.0.4):
/// (z/r, factor at the zero-pressure edge, factor at the peak-pressure edge)
static TRIANGULAR_INFLUENCE: &[(f64, f64, f64)] = &[
    (0.0, 0.000, 0.500),
    (0.1, 0.008, 0.483),
    (0.2, 0.016, 0.466),
    (0.3, 0.023, 0.450),
    (0.4, 0.030, 0.435),
    (0.5, 0.035, 0.420),
    (0.6, 0.041, 0.406),
    (0.7, 0.045, 0.393),
    (0.8, 0.050, 0.380),
    (0.9, 0.054, 0.368),
    (1.0, 0.057, 0.356),
    (1.1, 0.061, 0.344),
    (1.2, 0.063, 0.333),
    (1.3, 0.065, 0.323),
    (1.4, 0.067, 0.313),
    (1.5, 0.069, 0.303),
    (1.6, 0.070, 0.294),
    (1.7, 0.071, 0.286),
    (1.8, 0.072, 0.278),
    (1.9, 0.072, 0.270),
    (2.0, 0.073, 0.263),
    (2.1, 0.073, 0.255),
    (2.2, 0.073, 0.249),
    (2.3, 0.073, 0.242),
    (2.4, 0.073, 0.236),
    (2.5, 0.072, 0.230),
    (2.6, 0.072, 0.225),
    (2.7, 0.071, 0.219),
    (2.8, 0.071, 0.214),
    (2.9, 0.070, 0.209),
    (3.0, 0.070, 0.204),
    (3.1, 0.069, 0.200),
    (3.2, 0.069, 0.196),
    (3.3, 0.068, 0.192),
    (3.4, 0.067, 0.188),
    (3.5, 0.067, 0.184),
    (3.6, 0.066, 0.180),
    (3.7, 0.065, 0.177),
    (3.8, 0.065, 0.173),
    (3.9, 0.064, 0.170),
    (4.0, 0.063, 0.167),
    (4.2, 0.062, 0.161),
    (4.4, 0.061, 0.155),
    (4.6, 0.059, 0.150),
    (4.8, 0.058, 0.145),
    (5.0, 0.057, 0.140),
];

/// ψs table axes: Es (MPa) columns against two pressure-level rows
const PSI_ES_AXIS: [f64; 5] = [2.5, 4.0, 7.0, 15.0, 20.0];
const PSI_HIGH_PRESSURE: [f64; 5] = [1.4, 1.3, 1.0, 0.4, 0.2]; // p0 >= fak
const PSI_LOW_PRESSURE: [f64; 5] = [1.1, 1.0, 0.7, 0.4, 0.2]; // p0 <= 0.75 fak

/// Linear interpolation over a sorted (x, y) table, clamped at the ends
fn interpolate(x: f64, table: &[(f64, f64)]) -> f64 {
    let first = table[0];
    let last = table[table.len() - 1];
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for window in table.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];
        if x >= x1 && x <= x2 {
            return y1 + (y2 - y1) * (x - x1) / (x2 - x1);
        }
    }
    last.1
}

fn interpolate_axis(x: f64, axis: &[f64], values: &[f64]) -> f64 {
    let table: Vec<(f64, f64)> = axis.iter().copied().zip(values.iter().copied()).collect();
    interpolate(x, &table)
}

/// Mean additional-stress influence factor at depth ratio z/r below the
/// center of a uniformly loaded circular area
pub fn uniform_influence_factor(z_over_r: f64) -> f64 {
    interpolate(z_over_r, &UNIFORM_INFLUENCE)
}

/// Influence factor at the zero-pressure edge under a triangular
/// distribution over a circular area
pub fn triangular_influence_low_edge(z_over_r: f64) -> f64 {
    let table: Vec<(f64, f64)> = TRIANGULAR_INFLUENCE
        .iter()
        .map(|&(x, low, _)| (x, low))
        .collect();
    interpolate(z_over_r, &table)
}

/// Influence factor at the peak-pressure edge under a triangular
/// distribution over a circular area
pub fn triangular_influence_high_edge(z_over_r: f64) -> f64 {
    let table: Vec<(f64, f64)> = TRIANGULAR_INFLUENCE
        .iter()
        .map(|&(x, _, high)| (x, high))
        .collect();
    interpolate(z_over_r, &table)
}

/// Settlement adjustment coefficient ψs.
///
/// Interpolated on the equivalent compression modulus, and between the
/// high-pressure (p0 ≥ fak) and low-pressure (p0 ≤ 0.75 fak) rows when the
/// net pressure falls between them.
pub fn settlement_adjustment(equivalent_es_mpa: f64, net_pressure_kpa: f64, fak_kpa: f64) -> f64 {
    let high = interpolate_axis(equivalent_es_mpa, &PSI_ES_AXIS, &PSI_HIGH_PRESSURE);
    let low = interpolate_axis(equivalent_es_mpa, &PSI_ES_AXIS, &PSI_LOW_PRESSURE);
    if net_pressure_kpa >= fak_kpa {
        high
    } else if net_pressure_kpa <= 0.75 * fak_kpa {
        low
    } else {
        let ratio = (net_pressure_kpa - 0.75 * fak_kpa) / (0.25 * fak_kpa);
        low + (high - low) * ratio
    }
}
