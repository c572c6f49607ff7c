//! # fdn_core - Wind Turbine Foundation Verification Engine
//!
//! `fdn_core` verifies gravity-type wind turbine foundations against the
//! national design codes: self-weight and buoyancy, load combination over
//! six operating cases, bearing capacity, settlement and tilt, base
//! detachment, overturning, sliding, dynamic stiffness, and the structural
//! shear and punching checks on the slab.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Request-Scoped**: Nothing persists or leaks between runs
//!
//! ## Quick Start
//!
//! ```no_run
//! use fdn_core::verify::{run_verification, DesignInput};
//!
//! # fn demo(input: DesignInput) -> fdn_core::VerifyResult<()> {
//! let output = run_verification(&input)?;
//! for report in &output.summary.reports {
//!     println!("{}: {}", report.analyzer, report.passes());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Foundation shape and its derived section properties
//! - [`materials`] - Concrete grades and reinforcement placement
//! - [`soil`] - Layered stratigraphy and depth queries
//! - [`self_weight`] - Weight, backfill, and buoyancy roll-up
//! - [`tower`] - Tower reduction and equivalent seismic actions
//! - [`loads`] - Load cases, combinations, and contact pressure
//! - [`analysis`] - The per-check analyzers
//! - [`verify`] - The orchestrated pipeline
//! - [`report`] - Per-check outcomes and the run summary
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod errors;
pub mod geometry;
pub mod loads;
pub mod materials;
pub mod report;
pub mod self_weight;
pub mod soil;
pub mod tower;
pub mod units;
pub mod verify;

// Re-export commonly used types at crate root for convenience
pub use errors::{VerifyError, VerifyResult};
pub use report::SummaryResult;
pub use verify::{run_verification, DesignInput, VerificationOutput};
