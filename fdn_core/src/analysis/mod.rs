//! # Foundation Analyzers
//!
//! Per-case verification checks that consume the combined loads and produce
//! [`AnalyzerReport`](crate::report::AnalyzerReport)s. Each analyzer is a
//! stateless function of its inputs; the orchestrator in
//! [`verify`](crate::verify) wires them together in dependency order.

pub mod bearing;
pub mod detachment;
pub mod overturning;
pub mod punching;
pub mod settlement;
pub mod shear;
pub mod sliding;
pub mod stiffness;

pub use bearing::{BearingCapacity, BearingInput};
pub use detachment::DetachmentLimits;
pub use punching::PunchingInput;
pub use settlement::{SettlementInput, SettlementResult};
pub use shear::ShearInput;
pub use stiffness::{StiffnessInput, StiffnessResult};
