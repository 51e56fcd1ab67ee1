//! # Floe Engine
//!
//! The workflow execution engine: a ready-frontier scheduler that drives a
//! [`floe_workflow::Workflow`] from its trigger to a terminal state,
//! dispatching each ready node through an injected
//! [`floe_ports::SandboxRunner`] and routing outputs along the workflow's
//! connections (spec §4.4).
//!
//! This crate owns three concerns distinct from `floe-execution`'s state
//! machines:
//!
//! - [`spec_registry`] -- the workflow-literal `(category, subtype)` type
//!   registry, not to be confused with `floe-node`'s vendor-integration
//!   registry.
//! - [`condition`] and [`conversion`] -- the restricted expression and
//!   edge-conversion runtimes nodes and connections evaluate against.
//! - [`scheduler`] -- the orchestration loop itself.

pub mod condition;
pub mod conversion;
pub mod error;
pub mod scheduler;
pub mod spec_registry;

pub use error::EngineError;
pub use scheduler::{Engine, EngineSettings};
pub use spec_registry::{NodeSpec, SpecRegistry};
