#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Floe Ports
//!
//! Backend interface traits (ports) for the Floe workflow engine.
//!
//! This crate defines the **port** traits that backend drivers implement.
//! It follows the Ports & Drivers (hexagonal) architecture pattern:
//!
//! - [`WorkflowRepo`] -- persistence for workflow definitions
//! - [`ExecutionRepo`] -- execution state, journals, and leases
//! - [`TaskQueue`] -- work distribution queue
//! - [`SandboxRunner`] -- isolated action execution
//!
//! All traits are `async_trait` and object-safe, suitable for use as
//! `Box<dyn Trait>` or `Arc<dyn Trait>` behind dependency injection.

pub mod error;
pub mod execution;
pub mod queue;
pub mod sandbox;
pub mod workflow;

pub use error::PortsError;
pub use execution::ExecutionRepo;
pub use queue::TaskQueue;
pub use sandbox::SandboxRunner;
pub use workflow::WorkflowRepo;
