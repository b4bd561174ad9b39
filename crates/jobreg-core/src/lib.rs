//! jobreg Core - registry kernel for job-execution resources
//!
//! This crate provides the foundational data structures and operations for
//! the jobreg metadata registry, including:
//! - Application, Command and Cluster models with full CRUD semantics
//! - Uniform attribute-set operations (tags, configs, jars) across all kinds
//! - Owner and cluster-membership relationship management with cascading
//!   deletes that keep cross-entity references consistent
//! - Multi-criteria search with tag-intersection filtering and pagination
//! - Registry validation and invariant enforcement
//!
//! Persistence lives in the `jobreg-store` crate; this crate owns the
//! semantics and operates on an in-memory [`Store`].

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod rules;

// Re-export commonly used types
pub use errors::{ErrorKind, RegistryError, Result};
pub use model::{
    Application, ApplicationStatus, Attribute, Cluster, ClusterStatus, Command, CommandStatus,
    EntityKind, Resource,
};
pub use ops::Store;
