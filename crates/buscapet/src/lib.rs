//! Domain core of the BuscaPet adoption-matching platform.
//!
//! The [`adoption`] module holds the entities (animals, adoption applications, user accounts)
//! and the search filter. Persistence, transport, and credential storage are left to the
//! collaborators described by the repository traits.

pub mod adoption;
pub mod config;
pub mod error;
pub mod telemetry;
