//! Adoption domain: animals, adoption applications, accounts, and the search filter.
//!
//! Entities reference each other by identifier only. The service module composes them with
//! storage collaborators for callers that want the cross-entity flows (publish, apply, approve).

pub mod account;
pub mod animal;
pub mod application;
pub mod credentials;
pub mod domain;
pub mod filter;
pub mod policy;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use account::{AccountRecord, UserAccount, MIN_SECRET_LENGTH};
pub use animal::Animal;
pub use application::{AdoptionApplication, MAX_SCORE, PRE_APPROVAL_SCORE};
pub use credentials::{CredentialHasher, PlaintextCredentials};
pub use domain::{
    AnimalId, AnimalStatus, ApplicationId, ApplicationStatus, DomainError, OrganizationStatus,
    Role, Size, Species, UserId,
};
pub use filter::{AnimalFilter, FilterQuery};
pub use policy::AdoptionPolicy;
pub use repository::{
    AccountRepository, AnimalRepository, ApplicationRepository, ApplicationStatusView,
    RepositoryError,
};
pub use service::{AdoptionService, AdoptionServiceError, ADOPTED_ELSEWHERE_REASON};
