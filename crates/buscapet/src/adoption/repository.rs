use serde::Serialize;

use super::account::UserAccount;
use super::animal::Animal;
use super::application::AdoptionApplication;
use super::domain::{AnimalId, ApplicationId, ApplicationStatus, UserId};

/// Storage for animals. Implementations assign identifiers on insert.
pub trait AnimalRepository: Send + Sync {
    fn insert(&self, animal: Animal) -> Result<Animal, RepositoryError>;
    fn update(&self, animal: Animal) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AnimalId) -> Result<Option<Animal>, RepositoryError>;
    fn all(&self) -> Result<Vec<Animal>, RepositoryError>;
}

/// Storage for adoption applications.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: AdoptionApplication)
        -> Result<AdoptionApplication, RepositoryError>;
    fn update(&self, application: AdoptionApplication) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<AdoptionApplication>, RepositoryError>;
    fn for_animal(&self, animal_id: &AnimalId)
        -> Result<Vec<AdoptionApplication>, RepositoryError>;
}

/// Storage for accounts. Must reject a second account with the same e-mail.
pub trait AccountRepository: Send + Sync {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;
    fn update(&self, account: UserAccount) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public projection of an application for reviewers and applicants.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    pub animal_id: AnimalId,
    pub status: &'static str,
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl AdoptionApplication {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id().cloned(),
            animal_id: self.animal_id().clone(),
            status: self.status().label(),
            score: self.score(),
            rejection_reason: self.rejection_reason().map(str::to_string),
        }
    }

    pub fn decision_rationale(&self) -> String {
        match self.status() {
            ApplicationStatus::Approved => "application approved".to_string(),
            ApplicationStatus::Rejected => match self.rejection_reason() {
                Some(reason) => format!("application rejected: {reason}"),
                None => "application rejected".to_string(),
            },
            ApplicationStatus::PreApproved => {
                format!("pre-approved with score {}", self.score())
            }
            ApplicationStatus::Received | ApplicationStatus::UnderReview => {
                "pending review".to_string()
            }
        }
    }
}
