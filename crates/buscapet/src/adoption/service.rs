use std::sync::Arc;

use tracing::{info, warn};

use super::account::UserAccount;
use super::animal::Animal;
use super::application::AdoptionApplication;
use super::domain::{
    AnimalId, ApplicationId, ApplicationStatus, DomainError, Role, Size, Species, UserId,
};
use super::filter::AnimalFilter;
use super::policy::AdoptionPolicy;
use super::repository::{
    AccountRepository, AnimalRepository, ApplicationRepository, RepositoryError,
};

/// Reason recorded on competing applications once an animal is adopted.
pub const ADOPTED_ELSEWHERE_REASON: &str = "animal adopted by another applicant";

/// Service composing the entity rules with the storage collaborators.
pub struct AdoptionService<A, P, U> {
    animals: Arc<A>,
    applications: Arc<P>,
    accounts: Arc<U>,
    policy: AdoptionPolicy,
}

impl<A, P, U> AdoptionService<A, P, U>
where
    A: AnimalRepository + 'static,
    P: ApplicationRepository + 'static,
    U: AccountRepository + 'static,
{
    pub fn new(
        animals: Arc<A>,
        applications: Arc<P>,
        accounts: Arc<U>,
        policy: AdoptionPolicy,
    ) -> Self {
        Self {
            animals,
            applications,
            accounts,
            policy,
        }
    }

    pub fn policy(&self) -> &AdoptionPolicy {
        &self.policy
    }

    /// Register an account, enforcing the configured secret length as well.
    pub fn register_account(
        &self,
        email: &str,
        secret: &str,
        role: Role,
    ) -> Result<UserAccount, AdoptionServiceError> {
        let length = secret.chars().count();
        if length < self.policy.min_secret_length {
            return Err(DomainError::InvalidArgument(format!(
                "secret must have at least {} characters",
                self.policy.min_secret_length
            ))
            .into());
        }

        let account = UserAccount::register(email, secret, role)?;
        let stored = self.accounts.insert(account)?;
        info!(email = stored.email(), role = %stored.role(), "account registered");
        Ok(stored)
    }

    pub fn account(&self, id: &UserId) -> Result<UserAccount, AdoptionServiceError> {
        Ok(self.accounts.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    pub fn verify_email(&self, id: &UserId) -> Result<UserAccount, AdoptionServiceError> {
        self.modify_account(id, |account| {
            account.verify_email();
            Ok(())
        })
    }

    pub fn complete_profile(&self, id: &UserId) -> Result<UserAccount, AdoptionServiceError> {
        self.modify_account(id, UserAccount::complete_profile)
    }

    pub fn verify_organization(&self, id: &UserId) -> Result<UserAccount, AdoptionServiceError> {
        self.modify_account(id, UserAccount::verify_organization)
    }

    pub fn reject_organization(
        &self,
        id: &UserId,
        reason: &str,
    ) -> Result<UserAccount, AdoptionServiceError> {
        self.modify_account(id, |account| account.reject_organization(reason))
    }

    fn modify_account<F>(
        &self,
        id: &UserId,
        change: F,
    ) -> Result<UserAccount, AdoptionServiceError>
    where
        F: FnOnce(&mut UserAccount) -> Result<(), DomainError>,
    {
        let mut account = self.account(id)?;
        change(&mut account)?;
        self.accounts.update(account.clone())?;
        Ok(account)
    }

    /// Publish an animal on behalf of a verified shelter.
    pub fn publish_animal(
        &self,
        shelter_id: &UserId,
        name: &str,
        species: Species,
        size: Size,
        age_months: i32,
    ) -> Result<Animal, AdoptionServiceError> {
        let shelter = self.account(shelter_id)?;
        if !shelter.can_publish_animals() {
            warn!(shelter = %shelter_id, "account may not publish animals");
            return Err(AdoptionServiceError::NotPermitted(format!(
                "account {shelter_id} may not publish animals"
            )));
        }

        let animal = Animal::new(name, species, size, age_months, shelter_id.clone())?;
        let stored = self.animals.insert(animal)?;
        info!(animal = stored.name(), shelter = %shelter_id, "animal published");
        Ok(stored)
    }

    pub fn animal(&self, id: &AnimalId) -> Result<Animal, AdoptionServiceError> {
        Ok(self.animals.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    pub fn record_health(
        &self,
        id: &AnimalId,
        vaccinated: bool,
        neutered: bool,
    ) -> Result<Animal, AdoptionServiceError> {
        let mut animal = self.animal(id)?;
        animal.set_vaccinated(vaccinated);
        animal.set_neutered(neutered);
        self.animals.update(animal.clone())?;
        Ok(animal)
    }

    pub fn update_animal_status(
        &self,
        id: &AnimalId,
        status: &str,
    ) -> Result<Animal, AdoptionServiceError> {
        let mut animal = self.animal(id)?;
        animal.update_status(status)?;
        self.animals.update(animal.clone())?;
        Ok(animal)
    }

    pub fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<AdoptionApplication, AdoptionServiceError> {
        Ok(self.applications.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    /// Submit an application from an eligible adopter for an available animal.
    pub fn submit_application(
        &self,
        applicant_id: &UserId,
        animal_id: &AnimalId,
    ) -> Result<AdoptionApplication, AdoptionServiceError> {
        let application = AdoptionApplication::new(&applicant_id.0, &animal_id.0)?;

        let applicant = self.account(applicant_id)?;
        if !applicant.can_apply() {
            warn!(applicant = %applicant_id, "account may not apply");
            return Err(AdoptionServiceError::NotPermitted(format!(
                "account {applicant_id} may not submit applications"
            )));
        }

        let animal = self.animal(animal_id)?;
        if !animal.can_be_adopted() {
            warn!(animal = %animal_id, status = %animal.status(), "animal not available");
            return Err(AdoptionServiceError::NotPermitted(format!(
                "animal {animal_id} is not available for adoption"
            )));
        }

        let stored = self.applications.insert(application)?;
        info!(applicant = %applicant_id, animal = %animal_id, "application submitted");
        Ok(stored)
    }

    pub fn start_review(
        &self,
        id: &ApplicationId,
    ) -> Result<AdoptionApplication, AdoptionServiceError> {
        let mut application = self.application(id)?;
        application.start_review()?;
        self.applications.update(application.clone())?;
        Ok(application)
    }

    pub fn score_application(
        &self,
        id: &ApplicationId,
        points: i32,
    ) -> Result<AdoptionApplication, AdoptionServiceError> {
        let mut application = self.application(id)?;
        application.assign_score(points)?;
        self.applications.update(application.clone())?;

        if application.status() == ApplicationStatus::PreApproved {
            info!(
                application = %id,
                score = application.score(),
                "application pre-approved"
            );
        }
        Ok(application)
    }

    /// Approve an application, adopt the animal, and close competing applications.
    ///
    /// The animal is written first. If the application write then fails, the animal is
    /// written back as it was. Closing competing applications is best effort: each one is
    /// attempted and failures are logged, since an adopted animal already blocks their
    /// approval.
    pub fn approve_application(
        &self,
        id: &ApplicationId,
    ) -> Result<AdoptionApplication, AdoptionServiceError> {
        let mut application = self.application(id)?;
        let previous = self.animal(application.animal_id())?;
        let mut animal = previous.clone();

        animal.mark_adopted()?;
        application.approve()?;

        self.animals.update(animal)?;
        if let Err(err) = self.applications.update(application.clone()) {
            if let Err(rollback) = self.animals.update(previous) {
                warn!(
                    application = %id,
                    error = %rollback,
                    "failed to restore animal after approval write failed"
                );
            }
            return Err(err.into());
        }

        self.close_competing(&application);
        info!(application = %id, animal = %application.animal_id(), "application approved");
        Ok(application)
    }

    fn close_competing(&self, approved: &AdoptionApplication) {
        let competing = match self.applications.for_animal(approved.animal_id()) {
            Ok(competing) => competing,
            Err(err) => {
                warn!(
                    animal = %approved.animal_id(),
                    error = %err,
                    "competing applications not closed"
                );
                return;
            }
        };

        for mut application in competing {
            if application.id() == approved.id() || application.status().is_terminal() {
                continue;
            }
            let closed = application
                .reject(ADOPTED_ELSEWHERE_REASON)
                .map_err(AdoptionServiceError::from)
                .and_then(|()| {
                    self.applications
                        .update(application.clone())
                        .map_err(AdoptionServiceError::from)
                });
            if let Err(err) = closed {
                warn!(
                    application = ?application.id(),
                    error = %err,
                    "competing application left open"
                );
            }
        }
    }

    pub fn reject_application(
        &self,
        id: &ApplicationId,
        reason: &str,
    ) -> Result<AdoptionApplication, AdoptionServiceError> {
        let mut application = self.application(id)?;
        application.reject(reason)?;
        self.applications.update(application.clone())?;
        info!(application = %id, status = %ApplicationStatus::Rejected, "application rejected");
        Ok(application)
    }

    pub fn search(&self, filter: &AnimalFilter) -> Result<Vec<Animal>, AdoptionServiceError> {
        let animals = self.animals.all()?;
        Ok(animals
            .into_iter()
            .filter(|animal| filter.matches(animal))
            .collect())
    }
}

/// Error raised by the adoption service.
#[derive(Debug, thiserror::Error)]
pub enum AdoptionServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("not permitted: {0}")]
    NotPermitted(String),
}
