use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::adoption::account::UserAccount;
use crate::adoption::animal::Animal;
use crate::adoption::application::AdoptionApplication;
use crate::adoption::domain::{AnimalId, ApplicationId, Role, Size, Species, UserId};
use crate::adoption::policy::AdoptionPolicy;
use crate::adoption::repository::{
    AccountRepository, AnimalRepository, ApplicationRepository, RepositoryError,
};
use crate::adoption::service::AdoptionService;

pub(super) type TestService = AdoptionService<MemoryAnimals, MemoryApplications, MemoryAccounts>;

#[derive(Default)]
pub(super) struct MemoryAnimals {
    pub(super) records: Mutex<BTreeMap<AnimalId, Animal>>,
    /// Fail every `update` with `Unavailable` while set.
    pub(super) fail_updates: AtomicBool,
}

impl AnimalRepository for MemoryAnimals {
    fn insert(&self, mut animal: Animal) -> Result<Animal, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = AnimalId(format!("animal-{:04}", guard.len() + 1));
        animal.assign_id(id.clone());
        guard.insert(id, animal.clone());
        Ok(animal)
    }

    fn update(&self, animal: Animal) -> Result<(), RepositoryError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("animal store offline".to_string()));
        }
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = animal.id().cloned().ok_or(RepositoryError::NotFound)?;
        if !guard.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(id, animal);
        Ok(())
    }

    fn fetch(&self, id: &AnimalId) -> Result<Option<Animal>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Animal>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryApplications {
    pub(super) records: Mutex<BTreeMap<ApplicationId, AdoptionApplication>>,
    /// Applications whose `update` fails with `Unavailable`.
    pub(super) failing_updates: Mutex<BTreeSet<ApplicationId>>,
}

impl MemoryApplications {
    pub(super) fn fail_updates_for(&self, id: &ApplicationId) {
        self.failing_updates
            .lock()
            .expect("repository mutex poisoned")
            .insert(id.clone());
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(
        &self,
        mut application: AdoptionApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = ApplicationId(format!("app-{:06}", guard.len() + 1));
        application.assign_id(id.clone());
        guard.insert(id, application.clone());
        Ok(application)
    }

    fn update(&self, application: AdoptionApplication) -> Result<(), RepositoryError> {
        let id = application.id().cloned().ok_or(RepositoryError::NotFound)?;
        if self
            .failing_updates
            .lock()
            .expect("repository mutex poisoned")
            .contains(&id)
        {
            return Err(RepositoryError::Unavailable("application store offline".to_string()));
        }
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(id, application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<AdoptionApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_animal(
        &self,
        animal_id: &AnimalId,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.animal_id() == animal_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryAccounts {
    pub(super) records: Mutex<BTreeMap<UserId, UserAccount>>,
}

impl AccountRepository for MemoryAccounts {
    fn insert(&self, mut account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.values().any(|existing| existing.email() == account.email()) {
            return Err(RepositoryError::Conflict);
        }
        let id = UserId(format!("user-{:04}", guard.len() + 1));
        account.assign_id(id.clone());
        guard.insert(id, account.clone());
        Ok(account)
    }

    fn update(&self, account: UserAccount) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = account.id().cloned().ok_or(RepositoryError::NotFound)?;
        if !guard.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(id, account);
        Ok(())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct Fixture {
    pub(super) service: TestService,
    pub(super) animals: Arc<MemoryAnimals>,
    pub(super) applications: Arc<MemoryApplications>,
    pub(super) accounts: Arc<MemoryAccounts>,
}

pub(super) fn fixture() -> Fixture {
    fixture_with_policy(AdoptionPolicy::default())
}

pub(super) fn fixture_with_policy(policy: AdoptionPolicy) -> Fixture {
    let animals = Arc::new(MemoryAnimals::default());
    let applications = Arc::new(MemoryApplications::default());
    let accounts = Arc::new(MemoryAccounts::default());
    let service = AdoptionService::new(
        animals.clone(),
        applications.clone(),
        accounts.clone(),
        policy,
    );
    Fixture {
        service,
        animals,
        applications,
        accounts,
    }
}

impl Fixture {
    /// Registered shelter that may publish animals.
    pub(super) fn verified_shelter(&self) -> UserId {
        let id = self
            .service
            .register_account("ong@patinhas.org", "password1", Role::Organization)
            .expect("shelter registers")
            .id()
            .cloned()
            .expect("id assigned");
        self.service.verify_email(&id).expect("e-mail verified");
        self.service
            .verify_organization(&id)
            .expect("organization verified");
        id
    }

    /// Registered adopter with verified e-mail and completed profile.
    pub(super) fn eligible_adopter(&self, email: &str) -> UserId {
        let id = self
            .service
            .register_account(email, "senha12345", Role::Adopter)
            .expect("adopter registers")
            .id()
            .cloned()
            .expect("id assigned");
        self.service.verify_email(&id).expect("e-mail verified");
        self.service.complete_profile(&id).expect("profile completed");
        id
    }

    pub(super) fn published_dog(&self, shelter: &UserId, name: &str) -> AnimalId {
        self.service
            .publish_animal(shelter, name, Species::Dog, Size::Large, 24)
            .expect("animal published")
            .id()
            .cloned()
            .expect("id assigned")
    }
}
