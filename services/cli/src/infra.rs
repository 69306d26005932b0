use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use buscapet::adoption::{
    AccountRepository, AdoptionApplication, AdoptionPolicy, AdoptionService, Animal, AnimalId,
    AnimalRepository, ApplicationId, ApplicationRepository, RepositoryError, UserAccount, UserId,
};

pub(crate) type InMemoryAdoptionService = AdoptionService<
    InMemoryAnimalRepository,
    InMemoryApplicationRepository,
    InMemoryAccountRepository,
>;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str) -> String {
    let id = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

pub(crate) fn in_memory_service(policy: AdoptionPolicy) -> InMemoryAdoptionService {
    AdoptionService::new(
        Arc::new(InMemoryAnimalRepository::default()),
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemoryAccountRepository::default()),
        policy,
    )
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnimalRepository {
    records: Arc<Mutex<BTreeMap<AnimalId, Animal>>>,
}

impl AnimalRepository for InMemoryAnimalRepository {
    fn insert(&self, mut animal: Animal) -> Result<Animal, RepositoryError> {
        let id = AnimalId(next_id("animal"));
        animal.assign_id(id.clone());
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(id, animal.clone());
        Ok(animal)
    }

    fn update(&self, animal: Animal) -> Result<(), RepositoryError> {
        let id = animal.id().cloned().ok_or(RepositoryError::NotFound)?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            guard.insert(id, animal);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<BTreeMap<ApplicationId, AdoptionApplication>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(
        &self,
        mut application: AdoptionApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        let id = ApplicationId(next_id("app"));
        application.assign_id(id.clone());
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(id, application.clone());
        Ok(application)
    }

    fn update(&self, application: AdoptionApplication) -> Result<(), RepositoryError> {
        let id = application.id().cloned().ok_or(RepositoryError::NotFound)?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            guard.insert(id, application);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryAccountRepository {
    records: Arc<Mutex<BTreeMap<UserId, UserAccount>>>,
}

impl AccountRepository for InMemoryAccountRepository {
    fn insert(&self, mut account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.email() == account.email())
        {
            return Err(RepositoryError::Conflict);
        }
        let id = UserId(next_id("user"));
        account.assign_id(id.clone());
        guard.insert(id, account.clone());
        Ok(account)
    }

    fn update(&self, account: UserAccount) -> Result<(), RepositoryError> {
        let id = account.id().cloned().ok_or(RepositoryError::NotFound)?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            guard.insert(id, account);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}
