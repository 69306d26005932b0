use buscapet::adoption::{AdoptionServiceError, RepositoryError, Role, Size, Species, UserId};

use crate::infra::InMemoryAdoptionService;

struct SampleAnimal {
    name: &'static str,
    species: Species,
    size: Size,
    age_months: i32,
    vaccinated: bool,
    neutered: bool,
    status: Option<&'static str>,
}

const SAMPLE_ANIMALS: [SampleAnimal; 6] = [
    SampleAnimal {
        name: "Rex",
        species: Species::Dog,
        size: Size::Large,
        age_months: 24,
        vaccinated: true,
        neutered: false,
        status: None,
    },
    SampleAnimal {
        name: "Mia",
        species: Species::Cat,
        size: Size::Small,
        age_months: 4,
        vaccinated: false,
        neutered: false,
        status: None,
    },
    SampleAnimal {
        name: "Thor",
        species: Species::Dog,
        size: Size::Medium,
        age_months: 36,
        vaccinated: true,
        neutered: true,
        status: Some("Em processo"),
    },
    SampleAnimal {
        name: "Luna",
        species: Species::Cat,
        size: Size::Medium,
        age_months: 60,
        vaccinated: true,
        neutered: true,
        status: None,
    },
    SampleAnimal {
        name: "Pipoca",
        species: Species::Dog,
        size: Size::Small,
        age_months: 8,
        vaccinated: false,
        neutered: false,
        status: Some("Adotado"),
    },
    SampleAnimal {
        name: "Bidu",
        species: Species::Dog,
        size: Size::Large,
        age_months: 96,
        vaccinated: true,
        neutered: true,
        status: None,
    },
];

/// Register a verified shelter and publish the sample animals under it.
pub(crate) fn seed_catalog(
    service: &InMemoryAdoptionService,
) -> Result<UserId, AdoptionServiceError> {
    let shelter = verified_shelter(service, "contato@patinhas.org")?;

    for sample in &SAMPLE_ANIMALS {
        let animal = service.publish_animal(
            &shelter,
            sample.name,
            sample.species,
            sample.size,
            sample.age_months,
        )?;
        let id = animal
            .id()
            .cloned()
            .ok_or_else(|| RepositoryError::Unavailable("animal stored without an id".into()))?;
        service.record_health(&id, sample.vaccinated, sample.neutered)?;
        if let Some(status) = sample.status {
            service.update_animal_status(&id, status)?;
        }
    }

    Ok(shelter)
}

pub(crate) fn verified_shelter(
    service: &InMemoryAdoptionService,
    email: &str,
) -> Result<UserId, AdoptionServiceError> {
    let account = service.register_account(email, "patinhas2024", Role::Organization)?;
    let id = account
        .id()
        .cloned()
        .ok_or_else(|| RepositoryError::Unavailable("account stored without an id".into()))?;
    service.verify_email(&id)?;
    service.verify_organization(&id)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::in_memory_service;
    use buscapet::adoption::{AdoptionPolicy, AnimalFilter};

    #[test]
    fn seeded_catalog_is_searchable() {
        let service = in_memory_service(AdoptionPolicy::default());
        seed_catalog(&service).expect("catalog seeds");

        let everything = service.search(&AnimalFilter::new()).expect("search");
        assert_eq!(everything.len(), SAMPLE_ANIMALS.len());

        let available = everything.iter().filter(|animal| animal.can_be_adopted()).count();
        assert_eq!(available, 4);
    }
}
