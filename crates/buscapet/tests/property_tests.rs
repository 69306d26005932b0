//! Property tests for the entity invariants that must hold for every input.

use buscapet::adoption::{
    AdoptionApplication, Animal, AnimalFilter, AnimalStatus, ApplicationStatus, DomainError,
    Role, Size, Species, UserAccount, UserId,
};
use proptest::prelude::*;

fn species() -> impl Strategy<Value = Species> {
    prop_oneof![Just(Species::Dog), Just(Species::Cat)]
}

fn size() -> impl Strategy<Value = Size> {
    prop_oneof![Just(Size::Small), Just(Size::Medium), Just(Size::Large)]
}

fn arbitrary_animal() -> impl Strategy<Value = Animal> {
    (
        "[A-Za-z]{1,12}",
        species(),
        size(),
        0i32..240,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(name, species, size, age, vaccinated, neutered, adopted)| {
            let mut animal = Animal::new(&name, species, size, age, UserId("ong".to_string()))
                .expect("generated animal is valid");
            animal.set_vaccinated(vaccinated);
            animal.set_neutered(neutered);
            if adopted {
                animal.mark_adopted().expect("fresh animal is available");
            }
            animal
        })
}

proptest! {
    #[test]
    fn new_animals_start_available(
        name in "[A-Za-z ]{0,4}[A-Za-z][A-Za-z ]{0,4}",
        species in species(),
        size in size(),
        age in 0i32..=i32::MAX,
    ) {
        let animal = Animal::new(&name, species, size, age, UserId("ong".to_string()))
            .expect("valid input");
        prop_assert_eq!(animal.status(), &AnimalStatus::Available);
        prop_assert!(!animal.is_vaccinated());
        prop_assert!(!animal.is_neutered());
        prop_assert_eq!(animal.name(), name.trim());
    }

    #[test]
    fn negative_ages_are_rejected(age in i32::MIN..0) {
        let result =
            Animal::new("Rex", Species::Dog, Size::Large, age, UserId("ong".to_string()));
        prop_assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn scores_in_range_are_accepted(points in 0i32..=100) {
        let mut application = AdoptionApplication::new("u1", "a1").expect("valid");
        prop_assert!(application.assign_score(points).is_ok());
        prop_assert_eq!(i32::from(application.score()), points);
        if points >= 70 {
            prop_assert_eq!(application.status(), ApplicationStatus::PreApproved);
        } else {
            prop_assert_eq!(application.status(), ApplicationStatus::Received);
        }
    }

    #[test]
    fn scores_out_of_range_are_rejected(
        points in prop_oneof![i32::MIN..0, 101i32..=i32::MAX],
    ) {
        let mut application = AdoptionApplication::new("u1", "a1").expect("valid");
        prop_assert!(matches!(
            application.assign_score(points),
            Err(DomainError::InvalidArgument(_))
        ));
        prop_assert_eq!(application.score(), 0);
    }

    #[test]
    fn high_scores_pre_approve_from_any_open_status(
        points in 70i32..=100,
        reviewed in any::<bool>(),
        rescored in any::<bool>(),
    ) {
        let mut application = AdoptionApplication::new("u1", "a1").expect("valid");
        if reviewed {
            application.start_review().expect("review");
        }
        if rescored {
            application.assign_score(75).expect("first score");
        }
        application.assign_score(points).expect("valid score");
        prop_assert_eq!(application.status(), ApplicationStatus::PreApproved);
    }

    #[test]
    fn email_normalization_is_idempotent(
        local in "[A-Za-z0-9]{1,10}",
        domain in "[A-Za-z]{1,10}\\.(com|org|br)",
        pad in " {0,3}",
    ) {
        let raw = format!("{pad}{local}@{domain}{pad}");
        let mut account = UserAccount::register(&raw, "password1", Role::Adopter)
            .expect("valid account");
        let normalized = account.email().to_string();
        prop_assert_eq!(&normalized, &format!("{local}@{domain}").to_lowercase());

        let again = UserAccount::register(&normalized, "password1", Role::Adopter)
            .expect("valid account");
        prop_assert_eq!(again.email(), normalized.as_str());

        account.verify_email();
        prop_assert_eq!(account.authenticate(&raw.to_uppercase(), "password1"), Ok(true));
    }

    #[test]
    fn empty_filter_matches_every_animal(animal in arbitrary_animal()) {
        let filter = AnimalFilter::new();
        prop_assert!(filter.matches(&animal));
        prop_assert_eq!(filter.active_filter_count(), 0);
    }

    #[test]
    fn age_range_filter_is_inclusive(animal in arbitrary_animal(), spread in 0i32..24) {
        let age = animal.age_months() as i32;
        let mut filter = AnimalFilter::new();
        filter
            .set_age_range(Some((age - spread).max(0)), Some(age + spread))
            .expect("valid range");
        prop_assert!(filter.matches(&animal));

        filter.set_age_range(Some(age + 1), None).expect("valid range");
        prop_assert!(!filter.matches(&animal));
    }
}
