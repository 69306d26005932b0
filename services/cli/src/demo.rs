use buscapet::adoption::{
    AdoptionApplication, AdoptionServiceError, AnimalFilter, AnimalId, AnimalStatus,
    ApplicationId, RepositoryError, Role, Size, Species, UserId, PRE_APPROVAL_SCORE,
};
use buscapet::config::AppConfig;
use buscapet::error::AppError;

use crate::catalog::verified_shelter;
use crate::infra::{in_memory_service, InMemoryAdoptionService};

pub(crate) fn run_demo(config: &AppConfig) -> Result<(), AppError> {
    let service = in_memory_service(config.policy);
    println!("BuscaPet adoption walkthrough");
    println!(
        "Policy: secrets need {} characters, pre-approval at score {}",
        config.policy.min_secret_length, PRE_APPROVAL_SCORE
    );

    let shelter = verified_shelter(&service, "ong@patinhas.org")?;
    println!("\nShelter {shelter} verified and allowed to publish");

    let rex = service.publish_animal(&shelter, "Rex", Species::Dog, Size::Large, 24)?;
    let rex_id = rex
        .id()
        .cloned()
        .ok_or_else(|| unavailable("animal stored without an id"))?;
    service.record_health(&rex_id, true, false)?;
    let mia = service.publish_animal(&shelter, "Mia", Species::Cat, Size::Small, 4)?;
    println!(
        "Published {} ({}, {}, {} months) and {} ({}, {}, {} months)",
        rex.name(),
        rex.species(),
        rex.size(),
        rex.age_months(),
        mia.name(),
        mia.species(),
        mia.size(),
        mia.age_months()
    );

    let ana = adopter(&service, "ana@email.com")?;
    let bia = adopter(&service, "bia@email.com")?;
    println!("Adopters {ana} and {bia} verified with completed profiles");

    let first = submit(&service, &ana, &rex_id)?;
    let second = submit(&service, &bia, &rex_id)?;

    service.start_review(&first)?;
    let scored = service.score_application(&first, 69)?;
    print_application("Score 69", &scored);
    let scored = service.score_application(&first, 70)?;
    print_application("Score 70", &scored);

    let approved = service.approve_application(&first)?;
    print_application("Approved", &approved);
    let animal = service.animal(&rex_id)?;
    println!(
        "{} is now {} (adoptable: {})",
        animal.name(),
        animal.status(),
        animal.can_be_adopted()
    );
    let competing = service.application(&second)?;
    print_application("Competing application", &competing);

    let late = service.submit_application(&ana, &rex_id);
    if let Err(err) = late {
        println!("Late application for {}: {err}", animal.name());
    }

    let mut available = AnimalFilter::new();
    available.set_status(Some(AnimalStatus::Available));
    let remaining = service.search(&available)?;
    println!("\nStill available: {}", remaining.len());
    for animal in &remaining {
        println!(
            "- {} ({}, {}, {} months)",
            animal.name(),
            animal.species(),
            animal.size(),
            animal.age_months()
        );
    }

    println!("\nAccount checks");
    let pending = service.register_account("nova-ong@x.com", "password1", Role::Organization)?;
    let pending_id = pending
        .id()
        .cloned()
        .ok_or_else(|| unavailable("account stored without an id"))?;
    service.verify_email(&pending_id)?;
    let rejected = service.reject_organization(&pending_id, "documentation missing")?;
    println!(
        "Organization {} is {} ({})",
        rejected.email(),
        rejected
            .organization_status()
            .map(|status| status.label())
            .unwrap_or("n/a"),
        rejected.organization_rejection_reason().unwrap_or("no reason")
    );
    if let Err(err) = service.publish_animal(&pending_id, "Bob", Species::Dog, Size::Small, 3) {
        println!("Publishing as {}: {err}", rejected.email());
    }

    let account = service.account(&ana)?;
    match account.authenticate("ANA@email.com", "senha12345") {
        Ok(valid) => println!("Login for {} with correct secret: {valid}", account.email()),
        Err(err) => println!("Login for {} failed: {err}", account.email()),
    }
    match account.authenticate("ana@email.com", "wrong-secret") {
        Ok(valid) => println!("Login for {} with wrong secret: {valid}", account.email()),
        Err(err) => println!("Login for {} failed: {err}", account.email()),
    }
    if let Err(err) = service.register_account("sem-arroba", "password1", Role::Adopter) {
        println!("Registration without '@': {err}");
    }

    Ok(())
}

fn adopter(service: &InMemoryAdoptionService, email: &str) -> Result<UserId, AdoptionServiceError> {
    let id = service
        .register_account(email, "senha12345", Role::Adopter)?
        .id()
        .cloned()
        .ok_or_else(|| unavailable("account stored without an id"))?;
    service.verify_email(&id)?;
    service.complete_profile(&id)?;
    Ok(id)
}

fn submit(
    service: &InMemoryAdoptionService,
    applicant: &UserId,
    animal: &AnimalId,
) -> Result<ApplicationId, AdoptionServiceError> {
    let application = service.submit_application(applicant, animal)?;
    print_application("Submitted", &application);
    let id = application
        .id()
        .cloned()
        .ok_or_else(|| unavailable("application stored without an id"))?;
    Ok(id)
}

fn print_application(stage: &str, application: &AdoptionApplication) {
    let view = application.status_view();
    println!(
        "{stage:<22} {} by {}: {} (score {})",
        view.application_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unsaved".to_string()),
        application.applicant_id(),
        view.status,
        view.score
    );
    if let Some(reason) = view.rejection_reason {
        println!("{:<22} reason: {reason}", "");
    }
}

fn unavailable(message: &str) -> AdoptionServiceError {
    RepositoryError::Unavailable(message.to_string()).into()
}
