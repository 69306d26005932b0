use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{is_blank, AnimalId, ApplicationId, ApplicationStatus, DomainError, UserId};

/// Highest score a reviewer may assign.
pub const MAX_SCORE: u8 = 100;
/// Scores at or above this value pre-approve the application.
pub const PRE_APPROVAL_SCORE: u8 = 70;

/// An adoption application ("candidatura") linking one applicant to one animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ApplicationRecord")]
pub struct AdoptionApplication {
    id: Option<ApplicationId>,
    applicant_id: UserId,
    animal_id: AnimalId,
    status: ApplicationStatus,
    score: u8,
    rejection_reason: Option<String>,
    submitted_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct ApplicationRecord {
    #[serde(default)]
    id: Option<ApplicationId>,
    applicant_id: UserId,
    animal_id: AnimalId,
    status: ApplicationStatus,
    score: u8,
    #[serde(default)]
    rejection_reason: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRecord> for AdoptionApplication {
    type Error = DomainError;

    /// Rebuild a stored application. A reason is present exactly when the status is Rejected.
    fn try_from(record: ApplicationRecord) -> Result<Self, Self::Error> {
        let mut application = Self::new(&record.applicant_id.0, &record.animal_id.0)?;
        if record.score > MAX_SCORE {
            return Err(DomainError::argument(format!(
                "score must be between 0 and {MAX_SCORE}, got {}",
                record.score
            )));
        }
        match (record.status, record.rejection_reason.as_deref()) {
            (ApplicationStatus::Rejected, Some(reason)) if !is_blank(reason) => {}
            (ApplicationStatus::Rejected, _) => {
                return Err(DomainError::argument("rejected application needs a reason"));
            }
            (_, None) => {}
            (status, Some(_)) => {
                return Err(DomainError::state(format!(
                    "only rejected applications carry a reason (status {status})"
                )));
            }
        }

        application.id = record.id;
        application.status = record.status;
        application.score = record.score;
        application.rejection_reason = record.rejection_reason;
        application.submitted_at = record.submitted_at;
        Ok(application)
    }
}

impl AdoptionApplication {
    pub fn new(applicant_id: &str, animal_id: &str) -> Result<Self, DomainError> {
        if is_blank(applicant_id) {
            return Err(DomainError::argument("applicant id is required"));
        }
        if is_blank(animal_id) {
            return Err(DomainError::argument("animal id is required"));
        }

        Ok(Self {
            id: None,
            applicant_id: UserId(applicant_id.to_string()),
            animal_id: AnimalId(animal_id.to_string()),
            status: ApplicationStatus::Received,
            score: 0,
            rejection_reason: None,
            submitted_at: Utc::now(),
        })
    }

    pub fn with_submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = submitted_at;
        self
    }

    pub fn assign_id(&mut self, id: ApplicationId) {
        self.id = Some(id);
    }

    pub fn start_review(&mut self) -> Result<(), DomainError> {
        if self.status != ApplicationStatus::Received {
            return Err(DomainError::state(format!(
                "application was already reviewed (status {})",
                self.status
            )));
        }
        self.transition(ApplicationStatus::UnderReview);
        Ok(())
    }

    /// Record a review score in `[0, 100]`. A score of 70 or more pre-approves any open
    /// application, reviewed or not. Approved and rejected applications keep their status.
    pub fn assign_score(&mut self, points: i32) -> Result<(), DomainError> {
        let points = u8::try_from(points)
            .ok()
            .filter(|score| *score <= MAX_SCORE)
            .ok_or_else(|| {
                DomainError::argument(format!(
                    "score must be between 0 and {MAX_SCORE}, got {points}"
                ))
            })?;
        self.score = points;
        debug!(applicant = %self.applicant_id, score = points, "application scored");

        if points >= PRE_APPROVAL_SCORE && !self.status.is_terminal() {
            self.transition(ApplicationStatus::PreApproved);
        }
        Ok(())
    }

    pub fn approve(&mut self) -> Result<(), DomainError> {
        match self.status {
            ApplicationStatus::Rejected => {
                Err(DomainError::state("application was already rejected"))
            }
            ApplicationStatus::Approved => {
                Err(DomainError::state("application was already approved"))
            }
            _ => {
                self.transition(ApplicationStatus::Approved);
                Ok(())
            }
        }
    }

    /// Reject with a reason. Rejecting again replaces the reason; approved applications
    /// cannot be rejected.
    pub fn reject(&mut self, reason: &str) -> Result<(), DomainError> {
        if is_blank(reason) {
            return Err(DomainError::argument("rejection reason is required"));
        }
        if self.status == ApplicationStatus::Approved {
            return Err(DomainError::state("application was already approved"));
        }
        self.transition(ApplicationStatus::Rejected);
        self.rejection_reason = Some(reason.to_string());
        Ok(())
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApplicationStatus::Approved
    }

    fn transition(&mut self, to: ApplicationStatus) {
        debug!(
            applicant = %self.applicant_id,
            animal = %self.animal_id,
            from = %self.status,
            to = %to,
            "application status changed"
        );
        self.status = to;
    }

    pub fn id(&self) -> Option<&ApplicationId> {
        self.id.as_ref()
    }

    pub fn applicant_id(&self) -> &UserId {
        &self.applicant_id
    }

    pub fn animal_id(&self) -> &AnimalId {
        &self.animal_id
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn application() -> AdoptionApplication {
        AdoptionApplication::new("u1", "a1").expect("valid application")
    }

    #[test]
    fn new_application_is_received_with_zero_score() {
        let app = application();
        assert_eq!(app.status(), ApplicationStatus::Received);
        assert_eq!(app.score(), 0);
        assert_eq!(app.rejection_reason(), None);
        assert_eq!(app.applicant_id(), &UserId("u1".to_string()));
        assert_eq!(app.animal_id(), &AnimalId("a1".to_string()));
    }

    #[test]
    fn identifiers_are_required() {
        for (applicant, animal) in [("", "a1"), ("  ", "a1"), ("u1", ""), ("u1", "\t")] {
            match AdoptionApplication::new(applicant, animal) {
                Err(DomainError::InvalidArgument(_)) => {}
                other => panic!("expected invalid argument, got {other:?}"),
            }
        }
    }

    #[test]
    fn submission_timestamp_can_be_assigned_by_caller() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let app = application().with_submitted_at(at);
        assert_eq!(app.submitted_at(), at);
    }

    #[test]
    fn stored_application_round_trips() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let mut app = application().with_submitted_at(at);
        app.assign_id(ApplicationId("app-000001".to_string()));
        app.assign_score(40).expect("score");
        app.reject("no fenced yard").expect("reject");

        let json = serde_json::to_value(&app).expect("serializes");
        let restored: AdoptionApplication = serde_json::from_value(json).expect("deserializes");
        assert_eq!(restored, app);
    }

    #[test]
    fn malformed_stored_applications_are_refused() {
        let valid = serde_json::to_value(application()).expect("serializes");

        let mut out_of_range = valid.clone();
        out_of_range["score"] = serde_json::json!(200);
        assert!(serde_json::from_value::<AdoptionApplication>(out_of_range).is_err());

        let mut blank_applicant = valid.clone();
        blank_applicant["applicant_id"] = serde_json::json!("");
        let err = serde_json::from_value::<AdoptionApplication>(blank_applicant)
            .expect_err("blank applicant");
        assert!(err.to_string().contains("applicant id is required"));

        let mut rejected_without_reason = valid.clone();
        rejected_without_reason["status"] = serde_json::json!("Rejected");
        assert!(serde_json::from_value::<AdoptionApplication>(rejected_without_reason).is_err());

        let mut approved_with_reason = valid;
        approved_with_reason["status"] = serde_json::json!("Approved");
        approved_with_reason["rejection_reason"] = serde_json::json!("stale");
        assert!(serde_json::from_value::<AdoptionApplication>(approved_with_reason).is_err());
    }

    #[test]
    fn review_can_only_start_once() {
        let mut app = application();
        app.start_review().expect("received application can be reviewed");
        assert_eq!(app.status(), ApplicationStatus::UnderReview);
        assert!(matches!(
            app.start_review(),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn score_below_threshold_keeps_status() {
        let mut app = application();
        app.assign_score(69).expect("valid score");
        assert_eq!(app.status(), ApplicationStatus::Received);

        app.start_review().expect("review");
        app.assign_score(69).expect("valid score");
        assert_eq!(app.status(), ApplicationStatus::UnderReview);
        assert_eq!(app.score(), 69);

        app.assign_score(70).expect("valid score");
        assert_eq!(app.status(), ApplicationStatus::PreApproved);
    }

    #[test]
    fn high_score_pre_approves_without_review() {
        let mut app = application();
        app.assign_score(95).expect("valid score");
        assert_eq!(app.status(), ApplicationStatus::PreApproved);
    }

    #[test]
    fn scoring_does_not_reopen_terminal_applications() {
        let mut approved = application();
        approved.approve().expect("approve");
        approved.assign_score(90).expect("valid score");
        assert_eq!(approved.status(), ApplicationStatus::Approved);
        assert_eq!(approved.score(), 90);

        let mut rejected = application();
        rejected.reject("no yard").expect("reject");
        rejected.assign_score(90).expect("valid score");
        assert_eq!(rejected.status(), ApplicationStatus::Rejected);
    }

    #[test]
    fn out_of_range_scores_leave_application_untouched() {
        let mut app = application();
        for points in [-1, 101, i32::MIN, i32::MAX] {
            assert!(matches!(
                app.assign_score(points),
                Err(DomainError::InvalidArgument(_))
            ));
        }
        assert_eq!(app.score(), 0);
        assert_eq!(app.status(), ApplicationStatus::Received);
    }

    #[test]
    fn approve_from_any_open_status() {
        let mut received = application();
        received.approve().expect("received can be approved");
        assert!(received.is_approved());

        let mut reviewing = application();
        reviewing.start_review().expect("review");
        reviewing.approve().expect("under review can be approved");

        let mut pre_approved = application();
        pre_approved.assign_score(80).expect("score");
        pre_approved.approve().expect("pre-approved can be approved");
        assert_eq!(pre_approved.status(), ApplicationStatus::Approved);
    }

    #[test]
    fn approved_application_is_a_sink() {
        let mut app = application();
        app.approve().expect("approve");

        match app.approve() {
            Err(DomainError::InvalidState(message)) => assert!(message.contains("approved")),
            other => panic!("expected invalid state, got {other:?}"),
        }
        assert!(matches!(
            app.reject("changed my mind"),
            Err(DomainError::InvalidState(_))
        ));
        assert_eq!(app.rejection_reason(), None);
    }

    #[test]
    fn rejected_application_cannot_be_approved() {
        let mut app = application();
        app.reject("incomplete profile").expect("reject");
        assert_eq!(app.status(), ApplicationStatus::Rejected);
        assert_eq!(app.rejection_reason(), Some("incomplete profile"));

        match app.approve() {
            Err(DomainError::InvalidState(message)) => assert!(message.contains("rejected")),
            other => panic!("expected invalid state, got {other:?}"),
        }
    }

    #[test]
    fn re_rejection_overwrites_reason() {
        let mut app = application();
        app.reject("first").expect("reject");
        app.reject("second").expect("reject again");
        assert_eq!(app.rejection_reason(), Some("second"));
    }

    #[test]
    fn rejection_requires_reason() {
        let mut app = application();
        assert!(matches!(
            app.reject(" "),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(app.status(), ApplicationStatus::Received);
    }

    #[test]
    fn blank_reason_is_checked_before_approved_state() {
        let mut app = application();
        app.approve().expect("approve");
        assert!(matches!(
            app.reject(""),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
