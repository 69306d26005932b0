use serde::{Deserialize, Serialize};
use tracing::debug;

use super::credentials::{CredentialHasher, PlaintextCredentials};
use super::domain::{is_blank, DomainError, OrganizationStatus, Role, UserId};

/// Minimum number of characters in an account secret.
pub const MIN_SECRET_LENGTH: usize = 8;

/// A platform account: adopter, shelter organization, or administrator.
///
/// `organization_status` is present exactly when the role is [`Role::Organization`].
/// Serializing yields a snapshot without the credential; storage goes through
/// [`AccountRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
    id: Option<UserId>,
    email: String,
    #[serde(skip_serializing)]
    credential: String,
    role: Role,
    email_verified: bool,
    profile_complete: bool,
    organization_status: Option<OrganizationStatus>,
    organization_rejection_reason: Option<String>,
}

impl UserAccount {
    pub fn register(email: &str, secret: &str, role: Role) -> Result<Self, DomainError> {
        Self::register_with(&PlaintextCredentials, email, secret, role)
    }

    /// Register an account whose secret is stored through `hasher`.
    pub fn register_with<H>(
        hasher: &H,
        email: &str,
        secret: &str,
        role: Role,
    ) -> Result<Self, DomainError>
    where
        H: CredentialHasher + ?Sized,
    {
        if !email.contains('@') {
            return Err(DomainError::argument("invalid e-mail address"));
        }
        if secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(DomainError::argument(format!(
                "secret must have at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        let organization_status = match role {
            Role::Organization => Some(OrganizationStatus::Pending),
            Role::Adopter | Role::Admin => None,
        };

        Ok(Self {
            id: None,
            email: normalize_email(email),
            credential: hasher.digest(secret),
            role,
            email_verified: false,
            profile_complete: false,
            organization_status,
            organization_rejection_reason: None,
        })
    }

    /// Same as [`UserAccount::register`] but parses the role from its label.
    pub fn register_with_role_label(
        email: &str,
        secret: &str,
        role: &str,
    ) -> Result<Self, DomainError> {
        Self::register(email, secret, role.parse()?)
    }

    pub fn assign_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    pub fn authenticate(&self, email: &str, secret: &str) -> Result<bool, DomainError> {
        self.authenticate_with(&PlaintextCredentials, email, secret)
    }

    /// Check credentials once the e-mail is verified. Returns whether both match.
    pub fn authenticate_with<H>(
        &self,
        hasher: &H,
        email: &str,
        secret: &str,
    ) -> Result<bool, DomainError>
    where
        H: CredentialHasher + ?Sized,
    {
        if !self.email_verified {
            return Err(DomainError::state("e-mail not verified"));
        }
        Ok(self.email == normalize_email(email) && hasher.verify(secret, &self.credential))
    }

    pub fn verify_email(&mut self) {
        self.email_verified = true;
        debug!(email = %self.email, "e-mail verified");
    }

    pub fn complete_profile(&mut self) -> Result<(), DomainError> {
        if !self.email_verified {
            return Err(DomainError::state(
                "e-mail must be verified before completing the profile",
            ));
        }
        self.profile_complete = true;
        Ok(())
    }

    pub fn verify_organization(&mut self) -> Result<(), DomainError> {
        self.ensure_organization()?;
        self.organization_status = Some(OrganizationStatus::Verified);
        self.organization_rejection_reason = None;
        debug!(email = %self.email, "organization verified");
        Ok(())
    }

    pub fn reject_organization(&mut self, reason: &str) -> Result<(), DomainError> {
        self.ensure_organization()?;
        if is_blank(reason) {
            return Err(DomainError::argument("rejection reason is required"));
        }
        self.organization_status = Some(OrganizationStatus::Rejected);
        self.organization_rejection_reason = Some(reason.to_string());
        debug!(email = %self.email, reason, "organization rejected");
        Ok(())
    }

    pub fn can_publish_animals(&self) -> bool {
        self.role == Role::Organization
            && self.organization_status == Some(OrganizationStatus::Verified)
            && self.email_verified
    }

    pub fn can_apply(&self) -> bool {
        self.role == Role::Adopter && self.email_verified && self.profile_complete
    }

    fn ensure_organization(&self) -> Result<(), DomainError> {
        if self.role != Role::Organization {
            return Err(DomainError::state("account is not an organization"));
        }
        Ok(())
    }

    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn is_profile_complete(&self) -> bool {
        self.profile_complete
    }

    pub fn organization_status(&self) -> Option<OrganizationStatus> {
        self.organization_status
    }

    pub fn organization_rejection_reason(&self) -> Option<&str> {
        self.organization_rejection_reason.as_deref()
    }
}

/// Persistable form of a [`UserAccount`], credential digest included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(default)]
    pub id: Option<UserId>,
    pub email: String,
    pub credential: String,
    pub role: Role,
    pub email_verified: bool,
    pub profile_complete: bool,
    #[serde(default)]
    pub organization_status: Option<OrganizationStatus>,
    #[serde(default)]
    pub organization_rejection_reason: Option<String>,
}

impl UserAccount {
    pub fn to_record(&self) -> AccountRecord {
        AccountRecord {
            id: self.id.clone(),
            email: self.email.clone(),
            credential: self.credential.clone(),
            role: self.role,
            email_verified: self.email_verified,
            profile_complete: self.profile_complete,
            organization_status: self.organization_status,
            organization_rejection_reason: self.organization_rejection_reason.clone(),
        }
    }
}

impl TryFrom<AccountRecord> for UserAccount {
    type Error = DomainError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        if !record.email.contains('@') {
            return Err(DomainError::argument("invalid e-mail address"));
        }
        if record.credential.is_empty() {
            return Err(DomainError::argument("stored credential is missing"));
        }
        match (record.role, record.organization_status) {
            (Role::Organization, Some(_)) | (Role::Adopter | Role::Admin, None) => {}
            (role, _) => {
                return Err(DomainError::state(format!(
                    "organization status does not match role {role}"
                )));
            }
        }
        match (
            record.organization_status,
            record.organization_rejection_reason.as_deref(),
        ) {
            (Some(OrganizationStatus::Rejected), Some(reason)) if !is_blank(reason) => {}
            (Some(OrganizationStatus::Rejected), _) => {
                return Err(DomainError::argument("rejected organization needs a reason"));
            }
            (_, None) => {}
            (_, Some(_)) => {
                return Err(DomainError::state(
                    "only rejected organizations carry a rejection reason",
                ));
            }
        }
        if record.profile_complete && !record.email_verified {
            return Err(DomainError::state(
                "profile marked complete before e-mail verification",
            ));
        }

        Ok(Self {
            id: record.id,
            email: normalize_email(&record.email),
            credential: record.credential,
            role: record.role,
            email_verified: record.email_verified,
            profile_complete: record.profile_complete,
            organization_status: record.organization_status,
            organization_rejection_reason: record.organization_rejection_reason,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.to_lowercase().trim().to_string()
}
