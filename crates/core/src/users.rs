//! Account creation rules.
//!
//! Which fields a new account carries depends on its role. Validation here
//! also strips fields that do not belong to the role, so the stored row only
//! holds what the role uses.

use serde::Deserialize;
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::roles::Role;

/// Maximum number of extra contact addresses on a client/agency account.
pub const MAX_ADDITIONAL_EMAILS: usize = 2;

/// Length of the password generated for staff-created accounts.
pub const GENERATED_PASSWORD_LEN: usize = 12;

/// Account details as submitted by an admin.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub role: Role,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub states_covered: Option<Vec<String>>,
    pub name: Option<String>,
    pub additional_emails: Option<Vec<String>>,
    pub industry: Option<String>,
}

impl NewAccount {
    /// An account with only the required fields set.
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
            firstname: None,
            lastname: None,
            phone: None,
            address: None,
            states_covered: None,
            name: None,
            additional_emails: None,
            industry: None,
        }
    }
}

/// Check `account` against the creator's role and the role-specific field
/// rules. Returns the account with foreign fields cleared and text trimmed.
pub fn validate_new_account(account: NewAccount, creator: Role) -> Result<NewAccount, CoreError> {
    if !creator.is_admin() {
        return Err(CoreError::forbidden("Only administrators can create accounts"));
    }
    if account.role == Role::ChiefAccountManager && creator != Role::SuperAdmin {
        return Err(CoreError::forbidden(
            "Only Super Admin can create a Chief Account Manager.",
        ));
    }
    if account.role == Role::SuperAdmin {
        return Err(CoreError::forbidden(
            "Super Admin accounts are created through signup only.",
        ));
    }

    let email = normalize_email(&account.email)?;

    let mut validated = NewAccount::new(email, account.role);
    validated.phone = trimmed(account.phone);
    validated.address = trimmed(account.address);

    match account.role {
        Role::FieldAuditor => {
            let firstname = trimmed(account.firstname);
            let lastname = trimmed(account.lastname);
            let states: Vec<String> = account
                .states_covered
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if firstname.is_none() || lastname.is_none() || states.is_empty() {
                return Err(CoreError::validation(
                    "Firstname, lastname, and states covered are required for Field Auditor role.",
                ));
            }
            validated.firstname = firstname;
            validated.lastname = lastname;
            validated.states_covered = Some(states);
        }
        Role::ClientAgencyUser => {
            let name = trimmed(account.name).ok_or_else(|| {
                CoreError::validation("Name is required for Client/Agency User role.")
            })?;
            let extra = validate_additional_emails(account.additional_emails.unwrap_or_default())?;
            validated.name = Some(name);
            validated.additional_emails = Some(extra);
            validated.industry = trimmed(account.industry);
        }
        Role::SuperAdmin | Role::ChiefAccountManager | Role::AccountManager => {
            validated.firstname = trimmed(account.firstname);
            validated.lastname = trimmed(account.lastname);
        }
    }

    Ok(validated)
}

/// Trim and lowercase an address, rejecting anything that is not an email.
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();
    if !email.validate_email() {
        return Err(CoreError::validation("A valid email is required."));
    }
    Ok(email)
}

/// Validate the extra contact addresses of a client/agency account.
pub fn validate_additional_emails(emails: Vec<String>) -> Result<Vec<String>, CoreError> {
    if emails.len() > MAX_ADDITIONAL_EMAILS {
        return Err(CoreError::validation(format!(
            "Additional email array can only contain up to {MAX_ADDITIONAL_EMAILS} emails."
        )));
    }
    let emails: Vec<String> = emails.into_iter().map(|e| e.trim().to_lowercase()).collect();
    if !emails.iter().all(|e| e.validate_email()) {
        return Err(CoreError::validation(
            "All additional emails must be valid email addresses.",
        ));
    }
    Ok(emails)
}

/// Display name for a user: the organisation name for client accounts,
/// otherwise "firstname lastname", falling back to the email.
pub fn display_name(
    firstname: Option<&str>,
    lastname: Option<&str>,
    name: Option<&str>,
    email: &str,
) -> String {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    let full = [firstname, lastname]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if full.is_empty() {
        email.to_string()
    } else {
        full
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
