use lazy_static::lazy_static;
use regex::Regex;

use crate::error::validation::ValidationError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

lazy_static! {
    /// `+<country>-<3 digits>-<4 digits>`, e.g. `+49-555-0123`
    static ref INTL_PHONE: Regex = Regex::new(r"^\+[1-9]\d{0,2}-\d{3}-\d{4}").expect("phone pattern is valid");
}

/// Profile attributes the user can change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone_number: String,
    pub job_preferences: Vec<String>,
    pub password_change: Option<PasswordChange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

pub fn is_valid_phone_number(value: &str) -> bool {
    INTL_PHONE.is_match(value)
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::invalid_field("firstName", "is required"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::invalid_field("lastName", "is required"));
        }
        if self.phone_number.trim().is_empty() {
            return Err(ValidationError::invalid_field("phoneNumber", "is required"));
        }
        if !is_valid_phone_number(self.phone_number.trim()) {
            return Err(ValidationError::invalid_field("phoneNumber", "expected a number like +1-555-0123"));
        }
        if let Some(change) = &self.password_change {
            change.validate()?;
        }
        Ok(())
    }
}

impl PasswordChange {
    /// Only checked when an old password was given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.old_password.is_empty() {
            return Ok(());
        }
        if self.new_password.is_empty() || self.confirm_new_password.is_empty() {
            return Err(ValidationError::invalid_field("newPassword", "new password and confirmation are required"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::invalid_field(
                "newPassword",
                format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }
        if self.new_password != self.confirm_new_password {
            return Err(ValidationError::invalid_field("confirmNewPassword", "does not match the new password"));
        }
        Ok(())
    }
}

/// First letter of each space-separated word: "Ada Lovelace" -> "AL".
pub fn user_acronym(name: &str) -> String {
    name.split(' ').filter_map(|word| word.chars().next()).collect()
}
