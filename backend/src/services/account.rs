//! Account detail and credential updates
//!
//! Validates locally, then delegates to the profile persistence
//! collaborator. Collaborator failures surface with their own message when
//! one is available, else a generic fallback.

use serde::Deserialize;
use shared::{validate_password, validate_phone, GpsCoordinates, Profile};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::ProfileStore;

/// Fields a user can edit on the profile form
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDetailsInput {
    pub fullname: String,
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub geolocation: Option<GpsCoordinates>,
    pub is_supplier: bool,
    pub is_vendor: bool,
}

/// Input for a credential change
#[derive(Debug, Deserialize)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Account service delegating persistence to the profile collaborator
#[derive(Clone)]
pub struct AccountService {
    profiles: Arc<dyn ProfileStore>,
}

impl AccountService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Fold edited form fields into the stored profile
    pub async fn update_account_details(
        &self,
        profile_id: Uuid,
        input: AccountDetailsInput,
    ) -> AppResult<Profile> {
        if let Err(message) = validate_phone(&input.phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: message.to_string(),
            });
        }

        let mut profile = self
            .profiles
            .get(profile_id)
            .await
            .map_err(passthrough)?;

        profile.fullname = input.fullname;
        profile.name = input.name;
        profile.phone = input.phone;
        profile.address.street = input.street;
        profile.address.city = input.city;
        profile.address.state = input.state;
        profile.address.pincode = input.pincode;
        if input.geolocation.is_some() {
            profile.address.geolocation = input.geolocation;
        }
        profile.is_supplier = input.is_supplier;
        profile.is_vendor = input.is_vendor;

        self.profiles
            .save(profile.clone())
            .await
            .map_err(passthrough)?;

        tracing::info!(profile_id = %profile_id, "account details updated");
        Ok(profile)
    }

    /// Change the account password after local validation
    pub async fn change_password(
        &self,
        profile_id: Uuid,
        input: ChangePasswordInput,
    ) -> AppResult<()> {
        if input.new_password != input.confirm_password {
            return Err(AppError::Validation {
                field: "confirm_password".to_string(),
                message: "Password confirmation does not match".to_string(),
            });
        }
        if let Err(message) = validate_password(&input.new_password) {
            return Err(AppError::Validation {
                field: "new_password".to_string(),
                message: message.to_string(),
            });
        }

        self.profiles
            .change_password(profile_id, &input.current_password, &input.new_password)
            .await
            .map_err(passthrough)?;

        tracing::info!(profile_id = %profile_id, "password changed");
        Ok(())
    }
}

/// Keep collaborator messages verbatim; anything opaque degrades to a
/// generic fallback.
fn passthrough(err: AppError) -> AppError {
    match err {
        AppError::Collaborator(_) | AppError::NotFound(_) | AppError::Validation { .. } => err,
        AppError::InternalError(_) => {
            AppError::Collaborator("Profile update failed. Please try again.".to_string())
        }
        other => AppError::Collaborator(other.to_string()),
    }
}
