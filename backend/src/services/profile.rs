//! Profile completeness gate
//!
//! Order and notification views stay locked until the profile carries the
//! required identity and address fields. Geolocation is never required.

use serde::{Deserialize, Serialize};
use shared::Profile;

/// Advisory shown when an incomplete profile requests a gated view
pub const COMPLETE_PROFILE_ADVISORY: &str =
    "Please complete your profile to access orders and notifications.";

/// Number of fields counted towards completion
const REQUIRED_FIELD_COUNT: u32 = 7;

/// Top-level dashboard views the navigation can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    Profile,
    Orders,
    Notifications,
}

impl DashboardView {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "profile" => Some(DashboardView::Profile),
            "orders" => Some(DashboardView::Orders),
            "notifications" => Some(DashboardView::Notifications),
            _ => None,
        }
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Serialize)]
pub struct ViewAccess {
    pub view: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

fn required_fields(profile: &Profile) -> [&str; 7] {
    [
        &profile.fullname,
        &profile.name,
        &profile.phone,
        &profile.address.street,
        &profile.address.city,
        &profile.address.state,
        &profile.address.pincode,
    ]
}

/// Whether every required identity and address field is filled in
pub fn is_complete(profile: &Profile) -> bool {
    required_fields(profile)
        .iter()
        .all(|f| !f.trim().is_empty())
}

/// Share of filled required fields, rounded to the nearest percent
pub fn completion_percentage(profile: &Profile) -> u8 {
    let filled = required_fields(profile)
        .iter()
        .filter(|f| !f.trim().is_empty())
        .count() as u32;

    ((filled * 100 + REQUIRED_FIELD_COUNT / 2) / REQUIRED_FIELD_COUNT) as u8
}

/// Resolve a navigation request against the completeness gate.
///
/// The profile view is always reachable; any other view requires a complete
/// profile and otherwise redirects to the profile view with a fixed advisory.
pub fn guard(requested: DashboardView, profile: &Profile) -> ViewAccess {
    if requested == DashboardView::Profile || is_complete(profile) {
        return ViewAccess {
            view: requested,
            advisory: None,
        };
    }

    ViewAccess {
        view: DashboardView::Profile,
        advisory: Some(COMPLETE_PROFILE_ADVISORY.to_string()),
    }
}
