//! Profile gate integration tests
//!
//! Covers completeness, the completion percentage and navigation gating.

use proptest::prelude::*;
use uuid::Uuid;

use shared::Profile;
use supplier_marketplace_backend::services::profile::{
    completion_percentage, guard, is_complete, DashboardView, COMPLETE_PROFILE_ADVISORY,
};

const FIELD_COUNT: usize = 7;

fn set_field(profile: &mut Profile, index: usize, value: &str) {
    match index {
        0 => profile.fullname = value.to_string(),
        1 => profile.name = value.to_string(),
        2 => profile.phone = value.to_string(),
        3 => profile.address.street = value.to_string(),
        4 => profile.address.city = value.to_string(),
        5 => profile.address.state = value.to_string(),
        6 => profile.address.pincode = value.to_string(),
        _ => unreachable!(),
    }
}

fn profile_with_fields(filled: &[usize]) -> Profile {
    let mut profile = Profile::new(Uuid::new_v4());
    for &index in filled {
        set_field(&mut profile, index, "filled");
    }
    profile
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_empty_profile() {
    let profile = Profile::new(Uuid::new_v4());
    assert!(!is_complete(&profile));
    assert_eq!(completion_percentage(&profile), 0);
}

#[test]
fn test_full_profile() {
    let profile = profile_with_fields(&[0, 1, 2, 3, 4, 5, 6]);
    assert!(is_complete(&profile));
    assert_eq!(completion_percentage(&profile), 100);
}

#[test]
fn test_missing_pincode_only() {
    let profile = profile_with_fields(&[0, 1, 2, 3, 4, 5]);
    assert!(!is_complete(&profile));
    // round(6/7 * 100) = 86
    assert_eq!(completion_percentage(&profile), 86);
}

#[test]
fn test_whitespace_fields_do_not_count() {
    let mut profile = profile_with_fields(&[0, 1, 2, 3, 4, 5, 6]);
    profile.address.pincode = "   ".to_string();
    assert!(!is_complete(&profile));
    assert_eq!(completion_percentage(&profile), 86);
}

#[test]
fn test_guard_withholds_gated_views_while_incomplete() {
    let profile = profile_with_fields(&[0, 1, 2]);

    for view in [DashboardView::Orders, DashboardView::Notifications] {
        let access = guard(view, &profile);
        assert_eq!(access.view, DashboardView::Profile);
        assert_eq!(access.advisory.as_deref(), Some(COMPLETE_PROFILE_ADVISORY));
    }
}

#[test]
fn test_guard_always_grants_profile_view() {
    let incomplete = Profile::new(Uuid::new_v4());
    let access = guard(DashboardView::Profile, &incomplete);
    assert_eq!(access.view, DashboardView::Profile);
    assert!(access.advisory.is_none());
}

#[test]
fn test_guard_grants_everything_once_complete() {
    let profile = profile_with_fields(&[0, 1, 2, 3, 4, 5, 6]);
    for view in [
        DashboardView::Profile,
        DashboardView::Orders,
        DashboardView::Notifications,
    ] {
        let access = guard(view, &profile);
        assert_eq!(access.view, view);
        assert!(access.advisory.is_none());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Filling fields one at a time never decreases the percentage, and it
    /// reaches exactly 100 iff the profile is complete.
    #[test]
    fn prop_completion_monotonic(
        order in Just((0..FIELD_COUNT).collect::<Vec<usize>>()).prop_shuffle()
    ) {
        let mut profile = Profile::new(Uuid::new_v4());
        let mut previous = completion_percentage(&profile);
        prop_assert_eq!(previous, 0);

        for (step, &index) in order.iter().enumerate() {
            set_field(&mut profile, index, "filled");
            let current = completion_percentage(&profile);
            prop_assert!(current >= previous, "percentage decreased at step {}", step);
            previous = current;

            let all_filled = step + 1 == FIELD_COUNT;
            prop_assert_eq!(is_complete(&profile), all_filled);
            prop_assert_eq!(current == 100, all_filled);
        }
    }

    /// Any subset of filled fields yields a percentage in [0, 100]
    #[test]
    fn prop_percentage_bounded(mask in 0u8..128) {
        let filled: Vec<usize> = (0..FIELD_COUNT).filter(|i| mask & (1 << i) != 0).collect();
        let profile = profile_with_fields(&filled);
        let pct = completion_percentage(&profile);
        prop_assert!(pct <= 100);
        prop_assert_eq!(pct == 100, filled.len() == FIELD_COUNT);
    }
}
