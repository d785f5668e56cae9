//! Post-retrieval filters for the volunteer directory and the donation history.
//!
//! The repository always fetches the full ordered list; these filters only
//! drop rows, so the relative order of what remains is preserved.

use crate::enums::AvailabilityFilter;
use crate::structs::{Donation, Volunteer};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerFilter {
    #[serde(default)]
    pub availability: AvailabilityFilter,
    /// Case-insensitive substring matched against name OR skills.
    #[serde(default)]
    pub search: Option<String>,
}

impl VolunteerFilter {
    pub fn matches(&self, volunteer: &Volunteer) -> bool {
        if !self.availability.matches(volunteer.availability) {
            return false;
        }
        match non_empty(&self.search) {
            Some(term) => {
                let needle = term.to_lowercase();
                contains_ci(&volunteer.name, &needle)
                    || volunteer
                        .skills
                        .as_deref()
                        .is_some_and(|skills| contains_ci(skills, &needle))
            }
            None => true,
        }
    }

    pub fn apply(&self, volunteers: Vec<Volunteer>) -> Vec<Volunteer> {
        volunteers.into_iter().filter(|v| self.matches(v)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationFilter {
    /// Exact, case-sensitive resource type.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Case-insensitive substring of the donor name.
    #[serde(default)]
    pub donor: Option<String>,
    /// Inclusive lower bound on the donation date.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the donation date.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DonationFilter {
    pub fn matches(&self, donation: &Donation) -> bool {
        if let Some(resource_type) = non_empty(&self.resource_type) {
            if donation.resource_type != resource_type {
                return false;
            }
        }
        if let Some(donor) = non_empty(&self.donor) {
            if !contains_ci(&donation.donor_name, &donor.to_lowercase()) {
                return false;
            }
        }
        if self.from.is_some_and(|from| donation.donation_date < from) {
            return false;
        }
        if self.to.is_some_and(|to| donation.donation_date > to) {
            return false;
        }
        true
    }

    pub fn apply(&self, donations: Vec<Donation>) -> Vec<Donation> {
        donations.into_iter().filter(|d| self.matches(d)).collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
