use serde::{Deserialize, Serialize};
use std::fmt;

/// The three-way availability selector of the volunteer directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityFilter {
    #[default]
    All,
    AvailableOnly,
    UnavailableOnly,
}

impl AvailabilityFilter {
    /// Returns true if a volunteer with the given availability passes this filter.
    pub fn matches(&self, availability: bool) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::AvailableOnly => availability,
            AvailabilityFilter::UnavailableOnly => !availability,
        }
    }
}

/// The fixed donation categories offered by the donation form.
///
/// Anything outside this list is logged as free text ("Other"), so the
/// persisted resource type is always a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceCategory {
    #[serde(rename = "Food Items")]
    FoodItems,
    Clothing,
    #[serde(rename = "Medical Supplies")]
    MedicalSupplies,
    Books,
    Electronics,
    Furniture,
    Toys,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 7] = [
        ResourceCategory::FoodItems,
        ResourceCategory::Clothing,
        ResourceCategory::MedicalSupplies,
        ResourceCategory::Books,
        ResourceCategory::Electronics,
        ResourceCategory::Furniture,
        ResourceCategory::Toys,
    ];

    /// The exact string stored as `resource_type` / `item_name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::FoodItems => "Food Items",
            ResourceCategory::Clothing => "Clothing",
            ResourceCategory::MedicalSupplies => "Medical Supplies",
            ResourceCategory::Books => "Books",
            ResourceCategory::Electronics => "Electronics",
            ResourceCategory::Furniture => "Furniture",
            ResourceCategory::Toys => "Toys",
        }
    }

    /// Exact, case-sensitive lookup. Free-text resource types return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
