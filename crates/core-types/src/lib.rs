pub mod enums;
pub mod error;
pub mod filters;
pub mod structs;
pub mod summary;

// Re-export the core types to provide a clean public API.
pub use enums::{AvailabilityFilter, ResourceCategory};
pub use error::ValidationError;
pub use filters::{DonationFilter, VolunteerFilter};
pub use structs::{Donation, InventoryItem, NewDonation, NewVolunteer, Volunteer};
pub use summary::{DonationSummary, InventorySummary, QuantityByDate, QuantityByResource};
