use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered volunteer, as stored in the `volunteers` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub availability: bool,
    pub emergency_contact: Option<String>,
}

/// A logged donation. Donations are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Donation {
    pub id: i64,
    pub donor_name: String,
    pub resource_type: String,
    pub quantity: i32,
    pub donation_date: NaiveDate,
}

/// The running stock level for one resource type.
///
/// `item_name` is the join key against `Donation::resource_type` (exact match).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub item_name: String,
    pub quantity_available: i32,
}

/// The registration form for a new volunteer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

// The registration form ticks "currently available" by default.
fn default_availability() -> bool {
    true
}

impl NewVolunteer {
    /// Checks the required fields and normalises empty optional fields to `None`.
    ///
    /// Only the empty string counts as missing; values are stored untrimmed.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        self.phone = self.phone.filter(|s| !s.is_empty());
        self.skills = self.skills.filter(|s| !s.is_empty());
        self.emergency_contact = self.emergency_contact.filter(|s| !s.is_empty());
        Ok(self)
    }
}

/// The logging form for a new donation. The date is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor_name: String,
    pub resource_type: String,
    pub quantity: i32,
}

impl NewDonation {
    /// Checks the required fields and the `quantity >= 1` invariant.
    ///
    /// The resource type is kept byte-for-byte: it is the inventory key and
    /// "Books" and "Books " are different items.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.donor_name.is_empty() {
            return Err(ValidationError::MissingField("donor_name"));
        }
        if self.resource_type.is_empty() {
            return Err(ValidationError::MissingField("resource_type"));
        }
        if self.quantity < 1 {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volunteer_form(name: &str, email: &str) -> NewVolunteer {
        NewVolunteer {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn volunteer_requires_name_and_email() {
        assert_eq!(
            volunteer_form("", "a@b.org").validate(),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            volunteer_form("Ada", "").validate(),
            Err(ValidationError::MissingField("email"))
        );
        assert!(volunteer_form("Ada", "ada@ngo.org").validate().is_ok());
    }

    #[test]
    fn whitespace_only_values_are_not_missing() {
        let valid = volunteer_form("   ", "ws@ngo.org").validate().unwrap();
        assert_eq!(valid.name, "   ");

        let form = NewDonation {
            donor_name: " ".to_string(),
            resource_type: "Books".to_string(),
            quantity: 1,
        };
        assert_eq!(form.validate().unwrap().donor_name, " ");
    }

    #[test]
    fn volunteer_empty_optionals_become_none() {
        let form = NewVolunteer {
            phone: Some("".to_string()),
            skills: Some("First aid".to_string()),
            emergency_contact: Some(String::new()),
            ..volunteer_form("Ada", "ada@ngo.org")
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.phone, None);
        assert_eq!(valid.skills.as_deref(), Some("First aid"));
        assert_eq!(valid.emergency_contact, None);
    }

    #[test]
    fn volunteer_form_defaults_to_available() {
        let form: NewVolunteer =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@ngo.org"}"#).unwrap();
        assert!(form.availability);
        assert_eq!(form.phone, None);
    }

    #[test]
    fn donation_rejects_non_positive_quantity() {
        let form = NewDonation {
            donor_name: "Acme".to_string(),
            resource_type: "Books".to_string(),
            quantity: 0,
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidQuantity(0)));
    }

    #[test]
    fn donation_keeps_resource_type_untrimmed() {
        let form = NewDonation {
            donor_name: "Acme".to_string(),
            resource_type: " Books".to_string(),
            quantity: 2,
        };
        assert_eq!(form.validate().unwrap().resource_type, " Books");
    }

    #[test]
    fn donation_requires_donor_and_resource() {
        let form = NewDonation {
            donor_name: "".to_string(),
            resource_type: "Books".to_string(),
            quantity: 1,
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingField("donor_name")));

        let form = NewDonation {
            donor_name: "Acme".to_string(),
            resource_type: "".to_string(),
            quantity: 1,
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingField("resource_type")));
    }
}
