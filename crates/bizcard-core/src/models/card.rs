//! Business card data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ten contact fields extracted from one business card.
///
/// Every field is always present; a field the pipeline could not find is an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Person name.
    pub name: String,

    /// Job title.
    pub designation: String,

    /// Company name.
    pub company: String,

    /// Phone numbers, space separated.
    pub phone: String,

    /// Email addresses, space separated.
    pub email: String,

    /// Websites, space separated.
    pub website: String,

    /// Street part of the address.
    pub address: String,

    /// City.
    pub city: String,

    /// State.
    pub state: String,

    /// Postal code (pincode).
    pub postal_code: String,
}

impl CardRecord {
    /// Field values in canonical order.
    pub fn fields(&self) -> [(CardField, &str); 10] {
        [
            (CardField::Name, self.name.as_str()),
            (CardField::Designation, self.designation.as_str()),
            (CardField::Company, self.company.as_str()),
            (CardField::Phone, self.phone.as_str()),
            (CardField::Email, self.email.as_str()),
            (CardField::Website, self.website.as_str()),
            (CardField::Address, self.address.as_str()),
            (CardField::City, self.city.as_str()),
            (CardField::State, self.state.as_str()),
            (CardField::PostalCode, self.postal_code.as_str()),
        ]
    }

    /// Get a single field value.
    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::Name => &self.name,
            CardField::Designation => &self.designation,
            CardField::Company => &self.company,
            CardField::Phone => &self.phone,
            CardField::Email => &self.email,
            CardField::Website => &self.website,
            CardField::Address => &self.address,
            CardField::City => &self.city,
            CardField::State => &self.state,
            CardField::PostalCode => &self.postal_code,
        }
    }

    /// Replace a single field value.
    pub fn set(&mut self, field: CardField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CardField::Name => self.name = value,
            CardField::Designation => self.designation = value,
            CardField::Company => self.company = value,
            CardField::Phone => self.phone = value,
            CardField::Email => self.email = value,
            CardField::Website => self.website = value,
            CardField::Address => self.address = value,
            CardField::City => self.city = value,
            CardField::State => self.state = value,
            CardField::PostalCode => self.postal_code = value,
        }
    }

    /// True when no field was populated.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    /// Number of populated fields.
    pub fn populated(&self) -> usize {
        self.fields().iter().filter(|(_, value)| !value.is_empty()).count()
    }
}

/// Identifies one of the ten card fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Name,
    Designation,
    Company,
    Phone,
    Email,
    Website,
    Address,
    City,
    State,
    PostalCode,
}

impl CardField {
    /// All fields in canonical order.
    pub const ALL: [CardField; 10] = [
        CardField::Name,
        CardField::Designation,
        CardField::Company,
        CardField::Phone,
        CardField::Email,
        CardField::Website,
        CardField::Address,
        CardField::City,
        CardField::State,
        CardField::PostalCode,
    ];

    /// Stable snake_case key, also used as the storage column name.
    pub fn key(self) -> &'static str {
        match self {
            CardField::Name => "name",
            CardField::Designation => "designation",
            CardField::Company => "company",
            CardField::Phone => "phone",
            CardField::Email => "email",
            CardField::Website => "website",
            CardField::Address => "address",
            CardField::City => "city",
            CardField::State => "state",
            CardField::PostalCode => "postal_code",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            CardField::Name => "Name",
            CardField::Designation => "Designation",
            CardField::Company => "Company",
            CardField::Phone => "Phone",
            CardField::Email => "Email",
            CardField::Website => "Website",
            CardField::Address => "Address",
            CardField::City => "City",
            CardField::State => "State",
            CardField::PostalCode => "Postal Code",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CardField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "contact" => Ok(CardField::Phone),
            "pincode" | "pin" | "zip" => Ok(CardField::PostalCode),
            _ => CardField::ALL
                .into_iter()
                .find(|field| field.key() == key)
                .ok_or_else(|| format!("unknown card field: {}", s)),
        }
    }
}

/// Opaque identifier assigned by the card store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(CardId)
    }
}

/// A card as held by the store: record, original image and capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCard {
    pub id: CardId,
    pub record: CardRecord,
    #[serde(skip)]
    pub image: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_record_is_empty() {
        let record = CardRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.fields().len(), 10);
        assert_eq!(record.populated(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut record = CardRecord::default();
        record.set(CardField::PostalCode, "600113");
        record.set(CardField::Name, "Selva");
        assert_eq!(record.get(CardField::PostalCode), "600113");
        assert_eq!(record.postal_code, "600113");
        assert_eq!(record.populated(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("postal_code".parse::<CardField>(), Ok(CardField::PostalCode));
        assert_eq!("Postal Code".parse::<CardField>(), Ok(CardField::PostalCode));
        assert_eq!("pincode".parse::<CardField>(), Ok(CardField::PostalCode));
        assert_eq!("contact".parse::<CardField>(), Ok(CardField::Phone));
        assert_eq!("EMAIL".parse::<CardField>(), Ok(CardField::Email));
        assert!("fax".parse::<CardField>().is_err());
    }

    #[test]
    fn test_record_serializes_all_fields() {
        let json = serde_json::to_value(CardRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 10);
        for field in CardField::ALL {
            assert_eq!(object[field.key()], serde_json::Value::String(String::new()));
        }
    }

    #[test]
    fn test_card_id_round_trip() {
        let id: CardId = " 42 ".parse().unwrap();
        assert_eq!(id, CardId(42));
        assert_eq!(id.to_string(), "42");
    }
}
