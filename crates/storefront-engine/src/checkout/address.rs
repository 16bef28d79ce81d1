//! Address types.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A postal address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Country name or code.
    pub country: String,
    /// City.
    pub city: String,
    /// Address line 1.
    pub address1: String,
    /// Address line 2 (apt, suite, etc.).
    #[serde(default)]
    pub address2: Option<String>,
    /// Postal/ZIP code.
    pub zip_code: String,
    /// Saved address label, e.g. "Home" or "Office".
    #[serde(default)]
    pub address_type: Option<String>,
}

impl Address {
    /// Create a new address.
    pub fn new(
        address1: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
            address1: address1.into(),
            address2: None,
            zip_code: zip_code.into(),
            address_type: None,
        }
    }

    pub fn with_address2(mut self, address2: impl Into<String>) -> Self {
        self.address2 = Some(address2.into());
        self
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address1.as_str()];
        if let Some(ref addr2) = self.address2 {
            parts.push(addr2);
        }
        parts.push(&self.city);
        parts.push(&self.zip_code);
        parts.push(&self.country);
        parts.join(", ")
    }

    /// First required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("address1", &self.address1),
            ("city", &self.city),
            ("country", &self.country),
            ("zipCode", &self.zip_code),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// Check if address is complete.
    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }
}

/// Where and to whom an order ships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub address: Address,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl ShippingInfo {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            phone_number: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Reject incomplete addresses before anything is sent.
    pub fn validate(&self) -> Result<(), CommerceError> {
        match self.address.missing_field() {
            Some(field) => Err(CommerceError::InvalidShipping(field.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_creation() {
        let addr = Address::new("123 Main St", "New York", "US", "10001").with_address2("Apt 4B");
        assert!(addr.is_complete());
        assert_eq!(addr.one_line(), "123 Main St, Apt 4B, New York, 10001, US");
    }

    #[test]
    fn test_missing_field() {
        let addr = Address::new("123 Main St", "  ", "US", "10001");
        assert_eq!(addr.missing_field(), Some("city"));

        let err = ShippingInfo::new(addr).validate().unwrap_err();
        assert_eq!(err, CommerceError::InvalidShipping("city".into()));
    }

    #[test]
    fn test_address_json_shape() {
        let json = r#"{"country":"US","city":"New York","address1":"123 Main St","zipCode":"10001","addressType":"Home"}"#;
        let addr: Address = serde_json::from_str(json).unwrap();
        assert_eq!(addr.zip_code, "10001");
        assert_eq!(addr.address_type.as_deref(), Some("Home"));
        assert!(addr.address2.is_none());
    }
}
