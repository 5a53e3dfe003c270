//! Customer contact and delivery details.

use serde::{Deserialize, Serialize};

/// Geographic position shared by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Maps link pointing at this position, e.g.
    /// `https://www.google.com/maps?q=-1.4558,-48.4902`.
    pub fn maps_link(&self, base_url: &str) -> String {
        format!("{}?q={},{}", base_url.trim_end_matches('?'), self.lat, self.lng)
    }
}

/// Who is ordering and where it goes.
///
/// A typed address and a shared location are alternatives: setting one
/// clears the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Set the delivery address. A non-blank address drops any shared
    /// location; a blank one just clears the address.
    pub fn set_address(&mut self, address: impl Into<String>) {
        let address = address.into();
        if address.trim().is_empty() {
            self.address = None;
        } else {
            self.address = Some(address);
            self.location = None;
        }
    }

    /// Store a shared location, dropping any typed address.
    pub fn set_location(&mut self, location: Coordinates) {
        self.location = Some(location);
        self.address = None;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
    }

    /// Check if there is somewhere to deliver to.
    pub fn has_destination(&self) -> bool {
        self.address.is_some() || self.location.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_and_location_are_exclusive() {
        let mut customer = CustomerInfo::new("Ana", "91999990000");
        customer.set_location(Coordinates::new(-1.4558, -48.4902));
        assert!(customer.location().is_some());

        customer.set_address("Rua das Flores, 10");
        assert_eq!(customer.address(), Some("Rua das Flores, 10"));
        assert_eq!(customer.location(), None);

        customer.set_location(Coordinates::new(-1.0, -48.0));
        assert_eq!(customer.address(), None);
        assert!(customer.has_destination());
    }

    #[test]
    fn test_blank_address_keeps_location() {
        let mut customer = CustomerInfo::new("Ana", "91999990000");
        customer.set_location(Coordinates::new(-1.4558, -48.4902));
        customer.set_address("   ");
        assert_eq!(customer.address(), None);
        assert!(customer.location().is_some());
    }

    #[test]
    fn test_maps_link() {
        let coords = Coordinates::new(-1.4558, -48.4902);
        assert_eq!(
            coords.maps_link("https://www.google.com/maps"),
            "https://www.google.com/maps?q=-1.4558,-48.4902"
        );
    }

    #[test]
    fn test_no_destination_by_default() {
        assert!(!CustomerInfo::new("Ana", "1").has_destination());
    }
}
