//! Contact details captured on the calculator's second step

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who is asking for the space. Every field is required before a lead can be
/// submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    pub company: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
}

impl ContactInfo {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Company => &self.company,
            ContactField::Designation => &self.designation,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Company => &mut self.company,
            ContactField::Designation => &mut self.designation,
            ContactField::Phone => &mut self.phone,
            ContactField::Email => &mut self.email,
        };
        *slot = value.into();
    }

    /// Empty every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Addressable contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Company,
    Designation,
    Phone,
    Email,
}

impl ContactField {
    /// Form order.
    pub const ALL: [ContactField; 5] =
        [Self::Name, Self::Company, Self::Designation, Self::Phone, Self::Email];

    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Company => "company",
            Self::Designation => "designation",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Company => "Company",
            Self::Designation => "Designation",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
