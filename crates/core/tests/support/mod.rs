//! Shared test helpers for `abacus-core` integration tests.
//!
//! In-memory fakes for the lead and listing ports plus a few fixtures, so the flow tests
//! can focus on wizard behaviour instead of plumbing.

#![allow(dead_code)]

pub mod mocks;

use abacus_domain::{ContactInfo, LeadRecord, LeadSource, LeadStatus, Listing};

/// A contact that passes every validation rule.
pub fn valid_contact() -> ContactInfo {
    ContactInfo {
        name: "Asha Rao".into(),
        company: "Northwind Traders".into(),
        designation: "Head of Workplace".into(),
        phone: "+91 98450 00000".into(),
        email: "asha@northwind.in".into(),
    }
}

/// Minimal lead record with the given id and status.
pub fn lead(id: &str, status: LeadStatus) -> LeadRecord {
    LeadRecord {
        id: id.to_string(),
        name: format!("Lead {id}"),
        company: "Contoso".into(),
        designation: "Admin".into(),
        phone: "080 1234".into(),
        email: format!("{id}@contoso.com"),
        source: LeadSource::SpaceCalculator,
        status,
        total_area: 620,
        notes: None,
        created_at: None,
    }
}

/// Published listing with one feature and one image.
pub fn listing(id: &str, code: &str, location: &str, kind: &str) -> Listing {
    Listing {
        id: id.to_string(),
        property_code: code.to_string(),
        title: format!("{kind} space in {location}"),
        kind: kind.to_string(),
        location: location.to_string(),
        area: "5,000 sq.ft".into(),
        price: "₹90/sq.ft".into(),
        features: vec!["Power backup".into()],
        images: vec![format!("https://cdn.example/{id}.jpg")],
        views_range: Some([100, 300]),
        created_at: None,
    }
}
