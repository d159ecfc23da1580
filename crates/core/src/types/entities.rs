//! Triage entities as served by the Neurolab backend.
//!
//! Field names follow the backend's JSON wire format (camelCase, with the
//! identifier in `_id`). All three collections are owned by the backend;
//! the console holds cached copies that are reconciled after every
//! confirmed mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{ContactId, RequestId, WhitelistId};
use super::status::RequestStatus;

/// A partnership application submitted through the public site form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequest {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: RequestId,
    /// Applying company's name.
    pub company_name: String,
    /// Name of the person submitting the application.
    pub contact_person: String,
    /// Contact email address.
    pub email: Email,
    /// Contact phone number, as entered.
    pub phone: String,
    /// Company website, as entered.
    pub website: String,
    /// Free-form business category.
    pub business_type: String,
    /// Application message body.
    pub message: String,
    /// Review status.
    pub status: RequestStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// A message submitted through the public contact form.
///
/// Read-only in the console: contacts are created externally and only
/// browsed by admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: ContactId,
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: Email,
    /// Message subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// An email address pre-authorized to register an admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistEntry {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: WhitelistId,
    /// The whitelisted address (unique server-side).
    pub email: Email,
    /// Whether the address has completed admin registration.
    pub is_registered: bool,
    /// Time the address was whitelisted.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_request_wire_format() {
        let json = r#"{
            "_id": "64fa0c2e9d1b4a0012ab34cd",
            "companyName": "Acme Corp",
            "contactPerson": "Jane Doe",
            "email": "jane@acme.example",
            "phone": "+1 555 0100",
            "website": "https://acme.example",
            "businessType": "Robotics",
            "message": "We would like to partner.",
            "status": "pending",
            "createdAt": "2025-04-02T10:15:30.000Z"
        }"#;

        let request: PartnerRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id.as_str(), "64fa0c2e9d1b4a0012ab34cd");
        assert_eq!(request.company_name, "Acme Corp");
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.email.as_str(), "jane@acme.example");
    }

    #[test]
    fn test_contact_wire_format() {
        let json = r#"{
            "_id": "64fa0d119d1b4a0012ab34ce",
            "name": "Sam Lee",
            "email": "sam@example.com",
            "subject": "Support",
            "message": "Hello",
            "createdAt": "2025-04-03T08:00:00.000Z"
        }"#;

        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.subject, "Support");
    }

    #[test]
    fn test_whitelist_entry_wire_format() {
        let json = r#"{
            "_id": "64fa0e229d1b4a0012ab34cf",
            "email": "new-admin@neurolab.app",
            "isRegistered": false,
            "createdAt": "2025-04-04T12:30:00.000Z"
        }"#;

        let entry: WhitelistEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_registered);
        assert_eq!(entry.email.as_str(), "new-admin@neurolab.app");
    }

    #[test]
    fn test_serialize_round_trips_field_names() {
        let entry = WhitelistEntry {
            id: WhitelistId::new("abc"),
            email: Email::parse("a@b.c").unwrap(),
            is_registered: true,
            created_at: "2025-04-04T12:30:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["isRegistered"], true);
        assert!(value.get("is_registered").is_none());
    }
}
