//! CSV export of the triage collections.
//!
//! Each collection exports with a fixed column order; timestamps are
//! RFC 3339. Free-form text (messages) goes last so truncated previews in
//! spreadsheet tools keep the identifying columns visible.

use std::io::Write;

use neurolab_core::{Contact, PartnerRequest, WhitelistEntry};
use thiserror::Error;

/// Errors that can occur while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization or underlying I/O failed.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write partner requests as CSV.
///
/// Columns: id, company, contact, email, phone, website, business type,
/// status, created at, message.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_partner_requests<W: Write>(
    out: W,
    requests: &[PartnerRequest],
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "id",
        "company_name",
        "contact_person",
        "email",
        "phone",
        "website",
        "business_type",
        "status",
        "created_at",
        "message",
    ])?;

    for request in requests {
        let created_at = request.created_at.to_rfc3339();
        writer.write_record([
            request.id.as_str(),
            request.company_name.as_str(),
            request.contact_person.as_str(),
            request.email.as_str(),
            request.phone.as_str(),
            request.website.as_str(),
            request.business_type.as_str(),
            request.status.as_str(),
            created_at.as_str(),
            request.message.as_str(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write contact messages as CSV.
///
/// Columns: id, name, email, subject, created at, message.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_contacts<W: Write>(out: W, contacts: &[Contact]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["id", "name", "email", "subject", "created_at", "message"])?;

    for contact in contacts {
        let created_at = contact.created_at.to_rfc3339();
        writer.write_record([
            contact.id.as_str(),
            contact.name.as_str(),
            contact.email.as_str(),
            contact.subject.as_str(),
            created_at.as_str(),
            contact.message.as_str(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write whitelist entries as CSV.
///
/// Columns: id, email, registered flag, created at.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_whitelist<W: Write>(out: W, entries: &[WhitelistEntry]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["id", "email", "is_registered", "created_at"])?;

    for entry in entries {
        let created_at = entry.created_at.to_rfc3339();
        writer.write_record([
            entry.id.as_str(),
            entry.email.as_str(),
            if entry.is_registered { "true" } else { "false" },
            created_at.as_str(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use neurolab_core::{Email, RequestId, RequestStatus, WhitelistId};

    use super::*;

    #[test]
    fn test_whitelist_export() {
        let entries = vec![WhitelistEntry {
            id: WhitelistId::new("w1"),
            email: Email::parse("a@b.c").unwrap(),
            is_registered: true,
            created_at: Utc.with_ymd_and_hms(2025, 4, 3, 9, 0, 0).unwrap(),
        }];

        let mut out = Vec::new();
        write_whitelist(&mut out, &entries).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "id,email,is_registered,created_at");
        assert_eq!(
            lines.next().unwrap(),
            "w1,a@b.c,true,2025-04-03T09:00:00+00:00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_partner_request_export_quotes_free_text() {
        let requests = vec![PartnerRequest {
            id: RequestId::new("r1"),
            company_name: "Acme, Inc".to_owned(),
            contact_person: "Jane Doe".to_owned(),
            email: Email::parse("jane@acme.example").unwrap(),
            phone: "+1 555 0100".to_owned(),
            website: "https://acme.example".to_owned(),
            business_type: "Robotics".to_owned(),
            message: "Line one\nline two".to_owned(),
            status: RequestStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
        }];

        let mut out = Vec::new();
        write_partner_requests(&mut out, &requests).unwrap();

        let text = String::from_utf8(out).unwrap();
        // Comma-bearing and multi-line fields come out quoted.
        assert!(text.contains("\"Acme, Inc\""));
        assert!(text.contains("\"Line one\nline two\""));
        assert!(text.starts_with("id,company_name,contact_person,email,"));
    }

    #[test]
    fn test_empty_collection_exports_header_only() {
        let mut out = Vec::new();
        write_contacts(&mut out, &[]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), "id,name,email,subject,created_at,message");
    }
}
