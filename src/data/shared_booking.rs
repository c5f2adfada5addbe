use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a bookable reservation window, as handed out by the
/// bookings API. An empty slot means "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TimeSlot {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The reservation the user is still editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub date: Option<NaiveDate>,
    pub time: TimeSlot,
    pub guests: u32,
    pub name: String,
    pub contact: String,
}

impl BookingDraft {
    /// Builds the wire body, or `None` while a required field is still missing.
    /// Guests are carried as-is, zero included.
    pub fn to_request(&self) -> Option<BookingRequest> {
        let date = self.date?;
        if self.time.is_empty() || self.name.is_empty() || self.contact.is_empty() {
            return None;
        }

        Some(BookingRequest {
            date,
            time: self.time.clone(),
            guests: self.guests,
            name: self.name.clone(),
            contact: self.contact.clone(),
        })
    }
}

/// Body of `POST /api/bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub guests: u32,
    pub name: String,
    pub contact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            time: TimeSlot::from("19:00"),
            guests: 2,
            name: "Ana".into(),
            contact: "555-1234".into(),
        }
    }

    #[test]
    fn complete_draft_becomes_request() {
        let request = complete_draft().to_request().expect("request");
        assert_eq!(request.time.as_str(), "19:00");
        assert_eq!(request.guests, 2);
    }

    #[test]
    fn each_required_field_blocks_request() {
        let mut no_date = complete_draft();
        no_date.date = None;
        let mut no_time = complete_draft();
        no_time.time = TimeSlot::default();
        let mut no_name = complete_draft();
        no_name.name.clear();
        let mut no_contact = complete_draft();
        no_contact.contact.clear();

        for draft in [no_date, no_time, no_name, no_contact] {
            assert!(draft.to_request().is_none(), "{draft:?}");
        }
    }

    #[test]
    fn zero_guests_is_allowed() {
        let mut draft = complete_draft();
        draft.guests = 0;
        assert_eq!(draft.to_request().map(|r| r.guests), Some(0));
    }

    #[test]
    fn request_serializes_with_iso_date_and_bare_slot() {
        let json = serde_json::to_value(complete_draft().to_request().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-05-01",
                "time": "19:00",
                "guests": 2,
                "name": "Ana",
                "contact": "555-1234",
            })
        );
    }

    #[test]
    fn slots_keep_order_and_duplicates() {
        let slots: Vec<TimeSlot> = serde_json::from_str(r#"["19:00","18:00","19:00"]"#).unwrap();
        assert_eq!(
            slots,
            vec![TimeSlot::from("19:00"), TimeSlot::from("18:00"), TimeSlot::from("19:00")]
        );
    }
}
