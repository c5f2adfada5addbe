use chrono::NaiveDate;

use super::shared_booking::{BookingDraft, TimeSlot};

/// In-progress input of one form session. Setters replace a single field and
/// never look at the others; everything is checked at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    draft: BookingDraft,
}

impl BookingForm {
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn snapshot(&self) -> BookingDraft {
        self.draft.clone()
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.draft.date = date;
    }

    pub fn set_time(&mut self, time: TimeSlot) {
        self.draft.time = time;
    }

    pub fn set_guests(&mut self, guests: u32) {
        self.draft.guests = guests;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.draft.contact = contact.into();
    }

    /// Resets name, guests and contact. Date and time stay selected.
    pub(crate) fn clear_guest_details(&mut self) {
        self.draft.name.clear();
        self.draft.guests = 0;
        self.draft.contact.clear();
    }
}

/// Guest count typed into a number input; anything that is not a
/// non-negative integer counts as zero.
pub fn parse_guests_input(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}
