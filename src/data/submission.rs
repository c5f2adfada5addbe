use std::time::Duration;

use serde_json::Value;

use super::api::ApiError;
use super::form::BookingForm;
use super::shared_booking::BookingRequest;

pub const VALIDATION_MESSAGE: &str = "Please fill out all required fields!";
pub const SLOT_CONFLICT_MESSAGE: &str = "Booking time slot already booked.";
pub const SUCCESS_MESSAGE_PREFIX: &str = "Booking successful! Your details: ";
pub const DEFAULT_CONFIRMATION_CLOSE: Duration = Duration::from_millis(3000);

/// Outcome of the latest submit attempt. `None` on the session means idle.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Pending,
    Success(Value),
    ValidationFailed(String),
    Rejected(String),
    NetworkError,
}

/// Proof that a request was accepted for sending; hand it back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

/// Auto-close of the confirmation dialog, bound to the submission that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledClose {
    generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    Send(SubmissionTicket, BookingRequest),
    Invalid,
    AlreadyPending,
    /// The API endpoint is not known yet.
    NotReady,
}

/// One mounted booking form: the draft plus everything the submit flow
/// shows to the user.
///
/// Each request sent starts a new generation. Responses and scheduled closes from an older generation are
/// dropped, as is anything arriving after [`BookingSession::teardown`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSession {
    form: BookingForm,
    result: Option<SubmissionResult>,
    message: String,
    error_message: String,
    dialog_open: bool,
    generation: u64,
    confirmation_close: Duration,
    ready: bool,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_CLOSE)
    }
}

impl BookingSession {
    pub fn new(confirmation_close: Duration) -> Self {
        Self {
            form: BookingForm::default(),
            result: None,
            message: String::new(),
            error_message: String::new(),
            dialog_open: false,
            generation: 0,
            confirmation_close,
            ready: false,
        }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.result, Some(SubmissionResult::Pending))
    }

    pub fn set_confirmation_close(&mut self, delay: Duration) {
        self.confirmation_close = delay;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Called once the API configuration has loaded; submits are refused before that.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if !self.ready {
            log::debug!("ignoring submit before the bookings API is configured");
            return SubmitStart::NotReady;
        }
        if self.is_submitting() {
            log::debug!("ignoring submit while a booking request is in flight");
            return SubmitStart::AlreadyPending;
        }

        self.error_message.clear();

        match self.form.snapshot().to_request() {
            Some(request) => {
                self.generation += 1;
                self.result = Some(SubmissionResult::Pending);
                SubmitStart::Send(
                    SubmissionTicket {
                        generation: self.generation,
                    },
                    request,
                )
            }
            None => {
                self.message = VALIDATION_MESSAGE.to_string();
                self.result = Some(SubmissionResult::ValidationFailed(
                    VALIDATION_MESSAGE.to_string(),
                ));
                SubmitStart::Invalid
            }
        }
    }

    /// Applies the booking response. Returns the auto-close to schedule when
    /// the booking went through.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        response: Result<Value, ApiError>,
    ) -> Option<ScheduledClose> {
        if ticket.generation != self.generation {
            log::debug!("dropping booking response for a finished session");
            return None;
        }

        match response {
            Ok(payload) => {
                log::info!("booking accepted");
                self.message = format!("{SUCCESS_MESSAGE_PREFIX}{payload}");
                self.result = Some(SubmissionResult::Success(payload));
                self.dialog_open = true;
                Some(ScheduledClose {
                    generation: self.generation,
                    delay: self.confirmation_close,
                })
            }
            Err(err) if err.is_slot_conflict() => {
                log::info!("booking rejected, slot already taken");
                self.error_message = SLOT_CONFLICT_MESSAGE.to_string();
                self.result = Some(SubmissionResult::Rejected(SLOT_CONFLICT_MESSAGE.to_string()));
                None
            }
            Err(err) => {
                // TODO: surface a generic failure message once product decides on the wording
                log::warn!("booking failed: {err}");
                self.error_message.clear();
                self.result = Some(SubmissionResult::NetworkError);
                None
            }
        }
    }

    /// Closes the dialog and clears name, guests and contact. Returns `false`
    /// without touching anything when a newer submission or teardown has
    /// superseded the one that scheduled `close`.
    pub fn apply_scheduled_close(&mut self, close: ScheduledClose) -> bool {
        if close.generation != self.generation {
            return false;
        }

        self.dialog_open = false;
        self.form.clear_guest_details();
        self.result = None;
        true
    }

    /// Dismisses the dialog early. A pending auto-close still resets the fields.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn teardown(&mut self) {
        self.generation += 1;
        self.dialog_open = false;
    }
}
