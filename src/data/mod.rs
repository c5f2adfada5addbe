pub mod api;
pub mod availability;
pub mod form;
pub mod shared_booking;
pub mod submission;
