pub mod booking_page;
pub mod confirmation_dialog;
