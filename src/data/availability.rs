use super::api::BookingApi;
use super::shared_booking::TimeSlot;

/// Loads the bookable slots once. Any failure degrades to an empty list so the
/// rest of the form keeps working; there is no retry.
pub async fn load_available_slots<A: BookingApi>(api: &A) -> Vec<TimeSlot> {
    match api.fetch_availability().await {
        Ok(slots) => {
            log::info!("loaded {} available time slots", slots.len());
            slots
        }
        Err(err) => {
            log::warn!("Error fetching availability: {err}");
            Vec::new()
        }
    }
}
