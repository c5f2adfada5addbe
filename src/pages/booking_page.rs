use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::data::api::{BookingApi, HttpBookingApi};
use crate::data::availability::load_available_slots;
use crate::data::form::parse_guests_input;
use crate::data::shared_booking::TimeSlot;
use crate::data::submission::{BookingSession, ScheduledClose, SubmissionResult, SubmitStart};
use crate::pages::confirmation_dialog::ConfirmationDialog;
use crate::settings::{Settings, DEFAULT_API_BASE_URL};
use crate::utils::date::{format_date_input, parse_date_input};

#[server(GetBookingConfig)]
pub async fn get_booking_config() -> Result<Settings, ServerFnError> {
    use leptos::server_fn::error::NoCustomError;

    Settings::load("settings.yaml")
        .map_err(|e| ServerFnError::<NoCustomError>::ServerError(e.to_string()))
}

#[component]
pub fn BookingPage() -> impl IntoView {
    let session = RwSignal::new(BookingSession::default());
    let (api_base, set_api_base) = signal(DEFAULT_API_BASE_URL.to_string());
    let (available_slots, set_available_slots) = signal(Vec::<TimeSlot>::new());
    let (slots_loading, set_slots_loading) = signal(true);
    let close_timer = StoredValue::new(None::<TimeoutHandle>);

    #[cfg(not(feature = "ssr"))]
    leptos::task::spawn_local(async move {
        let settings = match get_booking_config().await {
            Ok(settings) => settings,
            Err(err) => {
                leptos::logging::warn!("Using default booking config: {:?}", err);
                Settings::default()
            }
        };
        let api = HttpBookingApi::new(settings.api_base_url.clone());
        set_api_base.try_set(settings.api_base_url.clone());
        session.try_update(|s| {
            s.set_confirmation_close(settings.confirmation_close());
            s.mark_ready();
        });

        let slots = load_available_slots(&api).await;
        set_available_slots.try_set(slots);
        set_slots_loading.try_set(false);
    });

    let schedule_close = move |close: ScheduledClose| {
        let handle = set_timeout_with_handle(
            move || {
                session.try_update(|s| s.apply_scheduled_close(close));
            },
            close.delay,
        );
        match handle {
            Ok(handle) => {
                close_timer.try_update_value(|timer| *timer = Some(handle));
            }
            Err(err) => leptos::logging::error!("failed to schedule dialog close: {:?}", err),
        }
    };

    on_cleanup(move || {
        session.try_update(|s| s.teardown());
        if let Some(Some(handle)) = close_timer.try_get_value() {
            handle.clear();
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let Some(SubmitStart::Send(ticket, request)) = session.try_update(|s| s.begin_submit())
        else {
            return;
        };

        let api = HttpBookingApi::new(api_base.get_untracked());
        leptos::task::spawn_local(async move {
            let response = api.create_booking(&request).await;
            if let Some(Some(close)) = session.try_update(|s| s.finish_submit(ticket, response)) {
                schedule_close(close);
            }
        });
    };

    let is_submitting = move || session.with(BookingSession::is_submitting);
    let submit_disabled = move || !session.with(BookingSession::is_ready) || is_submitting();

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center p-4 w-full">
            <div class="max-w-xl w-full shadow-lg rounded-lg p-6 bg-white">
                <h2 class="text-3xl font-bold text-gray-800 text-center mb-6">Restaurant Table Bookings</h2>

                <form class="flex flex-col gap-3" on:submit=handle_submit>
                    <label for="date" class="text-sm font-medium text-gray-700">Select Date</label>
                    <input
                        id="date"
                        type="date"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        prop:value=move || session.with(|s| format_date_input(s.form().draft().date))
                        on:input=move |ev| {
                            let date = parse_date_input(&event_target_value(&ev));
                            session.update(|s| s.form_mut().set_date(date));
                        }
                    />

                    <select
                        class="w-full px-3 py-2 border border-gray-300 rounded-md bg-white"
                        prop:value=move || session.with(|s| s.form().draft().time.to_string())
                        on:change=move |ev| {
                            let slot = TimeSlot::from(event_target_value(&ev));
                            session.update(|s| s.form_mut().set_time(slot));
                        }
                    >
                        <option value="" disabled>
                            {move || if slots_loading.get() { "Loading time slots..." } else { "Select a time slot" }}
                        </option>
                        {move || {
                            available_slots
                                .get()
                                .into_iter()
                                .map(|slot| {
                                    let value = slot.to_string();
                                    let label = value.clone();
                                    view! { <option value=value>{label}</option> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>

                    <label for="guests" class="text-sm font-medium text-gray-700">Number of Guests</label>
                    <input
                        id="guests"
                        type="number"
                        min="0"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                        prop:value=move || session.with(|s| s.form().draft().guests.to_string())
                        on:input=move |ev| {
                            let guests = parse_guests_input(&event_target_value(&ev));
                            session.update(|s| s.form_mut().set_guests(guests));
                        }
                    />

                    <input
                        type="text"
                        required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Name"
                        prop:value=move || session.with(|s| s.form().draft().name.clone())
                        on:input=move |ev| session.update(|s| s.form_mut().set_name(event_target_value(&ev)))
                    />

                    <input
                        type="text"
                        required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md"
                        placeholder="Contact Details"
                        prop:value=move || session.with(|s| s.form().draft().contact.clone())
                        on:input=move |ev| session.update(|s| s.form_mut().set_contact(event_target_value(&ev)))
                    />

                    <button
                        type="submit"
                        class="w-full px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50 transition-colors"
                        disabled=submit_disabled
                    >
                        {move || if is_submitting() { "Booking..." } else { "Book Now" }}
                    </button>
                </form>

                {move || session.with(|s| match s.result() {
                    Some(SubmissionResult::ValidationFailed(reason)) => view! {
                        <p class="mt-3 text-center text-amber-600">{reason.clone()}</p>
                    }.into_any(),
                    _ if !s.error_message().is_empty() => view! {
                        <p class="mt-3 text-center text-red-600">{s.error_message().to_string()}</p>
                    }.into_any(),
                    _ => view! { <p class="hidden"></p> }.into_any(),
                })}
            </div>

            <ConfirmationDialog session=session />
        </div>
    }
}
