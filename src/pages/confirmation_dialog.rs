use leptos::html::Dialog;
use leptos::prelude::*;

use crate::data::submission::BookingSession;
use crate::utils::date::format_display_date;

#[component]
pub fn ConfirmationDialog(session: RwSignal<BookingSession>) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();

    // keep the native modal in step with the session
    Effect::new(move |_| {
        let open = session.with(BookingSession::dialog_open);
        let Some(dialog) = dialog_ref.get() else {
            return;
        };

        if open && !dialog.open() {
            if let Err(err) = dialog.show_modal() {
                leptos::logging::error!("failed to open confirmation dialog: {:?}", err);
            }
        } else if !open && dialog.open() {
            dialog.close();
        }
    });

    let detail = move |label: &'static str, value: Signal<String>| {
        view! {
            <p class="text-base text-gray-800">
                <strong class="mr-1">{label}</strong>
                {move || value.get()}
            </p>
        }
    };

    let draft_field = move |read: fn(&BookingSession) -> String| Signal::derive(move || session.with(read));

    view! {
        <dialog
            node_ref=dialog_ref
            class="rounded-lg shadow-xl p-6 w-full max-w-md backdrop:bg-black/40"
            on:close=move |_| session.update(|s| s.close_dialog())
        >
            <h3 class="text-2xl font-semibold text-green-600 mb-3">Booked Successfully!</h3>
            <p class="text-xl mb-2">Booking Details</p>
            {detail("Name:", draft_field(|s| s.form().draft().name.clone()))}
            {detail("Guests:", draft_field(|s| s.form().draft().guests.to_string()))}
            {detail("Phone:", draft_field(|s| s.form().draft().contact.clone()))}
            {detail("Date:", draft_field(|s| format_display_date(s.form().draft().date)))}
            {detail("Time Slot:", draft_field(|s| s.form().draft().time.to_string()))}
            <p class="mt-3 text-xs text-gray-500 break-all">{move || session.with(|s| s.message().to_string())}</p>
            <div class="mt-4 flex justify-end">
                <button
                    class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700"
                    on:click=move |_| session.update(|s| s.close_dialog())
                >
                    Close
                </button>
            </div>
        </dialog>
    }
}
