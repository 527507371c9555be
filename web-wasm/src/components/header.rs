//! Header component

use crate::app::ControllerHandle;
use leptos::prelude::*;

#[component]
pub fn Header(controller: ControllerHandle) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Administration - Villa"</h1>
            <button
                type="button"
                id="btn-reset"
                class="btn-reset"
                on:click=move |_| controller.with_value(|c| c.open_reset_modal())
            >
                "🗑️ Tout réinitialiser"
            </button>
        </header>
    }
}
