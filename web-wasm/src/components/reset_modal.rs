//! Reset confirmation modal
//!
//! Clicking the backdrop closes it; clicks inside the dialog do not.

use crate::app::{dispatch, ControllerHandle};
use crate::view::IntakeView;
use leptos::prelude::*;
use villa_admin_common::{Control, CONFIRMATION_PHRASE};

#[component]
pub fn ResetModal(view: IntakeView, controller: ControllerHandle) -> impl IntoView {
    let resetting = move || view.is_busy(&Control::ConfirmReset);

    let on_backdrop = move |ev: leptos::ev::MouseEvent| {
        if ev.target() == ev.current_target() {
            controller.with_value(|c| c.close_reset_modal());
        }
    };

    let on_confirm = move |_| {
        dispatch(controller, |c| async move {
            c.confirm_reset().await;
        });
    };

    view! {
        <div
            id="resetModal"
            class=move || if view.reset_open.get() { "modal active" } else { "modal" }
            on:click=on_backdrop
        >
            <div class="modal-content">
                <h2>"⚠️ Réinitialisation complète"</h2>
                <p>"Toutes les données de la villa et toutes les images seront définitivement supprimées."</p>
                <p>"Tapez " <strong>{CONFIRMATION_PHRASE}</strong> " pour confirmer :"</p>
                <input
                    type="text"
                    id="confirmInput"
                    autocomplete="off"
                    node_ref=view.reset_input
                    prop:value=move || view.reset_phrase.get()
                    on:input=move |ev| view.reset_phrase.set(event_target_value(&ev))
                />
                <div class="modal-actions">
                    <button
                        type="button"
                        id="cancel-reset-btn"
                        class="btn-cancel"
                        on:click=move |_| controller.with_value(|c| c.close_reset_modal())
                    >
                        "Annuler"
                    </button>
                    <button
                        type="button"
                        id="confirm-reset-btn"
                        class="btn-danger"
                        disabled=resetting
                        on:click=on_confirm
                    >
                        {move || Control::ConfirmReset.label(resetting())}
                    </button>
                </div>
            </div>
        </div>
    }
}
