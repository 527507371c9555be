//! Workflow selector

use crate::app::ControllerHandle;
use crate::view::IntakeView;
use leptos::prelude::*;
use villa_admin_common::Mode;

#[component]
pub fn ModeSwitch(view: IntakeView, controller: ControllerHandle) -> impl IntoView {
    let option = move |mode: Mode, icon: &'static str, title: &'static str, hint: &'static str| {
        view! {
            <div
                id=mode.selector_id()
                class=move || if view.mode.get() == mode { "mode-option active" } else { "mode-option" }
                on:click=move |_| controller.with_value(|c| c.switch_mode(mode))
            >
                <div class="mode-icon">{icon}</div>
                <h3>{title}</h3>
                <p class="text-muted">{hint}</p>
            </div>
        }
    };

    view! {
        <div class="mode-selector">
            {option(Mode::Pdf, "📄", "Import PDF", "L'IA extrait les informations de la brochure")}
            {option(Mode::Manual, "✍️", "Saisie manuelle", "Remplir le formulaire champ par champ")}
        </div>
    }
}
