//! Manual entry workflow

use crate::app::{dispatch, ControllerHandle};
use crate::components::gallery::ImageGallery;
use crate::view::IntakeView;
use leptos::prelude::*;
use villa_admin_common::{Control, FieldName, GalleryId, Surface};

#[component]
pub fn ManualForm(view: IntakeView, controller: ControllerHandle) -> impl IntoView {
    let saving = move || view.is_busy(&Control::SaveForm);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        dispatch(controller, |c| async move {
            c.save_form().await;
        });
    };

    let rows = FieldName::ALL
        .iter()
        .map(|field| field_row(*field, view, controller))
        .collect_view();

    view! {
        <form id="villaForm" on:submit=on_submit>
            <div class="form-grid">{rows}</div>

            <ImageGallery gallery=GalleryId::Manual view=view controller=controller />

            <div class="form-actions">
                <button type="submit" class="btn-save" disabled=saving>
                    {move || Control::SaveForm.label(saving())}
                </button>
                <button
                    type="button"
                    id="btn-reset-manual"
                    class="btn-reset"
                    on:click=move |_| controller.with_value(|c| c.open_reset_modal())
                >
                    "🗑️ Tout réinitialiser"
                </button>
            </div>
        </form>
    }
}

fn field_row(field: FieldName, view: IntakeView, controller: ControllerHandle) -> impl IntoView {
    let id = field.as_str();
    let class = if field.is_multiline() { "form-group full-width" } else { "form-group" };

    let input = if field.is_multiline() {
        view! {
            <textarea
                id=id
                name=id
                rows="4"
                prop:value=move || view.field(id)
                on:input=move |ev| view.set_field_value(id, &event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                id=id
                name=id
                prop:value=move || view.field(id)
                on:input=move |ev| view.set_field_value(id, &event_target_value(&ev))
            />
        }
        .into_any()
    };

    let ai_button = field.is_enhanceable().then(|| {
        let control = Control::Enhance(id.to_string());
        let busy = {
            let control = control.clone();
            move || view.is_busy(&control)
        };
        let busy_label = busy.clone();
        view! {
            <button
                type="button"
                class="btn-ai"
                data-field=id
                disabled=busy
                on:click=move |_| dispatch(controller, move |c| async move {
                    c.enhance_field(id).await;
                })
            >
                {move || control.label(busy_label())}
            </button>
        }
    });

    view! {
        <div class=class>
            <label for=id>{field.label()}</label>
            {input}
            {ai_button}
        </div>
    }
}
