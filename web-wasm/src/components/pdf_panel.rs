//! PDF import workflow

use crate::app::{dispatch, ControllerHandle};
use crate::components::gallery::ImageGallery;
use crate::view::IntakeView;
use leptos::prelude::*;
use villa_admin_common::{Control, GalleryId};

#[component]
pub fn PdfPanel(view: IntakeView, controller: ControllerHandle) -> impl IntoView {
    let on_pdf_change = move |_| {
        let file = view
            .pdf_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        // a cancelled file dialog selects nothing
        if file.is_none() {
            return;
        }
        dispatch(controller, move |c| async move {
            c.upload_pdf(file.as_ref()).await;
        });
    };

    let on_save = move |_| {
        dispatch(controller, |c| async move {
            c.save_extracted().await;
        });
    };

    let saving = move || view.is_busy(&Control::SavePdf);

    view! {
        <div class="form-group">
            <label for="pdfUpload">"📄 Brochure PDF"</label>
            <input
                type="file"
                id="pdfUpload"
                accept="application/pdf"
                node_ref=view.pdf_input
                on:change=on_pdf_change
            />
            <p class="text-muted">"L'analyse par IA prend de 30 à 90 secondes."</p>
        </div>

        <Show when=move || view.pdf_status.with(Option::is_some)>
            <div
                id="pdfStatus"
                class=move || view.pdf_status.with(|s| s.as_ref().map(|s| s.css_class()).unwrap_or_default())
            >
                {move || view.pdf_status.with(|s| s.as_ref().map(|s| s.text()).unwrap_or_default())}
            </div>
        </Show>

        <ImageGallery gallery=GalleryId::Pdf view=view controller=controller />

        <button
            type="button"
            id="btn-save-pdf"
            class="btn-save"
            disabled=saving
            on:click=on_save
        >
            {move || Control::SavePdf.label(saving())}
        </button>
    }
}
