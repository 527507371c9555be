//! Image gallery component

use crate::app::{dispatch, ControllerHandle};
use crate::view::IntakeView;
use leptos::prelude::*;
use villa_admin_common::{GalleryId, GalleryItem};
use web_sys::File;

/// Files currently selected in an input
fn selected_files(input: &web_sys::HtmlInputElement) -> Vec<File> {
    input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

#[component]
pub fn ImageGallery(gallery: GalleryId, view: IntakeView, controller: ControllerHandle) -> impl IntoView {
    let input_ref = view.images_input(gallery);
    let input_id = match gallery {
        GalleryId::Pdf => "imageUploadPDF",
        GalleryId::Manual => "imageUploadManual",
    };

    let on_change = move |_| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let files = selected_files(&input);
        if files.is_empty() {
            return;
        }
        dispatch(controller, move |c| async move {
            c.upload_images(&files, gallery).await;
        });
    };

    view! {
        <div class="form-group">
            <label for=input_id>"📸 Photos de la villa"</label>
            <input
                type="file"
                id=input_id
                accept="image/png,image/jpeg,image/webp"
                multiple=true
                node_ref=input_ref
                on:change=on_change
            />
            <div id=gallery.dom_id() class="image-gallery">
                <For
                    each=move || view.gallery(gallery).get()
                    key=|item| item.filename.clone()
                    children=move |item| view! { <GalleryImage item=item controller=controller /> }
                />
            </div>
        </div>
    }
}

#[component]
fn GalleryImage(item: GalleryItem, controller: ControllerHandle) -> impl IntoView {
    let filename = item.filename.clone();
    let on_delete = move |_| {
        let filename = filename.clone();
        dispatch(controller, move |c| async move {
            c.delete_image(&filename).await;
        });
    };

    view! {
        <div class="image-item" data-filename=item.filename.clone()>
            <img src=item.url() alt="Villa Marrakech" />
            <button type="button" class="btn-delete" on:click=on_delete>"×"</button>
        </div>
    }
}
