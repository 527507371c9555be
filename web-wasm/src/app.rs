//! Main application component

use crate::api::FetchTransport;
use crate::components::{
    header::Header, manual_form::ManualForm, mode_switch::ModeSwitch, pdf_panel::PdfPanel,
    reset_modal::ResetModal,
};
use crate::view::IntakeView;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::rc::Rc;
use gloo::console;
use villa_admin_common::{IntakeController, Mode, Outcome};

pub type Controller = IntakeController<FetchTransport, IntakeView>;

/// Copyable handle the components capture in their event handlers
pub type ControllerHandle = StoredValue<Rc<Controller>, LocalStorage>;

/// Run a controller action off the event handler
pub fn dispatch<F, Fut>(controller: ControllerHandle, action: F)
where
    F: FnOnce(Rc<Controller>) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let controller = controller.get_value();
    spawn_local(action(controller));
}

/// Workflow the page opens on: `<body data-mode="pdf">`, manual otherwise
fn initial_mode() -> Mode {
    gloo::utils::body()
        .get_attribute("data-mode")
        .map(|raw| Mode::from(raw.as_str()))
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let mode = initial_mode();
    let view = IntakeView::new(mode);
    let controller: ControllerHandle =
        StoredValue::new_local(Rc::new(IntakeController::new(FetchTransport::new(), view, mode)));

    // pre-fill from the persisted listing
    dispatch(controller, |c| async move {
        if let Outcome::NetworkError(error) = c.load_listing().await {
            console::warn!("listing unavailable:", error);
        }
    });

    view! {
        <div class="container">
            <Header controller=controller />

            <ModeSwitch view=view controller=controller />

            <div id=Mode::Pdf.panel_id() class=move || panel_class(view.mode.get() == Mode::Pdf)>
                <PdfPanel view=view controller=controller />
            </div>

            <div id=Mode::Manual.panel_id() class=move || panel_class(view.mode.get() == Mode::Manual)>
                <ManualForm view=view controller=controller />
            </div>

            <ResetModal view=view controller=controller />
        </div>
    }
}

fn panel_class(active: bool) -> &'static str {
    if active {
        "mode-content active"
    } else {
        "mode-content"
    }
}
