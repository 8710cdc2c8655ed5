use careflow_core::model::{ExecutionId, Role};
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExecutionDetailVm, map_execution_detail};

#[component]
pub fn FlowExecutionView(execution_id: ExecutionId) -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    if !ctx
        .access()
        .check(session.as_ref(), &[Role::Patient])
        .is_authorized()
    {
        return rsx! {};
    }

    rsx! { ExecutionDetails { execution_id } }
}

#[component]
fn ExecutionDetails(execution_id: ExecutionId) -> Element {
    let ctx = use_context::<AppContext>();
    let flows = ctx.flows();
    let session = ctx.session();

    // Reruns when the router reuses this component for another execution id.
    let resource = use_resource(use_reactive!(|(execution_id)| {
        let flows = flows.clone();
        let session = session.clone();
        async move {
            let execution = flows
                .get(session.as_ref(), execution_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(
                execution.map(|execution| map_execution_detail(&execution, flows.now())),
            )
        }
    }));

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page execution",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(Some(detail)) => rsx! {
                    ExecutionCard { detail }
                },
                ViewState::Ready(None) => rsx! {
                    p { "This form is no longer available." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
            Link { class: "back-link", to: Route::Dashboard {}, "Back to dashboard" }
        }
    }
}

#[component]
fn ExecutionCard(detail: ExecutionDetailVm) -> Element {
    rsx! {
        div { class: "card",
            h2 { class: "flow-name", "{detail.flow_name}" }
            p {
                span { class: "status-pill", "{detail.status_label}" }
                " · {detail.steps_label} · {detail.progress_percent}%"
            }
            if let Some(at) = detail.available_at_str.clone() {
                p { class: "muted delay", "Next step available at {at}" }
            }
        }
    }
}
