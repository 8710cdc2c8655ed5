use careflow_core::model::Role;
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExecutionRowVm, map_execution_rows};

#[component]
pub fn MyFlowsView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    if !ctx
        .access()
        .check(session.as_ref(), &[Role::Patient])
        .is_authorized()
    {
        return rsx! {};
    }

    rsx! { ExecutionHistory {} }
}

#[component]
fn ExecutionHistory() -> Element {
    let ctx = use_context::<AppContext>();
    let flows = ctx.flows();
    let session = ctx.session();

    let resource = use_resource(move || {
        let flows = flows.clone();
        let session = session.clone();
        async move {
            let executions = flows
                .fetch(session.as_ref())
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_execution_rows(&executions))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page my-flows",
            h2 { "My forms" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No forms assigned yet." }
                    } else {
                        ul {
                            for row in rows {
                                ExecutionRow { row }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ExecutionRow(row: ExecutionRowVm) -> Element {
    rsx! {
        li { class: "card",
            Link { class: "execution-link", to: Route::FlowExecution { execution_id: row.id },
                span { class: "flow-name", "{row.flow_name}" }
            }
            p {
                span { class: "status-pill", "{row.status_label}" }
                " · {row.progress_percent}%"
            }
        }
    }
}
