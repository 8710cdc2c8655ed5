use careflow_core::dashboard::find_available;
use careflow_core::model::{FlowExecution, Role};
use careflow_core::redirect::RedirectTracker;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::poll_every;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, is_loading};
use crate::vm::{ActiveFormVm, DashboardCardVm, map_dashboard};

#[cfg(test)]
use careflow_core::model::ExecutionId;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Patient landing page. Renders nothing for users without the patient role.
#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    let decision = ctx.access().check(session.as_ref(), &[Role::Patient]);

    if !decision.is_authorized() {
        tracing::debug!("dashboard: access denied, rendering nothing");
        return rsx! {};
    }

    rsx! { PatientDashboard {} }
}

#[component]
fn PatientDashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    let flows = ctx.flows();
    let navigator = use_navigator();

    // Last successful fetch. A failed refresh leaves it untouched.
    let snapshot = use_signal(|| None::<Vec<FlowExecution>>);

    let resource = use_resource({
        let flows = ctx.flows();
        let session = session.clone();
        move || {
            let flows = flows.clone();
            let session = session.clone();
            async move {
                let executions = flows
                    .fetch(session.as_ref())
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                let mut snapshot = snapshot;
                snapshot.set(Some(executions));
                Ok::<_, ViewError>(())
            }
        }
    });

    // Fixed-interval refresh; the future is dropped with the component.
    let poll_interval = ctx.poll_interval();
    use_future(move || async move {
        poll_every(poll_interval, move || {
            let mut resource = resource;
            resource.restart();
        })
        .await;
    });

    #[cfg(test)]
    let test_handles = try_consume_context::<DashboardTestHandles>();

    let mut tracker = use_signal(RedirectTracker::new);
    let flows_for_redirect = ctx.flows();
    use_effect(move || {
        let loading = is_loading(&resource);
        let eligible = snapshot
            .read()
            .as_deref()
            .and_then(|executions| find_available(executions, flows_for_redirect.now()))
            .map(FlowExecution::id);

        match tracker.write().evaluate(loading, eligible) {
            Some(execution_id) => {
                tracing::info!(%execution_id, "redirecting to available execution");
                #[cfg(test)]
                {
                    if let Some(handles) = &test_handles {
                        handles.record(execution_id);
                    }
                }
                navigator.push(Route::FlowExecution { execution_id });
            }
            None => {
                tracing::debug!(loading, ?eligible, "no redirect");
            }
        }
    });

    let executions = snapshot.read().clone();
    let state = flows.dashboard_state(executions.as_deref());
    let vm = map_dashboard(session.as_ref(), &state);

    rsx! {
        div { class: "page dashboard",
            section { class: "greeting",
                h2 { "{vm.greeting}" }
                p { class: "muted",
                    "Welcome to your personal dashboard. Here you can open your forms and follow your progress."
                }
            }

            match vm.card {
                DashboardCardVm::NoForms => rsx! { NoFormsCard {} },
                DashboardCardVm::InProgress(card) => rsx! { ActiveFormCard { card } },
                DashboardCardVm::AllCompleted => rsx! { CompletedCard {} },
            }

            div { class: "card",
                Link { class: "all-forms-link", to: Route::MyFlows {}, "View all my forms" }
            }
        }
    }
}

#[component]
fn NoFormsCard() -> Element {
    rsx! {
        div { class: "card empty no-forms",
            h3 { "No forms available" }
            p { "You have no forms assigned yet. New forms may arrive soon." }
            p { class: "muted", "Please wait or contact the clinic for more information." }
        }
    }
}

#[component]
pub(crate) fn ActiveFormCard(card: ActiveFormVm) -> Element {
    let execution_id = card.execution_id;
    let bar_style = card.bar_style();

    rsx! {
        div { class: "card active-form",
            div { class: "card-header",
                h3 { "Form in progress" }
                h4 { class: "flow-name", "{card.flow_name}" }
                div { class: "progress-value", "{card.progress_percent}%" }
            }
            div { class: "card-meta",
                span { class: "status-pill", "{card.status_label}" }
                span { class: "muted", "{card.steps_label}" }
            }
            div { class: "progress-track",
                div { class: "progress-bar", style: "{bar_style}" }
            }
            Link { class: "primary", to: Route::FlowExecution { execution_id }, "Continue form" }
        }
    }
}

#[component]
fn CompletedCard() -> Element {
    rsx! {
        div { class: "card empty all-completed",
            h3 { "Forms completed" }
            p { "You have completed every active form. New forms may be available soon." }
            Link { class: "outline", to: Route::MyFlows {}, "View history" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct DashboardTestHandles {
    redirects: Rc<RefCell<Vec<ExecutionId>>>,
}

#[cfg(test)]
impl DashboardTestHandles {
    fn record(&self, execution_id: ExecutionId) {
        self.redirects.borrow_mut().push(execution_id);
    }

    pub(crate) fn redirects(&self) -> Vec<ExecutionId> {
        self.redirects.borrow().clone()
    }
}
