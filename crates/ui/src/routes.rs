use careflow_core::model::ExecutionId;
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DashboardView, FlowExecutionView, MyFlowsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/flow-execution/:execution_id", FlowExecutionView)] FlowExecution { execution_id: ExecutionId },
        #[route("/my-flows", MyFlowsView)] MyFlows {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topbar",
                h1 { "Careflow" }
                ul {
                    li { Link { to: Route::Dashboard {}, "Dashboard" } }
                    li { Link { to: Route::MyFlows {}, "My forms" } }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
