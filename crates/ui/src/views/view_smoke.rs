use std::sync::Arc;

use careflow_core::dashboard::ActiveForm;
use careflow_core::model::{ExecutionId, ExecutionStatus, FlowExecution};
use careflow_core::time::fixed_now;
use chrono::Duration;
use serde_json::json;
use services::{DenyAll, RoleAccess};
use tokio::time::advance;

use crate::vm::ActiveFormVm;

use super::test_harness::{
    ViewKind, patient_session, setup_view_harness, setup_view_harness_with,
};

fn eligible(name: &str, progress: f64) -> FlowExecution {
    FlowExecution::new(ExecutionId::random(), name, ExecutionStatus::InProgress)
        .with_current_step(json!({ "title": "Allergies" }))
        .with_progress(progress)
        .with_steps(3, 4)
}

fn completed(name: &str) -> FlowExecution {
    FlowExecution::new(ExecutionId::random(), name, ExecutionStatus::Completed)
        .with_current_step(json!({}))
        .with_progress(100.0)
}

fn secs(value: u64) -> std::time::Duration {
    std::time::Duration::from_secs(value)
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_no_forms_for_empty_collection() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Vec::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Hello, Ana!"), "missing greeting in {html}");
    assert!(html.contains("No forms available"), "missing empty state in {html}");
    assert!(!html.contains("Form in progress"), "unexpected active form in {html}");
    assert!(html.contains("View all my forms"), "missing history link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_redirects_to_eligible_execution() {
    let execution = eligible("Pre-op intake", 150.0);
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![execution]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Pre-op intake"), "missing execution page in {html}");
    assert!(html.contains("100%"), "progress not clamped in {html}");
    assert!(html.contains("Back to dashboard"), "missing back link in {html}");
    assert!(
        !html.contains("Welcome to your personal dashboard"),
        "still on dashboard: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_treats_delayed_execution_as_completed() {
    let delayed = eligible("Follow-up", 40.0)
        .with_next_step_available_at(fixed_now() + Duration::hours(6));
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![delayed]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Forms completed"), "missing completed state in {html}");
    assert!(html.contains("View history"), "missing history action in {html}");
    assert!(!html.contains("Back to dashboard"), "unexpected redirect in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_all_completed_for_finished_forms() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![completed("Intake")]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Forms completed"), "missing completed state in {html}");
    assert!(!html.contains("No forms available"), "wrong state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_nothing_without_access() {
    let mut harness = setup_view_harness_with(
        ViewKind::Dashboard,
        vec![eligible("Pre-op intake", 10.0)],
        Some(patient_session()),
        Arc::new(DenyAll),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Hello"), "unexpected greeting in {html}");
    assert!(!html.contains("Pre-op intake"), "unexpected redirect in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_nothing_without_session() {
    let mut harness =
        setup_view_harness_with(ViewKind::Dashboard, Vec::new(), None, Arc::new(RoleAccess));
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Hello"), "unexpected greeting in {html}");
    assert!(!html.contains("No forms available"), "unexpected state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_empty_state_when_provider_fails() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![eligible("Intake", 10.0)]);
    harness.source.fail_next();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No forms available"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn my_flows_lists_every_execution() {
    let done = FlowExecution::new(ExecutionId::random(), "Intake", ExecutionStatus::Completed)
        .with_progress(120.0);
    let paused = FlowExecution::new(ExecutionId::random(), "Follow-up", ExecutionStatus::Paused);
    let mut harness = setup_view_harness(ViewKind::MyFlows, vec![done, paused]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("My forms"), "missing title in {html}");
    assert!(html.contains("Intake"), "missing first row in {html}");
    assert!(html.contains("Follow-up"), "missing second row in {html}");
    assert!(html.contains("100%"), "progress not clamped in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn execution_view_shows_delay_gate() {
    let delayed = eligible("Follow-up", 40.0)
        .with_next_step_available_at(fixed_now() + Duration::hours(1));
    let id = delayed.id();
    let mut harness = setup_view_harness(ViewKind::Execution(id), vec![delayed]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Follow-up"), "missing flow name in {html}");
    assert!(
        html.contains("Next step available at 2023-11-14 23:13 UTC"),
        "missing delay notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn execution_view_handles_unknown_id() {
    let mut harness = setup_view_harness(
        ViewKind::Execution(ExecutionId::random()),
        vec![eligible("Intake", 10.0)],
    );
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("This form is no longer available."),
        "missing fallback in {html}"
    );
}

#[tokio::test(start_paused = true)]
async fn dashboard_poll_picks_up_new_execution_after_thirty_seconds() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![completed("Intake")]);
    harness.settle().await;
    assert!(harness.render().contains("Forms completed"));
    assert_eq!(harness.source.fetch_count(), 1);

    harness.source.replace(vec![eligible("Pre-op intake", 60.0)]);
    advance(secs(29)).await;
    harness.drive_until_idle().await;
    let html = harness.render();
    assert_eq!(harness.source.fetch_count(), 1, "refetched before the interval");
    assert!(html.contains("Forms completed"), "state changed early: {html}");

    advance(secs(2)).await;
    harness.drive_until_idle().await;
    let html = harness.render();
    assert_eq!(harness.source.fetch_count(), 2);
    assert!(html.contains("Back to dashboard"), "no redirect after poll: {html}");
    assert!(html.contains("Pre-op intake"), "missing execution page in {html}");
}

#[tokio::test(start_paused = true)]
async fn dashboard_redirects_once_per_execution_across_polls() {
    let first = eligible("Pre-op intake", 60.0);
    let first_id = first.id();
    let mut harness = setup_view_harness(ViewKind::PinnedDashboard, vec![first.clone()]);
    harness.settle().await;
    assert_eq!(harness.handles.dashboard.redirects(), vec![first_id]);
    assert!(harness.render().contains("Back to dashboard"));

    // Same execution comes back on the next poll.
    advance(secs(30)).await;
    harness.drive_until_idle().await;
    assert_eq!(harness.source.fetch_count(), 2);
    assert_eq!(harness.handles.dashboard.redirects(), vec![first_id]);

    let second = eligible("Follow-up", 10.0);
    let second_id = second.id();
    harness.source.replace(vec![second, first]);
    advance(secs(30)).await;
    harness.drive_until_idle().await;
    assert_eq!(harness.source.fetch_count(), 3);
    assert_eq!(
        harness.handles.dashboard.redirects(),
        vec![first_id, second_id]
    );
}

#[tokio::test(start_paused = true)]
async fn dashboard_keeps_last_snapshot_when_refresh_fails() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![completed("Intake")]);
    harness.settle().await;
    assert!(harness.render().contains("Forms completed"));

    harness.source.fail_next();
    advance(secs(30)).await;
    harness.drive_until_idle().await;
    let html = harness.render();
    assert_eq!(harness.source.fetch_count(), 2);
    assert!(html.contains("Forms completed"), "snapshot dropped: {html}");
    assert!(!html.contains("No forms available"), "failure shown as empty: {html}");

    advance(secs(30)).await;
    harness.drive_until_idle().await;
    assert_eq!(harness.source.fetch_count(), 3);
    assert!(harness.render().contains("Forms completed"));
}

#[tokio::test(flavor = "current_thread")]
async fn active_form_card_renders_progress_and_continue_link() {
    let execution = eligible("Pre-op intake", 150.0);
    let id = execution.id();
    let card = ActiveFormVm::from(&ActiveForm::new(execution));
    let mut harness = setup_view_harness(ViewKind::ActiveForm(card), Vec::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Form in progress"), "missing title in {html}");
    assert!(html.contains("Pre-op intake"), "missing flow name in {html}");
    assert!(html.contains("100%"), "progress not clamped in {html}");
    assert!(html.contains("width: 100%"), "missing bar width in {html}");
    assert!(html.contains("In progress"), "missing status in {html}");
    assert!(html.contains("3 of 4 steps"), "missing steps in {html}");
    assert!(html.contains("Continue form"), "missing continue action in {html}");
    assert!(
        html.contains(&format!("href=\"/flow-execution/{id}\"")),
        "continue does not target the execution: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn completed_card_links_to_history() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, vec![completed("Intake")]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("View history"), "missing history action in {html}");
    assert!(html.contains("href=\"/my-flows\""), "missing history target in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn execution_view_follows_id_changes() {
    let first = eligible("Pre-op intake", 20.0);
    let second = eligible("Follow-up", 80.0);
    let second_id = second.id();
    let mut harness = setup_view_harness(
        ViewKind::SelectableExecution(first.id()),
        vec![first, second],
    );
    harness.settle().await;
    assert!(harness.render().contains("Pre-op intake"));

    harness.handles.select(second_id);
    harness.drive_until_idle().await;
    let html = harness.render();
    assert!(html.contains("Follow-up"), "details not refetched: {html}");
    assert!(!html.contains("Pre-op intake"), "stale details in {html}");
}
