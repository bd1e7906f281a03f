use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio_test::{assert_pending, assert_ready};

use field_trace_telemetry::{TracerConfig, FieldTracer};

use crate::resolver::{FieldError, Resolved};
use crate::schema::ResolverMap;
use crate::trace::{ResolverTracer, TraceResolversOptions};


use harness::{
    execute, recording_tracer, recording_tracer_with_config, traced_request, untraced_request,
    Selection,
};

fn hello_schema() -> ResolverMap {
    let mut schema = ResolverMap::new();
    schema.declare("Query", "hello", Arc::new(|_| Resolved::ok(json!("world"))));
    schema
}

fn install(schema: ResolverMap, tracer: Arc<FieldTracer>) -> ResolverMap {
    ResolverTracer::new(tracer).install(schema)
}

#[test]
fn resolver_value_passes_through_and_one_span_closes_clean() {
    let (tracer, recorder) = recording_tracer();
    let schema = install(hello_schema(), tracer);
    let request = traced_request();

    let result = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("hello")]).await
    })
    .unwrap();

    assert_eq!(result, json!({"hello": "world"}));
    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "GraphQL hello");
    assert!(!spans[0].in_progress());
    assert!(!spans[0].is_faulted());
}

#[test]
fn synchronous_error_is_rethrown_and_span_is_faulted() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare(
        "Query",
        "throwsSynchronously",
        Arc::new(|_| Resolved::err(FieldError::new("sync boom").with_name("SyncBoom"))),
    );
    let schema = install(schema, tracer);
    let request = traced_request();

    let error = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("throwsSynchronously")]).await
    })
    .unwrap_err();

    assert_eq!(error.message, "sync boom");
    assert_eq!(error.name.as_deref(), Some("SyncBoom"));

    let spans = recorder.spans_named("GraphQL throwsSynchronously");
    assert_eq!(spans.len(), 1);
    assert!(!spans[0].in_progress());
    assert!(spans[0].is_faulted());
    assert_eq!(spans[0].fault.as_ref().unwrap().message, "sync boom");
}

#[test]
fn asynchronous_rejection_faults_the_span_after_settling() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare(
        "Query",
        "throwsAsynchronously",
        Arc::new(|_| {
            Resolved::pending(async { Err(FieldError::new("async boom").with_name("AsyncBoom")) })
        }),
    );
    let schema = install(schema, tracer);
    let request = traced_request();

    let error = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("throwsAsynchronously")]).await
    })
    .unwrap_err();

    assert_eq!(error.message, "async boom");
    assert_eq!(error.name.as_deref(), Some("AsyncBoom"));

    let spans = recorder.spans_named("GraphQL throwsAsynchronously");
    assert_eq!(spans.len(), 1);
    assert!(!spans[0].in_progress());
    assert!(spans[0].is_faulted());
}

#[test]
fn unsettled_resolver_keeps_its_span_in_progress_until_triggered() {
    let (tracer, recorder) = recording_tracer();
    let (trigger, receiver) = tokio::sync::oneshot::channel::<serde_json::Value>();
    let receiver_slot = Mutex::new(Some(receiver));

    let mut schema = ResolverMap::new();
    schema.declare(
        "Query",
        "unresolved",
        Arc::new(move |_| {
            let receiver = receiver_slot
                .lock()
                .unwrap()
                .take()
                .expect("resolver invoked once");
            Resolved::pending(async move {
                receiver
                    .await
                    .map_err(|_| FieldError::new("trigger dropped"))
            })
        }),
    );
    let schema = install(schema, tracer);
    let request = traced_request();
    let selections = [Selection::field("unresolved")];

    let mut task = tokio_test::task::spawn(execute(&schema, &request, &selections));
    assert_pending!(task.poll());

    // The wrapper handed back a pending value; the span is open.
    let spans = recorder.spans_named("GraphQL unresolved");
    assert_eq!(spans.len(), 1);
    assert!(spans[0].in_progress());

    trigger.send(json!("done")).unwrap();
    let result = assert_ready!(task.poll()).unwrap();
    assert_eq!(result, json!({"unresolved": "done"}));

    let spans = recorder.spans_named("GraphQL unresolved");
    assert!(!spans[0].in_progress());
    assert!(!spans[0].is_faulted());
}

#[test]
fn nested_fields_compose_span_names_through_the_path_chain() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare("Query", "parent", Arc::new(|_| Resolved::ok(json!({}))));
    schema.declare("Parent", "name", Arc::new(|_| Resolved::ok(json!("name"))));
    let schema = install(schema, tracer);
    let request = traced_request();

    let result = tokio_test::block_on(async {
        execute(
            &schema,
            &request,
            &[Selection::field("parent")
                .of_type("Parent")
                .with(vec![Selection::field("name")])],
        )
        .await
    })
    .unwrap();

    assert_eq!(result, json!({"parent": {"name": "name"}}));
    let names: Vec<_> = recorder.spans().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, ["GraphQL parent", "GraphQL parent.name"]);
    assert!(recorder.spans().iter().all(|s| !s.is_faulted()));
    assert!(recorder.spans().iter().all(|s| !s.in_progress()));
}

#[test]
fn list_elements_get_index_segments_in_span_names() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare(
        "Query",
        "items",
        Arc::new(|_| Resolved::ok(json!([{"id": 1}, {"id": 2}]))),
    );
    schema.declare(
        "Item",
        "name",
        Arc::new(|ctx| {
            let id = ctx.parent.get("id").cloned().unwrap_or(json!(null));
            Resolved::ok(json!(format!("item-{}", id)))
        }),
    );
    let schema = install(schema, tracer);
    let request = traced_request();

    let result = tokio_test::block_on(async {
        execute(
            &schema,
            &request,
            &[Selection::field("items")
                .of_type("Item")
                .with(vec![Selection::field("name")])],
        )
        .await
    })
    .unwrap();

    assert_eq!(
        result,
        json!({"items": [{"name": "item-1"}, {"name": "item-2"}]})
    );
    let names: Vec<_> = recorder.spans().iter().map(|s| s.name.clone()).collect();
    assert_eq!(
        names,
        [
            "GraphQL items",
            "GraphQL items.0.name",
            "GraphQL items.1.name"
        ]
    );
}

#[test]
fn sibling_spans_open_in_document_order() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare("Query", "first", Arc::new(|_| Resolved::ok(json!(1))));
    schema.declare("Query", "second", Arc::new(|_| Resolved::ok(json!(2))));
    let schema = install(schema, tracer);
    let request = traced_request();

    tokio_test::block_on(async {
        execute(
            &schema,
            &request,
            &[Selection::field("first"), Selection::field("second")],
        )
        .await
    })
    .unwrap();

    let names: Vec<_> = recorder.spans().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, ["GraphQL first", "GraphQL second"]);
}

#[test]
fn undeclared_fields_use_the_default_resolver_and_get_no_span() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare(
        "Query",
        "parent",
        Arc::new(|_| Resolved::ok(json!({"name": "from-parent"}))),
    );
    // Parent.name has no declared resolver; the engine reads it off the
    // parent value.
    let schema = install(schema, tracer);
    let request = traced_request();

    let result = tokio_test::block_on(async {
        execute(
            &schema,
            &request,
            &[Selection::field("parent")
                .of_type("Parent")
                .with(vec![Selection::field("name")])],
        )
        .await
    })
    .unwrap();

    assert_eq!(result, json!({"parent": {"name": "from-parent"}}));
    let names: Vec<_> = recorder.spans().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, ["GraphQL parent"]);
}

#[test]
fn disabled_options_leave_resolvers_untouched() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = hello_schema();
    schema.declare(
        "Query",
        "broken",
        Arc::new(|_| Resolved::err(FieldError::new("still broken"))),
    );
    let schema = ResolverTracer::with_options(tracer, TraceResolversOptions { enabled: false })
        .install(schema);
    let request = traced_request();

    let result = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("hello")]).await
    })
    .unwrap();
    assert_eq!(result, json!({"hello": "world"}));

    let error = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("broken")]).await
    })
    .unwrap_err();
    assert_eq!(error.message, "still broken");

    assert!(recorder.is_empty());
}

#[test]
fn missing_trace_context_runs_resolvers_with_no_span_lifecycle() {
    let (tracer, recorder) = recording_tracer();
    let schema = install(hello_schema(), tracer);
    let request = untraced_request();

    let result = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("hello")]).await
    })
    .unwrap();

    assert_eq!(result, json!({"hello": "world"}));
    assert!(recorder.is_empty());
}

#[test]
fn missing_trace_context_still_propagates_pending_outcomes() {
    let (tracer, recorder) = recording_tracer();
    let mut schema = ResolverMap::new();
    schema.declare(
        "Query",
        "later",
        Arc::new(|_| Resolved::pending(async { Ok(json!("eventually")) })),
    );
    let schema = install(schema, tracer);
    let request = untraced_request();

    let result = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("later")]).await
    })
    .unwrap();

    assert_eq!(result, json!({"later": "eventually"}));
    assert!(recorder.is_empty());
}

#[test]
fn suppressed_backend_records_nothing() {
    let (tracer, recorder) = recording_tracer_with_config(TracerConfig {
        enabled: false,
        ..TracerConfig::default()
    });
    let schema = install(hello_schema(), tracer);
    let request = traced_request();

    let result = tokio_test::block_on(async {
        execute(&schema, &request, &[Selection::field("hello")]).await
    })
    .unwrap();

    assert_eq!(result, json!({"hello": "world"}));
    assert!(recorder.is_empty());
}

#[test]
fn options_default_to_enabled() {
    assert!(TraceResolversOptions::default().enabled);
    let options: TraceResolversOptions = serde_json::from_str("{}").unwrap();
    assert!(options.enabled);
    let options: TraceResolversOptions = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
    assert!(!options.enabled);
}
