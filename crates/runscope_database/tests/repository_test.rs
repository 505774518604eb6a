use runscope_core::{RunFilter, UNKNOWN_USER};
use runscope_database::{BackendConfig, MonitorRepository, SupabaseClient, TableQuery};
use runscope_error::BackendErrorKind;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repository(server: &MockServer) -> MonitorRepository {
    let config = BackendConfig::default()
        .with_url(server.uri())
        .with_service_key("service-key");
    MonitorRepository::new(SupabaseClient::new(&config), &config)
}

fn run_row(id: &str, user_id: Option<&str>, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": user_id,
        "name": null,
        "initial_query": "oat milk",
        "status": "SUCCESS",
        "is_reviewed": false,
        "is_flagged": false,
        "created_at": created_at
    })
}

fn step_row(number: i32, input: serde_json::Value) -> serde_json::Value {
    json!({
        "id": format!("s{number}"),
        "run_id": "r1",
        "step_number": number,
        "step_name": format!("stage {number}"),
        "input_data": input,
        "output_data": {},
        "metadata": null,
        "duration_ms": null,
        "error_message": null,
        "created_at": "2024-05-01T10:00:00+00:00"
    })
}

#[tokio::test]
async fn list_runs_orders_newest_first_and_batches_profile_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/nutri_search_runs"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "50"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            run_row("r1", Some("u2"), "2024-05-01T09:00:00+00:00"),
            run_row("r2", Some("u1"), "2024-05-02T09:00:00+00:00"),
            run_row("r3", Some("u2"), "2024-05-03T09:00:00+00:00"),
            run_row("r4", None, "2024-04-30T09:00:00+00:00"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .and(query_param("user_id", "in.(u1,u2)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user_id": "u1", "name": "Ada", "surname": "Lovelace"},
            {"user_id": "u2", "name": "Grace", "surname": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let runs = repository(&server)
        .list_runs(RunFilter::default(), 50)
        .await
        .unwrap();

    let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r3", "r2", "r1", "r4"]);
    assert!(runs.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    assert_eq!(runs[0].user_label(), "Grace");
    assert_eq!(runs[1].user_label(), "Ada Lovelace");
    assert_eq!(runs[3].user_label(), UNKNOWN_USER);
}

#[tokio::test]
async fn flagged_filter_is_sent_to_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/nutri_search_runs"))
        .and(query_param("is_flagged", "eq.true"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let runs = repository(&server)
        .list_runs(RunFilter::flagged(), 5)
        .await
        .unwrap();

    assert!(runs.is_empty());
}

#[tokio::test]
async fn failed_profile_lookup_degrades_to_placeholder_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/nutri_search_runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            run_row("r1", Some("u1"), "2024-05-01T09:00:00+00:00"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "permission denied"})),
        )
        .mount(&server)
        .await;

    let runs = repository(&server)
        .list_runs(RunFilter::default(), 50)
        .await
        .unwrap();

    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].user_label(), UNKNOWN_USER);
}

#[tokio::test]
async fn backend_message_is_surfaced_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/nutri_search_runs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "42703",
            "message": "column nutri_search_runs.is_flagged does not exist"
        })))
        .mount(&server)
        .await;

    let err = repository(&server)
        .list_runs(RunFilter::flagged(), 50)
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        BackendErrorKind::Api {
            status: 400,
            message: "column nutri_search_runs.is_flagged does not exist".to_string(),
        }
    );
    assert!(err.message().contains("does not exist"));
}

#[tokio::test]
async fn step_logs_are_ordered_and_carry_trigger_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/nutri_search_step_logs"))
        .and(query_param("run_id", "eq.r1"))
        .and(query_param("order", "step_number.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            step_row(2, json!({"query": "oat milk"})),
            step_row(1, json!({"triggerMessage": "what milk has most protein?"})),
            step_row(3, json!(null)),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let steps = repository(&server).list_step_logs("r1").await.unwrap();

    let numbers: Vec<i32> = steps.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    for step in &steps {
        assert_eq!(
            step.trigger_message.as_deref(),
            Some("what milk has most protein?")
        );
    }
}

#[tokio::test]
async fn delete_run_targets_exactly_one_row() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/nutri_search_runs"))
        .and(query_param("id", "eq.r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    repository(&server).delete_run("r1").await.unwrap();
}

#[tokio::test]
async fn unfiltered_delete_is_refused_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let config = BackendConfig::default()
        .with_url(server.uri())
        .with_service_key("service-key");
    let client = SupabaseClient::new(&config);

    let err = client
        .delete(&TableQuery::table("nutri_search_runs"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, BackendErrorKind::Request(_)));
    assert!(err.message().contains("nutri_search_runs"));
}

#[tokio::test]
async fn user_profiles_are_sorted_by_name_with_display_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user_id": "u3", "name": null, "surname": null},
            {"user_id": "u2", "name": "Grace", "surname": "Hopper"},
            {"user_id": "u1", "name": "Ada", "surname": "Lovelace"}
        ])))
        .mount(&server)
        .await;

    let profiles = repository(&server).list_user_profiles().await.unwrap();

    let names: Vec<&str> = profiles.iter().map(|p| p.display_name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper", UNKNOWN_USER]);
}

#[tokio::test]
async fn chat_messages_are_ascending_and_capped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/chat_messages"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param("order", "created_at.asc"))
        .and(query_param("limit", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "message_id": "m2", "user_id": "u1", "sender": "assistant",
                "message_type": "text", "content_text": "Try soy milk.",
                "content_json": null, "created_at": "2024-05-01T10:00:05+00:00"
            },
            {
                "message_id": "m1", "user_id": "u1", "sender": "user",
                "message_type": "text", "content_text": "Which milk?",
                "content_json": null, "created_at": "2024-05-01T10:00:00+00:00"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let messages = repository(&server).list_chat_messages("u1").await.unwrap();

    assert_eq!(messages[0].message_id, "m1");
    assert!(messages[0].is_from_user());
    assert_eq!(messages[1].message_id, "m2");
}

#[tokio::test]
async fn user_without_messages_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let messages = repository(&server).list_chat_messages("u9").await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn unconfigured_client_fails_each_call() {
    let config = BackendConfig::default();
    let repository = MonitorRepository::new(SupabaseClient::new(&config), &config);

    let err = repository.delete_run("r1").await.unwrap_err();
    assert!(matches!(err.kind, BackendErrorKind::NotConfigured(_)));
}
