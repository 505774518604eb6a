use runscope::{BackendConfig, MonitorRepository, SupabaseClient, WorkflowExport};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn step_row(number: i32, input: serde_json::Value) -> serde_json::Value {
    json!({
        "id": format!("s{number}"),
        "run_id": "r1",
        "step_number": number,
        "step_name": format!("stage {number}"),
        "input_data": input,
        "output_data": {"items": number},
        "metadata": {"model": "small"},
        "duration_ms": 40,
        "error_message": null,
        "created_at": "2024-05-01T10:00:00+00:00"
    })
}

#[tokio::test]
async fn export_document_mirrors_fetched_steps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/nutri_search_step_logs"))
        .and(query_param("run_id", "eq.r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            step_row(2, json!({})),
            step_row(1, json!({"triggerMessage": "lentil recipes"})),
        ])))
        .mount(&server)
        .await;

    let config = BackendConfig::default()
        .with_url(server.uri())
        .with_service_key("service-key");
    let repository = MonitorRepository::new(SupabaseClient::new(&config), &config);

    let steps = repository.list_step_logs("r1").await.unwrap();
    let text = WorkflowExport::new("r1", &steps).to_pretty_json().unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(document["runId"], "r1");
    let exported = document["stepLogs"].as_array().unwrap();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0]["step_number"], 1);
    assert_eq!(exported[1]["step_number"], 2);
    assert_eq!(exported[0]["metadata"], json!({"model": "small"}));
    // The derived trigger message is a display concern and is not exported
    assert!(exported[1].get("trigger_message").is_none());
}
