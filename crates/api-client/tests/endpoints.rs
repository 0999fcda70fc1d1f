//! Endpoint contract tests against a mock control plane.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dbsp_api_client::types::{
    CompileProgramRequest, CreateOrReplaceProgramRequest, ProgramStatus, Version,
};
use dbsp_api_client::{blocking, Client, Error, UnexpectedStatusPolicy};

fn program_descr_body(name: &str, status: &str) -> serde_json::Value {
    json!({
        "program_id": "00000000-0000-0000-0000-000000000001",
        "name": name,
        "description": "",
        "version": 1,
        "status": status
    })
}

#[tokio::test]
async fn program_status_success_decodes_the_descriptor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/program"))
        .and(query_param("name", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(program_descr_body("demo", "Success")))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    let program = client
        .program_status(None, Some("demo"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(program.name, "demo");
    assert_eq!(program.status, ProgramStatus::Success);
}

#[tokio::test]
async fn unset_query_parameters_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/program"))
        .respond_with(ResponseTemplate::new(200).set_body_json(program_descr_body("demo", "Pending")))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    client.program_status(None, Some("demo")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    // `id` was left unset: the query string must carry only `name`.
    assert_eq!(requests[0].url.query(), Some("name=demo"));
}

#[tokio::test]
async fn documented_404_yields_the_structured_error_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/program"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Unknown program name 'missing'.",
            "error_code": "UnknownProgramName",
            "details": { "program_name": "missing" }
        })))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    let err = client
        .program_status(None, Some("missing"))
        .await
        .unwrap_err();
    match err {
        Error::ErrorResponse(response) => {
            assert_eq!(response.status().as_u16(), 404);
            assert_eq!(response.parsed().error_code, "UnknownProgramName");
        }
        other => panic!("expected structured error, got {other:?}"),
    }
}

#[tokio::test]
async fn undocumented_status_follows_the_client_policy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/program"))
        .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
        .mount(&server)
        .await;

    // Default policy raises a distinguishable failure with the raw payload.
    let raising = Client::new(&server.uri());
    match raising.program_status(None, Some("demo")).await.unwrap_err() {
        Error::UnexpectedResponse { status, body } => {
            assert_eq!(status.as_u16(), 418);
            assert_eq!(&body[..], b"teapot");
        }
        other => panic!("expected unexpected-response failure, got {other:?}"),
    }

    // The alternative policy yields an absence value instead.
    let absent = Client::new(&server.uri())
        .with_unexpected_status_policy(UnexpectedStatusPolicy::ReturnNone);
    let parsed = absent.program_status(None, Some("demo")).await.unwrap();
    assert!(parsed.is_none());
}

#[tokio::test]
async fn create_or_replace_reports_created_vs_replaced_in_the_envelope() {
    let response_body = json!({
        "program_id": "00000000-0000-0000-0000-000000000001",
        "version": 1
    });
    let request = CreateOrReplaceProgramRequest {
        description: String::new(),
        code: "CREATE TABLE t(x INT);".to_string(),
        extra: Default::default(),
    };

    for (status, created) in [(201, true), (200, false)] {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v0/programs/demo"))
            .and(body_json(json!({
                "description": "",
                "code": "CREATE TABLE t(x INT);"
            })))
            .respond_with(ResponseTemplate::new(status).set_body_json(response_body.clone()))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri());
        let response = client
            .create_or_replace_program_detailed("demo", &request)
            .await
            .unwrap();
        assert_eq!(response.status().as_u16() == 201, created);
        assert_eq!(response.parsed().as_ref().unwrap().version, Version(1));
    }
}

#[tokio::test]
async fn compile_accepts_with_an_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/programs/demo/compile"))
        .and(body_json(json!({ "version": 1 })))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    let parsed = client
        .compile_program(
            "demo",
            &CompileProgramRequest {
                version: Version(1),
                extra: Default::default(),
            },
        )
        .await
        .unwrap();
    assert_eq!(parsed, Some(()));
}

#[tokio::test]
async fn compile_version_conflict_is_a_structured_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/programs/demo/compile"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Outdated program version '1'.",
            "error_code": "OutdatedProgramVersion",
            "details": { "outdated_version": 1, "latest_version": 2 }
        })))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    let err = client
        .compile_program(
            "demo",
            &CompileProgramRequest {
                version: Version(1),
                extra: Default::default(),
            },
        )
        .await
        .unwrap_err();
    match err {
        Error::ErrorResponse(response) => {
            assert_eq!(response.parsed().error_code, "OutdatedProgramVersion");
        }
        other => panic!("expected structured error, got {other:?}"),
    }
}

#[tokio::test]
async fn udf_upload_submits_a_toml_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v0/programs/demo/udf"))
        .and(header("content-type", "application/toml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "UDF demo created" })),
        )
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    let response = client
        .upload_program_udf("demo", "[dependencies]\nregex = \"1\"\n")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(response.message, "UDF demo created");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"[dependencies]\nregex = \"1\"\n");
}

#[tokio::test]
async fn udf_upload_accepts_an_empty_dependency_table() {
    // An empty TOML document declares no dependencies; whether that is
    // acceptable is the server's call, not the client's.
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v0/programs/demo/udf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "UDF demo created" })),
        )
        .mount(&server)
        .await;

    let client = Client::new(&server.uri());
    let response = client.upload_program_udf("demo", "").await.unwrap().unwrap();
    assert_eq!(response.message, "UDF demo created");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn build_step_failures_never_touch_the_network() {
    // Nothing is listening here; a dispatch attempt would fail differently.
    let client = Client::new("http://127.0.0.1:1");
    match client.program_status(None, None).await.unwrap_err() {
        Error::InvalidRequest(msg) => assert!(msg.contains("id") && msg.contains("name")),
        other => panic!("expected invalid-request failure, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_propagate_as_their_own_category() {
    let client = Client::new("http://127.0.0.1:1");
    match client.list_programs().await.unwrap_err() {
        Error::CommunicationError(e) => assert!(e.is_connect() || e.is_request()),
        other => panic!("expected communication error, got {other:?}"),
    }
}

#[test]
fn blocking_client_matches_the_async_conventions() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/program"))
            .and(query_param("name", "demo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(program_descr_body("demo", "Success")),
            )
            .mount(&server)
            .await;
        server
    });

    let client = blocking::Client::new(&server.uri());

    let detailed = client.program_status_detailed(None, Some("demo")).unwrap();
    assert_eq!(detailed.status().as_u16(), 200);
    let program = detailed.into_inner().unwrap();
    assert_eq!(program.status, ProgramStatus::Success);

    let parsed = client.program_status(None, Some("demo")).unwrap().unwrap();
    assert_eq!(parsed, program);

    drop(server);
    drop(rt);
}
