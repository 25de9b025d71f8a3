use hai_mcp_core::{
    HaiProvider,
    commands::{list::list_instances, locate::locate_instances, power::stop_instance},
    credentials::Credentials,
    error::{Error, ProviderError},
};
use hai_mcp_tencent::{API_VERSION, TencentProvider, TencentProviderConfig};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{body_json, header, header_exists, method, path},
};

fn credentials(token: Option<&str>) -> Credentials {
    Credentials {
        secret_id: "AKIDTEST".to_string(),
        secret_key: "test-secret".to_string(),
        token: token.map(ToString::to_string),
    }
}

fn provider(server: &MockServer, token: Option<&str>) -> TencentProvider {
    let mut config = TencentProviderConfig::new(credentials(token));
    config.endpoint = Some(server.uri());
    TencentProvider::new(&config).unwrap()
}

fn envelope(response: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "Response": response }))
}

async fn mount_action(server: &MockServer, action: &str, region: &str, response: Value) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-TC-Action", action))
        .and(header("X-TC-Region", region))
        .respond_with(envelope(response))
        .mount(server)
        .await;
}

#[tokio::test]
async fn requests_carry_signing_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeRegions"))
        .and(header("X-TC-Version", API_VERSION))
        .and(header("X-TC-Region", "ap-shanghai"))
        .and(header("X-TC-Token", "session-token"))
        .and(header("Content-Type", "application/json; charset=utf-8"))
        .and(header_exists("X-TC-Timestamp"))
        .respond_with(envelope(json!({
            "RegionSet": [{"Region": "ap-shanghai", "RegionName": "Shanghai"}],
            "RequestId": "req-1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let regions = provider(&server, Some("session-token"))
        .describe_regions("ap-shanghai")
        .await
        .unwrap();
    assert_eq!(regions.region_set[0].region, "ap-shanghai");

    let received = server.received_requests().await.unwrap();
    let authorization = received[0]
        .headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(authorization.starts_with("TC3-HMAC-SHA256 Credential=AKIDTEST/"));
    assert!(authorization.contains("/hai/tc3_request, SignedHeaders=content-type;host, Signature="));
}

#[tokio::test]
async fn request_bodies_use_provider_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "TerminateInstances"))
        .and(body_json(json!({"InstanceIds": ["hai-1", "hai-2"]})))
        .respond_with(envelope(json!({"RequestId": "req-t"})))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["hai-1".to_string(), "hai-2".to_string()];
    let status = hai_mcp_core::commands::terminate::remove_instances(
        &provider(&server, None),
        "ap-beijing",
        &ids,
    )
    .await
    .unwrap();
    assert!(status.contains("req-t"));

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("X-TC-Token").is_none());
}

#[tokio::test]
async fn provider_errors_pass_through() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "StopInstance",
        "ap-guangzhou",
        json!({
            "Error": {"Code": "ResourceNotFound.InstanceNotFound", "Message": "instance missing"},
            "RequestId": "req-e",
        }),
    )
    .await;

    let error = stop_instance(&provider(&server, None), "ap-guangzhou", "hai-gone")
        .await
        .unwrap_err();
    match error {
        Error::Provider(ProviderError::Api { code, request_id, .. }) => {
            assert_eq!(code, "ResourceNotFound.InstanceNotFound");
            assert_eq!(request_id, "req-e");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn stop_returns_status_with_raw_response() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "StopInstance",
        "ap-shanghai",
        json!({"TaskId": "task-77", "RequestId": "req-s"}),
    )
    .await;

    let status = stop_instance(&provider(&server, None), "ap-shanghai", "hai-62rfhmf8")
        .await
        .unwrap();
    assert!(status.contains(r#""RequestId":"req-s""#));
    assert!(status.contains(r#""TaskId":"task-77""#));
}

#[tokio::test]
async fn non_list_instance_set_is_an_empty_listing() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "DescribeInstances",
        "ap-nanjing",
        json!({"InstanceSet": null, "TotalCount": 0, "RequestId": "req-n"}),
    )
    .await;

    let listing = list_instances(&provider(&server, None), &["ap-nanjing".to_string()])
        .await
        .unwrap();
    assert!(listing["ap-nanjing"].is_empty());
}

#[tokio::test]
async fn locate_scans_regions_reported_by_the_api() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "DescribeRegions",
        "ap-shanghai",
        json!({
            "RegionSet": [
                {"Region": "ap-shanghai"},
                {"Region": null, "RegionName": "half-provisioned"},
                {"Region": "ap-nanjing"}
            ],
            "RequestId": "req-r",
        }),
    )
    .await;
    mount_action(
        &server,
        "DescribeInstances",
        "ap-shanghai",
        json!({"InstanceSet": [{"InstanceId": "hai-62rfhmf8"}], "RequestId": "req-a"}),
    )
    .await;
    mount_action(
        &server,
        "DescribeInstances",
        "ap-nanjing",
        json!({"InstanceSet": [], "RequestId": "req-b"}),
    )
    .await;

    let requested = vec!["hai-62rfhmf8".to_string(), "hai-183g6z7u".to_string()];
    let resolved = locate_instances(&provider(&server, None), &requested, None)
        .await
        .unwrap();
    assert_eq!(resolved["hai-62rfhmf8"], "ap-shanghai");
    assert_eq!(resolved["hai-183g6z7u"], "unknown");

    let actions = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(action_of)
        .collect::<Vec<_>>();
    assert_eq!(
        actions,
        vec!["DescribeRegions", "DescribeInstances", "DescribeInstances"]
    );
}

#[tokio::test]
async fn http_failure_without_envelope_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let error = provider(&server, None)
        .describe_applications("ap-shanghai")
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Provider(ProviderError::Http { status: 503, .. })
    ));
}

#[test]
fn endpoint_without_host_is_rejected() {
    let mut config = TencentProviderConfig::new(credentials(None));
    config.endpoint = Some("unix:/tmp/socket".to_string());
    assert!(matches!(
        TencentProvider::new(&config),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn default_region_is_configurable() {
    let mut config = TencentProviderConfig::new(credentials(None));
    assert_eq!(
        TencentProvider::new(&config).unwrap().default_region(),
        "ap-shanghai"
    );
    config.default_region = Some("ap-beijing".to_string());
    assert_eq!(
        TencentProvider::new(&config).unwrap().default_region(),
        "ap-beijing"
    );
}

fn action_of(request: &Request) -> String {
    request
        .headers
        .get("X-TC-Action")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
