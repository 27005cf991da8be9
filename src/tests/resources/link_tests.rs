use crate::{
    Gns3Error, Link, LinkEndpoint, Node, NodeType, Project, ProjectScope,
    tests::{PROJECT_ID, mock_gns3},
};
use serde_json::{Value, json};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, body_partial_json, method, path},
};

const LINK_ID: &str = "2a2a8b1c-4d26-4a48-9b8b-86f3c2f8e7d4";

fn links_path() -> String {
    format!("/v2/projects/{PROJECT_ID}/links")
}

fn link_json(link_id: &str, suspend: bool) -> Value {
    json!({
        "capture_compute_id": null,
        "capture_file_name": null,
        "capture_file_path": null,
        "capturing": false,
        "filters": {},
        "link_id": link_id,
        "link_type": "ethernet",
        "nodes": [
            {"adapter_number": 0, "node_id": "n1", "port_number": 0,
             "label": {"rotation": 0, "style": null, "text": "e0", "x": 70, "y": 24}},
            {"adapter_number": 0, "node_id": "n2", "port_number": 1,
             "label": {"rotation": 0, "style": null, "text": "e1", "x": -4, "y": 24}}
        ],
        "project_id": PROJECT_ID,
        "suspend": suspend
    })
}

#[tokio::test]
async fn test_link_create() {
    let (mock_server, server) = mock_gns3().await;
    let scope = ProjectScope::new(&server, PROJECT_ID);

    Mock::given(method("POST"))
        .and(path(links_path()))
        .and(body_json(json!({
            "capturing": false,
            "nodes": [
                {"adapter_number": 0, "node_id": "n1", "port_number": 0},
                {"adapter_number": 0, "node_id": "n2", "port_number": 1}
            ],
            "suspend": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(link_json(LINK_ID, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let link = Link::new(
        &scope,
        vec![LinkEndpoint::new("n1", 0, 0), LinkEndpoint::new("n2", 0, 1)],
    );
    let created = link.create().await.unwrap();
    assert_eq!(created.link_id.as_deref(), Some(LINK_ID));
    assert_eq!(created.nodes.len(), 2);
    assert_eq!(created.nodes[1].label.as_ref().map(|l| l.text.as_str()), Some("e1"));
    assert_eq!(created.scope(), Some(&scope));
}

#[tokio::test]
async fn test_link_create_on_busy_port() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(method("POST"))
        .and(path(links_path()))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Port 0 is already used",
            "status": 409
        })))
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let link = Link::new(
        &scope,
        vec![LinkEndpoint::new("n1", 0, 0), LinkEndpoint::new("n2", 0, 0)],
    );
    let err = link.create().await.unwrap_err();
    assert_eq!(err.to_string(), "Server error #409: Port 0 is already used");
}

#[tokio::test]
async fn test_link_read_and_exists_by_identifier() {
    let (mock_server, server) = mock_gns3().await;
    let scope = ProjectScope::new(&server, PROJECT_ID);

    Mock::given(method("GET"))
        .and(path(links_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([link_json(LINK_ID, false)])),
        )
        .mount(&mock_server)
        .await;

    let mut key = Link::new(&scope, Vec::new());
    key.link_id = Some(LINK_ID.to_string());
    let link = key.read().await.unwrap();
    assert_eq!(link.link_type.as_deref(), Some("ethernet"));
    assert_eq!(link.scope(), Some(&scope));
    assert!(key.exists().await.unwrap());

    key.link_id = Some("other".to_string());
    assert!(!key.exists().await.unwrap());
    let err = key.read().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Server error #404: Link does not exist in the project"
    );
}

#[tokio::test]
async fn test_link_without_identifier_sends_nothing() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let link = Link::new(&scope, vec![LinkEndpoint::new("n1", 0, 0)]);

    assert!(matches!(link.read().await, Err(Gns3Error::Validation(_))));
    assert!(matches!(link.exists().await, Err(Gns3Error::Validation(_))));
    assert!(matches!(link.update().await, Err(Gns3Error::Validation(_))));
    assert!(matches!(link.delete().await, Err(Gns3Error::Validation(_))));
}

#[tokio::test]
async fn test_link_update_and_delete() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/{LINK_ID}", links_path())))
        .and(body_partial_json(json!({"suspend": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(link_json(LINK_ID, true)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/{LINK_ID}", links_path())))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let mut link: Link = serde_json::from_value(link_json(LINK_ID, false)).unwrap();
    link = link.attached(&scope);
    link.suspend = true;

    let updated = link.update().await.unwrap();
    assert!(updated.suspend);

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert!(body.get("link_id").is_none());

    updated.delete().await.unwrap();
}

#[tokio::test]
async fn test_two_node_topology() {
    let (mock_server, server) = mock_gns3().await;
    let nodes_path = format!("/v2/projects/{PROJECT_ID}/nodes");

    Mock::given(method("POST"))
        .and(path("/v2/projects"))
        .and(body_partial_json(json!({"name": "p1"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"name": "p1", "project_id": PROJECT_ID})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    for (name, node_id) in [("PC1", "n1"), ("PC2", "n2")] {
        Mock::given(method("POST"))
            .and(path(nodes_path.as_str()))
            .and(body_partial_json(json!({"name": name, "node_type": "vpcs"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "compute_id": "local",
                "name": name,
                "node_id": node_id,
                "node_type": "vpcs",
                "properties": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }
    let mut stored = link_json(LINK_ID, false);
    stored["nodes"][1]["port_number"] = json!(0);
    Mock::given(method("POST"))
        .and(path(links_path()))
        .and(body_partial_json(json!({
            "nodes": [
                {"adapter_number": 0, "node_id": "n1", "port_number": 0},
                {"adapter_number": 0, "node_id": "n2", "port_number": 0}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(links_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = Project::new(&server, "p1").create().await.unwrap();
    let scope = project.scope().unwrap();

    let pc1 = Node::new(&scope, "PC1", NodeType::Vpcs).create().await.unwrap();
    let pc2 = Node::new(&scope, "PC2", NodeType::Vpcs).create().await.unwrap();

    let endpoints = [&pc1, &pc2]
        .iter()
        .map(|n| LinkEndpoint::new(n.node_id.clone().unwrap_or_default(), 0, 0))
        .collect();
    let link = Link::new(&scope, endpoints).create().await.unwrap();

    assert_eq!(link.link_id.as_deref(), Some(LINK_ID));
    assert_eq!(link.scope().map(|s| s.project_id()), Some(PROJECT_ID));

    let read_back = link.read().await.unwrap();
    let ends: Vec<(&str, u32, u32)> = read_back
        .nodes
        .iter()
        .map(|e| (e.node_id.as_str(), e.adapter_number, e.port_number))
        .collect();
    assert_eq!(ends, vec![("n1", 0, 0), ("n2", 0, 0)]);
}

#[tokio::test]
async fn test_link_delete_unknown_identifier() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/nope", links_path())))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Link ID nope doesn't exist",
            "status": 404
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let mut link = Link::new(&scope, Vec::new());
    link.link_id = Some("nope".to_string());

    let err = link.delete().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Server error #404: Link ID nope doesn't exist");
}
