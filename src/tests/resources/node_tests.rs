use crate::{
    EthernetPortMapping, Gns3Error, Node, NodeType, ProjectScope,
    tests::{PROJECT_ID, mock_gns3},
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

const NODE_ID: &str = "5e3c9b0e-6e4b-4ad5-a5a4-7f0d0e3c0a11";

fn nodes_path() -> String {
    format!("/v2/projects/{PROJECT_ID}/nodes")
}

fn vpcs_json(name: &str, node_id: &str) -> Value {
    json!({
        "command_line": "",
        "compute_id": "local",
        "console": 5004,
        "console_auto_start": false,
        "console_host": "127.0.0.1",
        "console_type": "telnet",
        "first_port_name": null,
        "height": 59,
        "label": {"rotation": 0, "style": "font-size: 10.0;", "text": name, "x": 4, "y": -25},
        "locked": false,
        "name": name,
        "node_directory": format!("/opt/gns3/projects/{PROJECT_ID}/project-files/vpcs/{node_id}"),
        "node_id": node_id,
        "node_type": "vpcs",
        "port_name_format": "Ethernet{0}",
        "port_segment_size": 0,
        "project_id": PROJECT_ID,
        "properties": {"startup_script": "ip dhcp", "startup_script_path": "startup.vpc"},
        "status": "stopped",
        "symbol": ":/symbols/vpcs_guest.svg",
        "x": 0,
        "y": 0,
        "z": 1
    })
}

async fn mount_node_list(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(nodes_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            vpcs_json("PC0", "00000000-0000-0000-0000-000000000000"),
            vpcs_json("PC1", NODE_ID)
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_node_create_projects_properties() {
    let (mock_server, server) = mock_gns3().await;
    let scope = ProjectScope::new(&server, PROJECT_ID);

    Mock::given(method("POST"))
        .and(path(nodes_path()))
        .and(body_partial_json(json!({
            "name": "PC1",
            "compute_id": "local",
            "node_type": "vpcs"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(vpcs_json("PC1", NODE_ID)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut node = Node::new(&scope, "PC1", NodeType::Vpcs);
    node.properties.startup_script = Some("ip dhcp".to_string());
    node.properties.ram = Some(256);

    let created = node.create().await.unwrap();
    assert_eq!(created.node_id.as_deref(), Some(NODE_ID));
    assert_eq!(created.console, Some(5004));
    assert_eq!(created.properties.startup_script.as_deref(), Some("ip dhcp"));
    assert_eq!(created.scope(), Some(&scope));
    assert_eq!(node.node_id, None);

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert!(body.get("node_id").is_none());
    assert_eq!(body["properties"], json!({"startup_script": "ip dhcp"}));
}

#[tokio::test]
async fn test_node_create_switch_sends_ports_mapping() {
    let (mock_server, server) = mock_gns3().await;
    let scope = ProjectScope::new(&server, PROJECT_ID);

    let ports = json!([
        {"name": "Ethernet0", "port_number": 0, "type": "access", "vlan": 10},
        {"name": "Ethernet1", "port_number": 1, "type": "dot1q", "vlan": 1}
    ]);
    Mock::given(method("POST"))
        .and(path(nodes_path()))
        .and(body_partial_json(json!({
            "node_type": "ethernet_switch",
            "properties": {"ports_mapping": ports}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "compute_id": "local",
            "name": "SW1",
            "node_id": NODE_ID,
            "node_type": "ethernet_switch",
            "properties": {"ports_mapping": ports},
            "status": "started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut switch = Node::new(&scope, "SW1", NodeType::EthernetSwitch);
    switch.properties.ports_mapping = Some(vec![
        EthernetPortMapping::access("Ethernet0", 0, 10),
        EthernetPortMapping::dot1q("Ethernet1", 1, 1),
    ]);

    let created = switch.create().await.unwrap();
    assert_eq!(created.properties.ports_mapping, switch.properties.ports_mapping);
    assert_eq!(created.properties.node_type(), Some(NodeType::EthernetSwitch));
}

#[tokio::test]
async fn test_node_create_rejected() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(method("POST"))
        .and(path(nodes_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid JSON: 'bogus' is not one of ['cloud', 'nat', ...]",
            "status": 400
        })))
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let err = Node::new(&scope, "PC1", NodeType::Vpcs).create().await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_node_read_and_exists() {
    let (mock_server, server) = mock_gns3().await;
    mount_node_list(&mock_server).await;
    let scope = ProjectScope::new(&server, PROJECT_ID);

    let node = Node::new(&scope, "PC1", NodeType::Vpcs).read().await.unwrap();
    assert_eq!(node.node_id.as_deref(), Some(NODE_ID));
    assert_eq!(node.label.as_ref().map(|l| l.y), Some(-25));
    assert_eq!(node.scope(), Some(&scope));

    assert!(Node::new(&scope, "PC0", NodeType::Vpcs).exists().await.unwrap());
    assert!(!Node::new(&scope, "R1", NodeType::Qemu).exists().await.unwrap());

    let err = Node::new(&scope, "R1", NodeType::Qemu).read().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Server error #404: Node does not exist in the project"
    );
}

#[tokio::test]
async fn test_node_read_unknown_project() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(method("GET"))
        .and(path(nodes_path()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": format!("Project ID {PROJECT_ID} doesn't exist"),
            "status": 404
        })))
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let node = Node::new(&scope, "PC1", NodeType::Vpcs);
    assert!(!node.exists().await.unwrap());
    let err = node.read().await.unwrap_err();
    assert!(err.to_string().contains("doesn't exist"));
}

#[tokio::test]
async fn test_node_update() {
    let (mock_server, server) = mock_gns3().await;
    mount_node_list(&mock_server).await;

    let mut moved = vpcs_json("PC1", NODE_ID);
    moved["x"] = json!(-120);
    moved["y"] = json!(40);
    Mock::given(method("PUT"))
        .and(path(format!("{}/{NODE_ID}", nodes_path())))
        .and(body_partial_json(json!({"x": -120, "y": 40})))
        .respond_with(ResponseTemplate::new(200).set_body_json(moved))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let mut node = Node::new(&scope, "PC1", NodeType::Vpcs).read().await.unwrap();
    node.x = -120;
    node.y = 40;

    let updated = node.update().await.unwrap();
    assert_eq!((updated.x, updated.y), (-120, 40));

    let requests = mock_server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    let body: Value = put.body_json().unwrap();
    assert!(body.get("node_id").is_none());
}

#[tokio::test]
async fn test_node_delete_paths() {
    let (mock_server, server) = mock_gns3().await;
    mount_node_list(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/{NODE_ID}", nodes_path())))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    Node::new(&scope, "PC1", NodeType::Vpcs).delete().await.unwrap();

    let mut known = Node::new(&scope, "ignored", NodeType::Vpcs);
    known.node_id = Some(NODE_ID.to_string());
    known.delete().await.unwrap();

    let gets = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(gets, 1);

    let err = Node::new(&scope, "R1", NodeType::Qemu).delete().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_node_start_and_stop() {
    let (mock_server, server) = mock_gns3().await;

    let mut started = vpcs_json("PC1", NODE_ID);
    started["status"] = json!("started");
    Mock::given(method("POST"))
        .and(path(format!("{}/{NODE_ID}/start", nodes_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(started))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/{NODE_ID}/stop", nodes_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(vpcs_json("PC1", NODE_ID)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let mut node = Node::new(&scope, "PC1", NodeType::Vpcs);
    node.node_id = Some(NODE_ID.to_string());

    let running = node.start().await.unwrap();
    assert_eq!(running.status.as_deref(), Some("started"));
    let stopped = running.stop().await.unwrap();
    assert_eq!(stopped.status.as_deref(), Some("stopped"));

    let blank = Node::new(&scope, "PC2", NodeType::Vpcs);
    assert!(matches!(blank.start().await, Err(Gns3Error::Validation(_))));
}

#[tokio::test]
async fn test_node_delete_unknown_identifier() {
    let (mock_server, server) = mock_gns3().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/nope", nodes_path())))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Node ID nope doesn't exist",
            "status": 404
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scope = ProjectScope::new(&server, PROJECT_ID);
    let mut node = Node::new(&scope, "PC1", NodeType::Vpcs);
    node.node_id = Some("nope".to_string());

    let err = node.delete().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Server error #404: Node ID nope doesn't exist");
}
