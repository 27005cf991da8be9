use gns3_client::{
    EthernetPortMapping, Gns3Result, Gns3Server, Link, LinkEndpoint, Node, NodeType, Project,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Gns3Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server = Gns3Server::builder()
        .host("192.168.56.101")?
        .port(3080)?
        .build()?;

    let project = Project::new(&server, "lab");
    let project = if project.exists().await? {
        project.read().await?
    } else {
        project.create().await?
    };
    let scope = project.scope()?;
    println!("Project {} ({:?})", project.name, project.project_id);

    let mut switch = Node::new(&scope, "SW1", NodeType::EthernetSwitch);
    switch.properties.ports_mapping = Some(vec![
        EthernetPortMapping::access("Ethernet0", 0, 10),
        EthernetPortMapping::access("Ethernet1", 1, 10),
        EthernetPortMapping::dot1q("Ethernet7", 7, 1),
    ]);
    let switch = switch.create().await?;

    let mut pc = Node::new(&scope, "PC1", NodeType::Vpcs);
    pc.properties.startup_script = Some("ip 10.0.10.2/24 10.0.10.1".to_string());
    pc.x = -150;
    let pc = pc.create().await?;

    let link = Link::new(
        &scope,
        vec![
            LinkEndpoint::new(pc.node_id.clone().unwrap_or_default(), 0, 0),
            LinkEndpoint::new(switch.node_id.clone().unwrap_or_default(), 0, 0),
        ],
    )
    .create()
    .await?;
    println!("Linked PC1 to SW1 ({:?})", link.link_id);

    let pc = pc.start().await?;
    println!("PC1 is {}", pc.status.as_deref().unwrap_or("unknown"));

    Ok(())
}
