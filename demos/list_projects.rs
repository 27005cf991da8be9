use gns3_client::{Gns3Result, Gns3Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Gns3Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server = Gns3Server::from_env()?;
    server.test().await?;
    println!("GNS3 server at {}", server.base_url());

    for project in server.projects().await? {
        println!(
            "{:<36}  {:<8}  {}",
            project.project_id.as_deref().unwrap_or("-"),
            project.status.as_deref().unwrap_or("-"),
            project.name
        );
    }

    Ok(())
}
