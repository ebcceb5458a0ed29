use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let api_key = std::env::var("CLOCKIFY_API_KEY").unwrap_or_else(|_| "test-key".to_string());
    let workspace_id = std::env::var("WORKSPACE_ID").unwrap_or_else(|_| "5e5b8b0a9c1f2a0007d1e2f3".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, %workspace_id, "listening");
    let seed = mock_server::Seed::new(api_key).with_users(workspace_id, mock_server::generate_users(3));
    mock_server::run(listener, seed).await
}
