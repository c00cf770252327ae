#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hrqa_server::start().await
}
