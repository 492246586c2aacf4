#[tokio::main]
async fn main() -> anyhow::Result<()> {
    promptcraft::run().await
}
