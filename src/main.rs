#[tokio::main]
async fn main() -> anyhow::Result<()> {
    showcase_lib::run().await
}
