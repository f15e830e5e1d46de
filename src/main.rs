//! Binary entry point: boot the tokio runtime, then hand off to `app::run()`.

use anyhow::Result;
use demo_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
