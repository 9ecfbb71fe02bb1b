//! ndfetch - fetch a signed network definition
//!
//! Downloads an NDF, verifies it against a pinned trust anchor and retries
//! while the endpoint has nothing to serve.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ndf_cli::run().await
}
