use std::path::Path;

use anyhow::Result;
use hai_mcp_core::credentials::{Credentials, save_credentials};

pub async fn configure(credentials: &Credentials, path: &Path) -> Result<()> {
    save_credentials(path, credentials).await?;
    println!("Credentials saved to {}", path.display());
    Ok(())
}
