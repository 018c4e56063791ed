use anyhow::Result;
use comment_section::common::EnvProvider;

use crate::cli::output::success_message;

use super::{SectionPaths, open_section};

/// Mount the section once so the data hook writes the thread file
pub async fn handle_init(paths: &SectionPaths, env: impl EnvProvider) -> Result<()> {
    let section = open_section(paths, env)?;

    let failures = section.mount().await;
    if !failures.is_empty() {
        let messages: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Failed to write {}: {}", paths.file.display(), messages.join("; "));
    }

    println!(
        "{}",
        success_message(&format!(
            "Thread file ready: {} ({})",
            paths.file.display(),
            section.title()
        ))
    );
    Ok(())
}
