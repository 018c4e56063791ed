use anyhow::Result;
use clap::Args;
use comment_section::common::EnvProvider;

use crate::cli::output::success_message;

use super::{SectionPaths, compose_text, open_section, report_failures, require_signed_in};

#[derive(Args)]
pub struct SubmitArgs {
    /// Comment text (opens $EDITOR when omitted)
    pub text: Option<String>,
}

pub async fn handle_submit(
    paths: &SectionPaths,
    args: SubmitArgs,
    env: impl EnvProvider,
) -> Result<()> {
    let mut section = open_section(paths, env)?;
    require_signed_in(&section)?;

    let placeholder = section.config().placeholder().to_string();
    let text = compose_text(args.text, "", &placeholder)?;

    let dispatched = section.submit(text).await?;
    println!(
        "{}",
        success_message(&format!("Posted comment {}", dispatched.value.com_id))
    );
    report_failures(&dispatched)
}
