use anyhow::Result;
use clap::Args;
use comment_section::common::EnvProvider;
use console::Term;

use crate::cli::output::{DELETE_CONFIRMATION, info_message, success_message};

use super::{
    SectionPaths, open_section, report_failures, require_author, require_signed_in,
    target_from_args,
};

#[derive(Args)]
pub struct DeleteArgs {
    /// Id of the comment or reply to delete
    pub id: String,

    /// Id of the parent comment when deleting a reply
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn handle_delete(paths: &SectionPaths, args: DeleteArgs, env: impl EnvProvider) -> Result<()> {
    let mut section = open_section(paths, env)?;
    require_signed_in(&section)?;

    let target = target_from_args(&args.id, args.parent.as_ref());
    require_author(&section, &target)?;

    if !args.yes && !confirm(DELETE_CONFIRMATION)? {
        println!("{}", info_message("Nothing deleted"));
        return Ok(());
    }

    let dispatched = section.delete(target).await?;
    println!(
        "{}",
        success_message(&format!("Deleted {}", dispatched.value))
    );
    report_failures(&dispatched)
}

fn confirm(question: &str) -> Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{} [y/N] ", question))?;
    let answer = term.read_line()?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
