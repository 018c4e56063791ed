use anyhow::Result;
use clap::Args;
use comment_section::common::EnvProvider;

use crate::cli::output::success_message;

use super::{
    SectionPaths, compose_text, open_section, report_failures, require_author,
    require_signed_in, target_from_args,
};

#[derive(Args)]
pub struct EditArgs {
    /// Id of the comment or reply to edit
    pub id: String,

    /// Id of the parent comment when editing a reply
    #[arg(short, long)]
    pub parent: Option<String>,

    /// New text (opens $EDITOR on the current text when omitted)
    pub text: Option<String>,
}

pub async fn handle_edit(paths: &SectionPaths, args: EditArgs, env: impl EnvProvider) -> Result<()> {
    let mut section = open_section(paths, env)?;
    require_signed_in(&section)?;

    let target = target_from_args(&args.id, args.parent.as_ref());
    require_author(&section, &target)?;
    let current_text = section.store().find(&target)?.text().to_string();

    section.toggle_edit(target.id())?;
    let text = compose_text(args.text, &current_text, &format!("Editing {}", target))?;

    let dispatched = section.edit(text, target).await?;
    println!("{}", success_message(&format!("Updated {}", args.id)));
    report_failures(&dispatched)
}
