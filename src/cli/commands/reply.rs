use anyhow::Result;
use clap::Args;
use comment_section::common::EnvProvider;

use crate::cli::output::success_message;

use super::{
    SectionPaths, compose_text, open_section, report_failures, require_signed_in,
    target_from_args,
};

#[derive(Args)]
pub struct ReplyArgs {
    /// Id of the comment or reply to answer
    pub id: String,

    /// Id of the parent comment when answering a reply
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Reply text (opens $EDITOR when omitted)
    pub text: Option<String>,
}

pub async fn handle_reply(paths: &SectionPaths, args: ReplyArgs, env: impl EnvProvider) -> Result<()> {
    let mut section = open_section(paths, env)?;
    require_signed_in(&section)?;

    let target = target_from_args(&args.id, args.parent.as_ref());
    let replied_to = section.store().find(&target)?;
    let hint = format!("Replying to {}: {}", replied_to.full_name(), replied_to.text());

    section.toggle_reply(target.id())?;
    let text = compose_text(args.text, "", &hint)?;

    let dispatched = section.reply(text, target).await?;
    println!(
        "{}",
        success_message(&format!("Posted reply {}", dispatched.value.com_id))
    );
    report_failures(&dispatched)
}
