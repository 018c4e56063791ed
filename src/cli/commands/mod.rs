use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comment_section::common::{EnvProvider, SystemEnvProvider};
use comment_section::config::SectionConfig;
use comment_section::gateway::{CommentSection, Dispatched};
use comment_section::store::Target;

mod delete;
mod edit;
mod init;
mod reply;
mod show;
mod submit;

pub use delete::{DeleteArgs, handle_delete};
pub use edit::{EditArgs, handle_edit};
pub use init::handle_init;
pub use reply::{ReplyArgs, handle_reply};
pub use show::{ShowArgs, handle_count, handle_show};
pub use submit::{SubmitArgs, handle_submit};

use crate::cli::output::LOGIN_PROMPT;
use crate::cli::thread_file::{self, FileGateway};

#[derive(Parser)]
#[command(name = "comment-section")]
#[command(about = "A comment thread with one level of replies, kept in a JSON file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Thread file holding the comments as JSON
    #[arg(short, long, global = true, default_value = "comments.json")]
    pub file: PathBuf,

    /// Section options (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Append every action to this file as a JSON line
    #[arg(long, global = true)]
    pub actions_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or normalise the thread file
    Init,
    /// Show the thread
    Show(ShowArgs),
    /// Print the comment count header
    Count,
    /// Post a new comment
    Submit(SubmitArgs),
    /// Reply to a comment or to a reply
    Reply(ReplyArgs),
    /// Edit one of your comments or replies
    Edit(EditArgs),
    /// Delete one of your comments or replies
    Delete(DeleteArgs),
}

/// Where a section's data, options and action log live
#[derive(Debug, Clone)]
pub struct SectionPaths {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub actions_log: Option<PathBuf>,
}

pub async fn run_command(cli: Cli) -> Result<()> {
    let paths = SectionPaths {
        file: cli.file,
        config: cli.config,
        actions_log: cli.actions_log,
    };
    let env = SystemEnvProvider;

    match cli.command {
        Commands::Init => handle_init(&paths, env).await,
        Commands::Show(args) => handle_show(&paths, args, env),
        Commands::Count => handle_count(&paths, env),
        Commands::Submit(args) => handle_submit(&paths, args, env).await,
        Commands::Reply(args) => handle_reply(&paths, args, env).await,
        Commands::Edit(args) => handle_edit(&paths, args, env).await,
        Commands::Delete(args) => handle_delete(&paths, args, env).await,
    }
}

/// Section options, with the signed-in user taken from the environment when
/// the config names none
pub(crate) fn load_config(paths: &SectionPaths, env: impl EnvProvider) -> Result<SectionConfig> {
    let config = match paths.config {
        Some(ref path) => SectionConfig::load(path)?,
        None => SectionConfig::default(),
    };

    if config.current_user.is_some() {
        return Ok(config);
    }
    Ok(config.with_user(env.current_user()))
}

pub(crate) fn mount_section(paths: &SectionPaths, config: SectionConfig) -> Result<CommentSection> {
    let comments = thread_file::load(&paths.file)?;
    let gateway = FileGateway::new(paths.file.clone(), paths.actions_log.clone());

    Ok(CommentSection::new(comments, config)?.with_gateway(gateway))
}

pub(crate) fn open_section(paths: &SectionPaths, env: impl EnvProvider) -> Result<CommentSection> {
    let config = load_config(paths, env)?;
    mount_section(paths, config)
}

pub(crate) fn require_signed_in(section: &CommentSection) -> Result<()> {
    if section.store().current_user().is_none() {
        anyhow::bail!("{}", LOGIN_PROMPT);
    }
    Ok(())
}

/// Only the author gets edit and delete commands on an entry
pub(crate) fn require_author(section: &CommentSection, target: &Target) -> Result<()> {
    let entry = section.store().find(target)?;
    let owned = section
        .store()
        .current_user()
        .is_some_and(|user| user.id == entry.user_id());
    if !owned {
        anyhow::bail!("Comment {} belongs to another user", target.id());
    }
    Ok(())
}

/// Build a target from a command's id and `--parent` flag
pub(crate) fn target_from_args(id: &str, parent: Option<&String>) -> Target {
    Target::from_parts(id, parent.cloned())
}

/// Take the text from the command line, or from `$EDITOR` when absent
pub(crate) fn compose_text(text: Option<String>, initial: &str, hint: &str) -> Result<String> {
    let text = match text {
        Some(text) => text,
        None => edit_with_editor(initial, hint)?,
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        anyhow::bail!("Comment text cannot be empty");
    }
    Ok(text)
}

fn edit_with_editor(initial: &str, hint: &str) -> Result<String> {
    let template = format!(
        "{}\n# {}\n# Lines starting with '#' are ignored. Save and close to post.\n",
        initial, hint
    );

    let edited = ::edit::edit_with_builder(template, ::edit::Builder::new().suffix(".md"))?;
    Ok(strip_comment_lines(&edited))
}

fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn hook failures into a command error; the local change is already applied
pub(crate) fn report_failures<T>(dispatched: &Dispatched<T>) -> Result<()> {
    if dispatched.is_clean() {
        return Ok(());
    }

    let messages: Vec<String> = dispatched.failures.iter().map(|e| e.to_string()).collect();
    anyhow::bail!("Change applied but not fully saved: {}", messages.join("; "))
}
