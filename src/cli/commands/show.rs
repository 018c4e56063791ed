use anyhow::Result;
use clap::Args;
use comment_section::common::EnvProvider;

use crate::cli::output::format_section;

use super::{SectionPaths, load_config, mount_section, open_section};

#[derive(Args)]
pub struct ShowArgs {
    /// Hide relative timestamps
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn handle_show(paths: &SectionPaths, args: ShowArgs, env: impl EnvProvider) -> Result<()> {
    let mut config = load_config(paths, env)?;
    if args.no_timestamp {
        config.show_timestamp = false;
    }
    let section = mount_section(paths, config)?;

    print!("{}", format_section(&section));
    Ok(())
}

pub fn handle_count(paths: &SectionPaths, env: impl EnvProvider) -> Result<()> {
    let section = open_section(paths, env)?;
    println!("{}", section.title());
    Ok(())
}
