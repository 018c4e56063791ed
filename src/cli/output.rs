use comment_section::gateway::CommentSection;
use comment_section::view::EntryView;
use console::style;

const RULE: &str = "────────────────────────────────────────";

pub const LOGIN_PROMPT: &str =
    "Log in or sign up to join the conversation (set COMMENT_USER_ID or current_user in the config)";

pub const DELETE_CONFIRMATION: &str =
    "Are you sure? Once you delete this comment it will be gone forever.";

fn format_author_line(row: &EntryView<'_>) -> String {
    let mut line = style(row.entry.full_name()).green().bold().to_string();

    if let Some(ref label) = row.time_label {
        line.push_str(&format!(" {}", style(format!("· {}", label)).dim()));
    }
    line.push_str(&format!("  {}", style(format!("[{}]", row.entry.com_id())).dim()));

    if row.owned {
        line.push_str(&format!(" {}", style("(you)").cyan()));
    }

    line
}

fn format_text(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}\n", indent, line))
        .collect()
}

pub fn format_row(row: &EntryView<'_>, reply_top: bool) -> String {
    let (head, body) = if row.parent_id.is_some() {
        ("    ↳ ", "      ")
    } else {
        ("", "  ")
    };

    let author = format!("{}{}\n", head, format_author_line(row));
    let text = format_text(row.entry.text(), body);

    if reply_top {
        format!("{}{}", text, author)
    } else {
        format!("{}{}", author, text)
    }
}

/// The whole section: header, sign-in hint and every entry
pub fn format_section(section: &CommentSection) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style(section.title()).bold().cyan()));
    output.push_str(&format!("{}\n", style(RULE).dim()));

    if section.store().current_user().is_none() {
        output.push_str(&format!("{}\n", info_message(LOGIN_PROMPT)));
    }

    let view = section.view();
    if view.is_empty() {
        output.push_str(&format!(
            "{}\n",
            style(section.config().no_comments_message()).dim()
        ));
        return output;
    }

    for row in view.rows() {
        if row.parent_id.is_none() {
            output.push('\n');
        }
        output.push_str(&format_row(&row, section.config().reply_top));
    }

    output
}

pub fn success_message(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

pub fn error_message(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), message)
}

pub fn info_message(message: &str) -> String {
    format!("{} {}", style("ℹ").blue().bold(), message)
}
