use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use comment_section::common::{
    Comment, CommentAction, DeleteAction, EditAction, ReplyAction, SubmitAction,
};
use comment_section::gateway::ActionGateway;
use comment_section::store::GatewayResult;
use tokio::io::AsyncWriteExt;

/// Read a thread from its JSON file. A missing or blank file is an empty thread.
pub fn load(path: &Path) -> Result<Vec<Comment>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&json)
        .with_context(|| format!("Invalid comment data in {}", path.display()))
}

/// Host hooks of the terminal front-end.
///
/// Every snapshot is written back to the thread file (through a temporary
/// file and a rename, so a failed write never leaves half a file). Actions
/// are appended as JSON lines to the optional action log.
pub struct FileGateway {
    path: PathBuf,
    actions_log: Option<PathBuf>,
}

impl FileGateway {
    pub fn new(path: PathBuf, actions_log: Option<PathBuf>) -> Self {
        Self { path, actions_log }
    }

    async fn append(&self, action: CommentAction) -> GatewayResult<()> {
        let Some(ref log_path) = self.actions_log else {
            return Ok(());
        };

        let mut line = serde_json::to_string(&action)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl ActionGateway for FileGateway {
    async fn on_submit(&self, action: &SubmitAction) -> GatewayResult<()> {
        self.append(CommentAction::Submitted(action.clone())).await
    }

    async fn on_edit(&self, action: &EditAction) -> GatewayResult<()> {
        self.append(CommentAction::Edited(action.clone())).await
    }

    async fn on_reply(&self, action: &ReplyAction) -> GatewayResult<()> {
        self.append(CommentAction::Replied(action.clone())).await
    }

    async fn on_delete(&self, action: &DeleteAction) -> GatewayResult<()> {
        self.append(CommentAction::Deleted(action.clone())).await
    }

    async fn on_data_change(&self, snapshot: Arc<Vec<Comment>>) -> GatewayResult<()> {
        let json = serde_json::to_string_pretty(snapshot.as_slice())?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("wrote {} comments to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use comment_section::common::CurrentUser;
    use tempfile::TempDir;

    fn test_snapshot() -> Arc<Vec<Comment>> {
        let user = CurrentUser::new("u1", "Ada Lovelace", "ada.png");
        Arc::new(vec![Comment::new(
            "c1".to_string(),
            "hello".to_string(),
            &user,
            Utc::now(),
        )])
    }

    #[test]
    fn test_load_missing_and_blank_files() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("comments.json");
        assert!(load(&path).unwrap().is_empty());

        std::fs::write(&path, "  \n").unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_shape() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("comments.json");
        std::fs::write(&path, r#"[{"comId": "c1", "body": "hi"}]"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid comment data"));
    }

    #[tokio::test]
    async fn test_snapshot_written_and_reloaded() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("comments.json");
        let gateway = FileGateway::new(path.clone(), None);
        let snapshot = test_snapshot();

        gateway.on_data_change(Arc::clone(&snapshot)).await.unwrap();

        assert_eq!(load(&path).unwrap(), *snapshot);
        assert!(!temp_dir.path().join("comments.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_actions_appended_as_json_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let log_path = temp_dir.path().join("actions.jsonl");
        let gateway = FileGateway::new(temp_dir.path().join("comments.json"), Some(log_path.clone()));
        let user = CurrentUser::new("u1", "Ada Lovelace", "ada.png");

        let first = CommentAction::submitted(&user, "c1".to_string(), "hello".to_string());
        let second = CommentAction::deleted("c1".to_string(), None);
        gateway.dispatch(&first).await.unwrap();
        gateway.dispatch(&second).await.unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let parsed: Vec<CommentAction> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_unwritable_thread_file_reports_error() {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("missing-dir").join("comments.json");
        let gateway = FileGateway::new(path, None);

        let result = gateway.on_data_change(test_snapshot()).await;
        assert!(result.is_err());
    }
}
