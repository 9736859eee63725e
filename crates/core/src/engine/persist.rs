//! Writing finished posts to the posts directory.

use super::error::{RunError, RunResult};
use crate::pipeline::GeneratedPost;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `post` into `posts_dir` and return its absolute path.
///
/// An existing file with the same name is overwritten.
pub async fn save_post(posts_dir: &Path, post: &GeneratedPost) -> RunResult<PathBuf> {
    let path = posts_dir.join(&post.filename);
    let persistence = |source| RunError::Persistence {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(posts_dir)
        .await
        .map_err(persistence)?;
    tokio::fs::write(&path, &post.document)
        .await
        .map_err(persistence)?;

    let absolute = tokio::fs::canonicalize(&path)
        .await
        .map_err(persistence)?;
    info!(path = %absolute.display(), bytes = post.document.len(), "Post saved");
    Ok(absolute)
}
