//! Regenerating the blog part of the index from the site's blog manifest.
//!
//! The index file mixes hand-maintained records with one generated record per
//! published blog post. A merge drops every generated blog record, then adds
//! the posts listed in `blog-manifest.json` that have been rendered to
//! `blog/<slug>/` and are not story chapters (those have their own pages).
//! Records are handled as raw JSON so unrelated fields survive untouched.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const BLOG_POST_CATEGORY: &str = "Blog Post";

/// Generated excerpts are cut to this many characters.
pub const EXCERPT_LIMIT: usize = 200;

static STORY_CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:pokemon-\d+|guardian-\d+|hpmor-remix-\d+|rationally-writing-\d+|hearts-and-minds|because-prophecy)$",
    )
    .expect("story chapter pattern is valid")
});

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("blog manifest not found at {0}")]
    MissingManifest(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed blog manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    #[error("failed to encode index: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One post as listed in `blog-manifest.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
}

pub fn is_story_chapter(slug: &str) -> bool {
    STORY_CHAPTER.is_match(slug)
}

/// Whether a record was produced by a previous merge.
fn is_generated_blog_record(record: &Value) -> bool {
    let url = record.get("url").and_then(Value::as_str).unwrap_or_default();
    let label = record
        .get("type")
        .or_else(|| record.get("category"))
        .and_then(Value::as_str);

    url.starts_with("/blog/") && label == Some(BLOG_POST_CATEGORY)
}

fn blog_record(post: &ManifestPost) -> Value {
    let excerpt: String = post
        .excerpt
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(EXCERPT_LIMIT)
        .collect();

    json!({
        "title": post.title,
        "url": format!("/blog/{}/", post.slug),
        "category": BLOG_POST_CATEGORY,
        "excerpt": excerpt,
    })
}

/// Replace the generated blog records in `records` with the rendered,
/// non-chapter posts from `posts`. Returns the number of posts added.
pub fn merge_posts(records: &mut Vec<Value>, posts: &[ManifestPost], site_root: &Path) -> usize {
    records.retain(|record| !is_generated_blog_record(record));

    let mut added = 0;
    for post in posts {
        if is_story_chapter(&post.slug) {
            continue;
        }

        if !site_root.join("blog").join(&post.slug).exists() {
            debug!(slug = %post.slug, "skipping unrendered post");
            continue;
        }

        records.push(blog_record(post));
        added += 1;
    }

    added
}

/// Rewrite the index file at `index_path` from the manifest at
/// `manifest_path`. A missing or unreadable index starts from empty.
pub fn merge_manifest_file(
    index_path: &Path,
    manifest_path: &Path,
    site_root: &Path,
) -> Result<usize, ManifestError> {
    if !manifest_path.exists() {
        return Err(ManifestError::MissingManifest(manifest_path.to_path_buf()));
    }

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ManifestError::Io { path, source }
    };

    let manifest = fs_err::read(manifest_path).map_err(io_err(manifest_path))?;
    let posts: Vec<ManifestPost> =
        serde_json::from_slice(&manifest).map_err(ManifestError::Manifest)?;

    let mut records = read_records(index_path);
    let added = merge_posts(&mut records, &posts, site_root);

    let encoded = serde_json::to_string_pretty(&records).map_err(ManifestError::Encode)?;
    fs_err::write(index_path, encoded).map_err(io_err(index_path))?;

    info!(added, total = records.len(), "updated {}", index_path.display());
    Ok(added)
}

fn read_records(index_path: &Path) -> Vec<Value> {
    if !index_path.exists() {
        return Vec::new();
    }

    let parsed = fs_err::read(index_path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice::<Vec<Value>>(&bytes).map_err(|e| e.to_string()));

    match parsed {
        Ok(records) => records,
        Err(e) => {
            warn!("ignoring unreadable index {}: {e}", index_path.display());
            Vec::new()
        }
    }
}
