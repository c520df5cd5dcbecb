//! Loading of the JSON data files.
//!
//! Every load is fail-soft: an unreadable or malformed file is logged and
//! yields an empty collection. Records are ordered once here and never
//! re-sorted by queries.

use super::types::{Doc, Post, Project};
use crate::{config::SiteConfig, i18n::Translations, log};
use serde::de::DeserializeOwned;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read `{0}`: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid JSON in `{0}`: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Read a JSON array of records.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    let text = fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    serde_json::from_str(&text).map_err(|err| ContentError::Json(path.to_path_buf(), err))
}

/// Read a JSON array of records, or an empty list on failure.
pub fn load<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    read(path).unwrap_or_else(|err| {
        log!("content"; "failed to load: {err}");
        Vec::new()
    })
}

/// Newest first; undated posts keep their file order at the end.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_key(|post| std::cmp::Reverse(post.published()));
}

/// Ascending `order`; docs without one sort as 999.
pub fn sort_docs(docs: &mut [Doc]) {
    docs.sort_by_key(Doc::sort_key);
}

/// Everything the pages render from.
#[derive(Debug, Clone, Default)]
pub struct ContentStores {
    pub posts: Vec<Post>,
    pub docs: Vec<Doc>,
    pub projects: Vec<Project>,
    pub translations: Translations,
}

impl ContentStores {
    /// Load all data files in parallel.
    pub fn load(config: &SiteConfig) -> Self {
        let files = &config.build.files;
        let ((mut posts, mut docs), (projects, translations)) = rayon::join(
            || {
                rayon::join(
                    || load::<Post>(&config.data_file(&files.posts)),
                    || load::<Doc>(&config.data_file(&files.docs)),
                )
            },
            || {
                rayon::join(
                    || load::<Project>(&config.data_file(&files.projects)),
                    || Translations::load(&config.data_file(&files.translations)),
                )
            },
        );

        sort_posts(&mut posts);
        sort_docs(&mut docs);

        log!(
            "content";
            "{} posts, {} docs, {} projects",
            posts.len(),
            docs.len(),
            projects.len()
        );

        Self {
            posts,
            docs,
            projects,
            translations,
        }
    }

    /// Build from in-memory records, applying the load-time ordering.
    pub fn from_records(
        mut posts: Vec<Post>,
        mut docs: Vec<Doc>,
        projects: Vec<Project>,
        translations: Translations,
    ) -> Self {
        sort_posts(&mut posts);
        sort_docs(&mut docs);
        Self {
            posts,
            docs,
            projects,
            translations,
        }
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn doc_index(&self, id: &str) -> Option<usize> {
        self.docs.iter().position(|doc| doc.id == id)
    }

    pub fn doc(&self, id: &str) -> Option<&Doc> {
        self.doc_index(id).map(|index| &self.docs[index])
    }

    /// Neighbours of a doc in the global order.
    pub fn doc_neighbours(&self, index: usize) -> (Option<&Doc>, Option<&Doc>) {
        let prev = index.checked_sub(1).and_then(|i| self.docs.get(i));
        let next = self.docs.get(index + 1);
        (prev, next)
    }
}
