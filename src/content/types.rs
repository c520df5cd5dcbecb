//! Records stored in the data files.
//!
//! Unknown fields in the JSON are ignored so the data files can carry extra
//! keys for other consumers.

use crate::i18n::{Lang, Localized};
use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};

/// Common surface the query engine works on.
pub trait Record {
    fn id(&self) -> &str;

    fn categories(&self) -> &[String];

    fn tags(&self) -> &[String];

    /// Text searched by the query engine, in the given language.
    fn search_fields(&self, lang: Lang) -> Vec<&str>;

    /// Exact category or tag match.
    fn matches_token(&self, token: &str) -> bool {
        self.categories().iter().any(|c| c == token) || self.tags().iter().any(|t| t == token)
    }
}

/// An entry of `blog-posts.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: Localized,
    #[serde(default)]
    pub excerpt: Localized,
    #[serde(default)]
    pub content: Localized,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl Post {
    /// Parsed publication date; malformed dates count as undated.
    pub fn published(&self) -> Option<DateTimeUtc> {
        self.date.as_deref().and_then(DateTimeUtc::parse)
    }
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn search_fields(&self, lang: Lang) -> Vec<&str> {
        let mut fields = vec![
            self.title.get(lang),
            self.excerpt.get(lang),
            self.content.get(lang),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

/// An entry of `docs.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub id: String,
    pub title: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub content: Localized,
    #[serde(default)]
    pub category: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Doc {
    pub const DEFAULT_ORDER: u32 = 999;
    pub const DEFAULT_ICON: &'static str = "fas fa-file-alt";

    /// `order: 0` counts as unset.
    pub fn sort_key(&self) -> u32 {
        self.order.filter(|&order| order != 0).unwrap_or(Self::DEFAULT_ORDER)
    }

    pub fn icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(Self::DEFAULT_ICON)
    }
}

impl Record for Doc {
    fn id(&self) -> &str {
        &self.id
    }

    fn categories(&self) -> &[String] {
        &[]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn search_fields(&self, lang: Lang) -> Vec<&str> {
        vec![
            self.title.get(lang),
            self.description.get(lang),
            self.content.get(lang),
        ]
    }
}

/// An entry of `projects.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Localized,
    /// `web`, `library`, `api`, ...
    pub category: String,
    /// `active`, `development`, `archived`
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech: Vec<String>,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub forks: u32,
    #[serde(default)]
    pub watchers: u32,
    #[serde(default)]
    pub github: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl Project {
    /// Case-insensitive technology match.
    pub fn uses_tech(&self, tech: &str) -> bool {
        let tech = tech.to_lowercase();
        self.tech.iter().any(|t| t.to_lowercase() == tech)
    }
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn categories(&self) -> &[String] {
        std::slice::from_ref(&self.category)
    }

    fn tags(&self) -> &[String] {
        &self.tech
    }

    fn search_fields(&self, lang: Lang) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.get(lang)];
        fields.extend(self.tech.iter().map(String::as_str));
        fields
    }

    /// Projects filter on category only.
    fn matches_token(&self, token: &str) -> bool {
        self.category == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_json() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": "rust-intro",
                "title": {"tr": "Rust'a Giriş", "en": "Intro to Rust"},
                "excerpt": {"tr": "Özet"},
                "content": {"tr": "İçerik"},
                "categories": ["tutorial"],
                "tags": ["rust"],
                "date": "2024-01-15",
                "author": "ByCh4n",
                "readTime": 5
            }"#,
        )
        .unwrap();

        assert_eq!(post.title.get(Lang::En), "Intro to Rust");
        assert_eq!(post.excerpt.get(Lang::En), "Özet");
        assert_eq!(post.published(), Some(DateTimeUtc::from_ymd(2024, 1, 15)));
        assert!(!post.featured);
        assert!(post.matches_token("tutorial"));
        assert!(post.matches_token("rust"));
        assert!(!post.matches_token("Rust"));
    }

    #[test]
    fn test_post_search_fields_include_tags() {
        let post: Post = serde_json::from_str(
            r#"{"id": "a", "title": {"tr": "Başlık"}, "tags": ["gsap"]}"#,
        )
        .unwrap();
        let fields = post.search_fields(Lang::En);
        assert_eq!(fields, vec!["Başlık", "", "", "gsap"]);
    }

    #[test]
    fn test_doc_defaults() {
        let doc: Doc = serde_json::from_str(
            r#"{"id": "git", "title": {"tr": "Git"}, "category": {"tr": "Araçlar", "en": "Tools"}}"#,
        )
        .unwrap();

        assert_eq!(doc.sort_key(), 999);
        assert_eq!(doc.icon(), "fas fa-file-alt");

        let zero: Doc = serde_json::from_str(r#"{"id": "z", "title": {"tr": "Z"}, "order": 0}"#).unwrap();
        assert_eq!(zero.sort_key(), 999);
        assert_eq!(doc.category.get(Lang::En), "Tools");
        assert!(doc.categories().is_empty());
    }

    #[test]
    fn test_project_tech_and_category() {
        let project: Project = serde_json::from_str(
            r#"{
                "id": "bych4n-website",
                "name": "ByCh4n Group Website",
                "description": "Topluluk web sitesi",
                "category": "web",
                "status": "active",
                "tech": ["HTML5", "JavaScript"]
            }"#,
        )
        .unwrap();

        assert!(project.uses_tech("javascript"));
        assert!(!project.uses_tech("rust"));
        assert!(project.matches_token("web"));
        assert!(!project.matches_token("HTML5"));
        assert_eq!(project.categories(), &["web".to_owned()]);
        assert_eq!(project.description.get(Lang::En), "Topluluk web sitesi");
    }
}
