//! Site initialization module.
//!
//! Creates a new site with default configuration and sample data.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const STYLESHEET: &str = "\
:root { --primary: #6c5ce7; --bg: #0f0f1a; --text: #e8e8f0; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
.container { max-width: 1200px; margin: 0 auto; padding: 0 1.5rem; }
.nav-link.active { color: var(--primary); }
";

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `bych4n init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(config)?;
    init_default_config(config)?;
    init_sample_data(config)?;
    init_ignored_files(root, &[config.build.output.as_path(), config.i18n.storage.as_path()])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))
}

/// Create site directory structure
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    for path in [&config.build.data, &config.build.assets.join("css")] {
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `bych4n init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(path).with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

fn init_sample_data(config: &SiteConfig) -> Result<()> {
    let files = &config.build.files;
    for (file, value) in [
        (&files.translations, sample_translations()),
        (&files.posts, sample_posts()),
        (&files.docs, sample_docs()),
        (&files.projects, sample_projects()),
    ] {
        let path = config.data_file(file);
        fs::write(&path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let css = config.build.assets.join("css/style.css");
    fs::write(&css, STYLESHEET).with_context(|| format!("Failed to write {}", css.display()))
}

/// Initialize .gitignore and .ignore files with paths relative to `root`
pub fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p))
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}"))
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

// ============================================================================
// Sample Data
// ============================================================================

fn sample_translations() -> Value {
    json!({
        "tr": {
            "site": {"title": "ByCh4n Group", "description": "Açık kaynak topluluğu"},
            "nav": {"home": "Ana Sayfa", "blog": "Blog", "docs": "Dökümanlar", "projects": "Projeler", "contact": "İletişim"},
            "hero": {
                "title": "ByCh4n Group",
                "subtitle": "Birlikte Öğreniyoruz",
                "description": "Yazılım geliştirme, açık kaynak ve teknoloji üzerine içerikler.",
                "cta": {"primary": "Blog'u Keşfet", "secondary": "Dökümanlar"}
            },
            "features": {
                "title": "Neler Yapıyoruz?",
                "items": [
                    {"icon": "fas fa-code", "title": "Açık Kaynak", "description": "Topluluk için projeler geliştiriyoruz."},
                    {"icon": "fas fa-book", "title": "Eğitim", "description": "Öğrendiklerimizi yazıya döküyoruz."}
                ]
            },
            "contact": {
                "title": "Bize Ulaşın",
                "description": "Sorularınız ve önerileriniz için yazın.",
                "faq_title": "Sıkça Sorulan Sorular",
                "faq": [
                    {"question": "Topluluğa nasıl katılırım?", "answer": "GitHub organizasyonumuzu takip edin."}
                ]
            },
            "footer": {"copyright": "Tüm hakları saklıdır"}
        },
        "en": {
            "site": {"title": "ByCh4n Group", "description": "Open source community"},
            "nav": {"home": "Home", "blog": "Blog", "docs": "Docs", "projects": "Projects", "contact": "Contact"},
            "hero": {
                "title": "ByCh4n Group",
                "subtitle": "Learning Together",
                "description": "Content on software development, open source and technology.",
                "cta": {"primary": "Explore the Blog", "secondary": "Documentation"}
            },
            "features": {
                "title": "What We Do",
                "items": [
                    {"icon": "fas fa-code", "title": "Open Source", "description": "We build projects for the community."},
                    {"icon": "fas fa-book", "title": "Education", "description": "We write down what we learn."}
                ]
            },
            "contact": {
                "title": "Contact Us",
                "description": "Write to us with questions and suggestions.",
                "faq_title": "Frequently Asked Questions",
                "faq": [
                    {"question": "How do I join the community?", "answer": "Follow our GitHub organization."}
                ]
            },
            "footer": {"copyright": "All rights reserved"}
        }
    })
}

fn sample_posts() -> Value {
    json!([
        {
            "id": "python-basics",
            "title": {"tr": "Python Temelleri", "en": "Python Basics"},
            "excerpt": {"tr": "Python ile programlamaya giriş.", "en": "An introduction to programming with Python."},
            "content": {
                "tr": "## Değişkenler\n\nPython'da değişkenler dinamik tiplidir.\n\n```python\nname = \"ByCh4n\"\n```",
                "en": "## Variables\n\nVariables in Python are dynamically typed.\n\n```python\nname = \"ByCh4n\"\n```"
            },
            "categories": ["python", "tutorial"],
            "tags": ["python", "beginner"],
            "date": "2024-01-15",
            "author": "ByCh4n Group",
            "featured": true
        },
        {
            "id": "open-source-contributing",
            "title": {"tr": "Açık Kaynağa Katkı", "en": "Contributing to Open Source"},
            "excerpt": {"tr": "İlk pull request'inizi gönderin.", "en": "Send your first pull request."},
            "content": {
                "tr": "## Başlarken\n\nBir depo seçin ve **fork** edin.",
                "en": "## Getting Started\n\nPick a repository and **fork** it."
            },
            "categories": ["open-source"],
            "tags": ["git", "github"],
            "date": "2024-01-10",
            "author": "ByCh4n Group"
        }
    ])
}

fn sample_docs() -> Value {
    json!([
        {
            "id": "getting-started",
            "title": {"tr": "Başlangıç", "en": "Getting Started"},
            "description": {"tr": "Topluluğa ilk adım.", "en": "First steps in the community."},
            "content": {
                "tr": "# Başlangıç\n\n## Kurulum\n\nDepoyu klonlayın.\n\n## Katkı\n\nSorunları inceleyin.",
                "en": "# Getting Started\n\n## Setup\n\nClone the repository.\n\n## Contributing\n\nLook at the issues."
            },
            "category": {"tr": "Genel", "en": "General"},
            "icon": "fas fa-rocket",
            "order": 1
        },
        {
            "id": "git-basics",
            "title": {"tr": "Git Temelleri", "en": "Git Basics"},
            "description": {"tr": "Sürüm kontrolüne giriş.", "en": "An introduction to version control."},
            "content": {
                "tr": "# Git Temelleri\n\n```bash\ngit clone <url>\n```",
                "en": "# Git Basics\n\n```bash\ngit clone <url>\n```"
            },
            "category": {"tr": "Araçlar", "en": "Tools"},
            "icon": "fab fa-git-alt",
            "order": 2
        }
    ])
}

fn sample_projects() -> Value {
    json!([
        {
            "id": "bych4n-website",
            "name": "ByCh4n Group Website",
            "description": {
                "tr": "Modern, animasyonlu ve tamamen statik topluluk web sitesi",
                "en": "Modern, animated and fully static community website"
            },
            "category": "web",
            "status": "active",
            "tech": ["HTML5", "CSS3", "JavaScript", "GSAP"],
            "stars": 45,
            "forks": 12,
            "watchers": 250,
            "github": "https://github.com/ByCh4n-Group/ByCh4n-Group.github.io",
            "demo": "https://bych4n-group.github.io",
            "featured": true
        },
        {
            "id": "animation-library",
            "name": "Animation Library",
            "description": {
                "tr": "Hafif ve performanslı CSS/JS animasyon kütüphanesi",
                "en": "Lightweight, fast CSS/JS animation library"
            },
            "category": "library",
            "status": "active",
            "tech": ["CSS", "JavaScript", "GSAP"],
            "stars": 68,
            "forks": 22,
            "watchers": 450,
            "github": "https://github.com/ByCh4n-Group/animation-library",
            "demo": "https://bych4n-group.github.io/animation-library"
        },
        {
            "id": "rest-api-starter",
            "name": "REST API Starter",
            "description": {
                "tr": "Node.js ve Express ile hazır REST API şablonu",
                "en": "Ready-made REST API template with Node.js and Express"
            },
            "category": "api",
            "status": "development",
            "tech": ["Node.js", "Express", "MongoDB"],
            "stars": 42,
            "forks": 15,
            "watchers": 320,
            "github": "https://github.com/ByCh4n-Group/rest-api-starter"
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStores, Doc, Post, Project, store};

    fn config(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join("bych4n.toml");
        config.build.data = root.join("data");
        config.build.assets = root.join("assets");
        config.build.output = root.join("public");
        config.i18n.storage = root.join(".bych4n/storage.json");
        config
    }

    #[test]
    fn test_new_site_writes_loadable_data() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        let config = config(&root);
        new_site(&config, true).unwrap();

        let loaded = SiteConfig::from_path(&config.config_path).unwrap();
        assert_eq!(loaded.base.title, "ByCh4n Group");

        let files = &config.build.files;
        let posts: Vec<Post> = store::read(&config.data_file(&files.posts)).unwrap();
        let docs: Vec<Doc> = store::read(&config.data_file(&files.docs)).unwrap();
        let projects: Vec<Project> = store::read(&config.data_file(&files.projects)).unwrap();
        assert_eq!((posts.len(), docs.len(), projects.len()), (2, 2, 3));

        let content = ContentStores::load(&config);
        assert_eq!(content.translations.get(crate::i18n::Lang::En, "nav.home"), Some("Home"));
        assert!(root.join("assets/css/style.css").exists());

        let ignore = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(ignore, "/public\n/.bych4n/storage.json");
    }

    #[test]
    fn test_existing_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        let config = config(dir.path());
        assert!(new_site(&config, false).is_err());
    }

    #[test]
    fn test_existing_data_dir_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fs::create_dir_all(&config.build.data).unwrap();
        let err = new_site(&config, true).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
