//! Card, sidebar and article markup.
//!
//! Every interpolated value goes through [`escape`]. Links carry the query
//! string the dev server understands (`?filter=`, `?doc=`) so the markup also
//! works without listeners.

use super::fragment::{Markup, Stamp};
use super::html::{classes, escape};
use crate::{
    content::{
        Doc, Post, Project,
        query::{DocGroup, TagWeight},
    },
    context::SiteContext,
    controller::action::{Action, Binding, Event},
    i18n::{Phrase, category_label, status_label},
    markdown::Rendered,
};
use serde_json::Value;

// ============================================================================
// Blog
// ============================================================================

pub fn blog_card(ctx: &SiteContext<'_>, post: &Post, stamp: Stamp) -> Markup {
    let lang = ctx.lang();
    let title = escape(post.title.get(lang));
    let href = ctx.href(&format!("/blog/{}.html", post.id));
    let image = post
        .image
        .as_deref()
        .unwrap_or(&ctx.config.listing.default_image);

    let featured = if post.featured {
        format!(
            r#"<div class="featured-badge"><i class="fas fa-star"></i>{}</div>"#,
            ctx.phrase(Phrase::Featured)
        )
    } else {
        String::new()
    };
    let tags: String = post
        .tags
        .iter()
        .take(3)
        .map(|tag| format!(r#"<span class="blog-tag">#{}</span>"#, escape(tag)))
        .collect();
    let categories: String = post
        .categories
        .iter()
        .take(2)
        .map(|cat| format!(r#"<span class="blog-category">{}</span>"#, escape(cat)))
        .collect();

    let html = format!(
        r#"<article {attrs} data-category="{data_categories}" data-tags="{data_tags}">{featured}<div class="blog-image"><img src="{image}" alt="{title}" loading="lazy"><div class="blog-overlay"><a href="{href}" class="btn btn-white btn-sm">{read_more} <i class="fas fa-arrow-right"></i></a></div></div><div class="blog-content"><div class="blog-meta"><span class="blog-date"><i class="fas fa-calendar"></i> {date}</span><span class="blog-author"><i class="fas fa-user"></i> {author}</span><span class="blog-read-time"><i class="fas fa-clock"></i> {minutes} {unit}</span></div><h3 class="blog-title"><a href="{href}">{title}</a></h3><p class="blog-excerpt">{excerpt}</p><div class="blog-footer"><div class="blog-tags">{tags}</div><div class="blog-categories">{categories}</div></div></div></article>"#,
        attrs = stamp.attrs("blog-card"),
        data_categories = escape(&post.categories.join(" ")),
        data_tags = escape(&post.tags.join(" ")),
        image = escape(image),
        href = escape(&href),
        read_more = ctx.phrase(Phrase::ReadMore),
        date = escape(&ctx.format_date(post.date.as_deref())),
        author = escape(&post.author),
        minutes = ctx.read_time(post.content.get(lang)),
        unit = ctx.phrase(Phrase::MinutesShort),
        excerpt = escape(post.excerpt.get(lang)),
    );
    Markup::new(html)
}

/// Blog categories with post counts; the active one is highlighted.
pub fn category_list(ctx: &SiteContext<'_>, counts: &[(String, usize)], active: &str) -> Markup {
    let mut out = Markup::default();
    for (category, count) in counts {
        let token = escape(category);
        let class = classes(["category-link", if category == active { "active" } else { "" }]);
        out.push(
            Markup::new(format!(
                r#"<li><a href="?filter={query}" class="{class}" data-filter="{token}">{label} <span class="count">({count})</span></a></li>"#,
                query = urlencoding::encode(category),
                label = escape(&category_label(category, ctx.lang())),
            ))
            .bind(Binding::click(
                format!(r#".category-link[data-filter="{token}"]"#),
                Action::SetFilter(category.clone()),
            )),
        );
    }
    out
}

pub fn tag_cloud(tags: &[TagWeight]) -> Markup {
    let mut out = Markup::default();
    for weight in tags {
        let token = escape(&weight.tag);
        out.push(
            Markup::new(format!(
                r#"<a href="?filter={query}" class="tag" data-filter="{token}" style="font-size: {size:.1}em">#{token}</a>"#,
                query = urlencoding::encode(&weight.tag),
                size = weight.size,
            ))
            .bind(Binding::click(
                format!(r#".tag[data-filter="{token}"]"#),
                Action::SetFilter(weight.tag.clone()),
            )),
        );
    }
    out
}

pub fn recent_posts(ctx: &SiteContext<'_>, posts: &[Post]) -> Markup {
    let lang = ctx.lang();
    let html = posts
        .iter()
        .map(|post| {
            let title = escape(post.title.get(lang));
            format!(
                r#"<div class="recent-post"><div class="recent-post-image"><img src="{image}" alt="{title}" loading="lazy"></div><div class="recent-post-content"><h5 class="recent-post-title"><a href="{href}">{title}</a></h5><div class="recent-post-date"><i class="fas fa-calendar"></i> {date}</div></div></div>"#,
                image = escape(post.image.as_deref().unwrap_or(&ctx.config.listing.default_image)),
                href = escape(&ctx.href(&format!("/blog/{}.html", post.id))),
                date = escape(&ctx.format_date(post.date.as_deref())),
            )
        })
        .collect::<String>();
    Markup::new(html)
}

/// The "load more" button, hidden when nothing is left to reveal.
pub fn load_more(ctx: &SiteContext<'_>, visible: bool) -> Markup {
    let style = if visible { "" } else { r#" style="display: none""# };
    Markup::new(format!(
        r#"<button id="load-more-btn" class="btn btn-outline"{style}>{}</button>"#,
        ctx.phrase(Phrase::LoadMore)
    ))
    .bind(Binding::click("#load-more-btn", Action::LoadMore))
}

pub fn post_article(ctx: &SiteContext<'_>, post: &Post, body: &Rendered) -> Markup {
    let lang = ctx.lang();
    let tags: String = post
        .tags
        .iter()
        .map(|tag| {
            format!(
                r#"<a href="{}?filter={}" class="blog-tag">#{}</a>"#,
                escape(&ctx.href("/blog.html")),
                urlencoding::encode(tag),
                escape(tag)
            )
        })
        .collect();

    Markup::new(format!(
        r#"<article class="post-article"><header class="post-header"><h1 class="post-title">{title}</h1><div class="blog-meta"><span class="blog-date"><i class="fas fa-calendar"></i> {date}</span><span class="blog-author"><i class="fas fa-user"></i> {author}</span><span class="blog-read-time"><i class="fas fa-clock"></i> {minutes} {unit}</span></div></header><div class="post-content">{body}</div><footer class="blog-tags">{tags}</footer></article>"#,
        title = escape(post.title.get(lang)),
        date = escape(&ctx.format_date(post.date.as_deref())),
        author = escape(&post.author),
        minutes = ctx.read_time(post.content.get(lang)),
        unit = ctx.phrase(Phrase::MinutesShort),
        body = body.html,
    ))
}

// ============================================================================
// Shared
// ============================================================================

/// Message with a button that resets the listing.
pub fn empty_state(message: &str, button: &str, button_class: &str, action: Action) -> Markup {
    Markup::new(format!(
        r#"<div class="empty-state"><div class="empty-icon"><i class="fas fa-search"></i></div><h3 class="empty-title">{}</h3><a href="?" class="btn btn-primary {button_class}">{}</a></div>"#,
        escape(message),
        escape(button),
    ))
    .bind(Binding::click(format!(".{button_class}"), action))
}

/// Search form; typing searches, submitting re-runs the query.
pub fn search_box(id: &str, value: &str, placeholder: &str) -> Markup {
    Markup::new(format!(
        r#"<form class="search-box" id="{id}-form" method="get"><input type="search" id="{id}" name="search" value="{}" placeholder="{}"><button type="submit" class="search-btn"><i class="fas fa-search"></i></button></form>"#,
        escape(value),
        escape(placeholder),
    ))
    .bind(Binding::new(format!("#{id}"), Event::Input, Action::SetSearch(String::new())))
    .bind(Binding::new(format!("#{id}-form"), Event::Submit, Action::Submit))
}

// ============================================================================
// Docs
// ============================================================================

pub fn doc_card(ctx: &SiteContext<'_>, doc: &Doc, stamp: Stamp) -> Markup {
    let lang = ctx.lang();
    let id = escape(&doc.id);
    Markup::new(format!(
        r#"<a href="?doc={query}" {attrs} data-doc-id="{id}"><div class="doc-icon"><i class="{icon}"></i></div><div class="doc-content"><h3 class="doc-title">{title}</h3><p class="doc-description">{description}</p><div class="doc-meta"><span class="doc-category">{category}</span><span class="doc-read-time"><i class="fas fa-clock"></i> {minutes} {unit}</span></div></div><div class="doc-arrow"><i class="fas fa-chevron-right"></i></div></a>"#,
        query = urlencoding::encode(&doc.id),
        attrs = stamp.attrs("doc-card"),
        icon = escape(doc.icon()),
        title = escape(doc.title.get(lang)),
        description = escape(doc.description.get(lang)),
        category = escape(doc.category.get(lang)),
        minutes = ctx.read_time(doc.content.get(lang)),
        unit = ctx.phrase(Phrase::MinutesShort),
    ))
    .bind(Binding::click(
        format!(r#".doc-card[data-doc-id="{id}"]"#),
        Action::ShowDocument(doc.id.clone()),
    ))
}

/// A category heading with its cards.
pub fn docs_category(group: &DocGroup<'_>, cards: Markup) -> Markup {
    Markup {
        html: format!(
            r#"<div class="docs-category"><h2 class="category-title"><i class="fas fa-folder"></i> {}</h2><div class="docs-category-grid">{}</div></div>"#,
            escape(&group.category),
            cards.html
        ),
        bindings: cards.bindings,
    }
}

/// Sidebar navigation over all docs; `active` marks the open one.
pub fn docs_nav(ctx: &SiteContext<'_>, groups: &[DocGroup<'_>], active: Option<&str>) -> Markup {
    let lang = ctx.lang();
    let docs_href = escape(&ctx.href("/docs.html"));
    let mut out = Markup::new(format!(
        r#"<div class="nav-section"><a href="{docs_href}" class="back-to-docs"><i class="fas fa-arrow-left"></i> {}</a></div>"#,
        ctx.phrase(Phrase::AllDocs)
    ))
    .bind(Binding::click(".back-to-docs", Action::Back));

    for group in groups {
        let mut links = Markup::default();
        for doc in &group.docs {
            let id = escape(&doc.id);
            let class = classes(["nav-link", if active == Some(doc.id.as_str()) { "active" } else { "" }]);
            links.push(
                Markup::new(format!(
                    r#"<li><a href="{docs_href}?doc={query}" class="{class}" data-doc-id="{id}"><i class="{icon}"></i> {title}</a></li>"#,
                    query = urlencoding::encode(&doc.id),
                    icon = escape(doc.icon()),
                    title = escape(doc.title.get(lang)),
                ))
                .bind(Binding::click(
                    format!(r#".nav-link[data-doc-id="{id}"]"#),
                    Action::ShowDocument(doc.id.clone()),
                )),
            );
        }
        out.push(Markup {
            html: format!(
                r#"<div class="nav-section"><h4 class="nav-section-title">{}</h4><ul class="nav-links">{}</ul></div>"#,
                escape(&group.category),
                links.html
            ),
            bindings: links.bindings,
        });
    }
    out
}

/// Opened document: header, body, actions, table of contents, prev/next.
pub fn doc_article(
    ctx: &SiteContext<'_>,
    doc: &Doc,
    body: &Rendered,
    prev: Option<&Doc>,
    next: Option<&Doc>,
    share_link: &str,
) -> Markup {
    let lang = ctx.lang();
    let category = escape(doc.category.get(lang));

    let toc: String = body
        .toc
        .iter()
        .map(|entry| {
            format!(
                r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                entry.level,
                entry.id,
                escape(&entry.text)
            )
        })
        .collect();
    let toc = if toc.is_empty() {
        String::new()
    } else {
        format!(
            r#"<nav class="doc-toc"><h4>{}</h4><ul>{toc}</ul></nav>"#,
            ctx.phrase(Phrase::Contents)
        )
    };

    let mut out = Markup::new(format!(
        r#"<div class="doc-header"><span class="current-doc-category">{category}</span><h1 class="doc-title">{title}</h1><div class="doc-actions"><button id="copy-link-btn" class="btn btn-sm" data-link="{link}"><i class="fas fa-link"></i> {copy}</button><button id="print-doc-btn" class="btn btn-sm"><i class="fas fa-print"></i> {print}</button></div></div>{toc}<div id="doc-content-area" class="doc-body">{body}</div>"#,
        title = escape(doc.title.get(lang)),
        link = escape(share_link),
        copy = ctx.phrase(Phrase::CopyLink),
        print = ctx.phrase(Phrase::Print),
        body = body.html,
    ))
    .bind(Binding::click("#copy-link-btn", Action::CopyLink(doc.id.clone())));

    let mut nav = String::from(r#"<div class="doc-navigation">"#);
    for (id, label, neighbour) in [
        ("prev-doc", Phrase::Previous, prev),
        ("next-doc", Phrase::Next, next),
    ] {
        match neighbour {
            Some(neighbour) => {
                nav.push_str(&format!(
                    r#"<a id="{id}" class="doc-nav-link" href="?doc={query}"><span class="nav-label">{label}</span><span class="nav-title">{title}</span></a>"#,
                    query = urlencoding::encode(&neighbour.id),
                    label = ctx.phrase(label),
                    title = escape(neighbour.title.get(lang)),
                ));
                out.bindings.push(Binding::click(
                    format!("#{id}"),
                    Action::ShowDocument(neighbour.id.clone()),
                ));
            }
            None => nav.push_str(&format!(r#"<a id="{id}" class="doc-nav-link" style="display: none"></a>"#)),
        }
    }
    nav.push_str("</div>");
    out.html.push_str(&nav);
    out
}

// ============================================================================
// Projects
// ============================================================================

/// `dimmed` cards stay visible but faded while a tech/status filter is on.
pub fn project_card(ctx: &SiteContext<'_>, project: &Project, stamp: Stamp, dimmed: bool) -> Markup {
    let lang = ctx.lang();
    let status = status_label(&project.status, lang);
    let class = classes([
        "project-card",
        if project.featured { "featured" } else { "" },
        if dimmed { "dimmed" } else { "" },
    ]);

    let mut out = Markup::default();
    let tech: String = project
        .tech
        .iter()
        .map(|tech| {
            let token = escape(tech);
            out.bindings.push(Binding::click(
                format!(r#".tech-tag[data-tech="{token}"]"#),
                Action::FilterTech(tech.clone()),
            ));
            format!(r#"<span class="tech-tag" data-tech="{token}">{token}</span>"#)
        })
        .collect();
    out.bindings.push(Binding::click(
        format!(r#".status-badge[data-status="{}"]"#, escape(&project.status)),
        Action::FilterStatus(project.status.clone()),
    ));

    let demo = project
        .demo
        .as_deref()
        .map(|demo| {
            format!(
                r#"<a href="{}" class="btn btn-sm btn-primary" target="_blank" rel="noopener"><i class="fas fa-external-link-alt"></i> {}</a>"#,
                escape(demo),
                ctx.phrase(Phrase::LiveDemo)
            )
        })
        .unwrap_or_default();

    out.html = format!(
        r#"<div {attrs} data-category="{category}" data-id="{id}"><div class="project-header"><h3 class="project-name">{name}</h3><span class="status-badge status-{status_slug}" data-status="{status_slug}">{status}</span></div><p class="project-description">{description}</p><div class="project-tech">{tech}</div><div class="project-stats"><span><i class="fas fa-star"></i> {stars}</span><span><i class="fas fa-code-branch"></i> {forks}</span><span><i class="fas fa-eye"></i> {watchers}</span></div><div class="project-links"><a href="{github}" class="btn btn-sm btn-outline" target="_blank" rel="noopener"><i class="fab fa-github"></i> {source}</a>{demo}</div></div>"#,
        attrs = stamp.attrs(&class),
        category = escape(&project.category),
        id = escape(&project.id),
        name = escape(&project.name),
        status_slug = escape(&project.status),
        status = escape(&status),
        description = escape(project.description.get(lang)),
        stars = project.stars,
        forks = project.forks,
        watchers = project.watchers,
        github = escape(&project.github),
        source = ctx.phrase(Phrase::SourceCode),
    );
    out
}

/// `Teknoloji: GSAP` banner with a clear button.
pub fn filter_indicator(text: &str) -> Markup {
    Markup::new(format!(
        r#"<div class="filter-indicator"><span>{}</span><a href="?" class="clear-filter"><i class="fas fa-times"></i></a></div>"#,
        escape(text)
    ))
    .bind(Binding::click(".clear-filter", Action::ClearFilters))
}

// ============================================================================
// Home
// ============================================================================

/// One entry of `features.items` in the translations.
pub fn feature_card(feature: &Value, stamp: Stamp) -> Markup {
    let field = |key: &str| escape(feature.get(key).and_then(Value::as_str).unwrap_or_default());
    Markup::new(format!(
        r#"<div {}><div class="feature-icon"><i class="{}"></i></div><h3 class="feature-title">{}</h3><p class="feature-description">{}</p></div>"#,
        stamp.attrs("feature-card"),
        field("icon"),
        field("title"),
        field("description"),
    ))
}

/// Animated counter showing `shown` on its way to `count`.
pub fn stat_counter(label: &str, count: usize, shown: u64) -> String {
    format!(
        r#"<div class="stat-item"><span class="stat-number" data-count="{count}">{shown}</span><span class="stat-label">{}</span></div>"#,
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SiteConfig,
        content::{ContentStores, query::group_by_category},
        i18n::{Lang, PreferenceStore},
        markdown,
    };
    use serde_json::json;

    struct Fixture {
        config: SiteConfig,
        content: ContentStores,
        prefs: PreferenceStore,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: SiteConfig::default(),
                content: ContentStores::default(),
                prefs: PreferenceStore::new("/nonexistent/prefs.json"),
            }
        }

        fn ctx(&self, lang: Lang) -> SiteContext<'_> {
            SiteContext::new(&self.config, &self.content, &self.prefs, lang)
        }
    }

    fn post() -> Post {
        serde_json::from_value(json!({
            "id": "gsap-intro",
            "title": {"tr": "GSAP <Giriş>", "en": "Intro to GSAP"},
            "excerpt": {"tr": "Animasyonlar"},
            "content": {"tr": "bir iki üç"},
            "categories": ["javascript", "tutorial", "web-development"],
            "tags": ["gsap", "animation", "css", "js"],
            "date": "2024-01-15",
            "author": "ByCh4n",
            "featured": true
        }))
        .unwrap()
    }

    fn docs() -> Vec<Doc> {
        serde_json::from_value(json!([
            {"id": "getting-started", "title": {"tr": "Başlangıç"}, "category": {"tr": "Temel"}, "order": 1},
            {"id": "git", "title": {"tr": "Git"}, "category": {"tr": "Araçlar"}, "icon": "fab fa-git", "order": 2},
        ]))
        .unwrap()
    }

    #[test]
    fn test_blog_card() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Lang::Tr);
        let card = blog_card(&ctx, &post(), Stamp::new(1));

        assert!(card.html.contains(r#"class="blog-card entrance" style="--stagger: 0.10s""#));
        assert!(card.html.contains(r#"<div class="featured-badge"><i class="fas fa-star"></i>Öne Çıkan</div>"#));
        assert!(card.html.contains("GSAP &lt;Giriş&gt;"));
        assert!(card.html.contains(r#"src="/assets/images/blog/default.jpg""#));
        assert!(card.html.contains(r#"href="/blog/gsap-intro.html""#));
        assert!(card.html.contains("15 Ocak 2024"));
        assert!(card.html.contains("1 dk"));
        assert!(card.html.contains("#css"));
        assert!(!card.html.contains("#js"));
        assert!(card.html.contains(r#"<span class="blog-category">tutorial</span>"#));
        assert!(!card.html.contains(r#"<span class="blog-category">web-development</span>"#));
    }

    #[test]
    fn test_blog_card_english_links() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Lang::En);
        let card = blog_card(&ctx, &post(), Stamp::new(0));
        assert!(card.html.contains(r#"href="/en/blog/gsap-intro.html""#));
        assert!(card.html.contains("Intro to GSAP"));
        assert!(card.html.contains("Read More"));
        assert!(card.html.contains("1 min"));
    }

    #[test]
    fn test_category_list_and_tags() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Lang::Tr);
        let counts = vec![("tutorial".to_owned(), 3), ("python".to_owned(), 1)];
        let list = category_list(&ctx, &counts, "python");

        assert!(list.html.contains("Eğitim <span class=\"count\">(3)</span>"));
        assert!(list.html.contains(r#"class="category-link active" data-filter="python""#));
        assert_eq!(list.bindings[0].action, Action::SetFilter("tutorial".into()));

        let cloud = tag_cloud(&[TagWeight {
            tag: "rust".into(),
            count: 2,
            size: 1.0,
        }]);
        assert!(cloud.html.contains(r#"style="font-size: 1.0em">#rust</a>"#));
    }

    #[test]
    fn test_empty_state_binding() {
        let markup = empty_state("Yok", "Aramayı Temizle", "reset-search-btn", Action::ClearFilters);
        assert!(markup.html.contains("reset-search-btn"));
        assert_eq!(markup.bindings[0].selector, ".reset-search-btn");
    }

    #[test]
    fn test_docs_nav_marks_active() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Lang::Tr);
        let docs = docs();
        let groups = group_by_category(&docs, Lang::Tr);
        let nav = docs_nav(&ctx, &groups, Some("git"));

        assert!(nav.html.contains("Tüm Dökümanlar"));
        assert!(nav.html.contains(r#"class="nav-link active" data-doc-id="git""#));
        assert!(nav.html.contains(r#"class="nav-link" data-doc-id="getting-started""#));
        assert_eq!(nav.bindings[0].action, Action::Back);
    }

    #[test]
    fn test_doc_article_navigation() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Lang::Tr);
        let docs = docs();
        let body = markdown::render("# Kurulum\n\nmetin");
        let article = doc_article(&ctx, &docs[0], &body, None, Some(&docs[1]), "https://x/docs.html?doc=getting-started");

        assert!(article.html.contains(r##"<a href="#heading-0">Kurulum</a>"##));
        assert!(article.html.contains(r#"<a id="prev-doc" class="doc-nav-link" style="display: none"></a>"#));
        assert!(article.html.contains(r#"<span class="nav-title">Git</span>"#));
        assert!(article.bindings.contains(&Binding::click("#next-doc", Action::ShowDocument("git".into()))));
    }

    #[test]
    fn test_project_card() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Lang::Tr);
        let project: Project = serde_json::from_value(json!({
            "id": "rest-api-starter",
            "name": "REST API Starter",
            "description": "Node.js ve Express ile hazır REST API şablonu",
            "category": "api",
            "status": "development",
            "tech": ["Node.js", "Express"],
            "github": "https://github.com/ByCh4n-Group/rest-api-starter"
        }))
        .unwrap();

        let card = project_card(&ctx, &project, Stamp::new(0), true);
        assert!(card.html.contains(r#"class="project-card dimmed entrance""#));
        assert!(card.html.contains("Geliştiriliyor"));
        assert!(!card.html.contains("Canlı Demo"));
        assert_eq!(card.bindings.len(), 3);
        assert_eq!(card.bindings[2].action, Action::FilterStatus("development".into()));
    }

    #[test]
    fn test_feature_card() {
        let card = feature_card(
            &json!({"icon": "fas fa-code", "title": "Kod", "description": "Birlikte yazıyoruz"}),
            Stamp::new(0),
        );
        assert!(card.html.contains(r#"<i class="fas fa-code"></i>"#));
        assert!(card.html.contains("Birlikte yazıyoruz"));
    }
}
