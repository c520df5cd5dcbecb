//! `bych4n query`: run a listing query from the command line.

use crate::{
    cli::Collection,
    config::SiteConfig,
    content::{ContentStores, Filter, PageMode, Record, View, ViewState, select_view},
    i18n::{Lang, category_label, project_count},
};
use colored::Colorize;

/// Parameters of one query run.
#[derive(Debug, Clone)]
pub struct QueryArgs<'a> {
    pub collection: Collection,
    pub filter: &'a str,
    pub search: &'a str,
    pub page: usize,
    pub lang: Lang,
    pub append: bool,
}

/// Load the data files, run the query and print the result.
pub fn run_query(config: &SiteConfig, args: &QueryArgs<'_>) {
    let content = ContentStores::load(config);
    print!("{}", report(config, &content, args));
}

fn view_state(config: &SiteConfig, args: &QueryArgs<'_>) -> ViewState {
    let page_size = match args.collection {
        Collection::Blog => config.listing.blog_page_size,
        Collection::Docs | Collection::Projects => usize::MAX,
    };
    let mut state = ViewState::new(page_size);
    state.set_filter(Filter::parse(args.filter));
    state.set_search(args.search);
    state.set_page(args.page);
    state
}

/// Result listing as printed by `run_query`.
fn report(config: &SiteConfig, content: &ContentStores, args: &QueryArgs<'_>) -> String {
    let state = view_state(config, args);
    let mode = if args.append {
        PageMode::Append
    } else {
        PageMode::Replace
    };
    let lang = args.lang;

    match args.collection {
        Collection::Blog => {
            let view = select_view(&content.posts, &state, lang, mode);
            render(&view, lang, |post| {
                let categories: Vec<_> = post
                    .categories
                    .iter()
                    .map(|slug| category_label(slug, lang))
                    .collect();
                format!(
                    "{}  {}  [{}]",
                    post.date.as_deref().unwrap_or("----------"),
                    post.title.get(lang).bold(),
                    categories.join(", ")
                )
            })
        }
        Collection::Docs => {
            let view = select_view(&content.docs, &state, lang, mode);
            render(&view, lang, |doc| {
                format!("{:>3}  {}  ({})", doc.sort_key(), doc.title.get(lang).bold(), doc.category.get(lang))
            })
        }
        Collection::Projects => {
            let view = select_view(&content.projects, &state, lang, mode);
            let mut out = render(&view, lang, |project| {
                format!(
                    "{}  {}  [{}]  ★ {}",
                    project.name.bold(),
                    project.category,
                    project.tech.join(", "),
                    project.stars
                )
            });
            out.push_str(&project_count(view.total, lang));
            out.push('\n');
            out
        }
    }
}

fn render<T: Record>(view: &View<'_, T>, lang: Lang, line: impl Fn(&T) -> String) -> String {
    let mut out = String::new();
    if view.is_empty() {
        let empty = match lang {
            Lang::Tr => "Sonuç bulunamadı",
            Lang::En => "No results found",
        };
        out.push_str(&format!("{}\n", empty.dimmed()));
        return out;
    }
    for item in &view.items {
        out.push_str(&format!("{}  {}\n", item.id().dimmed(), line(item)));
    }
    let footer = match lang {
        Lang::Tr => format!("sayfa {}/{} · toplam {}", view.page, view.total_pages, view.total),
        Lang::En => format!("page {}/{} · {} total", view.page, view.total_pages, view.total),
    };
    out.push_str(&format!("{}\n", footer.dimmed()));
    out
}
