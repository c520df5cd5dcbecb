//! Landing page: hero, features, latest posts, counters.

use super::{Action, Binding, Event, Repaint};
use crate::{
    anim::{Counter, OnceTrigger, ParticleField, Typewriter},
    context::SiteContext,
    i18n::Phrase,
    render::{Fragment, Markup, Mode, NavItem, Page, html::escape, render, templates},
};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;
use std::{
    fmt::Write,
    time::{Duration, Instant},
};

pub const HERO: &str = "hero-content";
pub const FEATURES: &str = "features-grid";
pub const LATEST: &str = "latest-posts";
pub const STATS: &str = "stats";

/// Size of the pre-rendered particle backdrop.
const BACKDROP: (f32, f32) = (1200.0, 600.0);

#[derive(Debug, Default)]
pub struct HomeController {
    revealed: OnceTrigger,
    counting_since: Option<Instant>,
}

impl HomeController {
    pub fn dispatch(&mut self, ctx: &mut SiteContext<'_>, action: Action) -> Option<Repaint> {
        match action {
            Action::SetLanguage(lang) => ctx.set_language(lang).then(|| self.repaint(ctx)),
            Action::Reveal(key) if key == STATS && self.revealed.fire(&key) => {
                self.counting_since = Some(Instant::now());
                Some(self.stats_repaint(ctx, Duration::ZERO))
            }
            _ => None,
        }
    }

    /// Advance the counters; `None` once they have settled.
    pub fn tick(&mut self, ctx: &SiteContext<'_>, now: Instant) -> Option<Repaint> {
        let elapsed = now.saturating_duration_since(self.counting_since?);
        if Counter::to(0).is_done(elapsed) {
            self.counting_since = None;
        }
        Some(self.stats_repaint(ctx, elapsed))
    }

    pub fn repaint(&self, ctx: &SiteContext<'_>) -> Repaint {
        Repaint {
            fragments: vec![hero(ctx), features(ctx), latest(ctx), stats(ctx, self.counter_elapsed())],
            url: Default::default(),
        }
    }

    fn stats_repaint(&self, ctx: &SiteContext<'_>, elapsed: Duration) -> Repaint {
        Repaint {
            fragments: vec![stats(ctx, elapsed)],
            url: Default::default(),
        }
    }

    /// Counters read zero until revealed and their target once finished.
    fn counter_elapsed(&self) -> Duration {
        match self.counting_since {
            Some(since) => since.elapsed(),
            None if self.revealed.has_fired(STATS) => Counter::DEFAULT_DURATION,
            None => Duration::ZERO,
        }
    }

    pub fn page(&self, ctx: &SiteContext<'_>) -> Page {
        let repaint = self.repaint(ctx);
        let slot = |id: &str, class: &str| {
            repaint
                .fragment(id)
                .map(|fragment| fragment.wrap("div", class))
                .unwrap_or_default()
        };

        let html = format!(
            r#"<section class="hero"><canvas id="particle-canvas">{backdrop}</canvas>{hero}</section><section class="features"><div class="container"><h2 class="features-title">{features_title}</h2>{features}</div></section><section class="latest-blog"><div class="container"><h2 class="section-title">{latest_title}</h2>{latest}</div></section><section class="stats-section"><div class="container">{stats}</div></section>"#,
            backdrop = particle_backdrop(),
            hero = slot(HERO, "hero-content"),
            features_title = escape(&ctx.t("features.title", "Neler Yapıyoruz?")),
            features = slot(FEATURES, "features-grid"),
            latest_title = ctx.phrase(Phrase::LatestPosts),
            latest = slot(LATEST, "blog-posts-grid"),
            stats = slot(STATS, "stats-grid"),
        );

        let mut bindings = vec![Binding::new(
            format!("#{STATS}"),
            Event::Visible,
            Action::Reveal(STATS.to_owned()),
        )];
        bindings.extend(repaint.into_bindings());
        Page {
            nav: NavItem::Home,
            path: NavItem::Home.path().to_owned(),
            title: None,
            body: Markup { html, bindings },
        }
    }
}

fn hero(ctx: &SiteContext<'_>) -> Fragment {
    let messages = ctx
        .translations()
        .value(ctx.lang(), "hero.typewriter")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_owned).collect())
        .filter(|messages: &Vec<String>| !messages.is_empty())
        .unwrap_or_else(Typewriter::default_messages);
    let messages = serde_json::to_string(&messages).unwrap_or_else(|_| "[]".to_owned());

    Fragment::replace(
        HERO,
        Markup::new(format!(
            r#"<h1 class="hero-title">{title}</h1><p class="hero-subtitle">{subtitle}</p><p class="hero-typewriter"><span id="typewriter-text" data-messages="{messages}"></span></p><p class="hero-description">{description}</p><div class="hero-cta"><a href="{blog}" class="btn btn-primary">{primary}</a><a href="{docs}" class="btn btn-secondary">{secondary}</a></div>"#,
            title = escape(&ctx.t("hero.title", "ByCh4n Group")),
            subtitle = escape(&ctx.t("hero.subtitle", "Birlikte Öğreniyoruz")),
            messages = escape(&messages),
            description = escape(&ctx.t("hero.description", "")),
            blog = escape(&ctx.href(NavItem::Blog.path())),
            primary = escape(&ctx.t("hero.cta.primary", "Blog'u Keşfet")),
            docs = escape(&ctx.href(NavItem::Docs.path())),
            secondary = escape(&ctx.t("hero.cta.secondary", "Dökümanlar")),
        )),
    )
}

fn features(ctx: &SiteContext<'_>) -> Fragment {
    let items: Vec<&Value> = ctx
        .translations()
        .value(ctx.lang(), "features.items")
        .and_then(Value::as_array)
        .map(|items| items.iter().collect())
        .unwrap_or_default();
    render(FEATURES, &items, Mode::Replace, |item, stamp| {
        templates::feature_card(item, stamp)
    })
}

fn latest(ctx: &SiteContext<'_>) -> Fragment {
    let count = ctx.config.listing.home_latest_posts;
    let posts: Vec<_> = ctx.content.posts.iter().take(count).collect();
    render(LATEST, &posts, Mode::Replace, |post, stamp| {
        templates::blog_card(ctx, post, stamp)
    })
}

fn stats(ctx: &SiteContext<'_>, elapsed: Duration) -> Fragment {
    let content = ctx.content;
    let html = [
        (Phrase::StatPosts, content.posts.len()),
        (Phrase::StatDocs, content.docs.len()),
        (Phrase::StatProjects, content.projects.len()),
    ]
    .into_iter()
    .map(|(label, count)| {
        let shown = Counter::to(count as u64).value_at(elapsed);
        templates::stat_counter(ctx.phrase(label), count, shown)
    })
    .collect::<String>();
    Fragment::replace(STATS, Markup::new(html))
}

/// Still frame of the hero particles, shown where the canvas cannot run.
fn particle_backdrop() -> String {
    let (width, height) = BACKDROP;
    let mut field = ParticleField::with_rng(width, height, &mut StdRng::seed_from_u64(0xb7c4));
    // one second of drift at 60 fps
    for _ in 0..60 {
        field.step(1.0);
    }
    let particles = field.particles();

    let mut svg = format!(r#"<svg class="particle-backdrop" viewBox="0 0 {width} {height}" aria-hidden="true">"#);
    for link in field.links() {
        let (a, b) = (&particles[link.a], &particles[link.b]);
        let _ = write!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgba(108,92,231,{:.2})"/>"#,
            a.x, a.y, b.x, b.y, link.alpha
        );
    }
    for p in particles {
        let _ = write!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="hsla({:.0},70%,60%,{:.2})"/>"#,
            p.x, p.y, p.size, p.hue, p.opacity
        );
    }
    svg.push_str("</svg>");
    svg
}
