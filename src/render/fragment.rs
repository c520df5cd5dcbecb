//! Markup produced for a container, with its listeners.
//!
//! Every element a template produces for a record gets the entrance
//! animation: `class="… entrance"` and a `--stagger` delay growing with its
//! position in the batch.

use crate::content::View;
use crate::controller::action::Binding;

pub use crate::content::PageMode as Mode;

/// Delay between consecutive entrance animations, in seconds.
pub const STAGGER_STEP: f32 = 0.1;

/// Template output: HTML plus the listeners it needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markup {
    pub html: String,
    pub bindings: Vec<Binding>,
}

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn push(&mut self, other: Markup) {
        self.html.push_str(&other.html);
        self.bindings.extend(other.bindings);
    }
}

/// Entrance animation attributes for the `index`-th element of a batch.
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    index: usize,
    step: f32,
}

impl Stamp {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            step: STAGGER_STEP,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// `class="{class} entrance" style="--stagger: 0.20s"`
    pub fn attrs(&self, class: &str) -> String {
        format!(
            r#"class="{class} entrance" style="--stagger: {:.2}s""#,
            self.index as f32 * self.step
        )
    }
}

/// Markup destined for one container.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Element id of the container.
    pub container: String,
    pub mode: Mode,
    pub html: String,
    pub bindings: Vec<Binding>,
}

impl Fragment {
    /// Fragment replacing the container's content.
    pub fn replace(container: &str, markup: Markup) -> Self {
        Self {
            container: container.to_owned(),
            mode: Mode::Replace,
            html: markup.html,
            bindings: markup.bindings,
        }
    }

    /// The container element with this fragment as its content.
    pub fn wrap(&self, tag: &str, class: &str) -> String {
        format!(
            r#"<{tag} id="{}" class="{class}">{}</{tag}>"#,
            self.container, self.html
        )
    }
}

/// Run `template` over `items` and collect the output for `container`.
pub fn render<T: ?Sized>(
    container: &str,
    items: &[&T],
    mode: Mode,
    template: impl Fn(&T, Stamp) -> Markup,
) -> Fragment {
    let mut out = Markup::default();
    for (index, &item) in items.iter().enumerate() {
        out.push(template(item, Stamp::new(index)));
    }
    Fragment {
        container: container.to_owned(),
        mode,
        html: out.html,
        bindings: out.bindings,
    }
}

/// Render a query result; append mode renders only the revealed tail.
pub fn render_view<T>(
    container: &str,
    view: &View<'_, T>,
    mode: Mode,
    template: impl Fn(&T, Stamp) -> Markup,
) -> Fragment {
    let items = match mode {
        Mode::Replace => &view.items[..],
        Mode::Append => view.fresh(),
    };
    render(container, items, mode, template)
}
