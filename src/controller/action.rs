//! User interactions and the listeners that trigger them.

use super::contact::Field;
use super::projects::Layout;
use crate::i18n::Lang;
use serde::Serialize;

/// Something a visitor did, dispatched into a page controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Action {
    /// Category or tag token; `all` clears it.
    SetFilter(String),
    SetSearch(String),
    /// Re-run the current query (search button, Enter key).
    Submit,
    LoadMore,
    ClearFilters,
    SetLanguage(Lang),

    // home
    /// Element scrolled into view.
    Reveal(String),

    // docs
    ShowDocument(String),
    Back,
    CopyLink(String),

    // projects
    FilterTech(String),
    FilterStatus(String),
    SetLayout(Layout),

    // contact
    Blur(Field),
    Input(Field),
    SubmitForm,
}

/// DOM event a [`Binding`] listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    Click,
    Input,
    Submit,
    Blur,
    /// First time the element enters the viewport.
    Visible,
}

/// A listener attached to rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub selector: String,
    pub event: Event,
    pub action: Action,
}

impl Binding {
    pub fn new(selector: impl Into<String>, event: Event, action: Action) -> Self {
        Self {
            selector: selector.into(),
            event,
            action,
        }
    }

    pub fn click(selector: impl Into<String>, action: Action) -> Self {
        Self::new(selector, Event::Click, action)
    }
}
