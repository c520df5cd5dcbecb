//! Page controllers.
//!
//! A controller owns the interactive state of one page. Dispatching an
//! [`Action`] mutates that state and yields a [`Repaint`]: the fragments to
//! swap into the page and the URL that now describes it.

pub mod action;
pub mod blog;
pub mod contact;
pub mod docs;
pub mod home;
pub mod listing;
pub mod projects;

pub use action::{Action, Binding, Event};
pub use blog::BlogController;
pub use contact::ContactController;
pub use docs::DocsController;
pub use home::HomeController;
pub use projects::ProjectsController;

use crate::{render::Fragment, url_state::UrlState};

/// Result of handling an action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repaint {
    pub fragments: Vec<Fragment>,
    /// Query state to push into the address bar.
    pub url: UrlState,
}

impl Repaint {
    pub fn fragment(&self, container: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.container == container)
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.fragments
            .into_iter()
            .flat_map(|fragment| fragment.bindings)
            .collect()
    }
}
