//! Contact form state machine.
//!
//! ```text
//!            blur/submit with errors
//!   Clean ─────────────────────────► Invalid{field, reason}
//!     │  ◄──────── input clears the last error ─────┘
//!     │ submit (all valid)
//!     ▼
//!  Submitting ──ok──► Succeeded{until} ──tick──► Clean
//!     └──────err───► Failed{until} ────tick──► Clean
//! ```

use super::{Action, Binding, Event, Repaint};
use crate::{
    config::ContactConfig,
    context::SiteContext,
    i18n::Phrase,
    log,
    render::{Fragment, Markup, NavItem, Page, html::escape},
};
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    sync::LazyLock,
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

pub const MESSAGE: &str = "form-message-slot";
pub const SUBMIT: &str = "contact-submit";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Form control name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    const fn label(self) -> Phrase {
        match self {
            Self::Name => Phrase::FieldName,
            Self::Email => Phrase::FieldEmail,
            Self::Subject => Phrase::FieldSubject,
            Self::Message => Phrase::FieldMessage,
        }
    }

    /// Element id of the control.
    fn id(self) -> String {
        format!("contact-{}", self.name())
    }

    /// Container id of the control with its label and error.
    pub fn group(self) -> String {
        format!("field-{}", self.name())
    }

    /// Error for a trimmed value, if any.
    fn check(self, value: &str) -> Option<Phrase> {
        match self {
            _ if value.is_empty() => Some(Phrase::FieldRequired),
            Self::Email if !EMAIL.is_match(value) => Some(Phrase::InvalidEmail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Clean,
    /// First field failing validation.
    Invalid { field: Field, reason: Phrase },
    Submitting,
    /// The confirmation stays visible until `until`.
    Succeeded { until: Instant },
    Failed { until: Instant },
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("message was rejected")]
    Rejected,
}

/// Validated content of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Delivers a validated message.
pub trait Submitter {
    fn submit(&self, message: &Message) -> Result<(), FormError>;
}

/// Stand-in backend: waits, then succeeds with a fixed probability.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    success_rate: f64,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        Self {
            delay,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(config.simulated_delay(), config.success_rate)
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(&self, _message: &Message) -> Result<(), FormError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if rand::rng().random_bool(self.success_rate) {
            Ok(())
        } else {
            Err(FormError::Rejected)
        }
    }
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug)]
pub struct ContactForm {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, Phrase>,
    state: FormState,
    timeout: Duration,
}

impl ContactForm {
    /// `timeout`: how long the result message stays up.
    pub fn new(timeout: Duration) -> Self {
        Self {
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
            state: FormState::Clean,
            timeout,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn error(&self, field: Field) -> Option<Phrase> {
        self.errors.get(&field).copied()
    }

    /// Store typed text and clear that field's error.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.input(field);
    }

    /// Clear the error of `field`. Returns `true` when one was shown.
    pub fn input(&mut self, field: Field) -> bool {
        let cleared = self.errors.remove(&field).is_some();
        if let FormState::Invalid { field: first, .. } = self.state {
            self.state = match self.first_error() {
                None => FormState::Clean,
                Some(_) if first != field => self.state,
                Some((field, reason)) => FormState::Invalid { field, reason },
            };
        }
        cleared
    }

    /// Validate one field on focus loss. Returns `true` when valid.
    pub fn blur(&mut self, field: Field) -> bool {
        match field.check(self.value(field).trim()) {
            Some(reason) => {
                self.errors.insert(field, reason);
                if matches!(self.state, FormState::Clean) {
                    self.state = FormState::Invalid { field, reason };
                }
                false
            }
            None => {
                self.input(field);
                true
            }
        }
    }

    /// Validate every field and enter `Submitting` when all pass.
    ///
    /// Returns the message to send, or `None` when the form is invalid or
    /// already sending.
    pub fn submit(&mut self) -> Option<Message> {
        if self.state == FormState::Submitting {
            return None;
        }

        self.errors = Field::ALL
            .into_iter()
            .filter_map(|field| field.check(self.value(field).trim()).map(|reason| (field, reason)))
            .collect();

        if let Some((field, reason)) = self.first_error() {
            self.state = FormState::Invalid { field, reason };
            return None;
        }

        self.state = FormState::Submitting;
        let value = |field| self.value(field).trim().to_owned();
        Some(Message {
            name: value(Field::Name),
            email: value(Field::Email),
            subject: value(Field::Subject),
            message: value(Field::Message),
        })
    }

    /// Finish a submission started by [`ContactForm::submit`].
    pub fn resolve(&mut self, result: Result<(), FormError>, now: Instant) {
        if self.state != FormState::Submitting {
            return;
        }
        let until = now + self.timeout;
        self.state = match result {
            Ok(()) => {
                self.values.clear();
                FormState::Succeeded { until }
            }
            Err(err) => {
                log!("form"; "submission failed: {err}");
                FormState::Failed { until }
            }
        };
    }

    /// Submit and resolve in one go.
    pub fn send(&mut self, submitter: &impl Submitter) -> FormState {
        if let Some(message) = self.submit() {
            let result = submitter.submit(&message);
            self.resolve(result, Instant::now());
        }
        self.state
    }

    /// Drop an expired result message. Returns `true` when the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            FormState::Succeeded { until } | FormState::Failed { until } if now >= until => {
                self.state = FormState::Clean;
                true
            }
            _ => false,
        }
    }

    fn first_error(&self) -> Option<(Field, Phrase)> {
        self.errors.iter().next().map(|(&field, &reason)| (field, reason))
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct ContactController<S = SimulatedSubmitter> {
    form: ContactForm,
    submitter: S,
}

impl ContactController {
    pub fn simulated(config: &ContactConfig) -> Self {
        Self::new(config, SimulatedSubmitter::from_config(config))
    }
}

impl<S: Submitter> ContactController<S> {
    pub fn new(config: &ContactConfig, submitter: S) -> Self {
        Self {
            form: ContactForm::new(config.message_timeout()),
            submitter,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Fill the form from a `application/x-www-form-urlencoded` body.
    pub fn fill(&mut self, body: &str) {
        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(field) = Field::parse(key) else {
                continue;
            };
            let value = value.replace('+', " ");
            match urlencoding::decode(&value) {
                Ok(value) => self.form.set_value(field, value),
                Err(err) => log!("form"; "skipping malformed `{key}`: {err}"),
            }
        }
    }

    pub fn dispatch(&mut self, ctx: &mut SiteContext<'_>, action: Action) -> Option<Repaint> {
        match action {
            Action::Blur(field) => {
                self.form.blur(field);
            }
            Action::Input(field) => {
                if !self.form.input(field) {
                    return None;
                }
            }
            Action::SubmitForm => {
                self.form.send(&self.submitter);
            }
            Action::SetLanguage(lang) => {
                if !ctx.set_language(lang) {
                    return None;
                }
            }
            _ => return None,
        }
        Some(self.repaint(ctx))
    }

    /// Advance the result message timer.
    pub fn tick(&mut self, ctx: &SiteContext<'_>, now: Instant) -> Option<Repaint> {
        self.form.tick(now).then(|| self.repaint(ctx))
    }

    pub fn repaint(&self, ctx: &SiteContext<'_>) -> Repaint {
        let mut fragments = vec![Fragment::replace(MESSAGE, self.message(ctx))];
        fragments.extend(
            Field::ALL
                .into_iter()
                .map(|field| Fragment::replace(&field.group(), self.field(ctx, field))),
        );
        fragments.push(Fragment::replace(SUBMIT, self.submit_button(ctx)));
        Repaint {
            fragments,
            url: Default::default(),
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
        let fields: String = Field::ALL
            .into_iter()
            .map(|field| slot(&field.group(), "form-group"))
            .collect();

        let html = format!(
            r#"<section class="contact-section"><div class="container"><div class="contact-layout"><div class="contact-info"><h2>{title}</h2><p>{intro}</p><a class="contact-email" href="mailto:{email}"><i class="fas fa-envelope"></i> {email}</a></div><form id="contact-form" class="contact-form" method="post" action="{action}" novalidate>{message}{fields}{submit}</form></div>{faq}</div></section>"#,
            title = escape(&ctx.t("contact.title", "Bize Ulaşın")),
            intro = escape(&ctx.t("contact.description", "")),
            email = escape(&ctx.config.base.email),
            action = escape(&ctx.href("/contact")),
            message = slot(MESSAGE, "form-message-slot"),
            submit = slot(SUBMIT, "form-actions"),
            faq = faq(ctx),
        );

        let mut bindings = vec![Binding::new("#contact-form", Event::Submit, Action::SubmitForm)];
        bindings.extend(repaint.into_bindings());
        Page {
            nav: NavItem::Contact,
            path: NavItem::Contact.path().to_owned(),
            title: Some(ctx.t("nav.contact", "İletişim")),
            body: Markup { html, bindings },
        }
    }

    fn message(&self, ctx: &SiteContext<'_>) -> Markup {
        let (kind, icon, phrase) = match self.form.state() {
            FormState::Succeeded { .. } => ("success", "check-circle", Phrase::SendSuccess),
            FormState::Failed { .. } => ("error", "exclamation-triangle", Phrase::SendFailure),
            FormState::Invalid { .. } => ("error", "exclamation-triangle", Phrase::FormInvalid),
            FormState::Clean | FormState::Submitting => return Markup::default(),
        };
        Markup::new(format!(
            r#"<div class="form-message {kind}"><i class="fas fa-{icon}"></i> {}</div>"#,
            ctx.phrase(phrase)
        ))
    }

    fn field(&self, ctx: &SiteContext<'_>, field: Field) -> Markup {
        let id = field.id();
        let value = escape(self.form.value(field));
        let error = self.form.error(field);
        let class = if error.is_some() { r#" class="error""# } else { "" };
        let control = match field {
            Field::Message => format!(
                r#"<textarea id="{id}" name="{name}" rows="6" required{class}>{value}</textarea>"#,
                name = field.name(),
            ),
            _ => format!(
                r#"<input type="{kind}" id="{id}" name="{name}" value="{value}" required{class}>"#,
                kind = if field == Field::Email { "email" } else { "text" },
                name = field.name(),
            ),
        };
        let error = error
            .map(|reason| format!(r#"<div class="field-error">{}</div>"#, ctx.phrase(reason)))
            .unwrap_or_default();

        Markup::new(format!(
            r#"<label for="{id}">{}</label>{control}{error}"#,
            ctx.phrase(field.label())
        ))
        .bind(Binding::new(format!("#{id}"), Event::Blur, Action::Blur(field)))
        .bind(Binding::new(format!("#{id}"), Event::Input, Action::Input(field)))
    }

    fn submit_button(&self, ctx: &SiteContext<'_>) -> Markup {
        Markup::new(if self.form.state() == FormState::Submitting {
            format!(
                r#"<button type="submit" class="btn btn-primary" disabled><i class="fas fa-spinner fa-spin"></i> {}</button>"#,
                ctx.phrase(Phrase::Sending)
            )
        } else {
            format!(
                r#"<button type="submit" class="btn btn-primary"><i class="fas fa-paper-plane"></i> {}</button>"#,
                ctx.phrase(Phrase::Send)
            )
        })
    }
}

/// Questions from `contact.faq` in the translations.
fn faq(ctx: &SiteContext<'_>) -> String {
    let Some(items) = ctx
        .translations()
        .value(ctx.lang(), "contact.faq")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
    else {
        return String::new();
    };

    let entry = |item: &Value, key: &str| escape(item.get(key).and_then(Value::as_str).unwrap_or_default());
    let items: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="faq-item"><button class="faq-question">{}<i class="fas fa-chevron-down"></i></button><div class="faq-answer"><p>{}</p></div></div>"#,
                entry(item, "question"),
                entry(item, "answer"),
            )
        })
        .collect();
    format!(
        r#"<div class="faq"><h2>{}</h2>{items}</div>"#,
        escape(&ctx.t("contact.faq_title", "Sıkça Sorulan Sorular"))
    )
}
