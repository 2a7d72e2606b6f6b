// SPDX-License-Identifier: MPL-2.0
//! Writing resolved strings into a page.
//!
//! An apply pass is split in two:
//!
//! - [`plan_writes`] is pure: it maps the page's [`Binding`]s and a
//!   [`Resolver`] to a list of [`Write`]s.
//! - A [`Page`] adapter discovers bindings and performs the writes against a
//!   concrete document ([`markup::MarkupPage`] for HTML/XHTML files).
//!
//! Bindings are rediscovered on every pass; nothing is cached between passes,
//! so applying twice with the same language leaves the page unchanged.

pub mod markup;

use crate::i18n::Resolver;

/// Adapter-defined handle to one element of the page.
pub type NodeId = usize;

/// Which marker attribute bound the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Plain text (`data-i18n`).
    Text,
    /// Structured content (`data-i18n-html`).
    Html,
}

/// What kind of element carries the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// `input` or `textarea`.
    Input { has_placeholder: bool },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub node: NodeId,
    pub key: String,
    pub marker: Marker,
    pub control: ControlKind,
}

/// Where a resolved string lands on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    Text,
    Placeholder,
    Value,
    /// Injected as markup, never escaped.
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub node: NodeId,
    pub target: WriteTarget,
    pub value: String,
}

/// A document the localizer can write into.
pub trait Page {
    /// Every bound element, in document order.
    fn bindings(&self) -> Vec<Binding>;

    fn write(&mut self, write: &Write);

    /// Points the language selector control at `language`.
    ///
    /// Returns `false` when the page has no selector.
    fn sync_language_selector(&mut self, language: &str) -> bool;
}

/// A page without bindings or selector, for switching language headlessly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedPage;

impl Page for DetachedPage {
    fn bindings(&self) -> Vec<Binding> {
        Vec::new()
    }

    fn write(&mut self, _write: &Write) {}

    fn sync_language_selector(&mut self, _language: &str) -> bool {
        false
    }
}

/// Outcome of one apply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub writes: usize,
    pub selector_synced: bool,
}

/// Maps bindings to writes: all text markers first, then all HTML markers.
///
/// With `trust_html` unset, HTML markers are written as escaped text.
pub fn plan_writes(bindings: &[Binding], resolver: &Resolver<'_>, trust_html: bool) -> Vec<Write> {
    let text = bindings.iter().filter(|b| b.marker == Marker::Text).map(|binding| {
        let target = match binding.control {
            ControlKind::Input {
                has_placeholder: true,
            } => WriteTarget::Placeholder,
            ControlKind::Input {
                has_placeholder: false,
            } => WriteTarget::Value,
            ControlKind::Other => WriteTarget::Text,
        };
        (binding, target)
    });

    let html_target = if trust_html {
        WriteTarget::Html
    } else {
        WriteTarget::Text
    };
    let html = bindings
        .iter()
        .filter(|b| b.marker == Marker::Html)
        .map(|binding| (binding, html_target));

    text.chain(html)
        .map(|(binding, target)| Write {
            node: binding.node,
            target,
            value: resolver.resolve(&binding.key).to_string(),
        })
        .collect()
}

/// Runs one apply pass over `page` and syncs its language selector.
pub fn apply(
    page: &mut impl Page,
    resolver: &Resolver<'_>,
    language: &str,
    trust_html: bool,
) -> ApplyReport {
    let writes = plan_writes(&page.bindings(), resolver, trust_html);
    for write in &writes {
        page.write(write);
    }
    let selector_synced = page.sync_language_selector(language);
    tracing::debug!(language, writes = writes.len(), "applied translations");

    ApplyReport {
        writes: writes.len(),
        selector_synced,
    }
}
