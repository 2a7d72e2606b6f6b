// SPDX-License-Identifier: MPL-2.0
//! [`Page`] adapter over an HTML or XHTML document.
//!
//! The document is parsed with `quick-xml` into a small element tree. Only
//! elements are modelled; text, comments, doctype and other markup are kept
//! as the exact source bytes, so a page without bindings serializes back to
//! its input apart from start-tag normalization (attribute quoting and
//! spacing).
//!
//! HTML leniency:
//! - void elements (`<input>`, `<br>`, ...) need no closing tag
//! - boolean and unquoted attributes are accepted
//! - `script` and `style` contents are kept raw
//! - optional end tags (`</li>`, `</p>`, `</td>`, ...) are implied by the
//!   next start tag or the parent's end tag, and stay omitted on output
//! - stray or mismatched end tags close the nearest matching open element,
//!   or are kept verbatim when nothing matches
//! - a `<` that does not start a tag name (`a < b`) is text

use super::{Binding, ControlKind, Marker, NodeId, Page, Write, WriteTarget};
use crate::config::{self, Config};
use crate::error::Result;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fmt;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Start tags that end an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hgroup", "hr", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Open elements a start tag implicitly ends, and the open elements that
/// stop the search.
fn implied_end(name: &str) -> Option<(&'static [&'static str], &'static [&'static str])> {
    let lower = name.to_ascii_lowercase();
    let rule: (&'static [&'static str], &'static [&'static str]) = match lower.as_str() {
        "li" => (&["li"], &["ul", "ol", "menu"]),
        "dt" | "dd" => (&["dt", "dd"], &["dl"]),
        "option" => (&["option"], &["select", "datalist", "optgroup"]),
        "optgroup" => (&["option", "optgroup"], &["select"]),
        "tr" => (&["tr"], &["table", "thead", "tbody", "tfoot"]),
        "td" | "th" => (&["td", "th"], &["tr", "table"]),
        "thead" | "tbody" | "tfoot" => (&["thead", "tbody", "tfoot"], &["table"]),
        _ if is_one_of(&lower, CLOSES_PARAGRAPH) => (
            &["p"],
            &["button", "table", "td", "th", "caption", "template", "html"],
        ),
        _ => return None,
    };
    Some(rule)
}

/// Whether `<` followed by this name opens a tag rather than being text.
fn is_tag_name(name: &[u8]) -> bool {
    name.first().is_some_and(u8::is_ascii_alphabetic)
}

/// Attribute names and ids the adapter binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMarkers {
    pub text_attribute: String,
    pub html_attribute: String,
    pub selector_ids: Vec<String>,
}

impl Default for PageMarkers {
    fn default() -> Self {
        Self {
            text_attribute: config::DEFAULT_TEXT_ATTRIBUTE.to_string(),
            html_attribute: config::DEFAULT_HTML_ATTRIBUTE.to_string(),
            selector_ids: vec![config::DEFAULT_LANGUAGE_SELECTOR_ID.to_string()],
        }
    }
}

impl PageMarkers {
    pub fn from_config(config: &Config) -> Self {
        Self {
            text_attribute: config.text_attribute().to_string(),
            html_attribute: config.html_attribute().to_string(),
            selector_ids: config.language_selector_ids(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Element(NodeId),
    /// Source bytes kept as written, or escaped/injected write output.
    Verbatim(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing {
    Explicit,
    /// End tag absent from the source; implied by what followed.
    Omitted,
    SelfClosing,
    Void,
}

#[derive(Debug, Clone)]
struct Attribute {
    name: String,
    /// Value as it appears in markup (still escaped).
    raw_value: String,
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Content>,
    closing: Closing,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, closing: Closing) -> Result<Self> {
        let mut attributes = Vec::new();
        for attr in start.html_attributes() {
            let attr = attr?;
            attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                raw_value: String::from_utf8_lossy(&attr.value).into_owned(),
            });
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
            closing,
        })
    }

    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| unescape(&attr.raw_value).unwrap_or(Cow::Borrowed(attr.raw_value.as_str())))
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let raw_value = escape(value).into_owned();
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.raw_value = raw_value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                raw_value,
            }),
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes
            .retain(|attr| !attr.name.eq_ignore_ascii_case(name));
    }

    /// Replaces all children with one piece of already-escaped markup.
    fn set_content(&mut self, markup: String) {
        match self.closing {
            Closing::Void => {}
            Closing::Omitted => self.children = vec![Content::Verbatim(markup)],
            Closing::SelfClosing | Closing::Explicit => {
                self.closing = Closing::Explicit;
                self.children = vec![Content::Verbatim(markup)];
            }
        }
    }
}

fn is_one_of(name: &str, set: &[&str]) -> bool {
    set.iter().any(|candidate| name.eq_ignore_ascii_case(candidate))
}

/// A parsed HTML/XHTML page.
#[derive(Debug, Clone)]
pub struct MarkupPage {
    elements: Vec<Element>,
    top: Vec<Content>,
    markers: PageMarkers,
}

impl MarkupPage {
    pub fn parse(source: &str, markers: PageMarkers) -> Result<Self> {
        let mut reader = lenient_reader(source);
        // Byte offset of `reader`'s input within `source`.
        let mut base = 0usize;

        let mut page = Self {
            elements: Vec::new(),
            top: Vec::new(),
            markers,
        };
        let mut open: Vec<NodeId> = Vec::new();
        let mut last = 0usize;

        loop {
            let event = reader.read_event()?;
            let end = position(&reader, base, source.len());
            let tag_start = last;
            let raw = &source[tag_start..end];
            last = end;

            let literal = match &event {
                Event::Start(tag) | Event::Empty(tag) => !is_tag_name(tag.name().as_ref()),
                Event::End(tag) => !is_tag_name(tag.name().as_ref()),
                _ => false,
            };
            if literal && raw.starts_with('<') {
                // Keep the '<' as text and rescan right after it.
                page.push_content(&open, Content::Verbatim("<".to_string()));
                let resume = tag_start + 1;
                base = resume;
                last = resume;
                reader = lenient_reader(&source[resume..]);
                continue;
            }

            match event {
                Event::Start(start) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    page.close_implied(&mut open, &name);
                    if is_one_of(&name, VOID_ELEMENTS) {
                        let element = Element::from_start(&start, Closing::Void)?;
                        page.push_element(&open, element);
                    } else if is_one_of(&name, RAW_TEXT_ELEMENTS) {
                        // Raw text may contain '<', so skip the reader past it.
                        let mut element = Element::from_start(&start, Closing::Explicit)?;
                        let (text, resume) = raw_text(source, end, &name);
                        if !text.is_empty() {
                            element.children.push(Content::Verbatim(text.to_string()));
                        }
                        page.push_element(&open, element);
                        base = resume;
                        last = resume;
                        reader = lenient_reader(&source[resume..]);
                    } else {
                        let element = Element::from_start(&start, Closing::Omitted)?;
                        let id = page.push_element(&open, element);
                        open.push(id);
                    }
                }
                Event::Empty(start) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    page.close_implied(&mut open, &name);
                    let element = Element::from_start(&start, Closing::SelfClosing)?;
                    page.push_element(&open, element);
                }
                Event::End(end_tag) => {
                    let name = String::from_utf8_lossy(end_tag.name().as_ref()).into_owned();
                    if is_one_of(&name, VOID_ELEMENTS) {
                        continue;
                    }
                    match open.iter().rposition(|&id| page.elements[id].is(&name)) {
                        Some(depth) => {
                            page.elements[open[depth]].closing = Closing::Explicit;
                            open.truncate(depth);
                        }
                        None => page.push_content(&open, Content::Verbatim(raw.to_string())),
                    }
                }
                Event::Eof => break,
                _ => page.push_content(&open, Content::Verbatim(raw.to_string())),
            }
        }

        Ok(page)
    }

    /// Pops the open elements whose end tag a `name` start tag implies.
    fn close_implied(&self, open: &mut Vec<NodeId>, name: &str) {
        let Some((closes, boundary)) = implied_end(name) else {
            return;
        };
        let mut outermost = None;
        for (depth, &id) in open.iter().enumerate().rev() {
            let element = &self.elements[id];
            if closes.iter().any(|candidate| element.is(candidate)) {
                outermost = Some(depth);
            } else if boundary.iter().any(|candidate| element.is(candidate)) {
                break;
            }
        }
        if let Some(depth) = outermost {
            open.truncate(depth);
        }
    }

    fn push_element(&mut self, open: &[NodeId], element: Element) -> NodeId {
        let id = self.elements.len();
        self.elements.push(element);
        self.push_content(open, Content::Element(id));
        id
    }

    fn push_content(&mut self, open: &[NodeId], content: Content) {
        match open.last() {
            Some(&parent) => self.elements[parent].children.push(content),
            None => self.top.push(content),
        }
    }

    /// Elements reachable from the document root, in document order.
    fn reachable(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut pending: Vec<&Content> = self.top.iter().rev().collect();
        while let Some(content) = pending.pop() {
            if let Content::Element(id) = content {
                order.push(*id);
                pending.extend(self.elements[*id].children.iter().rev());
            }
        }
        order
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<&Content> = self.elements[id].children.iter().rev().collect();
        while let Some(content) = pending.pop() {
            if let Content::Element(child) = content {
                found.push(*child);
                pending.extend(self.elements[*child].children.iter().rev());
            }
        }
        found
    }

    /// Text of the first element with the given `id` attribute.
    pub fn text_by_id(&self, element_id: &str) -> Option<String> {
        self.find_by_id(element_id)
            .map(|id| self.text_content(id))
    }

    /// Attribute value of the first element with the given `id` attribute.
    pub fn attribute_by_id(&self, element_id: &str, attribute: &str) -> Option<String> {
        self.find_by_id(element_id)
            .and_then(|id| self.elements[id].attribute(attribute))
            .map(Cow::into_owned)
    }

    fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.reachable()
            .into_iter()
            .find(|&id| self.elements[id].attribute("id").as_deref() == Some(element_id))
    }

    fn text_content(&self, id: NodeId) -> String {
        let mut markup = String::new();
        for child in &self.elements[id].children {
            self.write_content(child, &mut markup);
        }
        unescape(&markup)
            .map(Cow::into_owned)
            .unwrap_or(markup)
    }

    fn option_value(&self, id: NodeId) -> String {
        match self.elements[id].attribute("value") {
            Some(value) => value.into_owned(),
            None => self.text_content(id).trim().to_string(),
        }
    }

    fn write_content(&self, content: &Content, out: &mut String) {
        match content {
            Content::Verbatim(markup) => out.push_str(markup),
            Content::Element(id) => self.write_element(*id, out),
        }
    }

    fn write_element(&self, id: NodeId, out: &mut String) {
        let element = &self.elements[id];
        out.push('<');
        out.push_str(&element.name);
        for attr in &element.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&attr.raw_value.replace('"', "&quot;"));
            out.push('"');
        }
        match element.closing {
            Closing::SelfClosing => out.push_str("/>"),
            Closing::Void => out.push('>'),
            Closing::Explicit | Closing::Omitted => {
                out.push('>');
                for child in &element.children {
                    self.write_content(child, out);
                }
                if element.closing == Closing::Explicit {
                    out.push_str("</");
                    out.push_str(&element.name);
                    out.push('>');
                }
            }
        }
    }
}

fn lenient_reader(input: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    reader
}

fn position(reader: &Reader<&[u8]>, base: usize, len: usize) -> usize {
    usize::try_from(reader.buffer_position()).map_or(len, |pos| (base + pos).min(len))
}

/// Splits off the content of a raw text element starting at `from`.
///
/// Returns the content and the offset just past the closing tag (or the end
/// of `source` when the element is never closed).
fn raw_text<'s>(source: &'s str, from: usize, name: &str) -> (&'s str, usize) {
    let rest = &source[from..];
    let closing = format!("</{}", name.to_ascii_lowercase());
    let Some(start) = rest.to_ascii_lowercase().find(&closing) else {
        return (rest, source.len());
    };
    let resume = rest[start..]
        .find('>')
        .map_or(source.len(), |gt| from + start + gt + 1);
    (&rest[..start], resume)
}

impl fmt::Display for MarkupPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for content in &self.top {
            self.write_content(content, &mut out);
        }
        f.write_str(&out)
    }
}

impl Page for MarkupPage {
    fn bindings(&self) -> Vec<Binding> {
        let mut bindings = Vec::new();
        for id in self.reachable() {
            let element = &self.elements[id];
            let control = if element.is("input") || element.is("textarea") {
                ControlKind::Input {
                    has_placeholder: element.attribute("placeholder").is_some(),
                }
            } else {
                ControlKind::Other
            };

            let markers = [
                (&self.markers.text_attribute, Marker::Text),
                (&self.markers.html_attribute, Marker::Html),
            ];
            for (attribute, marker) in markers {
                if let Some(key) = element.attribute(attribute) {
                    bindings.push(Binding {
                        node: id,
                        key: key.into_owned(),
                        marker,
                        control,
                    });
                }
            }
        }
        bindings
    }

    fn write(&mut self, write: &Write) {
        let Some(element) = self.elements.get_mut(write.node) else {
            return;
        };
        match write.target {
            WriteTarget::Text => element.set_content(escape(write.value.as_str()).into_owned()),
            WriteTarget::Html => element.set_content(write.value.clone()),
            WriteTarget::Placeholder => element.set_attribute("placeholder", &write.value),
            WriteTarget::Value if element.is("textarea") => {
                element.set_content(escape(write.value.as_str()).into_owned());
            }
            WriteTarget::Value => element.set_attribute("value", &write.value),
        }
    }

    fn sync_language_selector(&mut self, language: &str) -> bool {
        let selector = self.reachable().into_iter().find(|&id| {
            self.elements[id]
                .attribute("id")
                .is_some_and(|value| self.markers.selector_ids.iter().any(|s| *s == value))
        });
        let Some(selector) = selector else {
            return false;
        };

        if self.elements[selector].is("select") {
            let options: Vec<(NodeId, bool)> = self
                .descendants(selector)
                .into_iter()
                .filter(|&id| self.elements[id].is("option"))
                .map(|id| (id, self.option_value(id) == language))
                .collect();
            for (id, selected) in options {
                if selected {
                    self.elements[id].set_attribute("selected", "selected");
                } else {
                    self.elements[id].remove_attribute("selected");
                }
            }
        } else {
            self.elements[selector].set_attribute("value", language);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Dictionary, Resolver, TranslationCatalog};
    use crate::page::apply;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title data-i18n="nav_home">Home</title>
<script>if (a < b && c) { go(); }</script></head>
<body>
  <!-- hero -->
  <h1 id="hero" data-i18n="hero_title">Welcome</h1>
  <input id="search" type="text" placeholder="Search..." data-i18n="search_placeholder">
  <input id="send" type="submit" data-i18n="chat_send" disabled>
  <textarea id="question" data-i18n="chat_placeholder"></textarea>
  <p id="cta" data-i18n-html="hero_cta">Ask</p>
  <select id="languageSelector">
    <option value="en" selected>English</option>
    <option value="hi">हिन्दी</option>
  </select>
  <p>Tom &amp; Jerry&nbsp;</p>
</body>
</html>
"#;

    fn catalog() -> TranslationCatalog {
        let mut catalog = TranslationCatalog::new();
        catalog.insert_language(
            "en",
            Dictionary::from([
                ("hero_title".to_string(), "Welcome".to_string()),
                ("search_placeholder".to_string(), "Search...".to_string()),
                ("chat_send".to_string(), "Send".to_string()),
                ("chat_placeholder".to_string(), "Type your question...".to_string()),
                ("hero_cta".to_string(), "<strong>Ask</strong> us".to_string()),
            ]),
        );
        catalog.insert_language(
            "hi",
            Dictionary::from([
                ("hero_title".to_string(), "स्वागत".to_string()),
                ("search_placeholder".to_string(), "सेवाएं खोजें...".to_string()),
                ("chat_send".to_string(), "भेजें".to_string()),
            ]),
        );
        catalog
    }

    fn parse(source: &str) -> MarkupPage {
        MarkupPage::parse(source, PageMarkers::default()).unwrap()
    }

    #[test]
    fn page_without_writes_round_trips() {
        let source = "<!DOCTYPE html>\n<div class=\"a\"><br><p>Tom &amp; Jerry&nbsp;</p><!-- c --></div>\n";
        assert_eq!(parse(source).to_string(), source);
    }

    #[test]
    fn script_content_is_kept_raw() {
        let page = parse(PAGE);
        assert!(page.to_string().contains("<script>if (a < b && c) { go(); }</script>"));
    }

    #[test]
    fn bindings_are_discovered_in_document_order() {
        let page = parse(PAGE);
        let keys: Vec<(String, Marker)> = page
            .bindings()
            .into_iter()
            .map(|b| (b.key, b.marker))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("nav_home".to_string(), Marker::Text),
                ("hero_title".to_string(), Marker::Text),
                ("search_placeholder".to_string(), Marker::Text),
                ("chat_send".to_string(), Marker::Text),
                ("chat_placeholder".to_string(), Marker::Text),
                ("hero_cta".to_string(), Marker::Html),
            ]
        );
    }

    #[test]
    fn apply_writes_each_target_kind() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog, "hi", "en");
        let mut page = parse(PAGE);

        let report = apply(&mut page, &resolver, "hi", true);

        assert_eq!(report.writes, 6);
        assert!(report.selector_synced);
        assert_eq!(page.text_by_id("hero").as_deref(), Some("स्वागत"));
        assert_eq!(
            page.attribute_by_id("search", "placeholder").as_deref(),
            Some("सेवाएं खोजें...")
        );
        assert_eq!(page.attribute_by_id("send", "value").as_deref(), Some("भेजें"));
        assert_eq!(
            page.text_by_id("question").as_deref(),
            Some("Type your question...")
        );
        assert!(page.to_string().contains("<p id=\"cta\" data-i18n-html=\"hero_cta\"><strong>Ask</strong> us</p>"));
        // Missing everywhere: raw key shown.
        assert!(page.to_string().contains(">nav_home</title>"));
    }

    #[test]
    fn text_writes_are_escaped() {
        let mut catalog = TranslationCatalog::new();
        catalog.insert_language(
            "en",
            Dictionary::from([("hero_title".to_string(), "<i>Tom & Jerry</i>".to_string())]),
        );
        let resolver = Resolver::new(&catalog, "en", "en");
        let mut page = parse(r#"<h1 id="hero" data-i18n="hero_title"/>"#);

        apply(&mut page, &resolver, "en", true);

        assert_eq!(
            page.to_string(),
            r#"<h1 id="hero" data-i18n="hero_title">&lt;i&gt;Tom &amp; Jerry&lt;/i&gt;</h1>"#
        );
        assert_eq!(page.text_by_id("hero").as_deref(), Some("<i>Tom & Jerry</i>"));
    }

    #[test]
    fn selector_marks_active_option() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog, "hi", "en");
        let mut page = parse(PAGE);

        apply(&mut page, &resolver, "hi", true);

        let html = page.to_string();
        assert!(html.contains("<option value=\"en\">English</option>"));
        assert!(html.contains("<option value=\"hi\" selected=\"selected\">हिन्दी</option>"));
    }

    #[test]
    fn input_selector_gets_value() {
        let mut page = parse(r#"<input id="languageSelector" type="hidden">"#);
        assert!(page.sync_language_selector("hi"));
        assert_eq!(
            page.attribute_by_id("languageSelector", "value").as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn page_without_selector_reports_it() {
        let mut page = parse("<p>plain</p>");
        assert!(!page.sync_language_selector("en"));
    }

    #[test]
    fn apply_is_idempotent() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog, "hi", "en");
        let mut page = parse(PAGE);

        apply(&mut page, &resolver, "hi", true);
        let first = page.to_string();
        apply(&mut page, &resolver, "hi", true);

        assert_eq!(page.to_string(), first);
    }

    #[test]
    fn custom_markers_are_honoured() {
        let markers = PageMarkers {
            text_attribute: "data-t".to_string(),
            html_attribute: "data-t-html".to_string(),
            selector_ids: vec!["language-select".to_string()],
        };
        let mut page = MarkupPage::parse(
            r#"<div><span data-t="hero_title">x</span><span data-i18n="hero_title">y</span><input id="language-select"></div>"#,
            markers,
        )
        .unwrap();
        let catalog = catalog();
        let resolver = Resolver::new(&catalog, "en", "en");

        let report = apply(&mut page, &resolver, "en", true);

        assert_eq!(report.writes, 1);
        assert!(report.selector_synced);
    }

    #[test]
    fn unclosed_list_items_stay_siblings() {
        let mut catalog = TranslationCatalog::new();
        catalog.insert_language(
            "en",
            Dictionary::from([
                ("nav_home".to_string(), "Home".to_string()),
                ("nav_services".to_string(), "Services".to_string()),
            ]),
        );
        let resolver = Resolver::new(&catalog, "en", "en");
        let mut page = parse(
            r#"<ul><li id="a" data-i18n="nav_home">H<li id="b" data-i18n="nav_services">S</ul>"#,
        );

        let report = apply(&mut page, &resolver, "en", true);

        assert_eq!(report.writes, 2);
        assert_eq!(
            page.to_string(),
            r#"<ul><li id="a" data-i18n="nav_home">Home<li id="b" data-i18n="nav_services">Services</ul>"#
        );
    }

    #[test]
    fn optional_end_tags_are_implied() {
        let source = "<table><tr><td id=\"x\">1<td id=\"y\">2<tr><td id=\"z\">3</table>\
                      <dl><dt>a<dd id=\"d\">b</dl><p id=\"p\">one<div id=\"after\">two</div>";
        let page = parse(source);

        assert_eq!(page.to_string(), source);
        assert_eq!(page.text_by_id("x").as_deref(), Some("1"));
        assert_eq!(page.text_by_id("z").as_deref(), Some("3"));
        assert_eq!(page.text_by_id("d").as_deref(), Some("b"));
        assert_eq!(page.text_by_id("p").as_deref(), Some("one"));
        assert_eq!(page.text_by_id("after").as_deref(), Some("two"));
    }

    #[test]
    fn unclosed_options_are_selected_individually() {
        let mut page = parse(
            r#"<select id="languageSelector"><option value="en" selected>English<option value="hi">Hindi</select>"#,
        );

        assert!(page.sync_language_selector("hi"));

        assert_eq!(
            page.to_string(),
            r#"<select id="languageSelector"><option value="en">English<option value="hi" selected="selected">Hindi</select>"#
        );
    }

    #[test]
    fn bare_less_than_is_text() {
        for source in [
            r#"<p data-i18n="nav_home">a < b</p>"#,
            "<p>1 <3 and x</ y</p>",
        ] {
            assert_eq!(parse(source).to_string(), source);
        }

        let page = parse(r#"<p id="cmp">a < b</p><span id="next">c</span>"#);
        assert_eq!(page.text_by_id("cmp").as_deref(), Some("a < b"));
        assert_eq!(page.text_by_id("next").as_deref(), Some("c"));
    }

    #[test]
    fn stray_end_tag_is_preserved() {
        let source = "<div>a</span></div>";
        assert_eq!(parse(source).to_string(), source);
    }
}
