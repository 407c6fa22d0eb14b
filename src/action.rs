//! Click semantics shared by component buttons and the under-construction CTA.
//!
//! An href starting with `#` scrolls smoothly to the element with that id; any
//! other href opens in a new browsing context. The rendered markup carries the
//! same decision (see [`ClickAction::attributes`]) and [`ACTIONS_JS`] performs
//! the scroll in the browser. [`DomHost`] is the seam for hosts that drive
//! clicks directly.

use crate::sanitize::is_safe_url;

/// Script wiring `data-action="scroll"` elements to smooth scrolling.
pub const ACTIONS_JS: &str = include_str!("../static/actions.js");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Smooth-scroll to the element with this id.
    ScrollTo(String),
    /// Open the URL in a new browsing context.
    OpenNewContext(String),
}

impl ClickAction {
    /// Decide what clicking `href` does.
    ///
    /// Returns `None` for blank or unsafe hrefs; such controls are not rendered.
    pub fn from_href(href: &str) -> Option<ClickAction> {
        let href = href.trim();
        if href.is_empty() || !is_safe_url(href) {
            return None;
        }
        match href.strip_prefix('#') {
            Some(id) => Some(ClickAction::ScrollTo(id.to_string())),
            None => Some(ClickAction::OpenNewContext(href.to_string())),
        }
    }

    /// `(href, target, rel, data-action, data-target)` for an anchor.
    pub fn attributes(&self) -> AnchorAttributes<'_> {
        match self {
            ClickAction::ScrollTo(id) => AnchorAttributes {
                href: None,
                target: None,
                rel: None,
                scroll_target: Some(id),
            },
            ClickAction::OpenNewContext(url) => AnchorAttributes {
                href: Some(url),
                target: Some("_blank"),
                rel: Some("noreferrer"),
                scroll_target: None,
            },
        }
    }
}

/// Attribute values an anchor needs to carry a [`ClickAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorAttributes<'a> {
    pub href: Option<&'a str>,
    pub target: Option<&'static str>,
    pub rel: Option<&'static str>,
    pub scroll_target: Option<&'a str>,
}

impl AnchorAttributes<'_> {
    /// `href` to emit; hash targets keep a `#id` fallback for no-script browsers.
    pub fn href_or_hash(&self) -> String {
        match (self.href, self.scroll_target) {
            (Some(href), _) => href.to_string(),
            (None, Some(id)) => format!("#{id}"),
            (None, None) => String::new(),
        }
    }

    pub fn data_action(&self) -> Option<&'static str> {
        self.scroll_target.map(|_| "scroll")
    }
}

/// Primitives the UI host provides for buttons and links.
pub trait DomHost {
    /// Smoothly scroll the element with `id` into view. Returns false if absent.
    fn scroll_into_view(&mut self, id: &str) -> bool;
    /// Open `url` in a new browsing context.
    fn open_new_context(&mut self, url: &str);
}

/// Perform `action` against `host`. A missing scroll target is a no-op.
pub fn activate(action: &ClickAction, host: &mut dyn DomHost) {
    match action {
        ClickAction::ScrollTo(id) => {
            host.scroll_into_view(id);
        }
        ClickAction::OpenNewContext(url) => host.open_new_context(url),
    }
}
