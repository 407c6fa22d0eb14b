//! Component rendering.
//!
//! [`render_component`] maps one [`Component`] to markup, or to `None` when
//! there is nothing to show: the component is hidden, its required content is
//! missing, its action target is unsafe, or its type has no renderer. A `None`
//! reserves no space in the layout; callers simply skip it.
//!
//! | type     | required            | output                                     |
//! |----------|---------------------|--------------------------------------------|
//! | `text`   | resolved text       | `<p>`, or sanitized rich HTML if it has tags |
//! | `image`  | `src`               | `<img>`, or a document link for PDFs       |
//! | `video`  | `src`               | `<video controls>`                         |
//! | `button` | resolved text, href | anchor styled as a button (see [`crate::action`]) |
//! | `link`   | resolved text, href | anchor, `_blank` + `noreferrer` by default |
//! | `html`   | `html`              | sanitized raw markup                       |
//!
//! The hero flag only switches the tone class (`tone-hero` vs `tone-slate`).

use crate::action::ClickAction;
use crate::component::{
    ButtonContent, Component, ComponentBody, HtmlContent, ImageContent, LinkContent,
    RESERVED_TYPES, TextContent, VideoContent, is_plain_css_value,
};
use crate::sanitize::{is_pdf, is_safe_url, looks_like_html, sanitize_html};
use crate::types::Lang;
use log::{debug, warn};
use maud::{Markup, PreEscaped, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub lang: Lang,
    pub is_hero: bool,
}

impl RenderContext {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            is_hero: false,
        }
    }

    pub fn hero(lang: Lang) -> Self {
        Self {
            lang,
            is_hero: true,
        }
    }

    fn tone(&self) -> &'static str {
        if self.is_hero { "tone-hero" } else { "tone-slate" }
    }
}

/// Render one component, or nothing.
pub fn render_component(component: &Component, ctx: &RenderContext) -> Option<Markup> {
    if !component.is_visible {
        return None;
    }
    let inner = match &component.body {
        ComponentBody::Text(content) => render_text(content, ctx),
        ComponentBody::Image(content) => render_image(content, ctx),
        ComponentBody::Video(content) => render_video(content),
        ComponentBody::Button(content) => render_button(content, ctx),
        ComponentBody::Link(content) => render_link(content, ctx),
        ComponentBody::Html(content) => render_html(content, ctx),
        ComponentBody::Other { kind, .. } => {
            if RESERVED_TYPES.contains(&kind.as_str()) {
                debug!("component {}: {kind} components are not rendered yet", component.id);
            } else {
                warn!("component {}: unknown type {kind:?}, skipping", component.id);
            }
            None
        }
    };
    let Some(inner) = inner else {
        debug!("component {}: nothing to render", component.id);
        return None;
    };

    let style = component.style.to_css();
    Some(html! {
        div class={ "cp-component cp-" (component.kind()) } data-component-id=(component.id) style=[style] {
            (inner)
        }
    })
}

/// Render components in the given order, skipping those that produce nothing.
pub fn render_components<'a>(
    components: impl IntoIterator<Item = &'a Component>,
    ctx: &RenderContext,
) -> Markup {
    html! {
        @for component in components {
            @if let Some(markup) = render_component(component, ctx) {
                (markup)
            }
        }
    }
}

fn render_text(content: &TextContent, ctx: &RenderContext) -> Option<Markup> {
    let text = content.text.resolve(ctx.lang)?;
    Some(if looks_like_html(text) {
        html! { div class={ "cp-rich " (ctx.tone()) } { (PreEscaped(sanitize_html(text))) } }
    } else {
        html! { p class={ "cp-text " (ctx.tone()) } { (text) } }
    })
}

fn render_image(content: &ImageContent, ctx: &RenderContext) -> Option<Markup> {
    let src = content.src.trim();
    if src.is_empty() || !is_safe_url(src) {
        return None;
    }
    let alt = content.alt.resolve(ctx.lang).unwrap_or_default();
    if is_pdf(src, content.mime.as_deref()) {
        let label = if alt.is_empty() {
            ctx.lang.pick("عرض الملف", "Open document")
        } else {
            alt
        };
        return Some(html! {
            a.cp-document href=(src) target="_blank" rel="noreferrer" { (label) }
        });
    }
    Some(html! {
        img.cp-image src=(src) alt=(alt) loading="lazy";
    })
}

fn render_video(content: &VideoContent) -> Option<Markup> {
    let src = content.src.trim();
    if src.is_empty() || !is_safe_url(src) {
        return None;
    }
    let poster = content
        .poster
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty() && is_safe_url(p));
    let autoplay = content.autoplay;
    Some(html! {
        video.cp-video src=(src) poster=[poster] controls playsinline autoplay[autoplay] muted[autoplay] {}
    })
}

fn render_button(content: &ButtonContent, ctx: &RenderContext) -> Option<Markup> {
    let text = content.text.resolve(ctx.lang)?;
    let action = ClickAction::from_href(&content.href)?;
    Some(action_button(text, &action, content.style.class(), button_colors(content)))
}

/// Anchor carrying a [`ClickAction`], styled as a button.
pub(crate) fn action_button(
    label: &str,
    action: &ClickAction,
    class: &str,
    style: Option<String>,
) -> Markup {
    let attrs = action.attributes();
    html! {
        a class={ "cp-button " (class) } role="button" href=(attrs.href_or_hash())
            target=[attrs.target] rel=[attrs.rel]
            data-action=[attrs.data_action()] data-target=[attrs.scroll_target]
            style=[style] {
            (label)
        }
    }
}

fn button_colors(content: &ButtonContent) -> Option<String> {
    let declarations: Vec<String> = [
        ("background-color", content.bg_color.as_deref()),
        ("color", content.text_color.as_deref()),
        ("border-color", content.border_color.as_deref()),
    ]
    .into_iter()
    .filter_map(|(prop, value)| {
        let value = value?.trim();
        is_plain_css_value(value).then(|| format!("{prop}: {value};"))
    })
    .collect();
    (!declarations.is_empty()).then(|| declarations.join(" "))
}

fn render_link(content: &LinkContent, ctx: &RenderContext) -> Option<Markup> {
    let text = content.text.resolve(ctx.lang)?;
    let href = content.href.trim();
    if href.is_empty() || !is_safe_url(href) {
        return None;
    }
    let target = content
        .target
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("_blank");
    let rel = (target == "_blank").then_some("noreferrer");
    Some(html! {
        a class={ "cp-link " (ctx.tone()) } href=(href) target=(target) rel=[rel] { (text) }
    })
}

fn render_html(content: &HtmlContent, ctx: &RenderContext) -> Option<Markup> {
    if content.html.trim().is_empty() {
        return None;
    }
    Some(html! {
        div class={ "cp-rich " (ctx.tone()) } { (PreEscaped(sanitize_html(&content.html))) }
    })
}
