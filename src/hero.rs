//! Hero layout variant.
//!
//! A hero page is drawn as a text box (title, description, content components,
//! then a row of buttons) plus at most one image. Components are split by
//! [`partition`]:
//!
//! - the first visible image (by `orderIndex`) is the hero image; any further
//!   images are dropped entirely,
//! - every button goes to the button row,
//! - everything else stays in the text box, in order.
//!
//! `imagePosition` then decides the composition:
//!
//! ```text
//! top         bottom      left            right (default)   background
//! [image]     [text]      [image][text]   [text][image]     section bg = image
//! [text]      [image]                                       [text]
//! ```
//!
//! Colors default to a dark slate section with a translucent text box, and the
//! text color is picked for contrast when the page does not set one.

use crate::color::{best_text_color_bw, to_rgba};
use crate::component::{Component, ComponentBody, is_plain_css_value};
use crate::render::{RenderContext, render_component};
use crate::sanitize::is_safe_url;
use crate::types::{HeroSettings, ImagePosition, Lang, Page};
use maud::{Markup, html};

/// Fallback colors for hero sections that leave them unset.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroTheme {
    pub background_color: String,
    pub text_box_background: String,
}

impl Default for HeroTheme {
    fn default() -> Self {
        Self {
            background_color: "#0f172a".to_string(),
            text_box_background: "rgba(15, 23, 42, 0.6)".to_string(),
        }
    }
}

/// A hero page's components, split by role.
#[derive(Debug, Default)]
pub struct HeroParts<'a> {
    pub image: Option<&'a Component>,
    pub buttons: Vec<&'a Component>,
    pub content: Vec<&'a Component>,
}

/// Split components into hero image, buttons and text-box content.
pub fn partition(page: &Page) -> HeroParts<'_> {
    let mut parts = HeroParts::default();
    for component in page.ordered_components() {
        if component.is_image() {
            if parts.image.is_none() && component.is_visible {
                parts.image = Some(component);
            }
        } else if component.is_button() {
            parts.buttons.push(component);
        } else {
            parts.content.push(component);
        }
    }
    parts
}

/// Resolved colors for one hero section.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroColors {
    pub section_background: String,
    pub text_box_background: String,
    pub text: String,
}

impl HeroColors {
    pub fn resolve(settings: &HeroSettings, theme: &HeroTheme) -> Self {
        let base = non_blank(settings.background_color.as_deref())
            .unwrap_or(theme.background_color.as_str());
        let section_background = to_rgba(base, settings.background_opacity.unwrap_or(100.0));
        let text_box_background = match non_blank(settings.text_box_background_color.as_deref()) {
            Some(color) => to_rgba(color, settings.text_box_background_opacity.unwrap_or(100.0)),
            None => theme.text_box_background.clone(),
        };
        let text = non_blank(settings.text_color.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| best_text_color_bw(base).to_string());
        Self {
            section_background,
            text_box_background,
            text,
        }
    }
}

/// A page-supplied color, if it is set and safe to put in a style attribute.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && is_plain_css_value(v))
}

fn title_size_class(size: Option<&str>) -> &'static str {
    match size.map(str::trim) {
        Some("sm") => "hero-title-sm",
        Some("md") => "hero-title-md",
        Some("xl") => "hero-title-xl",
        _ => "hero-title-lg",
    }
}

/// The hero image's source, if it can be drawn.
fn image_src(image: Option<&Component>) -> Option<&str> {
    match &image?.body {
        ComponentBody::Image(content) => {
            let src = content.src.trim();
            (!src.is_empty() && is_safe_url(src)).then_some(src)
        }
        _ => None,
    }
}

/// Usable inside `url("...")` without escaping.
fn css_url_safe(src: &str) -> bool {
    !src.chars()
        .any(|c| matches!(c, '"' | '\'' | '\\' | '(' | ')') || c.is_control())
}

/// Render a hero page with the stock theme.
pub fn render_hero(page: &Page, lang: Lang) -> Markup {
    render_hero_with(page, lang, &HeroTheme::default())
}

/// Render a hero page.
pub fn render_hero_with(page: &Page, lang: Lang, theme: &HeroTheme) -> Markup {
    let settings = page.hero_settings.clone().unwrap_or_default();
    let colors = HeroColors::resolve(&settings, theme);
    let position = settings.image_position.unwrap_or_default();
    let parts = partition(page);
    let ctx = RenderContext::hero(lang);

    let src = image_src(parts.image);
    let alt = match parts.image.map(|c| &c.body) {
        Some(ComponentBody::Image(content)) => content.alt.resolve(lang).unwrap_or_default(),
        _ => "",
    };

    let background_image = match (position, src) {
        (ImagePosition::Background, Some(src)) if css_url_safe(src) => Some(src),
        _ => None,
    };
    let section_style = match background_image {
        Some(src) => format!(
            "background-color: {bg}; background-image: linear-gradient({bg}, {bg}), url(\"{src}\"); \
             background-size: cover; background-position: center; color: {text};",
            bg = colors.section_background,
            text = colors.text,
        ),
        None => format!(
            "background-color: {}; color: {};",
            colors.section_background, colors.text
        ),
    };

    let buttons: Vec<Markup> = parts
        .buttons
        .iter()
        .filter_map(|c| render_component(c, &ctx))
        .collect();
    let description = page.description.resolve(lang);

    let text_box = html! {
        div.hero-text-box style={ "background-color: " (colors.text_box_background) "; color: " (colors.text) ";" } {
            h2 class={ "hero-title " (title_size_class(settings.title_size.as_deref())) } {
                (page.display_title(lang))
            }
            @if let Some(description) = description {
                p.hero-description { (description) }
            }
            @for component in &parts.content {
                @if let Some(markup) = render_component(component, &ctx) {
                    (markup)
                }
            }
            @if !buttons.is_empty() {
                div.hero-buttons {
                    @for button in &buttons {
                        (button)
                    }
                }
            }
        }
    };

    let image_block = match (position, src) {
        (ImagePosition::Background, _) | (_, None) => None,
        (_, Some(src)) => Some(html! {
            div.hero-image {
                img src=(src) alt=(alt) loading="lazy";
            }
        }),
    };

    let anchor = page.slug();
    let (layout, image_first) = match position {
        ImagePosition::Top => ("hero-stack", true),
        ImagePosition::Bottom => ("hero-stack", false),
        ImagePosition::Left => ("hero-grid", true),
        ImagePosition::Right => ("hero-grid", false),
        ImagePosition::Background => ("hero-overlay", false),
    };
    let layout = if image_block.is_none() && layout == "hero-grid" {
        "hero-single"
    } else {
        layout
    };

    html! {
        section.cp-section.cp-hero id=(&*anchor) data-image-position=(position_name(position)) style=(section_style) {
            div class={ "hero-inner " (layout) } {
                @if image_first {
                    @if let Some(image) = &image_block { (image) }
                    (text_box)
                } @else {
                    (text_box)
                    @if let Some(image) = &image_block { (image) }
                }
            }
        }
    }
}

fn position_name(position: ImagePosition) -> &'static str {
    match position {
        ImagePosition::Top => "top",
        ImagePosition::Bottom => "bottom",
        ImagePosition::Left => "left",
        ImagePosition::Right => "right",
        ImagePosition::Background => "background",
    }
}
