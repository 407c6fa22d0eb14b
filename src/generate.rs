//! Page dispatch, slot rendering and static output.
//!
//! Every page goes through [`render_page`], which picks exactly one renderer:
//!
//! 1. `underConstruction` → [`crate::construction`]
//! 2. `sectionVariant == "hero"` → [`crate::hero`]
//! 3. otherwise the page's components, in `orderIndex` order
//!
//! A slot fragment ([`render_slot`]) is the selected pages for one placement,
//! each as its own `<section>`, and is meant to be spliced into the public
//! page at that point. [`generate`] writes those fragments and a standalone
//! document per page for every configured language:
//!
//! ```text
//! dist/
//! ├── ar/
//! │   ├── slots/
//! │   │   ├── after_header.html     # only slots with pages
//! │   │   └── before_footer.html
//! │   └── about/
//! │       └── index.html            # <html lang="ar" dir="rtl">
//! └── en/
//!     └── ...
//! ```

use crate::action::ACTIONS_JS;
use crate::config::SiteConfig;
use crate::construction::render_under_construction;
use crate::hero::{HeroTheme, render_hero_with};
use crate::naming::slugify;
use crate::render::{RenderContext, render_components};
use crate::select::{navigation_pages, select_pages_for_slot};
use crate::types::{Lang, Page, Placement};
use log::{info, warn};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/site.css");

/// Render one page as a section, choosing the renderer by its flags.
pub fn render_page(page: &Page, lang: Lang, theme: &HeroTheme) -> Markup {
    if page.under_construction {
        render_under_construction(page, lang)
    } else if page.is_hero() {
        render_hero_with(page, lang, theme)
    } else {
        render_standard(page, lang)
    }
}

fn render_standard(page: &Page, lang: Lang) -> Markup {
    let anchor = page.slug();
    html! {
        section.cp-section.cp-standard id=(&*anchor) {
            div.cp-container {
                (render_components(page.ordered_components(), &RenderContext::new(lang)))
            }
        }
    }
}

/// Pages for `slot`, rendered in order. `None` when the slot is empty.
pub fn render_slot(pages: &[Page], slot: Placement, lang: Lang, theme: &HeroTheme) -> Option<Markup> {
    let selected = select_pages_for_slot(pages, slot);
    if selected.is_empty() {
        return None;
    }
    Some(html! {
        div.cp-slot data-slot=(slot.as_str()) lang=(lang.code()) dir=(lang.dir()) {
            @for page in selected {
                (render_page(page, lang, theme))
            }
        }
    })
}

/// Directory name a page is written under, or `None` if nothing usable remains.
pub fn route_segment(page: &Page) -> Option<String> {
    let segment = slugify(&page.slug());
    (!segment.is_empty()).then_some(segment)
}

/// Full HTML document with language and direction set on `<html>`.
pub fn render_document(title: &str, lang: Lang, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) dir=(lang.dir()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script { (PreEscaped(ACTIONS_JS)) }
            }
        }
    }
}

/// Top navigation: pages flagged for it, plus a link to the other language.
pub fn render_nav(pages: &[Page], lang: Lang, current: Option<&str>) -> Markup {
    let other = lang.other();
    let switch_href = match current {
        Some(segment) => format!("/{}/{}/", other.code(), segment),
        None => format!("/{}/", other.code()),
    };
    html! {
        nav.site-nav {
            ul {
                @for page in navigation_pages(pages) {
                    @if let Some(segment) = route_segment(page) {
                        @let is_current = current == Some(segment.as_str());
                        li class=[is_current.then_some("current")] {
                            a href={ "/" (lang.code()) "/" (segment) "/" } { (page.display_title(lang)) }
                        }
                    }
                }
            }
            a.lang-switch href=(switch_href) hreflang=(other.code()) {
                (other.pick("العربية", "English"))
            }
        }
    }
}

/// Standalone document for one page.
pub fn render_page_document(
    page: &Page,
    pages: &[Page],
    lang: Lang,
    config: &SiteConfig,
) -> Markup {
    let theme = config.hero.theme();
    let segment = route_segment(page);
    let site_title = config.site.title.resolve(lang).unwrap_or_default();
    let title = if site_title.is_empty() {
        page.display_title(lang).to_string()
    } else {
        format!("{} | {}", page.display_title(lang), site_title)
    };
    let content = html! {
        header.site-header {
            (render_nav(pages, lang, segment.as_deref()))
        }
        main.custom-page {
            (render_page(page, lang, &theme))
        }
    };
    render_document(&title, lang, content)
}

/// What [`generate`] wrote, relative to the output directory.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub slots: Vec<(Lang, Placement, usize, PathBuf)>,
    pub pages: Vec<(Lang, String, PathBuf)>,
}

/// Write slot fragments and standalone pages for every configured language.
pub fn generate(
    pages: &[Page],
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let theme = config.hero.theme();
    let mut report = GenerateReport::default();

    for &lang in &config.site.languages {
        let lang_dir = output_dir.join(lang.code());
        let slots_dir = lang_dir.join("slots");
        fs::create_dir_all(&slots_dir)?;

        for slot in Placement::ALL {
            let Some(markup) = render_slot(pages, slot, lang, &theme) else {
                continue;
            };
            let relative = PathBuf::from(lang.code())
                .join("slots")
                .join(format!("{}.html", slot.as_str()));
            fs::write(output_dir.join(&relative), markup.into_string())?;
            let count = select_pages_for_slot(pages, slot).len();
            report.slots.push((lang, slot, count, relative));
        }

        let mut written = HashSet::new();
        for page in pages.iter().filter(|p| p.is_visible) {
            let Some(segment) = route_segment(page) else {
                warn!("page {}: no usable slug, skipping standalone page", page.id);
                continue;
            };
            if segment == "slots" {
                warn!("page {}: slug {segment:?} is reserved, skipping", page.id);
                continue;
            }
            if !written.insert(segment.clone()) {
                warn!("page {}: duplicate slug {segment:?}, first page wins", page.id);
                continue;
            }
            let page_dir = lang_dir.join(&segment);
            fs::create_dir_all(&page_dir)?;
            let document = render_page_document(page, pages, lang, config);
            fs::write(page_dir.join("index.html"), document.into_string())?;
            let relative = PathBuf::from(lang.code()).join(&segment).join("index.html");
            report.pages.push((lang, segment, relative));
        }
    }

    info!(
        "generated {} slot fragments and {} pages in {}",
        report.slots.len(),
        report.pages.len(),
        output_dir.display()
    );
    Ok(report)
}
