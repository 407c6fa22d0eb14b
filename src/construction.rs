//! Placeholder view for pages flagged `underConstruction`.
//!
//! The page's own components are not drawn. Instead a fixed card shows an
//! "in development" kicker, a heading, the page description (or a stock body),
//! the page title, and either a call-to-action or a "check back soon" caption.
//! The call-to-action follows the same click rules as component buttons.

use crate::action::ClickAction;
use crate::render::action_button;
use crate::types::{Lang, Page};
use maud::{Markup, html};

pub fn render_under_construction(page: &Page, lang: Lang) -> Markup {
    let body = page
        .description
        .resolve(lang)
        .unwrap_or(lang.pick(
            "نعمل حالياً على تجهيز هذا القسم لتقديم أفضل تجربة لكم.",
            "We are putting the finishing touches on this section.",
        ));

    let cta = page
        .under_construction_button
        .as_ref()
        .and_then(|button| {
            let action = ClickAction::from_href(&button.href)?;
            Some((button, action))
        })
        .map(|(button, action)| {
            let label = button
                .label
                .resolve(lang)
                .unwrap_or(lang.pick("قريباً", "Coming Soon"));
            action_button(label, &action, "btn-primary", None)
        });

    let anchor = page.slug();
    html! {
        section.cp-section.cp-construction id=(&*anchor) {
            div.construction-card {
                span.construction-kicker { (lang.pick("قيد التطوير", "In development")) }
                h2.construction-heading { (lang.pick("هذه الصفحة قيد الإنشاء", "This page is under construction")) }
                p.construction-body { (body) }
                div.construction-title { (page.display_title(lang)) }
                @match cta {
                    Some(button) => div.construction-cta { (button) },
                    None => p.construction-caption { (lang.pick("تابعونا قريباً", "Check back soon")) },
                }
            }
        }
    }
}
