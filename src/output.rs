//! CLI output formatting.
//!
//! Output is page-centric: every page is shown by its positional index and
//! display title, with the slug and flags as indented context lines.
//!
//! # Check
//!
//! ```text
//! Slots
//! after_header (2 pages)
//!     001 About
//!         Slug: about
//!     002 Academy [hero]
//!         Slug: academy
//!
//! Navigation
//!     001 About → /ar/about/
//!
//! Unplaced
//!     001 Draft [hidden]
//! ```
//!
//! # Build
//!
//! ```text
//! ar
//!     after_header (2 pages) → ar/slots/after_header.html
//!     About → ar/about/index.html
//!
//! Generated 2 slot fragments, 2 pages
//! ```
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout.

use crate::generate::{GenerateReport, route_segment};
use crate::select::{navigation_pages, select_pages_for_slot, unplaced_pages};
use crate::store::{LoadedPages, PersistOutcome};
use crate::types::{Lang, Page, Placement};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Bracketed markers for the flags that change how a page renders.
fn page_flags(page: &Page) -> String {
    let mut flags = Vec::new();
    if !page.is_visible {
        flags.push("hidden");
    }
    if page.under_construction {
        flags.push("under construction");
    } else if page.is_hero() {
        flags.push("hero");
    }
    flags.iter().map(|f| format!(" [{f}]")).collect()
}

/// Page header line: index, title and flags.
///
/// ```text
/// 001 About
/// 002 Academy [hero]
/// ```
fn page_line(index: usize, page: &Page, lang: Lang) -> String {
    let title = page.display_title(lang);
    let title = if title.is_empty() { page.id.as_str() } else { title };
    format!("{} {}{}", format_index(index), title, page_flags(page))
}

/// Format the `check` command: slot contents, navigation and unplaced pages.
pub fn format_check_output(pages: &[Page], lang: Lang) -> Vec<String> {
    let mut lines = vec!["Slots".to_string()];
    let mut any_slot = false;
    for slot in Placement::ALL {
        let selected = select_pages_for_slot(pages, slot);
        if selected.is_empty() {
            continue;
        }
        any_slot = true;
        lines.push(format!("{} ({})", slot, plural(selected.len(), "page")));
        for (i, page) in selected.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), page_line(i + 1, page, lang)));
            lines.push(format!("{}Slug: {}", indent(2), page.slug()));
        }
    }
    if !any_slot {
        lines.push(format!("{}(no visible placed pages)", indent(1)));
    }

    let nav = navigation_pages(pages);
    if !nav.is_empty() {
        lines.push(String::new());
        lines.push("Navigation".to_string());
        for (i, page) in nav.iter().enumerate() {
            let target = match route_segment(page) {
                Some(segment) => format!("/{}/{}/", lang.code(), segment),
                None => "(no usable slug)".to_string(),
            };
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                page_line(i + 1, page, lang),
                target
            ));
        }
    }

    let unplaced = unplaced_pages(pages);
    if !unplaced.is_empty() {
        lines.push(String::new());
        lines.push("Unplaced".to_string());
        for (i, page) in unplaced.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), page_line(i + 1, page, lang)));
        }
    }

    lines
}

pub fn print_check_output(pages: &[Page], lang: Lang) {
    for line in format_check_output(pages, lang) {
        println!("{}", line);
    }
}

/// Format the result of a load pass for the `migrate` command.
pub fn format_migrate_output(loaded: &LoadedPages) -> Vec<String> {
    let mut lines = vec![format!("Loaded {}", plural(loaded.pages.len(), "page"))];
    if !loaded.did_migrate {
        lines.push("Placements already normalized, nothing to save".to_string());
        return lines;
    }
    for (i, page) in loaded.pages.iter().enumerate() {
        let placement = page
            .placement
            .map(|p| p.as_str())
            .unwrap_or("(unplaced)");
        lines.push(format!("{}{} {} \u{2192} {}", indent(1), format_index(i + 1), page.id, placement));
    }
    lines.push(match &loaded.persist {
        PersistOutcome::Saved => "Saved normalized placements".to_string(),
        PersistOutcome::Failed(reason) => format!("Could not save normalized placements: {reason}"),
        PersistOutcome::NotNeeded => "Nothing to save".to_string(),
    });
    lines
}

pub fn print_migrate_output(loaded: &LoadedPages) {
    for line in format_migrate_output(loaded) {
        println!("{}", line);
    }
}

/// Format the `build` report, grouped by language.
pub fn format_generate_output(report: &GenerateReport, pages: &[Page]) -> Vec<String> {
    let mut lines = Vec::new();
    for lang in Lang::ALL {
        let slots: Vec<_> = report.slots.iter().filter(|s| s.0 == lang).collect();
        let written: Vec<_> = report.pages.iter().filter(|p| p.0 == lang).collect();
        if slots.is_empty() && written.is_empty() {
            continue;
        }
        lines.push(lang.code().to_string());
        for (_, slot, count, path) in slots {
            lines.push(format!(
                "{}{} ({}) \u{2192} {}",
                indent(1),
                slot,
                plural(*count, "page"),
                path.display()
            ));
        }
        for (_, segment, path) in written {
            let title = pages
                .iter()
                .find(|p| route_segment(p).as_deref() == Some(segment.as_str()))
                .map(|p| p.display_title(lang))
                .filter(|t| !t.is_empty())
                .unwrap_or(segment.as_str());
            lines.push(format!("{}{} \u{2192} {}", indent(1), title, path.display()));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Generated {}, {}",
        plural(report.slots.len(), "slot fragment"),
        plural(report.pages.len(), "page")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, pages: &[Page]) {
    for line in format_generate_output(report, pages) {
        println!("{}", line);
    }
}

/// Format a contrast check between a background and a text color.
pub fn format_contrast_output(background: &str, text: &str, ratio: f64, recommended: &str) -> Vec<String> {
    let verdict = if ratio >= crate::color::AA_NORMAL_TEXT {
        "passes AA"
    } else {
        "fails AA"
    };
    vec![
        format!("{text} on {background}: {ratio:.2}:1 ({verdict})"),
        format!("{}Recommended text: {recommended}", indent(1)),
    ]
}

pub fn print_contrast_output(background: &str, text: &str, ratio: f64, recommended: &str) {
    for line in format_contrast_output(background, text, ratio, recommended) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LocalizedString, SectionVariant};
    use std::path::PathBuf;

    fn page(id: &str, placement: Option<Placement>, order: i64) -> Page {
        Page {
            id: id.into(),
            name: id.into(),
            title: LocalizedString::new(format!("{id}-ar"), id),
            is_visible: true,
            placement,
            order: Some(order),
            ..Default::default()
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_words() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
    }

    #[test]
    fn check_lists_slots_in_order() {
        let mut hero = page("Academy", Some(Placement::AfterHeader), 2);
        hero.section_variant = SectionVariant::Hero;
        let pages = vec![hero, page("About", Some(Placement::AfterHeader), 1)];
        let lines = format_check_output(&pages, Lang::En);
        assert_eq!(lines[0], "Slots");
        assert_eq!(lines[1], "after_header (2 pages)");
        assert_eq!(lines[2], "    001 About");
        assert_eq!(lines[3], "        Slug: about");
        assert_eq!(lines[4], "    002 Academy [hero]");
    }

    #[test]
    fn check_shows_navigation_and_unplaced() {
        let mut about = page("About", None, 0);
        about.show_in_navigation = true;
        let mut draft = page("Draft", None, 0);
        draft.is_visible = false;
        let lines = format_check_output(&[about, draft], Lang::Ar);
        assert!(lines.contains(&"    (no visible placed pages)".to_string()));
        assert!(lines.contains(&"    001 About-ar \u{2192} /ar/about/".to_string()));
        assert!(lines.contains(&"    002 Draft-ar [hidden]".to_string()));
    }

    #[test]
    fn migrate_output_when_clean() {
        let loaded = LoadedPages {
            pages: vec![page("a", Some(Placement::AfterHeader), 0)],
            did_migrate: false,
            persist: PersistOutcome::NotNeeded,
        };
        let lines = format_migrate_output(&loaded);
        assert_eq!(lines, vec!["Loaded 1 page", "Placements already normalized, nothing to save"]);
    }

    #[test]
    fn migrate_output_lists_placements() {
        let loaded = LoadedPages {
            pages: vec![page("a", Some(Placement::AfterWork), 0), page("b", None, 0)],
            did_migrate: true,
            persist: PersistOutcome::Failed("disk full".into()),
        };
        let lines = format_migrate_output(&loaded);
        assert_eq!(lines[1], "    001 a \u{2192} after_work");
        assert_eq!(lines[2], "    002 b \u{2192} (unplaced)");
        assert!(lines[3].contains("disk full"));
    }

    #[test]
    fn generate_output_groups_by_language() {
        let pages = vec![page("About", Some(Placement::AfterHeader), 0)];
        let report = GenerateReport {
            slots: vec![(
                Lang::En,
                Placement::AfterHeader,
                1,
                PathBuf::from("en/slots/after_header.html"),
            )],
            pages: vec![(Lang::En, "about".into(), PathBuf::from("en/about/index.html"))],
        };
        let lines = format_generate_output(&report, &pages);
        assert_eq!(lines[0], "en");
        assert_eq!(lines[1], "    after_header (1 page) \u{2192} en/slots/after_header.html");
        assert_eq!(lines[2], "    About \u{2192} en/about/index.html");
        assert_eq!(lines.last().unwrap(), "Generated 1 slot fragment, 1 page");
    }

    #[test]
    fn generate_output_empty_report() {
        let lines = format_generate_output(&GenerateReport::default(), &[]);
        assert_eq!(lines, vec!["Generated 0 slot fragments, 0 pages"]);
    }

    #[test]
    fn contrast_verdict() {
        let lines = format_contrast_output("#000000", "#ffffff", 21.0, "#ffffff");
        assert_eq!(lines[0], "#ffffff on #000000: 21.00:1 (passes AA)");
        let lines = format_contrast_output("#777777", "#888888", 1.2, "#000000");
        assert!(lines[0].ends_with("(fails AA)"));
    }
}
