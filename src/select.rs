//! Choosing which pages appear where.
//!
//! All selectors borrow from the snapshot they are given and return a new
//! `Vec`; an empty result means "render nothing here", never an error.
//! Sorting is stable, so pages with equal keys keep their stored order.

use crate::types::{Page, Placement};

/// Visible pages placed at `slot`, ordered by `order ?? navigationOrder ?? 0`.
pub fn select_pages_for_slot(pages: &[Page], slot: Placement) -> Vec<&Page> {
    let mut selected: Vec<&Page> = pages
        .iter()
        .filter(|p| p.is_visible && p.placement == Some(slot))
        .collect();
    selected.sort_by_key(|p| p.slot_order());
    selected
}

/// Visible pages flagged for the top navigation bar.
pub fn navigation_pages(pages: &[Page]) -> Vec<&Page> {
    let mut selected: Vec<&Page> = pages
        .iter()
        .filter(|p| p.is_visible && p.show_in_navigation)
        .collect();
    selected.sort_by_key(|p| p.nav_order());
    selected
}

/// First visible page whose effective slug is `slug`.
pub fn find_page_by_slug<'a>(pages: &'a [Page], slug: &str) -> Option<&'a Page> {
    pages.iter().find(|p| p.is_visible && p.slug() == slug)
}

/// Pages with no slot. They are still reachable by slug.
pub fn unplaced_pages(pages: &[Page]) -> Vec<&Page> {
    pages.iter().filter(|p| p.placement.is_none()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, placement: Option<Placement>, order: Option<i64>) -> Page {
        Page {
            id: id.into(),
            name: id.into(),
            is_visible: true,
            placement,
            order,
            ..Default::default()
        }
    }

    fn ids(pages: &[&Page]) -> Vec<String> {
        pages.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn filters_by_slot_and_visibility() {
        let mut hidden = page("hidden", Some(Placement::AfterHeader), None);
        hidden.is_visible = false;
        let pages = vec![
            page("a", Some(Placement::AfterHeader), None),
            page("b", Some(Placement::BeforeFooter), None),
            hidden,
            page("unplaced", None, None),
        ];
        assert_eq!(ids(&select_pages_for_slot(&pages, Placement::AfterHeader)), ["a"]);
    }

    #[test]
    fn membership_matches_predicate_for_every_slot() {
        let mut pages = Vec::new();
        for (i, slot) in Placement::ALL.into_iter().enumerate() {
            let mut p = page(&format!("p{i}"), Some(slot), None);
            p.is_visible = i % 2 == 0;
            pages.push(p);
        }
        pages.push(page("none", None, None));

        for slot in Placement::ALL {
            let selected = select_pages_for_slot(&pages, slot);
            for p in &pages {
                let expected = p.is_visible && p.placement == Some(slot);
                assert_eq!(selected.iter().any(|s| s.id == p.id), expected);
            }
        }
    }

    #[test]
    fn sorts_by_order_with_navigation_fallback() {
        let mut nav_only = page("nav2", Some(Placement::AfterTeam), None);
        nav_only.navigation_order = Some(2);
        let pages = vec![
            page("o3", Some(Placement::AfterTeam), Some(3)),
            nav_only,
            page("o1", Some(Placement::AfterTeam), Some(1)),
            page("none", Some(Placement::AfterTeam), None),
        ];
        assert_eq!(
            ids(&select_pages_for_slot(&pages, Placement::AfterTeam)),
            ["none", "o1", "nav2", "o3"]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let pages = vec![
            page("first", Some(Placement::AfterWork), Some(5)),
            page("second", Some(Placement::AfterWork), Some(5)),
            page("early", Some(Placement::AfterWork), Some(1)),
            page("third", Some(Placement::AfterWork), Some(5)),
        ];
        assert_eq!(
            ids(&select_pages_for_slot(&pages, Placement::AfterWork)),
            ["early", "first", "second", "third"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let pages = vec![page("a", None, None)];
        assert!(select_pages_for_slot(&pages, Placement::BeforeWork).is_empty());
        assert!(select_pages_for_slot(&[], Placement::BeforeWork).is_empty());
    }

    #[test]
    fn navigation_uses_navigation_order() {
        let mut a = page("a", None, Some(1));
        a.show_in_navigation = true;
        a.navigation_order = Some(9);
        let mut b = page("b", None, None);
        b.show_in_navigation = true;
        b.navigation_order = Some(2);
        let c = page("c", None, None);
        let pages = vec![a, b, c];
        assert_eq!(ids(&navigation_pages(&pages)), ["b", "a"]);
    }

    #[test]
    fn slug_lookup_skips_hidden_pages() {
        let mut hidden = page("x", None, None);
        hidden.slug = Some("about".into());
        hidden.is_visible = false;
        let mut shown = page("y", None, None);
        shown.slug = Some("about".into());
        let pages = vec![hidden, shown];
        assert_eq!(find_page_by_slug(&pages, "about").map(|p| p.id.as_str()), Some("y"));
        assert!(find_page_by_slug(&pages, "missing").is_none());
    }

    #[test]
    fn unplaced_lists_pages_without_slot() {
        let pages = vec![page("a", None, None), page("b", Some(Placement::AfterHeader), None)];
        assert_eq!(ids(&unplaced_pages(&pages)), ["a"]);
    }
}
