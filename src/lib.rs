//! # Custom Pages
//!
//! Placement, layout and rendering for admin-authored pages on a bilingual
//! (Arabic/English) marketing site. Pages live in a JSON settings document;
//! each one names a slot in the public page flow and carries an ordered list
//! of typed components.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load       settings.json  →  Vec<Value>     (store)
//! 2. Normalize  displayLocation →  placement     (migrate, saved back once)
//! 3. Select     slot           →  ordered pages  (select)
//! 4. Render     page           →  HTML section   (construction | hero | render)
//! ```
//!
//! Every stage is a function of its input. The settings document is the only
//! state, and the only write the pipeline makes on its own is the one-time
//! placement migration.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Pages, localized strings, slots, hero settings |
//! | [`component`] | Typed component union with lenient parsing and inline styles |
//! | [`naming`] | Slug derivation for anchors and routes |
//! | [`migrate`] | Legacy `displayLocation` → `placement` normalization |
//! | [`select`] | Slot filtering and ordering, navigation, slug lookup |
//! | [`sanitize`] | Script and event-handler stripping, URL safety |
//! | [`color`] | Hex parsing, WCAG contrast, black/white text choice |
//! | [`action`] | Button click actions: scroll to anchor or open in a new context |
//! | [`render`] | Per-component HTML |
//! | [`hero`] | Hero section layouts and colors |
//! | [`construction`] | Placeholder for pages under construction |
//! | [`generate`] | Page dispatch, slot fragments, standalone documents |
//! | [`store`] | Settings store trait, file and memory stores, the load path |
//! | [`events`] | Change notification and page snapshots |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud For Markup
//!
//! HTML is built with [Maud](https://maud.lambda.xyz/). Interpolation is
//! escaped by default, so author-provided text can only reach the page as raw
//! HTML through [`sanitize::sanitize_html`].
//!
//! ## Lenient Records
//!
//! Settings documents are edited by hand and by older admin builds. Unknown
//! component types, missing content and unknown enum values all load with
//! defaults instead of failing the page; a record that is not a page at all is
//! skipped with a warning.
//!
//! ## Direction Follows Language
//!
//! Arabic output is `dir="rtl"`. Layout classes are direction-neutral and the
//! stylesheet uses logical properties, so the same markup mirrors correctly.

pub mod action;
pub mod color;
pub mod component;
pub mod config;
pub mod construction;
pub mod events;
pub mod generate;
pub mod hero;
pub mod migrate;
pub mod naming;
pub mod output;
pub mod render;
pub mod sanitize;
pub mod select;
pub mod store;
pub mod types;
