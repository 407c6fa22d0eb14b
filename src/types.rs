//! Page-level types shared by the normalizer, selector and renderers.
//!
//! These are the canonical in-memory shapes. Stored records go through
//! [`crate::migrate`] before they are deserialized into a [`Page`], so nothing
//! here knows about legacy field names.

use crate::component::Component;
use crate::naming;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Site language. Arabic is laid out right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ar,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Ar, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ar => "ar",
            Lang::En => "en",
        }
    }

    /// Text direction for the `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Lang::Ar => "rtl",
            Lang::En => "ltr",
        }
    }

    pub fn other(self) -> Lang {
        match self {
            Lang::Ar => Lang::En,
            Lang::En => Lang::Ar,
        }
    }

    /// Pick between an Arabic and an English literal.
    pub fn pick(self, ar: &'static str, en: &'static str) -> &'static str {
        match self {
            Lang::Ar => ar,
            Lang::En => en,
        }
    }

    pub fn parse(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" => Some(Lang::Ar),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A string in both site languages. Missing keys deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedString {
    pub ar: String,
    pub en: String,
}

impl LocalizedString {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Ar => &self.ar,
            Lang::En => &self.en,
        }
    }

    /// Value for `lang`, falling back to the other language when blank.
    pub fn resolve(&self, lang: Lang) -> Option<&str> {
        [lang, lang.other()]
            .into_iter()
            .map(|l| self.get(l))
            .find(|s| !s.trim().is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.ar.trim().is_empty() && self.en.trim().is_empty()
    }
}

/// Fixed insertion points in the public page flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    AfterHeader,
    AfterServices,
    BeforePackages,
    AfterTeam,
    BeforeWork,
    AfterWork,
    BeforeFooter,
}

impl Placement {
    /// All slots in the order they appear down the public page.
    pub const ALL: [Placement; 7] = [
        Placement::AfterHeader,
        Placement::AfterServices,
        Placement::BeforePackages,
        Placement::AfterTeam,
        Placement::BeforeWork,
        Placement::AfterWork,
        Placement::BeforeFooter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Placement::AfterHeader => "after_header",
            Placement::AfterServices => "after_services",
            Placement::BeforePackages => "before_packages",
            Placement::AfterTeam => "after_team",
            Placement::BeforeWork => "before_work",
            Placement::AfterWork => "after_work",
            Placement::BeforeFooter => "before_footer",
        }
    }

    /// Parse the canonical snake_case name.
    pub fn parse(value: &str) -> Option<Placement> {
        Placement::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionVariant {
    Hero,
    #[default]
    #[serde(other)]
    Standard,
}

/// Where the hero image sits relative to the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Top,
    Bottom,
    Left,
    Background,
    #[default]
    #[serde(other)]
    Right,
}

/// Hero styling. Every field is optional; the engine fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// 0–100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_box_background_color: Option<String>,
    /// 0–100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_box_background_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_position: Option<ImagePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_size: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderConstructionButton {
    pub label: LocalizedString,
    pub href: String,
}

/// A named, slotted unit of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: LocalizedString,
    pub description: LocalizedString,
    pub components: Vec<Component>,
    pub is_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_order: Option<i64>,
    pub show_in_navigation: bool,
    pub under_construction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under_construction_button: Option<UnderConstructionButton>,
    pub section_variant: SectionVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_settings: Option<HeroSettings>,
    /// Fields this crate does not model, written back untouched on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    /// The stored slug, or one derived from the page name.
    pub fn slug(&self) -> Cow<'_, str> {
        match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Cow::Borrowed(s),
            _ => {
                let source = [self.name.as_str(), self.title.en.as_str(), self.id.as_str()]
                    .into_iter()
                    .find(|s| !naming::slugify(s).is_empty())
                    .unwrap_or_default();
                Cow::Owned(naming::slugify(source))
            }
        }
    }

    /// Heading text: the localized title, or the page name.
    pub fn display_title(&self, lang: Lang) -> &str {
        self.title.resolve(lang).unwrap_or(&self.name)
    }

    /// Sort key within a slot.
    pub fn slot_order(&self) -> i64 {
        self.order.or(self.navigation_order).unwrap_or(0)
    }

    /// Sort key within the navigation bar.
    pub fn nav_order(&self) -> i64 {
        self.navigation_order.or(self.order).unwrap_or(0)
    }

    pub fn is_hero(&self) -> bool {
        self.section_variant == SectionVariant::Hero
    }

    /// Components in ascending `orderIndex`, ties kept in stored order.
    pub fn ordered_components(&self) -> Vec<&Component> {
        let mut components: Vec<&Component> = self.components.iter().collect();
        components.sort_by_key(|c| c.order_index);
        components
    }
}
