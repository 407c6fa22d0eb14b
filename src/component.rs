//! Component content model.
//!
//! On disk a component is `{ id, type, content, orderIndex, isVisible, style? }`
//! where the shape of `content` depends on `type`. In memory the pair becomes
//! the [`ComponentBody`] tagged union so the renderer can match exhaustively.
//!
//! Conversion is lenient: a malformed `content` payload turns into an empty
//! payload of the right variant, which the renderer then skips as
//! "missing required content". An unknown `type` is kept as
//! [`ComponentBody::Other`] so saving the document back never loses data.

use crate::types::LocalizedString;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Types the editor can create but the renderer does not draw yet.
pub const RESERVED_TYPES: [&str; 3] = ["slider", "interactive", "custom"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawComponent", into = "RawComponent")]
pub struct Component {
    pub id: String,
    pub order_index: i64,
    pub is_visible: bool,
    pub style: ComponentStyle,
    pub body: ComponentBody,
    pub extra: Map<String, Value>,
}

impl Component {
    pub fn new(id: impl Into<String>, order_index: i64, body: ComponentBody) -> Self {
        Self {
            id: id.into(),
            order_index,
            is_visible: true,
            style: ComponentStyle::default(),
            body,
            extra: Map::new(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn kind(&self) -> &str {
        self.body.kind()
    }

    pub fn is_image(&self) -> bool {
        matches!(self.body, ComponentBody::Image(_))
    }

    pub fn is_button(&self) -> bool {
        matches!(self.body, ComponentBody::Button(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentBody {
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Button(ButtonContent),
    Link(LinkContent),
    Html(HtmlContent),
    /// Reserved or unknown type; content is carried through untouched.
    Other { kind: String, content: Value },
}

impl ComponentBody {
    pub fn kind(&self) -> &str {
        match self {
            ComponentBody::Text(_) => "text",
            ComponentBody::Image(_) => "image",
            ComponentBody::Video(_) => "video",
            ComponentBody::Button(_) => "button",
            ComponentBody::Link(_) => "link",
            ComponentBody::Html(_) => "html",
            ComponentBody::Other { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub text: LocalizedString,
    /// Unmodelled content fields, kept so saving never drops them. Every
    /// payload below carries the same map.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    pub src: String,
    pub alt: LocalizedString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoContent {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub autoplay: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Secondary,
    Outline,
    #[default]
    #[serde(other)]
    Primary,
}

impl ButtonStyle {
    pub fn class(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "btn-primary",
            ButtonStyle::Secondary => "btn-secondary",
            ButtonStyle::Outline => "btn-outline",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonContent {
    pub text: LocalizedString,
    pub href: String,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkContent {
    pub text: LocalizedString,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlContent {
    pub html: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional visual attributes layered onto a component's wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
}

impl ComponentStyle {
    pub fn is_empty(&self) -> bool {
        *self == ComponentStyle::default()
    }

    /// Inline CSS for the wrapper, or `None` when nothing usable is set.
    ///
    /// Values that could break out of a declaration are dropped.
    pub fn to_css(&self) -> Option<String> {
        let align = self
            .align
            .as_deref()
            .filter(|a| matches!(*a, "left" | "right" | "center" | "start" | "end" | "justify"));
        let declarations: Vec<String> = [
            ("color", self.color.as_deref()),
            ("background-color", self.background_color.as_deref()),
            ("font-size", self.font_size.as_deref()),
            ("text-align", align),
            ("margin-top", self.margin_top.as_deref()),
            ("margin-bottom", self.margin_bottom.as_deref()),
        ]
        .into_iter()
        .filter_map(|(prop, value)| {
            let value = value?.trim();
            is_plain_css_value(value).then(|| format!("{prop}: {value};"))
        })
        .collect();

        (!declarations.is_empty()).then(|| declarations.join(" "))
    }
}

pub(crate) fn is_plain_css_value(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\'' | '\\'))
}

// =============================================================================
// On-disk shape
// =============================================================================

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    order_index: i64,
    #[serde(default = "default_true")]
    is_visible: bool,
    #[serde(default, skip_serializing_if = "ComponentStyle::is_empty")]
    style: ComponentStyle,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn payload<T: DeserializeOwned + Default>(id: &str, kind: &str, content: Value) -> T {
    if content.is_null() {
        return T::default();
    }
    serde_json::from_value(content).unwrap_or_else(|e| {
        debug!("component {id}: malformed {kind} content ({e}), treating as empty");
        T::default()
    })
}

impl From<RawComponent> for Component {
    fn from(raw: RawComponent) -> Self {
        let id = raw.id.as_str();
        let body = match raw.kind.as_str() {
            "text" => ComponentBody::Text(payload(id, "text", raw.content)),
            "image" => ComponentBody::Image(payload(id, "image", raw.content)),
            "video" => ComponentBody::Video(payload(id, "video", raw.content)),
            "button" => ComponentBody::Button(payload(id, "button", raw.content)),
            "link" => ComponentBody::Link(payload(id, "link", raw.content)),
            "html" => ComponentBody::Html(payload(id, "html", raw.content)),
            _ => ComponentBody::Other {
                kind: raw.kind.clone(),
                content: raw.content,
            },
        };
        Component {
            id: raw.id,
            order_index: raw.order_index,
            is_visible: raw.is_visible,
            style: raw.style,
            body,
            extra: raw.extra,
        }
    }
}

impl From<Component> for RawComponent {
    fn from(component: Component) -> Self {
        let kind = component.body.kind().to_string();
        let content = match component.body {
            ComponentBody::Text(c) => serde_json::to_value(c),
            ComponentBody::Image(c) => serde_json::to_value(c),
            ComponentBody::Video(c) => serde_json::to_value(c),
            ComponentBody::Button(c) => serde_json::to_value(c),
            ComponentBody::Link(c) => serde_json::to_value(c),
            ComponentBody::Html(c) => serde_json::to_value(c),
            ComponentBody::Other { content, .. } => Ok(content),
        }
        .unwrap_or_default();
        RawComponent {
            id: component.id,
            kind,
            content,
            order_index: component.order_index,
            is_visible: component.is_visible,
            style: component.style,
            extra: component.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Component {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn text_component_parses() {
        let c = parse(json!({
            "id": "t1", "type": "text", "orderIndex": 0, "isVisible": true,
            "content": { "text": { "ar": "مرحبا", "en": "Hello" } }
        }));
        match &c.body {
            ComponentBody::Text(t) => assert_eq!(t.text.en, "Hello"),
            other => panic!("expected text, got {other:?}"),
        }
        assert!(c.is_visible);
    }

    #[test]
    fn visibility_defaults_to_true() {
        let c = parse(json!({ "id": "x", "type": "html", "content": { "html": "<p>x</p>" } }));
        assert!(c.is_visible);
    }

    #[test]
    fn button_parses_style_and_colors() {
        let c = parse(json!({
            "id": "b", "type": "button",
            "content": { "text": { "en": "Go" }, "href": "#contact", "style": "outline", "bgColor": "#fff" }
        }));
        let ComponentBody::Button(b) = c.body else {
            panic!("expected button");
        };
        assert_eq!(b.style, ButtonStyle::Outline);
        assert_eq!(b.bg_color.as_deref(), Some("#fff"));
        assert_eq!(b.text.ar, "");
    }

    #[test]
    fn malformed_content_becomes_empty_payload() {
        let c = parse(json!({ "id": "i", "type": "image", "content": "not an object" }));
        assert_eq!(c.body, ComponentBody::Image(ImageContent::default()));
    }

    #[test]
    fn reserved_type_is_kept() {
        let c = parse(json!({ "id": "s", "type": "slider", "content": { "slides": [1, 2] } }));
        assert_eq!(c.kind(), "slider");
        assert!(RESERVED_TYPES.contains(&c.kind()));
    }

    #[test]
    fn serializes_back_to_stored_shape() {
        let original = json!({
            "id": "s", "type": "slider", "content": { "slides": [1] },
            "orderIndex": 4, "isVisible": false
        });
        let c = parse(original.clone());
        assert_eq!(serde_json::to_value(&c).unwrap(), original);
    }

    #[test]
    fn unknown_button_style_falls_back_to_primary() {
        let c = parse(json!({
            "id": "b", "type": "button",
            "content": { "text": { "en": "Go" }, "href": "#x", "style": "ghost" }
        }));
        let ComponentBody::Button(b) = c.body else {
            panic!("expected button");
        };
        assert_eq!(b.style, ButtonStyle::Primary);
        assert_eq!(ButtonStyle::default(), ButtonStyle::Primary);
    }

    #[test]
    fn unknown_content_fields_survive_serialization() {
        let original = json!({
            "id": "i", "type": "image",
            "content": { "src": "/a.jpg", "alt": { "ar": "", "en": "" }, "caption": "Team" },
            "orderIndex": 0, "isVisible": true, "pinned": true
        });
        let c = parse(original.clone());
        let ComponentBody::Image(image) = &c.body else {
            panic!("expected image");
        };
        assert_eq!(image.extra["caption"], "Team");
        assert_eq!(c.extra["pinned"], true);
        assert_eq!(serde_json::to_value(&c).unwrap(), original);
    }

    #[test]
    fn style_to_css_skips_unsafe_values() {
        let style = ComponentStyle {
            color: Some("#333".into()),
            font_size: Some("1rem; background: url(x)".into()),
            align: Some("center".into()),
            ..Default::default()
        };
        assert_eq!(style.to_css().as_deref(), Some("color: #333; text-align: center;"));
    }

    #[test]
    fn empty_style_has_no_css() {
        assert_eq!(ComponentStyle::default().to_css(), None);
    }
}
