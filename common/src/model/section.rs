//! Typed page sections.
//!
//! A section travels as `{ "id", "type", "props" }`. The `type` tag selects one of the known
//! prop records below; anything else (or a known tag whose props do not fit its record) is
//! kept verbatim as [`SectionKind::Unknown`] so the editor never destroys content it cannot
//! interpret.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Loose key/value bag used on the wire and for prop patches.
pub type Props = Map<String, Value>;

pub const HERO: &str = "hero";
pub const FEATURES: &str = "features";
pub const CONTENT: &str = "content";
pub const CONTACT: &str = "contact";
pub const CTA: &str = "cta";

/// Section types the builder has typed props, previews and default factories for.
pub const KNOWN_TYPES: [&str; 5] = [HERO, FEATURES, CONTENT, CONTACT, CTA];

/// One addressable block of a page.
///
/// `id` is unique within its owning [`PageContent`](super::page::PageContent) and stays stable
/// across reorders; it is the drag-and-drop key and the edit/delete target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSection", into = "RawSection")]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
}

#[derive(Serialize, Deserialize)]
struct RawSection {
    #[serde(default, deserialize_with = "crate::model::required_id")]
    id: String,
    #[serde(rename = "type")]
    section_type: String,
    #[serde(default)]
    props: Props,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        Section {
            id: raw.id,
            kind: SectionKind::from_parts(&raw.section_type, raw.props),
        }
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        RawSection {
            id: section.id,
            section_type: section.kind.type_name().to_string(),
            props: section.kind.to_props(),
        }
    }
}

impl Section {
    /// Creates a section with a freshly generated id.
    pub fn new(kind: SectionKind) -> Self {
        Self {
            id: generate_section_id(),
            kind,
        }
    }

    pub fn section_type(&self) -> &str {
        self.kind.type_name()
    }

    pub fn props(&self) -> Props {
        self.kind.to_props()
    }

    /// Shallow-merges `patch` into the props. Keys in `patch` replace existing keys; nested
    /// objects are replaced, not merged.
    pub fn merge_props(&mut self, patch: &Props) {
        let mut props = self.kind.to_props();
        for (key, value) in patch {
            props.insert(key.clone(), value.clone());
        }
        let section_type = self.kind.type_name().to_string();
        self.kind = SectionKind::from_parts(&section_type, props);
    }
}

/// Random, URL-safe section id. Uniqueness inside a document is enforced by the caller.
pub fn generate_section_id() -> String {
    format!("section-{}", Uuid::new_v4().simple())
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    Hero(HeroProps),
    Features(FeaturesProps),
    Content(ContentProps),
    Contact(ContactProps),
    Cta(CtaProps),
    Unknown { section_type: String, props: Props },
}

impl SectionKind {
    pub fn type_name(&self) -> &str {
        match self {
            SectionKind::Hero(_) => HERO,
            SectionKind::Features(_) => FEATURES,
            SectionKind::Content(_) => CONTENT,
            SectionKind::Contact(_) => CONTACT,
            SectionKind::Cta(_) => CTA,
            SectionKind::Unknown { section_type, .. } => section_type,
        }
    }

    /// Builds a kind from a wire tag and its props, falling back to `Unknown` when the
    /// tag is not known or the props do not decode into the tag's record.
    pub fn from_parts(section_type: &str, props: Props) -> Self {
        let parsed = match section_type {
            HERO => typed(&props).map(SectionKind::Hero),
            FEATURES => typed(&props).map(SectionKind::Features),
            CONTENT => typed(&props).map(SectionKind::Content),
            CONTACT => typed(&props).map(SectionKind::Contact),
            CTA => typed(&props).map(SectionKind::Cta),
            _ => None,
        };
        parsed.unwrap_or_else(|| SectionKind::Unknown {
            section_type: section_type.to_string(),
            props,
        })
    }

    pub fn to_props(&self) -> Props {
        let value = match self {
            SectionKind::Hero(p) => serde_json::to_value(p),
            SectionKind::Features(p) => serde_json::to_value(p),
            SectionKind::Content(p) => serde_json::to_value(p),
            SectionKind::Contact(p) => serde_json::to_value(p),
            SectionKind::Cta(p) => serde_json::to_value(p),
            SectionKind::Unknown { props, .. } => return props.clone(),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Props::new(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionKind::Unknown { .. })
    }

    /// Default-prop factory used when a component-library entry is added to a page.
    pub fn defaults_for(section_type: &str) -> Self {
        match section_type {
            HERO => SectionKind::Hero(HeroProps {
                title: set("Welcome to ThinkCyber"),
                subtitle: set("Learn cybersecurity from industry experts"),
                button_text: set("Get Started"),
                button_link: set("#"),
                background_image: set(""),
                extra: Props::new(),
            }),
            FEATURES => SectionKind::Features(FeaturesProps {
                title: set("Why Choose Us"),
                subtitle: set("Everything you need to build real security skills"),
                features: Some(Some(vec![
                    FeatureItem::new("Expert Instructors", "Learn from practitioners in the field", "school"),
                    FeatureItem::new("Hands-on Labs", "Practice on realistic environments", "terminal"),
                    FeatureItem::new("Certification", "Earn certificates you can share", "verified"),
                ])),
                extra: Props::new(),
            }),
            CONTENT => SectionKind::Content(ContentProps {
                title: set("About Us"),
                text: set("Add your content here..."),
                image: None,
                extra: Props::new(),
            }),
            CONTACT => SectionKind::Contact(ContactProps {
                title: set("Contact Us"),
                subtitle: set("We'd love to hear from you"),
                email: set("info@thinkcyber.com"),
                phone: set(""),
                address: set(""),
                extra: Props::new(),
            }),
            CTA => SectionKind::Cta(CtaProps {
                title: set("Get Started Today"),
                text: set("Join thousands of satisfied customers"),
                button_text: set("Start Free Trial"),
                button_link: set("#"),
                extra: Props::new(),
            }),
            other => SectionKind::Unknown {
                section_type: other.to_string(),
                props: Props::new(),
            },
        }
    }
}

fn typed<T: DeserializeOwned>(props: &Props) -> Option<T> {
    serde_json::from_value(Value::Object(props.clone())).ok()
}

/// A prop that is absent (`None`), explicitly `null` (`Some(None)`) or set.
///
/// Both empty forms read the same to the editor but are written back the way they arrived.
pub type Nullable<T> = Option<Option<T>>;

/// The set value of a [`Nullable`] prop.
pub fn value_of<T>(field: &Nullable<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

/// The text of a [`Nullable`] string prop, empty when absent or `null`.
pub fn text_of(field: &Nullable<String>) -> &str {
    value_of(field).map(String::as_str).unwrap_or("")
}

fn set(value: &str) -> Nullable<String> {
    Some(Some(value.to_string()))
}

/// Maps a present key to `Some`, so a literal `null` becomes `Some(None)`. Absent keys never
/// reach this function and fall back to the field default.
fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub subtitle: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub button_text: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub button_link: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub background_image: Nullable<String>,
    #[serde(flatten)]
    pub extra: Props,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesProps {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub subtitle: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub features: Nullable<Vec<FeatureItem>>,
    #[serde(flatten)]
    pub extra: Props,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub icon: Nullable<String>,
    #[serde(flatten)]
    pub extra: Props,
}

impl FeatureItem {
    fn new(title: &str, description: &str, icon: &str) -> Self {
        Self {
            title: set(title),
            description: set(description),
            icon: set(icon),
            extra: Props::new(),
        }
    }
}

/// Free-form block; `text` is Markdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentProps {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub text: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub image: Nullable<String>,
    #[serde(flatten)]
    pub extra: Props,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactProps {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub subtitle: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub email: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub phone: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub address: Nullable<String>,
    #[serde(flatten)]
    pub extra: Props,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaProps {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub text: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub button_text: Nullable<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub button_link: Nullable<String>,
    #[serde(flatten)]
    pub extra: Props,
}

/// Props of a section as a JSON object; convenient for tests and generic editors.
pub fn props_json(section: &Section) -> Value {
    Value::Object(section.props())
}

/// Builds a single-key patch.
pub fn patch(key: &str, value: Value) -> Props {
    let mut props = Props::new();
    props.insert(key.to_string(), value);
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape_uses_type_and_props() {
        let section = Section {
            id: "s1".into(),
            kind: SectionKind::Hero(HeroProps {
                title: set("Welcome"),
                ..Default::default()
            }),
        };
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(
            value,
            json!({"id": "s1", "type": "hero", "props": {"title": "Welcome"}})
        );
    }

    #[test]
    fn test_cta_defaults_match_factory_output() {
        let section = Section::new(SectionKind::defaults_for("cta"));
        assert_eq!(
            props_json(&section),
            json!({
                "title": "Get Started Today",
                "text": "Join thousands of satisfied customers",
                "buttonText": "Start Free Trial",
                "buttonLink": "#"
            })
        );
    }

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let raw = json!({"id": "x", "type": "pricing", "props": {"plans": [{"name": "Pro", "price": 9}]}});
        let section: Section = serde_json::from_value(raw.clone()).unwrap();
        assert!(!section.kind.is_known());
        assert_eq!(section.section_type(), "pricing");
        assert_eq!(serde_json::to_value(&section).unwrap(), raw);
    }

    #[test]
    fn test_known_type_with_mistyped_props_degrades_to_unknown() {
        let raw = json!({"id": "x", "type": "hero", "props": {"title": 42}});
        let section: Section = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(section.kind, SectionKind::Unknown { .. }));
        assert_eq!(section.section_type(), "hero");
        assert_eq!(serde_json::to_value(&section).unwrap(), raw);
    }

    #[test]
    fn test_extra_keys_survive_typed_decoding() {
        let raw = json!({
            "id": "c1",
            "type": "cta",
            "props": {"title": "Go", "theme": {"color": "red", "dark": true}}
        });
        let section: Section = serde_json::from_value(raw.clone()).unwrap();
        match &section.kind {
            SectionKind::Cta(props) => {
                assert_eq!(text_of(&props.title), "Go");
                assert!(props.extra.contains_key("theme"));
            }
            other => panic!("expected cta, got {other:?}"),
        }
        assert_eq!(serde_json::to_value(&section).unwrap(), raw);
    }

    #[test]
    fn test_explicit_null_prop_survives_round_trip() {
        let raw = json!({
            "id": "h1",
            "type": "hero",
            "props": {"title": "Hi", "backgroundImage": null}
        });
        let section: Section = serde_json::from_value(raw.clone()).unwrap();
        match &section.kind {
            SectionKind::Hero(props) => {
                assert_eq!(props.background_image, Some(None));
                assert_eq!(props.subtitle, None);
                assert_eq!(text_of(&props.background_image), "");
            }
            other => panic!("expected hero, got {other:?}"),
        }
        assert_eq!(serde_json::to_value(&section).unwrap(), raw);
    }

    #[test]
    fn test_feature_items_are_written_back_unchanged() {
        let raw = json!({
            "id": "f1",
            "type": "features",
            "props": {"features": [{"title": "Labs"}, {"description": "No title", "icon": null}]}
        });
        let section: Section = serde_json::from_value(raw.clone()).unwrap();
        assert!(section.kind.is_known());
        assert_eq!(serde_json::to_value(&section).unwrap(), raw);
    }

    #[test]
    fn test_numeric_and_null_ids_are_read_as_text() {
        let section: Section =
            serde_json::from_value(json!({"id": 1, "type": "cta", "props": {}})).unwrap();
        assert_eq!(section.id, "1");
        let section: Section = serde_json::from_value(json!({"id": null, "type": "cta"})).unwrap();
        assert_eq!(section.id, "");
    }

    #[test]
    fn test_missing_props_and_id_default_to_empty() {
        let section: Section = serde_json::from_value(json!({"type": "content"})).unwrap();
        assert_eq!(section.id, "");
        assert_eq!(section.kind, SectionKind::Content(ContentProps::default()));
    }

    #[test]
    fn test_merge_props_is_shallow() {
        let mut section = Section::new(SectionKind::defaults_for("features"));
        section.merge_props(&patch("title", json!("New title")));
        section.merge_props(&patch("features", json!([{"title": "Only", "description": "one"}])));

        match &section.kind {
            SectionKind::Features(props) => {
                assert_eq!(text_of(&props.title), "New title");
                assert_eq!(
                    text_of(&props.subtitle),
                    "Everything you need to build real security skills"
                );
                let features = value_of(&props.features).unwrap();
                assert_eq!(features.len(), 1);
                assert_eq!(text_of(&features[0].title), "Only");
            }
            other => panic!("expected features, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_for_unknown_type_is_empty_unknown() {
        let kind = SectionKind::defaults_for("gallery");
        assert_eq!(kind.type_name(), "gallery");
        assert!(kind.to_props().is_empty());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(generate_section_id(), generate_section_id());
    }
}
