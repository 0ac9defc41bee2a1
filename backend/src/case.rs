//! Key translation between the admin UI (camelCase) and the platform API (snake_case).
//!
//! Translation is recursive, except below the keys in [`OPAQUE_KEYS`]: page content and
//! section props are stored literally, so their keys are never rewritten.

use serde_json::{Map, Value};

pub const OPAQUE_KEYS: [&str; 4] = ["content", "templateContent", "template_content", "props"];

/// `buttonText` -> `button_text`, `pageURL` -> `page_url`.
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None | Some('_') => false,
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                Some(_) => false,
            };
            if starts_word {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `is_active` -> `isActive`. Leading underscores are kept.
pub fn to_camel_case(key: &str) -> String {
    let leading = key.len() - key.trim_start_matches('_').len();
    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..leading]);
    let mut upper_next = false;
    for c in key[leading..].chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn translate(value: Value, convert: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let translated: Map<String, Value> = map
                .into_iter()
                .map(|(key, inner)| {
                    let inner = if OPAQUE_KEYS.contains(&key.as_str()) {
                        inner
                    } else {
                        translate(inner, convert)
                    };
                    (convert(&key), inner)
                })
                .collect();
            Value::Object(translated)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| translate(v, convert)).collect())
        }
        other => other,
    }
}

/// Outgoing: admin UI payload to platform API payload.
pub fn keys_to_snake(value: Value) -> Value {
    translate(value, to_snake_case)
}

/// Incoming: platform API payload to admin UI payload.
pub fn keys_to_camel(value: Value) -> Value {
    translate(value, to_camel_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("buttonText"), "button_text");
        assert_eq!(to_snake_case("metaTitle"), "meta_title");
        assert_eq!(to_snake_case("pageURL"), "page_url");
        assert_eq!(to_snake_case("HTMLBody"), "html_body");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("step2Done"), "step2_done");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("is_active"), "isActive");
        assert_eq!(to_camel_case("show_in_navbar"), "showInNavbar");
        assert_eq!(to_camel_case("_id"), "_id");
        assert_eq!(to_camel_case("title"), "title");
    }

    #[test]
    fn test_page_payload_keeps_content_literal() {
        let page = json!({
            "title": "Home",
            "templateType": "landing",
            "metaTitle": "Home",
            "showInNavbar": true,
            "content": {"sections": [{"id": "s1", "type": "cta", "props": {"buttonText": "Go"}}]}
        });

        let outgoing = keys_to_snake(page.clone());
        assert_eq!(outgoing["template_type"], json!("landing"));
        assert_eq!(outgoing["show_in_navbar"], json!(true));
        assert_eq!(
            outgoing["content"]["sections"][0]["props"]["buttonText"],
            json!("Go")
        );

        assert_eq!(keys_to_camel(outgoing), page);
    }

    #[test]
    fn test_arrays_of_records_are_translated() {
        let incoming = json!([
            {"component_type": "hero", "thumbnail_url": null},
            {"template_type": "blank", "template_content": {"sections": [{"id": "a", "type": "x", "props": {"some_key": 1}}]}}
        ]);
        let translated = keys_to_camel(incoming);
        assert_eq!(translated[0]["componentType"], json!("hero"));
        assert!(translated[0].get("thumbnailUrl").is_some());
        assert_eq!(
            translated[1]["templateContent"]["sections"][0]["props"]["some_key"],
            json!(1)
        );
    }
}
