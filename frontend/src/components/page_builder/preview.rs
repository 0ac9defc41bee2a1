//! Low-fidelity previews for canvas cards.
//!
//! Each known section type has a fixed renderer; anything else gets an unstyled dump of its
//! props so unknown content stays visible without being interpreted.

use common::model::section::{text_of, value_of, Nullable, Section, SectionKind};
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::helpers::markdown_to_html;

fn text(value: &Nullable<String>) -> String {
    text_of(value).to_string()
}

pub fn section_preview(section: &Section) -> Html {
    match &section.kind {
        SectionKind::Hero(hero) => {
            let background = value_of(&hero.background_image)
                .map(String::as_str)
                .filter(|url| !url.is_empty())
                .map(|url| format!("background-image:url(\"{}\");", url.replace('"', "%22")))
                .unwrap_or_default();
            html! {
                <div class="preview-hero" style={background}>
                    <h2>{ text(&hero.title) }</h2>
                    <p>{ text(&hero.subtitle) }</p>
                    { button(&hero.button_text, &hero.button_link) }
                </div>
            }
        }
        SectionKind::Features(features) => html! {
            <div>
                <h3>{ text(&features.title) }</h3>
                <p>{ text(&features.subtitle) }</p>
                <div class="preview-features">
                    { for value_of(&features.features).into_iter().flatten().map(|item| html! {
                        <div>
                            {
                                match value_of(&item.icon) {
                                    Some(icon) if !icon.is_empty() => html! { <i class="material-icons">{ icon.clone() }</i> },
                                    _ => html! {},
                                }
                            }
                            <strong>{ text(&item.title) }</strong>
                            <p>{ text(&item.description) }</p>
                        </div>
                    }) }
                </div>
            </div>
        },
        SectionKind::Content(content) => {
            let body = AttrValue::from(markdown_to_html(text_of(&content.text)));
            html! {
                <div>
                    <h3>{ text(&content.title) }</h3>
                    {
                        match value_of(&content.image).map(String::as_str) {
                            Some(url) if !url.is_empty() => html! { <img src={url.to_string()} style="max-width:100%;max-height:160px;" /> },
                            _ => html! {},
                        }
                    }
                    <div class="markdown-preview">{ Html::from_html_unchecked(body) }</div>
                </div>
            }
        }
        SectionKind::Contact(contact) => html! {
            <div>
                <h3>{ text(&contact.title) }</h3>
                <p>{ text(&contact.subtitle) }</p>
                <ul>
                    { for [("email", &contact.email), ("phone", &contact.phone), ("place", &contact.address)]
                        .into_iter()
                        .filter_map(|(icon, value)| value_of(value).map(String::as_str).filter(|v| !v.is_empty()).map(|v| (icon, v.to_string())))
                        .map(|(icon, value)| html! {
                            <li><i class="material-icons" style="font-size:14px;">{ icon }</i>{ " " }{ value }</li>
                        }) }
                </ul>
            </div>
        },
        SectionKind::Cta(cta) => html! {
            <div style="text-align:center;">
                <h3>{ text(&cta.title) }</h3>
                <p>{ text(&cta.text) }</p>
                { button(&cta.button_text, &cta.button_link) }
            </div>
        },
        SectionKind::Unknown { props, .. } => {
            let dump = serde_json::to_string_pretty(props).unwrap_or_default();
            html! { <div class="preview-unknown">{ dump }</div> }
        }
    }
}

fn button(label: &Nullable<String>, link: &Nullable<String>) -> Html {
    match value_of(label).map(String::as_str) {
        Some(label) if !label.is_empty() => html! {
            <span class="icon-btn" title={text(link)}>{ label.to_string() }</span>
        },
        _ => html! {},
    }
}
