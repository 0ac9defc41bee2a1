//! # Section Editor
//!
//! Edits the props of the selected section.
//!
//! Known types get one input per string prop (a textarea for `text`), a JSON box for
//! structured props such as the `features` list, and an upload button for image props
//! (`backgroundImage`, `image`). Each edit is sent as a single-key patch that the page editor
//! shallow-merges into the section.
//!
//! Unknown types get one raw JSON editor for the whole props object, applied as a replacement
//! once it parses.

use common::model::section::{patch, Props, Section, SectionKind, CONTENT, HERO};
use serde_json::Value;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{show_error_toast, show_toast};

const IMAGE_FIELDS: [&str; 2] = ["backgroundImage", "image"];

#[derive(Properties, PartialEq)]
pub struct SectionEditorProps {
    pub section: Section,
    pub on_patch: Callback<Props>,
    pub on_replace: Callback<Props>,
    pub on_close: Callback<()>,
}

pub enum Msg {
    SetString(String, String),
    SetJsonField(String, String),
    SetRawJson(String),
    ApplyRawJson,
    Upload(String, web_sys::File),
    Uploaded(String, Result<String, String>),
}

pub struct SectionEditor {
    raw_json: String,
    json_errors: Vec<(String, String)>,
    uploading: Option<String>,
}

/// Prop keys shown in the form: the section's own keys plus the image slots its type supports.
pub fn editable_fields(section: &Section) -> Vec<String> {
    let mut fields: Vec<String> = section.props().keys().cloned().collect();
    let slots: &[&str] = match section.section_type() {
        HERO => &["backgroundImage"],
        CONTENT => &["image"],
        _ => &[],
    };
    for slot in slots {
        if !fields.iter().any(|f| f == slot) {
            fields.push(slot.to_string());
        }
    }
    fields
}

fn pretty(props: &Props) -> String {
    serde_json::to_string_pretty(props).unwrap_or_else(|_| "{}".to_string())
}

impl Component for SectionEditor {
    type Message = Msg;
    type Properties = SectionEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            raw_json: pretty(&ctx.props().section.props()),
            json_errors: Vec::new(),
            uploading: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if old_props.section.id != ctx.props().section.id {
            self.raw_json = pretty(&ctx.props().section.props());
            self.json_errors.clear();
            self.uploading = None;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetString(key, value) => {
                ctx.props().on_patch.emit(patch(&key, Value::String(value)));
                false
            }
            Msg::SetJsonField(key, text) => {
                self.json_errors.retain(|(field, _)| field != &key);
                match serde_json::from_str::<Value>(&text) {
                    Ok(value) => ctx.props().on_patch.emit(patch(&key, value)),
                    Err(e) => self.json_errors.push((key, e.to_string())),
                }
                true
            }
            Msg::SetRawJson(text) => {
                self.raw_json = text;
                false
            }
            Msg::ApplyRawJson => {
                self.json_errors.clear();
                match serde_json::from_str::<Value>(&self.raw_json) {
                    Ok(Value::Object(props)) => {
                        ctx.props().on_replace.emit(props);
                        show_toast("Section props updated.");
                    }
                    Ok(_) => self
                        .json_errors
                        .push(("props".into(), "Props must be a JSON object".into())),
                    Err(e) => self.json_errors.push(("props".into(), e.to_string())),
                }
                true
            }
            Msg::Upload(field, file) => {
                if self.uploading.is_some() {
                    return false;
                }
                self.uploading = Some(field.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::upload_image(file).await;
                    link.send_message(Msg::Uploaded(field, result));
                });
                true
            }
            Msg::Uploaded(field, result) => {
                self.uploading = None;
                match result {
                    Ok(url) => {
                        ctx.props().on_patch.emit(patch(&field, Value::String(url)));
                        show_toast("Image uploaded.");
                    }
                    Err(e) => show_error_toast(&format!("Image upload failed: {}", e)),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let section = &ctx.props().section;
        let on_close = ctx.props().on_close.reform(|_: MouseEvent| ());

        html! {
            <div class="panel section-editor">
                <div style="display:flex;align-items:center;">
                    <h3 style="flex:1;">{ format!("Edit {}", section.section_type()) }</h3>
                    <button class="icon-btn" title="Close" onclick={on_close}>
                        <i class="material-icons">{ "close" }</i>
                    </button>
                </div>
                {
                    if matches!(section.kind, SectionKind::Unknown { .. }) {
                        self.raw_editor(ctx)
                    } else {
                        self.field_editor(ctx, section)
                    }
                }
            </div>
        }
    }
}

impl SectionEditor {
    fn error_for(&self, field: &str) -> Html {
        match self.json_errors.iter().find(|(f, _)| f == field) {
            Some((_, error)) => html! { <div class="widget-error">{ error.clone() }</div> },
            None => html! {},
        }
    }

    fn field_editor(&self, ctx: &Context<Self>, section: &Section) -> Html {
        let props = section.props();
        let link = ctx.link();

        html! {
            <div class="settings-form" style="grid-template-columns:1fr;">
                { for editable_fields(section).into_iter().map(|key| {
                    let value = props.get(&key).cloned().unwrap_or(Value::Null);
                    let is_image = IMAGE_FIELDS.contains(&key.as_str());
                    match value {
                        Value::String(_) | Value::Null if is_image => self.image_field(ctx, key, value.as_str().unwrap_or("").to_string()),
                        Value::String(text) => {
                            let field = key.clone();
                            let input = if key == "text" {
                                html! {
                                    <textarea rows="6" value={text} oninput={link.callback(move |e: InputEvent| {
                                        let area: HtmlTextAreaElement = e.target_unchecked_into();
                                        Msg::SetString(field.clone(), area.value())
                                    })} />
                                }
                            } else {
                                html! {
                                    <input type="text" value={text} oninput={link.callback(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        Msg::SetString(field.clone(), input.value())
                                    })} />
                                }
                            };
                            html! { <label key={key.clone()}>{ key.clone() }{ input }</label> }
                        }
                        other => {
                            let field = key.clone();
                            html! {
                                <label key={key.clone()}>
                                    { key.clone() }
                                    <textarea
                                        rows="8"
                                        style="font-family:monospace;font-size:12px;"
                                        value={serde_json::to_string_pretty(&other).unwrap_or_default()}
                                        onchange={link.callback(move |e: Event| {
                                            let area: HtmlTextAreaElement = e.target_unchecked_into();
                                            Msg::SetJsonField(field.clone(), area.value())
                                        })}
                                    />
                                    { self.error_for(&key) }
                                </label>
                            }
                        }
                    }
                }) }
            </div>
        }
    }

    fn image_field(&self, ctx: &Context<Self>, key: String, url: String) -> Html {
        let link = ctx.link();
        let busy = self.uploading.as_deref() == Some(key.as_str());
        let text_field = key.clone();
        let upload_field = key.clone();

        html! {
            <label key={key.clone()}>
                { key.clone() }
                <input type="text" placeholder="https://..." value={url.clone()} oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetString(text_field.clone(), input.value())
                })} />
                {
                    if url.is_empty() {
                        html! {}
                    } else {
                        html! { <img src={url} style="max-width:100%;max-height:120px;" /> }
                    }
                }
                <input
                    type="file"
                    accept="image/*"
                    disabled={busy}
                    onchange={link.batch_callback(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let file = input.files().and_then(|files| files.get(0));
                        input.set_value("");
                        file.map(|file| Msg::Upload(upload_field.clone(), file))
                    })}
                />
                { if busy { html! { <small>{ "Uploading..." }</small> } } else { html! {} } }
            </label>
        }
    }

    fn raw_editor(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div>
                <p><small>{ "This section type has no form. Edit its props as JSON." }</small></p>
                <textarea
                    rows="14"
                    style="width:100%;font-family:monospace;font-size:12px;"
                    value={self.raw_json.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        let area: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::SetRawJson(area.value())
                    })}
                />
                { self.error_for("props") }
                <button class="icon-btn primary" onclick={link.callback(|_| Msg::ApplyRawJson)}>
                    { "Apply" }
                </button>
            </div>
        }
    }
}
