//! Broadcast form: pushes one notification to platform users through
//! `/api/notifications/broadcast`. The draft is validated here before it is sent.

use common::requests::{Audience, NotificationBroadcast};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::{show_error_toast, show_toast};

pub enum Msg {
    SetTitle(String),
    SetMessage(String),
    SetAudience(Audience),
    SetLink(String),
    Send,
    Sent(Result<Option<String>, String>),
}

#[derive(Default)]
pub struct BroadcastForm {
    draft: NotificationBroadcast,
    error: Option<String>,
    sending: bool,
}

fn audience_from(value: &str) -> Audience {
    match value {
        "subscribers" => Audience::Subscribers,
        "free" => Audience::Free,
        _ => Audience::All,
    }
}

impl Component for BroadcastForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTitle(title) => self.draft.title = title,
            Msg::SetMessage(message) => self.draft.message = message,
            Msg::SetAudience(audience) => self.draft.audience = audience,
            Msg::SetLink(link) => {
                self.draft.link = (!link.trim().is_empty()).then_some(link);
            }
            Msg::Send => {
                if self.sending {
                    return false;
                }
                if let Err(e) = self.draft.validate() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.error = None;
                self.sending = true;
                let draft = self.draft.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::broadcast(&draft).await.map(|reply| reply.message);
                    link.send_message(Msg::Sent(result));
                });
            }
            Msg::Sent(Ok(message)) => {
                self.sending = false;
                self.draft = NotificationBroadcast::default();
                show_toast(message.as_deref().unwrap_or("Notification sent"));
            }
            Msg::Sent(Err(e)) => {
                self.sending = false;
                show_error_toast(&format!("Broadcast failed: {}", e));
                self.error = Some(e);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let draft = &self.draft;

        html! {
            <div class="panel" style="max-width:640px;">
                <h2>{ "Broadcast notification" }</h2>
                <div class="settings-form" style="grid-template-columns:1fr;">
                    <label>
                        { "Title" }
                        <input type="text" maxlength="120" value={draft.title.clone()} oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetTitle(input.value())
                        })} />
                    </label>
                    <label>
                        { "Message" }
                        <textarea rows="4" value={draft.message.clone()} oninput={link.callback(|e: InputEvent| {
                            let area: HtmlTextAreaElement = e.target_unchecked_into();
                            Msg::SetMessage(area.value())
                        })} />
                    </label>
                    <label>
                        { "Audience" }
                        <select onchange={link.callback(|e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            Msg::SetAudience(audience_from(&select.value()))
                        })}>
                            <option value="all" selected={draft.audience == Audience::All}>{ "All users" }</option>
                            <option value="subscribers" selected={draft.audience == Audience::Subscribers}>{ "Subscribers" }</option>
                            <option value="free" selected={draft.audience == Audience::Free}>{ "Free users" }</option>
                        </select>
                    </label>
                    <label>
                        { "Link (optional)" }
                        <input type="text" placeholder="/courses/new" value={draft.link.clone().unwrap_or_default()} oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetLink(input.value())
                        })} />
                    </label>
                    if let Some(error) = &self.error {
                        <div class="widget-error">{ error.clone() }</div>
                    }
                    <button class="icon-btn primary" disabled={self.sending} onclick={link.callback(|_| Msg::Send)}>
                        <i class="material-icons">{ "send" }</i>
                        { if self.sending { " Sending..." } else { " Send" } }
                    </button>
                </div>
            </div>
        }
    }
}
