//! # Builder Canvas
//!
//! Renders `content.sections` as an ordered list of cards and turns user gestures into
//! structural edits. The canvas owns no document state: every completed mutation is applied
//! to a copy of the `content` prop and handed to `on_change` exactly once.
//!
//! - **Drag and drop** (HTML5): `dragstart` records the dragged id, `drop` moves it to the
//!   index of the card it was dropped on. Intermediate `dragover`/`dragenter` events only
//!   update the highlight.
//! - **Keyboard**: a focused card moves with `Alt+ArrowUp` / `Alt+ArrowDown`; `Enter` opens it
//!   in the section editor.
//! - **Delete** is immediate. Asking for confirmation is up to the parent.

use common::model::page::PageContent;
use web_sys::{DragEvent, KeyboardEvent};
use yew::prelude::*;

use super::preview::section_preview;

#[derive(Properties, PartialEq)]
pub struct CanvasProps {
    pub content: PageContent,
    #[prop_or_default]
    pub selected: Option<String>,
    pub on_change: Callback<PageContent>,
    pub on_edit: Callback<String>,
}

pub enum CanvasMsg {
    DragStart(String),
    DragEnter(String),
    Drop(String),
    DragEnd,
    Move { id: String, offset: isize },
    Delete(String),
}

/// Transient drag state only.
pub struct BuilderCanvas {
    dragging: Option<String>,
    over: Option<String>,
}

impl BuilderCanvas {
    fn emit_if_changed(ctx: &Context<Self>, edit: impl FnOnce(&mut PageContent) -> bool) {
        let mut content = ctx.props().content.clone();
        if edit(&mut content) {
            ctx.props().on_change.emit(content);
        }
    }
}

impl Component for BuilderCanvas {
    type Message = CanvasMsg;
    type Properties = CanvasProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            dragging: None,
            over: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CanvasMsg::DragStart(id) => {
                self.dragging = Some(id);
                true
            }
            CanvasMsg::DragEnter(id) => {
                let changed = self.over.as_deref() != Some(id.as_str());
                self.over = Some(id);
                changed
            }
            CanvasMsg::Drop(target) => {
                self.over = None;
                if let Some(from) = self.dragging.take() {
                    Self::emit_if_changed(ctx, |content| content.reorder_sections(&from, &target));
                }
                true
            }
            CanvasMsg::DragEnd => {
                self.dragging = None;
                self.over = None;
                true
            }
            CanvasMsg::Move { id, offset } => {
                Self::emit_if_changed(ctx, |content| content.move_section(&id, offset));
                false
            }
            CanvasMsg::Delete(id) => {
                Self::emit_if_changed(ctx, |content| content.remove_section(&id));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        if props.content.is_empty() {
            return html! {
                <div class="canvas-empty">
                    <i class="material-icons" style="font-size:48px;">{ "dashboard_customize" }</i>
                    <p>{ "This page has no sections yet." }</p>
                    <p>{ "Pick a component from the library to add content." }</p>
                </div>
            };
        }

        html! {
            <div class="builder-canvas">
                { for props.content.sections.iter().map(|section| self.card(ctx, &section.id, section_preview(section), section.section_type())) }
            </div>
        }
    }
}

impl BuilderCanvas {
    fn card(&self, ctx: &Context<Self>, id: &str, preview: Html, section_type: &str) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let classes = classes!(
            "section-card",
            (props.selected.as_deref() == Some(id)).then_some("selected"),
            (self.over.as_deref() == Some(id) && self.dragging.as_deref() != Some(id))
                .then_some("drag-over"),
            (self.dragging.as_deref() == Some(id)).then_some("dragging"),
        );

        let ondragstart = {
            let id = id.to_string();
            link.callback(move |e: DragEvent| {
                if let Some(transfer) = e.data_transfer() {
                    transfer.set_effect_allowed("move");
                    // Firefox refuses to start a drag without data.
                    transfer.set_data("text/plain", &id).ok();
                }
                CanvasMsg::DragStart(id.clone())
            })
        };
        let ondragenter = {
            let id = id.to_string();
            link.callback(move |e: DragEvent| {
                e.prevent_default();
                CanvasMsg::DragEnter(id.clone())
            })
        };
        // Dropping is only allowed where `dragover` is cancelled.
        let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
        let ondrop = {
            let id = id.to_string();
            link.callback(move |e: DragEvent| {
                e.prevent_default();
                CanvasMsg::Drop(id.clone())
            })
        };
        let ondragend = link.callback(|_: DragEvent| CanvasMsg::DragEnd);

        let onkeydown = {
            let id = id.to_string();
            let on_edit = props.on_edit.clone();
            link.batch_callback(move |e: KeyboardEvent| {
                let offset = match e.key().as_str() {
                    "ArrowUp" if e.alt_key() => -1,
                    "ArrowDown" if e.alt_key() => 1,
                    "Enter" => {
                        on_edit.emit(id.clone());
                        return vec![];
                    }
                    _ => return vec![],
                };
                e.prevent_default();
                vec![CanvasMsg::Move {
                    id: id.clone(),
                    offset,
                }]
            })
        };

        let on_edit_click = {
            let id = id.to_string();
            let on_edit = props.on_edit.clone();
            Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
        };
        let on_delete = {
            let id = id.to_string();
            link.callback(move |_: MouseEvent| CanvasMsg::Delete(id.clone()))
        };
        let move_button = |icon: &'static str, title: &'static str, offset: isize| {
            let id = id.to_string();
            html! {
                <button class="icon-btn" title={title} onclick={link.callback(move |_: MouseEvent| CanvasMsg::Move { id: id.clone(), offset })}>
                    <i class="material-icons">{ icon }</i>
                </button>
            }
        };

        html! {
            <div
                key={id.to_string()}
                class={classes}
                tabindex="0"
                role="listitem"
                aria-label={format!("{} section. Alt+Up or Alt+Down to move, Enter to edit", section_type)}
                draggable="true"
                {ondragstart}
                {ondragenter}
                {ondragover}
                {ondrop}
                {ondragend}
                {onkeydown}
            >
                <div class="section-card-header">
                    <i class="material-icons">{ "drag_indicator" }</i>
                    <span class="type">{ section_type.to_string() }</span>
                    { move_button("arrow_upward", "Move up", -1) }
                    { move_button("arrow_downward", "Move down", 1) }
                    <button class="icon-btn" title="Edit" onclick={on_edit_click}>
                        <i class="material-icons">{ "edit" }</i>
                    </button>
                    <button class="icon-btn danger" title="Delete" onclick={on_delete}>
                        <i class="material-icons">{ "delete" }</i>
                    </button>
                </div>
                <div class="section-preview">{ preview }</div>
            </div>
        }
    }
}
