//! Page editor: settings form, builder canvas, component library and section editor around
//! one [`PageDocument`](common::model::page::PageDocument).
//!
//! The component follows the update/view split used across the admin UI: `state` holds the
//! document and dirty tracking, `update` applies messages, `view` renders. On first render it
//! either loads the page named by `page_id` or starts from `initial`.

use yew::platform::spawn_local;
use yew::prelude::*;

mod canvas;
mod messages;
mod preview;
mod props;
mod section_editor;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::PageEditorProps;
pub use state::PageEditor;

use crate::api;

impl Component for PageEditor {
    type Message = Msg;
    type Properties = PageEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut editor = PageEditor::new(ctx.props().initial.clone().unwrap_or_default());
        editor.loading = ctx.props().page_id.is_some();
        editor
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || self.loaded {
            return;
        }
        self.loaded = true;

        match ctx.props().page_id.clone() {
            Some(page_id) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::get_page(&page_id).await;
                    link.send_message(Msg::Loaded(result));
                });
            }
            None => self.mark_clean(),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        crate::helpers::set_dirty_flag(false);
    }
}
