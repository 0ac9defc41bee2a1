use gloo_timers::callback::Timeout;
use uuid::Uuid;
use web_sys::Element;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// Panel that slides down from the top of the viewport while it carries the `show` class.
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

const SHOWN: &str = "show";

// The short delay lets a freshly mounted sheet paint once before the transition starts.
fn toggle_later(top_sheet_ref: &NodeRef, shown: bool) {
    if let Some(sheet) = top_sheet_ref.cast::<Element>() {
        Timeout::new(50, move || {
            let classes = sheet.class_list();
            let _ = if shown {
                classes.add_1(SHOWN)
            } else {
                classes.remove_1(SHOWN)
            };
        })
        .forget();
    }
}

pub fn open_top_sheet(top_sheet_ref: &NodeRef) {
    toggle_later(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: &NodeRef) {
    toggle_later(top_sheet_ref, false);
}

pub fn is_top_sheet_open(top_sheet_ref: &NodeRef) -> bool {
    top_sheet_ref
        .cast::<Element>()
        .is_some_and(|sheet| sheet.class_list().contains(SHOWN))
}
