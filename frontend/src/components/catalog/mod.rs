//! Read-only catalogs: the component library shown beside the canvas and the template
//! selector offered when a page is created.

mod component_library;
mod template_selector;

pub use component_library::ComponentLibrary;
pub use template_selector::TemplateSelector;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Search box plus category select shared by both catalogs.
pub(crate) fn filter_bar(
    search: &str,
    category: Option<&str>,
    categories: &[String],
    on_search: Callback<String>,
    on_category: Callback<Option<String>>,
) -> Html {
    html! {
        <div style="display:flex;gap:6px;margin-bottom:8px;">
            <input
                type="search"
                placeholder="Search..."
                style="flex:1;"
                value={search.to_string()}
                oninput={move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_search.emit(input.value());
                }}
            />
            <select onchange={move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                let value = select.value();
                on_category.emit((!value.is_empty()).then_some(value));
            }}>
                <option value="" selected={category.is_none()}>{ "All" }</option>
                { for categories.iter().map(|c| html! {
                    <option value={c.clone()} selected={category == Some(c.as_str())}>{ c.clone() }</option>
                }) }
            </select>
        </div>
    }
}
