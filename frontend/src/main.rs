use crate::app::App;

mod api;
mod app;
mod components;
mod helpers;
mod tops_sheet;
mod workspace_grid;

fn main() {
    yew::Renderer::<App>::new().render();
}
