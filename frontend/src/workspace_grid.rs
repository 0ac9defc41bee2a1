use yew::{html, Children, Component, Context, Html, Properties};

/// Responsive grid that lays its children out in `columns` equal tracks.
#[derive(Properties, PartialEq)]
pub struct WorkspaceGridProps {
    pub columns: usize,
    #[prop_or(12)]
    pub gap_px: u32,
    pub children: Children,
}

pub struct WorkspaceGrid;

impl Component for WorkspaceGrid {
    type Message = ();
    type Properties = WorkspaceGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        WorkspaceGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat(auto-fill, minmax(max(260px, calc((100% - {gap}px * {gaps}) / {columns})), 1fr));
             gap: {gap}px;
             width: 100%;",
            gap = props.gap_px,
            gaps = props.columns.saturating_sub(1),
            columns = props.columns.max(1),
        );

        html! {
            <div style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
