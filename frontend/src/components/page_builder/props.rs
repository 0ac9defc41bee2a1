//! Properties for the [`PageEditor`](super::PageEditor).

use common::model::page::PageDocument;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PageEditorProps {
    /// Id of a stored page to load on first render. Takes precedence over `initial`.
    #[prop_or_default]
    pub page_id: Option<String>,

    /// Unsaved document to start from, usually seeded from a template.
    #[prop_or_default]
    pub initial: Option<PageDocument>,

    /// Called after the user leaves the editor. The parent has already confirmed any discard.
    pub on_close: Callback<()>,

    /// Called with the stored document after every successful save.
    #[prop_or_default]
    pub on_saved: Callback<PageDocument>,
}
