use common::model::catalog::ComponentEntry;
use common::model::page::{PageContent, PageDocument};
use common::model::section::Props;

/// Text fields of the settings form that need no special handling.
#[derive(Clone, Copy, PartialEq)]
pub enum PageField {
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    NavbarLabel,
    NavbarPosition,
}

pub enum Msg {
    Loaded(Result<PageDocument, String>),
    SetTitle(String),
    SetSlug(String),
    SetField(PageField, String),
    ToggleActive,
    ToggleNavbar,
    ContentChanged(PageContent),
    AddComponent(ComponentEntry),
    SelectSection(Option<String>),
    PatchSection { id: String, patch: Props },
    ReplaceSectionProps { id: String, props: Props },
    Save,
    Saved(Result<PageDocument, String>),
    Close,
}
