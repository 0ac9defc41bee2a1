pub mod catalog;
pub mod dashboard;
pub mod notifications;
pub mod page_builder;
pub mod pages;
