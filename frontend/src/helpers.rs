//! Utility functions shared by the admin UI components.
//!
//! - **User feedback**: temporary toast notifications for save/load/upload outcomes.
//! - **Dirty tracking**: MD5 digests of serialized documents and the global `app_dirty` flag
//!   read by the unload guard and by in-app navigation.
//! - **Rendering**: Markdown to HTML with raw HTML neutralized, and number formatting for the
//!   dashboard widgets.

use js_sys::Reflect;
use num_format::{Locale, ToFormattedString};
use pulldown_cmark::{html, Event, Parser};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

const DIRTY_FLAG: &str = "app_dirty";

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast removes itself after three seconds. `message` is inserted as text, never as
/// markup, because it often carries server-provided error strings.
pub fn show_toast(message: &str) {
    show_toast_styled(message, "rgba(0, 0, 0, 0.8)");
}

/// Same as [`show_toast`] with a red background, for failed writes.
pub fn show_error_toast(message: &str) {
    show_toast_styled(message, "rgba(183, 28, 28, 0.95)");
}

fn show_toast_styled(message: &str, background: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
        toast.set_text_content(Some(message));
        let html_toast: HtmlElement = toast.unchecked_into();
        let style = html_toast.style();
        style.set_property("position", "fixed").ok();
        style.set_property("bottom", "20px").ok();
        style.set_property("left", "50%").ok();
        style.set_property("transform", "translateX(-50%)").ok();
        style.set_property("background", background).ok();
        style.set_property("color", "#fff").ok();
        style.set_property("padding", "10px 20px").ok();
        style.set_property("border-radius", "4px").ok();
        style.set_property("z-index", "10000").ok();
        style.set_property("font-family", "Arial, sans-serif").ok();

        if body.append_child(&html_toast).is_ok() {
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(3000).await;
                if let Some(parent) = html_toast.parent_node() {
                    parent.remove_child(&html_toast).ok();
                }
            });
        }
    }
}

/// Hex MD5 digest of `input`; compared against the digest taken at load/save time.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Sets the global `app_dirty` flag consulted before leaving the editor.
pub fn set_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str(DIRTY_FLAG),
            &JsValue::from_bool(dirty),
        );
    }
}

pub fn is_dirty() -> bool {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str(DIRTY_FLAG)).ok())
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Asks before discarding unsaved edits. Returns `true` when it is fine to leave.
pub fn confirm_discard() -> bool {
    if !is_dirty() {
        return true;
    }
    let leave = web_sys::window()
        .and_then(|w| {
            w.confirm_with_message("You have unsaved changes. Leave this page anyway?")
                .ok()
        })
        .unwrap_or(true);
    if leave {
        set_dirty_flag(false);
    }
    leave
}

/// Renders Markdown for previews. Raw HTML in the source is shown as text.
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new(input).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// `1234567` -> `"1,234,567"`.
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// `1234.5, "USD"` -> `"USD 1,234.50"`. An empty currency prints the bare amount.
pub fn format_money(value: f64, currency: &str) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let amount = format!("{}{}.{:02}", sign, format_count(cents / 100), cents % 100);
    if currency.is_empty() {
        amount
    } else {
        format!("{} {}", currency, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_neutralizes_raw_html() {
        let rendered = markdown_to_html("**Hi** <script>alert(1)</script>");
        assert!(rendered.contains("<strong>Hi</strong>"));
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_money_and_counts() {
        assert_eq!(format_count(1_520_000), "1,520,000");
        assert_eq!(format_money(1234.5, "USD"), "USD 1,234.50");
        assert_eq!(format_money(-0.004, ""), "0.00");
        assert_eq!(format_money(-12.0, "INR"), "INR -12.00");
    }

    #[test]
    fn test_md5_is_stable() {
        assert_eq!(compute_md5(""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
