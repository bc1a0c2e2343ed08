//! Markdown-to-HTML rendering for the per-meal recipe pages.
//!
//! Pure, stateless transforms: recipe text in, HTML out. The page
//! shell embeds the slot's image and audio URLs so a browser can show
//! the dish and play the spoken rendition next to the instructions.

use pulldown_cmark::{Parser, html};

use crate::models::MealSlot;

/// Render markdown-ish recipe text to an HTML fragment.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text);
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Assemble the full recipe page for one meal slot.
///
/// `body_html` is the already-rendered recipe fragment; the image and
/// audio URLs point at the slot's generated assets.
pub fn recipe_page(slot: MealSlot, body_html: &str, image_url: &str, audio_url: &str) -> String {
    let name = slot.display_name();
    format!(
        "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>{name}</title></head><body>\
<h1>{name}</h1>\
<img src=\"{image_url}\" alt=\"{name}\" width=\"512\">\
{body_html}\
<p><audio controls src=\"{audio_url}\"></audio></p>\
</body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_markdown_produces_html_lists() {
        let html = render_markdown("1. Boil water.\n2. Add oats.");
        assert!(html.contains("<ol>"), "expected an ordered list: {html}");
        assert!(html.contains("Boil water."));
    }

    #[test]
    fn render_markdown_handles_plain_paragraphs() {
        let html = render_markdown("Just stir and serve.");
        assert!(html.contains("<p>Just stir and serve.</p>"));
    }

    #[test]
    fn recipe_page_embeds_assets_and_heading() {
        let page = recipe_page(
            MealSlot::Lunch,
            "<p>mix it</p>",
            "http://h/static/images/lunch.png",
            "http://h/static/audio/lunch.mp3",
        );
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Lunch</title>"));
        assert!(page.contains("<h1>Lunch</h1>"));
        assert!(page.contains("src=\"http://h/static/images/lunch.png\""));
        assert!(page.contains("<audio controls src=\"http://h/static/audio/lunch.mp3\""));
        assert!(page.contains("<p>mix it</p>"));
    }
}
