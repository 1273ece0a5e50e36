pub mod bars;
pub mod response;
pub mod roc;
pub mod sideways;

mod axes_draw;

/// Placeholder for an artifact with nothing to draw.
fn empty_svg(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for ch in message.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(ch),
        }
    }
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="50"><text x="10" y="30">{escaped}</text></svg>"#
    )
}
