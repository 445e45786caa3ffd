pub mod json;
pub mod markdown;
pub mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

/// Risk scores and totals are shown with one decimal place everywhere.
pub(crate) fn score(value: f64) -> String {
    format!("{value:.1}")
}

pub(crate) fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Free text inside a markdown table cell: pipes escaped, line breaks as `<br>`.
pub(crate) fn cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
