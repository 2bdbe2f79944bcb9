//! Base handler: Jupyter notebook JSON to a standalone HTML document.
//!
//! Deliberately small. Cells are emitted in order as escaped preformatted
//! blocks; code cells also carry their textual outputs.

use std::fmt::Write;

use serde::Deserialize;

use crate::service::{CallContext, ConvertError, NotebookRequest, NotebookResponse, NotebookSupport};

#[derive(Debug, Deserialize)]
struct Notebook {
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: MultilineText,
    #[serde(default)]
    outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
struct Output {
    output_type: String,
    #[serde(default)]
    text: Option<MultilineText>,
    #[serde(default)]
    data: Option<OutputData>,
}

#[derive(Debug, Deserialize)]
struct OutputData {
    #[serde(rename = "text/plain")]
    text_plain: Option<MultilineText>,
}

/// nbformat stores text either as one string or as a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MultilineText {
    Single(String),
    Lines(Vec<String>),
}

impl Default for MultilineText {
    fn default() -> Self {
        MultilineText::Single(String::new())
    }
}

impl MultilineText {
    fn joined(&self) -> String {
        match self {
            MultilineText::Single(s) => s.clone(),
            MultilineText::Lines(lines) => lines.concat(),
        }
    }
}

/// Renders notebooks without any external tooling.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous conversion used by `generate_html`.
    pub fn render(&self, source: &str) -> Result<String, ConvertError> {
        if source.trim().is_empty() {
            return Err(ConvertError::InvalidInput("empty notebook source".to_string()));
        }

        let notebook: Notebook = serde_json::from_str(source)
            .map_err(|e| ConvertError::MalformedNotebook(e.to_string()))?;

        let mut html = String::from("<!DOCTYPE html>\n<html>\n<body>\n");
        for cell in &notebook.cells {
            // Writing into a String cannot fail.
            let _ = writeln!(
                html,
                "<div class=\"cell {}\"><pre>{}</pre>",
                escape(&cell.cell_type),
                escape(&cell.source.joined())
            );
            for output in &cell.outputs {
                if let Some(text) = output_text(output) {
                    let _ = writeln!(
                        html,
                        "<pre class=\"output {}\">{}</pre>",
                        escape(&output.output_type),
                        escape(&text)
                    );
                }
            }
            html.push_str("</div>\n");
        }
        html.push_str("</body>\n</html>\n");

        Ok(html)
    }
}

fn output_text(output: &Output) -> Option<String> {
    if let Some(text) = &output.text {
        return Some(text.joined());
    }
    output
        .data
        .as_ref()
        .and_then(|d| d.text_plain.as_ref())
        .map(MultilineText::joined)
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl NotebookSupport for HtmlRenderer {
    async fn generate_html(
        &self,
        _ctx: &CallContext,
        req: &NotebookRequest,
    ) -> Result<NotebookResponse, ConvertError> {
        self.render(&req.source).map(NotebookResponse::new)
    }
}
