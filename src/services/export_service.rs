use headless_chrome::{types::PrintToPdfOptions, Browser, LaunchOptions};
use regex::Regex;
use std::fs;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ExportError;
use crate::models::ExportedFile;

pub const TEXT_FILE_NAME: &str = "summary.txt";
pub const DOCUMENT_FILE_NAME: &str = "summary.pdf";

/// Line prefixes that mark a heading or a main-point bullet.
const EMPHASIS_MARKERS: [&str; 4] = [
    "**Extractive Summary:**",
    "**Abstractive Summary:**",
    "**Main Points:**",
    "**•",
];

const MM_PER_INCH: f64 = 25.4;
const MARGIN_MM: f64 = 15.0;

/// The summary as a UTF-8 text file.
pub fn export_as_text(summary: &str) -> Result<ExportedFile, ExportError> {
    if summary.is_empty() {
        return Err(ExportError::EmptySummary);
    }
    Ok(ExportedFile {
        file_name: TEXT_FILE_NAME.to_string(),
        media_type: "text/plain;charset=utf-8".to_string(),
        bytes: summary.as_bytes().to_vec(),
    })
}

/// The summary as a paginated A4 PDF, printed through headless Chrome.
/// Blocking; call from `spawn_blocking` inside async code.
pub fn export_as_document(summary: &str) -> Result<ExportedFile, ExportError> {
    if summary.is_empty() {
        return Err(ExportError::EmptySummary);
    }

    let html = generate_full_html(&render_summary_body(summary));

    // Data URLs have size limits, so go through a temporary file.
    let html_path = temp_html_path();
    fs::write(&html_path, &html)?;
    let file_url = format!("file://{}", html_path.to_string_lossy());

    let result = print_to_pdf(&file_url);
    let _ = fs::remove_file(&html_path);
    let pdf_data = result?;

    info!(bytes = pdf_data.len(), "summary exported as PDF");
    Ok(ExportedFile {
        file_name: DOCUMENT_FILE_NAME.to_string(),
        media_type: "application/pdf".to_string(),
        bytes: pdf_data,
    })
}

/// Unique per export so overlapping exports never share a file.
fn temp_html_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("docbrief_export_{}.html", Uuid::new_v4()))
}

fn print_to_pdf(file_url: &str) -> Result<Vec<u8>, ExportError> {
    let browser = Browser::new(
        LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| ExportError::Render(format!("Failed to build launch options: {}", e)))?,
    )
    .map_err(|e| ExportError::Render(format!("Failed to launch browser: {}", e)))?;

    let tab = browser
        .new_tab()
        .map_err(|e| ExportError::Render(format!("Failed to create tab: {}", e)))?;

    tab.navigate_to(file_url)
        .map_err(|e| ExportError::Render(format!("Failed to navigate: {}", e)))?;
    tab.wait_until_navigated()
        .map_err(|e| ExportError::Render(format!("Failed to wait for navigation: {}", e)))?;

    // Fonts are local, but give layout a moment to settle.
    std::thread::sleep(Duration::from_millis(300));

    let margin = MARGIN_MM / MM_PER_INCH;
    let pdf_options = PrintToPdfOptions {
        landscape: Some(false),
        display_header_footer: Some(false),
        print_background: Some(true),
        scale: Some(1.0),
        paper_width: Some(8.27),   // A4 width in inches
        paper_height: Some(11.69), // A4 height in inches
        margin_top: Some(margin),
        margin_bottom: Some(margin),
        margin_left: Some(margin),
        margin_right: Some(margin),
        page_ranges: None,
        ignore_invalid_page_ranges: None,
        header_template: None,
        footer_template: None,
        prefer_css_page_size: Some(false),
        transfer_mode: None,
        generate_tagged_pdf: None,
        generate_document_outline: None,
    };

    tab.print_to_pdf(Some(pdf_options))
        .map_err(|e| ExportError::Render(format!("Failed to generate PDF: {}", e)))
}

pub fn is_emphasized_line(line: &str) -> bool {
    let trimmed = line.trim();
    EMPHASIS_MARKERS.iter().any(|marker| trimmed.starts_with(marker))
}

fn inline_bold() -> Option<&'static Regex> {
    static INLINE_BOLD: OnceLock<Option<Regex>> = OnceLock::new();
    INLINE_BOLD
        .get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").ok())
        .as_ref()
}

/// One block per source line: emphasized lines lose their `**` markers and
/// render bold, blank lines become a gap.
pub fn render_summary_body(summary: &str) -> String {
    let mut html = String::new();
    let mut emphasized = 0usize;

    for line in summary.lines() {
        if line.trim().is_empty() {
            html.push_str(r#"<div class="gap"></div>"#);
            continue;
        }

        if is_emphasized_line(line) {
            emphasized += 1;
            let text = line.replace("**", "");
            html.push_str(&format!(r#"<p class="bold">{}</p>"#, html_escape(&text)));
        } else {
            let escaped = html_escape(line);
            let rendered = match inline_bold() {
                Some(re) => re.replace_all(&escaped, "<strong>$1</strong>").into_owned(),
                None => escaped,
            };
            html.push_str(&format!("<p>{}</p>", rendered));
        }
    }

    debug!(emphasized, "rendered summary body");
    html
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn generate_full_html(content: &str) -> String {
    format!(r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Summary</title>
    <style>
        {css}
    </style>
</head>
<body>
    <main class="summary">
        {content}
    </main>
</body>
</html>"##,
        content = content,
        css = get_pdf_css()
    )
}

fn get_pdf_css() -> &'static str {
    r##"
*, *::before, *::after {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

@media print {
    body {
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
    }

    p {
        page-break-inside: avoid;
    }
}

html {
    font-size: 11pt;
}

body {
    font-family: Helvetica, Arial, sans-serif;
    line-height: 7mm;
    color: rgb(40, 40, 40);
    background: #ffffff;
}

.summary p {
    white-space: pre-wrap;
    overflow-wrap: break-word;
}

.summary p.bold,
.summary strong {
    font-weight: 700;
}

.summary .gap {
    height: 5mm;
}
"##
}
