//! Standalone HTML export document.

use html_escape::encode_text;

/// Inline styling that reproduces the preview layout without the app stylesheet.
pub const EXPORT_STYLE: &str = "\
    body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
    .font-serif { font-family: Georgia, serif; }
    h1 { font-size: 2em; margin-bottom: 0.5em; }
    h2 { font-size: 1.5em; margin-top: 1em; margin-bottom: 0.5em; }
    h3 { font-size: 1.2em; margin-top: 0.8em; margin-bottom: 0.3em; }
    p { margin: 0.5em 0; }
    .contact-info { margin-bottom: 1em; }";

/// Wraps the captured preview markup in a complete UTF-8 document.
pub fn standalone_document(title: &str, preview_markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    {style}
  </style>
</head>
<body>
{body}</body>
</html>
"#,
        title = encode_text(title),
        style = EXPORT_STYLE.trim_start(),
        body = preview_markup
    )
}
