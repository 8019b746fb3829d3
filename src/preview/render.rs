//! HTML preview of a file's matches.
//!
//! The document is a fixed shell around one `<pre>` block per line group,
//! highlighted client-side by google-code-prettify with line numbers starting
//! at the group's first line.

use std::fmt::Write;

use serde::Serialize;

use crate::models::{FileMatch, LineGroup};
use crate::preview::merge::merge;

const DOCUMENT_HEAD: &str = r#"<html>
<head>
<script src="https://cdn.rawgit.com/google/code-prettify/master/loader/run_prettify.js"></script>
<style>
    pre.prettyprint {
        border: 1px solid #BDBDBD;
        border-width: 0 0 1px 0;
        max-width: 100%;
    }
    h3 {
        max-width: 100%;
        overflow-wrap: break-word;
    }
</style>
</head>
<body>
"#;

const DOCUMENT_TAIL: &str = "</body>\n</html>\n";

/// Values substituted into the preview template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewModel {
    pub file_name: String,
    pub matches: Vec<LineGroup>,
}

impl PreviewModel {
    /// Merge the file's match windows and order the groups by first line.
    pub fn from_file_match(file_match: &FileMatch) -> Self {
        let mut matches = merge(file_match);
        matches.sort_by_key(|g| g.first_line_number);
        Self {
            file_name: file_match.filename.clone(),
            matches,
        }
    }
}

/// Render the preview document for `file_match`. `None` renders nothing.
pub fn render(file_match: Option<&FileMatch>) -> String {
    match file_match {
        Some(fm) => render_model(&PreviewModel::from_file_match(fm)),
        None => String::new(),
    }
}

pub fn render_model(model: &PreviewModel) -> String {
    let mut html = String::from(DOCUMENT_HEAD);

    writeln!(html, "<h3>{}</h3>", escape_html(&model.file_name)).unwrap();
    for group in &model.matches {
        writeln!(html, "<?prettify linenums={}?>", group.first_line_number).unwrap();
        html.push_str("<pre class=\"prettyprint linenums\">\n");
        for line in &group.lines {
            writeln!(html, "{}", escape_html(line)).unwrap();
        }
        html.push_str("</pre>\n");
    }

    html.push_str(DOCUMENT_TAIL);
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
