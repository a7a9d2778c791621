//! HTML output for comparison tables.
//!
//! The class names written here are the contract between the table and
//! the report stylesheet: `bfrow`, the sign classes `bfpos`/`bfneg`/
//! `bfneut`, the visible cells `bfmodel`/`bfdisplay`/`bferrdisplay`, and
//! the hidden sort-payload cells `bfnum`/`bfindex`/`bfnterms`. Rows
//! filtered out by search carry `bfhide`. Element ids are scoped by a
//! caller-supplied container name so several tables can share a page.

use std::fmt::Write;

use crate::table::BfTable;

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Render a table as an HTML fragment: the denominator label plus one
/// `<tr>` per derived row.
pub fn render_fragment(table: &BfTable, container: &str) -> String {
    let mut out = String::new();
    let container = escape(container);

    let _ = writeln!(
        out,
        r#"<div class="bfdenominator" id="{container}_denominator">Currently dividing by: <span class="bfmodel">{}</span></div>"#,
        escape(&table.denominator_label)
    );
    let _ = writeln!(out, r#"<table class="bftable" id="{container}_table">"#);
    out.push_str(concat!(
        "<thead><tr>",
        r#"<th class="bfmodel">Model</th>"#,
        r#"<th class="bfdisplay">Bayes factor</th>"#,
        r#"<th class="bferrdisplay">Error</th>"#,
        "</tr></thead>\n<tbody>\n"
    ));

    for row in &table.rows {
        let hide = if row.visible { "" } else { " bfhide" };
        let nterms = row
            .nterms
            .map(|n| n.to_string())
            .unwrap_or_else(|| "NA".to_string());
        let _ = writeln!(
            out,
            concat!(
                r#"<tr class="bfrow {sign}{hide}" data-index="{index}">"#,
                r#"<td class="bfmodel">{label}</td>"#,
                r#"<td class="bfdisplay">{bf}</td>"#,
                r#"<td class="bferrdisplay">&plusmn;{err}</td>"#,
                r#"<td class="bfnum" style="display:none">{num}</td>"#,
                r#"<td class="bfindex" style="display:none">{index}</td>"#,
                r#"<td class="bfnterms" style="display:none">{nterms}</td>"#,
                "</tr>"
            ),
            sign = row.sign.css_class(),
            hide = hide,
            index = row.index,
            label = escape(&row.label),
            bf = escape(&row.bf_display),
            err = escape(&row.error_display),
            num = row.relative_log_bf,
            nterms = nterms,
        );
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Wrap a fragment in a minimal standalone page.
pub fn render_document(table: &BfTable, container: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
</head>
<body>
<div class="bfcontainer" id="{container}">
{fragment}</div>
</body>
</html>
"#,
        title = escape(title),
        container = escape(container),
        fragment = render_fragment(table, container),
    )
}
