// src/core/html.rs
//
// Small helpers over `scraper` so the page specs read as "which table,
// which rows, which cells" instead of selector plumbing.

use scraper::{ElementRef, Html};

use super::sanitize::normalize_ws;

/// The `n`-th `<table>` in document order, nested tables included.
pub fn nth_table(doc: &Html, n: usize) -> Option<ElementRef<'_>> {
    doc.select(sel!("table")).nth(n)
}

/// The `n`-th `<script>` in document order.
pub fn nth_script(doc: &Html, n: usize) -> Option<ElementRef<'_>> {
    doc.select(sel!("script")).nth(n)
}

/// Rows of the table's first `<tbody>`. The parser wraps bare `<tr>`s in a
/// `<tbody>`, so only tables with nothing but a `<thead>` come back empty.
pub fn body_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    match table.select(sel!("tbody")).next() {
        Some(body) => body.select(sel!("tr")).collect(),
        None => Vec::new(),
    }
}

/// Every row of the table, head and body alike.
pub fn all_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table.select(sel!("tr")).collect()
}

/// `<td>` cells under a row (`<th>` excluded).
pub fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.select(sel!("td")).collect()
}

/// Visible text of an element, whitespace-normalized.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// `id` of the first nested `<div>`, else the element's own `id`.
pub fn marker_id(cell: ElementRef<'_>) -> Option<String> {
    match cell.select(sel!("div")).next() {
        Some(div) => div.value().attr("id").map(str::to_string),
        None => cell.value().attr("id").map(str::to_string),
    }
}
