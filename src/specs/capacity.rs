// src/specs/capacity.rs
//! Scraping *spec* for the capacity page.
//!
//! Layout the page has shipped with for a long while:
//! ```html
//! <table><tbody>
//!   <tr><td>Lap Pool</td><td><div id="pool-lap" class="light"></div></td></tr>
//!   ...
//! </tbody></table>
//! ...
//! <script>$("#pool-lap").addClass("green"); ...</script>   <!-- 4th script -->
//! ```
//! The colour is never in the markup; only the script knows it.

use scraper::Html;

use crate::config::consts::SCRIPT_INDEX;
use crate::core::{html, script};
use crate::data::Status;
use crate::error::{Error, Result};

/// A facility row before its colour is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub status: Status,
}

/// Names and colours, in page order.
pub fn extract(page: &str) -> Result<Vec<Facility>> {
    let doc = Html::parse_document(page);
    let markers = read_markers(&doc)?;
    let script = html::nth_script(&doc, SCRIPT_INDEX)
        .ok_or_else(|| Error::structure(format!("script #{} not found", SCRIPT_INDEX + 1)))?
        .html();

    logd!("capacity markers: {:?}", markers);
    resolve(&markers, &script)
}

/// (name, marker id) for every body row of the first table with two or more cells.
/// A repeated name keeps its first position and takes the later id.
pub fn read_markers(doc: &Html) -> Result<Vec<Marker>> {
    let table = html::nth_table(doc, 0).ok_or_else(|| Error::structure("capacity table not found"))?;

    let mut out: Vec<Marker> = Vec::new();
    for row in html::body_rows(table) {
        let cells = html::cells(row);
        if cells.len() < 2 {
            continue;
        }
        let name = html::text(cells[0]);
        let id = html::marker_id(cells[1])
            .ok_or_else(|| Error::structure(format!("no status marker for {name:?}")))?;

        match out.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.id = id,
            None => out.push(Marker { name, id }),
        }
    }
    Ok(out)
}

/// Look every marker up in the script text. One miss fails the lot.
pub fn resolve(markers: &[Marker], script_text: &str) -> Result<Vec<Facility>> {
    markers
        .iter()
        .map(|m| -> Result<Facility> {
            let class = script::resolve_class(script_text, &m.id)
                .ok_or_else(|| Error::Unresolved(m.id.clone()))?;
            Ok(Facility { name: m.name.clone(), status: class.parse()? })
        })
        .collect()
}
