// src/specs/stop_board.rs
//! Scraping *spec* for a stop's arrival board (`/stops/{stop}` on NextRide).
//!
//! Two halves:
//! - **In the page**: [`BoardSpec::row_view_script`] builds a script that reads every trip
//!   row into a [`RowView`] (four text slots, one flag). The board is filled in by client-side
//!   script, so this has to run against the live DOM.
//! - **In Rust**: [`project_rows`] trims, optionally repairs, and drops incomplete rows.
//!   It never sees a browser and is tested with hand-built `RowView`s.
//!
//! A missing sub-element reads as an empty string; a broken row decodes as an empty
//! `RowView` and is dropped by the projection without disturbing its neighbours.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::{
    browser::BrowserSession,
    config::consts::{
        DESTINATION_SELECTOR, LIVE_CLASS, MARKER_SELECTOR, ROUTE_SELECTOR, ROW_SELECTOR,
        TIME_SELECTOR,
    },
    core::sanitize::repair_fused_to,
    data::ArrivalRecord,
    error::BrowserError,
};

/// Where the ground truth lives in the board markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSpec {
    /// Present once the board container has rendered.
    pub marker: String,
    /// One element per scheduled trip.
    pub row: String,
    pub route: String,
    pub destination: String,
    pub time: String,
    /// Class on a row whose time is a real-time estimate.
    pub live_class: String,
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            marker: MARKER_SELECTOR.into(),
            row: ROW_SELECTOR.into(),
            route: ROUTE_SELECTOR.into(),
            destination: DESTINATION_SELECTOR.into(),
            time: TIME_SELECTOR.into(),
            live_class: LIVE_CLASS.into(),
        }
    }
}

impl BoardSpec {
    /// Expression evaluating to `[{ route, destination, time, live }, …]` in DOM order.
    pub fn row_view_script(&self) -> String {
        format!(
            r#"(() => {{
  const text = (row, sel) => {{
    try {{
      const el = row.querySelector(sel);
      return el && el.textContent ? el.textContent : "";
    }} catch (_) {{
      return "";
    }}
  }};
  return Array.from(document.querySelectorAll({row})).map((row) => {{
    let live = false;
    try {{ live = row.classList.contains({live}); }} catch (_) {{}}
    return {{
      route: text(row, {route}),
      destination: text(row, {destination}),
      time: text(row, {time}),
      live,
    }};
  }});
}})()"#,
            row = js_str(&self.row),
            live = js_str(&self.live_class),
            route = js_str(&self.route),
            destination = js_str(&self.destination),
            time = js_str(&self.time),
        )
    }
}

/// JSON string literals are valid JS string literals.
fn js_str(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}

/// Raw reading of one trip row, before any clean-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RowView {
    #[serde(deserialize_with = "text_or_empty")]
    pub route: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub destination: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub time: String,
    #[serde(deserialize_with = "flag_or_false")]
    pub live: bool,
}

fn text_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn flag_or_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

/// Decode the script's result. Only a non-array result is an error; rows that are
/// not objects become empty views.
pub fn decode_rows(value: Value) -> Result<Vec<RowView>, BrowserError> {
    let items: Vec<Value> = serde_json::from_value(value)?;

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            RowView::deserialize(item).unwrap_or_else(|e| {
                debug!(row = i, "unreadable row treated as empty: {e}");
                RowView::default()
            })
        })
        .collect())
}

/// Project row views into arrival records, keeping DOM order.
pub fn project_rows<I>(rows: I, repair_destination: bool) -> Vec<ArrivalRecord>
where
    I: IntoIterator<Item = RowView>,
{
    rows.into_iter()
        .filter_map(|row| project_row(row, repair_destination))
        .collect()
}

fn project_row(row: RowView, repair_destination: bool) -> Option<ArrivalRecord> {
    let route = row.route.trim();
    let destination = row.destination.trim();

    if route.is_empty() || destination.is_empty() {
        return None;
    }

    let destination = if repair_destination {
        repair_fused_to(destination)
    } else {
        destination.to_string()
    };

    Some(ArrivalRecord {
        route: route.to_string(),
        destination,
        time: row.time.trim().to_string(),
        is_live: row.live,
    })
}

/// Read the rendered board out of an already-navigated session.
pub async fn read_board(
    session: &mut dyn BrowserSession,
    spec: &BoardSpec,
) -> Result<Vec<RowView>, BrowserError> {
    let value = session.evaluate(&spec.row_view_script()).await?;
    decode_rows(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(route: &str, destination: &str, time: &str, live: bool) -> RowView {
        RowView {
            route: route.into(),
            destination: destination.into(),
            time: time.into(),
            live,
        }
    }

    #[test]
    fn drops_rows_missing_route_or_destination() {
        let rows = vec![
            view("12", "", "5 min", true),
            view("", "Downtown", "5 min", true),
            view("12", "Downtown", "5 min", true),
            view("  ", "  ", "", false),
        ];

        let out = project_rows(rows, false);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].route, "12");
        assert_eq!(out[0].destination, "Downtown");
    }

    #[test]
    fn trims_every_field() {
        let out = project_rows(vec![view(" 7 \n", "\t Mainline ", "  Now ", false)], false);
        assert_eq!(
            out,
            vec![ArrivalRecord {
                route: "7".into(),
                destination: "Mainline".into(),
                time: "Now".into(),
                is_live: false,
            }]
        );
    }

    #[test]
    fn keeps_dom_order() {
        let rows = vec![
            view("301", "Fairview Park", "Now", true),
            view("7", "Conestoga", "3 mins", true),
            view("12", "Conestoga", "10:42", false),
        ];
        let routes: Vec<String> = project_rows(rows, false).into_iter().map(|r| r.route).collect();
        assert_eq!(routes, ["301", "7", "12"]);
    }

    #[test]
    fn repair_is_optional() {
        let rows = vec![view("201", "Conestogato Mall", "Now", true)];
        assert_eq!(project_rows(rows.clone(), true)[0].destination, "Conestoga to Mall");
        assert_eq!(project_rows(rows, false)[0].destination, "Conestogato Mall");
    }

    #[test]
    fn empty_time_is_still_a_record() {
        let out = project_rows(vec![view("9", "Lakeshore", "", false)], true);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].time, "");
    }

    #[test]
    fn decode_tolerates_broken_rows() {
        let value = json!([
            { "route": "7", "destination": "Mainline", "time": "Now", "live": true },
            null,
            { "route": null, "destination": "Downtown" },
            { "route": 12, "destination": "Uptown", "live": "yes" },
            "garbage"
        ]);

        let rows = decode_rows(value).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1], RowView::default());
        assert_eq!(rows[2].route, "");
        assert_eq!(rows[3].route, "12");
        assert!(!rows[3].live);

        let out = project_rows(rows, false);
        assert_eq!(out.len(), 2);
        assert!(out[0].is_live);
        assert_eq!(out[1].destination, "Uptown");
    }

    #[test]
    fn decode_rejects_non_array() {
        assert!(matches!(
            decode_rows(json!({ "rows": [] })),
            Err(BrowserError::Decode(_))
        ));
    }

    #[test]
    fn empty_board_is_empty() {
        let rows = decode_rows(json!([])).unwrap();
        assert!(project_rows(rows, true).is_empty());
    }

    #[test]
    fn script_quotes_selectors() {
        let spec = BoardSpec {
            row: r#"div[aria-label="Trip"]"#.into(),
            ..BoardSpec::default()
        };
        let script = spec.row_view_script();
        assert!(script.contains(r#"querySelectorAll("div[aria-label=\"Trip\"]")"#));
        assert!(script.contains(r#"classList.contains("estimated")"#));
        assert!(script.contains(r#"text(row, ".minutes")"#));
    }
}
