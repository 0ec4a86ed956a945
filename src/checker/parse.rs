//! Page parsers for the vehicle checker.
//!
//! All functions take the raw HTML and return owned data, so no parsed
//! document is ever held across an `.await`.

use super::types::{ChargeDetermination, VehicleAttribute, VehicleRecord};
use crate::config::CheckerConfig;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static CSRF_TOKEN: Lazy<Selector> =
    Lazy::new(|| selector(r#"html > head > meta[name="csrf-token"]"#));
static NOT_FOUND_TITLE: Lazy<Selector> =
    Lazy::new(|| selector(r#"h1[class="govuk-heading-l not-found-title"]"#));
static TABLE_ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static ATTRIBUTE_HEADERS: Lazy<Vec<(VehicleAttribute, Selector)>> = Lazy::new(|| {
    VehicleAttribute::ALL
        .iter()
        .map(|a| (*a, selector(&format!(r#"th[id="{}"]"#, a.id()))))
        .collect()
});

fn selector(css: &str) -> Selector {
    // Only called with the literals above
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Content of `<meta name="csrf-token">` in the document head
pub fn extract_token(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&CSRF_TOKEN)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

/// The lookup page renders a dedicated heading when the VRN is unknown
pub fn is_not_found(html: &str) -> bool {
    let doc = Html::parse_document(html);
    doc.select(&NOT_FOUND_TITLE).next().is_some()
}

pub fn extract_vehicle(html: &str) -> VehicleRecord {
    let doc = Html::parse_document(html);
    let mut record = VehicleRecord::default();

    for (attribute, sel) in ATTRIBUTE_HEADERS.iter() {
        let value = doc.select(sel).next().and_then(|th| {
            own_text(th)
                .into_iter()
                .map(|t| t.trim().to_string())
                .find(|t| !t.is_empty())
        });

        if let Some(value) = value {
            record.insert(*attribute, value);
        }
    }

    record
}

/// Scan every table row for the configured zone and decide the charge.
///
/// A row contributes when its first text cell equals `zone` exactly. The
/// second cell, trimmed, raises the not-charged signal when it equals
/// `no_charge_text` and the charged signal when its amount matches
/// `charge_amount`. Rows with fewer than two text cells are ignored.
pub fn determine_charge(html: &str, config: &CheckerConfig) -> ChargeDetermination {
    let doc = Html::parse_document(html);
    let expected_amount = normalize_amount(&config.charge_amount);

    let mut charged = false;
    let mut not_charged = false;

    for row in doc.select(&TABLE_ROW) {
        let cells = row_cell_texts(row);
        let [city, charge, ..] = cells.as_slice() else {
            continue;
        };
        if city != &config.zone {
            continue;
        }

        let charge = charge.trim();
        if charge == config.no_charge_text {
            not_charged = true;
        }
        if !expected_amount.is_empty() && normalize_amount(charge) == expected_amount {
            charged = true;
        }
    }

    tracing::debug!(charged, not_charged, "charge signals");
    ChargeDetermination::from_signals(charged, not_charged)
}

/// Reduce a rendered amount to its digits and decimal point, so that
/// "£8.00", "Â£8.00" and "8.00" compare equal
pub fn normalize_amount(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Text nodes directly under each `<td>` child of the row, in document
/// order. Text inside nested elements is not included.
fn row_cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .flat_map(own_text)
        .collect()
}

fn own_text(el: ElementRef<'_>) -> Vec<String> {
    el.children()
        .filter_map(|node| node.value().as_text().map(|t| String::from(&**t)))
        .collect()
}
