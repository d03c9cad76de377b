//! Asset report: ordering, currency conversion, depreciation emphasis and
//! fixed-width rendering.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::currency::{LocalPrice, convert_price};
use crate::depreciation::{Emphasis, expiry_date, months_remaining};
use crate::offices::OfficeTable;
use crate::types::{Asset, AssetError, AssetId, AssetKind};
use crate::validation::DATE_FORMAT;

/// One line of the report, with every derived value already computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: AssetId,
    pub kind: AssetKind,
    pub name: String,
    pub office: String,
    pub local_price: LocalPrice,
    pub purchase_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub months_remaining: i32,
    pub emphasis: Emphasis,
}

/// Column widths: ID, Type, Name, Office, Price, Purchase Date, Expiry Date.
const WIDTHS: [usize; 7] = [5, 8, 22, 12, 16, 15, 12];

const HEADERS: [&str; 7] = ["ID", "Type", "Name", "Office", "Price", "Purchase Date", "Expiry Date"];

/// Sorts assets by office then purchase date and derives each row.
///
/// Offices compare ASCII case-insensitively, the same way they are looked
/// up. The sort is stable: assets with the same office and purchase date
/// keep the order they were given in.
///
/// # Errors
/// [`AssetError::UnknownOffice`] as soon as one asset's office is missing
/// from `offices`. No partial report is produced.
pub fn build_report(assets: &[Asset], offices: &OfficeTable, today: NaiveDate) -> Result<Vec<ReportRow>, AssetError> {
    let mut sorted: Vec<&Asset> = assets.iter().collect();
    sorted.sort_by_cached_key(|a| (a.office.trim().to_ascii_lowercase(), a.purchase_date));

    sorted
        .into_iter()
        .map(|asset| -> Result<ReportRow, AssetError> {
            let local_price = convert_price(offices, &asset.office, asset.price)?;
            let expiry = expiry_date(asset.purchase_date).ok_or_else(|| AssetError::CorruptRecord {
                field: "purchase_date",
                value: asset.purchase_date.to_string(),
            })?;
            let months = months_remaining(expiry, today);

            Ok(ReportRow {
                id: asset.id,
                kind: asset.kind,
                name: asset.name.clone(),
                office: asset.office.clone(),
                local_price,
                purchase_date: asset.purchase_date,
                expiry_date: expiry,
                months_remaining: months,
                emphasis: Emphasis::from_months_remaining(months),
            })
        })
        .collect()
}

/// Renders rows as a fixed-width table.
///
/// With `colorize` set, each row is painted according to its own
/// [`Emphasis`]; otherwise the output is plain text.
pub fn render_report(rows: &[ReportRow], colorize: bool) -> String {
    let mut output = String::new();

    let header = format_line(&HEADERS.map(String::from));
    let rule = "-".repeat(header.chars().count());
    writeln!(&mut output, "{}", header).ok();
    writeln!(&mut output, "{}", rule).ok();

    for row in rows {
        let line = render_row(row);
        if colorize {
            writeln!(&mut output, "{}", row.emphasis.paint(&line)).ok();
        } else {
            writeln!(&mut output, "{}", line).ok();
        }
    }

    output
}

/// Renders a single row without any styling.
pub fn render_row(row: &ReportRow) -> String {
    format_line(&[
        row.id.to_string(),
        row.kind.to_string(),
        row.name.clone(),
        row.office.clone(),
        row.local_price.to_string(),
        row.purchase_date.format(DATE_FORMAT).to_string(),
        row.expiry_date.format(DATE_FORMAT).to_string(),
    ])
}

fn format_line(cells: &[String; 7]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(WIDTHS).enumerate() {
        // Price is right-aligned, everything else left-aligned and truncated.
        // A price too wide for its column is masked rather than cut short.
        if i == 4 && cell.chars().count() > width {
            write!(&mut line, "{}  ", "#".repeat(width)).ok();
        } else if i == 4 {
            write!(&mut line, "{:>width$}  ", cell, width = width).ok();
        } else {
            write!(&mut line, "{:<width$.width$}  ", cell, width = width).ok();
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewAsset;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(id: i64, office: &str, purchased: NaiveDate) -> Asset {
        NewAsset::new(AssetKind::Laptop, format!("Laptop {}", id), office, dec!(100), purchased).with_id(AssetId(id))
    }

    #[test]
    fn test_iphone_in_madrid_is_urgent() {
        let iphone = NewAsset::new(AssetKind::Phone, "iPhone", "Madrid", dec!(499.99), date(2019, 5, 11))
            .with_id(AssetId(1));

        let rows = build_report(&[iphone], &OfficeTable::default(), date(2022, 2, 12)).unwrap();

        assert_eq!(rows[0].expiry_date, date(2022, 5, 11));
        assert_eq!(rows[0].months_remaining, 3);
        assert_eq!(rows[0].emphasis, Emphasis::Urgent);
        assert_eq!(rows[0].local_price.to_string(), "429.99 EUR");
    }

    #[test]
    fn test_sorted_by_office_then_date() {
        let assets = vec![
            asset(1, "Stockholm", date(2023, 1, 1)),
            asset(2, "Madrid", date(2023, 5, 1)),
            asset(3, "Madrid", date(2022, 5, 1)),
            asset(4, "Miami", date(2021, 1, 1)),
        ];

        let rows = build_report(&assets, &OfficeTable::default(), date(2024, 1, 1)).unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id.0).collect();

        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let same_day = date(2023, 3, 3);
        let assets = vec![asset(9, "Miami", same_day), asset(2, "Miami", same_day), asset(5, "Miami", same_day)];

        let rows = build_report(&assets, &OfficeTable::default(), date(2024, 1, 1)).unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id.0).collect();

        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[test]
    fn test_unknown_office_fails_whole_report() {
        let assets = vec![asset(1, "Miami", date(2023, 1, 1)), asset(2, "", date(2023, 1, 1))];
        let err = build_report(&assets, &OfficeTable::default(), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, AssetError::UnknownOffice(ref o) if o.is_empty()));
    }

    #[test]
    fn test_render_plain_table() {
        let assets = vec![asset(1, "Madrid", date(2023, 1, 1))];
        let rows = build_report(&assets, &OfficeTable::default(), date(2024, 1, 1)).unwrap();

        let table = render_report(&rows, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID     Type      Name"));
        assert!(lines[0].ends_with("Expiry Date"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("Laptop 1"));
        assert!(lines[2].contains("86.00 EUR"));
        assert!(lines[2].contains("2023-01-01"));
        assert!(lines[2].ends_with("2026-01-01"));
        assert!(!table.contains('\u{1b}'));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut long = asset(1, "Miami", date(2023, 1, 1));
        long.name = "A".repeat(40);
        let rows = build_report(&[long], &OfficeTable::default(), date(2024, 1, 1)).unwrap();

        let line = render_row(&rows[0]);
        assert!(line.contains(&"A".repeat(22)));
        assert!(!line.contains(&"A".repeat(23)));
    }

    #[test]
    fn test_colorized_rows_follow_emphasis() {
        colored::control::set_override(true);
        let assets = vec![
            asset(1, "Miami", date(2021, 3, 1)),
            asset(2, "Miami", date(2021, 6, 1)),
            asset(3, "Miami", date(2023, 3, 1)),
        ];
        let rows = build_report(&assets, &OfficeTable::default(), date(2024, 1, 1)).unwrap();

        let table = render_report(&rows, true);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(rows[0].emphasis, Emphasis::Urgent);
        assert!(lines[2].starts_with("\u{1b}[31m"));
        assert_eq!(rows[1].months_remaining, 5);
        assert_eq!(rows[1].emphasis, Emphasis::Warning);
        assert!(lines[3].starts_with("\u{1b}[33m"));
        assert_eq!(rows[2].emphasis, Emphasis::Normal);
        assert!(!lines[4].contains('\u{1b}'));
    }

    #[test]
    fn test_office_spelling_does_not_split_groups() {
        let assets = vec![
            asset(1, "madrid", date(2023, 1, 1)),
            asset(2, "Miami", date(2022, 1, 1)),
            asset(3, "Madrid", date(2021, 1, 1)),
        ];

        let rows = build_report(&assets, &OfficeTable::default(), date(2024, 1, 1)).unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id.0).collect();

        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_oversized_price_keeps_columns_aligned() {
        let mut pricey = asset(1, "Stockholm", date(2023, 1, 1));
        pricey.price = dec!(9999999999999);
        let normal = asset(2, "Stockholm", date(2023, 1, 1));
        let rows = build_report(&[pricey, normal], &OfficeTable::default(), date(2024, 1, 1)).unwrap();

        let wide = render_row(&rows[0]);
        let narrow = render_row(&rows[1]);

        assert!(wide.contains(&"#".repeat(16)));
        assert_eq!(wide.find("2023-01-01"), narrow.find("2023-01-01"));
        assert_eq!(wide.chars().count(), narrow.chars().count());
    }
}
