//! Interactive construction of new and edited assets.

use chrono::NaiveDate;
use tracing::debug;

use crate::console::Console;
use crate::offices::OfficeTable;
use crate::types::{Asset, AssetError, NewAsset};
use crate::validation::{
    self, DATE_FORMAT, DATE_SENTINEL, parse_kind, parse_name, parse_office, parse_price,
    parse_purchase_date,
};

/// Builds assets from console answers, asking again on every rejected field.
#[derive(Debug, Clone, Copy)]
pub struct AssetFactory<'a> {
    offices: &'a OfficeTable,
    today: NaiveDate,
}

impl<'a> AssetFactory<'a> {
    pub fn new(offices: &'a OfficeTable, today: NaiveDate) -> Self {
        Self { offices, today }
    }

    /// Asks for every field of a new asset.
    ///
    /// # Errors
    /// [`AssetError::InputClosed`] if input runs out before all fields are
    /// answered, or whatever the console itself fails with
    /// ([`AssetError::Cancelled`] included).
    pub fn create<C: Console + ?Sized>(&self, console: &mut C) -> Result<NewAsset, AssetError> {
        let offices = self.offices;
        let today = self.today;
        let office_hint = offices.names().collect::<Vec<_>>().join("/");

        let kind = ask(console, "Type (Phone/Laptop): ", parse_kind)?;
        let name = ask(console, "Name: ", parse_name)?;
        let office = ask(console, &format!("Office ({}): ", office_hint), |s| parse_office(s, offices))?;
        let price = ask(console, "Price (USD): ", parse_price)?;
        let purchase_date = ask(
            console,
            &format!("Purchase date (YYYY-MM-DD, {} for today): ", DATE_SENTINEL),
            |s| parse_purchase_date(s, today),
        )?;

        Ok(NewAsset {
            kind,
            name,
            office,
            price,
            purchase_date,
        })
    }

    /// Asks for every field again, showing the current value. An empty
    /// answer keeps it. The id is never touched.
    pub fn edit<C: Console + ?Sized>(&self, console: &mut C, current: &Asset) -> Result<Asset, AssetError> {
        let offices = self.offices;
        let today = self.today;

        let kind = ask_or_keep(console, &format!("Type [{}]: ", current.kind), current.kind, parse_kind)?;
        let name = ask_or_keep(console, &format!("Name [{}]: ", current.name), current.name.clone(), parse_name)?;
        let office = ask_or_keep(
            console,
            &format!("Office [{}]: ", current.office),
            current.office.clone(),
            |s| parse_office(s, offices),
        )?;
        let price = ask_or_keep(console, &format!("Price (USD) [{}]: ", current.price), current.price, parse_price)?;
        let purchase_date = ask_or_keep(
            console,
            &format!("Purchase date [{}]: ", current.purchase_date.format(DATE_FORMAT)),
            current.purchase_date,
            |s| parse_purchase_date(s, today),
        )?;

        Ok(Asset {
            id: current.id,
            kind,
            name,
            office,
            price,
            purchase_date,
        })
    }
}

/// Asks for an asset id until a valid one is given.
pub fn ask_asset_id<C: Console + ?Sized>(console: &mut C, prompt: &str) -> Result<crate::types::AssetId, AssetError> {
    ask(console, prompt, validation::parse_asset_id)
}

fn ask<C, T, F>(console: &mut C, prompt: &str, parse: F) -> Result<T, AssetError>
where
    C: Console + ?Sized,
    F: Fn(&str) -> Result<T, AssetError>,
{
    loop {
        let line = console.read_line(prompt)?.ok_or(AssetError::InputClosed)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_recoverable_input() => {
                debug!("Rejected answer {:?} to {:?}: {}", line, prompt, e);
                console.show(&e.to_string());
            }
            Err(e) => return Err(e),
        }
    }
}

fn ask_or_keep<C, T, F>(console: &mut C, prompt: &str, current: T, parse: F) -> Result<T, AssetError>
where
    C: Console + ?Sized,
    F: Fn(&str) -> Result<T, AssetError>,
{
    loop {
        let line = console.read_line(prompt)?.ok_or(AssetError::InputClosed)?;
        if line.trim().is_empty() {
            return Ok(current);
        }
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_recoverable_input() => {
                debug!("Rejected answer {:?} to {:?}: {}", line, prompt, e);
                console.show(&e.to_string());
            }
            Err(e) => return Err(e),
        }
    }
}
