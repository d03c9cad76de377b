//! The interactive menu loop.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::console::Console;
use crate::factory::{AssetFactory, ask_asset_id};
use crate::offices::OfficeTable;
use crate::report::{build_report, render_report};
use crate::store::AssetStore;
use crate::types::AssetError;

pub const MENU: &str = "\
1) List assets
2) Create asset
3) Edit asset
4) Delete asset
5) Save & Quit";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Create,
    Edit,
    Delete,
    Quit,
}

impl std::str::FromStr for MenuChoice {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::List),
            "2" => Ok(MenuChoice::Create),
            "3" => Ok(MenuChoice::Edit),
            "4" => Ok(MenuChoice::Delete),
            "5" => Ok(MenuChoice::Quit),
            other => Err(AssetError::invalid("menu choice", format!("'{}' is not between 1 and 5", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A single user session: one store, one console, one office table.
pub struct Session<'a, S: ?Sized, C: ?Sized> {
    store: &'a S,
    console: &'a mut C,
    offices: &'a OfficeTable,
    today: NaiveDate,
    colorize: bool,
}

impl<'a, S, C> Session<'a, S, C>
where
    S: AssetStore + ?Sized,
    C: Console + ?Sized,
{
    pub fn new(store: &'a S, console: &'a mut C, offices: &'a OfficeTable, today: NaiveDate) -> Self {
        Self {
            store,
            console,
            offices,
            today,
            colorize: true,
        }
    }

    /// Enables or disables row coloring in the report.
    pub fn with_color(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Runs the menu until the user quits or input ends.
    ///
    /// Errors from a single action are shown and the menu comes back, as does
    /// a prompt cancelled with Esc; only a failing console ends the session
    /// early.
    pub async fn run(&mut self) -> Result<(), AssetError> {
        loop {
            self.console.show(MENU);
            let line = match self.console.read_line("Choose an option: ") {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(AssetError::Cancelled) => continue,
                Err(e) => return Err(e),
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    self.console.show(&e.to_string());
                    continue;
                }
            };

            match self.dispatch(choice).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(AssetError::InputClosed) => return Ok(()),
                Err(AssetError::Cancelled) => {
                    debug!("{:?} cancelled", choice);
                    self.console.show(&AssetError::Cancelled.to_string());
                }
                Err(e @ AssetError::Console(_)) => return Err(e),
                Err(e) => {
                    warn!("{:?} failed: {}", choice, e);
                    self.console.show(&e.to_string());
                }
            }
        }
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow, AssetError> {
        match choice {
            MenuChoice::List => self.list().await?,
            MenuChoice::Create => self.create().await?,
            MenuChoice::Edit => self.edit().await?,
            MenuChoice::Delete => self.delete().await?,
            MenuChoice::Quit => {
                info!("Session ended by user");
                self.console.show("Goodbye.");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    async fn list(&mut self) -> Result<(), AssetError> {
        let assets = self.store.get_all().await?;
        if assets.is_empty() {
            self.console.show("No assets registered.");
            return Ok(());
        }

        let rows = build_report(&assets, self.offices, self.today)?;
        self.console.show(&render_report(&rows, self.colorize));
        Ok(())
    }

    async fn create(&mut self) -> Result<(), AssetError> {
        let asset = AssetFactory::new(self.offices, self.today).create(&mut *self.console)?;
        let id = self.store.create(&asset).await?;
        self.console.show(&format!("Created asset {}.", id));
        Ok(())
    }

    async fn edit(&mut self) -> Result<(), AssetError> {
        let id = ask_asset_id(&mut *self.console, "Id of the asset to edit: ")?;
        let current = self.store.get_by_id(id).await?.ok_or(AssetError::NotFound(id))?;

        let edited = AssetFactory::new(self.offices, self.today).edit(&mut *self.console, &current)?;
        if self.store.update(&edited).await? {
            self.console.show(&format!("Updated asset {}.", id));
        } else {
            // Removed between lookup and update; nothing to overwrite.
            self.console.show(&AssetError::NotFound(id).to_string());
        }
        Ok(())
    }

    async fn delete(&mut self) -> Result<(), AssetError> {
        let id = ask_asset_id(&mut *self.console, "Id of the asset to delete: ")?;
        let current = self.store.get_by_id(id).await?.ok_or(AssetError::NotFound(id))?;

        self.store.delete(id).await?;
        self.console.show(&format!("Deleted asset {} ({}).", id, current.name));
        Ok(())
    }
}
