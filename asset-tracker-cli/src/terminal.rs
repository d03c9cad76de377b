//! Console backed by the real terminal.

use asset_tracker::AssetError;
use asset_tracker::console::Console;
use inquire::{InquireError, Text};

/// Reads answers with `inquire` text prompts and prints to stdout.
#[derive(Debug, Default)]
pub struct InquireConsole;

impl Console for InquireConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AssetError> {
        match Text::new(prompt).prompt() {
            Ok(line) => Ok(Some(line)),
            // Esc abandons the current action, Ctrl+C ends the session like end of input
            Err(InquireError::OperationCanceled) => Err(AssetError::Cancelled),
            Err(InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(AssetError::Console(e.to_string())),
        }
    }

    fn show(&mut self, text: &str) {
        println!("{}", text);
    }
}
