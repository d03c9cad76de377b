//! Line-oriented console seam.
//!
//! The factory and the menu session only talk to a [`Console`], so the same
//! flow runs against a real terminal in the CLI and against a
//! [`ScriptedConsole`] in tests.

use std::collections::VecDeque;

use crate::types::AssetError;

pub trait Console {
    /// Shows `prompt` and reads one line of text.
    ///
    /// Returns `Ok(None)` once input is exhausted (end of file, Ctrl+D or
    /// Ctrl+C). A single prompt abandoned with Esc is
    /// [`AssetError::Cancelled`]; the session drops the current action and
    /// keeps running.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AssetError>;

    /// Prints a block of text.
    fn show(&mut self, text: &str);
}

/// A console that answers prompts from a fixed script and records
/// everything shown to it.
///
/// Useful when you want to:
/// - Drive the menu session in tests
/// - Replay a known sequence of answers
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Every prompt asked so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every block of text shown so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Shown text joined with newlines, convenient for `contains` checks.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AssetError> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn show(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
