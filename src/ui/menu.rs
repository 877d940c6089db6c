//! Top-level menu entries and the menu text shown between operations.

use std::fmt;

use anyhow::{anyhow, Result};

/// Top-level menu entries, numbered the way the menu prints them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Exit,
    Calculate,
    List,
    Add,
    Delete,
}

impl MenuChoice {
    pub(crate) const ALL: [MenuChoice; 5] = [
        MenuChoice::Exit,
        MenuChoice::Calculate,
        MenuChoice::List,
        MenuChoice::Add,
        MenuChoice::Delete,
    ];

    pub(crate) fn number(self) -> u8 {
        match self {
            MenuChoice::Exit => 0,
            MenuChoice::Calculate => 1,
            MenuChoice::List => 2,
            MenuChoice::Add => 3,
            MenuChoice::Delete => 4,
        }
    }

    fn description(self) -> &'static str {
        match self {
            MenuChoice::Exit => "Exit the program",
            MenuChoice::Calculate => "Calculate thickness of arbitrary film",
            MenuChoice::List => "List the materials in the thin film library",
            MenuChoice::Add => "Add a new thin film to the library",
            MenuChoice::Delete => "Delete a thin film from the library",
        }
    }

    /// Map the user's answer to a menu entry.
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let number = raw
            .trim()
            .parse::<u8>()
            .map_err(|_| anyhow!("Please enter a number between 0 and 4."))?;
        Self::ALL
            .into_iter()
            .find(|choice| choice.number() == number)
            .ok_or_else(|| anyhow!("Please enter a number between 0 and 4."))
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.description())
    }
}

/// Full menu text including the trailing `Choice` prompt.
pub(crate) fn menu_text() -> String {
    let mut text = String::from("\nPlease choose one of the following operations: \n");
    for choice in MenuChoice::ALL {
        text.push_str(&format!("{choice}\n"));
    }
    text.push_str("Choice (0-4): ");
    text
}
