use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unit {0:?} was not found in the project{1}")]
    UnitNotFound(String, Hint),
    #[error("no declaration found for {0:?}{1}")]
    SymbolNotFound(String, Hint),
    #[error("no design units found under {0:?}")]
    NoUnitsFound(PathBuf),
    #[error("no root unit could be determined: every entity is instantiated somewhere{0}")]
    NoRootFound(Hint),
    #[error("multiple root units were found:\n{0}{1}")]
    MultipleRoots(String, Hint),
    #[error("no architecture found for unit {0:?}")]
    NoArchitectureFound(String),
    #[error("failed to read file {0:?}: {1}")]
    FileNotRead(PathBuf, LastError),
    #[error("no instantiation statements found in {0:?}")]
    NothingToAlign(PathBuf),
    #[error("failed to parse settings file: {0}")]
    SettingsNotParsed(LastError),
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = s.split_whitespace().into_iter().next().unwrap();
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    RootOption,
    PathOption,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::RootOption => "use the \"--root\" option to choose the unit to expand",
            Self::PathOption => "use the \"--path\" option to point at the project's source files",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowerize_keeps_acronyms() {
        assert_eq!(Error::lowerize(String::from("VHDL file")), "VHDL file");
        assert_eq!(Error::lowerize(String::from("File missing")), "file missing");
    }
}
