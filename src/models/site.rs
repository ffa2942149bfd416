use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    LedModules,
    Sapphire,
}

impl Site {
    pub fn key(&self) -> &'static str {
        match self {
            Site::LedModules => "led_modules",
            Site::Sapphire => "sapphire",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_key() {
        assert_eq!(Site::LedModules.to_string(), "led_modules");
        assert_eq!(Site::Sapphire.key(), "sapphire");
    }
}
