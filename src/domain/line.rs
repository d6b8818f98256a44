//! Line domain entity and transit mode.

use serde::{Deserialize, Serialize};

use crate::config::{MODE_BUS, MODE_METRO, MODE_TRAM};

/// Transit mode of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    Bus,
    Tram,
    Metro,
}

impl LineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineMode::Bus => MODE_BUS,
            LineMode::Tram => MODE_TRAM,
            LineMode::Metro => MODE_METRO,
        }
    }

    /// Single-letter prefix used in derived natural keys
    /// (`LINE_M_A`, `B_STOP_ALD`, ...)
    pub fn prefix(&self) -> &'static str {
        match self {
            LineMode::Bus => "B",
            LineMode::Tram => "T",
            LineMode::Metro => "M",
        }
    }
}

impl From<&str> for LineMode {
    fn from(s: &str) -> Self {
        match s {
            MODE_METRO => LineMode::Metro,
            MODE_TRAM => LineMode::Tram,
            _ => LineMode::Bus,
        }
    }
}

impl std::fmt::Display for LineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transit line. Owns its itinerary (stop_times) and weekly schedule;
/// both cascade on delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub line_id: String,
    pub code: String,
    pub name: String,
    pub mode: LineMode,
    pub active: bool,
}

/// Line creation data
#[derive(Debug, Clone)]
pub struct NewLine {
    pub code: String,
    pub name: String,
    pub mode: LineMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_prefixes() {
        assert_eq!(LineMode::Metro.prefix(), "M");
        assert_eq!(LineMode::Bus.prefix(), "B");
        assert_eq!(LineMode::Tram.prefix(), "T");
    }

    #[test]
    fn mode_parses_from_column_value() {
        assert_eq!(LineMode::from("metro"), LineMode::Metro);
        assert_eq!(LineMode::from("tram"), LineMode::Tram);
        assert_eq!(LineMode::from("bus"), LineMode::Bus);
    }
}
