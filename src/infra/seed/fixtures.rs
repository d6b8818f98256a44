//! Static seed fixtures: the Porto reference network.
//!
//! Everything here is deterministic. Row identifiers are derived from
//! the fixtures through `domain::keys`, so re-running the loader finds
//! the same keys and skips existing rows.

use once_cell::sync::Lazy;

use crate::domain::keys::line_key;
use crate::domain::LineMode;

/// One stop on a line's itinerary, with its offset from the line start
pub struct StopFixture {
    /// Short code; the stored code and id carry the mode prefix
    pub short: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub offset_seconds: i32,
}

/// One seeded line with its itinerary and weekly service pattern
pub struct LineFixture {
    pub code: &'static str,
    pub name: &'static str,
    pub mode: LineMode,
    pub itinerary: &'static [StopFixture],
    /// Headway for dow 0..=4
    pub weekday_headway: i32,
    /// Headway for dow 5..=6
    pub weekend_headway: i32,
    /// First departure (hour, minute)
    pub service_start: (u32, u32),
    /// Last departure (hour, minute)
    pub service_end: (u32, u32),
}

/// The seeded network. Stops shared between lines (Trindade, Aliados)
/// appear in each itinerary and are inserted once.
pub static NETWORK: &[LineFixture] = &[
    LineFixture {
        code: "A",
        name: "Linha A (Azul)",
        mode: LineMode::Metro,
        itinerary: &[
            StopFixture { short: "DRG", name: "Estádio do Dragão", lat: 41.1617, lon: -8.5850, offset_seconds: 0 },
            StopFixture { short: "CMP", name: "Campanhã", lat: 41.1503, lon: -8.5857, offset_seconds: 240 },
            StopFixture { short: "TRD", name: "Trindade", lat: 41.1522, lon: -8.6090, offset_seconds: 600 },
            StopFixture { short: "CDM", name: "Casa da Música", lat: 41.1605, lon: -8.6300, offset_seconds: 900 },
            StopFixture { short: "SHR", name: "Senhora da Hora", lat: 41.1740, lon: -8.6510, offset_seconds: 1260 },
        ],
        weekday_headway: 6,
        weekend_headway: 10,
        service_start: (6, 0),
        service_end: (23, 30),
    },
    LineFixture {
        code: "D",
        name: "Linha D (Amarela)",
        mode: LineMode::Metro,
        itinerary: &[
            StopFixture { short: "SJO", name: "Hospital São João", lat: 41.1825, lon: -8.6015, offset_seconds: 0 },
            StopFixture { short: "MRQ", name: "Marquês", lat: 41.1640, lon: -8.6050, offset_seconds: 300 },
            StopFixture { short: "TRD", name: "Trindade", lat: 41.1522, lon: -8.6090, offset_seconds: 660 },
            StopFixture { short: "SBE", name: "São Bento", lat: 41.1456, lon: -8.6109, offset_seconds: 900 },
            StopFixture { short: "JDM", name: "Jardim do Morro", lat: 41.1333, lon: -8.6095, offset_seconds: 1200 },
        ],
        weekday_headway: 5,
        weekend_headway: 8,
        service_start: (6, 0),
        service_end: (23, 30),
    },
    LineFixture {
        code: "200",
        name: "Bus 200 (Bolhão – Hospital São João)",
        mode: LineMode::Bus,
        itinerary: &[
            StopFixture { short: "ALD", name: "Aliados", lat: 41.1486, lon: -8.6110, offset_seconds: 0 },
            StopFixture { short: "BLH", name: "Bolhão", lat: 41.1492, lon: -8.6060, offset_seconds: 300 },
            StopFixture { short: "MRQ", name: "Marquês", lat: 41.1618, lon: -8.6037, offset_seconds: 660 },
            StopFixture { short: "SJO", name: "Hospital São João", lat: 41.1825, lon: -8.6015, offset_seconds: 1080 },
        ],
        weekday_headway: 15,
        weekend_headway: 25,
        service_start: (6, 30),
        service_end: (22, 30),
    },
    LineFixture {
        code: "500",
        name: "Bus 500 (Aliados – Matosinhos)",
        mode: LineMode::Bus,
        itinerary: &[
            StopFixture { short: "ALD", name: "Aliados", lat: 41.1486, lon: -8.6110, offset_seconds: 0 },
            StopFixture { short: "SBN", name: "São Bento", lat: 41.1456, lon: -8.6109, offset_seconds: 420 },
            StopFixture { short: "RIB", name: "Ribeira", lat: 41.1407, lon: -8.6110, offset_seconds: 840 },
            StopFixture { short: "FOZ", name: "Foz", lat: 41.1503, lon: -8.6716, offset_seconds: 1260 },
            StopFixture { short: "MPR", name: "Matosinhos Praia", lat: 41.1772, lon: -8.6905, offset_seconds: 1680 },
        ],
        weekday_headway: 12,
        weekend_headway: 20,
        service_start: (6, 30),
        service_end: (23, 0),
    },
    LineFixture {
        code: "1",
        name: "Tram 1 (Linha da Ribeira)",
        mode: LineMode::Tram,
        itinerary: &[
            StopFixture { short: "INF", name: "Infante", lat: 41.1404, lon: -8.6158, offset_seconds: 0 },
            StopFixture { short: "ALF", name: "Alfândega", lat: 41.1430, lon: -8.6215, offset_seconds: 240 },
            StopFixture { short: "MCE", name: "Museu do Carro Eléctrico", lat: 41.1470, lon: -8.6330, offset_seconds: 480 },
            StopFixture { short: "PAL", name: "Passeio Alegre", lat: 41.1477, lon: -8.6650, offset_seconds: 780 },
        ],
        weekday_headway: 30,
        weekend_headway: 30,
        service_start: (8, 0),
        service_end: (19, 0),
    },
];

/// Derived line ids of the seeded network, in fixture order
pub static SEED_LINE_IDS: Lazy<Vec<String>> =
    Lazy::new(|| NETWORK.iter().map(|l| line_key(l.mode, l.code)).collect());

/// Fixed vehicle model and capacity for each mode
pub fn vehicle_profile(mode: LineMode) -> (&'static str, i32) {
    match mode {
        LineMode::Metro => ("CRRC Tram", 244),
        LineMode::Bus => ("Mercedez-Benz Citaro", 44),
        LineMode::Tram => ("Brill 28", 30),
    }
}

/// Name pool for generated drivers, rotated deterministically
pub static DRIVER_NAMES: &[&str] = &[
    "Ana Pereira",
    "Bruno Carvalho",
    "Carla Nogueira",
    "Diogo Ferreira",
    "Elsa Martins",
    "Fábio Sousa",
    "Helena Ramos",
    "Joaquim Teixeira",
    "Marta Pinto",
    "Rui Azevedo",
];

/// Deterministic driver name for (line position, 1-based driver index)
pub fn driver_name(line_index: usize, driver_index: u8) -> &'static str {
    DRIVER_NAMES[(line_index * 2 + (driver_index as usize - 1)) % DRIVER_NAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::itinerary::offsets_strictly_increasing;

    #[test]
    fn every_itinerary_is_strictly_increasing() {
        for line in NETWORK {
            let offsets: Vec<i32> = line.itinerary.iter().map(|s| s.offset_seconds).collect();
            assert!(
                offsets_strictly_increasing(&offsets),
                "itinerary of {} is not strictly increasing",
                line.code
            );
        }
    }

    #[test]
    fn line_500_matches_the_documented_itinerary() {
        let line = NETWORK.iter().find(|l| l.code == "500").unwrap();
        let got: Vec<(&str, i32)> = line
            .itinerary
            .iter()
            .map(|s| (s.name, s.offset_seconds))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Aliados", 0),
                ("São Bento", 420),
                ("Ribeira", 840),
                ("Foz", 1260),
                ("Matosinhos Praia", 1680),
            ]
        );
    }

    #[test]
    fn vehicle_profiles_are_fixed_by_mode() {
        assert_eq!(vehicle_profile(LineMode::Metro), ("CRRC Tram", 244));
        assert_eq!(vehicle_profile(LineMode::Bus), ("Mercedez-Benz Citaro", 44));
    }

    #[test]
    fn seed_line_ids_follow_the_key_pattern() {
        assert!(SEED_LINE_IDS.contains(&"LINE_M_A".to_string()));
        assert!(SEED_LINE_IDS.contains(&"LINE_B_500".to_string()));
        assert!(SEED_LINE_IDS.contains(&"LINE_T_1".to_string()));
    }

    #[test]
    fn headways_are_positive() {
        for line in NETWORK {
            assert!(line.weekday_headway > 0);
            assert!(line.weekend_headway > 0);
        }
    }
}
