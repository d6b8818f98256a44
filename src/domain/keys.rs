//! Natural-key derivation for seeded rows.
//!
//! Seed data is identified by deterministic, human-readable keys so the
//! loader can re-run against a partially seeded database and skip rows
//! that already exist. External importers must preserve these keys
//! verbatim for idempotent re-seeding to keep working.

use super::line::LineMode;

/// `LINE_<mode-prefix>_<code>`, e.g. `LINE_M_A`
pub fn line_key(mode: LineMode, code: &str) -> String {
    format!("LINE_{}_{}", mode.prefix(), code)
}

/// `<mode-prefix>_STOP_<code>`, e.g. `M_STOP_TRD`
pub fn stop_key(mode: LineMode, code: &str) -> String {
    format!("{}_STOP_{}", mode.prefix(), code)
}

/// `VEH_<lineId>_<nn>`, e.g. `VEH_LINE_M_A_01`
pub fn vehicle_key(line_id: &str, index: u8) -> String {
    format!("VEH_{}_{:02}", line_id, index)
}

/// `DRV_<lineId>_<nn>`
pub fn driver_key(line_id: &str, index: u8) -> String {
    format!("DRV_{}_{:02}", line_id, index)
}

/// `ASG_<lineId>_<nn>`
pub fn assignment_key(line_id: &str, index: u8) -> String {
    format!("ASG_{}_{:02}", line_id, index)
}

/// `ST_<lineId>_<seq>`, seq is the 1-based visiting position
pub fn stop_time_key(line_id: &str, seq: usize) -> String {
    format!("ST_{}_{}", line_id, seq)
}

/// `LS_<lineId>_<dow>`
pub fn schedule_key(line_id: &str, dow: u8) -> String {
    format!("LS_{}_{}", line_id, dow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_documented_key_shapes() {
        let line = line_key(LineMode::Metro, "A");
        assert_eq!(line, "LINE_M_A");
        assert_eq!(vehicle_key(&line, 1), "VEH_LINE_M_A_01");
        assert_eq!(driver_key(&line, 2), "DRV_LINE_M_A_02");
        assert_eq!(assignment_key(&line, 1), "ASG_LINE_M_A_01");
        assert_eq!(stop_time_key(&line, 3), "ST_LINE_M_A_3");
        assert_eq!(schedule_key(&line, 6), "LS_LINE_M_A_6");
    }

    #[test]
    fn stop_keys_carry_the_network_prefix() {
        assert_eq!(stop_key(LineMode::Bus, "ALD"), "B_STOP_ALD");
        assert_eq!(stop_key(LineMode::Metro, "TRD"), "M_STOP_TRD");
        assert_eq!(stop_key(LineMode::Tram, "INF"), "T_STOP_INF");
    }
}
