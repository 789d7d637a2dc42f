#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use linerate::libs::model::{stage_display_name, DowntimeEntry, Stage};
    use linerate::libs::reason::{build_downtime_reason_text, parse_downtime_reason_parts, DowntimeReasonParts};

    fn parts(category: &str, detail: &str, note: &str) -> DowntimeReasonParts {
        DowntimeReasonParts {
            category: category.to_string(),
            detail: detail.to_string(),
            note: note.to_string(),
        }
    }

    #[test]
    fn test_build_reason_text() {
        assert_eq!(build_downtime_reason_text("Material", "", ""), "Material");
        assert_eq!(build_downtime_reason_text("Material", "Caps", ""), "Material > Caps");
        assert_eq!(
            build_downtime_reason_text("Equipment", "filler", "nozzle blocked"),
            "Equipment > filler > nozzle blocked"
        );
    }

    #[test]
    fn test_empty_category_degrades_to_note() {
        assert_eq!(build_downtime_reason_text("", "Caps", "waiting on forklift"), "waiting on forklift");
        assert_eq!(build_downtime_reason_text("  ", "", ""), "");
    }

    #[test]
    fn test_reason_round_trip() {
        let samples = [
            ("Material", "Caps", "late delivery"),
            ("Equipment", "filler", "nozzle blocked"),
            ("Quality", "Fill level", ""),
            ("Changeover", "", "new labels"),
        ];
        for (category, detail, note) in samples {
            let text = build_downtime_reason_text(category, detail, note);
            assert_eq!(parse_downtime_reason_parts(&text), parts(category, detail, note), "{}", text);
        }
    }

    #[test]
    fn test_parse_keeps_extra_separators_in_note() {
        let parsed = parse_downtime_reason_parts("Material > Caps > supplier > batch 12");
        assert_eq!(parsed, parts("Material", "Caps", "supplier > batch 12"));
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse_downtime_reason_parts("power cut"), parts("power cut", "", ""));
        assert!(parse_downtime_reason_parts("").is_empty());
    }

    #[test]
    fn test_equipment_reference() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let by_field = DowntimeEntry::new(date, "08:00", "08:10").equipment(" capper ");
        assert_eq!(by_field.equipment_ref(), Some("capper".to_string()));

        let by_reason = DowntimeEntry::new(date, "08:00", "08:10").reason("Equipment > filler > jam");
        assert!(by_reason.reason_parts().is_equipment());
        assert_eq!(by_reason.equipment_ref(), Some("filler".to_string()));

        let other = DowntimeEntry::new(date, "08:00", "08:10").reason("Material > Caps");
        assert_eq!(other.equipment_ref(), None);
    }

    #[test]
    fn test_stage_display_name() {
        let stages = vec![Stage::new("filler", "Filler"), Stage::new("cap-01", "Capper")];
        assert_eq!(stage_display_name(&stages, "filler"), "Filler");
        assert_eq!(stage_display_name(&stages, "Capper"), "Capper");
        assert_eq!(stage_display_name(&stages, "palletiser"), "palletiser");
    }
}
