#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use linerate::libs::context::EngineContext;
    use linerate::libs::enrich::enrich;
    use linerate::libs::metrics::{
        bottleneck_index, compute_line_metrics, crew_for_shift, required_crew, stage_matches_equipment,
        LineMetrics, MetricsQuery, StaffingCallout,
    };
    use linerate::libs::model::{
        DowntimeEntry, LineSnapshot, RunEntry, ShiftName, ShiftSelection, ShiftWindowEntry, Stage, StageKind,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn approx(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "expected {}, got {}", expected, actual);
    }

    fn stages() -> Vec<Stage> {
        vec![
            Stage::new("filler", "Filler").crew(2.0, 1.0).max_throughput(6.0),
            Stage::new("capper", "Capper").crew(1.0, 1.0).max_throughput(10.0),
            Stage::new("conveyor", "Conveyor").kind(StageKind::Transfer).max_throughput(12.0),
        ]
    }

    fn snapshot() -> LineSnapshot {
        let mut snapshot = LineSnapshot::new("Line 2", stages());
        let mut day = ShiftWindowEntry::new(date(), ShiftName::Day, "06:00", "14:00");
        day.crew = 4.0;
        snapshot.shifts.push(day);
        snapshot.runs.push(RunEntry::new(date(), "500ml", "06:10", "10:35", 2850.0));
        snapshot.downtime.push(DowntimeEntry::new(date(), "08:10", "08:22").equipment("filler"));
        snapshot
    }

    fn metrics_for(snapshot: &LineSnapshot, shift: ShiftSelection) -> LineMetrics {
        let log = enrich(snapshot, &EngineContext::default());
        compute_line_metrics(&snapshot.stages, &log, MetricsQuery::new(date(), shift))
    }

    #[test]
    fn test_day_shift_metrics() {
        let metrics = metrics_for(&snapshot(), ShiftSelection::Day);
        let rate = 2850.0 / 253.0;

        approx(metrics.shift_mins, 480.0);
        approx(metrics.units, 2850.0);
        approx(metrics.total_downtime, 12.0);
        approx(metrics.net_run_rate, rate);
        assert!(metrics.has_activity);

        let filler = &metrics.stages[0];
        approx(filler.downtime, 12.0);
        approx(filler.uptime_ratio, 468.0 / 480.0);
        approx(filler.capacity, 12.0);
        approx(filler.utilisation, 100.0 * rate * (468.0 / 480.0) / 12.0);

        let capper = &metrics.stages[1];
        approx(capper.downtime, 0.0);
        approx(capper.uptime_ratio, 1.0);
        approx(capper.utilisation, 100.0 * rate / 10.0);

        let expected_util = metrics.stages.iter().map(|stage| stage.utilisation).sum::<f64>() / 3.0;
        approx(metrics.line_util, expected_util);
        assert_eq!(metrics.bottleneck_stage_name.as_deref(), Some("Capper"));
    }

    #[test]
    fn test_transfer_stage_defaults_to_one_crew() {
        let metrics = metrics_for(&snapshot(), ShiftSelection::Day);
        let conveyor = &metrics.stages[2];
        approx(conveyor.capacity, 12.0);
        assert!(conveyor.utilisation > 0.0);
        approx(conveyor.utilisation, 100.0 * (2850.0 / 253.0) / 12.0);
    }

    #[test]
    fn test_standard_stage_without_crew_has_no_capacity() {
        let mut snapshot = snapshot();
        snapshot.stages = vec![Stage::new("labeler", "Labeler").max_throughput(8.0)];

        let metrics = metrics_for(&snapshot, ShiftSelection::Day);
        approx(metrics.stages[0].capacity, 0.0);
        approx(metrics.stages[0].utilisation, 0.0);
        assert_eq!(metrics.bottleneck_stage_name, None);
    }

    #[test]
    fn test_staffing_for_single_shift() {
        let metrics = metrics_for(&snapshot(), ShiftSelection::Day);
        approx(metrics.required_crew, 3.0);
        approx(metrics.crew_on_shift, 4.0);
        approx(metrics.understaffed_by, 0.0);
        assert_eq!(metrics.staffing_callout, StaffingCallout::FullyStaffed);
        assert_eq!(metrics.staffing_callout.to_string(), "Fully staffed");
    }

    #[test]
    fn test_full_day_sums_requirements() {
        let metrics = metrics_for(&snapshot(), ShiftSelection::FullDay);
        approx(metrics.required_crew, 5.0);
        approx(metrics.crew_on_shift, 4.0);
        approx(metrics.understaffed_by, 1.0);
        assert_eq!(metrics.staffing_callout, StaffingCallout::Understaffed(1.0));
        assert_eq!(metrics.staffing_callout.to_string(), "Understaffed by 1");

        approx(metrics.units, 2850.0);
        approx(metrics.stages[0].capacity, 6.0 * 1.5);
    }

    #[test]
    fn test_fractional_shortfall_is_rounded_for_display() {
        assert_eq!(StaffingCallout::Understaffed(0.1 + 0.2).to_string(), "Understaffed by 0.3");
        assert_eq!(StaffingCallout::Understaffed(2.0000000001).to_string(), "Understaffed by 2");
        assert_eq!(StaffingCallout::Understaffed(3.0).to_string(), "Understaffed by 3");
    }

    #[test]
    fn test_shift_without_rows() {
        let metrics = metrics_for(&snapshot(), ShiftSelection::Night);
        assert_eq!(metrics.staffing_callout, StaffingCallout::NoShiftData);
        assert_eq!(metrics.staffing_callout.to_string(), "No shift data");
        approx(metrics.units, 0.0);
        approx(metrics.net_run_rate, 0.0);
        approx(metrics.line_util, 0.0);
        assert_eq!(metrics.bottleneck_stage_name, None);
        assert!(!metrics.has_activity);
    }

    #[test]
    fn test_latest_submitted_shift_row_sets_crew() {
        let mut snapshot = snapshot();
        let mut early = ShiftWindowEntry::new(date(), ShiftName::Day, "06:00", "14:00");
        early.crew = 5.0;
        early.submitted_at = date().and_hms_opt(7, 0, 0);
        let mut late = ShiftWindowEntry::new(date(), ShiftName::Day, "06:00", "14:00");
        late.crew = 2.0;
        late.submitted_at = date().and_hms_opt(8, 0, 0);
        snapshot.shifts = vec![late, early];

        let metrics = metrics_for(&snapshot, ShiftSelection::Day);
        approx(metrics.crew_on_shift, 2.0);
        assert_eq!(metrics.staffing_callout, StaffingCallout::Understaffed(1.0));
    }

    #[test]
    fn test_downtime_matched_through_equipment_reason() {
        let mut snapshot = snapshot();
        snapshot.downtime = vec![DowntimeEntry::new(date(), "09:00", "09:30").reason("Equipment > capper > jam")];

        let metrics = metrics_for(&snapshot, ShiftSelection::Day);
        approx(metrics.stages[0].downtime, 0.0);
        approx(metrics.stages[1].downtime, 30.0);
    }

    #[test]
    fn test_partial_overlap_is_weighted() {
        let mut snapshot = snapshot();
        snapshot.shifts.push(ShiftWindowEntry::new(date(), ShiftName::Night, "14:00", "22:00"));
        snapshot.runs = vec![RunEntry::new(date(), "1l", "13:00", "15:00", 1200.0)];
        snapshot.downtime.clear();

        let day = metrics_for(&snapshot, ShiftSelection::Day);
        let night = metrics_for(&snapshot, ShiftSelection::Night);
        let full = metrics_for(&snapshot, ShiftSelection::FullDay);
        approx(day.units, 600.0);
        approx(night.units, 600.0);
        approx(full.units, 1200.0);
        approx(day.net_run_rate, 10.0);
    }

    #[test]
    fn test_other_dates_are_ignored() {
        let snapshot = snapshot();
        let log = enrich(&snapshot, &EngineContext::default());
        let other = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let metrics = compute_line_metrics(&snapshot.stages, &log, MetricsQuery::new(other, ShiftSelection::FullDay));
        approx(metrics.units, 0.0);
        approx(metrics.shift_mins, 0.0);
        assert!(!metrics.has_activity);
    }

    #[test]
    fn test_bottleneck_tie_keeps_earliest_stage() {
        let mut snapshot = snapshot();
        snapshot.downtime.clear();
        snapshot.stages = vec![
            Stage::new("a", "Infeed").crew(1.0, 1.0).max_throughput(20.0),
            Stage::new("b", "Outfeed").crew(1.0, 1.0).max_throughput(20.0),
        ];

        let metrics = metrics_for(&snapshot, ShiftSelection::Day);
        approx(metrics.stages[0].utilisation, metrics.stages[1].utilisation);
        assert_eq!(metrics.bottleneck_stage_name.as_deref(), Some("Infeed"));
    }

    #[test]
    fn test_bottleneck_index() {
        assert_eq!(bottleneck_index(&[50.0, 50.0, 10.0]), Some(0));
        assert_eq!(bottleneck_index(&[10.0, 20.0, 20.0]), Some(1));
        assert_eq!(bottleneck_index(&[0.0, 0.0]), None);
        assert_eq!(bottleneck_index(&[]), None);
    }

    #[test]
    fn test_no_stages() {
        let mut snapshot = snapshot();
        snapshot.stages.clear();
        let metrics = metrics_for(&snapshot, ShiftSelection::Day);
        assert!(metrics.stages.is_empty());
        approx(metrics.line_util, 0.0);
        assert_eq!(metrics.bottleneck_stage_name, None);
        approx(metrics.required_crew, 0.0);
    }

    #[test]
    fn test_crew_helpers() {
        let stages = stages();
        approx(crew_for_shift(&stages[0], ShiftSelection::Day), 2.0);
        approx(crew_for_shift(&stages[0], ShiftSelection::Night), 1.0);
        approx(crew_for_shift(&stages[0], ShiftSelection::FullDay), 1.5);
        approx(crew_for_shift(&stages[2], ShiftSelection::Night), 1.0);

        approx(required_crew(&stages, ShiftSelection::Day), 3.0);
        approx(required_crew(&stages, ShiftSelection::Night), 2.0);
        approx(required_crew(&stages, ShiftSelection::FullDay), 5.0);

        let negative = vec![Stage::new("x", "X").crew(-3.0, f64::NAN)];
        approx(required_crew(&negative, ShiftSelection::FullDay), 0.0);
    }

    #[test]
    fn test_stage_matches_equipment() {
        let stage = Stage::new("filler", "Filler").match_term("bottle filler");
        assert!(stage_matches_equipment(&stage, "filler"));
        assert!(stage_matches_equipment(&stage, "FILLER"));
        assert!(stage_matches_equipment(&stage, "Main bottle filler #2"));
        assert!(!stage_matches_equipment(&stage, "bottle washer"));
        assert!(!stage_matches_equipment(&stage, "labeler"));
        assert!(!stage_matches_equipment(&stage, "  "));
    }
}
