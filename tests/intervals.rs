#[cfg(test)]
mod tests {
    use linerate::libs::interval::{
        format_clock, merge_intervals, overlap_minutes, span_minutes, split_across_midnight, subtract_intervals, to_minutes,
        total_overlap, Interval,
    };

    #[test]
    fn test_to_minutes_clock_formats() {
        assert_eq!(to_minutes("00:00"), Some(0));
        assert_eq!(to_minutes("06:10"), Some(370));
        assert_eq!(to_minutes("6:05"), Some(365));
        assert_eq!(to_minutes("23:59"), Some(1439));
        assert_eq!(to_minutes("23:59:30"), Some(1439));
        assert_eq!(to_minutes(" 14:00 "), Some(840));
    }

    #[test]
    fn test_to_minutes_day_fraction() {
        assert_eq!(to_minutes("0"), Some(0));
        assert_eq!(to_minutes("0.25"), Some(360));
        assert_eq!(to_minutes("0.5"), Some(720));
    }

    #[test]
    fn test_to_minutes_malformed_input() {
        assert_eq!(to_minutes(""), None);
        assert_eq!(to_minutes("   "), None);
        assert_eq!(to_minutes("24:00"), None);
        assert_eq!(to_minutes("12:60"), None);
        assert_eq!(to_minutes("noon"), None);
        assert_eq!(to_minutes("1.5"), None);
        assert_eq!(to_minutes("-0.1"), None);
        assert_eq!(to_minutes("NaN"), None);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(370), "06:10");
        assert_eq!(format_clock(1439), "23:59");
        assert_eq!(format_clock(1440), "00:00");
    }

    #[test]
    fn test_split_same_day() {
        assert_eq!(split_across_midnight(Some(360), Some(840)), vec![Interval::new(360, 840)]);
    }

    #[test]
    fn test_split_across_midnight() {
        let parts = split_across_midnight(Some(1380), Some(30));
        assert_eq!(parts, vec![Interval::new(1380, 1440), Interval::new(0, 30)]);
        assert_eq!(parts.iter().map(Interval::len).sum::<i64>(), 90);
    }

    #[test]
    fn test_split_ending_at_midnight() {
        assert_eq!(split_across_midnight(Some(1380), Some(0)), vec![Interval::new(1380, 1440)]);
    }

    #[test]
    fn test_split_point_and_invalid_events() {
        assert!(split_across_midnight(Some(600), Some(600)).is_empty());
        assert!(split_across_midnight(None, Some(600)).is_empty());
        assert!(split_across_midnight(Some(600), None).is_empty());
        assert!(split_across_midnight(Some(-5), Some(600)).is_empty());
        assert!(split_across_midnight(Some(1440), Some(600)).is_empty());
    }

    #[test]
    fn test_span_minutes() {
        assert_eq!(span_minutes(Some(370), Some(635)), 265);
        assert_eq!(span_minutes(Some(1290), Some(25)), 175);
        assert_eq!(span_minutes(Some(600), Some(600)), 0);
        assert_eq!(span_minutes(None, None), 0);
    }

    #[test]
    fn test_merge_intervals_clips_sorts_and_merges() {
        let list = vec![
            Interval::new(300, 400),
            Interval::new(100, 180),
            Interval::new(60, 120),
            Interval::new(180, 200),
            Interval::new(-10, 20),
        ];
        let merged = merge_intervals(&list);
        assert_eq!(
            merged,
            vec![Interval::new(0, 20), Interval::new(60, 200), Interval::new(300, 400)]
        );
    }

    #[test]
    fn test_merge_intervals_drops_empty() {
        let list = vec![Interval::new(50, 50), Interval::new(1500, 1600), Interval::new(90, 10)];
        assert!(merge_intervals(&list).is_empty());
    }

    #[test]
    fn test_merge_intervals_is_idempotent() {
        let samples = vec![
            vec![],
            vec![Interval::new(0, 1440)],
            vec![Interval::new(1320, 1440), Interval::new(0, 360), Interval::new(350, 400)],
            vec![Interval::new(10, 20), Interval::new(20, 30), Interval::new(25, 26), Interval::new(1400, 1500)],
        ];
        for sample in samples {
            let once = merge_intervals(&sample);
            assert_eq!(merge_intervals(&once), once);
        }
    }

    #[test]
    fn test_overlap_minutes() {
        assert_eq!(overlap_minutes(&Interval::new(0, 100), &Interval::new(50, 200)), 50);
        assert_eq!(overlap_minutes(&Interval::new(0, 100), &Interval::new(100, 200)), 0);
        assert_eq!(overlap_minutes(&Interval::new(0, 100), &Interval::new(300, 400)), 0);
        assert_eq!(overlap_minutes(&Interval::new(10, 20), &Interval::new(0, 100)), 10);
    }

    #[test]
    fn test_total_overlap() {
        let segments = split_across_midnight(Some(1290), Some(25));
        let windows = vec![Interval::new(840, 1320)];
        assert_eq!(total_overlap(&segments, &windows), 30);
    }

    #[test]
    fn test_subtract_intervals() {
        let day = vec![Interval::new(360, 870)];
        let night = vec![Interval::new(840, 1320)];
        assert_eq!(subtract_intervals(&night, &day), vec![Interval::new(870, 1320)]);
        assert_eq!(subtract_intervals(&day, &[]), day);
        assert!(subtract_intervals(&day, &[Interval::new(0, 1440)]).is_empty());

        let holed = subtract_intervals(&[Interval::new(0, 600)], &[Interval::new(100, 200), Interval::new(150, 300)]);
        assert_eq!(holed, vec![Interval::new(0, 100), Interval::new(300, 600)]);
    }
}
