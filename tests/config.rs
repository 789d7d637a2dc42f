#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use linerate::libs::config::{Config, EngineConfig};
    use linerate::libs::data_storage::DataStorage;
    use linerate::libs::model::ShiftSelection;
    use linerate::libs::trend::TrendRange;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the user's home/appdata directory at a temporary directory.
    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { temp_dir }
        }
    }

    #[test]
    fn test_default_engine_config() {
        let engine = Config::default().engine_or_default();
        assert!(engine.extrapolate_open_shifts);
        assert_eq!(engine.default_shift, ShiftSelection::FullDay);
        assert_eq!(engine.default_range, TrendRange::Week);
        assert_eq!(engine.top_reasons, 5);
    }

    #[test]
    fn test_engine_context() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let engine = EngineConfig {
            extrapolate_open_shifts: false,
            ..EngineConfig::default()
        };
        let ctx = engine.context(now);
        assert_eq!(ctx.now, Some(now));
        assert!(!ctx.extrapolate_open_shifts);
    }

    #[test]
    fn test_config_json_shape() {
        let config = Config {
            engine: Some(EngineConfig {
                extrapolate_open_shifts: true,
                default_shift: ShiftSelection::FullDay,
                default_range: TrendRange::Quarter,
                top_reasons: 3,
            }),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["engine"]["default_shift"], "Full Day");
        assert_eq!(json["engine"]["default_range"], "quarter");

        let empty = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(empty, "{}");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            engine: Some(EngineConfig {
                extrapolate_open_shifts: false,
                default_shift: ShiftSelection::Night,
                default_range: TrendRange::Month,
                top_reasons: 8,
            }),
        };
        config.save().unwrap();

        let path = DataStorage::new().get_path("config.json").unwrap();
        assert!(path.starts_with(ctx.temp_dir.path()));
        assert!(path.ends_with("linerate/config.json"));
        assert!(path.is_file());

        let read_config = Config::read().unwrap();
        assert_eq!(read_config, config);
        assert_eq!(read_config.engine_or_default().top_reasons, 8);
    }
}
