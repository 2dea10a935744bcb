#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use episode_quality::loader::{load_csv, read_csv};
    use episode_quality::{FieldValue, ScoringEngine, ScoringError, normalize_all};

    const EPISODES: &str = "\
year,subject_id,site_code,episode_start,episode_end,episode_order,admission_date,sex,number_of_babies,birth_status_1,birth_weight_1
2020,S001,RX1,2020-02-03,2020-02-05,1,2020-02-03,F,1,1,3400
2020,S001,RX1,2020-02-03,2020-02-05,1,2020-02-03,F,1,1,3400
2019,S002,RX1,03/11/2019,05/11/2019,,03/11/2019,M,2,1,
";

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "episode-quality-{}-{name}",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_and_normalize() {
        let raw = read_csv(EPISODES.as_bytes()).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[2].row, 0);

        let records = normalize_all(&raw);
        assert_eq!(records[0].key.year, Some(2020));
        assert_eq!(records[1].key.row, 1);
        assert_eq!(records[2].sex, Some(FieldValue::Int(1)));
        assert_eq!(records[2].episode_order, Some(FieldValue::Int(98)));
        assert!(matches!(records[2].admission_date, Some(FieldValue::Date(_))));
        assert_eq!(records[2].babies[0].birth_weight, None);
    }

    #[test]
    fn test_load_file_and_score() {
        let path = temp_file("episodes.csv", EPISODES);
        let raw = load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let output = ScoringEngine::default().score_raw(&raw).unwrap();
        assert_eq!(output.len(), 3);
        assert_eq!(output.families.family_count, 2);
        assert_eq!(output.families.duplicate_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("episode-quality-does-not-exist.csv");
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, ScoringError::Io(_)));
    }
}
