#[cfg(test)]
mod tests {
    use std::fs;

    use episode_quality::ScoringEngine;
    use episode_quality::export::{
        FAMILIES_FILE, NORMALIZED_SCORES_FILE, RAW_SCORES_FILE, YEARLY_FACTORS_FILE, write_all,
    };
    use episode_quality::utils::sample::sample_raw_records;

    #[test]
    fn test_write_all_creates_every_table() {
        let output = ScoringEngine::default()
            .score_raw(&sample_raw_records())
            .unwrap();
        let dir = std::env::temp_dir()
            .join(format!("episode-quality-export-{}", std::process::id()));

        let written = write_all(&output, &dir).unwrap();
        assert_eq!(written.len(), 4);
        for name in [
            RAW_SCORES_FILE,
            NORMALIZED_SCORES_FILE,
            FAMILIES_FILE,
            YEARLY_FACTORS_FILE,
        ] {
            assert!(dir.join(name).exists(), "{name} was not written");
        }

        let raw = fs::read_to_string(dir.join(RAW_SCORES_FILE)).unwrap();
        assert_eq!(raw.lines().count(), output.len() + 1);
        let families = fs::read_to_string(dir.join(FAMILIES_FILE)).unwrap();
        assert!(families.starts_with("year,row,family_id"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
