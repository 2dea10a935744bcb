#[cfg(test)]
mod tests {
    use episode_quality::algorithm::rules::check_catalog;
    use episode_quality::normalize::columns::YEAR;
    use episode_quality::utils::sample::{raw_episode, sample_raw_records};
    use episode_quality::{
        RecordKey, Score, ScoringConfig, ScoringEngine, ScoringError, ScoringOutput,
        WeightingConstants,
    };

    fn run_sample() -> ScoringOutput {
        ScoringEngine::default()
            .score_raw(&sample_raw_records())
            .unwrap()
    }

    fn score_of(output: &ScoringOutput, year: i32, row: usize, check: &str) -> Score {
        let index = output
            .position(RecordKey {
                year: Some(year),
                row,
            })
            .unwrap();
        let raw = &output.raw[index];
        raw.check(check).unwrap().score
    }

    #[test]
    fn test_triplicate_admission_is_one_family() {
        let output = run_sample();

        for row in 0..3 {
            assert_eq!(score_of(&output, 2020, row, "duplicate"), Score::Illegal);
        }
        let first = output.families.get(0).unwrap();
        assert_eq!(first.family_size, 3);
        assert!(first.keep_first);
        // Row 2 is missing its ethnicity, so only rows 0 and 1 are the fullest.
        let flags: Vec<bool> = output.families.annotations[..3]
            .iter()
            .map(|a| a.keep_max_filled)
            .collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_five_day_birth_interval_is_infeasible() {
        let output = run_sample();
        assert_eq!(score_of(&output, 2020, 3, "birth_interval"), Score::Valid);
        assert_eq!(
            score_of(&output, 2020, 4, "birth_interval"),
            Score::Infeasible
        );
    }

    #[test]
    fn test_overweight_preterm_baby_is_infeasible() {
        let output = run_sample();
        assert_eq!(
            score_of(&output, 2020, 5, "weight_plausibility_1"),
            Score::Infeasible
        );
        assert_eq!(score_of(&output, 2020, 5, "birth_weight_1"), Score::Valid);
    }

    #[test]
    fn test_male_mother_is_infeasible() {
        let output = run_sample();
        assert_eq!(score_of(&output, 2020, 6, "sex"), Score::Infeasible);
    }

    #[test]
    fn test_populated_slot_beyond_baby_count_is_illegal() {
        let output = run_sample();
        assert_eq!(score_of(&output, 2020, 7, "birth_weight_2"), Score::Illegal);
        assert_eq!(score_of(&output, 2020, 7, "baby_sex_2"), Score::Illegal);
        assert_eq!(score_of(&output, 2020, 7, "birth_date_2"), Score::Valid);
    }

    #[test]
    fn test_every_record_has_the_full_catalog() {
        let output = run_sample();
        let catalog = check_catalog();

        for raw in &output.raw {
            assert_eq!(raw.checks.len(), catalog.len());
            for (check, definition) in raw.checks.iter().zip(&catalog) {
                assert_eq!(check.name, definition.name);
                assert_eq!(check.tier, definition.tier);
                assert!((1..=8).contains(&check.score.value()));
            }
        }
    }

    #[test]
    fn test_totals_are_sums_of_weighted_checks() {
        let output = run_sample();

        for raw in &output.raw {
            let sum: u64 = raw.checks.iter().map(|c| c.weighted).sum();
            assert_eq!(raw.total_record_score, sum);
        }
        for normalized in &output.normalized {
            let sum: f64 = normalized.checks.iter().map(|c| c.weighted).sum();
            assert!((normalized.total_record_score - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_factors_are_within_unit_interval() {
        let output = run_sample();
        for entry in &output.yearly.entries {
            assert!(entry.factor > 0.0 && entry.factor <= 1.0, "{entry:?}");
        }
    }

    #[test]
    fn test_perfect_check_is_not_rescaled() {
        let output = run_sample();
        // Every 2019 record has a clean subject identifier.
        assert_eq!(output.yearly.factor(Some(2019), "subject_id"), Some(1.0));

        let index = output
            .position(RecordKey {
                year: Some(2019),
                row: 0,
            })
            .unwrap();
        let raw = output.raw[index].check("subject_id").unwrap().weighted;
        let normalized = output.normalized[index].check("subject_id").unwrap().weighted;
        assert!((normalized - raw as f64).abs() < 1e-9);
    }

    #[test]
    fn test_episode_type_code_out_of_range() {
        let output = run_sample();
        assert_eq!(score_of(&output, 2019, 1, "episode_type"), Score::Illegal);
        // Half the 2019 records are illegal: mean of 8 and 1, over a ceiling of 8.
        let factor = output.yearly.factor(Some(2019), "episode_type").unwrap();
        assert!((factor - 4.5 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights_scale_tiers() {
        let weights = WeightingConstants::new(2, 20, 200).unwrap();
        let output = ScoringEngine::new(ScoringConfig::new().with_weights(weights))
            .run(episode_quality::normalize_all(&[raw_episode(
                0,
                "S100",
                "2021-03-04",
            )]))
            .unwrap();

        let raw = &output.raw[0];
        assert_eq!(raw.check("year").unwrap().weighted, 16);
        assert_eq!(raw.check("episode_dates").unwrap().weighted, 160);
        assert_eq!(raw.check("duplicate").unwrap().weighted, 1600);
    }

    #[test]
    fn test_large_inter_weight_keeps_factors_in_range() {
        let weights = WeightingConstants::new(1, 10, 600_000_000).unwrap();
        let output = ScoringEngine::new(ScoringConfig::new().with_weights(weights))
            .score_raw(&sample_raw_records())
            .unwrap();

        for entry in &output.yearly.entries {
            assert!(entry.factor > 0.0 && entry.factor <= 1.0, "{entry:?}");
        }
        assert_eq!(output.yearly.factor(Some(2019), "duplicate"), Some(1.0));
    }

    #[test]
    fn test_extreme_year_values_are_scored() {
        let raw = [
            raw_episode(0, "S101", "2020-01-01").with(YEAR, "-2147483648"),
            raw_episode(1, "S102", "2020-01-01").with(YEAR, "2147483647"),
        ];
        let output = ScoringEngine::default().score_raw(&raw).unwrap();

        assert_eq!(output.raw.len(), 2);
        assert_eq!(output.raw[0].key.year, Some(i32::MIN));
        assert_eq!(
            output.raw[1].check("date_of_birth").unwrap().score,
            Score::Infeasible
        );
    }

    #[test]
    fn test_missing_weights_abort_the_run() {
        let result =
            ScoringEngine::new(ScoringConfig::unweighted()).score_raw(&sample_raw_records());
        assert!(matches!(result, Err(ScoringError::MissingWeights)));
    }
}
