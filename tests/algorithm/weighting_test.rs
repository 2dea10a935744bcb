#[cfg(test)]
mod tests {
    use episode_quality::algorithm::weighting::weight_record;
    use episode_quality::{
        CheckScore, RecordKey, Score, Tier, WeightingConstants, apply_normalization,
        compute_yearly_averages, weight,
    };

    fn key(year: Option<i32>, row: usize) -> RecordKey {
        RecordKey { year, row }
    }

    fn checks(field: Score, intra: Score, inter: Score) -> Vec<CheckScore> {
        vec![
            CheckScore::new("site_code", Tier::Field, field),
            CheckScore::new("episode_dates", Tier::Intra, intra),
            CheckScore::new("duplicate", Tier::Inter, inter),
        ]
    }

    #[test]
    fn test_weighting_multiplies_by_tier() {
        let raw = weight_record(
            key(Some(2020), 0),
            &checks(Score::Blank, Score::Doubtful, Score::Illegal),
            &WeightingConstants::default(),
        );
        assert_eq!(raw.check("site_code").unwrap().weighted, 3);
        assert_eq!(raw.check("episode_dates").unwrap().weighted, 70);
        assert_eq!(raw.check("duplicate").unwrap().weighted, 100);
        assert_eq!(raw.total_record_score, 173);
    }

    #[test]
    fn test_years_are_normalized_independently() {
        let constants = WeightingConstants::default();
        let scores = vec![
            (key(Some(2019), 0), checks(Score::Valid, Score::Valid, Score::Valid)),
            (key(Some(2020), 0), checks(Score::Valid, Score::Valid, Score::Illegal)),
            (key(Some(2020), 1), checks(Score::Valid, Score::Valid, Score::Valid)),
        ];
        let raw = weight(&scores, &constants);
        let yearly = compute_yearly_averages(&raw);

        assert_eq!(yearly.factor(Some(2019), "duplicate"), Some(1.0));
        let factor = yearly.factor(Some(2020), "duplicate").unwrap();
        assert!((factor - 450.0 / 800.0).abs() < 1e-9);

        let normalized = apply_normalization(&raw, &yearly);
        assert!((normalized[0].total_record_score - raw[0].total_record_score as f64).abs() < 1e-9);
        let duplicate = normalized[1].check("duplicate").unwrap();
        assert!((duplicate.weighted - 100.0 * factor).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_year_forms_own_group() {
        let constants = WeightingConstants::default();
        let scores = vec![
            (key(None, 0), checks(Score::Blank, Score::Valid, Score::Valid)),
            (key(Some(2020), 0), checks(Score::Valid, Score::Valid, Score::Valid)),
        ];
        let raw = weight(&scores, &constants);
        let yearly = compute_yearly_averages(&raw);

        assert_eq!(yearly.years(), vec![None, Some(2020)]);
        let factor = yearly.factor(None, "site_code").unwrap();
        assert!((factor - 3.0 / 8.0).abs() < 1e-9);
        assert_eq!(yearly.factor(Some(2020), "site_code"), Some(1.0));
    }

    #[test]
    fn test_record_counts_and_means() {
        let constants = WeightingConstants::default();
        let scores = vec![
            (key(Some(2021), 0), checks(Score::Valid, Score::Blank, Score::Valid)),
            (key(Some(2021), 1), checks(Score::Valid, Score::Valid, Score::Valid)),
        ];
        let yearly = compute_yearly_averages(&weight(&scores, &constants));

        let entry = yearly.get(Some(2021), "episode_dates").unwrap();
        assert_eq!(entry.record_count, 2);
        assert_eq!(entry.tier, Tier::Intra);
        assert!((entry.mean_weighted - 55.0).abs() < 1e-9);
        assert_eq!(yearly.len(), 3);
    }
}
