#[cfg(test)]
mod tests {
    use episode_quality::algorithm::rules::intra::{Applicability, applicability};
    use episode_quality::algorithm::rules::{
        WeightBand, WeightBandTable, check_catalog, score_inter_record,
    };
    use episode_quality::algorithm::rules::inter::{classify_interval, weeks_between};
    use episode_quality::algorithm::rules::plausibility::weight_plausibility_with;
    use episode_quality::models::find_score;
    use episode_quality::normalize::columns::*;
    use episode_quality::utils::sample::raw_episode;
    use episode_quality::utils::test::scores_by_name;
    use episode_quality::{FieldValue, RecordKey, Score, Tier, detect_families, normalize};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_catalog_tiers() {
        let catalog = check_catalog();
        let count = |tier: Tier| catalog.iter().filter(|c| c.tier == tier).count();
        assert_eq!(count(Tier::Field), 13);
        assert_eq!(count(Tier::Intra), 1 + 3 * 11);
        assert_eq!(count(Tier::Inter), 2);
    }

    #[test]
    fn test_clean_record_scores_valid_everywhere() {
        let record = normalize(&raw_episode(0, "S020", "2020-05-05"));
        let scores = episode_quality::score_record(&record);
        let by_name = scores_by_name(&scores);
        assert!(
            by_name.values().all(|&score| score == Score::Valid),
            "{by_name:?}"
        );
    }

    #[test]
    fn test_twins_require_second_slot() {
        let record = normalize(&raw_episode(0, "S021", "2020-05-05").with(NUMBER_OF_BABIES, "2"));
        assert_eq!(applicability(&record, 2), Applicability::Required);
        assert_eq!(applicability(&record, 3), Applicability::Forbidden);

        let scores = episode_quality::score_record(&record);
        assert_eq!(find_score(&scores, "birth_weight_2"), Some(Score::Blank));
        assert_eq!(find_score(&scores, "birth_weight_3"), Some(Score::Valid));
    }

    #[test]
    fn test_unknown_baby_count_leaves_slots_undetermined() {
        let record = normalize(&raw_episode(0, "S022", "2020-05-05").with(NUMBER_OF_BABIES, "9"));
        assert_eq!(applicability(&record, 1), Applicability::Undetermined);

        let scores = episode_quality::score_record(&record);
        assert_eq!(find_score(&scores, "number_of_babies"), Some(Score::Unknown));
        assert_eq!(find_score(&scores, "birth_weight_1"), Some(Score::Valid));
        assert_eq!(find_score(&scores, "birth_weight_2"), Some(Score::Valid));
    }

    #[test]
    fn test_interval_boundaries() {
        assert_eq!(weeks_between(date(2020, 1, 1), date(2020, 1, 6)), 0);
        assert_eq!(classify_interval(22), Score::Infeasible);
        assert_eq!(classify_interval(23), Score::Doubtful);
        assert_eq!(classify_interval(25), Score::Doubtful);
        assert_eq!(classify_interval(26), Score::Valid);
    }

    #[test]
    fn test_interval_uses_admission_order_not_input_order() {
        let records: Vec<_> = [
            raw_episode(0, "S023", "2021-02-01"),
            raw_episode(1, "S023", "2020-09-01"),
        ]
        .iter()
        .map(normalize)
        .collect();
        let families = detect_families(&records);
        let scores = score_inter_record(&records, &families);

        let later = &scores[&RecordKey {
            year: Some(2021),
            row: 0,
        }];
        let earlier = &scores[&RecordKey {
            year: Some(2020),
            row: 1,
        }];
        // 153 days is 21 whole weeks.
        assert_eq!(find_score(later, "birth_interval"), Some(Score::Infeasible));
        assert_eq!(find_score(earlier, "birth_interval"), Some(Score::Valid));
    }

    #[test]
    fn test_maternal_age_zero_is_illegal() {
        let record = normalize(&raw_episode(0, "S025", "2020-05-05").with(MATERNAL_AGE, "0"));
        let scores = episode_quality::score_record(&record);
        assert_eq!(find_score(&scores, "maternal_age"), Some(Score::Illegal));
    }

    #[test]
    fn test_interval_of_twenty_three_weeks_is_doubtful() {
        let records: Vec<_> = [
            raw_episode(0, "S026", "2020-01-01"),
            raw_episode(1, "S026", "2020-06-10"),
        ]
        .iter()
        .map(normalize)
        .collect();
        let families = detect_families(&records);
        let scores = score_inter_record(&records, &families);

        // 161 days is 23 whole weeks.
        let second = &scores[&records[1].key];
        assert_eq!(find_score(second, "birth_interval"), Some(Score::Doubtful));
        let first = &scores[&records[0].key];
        assert_eq!(find_score(first, "birth_interval"), Some(Score::Valid));
    }

    #[test]
    fn test_baby_count_outside_slot_range_is_gated_literally() {
        let seven = normalize(&raw_episode(0, "S027", "2020-05-05").with(NUMBER_OF_BABIES, "7"));
        assert_eq!(applicability(&seven, 3), Applicability::Required);

        let negative =
            normalize(&raw_episode(0, "S028", "2020-05-05").with(NUMBER_OF_BABIES, "-1"));
        assert_eq!(applicability(&negative, 1), Applicability::Forbidden);
        let scores = episode_quality::score_record(&negative);
        assert_eq!(find_score(&scores, "birth_weight_1"), Some(Score::Illegal));
    }

    #[test]
    fn test_stillbirth_is_exempt_from_interval() {
        let records: Vec<_> = [
            raw_episode(0, "S024", "2020-01-01"),
            raw_episode(1, "S024", "2020-03-01").with_slot(BIRTH_STATUS, 1, "2"),
        ]
        .iter()
        .map(normalize)
        .collect();
        let families = detect_families(&records);
        let scores = score_inter_record(&records, &families);

        let second = &scores[&records[1].key];
        assert_eq!(find_score(second, "birth_interval"), Some(Score::Valid));
    }

    #[test]
    fn test_custom_weight_band_table() {
        let table = WeightBandTable::new(vec![WeightBand::new(2, 30, 1000, 1800)]);
        let live = FieldValue::Int(1);
        let weeks = FieldValue::Int(30);
        let female = FieldValue::Int(2);

        let inside = weight_plausibility_with(
            &table,
            Some(&live),
            Some(&weeks),
            Some(&female),
            Some(&FieldValue::Int(1500)),
        );
        let outside = weight_plausibility_with(
            &table,
            Some(&live),
            Some(&weeks),
            Some(&female),
            Some(&FieldValue::Int(2500)),
        );
        assert_eq!(inside, Score::Valid);
        assert_eq!(outside, Score::Infeasible);
    }
}
