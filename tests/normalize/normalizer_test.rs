#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use episode_quality::normalize::columns::*;
    use episode_quality::utils::sample::raw_episode;
    use episode_quality::{FieldValue, RawEpisodeRecord, normalize};

    #[test]
    fn test_date_formats() {
        let expected = FieldValue::Date(NaiveDate::from_ymd_opt(2020, 3, 4).unwrap());
        for text in ["2020-03-04", "04/03/2020", "20200304"] {
            let record = normalize(&RawEpisodeRecord::new(0).with(ADMISSION_DATE, text));
            assert_eq!(record.admission_date, Some(expected.clone()), "{text}");
        }
    }

    #[test]
    fn test_unparseable_values_keep_their_text() {
        let record = normalize(
            &RawEpisodeRecord::new(0)
                .with(ADMISSION_DATE, "soon")
                .with(MATERNAL_AGE, "thirty"),
        );
        assert_eq!(
            record.admission_date,
            Some(FieldValue::Text("soon".to_string()))
        );
        assert_eq!(
            record.maternal_age,
            Some(FieldValue::Text("thirty".to_string()))
        );
    }

    #[test]
    fn test_sex_and_birth_order_recoding() {
        let record = normalize(
            &raw_episode(0, "S030", "2020-03-04")
                .with(SEX, "U")
                .with_slot(BIRTH_ORDER, 1, "X"),
        );
        assert_eq!(record.sex, Some(FieldValue::Int(0)));
        assert_eq!(record.babies[0].birth_order, Some(FieldValue::Int(9)));
    }

    #[test]
    fn test_slot_columns_land_in_their_slot() {
        let record =
            normalize(&raw_episode(0, "S031", "2020-03-04").with_slot(BIRTH_WEIGHT, 3, "2100"));
        assert_eq!(record.babies[2].birth_weight, Some(FieldValue::Int(2100)));
        assert_eq!(record.babies[1].birth_weight, None);
        assert_eq!(record.baby_count(), Some(1));
    }

    #[test]
    fn test_identifiers_keep_leading_zeros() {
        let record = normalize(&raw_episode(0, "007", "2020-03-04").with(SITE_CODE, " 0042 "));
        assert_eq!(record.subject_id, Some(FieldValue::Text("007".to_string())));
        assert_eq!(record.site_code, Some(FieldValue::Text("0042".to_string())));
    }

    #[test]
    fn test_year_taken_from_column() {
        let record = normalize(&raw_episode(4, "S032", "2018-07-01"));
        assert_eq!(record.key.year, Some(2018));
        assert_eq!(record.key.row, 4);
        assert_eq!(record.year, Some(FieldValue::Int(2018)));
    }
}
