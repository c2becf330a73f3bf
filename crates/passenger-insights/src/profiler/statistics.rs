//! Summary statistics over a record set.

use crate::types::{
    AgeStats, ClassDistribution, GenderDistribution, MissingCount, MissingValueOverview,
    Passenger, StatisticsSummary,
};
use crate::utils::{mean, round_to, sort_ascending, upper_median};

/// Compute the statistics summary, or `None` for an empty record set.
///
/// An empty set is not an error: callers keep whatever summary they had.
pub fn summarize(records: &[Passenger]) -> Option<StatisticsSummary> {
    if records.is_empty() {
        return None;
    }

    let total_passengers = records.len();
    let survivors = records.iter().filter(|p| p.has_survived()).count();
    let survival_rate = survivors as f64 / total_passengers as f64 * 100.0;

    Some(StatisticsSummary {
        total_passengers,
        survival_rate,
        age_stats: age_stats(records),
        gender_distribution: GenderDistribution {
            male: records.iter().filter(|p| p.sex == "male").count(),
            female: records.iter().filter(|p| p.sex == "female").count(),
        },
        class_distribution: ClassDistribution {
            first: records.iter().filter(|p| p.pclass == 1).count(),
            second: records.iter().filter(|p| p.pclass == 2).count(),
            third: records.iter().filter(|p| p.pclass == 3).count(),
        },
    })
}

/// Age statistics over the non-null ages.
pub(crate) fn age_stats(records: &[Passenger]) -> AgeStats {
    let mut ages: Vec<f64> = records.iter().filter_map(|p| p.age).collect();
    let missing = records.len() - ages.len();
    sort_ascending(&mut ages);

    AgeStats {
        average: mean(&ages).map_or(0.0, |m| round_to(m, 2)),
        median: upper_median(&ages).unwrap_or(0.0),
        min: ages.first().copied().unwrap_or(0.0),
        max: ages.last().copied().unwrap_or(0.0),
        missing,
    }
}

/// Missing counts for Age, Embarked and Cabin.
pub fn missing_values(records: &[Passenger]) -> MissingValueOverview {
    let total = records.len();
    MissingValueOverview {
        total_records: total,
        age: MissingCount::new(records.iter().filter(|p| p.age.is_none()).count(), total),
        embarked: MissingCount::new(records.iter().filter(|p| p.embarked_missing()).count(), total),
        cabin: MissingCount::new(records.iter().filter(|p| p.cabin_missing()).count(), total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DerivedFields;
    use pretty_assertions::assert_eq;

    fn passenger(survived: u8, pclass: u8, sex: &str, age: Option<f64>) -> Passenger {
        Passenger {
            passenger_id: 0,
            survived,
            pclass,
            name: "Doe, Mr. John".to_string(),
            sex: sex.to_string(),
            age,
            sib_sp: 0,
            parch: 0,
            ticket: String::new(),
            fare: None,
            cabin: None,
            embarked: None,
            derived: DerivedFields::default(),
        }
    }

    #[test]
    fn test_summarize_empty_is_none() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_summarize_basic() {
        let records = vec![
            passenger(0, 3, "male", Some(22.0)),
            passenger(1, 1, "female", Some(38.0)),
            passenger(1, 3, "female", Some(26.0)),
            passenger(1, 1, "female", Some(35.0)),
            passenger(0, 3, "male", None),
        ];

        let summary = summarize(&records).unwrap();

        assert_eq!(summary.total_passengers, 5);
        assert_eq!(summary.survival_rate, 60.0);
        assert_eq!(
            summary.age_stats,
            AgeStats {
                average: 30.25,
                median: 35.0,
                min: 22.0,
                max: 38.0,
                missing: 1,
            }
        );
        assert_eq!(summary.gender_distribution, GenderDistribution { male: 2, female: 3 });
        assert_eq!(
            summary.class_distribution,
            ClassDistribution {
                first: 2,
                second: 0,
                third: 3
            }
        );
    }

    #[test]
    fn test_median_is_upper_middle_for_even_counts() {
        let records = vec![
            passenger(0, 3, "male", Some(10.0)),
            passenger(0, 3, "male", Some(40.0)),
            passenger(0, 3, "male", Some(20.0)),
            passenger(0, 3, "male", Some(30.0)),
        ];
        let stats = age_stats(&records);
        assert_eq!(stats.median, 30.0);
    }

    #[test]
    fn test_average_rounded_to_two_decimals() {
        let records = vec![
            passenger(0, 3, "male", Some(1.0)),
            passenger(0, 3, "male", Some(2.0)),
            passenger(0, 3, "male", Some(2.0)),
        ];
        assert_eq!(age_stats(&records).average, 1.67);
    }

    #[test]
    fn test_no_known_ages_defaults_to_zero() {
        let records = vec![passenger(1, 2, "female", None), passenger(0, 2, "male", None)];
        let summary = summarize(&records).unwrap();
        assert_eq!(
            summary.age_stats,
            AgeStats {
                average: 0.0,
                median: 0.0,
                min: 0.0,
                max: 0.0,
                missing: 2,
            }
        );
    }

    #[test]
    fn test_unknown_sex_and_class_are_excluded() {
        let records = vec![
            passenger(0, 4, "unknown", Some(30.0)),
            passenger(0, 2, "male", Some(30.0)),
        ];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.gender_distribution, GenderDistribution { male: 1, female: 0 });
        assert_eq!(
            summary.class_distribution,
            ClassDistribution {
                first: 0,
                second: 1,
                third: 0
            }
        );
        assert_eq!(summary.total_passengers, 2);
    }

    #[test]
    fn test_missing_values() {
        let mut with_cabin = passenger(0, 1, "male", None);
        with_cabin.cabin = Some("C85".to_string());
        with_cabin.embarked = Some("C".to_string());
        let mut empty_cabin = passenger(0, 1, "male", Some(40.0));
        empty_cabin.cabin = Some(String::new());

        let overview = missing_values(&[with_cabin, empty_cabin]);

        assert_eq!(overview.total_records, 2);
        assert_eq!(overview.age, MissingCount::new(1, 2));
        assert_eq!(overview.embarked, MissingCount::new(1, 2));
        assert_eq!(overview.cabin, MissingCount::new(1, 2));
        assert_eq!(overview.cabin.percentage, 50.0);
    }
}
