//! Per-group survival aggregates backing the dashboard charts.

use crate::types::{ClassFareStats, GroupSurvival, Passenger, SurvivalBreakdowns};
use crate::utils::round_to;

const AGE_GROUPS: [&str; 7] = ["0-10", "11-20", "21-30", "31-40", "41-50", "51-60", "61+"];
const CLASS_NAMES: [&str; 3] = ["1st Class", "2nd Class", "3rd Class"];
const FARE_BAND_WIDTH: f64 = 30.0;
const FARE_BANDS: usize = 10;

/// Compute every breakdown in one call.
pub fn breakdowns(records: &[Passenger]) -> SurvivalBreakdowns {
    SurvivalBreakdowns {
        by_sex: survival_by_sex(records),
        by_class: survival_by_class(records),
        by_age_group: survival_by_age_group(records),
        by_fare_band: survival_by_fare_band(records),
        fare_by_class: fare_by_class(records),
    }
}

/// Female bucket for "female", Male bucket for everything else.
pub fn survival_by_sex(records: &[Passenger]) -> Vec<GroupSurvival> {
    let mut groups = vec![GroupSurvival::new("Female"), GroupSurvival::new("Male")];
    for p in records {
        let idx = usize::from(p.sex != "female");
        groups[idx].record(p.has_survived());
    }
    groups
}

/// Records outside classes 1-3 are skipped.
pub fn survival_by_class(records: &[Passenger]) -> Vec<GroupSurvival> {
    let mut groups: Vec<GroupSurvival> = CLASS_NAMES.iter().map(|n| GroupSurvival::new(*n)).collect();
    for p in records {
        if let Some(group) = class_index(p.pclass).and_then(|i| groups.get_mut(i)) {
            group.record(p.has_survived());
        }
    }
    groups
}

/// Decade buckets with everyone over 60 in the last one. Null ages are skipped.
pub fn survival_by_age_group(records: &[Passenger]) -> Vec<GroupSurvival> {
    let mut groups: Vec<GroupSurvival> = AGE_GROUPS.iter().map(|n| GroupSurvival::new(*n)).collect();
    for p in records {
        let Some(age) = p.age else { continue };
        let idx = ((age / 10.0).floor().max(0.0) as usize).min(AGE_GROUPS.len() - 1);
        groups[idx].record(p.has_survived());
    }
    groups
}

/// Fare bands of width 30, the last one open-ended. Empty bands are dropped.
pub fn survival_by_fare_band(records: &[Passenger]) -> Vec<GroupSurvival> {
    let mut groups: Vec<GroupSurvival> = (0..FARE_BANDS)
        .map(|i| {
            let low = i as f64 * FARE_BAND_WIDTH;
            if i + 1 < FARE_BANDS {
                GroupSurvival::new(format!("${}-{}", low, low + FARE_BAND_WIDTH))
            } else {
                GroupSurvival::new(format!("${}+", low))
            }
        })
        .collect();

    for p in records {
        let Some(fare) = p.fare else { continue };
        if fare < 0.0 {
            continue;
        }
        let idx = ((fare / FARE_BAND_WIDTH).floor() as usize).min(FARE_BANDS - 1);
        groups[idx].record(p.has_survived());
    }

    groups.retain(|g| g.total() > 0);
    groups
}

/// Min, max and mean fare per class over non-null fares.
pub fn fare_by_class(records: &[Passenger]) -> Vec<ClassFareStats> {
    (1..=3u8)
        .filter_map(|pclass| {
            let fares: Vec<f64> = records
                .iter()
                .filter(|p| p.pclass == pclass)
                .filter_map(|p| p.fare)
                .collect();
            if fares.is_empty() {
                return None;
            }
            let min = fares.iter().copied().fold(f64::INFINITY, f64::min);
            let max = fares.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let average = fares.iter().sum::<f64>() / fares.len() as f64;
            Some(ClassFareStats {
                pclass,
                min,
                max,
                average: round_to(average, 2),
                count: fares.len(),
            })
        })
        .collect()
}

fn class_index(pclass: u8) -> Option<usize> {
    match pclass {
        1..=3 => Some(usize::from(pclass - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DerivedFields;

    fn passenger(survived: u8, pclass: u8, sex: &str, age: Option<f64>, fare: Option<f64>) -> Passenger {
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
            fare,
            cabin: None,
            embarked: Some("S".to_string()),
            derived: DerivedFields::default(),
        }
    }

    #[test]
    fn test_survival_by_sex() {
        let records = vec![
            passenger(1, 1, "female", None, None),
            passenger(0, 1, "female", None, None),
            passenger(0, 3, "male", None, None),
            passenger(1, 3, "unknown", None, None),
        ];
        let groups = survival_by_sex(&records);
        assert_eq!(groups[0].name, "Female");
        assert_eq!((groups[0].survived, groups[0].died), (1, 1));
        assert_eq!((groups[1].survived, groups[1].died), (1, 1));
    }

    #[test]
    fn test_survival_by_class_skips_unknown_class() {
        let records = vec![
            passenger(1, 1, "female", None, None),
            passenger(0, 3, "male", None, None),
            passenger(0, 0, "male", None, None),
        ];
        let groups = survival_by_class(&records);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].survival_rate(), 100.0);
        assert_eq!(groups[1].total(), 0);
        assert_eq!(groups[2].died, 1);
    }

    #[test]
    fn test_survival_by_age_group_bounds() {
        let records = vec![
            passenger(1, 1, "female", Some(0.42), None),
            passenger(1, 1, "female", Some(10.0), None),
            passenger(0, 1, "male", Some(59.9), None),
            passenger(0, 1, "male", Some(80.0), None),
            passenger(0, 1, "male", None, None),
        ];
        let groups = survival_by_age_group(&records);
        assert_eq!(groups.len(), 7);
        assert_eq!(groups[0].total(), 1);
        assert_eq!(groups[1].total(), 1);
        assert_eq!(groups[5].total(), 1);
        assert_eq!(groups[6].name, "61+");
        assert_eq!(groups[6].total(), 1);
        let counted: usize = groups.iter().map(GroupSurvival::total).sum();
        assert_eq!(counted, 4);
    }

    #[test]
    fn test_survival_by_fare_band_drops_empty_bands() {
        let records = vec![
            passenger(1, 1, "female", None, Some(7.25)),
            passenger(0, 3, "male", None, Some(29.99)),
            passenger(1, 1, "female", None, Some(512.3292)),
            passenger(0, 3, "male", None, None),
        ];
        let groups = survival_by_fare_band(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "$0-30");
        assert_eq!(groups[0].total(), 2);
        assert_eq!(groups[1].name, "$270+");
        assert_eq!(groups[1].survived, 1);
    }

    #[test]
    fn test_fare_by_class() {
        let records = vec![
            passenger(1, 1, "female", None, Some(71.2833)),
            passenger(1, 1, "female", None, Some(53.1)),
            passenger(0, 3, "male", None, Some(7.25)),
            passenger(0, 3, "male", None, None),
        ];
        let stats = fare_by_class(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].pclass, 1);
        assert_eq!(stats[0].min, 53.1);
        assert_eq!(stats[0].max, 71.2833);
        assert_eq!(stats[0].average, 62.19);
        assert_eq!(stats[1].pclass, 3);
        assert_eq!(stats[1].count, 1);
    }

    #[test]
    fn test_breakdowns_on_empty_input() {
        let all = breakdowns(&[]);
        assert_eq!(all.by_sex.len(), 2);
        assert_eq!(all.by_class.len(), 3);
        assert!(all.by_fare_band.is_empty());
        assert!(all.fare_by_class.is_empty());
    }
}
