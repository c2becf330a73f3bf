//! Derived numeric features.

use crate::types::Passenger;

/// Family members aboard including the passenger: `SibSp + Parch + 1`.
pub fn family_size(passenger: &Passenger) -> u32 {
    passenger.sib_sp + passenger.parch + 1
}

/// Attach `FamilySize` to every record.
pub(crate) fn attach_family_size(records: Vec<Passenger>) -> Vec<Passenger> {
    records
        .into_iter()
        .map(|mut p| {
            p.derived.family_size = Some(family_size(&p));
            p
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DerivedFields;

    fn passenger(sib_sp: u32, parch: u32) -> Passenger {
        Passenger {
            passenger_id: 1,
            survived: 1,
            pclass: 2,
            name: "Nasser, Mrs. Nicholas (Adele Achem)".to_string(),
            sex: "female".to_string(),
            age: Some(14.0),
            sib_sp,
            parch,
            ticket: "237736".to_string(),
            fare: Some(30.0708),
            cabin: None,
            embarked: Some("C".to_string()),
            derived: DerivedFields::default(),
        }
    }

    #[test]
    fn test_family_size_counts_passenger() {
        assert_eq!(family_size(&passenger(0, 0)), 1);
        assert_eq!(family_size(&passenger(1, 0)), 2);
        assert_eq!(family_size(&passenger(3, 2)), 6);
    }

    #[test]
    fn test_attach_family_size() {
        let records = attach_family_size(vec![passenger(1, 2), passenger(0, 0)]);
        let sizes: Vec<Option<u32>> = records.iter().map(|p| p.derived.family_size).collect();
        assert_eq!(sizes, vec![Some(4), Some(1)]);
        assert!(records.iter().all(|p| p.derived.title.is_none()));
    }
}
