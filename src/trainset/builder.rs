use std::collections::HashMap;

use tracing::debug;

use crate::models::{RatingScale, RawRating, TestRating};
use crate::trainset::Trainset;

/// Assigns dense 0-based inner ids to raw ids in first-seen order.
/// The next id is always the current registry size, so ids are gapless.
#[derive(Debug, Default)]
struct IdRegistry {
    ids: HashMap<String, usize>,
}

impl IdRegistry {
    fn get_or_assign(&mut self, raw: &str) -> usize {
        match self.ids.get(raw) {
            Some(&inner) => inner,
            None => {
                let inner = self.ids.len();
                self.ids.insert(raw.to_owned(), inner);
                inner
            }
        }
    }

    fn into_map(self) -> HashMap<String, usize> {
        self.ids
    }
}

/// Single pass over raw records: remap both id spaces and build the
/// per-user and per-item adjacency lists in arrival order. The pass is a
/// pure structural transform, ratings are neither validated nor deduplicated.
pub fn build_trainset(records: &[RawRating], rating_scale: RatingScale) -> Trainset {
    let mut users = IdRegistry::default();
    let mut items = IdRegistry::default();
    let mut ur: Vec<Vec<(usize, f64)>> = Vec::new();
    let mut ir: Vec<Vec<(usize, f64)>> = Vec::new();

    for record in records {
        let uid = users.get_or_assign(&record.uid);
        if uid == ur.len() {
            ur.push(Vec::new());
        }
        let iid = items.get_or_assign(&record.iid);
        if iid == ir.len() {
            ir.push(Vec::new());
        }
        ur[uid].push((iid, record.rating));
        ir[iid].push((uid, record.rating));
    }

    debug!(
        n_users = ur.len(),
        n_items = ir.len(),
        n_ratings = records.len(),
        "constructed trainset"
    );

    Trainset::new(
        ur,
        ir,
        records.len(),
        rating_scale,
        users.into_map(),
        items.into_map(),
    )
}

/// Project raw records into raw-id testset entries. No id translation
/// happens and no trainset is involved, the timestamp is simply dropped.
pub fn build_testset(records: &[RawRating]) -> Vec<TestRating> {
    records
        .iter()
        .map(|r| (r.uid.clone(), r.iid.clone(), r.rating))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<RawRating> {
        vec![
            RawRating::new("u1", "i1", 3.0),
            RawRating::new("u1", "i2", 4.0),
            RawRating::new("u2", "i1", 5.0),
        ]
    }

    #[test]
    fn ids_are_assigned_in_first_seen_order() {
        let trainset = build_trainset(&records(), RatingScale::default());
        assert_eq!(trainset.n_users, 2);
        assert_eq!(trainset.n_items, 2);
        assert_eq!(trainset.n_ratings, 3);
        assert_eq!(trainset.to_inner_uid("u1").unwrap(), 0);
        assert_eq!(trainset.to_inner_uid("u2").unwrap(), 1);
        assert_eq!(trainset.to_inner_iid("i1").unwrap(), 0);
        assert_eq!(trainset.to_inner_iid("i2").unwrap(), 1);
    }

    #[test]
    fn adjacency_lists_stay_mutually_consistent() {
        let trainset = build_trainset(&records(), RatingScale::default());
        assert_eq!(trainset.ur()[0], vec![(0, 3.0), (1, 4.0)]);
        assert_eq!(trainset.ur()[1], vec![(0, 5.0)]);
        assert_eq!(trainset.ir()[0], vec![(0, 3.0), (1, 5.0)]);
        assert_eq!(trainset.ir()[1], vec![(0, 4.0)]);
    }

    #[test]
    fn duplicate_pairs_are_all_retained() {
        let mut records = records();
        records.push(RawRating::new("u1", "i1", 1.0));
        let trainset = build_trainset(&records, RatingScale::default());
        assert_eq!(trainset.n_ratings, 4);
        assert_eq!(trainset.ur()[0].len(), 3);
    }

    #[test]
    fn testset_projects_out_the_timestamp() {
        let records = vec![
            RawRating::new("u1", "i1", 3.0).with_timestamp("881250949"),
            RawRating::new("u2", "i2", 2.0),
        ];
        let testset = build_testset(&records);
        assert_eq!(
            testset,
            vec![
                ("u1".to_owned(), "i1".to_owned(), 3.0),
                ("u2".to_owned(), "i2".to_owned(), 2.0),
            ]
        );
    }

    #[test]
    fn empty_input_builds_an_empty_trainset() {
        let trainset = build_trainset(&[], RatingScale::default());
        assert_eq!(trainset.n_users, 0);
        assert_eq!(trainset.n_items, 0);
        assert_eq!(trainset.n_ratings, 0);
    }
}
