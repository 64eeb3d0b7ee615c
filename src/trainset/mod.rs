pub mod builder;

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::models::{RatingScale, TestRating};

/// The normalized training representation: dense 0-based user/item ids,
/// bidirectional raw/inner maps and per-user/per-item rating lists.
///
/// A trainset is immutable once built. The inverse id maps and the global
/// mean are materialized lazily on first access behind compute-once locks,
/// so sharing a trainset across threads for read-only access is safe.
/// Trainsets built from different record subsets are fully independent,
/// raw/inner correspondence is not stable across them.
#[derive(Debug)]
pub struct Trainset {
    ur: Vec<Vec<(usize, f64)>>,
    ir: Vec<Vec<(usize, f64)>>,
    pub n_users: usize,
    pub n_items: usize,
    pub n_ratings: usize,
    pub rating_scale: RatingScale,
    raw2inner_uid: HashMap<String, usize>,
    raw2inner_iid: HashMap<String, usize>,
    inner2raw_uid: RwLock<Option<Vec<String>>>,
    inner2raw_iid: RwLock<Option<Vec<String>>>,
    global_mean: RwLock<Option<f64>>,
}

impl Trainset {
    pub(crate) fn new(
        ur: Vec<Vec<(usize, f64)>>,
        ir: Vec<Vec<(usize, f64)>>,
        n_ratings: usize,
        rating_scale: RatingScale,
        raw2inner_uid: HashMap<String, usize>,
        raw2inner_iid: HashMap<String, usize>,
    ) -> Self {
        Self {
            n_users: ur.len(),
            n_items: ir.len(),
            n_ratings,
            rating_scale,
            ur,
            ir,
            raw2inner_uid,
            raw2inner_iid,
            inner2raw_uid: RwLock::new(None),
            inner2raw_iid: RwLock::new(None),
            global_mean: RwLock::new(None),
        }
    }

    /// Per-user rating lists, indexed by inner user id. Each entry is a
    /// `(inner_item_id, rating)` pair in arrival order.
    pub fn ur(&self) -> &[Vec<(usize, f64)>] {
        &self.ur
    }

    /// Per-item rating lists, indexed by inner item id. Each entry is a
    /// `(inner_user_id, rating)` pair in arrival order.
    pub fn ir(&self) -> &[Vec<(usize, f64)>] {
        &self.ir
    }

    pub fn knows_user(&self, iuid: usize) -> bool {
        iuid < self.n_users
    }

    pub fn knows_item(&self, iiid: usize) -> bool {
        iiid < self.n_items
    }

    pub fn to_inner_uid(&self, ruid: &str) -> Result<usize> {
        self.raw2inner_uid
            .get(ruid)
            .copied()
            .ok_or_else(|| Error::UnknownUser(ruid.to_owned()))
    }

    pub fn to_inner_iid(&self, riid: &str) -> Result<usize> {
        self.raw2inner_iid
            .get(riid)
            .copied()
            .ok_or_else(|| Error::UnknownItem(riid.to_owned()))
    }

    pub fn to_raw_uid(&self, iuid: usize) -> Result<String> {
        Self::inverse_lookup(&self.inner2raw_uid, &self.raw2inner_uid, self.n_users, iuid)
    }

    pub fn to_raw_iid(&self, iiid: usize) -> Result<String> {
        Self::inverse_lookup(&self.inner2raw_iid, &self.raw2inner_iid, self.n_items, iiid)
    }

    /// Inverse maps are not built eagerly, they are materialized on the
    /// first reverse lookup and cached for the trainset's lifetime.
    fn inverse_lookup(
        cache: &RwLock<Option<Vec<String>>>,
        forward: &HashMap<String, usize>,
        len: usize,
        inner: usize,
    ) -> Result<String> {
        {
            let cached = cache.read();
            if let Some(map) = cached.as_ref() {
                return map.get(inner).cloned().ok_or(Error::UnknownInnerId(inner));
            }
        }

        let mut cached = cache.write();
        let map = cached.get_or_insert_with(|| {
            let mut map = vec![String::new(); len];
            for (raw, &id) in forward {
                map[id] = raw.clone();
            }
            map
        });
        map.get(inner).cloned().ok_or(Error::UnknownInnerId(inner))
    }

    /// Iterate every `(inner_uid, inner_iid, rating)` triple. Users come in
    /// dense id order (first-seen order), ratings per user in arrival order.
    /// Each call starts a fresh traversal with identical order.
    pub fn all_ratings(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.ur
            .iter()
            .enumerate()
            .flat_map(|(u, ratings)| ratings.iter().map(move |&(i, r)| (u, i, r)))
    }

    /// Inner user ids, `0..n_users`.
    pub fn all_users(&self) -> std::ops::Range<usize> {
        0..self.n_users
    }

    /// Inner item ids, `0..n_items`.
    pub fn all_items(&self) -> std::ops::Range<usize> {
        0..self.n_items
    }

    /// The training data itself re-expressed as a raw-id testset, for
    /// evaluate-on-train diagnostics.
    pub fn build_testset(&self) -> Result<Vec<TestRating>> {
        let mut testset = Vec::with_capacity(self.n_ratings);
        for (u, i, r) in self.all_ratings() {
            testset.push((self.to_raw_uid(u)?, self.to_raw_iid(i)?, r));
        }
        Ok(testset)
    }

    /// Every `(user, item)` pair absent from training, with `fill` as the
    /// rating (`None` uses the global mean). Grouped by user in inner-id
    /// order, then by item in inner-id order; the enumeration is complete.
    pub fn build_anti_testset(&self, fill: Option<f64>) -> Result<Vec<TestRating>> {
        let fill = match fill {
            Some(fill) => fill,
            None => self.global_mean(),
        };

        let mut anti_testset = Vec::new();
        for u in self.all_users() {
            let raw_uid = self.to_raw_uid(u)?;
            let user_items: HashSet<usize> = self.ur[u].iter().map(|&(i, _)| i).collect();
            for i in self.all_items() {
                if !user_items.contains(&i) {
                    anti_testset.push((raw_uid.clone(), self.to_raw_iid(i)?, fill));
                }
            }
        }
        Ok(anti_testset)
    }

    /// Mean of all ratings. Computed once on first access, then cached.
    pub fn global_mean(&self) -> f64 {
        {
            if let Some(mean) = *self.global_mean.read() {
                return mean;
            }
        }

        let mut cached = self.global_mean.write();
        *cached.get_or_insert_with(|| {
            if self.n_ratings == 0 {
                return 0.0;
            }
            let sum: f64 = self.all_ratings().map(|(_, _, r)| r).sum();
            sum / self.n_ratings as f64
        })
    }
}
