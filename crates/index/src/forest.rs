//! Random-projection forest for approximate nearest-neighbor search.
//!
//! Each tree splits the point set at the median of a random Gaussian
//! projection, one direction per level, down to `depth` levels. A query
//! descends every tree to the leaf (or leaves, on an exact tie with a split
//! value) containing it, gathers the union of those leaves as candidates,
//! keeps the candidates found in at least `votes` trees and ranks them by
//! exact distance.
//!
//! Ties descend both children, so a query identical to a stored point always
//! reaches that point's leaf in every tree.

use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ForestConfig;
use crate::distance::{project, sq_distances_to};
use crate::error::IndexError;
use crate::exact::scan;
use crate::persist::{read_index, write_index};
use crate::points::Points;
use crate::result::Neighbors;
use crate::search::{SearchIndex, check_query};
use crate::select::select_k_nearest;

const KIND: &str = "rp-forest";

/// A forest of random-projection trees.
///
/// Build with [`SearchIndex::build`]; trees are constructed in parallel, each
/// from its own seed derived from [`ForestConfig::seed`], so a seeded build
/// is reproducible regardless of thread count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpForest {
    dim: usize,
    depth: usize,
    votes: usize,
    trees: Vec<RpTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RpTree {
    /// One projection direction per level (`depth * dim` values).
    directions: Vec<f64>,
    /// Split value per internal node, heap order (`2^depth - 1` values).
    splits: Vec<f64>,
    /// Start of each leaf's run in `order`, plus an `n_points` sentinel.
    leaf_starts: Vec<u32>,
    /// Point ids grouped by leaf, leaves left to right.
    order: Vec<u32>,
}

impl RpForest {
    /// Effective tree depth after clamping to the pool size.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Vote threshold applied to candidates.
    pub fn votes(&self) -> usize {
        self.votes
    }

    /// Gathers candidate ids found in at least `votes` trees, sorted ascending.
    fn candidates(&self, query: &[f64]) -> Vec<u32> {
        let mut projections = vec![0.0; self.depth];
        let mut leaves = Vec::new();
        let mut found = Vec::new();
        for tree in &self.trees {
            for (level, p) in projections.iter_mut().enumerate() {
                *p = project(tree.direction(level, self.dim), query);
            }
            leaves.clear();
            tree.leaves_for(&projections, &mut leaves);
            for &leaf in &leaves {
                found.extend_from_slice(tree.leaf(leaf));
            }
        }
        found.sort_unstable();

        if self.votes <= 1 {
            found.dedup();
            return found;
        }
        let mut kept = Vec::new();
        for run in found.chunk_by(|a, b| a == b) {
            if run.len() >= self.votes {
                kept.push(run[0]);
            }
        }
        kept
    }
}

impl SearchIndex for RpForest {
    type Config = ForestConfig;

    #[tracing::instrument(skip_all, fields(n_points = points.len(), dim = points.dim()))]
    fn build(points: &Points, config: &ForestConfig) -> Result<Self, IndexError> {
        config.validate()?;
        let n_points = points.len();
        let max = u32::MAX as usize;
        if n_points > max {
            return Err(IndexError::TooManyPoints { n_points, max });
        }

        let depth = config.depth().min(n_points.ilog2() as usize);
        if depth < config.depth() {
            debug!(
                requested = config.depth(),
                depth, "tree depth clamped to pool size"
            );
        }
        let base_seed = config.seed().unwrap_or_else(|| rand::rng().random());
        info!(
            n_trees = config.n_trees(),
            depth,
            seed = base_seed,
            "building random projection forest"
        );

        let start = Instant::now();
        let trees: Vec<RpTree> = (0..config.n_trees())
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(tree_seed(base_seed, t as u64));
                RpTree::build(points, depth, &mut rng)
            })
            .collect();
        info!(
            elapsed_s = start.elapsed().as_secs_f64(),
            "random projection forest built"
        );

        Ok(Self {
            dim: points.dim(),
            depth,
            votes: config.votes(),
            trees,
        })
    }

    fn query(&self, points: &Points, query: &[f64], k: usize) -> Result<Neighbors, IndexError> {
        let k_eff = check_query(points, query, k)?;
        let candidates = self.candidates(query);
        if candidates.len() < k_eff {
            debug!(
                candidates = candidates.len(),
                k = k_eff,
                "too few forest candidates: exact scan"
            );
            return Ok(scan(points, query, k_eff));
        }

        let mut pairs = Vec::with_capacity(candidates.len());
        sq_distances_to(
            points.as_flat(),
            points.dim(),
            candidates.iter().map(|&i| i as usize),
            query,
            &mut pairs,
        );
        Ok(select_k_nearest(&mut pairs, k_eff))
    }

    fn save(&self, points: &Points, path: &Path) -> Result<(), IndexError> {
        write_index(path, KIND, points, self)
    }

    fn load(points: &Points, path: &Path) -> Result<Self, IndexError> {
        let forest: Self = read_index(path, KIND, points)?;
        if !forest.is_consistent(points.len()) {
            return Err(IndexError::Corrupt {
                path: path.to_path_buf(),
                reason: "tree layout inconsistent with header".to_string(),
            });
        }
        Ok(forest)
    }
}

impl RpForest {
    /// Structural checks on a deserialized forest.
    fn is_consistent(&self, n_points: usize) -> bool {
        let n_leaves = 1usize << self.depth;
        !self.trees.is_empty()
            && (1..=self.trees.len()).contains(&self.votes)
            && self.trees.iter().all(|t| {
                t.directions.len() == self.depth * self.dim
                    && t.splits.len() == n_leaves - 1
                    && t.leaf_starts.len() == n_leaves + 1
                    && t.order.len() == n_points
                    && t.leaf_starts.windows(2).all(|w| w[0] <= w[1])
                    && t.leaf_starts.last().is_some_and(|&s| s as usize == n_points)
                    && t.order.iter().all(|&i| (i as usize) < n_points)
            })
    }
}

impl RpTree {
    fn build(points: &Points, depth: usize, rng: &mut StdRng) -> Self {
        let n_points = points.len();
        let n_leaves = 1usize << depth;
        let directions = (0..depth * points.dim())
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();

        let mut tree = Self {
            directions,
            splits: vec![0.0; n_leaves - 1],
            leaf_starts: vec![0; n_leaves + 1],
            order: Vec::new(),
        };
        tree.leaf_starts[n_leaves] = n_points as u32;

        let mut order: Vec<u32> = (0..n_points as u32).collect();
        let mut scratch = Vec::with_capacity(n_points);
        tree.partition(points, &mut order, 0, 0, 0, &mut scratch);
        tree.order = order;
        tree
    }

    fn depth(&self) -> usize {
        (self.splits.len() + 1).ilog2() as usize
    }

    fn direction(&self, level: usize, dim: usize) -> &[f64] {
        &self.directions[level * dim..(level + 1) * dim]
    }

    fn leaf(&self, leaf: usize) -> &[u32] {
        let lo = self.leaf_starts[leaf] as usize;
        let hi = self.leaf_starts[leaf + 1] as usize;
        &self.order[lo..hi]
    }

    /// Median-splits `ids` (occupying `order[start..]`) below heap node `node`.
    ///
    /// Every slice reaching a split has at least two ids because depth is
    /// clamped to `floor(log2(n_points))`.
    fn partition(
        &mut self,
        points: &Points,
        ids: &mut [u32],
        start: usize,
        node: usize,
        level: usize,
        scratch: &mut Vec<(f64, u32)>,
    ) {
        if level == self.depth() {
            self.leaf_starts[node - self.splits.len()] = start as u32;
            return;
        }
        debug_assert!(ids.len() >= 2);

        let dir = self.direction(level, points.dim());
        scratch.clear();
        scratch.extend(
            ids.iter()
                .map(|&i| (project(dir, points.row(i as usize)), i)),
        );
        let mid = ids.len() / 2;
        scratch.select_nth_unstable_by(mid, |a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let left_max = scratch[..mid]
            .iter()
            .map(|p| p.0)
            .fold(f64::NEG_INFINITY, f64::max);
        self.splits[node] = 0.5 * (left_max + scratch[mid].0);
        for (slot, &(_, i)) in ids.iter_mut().zip(scratch.iter()) {
            *slot = i;
        }

        let (left, right) = ids.split_at_mut(mid);
        self.partition(points, left, start, 2 * node + 1, level + 1, scratch);
        self.partition(points, right, start + mid, 2 * node + 2, level + 1, scratch);
    }

    /// Pushes every leaf reachable by `projections` (one per level).
    fn leaves_for(&self, projections: &[f64], out: &mut Vec<usize>) {
        let first_leaf = self.splits.len();
        let mut stack = vec![(0usize, 0usize)];
        while let Some((node, level)) = stack.pop() {
            if node >= first_leaf {
                out.push(node - first_leaf);
                continue;
            }
            let v = projections[level];
            let split = self.splits[node];
            if v >= split {
                stack.push((2 * node + 2, level + 1));
            }
            if v <= split {
                stack.push((2 * node + 1, level + 1));
            }
        }
    }
}

/// SplitMix64 of `base ^ tree`, giving each tree an independent stream.
fn tree_seed(base: u64, tree: u64) -> u64 {
    let mut z = (base ^ tree.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
