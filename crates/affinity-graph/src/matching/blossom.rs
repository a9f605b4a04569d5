//! Built-in maximum-weight matching oracle.
//!
//! Edmonds' blossom algorithm in Galil's primal-dual formulation, O(n³).
//! Weights are scaled to integers so that every dual update is exact.
//! Maximum weight only: vertices stay unmatched whenever matching them would
//! not increase the total.

use std::cell::Cell;

use affinity_core::errors::MatchingError;
use affinity_core::traits::{IMatchingOracle, MatchingProblem};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const NONE: usize = usize::MAX;

/// Fixed-point scale applied to real weights before solving.
const WEIGHT_SCALE: f64 = 1_000_000.0;

/// Largest absolute weight accepted before scaling would overflow.
const MAX_ABS_WEIGHT: f64 = 1.0e12;

const ORACLE_NAME: &str = "blossom";

// Vertex / blossom labels.
const FREE: u8 = 0;
const OUTER: u8 = 1;
const INNER: u8 = 2;
const BREADCRUMB: u8 = 4;

type SolveResult<T> = Result<T, MatchingError>;

fn broken(reason: &str) -> MatchingError {
    MatchingError::OracleFailed {
        oracle: ORACLE_NAME.to_string(),
        reason: reason.to_string(),
    }
}

/// Weighted blossom matcher.
///
/// `shuffled(seed)` relabels vertices and reorders edges before every call,
/// using a fresh seed derived from `seed` and the call count, so that equal
/// optima may be reported differently across calls while staying
/// reproducible for a given seed.
#[derive(Debug, Default)]
pub struct BlossomMatcher {
    seed: Option<u64>,
    calls: Cell<u64>,
}

impl BlossomMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shuffled(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            calls: Cell::new(0),
        }
    }

    fn permutation(&self, len: usize, edges: usize) -> Option<(Vec<usize>, Vec<usize>)> {
        let seed = self.seed?;
        let call = self.calls.get();
        self.calls.set(call.wrapping_add(1));

        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(call));
        let mut vertices: Vec<usize> = (0..len).collect();
        vertices.shuffle(&mut rng);
        let mut edge_order: Vec<usize> = (0..edges).collect();
        edge_order.shuffle(&mut rng);
        Some((vertices, edge_order))
    }
}

impl IMatchingOracle for BlossomMatcher {
    fn name(&self) -> &str {
        ORACLE_NAME
    }

    fn max_weight_matching(&self, problem: &MatchingProblem) -> SolveResult<Vec<(usize, usize)>> {
        let n = problem.vertex_count;
        let mut edges = Vec::with_capacity(problem.edges.len());
        for edge in &problem.edges {
            if edge.a >= n || edge.b >= n {
                return Err(broken("edge endpoint outside the vertex range"));
            }
            if edge.a == edge.b {
                return Err(broken("self-edge in matching problem"));
            }
            if !edge.weight.is_finite() || edge.weight.abs() > MAX_ABS_WEIGHT {
                return Err(MatchingError::OracleFailed {
                    oracle: ORACLE_NAME.to_string(),
                    reason: format!("unusable edge weight {}", edge.weight),
                });
            }
            let scaled = (edge.weight * WEIGHT_SCALE).round() as i64 * 2;
            edges.push((edge.a, edge.b, scaled));
        }

        // internal vertex i is external vertex relabel[i]
        let mut relabel: Vec<usize> = (0..n).collect();
        if let Some((vertices, edge_order)) = self.permutation(n, edges.len()) {
            let mut position = vec![0; n];
            for (internal, &external) in vertices.iter().enumerate() {
                position[external] = internal;
            }
            edges = edge_order
                .iter()
                .map(|&k| {
                    let (a, b, w) = edges[k];
                    (position[a], position[b], w)
                })
                .collect();
            relabel = vertices;
        }

        let mate = Solver::new(n, &edges).solve()?;
        let mut pairs = Vec::new();
        for (v, &partner) in mate.iter().enumerate() {
            if partner != NONE && v < partner {
                let (a, b) = (relabel[v], relabel[partner]);
                pairs.push((a.min(b), a.max(b)));
            }
        }
        pairs.sort_unstable();
        Ok(pairs)
    }
}

/// Solver state. Blossoms are numbered `n..2n`; endpoint `p` of edge `p / 2`
/// is vertex `endpoint[p]`, and `p ^ 1` is the opposite endpoint.
struct Solver<'a> {
    n: usize,
    edges: &'a [(usize, usize, i64)],
    endpoint: Vec<usize>,
    /// Per vertex, the remote endpoints of its incident edges.
    neighbour_ends: Vec<Vec<usize>>,
    /// Remote endpoint of the matched edge, or NONE.
    mate: Vec<usize>,
    label: Vec<u8>,
    label_end: Vec<usize>,
    in_blossom: Vec<usize>,
    blossom_parent: Vec<usize>,
    blossom_children: Vec<Vec<usize>>,
    blossom_base: Vec<usize>,
    blossom_endpoints: Vec<Vec<usize>>,
    best_edge: Vec<usize>,
    blossom_best_edges: Vec<Option<Vec<usize>>>,
    unused_blossoms: Vec<usize>,
    dual: Vec<i64>,
    allow_edge: Vec<bool>,
    queue: Vec<usize>,
}

impl<'a> Solver<'a> {
    fn new(n: usize, edges: &'a [(usize, usize, i64)]) -> Self {
        let max_weight = edges.iter().map(|&(_, _, w)| w).max().unwrap_or(0).max(0);

        let mut endpoint = Vec::with_capacity(2 * edges.len());
        let mut neighbour_ends = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbour_ends[i].push(2 * k + 1);
            neighbour_ends[j].push(2 * k);
        }

        let mut blossom_base: Vec<usize> = (0..n).collect();
        blossom_base.resize(2 * n, NONE);
        let mut dual = vec![max_weight; n];
        dual.resize(2 * n, 0);

        Self {
            n,
            edges,
            endpoint,
            neighbour_ends,
            mate: vec![NONE; n],
            label: vec![FREE; 2 * n],
            label_end: vec![NONE; 2 * n],
            in_blossom: (0..n).collect(),
            blossom_parent: vec![NONE; 2 * n],
            blossom_children: vec![Vec::new(); 2 * n],
            blossom_base,
            blossom_endpoints: vec![Vec::new(); 2 * n],
            best_edge: vec![NONE; 2 * n],
            blossom_best_edges: vec![None; 2 * n],
            unused_blossoms: (n..2 * n).collect(),
            dual,
            allow_edge: vec![false; edges.len()],
            queue: Vec::new(),
        }
    }

    fn slack(&self, k: usize) -> i64 {
        let (i, j, w) = self.edges[k];
        self.dual[i] + self.dual[j] - 2 * w
    }

    /// Vertex at endpoint `p`, failing on the NONE sentinel.
    fn end(&self, p: usize) -> SolveResult<usize> {
        self.endpoint
            .get(p)
            .copied()
            .ok_or_else(|| broken("followed a missing label edge"))
    }

    fn leaves(&self, b: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(b, &mut out);
        out
    }

    fn collect_leaves(&self, b: usize, out: &mut Vec<usize>) {
        if b < self.n {
            out.push(b);
        } else {
            for &child in &self.blossom_children[b] {
                self.collect_leaves(child, out);
            }
        }
    }

    fn child_position(&self, b: usize, child: usize) -> SolveResult<usize> {
        self.blossom_children[b]
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| broken("sub-blossom missing from its parent"))
    }

    /// Label the top-level blossom containing `w` and, for an inner label,
    /// the mate of its base.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) -> SolveResult<()> {
        let b = self.in_blossom[w];
        self.label[w] = t;
        self.label[b] = t;
        self.label_end[w] = p;
        self.label_end[b] = p;
        self.best_edge[w] = NONE;
        self.best_edge[b] = NONE;

        if t == OUTER {
            let leaves = self.leaves(b);
            self.queue.extend(leaves);
            Ok(())
        } else {
            let base = self.blossom_base[b];
            let matched = self.mate[base];
            if matched == NONE {
                return Err(broken("inner blossom with an unmatched base"));
            }
            let next = self.end(matched)?;
            self.assign_label(next, OUTER, matched ^ 1)
        }
    }

    /// Trace back from `v` and `w` to find a new blossom's base, or NONE if
    /// the two trees are distinct (an augmenting path).
    fn scan_blossom(&mut self, mut v: usize, mut w: usize) -> SolveResult<usize> {
        let mut path = Vec::new();
        let mut base = NONE;
        while v != NONE {
            let b = self.in_blossom[v];
            if self.label[b] & BREADCRUMB != 0 {
                base = self.blossom_base[b];
                break;
            }
            path.push(b);
            self.label[b] = OUTER | BREADCRUMB;
            if self.label_end[b] == NONE {
                v = NONE;
            } else {
                let t = self.end(self.label_end[b])?;
                let bt = self.in_blossom[t];
                v = self.end(self.label_end[bt])?;
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = OUTER;
        }
        Ok(base)
    }

    /// Contract the odd cycle closed by edge `k` into a new blossom.
    fn add_blossom(&mut self, base: usize, k: usize) -> SolveResult<()> {
        let (v, w, _) = self.edges[k];
        let bb = self.in_blossom[base];
        let mut bv = self.in_blossom[v];
        let mut bw = self.in_blossom[w];
        let b = self
            .unused_blossoms
            .pop()
            .ok_or_else(|| broken("no free blossom slot"))?;

        self.blossom_base[b] = base;
        self.blossom_parent[b] = NONE;
        self.blossom_parent[bb] = b;

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossom_parent[bv] = b;
            path.push(bv);
            let p = self.label_end[bv];
            endps.push(p);
            bv = self.in_blossom[self.end(p)?];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossom_parent[bw] = b;
            path.push(bw);
            let p = self.label_end[bw];
            let next = self.end(p)?;
            endps.push(p ^ 1);
            bw = self.in_blossom[next];
        }

        self.blossom_children[b] = path.clone();
        self.blossom_endpoints[b] = endps;
        self.label[b] = OUTER;
        self.label_end[b] = self.label_end[bb];
        self.dual[b] = 0;

        for leaf in self.leaves(b) {
            if self.label[self.in_blossom[leaf]] == INNER {
                self.queue.push(leaf);
            }
            self.in_blossom[leaf] = b;
        }

        // Least-slack edges from the new blossom to each neighbouring outer blossom.
        let mut best_to = vec![NONE; 2 * self.n];
        for &child in &path {
            let lists: Vec<Vec<usize>> = match self.blossom_best_edges[child].take() {
                Some(list) => vec![list],
                None => self
                    .leaves(child)
                    .into_iter()
                    .map(|leaf| self.neighbour_ends[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
            };
            for list in lists {
                for edge in list {
                    let (i, j, _) = self.edges[edge];
                    let j = if self.in_blossom[j] == b { i } else { j };
                    let bj = self.in_blossom[j];
                    if bj != b
                        && self.label[bj] == OUTER
                        && (best_to[bj] == NONE || self.slack(edge) < self.slack(best_to[bj]))
                    {
                        best_to[bj] = edge;
                    }
                }
            }
            self.best_edge[child] = NONE;
        }

        let best: Vec<usize> = best_to.into_iter().filter(|&e| e != NONE).collect();
        self.best_edge[b] = NONE;
        for &edge in &best {
            if self.best_edge[b] == NONE || self.slack(edge) < self.slack(self.best_edge[b]) {
                self.best_edge[b] = edge;
            }
        }
        self.blossom_best_edges[b] = Some(best);
        Ok(())
    }

    /// Dissolve blossom `b`, relabelling its children when it was inner.
    fn expand_blossom(&mut self, b: usize, end_stage: bool) -> SolveResult<()> {
        let children = self.blossom_children[b].clone();
        for &child in &children {
            self.blossom_parent[child] = NONE;
            if child < self.n {
                self.in_blossom[child] = child;
            } else if end_stage && self.dual[child] == 0 {
                self.expand_blossom(child, end_stage)?;
            } else {
                for leaf in self.leaves(child) {
                    self.in_blossom[leaf] = child;
                }
            }
        }

        if !end_stage && self.label[b] == INNER {
            let entry_end = self.label_end[b];
            if entry_end == NONE {
                return Err(broken("inner blossom without a label edge"));
            }
            let entry = self.in_blossom[self.end(entry_end ^ 1)?];
            let len = children.len() as isize;
            let at = |j: isize| j.rem_euclid(len) as usize;

            let mut j = self.child_position(b, entry)? as isize;
            let (step, trick): (isize, usize) = if j & 1 == 1 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };
            let offset = trick as isize;

            // Relabel the even-length path from the entry child to the base.
            let mut p = entry_end;
            while j != 0 {
                let q = self.end(p ^ 1)?;
                self.label[q] = FREE;
                let e = self.blossom_endpoints[b][at(j - offset)];
                let r = self.end(e ^ trick ^ 1)?;
                self.label[r] = FREE;
                self.assign_label(q, INNER, p)?;
                self.allow_edge[e / 2] = true;
                j += step;
                p = self.blossom_endpoints[b][at(j - offset)] ^ trick;
                self.allow_edge[p / 2] = true;
                j += step;
            }

            let base_child = children[at(j)];
            let q = self.end(p ^ 1)?;
            self.label[q] = INNER;
            self.label[base_child] = INNER;
            self.label_end[q] = p;
            self.label_end[base_child] = p;
            self.best_edge[base_child] = NONE;
            j += step;

            // Children off that path that were reached earlier get relabelled.
            while children[at(j)] != entry {
                let child = children[at(j)];
                if self.label[child] == OUTER {
                    j += step;
                    continue;
                }
                let reached = self
                    .leaves(child)
                    .into_iter()
                    .find(|&leaf| self.label[leaf] != FREE);
                if let Some(leaf) = reached {
                    self.label[leaf] = FREE;
                    let base_mate = self.mate[self.blossom_base[child]];
                    let partner = self.end(base_mate)?;
                    self.label[partner] = FREE;
                    let leaf_end = self.label_end[leaf];
                    self.assign_label(leaf, INNER, leaf_end)?;
                }
                j += step;
            }
        }

        self.label[b] = FREE;
        self.label_end[b] = NONE;
        self.blossom_children[b].clear();
        self.blossom_endpoints[b].clear();
        self.blossom_base[b] = NONE;
        self.blossom_best_edges[b] = None;
        self.best_edge[b] = NONE;
        self.unused_blossoms.push(b);
        Ok(())
    }

    /// Swap matched and unmatched edges inside `b` so that `v` becomes its base.
    fn augment_blossom(&mut self, b: usize, v: usize) -> SolveResult<()> {
        let mut t = v;
        while self.blossom_parent[t] != b {
            t = self.blossom_parent[t];
            if t == NONE {
                return Err(broken("vertex is not inside the blossom being augmented"));
            }
        }
        if t >= self.n {
            self.augment_blossom(t, v)?;
        }

        let i = self.child_position(b, t)?;
        let len = self.blossom_children[b].len() as isize;
        let at = |j: isize| j.rem_euclid(len) as usize;
        let mut j = i as isize;
        let (step, trick): (isize, usize) = if i & 1 == 1 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        let offset = trick as isize;

        while j != 0 {
            j += step;
            let child = self.blossom_children[b][at(j)];
            let p = self.blossom_endpoints[b][at(j - offset)] ^ trick;
            if child >= self.n {
                let entry = self.end(p)?;
                self.augment_blossom(child, entry)?;
            }
            j += step;
            let child = self.blossom_children[b][at(j)];
            if child >= self.n {
                let entry = self.end(p ^ 1)?;
                self.augment_blossom(child, entry)?;
            }
            let (x, y) = (self.end(p)?, self.end(p ^ 1)?);
            self.mate[x] = p ^ 1;
            self.mate[y] = p;
        }

        self.blossom_children[b].rotate_left(i);
        self.blossom_endpoints[b].rotate_left(i);
        let first = self.blossom_children[b][0];
        self.blossom_base[b] = self.blossom_base[first];
        Ok(())
    }

    /// Flip the augmenting path through edge `k`.
    fn augment_matching(&mut self, k: usize) -> SolveResult<()> {
        let (v, w, _) = self.edges[k];
        for (start, start_end) in [(v, 2 * k + 1), (w, 2 * k)] {
            let (mut s, mut p) = (start, start_end);
            loop {
                let bs = self.in_blossom[s];
                if bs >= self.n {
                    self.augment_blossom(bs, s)?;
                }
                self.mate[s] = p;
                if self.label_end[bs] == NONE {
                    break;
                }
                let t = self.end(self.label_end[bs])?;
                let bt = self.in_blossom[t];
                let bt_end = self.label_end[bt];
                if bt_end == NONE {
                    return Err(broken("inner blossom without a label edge"));
                }
                s = self.end(bt_end)?;
                let j = self.end(bt_end ^ 1)?;
                if bt >= self.n {
                    self.augment_blossom(bt, j)?;
                }
                self.mate[j] = bt_end;
                p = bt_end ^ 1;
            }
        }
        Ok(())
    }

    /// Run stages until no augmenting path remains; returns each vertex's partner.
    fn solve(mut self) -> SolveResult<Vec<usize>> {
        let n = self.n;
        if self.edges.is_empty() {
            return Ok(vec![NONE; n]);
        }

        for _ in 0..n {
            self.label.fill(FREE);
            self.best_edge.fill(NONE);
            for slot in &mut self.blossom_best_edges[n..] {
                *slot = None;
            }
            self.allow_edge.fill(false);
            self.queue.clear();

            for v in 0..n {
                if self.mate[v] == NONE && self.label[self.in_blossom[v]] == FREE {
                    self.assign_label(v, OUTER, NONE)?;
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else {
                        break;
                    };
                    let ends = self.neighbour_ends[v].clone();
                    for p in ends {
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.in_blossom[v] == self.in_blossom[w] {
                            continue;
                        }
                        let mut kslack = 0;
                        if !self.allow_edge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0 {
                                self.allow_edge[k] = true;
                            }
                        }
                        let bw = self.in_blossom[w];
                        if self.allow_edge[k] {
                            if self.label[bw] == FREE {
                                self.assign_label(w, INNER, p ^ 1)?;
                            } else if self.label[bw] == OUTER {
                                let base = self.scan_blossom(v, w)?;
                                if base != NONE {
                                    self.add_blossom(base, k)?;
                                } else {
                                    self.augment_matching(k)?;
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == FREE {
                                self.label[w] = INNER;
                                self.label_end[w] = p ^ 1;
                            }
                        } else if self.label[bw] == OUTER {
                            let b = self.in_blossom[v];
                            if self.best_edge[b] == NONE || kslack < self.slack(self.best_edge[b]) {
                                self.best_edge[b] = k;
                            }
                        } else if self.label[w] == FREE
                            && (self.best_edge[w] == NONE || kslack < self.slack(self.best_edge[w]))
                        {
                            self.best_edge[w] = k;
                        }
                    }
                }
                if augmented {
                    break;
                }

                // Dual adjustment.
                let mut delta_type = 1;
                let mut delta = self.dual[..n].iter().copied().min().unwrap_or(0);
                let mut delta_edge = NONE;
                let mut delta_blossom = NONE;

                for v in 0..n {
                    let e = self.best_edge[v];
                    if self.label[self.in_blossom[v]] == FREE && e != NONE {
                        let d = self.slack(e);
                        if d < delta {
                            delta = d;
                            delta_type = 2;
                            delta_edge = e;
                        }
                    }
                }
                for b in 0..2 * n {
                    let e = self.best_edge[b];
                    if self.blossom_parent[b] == NONE && self.label[b] == OUTER && e != NONE {
                        let d = self.slack(e) / 2;
                        if d < delta {
                            delta = d;
                            delta_type = 3;
                            delta_edge = e;
                        }
                    }
                }
                for b in n..2 * n {
                    if self.blossom_base[b] != NONE
                        && self.blossom_parent[b] == NONE
                        && self.label[b] == INNER
                        && self.dual[b] < delta
                    {
                        delta = self.dual[b];
                        delta_type = 4;
                        delta_blossom = b;
                    }
                }

                for v in 0..n {
                    match self.label[self.in_blossom[v]] {
                        OUTER => self.dual[v] -= delta,
                        INNER => self.dual[v] += delta,
                        _ => {}
                    }
                }
                for b in n..2 * n {
                    if self.blossom_base[b] != NONE && self.blossom_parent[b] == NONE {
                        match self.label[b] {
                            OUTER => self.dual[b] += delta,
                            INNER => self.dual[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match delta_type {
                    1 => break,
                    2 => {
                        self.allow_edge[delta_edge] = true;
                        let (i, j, _) = self.edges[delta_edge];
                        let outer = if self.label[self.in_blossom[i]] == FREE { j } else { i };
                        self.queue.push(outer);
                    }
                    3 => {
                        self.allow_edge[delta_edge] = true;
                        let (i, _, _) = self.edges[delta_edge];
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(delta_blossom, false)?,
                }
            }

            if !augmented {
                break;
            }

            for b in n..2 * n {
                if self.blossom_parent[b] == NONE
                    && self.blossom_base[b] != NONE
                    && self.label[b] == OUTER
                    && self.dual[b] == 0
                {
                    self.expand_blossom(b, true)?;
                }
            }
        }

        let mut partners = vec![NONE; n];
        for v in 0..n {
            if self.mate[v] != NONE {
                partners[v] = self.end(self.mate[v])?;
            }
        }
        Ok(partners)
    }
}
