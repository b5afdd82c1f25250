#![allow(dead_code)]

use extensor_coding::{Adjacency, Extensor, Monomial};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ─── Graphs ────────────────────────────────────────────────────────────────

/// Erdős–Rényi digraph G(n, p) without self-loops, fixed seed.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Adjacency {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| i != j)
        .filter(|_| rng.gen_bool(p))
        .collect();
    Adjacency::from_edges(n, &edges).unwrap()
}

/// Undirected n × n grid, row-major vertex numbering.
pub fn grid(side: usize) -> Adjacency {
    let n = side * side;
    let mut edges = Vec::with_capacity(4 * n);
    for r in 0..side {
        for c in 0..side {
            let v = r * side + c;
            if c + 1 < side {
                edges.push((v, v + 1));
                edges.push((v + 1, v));
            }
            if r + 1 < side {
                edges.push((v, v + side));
                edges.push((v + side, v));
            }
        }
    }
    Adjacency::from_edges(n, &edges).unwrap()
}

// ─── Extensors ─────────────────────────────────────────────────────────────

/// `terms` random blades of grade `grade` over `e_0..e_31` with small coefficients.
pub fn random_extensor(terms: usize, grade: usize, rng: &mut StdRng) -> Extensor {
    Extensor::from_terms((0..terms).map(|_| {
        let mut bits = 0u32;
        while (bits.count_ones() as usize) < grade {
            bits |= 1 << rng.gen_range(0..32);
        }
        (Monomial::from_bits(bits), rng.gen_range(-3..=3))
    }))
    .unwrap()
}
