use std::cmp::Ordering;

use crate::engine::{RatingRow, RatingTable};

// Style (direction) dominates; level and radar overlap refine.
const WEIGHT_COSINE: f64 = 0.65;
const WEIGHT_EUCLIDEAN: f64 = 0.20;
const WEIGHT_RADAR: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarPlayer<'a> {
    pub row: &'a RatingRow,
    pub score: f64,
}

pub fn find_similar<'a>(table: &'a RatingTable, target: &RatingRow, n: usize) -> Vec<SimilarPlayer<'a>> {
    let base = target.vector();
    let peers: Vec<&RatingRow> = table
        .for_position(target.position)
        .filter(|row| row.player != target.player)
        .filter(|row| row.ratings.len() == base.len())
        .filter(|row| row.ratings.iter().map(|r| r.rating).sum::<f64>() > 0.0)
        .collect();
    if peers.is_empty() {
        return Vec::new();
    }

    let distances: Vec<f64> = peers.iter().map(|p| euclidean(&base, &p.vector())).collect();
    let max_distance = distances.iter().copied().fold(0.0, f64::max);

    let mut scored: Vec<SimilarPlayer<'a>> = peers
        .iter()
        .zip(distances)
        .map(|(peer, dist)| {
            let v = peer.vector();
            let euclid_sim = if max_distance > 0.0 { 1.0 - dist / max_distance } else { 1.0 };
            let score = WEIGHT_COSINE * cosine(&base, &v)
                + WEIGHT_EUCLIDEAN * euclid_sim
                + WEIGHT_RADAR * radar_overlap(&base, &v);
            SimilarPlayer { row: *peer, score }
        })
        .collect();

    let best = scored.iter().map(|s| s.score).fold(0.0, f64::max);
    if best > 0.0 {
        for s in &mut scored {
            s.score /= best;
        }
    }
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.row.player.cmp(&b.row.player))
    });
    scored.truncate(n);
    scored
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 { 0.0 } else { dot / (na * nb) }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

// Mean per-axis min/max ratio after scaling each radar to its own peak.
fn radar_overlap(a: &[f64], b: &[f64]) -> f64 {
    let peak_a = a.iter().copied().fold(0.0, f64::max);
    let peak_b = b.iter().copied().fold(0.0, f64::max);
    if a.is_empty() || peak_a <= 0.0 || peak_b <= 0.0 {
        return 0.0;
    }
    let total: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let x = x / peak_a;
            let y = y / peak_b;
            let hi = x.max(y);
            if hi > 0.0 { x.min(y) / hi } else { 1.0 }
        })
        .sum();
    total / a.len() as f64
}
