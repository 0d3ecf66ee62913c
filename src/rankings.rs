use std::cmp::Ordering;

use crate::engine::{RatingRow, RatingTable};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub rating: f64,
    pub row: &'a RatingRow,
}

pub fn top_by_profile<'a>(table: &'a RatingTable, profile: &str, n: usize) -> Vec<RankedEntry<'a>> {
    let mut rated: Vec<(f64, &RatingRow)> = table
        .rows
        .iter()
        .filter_map(|row| row.rating(profile).map(|r| (r, row)))
        .collect();
    rated.sort_by(|(ra, a), (rb, b)| {
        rb.partial_cmp(ra)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player.cmp(&b.player))
            .then_with(|| a.team.cmp(&b.team))
    });
    rated
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(idx, (rating, row))| RankedEntry {
            rank: idx + 1,
            rating,
            row,
        })
        .collect()
}
