use std::collections::HashMap;

use crate::records::StatRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRange {
    pub min: f64,
    pub max: f64,
}

impl IndicatorRange {
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Ranges for one (scope, position). An indicator missing from the map has an
/// undefined range: nobody in the population carried it.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    ranges: HashMap<String, IndicatorRange>,
}

impl RangeTable {
    pub fn compute<'a, I>(population: &[&StatRecord], indicators: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ranges = HashMap::new();
        for indicator in indicators {
            if !population.iter().any(|r| r.carries(indicator)) {
                continue;
            }
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for record in population {
                let v = record.value(indicator);
                min = min.min(v);
                max = max.max(v);
            }
            ranges.insert(indicator.to_string(), IndicatorRange { min, max });
        }
        Self { ranges }
    }

    pub fn get(&self, indicator: &str) -> Option<IndicatorRange> {
        self.ranges.get(indicator).copied()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Min-max normalization into [0, 1]. A degenerate range yields exactly 0.5 for any
/// value; out-of-range values are clamped.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bounds_and_degenerate_midpoint() {
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize(2.5, 0.0, 10.0), 0.25);
        assert_eq!(normalize(7.0, 3.0, 3.0), 0.5);
        assert_eq!(normalize(-100.0, 3.0, 3.0), 0.5);
        for i in 0..=100 {
            let v = -5.0 + i as f64 * 0.1;
            let x = normalize(v, -5.0, 5.0);
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn absent_everywhere_is_undefined_but_partially_absent_counts_as_zero() {
        let a = StatRecord::new("A", "T", 2000.0, "CB").with_stat("Int", "12");
        let b = StatRecord::new("B", "T", 2000.0, "CB").with_stat("Int", 30.0);
        let c = StatRecord::new("C", "T", 2000.0, "CB");
        let pop = vec![&a, &b, &c];
        let table = RangeTable::compute(&pop, ["Int", "Recup."]);
        assert_eq!(table.get("Int"), Some(IndicatorRange { min: 0.0, max: 30.0 }));
        assert_eq!(table.get("Recup."), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn single_player_population_is_degenerate() {
        let a = StatRecord::new("A", "T", 2000.0, "CB").with_stat("Int", 4.0);
        let table = RangeTable::compute(&[&a], ["Int"]);
        let range = table.get("Int").expect("range should exist");
        assert!(range.is_degenerate());
        assert_eq!(range.normalize(4.0), 0.5);
    }
}
