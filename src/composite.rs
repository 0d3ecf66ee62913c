use crate::catalog::{IndicatorWeight, Profile};
use crate::ranges::RangeTable;
use crate::records::StatRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositeScore {
    pub numerator: f64,
    pub denominator: f64,
}

impl CompositeScore {
    pub fn raw(&self) -> f64 {
        if self.denominator > 0.0 {
            self.numerator / self.denominator
        } else {
            0.0
        }
    }
}

/// Two-level weighting: each indicator contributes `weight * phase_fraction`, and the
/// sum is renormalized by the effective weight of the indicators whose range is defined.
pub fn composite_score(record: &StatRecord, profile: &Profile, ranges: &RangeTable) -> CompositeScore {
    let mut acc = CompositeScore::default();
    accumulate(&mut acc, record, &profile.on_ball, profile.w_on, ranges);
    accumulate(&mut acc, record, &profile.off_ball, profile.w_off, ranges);
    acc
}

pub fn raw_score(record: &StatRecord, profile: &Profile, ranges: &RangeTable) -> f64 {
    composite_score(record, profile, ranges).raw()
}

fn accumulate(
    acc: &mut CompositeScore,
    record: &StatRecord,
    weights: &[IndicatorWeight],
    phase_fraction: f64,
    ranges: &RangeTable,
) {
    for w in weights {
        let Some(range) = ranges.get(&w.indicator) else {
            continue;
        };
        let mut x = range.normalize(record.value(&w.indicator));
        if w.invert {
            x = 1.0 - x;
        }
        let effective = w.weight * phase_fraction;
        acc.numerator += x * effective;
        acc.denominator += effective;
    }
}
