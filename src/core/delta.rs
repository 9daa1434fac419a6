use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improved,
    Regressed,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MetricDelta {
    pub delta: i64,
    pub trend: Trend,
}

impl MetricDelta {
    /// Signed rendering used by badges: "+7", "-1", "0".
    pub fn signed(&self) -> String {
        if self.delta > 0 {
            format!("+{}", self.delta)
        } else {
            self.delta.to_string()
        }
    }
}

/// Compares a metric against its previous measurement. `invert` marks metrics
/// where a numeric decrease is the improvement (violation counts). A zero
/// delta is classified as unchanged before any polarity logic runs.
pub fn classify(current: i64, previous: i64, invert: bool) -> MetricDelta {
    let delta = current - previous;
    if delta == 0 {
        return MetricDelta {
            delta,
            trend: Trend::Unchanged,
        };
    }

    let improved = if invert { delta < 0 } else { delta > 0 };
    MetricDelta {
        delta,
        trend: if improved {
            Trend::Improved
        } else {
            Trend::Regressed
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_score_is_an_improvement() {
        let badge = classify(72, 65, false);
        assert_eq!(badge.delta, 7);
        assert_eq!(badge.trend, Trend::Improved);
        assert_eq!(badge.signed(), "+7");
    }

    #[test]
    fn fewer_violations_improve_when_inverted() {
        let badge = classify(3, 4, true);
        assert_eq!(badge.delta, -1);
        assert_eq!(badge.trend, Trend::Improved);
        assert_eq!(badge.signed(), "-1");
    }

    #[test]
    fn more_violations_regress_when_inverted() {
        assert_eq!(classify(6, 4, true).trend, Trend::Regressed);
        assert_eq!(classify(60, 72, false).trend, Trend::Regressed);
    }

    #[test]
    fn zero_delta_is_neither_improvement_nor_regression() {
        let badge = classify(5, 5, false);
        assert_eq!(badge.delta, 0);
        assert_eq!(badge.trend, Trend::Unchanged);
        assert_eq!(classify(5, 5, true).trend, Trend::Unchanged);
    }
}
