use serde::Serialize;
use std::f64::consts::PI;

/// Radius used by the dashboard score ring.
pub const RING_RADIUS: f64 = 50.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Warning,
    Critical,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good architecture",
            Self::Warning => "Needs improvement",
            Self::Critical => "Critical issues",
        }
    }

    /// Display color shared with the graph palette.
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#00FF95",
            Self::Warning => "#FFC61A",
            Self::Critical => "#DC2828",
        }
    }
}

/// Stroke geometry for a circular progress indicator. The dash offset shortens
/// the visible arc so the fill stays proportional to the score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RingGeometry {
    pub radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreRating {
    pub score: u8,
    pub tier: Tier,
    pub ring: RingGeometry,
}

/// Maps a score to its display tier and ring geometry. Out-of-range input is
/// clamped to [0, 100] before the tier lookup; there is no error path.
pub fn evaluate(score: i32) -> ScoreRating {
    let score = score.clamp(0, 100) as u8;
    ScoreRating {
        score,
        tier: tier_for(score),
        ring: ring_geometry(score, RING_RADIUS),
    }
}

fn tier_for(score: u8) -> Tier {
    match score {
        80..=100 => Tier::Good,
        60..=79 => Tier::Warning,
        _ => Tier::Critical,
    }
}

pub fn ring_geometry(score: u8, radius: f64) -> RingGeometry {
    let circumference = 2.0 * PI * radius;
    let dash_offset = circumference - (score as f64 / 100.0) * circumference;
    RingGeometry {
        radius,
        circumference,
        dash_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_at_lower_edge() {
        assert_eq!(evaluate(0).tier, Tier::Critical);
        assert_eq!(evaluate(59).tier, Tier::Critical);
        assert_eq!(evaluate(60).tier, Tier::Warning);
        assert_eq!(evaluate(79).tier, Tier::Warning);
        assert_eq!(evaluate(80).tier, Tier::Good);
        assert_eq!(evaluate(100).tier, Tier::Good);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(evaluate(150).score, 100);
        assert_eq!(evaluate(150).tier, Tier::Good);
        assert_eq!(evaluate(-5).score, 0);
        assert_eq!(evaluate(-5).tier, Tier::Critical);
    }

    #[test]
    fn empty_and_full_rings_match_the_circumference() {
        let full = evaluate(100).ring;
        assert!(full.dash_offset.abs() < 1e-9);
        let empty = evaluate(0).ring;
        assert!((empty.dash_offset - empty.circumference).abs() < 1e-9);
    }

    #[test]
    fn dash_offset_decreases_as_score_rises() {
        let mut previous = f64::INFINITY;
        for score in 0..=100 {
            let offset = evaluate(score).ring.dash_offset;
            assert!(offset < previous, "offset not monotonic at score {score}");
            previous = offset;
        }
    }
}
