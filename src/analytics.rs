use crate::quiz::attempt::QuizAttempt;

pub const DEFAULT_GOOD_SCORE_THRESHOLD: f64 = 70.0;

#[derive(Clone, Debug, PartialEq)]
pub struct HistorySummary {
    pub count: usize,
    pub mean_percentage: Option<f64>,
    pub max_percentage: Option<f64>,
}

impl HistorySummary {
    pub fn from_history(history: &[QuizAttempt]) -> Self {
        let count = history.len();
        let mean_percentage = if count == 0 {
            None
        } else {
            Some(history.iter().map(|a| a.percentage).sum::<f64>() / count as f64)
        };
        let max_percentage = history.iter().map(|a| a.percentage).reduce(f64::max);
        Self {
            count,
            mean_percentage,
            max_percentage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Average,
}

impl ScoreBand {
    pub fn classify(percentage: f64, threshold: f64) -> Self {
        if percentage >= threshold {
            ScoreBand::Good
        } else {
            ScoreBand::Average
        }
    }
}

/// Whole-number percentage for display, e.g. `67%`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.0}%")
}

/// One history line: local date and time, score and percentage.
pub fn format_attempt(attempt: &QuizAttempt) -> String {
    let local = attempt.date.with_timezone(&chrono::Local);
    format!(
        "{} - {}  Score: {} / {}  {}",
        local.format("%Y-%m-%d"),
        local.format("%H:%M:%S"),
        attempt.score,
        attempt.total_questions,
        format_percentage(attempt.percentage)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn attempt(score: u32, total: u32) -> QuizAttempt {
        let date = DateTime::parse_from_rfc3339("2025-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        QuizAttempt::new(score, total, date).unwrap()
    }

    #[test]
    fn empty_history_summary() {
        let summary = HistorySummary::from_history(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_percentage, None);
        assert_eq!(summary.max_percentage, None);
    }

    #[test]
    fn summary_mean_and_max() {
        let history = vec![attempt(1, 2), attempt(4, 4), attempt(1, 4)];
        let summary = HistorySummary::from_history(&history);
        assert_eq!(summary.count, 3);
        assert!((summary.mean_percentage.unwrap() - 58.333333).abs() < 1e-4);
        assert_eq!(summary.max_percentage, Some(100.0));
    }

    #[test]
    fn score_band_threshold_is_inclusive() {
        assert_eq!(ScoreBand::classify(70.0, 70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::classify(69.9, 70.0), ScoreBand::Average);
    }

    #[test]
    fn display_rounding_is_separate_from_value() {
        let a = attempt(2, 3);
        assert!((a.percentage - 66.666666).abs() < 1e-4);
        assert_eq!(format_percentage(a.percentage), "67%");
    }

    #[test]
    fn attempt_line_includes_score() {
        let line = format_attempt(&attempt(3, 4));
        assert!(line.contains("Score: 3 / 4"));
        assert!(line.ends_with("75%"));
    }
}
