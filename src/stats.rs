use itertools::Itertools;

use crate::util::{per_minute, round2, round3};

/// Mistaken words are listed only while there are fewer than this many.
pub const MISTAKES_SHOWN_BELOW: usize = 8;

/// Figures for a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub elapsed_secs: f64,
    pub wpm: f64,
    pub cpm: f64,
    pub accuracy: f64,
    pub mistakes: Option<Vec<String>>,
}

/// Derive the report from raw session counters.
///
/// `total_char_count` is the length of the sample joined with single spaces.
/// Rates are zero if no time elapsed and accuracy is 100 for an empty sample.
pub fn compute(
    elapsed_secs: f64,
    word_count: usize,
    total_char_count: usize,
    wrong_char_count: usize,
    mistaken_words: &[String],
) -> Report {
    let accuracy = if total_char_count == 0 {
        100.0
    } else {
        let right = total_char_count as f64 - wrong_char_count as f64;
        round2(100.0 * right / total_char_count as f64).clamp(0.0, 100.0)
    };

    let mistakes = if mistaken_words.len() < MISTAKES_SHOWN_BELOW {
        Some(mistaken_words.to_vec())
    } else {
        None
    };

    Report {
        elapsed_secs,
        wpm: round3(per_minute(word_count, elapsed_secs)),
        cpm: round3(per_minute(total_char_count, elapsed_secs)),
        accuracy,
        mistakes,
    }
}

impl Report {
    /// Label/value rows as shown on the results screen.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Time:", format!("{}s", round2(self.elapsed_secs))),
            ("WPM:", self.wpm.to_string()),
            ("CPM:", self.cpm.to_string()),
            ("Accuracy:", format!("{}%", self.accuracy)),
        ];
        if let Some(mistakes) = &self.mistakes {
            rows.push(("Mistakes:", mistakes.iter().join(", ")));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mistaken(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn test_compute_basic() {
        // 2 words, "cat dog" = 7 chars, in 3 seconds
        let report = compute(3.0, 2, 7, 1, &["cat".to_string()]);

        assert_eq!(report.wpm, 40.0);
        assert_eq!(report.cpm, 140.0);
        assert_eq!(report.accuracy, 85.71);
        assert_eq!(report.mistakes, Some(vec!["cat".to_string()]));
    }

    #[test]
    fn test_compute_rounds_rates_to_three_places() {
        let report = compute(7.0, 10, 55, 0, &[]);

        assert_eq!(report.wpm, 85.714);
        assert_eq!(report.cpm, 471.429);
        assert_eq!(report.accuracy, 100.0);
    }

    #[test]
    fn test_accuracy_stays_in_range() {
        for wrong in 0..=20 {
            let report = compute(10.0, 3, 20, wrong, &[]);
            assert!((0.0..=100.0).contains(&report.accuracy));
        }
        assert_eq!(compute(10.0, 3, 20, 20, &[]).accuracy, 0.0);
    }

    #[test]
    fn test_accuracy_clamped_when_wrong_exceeds_total() {
        assert_eq!(compute(10.0, 1, 5, 9, &[]).accuracy, 0.0);
    }

    #[test]
    fn test_mistakes_boundary() {
        let shown = compute(1.0, 10, 50, 7, &mistaken(7)).mistakes;
        assert_eq!(shown, Some(mistaken(7)));
        assert_eq!(compute(1.0, 10, 50, 8, &mistaken(8)).mistakes, None);
    }

    #[test]
    fn test_zero_elapsed_yields_zero_rates() {
        let report = compute(0.0, 5, 20, 0, &[]);
        assert_eq!(report.wpm, 0.0);
        assert_eq!(report.cpm, 0.0);
    }

    #[test]
    fn test_empty_sample_is_fully_accurate() {
        assert_eq!(compute(1.0, 0, 0, 0, &[]).accuracy, 100.0);
    }

    #[test]
    fn test_rows() {
        let report = compute(12.3456, 2, 7, 1, &["cat".to_string(), "dog".to_string()]);
        let rows = report.rows();

        assert_eq!(rows[0], ("Time:", "12.35s".to_string()));
        assert_eq!(rows[3], ("Accuracy:", "85.71%".to_string()));
        assert_eq!(rows[4], ("Mistakes:", "cat, dog".to_string()));
    }

    #[test]
    fn test_rows_without_mistakes_line() {
        let report = compute(10.0, 10, 50, 8, &mistaken(8));
        assert_eq!(report.rows().len(), 4);
    }
}
