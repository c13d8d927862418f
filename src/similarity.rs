//! Approximate string similarity used to detect issue bodies
//! that copy or paraphrase a repository's issue templates.
//!
//! The comparator is a Smith-Waterman local alignment with affine gap
//! penalties. Characters are compared case-insensitively and a run of
//! consecutive matches earns a bonus, so a lightly edited copy of a
//! template scores close to an exact copy while unrelated text scores low.
//! The shorter string is always aligned against the longer one.


/// Score awarded to each matching character.
pub const SCORE_MATCH: i64 = 16;
/// Extra score for a match that directly follows another match.
pub const BONUS_CONSECUTIVE: i64 = 8;
/// Penalty for aligning two different characters.
pub const PENALTY_MISMATCH: i64 = 6;
/// Penalty for opening a gap.
pub const PENALTY_GAP_START: i64 = 3;
/// Penalty for extending an opened gap.
pub const PENALTY_GAP_EXTENSION: i64 = 1;


/// Local-alignment scorer.
/// Construct with [`SimilarityScorer::default`] to get the standard weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityScorer {
    score_match: i64,
    bonus_consecutive: i64,
    penalty_mismatch: i64,
    penalty_gap_start: i64,
    penalty_gap_extension: i64,
}


impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            score_match:           SCORE_MATCH,
            bonus_consecutive:     BONUS_CONSECUTIVE,
            penalty_mismatch:      PENALTY_MISMATCH,
            penalty_gap_start:     PENALTY_GAP_START,
            penalty_gap_extension: PENALTY_GAP_EXTENSION,
        }
    }
}


impl SimilarityScorer {
    /// Returns the maximum similarity between `query` and
    /// each of `candidates`.
    /// Returns `0` if `query` is empty or there are no candidates.
    pub fn score<T>(&self, query: &str, candidates: &[T]) -> u64
        where T: AsRef<str>
    {
        if query.is_empty() { return 0; }

        candidates.iter()
            .map(|candidate| self.similarity(query, candidate.as_ref()))
            .max()
            .unwrap_or(0)
    }


    /// Similarity of a single pair.
    /// The result does not depend on the argument order.
    pub fn similarity(&self, a: &str, b: &str) -> u64 {
        let a = fold_case(a);
        let b = fold_case(b);

        // The shorter sequence is the pattern.
        // Equal lengths are ordered lexicographically
        // so that swapping the arguments gives the same alignment.
        let (pattern, text) = if (a.len(), &a) <= (b.len(), &b) {
            (a, b)
        } else {
            (b, a)
        };

        self.align(&pattern, &text)
    }


    /// Gotoh's affine-gap variant of Smith-Waterman,
    /// keeping two rows of the dynamic programming table.
    fn align(&self, pattern: &[char], text: &[char]) -> u64 {
        if pattern.is_empty() || text.is_empty() { return 0; }

        let n = text.len();

        // `h[j]`: best local alignment ending at (i, j).
        // `e[j]`: best alignment ending with a gap in `pattern`.
        // `matched[j]`: whether (i, j) was reached by a match.
        let mut h_prev = vec![0_i64; n + 1];
        let mut h_curr = vec![0_i64; n + 1];
        let mut e = vec![0_i64; n + 1];
        let mut matched_prev = vec![false; n + 1];
        let mut matched_curr = vec![false; n + 1];

        let mut f_prev = vec![0_i64; n + 1];
        let mut best = 0_i64;

        for &p in pattern {
            h_curr[0] = 0;
            matched_curr[0] = false;

            for j in 1..=n {
                let is_match = p == text[j - 1];
                let diagonal = if is_match {
                    let bonus = if matched_prev[j - 1] {
                        self.bonus_consecutive
                    } else {
                        0
                    };
                    h_prev[j - 1] + self.score_match + bonus
                } else {
                    h_prev[j - 1] - self.penalty_mismatch
                };

                e[j] = (h_curr[j - 1] - self.penalty_gap_start)
                    .max(e[j - 1] - self.penalty_gap_extension);
                let f = (h_prev[j] - self.penalty_gap_start)
                    .max(f_prev[j] - self.penalty_gap_extension);
                f_prev[j] = f;

                let score = diagonal.max(e[j]).max(f).max(0);
                h_curr[j] = score;
                matched_curr[j] = is_match && score == diagonal && score > 0;

                best = best.max(score);
            }

            std::mem::swap(&mut h_prev, &mut h_curr);
            std::mem::swap(&mut matched_prev, &mut matched_curr);
        }

        best as u64
    }
}


/// Returns the maximum similarity between `query` and `candidates`
/// under the default scorer.
pub fn max_similarity<T: AsRef<str>>(query: &str, candidates: &[T]) -> u64 {
    SimilarityScorer::default().score(query, candidates)
}


fn fold_case(s: &str) -> Vec<char> {
    s.chars()
        .flat_map(char::to_lowercase)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_scores_zero() {
        assert_eq!(max_similarity("", &["template"]), 0);
        assert_eq!(max_similarity("query", &Vec::<String>::new()), 0);
    }

    #[test]
    fn exact_copy_beats_edited_copy() {
        let scorer = SimilarityScorer::default();
        let template = "### Describe the bug\nA clear description.";
        let exact = scorer.similarity(template, template);
        let edited = scorer.similarity(
            "### describe the bug\nA clear descripton!!",
            template,
        );
        let unrelated = scorer.similarity("buy cheap watches now", template);

        assert!(exact > edited);
        assert!(edited > unrelated);
    }

    #[test]
    fn partial_containment_is_rewarded() {
        let scorer = SimilarityScorer::default();
        let template = "Steps to reproduce the behavior";
        let body = "hello. Steps to reproduce the behavior: run gh issue list";
        let score = scorer.similarity(body, template);
        let full = scorer.similarity(template, template);
        assert_eq!(score, full);
    }

    #[test]
    fn case_is_ignored() {
        let scorer = SimilarityScorer::default();
        assert_eq!(
            scorer.similarity("Hello World", "hello world"),
            scorer.similarity("hello world", "hello world"),
        );
    }

    #[test]
    fn argument_order_does_not_matter() {
        let scorer = SimilarityScorer::default();
        let pairs = [
            ("hello world", "hallo worldo"),
            ("hello world", "g0odbai world"),
            ("abcd", "dcba"),
            ("spam", "maps"),
        ];
        for (a, b) in pairs {
            assert_eq!(scorer.similarity(a, b), scorer.similarity(b, a));
        }
    }

    #[test]
    fn maximum_over_candidates() {
        let lookup = ["hallo worldo", "hello w0rldd", "g0odbai world", "hola world!"];
        let scorer = SimilarityScorer::default();
        let best = lookup.iter()
            .map(|doc| scorer.similarity("hello world", doc))
            .max()
            .unwrap();
        assert_eq!(scorer.score("hello world", &lookup), best);
    }
}
