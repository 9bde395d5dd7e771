//! Random-play game state: one round presents every quiz exactly once, in
//! random order, and tracks the streak of consecutive correct answers.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use rand::Rng;

use crate::db::models::Quiz;

/// The catalog has no quizzes, so there is nothing to draw.
/// Recoverable; handlers render an informational page for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCatalogError;

impl fmt::Display for EmptyCatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no quizzes available to play")
    }
}

impl std::error::Error for EmptyCatalogError {}

/// Per-browser-session state of one random-play round.
///
/// `Default` is the not-started state: empty pool, score 0. A missing or
/// stale session entry therefore degrades to a fresh round rather than an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayState {
    remaining: Vec<i64>,
    score: usize,
}

impl PlayState {
    /// Draw the next quiz to present, removing it from the pool so it cannot
    /// repeat within the round. An empty pool is refilled from the full
    /// catalog first. Fails without mutating state if the catalog is empty.
    pub fn next_item<'a, R: Rng>(
        &mut self,
        catalog: &'a [Quiz],
        rng: &mut R,
    ) -> Result<&'a Quiz, EmptyCatalogError> {
        if catalog.is_empty() {
            return Err(EmptyCatalogError);
        }

        // Quizzes deleted since the round started must not be drawn.
        self.remaining
            .retain(|id| catalog.iter().any(|q| q.id == *id));

        if self.remaining.is_empty() {
            self.remaining = catalog.iter().map(|q| q.id).collect();
        }

        let idx = rng.gen_range(0..self.remaining.len());
        let id = self.remaining.swap_remove(idx);

        // Present after the retain above.
        Ok(catalog.iter().find(|q| q.id == id).unwrap_or(&catalog[0]))
    }

    /// Score the answer for the quiz just presented. A correct answer extends
    /// the streak; a miss resets the score to 0 and ends the round. The pool
    /// is left untouched either way.
    pub fn submit_answer(&mut self, submitted: &str, expected: &str) -> bool {
        let correct = answers_match(submitted, expected);
        if correct {
            self.score += 1;
        } else {
            self.score = 0;
        }
        correct
    }

    /// A round is complete once every quiz in the catalog has been answered
    /// correctly in a row since the last reset.
    pub fn is_round_complete(&self, catalog_size: usize) -> bool {
        catalog_size > 0 && self.score == catalog_size
    }

    /// Back to the not-started state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }
}

/// Trimmed, case-insensitive answer comparison. Internal whitespace,
/// punctuation and accents stay significant.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// In-memory store of play states, keyed by the random-play cookie token.
/// The mutex serializes concurrent requests on the same session.
#[derive(Clone, Default)]
pub struct PlayStore {
    inner: Arc<Mutex<HashMap<String, PlayState>>>,
}

impl PlayStore {
    /// Run `f` against the token's state while holding the map lock, so the
    /// whole read-modify-write is one critical section. Two requests on the
    /// same token can never draw from the same snapshot of the pool.
    /// Unknown tokens start from the not-started state.
    pub fn with_state<R>(&self, token: &str, f: impl FnOnce(&mut PlayState) -> R) -> R {
        let mut states = self.inner.lock().expect("play store lock poisoned");
        f(states.entry(token.to_owned()).or_default())
    }

    /// Snapshot of the token's state, or a fresh not-started state.
    pub fn get(&self, token: &str) -> PlayState {
        self.inner
            .lock()
            .expect("play store lock poisoned")
            .get(token)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn quiz(id: i64, question: &str, answer: &str) -> Quiz {
        Quiz {
            id,
            question: question.to_owned(),
            answer: answer.to_owned(),
            author_id: 0,
            author_name: None,
        }
    }

    fn catalog() -> Vec<Quiz> {
        vec![quiz(1, "2+2?", "4"), quiz(2, "Capital of France?", "Paris")]
    }

    #[test]
    fn empty_catalog_fails_without_mutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = PlayState::default();
        assert_eq!(state.next_item(&[], &mut rng), Err(EmptyCatalogError));
        assert_eq!(state, PlayState::default());
    }

    #[test]
    fn no_item_repeats_within_a_round() {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog: Vec<Quiz> = (1..=20).map(|i| quiz(i, "q", "a")).collect();
        let mut state = PlayState::default();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..catalog.len() {
            let item = state.next_item(&catalog, &mut rng).unwrap();
            assert!(seen.insert(item.id), "quiz {} drawn twice", item.id);
        }
        assert_eq!(state.remaining_len(), 0);
    }

    #[test]
    fn pool_shrinks_by_one_per_draw() {
        let mut rng = StdRng::seed_from_u64(3);
        let catalog = catalog();
        let mut state = PlayState::default();

        state.next_item(&catalog, &mut rng).unwrap();
        assert_eq!(state.remaining_len(), 1);
        state.next_item(&catalog, &mut rng).unwrap();
        assert_eq!(state.remaining_len(), 0);
    }

    #[test]
    fn full_correct_round_completes() {
        let mut rng = StdRng::seed_from_u64(11);
        let catalog = catalog();
        let mut state = PlayState::default();

        for _ in 0..catalog.len() {
            let expected = state.next_item(&catalog, &mut rng).unwrap().answer.clone();
            assert!(state.submit_answer(&expected, &expected));
        }

        assert_eq!(state.score(), catalog.len());
        assert!(state.is_round_complete(catalog.len()));

        state.reset();
        assert_eq!(state, PlayState::default());
    }

    #[test]
    fn miss_resets_score_but_keeps_pool() {
        let mut rng = StdRng::seed_from_u64(5);
        let catalog = catalog();
        let mut state = PlayState::default();

        let item = state.next_item(&catalog, &mut rng).unwrap();
        assert!(!state.submit_answer("wrong", &item.answer));
        assert_eq!(state.score(), 0);
        assert!(!state.is_round_complete(catalog.len()));
        // Pool keeps the one undrawn quiz; no refill on a miss.
        assert_eq!(state.remaining_len(), 1);
    }

    #[test]
    fn miss_resets_score_regardless_of_prior_streak() {
        let mut state = PlayState::default();
        assert!(state.submit_answer("4", "4"));
        assert!(state.submit_answer("Paris", "paris"));
        assert_eq!(state.score(), 2);
        assert!(!state.submit_answer("London", "paris"));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn comparison_ignores_case_and_surrounding_whitespace() {
        assert!(answers_match("  Paris ", "paris"));
        assert!(answers_match("PARIS", " paris "));
        assert!(!answers_match("Par is", "paris"));
        assert!(!answers_match("", "paris"));
    }

    #[test]
    fn empty_submission_only_matches_blank_answer() {
        let mut state = PlayState::default();
        assert!(!state.submit_answer("", "4"));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn pool_refills_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(9);
        let catalog = catalog();
        let mut state = PlayState::default();

        for _ in 0..catalog.len() {
            state.next_item(&catalog, &mut rng).unwrap();
        }
        assert_eq!(state.remaining_len(), 0);

        // Next draw starts a new pass over the catalog.
        state.next_item(&catalog, &mut rng).unwrap();
        assert_eq!(state.remaining_len(), catalog.len() - 1);
    }

    #[test]
    fn deleted_quizzes_are_pruned_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(13);
        let full: Vec<Quiz> = (1..=4).map(|i| quiz(i, "q", "a")).collect();
        let mut state = PlayState::default();
        state.next_item(&full, &mut rng).unwrap();

        // Only quiz 1 survives in the catalog.
        let shrunk = vec![quiz(1, "q", "a")];
        let item = state.next_item(&shrunk, &mut rng).unwrap();
        assert_eq!(item.id, 1);
    }

    #[test]
    fn fresh_state_is_never_a_completed_round() {
        let state = PlayState::default();
        assert!(!state.is_round_complete(0));
        assert!(!state.is_round_complete(3));
    }

    #[test]
    fn store_returns_fresh_state_for_unknown_token() {
        let store = PlayStore::default();
        assert_eq!(store.get("nope"), PlayState::default());

        store.with_state("tok", |state| {
            state.submit_answer("a", "a");
        });
        assert_eq!(store.get("tok").score(), 1);

        store.with_state("tok", PlayState::reset);
        assert_eq!(store.get("tok"), PlayState::default());
    }

    #[test]
    fn store_mutations_apply_in_place() {
        let store = PlayStore::default();
        let catalog: Vec<Quiz> = (1..=3).map(|i| quiz(i, "q", "a")).collect();
        let mut rng = StdRng::seed_from_u64(17);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..catalog.len() {
            let id = store.with_state("tok", |state| {
                state.next_item(&catalog, &mut rng).unwrap().id
            });
            assert!(seen.insert(id), "quiz {id} drawn twice");
        }
        assert_eq!(store.get("tok").remaining_len(), 0);
    }

    #[test]
    fn concurrent_draws_on_one_token_never_repeat() {
        let store = PlayStore::default();
        let catalog: Vec<Quiz> = (1..=16).map(|i| quiz(i, "q", "a")).collect();

        let drawn: Vec<i64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..catalog.len())
                .map(|_| {
                    scope.spawn(|| {
                        store.with_state("tok", |state| {
                            state
                                .next_item(&catalog, &mut rand::thread_rng())
                                .unwrap()
                                .id
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let unique: std::collections::HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), catalog.len(), "a quiz was drawn twice");
        assert_eq!(store.get("tok").remaining_len(), 0);
    }
}
