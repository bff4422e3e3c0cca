use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::vocab::VocabularyEntry;

pub const DEFAULT_CHOICE_COUNT: usize = 4;
pub const MIN_CHOICE_COUNT: usize = 2;
pub const MAX_CHOICE_COUNT: usize = 8;

/// Build a shuffled list of `choice_count` unique answer options for
/// `correct`: its word plus distractors drawn from `pool`.
///
/// Pool words equal to the correct word (ignoring case) are never offered,
/// and duplicate pool words are only used once. When the pool runs short the
/// remaining slots get synthesized `Option N` placeholders. Counts outside
/// [`MIN_CHOICE_COUNT`]..=[`MAX_CHOICE_COUNT`] are clamped into that range.
pub fn generate_choices(
    correct: &VocabularyEntry,
    pool: &[String],
    choice_count: usize,
    rng: &mut SmallRng,
) -> Vec<String> {
    let choice_count = choice_count.clamp(MIN_CHOICE_COUNT, MAX_CHOICE_COUNT);
    let needed = choice_count - 1;

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(correct.word.to_lowercase());

    let mut candidates: Vec<&String> = pool
        .iter()
        .filter(|w| seen.insert(w.to_lowercase()))
        .collect();
    candidates.shuffle(rng);

    let mut choices: Vec<String> = Vec::with_capacity(choice_count);
    choices.push(correct.word.clone());
    choices.extend(candidates.into_iter().take(needed).cloned());

    // `seen` holds every pool word, so placeholders can't collide with
    // anything already chosen.
    while choices.len() < choice_count {
        let mut placeholder = format!("Option {}", choices.len() + 1);
        while !seen.insert(placeholder.to_lowercase()) {
            placeholder.push_str("_alt");
        }
        choices.push(placeholder);
    }

    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn entry(word: &str) -> VocabularyEntry {
        VocabularyEntry::new(word, "a definition", "")
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn assert_valid(choices: &[String], correct: &str, count: usize) {
        assert_eq!(choices.len(), count);
        let matches = choices
            .iter()
            .filter(|c| c.to_lowercase() == correct.to_lowercase())
            .count();
        assert_eq!(matches, 1, "correct word must appear exactly once: {choices:?}");
        assert!(choices.iter().any(|c| c == correct));
        let unique: HashSet<&String> = choices.iter().collect();
        assert_eq!(unique.len(), count, "duplicates in {choices:?}");
    }

    #[test]
    fn full_pool_yields_requested_count() {
        let pool = words(&["lucid", "wary", "tacit", "vex", "stoic", "banal"]);
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let choices = generate_choices(&entry("eloquent"), &pool, 4, &mut rng);
            assert_valid(&choices, "eloquent", 4);
            assert!(choices.iter().all(|c| c == "eloquent" || pool.contains(c)));
        }
    }

    #[test]
    fn correct_word_in_pool_is_filtered_ignoring_case() {
        let pool = words(&["ELOQUENT", "Eloquent", "lucid", "wary", "tacit"]);
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let choices = generate_choices(&entry("eloquent"), &pool, 4, &mut rng);
            assert_valid(&choices, "eloquent", 4);
        }
    }

    #[test]
    fn short_pool_is_padded_with_placeholders() {
        let pool = words(&["lucid"]);
        let mut rng = SmallRng::seed_from_u64(7);
        let choices = generate_choices(&entry("eloquent"), &pool, 4, &mut rng);
        assert_valid(&choices, "eloquent", 4);
        assert!(choices.contains(&"lucid".to_string()));
        assert_eq!(choices.iter().filter(|c| c.starts_with("Option ")).count(), 2);
    }

    #[test]
    fn empty_pool_still_yields_unique_choices() {
        let mut rng = SmallRng::seed_from_u64(1);
        let choices = generate_choices(&entry("eloquent"), &[], 6, &mut rng);
        assert_valid(&choices, "eloquent", 6);
    }

    #[test]
    fn placeholders_avoid_correct_word_and_pool_words() {
        // The correct word and the pool both look like placeholders.
        let pool = words(&["option 3", "Option 3", "Option 4_alt"]);
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let choices = generate_choices(&entry("Option 2"), &pool, 5, &mut rng);
            assert_valid(&choices, "Option 2", 5);
            let lowered: HashSet<String> = choices.iter().map(|c| c.to_lowercase()).collect();
            assert_eq!(lowered.len(), 5, "case-insensitive collision in {choices:?}");
        }
    }

    #[test]
    fn duplicate_pool_words_used_once() {
        let pool = words(&["lucid", "lucid", "lucid"]);
        let mut rng = SmallRng::seed_from_u64(3);
        let choices = generate_choices(&entry("eloquent"), &pool, 4, &mut rng);
        assert_valid(&choices, "eloquent", 4);
        assert_eq!(choices.iter().filter(|c| *c == "lucid").count(), 1);
    }

    #[test]
    fn count_below_minimum_is_raised() {
        let pool = words(&["lucid", "wary"]);
        let mut rng = SmallRng::seed_from_u64(0);
        let choices = generate_choices(&entry("eloquent"), &pool, 0, &mut rng);
        assert_valid(&choices, "eloquent", MIN_CHOICE_COUNT);
    }

    #[test]
    fn count_above_maximum_is_capped() {
        let pool = words(&["lucid", "wary"]);
        let mut rng = SmallRng::seed_from_u64(0);
        let choices = generate_choices(&entry("eloquent"), &pool, usize::MAX, &mut rng);
        assert_valid(&choices, "eloquent", MAX_CHOICE_COUNT);
    }

    #[test]
    fn same_seed_same_choices() {
        let pool = words(&["lucid", "wary", "tacit", "vex", "stoic", "banal"]);
        let a = generate_choices(&entry("eloquent"), &pool, 4, &mut SmallRng::seed_from_u64(99));
        let b = generate_choices(&entry("eloquent"), &pool, 4, &mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn correct_answer_position_varies() {
        let pool = words(&["lucid", "wary", "tacit", "vex", "stoic", "banal"]);
        let mut positions = HashSet::new();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..200 {
            let choices = generate_choices(&entry("eloquent"), &pool, 4, &mut rng);
            positions.insert(choices.iter().position(|c| c == "eloquent").unwrap());
        }
        assert_eq!(positions.len(), 4);
    }
}
