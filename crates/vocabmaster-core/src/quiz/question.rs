// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;

use crate::quiz::mode::GameMode;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::types::word::WordEntry;
use crate::types::word::WordId;

/// What replaces the word in a fill-in-the-blank prompt.
pub const BLANK: &str = "______";

/// How many wrong options a definition match shows.
const DISTRACTORS: usize = 3;

/// A question, with everything needed to show and grade it.
#[derive(Clone, PartialEq, Debug)]
pub enum Question {
    DefinitionMatch {
        target: WordEntry,
        /// The target and its distractors, shuffled. Each is shown by its
        /// formal meaning.
        options: Vec<WordEntry>,
    },
    FillInTheBlank {
        target: WordEntry,
        /// The examples with the word blanked out.
        prompt: String,
    },
    QuickFire {
        target: WordEntry,
        shown_definition: String,
        /// Whether `shown_definition` is the target's own meaning.
        is_true: bool,
    },
}

/// A user's answer. Each mode accepts exactly one kind.
#[derive(Clone, PartialEq, Debug)]
pub enum Answer {
    Choice(WordId),
    Text(String),
    Verdict(bool),
}

impl Question {
    /// Build a question for `mode` from the pool. `None` only if the pool is
    /// empty.
    pub fn generate(mode: GameMode, pool: &[WordEntry], rng: &mut TinyRng) -> Option<Question> {
        let target = rng.choose(pool)?.clone();
        let question = match mode {
            GameMode::DefinitionMatch => {
                let mut options = sample_distractors(pool, target.id, DISTRACTORS, rng);
                options.push(target.clone());
                let options = shuffle(options, rng);
                Question::DefinitionMatch { target, options }
            }
            GameMode::FillInTheBlank => {
                let prompt = blank_out(&target.examples, &target.word);
                Question::FillInTheBlank { target, prompt }
            }
            GameMode::QuickFire => {
                let other = if rng.flip() {
                    None
                } else {
                    sample_distractors(pool, target.id, 1, rng).pop()
                };
                match other {
                    Some(other) => Question::QuickFire {
                        shown_definition: other.meanings.formal().to_string(),
                        target,
                        is_true: false,
                    },
                    None => Question::QuickFire {
                        shown_definition: target.meanings.formal().to_string(),
                        target,
                        is_true: true,
                    },
                }
            }
        };
        Some(question)
    }

    pub fn mode(&self) -> GameMode {
        match self {
            Question::DefinitionMatch { .. } => GameMode::DefinitionMatch,
            Question::FillInTheBlank { .. } => GameMode::FillInTheBlank,
            Question::QuickFire { .. } => GameMode::QuickFire,
        }
    }

    pub fn target(&self) -> &WordEntry {
        match self {
            Question::DefinitionMatch { target, .. } => target,
            Question::FillInTheBlank { target, .. } => target,
            Question::QuickFire { target, .. } => target,
        }
    }

    /// Grade an answer. `None` if the answer is of the wrong kind for this
    /// question, or names an option that was not offered.
    pub fn check(&self, answer: &Answer) -> Option<bool> {
        match (self, answer) {
            (Question::DefinitionMatch { target, options }, Answer::Choice(id)) => {
                if options.iter().any(|o| o.id == *id) {
                    Some(*id == target.id)
                } else {
                    None
                }
            }
            (Question::FillInTheBlank { target, .. }, Answer::Text(text)) => {
                Some(text.trim().to_lowercase() == target.word.to_lowercase())
            }
            (Question::QuickFire { is_true, .. }, Answer::Verdict(verdict)) => {
                Some(verdict == is_true)
            }
            _ => None,
        }
    }

    /// What to show the user after a wrong answer.
    pub fn correct_answer(&self) -> &str {
        match self {
            Question::FillInTheBlank { target, .. } => &target.word,
            Question::DefinitionMatch { target, .. } | Question::QuickFire { target, .. } => {
                target.meanings.formal()
            }
        }
    }
}

/// Sample up to `count` distinct words other than `exclude`. Returns fewer
/// when the pool does not have enough.
pub fn sample_distractors(
    pool: &[WordEntry],
    exclude: WordId,
    count: usize,
    rng: &mut TinyRng,
) -> Vec<WordEntry> {
    let mut seen: HashSet<WordId> = HashSet::new();
    seen.insert(exclude);
    let candidates: Vec<&WordEntry> = pool.iter().filter(|w| seen.insert(w.id)).collect();
    rng.sample(&candidates, count)
        .into_iter()
        .cloned()
        .collect()
}

/// Replace the word in `text` with [`BLANK`]: as written, capitalized, and
/// in all caps.
pub fn blank_out(text: &str, word: &str) -> String {
    if word.is_empty() {
        return text.to_string();
    }
    [word.to_string(), capitalize(word), word.to_uppercase()]
        .iter()
        .fold(text.to_string(), |acc, variant| acc.replace(variant.as_str(), BLANK))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::pool;
    use crate::helper::word;

    #[test]
    fn test_blank_out_case_variants() {
        assert_eq!(blank_out("The CAT sat", "cat"), "The ______ sat");
        assert_eq!(
            blank_out("Cats? A cat is a CAT.", "cat"),
            "______s? A ______ is a ______."
        );
        assert_eq!(blank_out("nothing here", "cat"), "nothing here");
        assert_eq!(blank_out("unchanged", ""), "unchanged");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("serendipity"), "Serendipity");
        assert_eq!(capitalize("iPhone"), "Iphone");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_definition_match_with_four_words() {
        let words = pool(4);
        for seed in 0..200 {
            let mut rng = TinyRng::from_seed(seed);
            let question = Question::generate(GameMode::DefinitionMatch, &words, &mut rng).unwrap();
            let Question::DefinitionMatch { target, options } = &question else {
                panic!("wrong question kind");
            };
            assert_eq!(options.len(), 4);
            let ids: HashSet<WordId> = options.iter().map(|o| o.id).collect();
            assert_eq!(ids.len(), 4);
            assert!(ids.contains(&target.id));
            assert_eq!(question.check(&Answer::Choice(target.id)), Some(true));
        }
    }

    #[test]
    fn test_definition_match_rejects_unknown_option() {
        let words = pool(4);
        let mut rng = TinyRng::from_seed(1);
        let question = Question::generate(GameMode::DefinitionMatch, &words, &mut rng).unwrap();
        assert_eq!(question.check(&Answer::Choice(WordId::new(999))), None);
        assert_eq!(question.check(&Answer::Verdict(true)), None);
    }

    #[test]
    fn test_distractors_exclude_target() {
        let words = pool(6);
        let mut rng = TinyRng::from_seed(5);
        for _ in 0..100 {
            let distractors = sample_distractors(&words, WordId::new(2), 3, &mut rng);
            assert_eq!(distractors.len(), 3);
            assert!(distractors.iter().all(|d| d.id != WordId::new(2)));
        }
    }

    #[test]
    fn test_distractors_take_what_is_available() {
        let words = pool(3);
        let mut rng = TinyRng::from_seed(5);
        let distractors = sample_distractors(&words, WordId::new(1), 3, &mut rng);
        assert_eq!(distractors.len(), 2);
        let alone = pool(1);
        assert!(sample_distractors(&alone, WordId::new(1), 3, &mut rng).is_empty());
    }

    #[test]
    fn test_distractors_skip_duplicate_ids() {
        let words = vec![word(1, "a"), word(2, "b"), word(2, "b"), word(2, "b")];
        let mut rng = TinyRng::from_seed(8);
        let distractors = sample_distractors(&words, WordId::new(1), 3, &mut rng);
        assert_eq!(distractors.len(), 1);
    }

    #[test]
    fn test_distractors_are_reproducible() {
        let words = pool(10);
        let a = sample_distractors(&words, WordId::new(3), 3, &mut TinyRng::from_seed(11));
        let b = sample_distractors(&words, WordId::new(3), 3, &mut TinyRng::from_seed(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_in_the_blank() {
        let mut target = word(1, "cat");
        target.examples = "The CAT sat. My cat purrs.".to_string();
        let mut rng = TinyRng::from_seed(0);
        let question = Question::generate(GameMode::FillInTheBlank, &[target], &mut rng).unwrap();
        let Question::FillInTheBlank { prompt, .. } = &question else {
            panic!("wrong question kind");
        };
        assert_eq!(prompt, "The ______ sat. My ______ purrs.");
        assert_eq!(question.check(&Answer::Text("  Cat ".into())), Some(true));
        assert_eq!(question.check(&Answer::Text("dog".into())), Some(false));
        assert_eq!(question.check(&Answer::Choice(WordId::new(1))), None);
        assert_eq!(question.correct_answer(), "cat");
    }

    #[test]
    fn test_quick_fire_split_and_truth() {
        let words = pool(5);
        let mut rng = TinyRng::from_seed(2024);
        let total = 4000;
        let mut trues = 0;
        for _ in 0..total {
            let question = Question::generate(GameMode::QuickFire, &words, &mut rng).unwrap();
            let Question::QuickFire {
                target,
                shown_definition,
                is_true,
            } = &question
            else {
                panic!("wrong question kind");
            };
            if *is_true {
                trues += 1;
                assert_eq!(shown_definition, target.meanings.formal());
            } else {
                assert_ne!(shown_definition, target.meanings.formal());
            }
            assert_eq!(question.check(&Answer::Verdict(*is_true)), Some(true));
            assert_eq!(question.check(&Answer::Verdict(!*is_true)), Some(false));
        }
        let share = trues as f64 / total as f64;
        assert!((0.45..=0.55).contains(&share), "true share = {share}");
    }

    #[test]
    fn test_quick_fire_single_word_is_true() {
        let words = pool(1);
        let mut rng = TinyRng::from_seed(3);
        for _ in 0..50 {
            let question = Question::generate(GameMode::QuickFire, &words, &mut rng).unwrap();
            assert!(matches!(question, Question::QuickFire { is_true: true, .. }));
        }
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = TinyRng::from_seed(3);
        for mode in GameMode::ALL {
            assert_eq!(Question::generate(mode, &[], &mut rng), None);
        }
    }
}
