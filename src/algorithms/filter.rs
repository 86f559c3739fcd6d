//! History-driven candidate filtering.

use crate::decompose::{DecompCache, DecomposeError, Decomposition};
use crate::dictionary::Dictionary;
use crate::Guess;

/// Keep the idioms still consistent with every guess made so far, in
/// dictionary order. Each guess is decomposed once, up front; a candidate
/// is dropped at its first mismatching round.
pub fn filter_candidates<'d>(
    dictionary: &'d Dictionary,
    history: &[Guess],
    cache: &mut DecompCache,
) -> Result<Vec<&'d str>, DecomposeError> {
    let mut rounds: Vec<(Decomposition, &Guess)> = Vec::with_capacity(history.len());
    for guess in history {
        // Guesses need not be dictionary words; the cache covers the rest.
        let decomp = match dictionary.decomposition(&guess.word) {
            Some(decomp) => decomp.clone(),
            None => cache.decomposition(&guess.word)?.clone(),
        };
        rounds.push((decomp, guess));
    }
    Ok(dictionary
        .iter()
        .filter(|(_, candidate)| {
            rounds
                .iter()
                .all(|(decomp, guess)| guess.matches(decomp, candidate))
        })
        .map(|(word, _)| word)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Correctness, FeedbackMatrix, DIMENSIONS, WORD_LEN};

    const WORDS: [&str; 4] = ["一马当先", "万马奔腾", "爱不释手", "中流砥柱"];

    fn dictionary() -> Dictionary {
        let json = format!(
            r#"{{"{}": null, "{}": null, "{}": null, "{}": null}}"#,
            WORDS[0], WORDS[1], WORDS[2], WORDS[3],
        );
        Dictionary::from_json_str(&json).unwrap()
    }

    fn observed(dict: &Dictionary, guess: &str, answer: &str) -> Guess {
        let mask = FeedbackMatrix::of_pair(
            dict.decomposition(guess).unwrap(),
            dict.decomposition(answer).unwrap(),
        );
        Guess {
            word: guess.to_string(),
            mask,
        }
    }

    #[test]
    fn empty_history_keeps_everything() {
        let dict = dictionary();
        let mut cache = DecompCache::new();
        let survivors = filter_candidates(&dict, &[], &mut cache).unwrap();
        assert_eq!(survivors, WORDS);
    }

    #[test]
    fn true_answer_always_survives() {
        let dict = dictionary();
        let mut cache = DecompCache::new();
        let answer = "爱不释手";
        let history = vec![
            observed(&dict, "一马当先", answer),
            observed(&dict, "中流砥柱", answer),
        ];
        let survivors = filter_candidates(&dict, &history, &mut cache).unwrap();
        assert!(survivors.contains(&answer));
    }

    #[test]
    fn exact_guess_filters_to_itself() {
        let dict = dictionary();
        let mut cache = DecompCache::new();
        let history = vec![observed(&dict, "万马奔腾", "万马奔腾")];
        let survivors = filter_candidates(&dict, &history, &mut cache).unwrap();
        assert_eq!(survivors, ["万马奔腾"]);
    }

    #[test]
    fn out_of_dictionary_guesses_go_through_the_cache() {
        let dict = dictionary();
        let mut cache = DecompCache::new();
        // 马不停蹄 is a real idiom but absent from this dictionary.
        let guess = crate::decompose::decompose("马不停蹄").unwrap();
        let answer = dict.decomposition("一马当先").unwrap();
        let history = vec![Guess {
            word: "马不停蹄".to_string(),
            mask: FeedbackMatrix::of_pair(&guess, answer),
        }];
        let survivors = filter_candidates(&dict, &history, &mut cache).unwrap();
        assert!(survivors.contains(&"一马当先"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn contradictory_history_empties_the_field() {
        let dict = dictionary();
        let mut cache = DecompCache::new();
        // All-correct feedback for a guess that matches nothing else.
        let all_correct =
            FeedbackMatrix::from_cells([[Correctness::Correct; WORD_LEN]; DIMENSIONS]);
        let history = vec![
            Guess {
                word: "一马当先".to_string(),
                mask: all_correct,
            },
            Guess {
                word: "中流砥柱".to_string(),
                mask: all_correct,
            },
        ];
        let survivors = filter_candidates(&dict, &history, &mut cache).unwrap();
        assert!(survivors.is_empty());
    }
}
