#![no_main]
use holdem_equity::core::{Card, CardBitSet, best_rank_by_combinations, rank_cards};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|cards: [Card; 7]| {
    let set: CardBitSet = cards.iter().copied().collect();
    if set.count() != 7 {
        return;
    }
    let r_seven = rank_cards(set);
    let r_five_max = best_rank_by_combinations(&cards).unwrap();
    assert_eq!(r_five_max, r_seven);
});
