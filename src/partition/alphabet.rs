use crate::protocol::types::LetterRange;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Splits the alphabet into `worker_count` disjoint letter ranges.
///
/// The letters are shuffled with a generator seeded from `seed`, then cut into chunks of
/// `26 / worker_count` letters; the remainder is appended to the last chunk, which also
/// carries the overflow flag. With more than 26 workers the chunk size is zero, leaving
/// every range but the last empty.
pub fn partition_alphabet(worker_count: usize, seed: u64) -> Vec<LetterRange> {
    if worker_count == 0 {
        return Vec::new();
    }

    let mut letters = ALPHABET.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    letters.shuffle(&mut rng);

    let chunk_size = letters.len() / worker_count;
    let mut ranges: Vec<LetterRange> = (0..worker_count)
        .map(|idx| {
            let start = idx * chunk_size;
            LetterRange::new(letters[start..start + chunk_size].iter().copied(), false)
        })
        .collect();

    if let Some(last) = ranges.last_mut() {
        last.letters
            .extend(letters[worker_count * chunk_size..].iter().copied());
        last.overflow = true;
    }

    ranges
}
