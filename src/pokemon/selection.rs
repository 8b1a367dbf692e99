use rand::Rng;

/// Uniform index picker used by the roulette route.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&self, len: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index, clamped to the slice.
#[derive(Debug, Clone, Copy)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick_index(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

pub fn pick_random<'a>(names: &'a [String], random: &dyn RandomSource) -> Option<&'a str> {
    if names.is_empty() {
        return None;
    }
    names.get(random.pick_index(names.len())).map(String::as_str)
}

/// Name with the most characters; the earliest one wins a tie.
pub fn longest_name(names: &[String]) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for name in names {
        let len = name.chars().count();
        match best {
            Some((_, best_len)) if len <= best_len => {}
            _ => best = Some((name.as_str(), len)),
        }
    }
    best.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_longest_name_unique_max() {
        let list = names(&["pidgey", "pidgeotto", "pidgeot"]);
        for _ in 0..10 {
            assert_eq!(longest_name(&list), Some("pidgeotto"));
        }
    }

    #[test]
    fn test_longest_name_tie_keeps_first() {
        assert_eq!(longest_name(&names(&["abcd", "wxyz"])), Some("abcd"));
        assert_eq!(longest_name(&names(&["ab", "wxyz", "abcd"])), Some("wxyz"));
    }

    #[test]
    fn test_longest_name_counts_characters() {
        // "flabébé" is 7 characters but 9 bytes
        assert_eq!(longest_name(&names(&["flabébé", "abcdefgh"])), Some("abcdefgh"));
        assert_eq!(longest_name(&names(&["flabébé", "abcdefg"])), Some("flabébé"));
    }

    #[test]
    fn test_longest_name_empty() {
        assert_eq!(longest_name(&[]), None);
    }

    #[test]
    fn test_pick_random_single_entry() {
        let list = names(&["onix"]);
        for _ in 0..20 {
            assert_eq!(pick_random(&list, &ThreadRandom), Some("onix"));
        }
    }

    #[test]
    fn test_pick_random_stays_in_range() {
        let list = names(&["a", "b", "c"]);
        for _ in 0..200 {
            assert!(pick_random(&list, &ThreadRandom).is_some());
        }
        assert_eq!(pick_random(&list, &FixedIndex(1)), Some("b"));
        assert_eq!(pick_random(&list, &FixedIndex(99)), Some("c"));
        assert_eq!(pick_random(&[], &FixedIndex(0)), None);
    }
}
