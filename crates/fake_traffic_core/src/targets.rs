use rand::Rng;

pub const MIN_ATTEMPTS: usize = 2;
pub const MAX_ATTEMPTS: usize = 4;

/// Privacy-related endpoints visited by a session.
pub const FAKE_URLS: [&str; 5] = [
    "https://www.eff.org/",
    "https://www.torproject.org/",
    "https://www.getmonero.org/",
    "https://krebsonsecurity.com/",
    "https://httpbin.org/get",
];

pub const USER_AGENTS: [&str; 2] = [
    "Mozilla/5.0 (Windows NT 10.0; rv:91.0) Gecko/20100101 Firefox/91.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:91.0) Gecko/20100101 Firefox/91.0",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTarget {
    pub url: &'static str,
    pub user_agent: &'static str,
}

/// Draws the attempt count and one target per attempt.
///
/// Each attempt picks its URL and user agent independently, so repeats
/// within a session are expected.
pub fn plan_session(rng: &mut impl Rng) -> Vec<RequestTarget> {
    let attempts = rng.gen_range(MIN_ATTEMPTS..=MAX_ATTEMPTS);
    (0..attempts).map(|_| pick_target(rng)).collect()
}

pub fn pick_target(rng: &mut impl Rng) -> RequestTarget {
    RequestTarget {
        url: FAKE_URLS[rng.gen_range(0..FAKE_URLS.len())],
        user_agent: USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn plan_length_stays_within_bounds() {
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan_session(&mut rng);
            assert!((MIN_ATTEMPTS..=MAX_ATTEMPTS).contains(&plan.len()));
            seen.insert(plan.len());
        }

        assert_eq!(seen, HashSet::from([2, 3, 4]));
    }

    #[test]
    fn targets_come_from_candidate_lists() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let target = pick_target(&mut rng);
            assert!(FAKE_URLS.contains(&target.url));
            assert!(USER_AGENTS.contains(&target.user_agent));
        }
    }

    #[test]
    fn same_seed_yields_same_plan() {
        let first = plan_session(&mut StdRng::seed_from_u64(42));
        let second = plan_session(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn every_candidate_is_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut urls = HashSet::new();
        let mut agents = HashSet::new();
        for _ in 0..500 {
            let target = pick_target(&mut rng);
            urls.insert(target.url);
            agents.insert(target.user_agent);
        }

        assert_eq!(urls.len(), FAKE_URLS.len());
        assert_eq!(agents.len(), USER_AGENTS.len());
    }
}
