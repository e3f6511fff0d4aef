//! Canned-response selection.

use crate::catalog::Catalog;
use rand::seq::SliceRandom;
use rand::Rng;

/// Returned for tools without a fallback set.
pub const GENERIC_FALLBACK: &str = "This is UNACCEPTABLE!";

/// Pick a canned response for `tool`, uniformly at random. Never fails.
pub fn fallback(catalog: &Catalog, tool: &str) -> &'static str {
    select_fallback(catalog, tool, &mut rand::thread_rng())
}

pub fn select_fallback<R: Rng + ?Sized>(catalog: &Catalog, tool: &str, rng: &mut R) -> &'static str {
    catalog
        .fallbacks(tool)
        .and_then(|set| set.choose(rng).copied())
        .unwrap_or(GENERIC_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn picks_are_members_of_the_set() {
        let catalog = Catalog::for_profile(Profile::PmMeme);
        for tool in catalog.tools() {
            if tool.fallbacks.is_empty() {
                continue;
            }
            for _ in 0..20 {
                let pick = fallback(&catalog, tool.name);
                assert!(tool.fallbacks.contains(&pick), "{}: {}", tool.name, pick);
            }
        }
    }

    #[test]
    fn every_entry_is_reachable() {
        let catalog = Catalog::for_profile(Profile::Pm);
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<_> = (0..200)
            .map(|_| select_fallback(&catalog, "bypass_development_process", &mut rng))
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn unknown_tool_gets_generic_line() {
        let catalog = Catalog::for_profile(Profile::Customer);
        assert_eq!(fallback(&catalog, "no_such_tool"), GENERIC_FALLBACK);
    }

    #[test]
    fn inline_only_tool_gets_generic_line() {
        let catalog = Catalog::for_profile(Profile::Pm);
        assert_eq!(fallback(&catalog, "invoke_competitor_feature"), GENERIC_FALLBACK);
    }
}
