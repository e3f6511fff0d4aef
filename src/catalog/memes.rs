//! Meme templates and scenario-keyword matching for the caption tool.

use rand::seq::SliceRandom;
use rand::Rng;

/// Imgflip template ids used by the PM meme configs.
pub mod templates {
    pub const DISTRACTED_BOYFRIEND: &str = "112126428";
    pub const DRAKE: &str = "181913649";
    pub const TWO_BUTTONS: &str = "87743020";
    pub const IS_THIS: &str = "100947";
    pub const CHANGE_MY_MIND: &str = "129242436";
    pub const THIS_IS_FINE: &str = "55311130";
    pub const ONE_DOES_NOT_SIMPLY: &str = "61579";
}

/// A scenario keyword mapped to a template and its caption boxes.
#[derive(Debug, PartialEq, Eq)]
pub struct MemeConfig {
    pub keyword: &'static str,
    pub template_id: &'static str,
    /// Caption boxes in template order (at most three).
    pub captions: &'static [&'static str],
}

/// Matched in this order; the first keyword contained in the scenario wins.
pub static MEME_CONFIGS: &[MemeConfig] = &[
    MemeConfig {
        keyword: "deadline",
        template_id: templates::DRAKE,
        captions: &["Following realistic sprint planning", "Promising features by tomorrow"],
    },
    MemeConfig {
        keyword: "competitor",
        template_id: templates::DISTRACTED_BOYFRIEND,
        captions: &["Our Technical Roadmap", "PM", "Competitor's Feature Screenshot"],
    },
    MemeConfig {
        keyword: "process",
        template_id: templates::DRAKE,
        captions: &["Testing and code review", "Shipping untested code immediately"],
    },
    MemeConfig {
        keyword: "estimate",
        template_id: templates::IS_THIS,
        captions: &["Is this a simple 5-minute change?", "Complex 3-sprint feature"],
    },
    MemeConfig {
        keyword: "fire",
        template_id: templates::THIS_IS_FINE,
        captions: &["Everything is going", "exactly as planned"],
    },
    MemeConfig {
        keyword: "simple",
        template_id: templates::CHANGE_MY_MIND,
        captions: &["This is just adding a button", "Change my mind"],
    },
    MemeConfig {
        keyword: "buttons",
        template_id: templates::TWO_BUTTONS,
        captions: &["Follow development process", "Ship broken feature fast"],
    },
    MemeConfig {
        keyword: "testing",
        template_id: templates::ONE_DOES_NOT_SIMPLY,
        captions: &["One does not simply", "Skip testing in production"],
    },
];

/// First config whose keyword occurs in `scenario`, ignoring case.
pub fn match_meme(scenario: &str) -> Option<&'static MemeConfig> {
    let lower = scenario.to_lowercase();
    MEME_CONFIGS.iter().find(|m| lower.contains(m.keyword))
}

/// Pick the meme for a request.
///
/// A `meme_type` naming a keyword exactly wins; otherwise the scenario is
/// keyword-matched, and with no match a config is drawn uniformly at random.
pub fn select_meme<R: Rng + ?Sized>(
    scenario: &str,
    meme_type: &str,
    rng: &mut R,
) -> &'static MemeConfig {
    let forced = meme_type.trim().to_lowercase();
    if let Some(config) = MEME_CONFIGS.iter().find(|m| m.keyword == forced) {
        return config;
    }
    match_meme(scenario)
        .or_else(|| MEME_CONFIGS.choose(rng))
        .unwrap_or(&MEME_CONFIGS[0])
}
