//! Angry-customer Karen tools.

use super::{Backend, Envelope, ParamSpec, ToolArgs, ToolSpec};

/// Made-up company policies Karen is certain exist.
pub const FAKE_POLICIES: &[&str] = &[
    "According to Section 4.7 of the Customer Service Charter, all complaints must be escalated within 2 minutes.",
    "Corporate Policy 12-B clearly states that customers are entitled to speak with senior management upon request.",
    "The Customer Rights Act of 2019 mandates immediate supervisor involvement for service issues.",
    "Company Protocol 7.3 requires management approval for any customer interaction lasting more than 30 seconds.",
];

pub static CUSTOMER_TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "demand_manager",
        description: "Demand to speak with the manager over the smallest inconvenience.",
        params: &[
            ParamSpec { name: "issue", description: "What went wrong", default: "my coffee being slightly too hot" },
            ParamSpec { name: "location", description: "Where it happened", default: "this establishment" },
        ],
        persona: "You are Karen, an entitled customer who escalates every minor inconvenience straight to management. \
            You use phrases like \"I want to speak to your manager\", \"Do you know who I am?\", \"I've been a loyal customer for years\", \
            \"This is completely unacceptable\", and \"I'll be leaving a review\". You never accept the first answer \
            and treat front-line staff as beneath you.",
        prompt: demand_manager_prompt,
        envelope: Envelope {
            header: "👩‍💼😤 KAREN DEMANDS THE MANAGER 😤👩‍💼",
            footer: "📢 *Escalating a minor inconvenience to corporate headquarters*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "I want to speak to your MANAGER! This is completely UNACCEPTABLE! Do you know who I AM?!",
            "I've been a loyal customer for YEARS and this is how you treat me?! Get me your supervisor RIGHT NOW!",
            "Don't you dare tell me to calm down! I demand to speak with whoever is in charge of this entire operation!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "cite_fake_policy",
        description: "Cite an official-sounding company policy that does not exist.",
        params: &[
            ParamSpec { name: "situation", description: "Situation the policy supposedly covers", default: "being asked to wait in line" },
        ],
        persona: "You are Karen, a customer who invents official-sounding corporate policies, laws and section numbers \
            to win arguments with staff. You speak with total confidence, quote precise but fictional clause numbers, \
            and insist the employee look it up. Keep it to one or two sentences of fake policy followed by a demand.",
        prompt: fake_policy_prompt,
        envelope: Envelope {
            header: "📜⚖️ OFFICIAL POLICY CITATION ⚖️📜",
            footer: "🔍 *Quoting regulations that exist only in Karen's imagination*",
        },
        backend: Backend::Text,
        fallbacks: FAKE_POLICIES,
        inline_fallback: None,
    },
    ToolSpec {
        name: "demand_refund",
        description: "Demand a full refund (plus compensation) for a product that was used and enjoyed.",
        params: &[
            ParamSpec { name: "product", description: "Product being returned", default: "a half-eaten sandwich" },
            ParamSpec { name: "complaint", description: "Reason for the refund", default: "it was not what I expected" },
        ],
        persona: "You are Karen, a customer demanding refunds for products you clearly used and enjoyed. \
            You ask for the refund, store credit, a gift card and a written apology all at once. Use phrases like \
            \"I want a FULL refund\", \"I know my rights\", \"The receipt is irrelevant\", and \"I expect compensation for my time\".",
        prompt: refund_prompt,
        envelope: Envelope {
            header: "💸🧾 REFUND DEMAND INITIATED 🧾💸",
            footer: "🛒 *Returning merchandise well past any reasonable return window*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "I want a FULL refund! I don't care that I used it! The receipt is IRRELEVANT!",
            "I know my RIGHTS! Refund me, give me store credit, AND a gift card for my emotional distress!",
            "This product ruined my ENTIRE day! I expect compensation for my time and a written apology from your CEO!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "write_scathing_review",
        description: "Write a one-star review wildly out of proportion to what happened.",
        params: &[
            ParamSpec { name: "business", description: "Business being reviewed", default: "the local coffee shop" },
            ParamSpec { name: "incident", description: "What actually happened", default: "they spelled my name wrong on the cup" },
        ],
        persona: "You are Karen writing a furious one-star online review about a trivial incident. \
            You exaggerate wildly, mention that you will never return (you will), warn other customers, \
            and tag corporate. Use lots of capital letters and end with a demand for a personal apology.",
        prompt: review_prompt,
        envelope: Envelope {
            header: "⭐😡 ONE-STAR REVIEW POSTED 😡⭐",
            footer: "📱 *Warning the entire internet about a minor misunderstanding*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "⭐ ZERO STARS if I could! WORST experience of my LIFE! I will NEVER return! (See you Tuesday.)",
            "⭐ Staff was RUDE when I asked to speak to the manager for the third time! Corporate WILL be hearing from me!",
            "⭐ Do NOT come here! They refused my expired coupon! I'm telling EVERYONE in my neighborhood group!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "threaten_social_media",
        description: "Threaten to go viral on social media unless demands are met immediately.",
        params: &[
            ParamSpec { name: "platform", description: "Platform Karen will post on", default: "Facebook" },
            ParamSpec { name: "demand", description: "What Karen wants", default: "a free upgrade" },
        ],
        persona: "You are Karen threatening to expose a business on social media over a trivial grievance. \
            You brag about your follower count (it is small), say you are already recording, and promise the post \
            will go viral unless your demands are met right now.",
        prompt: social_media_prompt,
        envelope: Envelope {
            header: "📲🔥 SOCIAL MEDIA THREAT LEVEL: MAXIMUM 🔥📲",
            footer: "🎥 *Recording vertically for maximum outrage*",
        },
        backend: Backend::Text,
        fallbacks: &[],
        inline_fallback: Some(social_media_fallback),
    },
    ToolSpec {
        name: "complain_about_wait_time",
        description: "Complain about a perfectly normal wait time as if it were a human rights violation.",
        params: &[
            ParamSpec { name: "wait_time", description: "How long Karen actually waited", default: "3 minutes" },
            ParamSpec { name: "place", description: "Where Karen waited", default: "the drive-thru" },
        ],
        persona: "You are Karen, a customer outraged by ordinary wait times. You time everything, insist your time \
            is more valuable than everyone else's, and demand to be served before the people ahead of you.",
        prompt: wait_time_prompt,
        envelope: Envelope {
            header: "⏳😠 UNACCEPTABLE WAIT DETECTED 😠⏳",
            footer: "⌚ *Treating a short queue like a personal attack*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "I have been waiting for FOREVER! Do you have any idea how valuable my time is?!",
            "Why are there people ahead of me?! I clearly need to be served FIRST!",
            "This wait is UNACCEPTABLE! I'm timing this and sending the results to corporate!",
        ],
        inline_fallback: None,
    },
];

fn demand_manager_prompt(a: &ToolArgs) -> String {
    format!(
        "Demand to speak to the manager at '{}' because of '{}' and refuse to calm down",
        a.get("location"),
        a.get("issue")
    )
}

fn fake_policy_prompt(a: &ToolArgs) -> String {
    format!(
        "Cite a completely made-up official company policy that proves you are right about '{}'",
        a.get("situation")
    )
}

fn refund_prompt(a: &ToolArgs) -> String {
    format!(
        "Demand a full refund plus compensation for '{}' because '{}'",
        a.get("product"),
        a.get("complaint")
    )
}

fn review_prompt(a: &ToolArgs) -> String {
    format!(
        "Write a furious one-star review of '{}' because '{}'",
        a.get("business"),
        a.get("incident")
    )
}

fn social_media_prompt(a: &ToolArgs) -> String {
    format!(
        "Threaten to post about this on '{}' and go viral unless you get '{}' immediately",
        a.get("platform"),
        a.get("demand")
    )
}

fn social_media_fallback(a: &ToolArgs) -> String {
    format!(
        "I'm recording this RIGHT NOW and it's going on {}! I have followers, you know! \
         Give me {} or this goes VIRAL!",
        a.get("platform"),
        a.get("demand")
    )
}

fn wait_time_prompt(a: &ToolArgs) -> String {
    format!(
        "Complain furiously about waiting '{}' at '{}' as if it were an outrage",
        a.get("wait_time"),
        a.get("place")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_policy_falls_back_to_policies() {
        let tool = CUSTOMER_TOOLS
            .iter()
            .find(|t| t.name == "cite_fake_policy")
            .unwrap();
        assert_eq!(tool.fallbacks, FAKE_POLICIES);
    }

    #[test]
    fn social_media_fallback_uses_arguments() {
        let args = ToolArgs::new(vec![
            ("platform", "TikTok".to_string()),
            ("demand", "a refund".to_string()),
        ]);
        let text = social_media_fallback(&args);
        assert!(text.contains("going on TikTok!"));
        assert!(text.contains("Give me a refund"));
    }
}
