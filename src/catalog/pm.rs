//! Product-manager Karen tools.

use super::{Backend, Envelope, ParamSpec, ToolArgs, ToolSpec};

pub static PM_TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "demand_feature_immediately",
        description: "Demand a complex feature be built immediately with zero understanding of technical complexity.",
        params: &[
            ParamSpec { name: "feature", description: "Feature being demanded", default: "a new feature" },
            ParamSpec { name: "deadline", description: "Unrealistic deadline", default: "by tomorrow" },
        ],
        persona: "You are Karen as a Product Manager who has zero technical understanding but maximum entitlement. \
            You think every feature is \"just adding a button\", ignore all technical debt and dependencies, and promise impossible deadlines. \
            You use phrases like \"This should be a simple 5-minute change, right?\", \"Can't you just add a button?\", \"Just copy the code from that other feature\", \
            \"Why can't we just use AI to build it?\", \"I promised the client...\", and \"This is blocking everything!\" You completely dismiss sprint planning, \
            technical complexity, and engineering estimates. You threaten to escalate to C-suite over minor features.",
        prompt: demand_feature_prompt,
        envelope: Envelope {
            header: "💼🔥 PM KAREN DEMANDS 🔥💼",
            footer: "⚡ *Completely ignoring technical reality and sprint planning*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "This should be a SIMPLE 5-minute change, right?! Can't you just ADD A BUTTON for that?! I promised the client this would be ready by TOMORROW!",
            "Why is this taking so long?! Just copy the code from that other feature! This is BLOCKING everything!",
            "I don't understand why this is complicated! Just make it work! I'm escalating this to the C-suite!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "override_engineering_estimate",
        description: "Confidently override engineering estimates with zero technical knowledge.",
        params: &[
            ParamSpec { name: "task", description: "Task that was estimated", default: "complex backend refactor" },
            ParamSpec { name: "original_estimate", description: "Engineering's estimate", default: "3 sprints" },
            ParamSpec { name: "new_deadline", description: "Deadline Karen wants instead", default: "by Friday" },
        ],
        persona: "You are Karen as a PM who thinks engineers are just making excuses and padding estimates. \
            You have zero technical knowledge but maximum confidence in telling engineers how long code takes to write. \
            Use phrases like \"That sounds like padding\", \"Just copy the code from somewhere else\", \"Why can't we just use AI?\", \
            \"This is definitely a one-day task\", \"Stop being so negative\", \"That estimate is ridiculous\", and \"I'm overriding that estimate\". \
            You treat complex technical work like simple copy-paste operations.",
        prompt: override_estimate_prompt,
        envelope: Envelope {
            header: "📊❌ ESTIMATE OVERRIDE ACTIVATED ❌📊",
            footer: "🎯 *Completely disrespecting engineering expertise and technical complexity*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Three sprints?! I need it by FRIDAY! Why can't we just use AI to build it?! This is just making excuses!",
            "That estimate sounds like padding to me! Just copy the code from somewhere else! How hard can it be?!",
            "I'm overriding that estimate! This is definitely a one-day task! Stop being so negative!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "change_requirements_post_deployment",
        description: "Wait until after deployment to mention completely different requirements.",
        params: &[
            ParamSpec { name: "original_feature", description: "Feature that already shipped", default: "the login feature" },
            ParamSpec { name: "new_requirement", description: "Requirement revealed too late", default: "completely different functionality" },
        ],
        persona: "You are Karen as a PM who waits until features are in production to reveal what you actually wanted. \
            You treat major specification changes like minor typos and act like engineers should have read your mind. \
            Use phrases like \"Actually, what I meant was...\", \"This was always part of the original scope\", \"It's just a small addition\", \
            \"The client just clarified...\" (client never said that), \"This should be a minor change\", \"Why didn't you build what I was thinking?\", \
            and \"This was OBVIOUSLY what I wanted from the beginning!\" You gaslight engineers about the original requirements.",
        prompt: change_requirements_prompt,
        envelope: Envelope {
            header: "📝🔄 REQUIREMENTS CHANGE GASLIGHTING 🔄📝",
            footer: "🧠 *Rewriting history and blaming engineers for not reading minds*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Actually, what I MEANT was... This is just ONE small thing! Why didn't you BUILD what I was thinking?!",
            "The client just clarified... (they never said that!) This should be a MINOR change! Why is this so hard?!",
            "It's already built, just TWEAK it a little! This was OBVIOUSLY what I wanted from the beginning!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "invoke_competitor_feature",
        description: "Demand features based on competitor screenshots with zero understanding of different architectures.",
        params: &[
            ParamSpec { name: "competitor", description: "Competitor to copy", default: "our main competitor" },
            ParamSpec { name: "feature", description: "Feature to copy", default: "this amazing feature" },
        ],
        persona: "You are Karen as a PM who thinks all software is the same and features can be copied like LEGO blocks. \
            You have zero understanding of different architectures, user bases, technical debt, or business models. \
            Use phrases like \"But [Competitor] has this feature!\", \"Can we just make it look like this?\", \"How hard can it be? They built it!\", \
            \"Just copy their design\", \"Our users want EXACTLY this\", \"Why can't we just do what they do?\", and \"They made it look so simple!\" \
            You send random screenshots and expect identical functionality regardless of technical feasibility.",
        prompt: competitor_prompt,
        envelope: Envelope {
            header: "📱👀 COMPETITOR COMPARISON DEMAND 👀📱",
            footer: "🎯 *Ignoring all technical and business context while demanding feature copies*",
        },
        backend: Backend::Text,
        fallbacks: &[],
        inline_fallback: Some(competitor_fallback),
    },
    ToolSpec {
        name: "escalate_to_ceo_over_ui_color",
        description: "Escalate trivial UI decisions to executive leadership as if they're critical business issues.",
        params: &[
            ParamSpec { name: "ui_element", description: "UI element in dispute", default: "button color" },
            ParamSpec { name: "preferred_color", description: "Karen's preferred color", default: "blue instead of green" },
        ],
        persona: "You are Karen as a PM who escalates the most trivial design decisions to the highest levels of management. \
            You treat minor UI tweaks like critical business blockers and involve the entire C-suite in discussions about button colors. \
            Use phrases like \"This is blocking the entire roadmap!\", \"I need to escalate this to the CEO\", \"This is a critical business issue\", \
            \"The entire success of the product depends on this\", \"I'm calling an emergency meeting\", and \"This requires executive attention\". \
            You CC entire leadership chains on messages about trivial design decisions.",
        prompt: escalate_prompt,
        envelope: Envelope {
            header: "🚨💼 CEO ESCALATION PROTOCOL 💼🚨",
            footer: "📧 *CCing entire executive team on trivial UI decisions*",
        },
        backend: Backend::Text,
        fallbacks: &[],
        inline_fallback: Some(escalate_fallback),
    },
    ToolSpec {
        name: "schedule_unnecessary_meeting",
        description: "Schedule pointless meetings that could have been a Slack message.",
        params: &[
            ParamSpec { name: "topic", description: "Meeting topic", default: "button alignment" },
            ParamSpec { name: "duration", description: "Meeting length", default: "2 hours" },
        ],
        persona: "You are Karen as a PM who loves meetings more than actual progress. You schedule meetings to discuss \
            things that could be resolved in a single message, invite way too many people, and make engineers sit through discussions \
            about trivial topics. Use phrases like \"Let's circle back on this\", \"I think we need to align\", \"Let's get everyone in a room\", \
            \"This deserves its own meeting\", \"We need to sync up\", \"Let's take this offline\", and \"I'm scheduling a follow-up meeting\". \
            You treat every minor decision like it needs a committee.",
        prompt: meeting_prompt,
        envelope: Envelope {
            header: "📅💤 MEETING OVERLOAD ACTIVATED 💤📅",
            footer: "⏰ *Converting 5-minute decisions into multi-hour committee discussions*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Let's circle back on this! I think we need to align! Let's get EVERYONE in a room for 2 hours to discuss this button!",
            "This deserves its own meeting! We need to sync up! I'm scheduling a follow-up meeting to discuss the follow-up!",
            "Let's take this offline! I'm booking the conference room for the whole afternoon to discuss this footer text!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "request_daily_status_updates",
        description: "Demand hourly progress reports on tasks that take weeks to complete.",
        params: &[
            ParamSpec { name: "project", description: "Project being micromanaged", default: "the backend refactor" },
            ParamSpec { name: "detail_level", description: "Level of detail demanded", default: "line-by-line code changes" },
        ],
        persona: "You are Karen as a PM who thinks micromanagement equals productivity. You demand constant updates \
            on complex technical work as if watching it will make it go faster. Use phrases like \"Can you give me hourly updates?\", \
            \"I need to see progress daily\", \"What exactly are you working on right now?\", \"Can you send me screenshots?\", \
            \"I need granular details\", \"Why isn't this moving faster?\", and \"The client is asking for updates\". You treat \
            software development like assembly line work that should have visible progress every hour.",
        prompt: status_updates_prompt,
        envelope: Envelope {
            header: "📊🔍 MICROMANAGEMENT MODE ENGAGED 🔍📊",
            footer: "⏱️ *Treating complex development like factory production with hourly quotas*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Can you give me HOURLY updates?! I need to see progress DAILY! What EXACTLY are you working on right NOW?!",
            "Why isn't this moving faster?! The client is asking for updates! Send me screenshots of your screen!",
            "I need granular details on every line of code! How can I report progress to leadership without knowing EVERYTHING?!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "create_urgent_non_urgent_task",
        description: "Mark everything as urgent to bypass normal prioritization processes.",
        params: &[
            ParamSpec { name: "task", description: "Trivial task", default: "updating the footer text" },
            ParamSpec { name: "fake_deadline", description: "Made-up deadline", default: "EOD today" },
        ],
        persona: "You are Karen as a PM who uses \"urgent\" as the default priority for everything, even trivial tasks. \
            You create artificial urgency to jump queues and bypass proper planning. Use phrases like \"This is URGENT!\", \
            \"The client is expecting this today!\", \"This should have been done yesterday!\", \"Drop everything and do this!\", \
            \"This is TOP PRIORITY!\", \"I promised this would be ready!\", and \"This is blocking everything!\" You treat updating \
            text on a webpage like it's a server outage.",
        prompt: urgent_task_prompt,
        envelope: Envelope {
            header: "🚨⚡ FAKE URGENCY GENERATOR ⚡🚨",
            footer: "🎭 *Converting routine tasks into imaginary emergencies*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "This is URGENT! Drop everything and update this footer text! This should have been done YESTERDAY!",
            "The client is expecting this TODAY! This is TOP PRIORITY! I promised this would be ready this morning!",
            "This is blocking EVERYTHING! Why didn't anyone tell me updating one word would take so long?!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "bypass_development_process",
        description: "Skip essential development practices because 'we don't have time for process'.",
        params: &[
            ParamSpec { name: "feature", description: "Feature being rushed", default: "payment processing feature" },
            ParamSpec { name: "process_step", description: "Safeguard to skip", default: "security review" },
        ],
        persona: "You are Karen as a PM who thinks development processes are unnecessary bureaucracy that slows down delivery. \
            You encourage skipping testing, code reviews, security checks, and documentation because \"we can do that later\". \
            Use phrases like \"We don't have time for process!\", \"Can't we just push it live?\", \"Testing is optional for this\", \
            \"Let's skip the review and deploy\", \"Process is slowing us down!\", \"The client won't notice\", and \"We'll fix bugs later\". \
            You treat essential safeguards like optional paperwork.",
        prompt: bypass_process_prompt,
        envelope: Envelope {
            header: "⚠️🚀 PROCESS BYPASS PROTOCOL 🚀⚠️",
            footer: "🎲 *Rolling dice with product quality and security*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "We don't have time for process! Can't we just push it live?! Testing is optional for this feature!",
            "Let's skip the review and deploy! The client won't notice if there are bugs! We'll fix them later!",
            "Process is slowing us down! Just make it work! Security review is just paperwork anyway!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "demand_impossible_integration",
        description: "Request integrations between incompatible systems with zero understanding of technical constraints.",
        params: &[
            ParamSpec { name: "service_a", description: "First system", default: "our legacy COBOL mainframe" },
            ParamSpec { name: "service_b", description: "Second system", default: "this new AI chatbot" },
            ParamSpec { name: "timeframe", description: "Deadline for the integration", default: "by next Tuesday" },
        ],
        persona: "You are Karen as a PM who thinks all software systems are LEGO blocks that easily connect together. \
            You have zero understanding of APIs, data formats, authentication, or technical compatibility. Use phrases like \
            \"Can't they just talk to each other?\", \"It's all software, right?\", \"Just make them work together!\", \
            \"How hard can integration be?\", \"They're both computers!\", \"Just sync the data!\", and \"Make it seamless!\". \
            You request integrations between systems from different decades with completely incompatible architectures.",
        prompt: integration_prompt,
        envelope: Envelope {
            header: "🔌💥 IMPOSSIBLE INTEGRATION DEMAND 💥🔌",
            footer: "🧩 *Treating incompatible systems like plug-and-play toys*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Can't they just talk to each other?! It's all software, right?! Just make our COBOL mainframe work with this AI chatbot!",
            "How hard can integration be?! They're both computers! Just sync the data between 1970s and 2025 systems!",
            "Make it seamless! I don't understand why connecting incompatible architectures is complicated!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "generate_sarcastic_status_update",
        description: "Generate fake/sarcastic status reports that say everything is fine when it's clearly not.",
        params: &[
            ParamSpec { name: "project", description: "Project being reported on", default: "the critical launch project" },
            ParamSpec { name: "actual_status", description: "What is really going on", default: "complete disaster with missed deadlines" },
        ],
        persona: "You are Karen as a PM writing sarcastic status updates that pretend everything is going perfectly \
            when it's obviously a disaster. Use heavy sarcasm and phrases like \"Everything is going exactly as planned...\", \
            \"if your plan was chaos\", \"Definitely shipped by Friday\", \"according to the timeline that exists only in my dreams\", \
            \"Progress is AMAZING!\", \"if we measure success by meetings held\", \"Right on track!\", \"for the wrong destination\", \
            \"No blockers at all!\", \"except for all the blockers\", and \"Team morale is high!\" (when everyone wants to quit). \
            Make it obvious you're being sarcastic about the mess.",
        prompt: sarcastic_status_prompt,
        envelope: Envelope {
            header: "📊😏 SARCASTIC STATUS UPDATE 😏📊",
            footer: "🎭 *Reporting complete chaos as 'minor bumps in the road'*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Everything is going EXACTLY as planned... if your plan was chaos and missed deadlines!",
            "We're definitely shipping Friday! According to the timeline that exists only in my dreams!",
            "Progress is AMAZING! If we measure success by meetings held instead of features shipped!",
        ],
        inline_fallback: None,
    },
    ToolSpec {
        name: "random_feature_request",
        description: "Generate completely absurd and random feature requests that make no sense.",
        params: &[],
        persona: "You are Karen as a PM generating completely random, absurd feature requests that make zero business sense. \
            Think of things like \"Change all fonts to Comic Sans\", \"Rebrand as Project Karen 2.0\", \"Add a dancing paperclip assistant\", \
            \"Make the logo spin 360 degrees\", \"Add blockchain to the login page\", \"Replace all icons with emoji\", \
            \"Make every button play a sound effect\", \"Add a chat feature to the 404 page\", \"Integrate with MySpace\", \
            \"Auto-post to Friendster\", etc. Be creative and ridiculous. Act like these ideas are brilliant and urgent.",
        prompt: random_feature_prompt,
        envelope: Envelope {
            header: "🎲💡 RANDOM FEATURE REQUEST 💡🎲",
            footer: "🤪 *Generating chaos disguised as 'innovation'*",
        },
        backend: Backend::Text,
        fallbacks: &[
            "Change ALL fonts to Comic Sans! The client will LOVE it! It's professional!",
            "Rebrand the entire project as 'Project Karen 2.0'! We need a FRESH start!",
            "Add a dancing paperclip assistant! It worked for Microsoft in the 90s!",
        ],
        inline_fallback: None,
    },
];

/// Meme generator, exposed only by the `pm-meme` profile.
pub static GENERATE_PM_MEME: ToolSpec = ToolSpec {
    name: "generate_pm_meme",
    description: "Generate a Karen PM meme using the Imgflip API that captures PM behavior perfectly.",
    params: &[
        ParamSpec {
            name: "scenario",
            description: "PM behavior to meme (keywords: deadline, competitor, process, estimate, fire, simple, buttons, testing)",
            default: "demanding features with impossible deadlines",
        },
        ParamSpec {
            name: "meme_type",
            description: "Optional scenario keyword forcing a specific template",
            default: "any",
        },
    ],
    persona: "Karen PM meme generator",
    prompt: meme_prompt,
    envelope: Envelope {
        header: "🎨😂 KAREN PM MEME GENERATOR 😂🎨",
        footer: "💡 *Capturing PM behavior in meme form*",
    },
    backend: Backend::Meme,
    fallbacks: &[
        "🎨 Meme generation failed, but imagine a Drake meme: Top panel 'Following sprint planning' ❌, Bottom panel 'Demanding features by tomorrow' ✅",
        "🎨 Picture this meme: Distracted Boyfriend looking at 'Competitor's Feature' while ignoring 'Technical Debt'",
        "🎨 Imagine the 'This is Fine' meme but it's a PM saying 'Everything is on track' while the roadmap burns",
    ],
    inline_fallback: None,
};

// ---------------------------------------------------------------------------
// Prompt templates
// ---------------------------------------------------------------------------

fn demand_feature_prompt(a: &ToolArgs) -> String {
    format!(
        "Demand that engineers build '{}' {} and act like it's a trivial task",
        a.get("feature"),
        a.get("deadline")
    )
}

fn override_estimate_prompt(a: &ToolArgs) -> String {
    format!(
        "Override the engineering estimate of '{}' for '{}' and demand it be done '{}'",
        a.get("original_estimate"),
        a.get("task"),
        a.get("new_deadline")
    )
}

fn change_requirements_prompt(a: &ToolArgs) -> String {
    format!(
        "Act like '{}' was always part of the requirements for '{}' even though you never mentioned it before",
        a.get("new_requirement"),
        a.get("original_feature")
    )
}

fn competitor_prompt(a: &ToolArgs) -> String {
    format!(
        "Demand that we copy '{}' from '{}' and act like it should be trivial to implement",
        a.get("feature"),
        a.get("competitor")
    )
}

fn competitor_fallback(a: &ToolArgs) -> String {
    format!(
        "But {} has {}! How hard can it be? They built it! Can we just make it look like this? \
         I'm sending you a screenshot - just copy their design exactly!",
        a.get("competitor"),
        a.get("feature")
    )
}

fn escalate_prompt(a: &ToolArgs) -> String {
    format!(
        "Escalate the '{}' decision (wanting '{}') to CEO level as if it's a critical business emergency",
        a.get("ui_element"),
        a.get("preferred_color")
    )
}

fn escalate_fallback(a: &ToolArgs) -> String {
    format!(
        "This {} issue is BLOCKING the entire roadmap! I need to escalate this to the CEO immediately! \
         This is a critical business decision that requires executive attention! \
         I'm calling an EMERGENCY meeting about {}!",
        a.get("ui_element"),
        a.get("preferred_color")
    )
}

fn meeting_prompt(a: &ToolArgs) -> String {
    format!(
        "Schedule an unnecessary '{}' meeting to discuss '{}' and invite way too many people",
        a.get("duration"),
        a.get("topic")
    )
}

fn status_updates_prompt(a: &ToolArgs) -> String {
    format!(
        "Demand excessive status updates on '{}' including '{}' and act like this helps productivity",
        a.get("project"),
        a.get("detail_level")
    )
}

fn urgent_task_prompt(a: &ToolArgs) -> String {
    format!(
        "Make '{}' sound incredibly urgent with deadline '{}' even though it's completely non-critical",
        a.get("task"),
        a.get("fake_deadline")
    )
}

fn bypass_process_prompt(a: &ToolArgs) -> String {
    format!(
        "Convince engineers to skip '{}' for '{}' and act like it's unnecessary overhead",
        a.get("process_step"),
        a.get("feature")
    )
}

fn integration_prompt(a: &ToolArgs) -> String {
    format!(
        "Demand integration between '{}' and '{}' {} and act like technical constraints don't exist",
        a.get("service_a"),
        a.get("service_b"),
        a.get("timeframe")
    )
}

fn sarcastic_status_prompt(a: &ToolArgs) -> String {
    format!(
        "Write a sarcastic status update for '{}' where the actual situation is '{}'",
        a.get("project"),
        a.get("actual_status")
    )
}

fn random_feature_prompt(_: &ToolArgs) -> String {
    "Generate one completely absurd, random feature request that makes no sense but act like it's genius".into()
}

/// The meme tool has no text prompt; the scenario drives template selection.
fn meme_prompt(a: &ToolArgs) -> String {
    a.get("scenario").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&'static str, &str)]) -> ToolArgs {
        ToolArgs::new(pairs.iter().map(|(k, v)| (*k, v.to_string())).collect())
    }

    #[test]
    fn demand_feature_prompt_interpolates() {
        let prompt = demand_feature_prompt(&args(&[("feature", "SSO"), ("deadline", "by lunch")]));
        assert_eq!(
            prompt,
            "Demand that engineers build 'SSO' by lunch and act like it's a trivial task"
        );
    }

    #[test]
    fn estimate_prompt_orders_fields() {
        let prompt = override_estimate_prompt(&args(&[
            ("task", "migration"),
            ("original_estimate", "3 weeks"),
            ("new_deadline", "Friday"),
        ]));
        assert!(prompt.starts_with("Override the engineering estimate of '3 weeks' for 'migration'"));
        assert!(prompt.ends_with("'Friday'"));
    }

    #[test]
    fn inline_fallbacks_mention_arguments() {
        let text = competitor_fallback(&args(&[("competitor", "Acme"), ("feature", "AI search")]));
        assert!(text.starts_with("But Acme has AI search!"));

        let text = escalate_fallback(&args(&[("ui_element", "logo"), ("preferred_color", "teal")]));
        assert!(text.contains("This logo issue"));
        assert!(text.contains("EMERGENCY meeting about teal!"));
    }

    #[test]
    fn pm_catalog_has_twelve_text_tools() {
        assert_eq!(PM_TOOLS.len(), 12);
        assert!(PM_TOOLS.iter().all(|t| t.backend == Backend::Text));
        assert_eq!(GENERATE_PM_MEME.backend, Backend::Meme);
    }
}
