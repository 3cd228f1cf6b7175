//! Text routing table.
//!
//! Inbound text is classified by an ordered list of literal rules; the first
//! matching rule decides the intent. Order matters because the triggers
//! overlap (a hashtag can also contain the recommend phrase).

/// Marks a request for one of the demo templates.
pub const DEMO_MARKER: &str = "sample";
/// Opens the meal-time menu.
pub const RECOMMEND_TRIGGER: &str = "美食推薦";
/// Prefix of every hashtag command.
pub const HASHTAG: char = '#';
/// Suffix of meal-time hashtags (`#文青早餐`).
pub const MEAL_SUFFIX: char = '餐';
/// Suffix of district hashtags (`#西區`).
pub const DISTRICT_SUFFIX: char = '區';

/// Substrings whose presence silences the text path. Phone and review
/// requests are answered through postbacks instead.
pub const RESERVED: [&str; 3] = ["連絡電話", "餐廳評價", DEMO_MARKER];

/// What a text message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Demo,
    MealMenu,
    ChooseMeal,
    ChooseDistrict,
    /// A hashtag that is neither a meal nor a district command
    Ignore,
    Guidance,
}

/// One routing rule: a literal predicate and the intent it selects.
#[derive(Clone, Copy)]
pub struct RouteRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub intent: Intent,
}

/// The routing table, in priority order. The last rule always matches.
pub const ROUTES: &[RouteRule] = &[
    RouteRule {
        name: "demo",
        matches: is_demo_request,
        intent: Intent::Demo,
    },
    RouteRule {
        name: "meal_menu",
        matches: is_recommend_request,
        intent: Intent::MealMenu,
    },
    RouteRule {
        name: "choose_meal",
        matches: is_meal_hashtag,
        intent: Intent::ChooseMeal,
    },
    RouteRule {
        name: "choose_district",
        matches: is_district_hashtag,
        intent: Intent::ChooseDistrict,
    },
    RouteRule {
        name: "unknown_hashtag",
        matches: is_hashtag,
        intent: Intent::Ignore,
    },
    RouteRule {
        name: "guidance",
        matches: always,
        intent: Intent::Guidance,
    },
];

fn is_demo_request(text: &str) -> bool {
    text.contains(DEMO_MARKER)
}

fn is_recommend_request(text: &str) -> bool {
    text.contains(RECOMMEND_TRIGGER)
}

fn is_hashtag(text: &str) -> bool {
    text.starts_with(HASHTAG)
}

fn is_meal_hashtag(text: &str) -> bool {
    is_hashtag(text) && text.ends_with(MEAL_SUFFIX)
}

fn is_district_hashtag(text: &str) -> bool {
    is_hashtag(text) && text.ends_with(DISTRICT_SUFFIX)
}

fn always(_: &str) -> bool {
    true
}

/// The first matching rule for `text`.
pub fn match_rule(text: &str) -> &'static RouteRule {
    ROUTES
        .iter()
        .find(|rule| (rule.matches)(text))
        .unwrap_or(&ROUTES[ROUTES.len() - 1])
}

/// Classify inbound text.
pub fn classify(text: &str) -> Intent {
    match_rule(text).intent
}

/// Whether the text path must stay silent for `text`.
///
/// With `demo_replies` enabled the demo marker is no longer reserved.
pub fn is_reserved(text: &str, demo_replies: bool) -> bool {
    RESERVED
        .iter()
        .filter(|marker| !(demo_replies && **marker == DEMO_MARKER))
        .any(|marker| text.contains(marker))
}

/// District name carried by a district hashtag.
pub fn district_from_hashtag(text: &str) -> &str {
    text.strip_prefix(HASHTAG).unwrap_or(text)
}
