use serde::Serialize;

use super::domain::{Recommendation, RecommendationCategory, ResultMood};

const ALL_MOODS: [ResultMood; 4] = ResultMood::ordered();

const FROM_FEELING_LOW: [ResultMood; 3] = [
    ResultMood::FeelingLow,
    ResultMood::NeedsExtraCare,
    ResultMood::NeedsSupport,
];

const UP_TO_EXTRA_CARE: [ResultMood; 3] = [
    ResultMood::DoingOkay,
    ResultMood::FeelingLow,
    ResultMood::NeedsExtraCare,
];

const LIGHTER_MOODS: [ResultMood; 2] = [ResultMood::DoingOkay, ResultMood::FeelingLow];

const HEAVIER_MOODS: [ResultMood; 2] = [ResultMood::NeedsExtraCare, ResultMood::NeedsSupport];

/// Fixed activity suggestions, in presentation order. Six free entries and
/// four premium ones, carried from the original catalog.
pub const RECOMMENDATION_CATALOG: [Recommendation; 10] = [
    Recommendation {
        id: "breathing-1",
        title: "Deep Breathing",
        description: "Take 5 slow, deep breaths. Inhale for 4 counts, hold for 4, exhale for 6.",
        icon: "\u{1F32C}\u{FE0F}",
        category: RecommendationCategory::Breathing,
        is_premium: false,
        for_moods: &ALL_MOODS,
    },
    Recommendation {
        id: "hydration-1",
        title: "Stay Hydrated",
        description: "Drink a glass of water. Hydration affects both body and mind.",
        icon: "\u{1F4A7}",
        category: RecommendationCategory::Hydration,
        is_premium: false,
        for_moods: &ALL_MOODS,
    },
    Recommendation {
        id: "movement-1",
        title: "Gentle Stretch",
        description: "Stand up and stretch your arms above your head. Roll your shoulders.",
        icon: "\u{1F9D8}",
        category: RecommendationCategory::Movement,
        is_premium: false,
        for_moods: &UP_TO_EXTRA_CARE,
    },
    Recommendation {
        id: "reflection-1",
        title: "Gratitude Moment",
        description: "Think of one thing you're grateful for right now, no matter how small.",
        icon: "\u{1F64F}",
        category: RecommendationCategory::Reflection,
        is_premium: false,
        for_moods: &LIGHTER_MOODS,
    },
    Recommendation {
        id: "rest-1",
        title: "Take a Break",
        description: "Give yourself permission to rest for 5 minutes. Close your eyes if possible.",
        icon: "\u{1F634}",
        category: RecommendationCategory::Rest,
        is_premium: false,
        for_moods: &FROM_FEELING_LOW,
    },
    Recommendation {
        id: "connection-1",
        title: "Reach Out",
        description: "Send a message to someone you trust. Connection helps healing.",
        icon: "\u{1F4AC}",
        category: RecommendationCategory::Connection,
        is_premium: false,
        for_moods: &HEAVIER_MOODS,
    },
    Recommendation {
        id: "breathing-2",
        title: "Guided Box Breathing",
        description: "A 10-minute guided session to calm your nervous system.",
        icon: "\u{1F3A7}",
        category: RecommendationCategory::Breathing,
        is_premium: true,
        for_moods: &FROM_FEELING_LOW,
    },
    Recommendation {
        id: "movement-2",
        title: "Calming Yoga Flow",
        description: "15-minute gentle yoga designed for stress relief.",
        icon: "\u{1F9D8}\u{200D}\u{2640}\u{FE0F}",
        category: RecommendationCategory::Movement,
        is_premium: true,
        for_moods: &UP_TO_EXTRA_CARE,
    },
    Recommendation {
        id: "reflection-2",
        title: "Journaling Prompts",
        description: "Structured prompts to help process your thoughts and feelings.",
        icon: "\u{1F4D3}",
        category: RecommendationCategory::Reflection,
        is_premium: true,
        for_moods: &UP_TO_EXTRA_CARE,
    },
    Recommendation {
        id: "rest-2",
        title: "Sleep Meditation",
        description: "20-minute guided meditation for better sleep.",
        icon: "\u{1F319}",
        category: RecommendationCategory::Rest,
        is_premium: true,
        for_moods: &FROM_FEELING_LOW,
    },
];

/// Mood-filtered view of the catalog, split on the premium gate. Catalog
/// order is preserved on both sides; nothing is re-sorted.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet {
    pub free: Vec<Recommendation>,
    pub premium: Vec<Recommendation>,
}

pub fn recommendations_for(mood: ResultMood) -> RecommendationSet {
    let (premium, free) = RECOMMENDATION_CATALOG
        .iter()
        .filter(|recommendation| recommendation.supports(mood))
        .copied()
        .partition(|recommendation| recommendation.is_premium);

    RecommendationSet { free, premium }
}

pub fn find_recommendation(id: &str) -> Option<&'static Recommendation> {
    RECOMMENDATION_CATALOG
        .iter()
        .find(|recommendation| recommendation.id == id)
}
