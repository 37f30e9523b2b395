// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Reference data served by the content routes

use serde::Serialize;

/// A fact-checking or news source
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: u32,
    pub name: &'static str,
    pub url: &'static str,
    pub category: &'static str,
    pub credibility_rating: u8,
    pub description: &'static str,
}

/// A content category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// A topic currently attracting fact-check requests
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrendingTopic {
    pub id: u32,
    pub topic: &'static str,
    pub category: &'static str,
    pub mentions: u32,
    pub trend: Trend,
}

/// Category of sources that cover every topic
///
/// Not a content category, so `/categories` does not list it, but
/// `?category=general` filters to these sources.
pub const GENERAL_CATEGORY: &str = "general";

/// Every source category is [`GENERAL_CATEGORY`] or one of [`CATEGORIES`]
pub const SOURCES: &[Source] = &[
    Source {
        id: 1,
        name: "Reuters Fact Check",
        url: "https://www.reuters.com/fact-check",
        category: GENERAL_CATEGORY,
        credibility_rating: 95,
        description: "Fact-checking unit of the Reuters news agency",
    },
    Source {
        id: 2,
        name: "AP Fact Check",
        url: "https://apnews.com/hub/ap-fact-check",
        category: GENERAL_CATEGORY,
        credibility_rating: 94,
        description: "Associated Press verification of viral claims",
    },
    Source {
        id: 3,
        name: "PolitiFact",
        url: "https://www.politifact.com",
        category: "politics",
        credibility_rating: 90,
        description: "Truth-O-Meter ratings of political statements",
    },
    Source {
        id: 4,
        name: "FactCheck.org",
        url: "https://www.factcheck.org",
        category: "politics",
        credibility_rating: 91,
        description: "Annenberg Public Policy Center project on political claims",
    },
    Source {
        id: 5,
        name: "Health Feedback",
        url: "https://healthfeedback.org",
        category: "health",
        credibility_rating: 88,
        description: "Scientists reviewing the accuracy of health media coverage",
    },
    Source {
        id: 6,
        name: "Science Feedback",
        url: "https://sciencefeedback.co",
        category: "science",
        credibility_rating: 89,
        description: "Peer review of science reporting by domain experts",
    },
    Source {
        id: 7,
        name: "Snopes",
        url: "https://www.snopes.com",
        category: GENERAL_CATEGORY,
        credibility_rating: 85,
        description: "Long-running investigation of rumours and urban legends",
    },
    Source {
        id: 8,
        name: "Full Fact",
        url: "https://fullfact.org",
        category: "politics",
        credibility_rating: 90,
        description: "Independent UK fact-checking charity",
    },
    Source {
        id: 9,
        name: "Climate Feedback",
        url: "https://climatefeedback.org",
        category: "environment",
        credibility_rating: 88,
        description: "Climate scientists assessing media coverage of climate change",
    },
    Source {
        id: 10,
        name: "Lead Stories",
        url: "https://leadstories.com",
        category: "technology",
        credibility_rating: 82,
        description: "Tracking trending misinformation on social platforms",
    },
];

pub const CATEGORIES: &[Category] = &[
    Category { id: "politics", name: "Politics", description: "Elections, policy and public officials" },
    Category { id: "health", name: "Health", description: "Medicine, nutrition and public health" },
    Category { id: "science", name: "Science", description: "Research findings and scientific claims" },
    Category { id: "technology", name: "Technology", description: "Tech products, AI and online platforms" },
    Category { id: "business", name: "Business", description: "Markets, companies and the economy" },
    Category { id: "environment", name: "Environment", description: "Climate, energy and conservation" },
    Category { id: "entertainment", name: "Entertainment", description: "Celebrities, film, music and media" },
    Category { id: "sports", name: "Sports", description: "Athletes, teams and competitions" },
];

pub const TRENDING_TOPICS: &[TrendingTopic] = &[
    TrendingTopic { id: 1, topic: "AI-generated election images", category: "politics", mentions: 15_420, trend: Trend::Up },
    TrendingTopic { id: 2, topic: "Vaccine side effect claims", category: "health", mentions: 12_870, trend: Trend::Stable },
    TrendingTopic { id: 3, topic: "Climate change statistics", category: "environment", mentions: 9_350, trend: Trend::Up },
    TrendingTopic { id: 4, topic: "Deepfake celebrity videos", category: "entertainment", mentions: 8_210, trend: Trend::Up },
    TrendingTopic { id: 5, topic: "Cryptocurrency investment schemes", category: "business", mentions: 6_940, trend: Trend::Down },
    TrendingTopic { id: 6, topic: "5G health concerns", category: "technology", mentions: 4_180, trend: Trend::Down },
    TrendingTopic { id: 7, topic: "Miracle diet supplements", category: "health", mentions: 3_760, trend: Trend::Stable },
    TrendingTopic { id: 8, topic: "Doping allegations", category: "sports", mentions: 2_590, trend: Trend::Up },
];

/// Sources in `category` (case-insensitive), capped at `limit`
///
/// Returns the page together with the number of matches before capping.
pub fn sources(category: Option<&str>, limit: usize) -> (Vec<Source>, usize) {
    let matching: Vec<Source> = SOURCES
        .iter()
        .filter(|s| category.map_or(true, |c| s.category.eq_ignore_ascii_case(c.trim())))
        .cloned()
        .collect();
    let total = matching.len();
    (matching.into_iter().take(limit).collect(), total)
}

pub fn trending_topics(limit: usize) -> Vec<TrendingTopic> {
    TRENDING_TOPICS.iter().take(limit).cloned().collect()
}

pub fn find_source(id: u32) -> Option<&'static Source> {
    SOURCES.iter().find(|s| s.id == id)
}
