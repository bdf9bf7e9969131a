//! Crop catalog and the location-keyed scoring table

use serde::{Deserialize, Serialize};

/// Cultivation difficulty, assigned by rank
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// First candidate is Easy, second Medium, the rest Hard
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Low / Medium / High rating used for demand and water need
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::Medium => write!(f, "Medium"),
            Level::High => write!(f, "High"),
        }
    }
}

/// A crop suggestion before enrichment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropCandidate {
    pub name: String,
    pub emoji: String,
    /// 0-100
    pub confidence: u32,
}

/// Static agronomic profile of a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub name: String,
    pub expected_yield: String,
    pub profit_margin: String,
    pub investment_required: String,
    pub duration: String,
    pub market_demand: Level,
    pub water_requirement: Level,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub tips: Vec<String>,
}

/// A ranked, enriched crop recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecommendation {
    pub name: String,
    pub emoji: String,
    pub confidence: u32,
    pub expected_yield: String,
    pub profit_margin: String,
    pub investment_required: String,
    pub duration: String,
    pub difficulty: Difficulty,
    pub market_demand: Level,
    pub water_requirement: Level,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub tips: Vec<String>,
}

impl CropRecommendation {
    /// Combine a candidate with its catalog entry at the given rank
    pub fn enrich(candidate: CropCandidate, rank: usize) -> Self {
        let profile = crop_profile(&candidate.name);
        Self {
            name: candidate.name,
            emoji: candidate.emoji,
            confidence: candidate.confidence,
            expected_yield: profile.expected_yield,
            profit_margin: profile.profit_margin,
            investment_required: profile.investment_required,
            duration: profile.duration,
            difficulty: Difficulty::for_rank(rank),
            market_demand: profile.market_demand,
            water_requirement: profile.water_requirement,
            pros: profile.pros,
            cons: profile.cons,
            tips: profile.tips,
        }
    }
}

// ============================================================================
// Scoring table
// ============================================================================

type Triple = [(&'static str, &'static str, u32); 3];

/// Location keys in match order; the first key found in the name wins
const SCORING_TABLE: &[(&[&str], Triple)] = &[
    (&["mumbai"], [("Vegetables (Tomato)", "🍅", 92), ("Leafy Greens", "🥬", 88), ("Urban Farming Herbs", "🌿", 85)]),
    (&["nashik"], [("Onion", "🧅", 95), ("Grapes", "🍇", 90), ("Pomegranate", "🍎", 87)]),
    (&["pune"], [("Sugarcane", "🎋", 93), ("Cotton", "🌱", 89), ("Soybean", "🌿", 86)]),
    (&["nagpur"], [("Cotton", "🌱", 94), ("Orange", "🍊", 91), ("Soybean", "🌿", 88)]),
    (&["kolhapur"], [("Sugarcane", "🎋", 96), ("Turmeric", "🟡", 92), ("Jaggery Cane", "🎋", 89)]),
    (&["aurangabad"], [("Cotton", "🌱", 91), ("Chili (Red)", "🌶️", 87), ("Groundnut", "🥜", 84)]),
    (&["solapur"], [("Sunflower", "🌻", 93), ("Cotton", "🌱", 89), ("Jowar", "🌾", 86)]),
    (&["palghar"], [("Rice", "🌾", 90), ("Coconut", "🥥", 87), ("Mango", "🥭", 84)]),
    (&["satara"], [("Strawberry", "🍓", 94), ("Pomegranate", "🍎", 90), ("Grapes", "🍇", 87)]),
    (&["sangli"], [("Grapes", "🍇", 95), ("Turmeric", "🟡", 91), ("Sugarcane", "🎋", 88)]),
    (&["delhi"], [("Wheat", "🌾", 94), ("Rice", "🌾", 90), ("Mustard", "🌻", 87)]),
    (&["bangalore", "bengaluru"], [("Coffee", "☕", 96), ("Tomato", "🍅", 91), ("Potato", "🥔", 88)]),
    (&["hyderabad"], [("Cotton", "🌱", 92), ("Rice", "🌾", 89), ("Chili", "🌶️", 86)]),
    (&["chennai"], [("Rice", "🌾", 93), ("Groundnut", "🥜", 89), ("Coconut", "🥥", 85)]),
];

const DEFAULT_TRIPLE: Triple = [
    ("Mixed Vegetables", "🥬", 85),
    ("Cereal Grains", "🌾", 82),
    ("Pulses", "🫘", 79),
];

/// Candidate crops for a location name.
///
/// Matching is a case-insensitive substring test against the table keys;
/// numeric soil and weather values play no part.
pub fn score_location(location_name: &str) -> Vec<CropCandidate> {
    let name = location_name.to_lowercase();
    let triple = SCORING_TABLE
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| name.contains(k)))
        .map(|(_, triple)| triple)
        .unwrap_or(&DEFAULT_TRIPLE);

    triple
        .iter()
        .map(|(crop, emoji, confidence)| CropCandidate {
            name: crop.to_string(),
            emoji: emoji.to_string(),
            confidence: *confidence,
        })
        .collect()
}

/// Scored and enriched recommendations for a location name
pub fn recommend_for_location(location_name: &str) -> Vec<CropRecommendation> {
    score_location(location_name)
        .into_iter()
        .enumerate()
        .map(|(rank, candidate)| CropRecommendation::enrich(candidate, rank))
        .collect()
}

// ============================================================================
// Crop catalog
// ============================================================================

type Economics = (&'static str, &'static str, &'static str);

const GENERIC_ECONOMICS: Economics = ("2-4 tons/hectare", "₹25,000 - ₹45,000/hectare", "₹35,000/hectare");

fn economics(crop: &str) -> Option<Economics> {
    let entry = match crop {
        "Onion" => ("20-30 tons/hectare", "₹35,000 - ₹55,000/hectare", "₹45,000/hectare"),
        "Cotton" => ("1.0-1.5 tons/hectare", "₹25,000 - ₹45,000/hectare", "₹35,000/hectare"),
        "Chili (Red)" => ("3-4 tons/hectare", "₹45,000 - ₹75,000/hectare", "₹55,000/hectare"),
        "Sugarcane" => ("70-90 tons/hectare", "₹55,000 - ₹85,000/hectare", "₹65,000/hectare"),
        "Soybean" => ("2.5-3.5 tons/hectare", "₹20,000 - ₹35,000/hectare", "₹25,000/hectare"),
        "Banana" => ("30-40 tons/hectare", "₹60,000 - ₹95,000/hectare", "₹85,000/hectare"),
        "Groundnut" => ("2.8-3.8 tons/hectare", "₹28,000 - ₹48,000/hectare", "₹32,000/hectare"),
        "Potato" => ("25-35 tons/hectare", "₹40,000 - ₹65,000/hectare", "₹50,000/hectare"),
        "Vegetables (Tomato)" => ("40-60 tons/hectare", "₹80,000 - ₹120,000/hectare", "₹70,000/hectare"),
        "Leafy Greens" => ("15-25 tons/hectare", "₹45,000 - ₹75,000/hectare", "₹40,000/hectare"),
        "Urban Farming Herbs" => ("2-5 tons/hectare", "₹100,000 - ₹150,000/hectare", "₹60,000/hectare"),
        "Grapes" => ("15-25 tons/hectare", "₹150,000 - ₹250,000/hectare", "₹120,000/hectare"),
        "Pomegranate" => ("8-15 tons/hectare", "₹100,000 - ₹180,000/hectare", "₹90,000/hectare"),
        "Orange" => ("20-30 tons/hectare", "₹60,000 - ₹100,000/hectare", "₹80,000/hectare"),
        "Turmeric" => ("3-5 tons/hectare", "₹120,000 - ₹200,000/hectare", "₹55,000/hectare"),
        "Jaggery Cane" => ("60-80 tons/hectare", "₹70,000 - ₹110,000/hectare", "₹60,000/hectare"),
        "Sunflower" => ("1.5-2.5 tons/hectare", "₹25,000 - ₹40,000/hectare", "₹25,000/hectare"),
        "Jowar" => ("2-3 tons/hectare", "₹18,000 - ₹30,000/hectare", "₹20,000/hectare"),
        "Rice" => ("4-6 tons/hectare", "₹30,000 - ₹50,000/hectare", "₹35,000/hectare"),
        "Coconut" => ("8000-12000 nuts/hectare", "₹80,000 - ₹140,000/hectare", "₹100,000/hectare"),
        "Mango" => ("10-20 tons/hectare", "₹90,000 - ₹160,000/hectare", "₹110,000/hectare"),
        "Strawberry" => ("20-40 tons/hectare", "₹200,000 - ₹350,000/hectare", "₹150,000/hectare"),
        "Mixed Vegetables" => ("25-40 tons/hectare", "₹50,000 - ₹80,000/hectare", "₹55,000/hectare"),
        "Cereal Grains" => ("3-5 tons/hectare", "₹25,000 - ₹40,000/hectare", "₹30,000/hectare"),
        "Pulses" => ("1.5-2.5 tons/hectare", "₹30,000 - ₹50,000/hectare", "₹28,000/hectare"),
        _ => return None,
    };
    Some(entry)
}

fn cultivation(crop: &str) -> (&'static str, Level, Level) {
    match crop {
        "Onion" => ("120-150 days", Level::High, Level::Medium),
        "Cotton" => ("160-200 days", Level::High, Level::Medium),
        "Chili (Red)" => ("90-120 days", Level::High, Level::Medium),
        "Sugarcane" => ("12-18 months", Level::Medium, Level::High),
        "Soybean" => ("90-120 days", Level::Medium, Level::Medium),
        "Banana" => ("12-15 months", Level::High, Level::High),
        "Groundnut" => ("100-130 days", Level::Medium, Level::Low),
        "Potato" => ("80-100 days", Level::High, Level::Medium),
        _ => ("90-120 days", Level::Medium, Level::Medium),
    }
}

type Notes = (&'static [&'static str], &'static [&'static str], &'static [&'static str]);

fn field_notes(crop: &str) -> Notes {
    match crop {
        "Onion" => (
            &["High market demand", "Good export potential", "Nashik region specialty"],
            &["Price volatility", "Storage challenges"],
            &["Use drip irrigation", "Plant in November-December"],
        ),
        "Cotton" => (
            &["Export potential", "Government support", "Mechanization friendly"],
            &["Pest management required", "Long growing season"],
            &["Monitor for bollworm", "Use integrated pest management"],
        ),
        "Chili (Red)" => (
            &["Premium spice value", "Processing industry demand", "High profit margins"],
            &["Weather sensitive", "Labor intensive"],
            &["Ensure good drainage", "Use disease-free seeds"],
        ),
        "Sugarcane" => (
            &["Guaranteed purchase", "Sugar mill availability", "High yield potential"],
            &["High water requirement", "Heavy machinery needed"],
            &["Plant in February-March", "Maintain proper spacing"],
        ),
        "Soybean" => (
            &["Oil industry demand", "Protein rich crop", "Good for soil health"],
            &["Market price fluctuation", "Pest susceptible"],
            &["Use rhizobium culture", "Monitor for pod borer"],
        ),
        "Banana" => (
            &["Year-round demand", "Multiple harvests", "High nutritional value"],
            &["Disease management", "High initial investment"],
            &["Use tissue culture plants", "Provide wind protection"],
        ),
        "Groundnut" => (
            &["Oil extraction value", "Drought tolerant", "Nitrogen fixation"],
            &["Aflatoxin risk", "Market dependency"],
            &["Apply gypsum", "Harvest at right maturity"],
        ),
        "Potato" => (
            &["High consumption", "Processing industry", "Good storage life"],
            &["Storage requirements", "Disease prone"],
            &["Use certified seed", "Store in cool place"],
        ),
        _ => (
            &["Good market potential", "Suitable for local climate"],
            &["Market risk", "Weather dependency"],
            &["Follow good agricultural practices", "Monitor weather conditions"],
        ),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Catalog entry for a crop display name; unknown names get generic values
pub fn crop_profile(crop: &str) -> CropProfile {
    let (expected_yield, profit_margin, investment_required) =
        economics(crop).unwrap_or(GENERIC_ECONOMICS);
    let (duration, market_demand, water_requirement) = cultivation(crop);
    let (pros, cons, tips) = field_notes(crop);

    CropProfile {
        name: crop.to_string(),
        expected_yield: expected_yield.to_string(),
        profit_margin: profit_margin.to_string(),
        investment_required: investment_required.to_string(),
        duration: duration.to_string(),
        market_demand,
        water_requirement,
        pros: to_strings(pros),
        cons: to_strings(cons),
        tips: to_strings(tips),
    }
}

/// Whether the catalog has specific economics for this name
pub fn is_cataloged(crop: &str) -> bool {
    economics(crop).is_some()
}

/// Emoji for a crop label as returned by the prediction backend
pub fn emoji_for_crop(crop: &str) -> &'static str {
    match crop.to_lowercase().as_str() {
        "rice" => "🌾",
        "maize" => "🌽",
        "chickpea" | "kidneybeans" | "pigeonpeas" | "mothbeans" | "mungbean" | "blackgram"
        | "lentil" => "🫘",
        "pomegranate" | "apple" => "🍎",
        "banana" => "🍌",
        "mango" => "🥭",
        "grapes" => "🍇",
        "watermelon" => "🍉",
        "muskmelon" | "papaya" => "🍈",
        "orange" => "🍊",
        "coconut" => "🥥",
        "cotton" => "🌱",
        "jute" => "🌿",
        "coffee" => "☕",
        _ => "🌱",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(candidates: &[CropCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_nashik_triple() {
        let candidates = score_location("Nashik, Maharashtra");
        assert_eq!(names(&candidates), vec!["Onion", "Grapes", "Pomegranate"]);
        let confidences: Vec<u32> = candidates.iter().map(|c| c.confidence).collect();
        assert_eq!(confidences, vec![95, 90, 87]);
    }

    #[test]
    fn test_unknown_location_gets_default_triple() {
        let candidates = score_location("Ulaanbaatar");
        assert_eq!(
            names(&candidates),
            vec!["Mixed Vegetables", "Cereal Grains", "Pulses"]
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(score_location("PALGHAR")[0].name, "Rice");
        assert_eq!(score_location("bengaluru urban")[0].name, "Coffee");
        assert_eq!(score_location("Bangalore")[0].name, "Coffee");
    }

    #[test]
    fn test_first_match_wins() {
        // Both keys present; mumbai precedes pune in the table
        assert_eq!(score_location("Pune to Mumbai highway")[0].name, "Vegetables (Tomato)");
    }

    #[test]
    fn test_difficulty_by_rank() {
        let recs = recommend_for_location("Kolhapur");
        let difficulties: Vec<Difficulty> = recs.iter().map(|r| r.difficulty).collect();
        assert_eq!(
            difficulties,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[test]
    fn test_enrichment_uses_catalog() {
        let recs = recommend_for_location("nashik");
        let onion = &recs[0];
        assert_eq!(onion.expected_yield, "20-30 tons/hectare");
        assert_eq!(onion.profit_margin, "₹35,000 - ₹55,000/hectare");
        assert_eq!(onion.investment_required, "₹45,000/hectare");
        assert_eq!(onion.duration, "120-150 days");
        assert_eq!(onion.market_demand, Level::High);
        assert_eq!(onion.pros.len(), 3);
    }

    #[test]
    fn test_unknown_crop_profile_is_generic() {
        let profile = crop_profile("Dragon Fruit");
        assert_eq!(profile.expected_yield, "2-4 tons/hectare");
        assert_eq!(profile.profit_margin, "₹25,000 - ₹45,000/hectare");
        assert_eq!(profile.investment_required, "₹35,000/hectare");
        assert_eq!(profile.duration, "90-120 days");
        assert_eq!(profile.pros, vec!["Good market potential", "Suitable for local climate"]);
        assert!(!is_cataloged("Dragon Fruit"));
        assert!(is_cataloged("Strawberry"));
        assert!(is_cataloged("Cotton"));
    }

    #[test]
    fn test_emoji_lookup() {
        assert_eq!(emoji_for_crop("Rice"), "🌾");
        assert_eq!(emoji_for_crop("lentil"), "🫘");
        assert_eq!(emoji_for_crop("kiwi"), "🌱");
    }
}
