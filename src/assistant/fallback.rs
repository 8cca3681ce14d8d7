//! Canned replies used when the agent backend cannot answer
//!
//! The table is ordered: the first keyword found in the lowercased utterance
//! wins, so earlier entries shadow later ones.

/// Ordered `(keyword, response)` pairs. Keywords are lowercase.
pub const TRAVEL_RESPONSES: &[(&str, &str)] = &[
    (
        "paris",
        "Paris is a beautiful city! Here are some recommendations:\n\n\
         • Best time to visit: April-June or September-October\n\
         • Must-see attractions: Eiffel Tower, Louvre Museum, Notre-Dame Cathedral\n\
         • Budget: $150-300/day for mid-range travel\n\
         • Weather: Check current conditions before booking",
    ),
    (
        "budget",
        "I can help you plan your travel budget! Here's what to consider:\n\n\
         • Transportation (flights, local transport)\n\
         • Accommodation (hotels, hostels, vacation rentals)\n\
         • Food and dining\n\
         • Activities and attractions\n\
         • Emergency fund\n\n\
         What type of trip are you planning?",
    ),
    (
        "weather",
        "I can help you check weather conditions for your destination! Just let me know:\n\n\
         • City and country\n\
         • Travel dates\n\
         • What activities you're planning\n\n\
         This will help me give you the most relevant weather information.",
    ),
    (
        "japan",
        "Japan is amazing! Here are the best times to visit:\n\n\
         • Spring (March-May): Cherry blossoms, mild weather\n\
         • Summer (June-August): Festivals, but hot and humid\n\
         • Fall (September-November): Beautiful autumn colors\n\
         • Winter (December-February): Snow, hot springs, skiing\n\n\
         What interests you most about Japan?",
    ),
];

/// Reply when no keyword matches
pub const DEFAULT_RESPONSE: &str = "I'd love to help you plan your trip! I can assist with:\n\n\
     • Destination recommendations\n\
     • Budget planning\n\
     • Weather information\n\
     • Travel tips and advice\n\n\
     What specific aspect of travel planning would you like help with?";

/// Keyword-routed fallback replies
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable {
    entries: &'static [(&'static str, &'static str)],
    default: &'static str,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(TRAVEL_RESPONSES, DEFAULT_RESPONSE)
    }
}

impl KeywordTable {
    pub const fn new(
        entries: &'static [(&'static str, &'static str)],
        default: &'static str,
    ) -> Self {
        Self { entries, default }
    }

    /// Pick the reply for an utterance: first keyword hit in table order,
    /// otherwise the default.
    pub fn select(&self, utterance: &str) -> &'static str {
        self.matching_keyword(utterance)
            .map(|(_, response)| response)
            .unwrap_or(self.default)
    }

    /// The `(keyword, response)` entry that would answer `utterance`, if any
    pub fn matching_keyword(&self, utterance: &str) -> Option<(&'static str, &'static str)> {
        let folded = utterance.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| folded.contains(keyword))
            .copied()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(keyword, _)| *keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn response_for(keyword: &str) -> &'static str {
        TRAVEL_RESPONSES
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, r)| *r)
            .unwrap()
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let table = KeywordTable::default();
        assert_eq!(table.select("Planning a trip to PARIS"), response_for("paris"));
        assert_eq!(table.select("best time for Japan?"), response_for("japan"));
    }

    #[test]
    fn test_first_keyword_in_table_order_wins() {
        let table = KeywordTable::default();
        // "weather" appears first in the text but "paris" comes first in the table
        assert_eq!(
            table.select("weather and budget in paris"),
            response_for("paris")
        );
        assert_eq!(table.select("weather budget"), response_for("budget"));
        assert_eq!(table.select("japan weather"), response_for("weather"));
    }

    #[test]
    fn test_no_match_returns_default() {
        let table = KeywordTable::default();
        assert_eq!(table.select("hello there"), DEFAULT_RESPONSE);
        assert_eq!(table.select(""), DEFAULT_RESPONSE);
        assert_eq!(table.matching_keyword("hello"), None);
    }

    #[test]
    fn test_weather_in_tokyo_hits_weather_entry() {
        let table = KeywordTable::default();
        assert_eq!(
            table.matching_keyword("weather in Tokyo").map(|(k, _)| k),
            Some("weather")
        );
    }

    #[test]
    fn test_custom_table() {
        const ENTRIES: &[(&str, &str)] = &[("ski", "Snow!"), ("beach", "Sun!")];
        let table = KeywordTable::new(ENTRIES, "Anything else?");
        assert_eq!(table.select("Beach or ski?"), "Snow!");
        assert_eq!(table.select("mountains"), "Anything else?");
        assert_eq!(table.keywords().collect::<Vec<_>>(), vec!["ski", "beach"]);
    }

    proptest! {
        #[test]
        fn paris_always_wins(prefix in "[a-zA-Z ]{0,20}", suffix in "[a-zA-Z ]{0,20}", upper in any::<bool>()) {
            let city = if upper { "PARIS" } else { "Paris" };
            let utterance = format!("{} {} {}", prefix, city, suffix);
            prop_assert_eq!(KeywordTable::default().select(&utterance), response_for("paris"));
        }

        #[test]
        fn unmatched_utterances_get_default(text in "[0-9 xyzq]{0,40}") {
            prop_assert_eq!(KeywordTable::default().select(&text), DEFAULT_RESPONSE);
        }
    }
}
