/// Built-in location labels offered by the CLI. Locations are labels only;
/// they never influence the simulation.
pub const GERMAN_CITIES: [&str; 18] = [
    "Berlin",
    "Hamburg",
    "Munich",
    "Cologne",
    "Frankfurt",
    "Stuttgart",
    "Düsseldorf",
    "Leipzig",
    "Dortmund",
    "Essen",
    "Bremen",
    "Dresden",
    "Hanover",
    "Nuremberg",
    "Duisburg",
    "Bochum",
    "Wuppertal",
    "Bielefeld",
];

pub fn is_known_location(name: &str) -> bool {
    GERMAN_CITIES
        .iter()
        .any(|city| city.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_locations() {
        assert!(is_known_location("Berlin"));
        assert!(is_known_location(" hamburg "));
        assert!(is_known_location("Düsseldorf"));
        assert!(!is_known_location("Paris"));
    }
}
