/// Communities that are close enough, by geography or price tier, to stand in
/// for one another when a lead's exact pick is unavailable.
const AREA_GROUPS: &[(&str, &[&str])] = &[
    ("north", &["Arabian Ranches", "Arabian Ranches 2", "Mudon"]),
    ("central", &["Al Furjan", "Damac Hills", "Damac Hills 2"]),
    (
        "premium",
        &[
            "Tilal Al Ghaf",
            "Jumeirah Golf Estates",
            "Emirates Hills",
            "Palm Jumeirah",
        ],
    ),
    ("new", &["Dubai Hills Estate", "MBR City", "Sobha Hartland"]),
];

pub(crate) fn area_group(community: &str) -> Option<&'static str> {
    AREA_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&community))
        .map(|(name, _)| *name)
}

/// True when `community` shares an area group with any of `preferred`.
pub(crate) fn shares_area(community: &str, preferred: &[String]) -> bool {
    match area_group(community) {
        Some(group) => preferred
            .iter()
            .any(|candidate| area_group(candidate) == Some(group)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_neighbouring_communities() {
        assert_eq!(area_group("Mudon"), Some("north"));
        assert!(shares_area("Mudon", &["Arabian Ranches".to_string()]));
        assert!(!shares_area("Mudon", &["Palm Jumeirah".to_string()]));
        assert!(!shares_area("Jumeirah Park", &["Jumeirah Park".to_string()]));
    }
}
