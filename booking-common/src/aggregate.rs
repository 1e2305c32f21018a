//! Grouping of venues by (city, state) for the venue listing
//!
//! Areas are ordered by city, then state; venues inside an area by id.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::models::VenueSummary;

/// Venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group venue summaries into areas
pub fn group_by_area(venues: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();

    for venue in venues {
        areas
            .entry((venue.city.clone(), venue.state.clone()))
            .or_default()
            .push(venue);
    }

    areas
        .into_iter()
        .map(|((city, state), mut venues)| {
            venues.sort_by_key(|v| v.id);
            Area {
                city,
                state,
                venues,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(id: i64, name: &str, city: &str, state: &str, upcoming: usize) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: upcoming,
        }
    }

    #[test]
    fn test_two_cities_make_two_groups() {
        let areas = group_by_area(vec![
            venue(1, "The Musical Hop", "San Francisco", "CA", 0),
            venue(2, "The Dueling Pianos Bar", "New York", "NY", 0),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA", 1),
        ]);

        assert_eq!(areas.len(), 2);

        let ny = &areas[0];
        assert_eq!((ny.city.as_str(), ny.state.as_str()), ("New York", "NY"));
        assert_eq!(ny.venues.iter().map(|v| v.id).collect::<Vec<_>>(), vec![2]);

        let sf = &areas[1];
        assert_eq!((sf.city.as_str(), sf.state.as_str()), ("San Francisco", "CA"));
        assert_eq!(sf.venues.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(sf.venues.iter().all(|v| v.city == "San Francisco" && v.state == "CA"));
    }

    #[test]
    fn test_same_city_different_state_is_separate_group() {
        let areas = group_by_area(vec![
            venue(1, "A", "Portland", "OR", 0),
            venue(2, "B", "Portland", "ME", 0),
        ]);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].state, "ME");
        assert_eq!(areas[1].state, "OR");
    }

    #[test]
    fn test_venues_within_group_sorted_by_id() {
        let areas = group_by_area(vec![
            venue(9, "Late", "Austin", "TX", 0),
            venue(4, "Early", "Austin", "TX", 2),
        ]);
        assert_eq!(areas[0].venues[0].id, 4);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_no_venues_no_groups() {
        assert!(group_by_area(Vec::new()).is_empty());
    }
}
