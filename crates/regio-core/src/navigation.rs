//! Navigation state machine.
//!
//! ```text
//! AtProvince ──select──▶ AtCity(p) ──select──▶ AtCounty(p, c)
//!     ▲                     │  ▲                   │
//!     └────────back─────────┘  └───────back────────┘
//! ```
//!
//! Moves are two-phase. `plan_select` / `plan_back` describe the resolve that
//! has to succeed and the state to enter afterwards; `commit` applies it once
//! the listing for the new level is in hand. A failed resolve is simply never
//! committed, so the machine stays where it was.

use serde::Serialize;
use thiserror::Error;

use crate::entities::{City, County, Province};
use crate::level::Level;
use crate::request::{Listing, ResolveRequest};

/// Where the user currently is in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NavState {
    AtProvince,
    AtCity { province: Province },
    AtCounty { province: Province, city: City },
}

impl NavState {
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::AtProvince => Level::Province,
            Self::AtCity { .. } => Level::City,
            Self::AtCounty { .. } => Level::County,
        }
    }

    /// The request that lists this state's level.
    #[must_use]
    pub const fn request(&self) -> ResolveRequest {
        match self {
            Self::AtProvince => ResolveRequest::Provinces,
            Self::AtCity { province } => ResolveRequest::cities_of(province),
            Self::AtCounty { province, city } => ResolveRequest::counties_of(province, city),
        }
    }
}

/// A pending move: resolve `request`, then enter `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub request: ResolveRequest,
    pub target: NavState,
}

impl Transition {
    /// Re-enter `state` by listing its own level.
    #[must_use]
    pub fn into_state(target: NavState) -> Self {
        Self {
            request: target.request(),
            target,
        }
    }
}

/// Outcome of selecting an item in the current listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Drill down; the caller resolves and commits.
    Resolve(Transition),
    /// A county was picked. Terminal for the user, no state change.
    County(County),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("nothing is listed yet")]
    NotLoaded,

    #[error("index {index} out of range (listing has {len} items)")]
    OutOfRange { index: usize, len: usize },

    #[error("listing is for {got}, expected {expected}")]
    LevelMismatch { expected: Level, got: Level },
}

/// What the UI collaborator renders for the current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    pub level: Level,
    pub title: String,
    pub items: Vec<String>,
    pub show_back: bool,
}

#[derive(Debug, Clone)]
pub struct NavigationStateMachine {
    state: NavState,
    listing: Option<Listing>,
}

impl Default for NavigationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStateMachine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: NavState::AtProvince,
            listing: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &NavState {
        &self.state
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.state.level()
    }

    #[must_use]
    pub const fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    /// Transition that (re)loads the current level. Used for the first load
    /// and for a manual retry after a failure.
    #[must_use]
    pub fn reload(&self) -> Transition {
        Transition::into_state(self.state.clone())
    }

    /// Plan the move for selecting item `index` of the current listing.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotLoaded`] before the first commit and
    /// [`NavError::OutOfRange`] for an index past the listing.
    pub fn plan_select(&self, index: usize) -> Result<Selection, NavError> {
        let listing = self.listing.as_ref().ok_or(NavError::NotLoaded)?;
        let out_of_range = || NavError::OutOfRange {
            index,
            len: listing.len(),
        };

        match (&self.state, listing) {
            (NavState::AtProvince, Listing::Provinces(rows)) => {
                let province = rows.get(index).ok_or_else(out_of_range)?;
                Ok(Selection::Resolve(Transition::into_state(NavState::AtCity {
                    province: province.clone(),
                })))
            }
            (NavState::AtCity { province }, Listing::Cities(rows)) => {
                let city = rows.get(index).ok_or_else(out_of_range)?;
                Ok(Selection::Resolve(Transition::into_state(
                    NavState::AtCounty {
                        province: province.clone(),
                        city: city.clone(),
                    },
                )))
            }
            (NavState::AtCounty { .. }, Listing::Counties(rows)) => rows
                .get(index)
                .cloned()
                .map(Selection::County)
                .ok_or_else(out_of_range),
            (state, listing) => Err(NavError::LevelMismatch {
                expected: state.level(),
                got: listing.level(),
            }),
        }
    }

    /// Plan a move one level up. `None` at the root.
    #[must_use]
    pub fn plan_back(&self) -> Option<Transition> {
        match &self.state {
            NavState::AtProvince => None,
            NavState::AtCity { .. } => Some(Transition::into_state(NavState::AtProvince)),
            NavState::AtCounty { province, .. } => {
                Some(Transition::into_state(NavState::AtCity {
                    province: province.clone(),
                }))
            }
        }
    }

    /// Enter `transition.target` with the listing its resolve produced.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::LevelMismatch`] if `listing` is for another level;
    /// the machine is left unchanged.
    pub fn commit(&mut self, transition: Transition, listing: Listing) -> Result<(), NavError> {
        let expected = transition.target.level();
        if listing.level() != expected {
            return Err(NavError::LevelMismatch {
                expected,
                got: listing.level(),
            });
        }
        self.state = transition.target;
        self.listing = Some(listing);
        Ok(())
    }

    /// Render the current level. `root_title` is shown at the province level.
    #[must_use]
    pub fn view(&self, root_title: &str) -> LevelView {
        let title = match &self.state {
            NavState::AtProvince => root_title.to_string(),
            NavState::AtCity { province } => province.name.clone(),
            NavState::AtCounty { city, .. } => city.name.clone(),
        };
        LevelView {
            level: self.level(),
            title,
            items: self.listing.as_ref().map(Listing::names).unwrap_or_default(),
            show_back: self.level() != Level::Province,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn provinces() -> Listing {
        Listing::Provinces(vec![
            Province {
                id: 1,
                name: "Beijing".into(),
                code: 11,
            },
            Province {
                id: 2,
                name: "Jiangsu".into(),
                code: 19,
            },
        ])
    }

    fn jiangsu_cities() -> Listing {
        Listing::Cities(vec![City {
            id: 5,
            name: "Suzhou".into(),
            code: 190,
            province_id: 2,
        }])
    }

    fn suzhou_counties() -> Listing {
        Listing::Counties(vec![County {
            id: 9,
            name: "Kunshan".into(),
            weather_id: "CN101190404".into(),
            city_id: 5,
        }])
    }

    fn loaded() -> NavigationStateMachine {
        let mut nav = NavigationStateMachine::new();
        nav.commit(nav.reload(), provinces()).unwrap();
        nav
    }

    fn select(nav: &NavigationStateMachine, index: usize) -> Transition {
        match nav.plan_select(index).unwrap() {
            Selection::Resolve(t) => t,
            Selection::County(c) => panic!("unexpected county {c:?}"),
        }
    }

    #[test]
    fn starts_at_province_without_back() {
        let nav = NavigationStateMachine::new();
        assert_eq!(nav.level(), Level::Province);
        assert_eq!(nav.reload().request, ResolveRequest::Provinces);
        assert_eq!(nav.plan_select(0), Err(NavError::NotLoaded));
        assert!(nav.plan_back().is_none());

        let view = nav.view("China");
        assert_eq!(view.title, "China");
        assert!(view.items.is_empty());
        assert!(!view.show_back);
    }

    #[test]
    fn select_province_addresses_cities_by_code() {
        let nav = loaded();
        let transition = select(&nav, 1);
        assert_eq!(
            transition.request,
            ResolveRequest::Cities {
                province_id: 2,
                province_code: 19
            }
        );
        // Planning alone does not move.
        assert_eq!(nav.level(), Level::Province);
    }

    #[test]
    fn drill_down_to_county_and_pick_it() {
        let mut nav = loaded();
        let t = select(&nav, 1);
        nav.commit(t, jiangsu_cities()).unwrap();
        assert_eq!(nav.view("China").title, "Jiangsu");

        let t = select(&nav, 0);
        assert_eq!(
            t.request,
            ResolveRequest::Counties {
                province_id: 2,
                province_code: 19,
                city_id: 5,
                city_code: 190
            }
        );
        nav.commit(t, suzhou_counties()).unwrap();

        let view = nav.view("China");
        assert_eq!(view.title, "Suzhou");
        assert_eq!(view.items, vec!["Kunshan"]);
        assert!(view.show_back);

        match nav.plan_select(0).unwrap() {
            Selection::County(county) => assert_eq!(county.weather_id, "CN101190404"),
            Selection::Resolve(t) => panic!("unexpected transition {t:?}"),
        }
        assert_eq!(nav.level(), Level::County);
    }

    #[test]
    fn back_round_trip_restores_province_view() {
        let mut nav = loaded();
        let before = nav.view("China");

        let t = select(&nav, 1);
        nav.commit(t, jiangsu_cities()).unwrap();

        let back = nav.plan_back().unwrap();
        assert_eq!(back.request, ResolveRequest::Provinces);
        nav.commit(back, provinces()).unwrap();

        assert_eq!(nav.view("China"), before);
    }

    #[test]
    fn back_from_county_returns_to_same_province() {
        let mut nav = loaded();
        let t = select(&nav, 1);
        nav.commit(t, jiangsu_cities()).unwrap();
        let t = select(&nav, 0);
        nav.commit(t, suzhou_counties()).unwrap();

        let back = nav.plan_back().unwrap();
        assert_eq!(back.target.level(), Level::City);
        assert_eq!(back.request, ResolveRequest::cities_of(&Province {
            id: 2,
            name: "Jiangsu".into(),
            code: 19,
        }));
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let nav = loaded();
        assert_eq!(
            nav.plan_select(7),
            Err(NavError::OutOfRange { index: 7, len: 2 })
        );
    }

    #[test]
    fn commit_with_wrong_level_leaves_state_unchanged() {
        let mut nav = loaded();
        let t = select(&nav, 0);
        let err = nav.commit(t, suzhou_counties()).unwrap_err();
        assert_eq!(
            err,
            NavError::LevelMismatch {
                expected: Level::City,
                got: Level::County
            }
        );
        assert_eq!(nav.level(), Level::Province);
        assert_eq!(nav.listing(), Some(&provinces()));
    }
}
