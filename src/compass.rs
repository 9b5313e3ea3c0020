//! Degree-4 graphs whose slots are compass directions.
//!
//! A place connected to its northern neighbor through `North` is reached
//! back from that neighbor through `South`; [`KGraph::link`] wires both
//! ends of such a pair at once, and [`KGraph::step`] resolves a single
//! "go <direction> from <place>" request.

use crate::error::GraphError;
use crate::graph::KGraph;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::str::FromStr;
use std::collections::hash_map::RandomState;
use thiserror::Error;

/// A graph with one slot per compass direction.
pub type CompassGraph<K, V, S = RandomState> = KGraph<K, V, 4, S>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Slot index this direction occupies.
    pub const fn slot(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts full names and initials, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl<K, V, S> KGraph<K, V, 4, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    /// Connect `to` as the `dir` neighbor of `from`, and `from` as the
    /// opposite neighbor of `to`.
    pub fn link<Q>(&mut self, from: &Q, to: &Q, dir: Direction) -> Result<(), GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.connect(from, to, dir.slot(), dir.opposite().slot())
    }

    /// Key of the place one step in `dir` from `from`.
    ///
    /// `IteratorReachedEnd` means there is nothing that way.
    pub fn step<Q>(&self, from: &Q, dir: Direction) -> Result<&K, GraphError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut c = self.cbegin_at(from)?;
        c.advance(self, dir.slot())?;
        c.key(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            assert_eq!(Direction::from_slot(d.slot()), Some(d));
        }
        assert_eq!(Direction::from_slot(4), None);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("North".parse::<Direction>(), Ok(Direction::North));
        assert_eq!(" w ".parse::<Direction>(), Ok(Direction::West));
        assert_eq!(Direction::East.to_string(), "east");
        let err = "up".parse::<Direction>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown direction: "up""#);
    }

    #[test]
    fn link_then_step_both_ways() {
        let mut world: CompassGraph<String, u32> = CompassGraph::new(0);
        world.insert("taub".to_string(), 0).unwrap();
        world.insert("mikhlol".to_string(), 0).unwrap();
        world.link("taub", "mikhlol", Direction::East).unwrap();

        assert_eq!(world.step("taub", Direction::East).map(String::as_str), Ok("mikhlol"));
        assert_eq!(world.step("mikhlol", Direction::West).map(String::as_str), Ok("taub"));
        assert_eq!(
            world.step("taub", Direction::North),
            Err(GraphError::IteratorReachedEnd)
        );
        assert_eq!(world.step("nowhere", Direction::North), Err(GraphError::KeyNotFound));
    }
}
