// A small world overlay built the way callers use the compass graph:
// places are read from a line-oriented description, wired with `link`,
// and walked with `step`, with a missing neighbor surfacing as a
// dead end.
use kgraph::{CompassGraph, Direction, GraphError};

#[derive(Clone, Debug, PartialEq)]
enum Place {
    Unset,
    Gym,
    Pokestop { items: u32 },
    Starbucks,
}

#[derive(Debug, PartialEq)]
enum WorldError {
    BadLine(String),
    Graph(GraphError),
}

impl From<GraphError> for WorldError {
    fn from(e: GraphError) -> Self {
        WorldError::Graph(e)
    }
}

fn load(text: &str) -> Result<CompassGraph<String, Place>, WorldError> {
    let mut world = CompassGraph::new(Place::Unset);
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["GYM", name] => world.insert(name.to_string(), Place::Gym)?,
            ["STARBUCKS", name] => world.insert(name.to_string(), Place::Starbucks)?,
            ["POKESTOP", name, rest @ ..] => {
                let items = rest.len() as u32 / 2;
                world.insert(name.to_string(), Place::Pokestop { items })?
            }
            ["LINK", from, dir, to] => {
                let dir: Direction = dir
                    .parse()
                    .map_err(|_| WorldError::BadLine(line.to_string()))?;
                world.link(*from, *to, dir)?
            }
            _ => return Err(WorldError::BadLine(line.to_string())),
        }
    }
    Ok(world)
}

const CAMPUS: &str = "
    GYM taub
    POKESTOP mikhlol POTION 10 CANDY 20
    STARBUCKS shani
    LINK taub east mikhlol
    LINK mikhlol north shani
";

#[test]
fn loads_places_and_links() {
    let world = load(CAMPUS).unwrap();
    assert_eq!(world.len(), 3);
    assert_eq!(world.get("mikhlol"), Ok(&Place::Pokestop { items: 2 }));
    assert_eq!(world.neighbor("shani", Direction::South.slot()).unwrap().map(String::as_str), Some("mikhlol"));
}

#[test]
fn walking_resolves_neighbors_and_dead_ends() {
    let world = load(CAMPUS).unwrap();
    let mut here = "taub".to_string();
    for dir in [Direction::East, Direction::North] {
        here = world.step(here.as_str(), dir).unwrap().clone();
    }
    assert_eq!(here, "shani");

    assert_eq!(
        world.step("shani", Direction::North),
        Err(GraphError::IteratorReachedEnd)
    );
    assert!(world.step("shani", Direction::East).unwrap_err().is_end());
}

#[test]
fn duplicate_places_and_bad_lines_are_rejected() {
    assert_eq!(
        load("GYM taub\nSTARBUCKS taub").unwrap_err(),
        WorldError::Graph(GraphError::KeyAlreadyExists)
    );
    assert_eq!(
        load("GYM taub\nLINK taub up taub").unwrap_err(),
        WorldError::BadLine("LINK taub up taub".to_string())
    );
    assert_eq!(
        load("LINK a north b").unwrap_err(),
        WorldError::Graph(GraphError::KeyNotFound)
    );
}

#[test]
fn a_place_cannot_take_two_neighbors_in_one_direction() {
    let mut world = load(CAMPUS).unwrap();
    world.insert("library".to_string(), Place::Gym).unwrap();
    assert_eq!(
        world.link("taub", "library", Direction::East),
        Err(GraphError::EdgeAlreadyInUse)
    );
    world.link("taub", "library", Direction::West).unwrap();
    assert_eq!(world.step("library", Direction::East).map(String::as_str), Ok("taub"));
}

#[test]
fn removed_place_becomes_a_dead_end() {
    let mut world = load(CAMPUS).unwrap();
    assert_eq!(world.remove("mikhlol"), Ok(Place::Pokestop { items: 2 }));
    assert_eq!(
        world.step("taub", Direction::East),
        Err(GraphError::IteratorReachedEnd)
    );
    *world.get_or_insert_default("mikhlol".to_string()) = Place::Gym;
    assert_eq!(
        world.step("taub", Direction::East),
        Err(GraphError::IteratorReachedEnd)
    );
}
