use std::collections::HashSet;

use tinyrand::{Seeded, StdRand};

use super::*;

fn teams(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("Team {index}")).collect()
}

#[test]
fn rotation_shape_for_even_team_count() {
    let teams = teams(6);
    let rounds = rotation(&teams, Leg::First);

    assert_eq!(5, rounds.len());
    for round in &rounds {
        assert_eq!(3, round.len());
        let mut seen = HashSet::new();
        for fixture in round {
            assert!(seen.insert(fixture.home.clone()), "{} twice", fixture.home);
            assert!(seen.insert(fixture.away.clone()), "{} twice", fixture.away);
        }
        assert_eq!(6, seen.len());
    }
}

#[test]
fn two_passes_cover_every_ordered_pair_once() {
    let teams = teams(8);
    let mut ordered_pairs = HashSet::new();
    for leg in [Leg::First, Leg::Second] {
        for round in rotation(&teams, leg) {
            for fixture in round {
                assert!(
                    ordered_pairs.insert((fixture.home.clone(), fixture.away.clone())),
                    "{} v {} repeated",
                    fixture.home,
                    fixture.away
                );
            }
        }
    }
    assert_eq!(8 * 7, ordered_pairs.len());
}

#[test]
fn second_leg_mirrors_the_first() {
    let teams = teams(4);
    let first: Vec<Fixture> = rotation(&teams, Leg::First).into_iter().flatten().collect();
    let second: Vec<Fixture> = rotation(&teams, Leg::Second).into_iter().flatten().collect();
    assert_eq!(first.len(), second.len());
    for (one, other) in first.iter().zip(second.iter()) {
        assert_eq!(one.home, other.away);
        assert_eq!(one.away, other.home);
    }
}

#[test]
fn odd_team_count_byes_without_surfacing() {
    let teams = teams(5);
    let rounds = rotation(&teams, Leg::First);

    assert_eq!(5, rounds.len());
    let names: HashSet<&String> = teams.iter().collect();
    for round in &rounds {
        // one team sits out each round
        assert_eq!(2, round.len());
        for fixture in round {
            assert!(names.contains(&fixture.home));
            assert!(names.contains(&fixture.away));
        }
    }
}

#[test]
fn double_round_robin_meets_every_pair_twice_with_sides_swapped() {
    let teams = teams(6);
    let mut rand = StdRand::seed(42);
    let rounds = double_round_robin(&teams, &mut rand);

    let fixtures: Vec<&Fixture> = rounds.iter().flatten().collect();
    assert_eq!(6 * 5, fixtures.len());

    let mut ordered_pairs = HashSet::new();
    for fixture in &fixtures {
        assert_ne!(fixture.home, fixture.away);
        assert!(
            ordered_pairs.insert((fixture.home.clone(), fixture.away.clone())),
            "{} v {} repeated",
            fixture.home,
            fixture.away
        );
    }
    // every ordered pair present means every unordered pair met twice, home
    // and away swapped
    assert_eq!(6 * 5, ordered_pairs.len());
}

#[test]
fn double_round_robin_preserves_round_size() {
    let teams = teams(6);
    let mut rand = StdRand::seed(7);
    let rounds = double_round_robin(&teams, &mut rand);

    assert_eq!(5, rounds.len());
    for round in &rounds {
        assert_eq!(6, round.len());
    }
}

#[test]
fn double_round_robin_replays_from_a_seed() {
    let teams = teams(10);
    let first = double_round_robin(&teams, &mut StdRand::seed(3));
    let second = double_round_robin(&teams, &mut StdRand::seed(3));
    assert_eq!(first, second);
}

#[test]
fn degenerate_team_counts() {
    assert!(rotation(&teams(0), Leg::First).is_empty());
    assert!(rotation(&teams(1), Leg::First)
        .into_iter()
        .flatten()
        .next()
        .is_none());
    let mut rand = StdRand::seed(1);
    assert!(double_round_robin(&teams(1), &mut rand).is_empty());
}
