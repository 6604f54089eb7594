use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::MatchEvent;
use crate::kickoff::ScheduledFixture;
use crate::standings::Standings;

fn numeric_col() -> Col {
    Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right))
}

pub fn tabulate_standings(standings: &Standings) -> Table {
    let mut cols = vec![
        numeric_col(),
        Col::new(Styles::default().with(MinWidth(20)).with(Left)),
    ];
    cols.extend((0..8).map(|_| numeric_col()));

    let mut table = Table::default().with_cols(cols).with_row(Row::new(
        Styles::default().with(Header(true)),
        vec![
            "#".into(),
            "Club".into(),
            "Matches Played".into(),
            "Wins".into(),
            "Draws".into(),
            "Losses".into(),
            "Points".into(),
            "GF".into(),
            "GA".into(),
            "GD".into(),
        ],
    ));
    for (index, record) in standings.rows().iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                record.club.clone().into(),
                format!("{}", record.played).into(),
                format!("{}", record.wins).into(),
                format!("{}", record.draws).into(),
                format!("{}", record.losses).into(),
                format!("{}", record.points).into(),
                format!("{}", record.goals_for).into(),
                format!("{}", record.goals_against).into(),
                format!("{}", record.goal_difference).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_schedule(rounds: &[Vec<ScheduledFixture>]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            numeric_col(),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Round".into(),
                "Kickoff".into(),
                "Home".into(),
                "Away".into(),
            ],
        ));
    for (index, round) in rounds.iter().enumerate() {
        for fixture in round {
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    format!("{}", index + 1).into(),
                    format_kickoff(fixture.kickoff).into(),
                    fixture.home.clone().into(),
                    fixture.away.clone().into(),
                ],
            ));
        }
    }
    table
}

pub fn tabulate_events(events: &[MatchEvent]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            numeric_col(),
            Col::new(Styles::default().with(MinWidth(6)).with(Left)),
            Col::new(Styles::default().with(MinWidth(18)).with(Left)),
            Col::new(Styles::default().with(MinWidth(18)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Minute".into(),
                "Side".into(),
                "Event".into(),
                "Player".into(),
            ],
        ));
    for event in events {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}'", event.minute).into(),
                event.side.to_string().into(),
                event.category.to_string().into(),
                event.player.clone().unwrap_or_default().into(),
            ],
        ));
    }
    table
}

/// Renders a catalogue time (minutes of the day) as `HH:MM`.
pub fn format_kickoff(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Score;

    #[test]
    fn kickoff_formatting() {
        assert_eq!("12:00", format_kickoff(720));
        assert_eq!("19:30", format_kickoff(1170));
        assert_eq!("00:05", format_kickoff(5));
    }

    #[test]
    fn schedule_table_flattens_rounds() {
        let rounds = vec![
            vec![ScheduledFixture {
                home: "Rovers".into(),
                away: "City".into(),
                kickoff: 900,
            }],
            vec![ScheduledFixture {
                home: "City".into(),
                away: "Rovers".into(),
                kickoff: 990,
            }],
        ];
        let table = tabulate_schedule(&rounds);
        assert_eq!(3, table.num_rows());
        assert_eq!(4, table.num_cols());
    }

    #[test]
    fn event_table_has_a_row_per_event() {
        use crate::domain::{EventCategory, Side};
        let events = vec![MatchEvent {
            minute: 12,
            category: EventCategory::Goal,
            side: Side::Home,
            player: Some("R. Striker".into()),
        }];
        let table = tabulate_events(&events);
        assert_eq!(2, table.num_rows());
    }

    #[test]
    fn standings_table_has_a_row_per_club() {
        let mut standings =
            Standings::new(["Rovers".to_string(), "City".to_string()]);
        standings.apply("Rovers", "City", &Score::new(2, 1));
        let table = tabulate_standings(&standings);
        // header plus one row per club
        assert_eq!(3, table.num_rows());
        assert_eq!(10, table.num_cols());
    }
}
