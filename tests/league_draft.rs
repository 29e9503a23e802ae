//! End-to-end: roster + stored submissions → allocation.

use u_allocate::allocation::{Advisory, AllocationConfig, AllocationRunner, ScriptedTieBreak};
use u_allocate::roster::Roster;
use u_allocate::submission::{participants_from_submissions, Submission};

fn submission(name: &str, decks: &[&str]) -> Submission {
    let mut fields = vec![("PlayerName".to_string(), name.to_string())];
    for (i, deck) in decks.iter().enumerate() {
        fields.push((format!("Deck{}", i + 1), deck.to_string()));
    }
    Submission::from_fields(fields)
}

#[test]
fn league_with_missing_submission() {
    let roster = Roster::parse("Ana\nBen\nCai\nDee\n");
    let submissions = vec![
        submission("Ana", &["Sliver Swarm", "Blast from the Past", "", ""]),
        submission("Ben", &["Sliver Swarm", "Eldrazi Unbound", "", ""]),
        submission("cai", &["Blast from the Past", "", "", ""]),
    ];

    let names: Vec<&str> = submissions
        .iter()
        .filter_map(|s| s.player_name.as_deref())
        .collect();
    assert_eq!(roster.pending(&names), vec!["Dee"]);

    let participants = participants_from_submissions(submissions).unwrap();
    let config = AllocationConfig::default()
        .with_expected_participants(roster.expected_participants())
        .with_max_preferences(4);

    // Ana wins the Sliver Swarm tie.
    let mut tie_break = ScriptedTieBreak::new([0]);
    let result = AllocationRunner::run_with_tie_break(&participants, &config, &mut tie_break)
        .unwrap();

    assert_eq!(
        result.advisories,
        vec![Advisory::UnderSubscribed {
            submitted: 3,
            expected: 4,
        }]
    );
    assert_eq!(result.rounds.len(), 2);
    assert_eq!(result.rounds[0].picks[0].resource, "Sliver Swarm");
    assert_eq!(result.rounds[0].picks[0].tie_size, Some(2));
    assert_eq!(
        result.final_mapping().collect::<Vec<_>>(),
        vec![
            ("Ana", "Sliver Swarm"),
            ("Ben", "Eldrazi Unbound"),
            ("cai", "Blast from the Past"),
        ]
    );
}

#[test]
fn every_player_wants_the_same_deck() {
    let participants = participants_from_submissions(vec![
        submission("Ana", &["Eldrazi Unbound"]),
        submission("Ben", &["Eldrazi Unbound"]),
        submission("Cai", &["Eldrazi Unbound"]),
    ])
    .unwrap();

    let config = AllocationConfig::default();
    let mut tie_break = ScriptedTieBreak::new([2]);
    let result = AllocationRunner::run_with_tie_break(&participants, &config, &mut tie_break)
        .unwrap();

    assert_eq!(result.resource_of("Cai"), Some("Eldrazi Unbound"));
    assert_eq!(result.unassigned, vec!["Ana".to_string(), "Ben".to_string()]);
    assert_eq!(
        result.rounds[0].picks[0].losers().collect::<Vec<_>>(),
        vec!["Ana", "Ben"]
    );
    assert!(result.rounds[1].is_exhausted());
}
