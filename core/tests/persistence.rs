use wealth_core::{
    action::{ActionDraft, InvestmentDraft, OffensiveDraft, OffensiveKind},
    combat::DefenseLabel,
    command::PlayerCommand,
    engine::GameEngine,
    error::EngineError,
    market::MarketKey,
    player::Player,
};

fn engine_with_player(run_id: &str, soldiers: u32) -> GameEngine {
    let engine = GameEngine::build_test(run_id.into(), 42).unwrap();
    let player = Player {
        id: "p1".into(),
        name: "Ada Sterling".into(),
        soldiers,
        defense: DefenseLabel::Moderate,
        investments: Default::default(),
    };
    engine.store().upsert_player(run_id, &player).unwrap();
    engine
}

fn invest_command(amount: u32) -> PlayerCommand {
    PlayerCommand::SubmitActions {
        player_id: "p1".into(),
        draft: ActionDraft {
            investment: Some(InvestmentDraft {
                kind: None,
                amount: Some(amount),
                market: Some(MarketKey::Stocks),
            }),
            ..Default::default()
        },
    }
}

fn edit_command(week: u64, amount: u32) -> PlayerCommand {
    PlayerCommand::EditMoves {
        player_id: "p1".into(),
        week,
        draft: ActionDraft {
            investment: Some(InvestmentDraft {
                kind: None,
                amount: Some(amount),
                market: Some(MarketKey::Stocks),
            }),
            ..Default::default()
        },
    }
}

#[test]
fn submit_persists_a_weekly_record() {
    let mut engine = engine_with_player("submit-test", 100);

    engine.apply(invest_command(40)).unwrap();

    let record = engine
        .store()
        .action_for_week("submit-test", 0, "p1")
        .unwrap()
        .expect("record must exist after submission");
    assert_eq!(record.action.investment().unwrap().amount, 40);
    assert_eq!(engine.store().action_count("submit-test").unwrap(), 1);
}

#[test]
fn duplicate_submission_requires_the_edit_flow() {
    let mut engine = engine_with_player("dup-test", 100);

    engine.apply(invest_command(40)).unwrap();
    let err = engine.apply(invest_command(60)).unwrap_err();
    assert!(matches!(err, EngineError::AlreadySubmitted { week: 0 }));

    let record = engine
        .store()
        .action_for_week("dup-test", 0, "p1")
        .unwrap()
        .unwrap();
    assert_eq!(
        record.action.investment().unwrap().amount,
        40,
        "a rejected duplicate must not touch the stored record"
    );
    assert_eq!(engine.store().action_count("dup-test").unwrap(), 1);
}

#[test]
fn edit_moves_replaces_the_open_week() {
    let mut engine = engine_with_player("edit-test", 100);

    engine.apply(invest_command(40)).unwrap();
    let before = engine
        .store()
        .action_for_week("edit-test", 0, "p1")
        .unwrap()
        .unwrap();

    engine.apply(edit_command(0, 60)).unwrap();
    let after = engine
        .store()
        .action_for_week("edit-test", 0, "p1")
        .unwrap()
        .unwrap();

    assert_eq!(after.action.investment().unwrap().amount, 60);
    assert_eq!(after.id, before.id, "an edit replaces the record in place");
    assert_eq!(engine.store().action_count("edit-test").unwrap(), 1);
}

#[test]
fn closed_week_is_immutable() {
    let mut engine = engine_with_player("closed-test", 100);

    engine.apply(invest_command(40)).unwrap();
    engine.run_days(7).unwrap();
    assert_eq!(engine.clock.current_week(), 1);

    let err = engine.apply(edit_command(0, 60)).unwrap_err();
    assert!(matches!(err, EngineError::WeekClosed { week: 0 }));

    let record = engine
        .store()
        .action_for_week("closed-test", 0, "p1")
        .unwrap()
        .unwrap();
    assert_eq!(record.action.investment().unwrap().amount, 40);
}

#[test]
fn each_open_week_gets_its_own_record() {
    let mut engine = engine_with_player("weeks-test", 100);

    engine.apply(invest_command(40)).unwrap();
    engine.run_days(7).unwrap();
    engine.apply(invest_command(25)).unwrap();

    assert_eq!(
        engine
            .store()
            .action_count_for_week("weeks-test", 0)
            .unwrap(),
        1
    );
    assert_eq!(
        engine
            .store()
            .action_count_for_week("weeks-test", 1)
            .unwrap(),
        1
    );
}

#[test]
fn rejected_draft_writes_no_record_and_logs_the_reason() {
    let mut engine = engine_with_player("reject-test", 100);

    let err = engine.apply(invest_command(500)).unwrap_err();
    assert!(err.to_string().contains("500"));

    assert_eq!(engine.store().action_count("reject-test").unwrap(), 0);
    let events = engine.store().events_for_day("reject-test", 0).unwrap();
    assert!(
        events.iter().any(|e| e.event_type == "action_rejected"),
        "rejections must land in the event log"
    );
}

#[test]
fn offensive_submission_round_trips_through_the_store() {
    let mut engine = engine_with_player("offense-test", 100);

    engine
        .apply(PlayerCommand::SubmitActions {
            player_id: "p1".into(),
            draft: ActionDraft {
                offensive: Some(OffensiveDraft {
                    kind: Some(OffensiveKind::Spy),
                    target_player: Some("p2".into()),
                    target_name: None,
                    market: None,
                }),
                ..Default::default()
            },
        })
        .unwrap();

    let record = engine
        .store()
        .action_for_week("offense-test", 0, "p1")
        .unwrap()
        .unwrap();
    let offensive = record.action.offensive().unwrap();
    assert_eq!(offensive.kind, OffensiveKind::Spy);
    assert_eq!(offensive.target_name, "Unknown Commander");
    assert!(record.action.investment().is_none());
}

#[test]
fn unknown_player_rejected() {
    let mut engine = GameEngine::build_test("ghost-test".into(), 42).unwrap();
    let err = engine.apply(invest_command(40)).unwrap_err();
    assert!(matches!(err, EngineError::UnknownPlayer { .. }));
}

#[test]
fn snapshots_written_at_every_week_boundary() {
    let mut engine = engine_with_player("snapshot-test", 100);

    engine.run_days(14).unwrap();

    for week in 0..=2 {
        assert!(
            engine
                .store()
                .snapshot_for_week("snapshot-test", week)
                .unwrap()
                .is_some(),
            "missing economy snapshot for week {week}"
        );
    }
    let latest = engine
        .store()
        .latest_snapshot("snapshot-test")
        .unwrap()
        .unwrap();
    assert_eq!(latest.week, 2);
    assert_eq!(latest.returns.len(), 4);
}

#[test]
fn roster_round_trips() {
    let engine = GameEngine::build_test("roster-test".into(), 42).unwrap();
    for (id, name, soldiers, defense) in [
        ("p1", "Ada Sterling", 120u32, DefenseLabel::Strong),
        ("p2", "Brock Mason", 80, DefenseLabel::VeryStrong),
    ] {
        engine
            .store()
            .upsert_player(
                "roster-test",
                &Player {
                    id: id.into(),
                    name: name.into(),
                    soldiers,
                    defense,
                    investments: Default::default(),
                },
            )
            .unwrap();
    }

    let roster = engine.store().roster("roster-test").unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].id, "p1");
    assert_eq!(roster[1].defense, DefenseLabel::VeryStrong);

    let p2 = engine
        .store()
        .player("roster-test", "p2")
        .unwrap()
        .unwrap();
    assert_eq!(p2.soldiers, 80);
}
