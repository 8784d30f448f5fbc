use wealth_core::{
    action::{
        self, ActionDraft, DefensiveDraft, DefensiveKind, InvestmentDraft, InvestmentKind,
        OffensiveDraft, OffensiveKind, UNKNOWN_COMMANDER,
    },
    error::ActionError,
    market::MarketKey,
};

fn invest_draft(amount: u32, market: Option<MarketKey>) -> ActionDraft {
    ActionDraft {
        investment: Some(InvestmentDraft {
            kind: None,
            amount: Some(amount),
            market,
        }),
        ..Default::default()
    }
}

fn offensive_draft(
    kind: Option<OffensiveKind>,
    target: Option<&str>,
    name: Option<&str>,
) -> ActionDraft {
    ActionDraft {
        offensive: Some(OffensiveDraft {
            kind,
            target_player: target.map(Into::into),
            target_name: name.map(Into::into),
            market: None,
        }),
        ..Default::default()
    }
}

#[test]
fn empty_bundle_rejected() {
    let err = action::validate(&ActionDraft::default(), 100).unwrap_err();
    assert_eq!(err, ActionError::MissingAction);
}

#[test]
fn zero_or_missing_amount_rejected() {
    let err = action::validate(&invest_draft(0, Some(MarketKey::Stocks)), 100).unwrap_err();
    assert_eq!(err, ActionError::InvalidAmount);

    let no_amount = ActionDraft {
        investment: Some(InvestmentDraft {
            kind: None,
            amount: None,
            market: Some(MarketKey::Stocks),
        }),
        ..Default::default()
    };
    let err = action::validate(&no_amount, 100).unwrap_err();
    assert_eq!(err, ActionError::InvalidAmount);
}

#[test]
fn overdrawn_amount_message_mentions_both_numbers() {
    let err = action::validate(&invest_draft(50, Some(MarketKey::Stocks)), 30).unwrap_err();
    assert_eq!(
        err,
        ActionError::InsufficientResources {
            requested: 50,
            available: 30
        }
    );
    let message = err.to_string();
    assert!(message.contains("50"), "message must carry the request: {message}");
    assert!(message.contains("30"), "message must carry the balance: {message}");
}

#[test]
fn deployment_below_minimum_rejected() {
    let err = action::validate(&invest_draft(5, Some(MarketKey::Stocks)), 100).unwrap_err();
    assert_eq!(err, ActionError::BelowMinimumDeployment { min: 10 });
}

#[test]
fn missing_market_rejected() {
    let err = action::validate(&invest_draft(50, None), 100).unwrap_err();
    assert_eq!(err, ActionError::MissingMarket);
}

#[test]
fn investment_normalizes_with_default_kind() {
    let action = action::validate(&invest_draft(50, Some(MarketKey::Stocks)), 100).unwrap();

    let investment = action.investment().expect("investment branch must be active");
    assert_eq!(investment.kind, InvestmentKind::Invest);
    assert_eq!(investment.amount, 50);
    assert_eq!(investment.market, MarketKey::Stocks);
    assert!(
        action.offensive().is_none(),
        "offensive branch must not survive an investment move"
    );
}

#[test]
fn offensive_needs_an_operation_type() {
    let err = action::validate(&offensive_draft(None, Some("p2"), Some("Bob")), 100).unwrap_err();
    assert_eq!(err, ActionError::MissingOperationType);
}

#[test]
fn offensive_needs_a_target() {
    let err = action::validate(
        &offensive_draft(Some(OffensiveKind::Attack), None, Some("Bob")),
        100,
    )
    .unwrap_err();
    assert_eq!(err, ActionError::MissingTarget);
}

#[test]
fn attack_needs_twenty_five_soldiers() {
    let draft = offensive_draft(Some(OffensiveKind::Attack), Some("p2"), Some("Bob"));

    let err = action::validate(&draft, 20).unwrap_err();
    assert_eq!(
        err.to_string(),
        "need at least 25 soldiers to launch an attack"
    );

    // The draft is untouched by the failure; the same one passes at 25.
    let action = action::validate(&draft, 25).unwrap();
    let offensive = action.offensive().expect("offensive branch must be active");
    assert_eq!(offensive.kind, OffensiveKind::Attack);
    assert_eq!(offensive.target_player, "p2");
    assert_eq!(offensive.target_name, "Bob");
    assert!(action.investment().is_none());
}

#[test]
fn spy_needs_ten_soldiers() {
    let draft = offensive_draft(Some(OffensiveKind::Spy), Some("p2"), Some("Bob"));

    let err = action::validate(&draft, 9).unwrap_err();
    assert_eq!(err.to_string(), "need at least 10 soldiers to deploy a spy");

    assert!(action::validate(&draft, 10).is_ok());
}

#[test]
fn manipulate_has_no_minimum() {
    let draft = offensive_draft(Some(OffensiveKind::Manipulate), Some("p2"), Some("Bob"));
    assert!(action::validate(&draft, 1).is_ok());
}

#[test]
fn missing_target_name_gets_placeholder() {
    let draft = offensive_draft(Some(OffensiveKind::Attack), Some("p2"), None);
    let action = action::validate(&draft, 30).unwrap();
    assert_eq!(action.offensive().unwrap().target_name, UNKNOWN_COMMANDER);
}

#[test]
fn investment_wins_when_both_branches_filled() {
    let draft = ActionDraft {
        investment: Some(InvestmentDraft {
            kind: Some(InvestmentKind::Diversify),
            amount: Some(40),
            market: Some(MarketKey::Crypto),
        }),
        offensive: Some(OffensiveDraft {
            kind: Some(OffensiveKind::Attack),
            target_player: Some("p2".into()),
            target_name: Some("Bob".into()),
            market: None,
        }),
        defensive: None,
    };

    let action = action::validate(&draft, 100).unwrap();
    assert!(action.investment().is_some());
    assert!(action.offensive().is_none());
}

#[test]
fn defensive_rider_survives_normalization() {
    let mut draft = invest_draft(50, Some(MarketKey::Stocks));
    draft.defensive = Some(DefensiveDraft {
        kind: Some(DefensiveKind::Insurance),
        market: Some(MarketKey::Crypto),
    });

    let action = action::validate(&draft, 100).unwrap();
    let defensive = action.defensive.expect("defensive rider must be kept");
    assert_eq!(defensive.kind, DefensiveKind::Insurance);
    assert_eq!(defensive.market, Some(MarketKey::Crypto));
}

#[test]
fn half_filled_defensive_rider_is_dropped() {
    let mut draft = invest_draft(50, Some(MarketKey::Stocks));
    draft.defensive = Some(DefensiveDraft {
        kind: None,
        market: Some(MarketKey::Crypto),
    });

    let action = action::validate(&draft, 100).unwrap();
    assert!(action.defensive.is_none());
}

#[test]
fn validation_is_idempotent() {
    let draft = invest_draft(50, Some(MarketKey::Stocks));
    let first = action::validate(&draft, 100).unwrap();
    let second = action::validate(&draft, 100).unwrap();
    assert_eq!(first, second);
}
