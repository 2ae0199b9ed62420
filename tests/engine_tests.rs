//! End-to-end engine tests driving whole turns through the public API.

use last_spike::{
    ActionKind, City, CityPair, DeckPolicy, GameAction, PlayerId, Property, RailEngine,
    RejectReason, Route, RulesConfig, SpaceKind, Trade, TradeResponse, TurnPhase, Verdict, SPACES,
    VALID_CITY_PAIRS,
};

const BOARD_LEN: usize = SPACES.len();

fn players(n: u64) -> Vec<PlayerId> {
    (1..=n).map(PlayerId::new).collect()
}

fn space_index(kind: SpaceKind) -> usize {
    SPACES.iter().position(|s| s.kind == kind).unwrap()
}

#[test]
fn test_new_game_setup() {
    let engine = RailEngine::new(RulesConfig::default(), 7);
    let ids = players(4);
    let state = engine.new_game(&ids).unwrap();

    assert_eq!(state.current_player, ids[0]);
    assert_eq!(state.phase, TurnPhase::Start);
    assert!(!state.game_over);
    assert!(state.routes.is_empty());
    assert!(state.properties.is_empty());
    for &id in &ids {
        assert_eq!(state.players[id].money, engine.config().starting_money);
        assert_eq!(state.players[id].position, 0);
    }
}

#[test]
fn test_roll_moves_by_dice_sum() {
    let mut engine = RailEngine::new(RulesConfig::default(), 11);
    let ids = players(2);
    let state = engine.new_game(&ids).unwrap();

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Roll, ids[0]))
        .unwrap();
    assert_eq!(outcome.verdict, Verdict::Applied);

    let new = outcome.state;
    let (d1, d2) = new.dice;
    assert!((1..=6).contains(&d1));
    assert!((1..=6).contains(&d2));
    assert_eq!(new.players[ids[0]].position, (d1 + d2) as usize % BOARD_LEN);
    assert_eq!(new.phase, TurnPhase::SpaceOption);
    // The other player did not move.
    assert_eq!(new.players[ids[1]].position, 0);
}

#[test]
fn test_wrapping_past_go_pays_subsidy() {
    let mut engine = RailEngine::new(RulesConfig::default(), 5);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    // From the last space any roll wraps past Go.
    state.players[ids[0]].position = BOARD_LEN - 1;
    let before = state.players[ids[0]].money;

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Roll, ids[0]))
        .unwrap();
    let new = outcome.state;
    let sum = (new.dice.0 + new.dice.1) as usize;

    assert_eq!(new.players[ids[0]].position, (BOARD_LEN - 1 + sum) % BOARD_LEN);
    assert_eq!(
        new.players[ids[0]].money,
        before + engine.config().pass_go_subsidy
    );
}

#[test]
fn test_buy_land_awards_property_and_charges() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    state.phase = TurnPhase::SpaceOption;
    state.players[ids[0]].position = space_index(SpaceKind::Land);
    let cost = state.current_space().cost;
    let before = state.players[ids[0]].money;

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Buy, ids[0]))
        .unwrap();
    assert_eq!(outcome.verdict, Verdict::Applied);

    let new = outcome.state;
    assert_eq!(new.players[ids[0]].money, before - cost);
    assert_eq!(new.owned_count(ids[0]), 1);
    // Turn passed to the next player.
    assert_eq!(new.current_player, ids[1]);
    assert_eq!(new.phase, TurnPhase::Start);
    assert_eq!(new.dice, (0, 0));
}

#[test]
fn test_pass_on_land_spends_nothing() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    state.phase = TurnPhase::SpaceOption;
    state.players[ids[0]].position = space_index(SpaceKind::Land);
    let before = state.players[ids[0]].money;

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Pass, ids[0]))
        .unwrap();
    let new = outcome.state;

    assert_eq!(new.players[ids[0]].money, before);
    assert_eq!(new.owned_count(ids[0]), 0);
    assert_eq!(new.current_player, ids[1]);
}

#[test]
fn test_track_purchase_and_placement() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    state.phase = TurnPhase::SpaceOption;
    state.players[ids[0]].position = space_index(SpaceKind::Track);
    let cost = state.current_space().cost;
    let before = state.players[ids[0]].money;

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Buy, ids[0]))
        .unwrap();
    let mid = outcome.state;
    assert_eq!(mid.phase, TurnPhase::RouteSelect);
    assert_eq!(mid.players[ids[0]].money, before - cost);
    // Still the same player's turn until a route is chosen.
    assert_eq!(mid.current_player, ids[0]);

    let pair = CityPair::new(City::Regina, City::Winnipeg);
    let outcome = engine
        .apply(&mid, &GameAction::with_target(ActionKind::PlaceTrack, ids[0], pair))
        .unwrap();
    let new = outcome.state;

    assert_eq!(new.route(pair).map(|r| r.tracks), Some(1));
    // First track on a route draws a property for the builder.
    assert_eq!(new.owned_count(ids[0]), 1);
    assert_eq!(new.current_player, ids[1]);
}

#[test]
fn test_place_track_rejects_unconnected_pair() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    state.phase = TurnPhase::RouteSelect;
    state.players[ids[0]].position = space_index(SpaceKind::Track);

    // Vancouver and Montreal are not adjacent.
    let bogus = CityPair::new(City::Vancouver, City::Montreal);
    let outcome = engine
        .apply(&state, &GameAction::with_target(ActionKind::PlaceTrack, ids[0], bogus))
        .unwrap();

    assert_eq!(
        outcome.verdict,
        Verdict::Rejected(RejectReason::UnknownCityPair)
    );
    assert_eq!(outcome.state, state);
}

#[test]
fn test_place_track_rejects_full_route() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    let pair = CityPair::new(City::Sudbury, City::Ottawa);
    state.routes.push_back(Route { pair, tracks: 4 });
    state.phase = TurnPhase::RouteSelect;
    state.players[ids[0]].position = space_index(SpaceKind::Track);

    let outcome = engine
        .apply(&state, &GameAction::with_target(ActionKind::PlaceTrack, ids[0], pair))
        .unwrap();

    assert_eq!(outcome.verdict, Verdict::Rejected(RejectReason::RouteFull));
    // The rejected attempt keeps the turn open for another pick.
    assert_eq!(outcome.state, state);
}

#[test]
fn test_rebellion_fizzles_without_targets() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    state.phase = TurnPhase::SpaceOption;
    state.players[ids[0]].position = space_index(SpaceKind::Rebellion);

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Ok, ids[0]))
        .unwrap();
    assert_eq!(outcome.verdict, Verdict::Applied);
    // No in-progress routes anywhere, so the turn just ends.
    assert_eq!(outcome.state.current_player, ids[1]);
}

#[test]
fn test_rebellion_tears_up_one_track() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    let pair = CityPair::new(City::Calgary, City::Regina);
    state.routes.push_back(Route { pair, tracks: 2 });
    state.phase = TurnPhase::SpaceOption;
    state.players[ids[0]].position = space_index(SpaceKind::Rebellion);

    let outcome = engine
        .apply(&state, &GameAction::new(ActionKind::Ok, ids[0]))
        .unwrap();
    let mid = outcome.state;
    assert_eq!(mid.phase, TurnPhase::RouteSelect);

    let outcome = engine
        .apply(&mid, &GameAction::with_target(ActionKind::Rebellion, ids[0], pair))
        .unwrap();
    let new = outcome.state;

    assert_eq!(new.route(pair).map(|r| r.tracks), Some(1));
    assert_eq!(new.current_player, ids[1]);
}

#[test]
fn test_rebellion_cannot_hit_completed_or_fresh_routes() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    let fresh = CityPair::new(City::Vancouver, City::Kamloops);
    let vulnerable = CityPair::new(City::Kamloops, City::Calgary);
    let done = CityPair::new(City::Calgary, City::Regina);
    state.routes.push_back(Route { pair: fresh, tracks: 1 });
    state.routes.push_back(Route { pair: vulnerable, tracks: 3 });
    state.routes.push_back(Route { pair: done, tracks: 4 });

    state.phase = TurnPhase::RouteSelect;
    state.players[ids[0]].position = space_index(SpaceKind::Rebellion);

    for pair in [fresh, done] {
        let outcome = engine
            .apply(&state, &GameAction::with_target(ActionKind::Rebellion, ids[0], pair))
            .unwrap();
        assert_eq!(
            outcome.verdict,
            Verdict::Rejected(RejectReason::InvalidRebellionTarget),
            "{pair:?}"
        );
    }

    let outcome = engine
        .apply(&state, &GameAction::with_target(ActionKind::Rebellion, ids[0], vulnerable))
        .unwrap();
    assert_eq!(outcome.verdict, Verdict::Applied);
}

#[test]
fn test_route_completion_pays_the_table() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    let pair = CityPair::new(City::Vancouver, City::Kamloops);
    state.routes.push_back(Route { pair, tracks: 3 });
    // ids[0] holds 2 Vancouver lots, ids[1] holds 1 Kamloops lot.
    for _ in 0..2 {
        state.properties.push_back(Property {
            city: City::Vancouver,
            owner: ids[0],
        });
    }
    state.properties.push_back(Property {
        city: City::Kamloops,
        owner: ids[1],
    });

    state.phase = TurnPhase::RouteSelect;
    state.players[ids[0]].position = space_index(SpaceKind::Track);
    let before: Vec<_> = ids.iter().map(|&id| state.players[id].money).collect();

    let outcome = engine
        .apply(&state, &GameAction::with_target(ActionKind::PlaceTrack, ids[0], pair))
        .unwrap();
    let new = outcome.state;

    assert!(new.route(pair).unwrap().is_complete());
    assert!(!new.game_over);
    // Payouts come from the per-city tables, zero holdings included.
    let vancouver = last_spike::board::city_values(City::Vancouver);
    let kamloops = last_spike::board::city_values(City::Kamloops);
    assert_eq!(
        new.players[ids[0]].money,
        before[0] + vancouver[2] + kamloops[0]
    );
    assert_eq!(
        new.players[ids[1]].money,
        before[1] + vancouver[0] + kamloops[1]
    );
}

#[test]
fn test_last_spike_ends_the_game() {
    let mut engine = RailEngine::new(RulesConfig::default(), 3);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    let spine = [
        (City::Vancouver, City::Kamloops),
        (City::Kamloops, City::Calgary),
        (City::Calgary, City::Regina),
        (City::Regina, City::Winnipeg),
        (City::Winnipeg, City::ThunderBay),
        (City::ThunderBay, City::Sudbury),
        (City::Sudbury, City::Ottawa),
        (City::Ottawa, City::Montreal),
    ];
    for (a, b) in spine {
        state.routes.push_back(Route {
            pair: CityPair::new(a, b),
            tracks: 4,
        });
    }
    let last = CityPair::new(City::Winnipeg, City::ThunderBay);
    let idx = state.route_index(last).unwrap();
    state.routes[idx].tracks = 3;

    state.phase = TurnPhase::RouteSelect;
    state.players[ids[0]].position = space_index(SpaceKind::Track);
    let before = state.players[ids[0]].money;

    let outcome = engine
        .apply(&state, &GameAction::with_target(ActionKind::PlaceTrack, ids[0], last))
        .unwrap();
    let new = outcome.state;

    assert!(new.game_over);
    assert!(new.players[ids[0]].money >= before + engine.config().last_spike_bonus);
    assert_eq!(new.current_player, ids[0]);
    assert!(engine.valid_actions(&new).is_empty());
}

#[test]
fn test_deck_exhaustion_policies() {
    let ids = players(2);

    for (policy, expect_charge) in [
        (DeckPolicy::ChargeAlways, true),
        (DeckPolicy::RefundWhenExhausted, false),
    ] {
        let config = RulesConfig {
            deck_policy: policy,
            ..RulesConfig::default()
        };
        let mut engine = RailEngine::new(config, 9);
        let mut state = engine.new_game(&ids).unwrap();

        // Drain the whole deck: 5 lots in each of 9 cities.
        for city in City::ALL {
            for _ in 0..5 {
                state.properties.push_back(Property { city, owner: ids[1] });
            }
        }

        state.phase = TurnPhase::SpaceOption;
        state.players[ids[0]].position = space_index(SpaceKind::Land);
        let cost = state.current_space().cost;
        let before = state.players[ids[0]].money;

        let outcome = engine
            .apply(&state, &GameAction::new(ActionKind::Buy, ids[0]))
            .unwrap();
        assert_eq!(outcome.verdict, Verdict::Applied);

        let new = outcome.state;
        assert_eq!(new.owned_count(ids[0]), 0);
        let expected = if expect_charge { before - cost } else { before };
        assert_eq!(new.players[ids[0]].money, expected, "{policy:?}");
    }
}

#[test]
fn test_trade_full_cycle() {
    let mut engine = RailEngine::new(RulesConfig::default(), 13);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();

    let lot = Property {
        city: City::Ottawa,
        owner: ids[1],
    };
    state.properties.push_back(lot.clone());

    // ids[0] offers 4_000 for the Ottawa lot.
    let trade = Trade {
        offerer: ids[0],
        responder: ids[1],
        properties: vec![lot],
        offerer_money: 4_000,
        responder_money: 0,
    };
    let outcome = engine
        .apply(&state, &GameAction::trade_offer(ids[0], trade))
        .unwrap();
    let mid = outcome.state;
    assert!(mid.pending_trade.is_some());

    let before: Vec<_> = ids.iter().map(|&id| mid.players[id].money).collect();
    let outcome = engine
        .apply(&mid, &GameAction::new(ActionKind::AcceptTradeOffer, ids[1]))
        .unwrap();
    let new = outcome.state;

    assert_eq!(new.players[ids[0]].money, before[0] - 4_000);
    assert_eq!(new.players[ids[1]].money, before[1] + 4_000);
    assert_eq!(new.owned_in_city(ids[0], City::Ottawa), 1);
    assert_eq!(new.owned_in_city(ids[1], City::Ottawa), 0);
    assert!(new.pending_trade.is_none());
}

#[test]
fn test_trade_decline_keeps_or_clears_offer() {
    let engine = RailEngine::new(RulesConfig::default(), 13);
    let ids = players(2);
    let mut state = engine.new_game(&ids).unwrap();
    state.pending_trade = Some(Trade {
        offerer: ids[0],
        responder: ids[1],
        properties: Vec::new(),
        offerer_money: 1,
        responder_money: 0,
    });

    let kept = engine
        .resolve_trade(&state, TradeResponse::Decline { clear_offer: false })
        .unwrap();
    assert!(kept.state.pending_trade.is_some());

    let cleared = engine
        .resolve_trade(&state, TradeResponse::Decline { clear_offer: true })
        .unwrap();
    assert!(cleared.state.pending_trade.is_none());
}

#[test]
fn test_seeded_games_replay_identically() {
    let ids = players(3);
    let mut a = RailEngine::new(RulesConfig::default(), 2024);
    let mut b = RailEngine::new(RulesConfig::default(), 2024);
    let mut state_a = a.new_game(&ids).unwrap();
    let mut state_b = b.new_game(&ids).unwrap();

    // Drive both games with the same fixed policy: always the first legal
    // action, always the first legal target.
    for _ in 0..60 {
        if state_a.game_over {
            break;
        }
        for (engine, state) in [(&mut a, &mut state_a), (&mut b, &mut state_b)] {
            let kinds = engine.valid_actions(state);
            let kind = kinds[0];
            let player = state.current_player;
            let action = match kind {
                ActionKind::PlaceTrack => {
                    let pair = VALID_CITY_PAIRS
                        .iter()
                        .copied()
                        .find(|&p| {
                            state.route(p).map_or(true, |r| !r.is_complete())
                        })
                        .unwrap();
                    GameAction::with_target(kind, player, pair)
                }
                ActionKind::Rebellion => {
                    let pair = last_spike::rules::rebellion_targets(state)[0];
                    GameAction::with_target(kind, player, pair)
                }
                _ => GameAction::new(kind, player),
            };
            let outcome = engine.apply(state, &action).unwrap();
            assert!(outcome.is_applied(), "{kind:?}");
            *state = outcome.state;
        }
        assert_eq!(state_a, state_b);
    }

    assert_eq!(state_a, state_b);
    assert_eq!(a.rng_state(), b.rng_state());
}

#[test]
fn test_rng_checkpoint_restores_the_stream() {
    let ids = players(2);
    let mut engine = RailEngine::new(RulesConfig::default(), 555);
    let state = engine.new_game(&ids).unwrap();

    let checkpoint = engine.rng_state();
    let first = engine
        .apply(&state, &GameAction::new(ActionKind::Roll, ids[0]))
        .unwrap();

    engine.restore_rng(&checkpoint);
    let second = engine
        .apply(&state, &GameAction::new(ActionKind::Roll, ids[0]))
        .unwrap();

    assert_eq!(first.state, second.state);
}

#[test]
fn test_snapshot_round_trip_mid_game() {
    let mut engine = RailEngine::new(RulesConfig::default(), 99);
    let ids = players(3);
    let mut state = engine.new_game(&ids).unwrap();

    for _ in 0..10 {
        let kind = engine.valid_actions(&state)[0];
        let action = match kind {
            ActionKind::PlaceTrack => GameAction::with_target(
                kind,
                state.current_player,
                VALID_CITY_PAIRS[0],
            ),
            ActionKind::Rebellion => GameAction::with_target(
                kind,
                state.current_player,
                last_spike::rules::rebellion_targets(&state)[0],
            ),
            _ => GameAction::new(kind, state.current_player),
        };
        let outcome = engine.apply(&state, &action).unwrap();
        state = outcome.state;
    }

    let json = last_spike::codec::to_json(&state).unwrap();
    let restored = last_spike::codec::from_json(&json).unwrap();
    assert_eq!(restored, state);
}
