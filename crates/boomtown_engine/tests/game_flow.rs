//! End-to-end games driven through the public handle API.
//!
//! Every test plays on a constructed 3x3 field so strikes, reservoirs and
//! costs are known in advance:
//!
//! ```text
//! oil   1 1 1     cost 10 everywhere
//!       2 1 2     tax 100 everywhere
//!       3 3 3
//! ```

use boomtown_engine::economy::{capacity, gross_revenue, weekly_output, well_decay};
use boomtown_engine::view::{ScoreView, SellView, SurveyView};
use boomtown_engine::{Entity, Field, GameConfig, GameError, GameHandle, Move, View};

fn test_field() -> Field {
    Field::from_grids(
        3,
        3,
        vec![50; 9],
        vec![10; 9],
        vec![1, 1, 1, 2, 1, 2, 3, 3, 3],
        vec![100; 9],
    )
    .expect("valid test field")
}

fn config(weeks: u32) -> GameConfig {
    GameConfig {
        weeks,
        seed: Some(7),
        ..GameConfig::default()
    }
}

async fn start(weeks: u32, names: &[&str]) -> (GameHandle, Vec<Entity>) {
    let game = GameHandle::spawn_with_field(config(weeks), test_field()).unwrap();
    let mut players = Vec::new();
    for name in names {
        players.push(game.join(*name).await.unwrap());
    }
    let view = game.submit(Move::done(players[0])).await.unwrap();
    assert_eq!(view.name(), "survey");
    (game, players)
}

async fn survey(game: &GameHandle, player: Entity) -> SurveyView {
    match game.view(player).await.unwrap() {
        View::Survey(view) => view,
        other => panic!("expected survey view, got {}", other.name()),
    }
}

async fn score(game: &GameHandle) -> ScoreView {
    match game.status().await.unwrap() {
        View::Score(view) => view,
        other => panic!("expected score view, got {}", other.name()),
    }
}

fn pnl(score: &ScoreView, player: Entity) -> i64 {
    score
        .players
        .iter()
        .find(|s| s.player == player)
        .map(|s| s.pnl)
        .expect("player on the scoreboard")
}

/// Surveys, accepts the report and drills until the machine leaves Drill.
async fn claim_and_drill(game: &GameHandle, player: Entity, site: usize) -> SellView {
    assert_eq!(game.submit(Move::site(player, site)).await.unwrap().name(), "report");
    assert_eq!(game.submit(Move::step(player)).await.unwrap().name(), "drill");
    loop {
        match game.submit(Move::step(player)).await.unwrap() {
            View::Drill(_) => continue,
            View::Sell(sell) => return sell,
            other => panic!("unexpected {} while drilling", other.name()),
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_three_player_game() {
    let (game, players) = start(2, &["alice", "bruno", "carla"]).await;
    let (a, b, c) = (players[0], players[1], players[2]);

    let view = survey(&game, a).await;
    assert_eq!(view.week, 1);
    assert!(view.your_turn);
    assert!(view.oil.iter().all(|&d| d == 0));

    // Surveys in turn order, then drilling proceeds independently.
    for (player, site) in [(a, 0), (b, 3), (c, 6)] {
        assert_eq!(game.submit(Move::site(player, site)).await.unwrap().name(), "report");
    }
    let drills = [(a, 0), (b, 3), (c, 6)].map(|(player, site)| {
        let game = game.clone();
        tokio::spawn(async move {
            assert_eq!(game.submit(Move::step(player)).await.unwrap().name(), "drill");
            loop {
                match game.submit(Move::step(player)).await.unwrap() {
                    View::Drill(_) => continue,
                    View::Sell(sell) => return (site, sell),
                    other => panic!("unexpected {} while drilling", other.name()),
                }
            }
        })
    });
    for handle in drills {
        let (site, sell) = handle.await.unwrap();
        let well = &sell.wells[0];
        assert_eq!(well.site, site);
        assert!(well.oil.is_some(), "site {site} should strike");
    }

    let View::Sell(sell) = game.submit(Move::site(a, 0)).await.unwrap() else {
        panic!("expected sell view");
    };
    assert!(sell.wells[0].sold);
    for player in [a, b, c] {
        assert_eq!(game.submit(Move::done(player)).await.unwrap().name(), "score");
    }

    // Week 1 settlement: no capacity yet, tax only.
    let week2 = score(&game).await;
    assert_eq!(week2.week, 2);
    assert!(!week2.is_final);
    assert_eq!(pnl(&week2, a), -10 - 100);
    assert_eq!(pnl(&week2, b), -10 - 20 - 100);
    assert_eq!(pnl(&week2, c), -10 - 20 - 30 - 100);

    // Struck oil stays visible to its driller only.
    assert_eq!(survey(&game, b).await.oil[3], 2);
    assert_eq!(survey(&game, a).await.oil[3], 0);

    for player in [a, b, c] {
        assert_eq!(game.submit(Move::done(player)).await.unwrap().name(), "sell");
    }
    for player in [a, b, c] {
        game.submit(Move::done(player)).await.unwrap();
    }

    let last = score(&game).await;
    assert!(last.is_final);
    assert_eq!(last.prices.len(), 2);
    let price = last.prices[1];

    // Alice sold in week 1 so her well no longer settles.
    assert_eq!(pnl(&last, a), -110);

    let b_out = weekly_output((1.0 - well_decay(1)) / 1.0, capacity(1, 2), 1);
    assert!(b_out > 0);
    assert_eq!(pnl(&last, b), -130 + gross_revenue(b_out, price) - 100);

    let c_pressure = ((3.0 - well_decay(1)) / 3.0).clamp(0.0, 1.0);
    let c_out = weekly_output(c_pressure, capacity(1, 2), 3);
    assert_eq!(pnl(&last, c), -160 + gross_revenue(c_out, price) - 100);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_out_of_turn_survey_is_ignored() {
    let (game, players) = start(1, &["alice", "bruno"]).await;
    let (a, b) = (players[0], players[1]);

    let View::Survey(view) = game.submit(Move::site(b, 4)).await.unwrap() else {
        panic!("expected the survey view again");
    };
    assert_eq!(view.turn, a);
    assert!(view.claims.is_empty());

    game.submit(Move::site(a, 4)).await.unwrap();
    // Occupied site: still bruno's turn afterwards.
    assert_eq!(game.submit(Move::site(b, 4)).await.unwrap().name(), "survey");
    assert!(survey(&game, b).await.your_turn);
    assert_eq!(game.submit(Move::site(b, 5)).await.unwrap().name(), "report");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sale_rules() {
    let (game, players) = start(1, &["alice", "bruno"]).await;
    let (a, b) = (players[0], players[1]);

    claim_and_drill(&game, a, 6).await;
    game.submit(Move::site(b, 3)).await.unwrap();
    game.submit(Move::done(b)).await.unwrap();

    // Bruno cannot sell alice's deed.
    let View::Sell(view) = game.submit(Move::site(b, 6)).await.unwrap() else {
        panic!("expected sell view");
    };
    assert_eq!(view.wells.len(), 1);
    assert_eq!(view.wells[0].site, 3);

    game.submit(Move::site(a, 6)).await.unwrap();
    let View::Sell(view) = game.submit(Move::site(a, 6)).await.unwrap() else {
        panic!("second sale should re-prompt");
    };
    assert!(view.wells[0].sold);
    assert_eq!(view.wells[0].pnl, -60);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_hole() {
    let field = Field::from_grids(1, 2, vec![50; 2], vec![5; 2], vec![0, 4], vec![100; 2]).unwrap();
    let game = GameHandle::spawn_with_field(config(1), field).unwrap();
    let a = game.join("alice").await.unwrap();
    game.submit(Move::done(a)).await.unwrap();

    let sell = claim_and_drill(&game, a, 0).await;
    let well = &sell.wells[0];
    assert_eq!(well.bit, boomtown_engine::MAX_DEPTH);
    assert_eq!(well.oil, None);
    assert_eq!(well.pnl, -5 * 45);

    game.submit(Move::done(a)).await.unwrap();
    // Dry holes pay no tax.
    assert_eq!(pnl(&score(&game).await, a), -225);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_moves_after_done_get_the_scoreboard() {
    let (game, players) = start(2, &["alice", "bruno"]).await;
    let (a, b) = (players[0], players[1]);

    game.submit(Move::done(a)).await.unwrap();
    assert_eq!(game.submit(Move::done(a)).await.unwrap().name(), "score");
    assert_eq!(game.submit(Move::site(a, 1)).await.unwrap().name(), "score");

    let View::Score(view) = game.view(a).await.unwrap() else {
        panic!("expected score view");
    };
    assert_eq!(view.waiting, vec![b]);
    assert_eq!(view.week, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lobby_rules() {
    let game = GameHandle::spawn_with_field(config(1), test_field()).unwrap();
    let a = game.join("alice").await.unwrap();
    let b = game.join("bruno").await.unwrap();

    assert_eq!(game.submit(Move::done(b)).await.unwrap().name(), "lobby");
    assert_eq!(game.view(b).await.unwrap().name(), "lobby");
    assert_eq!(
        game.submit(Move::done(Entity(42))).await,
        Err(GameError::UnknownPlayer(Entity(42)))
    );

    game.submit(Move::done(a)).await.unwrap();
    assert_eq!(game.join("carla").await, Err(GameError::AlreadyStarted));
    assert_eq!(game.view(b).await.unwrap().name(), "survey");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_week_game_ends() {
    let (game, players) = start(1, &["alice"]).await;
    let a = players[0];

    claim_and_drill(&game, a, 4).await;
    game.submit(Move::done(a)).await.unwrap();

    let last = score(&game).await;
    assert!(last.is_final);
    assert_eq!(last.week, 1);
    assert_eq!(pnl(&last, a), -10 - 100);
    assert_eq!(game.join("late").await, Err(GameError::GameOver));
    assert_eq!(game.view(a).await.unwrap(), View::Score(last));

    let json = game.status().await.unwrap().to_json().unwrap();
    assert!(json.contains("\"name\":\"score\""));
    assert!(json.contains("\"final\":true"));
}
