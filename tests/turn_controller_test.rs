//! Tests for turn orchestration and retry semantics.

use strictly_territory::{
    Board, Contestant, Coord, GameError, MoverError, MoverKind, PlayerId, ScoringMode,
    ScriptedMover, SimpleAi, TurnController, TurnEvent, TurnPhase, TurnSettings,
};
use tokio::sync::mpsc;

const A: PlayerId = PlayerId::new(0);
const B: PlayerId = PlayerId::new(1);

fn scripted(kind: MoverKind, coords: &[(usize, usize)]) -> Box<ScriptedMover> {
    Box::new(ScriptedMover::from_coords(kind, coords.iter().copied()))
}

fn two_player(
    rows: usize,
    cols: usize,
    first: Box<ScriptedMover>,
    second: Box<ScriptedMover>,
) -> TurnController {
    TurnController::with_dimensions(
        rows,
        cols,
        vec![
            Contestant::new("human", '*', first),
            Contestant::new("agent", 'o', second),
        ],
        TurnSettings::default(),
    )
    .expect("Valid game")
}

fn drain(rx: &mut mpsc::UnboundedReceiver<TurnEvent>) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn test_invalid_dimensions_fatal() {
    let result = TurnController::with_dimensions(
        0,
        3,
        vec![
            Contestant::new("a", '*', Box::new(SimpleAi)),
            Contestant::new("b", 'o', Box::new(SimpleAi)),
        ],
        TurnSettings::default(),
    );
    assert!(matches!(result, Err(GameError::InvalidDimensions { .. })));
}

#[test]
fn test_needs_two_players() {
    let result = TurnController::with_dimensions(
        2,
        2,
        vec![Contestant::new("solo", '*', Box::new(SimpleAi))],
        TurnSettings::default(),
    );
    assert_eq!(result.unwrap_err(), GameError::TooFewPlayers { count: 1 });
}

#[test]
fn test_duplicate_marker_rejected() {
    let result = TurnController::with_dimensions(
        2,
        2,
        vec![
            Contestant::new("a", 'x', Box::new(SimpleAi)),
            Contestant::new("b", 'x', Box::new(SimpleAi)),
        ],
        TurnSettings::default(),
    );
    assert_eq!(result.unwrap_err(), GameError::DuplicateMarker { marker: 'x' });
}

#[test]
fn test_initial_phase_first_player() {
    let game = two_player(
        2,
        2,
        scripted(MoverKind::Interactive, &[]),
        scripted(MoverKind::Automated, &[]),
    );
    assert_eq!(game.phase(), TurnPhase::AwaitingMove(A));
    assert!(game.outcome().is_none());
}

#[tokio::test]
async fn test_alternating_turns_until_full() {
    let mut game = two_player(
        2,
        2,
        scripted(MoverKind::Interactive, &[(0, 0), (1, 0)]),
        scripted(MoverKind::Automated, &[(0, 1), (1, 1)]),
    );

    assert_eq!(game.play_turn().await, Ok(TurnPhase::AwaitingMove(B)));
    assert_eq!(game.play_turn().await, Ok(TurnPhase::AwaitingMove(A)));
    assert_eq!(game.play_turn().await, Ok(TurnPhase::AwaitingMove(B)));
    assert_eq!(game.play_turn().await, Ok(TurnPhase::GameOver));

    let players: Vec<PlayerId> = game.history().iter().map(|c| c.player).collect();
    assert_eq!(players, vec![A, B, A, B]);

    let outcome = game.outcome().expect("Board full");
    assert_eq!(outcome.score(A), 2);
    assert_eq!(outcome.score(B), 2);
    assert!(outcome.is_tie());

    assert_eq!(game.play_turn().await, Err(GameError::NotInProgress));
}

#[tokio::test]
async fn test_three_players_round_robin() {
    let mut game = TurnController::with_dimensions(
        1,
        6,
        vec![
            Contestant::new("a", 'a', scripted(MoverKind::Automated, &[(0, 0), (0, 3)])),
            Contestant::new("b", 'b', scripted(MoverKind::Automated, &[(0, 1), (0, 4)])),
            Contestant::new("c", 'c', scripted(MoverKind::Automated, &[(0, 2), (0, 5)])),
        ],
        TurnSettings::default(),
    )
    .unwrap();

    let outcome = game.run().await.expect("Game completes");
    let order: Vec<usize> = outcome.history().iter().map(|c| c.player.index()).collect();
    assert_eq!(order, vec![0, 1, 2, 0, 1, 2]);
}

#[tokio::test]
async fn test_failed_attempt_retries_same_player_with_feedback() {
    let first = ScriptedMover::from_coords(MoverKind::Interactive, [(0, 0), (0, 0), (1, 1)]);
    let first_log = first.feedback_log();
    let second = ScriptedMover::from_coords(MoverKind::Automated, [(0, 1), (1, 0)]);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut game = two_player(2, 2, Box::new(first), Box::new(second)).with_events(tx);

    game.play_turn().await.unwrap(); // A takes (0,0)
    game.play_turn().await.unwrap(); // B takes (0,1)
    // A tries (0,0) again, then (1,1).
    assert_eq!(game.play_turn().await, Ok(TurnPhase::AwaitingMove(B)));

    let events = drain(&mut rx);
    let rejected: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TurnEvent::MoveRejected { player, attempt, reason } => Some((*player, *attempt, reason.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].0, A);
    assert_eq!(rejected[0].1, 1);
    assert!(rejected[0].2.contains("already owned by player human"));

    let log = first_log.lock().unwrap().clone();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], None);
    assert_eq!(log[1], None);
    let retry = log[2].as_deref().expect("Feedback on retry");
    assert!(retry.contains("(0,0)"));

    // Turn order resumed with B, not skipped.
    assert_eq!(game.history().last().map(|c| c.player), Some(A));
    assert_eq!(game.phase(), TurnPhase::AwaitingMove(B));
}

#[tokio::test]
async fn test_feedback_accumulates_and_resets_per_turn() {
    let first = ScriptedMover::new(
        MoverKind::Interactive,
        [
            Err(MoverError::Unavailable { message: "typo".into() }),
            Ok(Coord::new(9, 9)),
            Ok(Coord::new(0, 0)),
            Ok(Coord::new(1, 0)),
        ],
    );
    let log = first.feedback_log();
    let second = ScriptedMover::from_coords(MoverKind::Automated, [(0, 1), (1, 1)]);

    let mut game = two_player(2, 2, Box::new(first), Box::new(second));
    game.run().await.expect("Completes");

    let log = log.lock().unwrap().clone();
    assert_eq!(log.len(), 4);
    assert_eq!(log[0], None);
    let second_attempt = log[1].as_deref().unwrap();
    assert!(second_attempt.contains("typo"));
    let third_attempt = log[2].as_deref().unwrap();
    assert!(third_attempt.contains("typo"));
    assert!(third_attempt.contains("Invalid position (9,9)"));
    // New turn starts with a clean log.
    assert_eq!(log[3], None);
}

#[tokio::test]
async fn test_automated_mover_aborts_after_four_failures() {
    let failing = ScriptedMover::new(
        MoverKind::Automated,
        (0..4).map(|_| Err::<Coord, _>(MoverError::Unavailable { message: "garbled".into() })),
    );
    let mut game = two_player(
        2,
        2,
        scripted(MoverKind::Interactive, &[(0, 0)]),
        Box::new(failing),
    );

    game.play_turn().await.unwrap();
    let board_before = game.board().clone();

    let err = game.play_turn().await.unwrap_err();
    match err {
        GameError::RetryBudgetExceeded { player, attempts, feedback } => {
            assert_eq!(player, "agent");
            assert_eq!(attempts, 4);
            assert_eq!(feedback.matches("garbled").count(), 4);
        }
        other => panic!("Unexpected error: {other}"),
    }
    assert_eq!(game.board(), &board_before);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.phase(), TurnPhase::Aborted);
    assert_eq!(game.play_turn().await, Err(GameError::NotInProgress));
}

#[tokio::test]
async fn test_automated_mover_succeeds_on_fourth_attempt() {
    let agent = ScriptedMover::new(
        MoverKind::Automated,
        [
            Ok(Coord::new(5, 5)),
            Ok(Coord::new(0, 0)),
            Ok(Coord::new(7, 0)),
            Ok(Coord::new(1, 1)),
        ],
    );
    let mut game = two_player(2, 2, scripted(MoverKind::Interactive, &[(0, 0)]), Box::new(agent));
    game.play_turn().await.unwrap();
    assert_eq!(game.play_turn().await, Ok(TurnPhase::AwaitingMove(A)));
    assert_eq!(game.history()[1].coord, Coord::new(1, 1));
}

#[tokio::test]
async fn test_custom_retry_bound() {
    let agent = ScriptedMover::new(
        MoverKind::Automated,
        [Ok(Coord::new(9, 9)), Ok(Coord::new(0, 0))],
    );
    let mut game = TurnController::with_dimensions(
        1,
        2,
        vec![
            Contestant::new("agent", 'o', Box::new(agent)),
            Contestant::new("ai", '*', Box::new(SimpleAi)),
        ],
        TurnSettings::new(0, ScoringMode::LargestComponent),
    )
    .unwrap();
    assert!(matches!(
        game.play_turn().await,
        Err(GameError::RetryBudgetExceeded { attempts: 1, .. })
    ));
}

#[tokio::test]
async fn test_interactive_mover_never_aborts() {
    let mut script: Vec<Result<Coord, MoverError>> = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                Ok(Coord::new(42, 0))
            } else {
                Err(MoverError::Unavailable { message: "not a number".into() })
            }
        })
        .collect();
    script.push(Ok(Coord::new(0, 0)));
    let human = ScriptedMover::new(MoverKind::Interactive, script);

    let mut game = two_player(1, 2, Box::new(human), scripted(MoverKind::Automated, &[(0, 1)]));
    assert_eq!(game.play_turn().await, Ok(TurnPhase::AwaitingMove(B)));
    assert_eq!(game.history().len(), 1);
}

#[tokio::test]
async fn test_closed_input_is_fatal() {
    let mut game = two_player(
        2,
        2,
        scripted(MoverKind::Interactive, &[]),
        scripted(MoverKind::Automated, &[]),
    );
    assert_eq!(
        game.play_turn().await,
        Err(GameError::MoverDisconnected { player: "human".to_string() })
    );
    assert_eq!(game.phase(), TurnPhase::Aborted);
}

#[tokio::test]
async fn test_game_over_event_carries_scores() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut game = TurnController::with_dimensions(
        2,
        3,
        vec![
            Contestant::new("left", '*', Box::new(SimpleAi)),
            Contestant::new("right", 'o', Box::new(SimpleAi)),
        ],
        TurnSettings::default(),
    )
    .unwrap()
    .with_events(tx);

    let outcome = game.run().await.expect("Simple AIs finish");
    // Row-major first-open-cell play: * o * / o * o
    assert_eq!(game.render(), "+-+-+-+\n|*|o|*|\n|o|*|o|\n+-+-+-+");
    assert_eq!(outcome.score(A), 1);
    assert_eq!(outcome.score(B), 1);

    let events = drain(&mut rx);
    let claims = events
        .iter()
        .filter(|e| matches!(e, TurnEvent::ClaimApplied(_)))
        .count();
    assert_eq!(claims, 6);
    assert!(matches!(events.last(), Some(TurnEvent::GameOver(o)) if *o == outcome));
}

#[tokio::test]
async fn test_total_area_mode_reported() {
    let mut game = TurnController::with_dimensions(
        2,
        2,
        vec![
            Contestant::new("a", '*', scripted(MoverKind::Automated, &[(0, 0), (1, 1)])),
            Contestant::new("b", 'o', scripted(MoverKind::Automated, &[(0, 1), (1, 0)])),
        ],
        TurnSettings::new(3, ScoringMode::TotalArea),
    )
    .unwrap();
    let outcome = game.run().await.unwrap();
    assert_eq!(outcome.mode(), &ScoringMode::TotalArea);
    assert_eq!(outcome.score(A), 2);
    assert_eq!(*outcome.territories()[&A].largest(), 1);
}

#[tokio::test]
async fn test_prefilled_board_is_over() {
    let mut board = Board::new(1, 2).unwrap();
    board.claim(Coord::new(0, 0), A).unwrap();
    board.claim(Coord::new(0, 1), B).unwrap();
    let game = TurnController::new(
        board,
        vec![
            Contestant::new("a", '*', Box::new(SimpleAi)),
            Contestant::new("b", 'o', Box::new(SimpleAi)),
        ],
        TurnSettings::default(),
    )
    .unwrap();
    assert_eq!(game.phase(), TurnPhase::GameOver);
    assert_eq!(game.outcome().unwrap().score(A), 1);
}

#[tokio::test]
async fn test_malformed_text_counts_as_failed_attempt() {
    let agent = ScriptedMover::from_lines(MoverKind::Automated, ["row 0", "(0, 1)"]);
    let log = agent.feedback_log();
    let mut game = two_player(1, 2, scripted(MoverKind::Interactive, &[(0, 0)]), Box::new(agent));

    game.play_turn().await.unwrap();
    assert_eq!(game.play_turn().await, Ok(TurnPhase::GameOver));

    let log = log.lock().unwrap().clone();
    let feedback = log[1].as_deref().expect("Feedback after malformed reply");
    assert!(feedback.contains("Could not read move"));
}
