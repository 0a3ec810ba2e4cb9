//! Tests for agent prompt construction and LLM connectivity.

use strictly_territory::{
    AgentMover, Board, Contestant, Coord, LlmClient, LlmConfig, LlmProvider, PlayerId, Prompt,
    SimpleAi, TurnController, TurnSettings,
};

fn board_and_game() -> (Board, TurnController) {
    let mut board = Board::new(2, 3).unwrap();
    board.claim(Coord::new(0, 0), PlayerId::new(0)).unwrap();
    board.claim(Coord::new(1, 2), PlayerId::new(1)).unwrap();
    let game = TurnController::new(
        board.clone(),
        vec![
            Contestant::new("human", '*', Box::new(SimpleAi)),
            Contestant::new("agent", 'o', Box::new(SimpleAi)),
        ],
        TurnSettings::default(),
    )
    .unwrap();
    (board, game)
}

#[test]
fn test_prompt_describes_markers_and_board() {
    let (board, game) = board_and_game();
    let view = strictly_territory::BoardView::new(&board, game.roster(), PlayerId::new(1));
    let prompt = AgentMover::build_prompt(&view, None);

    assert!(prompt.system().contains("2x3 grid"));
    assert!(prompt.system().contains("Cells you own contain `o`"));
    assert!(prompt.system().contains("opponents contain `*`"));
    assert!(prompt.system().contains("diagonal cells are not connected"));

    assert!(prompt.user().contains("+-+-+-+\n|*| | |\n| | |o|\n+-+-+-+"));
    assert!(prompt.user().contains("(0,1) (0,2) (1,0) (1,1)"));
    assert!(!prompt.user().contains("previous attempts failed"));
}

#[test]
fn test_prompt_includes_feedback() {
    let (board, game) = board_and_game();
    let view = strictly_territory::BoardView::new(&board, game.roster(), PlayerId::new(1));
    let prompt = AgentMover::build_prompt(&view, Some("\nCell (0,0) is already owned by player human."));
    assert!(prompt
        .user()
        .contains("Your previous attempts failed:\nCell (0,0) is already owned by player human."));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
    let client = LlmClient::new(LlmConfig::new(
        LlmProvider::OpenAI,
        api_key,
        "gpt-4o-mini".to_string(),
        20,
    ));

    let response = client
        .complete(&Prompt::new(
            "You are a helpful assistant.",
            "Reply with exactly `1,2` and nothing else.",
        ))
        .await
        .expect("Failed to generate");

    assert_eq!(response.parse::<Coord>(), Ok(Coord::new(1, 2)));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_anthropic_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY not set");
    let client = LlmClient::new(LlmConfig::new(
        LlmProvider::Anthropic,
        api_key,
        "claude-3-5-haiku-20241022".to_string(),
        20,
    ));

    let response = client
        .complete(&Prompt::new(
            "You are a helpful assistant.",
            "Say 'Hello, world!' and nothing else.",
        ))
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
}
