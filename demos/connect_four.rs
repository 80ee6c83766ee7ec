//! Connect Four in the terminal against the search engine
//!
//! Commands: `a` / `d` move the cursor, an empty line (or `s`) drops a
//! piece, a digit 1-7 jumps to and drops into that column, `q` quits.
//!
//! Usage: `cargo run --example connect_four -- [seconds] [uct|amaf|rave]`

use std::io::{self, BufRead, Write};
use std::time::Duration;

use connect4_mcts::{
    compute_move,
    interface::{ColumnCursor, Frontend, InputEvent},
    Board, Error, Outcome, Player, SearchConfig, Variant,
};

const HUMAN: Player = Player::A;

/// Line-based stdin/stdout frontend
struct Terminal {
    lines: io::Lines<io::StdinLock<'static>>,
    pending: Vec<InputEvent>,
}

impl Terminal {
    fn new() -> Self {
        Terminal {
            lines: io::stdin().lock().lines(),
            pending: Vec::new(),
        }
    }
}

impl Frontend for Terminal {
    fn render(&mut self, board: &Board, cursor: &ColumnCursor) {
        println!();
        println!("{}", " ".repeat(2 * cursor.column() + 2) + "v");
        print!("{}", board);
        println!("Player {}'s turn", board.turn());
    }

    fn next_event(&mut self) -> Option<InputEvent> {
        if let Some(event) = self.pending.pop() {
            return Some(event);
        }

        print!("> ");
        let _ = io::stdout().flush();
        let line = match self.lines.next() {
            Some(Ok(line)) => line,
            _ => return None,
        };

        match line.trim() {
            "" | "s" => Some(InputEvent::Confirm),
            "a" => Some(InputEvent::MoveLeft),
            "d" => Some(InputEvent::MoveRight),
            "q" => Some(InputEvent::Quit),
            digit => match digit.parse::<usize>() {
                Ok(column @ 1..=7) => {
                    // Slide all the way left, then right to the column, then drop
                    self.pending.push(InputEvent::Confirm);
                    for _ in 1..column {
                        self.pending.push(InputEvent::MoveRight);
                    }
                    for _ in 0..7 {
                        self.pending.push(InputEvent::MoveLeft);
                    }
                    self.pending.pop()
                }
                _ => {
                    println!("Unknown command {:?}", digit);
                    self.next_event()
                }
            },
        }
    }
}

fn parse_args() -> SearchConfig {
    let mut args = std::env::args().skip(1);
    let mut config = SearchConfig::default();

    if let Some(seconds) = args.next().and_then(|s| s.parse::<f64>().ok()) {
        config = config.with_time_budget(Duration::from_secs_f64(seconds.max(0.0)));
    }
    if let Some(variant) = args.next() {
        config = config.with_variant(match variant.as_str() {
            "uct" => Variant::Uct,
            "amaf" => Variant::Amaf,
            _ => Variant::Rave,
        });
    }
    config
}

fn main() {
    // Initialize logging
    env_logger::init();

    println!("MCTS Connect Four");
    println!("=================");

    let config = parse_args();
    println!("Engine: {:?}, budget {:?}", config.variant, config.budget);

    let first = if rand::random::<bool>() { Player::A } else { Player::B };
    let mut board = Board::new(first);
    let mut cursor = ColumnCursor::new(3);
    let mut terminal = Terminal::new();
    let mut rng = rand::thread_rng();

    while !board.is_terminal() {
        terminal.render(&board, &cursor);

        if board.turn() == HUMAN {
            let event = match terminal.next_event() {
                Some(event) => event,
                None => return,
            };
            if event == InputEvent::Quit {
                return;
            }
            if let Some(column) = cursor.handle(event) {
                match board.apply_move(column) {
                    Ok(_) => {}
                    Err(Error::ColumnFull(_)) => println!("Column {} is full!", column + 1),
                    Err(e) => println!("Error: {}", e),
                }
            }
        } else {
            println!("Engine is thinking...");
            match compute_move(&board, &config, &mut rng) {
                Ok(action) => {
                    println!("Engine plays column {}", action.column + 1);
                    if let Err(e) = board.apply_move(action.column) {
                        println!("Error: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
        }
    }

    print!("{}", board);
    match board.check_outcome() {
        Outcome::Win(player) if player == HUMAN => println!("You win!"),
        Outcome::Win(_) => println!("Engine wins!"),
        Outcome::Tie => println!("The game is a draw!"),
        Outcome::InProgress => {}
    }
}
