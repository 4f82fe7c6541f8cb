//! Text console for playing against the engine.
//!
//! The protocol follows the shape of GTP: one command per line, an optional
//! numeric id in front, and a response of `=id text` on success or
//! `?id text` on failure, terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `restart` - Start a new game
//! - `clear` - Empty the board
//! - `showboard` - Print the board and the side to move
//! - `level [n]` - Show or set the lookahead level (clamped to 0..=10)
//! - `moves [square]` - List legal moves, optionally only those from a square
//! - `play <path>` - Play a move such as `b3-c4` or `b3xd5xf7`
//! - `genmove` - Let the engine move for the side to move
//! - `engine <south|north|none>` - Choose the side the engine plays
//!
//! Whenever the session reports that it is the engine's side to move, the
//! console asks the search worker for a move and plays it.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::board::Player;
use crate::error::CheckersError;
use crate::moves::Move;
use crate::search::{AutoPlayer, clamp_level};
use crate::session::{OriginatesAt, Session};
use crate::square::Square;
use crate::worker::SearchWorker;

const KNOWN_COMMANDS: &[&str] = &[
    "clear",
    "engine",
    "genmove",
    "known_command",
    "level",
    "list_commands",
    "moves",
    "name",
    "play",
    "protocol_version",
    "quit",
    "restart",
    "showboard",
    "version",
];

pub struct Console {
    session: Session,
    worker: SearchWorker,
    /// Side played by the engine, if any.
    engine_side: Option<Player>,
    level: u8,
    /// Active player after each session change, fed by a subscriber.
    turns: Receiver<Option<Player>>,
    turns_tx: Sender<Option<Player>>,
}

impl Console {
    pub fn new(mut session: Session, player: AutoPlayer, engine_side: Option<Player>) -> Self {
        let (turns_tx, turns) = mpsc::channel();
        let tx = turns_tx.clone();
        session.subscribe(move |state| {
            // The console may already be gone during teardown.
            let _ = tx.send(state.active_player());
        });
        let level = player.level();
        Self {
            session,
            worker: SearchWorker::spawn(player),
            engine_side,
            level,
            turns,
            turns_tx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        // The engine may be first to move.
        self.wake_engine();
        if let Err(err) = self.play_engine_turns() {
            log::error!("engine failed to move: {err}");
        }

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = match self.execute(&command, args) {
                Ok(message) => (true, message),
                Err(err) => (false, err),
            };
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Run one command. The error string is sent back after `?`.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),
            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),
            "protocol_version" => Ok("1".to_string()),
            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),
            "known_command" => {
                let name = args.first().ok_or("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                Ok(known.to_string())
            }
            "quit" => Ok(String::new()),

            "restart" => {
                self.session.restart();
                self.after_change()
            }

            "clear" => {
                self.session.clear();
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.session.game_state()).trim_end().to_string()),

            "level" => {
                if let Some(arg) = args.first() {
                    let requested: i32 = arg.parse().map_err(|_| format!("invalid level '{arg}'"))?;
                    self.worker.set_level(requested).map_err(|e| e.to_string())?;
                    self.level = clamp_level(requested);
                }
                Ok(self.level.to_string())
            }

            "moves" => {
                let mut moves: Vec<String> = match args.first() {
                    Some(arg) => {
                        let sq: Square = arg.parse().map_err(|e: CheckersError| e.to_string())?;
                        self.session.iter_moves(OriginatesAt(sq)).map(Move::to_string).collect()
                    }
                    None => self.session.legal_moves().iter().map(Move::to_string).collect(),
                };
                moves.sort();
                Ok(moves.join("\n"))
            }

            "play" => {
                let path = args.first().ok_or("missing argument")?;
                let vertices = Move::parse_path(path).map_err(|e| e.to_string())?;
                let mv = self
                    .session
                    .find_move(&vertices)
                    .cloned()
                    .ok_or_else(|| format!("illegal move {path}"))?;
                self.session.execute_move(&mv).map_err(|e| e.to_string())?;
                self.after_change()
            }

            "genmove" => {
                if self.session.active_player().is_none() {
                    return Err("game is over".to_string());
                }
                let mv = self.engine_move().map_err(|e| e.to_string())?;
                let mut replies = vec![mv.to_string()];
                let more = self.after_change()?;
                if !more.is_empty() {
                    replies.push(more);
                }
                Ok(replies.join("\n"))
            }

            "engine" => {
                let side = args.first().ok_or("missing argument")?;
                self.engine_side = match side.to_lowercase().as_str() {
                    "none" | "off" => None,
                    other => Some(other.parse::<Player>().map_err(|e| e.to_string())?),
                };
                self.wake_engine();
                self.after_change()
            }

            _ => Err(format!("unknown command: {command}")),
        }
    }

    /// Ask the worker for a move for the side to move and play it.
    ///
    /// Subscribers have already been told about the position before the
    /// search starts; the search itself runs on the worker thread. The
    /// console then waits for the reply because each protocol response
    /// carries the engine's answer, and stdin is not read in the meantime.
    fn engine_move(&mut self) -> Result<Move, CheckersError> {
        let state = self.session.game_state();
        self.worker.request(state)?;
        log::debug!("engine thinking for {:?}", state.active_player());
        let mv = self.worker.wait()?.ok_or(CheckersError::NoLegalMoves)?;
        self.session.execute_move(&mv)?;
        Ok(mv)
    }

    /// Queue a turn check as if the session had just changed.
    fn wake_engine(&mut self) {
        let _ = self.turns_tx.send(self.session.active_player());
    }

    /// Let the engine answer pending turns. Returns the engine's moves as
    /// the response text.
    fn after_change(&mut self) -> Result<String, String> {
        self.play_engine_turns()
            .map(|moves| {
                moves
                    .iter()
                    .map(Move::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .map_err(|e| e.to_string())
    }

    fn play_engine_turns(&mut self) -> Result<Vec<Move>, CheckersError> {
        let mut played = Vec::new();
        while let Ok(active) = self.turns.try_recv() {
            // Skip stale notifications: only act on the current turn.
            if active.is_none()
                || active != self.engine_side
                || self.session.active_player() != active
            {
                continue;
            }
            played.push(self.engine_move()?);
        }
        Ok(played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn console(engine_side: Option<Player>) -> Console {
        Console::new(Session::with_seed(1), AutoPlayer::with_seed(0, 1), engine_side)
    }

    fn run(console: &mut Console, script: &str) -> String {
        let mut out = Vec::new();
        console.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(Console::parse_id("12 name"), (Some(12), "name"));
        assert_eq!(Console::parse_id("name"), (None, "name"));
    }

    #[test]
    fn test_basic_commands() {
        let mut c = console(None);
        let out = run(&mut c, "1 name\nknown_command play\nknown_command fly\nbogus\n");
        assert!(out.starts_with("=1 checkers-rust\n\n"));
        assert!(out.contains("= true\n\n"));
        assert!(out.contains("= false\n\n"));
        assert!(out.contains("? unknown command: bogus\n\n"));
    }

    #[test]
    fn test_moves_from_square() {
        let mut c = console(None);
        let out = run(&mut c, "moves b3\n");
        assert_eq!(out, "= move b3-a4\nmove b3-c4\n\n");
    }

    #[test]
    fn test_play_rejects_illegal_move() {
        let mut c = console(None);
        let out = run(&mut c, "play b3-b5\nplay b3-a4\n");
        assert!(out.starts_with("? "));
        assert_eq!(c.session().active_player(), Some(Player::North));
    }

    #[test]
    fn test_engine_replies_after_human_move() {
        let mut c = console(Some(Player::North));
        let out = run(&mut c, "play b3-a4\n");
        assert!(out.starts_with("= move "), "got {out:?}");
        assert_eq!(c.session().active_player(), Some(Player::South));
    }

    #[test]
    fn test_subscribers_hear_each_move_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = Session::with_seed(4);
        let sink = Arc::clone(&seen);
        session.subscribe(move |state| sink.lock().unwrap().push(state.active_player()));

        let mut c = Console::new(session, AutoPlayer::with_seed(1, 4), Some(Player::North));
        run(&mut c, "play b3-a4\n");

        // The human's move is announced before the engine answers it.
        assert_eq!(*seen.lock().unwrap(), vec![Some(Player::North), Some(Player::South)]);
        assert!(!c.worker.is_busy());
    }

    #[test]
    fn test_engine_moves_first_when_playing_south() {
        let mut c = console(Some(Player::South));
        run(&mut c, "");
        assert_eq!(c.session().active_player(), Some(Player::North));
    }

    #[test]
    fn test_level_is_clamped() {
        let mut c = console(None);
        let out = run(&mut c, "level 99\nlevel\n");
        assert_eq!(out, "= 10\n\n= 10\n\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut c = console(None);
        let out = run(&mut c, "quit\nname\n");
        assert_eq!(out, "= \n\n");
    }
}
