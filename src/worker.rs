//! Runs the automated player on its own thread.
//!
//! The thread that owns the [`Session`](crate::session::Session) sends a
//! copy of the game state over a channel and later receives the chosen move
//! back over another one, then submits it to the session itself. The search
//! never touches the session. At most one search is in flight at a time and
//! every search runs to completion.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::error::CheckersError;
use crate::game::GameState;
use crate::moves::Move;
use crate::search::{AutoPlayer, TraceSink};

enum Request {
    Search(GameState),
    SetLevel(i32),
    SetTrace(Option<TraceSink>),
}

type Reply = Result<Option<Move>, CheckersError>;

pub struct SearchWorker {
    requests: Option<Sender<Request>>,
    replies: Receiver<Reply>,
    handle: Option<JoinHandle<()>>,
    in_flight: bool,
}

impl SearchWorker {
    /// Move `player` onto a new worker thread.
    pub fn spawn(player: AutoPlayer) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (reply_tx, reply_rx) = mpsc::channel::<Reply>();

        let handle = thread::spawn(move || {
            let mut player = player;
            for request in request_rx {
                match request {
                    Request::Search(state) => {
                        log::debug!("searching at level {}", player.level());
                        let reply = player.choose_move(&state);
                        if reply_tx.send(reply).is_err() {
                            break;
                        }
                    }
                    Request::SetLevel(level) => player.set_level(level),
                    Request::SetTrace(sink) => player.set_trace(sink),
                }
            }
            log::debug!("search worker stopped");
        });

        Self {
            requests: Some(request_tx),
            replies: reply_rx,
            handle: Some(handle),
            in_flight: false,
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Start searching `state`. Fails if a search is already running.
    pub fn request(&mut self, state: GameState) -> Result<(), CheckersError> {
        if self.in_flight {
            return Err(CheckersError::SearchInFlight);
        }
        self.send(Request::Search(state))?;
        self.in_flight = true;
        Ok(())
    }

    /// Change the lookahead level used by later searches.
    pub fn set_level(&mut self, level: i32) -> Result<(), CheckersError> {
        self.send(Request::SetLevel(level))
    }

    pub fn set_trace(&mut self, sink: Option<TraceSink>) -> Result<(), CheckersError> {
        self.send(Request::SetTrace(sink))
    }

    /// Block until the running search finishes. `Ok(None)` if nothing was
    /// requested or the position had no moves.
    pub fn wait(&mut self) -> Result<Option<Move>, CheckersError> {
        if !self.in_flight {
            return Ok(None);
        }
        self.in_flight = false;
        self.replies.recv().map_err(|_| CheckersError::WorkerGone)?
    }

    /// Non-blocking [`wait`](Self::wait): `None` while the search is still
    /// running or when nothing was requested.
    pub fn poll(&mut self) -> Option<Result<Option<Move>, CheckersError>> {
        if !self.in_flight {
            return None;
        }
        match self.replies.try_recv() {
            Ok(reply) => {
                self.in_flight = false;
                Some(reply)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = false;
                Some(Err(CheckersError::WorkerGone))
            }
        }
    }

    /// Search `state` and wait for the answer.
    pub fn choose_move(&mut self, state: GameState) -> Result<Option<Move>, CheckersError> {
        self.request(state)?;
        self.wait()
    }

    fn send(&self, request: Request) -> Result<(), CheckersError> {
        self.requests
            .as_ref()
            .ok_or(CheckersError::WorkerGone)?
            .send(request)
            .map_err(|_| CheckersError::WorkerGone)
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("search worker panicked");
            }
        }
    }
}
