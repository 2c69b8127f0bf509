use actix::prelude::*;
use chess::Color;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::config::AppConfig;
use crate::game::utils::color_to_string;
use crate::game::{BoardSurface, ChessEngine, GameController, Tick};
use crate::models::{ChessWebSocketMessage, ServerMessage};

const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Server messages collected while the controller handles one event
#[derive(Debug, Default)]
pub struct Outbox(pub Vec<ServerMessage>);

impl BoardSurface for Outbox {
    fn set_position(&mut self, fen: &str, turn: Color, game_over: bool) {
        self.0.push(ServerMessage {
            fen: Some(fen.to_string()),
            turn: Some(color_to_string(turn)),
            game_over: Some(game_over),
            ..ServerMessage::new("position")
        });
    }

    fn snapback(&mut self, source: &str, target: &str) {
        self.0.push(ServerMessage {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            ..ServerMessage::new("snapback")
        });
    }

    fn set_piece_theme(&mut self, template: &str) {
        self.0.push(ServerMessage {
            piece_theme: Some(template.to_string()),
            ..ServerMessage::new("theme")
        });
    }

    fn set_status(&mut self, text: &str) {
        self.0.push(ServerMessage {
            status: Some(text.to_string()),
            ..ServerMessage::new("status")
        });
    }

    fn set_history(&mut self, lines: &[String]) {
        self.0.push(ServerMessage {
            history: Some(lines.to_vec()),
            ..ServerMessage::new("history")
        });
    }

    fn set_timers(&mut self, white: &str, black: &str) {
        self.0.push(ServerMessage {
            white_time: Some(white.to_string()),
            black_time: Some(black.to_string()),
            ..ServerMessage::new("clock")
        });
    }
}

/// One board: a controller, its clock timer and at most one pending opponent move.
///
/// Everything runs inside this actor's context, so the clock and the opponent
/// callback never touch the game at the same time.
pub struct GameSession {
    pub(crate) id: String,
    pub(crate) controller: GameController,
    client: Recipient<ChessWebSocketMessage>,
    opponent_delay: Duration,
    clock_handle: Option<SpawnHandle>,
    pub(crate) pending_opponent: Option<SpawnHandle>,
}

impl GameSession {
    pub fn new(id: String, config: &AppConfig, client: Recipient<ChessWebSocketMessage>) -> Self {
        let controller =
            GameController::new(ChessEngine::new(), config.start_seconds, StdRng::from_os_rng());
        GameSession::with_controller(id, controller, config.opponent_delay, client)
    }

    pub fn with_controller(
        id: String,
        controller: GameController,
        opponent_delay: Duration,
        client: Recipient<ChessWebSocketMessage>,
    ) -> Self {
        GameSession {
            id,
            controller,
            client,
            opponent_delay,
            clock_handle: None,
            pending_opponent: None,
        }
    }

    pub(crate) fn send(&self, outbox: Outbox) {
        for message in outbox.0 {
            match serde_json::to_string(&message) {
                Ok(text) => self.client.do_send(ChessWebSocketMessage(text)),
                Err(e) => warn!("Error serializing message: {}", e),
            }
        }
    }

    fn on_tick(&mut self, ctx: &mut Context<Self>) {
        let mut outbox = Outbox::default();
        match self.controller.tick(&mut outbox) {
            Tick::Running => {}
            Tick::Flagged(color) => {
                info!("Session {}: {:?} flagged", self.id, color);
                self.stop_clock(ctx);
                self.cancel_opponent(ctx);
            }
            Tick::Stopped => {
                debug!("Session {}: game over, clock stopped", self.id);
                self.stop_clock(ctx);
            }
        }
        self.send(outbox);
    }

    fn stop_clock(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.clock_handle.take() {
            ctx.cancel_future(handle);
        }
    }

    /// Queue the opponent's reply. Replaces any reply already queued.
    pub(crate) fn schedule_opponent(&mut self, ctx: &mut Context<Self>) {
        self.cancel_opponent(ctx);
        let handle = ctx.run_later(self.opponent_delay, |act, _ctx| {
            act.pending_opponent = None;
            let mut outbox = Outbox::default();
            if act.controller.make_opponent_move(&mut outbox).is_none() {
                debug!("Session {}: opponent had nothing to play", act.id);
            }
            act.send(outbox);
        });
        self.pending_opponent = Some(handle);
    }

    pub(crate) fn cancel_opponent(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.pending_opponent.take() {
            debug!("Session {}: cancelling pending opponent move", self.id);
            ctx.cancel_future(handle);
        }
    }
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("Game session started: {}", self.id);

        let mut outbox = Outbox::default();
        self.controller.render(&mut outbox);
        self.send(outbox);

        self.clock_handle = Some(ctx.run_interval(CLOCK_INTERVAL, |act, ctx| act.on_tick(ctx)));
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        info!("Game session stopped: {}", self.id);
    }
}
