use actix::prelude::*;
use chess::Color;
use log::{info, warn};

use crate::game::{DropOutcome, RulesEngine};
use crate::models::{
    DropPiece, EndSession, GetMoves, GetSnapshot, ServerMessage, SessionSnapshot, SetMode,
    SetTheme, UndoMove,
};
use crate::websocket::session::{GameSession, Outbox};

impl Handler<DropPiece> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: DropPiece, ctx: &mut Self::Context) {
        info!("Session {}: drop {} -> {}", self.id, msg.source, msg.target);
        let mut outbox = Outbox::default();
        let outcome = self.controller.apply_drop(&msg.source, &msg.target, &mut outbox);
        if let DropOutcome::Accepted { opponent_due: true } = outcome {
            self.schedule_opponent(ctx);
        }
        self.send(outbox);
    }
}

impl Handler<GetMoves> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: GetMoves, _: &mut Self::Context) {
        let reply = match self.controller.legal_targets(&msg.source) {
            Ok(targets) => ServerMessage {
                source: Some(msg.source),
                available_moves: Some(targets),
                ..ServerMessage::new("available_moves")
            },
            Err(e) => {
                warn!("Session {}: {}", self.id, e);
                ServerMessage::error(e.to_string())
            }
        };
        self.send(Outbox(vec![reply]));
    }
}

impl Handler<UndoMove> for GameSession {
    type Result = ();

    fn handle(&mut self, _: UndoMove, ctx: &mut Self::Context) {
        info!("Session {}: undo", self.id);
        self.cancel_opponent(ctx);
        let mut outbox = Outbox::default();
        self.controller.undo_last_move(&mut outbox);
        self.send(outbox);
    }
}

impl Handler<SetMode> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: SetMode, ctx: &mut Self::Context) {
        match self.controller.set_mode(&msg.0) {
            Ok(_) => {
                self.cancel_opponent(ctx);
                if self.controller.opponent_move_due() {
                    self.schedule_opponent(ctx);
                }
            }
            Err(e) => {
                warn!("Session {}: {}", self.id, e);
                self.send(Outbox(vec![ServerMessage::error(e.to_string())]));
            }
        }
    }
}

impl Handler<SetTheme> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: SetTheme, _: &mut Self::Context) {
        let mut outbox = Outbox::default();
        self.controller.set_theme(&msg.0, &mut outbox);
        self.send(outbox);
    }
}

impl Handler<EndSession> for GameSession {
    type Result = ();

    fn handle(&mut self, _: EndSession, ctx: &mut Self::Context) {
        self.cancel_opponent(ctx);
        ctx.stop();
    }
}

impl Handler<GetSnapshot> for GameSession {
    type Result = SessionSnapshot;

    fn handle(&mut self, _: GetSnapshot, _: &mut Self::Context) -> Self::Result {
        let clock = self.controller.clock();
        SessionSnapshot {
            session_id: self.id.clone(),
            fen: self.controller.engine().fen(),
            history: self.controller.engine().history().to_vec(),
            status: self.controller.compute_status(),
            mode: self.controller.mode(),
            white_seconds: clock.remaining(Color::White),
            black_seconds: clock.remaining(Color::Black),
            clock_running: !clock.is_stopped(),
            opponent_pending: self.pending_opponent.is_some(),
        }
    }
}
