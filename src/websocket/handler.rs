use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::models::{
    AppState, ChessWebSocketMessage, ClientMessage, DropPiece, EndSession, GetMoves,
    ServerMessage, SetMode, SetTheme, UndoMove,
};
use crate::websocket::session::GameSession;

/// WebSocket connection for one browser board
pub struct ChessWebSocket {
    pub id: String,
    pub app_state: web::Data<AppState>,
    pub session: Option<Addr<GameSession>>,
}

impl Actor for ChessWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        // Each socket gets its own game, running on the same arbiter
        let session = GameSession::new(
            self.id.clone(),
            &self.app_state.config,
            ctx.address().recipient(),
        )
        .start();
        self.session = Some(session);

        let total_sessions = self.app_state.session_opened();
        info!("WebSocket connection started: {}", self.id);
        info!("Total active sessions: {}", total_sessions);
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let Some(session) = self.session.take() {
            session.do_send(EndSession);
        }

        let total_sessions = self.app_state.session_closed();
        info!("WebSocket connection closed: {}", self.id);
        info!("Total active sessions: {}", total_sessions);

        Running::Stop
    }
}

impl Handler<ChessWebSocketMessage> for ChessWebSocket {
    type Result = ();

    fn handle(&mut self, msg: ChessWebSocketMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChessWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                info!("Received text message: {}", text);
                match serde_json::from_str::<ClientMessage>(text.as_ref()) {
                    Ok(client_msg) => self.handle_message(client_msg, ctx),
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        self.reply_error(format!("Invalid message format: {}", e), ctx);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                self.reply_error("Binary messages are not supported", ctx);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}

impl ChessWebSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        ChessWebSocket {
            id: Uuid::new_v4().to_string(),
            app_state,
            session: None,
        }
    }

    pub fn handle_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let session = match &self.session {
            Some(session) => session.clone(),
            None => {
                self.reply_error("No game session", ctx);
                return;
            }
        };

        match msg.message_type.as_str() {
            "drop" => match (msg.source, msg.target) {
                (Some(source), Some(target)) => session.do_send(DropPiece { source, target }),
                _ => self.reply_error("Drop requires source and target squares", ctx),
            },
            "get_moves" => match msg.source {
                Some(source) => session.do_send(GetMoves { source }),
                None => self.reply_error("Get moves requires a source square", ctx),
            },
            "undo" => session.do_send(UndoMove),
            "set_mode" => match msg.mode {
                Some(mode) => session.do_send(SetMode(mode)),
                None => self.reply_error("Set mode requires a mode", ctx),
            },
            "set_theme" => session.do_send(SetTheme(msg.theme.unwrap_or_default())),
            other => {
                warn!("Unknown message type: {}", other);
                self.reply_error(format!("Unknown message type: {}", other), ctx);
            }
        }
    }

    fn reply_error(&self, text: impl Into<String>, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(&ServerMessage::error(text)) {
            Ok(body) => ctx.text(body),
            Err(e) => warn!("Error serializing message: {}", e),
        }
    }
}

/// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let ws = ChessWebSocket::new(app_state.clone());
    info!("New WebSocket connection: {}", ws.id);
    ws::start(ws, &req, stream)
}
