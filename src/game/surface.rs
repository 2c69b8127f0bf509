use chess::Color;

/// The display side of a game: the board widget plus the text readouts.
///
/// The controller pushes every change through this; the host decides how it
/// reaches the screen.
pub trait BoardSurface {
    /// Redraw the board from a FEN.
    fn set_position(&mut self, fen: &str, turn: Color, game_over: bool);

    /// Return a rejected drag to its origin square.
    fn snapback(&mut self, source: &str, target: &str);

    fn set_piece_theme(&mut self, template: &str);

    fn set_status(&mut self, text: &str);

    fn set_history(&mut self, lines: &[String]);

    fn set_timers(&mut self, white: &str, black: &str);
}

/// Keeps the last value pushed to each readout.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub position: Option<String>,
    pub turn: Option<Color>,
    pub game_over: bool,
    pub snapbacks: Vec<(String, String)>,
    pub piece_theme: Option<String>,
    pub status: Option<String>,
    pub history: Vec<String>,
    pub timers: Option<(String, String)>,
}

impl BoardSurface for RecordingSurface {
    fn set_position(&mut self, fen: &str, turn: Color, game_over: bool) {
        self.position = Some(fen.to_string());
        self.turn = Some(turn);
        self.game_over = game_over;
    }

    fn snapback(&mut self, source: &str, target: &str) {
        self.snapbacks.push((source.to_string(), target.to_string()));
    }

    fn set_piece_theme(&mut self, template: &str) {
        self.piece_theme = Some(template.to_string());
    }

    fn set_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }

    fn set_history(&mut self, lines: &[String]) {
        self.history = lines.to_vec();
    }

    fn set_timers(&mut self, white: &str, black: &str) {
        self.timers = Some((white.to_string(), black.to_string()));
    }
}
