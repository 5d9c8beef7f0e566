//! Master/slave radio link
//!
//! The master owns physics and broadcasts the board every poll; the slave
//! sends back its paddle position and mirrors what the master shows.

use crate::env::Environment;
use crate::fsm::Screen;
use crate::radio::Radio;
use game_core::{Board, Score, Side};
use glam::Vec2;
use proto::{hex_dump, MasterFrame, ScreenCode, SlaveFrame, MASTER_FRAME_LEN, SLAVE_FRAME_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Master,
    Slave,
}

impl Role {
    /// Frame size this role transmits
    pub fn transfer_size(self) -> usize {
        match self {
            Role::Master => MASTER_FRAME_LEN,
            Role::Slave => SLAVE_FRAME_LEN,
        }
    }

    /// Paddle driven by this board's buttons when playing wirelessly
    pub fn local_side(self) -> Side {
        match self {
            Role::Master => Side::Top,
            Role::Slave => Side::Bottom,
        }
    }
}

fn to_wire_u8(v: i32) -> u8 {
    v.clamp(0, u8::MAX as i32) as u8
}

fn to_wire_u16(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}

/// Snapshot of the board as the master sends it
pub fn encode_board(board: &Board, screen: Screen) -> MasterFrame {
    let balls: Vec<(u16, u16)> = board
        .balls()
        .iter()
        .map(|ball| {
            let p = ball.screen_pos();
            (to_wire_u16(p.x), to_wire_u16(p.y))
        })
        .collect();
    let paddle_x = |side| board.paddle(side).map(|p| to_wire_u8(p.pos.x)).unwrap_or(0);
    let score = board.score();

    MasterFrame::new(
        &balls,
        paddle_x(Side::Top),
        paddle_x(Side::Bottom),
        score.top,
        score.bottom,
        screen.code(),
    )
}

/// Mirror a Game frame onto the slave's board. Balls, scores and every
/// paddle except `keep` are replaced; score changes during the replay step
/// are discarded.
pub fn apply_master_frame(board: &mut Board, frame: &MasterFrame, keep: Option<Side>) {
    let positions: Vec<Vec2> = frame
        .balls()
        .iter()
        .map(|slot| Vec2::new(slot.x() as f32, slot.y() as f32))
        .collect();
    board.replace_balls(&positions);
    for (side, x) in [
        (Side::Top, frame.paddle_top_x),
        (Side::Bottom, frame.paddle_bottom_x),
    ] {
        if keep != Some(side) {
            board.set_paddle_x(side, x as i32);
        }
    }
    board.set_score(Score {
        top: frame.score_top(),
        bottom: frame.score_bottom(),
    });

    if board.config().replay_step_on_mirror {
        board.step_physics();
        // Scoring during the replay is the master's call
        board.set_score(Score {
            top: frame.score_top(),
            bottom: frame.score_bottom(),
        });
    }
}

/// One end of the radio link
pub struct Link {
    role: Role,
    radio: Box<dyn Radio>,
    up: bool,
    frames_sent: u32,
    frame_log_interval: u32,
}

impl Link {
    pub fn new(role: Role, radio: Box<dyn Radio>, frame_log_interval: u32) -> Self {
        Self {
            role,
            radio,
            up: false,
            frames_sent: 0,
            frame_log_interval,
        }
    }

    pub fn is_up(&self) -> bool {
        self.up
    }

    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Power up, size and enable the radio, then report its settings.
    /// Does nothing once the link is up.
    pub fn bring_up(&mut self, env: &dyn Environment) {
        if self.up {
            return;
        }
        self.radio.power_up();
        self.radio.set_transfer_size(self.role.transfer_size());
        self.radio.enable();
        self.up = true;

        let info = self.radio.info();
        env.log(format!(
            "Radio up as {:?}: transfer size {} bytes",
            self.role,
            self.role.transfer_size()
        ));
        env.log(format!(
            "Radio: {} MHz, {} dBm, {} kbps",
            info.frequency_mhz, info.power_dbm, info.data_rate_kbps
        ));
        env.log(format!(
            "Radio: TX addr 0x{:010X}, RX addr 0x{:010X}",
            info.tx_address, info.rx_address
        ));
    }

    fn read_frame(&mut self, buf: &mut [u8], env: &dyn Environment) -> Option<usize> {
        if !self.up || !self.radio.readable() {
            return None;
        }
        match self.radio.read(buf) {
            Ok(n) if n > 0 => Some(n),
            Ok(_) => None,
            Err(e) => {
                env.log(format!("Radio read failed: {e}"));
                None
            }
        }
    }

    fn send(&mut self, bytes: &[u8], env: &dyn Environment) -> bool {
        match self.radio.write(bytes) {
            Ok(_) => true,
            Err(e) => {
                env.log(format!("Radio write failed: {e}"));
                false
            }
        }
    }

    /// Master: broadcast the board. Failures are logged and dropped.
    pub fn transmit_board_state(&mut self, board: &Board, screen: Screen, env: &dyn Environment) {
        if !self.up {
            return;
        }
        let bytes = match encode_board(board, screen).to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                env.log(format!("Frame encode failed: {e}"));
                return;
            }
        };
        if !self.send(&bytes, env) {
            return;
        }

        self.frames_sent = self.frames_sent.wrapping_add(1);
        if self.frame_log_interval > 0 && self.frames_sent % self.frame_log_interval == 0 {
            env.log(format!("TX #{}: {}", self.frames_sent, hex_dump(&bytes)));
        }
    }

    /// Master: apply the slave's paddle position, if a frame is waiting.
    /// Returns true when one was applied.
    pub fn process_incoming_slave_message(
        &mut self,
        board: &mut Board,
        env: &dyn Environment,
    ) -> bool {
        let mut buf = [0u8; MASTER_FRAME_LEN];
        let Some(n) = self.read_frame(&mut buf, env) else {
            return false;
        };
        match SlaveFrame::from_bytes(&buf[..n]) {
            Ok(frame) => {
                board.move_paddle_to(Side::Bottom, frame.paddle_x as i32);
                true
            }
            Err(e) => {
                env.log(format!("Bad slave frame ({n} bytes): {e}"));
                false
            }
        }
    }

    /// Slave: read the master's frame, mirror it when the master is in
    /// Game, and return the screen the master is showing
    pub fn process_incoming_master_message(
        &mut self,
        board: &mut Board,
        env: &dyn Environment,
    ) -> Option<Screen> {
        let mut buf = [0u8; MASTER_FRAME_LEN];
        let n = self.read_frame(&mut buf, env)?;
        let frame = match MasterFrame::from_bytes(&buf[..n]) {
            Ok(frame) => frame,
            Err(e) => {
                env.log(format!("Bad master frame ({n} bytes): {e}"));
                return None;
            }
        };

        if frame.screen() == ScreenCode::Game {
            let keep = board
                .config()
                .keep_local_paddle_on_mirror
                .then(|| self.role.local_side());
            apply_master_frame(board, &frame, keep);
        }
        Some(Screen::from_code(frame.screen()))
    }

    /// Slave: send the local paddle position
    pub fn transmit_outbound_slave_message(&mut self, board: &Board, env: &dyn Environment) {
        if !self.up {
            return;
        }
        let x = board
            .paddle(Side::Bottom)
            .map(|p| to_wire_u8(p.pos.x))
            .unwrap_or(0);
        match SlaveFrame::new(x).to_bytes() {
            Ok(bytes) => {
                self.send(&bytes, env);
            }
            Err(e) => env.log(format!("Frame encode failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::LoopbackRadio;
    use game_core::{Arena, Ball, Config, GameRng};

    #[test]
    fn test_encode_board_snapshot() {
        let mut board = Board::with_bounds(0, 20, 240, 320);
        board.set_score(Score { top: 3, bottom: 258 });
        let frame = encode_board(&board, Screen::Game);

        assert_eq!(frame.ball_count, 1);
        assert_eq!(frame.balls()[0].x(), 120);
        assert_eq!(frame.balls()[0].y(), 170);
        assert_eq!(frame.paddle_top_x, 102);
        assert_eq!(frame.paddle_bottom_x, 102);
        assert_eq!(frame.score_top(), 3);
        assert_eq!(frame.score_bottom(), 258);
        assert_eq!(frame.screen(), ScreenCode::Game);
    }

    #[test]
    fn test_apply_master_frame_mirrors_board() {
        let mut board = Board::with_bounds(0, 20, 240, 320);
        let frame = MasterFrame::new(
            &[(50, 100), (200, 250)],
            10,
            150,
            4,
            5,
            ScreenCode::Game,
        );

        apply_master_frame(&mut board, &frame, None);

        assert_eq!(board.ball_count(), 2);
        assert_eq!(board.paddle(Side::Top).map(|p| p.pos.x), Some(10));
        assert_eq!(board.paddle(Side::Bottom).map(|p| p.pos.x), Some(150));
        assert_eq!(board.score(), Score { top: 4, bottom: 5 });
        // Replayed one step from the received positions
        let first = board.balls()[0];
        assert!((first.pos - Vec2::new(50.0, 100.0)).length() <= 6.0);
    }

    struct QuietEnv;

    impl Environment for QuietEnv {
        fn now_ms(&self) -> u64 {
            0
        }
        fn log(&self, _msg: String) {}
    }

    fn board_without_replay(arena: Arena, keep_local_paddle: bool) -> Board {
        let mut config = Config::new();
        config.replay_step_on_mirror = false;
        config.keep_local_paddle_on_mirror = keep_local_paddle;
        Board::new(arena, config, GameRng::new(1))
    }

    /// Slave link plus the master's end of the radio, both enabled
    fn slave_link() -> (Link, LoopbackRadio) {
        let (mut master_end, slave_end) = LoopbackRadio::pair();
        master_end.power_up();
        master_end.set_transfer_size(MASTER_FRAME_LEN);
        master_end.enable();
        let mut link = Link::new(Role::Slave, Box::new(slave_end), 0);
        link.bring_up(&QuietEnv);
        (link, master_end)
    }

    #[test]
    fn test_apply_without_replay_keeps_exact_positions() {
        let mut board = board_without_replay(Arena::default(), false);
        let frame = MasterFrame::new(&[(50, 100)], 10, 150, 0, 0, ScreenCode::Game);

        apply_master_frame(&mut board, &frame, Some(Side::Bottom));

        assert_eq!(board.paddle(Side::Top).map(|p| p.pos.x), Some(10));
        assert_eq!(
            board.paddle(Side::Bottom).map(|p| p.pos.x),
            Some(102),
            "Bottom paddle left as it was"
        );
        let balls: Vec<Ball> = board.balls();
        assert_eq!(balls[0].pos, Vec2::new(50.0, 100.0));
    }

    #[test]
    fn test_slave_takes_both_paddles_from_game_frame() {
        let (mut link, mut master_end) = slave_link();
        let mut board = board_without_replay(Arena::default(), false);
        let frame = MasterFrame::new(&[(50, 100)], 10, 150, 1, 2, ScreenCode::Game);
        master_end
            .write(&frame.to_bytes().expect("Serialization should succeed"))
            .expect("Write should succeed");

        let screen = link.process_incoming_master_message(&mut board, &QuietEnv);

        assert_eq!(screen, Some(Screen::Game));
        assert_eq!(board.paddle(Side::Top).map(|p| p.pos.x), Some(10));
        assert_eq!(board.paddle(Side::Bottom).map(|p| p.pos.x), Some(150));
        assert_eq!(board.score(), Score { top: 1, bottom: 2 });
    }

    #[test]
    fn test_slave_can_keep_its_own_paddle() {
        let (mut link, mut master_end) = slave_link();
        let mut board = board_without_replay(Arena::default(), true);
        let frame = MasterFrame::new(&[(50, 100)], 10, 150, 0, 0, ScreenCode::Game);
        master_end
            .write(&frame.to_bytes().expect("Serialization should succeed"))
            .expect("Write should succeed");

        link.process_incoming_master_message(&mut board, &QuietEnv);

        assert_eq!(board.paddle(Side::Top).map(|p| p.pos.x), Some(10));
        assert_eq!(board.paddle(Side::Bottom).map(|p| p.pos.x), Some(102));
    }

    #[test]
    fn test_wide_board_round_trip_keeps_low_byte_of_x() {
        let arena = Arena::new(0, 20, 400, 320);
        let mut master = board_without_replay(arena, false);
        master.replace_balls(&[Vec2::new(300.0, 290.0)]);
        let bytes = encode_board(&master, Screen::Game)
            .to_bytes()
            .expect("Serialization should succeed");

        let frame = MasterFrame::from_bytes(&bytes).expect("Deserialization should succeed");
        let mut slave = board_without_replay(arena, false);
        apply_master_frame(&mut slave, &frame, None);

        let balls = slave.balls();
        assert_eq!(balls.len(), 1);
        assert_eq!(balls[0].pos, Vec2::new(44.0, 290.0));
    }

    #[test]
    fn test_replay_step_discards_score_changes() {
        let mut board = Board::with_bounds(0, 20, 240, 320);
        // Crosses the top edge on the replayed step whichever way it moves
        let frame = MasterFrame::new(&[(120, 21)], 0, 0, 3, 4, ScreenCode::Game);

        apply_master_frame(&mut board, &frame, None);

        assert_eq!(board.score(), Score { top: 3, bottom: 4 });
    }

    #[test]
    fn test_roles() {
        assert_eq!(Role::Master.transfer_size(), 32);
        assert_eq!(Role::Slave.transfer_size(), 1);
        assert_eq!(Role::Slave.local_side(), Side::Bottom);
    }

    #[test]
    fn test_wire_clamping() {
        assert_eq!(to_wire_u8(-3), 0);
        assert_eq!(to_wire_u8(300), 255);
        assert_eq!(to_wire_u16(-1), 0);
    }
}
