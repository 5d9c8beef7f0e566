//! One game console: board, screens, buttons, ticker, radio and LCD wired
//! together behind a single cooperative `poll`.

use crate::env::Environment;
use crate::fsm::{Action, Screen, ScreenFsm};
use crate::input::{command_for, Button, ButtonQueue, Command};
use crate::link::{Link, Role};
use crate::radio::Radio;
use crate::renderer::{BoardRenderer, Display};
use crate::ticker::Ticker;
use game_core::{Board, Params, Side};

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub role: Role,
    /// Minimum time between two polls
    pub loop_period_ms: u64,
    pub tick_period_ms: u64,
    /// Ticks run per poll after a stall; the rest are skipped
    pub max_catch_up_ticks: u32,
    /// Hex-dump every Nth transmitted master frame (0 = never)
    pub frame_log_interval: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            role: Role::Master,
            loop_period_ms: Params::TICK_MS,
            tick_period_ms: Params::TICK_MS,
            max_catch_up_ticks: 5,
            frame_log_interval: 250,
        }
    }
}

impl ConsoleConfig {
    pub fn slave() -> Self {
        Self {
            role: Role::Slave,
            ..Self::default()
        }
    }
}

pub struct Console {
    env: Box<dyn Environment>,
    config: ConsoleConfig,
    board: Board,
    fsm: ScreenFsm,
    /// Screen whose entry actions last ran
    entered: Option<Screen>,
    ticker: Ticker,
    link: Link,
    buttons: &'static ButtonQueue,
    display: Box<dyn Display>,
    renderer: BoardRenderer,
    spawn_requested: bool,
    menu_dirty: bool,
    last_poll_ms: Option<u64>,
    ticks: u64,
}

impl Console {
    pub fn new(
        config: ConsoleConfig,
        env: Box<dyn Environment>,
        board: Board,
        radio: Box<dyn Radio>,
        buttons: &'static ButtonQueue,
        display: Box<dyn Display>,
    ) -> Self {
        env.log(format!("Console starting as {:?}", config.role));
        Self {
            ticker: Ticker::new(config.tick_period_ms),
            link: Link::new(config.role, radio, config.frame_log_interval),
            env,
            config,
            board,
            fsm: ScreenFsm::new(),
            entered: None,
            buttons,
            display,
            renderer: BoardRenderer::new(),
            spawn_requested: false,
            menu_dirty: false,
            last_poll_ms: None,
            ticks: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.fsm.screen()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_attached()
    }

    pub fn spawn_requested(&self) -> bool {
        self.spawn_requested
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One pass of the main loop. Returns false when called again before
    /// the loop period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_poll_ms {
            if now_ms < last + self.config.loop_period_ms {
                return false;
            }
        }
        self.last_poll_ms = Some(now_ms);

        self.receive();

        while let Some(button) = self.buttons.pop() {
            self.handle_button(button);
        }

        self.run_entry_actions(now_ms);

        let due = self.ticker.due(now_ms, self.config.max_catch_up_ticks);
        for _ in 0..due {
            self.tick();
        }

        self.transmit();
        self.render();
        true
    }

    fn receive(&mut self) {
        if !self.board.wireless() {
            return;
        }
        match self.config.role {
            Role::Master => {
                self.link
                    .process_incoming_slave_message(&mut self.board, self.env.as_ref());
            }
            Role::Slave => {
                let Some(screen) = self
                    .link
                    .process_incoming_master_message(&mut self.board, self.env.as_ref())
                else {
                    return;
                };
                let from = self.fsm.screen();
                if self.fsm.sync_to(screen) {
                    self.env
                        .log(format!("Screen {from:?} -> {screen:?} (master)"));
                }
            }
        }
    }

    fn transmit(&mut self) {
        if !self.board.wireless() {
            return;
        }
        match self.config.role {
            Role::Master => {
                self.link
                    .transmit_board_state(&self.board, self.fsm.screen(), self.env.as_ref())
            }
            Role::Slave => self
                .link
                .transmit_outbound_slave_message(&self.board, self.env.as_ref()),
        }
    }

    fn transition(&mut self, action: Action) -> bool {
        let result = self.fsm.transition(action);
        if result.success {
            self.env
                .log(format!("Screen {:?} -> {:?}", result.from, result.to));
        } else {
            self.env.log(format!(
                "Rejected {:?} while on {:?}",
                result.action, result.from
            ));
        }
        result.success
    }

    /// With wireless on, each board drives only its own paddle
    fn controls(&self, side: Side) -> bool {
        !self.board.wireless() || side == self.config.role.local_side()
    }

    fn handle_button(&mut self, button: Button) {
        let Some(command) = command_for(button, self.fsm.screen()) else {
            return;
        };

        match command {
            Command::Start => {
                self.transition(Action::Start);
            }
            Command::Pause => {
                self.transition(Action::Pause);
            }
            Command::Resume => {
                self.transition(Action::Resume);
            }
            Command::Quit => {
                if self.transition(Action::Quit) {
                    self.board.reset();
                    self.env.log("Board reset".to_string());
                }
            }
            Command::Reset => {
                self.board.reset();
                self.env.log("Board reset".to_string());
            }
            Command::ToggleAi(side) => {
                let on = self.board.toggle_ai(side);
                self.env.log(format!("AI {side:?}: {on}"));
                self.menu_dirty = true;
            }
            Command::ToggleWireless => {
                let on = self.board.toggle_wireless();
                self.env.log(format!("Wireless: {on}"));
                self.menu_dirty = true;
            }
            Command::CycleDifficulty => {
                let level = self.board.cycle_difficulty();
                self.env.log(format!("AI difficulty: {level}"));
                self.menu_dirty = true;
            }
            Command::PaddleLeft(side) => {
                if self.controls(side) {
                    self.board.move_paddle_left(side);
                }
            }
            Command::PaddleRight(side) => {
                if self.controls(side) {
                    self.board.move_paddle_right(side);
                }
            }
            Command::SpawnBall => {
                if self.config.role == Role::Slave && self.board.wireless() {
                    self.env.log("Spawn ignored: the master owns the balls".to_string());
                } else {
                    self.spawn_requested = true;
                }
            }
        }
    }

    fn run_entry_actions(&mut self, now_ms: u64) {
        let screen = self.fsm.screen();
        if self.entered == Some(screen) {
            return;
        }

        match screen {
            Screen::Game => {
                self.ticker.attach(now_ms);
                if self.board.wireless() {
                    self.link.bring_up(self.env.as_ref());
                }
                self.renderer
                    .enter_game(&mut self.board, self.display.as_mut());
            }
            Screen::Pause => {
                self.ticker.detach();
                self.renderer.draw_pause(&self.board, self.display.as_mut());
            }
            Screen::Menu => {
                self.ticker.detach();
                self.renderer.draw_menu(&self.board, self.display.as_mut());
                self.menu_dirty = false;
            }
        }
        self.entered = Some(screen);
    }

    fn tick(&mut self) {
        self.ticks += 1;

        if self.spawn_requested {
            self.spawn_requested = false;
            if !self.board.spawn_ball() {
                self.env.log("Ball limit reached".to_string());
            }
        }

        // The master's frames drive a wireless slave
        if self.config.role == Role::Slave && self.board.wireless() {
            return;
        }

        let before = self.board.score();
        self.board.move_balls();
        let after = self.board.score();
        if after != before {
            self.env
                .log(format!("Score: P1 {} - P2 {}", after.top, after.bottom));
        }
    }

    fn render(&mut self) {
        match self.fsm.screen() {
            Screen::Game => self
                .renderer
                .draw_game(&mut self.board, self.display.as_mut()),
            Screen::Menu if self.menu_dirty => {
                self.renderer.draw_menu(&self.board, self.display.as_mut());
                self.menu_dirty = false;
            }
            Screen::Menu | Screen::Pause => {}
        }
    }
}
