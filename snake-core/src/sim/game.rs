use super::*;

/// Simulation state owned by a session: mode, snake, coins, clock and the
/// random byte source feeding coin placement.
#[derive(Clone, Debug)]
pub struct Game<R> {
    mode: Mode,
    snake: Snake,
    coins: CoinSet,
    clock: GameClock,
    rng: R,
}

impl<R> Game<R> {
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[inline]
    pub fn coins(&self) -> &CoinSet {
        &self.coins
    }

    #[inline]
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    #[inline]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn checkpoint(&self) -> Checkpoint {
        let (mode, dead_tick) = match self.mode {
            Mode::Menu => (0, 0),
            Mode::Playing => (1, 0),
            Mode::Paused => (2, 0),
            Mode::Dead { dead_tick } => (3, dead_tick),
        };
        Checkpoint {
            mode,
            dead_tick,
            ticks: self.clock.ticks(),
            head: self.snake.head(),
            direction: self.snake.direction(),
            length: self.snake.len() as u8,
            speed: self.snake.speed(),
            growth_debt: self.snake.growth_debt(),
            coins: self.coins.len() as u8,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.mode,
            ticks: self.clock.ticks(),
            elapsed_ms: self.clock.elapsed_ms(),
            direction: self.snake.direction(),
            turn_cooldown: self.snake.turn_cooldown(),
            speed: self.snake.speed(),
            growth_debt: self.snake.growth_debt(),
            target_length: self.snake.target_length(),
            snake: self.snake.iter().collect(),
            coins: self.coins.iter().copied().collect(),
        }
    }

    pub fn validate_invariants(&self) -> Result<(), RuleCode> {
        if let Mode::Dead { dead_tick } = self.mode {
            if dead_tick > DEATH_WAIT {
                return Err(RuleCode::DeadTickRange);
            }
        }
        if self.mode == Mode::Menu {
            return Ok(());
        }

        let snake = &self.snake;
        if snake.is_empty() || snake.len() > MAX_SNAKE_LEN {
            return Err(RuleCode::SnakeLengthRange);
        }
        if snake.speed() == 0 || snake.speed() > MAX_SPEED {
            return Err(RuleCode::SnakeSpeedRange);
        }
        for n in 0..snake.len() {
            let segment = snake.get(n);
            if !segment.in_bounds() {
                return Err(RuleCode::SnakeBodyBounds);
            }
            if (n + 1..snake.len()).any(|m| snake.get(m) == segment) {
                return Err(RuleCode::SnakeBodyOverlap);
            }
        }

        if self.coins.len() > MAX_COINS {
            return Err(RuleCode::CoinCap);
        }
        let coins = self.coins.as_slice();
        for (i, coin) in coins.iter().enumerate() {
            if !(COIN_MIN_X..=COIN_MAX_X).contains(&coin.x)
                || !(COIN_MIN_Y..=COIN_MAX_Y).contains(&coin.y)
            {
                return Err(RuleCode::CoinMargin);
            }
            if coins[i + 1..].contains(coin) {
                return Err(RuleCode::CoinDuplicate);
            }
            if snake.intersects(*coin) {
                return Err(RuleCode::CoinOnSnake);
            }
        }

        Ok(())
    }
}

impl<R: ByteSource> Game<R> {
    pub fn new(rng: R) -> Self {
        Self {
            mode: Mode::Menu,
            snake: Snake::new(),
            coins: CoinSet::default(),
            clock: GameClock::default(),
            rng,
        }
    }

    /// Menu -> Playing: fresh snake, empty board, clock at zero.
    fn start(&mut self) {
        self.snake = Snake::new();
        self.coins.clear();
        self.clock.reset();
        self.set_mode(Mode::Playing);
    }

    fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(from = ?self.mode, to = ?mode, ticks = self.clock.ticks(), "mode change");
        self.mode = mode;
    }

    pub fn on_button(&mut self, button: ButtonEvent) -> Control {
        match (self.mode, button) {
            (Mode::Menu, ButtonEvent::Right) => self.start(),
            (Mode::Menu, ButtonEvent::Left) => return Control::Exit,
            (Mode::Playing, ButtonEvent::Both) => self.set_mode(Mode::Paused),
            (Mode::Playing, ButtonEvent::Left) => {
                self.snake.turn(Turn::Left);
            }
            (Mode::Playing, ButtonEvent::Right) => {
                self.snake.turn(Turn::Right);
            }
            (Mode::Paused, ButtonEvent::Both | ButtonEvent::Right) => {
                self.set_mode(Mode::Playing)
            }
            (Mode::Paused, ButtonEvent::Left) => self.set_mode(Mode::Menu),
            (mode @ Mode::Dead { .. }, ButtonEvent::Both) if mode.death_wait_elapsed() => {
                self.set_mode(Mode::Menu)
            }
            _ => {}
        }
        Control::Continue
    }

    /// One timer tick of simulation for the current mode.
    pub fn tick(&mut self) {
        match self.mode {
            Mode::Menu | Mode::Paused => {}
            Mode::Playing => self.play_tick(),
            Mode::Dead { dead_tick } => {
                if dead_tick < DEATH_WAIT {
                    self.mode = Mode::Dead {
                        dead_tick: dead_tick + 1,
                    };
                }
            }
        }
    }

    fn play_tick(&mut self) {
        let tick = self.clock.advance();

        if self.clock.is_step_tick(self.snake.move_period()) {
            let outcome = self.snake.advance();
            if outcome.is_fatal() {
                tracing::debug!(?outcome, head = ?self.snake.head(), tick, "snake died");
                self.set_mode(Mode::Dead { dead_tick: 0 });
                return;
            }
        }

        for _ in 0..self.coins.consume_if_intersecting(&self.snake) {
            let eaten = self.snake.eat_coin();
            tracing::trace!(?eaten, target_length = self.snake.target_length(), tick, "coin eaten");
        }

        if let Some(pos) = self.coins.tick_spawn(tick, &mut self.rng, &self.snake) {
            tracing::trace!(?pos, tick, "coin spawned");
        }
    }
}

#[cfg(test)]
impl<R> Game<R> {
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub(crate) fn coins_mut(&mut self) -> &mut CoinSet {
        &mut self.coins
    }

    pub(crate) fn set_mode_raw(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests;
