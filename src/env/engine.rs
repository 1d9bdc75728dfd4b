//! The match engine: reset/step state machine with collision resolution
//! and goal detection.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::env::action::Action;
use crate::env::grid::{GoalZone, Position};
use crate::env::state::{
    AgentId, ForcedState, GOAL_REWARD, MatchState, Observation, RewardPair,
};
use crate::error::EnvResult;
use crate::render::{TraceSink, render_board};

/// Per-step move order: which agent's movement is applied first.
///
/// Drawn uniformly at random each step and never persisted; it only breaks
/// ties in collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOrder {
    first: AgentId,
}

impl MoveOrder {
    /// Create a move order with the given agent moving first.
    #[must_use]
    pub const fn new(first: AgentId) -> Self {
        Self { first }
    }

    /// The agent that moves first.
    #[must_use]
    pub const fn first(self) -> AgentId {
        self.first
    }

    /// The agent that moves second.
    #[must_use]
    pub const fn second(self) -> AgentId {
        self.first.other()
    }
}

/// Result of one step: observation, per-agent rewards, terminal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Observation of the post-step state.
    pub observation: Observation,
    /// Rewards for agents A and B.
    pub rewards: RewardPair,
    /// Whether the match ended on this step.
    pub done: bool,
}

/// The two-agent grid-soccer environment.
///
/// Owns the full match state and a seedable random source. Callers drive it
/// with [`SoccerEnv::reset`] followed by repeated [`SoccerEnv::step`] calls
/// until the returned terminal flag is true.
pub struct SoccerEnv {
    state: MatchState,
    rng: ChaCha8Rng,
    trace: Option<Box<dyn TraceSink>>,
}

impl std::fmt::Debug for SoccerEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoccerEnv")
            .field("state", &self.state)
            .field("tracing", &self.trace.is_some())
            .finish_non_exhaustive()
    }
}

impl SoccerEnv {
    /// Create an environment with a fixed seed.
    ///
    /// The initial match state is sampled immediately, so a freshly
    /// constructed environment is ready to step; call [`SoccerEnv::reset`]
    /// to start a new match.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut env = Self {
            state: MatchState {
                positions: [Position::new(1, 1), Position::new(1, 2)],
                possession: AgentId::A,
                done: false,
            },
            rng: ChaCha8Rng::seed_from_u64(seed),
            trace: None,
        };
        env.reset();
        env
    }

    /// Create an environment seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut env = Self {
            state: MatchState {
                positions: [Position::new(1, 1), Position::new(1, 2)],
                possession: AgentId::A,
                done: false,
            },
            rng: ChaCha8Rng::from_entropy(),
            trace: None,
        };
        env.reset();
        env
    }

    /// Install a trace sink. Every resolved step renders the board into it.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    /// Remove the trace sink, if any.
    pub fn clear_trace_sink(&mut self) {
        self.trace = None;
    }

    /// The current match state.
    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Whether the match has ended.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.state.done
    }

    /// Start a new match with sampled initial conditions.
    ///
    /// Agent A's row is sampled uniformly from {0, 1} with its column fixed
    /// to 1; agent B starts at (1, 2); possession is sampled uniformly.
    pub fn reset(&mut self) -> Observation {
        let a_row = self.rng.gen_range(0..2u8);
        let possession = AgentId::from_slot(self.rng.gen_range(0..2u8));
        self.state = MatchState {
            positions: [Position::new(a_row, 1), Position::new(1, 2)],
            possession,
            done: false,
        };
        self.state.observation()
    }

    /// Start a new match from an explicit state.
    ///
    /// The state is applied uncorrected: positions outside the pitch are
    /// accepted and clamp back in range on the next step. Consumes no
    /// random draws.
    pub fn reset_forced(&mut self, forced: ForcedState) -> Observation {
        self.state = MatchState {
            positions: [forced.a, forced.b],
            possession: forced.possession,
            done: false,
        };
        self.state.observation()
    }

    /// Advance the match by one step with a randomly drawn move order.
    ///
    /// If the match is already terminal this is a no-op: it echoes the
    /// current observation with zero reward and `done = true`, and consumes
    /// no random draws.
    pub fn step(&mut self, actions: [Action; 2]) -> StepOutcome {
        if self.state.done {
            return self.terminal_noop();
        }
        let order = MoveOrder::new(AgentId::from_slot(self.rng.gen_range(0..2u8)));
        self.step_with_order(actions, order)
    }

    /// Advance the match by one step from integer action codes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnvError::InvalidAction`] if either code is outside
    /// `{0..=4}`; the state is untouched in that case.
    pub fn step_codes(&mut self, codes: [u8; 2]) -> EnvResult<StepOutcome> {
        let actions = [Action::from_code(codes[0])?, Action::from_code(codes[1])?];
        Ok(self.step(actions))
    }

    /// Advance the match by one step with an explicit move order.
    ///
    /// This is the deterministic variant used for reproducible tests and
    /// experiments; [`SoccerEnv::step`] draws the order and delegates here.
    pub fn step_with_order(&mut self, actions: [Action; 2], order: MoveOrder) -> StepOutcome {
        if self.state.done {
            return self.terminal_noop();
        }

        let before = self.state.positions;
        let mut effective = actions;

        for agent in [order.first(), order.second()] {
            let idx = agent.index();
            let (d_row, d_col) = actions[idx].displacement();
            let moved = self.state.positions[idx].offset_clamped(d_row, d_col);
            self.state.positions[idx] = moved;
            // A move fully absorbed by the walls counts as Stay for the
            // collision rule below.
            if moved == before[idx] {
                effective[idx] = Action::Stay;
            }
        }

        if self.state.positions[0] == self.state.positions[1] {
            self.resolve_collision(order, effective, before);
        }

        let rewards = self.detect_goal();
        let outcome = StepOutcome {
            observation: self.state.observation(),
            rewards,
            done: self.state.done,
        };
        self.emit_trace();
        outcome
    }

    /// Resolve two agents occupying the same cell after movement.
    ///
    /// Exactly one agent reverts to its pre-step position. The rules are
    /// deliberately asymmetric: both holder cases branch on the SECOND
    /// mover's effective action, so who reverts and whether the ball changes
    /// hands differ between holder-moved-first and holder-moved-second. Do
    /// not simplify this into a symmetric rule.
    fn resolve_collision(
        &mut self,
        order: MoveOrder,
        effective: [Action; 2],
        before: [Position; 2],
    ) {
        let first = order.first();
        let second = order.second();

        if self.state.possession == first {
            if effective[second.index()] == Action::Stay {
                // Holder ran into a stationary opponent: the holder backs
                // off and loses the ball.
                self.state.positions[first.index()] = before[first.index()];
                self.state.possession = second;
            } else {
                // Holder keeps its new cell and the ball; the second
                // mover's move is undone.
                self.state.positions[second.index()] = before[second.index()];
            }
        } else if effective[second.index()] == Action::Stay {
            // Holder moved second but its move was absorbed: the first
            // mover backs off, ball stays put.
            self.state.positions[first.index()] = before[first.index()];
        } else {
            // Holder moved second into the first mover: its move is undone
            // and it loses the ball.
            self.state.positions[second.index()] = before[second.index()];
            self.state.possession = first;
        }
    }

    /// Check the current holder's cell against both goal zones.
    ///
    /// A's goal is checked first and wins; the precedence is part of the
    /// rules even though both zones can never match at once. Any holder
    /// standing in A's goal scores for B, and vice versa.
    fn detect_goal(&mut self) -> RewardPair {
        let holder = self.state.holder_position();
        if GoalZone::A.contains(holder) {
            self.state.done = true;
            return [-GOAL_REWARD, GOAL_REWARD];
        }
        if GoalZone::B.contains(holder) {
            self.state.done = true;
            return [GOAL_REWARD, -GOAL_REWARD];
        }
        [0, 0]
    }

    /// The no-op outcome returned when stepping a terminal match.
    fn terminal_noop(&self) -> StepOutcome {
        StepOutcome {
            observation: self.state.observation(),
            rewards: [0, 0],
            done: true,
        }
    }

    /// Render the board into the trace sink, if one is installed.
    fn emit_trace(&mut self) {
        if let Some(sink) = self.trace.as_deref_mut() {
            let board = render_board(&self.state);
            sink.emit(&board);
        }
    }
}
