//! A single player's game: the world plus every resource `step` needs

use hecs::{Entity, World};
use tracing::info;

use crate::systems::spawn_markers;
use crate::{
    create_player, step, Config, ConfigError, Difficulty, DriverInput, EnemyPool, Events,
    GameRng, Player, Road, RunState, Score, Spawner, Time, Transform,
};

pub struct Session {
    pub world: World,
    pub time: Time,
    pub road: Road,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub input: DriverInput,
    pub rng: GameRng,
    pub pool: EnemyPool,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub run_state: RunState,
    player: Entity,
}

impl Session {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let road = Road::new(&config);
        let mut world = World::new();
        let player = create_player(&mut world, &road, &config);
        spawn_markers(&mut world, &road, &config);

        Ok(Self {
            world,
            time: Time::default(),
            road,
            score: Score::new(),
            events: Events::new(),
            input: DriverInput::default(),
            rng: GameRng::new(seed),
            pool: EnemyPool::new(),
            spawner: Spawner::new(&config),
            difficulty: Difficulty::new(&config),
            run_state: RunState::Running,
            player,
            config,
        })
    }

    /// Seed the best score loaded from storage
    pub fn with_best(mut self, best: f32) -> Self {
        self.score.best = best.max(0.0);
        self
    }

    /// Advance by `dt` seconds using the input set on `self.input`
    pub fn step(&mut self, dt: f32) {
        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.road,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.input,
            &mut self.rng,
            &mut self.pool,
            &mut self.spawner,
            &mut self.difficulty,
            &mut self.run_state,
        );
    }

    /// Start a new run. The best score, the rng and the enemy pool survive.
    pub fn restart(&mut self) {
        let released = self.pool.release_all(&mut self.world);

        let lane = self.road.center_lane();
        let x = self.road.lane_x(lane);
        if let Ok((player, transform)) = self
            .world
            .query_one_mut::<(&mut Player, &mut Transform)>(self.player)
        {
            *player = Player::new(lane, self.config.start_speed);
            transform.pos.x = x;
            transform.pos.z = self.config.player_z;
            transform.yaw = 0.0;
        }

        self.time = Time::default();
        self.score.reset();
        self.events.clear();
        self.input = DriverInput::default();
        self.spawner = Spawner::new(&self.config);
        self.difficulty = Difficulty::new(&self.config);
        self.run_state = RunState::Running;

        info!(released, best = self.score.best, "run restarted");
    }

    pub fn is_game_over(&self) -> bool {
        !self.run_state.is_running()
    }

    pub fn player_entity(&self) -> Entity {
        self.player
    }

    pub fn player(&self) -> Option<Player> {
        self.world.get::<&Player>(self.player).ok().map(|p| *p)
    }

    pub fn player_transform(&self) -> Option<Transform> {
        self.world.get::<&Transform>(self.player).ok().map(|t| *t)
    }
}
