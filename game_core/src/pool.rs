//! Free-list pool for enemy cars
//!
//! Enemies are allocated lazily the first time the free list runs dry and are
//! never despawned afterwards. A recycled enemy stays in the world, hidden,
//! until the spawner hands it out again.

use hecs::{Entity, World};

use crate::{Body, Enemy, Transform, Visible};

#[derive(Debug, Default)]
pub struct EnemyPool {
    free: Vec<Entity>,
    active: Vec<Entity>,
}

impl EnemyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate an enemy, reusing a pooled entity when one is available
    pub fn acquire(
        &mut self,
        world: &mut World,
        enemy: Enemy,
        transform: Transform,
        body: Body,
    ) -> Entity {
        let reused = self
            .free
            .pop()
            .filter(|&entity| world.contains(entity));

        let entity = match reused {
            Some(entity) => {
                // Components were attached on first spawn; overwrite in place
                if let Ok((e, t, b, v)) =
                    world.query_one_mut::<(&mut Enemy, &mut Transform, &mut Body, &mut Visible)>(
                        entity,
                    )
                {
                    *e = enemy;
                    *t = transform;
                    *b = body;
                    *v = Visible(true);
                }
                entity
            }
            None => world.spawn((enemy, transform, body, Visible(true))),
        };

        self.active.push(entity);
        entity
    }

    /// Return an active enemy to the free list. Returns false if it was not active.
    pub fn release(&mut self, world: &mut World, entity: Entity) -> bool {
        let Some(index) = self.active.iter().position(|&e| e == entity) else {
            return false;
        };
        self.active.swap_remove(index);

        if let Ok(mut visible) = world.get::<&mut Visible>(entity) {
            visible.0 = false;
        }
        self.free.push(entity);
        true
    }

    /// Return every active enemy to the free list
    pub fn release_all(&mut self, world: &mut World) -> usize {
        let released = self.active.len();
        for entity in self.active.drain(..) {
            if let Ok(mut visible) = world.get::<&mut Visible>(entity) {
                visible.0 = false;
            }
            self.free.push(entity);
        }
        released
    }

    pub fn active(&self) -> &[Entity] {
        &self.active
    }

    pub fn free(&self) -> &[Entity] {
        &self.free
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.active.contains(&entity)
    }

    /// Number of enemy entities ever allocated
    pub fn len_allocated(&self) -> usize {
        self.active.len() + self.free.len()
    }
}
