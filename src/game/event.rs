//! Event System
//!
//! The update step records what happened during a tick as events instead
//! of logging or reacting inline. The loop drains them after each tick
//! (for logs); tests read them to check what a tick did.

use super::entity::ItemKind;
use super::geometry::Cell;

/// A queue for events of a single type.
/// Events are collected during the tick and drained by the loop.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Head ran into its own body
    SelfBite,
    /// Touched a spike
    Obstacle,
    /// Walked into an enemy without stomping it
    Enemy,
    /// Dropped below the world
    FellOut,
}

/// Gameplay events produced by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ItemCollected {
        kind: ItemKind,
        cell: Cell,
        /// Where the replacement spawned (None if the grid was full)
        respawned_at: Option<Cell>,
    },
    EnemyStomped {
        cell: Cell,
    },
    PowerUpStarted {
        ticks: u32,
    },
    PowerUpExpired,
    LevelUp {
        level: u32,
    },
    Died {
        cause: DeathCause,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.iter().count(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(queue.iter().next(), None);
    }

    #[test]
    fn test_game_events_drain_in_order() {
        let mut queue: EventQueue<GameEvent> = EventQueue::new();
        queue.send(GameEvent::LevelUp { level: 2 });
        queue.send(GameEvent::Died { cause: DeathCause::SelfBite });

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![GameEvent::LevelUp { level: 2 }, GameEvent::Died { cause: DeathCause::SelfBite }]
        );
        assert_eq!(queue.iter().count(), 0);
    }
}
