use std::iter::{Cycle, Peekable};

use smallvec::{IntoIter, SmallVec};

pub type PlayerId = u64;

pub trait WithPlayerId {
    fn get_id(&self) -> PlayerId;
}

/// Cyclic queue deciding whose turn it is.
/// Advancing past the last player wraps around to the first, so strict
/// alternation between two players falls out of plain iteration.
#[derive(Debug)]
pub struct PlayerPool<T: Clone> {
    players: SmallVec<[T; 2]>,
    players_queue: Peekable<Cycle<IntoIter<[T; 2]>>>,
}

impl<T: Clone> PlayerPool<T> {
    pub fn new(players: Vec<T>) -> Self {
        let players = SmallVec::from_vec(players);
        Self {
            players: players.clone(),
            players_queue: players.into_iter().cycle().peekable(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        self.players.as_slice()
    }

    /// Get the player whose turn it is without advancing the queue.
    /// &mut self is needed because Peekable can call next() on the underlying
    /// iterator
    pub fn get_current(&mut self) -> Option<&T> {
        self.players_queue.peek()
    }

    /// Advance the queue by one and return the player now at the front.
    pub fn next(&mut self) -> Option<&T> {
        self.players_queue.next()?;
        self.players_queue.peek()
    }

    /// Rewind the queue so the first player is current again.
    pub fn reset(&mut self) {
        self.players_queue = self.players.clone().into_iter().cycle().peekable();
    }

    pub fn find_if<F>(&self, f: F) -> Option<&T>
    where
        F: FnMut(&&T) -> bool,
    {
        self.players.iter().find(f)
    }
}

impl<T: Clone + WithPlayerId> PlayerPool<T> {
    pub fn find(&self, id: PlayerId) -> Option<&T> {
        self.players.iter().find(|player| player.get_id() == id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct DummyPlayer {
        id: PlayerId,
        some_data: usize,
    }

    impl DummyPlayer {
        fn new(id: PlayerId, some_data: usize) -> Self {
            Self { id, some_data }
        }
    }

    impl WithPlayerId for DummyPlayer {
        fn get_id(&self) -> PlayerId {
            self.id
        }
    }

    #[test]
    fn test_find() {
        let pool = PlayerPool::new(vec![DummyPlayer::new(3, 45), DummyPlayer::new(7, 42)]);

        assert_eq!(pool.find(3).cloned(), Some(DummyPlayer::new(3, 45)));
        assert_eq!(pool.find(7).cloned(), Some(DummyPlayer::new(7, 42)));
        assert_eq!(pool.find(1).cloned(), None);
    }

    #[test]
    fn test_find_if() {
        let pool = PlayerPool::new(vec![DummyPlayer::new(0, 12), DummyPlayer::new(1, 256)]);

        assert_eq!(
            pool.find_if(|&&p| p.some_data == 256).cloned(),
            Some(DummyPlayer::new(1, 256))
        );
        assert_eq!(pool.find_if(|&&p| p.some_data == 1), None);
    }

    #[test]
    fn test_get_current_is_stable() {
        let mut pool = PlayerPool::new(vec![5u64, 1]);

        assert_eq!(pool.get_current().cloned(), Some(5));
        // calling multiple times doesn't change anything
        assert_eq!(pool.get_current().cloned(), Some(5));

        let _ = pool.next();
        assert_eq!(pool.get_current().cloned(), Some(1));
    }

    #[test]
    fn test_cyclic_iteration() {
        let mut pool = PlayerPool::new(vec![1u64, 2]);
        assert_eq!(pool.get_current(), Some(&1));
        // check that elements cycle endlessly
        itertools::assert_equal(
            std::iter::from_fn(|| pool.next().cloned()).take(7),
            [2, 1, 2, 1, 2, 1, 2],
        );
    }

    #[test]
    fn test_reset_rewinds_to_first() {
        let mut pool = PlayerPool::new(vec![1u64, 2]);
        let _ = pool.next();
        assert_eq!(pool.get_current(), Some(&2));
        pool.reset();
        assert_eq!(pool.get_current(), Some(&1));
    }

    #[test]
    fn test_as_slice_unaffected_by_advancing() {
        let mut pool = PlayerPool::new(vec![1u64, 2]);
        itertools::assert_equal(pool.as_slice(), &[1, 2]);
        pool.next();
        itertools::assert_equal(pool.as_slice(), &[1, 2]);
    }
}
