use std::{sync::Arc, thread, time::Duration};

use rand::Rng;

use crate::{
    observer::{Event, Observer, Side},
    strategy::Strategy,
    table::Ring,
};

/// 左右両方の箸を持っているときだけ食べられる哲学者
///
/// 右の箸は自席の箸、左の箸は左隣の席の右の箸。
/// `ate` を書き換えるのは自分のスレッドだけ
pub struct Philosopher {
    seat: usize,
    name: &'static str,
    ring: Arc<Ring>,

    ate: usize,
    stomach: usize,
    max_eat_ns: u64,
    action: Strategy,
    observer: Arc<dyn Observer>,
}

impl Philosopher {
    pub(crate) fn new(
        seat: usize,
        name: &'static str,
        ring: Arc<Ring>,
        stomach: usize,
        max_eat: Duration,
        action: Strategy,
        observer: Arc<dyn Observer>,
    ) -> Self {
        Philosopher {
            seat,
            name,
            ring,
            ate: 0,
            stomach,
            max_eat_ns: max_eat.as_nanos().min(u64::MAX as u128) as u64,
            action,
            observer,
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ate(&self) -> usize {
        self.ate
    }

    pub fn stomach(&self) -> usize {
        self.stomach
    }

    pub fn is_full(&self) -> bool {
        self.ate >= self.stomach
    }

    pub(crate) fn take_right_fork(&self) {
        self.take_fork(Side::Right);
    }

    pub(crate) fn take_left_fork(&self) {
        self.take_fork(Side::Left);
    }

    pub(crate) fn return_right_fork(&self) {
        self.return_fork(Side::Right);
    }

    pub(crate) fn return_left_fork(&self) {
        self.return_fork(Side::Left);
    }

    fn fork_index(&self, side: Side) -> usize {
        match side {
            Side::Left => self.ring.left(self.seat),
            Side::Right => self.ring.right(self.seat),
        }
    }

    fn take_fork(&self, side: Side) {
        self.observe(Event::TakingFork(side));
        self.ring.fork(self.fork_index(side)).take(self.seat);
        self.observe(Event::TookFork(side));
    }

    fn return_fork(&self, side: Side) {
        self.observe(Event::ReturningFork(side));
        self.ring.fork(self.fork_index(side)).put(self.seat);
    }

    fn holds_both_forks(&self) -> bool {
        [Side::Left, Side::Right]
            .iter()
            .all(|side| self.ring.fork(self.fork_index(*side)).holder() == Some(self.seat))
    }

    // [0, max_eat) の間ランダムに食事して、食べた量を 1 増やす
    pub(crate) fn eat(&mut self) {
        debug_assert!(
            self.holds_both_forks(),
            "{} started eating without both forks",
            self.name
        );
        self.observe(Event::Eating {
            meal: self.ate + 1,
            of: self.stomach,
        });

        let ns = rand::thread_rng().gen_range(0..self.max_eat_ns);
        thread::sleep(Duration::from_nanos(ns));
        self.ate += 1;

        self.observe(Event::Ate { meal: self.ate });
    }

    pub(crate) fn become_hungry(&self) {
        self.observe(Event::Hungry);
    }

    fn observe(&self, event: Event) {
        self.observer.observe(self.seat, self.name, event);
    }

    /// 満腹になるまで食事を繰り返し、食べた量を返す
    pub fn run(mut self) -> usize {
        // action は 1 サイクルの間 self を可変で借りるので手元に複製しておく
        let action = self.action.clone();
        while !self.is_full() {
            action.dine(&mut self);
        }
        self.observe(Event::Finished { meals: self.ate });
        self.ate
    }
}
