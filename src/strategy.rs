use std::sync::Arc;

use crate::{config::Solution, monitor::Monitor, philosopher::Philosopher, semaphore::Semaphore};

/// 1 回の食事サイクルで箸をどう取るか
#[derive(Debug, Clone)]
pub enum Strategy {
    /// 右 → 左の順に取る。全員がこれだとデッドロックしうる
    RightFirst,
    /// 左 → 右の順に取る
    LeftFirst,
    /// ウェイターに許可をもらってから右 → 左
    Waiter(Arc<Semaphore>),
    /// モニタに食事の許可をもらう
    Monitor(Arc<Monitor>),
}

impl Strategy {
    /// 箸を取って食べて返す。`p.ate` はちょうど 1 増える
    pub fn dine(&self, p: &mut Philosopher) {
        p.become_hungry();
        match self {
            Strategy::RightFirst => right_then_left(p),
            Strategy::LeftFirst => left_then_right(p),
            Strategy::Waiter(waiter) => {
                waiter.wait();
                right_then_left(p);
                waiter.post();
            }
            Strategy::Monitor(monitor) => {
                monitor.pickup(p);
                p.eat();
                monitor.putdown(p);
            }
        }
    }
}

fn right_then_left(p: &mut Philosopher) {
    p.take_right_fork();
    p.take_left_fork();
    p.eat();
    p.return_left_fork();
    p.return_right_fork();
}

fn left_then_right(p: &mut Philosopher) {
    p.take_left_fork();
    p.take_right_fork();
    p.eat();
    p.return_right_fork();
    p.return_left_fork();
}

impl Solution {
    /// 席ごとの行動を並べる
    ///
    /// 席数 0 だとウェイターの上限が負になるので、検証済みの設定からだけ呼ぶ
    pub(crate) fn actions(self, philosophers: usize, stomach: usize) -> Vec<Strategy> {
        match self {
            // !!! this solution will deadlock !!!
            Solution::Naive => vec![Strategy::RightFirst; philosophers],
            // 1 人だけ逆順にすれば循環待ちができない
            Solution::Asymmetric => (0..philosophers)
                .map(|seat| {
                    if seat == 0 {
                        Strategy::LeftFirst
                    } else {
                        Strategy::RightFirst
                    }
                })
                .collect(),
            Solution::AdmissionControlled => {
                // 席数 - 1 人までしか箸に手を伸ばせない
                let waiter = Arc::new(Semaphore::new(philosophers as isize - 1));
                vec![Strategy::Waiter(waiter); philosophers]
            }
            Solution::Monitor => {
                let monitor = Arc::new(Monitor::new(philosophers, stomach));
                vec![Strategy::Monitor(monitor); philosophers]
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::{
        observer::{Event, EventLog, Silent},
        table::Ring,
    };

    fn seat(ring: &Arc<Ring>, seat: usize, action: Strategy) -> Philosopher {
        Philosopher::new(
            seat,
            "Socrates",
            ring.clone(),
            10,
            Duration::from_nanos(1000),
            action,
            Arc::new(Silent),
        )
    }

    #[test]
    fn test_each_action_eats_once_and_returns_forks() {
        let ring = Arc::new(Ring::new(3));
        let waiter = Arc::new(Semaphore::new(2));
        let monitor = Arc::new(Monitor::new(3, 10));
        let actions = [
            Strategy::RightFirst,
            Strategy::LeftFirst,
            Strategy::Waiter(waiter.clone()),
            Strategy::Monitor(monitor.clone()),
        ];

        for action in actions {
            let mut p = seat(&ring, 1, action.clone());
            action.dine(&mut p);
            assert_eq!(p.ate(), 1, "{action:?}");
            assert!(ring.holders().iter().all(Option::is_none), "{action:?}");
        }
        assert_eq!(waiter.in_use(), 0);
        assert_eq!(monitor.meals()[1], 1);
    }

    #[test]
    fn test_every_cycle_starts_hungry() {
        let ring = Arc::new(Ring::new(3));
        let actions = [
            Strategy::RightFirst,
            Strategy::LeftFirst,
            Strategy::Waiter(Arc::new(Semaphore::new(2))),
            Strategy::Monitor(Arc::new(Monitor::new(3, 10))),
        ];

        for action in actions {
            let log = Arc::new(EventLog::new());
            let mut p = Philosopher::new(
                2,
                "Plato",
                ring.clone(),
                10,
                Duration::from_nanos(1000),
                action.clone(),
                log.clone(),
            );
            action.dine(&mut p);
            action.dine(&mut p);

            let events: Vec<_> = log.records().iter().map(|r| r.event).collect();
            assert_eq!(events[0], Event::Hungry, "{action:?}");
            // Hungry は食事 1 回につき 1 度だけ、Eating より前に出る
            let hungry: Vec<_> = events
                .iter()
                .enumerate()
                .filter(|(_, e)| **e == Event::Hungry)
                .map(|(i, _)| i)
                .collect();
            let eating: Vec<_> = events
                .iter()
                .enumerate()
                .filter(|(_, e)| matches!(e, Event::Eating { .. }))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(hungry.len(), 2, "{action:?}");
            assert_eq!(eating.len(), 2, "{action:?}");
            assert!(hungry[0] < eating[0] && eating[0] < hungry[1] && hungry[1] < eating[1]);
        }
    }

    #[test]
    fn test_asymmetric_reverses_only_seat_zero() {
        let actions = Solution::Asymmetric.actions(5, 1);
        assert!(matches!(actions[0], Strategy::LeftFirst));
        assert!(actions[1..]
            .iter()
            .all(|a| matches!(a, Strategy::RightFirst)));
    }

    #[test]
    fn test_waiter_admits_one_less_than_seats() {
        let actions = Solution::AdmissionControlled.actions(5, 1);
        assert_eq!(actions.len(), 5);
        for a in &actions {
            match a {
                Strategy::Waiter(w) => assert_eq!(w.capacity(), 4),
                other => panic!("unexpected action {other:?}"),
            }
        }
    }

    #[test]
    fn test_monitor_is_shared_by_every_seat() {
        let actions = Solution::Monitor.actions(4, 7);
        let monitors: Vec<_> = actions
            .iter()
            .map(|a| match a {
                Strategy::Monitor(m) => m.clone(),
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert!(monitors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
