use parking_lot::{Condvar, Mutex};

use crate::philosopher::Philosopher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Thinking,
    Hungry,
    Eating,
}

// ロックで守られる状態
#[derive(Debug)]
struct Seats {
    states: Vec<State>,
    meals: Vec<usize>, // putdown した回数
}

/// 食事の許可を出す中央のスケジューラ
///
/// 状態の遷移はすべて 1 つのロックの下で行う。隣り合う 2 人が同時に
/// `Eating` になることはない。`Eating` への遷移は `test` の中だけで、
/// そこで両隣の状態を同時に確認しているため
///
/// 飢餓が起きないことは保証しない
#[derive(Debug)]
pub struct Monitor {
    seats: Mutex<Seats>,
    conds: Vec<Condvar>, // 席ごとの条件変数
    stomach: usize,
}

impl Monitor {
    pub fn new(philosophers: usize, stomach: usize) -> Self {
        Monitor {
            seats: Mutex::new(Seats {
                states: vec![State::Thinking; philosophers],
                meals: vec![0; philosophers],
            }),
            conds: (0..philosophers).map(|_| Condvar::new()).collect(),
            stomach,
        }
    }

    fn neighbors(&self, i: usize) -> (usize, usize) {
        let n = self.conds.len();
        ((i + n - 1) % n, (i + 1) % n)
    }

    // 空腹で、まだ満腹でなく、両隣が食事中でなければ食事を許可する
    fn test(&self, seats: &mut Seats, i: usize) {
        let (left, right) = self.neighbors(i);
        if seats.states[i] == State::Hungry
            && seats.meals[i] < self.stomach
            && seats.states[left] != State::Eating
            && seats.states[right] != State::Eating
        {
            seats.states[i] = State::Eating;
            debug_assert!(no_adjacent_eating(&seats.states));
            self.conds[i].notify_one();
        }
    }

    pub fn pickup(&self, p: &Philosopher) {
        let i = p.seat();
        let mut seats = self.seats.lock();

        seats.states[i] = State::Hungry;
        self.test(&mut seats, i);
        while seats.states[i] != State::Eating {
            self.conds[i].wait(&mut seats);
        }

        // 両隣は食事中ではないので、箸はどちらも机の上にある
        p.take_right_fork();
        p.take_left_fork();
    }

    pub fn putdown(&self, p: &Philosopher) {
        let i = p.seat();
        let mut seats = self.seats.lock();

        p.return_left_fork();
        p.return_right_fork();

        seats.states[i] = State::Thinking;
        seats.meals[i] += 1;

        // 自分が抜けたことで両隣が食べられるようになったかもしれない
        let (left, right) = self.neighbors(i);
        self.test(&mut seats, left);
        self.test(&mut seats, right);
    }

    /// ロック下で取った全席の状態
    pub fn snapshot(&self) -> Vec<State> {
        self.seats.lock().states.clone()
    }

    pub fn meals(&self) -> Vec<usize> {
        self.seats.lock().meals.clone()
    }
}

/// 隣り合う 2 人が同時に食事中になっていないか
pub fn no_adjacent_eating(states: &[State]) -> bool {
    let n = states.len();
    (0..n).all(|i| states[i] != State::Eating || n < 2 || states[(i + 1) % n] != State::Eating)
}

#[cfg(test)]
mod test {
    use std::{
        sync::{mpsc, Arc},
        thread,
        time::Duration,
    };

    use super::*;
    use crate::{observer::Silent, strategy::Strategy, table::Ring};

    fn philosopher(ring: &Arc<Ring>, monitor: &Arc<Monitor>, seat: usize) -> Philosopher {
        Philosopher::new(
            seat,
            "Kant",
            ring.clone(),
            monitor.stomach,
            Duration::from_nanos(1000),
            Strategy::Monitor(monitor.clone()),
            Arc::new(Silent),
        )
    }

    #[test]
    fn test_no_adjacent_eating() {
        use State::*;
        assert!(no_adjacent_eating(&[Eating, Thinking, Eating, Hungry]));
        assert!(!no_adjacent_eating(&[Eating, Eating, Thinking]));
        // 輪なので末尾と先頭も隣同士
        assert!(!no_adjacent_eating(&[Eating, Thinking, Hungry, Eating]));
        assert!(no_adjacent_eating(&[Eating]));
    }

    #[test]
    fn test_pickup_takes_both_forks() {
        let ring = Arc::new(Ring::new(5));
        let monitor = Arc::new(Monitor::new(5, 3));
        let p = philosopher(&ring, &monitor, 2);

        monitor.pickup(&p);
        assert_eq!(monitor.snapshot()[2], State::Eating);
        assert_eq!(ring.fork(ring.right(2)).holder(), Some(2));
        assert_eq!(ring.fork(ring.left(2)).holder(), Some(2));

        monitor.putdown(&p);
        assert_eq!(monitor.snapshot(), vec![State::Thinking; 5]);
        assert_eq!(monitor.meals(), vec![0, 0, 1, 0, 0]);
        assert!(ring.holders().iter().all(Option::is_none));
    }

    #[test]
    fn test_neighbor_waits_until_putdown() {
        let ring = Arc::new(Ring::new(5));
        let monitor = Arc::new(Monitor::new(5, 3));
        let p0 = philosopher(&ring, &monitor, 0);
        let p1 = philosopher(&ring, &monitor, 1);
        let p3 = philosopher(&ring, &monitor, 3);

        monitor.pickup(&p0);
        // 0 と隣り合わない 3 はすぐに食べられる
        monitor.pickup(&p3);

        let (tx, rx) = mpsc::channel();
        let monitor1 = monitor.clone();
        let t = thread::spawn(move || {
            monitor1.pickup(&p1);
            tx.send(()).unwrap();
            monitor1.putdown(&p1);
        });

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        let states = monitor.snapshot();
        assert_eq!(states[1], State::Hungry);
        assert!(no_adjacent_eating(&states));

        monitor.putdown(&p0);
        rx.recv_timeout(Duration::from_secs(1)).unwrap();
        t.join().unwrap();

        monitor.putdown(&p3);
        assert_eq!(monitor.meals(), vec![1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_full_seat_is_never_granted() {
        let monitor = Monitor::new(3, 0);
        let mut seats = monitor.seats.lock();
        seats.states[1] = State::Hungry;
        monitor.test(&mut seats, 1);
        assert_eq!(seats.states[1], State::Hungry);
    }
}
