use parking_lot::{Condvar, Mutex};

/// `wait` から `post` の間にいられるのは最大 `max` スレッドまで
#[derive(Debug)]
pub struct Semaphore {
    mutex: Mutex<isize>,
    cond: Condvar,
    max: isize,
}

impl Semaphore {
    pub fn new(max: isize) -> Self {
        Semaphore {
            mutex: Mutex::new(0),
            cond: Condvar::new(),
            max,
        }
    }

    // 上限に達していたら空きが出るまで待機
    pub fn wait(&self) {
        let mut cnt = self.mutex.lock();
        while *cnt >= self.max {
            self.cond.wait(&mut cnt);
        }
        *cnt += 1;
    }

    pub fn post(&self) {
        let mut cnt = self.mutex.lock();
        *cnt -= 1;
        debug_assert!(*cnt >= 0, "semaphore posted more than waited");
        if *cnt < self.max {
            self.cond.notify_one();
        }
    }

    pub fn in_use(&self) -> isize {
        *self.mutex.lock()
    }

    pub fn capacity(&self) -> isize {
        self.max
    }
}
