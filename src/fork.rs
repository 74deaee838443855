use parking_lot::{Condvar, Mutex};

/// 隣り合う 2 つの席の間に置かれた箸
///
/// 同時に持てるのは 1 席だけ。`take` は箸が机に戻るまでブロックする
/// (タイムアウトなし、待機順の保証もなし)
#[derive(Debug, Default)]
pub struct Fork {
    holder: Mutex<Option<usize>>, // None なら机の上
    cond: Condvar,
}

impl Fork {
    pub fn new() -> Self {
        Fork {
            holder: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    pub fn take(&self, seat: usize) {
        let mut holder = self.holder.lock();
        while holder.is_some() {
            self.cond.wait(&mut holder);
        }
        *holder = Some(seat);
    }

    pub fn put(&self, seat: usize) {
        let mut holder = self.holder.lock();
        debug_assert_eq!(*holder, Some(seat), "seat {seat} returned a fork it does not hold");
        *holder = None;
        self.cond.notify_one();
    }

    pub fn holder(&self) -> Option<usize> {
        *self.holder.lock()
    }

    pub fn is_on_table(&self) -> bool {
        self.holder().is_none()
    }
}
