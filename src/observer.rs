use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, info};

/// 左右どちらの箸か
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// 哲学者スレッドが発行するイベント
///
/// `Hungry` は各サイクルの最初、箸やモニタに手を伸ばす前に発行される。
/// `TookFork` は取得後、`ReturningFork` は解放前に発行される。
/// `Eating` と `Ate` も両方の箸を持っている間に発行されるので、
/// 観測した区間は常に実際の区間の内側にある
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Hungry,
    TakingFork(Side),
    TookFork(Side),
    ReturningFork(Side),
    Eating { meal: usize, of: usize },
    Ate { meal: usize },
    Finished { meals: usize },
}

/// 哲学者の行動を外から覗くためのフック
///
/// 哲学者スレッド上で同期的に呼ばれる。食卓の正しさには関与しない
pub trait Observer: Send + Sync {
    fn observe(&self, seat: usize, name: &'static str, event: Event);
}

/// 何も出力しない
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {
    fn observe(&self, _seat: usize, _name: &'static str, _event: Event) {}
}

/// イベントを tracing に流す
#[derive(Debug, Default, Clone, Copy)]
pub struct Trace;

impl Observer for Trace {
    fn observe(&self, seat: usize, name: &'static str, event: Event) {
        match event {
            Event::Hungry => debug!(seat, "{name} is hungry."),
            Event::TakingFork(side) => debug!(seat, "{name} is taking a {side} fork."),
            Event::TookFork(side) => debug!(seat, "{name} took a {side} fork."),
            Event::ReturningFork(side) => debug!(seat, "{name} is returning a {side} fork."),
            Event::Eating { meal, of } => debug!(seat, "{name} is eating ({meal}/{of})."),
            Event::Ate { .. } => {}
            Event::Finished { meals } => info!(seat, meals, "{name} finished eating."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub tick: u64, // 論理時計
    pub seat: usize,
    pub event: Event,
}

#[derive(Debug, Default)]
struct Log {
    clock: u64,
    records: Vec<Record>,
}

/// 論理時計つきでイベントを記録する
///
/// 記録はロック下で追記されるので、`tick` の順序がそのまま観測順になる
#[derive(Debug, Default)]
pub struct EventLog {
    log: Mutex<Log>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.log.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.log.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Observer for EventLog {
    fn observe(&self, seat: usize, _name: &'static str, event: Event) {
        let mut log = self.log.lock();
        log.clock += 1;
        let tick = log.clock;
        log.records.push(Record { tick, seat, event });
    }
}
