use std::{
    sync::{mpsc, Arc},
    thread,
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    config::{DiningConfig, Solution},
    error::{DiningError, Result},
    fork::Fork,
    observer::Observer,
    philosopher::Philosopher,
    strategy::Strategy,
};

#[rustfmt::skip]
pub const PHILOSOPHER_NAMES: [&str; 55] = [
    "Socrates", "Plato", "Aristotle", "Kant", "Nietzsche",
    "Confucius", "Averroes", "Buddha", "Abelard", "Adorno",
    "Bacon", "Barthes", "Bataille", "Baudrillard", "Beauvoir",
    "Benjamin", "Berkeley", "Butler", "Camus", "Chomsky",
    "Cixous", "Deleuze", "Derrida", "Descartes", "Dewey",
    "Foucault", "Gadamer", "Habermas", "Haraway", "Hegel",
    "Heidegger", "Hobbes", "Hume", "Husserl", "Irigaray",
    "James", "Immanuel", "Kristeva", "Tzu", "Levinas",
    "Locke", "Lyotard", "Ponty", "Mill", "Moore",
    "Quine", "Rand", "Rousseau", "Sartre", "Schopenhauer",
    "Spinoza", "Wittgenstein", "Aquinas", "Arendt", "Augustine",
];

/// 円卓に並べた箸
///
/// 箸 i は席 i の右の箸であり、席 i+1 の左の箸でもある
#[derive(Debug)]
pub struct Ring {
    forks: Vec<Fork>,
}

impl Ring {
    pub fn new(n: usize) -> Self {
        Ring {
            forks: (0..n).map(|_| Fork::new()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// 席 `seat` の右の箸の番号
    pub fn right(&self, seat: usize) -> usize {
        seat
    }

    /// 席 `seat` の左の箸の番号 (= 左隣の右の箸)
    pub fn left(&self, seat: usize) -> usize {
        let n = self.len();
        (seat + n - 1) % n
    }

    pub fn fork(&self, i: usize) -> &Fork {
        &self.forks[i]
    }

    pub fn holders(&self) -> Vec<Option<usize>> {
        self.forks.iter().map(Fork::holder).collect()
    }
}

/// 箸を配り終え、食事を始める前の食卓
pub struct Table {
    ring: Arc<Ring>,
    philosophers: Vec<Philosopher>,
}

#[derive(Debug, Clone)]
pub struct DiningReport {
    pub elapsed: Duration,
    /// 席順に (名前, 食べた回数)
    pub meals: Vec<(&'static str, usize)>,
}

/// 席ごとの行動を割り当てて哲学者を円卓に並べる
///
/// 席 i の左の箸は席 i-1 の右の箸と同じもの
pub fn setup_dining(
    config: &DiningConfig,
    actions: Vec<Strategy>,
    observer: Arc<dyn Observer>,
) -> Result<Table> {
    config.validate()?;
    if config.philosophers != actions.len() {
        return Err(DiningError::ActionCountMismatch {
            philosophers: config.philosophers,
            actions: actions.len(),
        });
    }

    let ring = Arc::new(Ring::new(config.philosophers));
    let philosophers = actions
        .into_iter()
        .enumerate()
        .map(|(seat, action)| {
            Philosopher::new(
                seat,
                PHILOSOPHER_NAMES[seat],
                ring.clone(),
                config.stomach,
                config.max_eat(),
                action,
                observer.clone(),
            )
        })
        .collect();

    info!(
        philosophers = config.philosophers,
        stomach = config.stomach,
        eat_ns = config.eat_ns,
        "table is set"
    );
    Ok(Table { ring, philosophers })
}

impl Solution {
    pub fn prepare(self, config: &DiningConfig, observer: Arc<dyn Observer>) -> Result<Table> {
        // actions() より先に検証しておく (席数 0 のウェイターを作らない)
        config.validate()?;
        setup_dining(
            config,
            self.actions(config.philosophers, config.stomach),
            observer,
        )
    }
}

impl Table {
    pub fn ring(&self) -> &Arc<Ring> {
        &self.ring
    }

    pub fn philosophers(&self) -> &[Philosopher] {
        &self.philosophers
    }

    /// 全員を同時に食べ始めさせ、全員が満腹になるまで待つ
    ///
    /// デッドロックした場合は返ってこない
    pub fn start(self) -> Result<DiningReport> {
        let start_time = Instant::now();

        let mut done_channels = Vec::with_capacity(self.philosophers.len());
        for philo in self.philosophers {
            let name = philo.name();
            let (done, rx) = mpsc::sync_channel(1);
            thread::Builder::new()
                .name(name.to_string())
                .spawn(move || {
                    let meals = philo.run();
                    let _ = done.send(meals);
                })
                .map_err(|source| DiningError::Spawn { name, source })?;
            done_channels.push((name, rx));
        }

        let mut meals = Vec::with_capacity(done_channels.len());
        for (name, done) in done_channels {
            let ate = done
                .recv()
                .map_err(|_| DiningError::PhilosopherPanicked { name })?;
            meals.push((name, ate));
        }
        let elapsed = start_time.elapsed();

        info!("dining finished in {:.2} seconds.", elapsed.as_secs_f64());
        Ok(DiningReport { elapsed, meals })
    }
}
