// ============================================================================
// DEBOUNCE - Temporizador cancelable con un único slot pendiente
// ============================================================================
// Cada fuente (búsqueda, movimiento del mapa) tiene su propio Debouncer.
// Re-disparar cancela el temporizador pendiente: solo el último disparo
// dentro de la ventana de silencio llega a ejecutarse.
// ============================================================================

use std::cell::RefCell;
use gloo_timers::callback::Timeout;

/// Programador de temporizadores. Soltar el handle cancela el temporizador.
pub trait TimerScheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// setTimeout del navegador vía gloo_timers
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl TimerScheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

pub struct Debouncer<S: TimerScheduler = BrowserScheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: RefCell<Option<S::Handle>>,
}

impl Debouncer<BrowserScheduler> {
    pub fn new(delay_ms: u32) -> Self {
        Self::with_scheduler(BrowserScheduler, delay_ms)
    }
}

impl<S: TimerScheduler> Debouncer<S> {
    pub fn with_scheduler(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// (Re)programar `action`; el temporizador anterior queda cancelado
    pub fn trigger<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(action));
        // Reemplazar el handle suelta (y cancela) el anterior
        let previous = self.pending.borrow_mut().replace(handle);
        drop(previous);
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

/// Reloj manual para tests: los temporizadores solo corren al avanzar el tiempo
#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct PendingTimer {
        due: u64,
        cancelled: Rc<Cell<bool>>,
        callback: Option<Box<dyn FnOnce()>>,
    }

    #[derive(Default)]
    pub struct FakeClock {
        now: Cell<u64>,
        timers: RefCell<Vec<PendingTimer>>,
    }

    pub struct FakeHandle(Rc<Cell<bool>>);

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    impl FakeClock {
        pub fn now(&self) -> u64 {
            self.now.get()
        }

        /// Avanzar el reloj disparando en orden los temporizadores vencidos
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let next = {
                    let mut timers = self.timers.borrow_mut();
                    timers.retain(|t| !t.cancelled.get() && t.callback.is_some());
                    let idx = timers
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due <= target)
                        .min_by_key(|(_, t)| t.due)
                        .map(|(i, _)| i);
                    idx.map(|i| timers.remove(i))
                };
                match next {
                    Some(mut timer) => {
                        self.now.set(timer.due);
                        if let Some(callback) = timer.callback.take() {
                            callback();
                        }
                    }
                    None => break,
                }
            }
            self.now.set(target);
        }
    }

    impl TimerScheduler for Rc<FakeClock> {
        type Handle = FakeHandle;

        fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> FakeHandle {
            let cancelled = Rc::new(Cell::new(false));
            self.timers.borrow_mut().push(PendingTimer {
                due: self.now.get() + delay_ms as u64,
                cancelled: cancelled.clone(),
                callback: Some(callback),
            });
            FakeHandle(cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeClock;
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<u64>>>, Rc<FakeClock>) {
        (Rc::new(RefCell::new(Vec::new())), Rc::new(FakeClock::default()))
    }

    #[test]
    fn test_rapid_triggers_fire_once_after_last() {
        let (fired_at, clock) = recorder();
        let debouncer = Debouncer::with_scheduler(clock.clone(), 500);

        // 5 pulsaciones separadas 100 ms
        for _ in 0..5 {
            let fired_at = fired_at.clone();
            let clock_in = clock.clone();
            debouncer.trigger(move || fired_at.borrow_mut().push(clock_in.now()));
            clock.advance(100);
        }
        // Última pulsación en t=400
        assert!(fired_at.borrow().is_empty());

        clock.advance(399);
        assert!(fired_at.borrow().is_empty());

        clock.advance(1);
        assert_eq!(*fired_at.borrow(), vec![900]);

        clock.advance(5_000);
        assert_eq!(fired_at.borrow().len(), 1);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let (fired_at, clock) = recorder();
        let debouncer = Debouncer::with_scheduler(clock.clone(), 500);

        for _ in 0..2 {
            let fired_at = fired_at.clone();
            let clock_in = clock.clone();
            debouncer.trigger(move || fired_at.borrow_mut().push(clock_in.now()));
            clock.advance(600);
        }
        assert_eq!(*fired_at.borrow(), vec![500, 1100]);
    }

    #[test]
    fn test_cancel_drops_pending_timer() {
        let (fired_at, clock) = recorder();
        let debouncer = Debouncer::with_scheduler(clock.clone(), 500);
        {
            let fired_at = fired_at.clone();
            debouncer.trigger(move || fired_at.borrow_mut().push(0));
        }
        debouncer.cancel();
        clock.advance(1_000);
        assert!(fired_at.borrow().is_empty());
    }

    #[test]
    fn test_independent_sources_do_not_cancel_each_other() {
        let (fired_at, clock) = recorder();
        let search = Debouncer::with_scheduler(clock.clone(), 500);
        let map_move = Debouncer::with_scheduler(clock.clone(), 500);
        {
            let fired_at = fired_at.clone();
            search.trigger(move || fired_at.borrow_mut().push(1));
        }
        clock.advance(200);
        {
            let fired_at = fired_at.clone();
            map_move.trigger(move || fired_at.borrow_mut().push(2));
        }
        clock.advance(1_000);
        assert_eq!(*fired_at.borrow(), vec![1, 2]);
    }
}
