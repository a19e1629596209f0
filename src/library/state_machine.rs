use crate::library::logger::interface::Logger;
use std::fmt::Debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

pub type TransitionFn<TState, TEvent, TEffect> =
    Arc<dyn Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync>;

pub type RunEffectFn<TEvent, TEffect> = Arc<dyn Fn(TEffect, Sender<TEvent>) + Send + Sync>;

/// Elm-style loop driven from the outside: the owner calls `process_pending`
/// (once per UI frame) instead of blocking on the event channel. Effects run
/// on their own threads and report back through the channel.
pub struct StateMachine<TState, TEvent, TEffect> {
    state: TState,
    transition_fn: TransitionFn<TState, TEvent, TEffect>,
    run_effect_fn: RunEffectFn<TEvent, TEffect>,
    event_sender: Sender<TEvent>,
    event_receiver: Receiver<TEvent>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl<TState, TEvent, TEffect> StateMachine<TState, TEvent, TEffect>
where
    TState: Default + Send + 'static,
    TEvent: Debug + Send + 'static,
    TEffect: Debug + Send + 'static,
{
    pub fn new(
        init: (TState, Vec<TEffect>),
        transition_fn: TransitionFn<TState, TEvent, TEffect>,
        run_effect_fn: RunEffectFn<TEvent, TEffect>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let (state, effects) = init;

        let machine = Self {
            state,
            transition_fn,
            run_effect_fn,
            event_sender,
            event_receiver,
            logger,
        };

        machine.spawn_effects(effects);

        machine
    }

    pub fn state(&self) -> &TState {
        &self.state
    }

    /// Applies an event right away.
    pub fn send(&mut self, event: TEvent) {
        let _ = self.logger.info(&format!("msg: {:?}", event));

        let state = std::mem::take(&mut self.state);
        let (new_state, effects) = (self.transition_fn)(state, event);
        self.state = new_state;

        if !effects.is_empty() {
            let _ = self.logger.info(&format!("effects: {:?}", effects));
        }

        self.spawn_effects(effects);
    }

    /// Applies every event effects have posted so far. Returns how many.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            self.send(event);
            processed += 1;
        }
        processed
    }

    fn spawn_effects(&self, effects: Vec<TEffect>) {
        for effect in effects {
            let effect_sender = self.event_sender.clone();
            let run_effect_fn = Arc::clone(&self.run_effect_fn);
            std::thread::spawn(move || {
                run_effect_fn(effect, effect_sender);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use std::time::{Duration, Instant};

    #[derive(Debug)]
    enum Event {
        Add(u32),
        Echoed(u32),
    }

    #[derive(Debug)]
    enum Effect {
        Echo(u32),
    }

    fn machine(logger: LoggerFake) -> StateMachine<u32, Event, Effect> {
        StateMachine::new(
            (0, vec![Effect::Echo(1)]),
            Arc::new(|state: u32, event: Event| match event {
                Event::Add(n) => (state + n, vec![Effect::Echo(n)]),
                Event::Echoed(n) => (state + n * 100, vec![]),
            }),
            Arc::new(|effect: Effect, sender: Sender<Event>| match effect {
                Effect::Echo(n) => {
                    let _ = sender.send(Event::Echoed(n));
                }
            }),
            Arc::new(logger),
        )
    }

    fn pump_until(machine: &mut StateMachine<u32, Event, Effect>, expected: u32) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while *machine.state() != expected && Instant::now() < deadline {
            machine.process_pending();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_init_effects_are_run() {
        let mut machine = machine(LoggerFake::new());

        pump_until(&mut machine, 100);

        assert_eq!(*machine.state(), 100);
    }

    #[test]
    fn test_send_applies_immediately_and_effects_report_back() {
        let mut machine = machine(LoggerFake::new());

        machine.send(Event::Add(2));
        assert_eq!(*machine.state(), 2);

        pump_until(&mut machine, 302);

        assert_eq!(*machine.state(), 302);
    }

    #[test]
    fn test_messages_and_effects_are_logged() {
        let logger = LoggerFake::new();
        let mut machine = machine(logger.clone());

        machine.send(Event::Add(3));

        let lines = logger.lines();
        assert!(lines.iter().any(|line| line.contains("msg: Add(3)")));
        assert!(lines.iter().any(|line| line.contains("effects: [Echo(3)]")));
    }
}
