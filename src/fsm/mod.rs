//! Generic per-entity state machines.
//!
//! A machine owns exactly one current state. A `Descriptor` supplies the hook
//! table for each state; `tick` drives one frame:
//!
//! 1. the initial state's enter hook (first tick only),
//! 2. a pending external interrupt,
//! 3. the descriptor's ambient hook,
//! 4. a due continuation scheduled with `wait_then`,
//! 5. the current state's update hook, which may name an immediate successor.
//!
//! Continuations are stamped with the machine's generation. Every state entry
//! bumps the generation, so a continuation scheduled by a state that has since
//! been left can never fire. They live on the entity, so despawning it cancels
//! them too.

use bevy::prelude::*;
use std::fmt::Debug;

pub trait MachineState: Copy + Eq + Debug + Send + Sync + 'static {}

impl<T> MachineState for T where T: Copy + Eq + Debug + Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Continuation<S> {
    generation: u64,
    remaining: f32,
    next: S,
}

#[derive(Component, Debug, Clone)]
pub struct StateMachine<S: MachineState> {
    current: S,
    elapsed: f32,
    generation: u64,
    started: bool,
    interrupt: Option<S>,
    continuations: Vec<Continuation<S>>,
}

impl<S: MachineState> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            elapsed: 0.0,
            generation: 0,
            started: false,
            interrupt: None,
            continuations: Vec::new(),
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn is(&self, state: S) -> bool {
        self.current == state
    }

    /// Seconds since the current state was entered.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Continuations that can still fire.
    pub fn live_continuations(&self) -> usize {
        self.continuations
            .iter()
            .filter(|c| c.generation == self.generation)
            .count()
    }

    /// Transition to `next` after `secs`, unless the state changes first.
    pub fn wait_then(&mut self, secs: f32, next: S) {
        self.continuations.push(Continuation {
            generation: self.generation,
            remaining: secs,
            next,
        });
    }

    /// Force a transition at the start of the next tick.
    pub fn interrupt(&mut self, next: S) {
        self.interrupt = Some(next);
    }

    fn switch(&mut self, next: S) {
        self.current = next;
        self.elapsed = 0.0;
        self.generation += 1;
    }

    fn advance(&mut self, dt: f32) -> Option<S> {
        self.elapsed += dt;

        let generation = self.generation;
        self.continuations.retain(|c| c.generation == generation);

        let mut due = None;
        for continuation in &mut self.continuations {
            continuation.remaining -= dt;
            if due.is_none() && continuation.remaining <= 0.0 {
                due = Some(continuation.next);
            }
        }
        if due.is_some() {
            self.continuations.retain(|c| c.remaining > 0.0);
        }
        due
    }
}

/// Gives the runtime access to the machine inside a hook context.
pub trait StateContext {
    type State: MachineState;

    fn machine(&mut self) -> &mut StateMachine<Self::State>;
}

/// A telegraph line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

pub struct StateHooks<C: StateContext> {
    pub enter: fn(&mut C),
    pub update: fn(&mut C) -> Option<C::State>,
    pub exit: fn(&mut C),
    pub draw: fn(&C, &mut Vec<Segment>),
}

impl<C: StateContext> Clone for StateHooks<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: StateContext> Copy for StateHooks<C> {}

impl<C: StateContext> Default for StateHooks<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn nothing<C>(_: &mut C) {}

fn stay<C: StateContext>(_: &mut C) -> Option<C::State> {
    None
}

fn no_draw<C>(_: &C, _: &mut Vec<Segment>) {}

impl<C: StateContext> StateHooks<C> {
    pub fn new() -> Self {
        Self {
            enter: nothing::<C>,
            update: stay::<C>,
            exit: nothing::<C>,
            draw: no_draw::<C>,
        }
    }

    pub fn on_enter(mut self, hook: fn(&mut C)) -> Self {
        self.enter = hook;
        self
    }

    pub fn on_update(mut self, hook: fn(&mut C) -> Option<C::State>) -> Self {
        self.update = hook;
        self
    }

    pub fn on_exit(mut self, hook: fn(&mut C)) -> Self {
        self.exit = hook;
        self
    }

    pub fn on_draw(mut self, hook: fn(&C, &mut Vec<Segment>)) -> Self {
        self.draw = hook;
        self
    }
}

/// The state table for one kind of machine.
pub trait Descriptor<C: StateContext> {
    fn allows(&self, state: C::State) -> bool;

    fn hooks(&self, state: C::State) -> StateHooks<C>;

    /// Runs every tick regardless of state.
    fn ambient(&self, _ctx: &mut C) {}
}

/// Leave the current state and enter `next`.
///
/// A state outside the descriptor's table is a programming error: it panics in
/// debug builds and is ignored in release builds.
pub fn enter_state<C, D>(descriptor: &D, ctx: &mut C, next: C::State) -> bool
where
    C: StateContext,
    D: Descriptor<C> + ?Sized,
{
    if !descriptor.allows(next) {
        debug_assert!(false, "state {next:?} is not defined for this machine");
        warn!("Ignoring transition to undefined state {:?}", next);
        return false;
    }

    let previous = ctx.machine().current();
    if ctx.machine().started {
        (descriptor.hooks(previous).exit)(ctx);
    }
    ctx.machine().started = true;
    ctx.machine().switch(next);
    (descriptor.hooks(next).enter)(ctx);
    true
}

/// Drive one frame of the machine.
pub fn tick<C, D>(descriptor: &D, ctx: &mut C, dt: f32)
where
    C: StateContext,
    D: Descriptor<C> + ?Sized,
{
    if !ctx.machine().started {
        ctx.machine().started = true;
        let initial = ctx.machine().current();
        (descriptor.hooks(initial).enter)(ctx);
    }

    if let Some(next) = ctx.machine().interrupt.take() {
        enter_state(descriptor, ctx, next);
    }

    descriptor.ambient(ctx);

    if let Some(next) = ctx.machine().advance(dt) {
        enter_state(descriptor, ctx, next);
    }

    let update = descriptor.hooks(ctx.machine().current()).update;
    if let Some(next) = update(ctx) {
        enter_state(descriptor, ctx, next);
    }
}

/// Collect the current state's telegraph segments.
pub fn draw<C, D>(descriptor: &D, ctx: &mut C, out: &mut Vec<Segment>)
where
    C: StateContext,
    D: Descriptor<C> + ?Sized,
{
    let state = ctx.machine().current();
    (descriptor.hooks(state).draw)(ctx, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Lamp {
        Off,
        On,
        Blink,
        Broken,
    }

    /// Records which hooks ran.
    struct Lamppost {
        machine: StateMachine<Lamp>,
        log: Vec<&'static str>,
        switch_on: bool,
    }

    impl Lamppost {
        fn new(initial: Lamp) -> Self {
            Self {
                machine: StateMachine::new(initial),
                log: Vec::new(),
                switch_on: false,
            }
        }
    }

    impl StateContext for Lamppost {
        type State = Lamp;

        fn machine(&mut self) -> &mut StateMachine<Lamp> {
            &mut self.machine
        }
    }

    struct LampTable;

    impl Descriptor<Lamppost> for LampTable {
        fn allows(&self, state: Lamp) -> bool {
            state != Lamp::Broken
        }

        fn hooks(&self, state: Lamp) -> StateHooks<Lamppost> {
            match state {
                Lamp::Off => StateHooks::<Lamppost>::new()
                    .on_enter(|p| p.log.push("enter off"))
                    .on_update(|p| {
                        p.log.push("update off");
                        p.switch_on.then_some(Lamp::On)
                    })
                    .on_exit(|p| p.log.push("exit off")),
                Lamp::On => StateHooks::<Lamppost>::new()
                    .on_enter(|p| {
                        p.log.push("enter on");
                        p.machine.wait_then(1.0, Lamp::Off);
                    })
                    .on_update(|p| {
                        p.log.push("update on");
                        None
                    })
                    .on_draw(|_, out| {
                        out.push(Segment {
                            from: Vec2::ZERO,
                            to: Vec2::X,
                            opacity: 1.0,
                        })
                    }),
                Lamp::Blink => StateHooks::<Lamppost>::new()
                    .on_enter(|p| {
                        p.log.push("enter blink");
                        p.machine.wait_then(2.0, Lamp::Off);
                    })
                    .on_update(|p| {
                        p.log.push("update blink");
                        None
                    }),
                Lamp::Broken => StateHooks::<Lamppost>::new(),
            }
        }
    }

    fn run(post: &mut Lamppost, secs: f32, dt: f32) {
        let frames = (secs / dt).round() as usize;
        for _ in 0..frames {
            tick(&LampTable, post, dt);
        }
    }

    #[test]
    fn test_first_tick_enters_initial_state() {
        let mut post = Lamppost::new(Lamp::Off);
        tick(&LampTable, &mut post, 0.1);
        assert_eq!(post.log, vec!["enter off", "update off"]);
    }

    #[test]
    fn test_only_current_update_hook_runs() {
        let mut post = Lamppost::new(Lamp::Off);
        run(&mut post, 1.0, 0.1);
        assert!(post.log.iter().all(|entry| !entry.contains("on")));

        post.switch_on = true;
        post.log.clear();
        tick(&LampTable, &mut post, 0.1);
        assert_eq!(post.log, vec!["update off", "exit off", "enter on"]);
        assert!(post.machine.is(Lamp::On));

        post.log.clear();
        tick(&LampTable, &mut post, 0.1);
        assert_eq!(post.log, vec!["update on"]);
    }

    #[test]
    fn test_wait_then_transitions_after_delay() {
        let mut post = Lamppost::new(Lamp::On);
        run(&mut post, 0.9, 0.1);
        assert!(post.machine.is(Lamp::On));
        run(&mut post, 0.2, 0.1);
        assert!(post.machine.is(Lamp::Off));
    }

    #[test]
    fn test_entering_resets_elapsed_and_bumps_generation() {
        let mut post = Lamppost::new(Lamp::Off);
        run(&mut post, 0.5, 0.1);
        assert!(post.machine.elapsed() > 0.4);
        let before = post.machine.generation();

        assert!(enter_state(&LampTable, &mut post, Lamp::Blink));
        assert_eq!(post.machine.elapsed(), 0.0);
        assert_eq!(post.machine.generation(), before + 1);
    }

    #[test]
    fn test_interrupt_invalidates_pending_wait() {
        let mut post = Lamppost::new(Lamp::On);
        // The On → Off wait is due at 1.0s; interrupt just before it.
        run(&mut post, 0.9, 0.1);
        post.machine.interrupt(Lamp::Blink);
        tick(&LampTable, &mut post, 0.1);
        assert!(post.machine.is(Lamp::Blink));
        assert_eq!(post.machine.live_continuations(), 1);

        // Past the stale deadline: still blinking.
        run(&mut post, 0.5, 0.1);
        assert!(post.machine.is(Lamp::Blink));

        // Blink's own wait (2s) expires.
        run(&mut post, 1.6, 0.1);
        assert!(post.machine.is(Lamp::Off));
    }

    #[test]
    fn test_reentering_same_state_restarts_its_wait() {
        let mut post = Lamppost::new(Lamp::Blink);
        run(&mut post, 1.5, 0.1);
        post.machine.interrupt(Lamp::Blink);
        run(&mut post, 1.0, 0.1);
        // The first Blink would have ended at 2.0s.
        assert!(post.machine.is(Lamp::Blink));
        run(&mut post, 1.2, 0.1);
        assert!(post.machine.is(Lamp::Off));
    }

    #[test]
    fn test_draw_uses_current_state_only() {
        let mut post = Lamppost::new(Lamp::Off);
        let mut segments = Vec::new();
        draw(&LampTable, &mut post, &mut segments);
        assert!(segments.is_empty());

        enter_state(&LampTable, &mut post, Lamp::On);
        draw(&LampTable, &mut post, &mut segments);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not defined")]
    fn test_undefined_state_panics_in_debug() {
        let mut post = Lamppost::new(Lamp::Off);
        enter_state(&LampTable, &mut post, Lamp::Broken);
    }
}
