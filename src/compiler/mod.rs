//! Adapters over the bundler's compiler objects
//!
//! The host binding implements [`BuildUnit`] for its compiler handle; the
//! helpers here only need its options and its `done`/`invalid` hooks.

use crate::domain::{CompilerOptions, PublicPath, AUTO_PUBLIC_PATH, DEFAULT_ASSET_PREFIX};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub mod aggregate;

pub use aggregate::CompletionAggregator;

/// Tap name registered on the compiler hooks.
pub const HOOK_NAME: &str = "bundle-helpers:done";

pub type DoneHandler<S> = Box<dyn FnMut(S) -> LocalBoxFuture<'static, ()>>;
pub type InvalidHandler = Box<dyn FnMut()>;

/// One compilation pipeline exposed by the host bundler.
pub trait BuildUnit {
    /// Stats handle passed to `done` taps.
    type Stats: Clone + 'static;

    fn options(&self) -> &CompilerOptions;

    /// Register an async handler on the `done` hook.
    fn tap_done(&self, name: &str, handler: DoneHandler<Self::Stats>);

    /// Register a handler on the `invalid` hook.
    fn tap_invalid(&self, name: &str, handler: InvalidHandler);
}

/// A single compiler or a multi-compiler, fixed when the build is created.
#[derive(Debug, Clone)]
pub enum Compiler<U> {
    Single(U),
    Multi(Vec<U>),
}

impl<U> Compiler<U> {
    pub fn is_multi(&self) -> bool {
        matches!(self, Compiler::Multi(_))
    }

    pub fn units(&self) -> &[U] {
        match self {
            Compiler::Single(unit) => std::slice::from_ref(unit),
            Compiler::Multi(units) => units,
        }
    }
}

/// What a combined `done` callback receives.
#[derive(Debug, Clone)]
pub enum CompileOutcome<S, M> {
    Single(S),
    Multi(M),
}

/// Call `apply` on every build unit together with its index.
pub fn apply_to_compiler<U>(compiler: &Compiler<U>, mut apply: impl FnMut(&U, usize)) {
    for (index, unit) in compiler.units().iter().enumerate() {
        apply(unit, index);
    }
}

/// `stats` option for `toJson`, with one child entry per unit of a multi-compiler.
pub fn stats_options<U: BuildUnit>(compiler: &Compiler<U>) -> Option<Value> {
    match compiler {
        Compiler::Single(unit) => unit.options().stats.clone(),
        Compiler::Multi(units) => {
            let children: Vec<Value> = units
                .iter()
                .map(|unit| unit.options().stats.clone().unwrap_or(Value::Null))
                .collect();
            Some(json!({ "children": children }))
        }
    }
}

/// Public path a compiler emits assets under, always slash-terminated.
pub fn public_path_from_compiler<U: BuildUnit>(unit: &U) -> String {
    match &unit.options().public_path {
        // "auto" behaves like an empty public path at runtime.
        PublicPath::Static(path) if path == AUTO_PUBLIC_PATH => String::new(),
        PublicPath::Static(path) if path.ends_with('/') => path.clone(),
        PublicPath::Static(path) => format!("{path}/"),
        PublicPath::Dynamic => DEFAULT_ASSET_PREFIX.to_string(),
    }
}

/// Run `on_done` once the whole build is done.
///
/// A single compiler forwards each `done` directly. A multi-compiler waits
/// until every unit is done at the same time, then passes
/// `multi_stats(results)`; any unit invalidating re-arms the wait.
///
/// Only invalidated units are waited on again. A unit that stays done keeps
/// its last result, so re-completing one invalidated unit fires at once. In
/// watch mode a file change invalidates every affected unit before any of
/// them report `done`.
pub fn on_compile_done<U, M, F, C>(compiler: &Compiler<U>, on_done: F, multi_stats: C)
where
    U: BuildUnit,
    M: 'static,
    F: FnMut(CompileOutcome<U::Stats, M>) -> LocalBoxFuture<'static, ()> + 'static,
    C: Fn(Vec<U::Stats>) -> M + 'static,
{
    match compiler {
        Compiler::Single(unit) => {
            let mut on_done = on_done;
            unit.tap_done(HOOK_NAME, Box::new(move |stats| on_done(CompileOutcome::Single(stats))));
        }
        Compiler::Multi(units) => {
            let state = Rc::new(RefCell::new(CompletionAggregator::new(units.len())));
            let on_done = Rc::new(RefCell::new(on_done));
            let multi_stats = Rc::new(multi_stats);

            for (index, unit) in units.iter().enumerate() {
                let done_state = Rc::clone(&state);
                let on_done = Rc::clone(&on_done);
                let multi_stats = Rc::clone(&multi_stats);
                unit.tap_done(
                    HOOK_NAME,
                    Box::new(move |stats| {
                        let ready = done_state.borrow_mut().mark_done(index, stats);
                        let Some(results) = ready else {
                            return futures::future::ready(()).boxed_local();
                        };
                        let outcome = CompileOutcome::Multi((*multi_stats)(results));
                        let mut callback = on_done.borrow_mut();
                        (*callback)(outcome)
                    }),
                );

                let invalid_state = Rc::clone(&state);
                unit.tap_invalid(
                    HOOK_NAME,
                    Box::new(move || invalid_state.borrow_mut().mark_invalid(index)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    #[derive(Default)]
    struct FakeUnit {
        options: CompilerOptions,
        done: RefCell<Vec<DoneHandler<u32>>>,
        invalid: RefCell<Vec<InvalidHandler>>,
    }

    impl FakeUnit {
        fn with_public_path(public_path: PublicPath) -> Self {
            Self {
                options: CompilerOptions { public_path, stats: None },
                ..Self::default()
            }
        }

        fn done_future(&self, stats: u32) -> LocalBoxFuture<'static, ()> {
            let pending: Vec<_> = self.done.borrow_mut().iter_mut().map(|h| h(stats)).collect();
            futures::future::join_all(pending).map(|_| ()).boxed_local()
        }

        fn emit_done(&self, stats: u32) {
            block_on(self.done_future(stats));
        }

        fn emit_invalid(&self) {
            for handler in self.invalid.borrow_mut().iter_mut() {
                handler();
            }
        }
    }

    impl BuildUnit for FakeUnit {
        type Stats = u32;

        fn options(&self) -> &CompilerOptions {
            &self.options
        }

        fn tap_done(&self, _name: &str, handler: DoneHandler<u32>) {
            self.done.borrow_mut().push(handler);
        }

        fn tap_invalid(&self, _name: &str, handler: InvalidHandler) {
            self.invalid.borrow_mut().push(handler);
        }
    }

    type Calls = Rc<RefCell<Vec<Vec<u32>>>>;

    fn recorder(
        calls: &Calls,
    ) -> impl FnMut(CompileOutcome<u32, Vec<u32>>) -> LocalBoxFuture<'static, ()> {
        let calls = Rc::clone(calls);
        move |outcome| {
            let stats = match outcome {
                CompileOutcome::Single(stats) => vec![stats],
                CompileOutcome::Multi(stats) => stats,
            };
            calls.borrow_mut().push(stats);
            futures::future::ready(()).boxed_local()
        }
    }

    #[test]
    fn multi_compiler_waits_for_every_unit() {
        let compiler = Compiler::Multi(vec![FakeUnit::default(), FakeUnit::default()]);
        let calls: Calls = Rc::default();
        on_compile_done(&compiler, recorder(&calls), |stats| stats);

        let units = compiler.units();
        units[0].emit_done(10);
        assert!(calls.borrow().is_empty());
        units[1].emit_done(11);
        assert_eq!(*calls.borrow(), vec![vec![10, 11]]);

        units[0].emit_invalid();
        units[1].emit_invalid();
        units[0].emit_done(20);
        assert_eq!(calls.borrow().len(), 1);
        units[1].emit_done(21);
        assert_eq!(calls.borrow().last(), Some(&vec![20, 21]));
    }

    #[test]
    fn invalidation_before_completion_suppresses_the_cycle() {
        let compiler = Compiler::Multi(vec![FakeUnit::default(), FakeUnit::default()]);
        let calls: Calls = Rc::default();
        on_compile_done(&compiler, recorder(&calls), |stats| stats);

        let units = compiler.units();
        units[0].emit_done(1);
        units[0].emit_invalid();
        units[1].emit_done(2);
        assert!(calls.borrow().is_empty());
        units[0].emit_done(3);
        assert_eq!(*calls.borrow(), vec![vec![3, 2]]);
    }

    #[test]
    fn single_compiler_forwards_every_done() {
        let compiler = Compiler::Single(FakeUnit::default());
        let calls: Calls = Rc::default();
        on_compile_done(&compiler, recorder(&calls), |stats| stats);

        compiler.units()[0].emit_done(1);
        compiler.units()[0].emit_done(2);
        assert_eq!(*calls.borrow(), vec![vec![1], vec![2]]);
        assert!(compiler.units()[0].invalid.borrow().is_empty());
    }

    #[test]
    fn invalidations_interleave_with_a_running_callback() {
        let compiler = Compiler::Multi(vec![FakeUnit::default(), FakeUnit::default()]);
        let (release, wait) = oneshot::channel::<()>();
        let wait = RefCell::new(Some(wait));
        let finished = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&finished);
        on_compile_done(
            &compiler,
            move |_outcome: CompileOutcome<u32, Vec<u32>>| {
                let wait = wait.borrow_mut().take();
                let flag = Rc::clone(&flag);
                async move {
                    if let Some(wait) = wait {
                        let _ = wait.await;
                    }
                    *flag.borrow_mut() = true;
                }
                .boxed_local()
            },
            |stats| stats,
        );

        let units = compiler.units();
        units[0].emit_done(1);
        let in_flight = units[1].done_future(2);

        // The combined callback is suspended; the hooks must stay usable.
        units[0].emit_invalid();
        units[1].emit_invalid();
        assert!(!*finished.borrow());

        let _ = release.send(());
        block_on(in_flight);
        assert!(*finished.borrow());
    }

    #[test]
    fn apply_visits_units_in_order() {
        let compiler =
            Compiler::Multi(vec![FakeUnit::default(), FakeUnit::default(), FakeUnit::default()]);
        let mut seen = Vec::new();
        apply_to_compiler(&compiler, |_, index| seen.push(index));
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(compiler.is_multi());

        let mut single = Vec::new();
        apply_to_compiler(&Compiler::Single(FakeUnit::default()), |_, index| single.push(index));
        assert_eq!(single, vec![0]);
    }

    #[test]
    fn stats_options_nest_children_for_multi_compilers() {
        let mut first = FakeUnit::default();
        first.options.stats = Some(json!("errors-only"));
        let compiler = Compiler::Multi(vec![first, FakeUnit::default()]);
        assert_eq!(stats_options(&compiler), Some(json!({ "children": ["errors-only", null] })));

        let single = Compiler::Single(FakeUnit::default());
        assert_eq!(stats_options(&single), None);
    }

    #[test]
    fn public_path_from_compiler_options() {
        assert_eq!(public_path_from_compiler(&FakeUnit::with_public_path("auto".into())), "");
        assert_eq!(public_path_from_compiler(&FakeUnit::with_public_path("/app".into())), "/app/");
        assert_eq!(
            public_path_from_compiler(&FakeUnit::with_public_path("https://cdn.x/".into())),
            "https://cdn.x/"
        );
        let dynamic = FakeUnit::with_public_path(PublicPath::Dynamic);
        assert_eq!(public_path_from_compiler(&dynamic), "/");
    }
}
