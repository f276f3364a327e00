//! Unit tests for Trampoline<A> type.
//!
//! Tests cover:
//! - Basic trampoline operations (done, suspend)
//! - Recursive computations (factorial, fibonacci)
//! - Mutual recursion (is_even, is_odd)
//! - Stack safety with deep recursion and left-nested binds
//! - map, flat_map and then operations
//! - resume for step-by-step evaluation
//! - Laziness and re-runnability

#![cfg(feature = "control")]

use pureio::control::{Codensity, Either, Trampoline};
use rstest::rstest;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

// =============================================================================
// Basic Construction
// =============================================================================

#[rstest]
fn trampoline_done_returns_value() {
    assert_eq!(Trampoline::done(42).run(), 42);
}

#[rstest]
fn trampoline_done_with_string() {
    assert_eq!(Trampoline::done("hello".to_string()).run(), "hello");
}

#[rstest]
fn trampoline_pure_is_alias_for_done() {
    assert_eq!(Trampoline::pure(42).run(), 42);
}

#[rstest]
fn trampoline_suspend_delays_computation() {
    let evaluated = Rc::new(Cell::new(false));
    let flag = Rc::clone(&evaluated);
    let trampoline = Trampoline::suspend(move || {
        flag.set(true);
        Trampoline::done(42)
    });

    assert!(!evaluated.get());
    assert_eq!(trampoline.run(), 42);
    assert!(evaluated.get());
}

#[rstest]
fn trampoline_is_pure_only_for_finished_values() {
    assert!(Trampoline::done(1).is_pure());
    assert!(!Trampoline::suspend(|| Trampoline::done(1)).is_pure());
    assert!(!Trampoline::done(1).map(|x| x + 1).is_pure());
}

// =============================================================================
// Recursion
// =============================================================================

fn factorial(n: u64) -> Trampoline<u64> {
    factorial_helper(n, 1)
}

fn factorial_helper(n: u64, accumulator: u64) -> Trampoline<u64> {
    if n <= 1 {
        Trampoline::done(accumulator)
    } else {
        Trampoline::suspend(move || factorial_helper(n - 1, n * accumulator))
    }
}

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(5, 120)]
#[case(10, 3_628_800)]
#[case(20, 2_432_902_008_176_640_000)]
fn trampoline_factorial(#[case] input: u64, #[case] expected: u64) {
    assert_eq!(factorial(input).run(), expected);
}

fn fibonacci(n: u64) -> Trampoline<u64> {
    if n < 2 {
        Trampoline::done(n)
    } else {
        Trampoline::suspend(move || fibonacci(n - 1))
            .flat_map(move |a| fibonacci(n - 2).map(move |b| a + b))
    }
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(10, 55)]
#[case(20, 6765)]
fn trampoline_fibonacci_with_binds_in_both_positions(#[case] input: u64, #[case] expected: u64) {
    assert_eq!(fibonacci(input).run(), expected);
}

fn is_even(n: u64) -> Trampoline<bool> {
    if n == 0 {
        Trampoline::done(true)
    } else {
        Trampoline::suspend(move || is_odd(n - 1))
    }
}

fn is_odd(n: u64) -> Trampoline<bool> {
    if n == 0 {
        Trampoline::done(false)
    } else {
        Trampoline::suspend(move || is_even(n - 1))
    }
}

#[rstest]
#[case(0, true)]
#[case(7, false)]
#[case(1_000_000, true)]
#[case(1_000_001, false)]
fn trampoline_mutual_recursion(#[case] input: u64, #[case] expected: bool) {
    assert_eq!(is_even(input).run(), expected);
}

// =============================================================================
// Stack Safety
// =============================================================================

/// Runs `work` on its own thread and fails if it does not finish in time.
fn finishes_within<T, F>(limit: Duration, work: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let _ = sender.send(work());
    });
    receiver
        .recv_timeout(limit)
        .expect("trampoline did not finish in time")
}

#[rstest]
fn trampoline_left_nested_binds_over_pure() {
    let mut trampoline = Trampoline::pure(0_u64);
    for _ in 0..1_000_000 {
        trampoline = trampoline.flat_map(|n| Trampoline::pure(n + 1));
    }
    assert_eq!(trampoline.run(), 1_000_000);
}

#[rstest]
#[case(3, false)]
#[case(3, true)]
#[case(4, false)]
#[case(5, true)]
#[case(7, false)]
#[case(10, true)]
fn trampoline_short_left_nested_chains_terminate(#[case] binds: u64, #[case] suspended: bool) {
    let value = finishes_within(Duration::from_secs(10), move || {
        let mut trampoline = Trampoline::pure(0_u64);
        for index in 0..binds {
            trampoline = if suspended && index % 2 == 0 {
                trampoline.flat_map(|n| Trampoline::suspend(move || Trampoline::pure(n + 1)))
            } else {
                trampoline.flat_map(|n| Trampoline::pure(n + 1))
            };
        }
        trampoline.run()
    });

    assert_eq!(value, binds);
}

#[rstest]
fn trampoline_unrun_chain_drops_without_overflow() {
    let mut trampoline = Trampoline::suspend(|| Trampoline::pure(0_u64));
    for _ in 0..1_000_000 {
        trampoline = trampoline.flat_map(|n| Trampoline::pure(n + 1));
    }
    drop(trampoline);
}

#[rstest]
fn trampoline_codensity_payload_can_be_moved_back_unchanged() {
    let trampoline = Trampoline::done(20).map(|x| x + 1).flat_map(|x| Trampoline::done(x * 2));
    let Trampoline::Codensity(payload) = trampoline else {
        panic!("a bind builds a codensity node");
    };
    let payload: Codensity<i32> = payload;

    assert_eq!(Trampoline::Codensity(payload.clone()).run(), 42);
    assert_eq!(Trampoline::Codensity(payload).run(), 42);
}

#[rstest]
fn trampoline_left_nested_maps() {
    let mut trampoline = Trampoline::suspend(|| Trampoline::pure(0_u64));
    for _ in 0..200_000 {
        trampoline = trampoline.map(|n| n + 1);
    }
    assert_eq!(trampoline.run(), 200_000);
}

#[rstest]
fn trampoline_right_nested_binds() {
    fn count_up(n: u64, limit: u64) -> Trampoline<u64> {
        if n == limit {
            Trampoline::pure(n)
        } else {
            Trampoline::pure(n).flat_map(move |m| count_up(m + 1, limit))
        }
    }

    assert_eq!(count_up(0, 200_000).run(), 200_000);
}

#[rstest]
fn trampoline_binds_nested_inside_continuations() {
    fn sum_to(n: u64) -> Trampoline<u64> {
        if n == 0 {
            Trampoline::pure(0)
        } else {
            Trampoline::suspend(move || sum_to(n - 1)).flat_map(move |sum| Trampoline::pure(sum + n))
        }
    }

    assert_eq!(sum_to(100_000).run(), 5_000_050_000);
}

// =============================================================================
// Sequencing
// =============================================================================

#[rstest]
fn trampoline_then_discards_first_result_but_runs_it() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let first_log = Rc::clone(&log);
    let second_log = Rc::clone(&log);

    let first = Trampoline::suspend(move || {
        first_log.borrow_mut().push("first");
        Trampoline::done(1)
    });
    let second = Trampoline::suspend(move || {
        second_log.borrow_mut().push("second");
        Trampoline::done("done")
    });

    assert_eq!(first.then(second).run(), "done");
    assert_eq!(*log.borrow(), ["first", "second"]);
}

#[rstest]
fn trampoline_and_then_is_alias_for_flat_map() {
    let result = Trampoline::done(2).and_then(|x| Trampoline::done(x * 21));
    assert_eq!(result.run(), 42);
}

// =============================================================================
// Resume
// =============================================================================

#[rstest]
fn trampoline_resume_pure_is_right() {
    assert_eq!(Trampoline::done(42).resume().right(), Some(42));
}

#[rstest]
fn trampoline_resume_suspend_is_left_without_forcing() {
    let forced = Rc::new(Cell::new(false));
    let flag = Rc::clone(&forced);
    let trampoline = Trampoline::suspend(move || {
        flag.set(true);
        Trampoline::done(42)
    });

    let step = trampoline.resume();
    assert!(step.is_left());
    assert!(!forced.get());
}

#[rstest]
fn trampoline_resume_drives_to_completion_step_by_step() {
    let mut current = factorial(5);
    let mut steps = 0;

    let result = loop {
        match current.resume() {
            Either::Left(next) => {
                steps += 1;
                current = next.run();
            }
            Either::Right(value) => break value,
        }
    };

    assert_eq!(result, 120);
    assert_eq!(steps, 4);
}

// =============================================================================
// Re-running
// =============================================================================

#[rstest]
fn trampoline_clone_reruns_every_thunk() {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let trampoline = Trampoline::suspend(move || {
        counter.set(counter.get() + 1);
        Trampoline::done(10)
    })
    .flat_map(|x| Trampoline::done(x + 1));

    assert_eq!(trampoline.clone().run(), 11);
    assert_eq!(trampoline.run(), 11);
    assert_eq!(runs.get(), 2);
}

#[rstest]
#[should_panic(expected = "boom")]
fn trampoline_panics_in_thunks_propagate() {
    let trampoline: Trampoline<i32> = Trampoline::suspend(|| panic!("boom"));
    let _ = trampoline.map(|x| x + 1).run();
}
