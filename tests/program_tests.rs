//! Tests for free programs: construction, sequencing laws and stack safety.
//!
//! Programs are compared by interpreting them against identical scripted
//! terminals and comparing what was written, what remained unread, and the
//! outcome.

#![cfg(feature = "console")]

use pureio::control::Either;
use pureio::effect::{exit, put_str_ln, read_line, Outcome, Program, PureIO, TerminalOperation};
use pureio::interpreter::{ConsoleInterpreter, ScriptedTerminal};
use proptest::prelude::*;
use rstest::rstest;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn run_scripted<A: Clone + 'static>(
    program: PureIO<A>,
    input: &[&str],
) -> (Outcome<A>, ScriptedTerminal) {
    let mut interpreter = ConsoleInterpreter::new(ScriptedTerminal::new(input.iter().copied()));
    let outcome = program
        .interpret(&mut interpreter)
        .expect("scripted terminal has enough input");
    (outcome, interpreter.into_inner())
}

fn echo_with_prefix(prefix: String) -> PureIO<usize> {
    read_line().flat_map(move |line| {
        let length = line.len();
        put_str_ln(format!("{prefix}{line}")).map(move |()| length)
    })
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn program_pure_resumes_to_value() {
    assert!(matches!(PureIO::pure(3).resume(), Either::Right(3)));
}

#[rstest]
fn program_construction_performs_nothing() {
    let built = Rc::new(Cell::new(0));
    let counter = Rc::clone(&built);
    let program = PureIO::pure(()).flat_map(move |()| {
        counter.set(counter.get() + 1);
        put_str_ln("side effect")
    });

    assert_eq!(built.get(), 0);
    let (_, terminal) = run_scripted(program, &[]);
    assert_eq!(built.get(), 1);
    assert_eq!(terminal.output(), ["side effect"]);
}

#[rstest]
fn program_lift_yields_node_result() {
    let program = TerminalOperation::read_line(|line: String| line.len()).lift();
    let (outcome, _) = run_scripted(program, &["four"]);
    assert_eq!(outcome, Outcome::Completed(4));
}

#[rstest]
fn program_defer_builds_recursive_loops_lazily() {
    fn count_down(n: u32) -> PureIO<()> {
        if n == 0 {
            put_str_ln("liftoff")
        } else {
            put_str_ln(n.to_string()).flat_map(move |()| PureIO::defer(move || count_down(n - 1)))
        }
    }

    let (outcome, terminal) = run_scripted(count_down(3), &[]);
    assert_eq!(outcome, Outcome::Completed(()));
    assert_eq!(terminal.output(), ["3", "2", "1", "liftoff"]);
}

// =============================================================================
// Sequencing
// =============================================================================

#[rstest]
fn program_effects_run_in_sequence_order() {
    let program = put_str_ln("one")
        .then(put_str_ln("two"))
        .and_then(|()| put_str_ln("three"));

    let (_, terminal) = run_scripted(program, &[]);
    assert_eq!(terminal.output(), ["one", "two", "three"]);
}

#[rstest]
fn program_exit_stops_the_rest() {
    let program = put_str_ln("before")
        .then(exit(3))
        .then(put_str_ln("after"));

    let (outcome, terminal) = run_scripted(program, &[]);
    assert_eq!(outcome, Outcome::Terminated(3));
    assert_eq!(terminal.exit_code(), Some(3));
    assert_eq!(terminal.output(), ["before"]);
}

#[rstest]
fn program_clone_is_interpreted_independently() {
    let program = echo_with_prefix("> ".to_string());
    let copy = program.clone();

    let (first, first_terminal) = run_scripted(program, &["abc"]);
    let (second, second_terminal) = run_scripted(copy, &["hello"]);

    assert_eq!(first, Outcome::Completed(3));
    assert_eq!(first_terminal.output(), ["> abc"]);
    assert_eq!(second, Outcome::Completed(5));
    assert_eq!(second_terminal.output(), ["> hello"]);
}

// =============================================================================
// Stack Safety
// =============================================================================

#[rstest]
fn program_left_nested_pure_binds() {
    let mut program = PureIO::pure(0_u64);
    for _ in 0..200_000 {
        program = program.flat_map(|n| Program::pure(n + 1));
    }
    assert!(matches!(program.resume(), Either::Right(200_000)));
}

#[rstest]
fn program_left_nested_binds_around_effects() {
    let mut program = put_str_ln("start").map(|()| 0_u64);
    for _ in 0..100_000 {
        program = program.flat_map(|n| {
            if n % 25_000 == 0 {
                put_str_ln(format!("at {n}")).map(move |()| n + 1)
            } else {
                Program::pure(n + 1)
            }
        });
    }

    let (outcome, terminal) = run_scripted(program, &[]);
    assert_eq!(outcome, Outcome::Completed(100_000));
    assert_eq!(terminal.output(), ["start", "at 0", "at 25000", "at 50000", "at 75000"]);
}

#[rstest]
fn program_left_nested_binds_over_a_pending_read() {
    let mut program = read_line().map(|line| line.len());
    for _ in 0..100_000 {
        program = program.flat_map(|n| Program::pure(n + 1));
    }

    let (outcome, terminal) = run_scripted(program, &["abc"]);
    assert_eq!(outcome, Outcome::Completed(100_003));
    assert_eq!(terminal.remaining_input(), 0);
}

#[rstest]
fn program_read_node_is_mapped_once_when_resumed() {
    let mut program = read_line();
    for _ in 0..100_000 {
        program = program.flat_map(Program::pure);
    }

    let Either::Left(TerminalOperation::ReadLine { resume }) = program.resume() else {
        panic!("the first node is the read");
    };
    let rest = resume("x".to_string());
    let Either::Right(line) = rest.resume() else {
        panic!("no effect follows the read");
    };
    assert_eq!(line, "x");
}

#[rstest]
#[case(3)]
#[case(4)]
#[case(6)]
#[case(10)]
fn program_short_chains_terminate(#[case] binds: usize) {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut program = put_str_ln("start").map(|()| 0_usize);
        for _ in 0..binds {
            program = program.flat_map(|n| put_str_ln(n.to_string()).map(move |()| n + 1));
        }
        let (outcome, terminal) = run_scripted(program, &[]);
        let _ = sender.send((outcome.completed(), terminal.output().len()));
    });

    let (value, written) = receiver
        .recv_timeout(Duration::from_secs(10))
        .expect("program did not finish in time");
    assert_eq!(value, Some(binds));
    assert_eq!(written, binds + 1);
}

#[rstest]
fn program_long_running_loop() {
    fn echo(remaining: u32, echoed: u32) -> PureIO<u32> {
        if remaining == 0 {
            PureIO::pure(echoed)
        } else {
            read_line()
                .flat_map(|line| put_str_ln(line))
                .flat_map(move |()| echo(remaining - 1, echoed + 1))
        }
    }

    let input = vec!["x"; 10_000];
    let (outcome, terminal) = run_scripted(echo(10_000, 0), &input);
    assert_eq!(outcome, Outcome::Completed(10_000));
    assert_eq!(terminal.output().len(), 10_000);
    assert_eq!(terminal.remaining_input(), 0);
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Left identity: pure(a).flat_map(f) behaves as f(a)
    #[test]
    fn prop_program_left_identity(prefix in "[a-z]{0,4}", line in "[a-z]{0,8}") {
        let input = [line.as_str()];
        let left = PureIO::pure(prefix.clone()).flat_map(echo_with_prefix);
        let right = echo_with_prefix(prefix);
        prop_assert_eq!(run_scripted(left, &input), run_scripted(right, &input));
    }

    /// Right identity: m.flat_map(pure) behaves as m
    #[test]
    fn prop_program_right_identity(prefix in "[a-z]{0,4}", line in "[a-z]{0,8}") {
        let input = [line.as_str()];
        let program = echo_with_prefix(prefix);
        prop_assert_eq!(
            run_scripted(program.clone().flat_map(Program::pure), &input),
            run_scripted(program, &input)
        );
    }

    /// Associativity: m.flat_map(f).flat_map(g) behaves as m.flat_map(|x| f(x).flat_map(g))
    #[test]
    fn prop_program_associativity(lines in prop::collection::vec("[a-z]{0,8}", 3)) {
        let input: Vec<&str> = lines.iter().map(String::as_str).collect();
        let function = |length: usize| echo_with_prefix(format!("{length}:"));
        let function2 = |length: usize| put_str_ln(length.to_string()).then(echo_with_prefix(String::new()));

        let left = read_line().map(|line| line.len()).flat_map(function).flat_map(function2);
        let right = read_line()
            .map(|line| line.len())
            .flat_map(move |x| function(x).flat_map(function2));
        prop_assert_eq!(run_scripted(left, &input), run_scripted(right, &input));
    }
}
