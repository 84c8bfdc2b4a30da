// Host-side tests for the cancellable launch sequence.

use hollow_core::launch::{CancellationToken, LaunchSequence, LaunchStep};

#[test]
fn each_step_fires_once() {
    let seq = LaunchSequence::new(CancellationToken::new());
    assert!(seq.fire(LaunchStep::Fade));
    assert!(!seq.fire(LaunchStep::Fade));
    assert!(seq.fire(LaunchStep::Start));
    assert!(!seq.fire(LaunchStep::Start));
}

#[test]
fn cancelled_steps_never_fire() {
    let token = CancellationToken::new();
    let seq = LaunchSequence::new(token.clone());
    assert!(seq.fire(LaunchStep::Fade));
    token.cancel();
    assert!(seq.token().is_cancelled());
    assert!(!seq.fire(LaunchStep::Start));
}

#[test]
fn cancel_through_the_sequence_reaches_clones() {
    let token = CancellationToken::new();
    let seq = LaunchSequence::new(token.clone());
    seq.cancel();
    assert!(token.is_cancelled());
    assert!(!seq.fire(LaunchStep::Fade));
    assert!(!seq.fire(LaunchStep::Start));
}
