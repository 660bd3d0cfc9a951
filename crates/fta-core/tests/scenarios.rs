//! Reference topology integration tests.
//!
//! These tests run the complete pipeline from topology declaration through
//! the reachability report.

use std::collections::HashSet;

use fta_core::{
    canonical_key, possible_next_channels, ActionFactory, Channel, ChannelState, Explorer, Origin,
    Topology, TopologyBuilder, Transition,
};

/// Inhibited self-loop.
///
/// Channels:
/// - 0: AxA, bound, the gate's own feedback wire
/// - 1: AO, unbound output
///
/// Action A: inhibited by AxA, drives AxA and AO.
fn self_loop() -> Topology {
    let mut builder = TopologyBuilder::new();
    let axa = builder.channel(Channel::bound()).unwrap();
    let ao = builder.channel(Channel::unbound_output()).unwrap();
    builder.action(ActionFactory::new([], [axa], [axa, ao])).unwrap();
    builder.finish().expect("topology should be valid")
}

/// Three-stage pipeline.
///
/// Channels:
/// - 0: ID, unbound input
/// - 1: DL, 2: DR, splitter outputs
/// - 3: RxL, 4: LxR, cross-inhibition wires
/// - 5: LO, 6: RP, unbound outputs
///
/// Actions:
/// - D: ID → DL, DR
/// - L: DL, inhibited by RxL → LxR, LO
/// - R: DR, inhibited by LxR → RxL, RP
fn pipeline() -> Topology {
    Topology::new(
        [
            Channel::unbound_input(),
            Channel::bound(),
            Channel::bound(),
            Channel::bound(),
            Channel::bound(),
            Channel::unbound_output(),
            Channel::unbound_output(),
        ],
        [
            ActionFactory::new([0], [], [1, 2]),
            ActionFactory::new([1], [3], [4, 5]),
            ActionFactory::new([2], [4], [3, 6]),
        ],
    )
    .expect("topology should be valid")
}

#[test]
fn test_self_loop_report() {
    let analysis = self_loop().analyze().unwrap();

    assert_eq!(analysis.state_count(), 6);
    assert_eq!(
        analysis.log(),
        "\
<init> --(FF- / [1])--> CC-
CC- --(CR- / [0])--> CR-
CR- --(CF- / [0])--> CF-
CF- --(RF- / [0])--> RF-
CR- --(RR- / [0])--> RR-
RR- --(RF- / [0])--> RF-
CR- --(RF- / [0])--> RF-
CC- --(RC- / [0])--> RC-
RC- --(RR- / [0])--> RR-
CC- --(RR- / [0])--> RR-
"
    );
}

#[test]
fn test_self_loop_inhibited_with_zero_fires() {
    let analysis = self_loop().analyze().unwrap();

    // With AxA Ready the gate is both inhibited and blocked on its own
    // output, so the sweep fires nothing and AxA stays Ready.
    let inhibited = analysis
        .transitions
        .iter()
        .find(|t| t.total_fires() == 0 && t.transient.as_str().starts_with('R'))
        .expect("an inhibited sweep should be reported");
    assert!(inhibited.settled.as_str().starts_with('R'));
}

#[test]
fn test_pipeline_state_count() {
    let analysis = pipeline().analyze().unwrap();

    assert_eq!(analysis.state_count(), 1567);
    assert_eq!(analysis.transitions.len(), 25357);

    let first: Vec<String> = analysis.transitions[..8]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        first,
        vec![
            "<init> --(F+FFFFF-F- / [0, 0, 0])--> F+FFFFF-F-",
            "F+FFFFF-F- --(C+FFFFF-F- / [0, 0, 0])--> C+FFFFF-F-",
            "C+FFFFF-F- --(R+FFFFF-F- / [1, 0, 0])--> F+CCFFF-F-",
            "F+CCFFF-F- --(F+CRFFF-F- / [0, 0, 1])--> F+CFCFF-C-",
            "F+CFCFF-C- --(F+CFCFF-R- / [0, 0, 0])--> F+CFCFF-R-",
            "F+CFCFF-R- --(F+CFCFF-F- / [0, 0, 0])--> F+CFCFF-F-",
            "F+CFCFF-F- --(F+CFRFF-F- / [0, 0, 0])--> F+CFRFF-F-",
            "F+CFRFF-F- --(F+RFRFF-F- / [0, 1, 0])--> F+FFFCC-F-",
        ]
    );
}

#[test]
fn test_pipeline_is_deterministic() {
    let topology = pipeline();
    let first = topology.analyze().unwrap();
    let second = topology.analyze().unwrap();

    assert_eq!(first.states, second.states);
    assert_eq!(first.log(), second.log());
}

#[test]
fn test_explorer_matches_report() {
    let topology = pipeline();
    let analysis = topology.analyze().unwrap();
    let known: HashSet<_> = analysis.states.iter().cloned().collect();
    assert_eq!(known.len(), analysis.state_count());

    for transition in &analysis.transitions {
        assert!(known.contains(&transition.settled));
    }

    let mut explorer = Explorer::new(&topology);
    explorer.run(&mut ()).unwrap();
    assert_eq!(explorer.known_states().len(), 1567);
}

#[test]
fn test_sweep_idempotence_over_perturbations() {
    let topology = pipeline();
    let mut channels = topology.channels().to_vec();
    channels[0] = channels[0].with_state(ChannelState::Ready);

    topology.sweep(&mut channels).unwrap();
    let settled = canonical_key(&channels);
    assert_eq!(settled, "F+CCFFF-F-");

    let counts = topology.sweep(&mut channels).unwrap();
    assert_eq!(counts.iter().sum::<u32>(), 0);
    assert_eq!(canonical_key(&channels), settled);

    // The free input and the two charging splitter outputs are unstable.
    let successors: Vec<_> = possible_next_channels(&channels).collect();
    assert_eq!(successors.len(), 8);
    for next in &successors {
        for (i, (before, after)) in channels.iter().zip(next).enumerate() {
            if before != after {
                assert!(i <= 2, "channel {i} changed");
            }
        }
    }
}

#[test]
fn test_explore_from_custom_seed() {
    let topology = self_loop();
    let mut transitions: Vec<Transition> = Vec::new();
    let seed = vec![
        Channel::bound().with_state(ChannelState::Ready),
        Channel::unbound_output(),
    ];

    let mut explorer = Explorer::new(&topology);
    explorer
        .explore(Origin::Init, seed, &mut transitions)
        .unwrap();

    assert_eq!(
        transitions[0].to_string(),
        "<init> --(RF- / [0])--> RF-"
    );
    assert_eq!(transitions.len(), 1);
    assert!(explorer.known_states().contains("RF-"));
}
