#![forbid(unsafe_code)]

//! Property tests for the shared panel registry.
//!
//! Random interleavings of register/unregister calls from a small id pool
//! must keep the open order duplicate-free, keep strip slots dense, and keep
//! `backdrop_active` equal to "some registered panel needs a backdrop".

use fpanel_widgets::{PanelId, PanelRegistry, PanelStatus};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Register(usize, PanelStatus),
    Unregister(usize),
}

const IDS: [&str; 4] = ["a", "b", "c", "d"];

fn status() -> impl Strategy<Value = PanelStatus> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(open, rolled, backdrop)| PanelStatus::new(open, rolled, backdrop))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..IDS.len(), status()).prop_map(|(i, s)| Op::Register(i, s)),
        1 => (0..IDS.len()).prop_map(Op::Unregister),
    ]
}

proptest! {
    #[test]
    fn derived_state_matches_statuses(ops in prop::collection::vec(op(), 0..40)) {
        let mut reg = PanelRegistry::new();
        for op in ops {
            match op {
                Op::Register(i, s) => {
                    reg.register(&PanelId::from(IDS[i]), s);
                }
                Op::Unregister(i) => {
                    reg.unregister(IDS[i]);
                }
            }

            let order = reg.open_panel_ids();
            for (slot, id) in order.iter().enumerate() {
                prop_assert_eq!(reg.strip_index(id.as_str()), slot);
                prop_assert!(reg.status(id.as_str()).is_some_and(|s| s.open));
            }

            let expected_open = IDS
                .iter()
                .filter(|id| reg.status(id).is_some_and(|s| s.open))
                .count();
            prop_assert_eq!(order.len(), expected_open);

            let needs = IDS
                .iter()
                .any(|id| reg.status(id).is_some_and(PanelStatus::needs_backdrop));
            prop_assert_eq!(reg.backdrop_active(), needs);
        }
    }

    #[test]
    fn repeated_register_is_idempotent(s in status(), repeats in 1usize..5) {
        let mut reg = PanelRegistry::new();
        let id = PanelId::from("a");
        reg.register(&id, s);
        let revision = reg.revision();
        for _ in 0..repeats {
            prop_assert!(!reg.register(&id, s).any());
        }
        prop_assert_eq!(reg.revision(), revision);
    }
}
