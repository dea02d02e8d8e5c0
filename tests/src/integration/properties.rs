//! # Registry Properties
//!
//! Random sequences of register and remove calls checked against a plain
//! list model:
//!
//! 1. `contains_observer` is true exactly when the observer has a binding left.
//! 2. A bare post runs exactly the bare bindings for its name, in registration order.
//! 3. A payload post runs exactly the typed bindings for its name, in registration order.
//! 4. Removal counts match the model.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Journal, Recorder};
    use notification_center::NotificationCenter;
    use proptest::prelude::*;
    use std::sync::Arc;

    const LABELS: [&str; 4] = ["r0", "r1", "r2", "r3"];
    const NAMES: [&str; 3] = ["Tick", "Resize", "Close"];

    #[derive(Clone, Debug)]
    enum Op {
        Register { observer: usize, name: usize, typed: bool },
        Remove { observer: usize },
        RemoveForName { observer: usize, name: usize },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..LABELS.len(), 0..NAMES.len(), any::<bool>())
                .prop_map(|(observer, name, typed)| Op::Register { observer, name, typed }),
            1 => (0..LABELS.len()).prop_map(|observer| Op::Remove { observer }),
            1 => (0..LABELS.len(), 0..NAMES.len())
                .prop_map(|(observer, name)| Op::RemoveForName { observer, name }),
        ]
    }

    /// (observer, name, typed) in registration order.
    type Model = Vec<(usize, usize, bool)>;

    fn apply(
        center: &NotificationCenter,
        recorders: &[Arc<Recorder>],
        model: &mut Model,
        op: &Op,
    ) -> Result<(), TestCaseError> {
        match *op {
            Op::Register { observer, name, typed } => {
                let recorder = &recorders[observer];
                if typed {
                    center.register_value(
                        recorder.identity(),
                        NAMES[name],
                        recorder,
                        Recorder::on_resize,
                    );
                } else {
                    center.register_bare(
                        recorder.identity(),
                        NAMES[name],
                        recorder,
                        Recorder::on_tick,
                    );
                }
                model.push((observer, name, typed));
            }
            Op::Remove { observer } => {
                let expected = model.iter().filter(|entry| entry.0 == observer).count();
                model.retain(|entry| entry.0 != observer);
                let removed = center.remove_observer(recorders[observer].identity());
                prop_assert_eq!(removed, expected);
            }
            Op::RemoveForName { observer, name } => {
                let expected = model
                    .iter()
                    .filter(|entry| entry.0 == observer && entry.1 == name)
                    .count();
                model.retain(|entry| !(entry.0 == observer && entry.1 == name));
                let removed =
                    center.remove_observer_for_name(recorders[observer].identity(), NAMES[name]);
                prop_assert_eq!(removed, expected);
            }
        }
        Ok(())
    }

    fn setup() -> (NotificationCenter, Journal, Vec<Arc<Recorder>>) {
        let journal = Journal::new();
        let recorders = LABELS
            .into_iter()
            .map(|label| Recorder::new(label, &journal))
            .collect();
        (NotificationCenter::new(), journal, recorders)
    }

    proptest! {
        #[test]
        fn contains_observer_tracks_model(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let (center, _journal, recorders) = setup();
            let mut model = Model::new();

            for op in &ops {
                apply(&center, &recorders, &mut model, op)?;
                for (index, recorder) in recorders.iter().enumerate() {
                    let expected = model.iter().any(|entry| entry.0 == index);
                    prop_assert_eq!(center.contains_observer(recorder.identity()), expected);
                }
                prop_assert_eq!(center.binding_count(), model.len());
            }
            center.teardown();
        }

        #[test]
        fn bare_post_runs_bare_bindings_in_order(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let (center, journal, recorders) = setup();
            let mut model = Model::new();
            for op in &ops {
                apply(&center, &recorders, &mut model, op)?;
            }

            for (name_index, name) in NAMES.iter().enumerate() {
                journal.clear();
                let expected: Vec<String> = model
                    .iter()
                    .filter(|entry| entry.1 == name_index && !entry.2)
                    .map(|entry| format!("{}:tick", LABELS[entry.0]))
                    .collect();

                prop_assert_eq!(center.post_notification(name), expected.len());
                prop_assert_eq!(journal.entries(), expected);
            }
            center.teardown();
        }

        #[test]
        fn payload_post_runs_typed_bindings_in_order(
            ops in proptest::collection::vec(op_strategy(), 0..40),
            size in any::<u32>(),
        ) {
            let (center, journal, recorders) = setup();
            let mut model = Model::new();
            for op in &ops {
                apply(&center, &recorders, &mut model, op)?;
            }

            for (name_index, name) in NAMES.iter().enumerate() {
                journal.clear();
                let expected: Vec<String> = model
                    .iter()
                    .filter(|entry| entry.1 == name_index && entry.2)
                    .map(|entry| format!("{}:resize:{size}", LABELS[entry.0]))
                    .collect();

                prop_assert_eq!(
                    center.post_notification_with_object(name, size),
                    Ok(expected.len())
                );
                prop_assert_eq!(journal.entries(), expected);
            }
            center.teardown();
        }
    }
}
