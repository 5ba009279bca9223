use probe_core::{
    update, InstallStrategy, LifecycleMachine, LifecycleMsg, LifecyclePhase,
};

#[test]
fn terminal_phases_ignore_messages() {
    let machine = LifecycleMachine::new(InstallStrategy::FreshInstall);
    let (machine, _) = update(machine, LifecycleMsg::PageLoaded);
    let (machine, _) = update(machine, LifecycleMsg::CapabilityChecked { available: true });
    let (machine, _) = update(machine, LifecycleMsg::WorkerRegistered(Ok(())));
    assert_eq!(machine.phase(), LifecyclePhase::Active);

    let (next, effects) = update(
        machine.clone(),
        LifecycleMsg::WorkerRegistered(Err("late".to_string())),
    );

    assert_eq!(machine, next);
    assert!(effects.is_empty());
}

#[test]
fn out_of_phase_messages_are_ignored() {
    let machine = LifecycleMachine::new(InstallStrategy::FreshInstall);
    let (machine, _) = update(machine, LifecycleMsg::PageLoaded);

    // A batch result cannot arrive before the capability check resolves.
    let (next, effects) = update(
        machine.clone(),
        LifecycleMsg::UnregisterBatchFinished(Ok(())),
    );

    assert_eq!(machine, next);
    assert!(effects.is_empty());
    assert_eq!(next.phase(), LifecyclePhase::Unregistered);
}
