mod common;

use common::{StubLibrary, StubScript};
use fl_adapter::{
    AdapterConfig, AdapterState, FdmAdapter, HostControlLevels, StateField, StateKind, Transition,
};
use fl_core::Vec3;
use fl_solver::Property;

const DT: f64 = 1.0 / 60.0;

fn cruise() -> HostControlLevels {
    HostControlLevels::new(0.8, 0.0, 0.0, 0.0)
}

fn all_models() -> StubScript {
    StubScript::loading(["c172p", "c172", "f16", "737", "x15"])
}

#[test]
fn unknown_alias_resolves_to_default_model() {
    let library = StubLibrary::new(all_models());
    let adapter = FdmAdapter::new(AdapterConfig::new("xyz", true), &library);
    assert!(adapter.is_enabled());
    assert!(adapter.is_initialized());
    assert_eq!(adapter.resolved_model().unwrap().canonical_id(), "c172p");
}

#[test]
fn failing_load_disables_permanently() {
    let library = StubLibrary::new(StubScript::loading(Vec::<String>::new()));
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);

    assert_eq!(adapter.state().kind(), StateKind::Disabled);
    assert!(!adapter.is_enabled());
    let reason = adapter.state().reason().unwrap();
    assert!(reason.contains("No aircraft model available"), "{}", reason);

    for _ in 0..60 {
        assert!(adapter.update(DT, &cruise()).is_none());
    }
    // No solver work after a failed initialization
    assert_eq!(library.counters.steps.get(), 0);
    // Primary plus every fallback other than the primary
    assert_eq!(library.counters.load_attempts.get(), 4);
}

#[test]
fn rejected_initial_conditions_disable() {
    let script = StubScript {
        reject_ic: true,
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    assert!(!adapter.is_enabled());
    assert!(adapter.resolved_model().is_none());
    assert_eq!(
        adapter.transitions(),
        &[
            Transition {
                from: StateKind::Disabled,
                to: StateKind::Uninitialized
            },
            Transition {
                from: StateKind::Uninitialized,
                to: StateKind::Disabled
            },
        ]
    );
}

#[test]
fn sixty_stable_frames_stay_ready() {
    let library = StubLibrary::new(all_models());
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    assert_eq!(adapter.state(), &AdapterState::Ready);

    let mut last_altitude = None;
    for frame in 0..60 {
        let snap = adapter
            .update(DT, &cruise())
            .unwrap_or_else(|| panic!("frame {} returned None", frame));
        assert!(snap.altitude_meters.is_finite());
        if let Some(prev) = last_altitude {
            // Climbing slowly: never backwards, never jumping more than a meter
            let delta: f64 = snap.altitude_meters - prev;
            assert!((0.0..1.0).contains(&delta), "frame {}: delta {}", frame, delta);
        }
        last_altitude = Some(snap.altitude_meters);
    }

    assert_eq!(adapter.state(), &AdapterState::Ready);
    assert_eq!(adapter.transitions().len(), 2);
    assert_eq!(adapter.diagnostics().frames_stepped, 60);
    assert_eq!(library.counters.steps.get(), 60);
}

#[test]
fn step_failure_degrades_exactly_once() {
    let script = StubScript {
        fail_step_at: Some(10),
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);

    for call in 1..=60 {
        let result = adapter.update(DT, &cruise());
        if call < 10 {
            assert!(result.is_some(), "call {} should succeed", call);
        } else {
            assert!(result.is_none(), "call {} should fall back", call);
        }
    }

    let degradations: Vec<_> = adapter
        .transitions()
        .iter()
        .filter(|t| t.to == StateKind::Degraded)
        .collect();
    assert_eq!(
        degradations,
        vec![&Transition {
            from: StateKind::Ready,
            to: StateKind::Degraded
        }]
    );
    assert!(adapter.state().reason().unwrap().contains("step 10"));
    // Degraded adapters never touch the solver again
    assert_eq!(library.counters.steps.get(), 10);
    assert!(adapter.is_initialized());
}

#[test]
fn nan_property_is_zeroed_in_snapshot() {
    let healthy = StubLibrary::new(all_models());
    let mut reference = FdmAdapter::new(AdapterConfig::new("f16", true), &healthy);
    let expected = reference.update(DT, &cruise()).unwrap();

    let script = StubScript {
        nan_property: Some(Property::AlphaDeg),
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    let snap = adapter.update(DT, &cruise()).unwrap();

    assert_eq!(snap.alpha_deg, 0.0);
    assert_eq!(snap.altitude_meters, expected.altitude_meters);
    assert_eq!(snap.pitch_deg, expected.pitch_deg);
    assert_eq!(snap.body_velocity, expected.body_velocity);
    assert_eq!(snap.mach, expected.mach);
    assert_eq!(adapter.diagnostics().non_finite_count(StateField::AlphaDeg), 1);
    assert_eq!(adapter.state(), &AdapterState::Ready);
}

#[test]
fn missing_properties_default_without_degrading() {
    let script = StubScript {
        missing: vec![Property::BetaDeg, Property::Mach, Property::FlapCmd],
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);

    let snap = adapter.update(DT, &cruise().with_flaps(0.5)).unwrap();
    assert_eq!(snap.beta_deg, 0.0);
    assert_eq!(snap.mach, 0.0);
    assert_eq!(adapter.diagnostics().property_read_failures, 2);
    assert_eq!(adapter.diagnostics().property_write_failures, 1);
    assert_eq!(adapter.state(), &AdapterState::Ready);
}

#[test]
fn fatal_read_degrades() {
    let script = StubScript {
        fatal_read: Some(Property::UFps),
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    assert_eq!(adapter.state(), &AdapterState::Ready);

    assert!(adapter.update(DT, &cruise()).is_none());
    assert_eq!(adapter.state().kind(), StateKind::Degraded);
    assert!(adapter.update(DT, &cruise()).is_none());
}

#[test]
fn missing_engine_property_is_tolerated() {
    let script = StubScript {
        missing: vec![Property::EngineSetRunning],
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    assert_eq!(adapter.state(), &AdapterState::Ready);
    assert_eq!(adapter.diagnostics().property_write_failures, 1);
}

#[test]
fn rejected_initial_condition_write_disables() {
    let script = StubScript {
        missing: vec![Property::IcAltitudeFt],
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    assert!(!adapter.is_enabled());
    assert!(adapter.state().reason().unwrap().contains("ic/h-sl-ft"));
}

#[test]
fn rejected_resync_writes_are_logged_and_counted() {
    let script = StubScript {
        lock_ic_after_run: true,
        ..all_models()
    };
    let library = StubLibrary::new(script);
    let mut adapter = FdmAdapter::new(AdapterConfig::new("f16", true), &library);
    assert_eq!(adapter.state(), &AdapterState::Ready);
    let before = adapter.diagnostics().property_write_failures;

    adapter.set_position(&Vec3::new(100.0, 2000.0, -50.0));
    adapter.set_velocity(&Vec3::new(0.0, 0.0, 120.0));
    adapter.set_orientation(5.0, -2.0, 270.0);

    assert_eq!(adapter.state(), &AdapterState::Ready);
    assert_eq!(adapter.diagnostics().property_write_failures - before, 9);
    assert_eq!(adapter.transitions().len(), 2);
    assert!(adapter.update(DT, &cruise()).is_some());
}
