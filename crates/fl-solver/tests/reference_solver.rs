use fl_solver::{
    FlightSolver, IntegratorType, KinematicLibrary, KinematicParams, Property, PropertyResultExt,
    SolverLibrary, read, write,
};

fn boxed_solver(params: KinematicParams) -> Box<dyn FlightSolver> {
    let library = KinematicLibrary::new("/opt/solver").with_params(params);
    let mut solver = library.create_solver().ok().unwrap();
    assert!(solver.load_model("c172p"));
    write(solver.as_mut(), Property::IcAltitudeFt, 10_000.0).unwrap();
    write(solver.as_mut(), Property::IcUFps, 300.0).unwrap();
    write(solver.as_mut(), Property::EngineSetRunning, 1.0).unwrap();
    assert!(solver.run_ic().unwrap());
    solver
}

#[test]
fn every_state_property_is_readable_after_ic() {
    let solver = boxed_solver(KinematicParams::default());
    let outputs = Property::ALL
        .iter()
        .filter(|p| !p.is_initial_condition() && !p.is_control_channel())
        .filter(|p| **p != Property::EngineSetRunning);
    for &property in outputs {
        let v = read(solver.as_ref(), property).unwrap_or_else(|e| panic!("{}: {}", property, e));
        assert!(v.is_finite(), "{} = {}", property, v);
    }
}

#[test]
fn unsupported_channels_default_through_combinator() {
    let mut solver = boxed_solver(KinematicParams::default());
    let mut absorbed = 0;
    for property in [Property::FlapCmd, Property::BrakeCmd, Property::ThrottleCmd] {
        write(solver.as_mut(), property, 0.5)
            .or_default_with((), |_| absorbed += 1)
            .unwrap();
    }
    assert_eq!(absorbed, 2);
}

#[test]
fn integrators_agree_on_a_gentle_climb() {
    let mut rk4 = boxed_solver(KinematicParams::default());
    let mut euler = boxed_solver(KinematicParams {
        integrator: IntegratorType::ForwardEuler,
        ..KinematicParams::default()
    });
    for solver in [&mut rk4, &mut euler] {
        write(solver.as_mut(), Property::ThrottleCmd, 0.8).unwrap();
        write(solver.as_mut(), Property::ElevatorCmd, 0.1).unwrap();
        for _ in 0..120 {
            solver.step().unwrap();
        }
    }
    let h_rk4 = read(rk4.as_ref(), Property::AltitudeFt).unwrap();
    let h_euler = read(euler.as_ref(), Property::AltitudeFt).unwrap();
    assert!(h_rk4 > 10_000.0);
    assert!((h_rk4 - h_euler).abs() < 5.0, "rk4 {} euler {}", h_rk4, h_euler);
}
