//! Golden problems from `test-fixtures/balancing/`.

use popsim_balancer::ListBalancer;
use popsim_core::traits::IBalancer;
use test_fixtures::{all_balance_fixtures, load_balance_fixture};

#[test]
fn all_golden_problems_match_expected_outcomes() {
    let fixtures = all_balance_fixtures();
    assert!(fixtures.len() >= 4, "expected golden fixtures, found {}", fixtures.len());

    let balancer = ListBalancer::default();
    for fixture in fixtures {
        let outcome = balancer
            .balance(&fixture.problem(), &fixture.options)
            .unwrap_or_else(|e| panic!("{}: {e}", fixture.name));
        let expected = &fixture.expected;

        assert_eq!(outcome.status.converged, expected.converged, "{}", fixture.name);
        assert!(
            outcome.status.iterations_run <= expected.max_iterations_run,
            "{}: ran {} sweeps",
            fixture.name,
            outcome.status.iterations_run
        );
        for (got, want) in outcome.final_weights().iter().zip(&expected.final_weights) {
            assert!(
                (got - want).abs() <= expected.tolerance,
                "{}: weight {got} != {want}",
                fixture.name
            );
        }
        if let Some(factors) = &expected.relaxation_factors {
            for (control, want) in outcome.controls.iter().zip(factors) {
                assert!(
                    (control.relaxation_factor - want).abs() <= expected.tolerance,
                    "{}: relaxation {} != {want}",
                    fixture.name,
                    control.relaxation_factor
                );
            }
        }
    }
}

#[test]
fn fixture_control_names_flow_into_summary() {
    let fixture = load_balance_fixture("master_two_controls.json");
    let outcome = ListBalancer::default()
        .balance(&fixture.problem(), &fixture.options)
        .unwrap();
    assert_eq!(outcome.controls[0].name, "persons");
    assert_eq!(outcome.controls[1].name, "households");
}
