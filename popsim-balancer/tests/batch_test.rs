use ndarray::array;
use popsim_balancer::{balance_all, ListBalancer};
use popsim_core::errors::BalanceError;
use popsim_core::models::{BalanceOptions, BalanceProblem};
use popsim_core::traits::IBalancer;

fn group(constraint: f64) -> (BalanceProblem, BalanceOptions) {
    (
        BalanceProblem::new(
            array![[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
            vec![constraint, constraint / 2.0],
            vec![1.0, 1.0, 1.0],
        ),
        BalanceOptions::default().with_upper_bound(50.0),
    )
}

#[test]
fn parallel_results_match_sequential_in_input_order() {
    let balancer = ListBalancer::default();
    let problems: Vec<_> = (1..=16).map(|i| group(i as f64 * 3.0)).collect();

    let parallel = balance_all(&balancer, &problems);
    assert_eq!(parallel.len(), problems.len());

    for ((problem, options), result) in problems.iter().zip(&parallel) {
        let sequential = balancer.balance(problem, options).unwrap();
        assert_eq!(result.as_ref().unwrap(), &sequential);
    }
}

#[test]
fn one_bad_problem_does_not_poison_the_batch() {
    let balancer = ListBalancer::default();
    let mut problems = vec![group(6.0), group(9.0)];
    problems[1].1 = BalanceOptions::default().with_master_control(5);

    let results = balance_all(&balancer, &problems);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(BalanceError::MasterControlOutOfRange { index: 5, .. })
    ));
}

#[test]
fn batch_accepts_trait_objects() {
    let balancer: Box<dyn IBalancer> = Box::new(ListBalancer::default());
    let results = balance_all(balancer.as_ref(), &[group(4.0)]);
    assert!(results[0].as_ref().unwrap().status.converged);
}

#[test]
fn empty_batch_returns_nothing() {
    assert!(balance_all(&ListBalancer::default(), &[]).is_empty());
}
