//! Properties every update rule must satisfy on arbitrary games.

mod common;

use common::{
    assert_row_stochastic, initial_receiver, initial_sender, perceptual_game, random_strategies,
    two_state_game,
};
use vagueness::{
    BaseDynamics, BestResponse, Dynamics, DynamicsKind, DynamicsRule, Error, Game, Matrix,
    QuantalResponse, Replicator, pipeline::step,
};

fn all_rules() -> Vec<Box<dyn Dynamics>> {
    vec![
        Box::new(Replicator),
        Box::new(BestResponse),
        Box::new(QuantalResponse::new(20.0).unwrap()),
        Box::new(QuantalResponse::new(0.5).unwrap()),
    ]
}

fn games() -> Vec<Game> {
    vec![
        perceptual_game(8, 2, 3.0),
        perceptual_game(8, 3, 3.0).with_opt_out(),
        perceptual_game(12, 2, 5.0).with_imprecision(),
        perceptual_game(12, 4, 2.0).with_imprecision().with_opt_out(),
    ]
}

#[test]
fn updates_stay_row_stochastic() {
    for game in games() {
        for seed in 0..5 {
            let (sender, receiver) = random_strategies(&game, seed);
            for rule in all_rules() {
                let new_sender = rule.update_sender(&sender, &receiver, &game).unwrap();
                let new_receiver = rule.update_receiver(&new_sender, &receiver, &game).unwrap();
                assert_eq!(new_sender.shape(), sender.shape());
                assert_eq!(new_receiver.shape(), receiver.shape());
                assert_row_stochastic(&new_sender);
                assert_row_stochastic(&new_receiver);
            }
        }
    }
}

#[test]
fn updates_do_not_touch_their_inputs() {
    let game = two_state_game();
    let sender = initial_sender();
    let receiver = initial_receiver();
    for rule in all_rules() {
        step(rule.as_ref(), &game, &sender, &receiver).unwrap();
    }
    assert_eq!(sender, initial_sender());
    assert_eq!(receiver, initial_receiver());
}

#[test]
fn best_response_is_idempotent() {
    let game = perceptual_game(10, 2, 3.0);
    let (sender, receiver) = random_strategies(&game, 11);

    let pure_sender = BestResponse.update_sender(&sender, &receiver, &game).unwrap();
    let again = BestResponse.update_sender(&pure_sender, &receiver, &game).unwrap();
    assert_eq!(again, pure_sender);

    let pure_receiver = BestResponse
        .update_receiver(&pure_sender, &receiver, &game)
        .unwrap();
    let again = BestResponse
        .update_receiver(&pure_sender, &pure_receiver, &game)
        .unwrap();
    assert_eq!(again, pure_receiver);
}

#[test]
fn quantal_response_approaches_best_response() {
    let game = two_state_game();
    let sender = initial_sender();
    let receiver = initial_receiver();

    let best_sender = BestResponse.update_sender(&sender, &receiver, &game).unwrap();
    let best_receiver = BestResponse.update_receiver(&sender, &receiver, &game).unwrap();

    let mut previous = f64::INFINITY;
    for rationality in [1.0, 10.0, 100.0, 1000.0] {
        let rule = QuantalResponse::new(rationality).unwrap();
        let quantal_sender = rule.update_sender(&sender, &receiver, &game).unwrap();
        let quantal_receiver = rule.update_receiver(&sender, &receiver, &game).unwrap();
        let gap = quantal_sender
            .max_abs_difference(&best_sender)
            .unwrap()
            .max(quantal_receiver.max_abs_difference(&best_receiver).unwrap());
        assert!(gap <= previous, "gap grew to {gap} at rationality {rationality}");
        previous = gap;
    }
    assert!(previous < 1e-6, "gap {previous} at rationality 1000");
}

#[test]
fn huge_rationality_stays_finite() {
    let game = perceptual_game(10, 3, 4.0).with_opt_out();
    let (sender, receiver) = random_strategies(&game, 5);
    let rule = QuantalResponse::new(1e6).unwrap();

    let new_sender = rule.update_sender(&sender, &receiver, &game).unwrap();
    let new_receiver = rule.update_receiver(&new_sender, &receiver, &game).unwrap();
    for matrix in [&new_sender, &new_receiver] {
        assert!(matrix.row_iter().flatten().all(|p| p.is_finite()));
        assert_row_stochastic(matrix);
    }
}

#[test]
fn base_contract_is_not_supported() {
    let game = two_state_game();
    let empty = Matrix::zeros(0, 0);

    for (sender, receiver) in [
        (initial_sender(), initial_receiver()),
        (empty.clone(), empty.clone()),
    ] {
        let err = BaseDynamics
            .update_sender(&sender, &receiver, &game)
            .unwrap_err();
        assert!(matches!(err, Error::NotSupported { operation: "update_sender", .. }));

        let err = BaseDynamics
            .update_receiver(&sender, &receiver, &game)
            .unwrap_err();
        assert!(matches!(err, Error::NotSupported { operation: "update_receiver", .. }));
    }
}

#[test]
fn configured_kind_matches_concrete_rule() {
    let game = two_state_game();
    let kind = DynamicsKind::new(DynamicsRule::QuantalResponse, 5.0).unwrap();
    let concrete = QuantalResponse::new(5.0).unwrap();

    assert_eq!(
        kind.update_sender(&initial_sender(), &initial_receiver(), &game)
            .unwrap(),
        concrete
            .update_sender(&initial_sender(), &initial_receiver(), &game)
            .unwrap()
    );
    assert!(DynamicsKind::new(DynamicsRule::QuantalResponse, 0.0).is_err());
    assert!(DynamicsKind::new(DynamicsRule::Replicator, 0.0).is_ok());
}
