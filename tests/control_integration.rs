//! Integration tests for the population control surface
//!
//! Exercises the request-style operations end to end, including the JSON
//! shape a front end receives.

use megadev::control::{PopulationControl, Response};
use megadev::core::EvolutionConfig;
use serde_json::Value;

fn to_json<T: serde::Serialize>(response: &Response<T>) -> Value {
    serde_json::to_value(response).unwrap()
}

#[test]
fn test_request_flow() {
    let mut control = PopulationControl::new(EvolutionConfig::default(), Some(314)).unwrap();

    let before = to_json(&Response::from_result(control.evolve_generation()));
    assert_eq!(before["status"], "error");
    assert_eq!(before["error"], "no population initialized");

    let init = to_json(&Response::from_result(control.initialize_population(8, 4)));
    assert_eq!(init["status"], "success");
    assert_eq!(init["population_size"], 8);
    assert_eq!(init["squad_size"], 4);
    assert_eq!(init["generation"], 0);

    for generation in 1..=4 {
        let report = to_json(&Response::from_result(control.evolve_generation()));
        assert_eq!(report["status"], "success");
        assert_eq!(report["generation"], generation);
        let best = report["best_fitness"].as_f64().unwrap();
        let average = report["average_fitness"].as_f64().unwrap();
        assert!(best >= average);
    }

    let snapshot = serde_json::to_value(control.population_snapshot()).unwrap();
    assert_eq!(snapshot["generation"], 4);
    assert_eq!(snapshot["squads"].as_array().unwrap().len(), 8);
    assert_eq!(snapshot["squads"][0]["agents"], 4);

    let best = to_json(&Response::from_result(control.best_squad()));
    assert_eq!(best["status"], "success");
    let agents = best["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 4);
    assert!(agents[0]["config"]["attention_span"].as_u64().unwrap() >= 1);
}

#[test]
fn test_out_of_range_request_leaves_state_untouched() {
    let mut control = PopulationControl::new(EvolutionConfig::default(), Some(1)).unwrap();
    control.initialize_population(4, 2).unwrap();
    control.evolve_generation().unwrap();

    let rejected = to_json(&Response::from_result(control.initialize_population(500, 2)));
    assert_eq!(rejected["status"], "error");
    assert!(rejected["error"].as_str().unwrap().contains("population_size"));

    assert_eq!(control.generation(), 1);
    assert_eq!(control.population().len(), 4);
}

#[test]
fn test_same_seed_same_history() {
    let run = || {
        let mut control = PopulationControl::new(EvolutionConfig::default(), Some(55)).unwrap();
        control.initialize_population(6, 3).unwrap();
        (0..3)
            .map(|_| control.evolve_generation().unwrap().best_fitness)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
