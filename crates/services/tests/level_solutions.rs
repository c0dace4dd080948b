use pathfinder_core::{Catalog, is_equivalent};
use services::{JsonPathEvaluator, QueryEvaluator};

#[test]
fn every_solution_produces_its_expected_result() {
    let catalog = Catalog::builtin().unwrap();
    let evaluator = JsonPathEvaluator::new();

    for level in catalog.levels() {
        let solution = level.solution().unwrap();
        let matches = evaluator.evaluate(solution, level.doc()).unwrap();
        assert!(
            is_equivalent(&matches, level.expected()),
            "level {} ({solution}) returned {matches:?}",
            level.id()
        );
    }
}

#[test]
fn sandbox_suggestions_run() {
    let catalog = Catalog::builtin().unwrap();
    let evaluator = JsonPathEvaluator::new();
    let sandbox = catalog.sandbox();

    for hint in sandbox.hints() {
        let expression = hint.trim_start_matches("Try ");
        let matches = evaluator.evaluate(expression, sandbox.doc()).unwrap();
        assert!(!matches.is_empty(), "{expression} matched nothing");
    }
}

#[test]
fn placeholders_do_not_solve_their_level() {
    let catalog = Catalog::builtin().unwrap();
    let evaluator = JsonPathEvaluator::new();

    for level in catalog.levels() {
        let placeholder = catalog.placeholder(level.id());
        if let Ok(matches) = evaluator.evaluate(placeholder, level.doc()) {
            assert!(!is_equivalent(&matches, level.expected()), "level {}", level.id());
        }
    }
}
