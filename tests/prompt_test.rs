mod common;

use labsmith::error::{Error, Result};
use labsmith::prompt::{prompt_missing, Prompter};
use labsmith::recipe::Variable;
use std::cell::RefCell;

struct ScriptedPrompter {
    answers: RefCell<Vec<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().rev().map(|a| a.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn answer(&self, variable: &Variable) -> Result<String> {
        self.asked.borrow_mut().push(variable.key.clone());
        Ok(self.answers.borrow_mut().pop().unwrap_or_default())
    }
}

#[test]
fn test_only_missing_required_variables_are_asked() {
    let recipe = common::recipe(vec![
        common::variable("DB_USER", "", true),
        common::variable("TAG", "latest", true),
        common::variable("DB_PASS", "", true),
        common::variable("COMMENT", "", false),
    ]);
    let prompter = ScriptedPrompter::new(&["admin", "hunter2"]);

    let answers =
        prompt_missing(&prompter, &recipe, &common::context(&[("EXTRA", "kept")])).unwrap();

    assert_eq!(*prompter.asked.borrow(), vec!["DB_USER", "DB_PASS"]);
    assert_eq!(
        answers,
        common::context(&[("EXTRA", "kept"), ("DB_USER", "admin"), ("DB_PASS", "hunter2")])
    );
}

#[test]
fn test_nothing_missing_asks_nothing() {
    let recipe = common::recipe(vec![common::variable("DB_PASS", "", true)]);
    let prompter = ScriptedPrompter::new(&[]);

    let answers = prompt_missing(&prompter, &recipe, &common::context(&[("DB_PASS", "x")])).unwrap();
    assert!(prompter.asked.borrow().is_empty());
    assert_eq!(answers, common::context(&[("DB_PASS", "x")]));
}

#[test]
fn test_empty_answer_is_an_error() {
    let recipe = common::recipe(vec![common::variable("DB_PASS", "", true)]);
    let prompter = ScriptedPrompter::new(&[""]);

    match prompt_missing(&prompter, &recipe, &common::context(&[])) {
        Err(Error::MissingRequiredVariable { keys }) => assert_eq!(keys, vec!["DB_PASS"]),
        other => panic!("Expected MissingRequiredVariable, got {other:?}"),
    }
}
